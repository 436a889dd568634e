// crates/socket-browser-client/src/discovery.rs
// ============================================================================
// Module: Discovery Client
// Description: Probe for socket-agent capability descriptors.
// Purpose: Fetch and validate descriptors from candidate origins.
// Dependencies: socket-browser-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! The discovery client issues a single bounded GET to the well-known path
//! of a candidate origin and validates the returned descriptor. Discovery
//! is a cheap probe: it never retries (the user re-navigating is the
//! retry), never partially succeeds, and distinguishes connection refusal,
//! DNS failure, timeout, and HTTP-status failures so the mode detector and
//! the error screen can react to each.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as _;
use std::io::ErrorKind;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use socket_browser_core::AgentDiscovery;
use socket_browser_core::Descriptor;
use socket_browser_core::DiscoveryError;
use socket_browser_core::UnreachableReason;
use socket_browser_core::WELL_KNOWN_PATH;
use socket_browser_core::normalize_origin;
use url::Url;

use crate::policy::NetworkPolicy;
use crate::policy::PolicyError;

// ============================================================================
// SECTION: Discovery Client
// ============================================================================

/// HTTP client probing candidate origins for capability descriptors.
///
/// # Invariants
/// - Exactly one network call per probe; no retries, no caching.
/// - A descriptor failing validation is never returned.
pub struct DiscoveryClient {
    /// Network limits applied to the probe.
    policy: NetworkPolicy,
    /// HTTP client configured with the discovery timeout.
    client: Client,
}

impl DiscoveryClient {
    /// Creates a discovery client from the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the HTTP client cannot be built.
    pub fn new(policy: NetworkPolicy) -> Result<Self, PolicyError> {
        let client = policy.build_client(policy.discovery_timeout_ms)?;
        Ok(Self {
            policy,
            client,
        })
    }

    /// Fetches and validates the descriptor served by `url`.
    ///
    /// The URL is normalized by stripping a single trailing slash before
    /// the well-known path is appended. A payload that omits `baseUrl` is
    /// patched to the normalized URL.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] on any transport, status, or payload
    /// failure; discovery is never partially successful.
    pub async fn discover(&self, url: &str) -> Result<Descriptor, DiscoveryError> {
        let origin = normalize_origin(url);
        validate_candidate(&origin)?;
        let probe_url = format!("{origin}{WELL_KNOWN_PATH}");

        let response = self
            .client
            .get(&probe_url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| classify_transport(&err))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::NOT_FOUND {
                return Err(DiscoveryError::NotFound);
            }
            return Err(DiscoveryError::Unreachable(UnreachableReason::HttpStatus(
                status.as_u16(),
            )));
        }

        let body = response.bytes().await.map_err(|err| classify_transport(&err))?;
        if body.len() > self.policy.max_response_bytes {
            return Err(DiscoveryError::InvalidPayload(
                "descriptor exceeds size limit".to_string(),
            ));
        }

        let mut descriptor: Descriptor = serde_json::from_slice(&body)
            .map_err(|err| DiscoveryError::InvalidPayload(err.to_string()))?;
        descriptor
            .validate()
            .map_err(|err| DiscoveryError::InvalidPayload(err.to_string()))?;
        descriptor.normalize_base_url(&origin);
        Ok(descriptor)
    }
}

#[async_trait]
impl AgentDiscovery for DiscoveryClient {
    async fn discover(&self, url: &str) -> Result<Descriptor, DiscoveryError> {
        Self::discover(self, url).await
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Rejects candidate URLs that cannot serve a descriptor.
fn validate_candidate(origin: &str) -> Result<(), DiscoveryError> {
    let parsed = Url::parse(origin).map_err(|err| {
        DiscoveryError::Unreachable(UnreachableReason::Transport(format!("invalid url: {err}")))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DiscoveryError::Unreachable(UnreachableReason::Transport(format!(
            "unsupported url scheme: {other}"
        )))),
    }
}

/// Maps a transport-level failure onto the discovery taxonomy.
fn classify_transport(err: &reqwest::Error) -> DiscoveryError {
    if err.is_timeout() {
        return DiscoveryError::Timeout;
    }
    if let Some(kind) = io_error_kind(err)
        && kind == ErrorKind::ConnectionRefused
    {
        return DiscoveryError::Unreachable(UnreachableReason::ConnectionRefused);
    }
    if is_dns_failure(err) {
        return DiscoveryError::Unreachable(UnreachableReason::DnsFailure);
    }
    DiscoveryError::Unreachable(UnreachableReason::Transport(err.to_string()))
}

/// Finds the innermost I/O error kind in the failure chain, when any.
fn io_error_kind(err: &reqwest::Error) -> Option<ErrorKind> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io) = cause.downcast_ref::<std::io::Error>() {
            return Some(io.kind());
        }
        source = cause.source();
    }
    None
}

/// Best-effort detection of name-resolution failures in the error chain.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(cause) = source {
        let text = cause.to_string().to_ascii_lowercase();
        if text.contains("dns") || text.contains("failed to lookup") {
            return true;
        }
        source = cause.source();
    }
    false
}
