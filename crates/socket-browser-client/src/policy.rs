// crates/socket-browser-client/src/policy.rs
// ============================================================================
// Module: Network Policy
// Description: Shared network limits for discovery and invocation calls.
// Purpose: Centralize timeouts, user agent, and response size caps.
// Dependencies: reqwest, serde, thiserror
// ============================================================================

//! ## Overview
//! The network policy carries the per-call time bounds and size limits the
//! protocol client enforces. Timeouts are the only time-bound control in
//! the navigation core; staleness of overlapping navigations is handled by
//! token checks, never by aborting requests. The policy is not configurable
//! per call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Network limits shared by the discovery client and invocation router.
///
/// # Invariants
/// - `discovery_timeout_ms` and `invoke_timeout_ms` apply to the full
///   request lifecycle of their respective calls.
/// - `max_response_bytes` is a hard upper bound on response bodies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NetworkPolicy {
    /// Discovery probe timeout in milliseconds.
    pub discovery_timeout_ms: u64,
    /// Endpoint invocation timeout in milliseconds.
    pub invoke_timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
}

impl Default for NetworkPolicy {
    fn default() -> Self {
        Self {
            discovery_timeout_ms: 10_000,
            invoke_timeout_ms: 15_000,
            user_agent: "socket-browser/0.1".to_string(),
            max_response_bytes: 1024 * 1024,
        }
    }
}

/// Errors raised while applying the network policy.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// The HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    ClientBuild(String),
}

impl NetworkPolicy {
    /// Builds an HTTP client enforcing this policy with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the client cannot be constructed.
    pub(crate) fn build_client(&self, timeout_ms: u64) -> Result<Client, PolicyError> {
        Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|err| PolicyError::ClientBuild(err.to_string()))
    }
}
