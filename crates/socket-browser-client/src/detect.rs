// crates/socket-browser-client/src/detect.rs
// ============================================================================
// Module: Mode Detector
// Description: Socket-agent versus conventional vote for a URL.
// Purpose: Orchestrate discovery into a never-failing mode decision.
// Dependencies: socket-browser-core, crate::{discovery, policy}
// ============================================================================

//! ## Overview
//! Discovery absence is the normal case for the majority of URLs, so the
//! detector swallows every discovery failure into a silent, fast
//! conventional vote instead of surfacing an error. A successful probe
//! yields the validated descriptor for the socket-agent branch.

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use socket_browser_core::AgentDiscovery;
use socket_browser_core::ModeDecision;
use socket_browser_core::ModeProbe;

use crate::discovery::DiscoveryClient;
use crate::policy::NetworkPolicy;
use crate::policy::PolicyError;

// ============================================================================
// SECTION: Mode Detector
// ============================================================================

/// Mode decision built on top of a discovery probe.
///
/// # Invariants
/// - Never fails outward; every discovery failure votes conventional.
pub struct ModeDetector<D: AgentDiscovery> {
    /// Discovery probe consulted for the vote.
    discovery: D,
}

impl ModeDetector<DiscoveryClient> {
    /// Creates a detector backed by the HTTP discovery client.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] when the HTTP client cannot be built.
    pub fn from_policy(policy: NetworkPolicy) -> Result<Self, PolicyError> {
        Ok(Self::new(DiscoveryClient::new(policy)?))
    }
}

impl<D: AgentDiscovery> ModeDetector<D> {
    /// Creates a detector over an arbitrary discovery probe.
    pub const fn new(discovery: D) -> Self {
        Self {
            discovery,
        }
    }

    /// Decides the navigation mode for `url`.
    pub async fn detect(&self, url: &str) -> ModeDecision {
        match self.discovery.discover(url).await {
            Ok(descriptor) => ModeDecision::SocketAgent(descriptor),
            Err(_) => ModeDecision::Conventional,
        }
    }
}

#[async_trait]
impl<D: AgentDiscovery> ModeProbe for ModeDetector<D> {
    async fn detect(&self, url: &str) -> ModeDecision {
        Self::detect(self, url).await
    }
}
