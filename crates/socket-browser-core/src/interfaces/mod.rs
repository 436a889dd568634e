// crates/socket-browser-core/src/interfaces/mod.rs
// ============================================================================
// Module: Socket Browser Interfaces
// Description: Collaborator and protocol-client seams for the navigation engine.
// Purpose: Define the contract surfaces the state machine drives.
// Dependencies: crate::core, async-trait, serde_json
// ============================================================================

//! ## Overview
//! Interfaces define how the navigation engine integrates with its external
//! collaborators without embedding backend-specific details: the generation
//! backend that turns a descriptor into markup, the conventional-page
//! viewport, the credential gate consulted before generation, the installed
//! markup surface, and the protocol-client seams (discovery, invocation,
//! mode probing) implemented by `socket-browser-client`. All network-facing
//! methods suspend cooperatively; none spawn parallel navigation logic.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::core::Descriptor;
use crate::core::DiscoveryError;
use crate::core::GenerationError;
use crate::core::InvocationError;
use crate::core::ModeDecision;
use crate::core::ViewportError;

// ============================================================================
// SECTION: Parameter Bags
// ============================================================================

/// Ordered parameter bag passed to endpoint invocations.
pub type ParamMap = BTreeMap<String, serde_json::Value>;

// ============================================================================
// SECTION: Protocol Client Seams
// ============================================================================

/// Discovery probe for a candidate socket-agent origin.
#[async_trait]
pub trait AgentDiscovery: Send + Sync {
    /// Fetches and validates the capability descriptor served by `url`.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when the origin is unreachable, answers
    /// 404, times out, or serves an invalid payload.
    async fn discover(&self, url: &str) -> Result<Descriptor, DiscoveryError>;
}

/// Resolver and executor for declared endpoint invocations.
#[async_trait]
pub trait EndpointInvoker: Send + Sync {
    /// Resolves `endpoint_ref` against `descriptor` and performs exactly one
    /// network call, returning the decoded response body.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError`] classified by status range or transport
    /// failure. The caller decides whether to retry.
    async fn invoke(
        &self,
        base_url: &str,
        endpoint_ref: &str,
        params: &ParamMap,
        descriptor: Option<&Descriptor>,
    ) -> Result<serde_json::Value, InvocationError>;
}

/// Mode decision for a URL. Implementations never fail outward; any
/// discovery failure is swallowed into a conventional vote.
#[async_trait]
pub trait ModeProbe: Send + Sync {
    /// Decides between socket-agent and conventional mode for `url`.
    async fn detect(&self, url: &str) -> ModeDecision;
}

// ============================================================================
// SECTION: Generation Collaborator
// ============================================================================

/// Black-box generation backend turning a descriptor into markup.
#[async_trait]
pub trait SurfaceGenerator: Send + Sync {
    /// Generates an interface markup string for `descriptor`, including any
    /// attached regeneration context.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on any backend failure; the machine
    /// transitions to the ERROR screen without touching history.
    async fn generate(&self, descriptor: &Descriptor) -> Result<String, GenerationError>;
}

// ============================================================================
// SECTION: Viewport Collaborator
// ============================================================================

/// Black-box viewport rendering conventional pages.
#[async_trait]
pub trait Viewport: Send + Sync {
    /// Points the viewport at `url` and waits for the load outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ViewportError`] when the load fails.
    async fn load(&self, url: &str) -> Result<(), ViewportError>;

    /// Makes the viewport visible.
    fn show(&self);

    /// Hides the viewport behind the generated surface.
    fn hide(&self);
}

// ============================================================================
// SECTION: Credential Collaborator
// ============================================================================

/// Stateless credential check gating generation calls.
pub trait CredentialGate: Send + Sync {
    /// Returns true when the host holds credentials for generation.
    fn is_authorized(&self) -> bool;
}

// ============================================================================
// SECTION: Generated Surface
// ============================================================================

/// Outcome rendered in place next to a declared-action control.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The invocation succeeded with this response body.
    Success(serde_json::Value),
    /// The invocation failed with this human-readable message.
    Failure(String),
}

/// Host surface holding the installed generated markup.
///
/// The machine installs markup on commit and on history replay; inline
/// action outcomes are rendered next to the triggering control without
/// leaving the page.
pub trait GeneratedSurface: Send {
    /// Replaces the surface content with `markup`.
    fn install(&mut self, markup: &str);

    /// Renders an invocation outcome next to the control identified by
    /// `control_id`.
    fn render_inline(&mut self, control_id: &str, outcome: &ActionOutcome);
}
