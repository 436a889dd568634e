// crates/socket-browser-core/src/core/errors.rs
// ============================================================================
// Module: Navigation Error Taxonomy
// Description: Failure kinds for discovery, invocation, and navigation.
// Purpose: Provide stable, typed failures that always resolve to state transitions.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure in the navigation core resolves to a state transition,
//! never a crash. Discovery and invocation carry distinguished network
//! failure kinds because the mode detector and the error screen need them
//! for decisions and diagnostics. [`NavigationError`] is the umbrella the
//! ERROR screen renders.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Discovery Errors
// ============================================================================

/// Reason a discovery target could not be reached.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnreachableReason {
    /// The target refused the TCP connection.
    #[error("connection refused")]
    ConnectionRefused,
    /// The target hostname did not resolve.
    #[error("dns resolution failed")]
    DnsFailure,
    /// The target answered with a non-success HTTP status other than 404.
    #[error("http status {0}")]
    HttpStatus(u16),
    /// Any other transport-level failure.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Failure kinds for the discovery probe.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Discovery is never partially successful; an invalid payload fails outright.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// The origin answered 404 at the well-known path.
    #[error("no socket-agent descriptor found at the well-known path")]
    NotFound,
    /// The origin could not be reached or answered a non-success status.
    #[error("origin unreachable: {0}")]
    Unreachable(UnreachableReason),
    /// The payload was not a valid descriptor.
    #[error("invalid descriptor payload: {0}")]
    InvalidPayload(String),
    /// The probe exceeded the discovery timeout.
    #[error("discovery timed out")]
    Timeout,
}

// ============================================================================
// SECTION: Invocation Errors
// ============================================================================

/// Failure kinds for endpoint invocation.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `message` carries any structured error text the server supplied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The server answered with a 4xx status.
    #[error("client error ({status}): {}", message.as_deref().unwrap_or("no detail"))]
    ClientError {
        /// HTTP status code in the 4xx range.
        status: u16,
        /// Server-supplied error text, when present.
        message: Option<String>,
    },
    /// The server answered with a 5xx status.
    #[error("server error ({status}): {}", message.as_deref().unwrap_or("no detail"))]
    ServerError {
        /// HTTP status code in the 5xx range.
        status: u16,
        /// Server-supplied error text, when present.
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// The request exceeded the invocation timeout.
    #[error("invocation timed out")]
    TimedOut,
}

// ============================================================================
// SECTION: Collaborator Errors
// ============================================================================

/// Opaque failure reported by the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generation failed: {0}")]
pub struct GenerationError(pub String);

/// Opaque failure reported by the viewport collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page load failed: {0}")]
pub struct ViewportError(pub String);

// ============================================================================
// SECTION: Navigation Umbrella
// ============================================================================

/// Failure rendered by the full-page ERROR screen.
///
/// # Invariants
/// - Variants are stable for programmatic handling and carry
///   human-readable messages via `Display`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigationError {
    /// The credential gate denied generation.
    #[error("authorization required: sign in before generating an interface")]
    AuthorizationRequired,
    /// The generation collaborator failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// The viewport collaborator failed to load a page.
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    /// A direct re-discovery flow failed.
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    /// A link or form navigation invocation failed.
    #[error(transparent)]
    Invocation(#[from] InvocationError),
}
