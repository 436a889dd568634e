// crates/socket-browser-client/src/lib.rs
// ============================================================================
// Module: Socket Browser Client
// Description: HTTP implementations of the discovery and invocation seams.
// Purpose: Provide the protocol client the navigation engine drives.
// Dependencies: socket-browser-core, reqwest, serde, url
// ============================================================================

//! ## Overview
//! This crate ships the wire-facing half of the navigation engine: the
//! discovery client that probes `/.well-known/socket-agent`, the invocation
//! router that turns symbolic endpoint references and parameter bags into
//! concrete HTTP requests, and the mode detector that votes socket-agent or
//! conventional for a URL. All components are built from a shared
//! [`NetworkPolicy`] and perform exactly one network call per operation;
//! retries are a caller decision.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod detect;
pub mod discovery;
pub mod invoke;
pub mod policy;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use detect::ModeDetector;
pub use discovery::DiscoveryClient;
pub use invoke::ClassifiedParams;
pub use invoke::InvocationRouter;
pub use invoke::ResolvedCall;
pub use invoke::classify_params;
pub use invoke::resolve_endpoint;
pub use policy::NetworkPolicy;
pub use policy::PolicyError;
