// crates/socket-browser-core/src/lib.rs
// ============================================================================
// Module: Socket Browser Core Library
// Description: Public API surface for the Socket Browser core.
// Purpose: Expose descriptor, navigation, and collaborator interface types.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Socket Browser core provides the data model for the socket-agent
//! discovery protocol and the hybrid-mode navigation engine: capability
//! descriptors, navigation state and history, the error taxonomy, and the
//! interface seams through which the engine reaches its external
//! collaborators (generation backend, conventional viewport, credential
//! gate, and the installed markup surface). This crate is pure data and
//! traits; it performs no network or rendering work itself.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::ActionOutcome;
pub use interfaces::AgentDiscovery;
pub use interfaces::CredentialGate;
pub use interfaces::EndpointInvoker;
pub use interfaces::GeneratedSurface;
pub use interfaces::ModeProbe;
pub use interfaces::ParamMap;
pub use interfaces::SurfaceGenerator;
pub use interfaces::Viewport;
