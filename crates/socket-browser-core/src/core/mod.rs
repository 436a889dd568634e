// crates/socket-browser-core/src/core/mod.rs
// ============================================================================
// Module: Socket Browser Core Types
// Description: Canonical descriptor, navigation, and history structures.
// Purpose: Provide stable, serializable types for the navigation engine.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types define the capability descriptor wire shape, the navigation
//! state owned by the state machine, the append-with-truncation history
//! stack, the error taxonomy, and explicit timestamps. These types are the
//! canonical source of truth for any derived host surface.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod descriptor;
pub mod errors;
pub mod history;
pub mod navigation;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use descriptor::DEFAULT_METHOD;
pub use descriptor::Descriptor;
pub use descriptor::DescriptorError;
pub use descriptor::Endpoint;
pub use descriptor::WELL_KNOWN_PATH;
pub use descriptor::normalize_origin;
pub use errors::DiscoveryError;
pub use errors::GenerationError;
pub use errors::InvocationError;
pub use errors::NavigationError;
pub use errors::UnreachableReason;
pub use errors::ViewportError;
pub use history::HistoryStack;
pub use navigation::ModeDecision;
pub use navigation::NavToken;
pub use navigation::NavigationEntry;
pub use navigation::NavigationMode;
pub use navigation::NavigationState;
pub use navigation::ScreenState;
pub use time::Clock;
pub use time::SystemClock;
pub use time::Timestamp;
