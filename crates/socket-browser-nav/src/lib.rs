// crates/socket-browser-nav/src/lib.rs
// ============================================================================
// Module: Socket Browser Navigation
// Description: Hybrid-mode navigation state machine and event binder.
// Purpose: Drive mode detection, generation, history, and surface events.
// Dependencies: socket-browser-core, serde_json
// ============================================================================

//! ## Overview
//! This crate owns the navigation control flow: the state machine that
//! turns a bare URL into a socket-agent or conventional experience, the
//! history replay logic, the staleness discipline for overlapping
//! navigations, and the pure event routing that re-enters the generation
//! pipeline when the user acts on a generated interface. All external
//! effects flow through the collaborator seams defined in
//! `socket-browser-core`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod binder;
pub mod machine;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use binder::EventCommand;
pub use binder::LinkTarget;
pub use binder::SurfaceEvent;
pub use binder::classify_link;
pub use binder::route_event;
pub use machine::Collaborators;
pub use machine::EventOutcome;
pub use machine::NavOutcome;
pub use machine::NavigationMachine;
pub use telemetry::HistoryDirection;
pub use telemetry::InteractionKind;
pub use telemetry::MetricMode;
pub use telemetry::MetricOutcome;
pub use telemetry::NavigationMetrics;
pub use telemetry::NoopNavigationMetrics;
