// crates/socket-browser-nav/src/telemetry.rs
// ============================================================================
// Module: Navigation Telemetry
// Description: Observability hooks for navigation and interaction flow.
// Purpose: Provide metric events without hard backend dependencies.
// Dependencies: none beyond std
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for navigation counters and
//! latency observations. It is intentionally dependency-light so hosts can
//! plug in Prometheus or OpenTelemetry without redesign; the default sink
//! discards everything.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Navigation branch classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricMode {
    /// Machine-generated interface branch.
    SocketAgent,
    /// Conventional viewport branch.
    Conventional,
}

impl MetricMode {
    /// Returns a stable label for the branch.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SocketAgent => "socket_agent",
            Self::Conventional => "conventional",
        }
    }
}

/// Navigation outcome classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricOutcome {
    /// The navigation committed into state.
    Committed,
    /// The navigation failed and committed the error screen.
    Failed,
    /// The navigation resolved stale and was discarded.
    Stale,
}

impl MetricOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Committed => "committed",
            Self::Failed => "failed",
            Self::Stale => "stale",
        }
    }
}

/// Generated-surface interaction classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Hyperlink activation.
    Link,
    /// Form submission.
    Form,
    /// Declared-action control.
    Action,
}

impl InteractionKind {
    /// Returns a stable label for the interaction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Form => "form",
            Self::Action => "action",
        }
    }
}

/// History move classification.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// One step back.
    Back,
    /// One step forward.
    Forward,
    /// Jump to the first visited entry.
    Home,
}

impl HistoryDirection {
    /// Returns a stable label for the move.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Forward => "forward",
            Self::Home => "home",
        }
    }
}

// ============================================================================
// SECTION: Metrics Interface
// ============================================================================

/// Sink for navigation metric events.
pub trait NavigationMetrics: Send + Sync {
    /// Records a resolved navigation with its branch, outcome, and latency.
    fn record_navigation(&self, mode: MetricMode, outcome: MetricOutcome, latency: Duration);

    /// Records a generated-surface interaction and whether it succeeded.
    fn record_interaction(&self, kind: InteractionKind, ok: bool);

    /// Records a history replay move.
    fn record_history_move(&self, direction: HistoryDirection);
}

/// Metrics sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNavigationMetrics;

impl NavigationMetrics for NoopNavigationMetrics {
    fn record_navigation(&self, _mode: MetricMode, _outcome: MetricOutcome, _latency: Duration) {}

    fn record_interaction(&self, _kind: InteractionKind, _ok: bool) {}

    fn record_history_move(&self, _direction: HistoryDirection) {}
}
