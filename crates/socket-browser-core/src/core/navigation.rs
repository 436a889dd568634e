// crates/socket-browser-core/src/core/navigation.rs
// ============================================================================
// Module: Navigation State Model
// Description: Mode, screen, history entry, and in-flight token types.
// Purpose: Capture the process-wide navigation state owned by the state machine.
// Dependencies: crate::core::{descriptor, errors, history, time}, serde
// ============================================================================

//! ## Overview
//! [`NavigationState`] is the single process-wide navigation record. It is
//! exclusively owned and mutated by the navigation state machine; all other
//! components read values passed through it but never mutate it directly.
//! Staleness of asynchronous navigations is handled by comparing captured
//! [`NavToken`] values against the live one, never by cancelling requests.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::descriptor::Descriptor;
use crate::core::errors::NavigationError;
use crate::core::history::HistoryStack;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Modes and Screens
// ============================================================================

/// Rendering mode of a committed navigation.
///
/// # Invariants
/// - Variants are stable for serialization and history replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationMode {
    /// No navigation has committed yet.
    Idle,
    /// Machine-generated interface driven by a capability descriptor.
    SocketAgent,
    /// Conventional page rendered by the external viewport.
    Conventional,
}

/// Screen state of the navigation surface.
///
/// # Invariants
/// - `Active` and `Error` are terminal only until the next navigation
///   request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenState {
    /// Initial state before any navigation.
    Blank,
    /// A navigation is resolving.
    Loading,
    /// The last navigation committed successfully.
    Active,
    /// The last navigation failed.
    Error,
}

/// Outcome of probing a URL for socket-agent support.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeDecision {
    /// The origin serves a valid capability descriptor.
    SocketAgent(Descriptor),
    /// The origin is an ordinary site; discovery failed or was absent.
    Conventional,
}

// ============================================================================
// SECTION: History Entries
// ============================================================================

/// One unit of navigation history.
///
/// # Invariants
/// - `descriptor` and `snapshot` are present only for socket-agent entries.
/// - Conventional snapshots are never read back; conventional history is
///   replayed by re-pointing the viewport at `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationEntry {
    /// URL this entry was navigated to.
    pub url: String,
    /// Mode the entry committed in.
    pub mode: NavigationMode,
    /// Capability descriptor, socket-agent entries only.
    pub descriptor: Option<Descriptor>,
    /// Installed markup snapshot, socket-agent entries only.
    pub snapshot: Option<String>,
    /// Commit time supplied by the machine's clock.
    pub created_at: Timestamp,
}

// ============================================================================
// SECTION: In-Flight Tokens
// ============================================================================

/// Opaque monotonic token identifying one started navigation.
///
/// # Invariants
/// - Tokens are issued strictly increasing by the state machine; a
///   resolution whose captured token no longer matches the live token must
///   discard itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavToken(u64);

impl NavToken {
    /// Creates a token from its monotonic counter value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the underlying counter value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

// ============================================================================
// SECTION: Navigation State
// ============================================================================

/// Process-wide navigation state, single instance per application.
///
/// # Invariants
/// - Mutated exclusively by the navigation state machine.
/// - `current_descriptor` is present only in socket-agent mode.
/// - `last_error` is present only while `screen` is [`ScreenState::Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    /// Current rendering mode.
    pub mode: NavigationMode,
    /// Current screen state.
    pub screen: ScreenState,
    /// URL of the current navigation, when any.
    pub current_url: Option<String>,
    /// Descriptor of the current socket-agent page, when any.
    pub current_descriptor: Option<Descriptor>,
    /// Visited history with its active index.
    pub history: HistoryStack,
    /// Failure shown by the ERROR screen, when any.
    pub last_error: Option<NavigationError>,
    /// Token of the most recently started navigation.
    pub in_flight: Option<NavToken>,
}

impl NavigationState {
    /// Creates the initial blank state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: NavigationMode::Idle,
            screen: ScreenState::Blank,
            current_url: None,
            current_descriptor: None,
            history: HistoryStack::new(),
            last_error: None,
            in_flight: None,
        }
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
