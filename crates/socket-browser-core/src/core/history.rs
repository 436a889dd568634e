// crates/socket-browser-core/src/core/history.rs
// ============================================================================
// Module: Navigation History Stack
// Description: Append-with-truncation log of visited navigation states.
// Purpose: Support back/forward/home across both navigation modes.
// Dependencies: crate::core::navigation, serde
// ============================================================================

//! ## Overview
//! The history stack follows standard browser semantics: a fresh navigation
//! after going back discards the abandoned forward branch before appending.
//! Entries are immutable once appended; only the index moves.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::navigation::NavigationEntry;

// ============================================================================
// SECTION: History Stack
// ============================================================================

/// Append-with-truncation log of visited navigation states.
///
/// # Invariants
/// - `index` is `None` exactly when the stack is empty, and otherwise
///   satisfies `index < entries.len()`.
/// - After any fresh (non-back/forward) push the index points at the last
///   entry.
/// - Entries are never mutated after being appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryStack {
    /// Visited entries in visit order.
    entries: Vec<NavigationEntry>,
    /// Position of the currently active entry.
    index: Option<usize>,
}

impl HistoryStack {
    /// Creates an empty history stack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entry has been pushed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of the currently active entry, when any.
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.index
    }

    /// Currently active entry, when any.
    #[must_use]
    pub fn current(&self) -> Option<&NavigationEntry> {
        self.index.and_then(|idx| self.entries.get(idx))
    }

    /// Entry at an arbitrary position, for inspection.
    #[must_use]
    pub fn entry(&self, idx: usize) -> Option<&NavigationEntry> {
        self.entries.get(idx)
    }

    /// All entries in visit order.
    #[must_use]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    /// Returns true when a back move is possible.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.index.is_some_and(|idx| idx > 0)
    }

    /// Returns true when a forward move is possible.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.index.is_some_and(|idx| idx + 1 < self.entries.len())
    }

    /// Appends a fresh entry, discarding any forward branch beyond the
    /// current index first.
    pub fn push(&mut self, entry: NavigationEntry) {
        if let Some(idx) = self.index {
            self.entries.truncate(idx + 1);
        }
        self.entries.push(entry);
        self.index = Some(self.entries.len() - 1);
    }

    /// Moves the index one step back and returns the entry to replay.
    /// A no-op returning `None` when already at the first entry or empty.
    pub fn go_back(&mut self) -> Option<&NavigationEntry> {
        let idx = self.index?;
        if idx == 0 {
            return None;
        }
        self.index = Some(idx - 1);
        self.entries.get(idx - 1)
    }

    /// Moves the index one step forward and returns the entry to replay.
    /// A no-op returning `None` when already at the last entry or empty.
    pub fn go_forward(&mut self) -> Option<&NavigationEntry> {
        let idx = self.index?;
        if idx + 1 >= self.entries.len() {
            return None;
        }
        self.index = Some(idx + 1);
        self.entries.get(idx + 1)
    }

    /// Jumps to the first visited entry and returns it for replay.
    /// A no-op returning `None` on an empty stack.
    pub fn go_home(&mut self) -> Option<&NavigationEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.index = Some(0);
        self.entries.first()
    }
}
