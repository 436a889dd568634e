// system-tests/src/lib.rs
// ============================================================================
// Module: Socket Browser System Tests Library
// Description: Shared constants for end-to-end test scenarios.
// Purpose: Keep suite-wide timing knobs in one place.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts the end-to-end suites in `system-tests/tests`, which
//! drive the real protocol clients against local fixture servers. The
//! library itself only carries suite-wide constants.

// ============================================================================
// SECTION: Timing
// ============================================================================

/// Discovery timeout for suites, tightened from the production default so
/// failing fixtures surface quickly.
pub const SUITE_DISCOVERY_TIMEOUT_MS: u64 = 2_000;

/// Invocation timeout for suites.
pub const SUITE_INVOKE_TIMEOUT_MS: u64 = 2_000;
