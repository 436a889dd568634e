// crates/socket-browser-core/src/core/descriptor.rs
// ============================================================================
// Module: Capability Descriptor Model
// Description: Wire shape for socket-agent capability descriptors.
// Purpose: Provide validated descriptor and endpoint types for discovery.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! A capability descriptor is the JSON document a socket-agent origin serves
//! at its well-known path. It declares the service name, a base URL, and an
//! ordered list of callable endpoints. Descriptors are validated at the
//! discovery boundary; a descriptor failing the required-field check is
//! never admitted into navigation state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Well-known path probed during discovery, relative to an origin.
pub const WELL_KNOWN_PATH: &str = "/.well-known/socket-agent";

/// Effective HTTP method for endpoints that declare none.
pub const DEFAULT_METHOD: &str = "GET";

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// A remote service's declared capabilities.
///
/// # Invariants
/// - `name` is non-empty once validated.
/// - `base_url` carries no trailing slash once admitted into state.
/// - `context` is a transient annotation attached during regeneration; it is
///   never part of the wire payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Service name declared by the origin.
    pub name: String,
    /// Optional human-readable service description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base URL all endpoint paths are resolved against. Absent on the wire
    /// when the origin expects the discovery URL to be used.
    #[serde(rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Ordered sequence of callable endpoints. Required, may be empty.
    pub endpoints: Vec<Endpoint>,
    /// Transient regeneration context. Not a wire field.
    #[serde(skip)]
    pub context: Option<serde_json::Value>,
}

/// One callable capability within a descriptor.
///
/// # Invariants
/// - `path` is a template string with `{param}` placeholders.
/// - `(method, path)` pairs need not be unique; resolution order over the
///   endpoint sequence is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Optional stable operation identifier.
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    /// Path template relative to the descriptor base URL.
    pub path: String,
    /// Declared HTTP method; effective default is [`DEFAULT_METHOD`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Optional one-line summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Endpoint {
    /// Returns the effective HTTP method for this endpoint.
    #[must_use]
    pub fn effective_method(&self) -> &str {
        self.method.as_deref().unwrap_or(DEFAULT_METHOD)
    }

    /// Returns the `method:path` composite used as a resolution key.
    #[must_use]
    pub fn composite_ref(&self) -> String {
        format!("{}:{}", self.effective_method(), self.path)
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Errors raised when a descriptor fails the required-field check.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The descriptor `name` field is empty.
    #[error("descriptor name must be non-empty")]
    EmptyName,
}

impl Descriptor {
    /// Validates the required-field invariants.
    ///
    /// Presence of `endpoints` is enforced structurally by deserialization;
    /// an empty endpoint list is permitted.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] when a required field is missing or empty.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }
        Ok(())
    }

    /// Normalizes the base URL in place, defaulting it to `origin` when the
    /// wire payload omitted it.
    pub fn normalize_base_url(&mut self, origin: &str) {
        let base = match self.base_url.take() {
            Some(url) => normalize_origin(&url),
            None => normalize_origin(origin),
        };
        self.base_url = Some(base);
    }

    /// Returns the normalized base URL, or an empty string before
    /// normalization has run.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or("")
    }

    /// Returns a copy of this descriptor carrying the given regeneration
    /// context.
    #[must_use]
    pub fn with_context(&self, context: serde_json::Value) -> Self {
        let mut descriptor = self.clone();
        descriptor.context = Some(context);
        descriptor
    }
}

/// Strips a single trailing slash from an origin or base URL.
#[must_use]
pub fn normalize_origin(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}
