// crates/exposed-core/src/schema/identifiers.rs
// ============================================================================
// Module: Exposure Identifiers
// Description: Opaque string identifiers used by exposed function descriptors.
// Purpose: Keep type references and middleware handles strongly typed.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Identifiers are opaque and serialize as plain strings. A [`TypeRef`] is
//! only meaningful within the resolution context that produced it; a
//! [`MiddlewareRef`] is resolved and executed by the endpoint layer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Canonical type reference (e.g. `Dict[str, List[int]]`).
///
/// # Invariants
/// - References produced by the codec decode back within the same context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    /// Creates a new type reference.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the reference is exactly `Any`.
    #[must_use]
    pub fn is_any(&self) -> bool {
        self.0 == "Any"
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Opaque middleware handle resolved by the endpoint layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MiddlewareRef(String);

impl MiddlewareRef {
    /// Creates a new middleware handle.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MiddlewareRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MiddlewareRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MiddlewareRef {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
