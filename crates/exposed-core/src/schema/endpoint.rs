// crates/exposed-core/src/schema/endpoint.rs
// ============================================================================
// Module: Endpoint Metadata
// Description: Per-protocol exposure configuration with middleware chains.
// Purpose: Record which middleware wraps a parameter or function per endpoint.
// Dependencies: serde, crate::schema::identifiers
// ============================================================================

//! ## Overview
//! An [`Endpoint`] is the configuration one endpoint protocol applies to a
//! parameter or a whole function. Middleware order is execution order and
//! duplicates are allowed; an empty chain means no wrapping. Protocol keys in
//! an [`Endpoints`] map are free-form and never validated here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::schema::identifiers::MiddlewareRef;

// ============================================================================
// SECTION: Endpoint
// ============================================================================

/// Endpoint configuration keyed by protocol name.
pub type Endpoints = BTreeMap<String, Endpoint>;

/// Configuration applied by one endpoint protocol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Ordered middleware chain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<MiddlewareRef>,
}

impl Endpoint {
    /// Creates an endpoint with no middleware.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            middleware: Vec::new(),
        }
    }

    /// Appends a middleware handle to the chain.
    #[must_use]
    pub fn with_middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Returns true when the endpoint applies no wrapping.
    #[must_use]
    pub const fn is_passthrough(&self) -> bool {
        self.middleware.is_empty()
    }
}
