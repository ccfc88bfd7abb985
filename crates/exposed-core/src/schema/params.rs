// crates/exposed-core/src/schema/params.rs
// ============================================================================
// Module: Parameter Descriptors
// Description: Input and output parameter records of an exposed function.
// Purpose: Describe each parameter by name, type reference and exposure flags.
// Dependencies: serde, serde_json, crate::schema
// ============================================================================

//! ## Overview
//! Parameter descriptors never hold live types: `type` is always a
//! [`TypeRef`]. Whether an input is required is derived from `optional` and
//! `default`; a present `default: null` is a real default and is kept
//! distinct from an absent one.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::FunctionParamError;
use crate::schema::deserialize_present;
use crate::schema::endpoint::Endpoints;
use crate::schema::identifiers::MiddlewareRef;
use crate::schema::identifiers::TypeRef;

// ============================================================================
// SECTION: Input Parameters
// ============================================================================

/// Input parameter of an exposed function.
///
/// # Invariants
/// - `name` is non-empty and unique within the function's inputs.
/// - `optional == Some(false)` never coexists with a present `default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInputParam {
    /// Parameter name.
    pub name: String,
    /// Canonical type reference.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Whether the calling position is significant.
    pub positional: bool,
    /// Default value; `Some(Value::Null)` is a present null default.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub default: Option<Value>,
    /// Explicit optional flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Middleware applied to this parameter on every endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub middleware: Vec<MiddlewareRef>,
    /// Per-protocol configuration.
    #[serde(default, skip_serializing_if = "Endpoints::is_empty")]
    pub endpoints: Endpoints,
}

impl FunctionInputParam {
    /// Creates a required keyword parameter with no metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            positional: false,
            default: None,
            optional: None,
            description: None,
            middleware: Vec::new(),
            endpoints: Endpoints::new(),
        }
    }

    /// Returns true when a default value is present (including `null`).
    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Returns true when the parameter may be omitted by callers.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.optional == Some(true) || self.has_default()
    }

    /// Returns true when callers must supply the parameter.
    #[must_use]
    pub fn is_required(&self) -> bool {
        !self.is_optional()
    }

    /// Checks the invariants that hold for a parameter in isolation.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionParamError`] for an empty name or contradictory flags.
    pub fn validate(&self, position: usize) -> Result<(), FunctionParamError> {
        if self.name.trim().is_empty() {
            return Err(FunctionParamError::EmptyParamName {
                position,
            });
        }
        if self.optional == Some(false) && self.has_default() {
            return Err(FunctionParamError::ContradictoryFlags {
                name: self.name.clone(),
                detail: "optional is false but a default is present",
            });
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Output Parameters
// ============================================================================

/// Output parameter of an exposed function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionOutputParam {
    /// Output name (`out`, `out0`, ... when the source gives none).
    pub name: String,
    /// Canonical type reference.
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Per-protocol configuration.
    #[serde(default, skip_serializing_if = "Endpoints::is_empty")]
    pub endpoints: Endpoints,
}

impl FunctionOutputParam {
    /// Creates an output parameter with no metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            description: None,
            endpoints: Endpoints::new(),
        }
    }
}
