// crates/exposed-core/src/assembly/raw.rs
// ============================================================================
// Module: Raw Introspection Data
// Description: Unvalidated parameter records handed over by an introspector.
// Purpose: Describe a signature before types are resolved and flags checked.
// Dependencies: serde, serde_json, crate::{codec, docstring, schema}
// ============================================================================

//! ## Overview
//! An introspector reports each parameter as a name, a type (either an
//! already-resolved [`TypeRef`] or a [`TypeValue`] still to be encoded), a
//! positional flag and an optional default. Defaults are captured eagerly as
//! JSON; a value that cannot be serialized is kept as [`RawDefault::Unserializable`]
//! so the assembler can reject it with the parameter name attached.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;
use serde_json::Value;

use crate::codec::TypeValue;
use crate::docstring::default_output_name;
use crate::schema::Endpoint;
use crate::schema::Endpoints;
use crate::schema::MiddlewareRef;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Types And Defaults
// ============================================================================

/// Type information for a raw parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// A reference that is canonicalized against the resolver.
    Resolved(TypeRef),
    /// A type value that is encoded against the resolver.
    Value(TypeValue),
}

impl Default for ParamType {
    fn default() -> Self {
        Self::Value(TypeValue::Any)
    }
}

impl From<TypeRef> for ParamType {
    fn from(reference: TypeRef) -> Self {
        Self::Resolved(reference)
    }
}

impl From<TypeValue> for ParamType {
    fn from(value: TypeValue) -> Self {
        Self::Value(value)
    }
}

/// A default value captured from a signature.
#[derive(Debug, Clone, PartialEq)]
pub enum RawDefault {
    /// The default serialized to JSON.
    Value(Value),
    /// The default could not be serialized; carries the serializer message.
    Unserializable(String),
}

impl RawDefault {
    /// Captures `value` as JSON.
    #[must_use]
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(json) => Self::Value(json),
            Err(err) => Self::Unserializable(err.to_string()),
        }
    }
}

impl From<Value> for RawDefault {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

// ============================================================================
// SECTION: Raw Inputs
// ============================================================================

/// An input parameter as reported by an introspector.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInputParam {
    /// Parameter name.
    pub name: String,
    /// Declared type; `Any` when the signature has no annotation.
    pub param_type: ParamType,
    /// Whether the calling position is significant.
    pub positional: bool,
    /// Default from the signature, if any.
    pub default: Option<RawDefault>,
    /// Explicit optional flag.
    pub optional: Option<bool>,
    /// Explicit description; docstring text fills it when absent.
    pub description: Option<String>,
    /// Middleware wrapping this parameter, in execution order.
    pub middleware: Vec<MiddlewareRef>,
    /// Per-protocol exposure configuration.
    pub endpoints: Endpoints,
}

impl RawInputParam {
    /// Creates a keyword parameter of the given type without a default.
    #[must_use]
    pub fn new(name: impl Into<String>, param_type: impl Into<ParamType>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            positional: false,
            default: None,
            optional: None,
            description: None,
            middleware: Vec::new(),
            endpoints: Endpoints::new(),
        }
    }

    /// Creates an unannotated parameter.
    #[must_use]
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::default())
    }

    /// Marks the parameter as positional.
    #[must_use]
    pub const fn positional(mut self) -> Self {
        self.positional = true;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<RawDefault>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the explicit optional flag.
    #[must_use]
    pub const fn with_optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Appends a middleware handle.
    #[must_use]
    pub fn with_middleware(mut self, middleware: impl Into<MiddlewareRef>) -> Self {
        self.middleware.push(middleware.into());
        self
    }

    /// Attaches endpoint configuration for `protocol`.
    #[must_use]
    pub fn with_endpoint(mut self, protocol: impl Into<String>, endpoint: Endpoint) -> Self {
        self.endpoints.insert(protocol.into(), endpoint);
        self
    }
}

// ============================================================================
// SECTION: Raw Outputs
// ============================================================================

/// An output as reported by an introspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutputParam {
    /// Output name; unnamed outputs become `out` or `out0`, `out1`, ...
    pub name: Option<String>,
    /// Declared type.
    pub param_type: ParamType,
    /// Explicit description.
    pub description: Option<String>,
    /// Per-protocol exposure configuration.
    pub endpoints: Endpoints,
}

impl RawOutputParam {
    /// Creates an unnamed output of the given type.
    #[must_use]
    pub fn new(param_type: impl Into<ParamType>) -> Self {
        Self {
            name: None,
            param_type: param_type.into(),
            description: None,
            endpoints: Endpoints::new(),
        }
    }

    /// Creates a named output of the given type.
    #[must_use]
    pub fn named(name: impl Into<String>, param_type: impl Into<ParamType>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(param_type)
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches endpoint configuration for `protocol`.
    #[must_use]
    pub fn with_endpoint(mut self, protocol: impl Into<String>, endpoint: Endpoint) -> Self {
        self.endpoints.insert(protocol.into(), endpoint);
        self
    }
}

/// Splits a return annotation into outputs.
///
/// `None` declares no outputs, a non-empty `Tuple[a, b, ...]` declares one
/// output per item (`out0`, `out1`, ...) and anything else declares a single
/// output named `out`.
#[must_use]
pub fn outputs_from_return(annotation: &TypeValue) -> Vec<RawOutputParam> {
    match annotation.normalize() {
        TypeValue::None => Vec::new(),
        TypeValue::Tuple(items) if !items.is_empty() => {
            let count = items.len();
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| RawOutputParam::named(default_output_name(index, count), item))
                .collect()
        }
        other => vec![RawOutputParam::named(default_output_name(0, 1), other)],
    }
}
