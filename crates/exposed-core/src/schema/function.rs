// crates/exposed-core/src/schema/function.rs
// ============================================================================
// Module: Function Descriptor
// Description: The serializable aggregate describing one exposed function.
// Purpose: Provide the self-contained unit handed to endpoint implementations.
// Dependencies: serde, crate::{error, schema}
// ============================================================================

//! ## Overview
//! [`SerializedFunction`] is the unit of exchange with endpoint layers. Its
//! structural invariants are enforced at construction and again when a value
//! is deserialized, so a descriptor read from storage or the wire is exactly
//! as trustworthy as one assembled in-process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FunctionParamError;
use crate::schema::docstring::DocstringParserResult;
use crate::schema::endpoint::Endpoints;
use crate::schema::params::FunctionInputParam;
use crate::schema::params::FunctionOutputParam;

// ============================================================================
// SECTION: Serialized Function
// ============================================================================

/// Serializable descriptor of an exposed function.
///
/// # Invariants
/// - `name` is non-empty.
/// - Input names are non-empty and unique; output names likewise.
/// - No input has `optional == false` together with a default.
/// - No required positional input follows an optional positional input.
/// - Input order is source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SerializedFunctionWire")]
pub struct SerializedFunction {
    /// Function name.
    name: String,
    /// Input parameters in source order.
    input_params: Vec<FunctionInputParam>,
    /// Output parameters in declaration order.
    output_params: Vec<FunctionOutputParam>,
    /// Parsed documentation, when the function has a usable docstring.
    docstring: Option<DocstringParserResult>,
    /// Function-wide per-protocol configuration.
    #[serde(skip_serializing_if = "Endpoints::is_empty")]
    endpoints: Endpoints,
}

/// Unvalidated wire form of [`SerializedFunction`].
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SerializedFunctionWire {
    /// Function name.
    name: String,
    /// Input parameters.
    #[serde(default)]
    input_params: Vec<FunctionInputParam>,
    /// Output parameters.
    #[serde(default)]
    output_params: Vec<FunctionOutputParam>,
    /// Parsed documentation.
    #[serde(default)]
    docstring: Option<DocstringParserResult>,
    /// Function-wide per-protocol configuration.
    #[serde(default)]
    endpoints: Endpoints,
}

impl TryFrom<SerializedFunctionWire> for SerializedFunction {
    type Error = FunctionParamError;

    fn try_from(wire: SerializedFunctionWire) -> Result<Self, Self::Error> {
        Self::new(wire.name, wire.input_params, wire.output_params, wire.docstring)
            .map(|function| function.with_endpoints(wire.endpoints))
    }
}

impl SerializedFunction {
    /// Builds a descriptor after checking its structural invariants.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionParamError`] when the name is empty, a parameter
    /// name is empty or repeated, flags contradict, or a required positional
    /// input follows an optional one.
    pub fn new(
        name: impl Into<String>,
        input_params: Vec<FunctionInputParam>,
        output_params: Vec<FunctionOutputParam>,
        docstring: Option<DocstringParserResult>,
    ) -> Result<Self, FunctionParamError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FunctionParamError::EmptyFunctionName);
        }
        validate_inputs(&input_params)?;
        validate_outputs(&output_params)?;
        Ok(Self {
            name,
            input_params,
            output_params,
            docstring,
            endpoints: Endpoints::new(),
        })
    }

    /// Replaces the function-wide endpoint configuration.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the input parameters in source order.
    #[must_use]
    pub fn input_params(&self) -> &[FunctionInputParam] {
        &self.input_params
    }

    /// Returns the output parameters.
    #[must_use]
    pub fn output_params(&self) -> &[FunctionOutputParam] {
        &self.output_params
    }

    /// Returns the parsed documentation, if any.
    #[must_use]
    pub const fn docstring(&self) -> Option<&DocstringParserResult> {
        self.docstring.as_ref()
    }

    /// Returns the function-wide endpoint configuration.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Returns the input named `name`, if any.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&FunctionInputParam> {
        self.input_params.iter().find(|param| param.name == name)
    }

    /// Returns the names of inputs callers must supply, in order.
    pub fn required_inputs(&self) -> impl Iterator<Item = &str> {
        self.input_params.iter().filter(|param| param.is_required()).map(|param| param.name.as_str())
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Checks input names, flags and positional ordering.
fn validate_inputs(params: &[FunctionInputParam]) -> Result<(), FunctionParamError> {
    let mut seen = BTreeSet::new();
    let mut last_optional_positional: Option<&str> = None;
    for (position, param) in params.iter().enumerate() {
        param.validate(position)?;
        if !seen.insert(param.name.as_str()) {
            return Err(FunctionParamError::DuplicateInput {
                name: param.name.clone(),
            });
        }
        if !param.positional {
            continue;
        }
        if param.is_optional() {
            last_optional_positional = Some(param.name.as_str());
        } else if let Some(after) = last_optional_positional {
            return Err(FunctionParamError::RequiredAfterOptional {
                name: param.name.clone(),
                after: after.to_string(),
            });
        }
    }
    Ok(())
}

/// Checks output names.
fn validate_outputs(params: &[FunctionOutputParam]) -> Result<(), FunctionParamError> {
    let mut seen = BTreeSet::new();
    for (position, param) in params.iter().enumerate() {
        if param.name.trim().is_empty() {
            return Err(FunctionParamError::EmptyParamName {
                position,
            });
        }
        if !seen.insert(param.name.as_str()) {
            return Err(FunctionParamError::DuplicateOutput {
                name: param.name.clone(),
            });
        }
    }
    Ok(())
}
