// crates/exposed-core/src/schema/docstring.rs
// ============================================================================
// Module: Docstring Result
// Description: Structured output of a docstring parser.
// Purpose: Carry parsed documentation into function descriptor assembly.
// Dependencies: serde, serde_json, crate::schema
// ============================================================================

//! ## Overview
//! A [`DocstringParserResult`] holds what a parser extracted from free text:
//! a summary, partial documentation for inputs and outputs, and raised
//! exceptions. Every documentation field is optional; names are checked
//! against the real signature by the assembler, which reports drift as
//! warnings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::schema::deserialize_present;
use crate::schema::identifiers::TypeRef;

// ============================================================================
// SECTION: Parameter Documentation
// ============================================================================

/// Documentation for one input parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamDoc {
    /// Documented parameter name.
    pub name: String,
    /// Documented description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Documented type reference.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
    /// Documented default value.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_present"
    )]
    pub default: Option<Value>,
    /// Documented optional flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    /// Documented positional flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positional: Option<bool>,
}

impl ParamDoc {
    /// Creates documentation for `name` with no details.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Documentation for one output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDoc {
    /// Documented output name, if the docstring gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Documented type reference.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeRef>,
    /// Documented description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// SECTION: Parser Result
// ============================================================================

/// Standardized docstring parser output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocstringParserResult {
    /// Original docstring text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    /// Input documentation in docstring order.
    #[serde(default)]
    pub input_params: Vec<ParamDoc>,
    /// Output documentation in docstring order.
    #[serde(default)]
    pub output_params: Vec<OutputDoc>,
    /// One-paragraph summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Exception type name to description.
    #[serde(default)]
    pub exceptions: BTreeMap<String, String>,
}

impl DocstringParserResult {
    /// Returns the documentation for input `name`, if any.
    #[must_use]
    pub fn input(&self, name: &str) -> Option<&ParamDoc> {
        self.input_params.iter().find(|doc| doc.name == name)
    }

    /// Returns true when the result documents nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.input_params.is_empty()
            && self.output_params.is_empty()
            && self.exceptions.is_empty()
    }
}
