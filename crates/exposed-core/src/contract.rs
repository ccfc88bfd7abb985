// crates/exposed-core/src/contract.rs
// ============================================================================
// Module: Wire Contract Schema
// Description: JSON Schema (draft 2020-12) for serialized function descriptors.
// Purpose: Let endpoint layers validate descriptors without linking this crate.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`serialized_function_schema`] describes exactly what
//! [`SerializedFunction`] emits: closed objects, `type` fields as non-empty
//! strings and `docstring` as either a parser result or `null`. Structural
//! rules that JSON Schema cannot express (unique names, flag ordering) are
//! enforced when a descriptor is deserialized.
//!
//! [`SerializedFunction`]: crate::schema::SerializedFunction

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Draft identifier stamped into the schema.
pub const SCHEMA_DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Stable identifier of the descriptor schema.
pub const SERIALIZED_FUNCTION_SCHEMA_ID: &str = "exposed://schemas/serialized-function.json";

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Returns the JSON Schema for the `SerializedFunction` wire form.
#[must_use]
pub fn serialized_function_schema() -> Value {
    json!({
        "$schema": SCHEMA_DRAFT,
        "$id": SERIALIZED_FUNCTION_SCHEMA_ID,
        "title": "SerializedFunction",
        "type": "object",
        "required": ["name", "input_params", "output_params", "docstring"],
        "additionalProperties": false,
        "properties": {
            "name": schema_name("Exposed function name."),
            "input_params": {
                "type": "array",
                "items": { "$ref": "#/$defs/input_param" }
            },
            "output_params": {
                "type": "array",
                "items": { "$ref": "#/$defs/output_param" }
            },
            "docstring": {
                "oneOf": [
                    { "type": "null" },
                    { "$ref": "#/$defs/docstring" }
                ]
            },
            "endpoints": { "$ref": "#/$defs/endpoints" }
        },
        "$defs": {
            "type_ref": {
                "type": "string",
                "minLength": 1,
                "description": "Canonical type reference."
            },
            "endpoint": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "middleware": {
                        "type": "array",
                        "items": schema_name("Opaque middleware handle.")
                    }
                }
            },
            "endpoints": {
                "type": "object",
                "additionalProperties": { "$ref": "#/$defs/endpoint" }
            },
            "input_param": input_param_schema(),
            "output_param": {
                "type": "object",
                "required": ["name", "type"],
                "additionalProperties": false,
                "properties": {
                    "name": schema_name("Output name."),
                    "type": { "$ref": "#/$defs/type_ref" },
                    "description": { "type": "string" },
                    "endpoints": { "$ref": "#/$defs/endpoints" }
                }
            },
            "docstring": docstring_schema()
        }
    })
}

/// Schema for one input parameter.
fn input_param_schema() -> Value {
    json!({
        "type": "object",
        "required": ["name", "type", "positional"],
        "additionalProperties": false,
        "properties": {
            "name": schema_name("Parameter name."),
            "type": { "$ref": "#/$defs/type_ref" },
            "positional": { "type": "boolean" },
            "default": { "description": "Any JSON value, including null." },
            "optional": { "type": "boolean" },
            "description": { "type": "string" },
            "middleware": {
                "type": "array",
                "items": schema_name("Opaque middleware handle.")
            },
            "endpoints": { "$ref": "#/$defs/endpoints" }
        }
    })
}

/// Schema for a docstring parser result.
fn docstring_schema() -> Value {
    json!({
        "type": "object",
        "required": ["input_params", "output_params", "exceptions"],
        "additionalProperties": false,
        "properties": {
            "original": { "type": "string" },
            "summary": { "type": "string" },
            "input_params": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["name"],
                    "additionalProperties": false,
                    "properties": {
                        "name": schema_name("Documented parameter name."),
                        "description": { "type": "string" },
                        "type": { "$ref": "#/$defs/type_ref" },
                        "default": { "description": "Any JSON value, including null." },
                        "optional": { "type": "boolean" },
                        "positional": { "type": "boolean" }
                    }
                }
            },
            "output_params": {
                "type": "array",
                "items": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "$ref": "#/$defs/type_ref" },
                        "description": { "type": "string" }
                    }
                }
            },
            "exceptions": {
                "type": "object",
                "additionalProperties": { "type": "string" }
            }
        }
    })
}

/// Returns a schema for a non-empty name.
fn schema_name(description: &str) -> Value {
    json!({
        "type": "string",
        "minLength": 1,
        "description": description
    })
}
