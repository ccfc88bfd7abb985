// crates/exposed-core/src/schema/mod.rs
// ============================================================================
// Module: Exposure Schema Types
// Description: Serializable descriptors for exposed functions and their docs.
// Purpose: Define the data contract shared with endpoint implementations.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! These types are the wire contract: string-keyed maps, ordered sequences
//! and primitives only. Type fields are always [`TypeRef`] strings and
//! middleware is recorded as opaque [`MiddlewareRef`] handles, so a
//! [`SerializedFunction`] can be stored, transmitted or shared across
//! threads without referencing anything live.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod docstring;
pub mod endpoint;
pub mod function;
pub mod identifiers;
pub mod params;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use docstring::DocstringParserResult;
pub use docstring::OutputDoc;
pub use docstring::ParamDoc;
pub use endpoint::Endpoint;
pub use endpoint::Endpoints;
pub use function::SerializedFunction;
pub use identifiers::MiddlewareRef;
pub use identifiers::TypeRef;
pub use params::FunctionInputParam;
pub use params::FunctionOutputParam;

// ============================================================================
// SECTION: Serde Helpers
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde_json::Value;

/// Deserializes a field that is present, keeping `null` as `Some(Value::Null)`.
///
/// Paired with `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
