// crates/exposed-core/src/lib.rs
// ============================================================================
// Module: Exposed Core Root
// Description: Public API surface for exposed function descriptors.
// Purpose: Wire together the type codec, schema, docstring and assembly layers.
// Dependencies: crate::{assembly, canonical, codec, contract, docstring, error, exposure,
//              schema}
// ============================================================================

//! ## Overview
//! Exposed Core turns introspected function signatures into self-contained,
//! serializable [`SerializedFunction`] descriptors. Live types are erased by
//! the [`TypeCodec`], which maps [`TypeValue`]s to canonical [`TypeRef`]
//! strings within a caller-supplied [`TypeResolver`]. Docstrings are parsed
//! behind the [`DocstringParser`] seam and merged by the
//! [`FunctionAssembler`], which reports documentation drift as warnings and
//! fails only on structural or type resolution problems.
//!
//! Everything here is synchronous and pure; descriptors can be shared across
//! threads without synchronization.

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod assembly;
pub mod canonical;
pub mod codec;
pub mod contract;
pub mod docstring;
pub mod error;
pub mod exposure;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use assembly::Assembled;
pub use assembly::DocWarning;
pub use assembly::FunctionAssembler;
pub use assembly::FunctionSource;
pub use assembly::ParamType;
pub use assembly::RawDefault;
pub use assembly::RawInputParam;
pub use assembly::RawOutputParam;
pub use assembly::outputs_from_return;
pub use canonical::CanonicalError;
pub use canonical::Fingerprint;
pub use canonical::canonical_json_bytes;
pub use canonical::fingerprint;
pub use codec::CodecLimits;
pub use codec::TypeCodec;
pub use codec::TypeRegistry;
pub use codec::TypeResolver;
pub use codec::TypeValue;
pub use contract::serialized_function_schema;
pub use docstring::DocstringError;
pub use docstring::DocstringParser;
pub use docstring::DocstringStyle;
pub use docstring::GoogleDocstringParser;
pub use docstring::RestructuredDocstringParser;
pub use docstring::SectionKind;
pub use docstring::SectionSet;
pub use docstring::StyledDocstringParser;
pub use docstring::detect_style;
pub use docstring::parse_docstring;
pub use error::AssemblyError;
pub use error::FunctionParamError;
pub use error::NotFoundReason;
pub use error::TypeNotFoundError;
pub use error::UnknownSectionError;
pub use exposure::Exposed;
pub use exposure::ExposedFunction;
pub use exposure::collect_exposed;
pub use schema::DocstringParserResult;
pub use schema::Endpoint;
pub use schema::Endpoints;
pub use schema::FunctionInputParam;
pub use schema::FunctionOutputParam;
pub use schema::MiddlewareRef;
pub use schema::OutputDoc;
pub use schema::ParamDoc;
pub use schema::SerializedFunction;
pub use schema::TypeRef;
