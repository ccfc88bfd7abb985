// crates/exposed-core/src/codec/mod.rs
// ============================================================================
// Module: Type Codec
// Description: Bidirectional mapping between type values and type references.
// Purpose: Erase live type objects from exposed function descriptors.
// Dependencies: serde_json, tracing, crate::{error, schema}
// ============================================================================

//! ## Overview
//! The codec translates a [`TypeValue`] into a canonical [`TypeRef`] string
//! and back, always scoped to a caller-supplied [`TypeResolver`]. Encoding is
//! deterministic and decoding is its inverse up to [`TypeValue::normalize`]:
//! `decode(encode(t)) == t.normalize()`.
//!
//! Nothing is ever substituted: unregistered names, anonymous types and
//! malformed references fail with [`TypeNotFoundError`].
//!
//! Security posture: references may arrive from untrusted transports; parsing
//! is bounded by [`CodecLimits`].

// ============================================================================
// SECTION: Submodules
// ============================================================================

mod parse;
pub mod registry;
mod render;
mod shape;
pub mod value;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

pub use registry::DEFAULT_CONTEXT_ID;
pub use registry::RegistryError;
pub use registry::TypeRegistry;
pub use registry::TypeResolver;
pub use value::Builtin;
pub use value::LiteralValue;
pub use value::NamedType;
pub use value::TypeValue;

use crate::error::TypeNotFoundError;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default maximum reference length in bytes.
pub const DEFAULT_MAX_REF_BYTES: usize = 4096;

/// Default maximum generic nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Bounds applied to every encode, decode and shape call.
///
/// # Invariants
/// - Both limits are positive when produced by validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum reference length in bytes.
    pub max_ref_bytes: usize,
    /// Maximum generic nesting depth.
    pub max_depth: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_ref_bytes: DEFAULT_MAX_REF_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

// ============================================================================
// SECTION: Codec
// ============================================================================

/// Type codec bound to a set of limits.
///
/// The codec holds no resolution state; the context is passed per call so a
/// single codec can serve several registries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCodec {
    /// Limits applied to each call.
    limits: CodecLimits,
}

impl TypeCodec {
    /// Creates a codec with explicit limits.
    #[must_use]
    pub const fn new(limits: CodecLimits) -> Self {
        Self {
            limits,
        }
    }

    /// Returns the limits applied by this codec.
    #[must_use]
    pub const fn limits(&self) -> CodecLimits {
        self.limits
    }

    /// Encodes `value` into its canonical reference.
    ///
    /// # Errors
    ///
    /// Returns [`TypeNotFoundError`] when the value (or any nested member) is
    /// anonymous or names a type the context does not know, or when the
    /// rendered reference exceeds the configured limits.
    pub fn encode<R>(&self, value: &TypeValue, resolver: &R) -> Result<TypeRef, TypeNotFoundError>
    where
        R: TypeResolver + ?Sized,
    {
        let normalized = value.normalize();
        let rendered = render::render_reference(&normalized, resolver, self.limits)?;
        tracing::trace!(context = resolver.context_id(), reference = %rendered, "encoded type");
        Ok(TypeRef::new(rendered))
    }

    /// Decodes a reference into a normalized type value.
    ///
    /// # Errors
    ///
    /// Returns [`TypeNotFoundError`] when the reference is malformed, exceeds
    /// the limits, uses an unknown generic form, or names a type absent from
    /// the context.
    pub fn decode<R>(&self, reference: &str, resolver: &R) -> Result<TypeValue, TypeNotFoundError>
    where
        R: TypeResolver + ?Sized,
    {
        parse::parse_reference(reference, resolver, self.limits)
    }

    /// Rewrites a reference into its canonical spelling.
    ///
    /// `Optional[int]` becomes `Union[int, None]`, lowercase heads become
    /// capitalised and aliases resolve to their canonical names.
    ///
    /// # Errors
    ///
    /// Returns [`TypeNotFoundError`] when the reference fails to decode.
    pub fn canonicalize<R>(&self, reference: &str, resolver: &R) -> Result<TypeRef, TypeNotFoundError>
    where
        R: TypeResolver + ?Sized,
    {
        let value = self.decode(reference, resolver)?;
        self.encode(&value, resolver)
    }

    /// Renders the JSON shape of `value` for endpoint front-ends.
    ///
    /// # Errors
    ///
    /// Returns [`TypeNotFoundError`] under the same conditions as
    /// [`TypeCodec::encode`].
    pub fn shape<R>(&self, value: &TypeValue, resolver: &R) -> Result<Value, TypeNotFoundError>
    where
        R: TypeResolver + ?Sized,
    {
        shape::render_shape(&value.normalize(), resolver, self.limits, 0)
    }
}

// ============================================================================
// SECTION: Convenience Functions
// ============================================================================

/// Encodes `value` with default limits.
///
/// # Errors
///
/// See [`TypeCodec::encode`].
pub fn encode<R>(value: &TypeValue, resolver: &R) -> Result<TypeRef, TypeNotFoundError>
where
    R: TypeResolver + ?Sized,
{
    TypeCodec::default().encode(value, resolver)
}

/// Decodes `reference` with default limits.
///
/// # Errors
///
/// See [`TypeCodec::decode`].
pub fn decode<R>(reference: &str, resolver: &R) -> Result<TypeValue, TypeNotFoundError>
where
    R: TypeResolver + ?Sized,
{
    TypeCodec::default().decode(reference, resolver)
}
