// crates/exposed-core/src/assembly/merge.rs
// ============================================================================
// Module: Documentation Merge
// Description: Folds parsed docstring details into resolved parameters.
// Purpose: Enrich descriptors from documentation without letting drift fail.
// Dependencies: tracing, crate::{codec, docstring, schema}
// ============================================================================

//! ## Overview
//! The signature is authoritative; documentation only fills gaps:
//!
//! - a missing description is taken from the documentation,
//! - an `Any` type is replaced by the documented type,
//! - a missing `optional` flag is taken from the documentation unless it
//!   would contradict a default present in the signature, or would leave a
//!   required positional parameter behind an optional one.
//!
//! Inputs are matched by name and outputs by position. Anything that does
//! not line up is reported as a [`DocWarning`] and otherwise ignored.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::codec::TypeCodec;
use crate::codec::TypeResolver;
use crate::docstring::default_output_name;
use crate::schema::DocstringParserResult;
use crate::schema::FunctionInputParam;
use crate::schema::FunctionOutputParam;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Warnings
// ============================================================================

/// Documentation drift found while assembling a descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocWarning {
    /// A documented input does not exist in the signature.
    UnknownInput {
        /// Documented name.
        name: String,
    },
    /// More outputs are documented than declared.
    ExtraOutput {
        /// Zero-based index of the surplus entry.
        index: usize,
    },
    /// A documented output name differs from the declared one.
    UnmatchedOutputName {
        /// Zero-based output index.
        index: usize,
        /// Name used by the documentation.
        documented: String,
        /// Name declared by the signature.
        declared: String,
    },
    /// A documented `optional` flag was dropped because a required
    /// positional parameter follows the documented one.
    ContradictoryOptional {
        /// Parameter name.
        name: String,
    },
    /// A documented type could not be resolved and was not applied.
    UnresolvedType {
        /// Parameter or output name.
        name: String,
        /// Documented reference.
        reference: String,
    },
}

impl fmt::Display for DocWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownInput {
                name,
            } => write!(f, "documented input {name} is not in the signature"),
            Self::ExtraOutput {
                index,
            } => write!(f, "documented output {index} has no declared counterpart"),
            Self::UnmatchedOutputName {
                index,
                documented,
                declared,
            } => write!(f, "documented output {index} is named {documented} but declared as {declared}"),
            Self::ContradictoryOptional {
                name,
            } => write!(f, "documented optional flag on {name} precedes a required positional parameter"),
            Self::UnresolvedType {
                name,
                reference,
            } => write!(f, "documented type {reference} for {name} does not resolve"),
        }
    }
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Applies documentation to resolved parameters, collecting drift warnings.
pub(super) struct DocMerge<'a, R: ?Sized> {
    /// Codec used to canonicalize documented types.
    pub(super) codec: &'a TypeCodec,
    /// Resolver the documented types are checked against.
    pub(super) resolver: &'a R,
    /// Warnings gathered so far.
    pub(super) warnings: Vec<DocWarning>,
}

impl<R> DocMerge<'_, R>
where
    R: TypeResolver + ?Sized,
{
    /// Merges input documentation by name.
    pub(super) fn inputs(&mut self, inputs: &mut [FunctionInputParam], docs: &DocstringParserResult) {
        let mut documented_optional = Vec::new();
        for doc in &docs.input_params {
            let Some(index) = inputs.iter().position(|param| param.name == doc.name) else {
                self.warnings.push(DocWarning::UnknownInput {
                    name: doc.name.clone(),
                });
                continue;
            };
            let Some(param) = inputs.get_mut(index) else {
                continue;
            };
            if param.description.is_none() {
                param.description.clone_from(&doc.description);
            }
            if param.type_ref.is_any()
                && let Some(documented) = &doc.type_ref
                && let Some(resolved) = self.resolve(&param.name, documented)
            {
                param.type_ref = resolved;
            }
            if param.optional.is_none()
                && let Some(optional) = doc.optional
                && (optional || !param.has_default())
            {
                param.optional = Some(optional);
                if optional && param.positional && !param.has_default() {
                    documented_optional.push(index);
                }
            }
        }
        self.drop_misordered_optional(inputs, &documented_optional);
    }

    /// Reverts documented `optional` flags on positional parameters that sit
    /// before the last required positional parameter.
    fn drop_misordered_optional(&mut self, inputs: &mut [FunctionInputParam], documented: &[usize]) {
        let Some(last_required) = inputs.iter().rposition(|param| param.positional && param.is_required())
        else {
            return;
        };
        for &index in documented.iter().filter(|&&index| index < last_required) {
            if let Some(param) = inputs.get_mut(index) {
                param.optional = None;
                self.warnings.push(DocWarning::ContradictoryOptional {
                    name: param.name.clone(),
                });
            }
        }
    }

    /// Merges output documentation by position.
    pub(super) fn outputs(&mut self, outputs: &mut [FunctionOutputParam], docs: &DocstringParserResult) {
        let documented = docs.output_params.len();
        for (index, doc) in docs.output_params.iter().enumerate() {
            let Some(output) = outputs.get_mut(index) else {
                self.warnings.push(DocWarning::ExtraOutput {
                    index,
                });
                continue;
            };
            if let Some(name) = &doc.name
                && *name != output.name
                && *name != default_output_name(index, documented)
            {
                self.warnings.push(DocWarning::UnmatchedOutputName {
                    index,
                    documented: name.clone(),
                    declared: output.name.clone(),
                });
            }
            if output.description.is_none() {
                output.description.clone_from(&doc.description);
            }
            if output.type_ref.is_any()
                && let Some(documented) = &doc.type_ref
                && let Some(resolved) = self.resolve(&output.name, documented)
            {
                output.type_ref = resolved;
            }
        }
    }

    /// Canonicalizes a documented type, warning when it does not resolve.
    fn resolve(&mut self, name: &str, documented: &TypeRef) -> Option<TypeRef> {
        match self.codec.canonicalize(documented.as_str(), self.resolver) {
            Ok(resolved) => Some(resolved),
            Err(_) => {
                self.warnings.push(DocWarning::UnresolvedType {
                    name: name.to_string(),
                    reference: documented.to_string(),
                });
                None
            }
        }
    }
}
