// crates/exposed-core/src/assembly/mod.rs
// ============================================================================
// Module: Function Descriptor Assembly
// Description: Builds validated descriptors from introspection and docs.
// Purpose: Turn raw signatures into self-contained `SerializedFunction`s.
// Dependencies: tracing, crate::{codec, error, schema}
// ============================================================================

//! ## Overview
//! [`FunctionAssembler`] is the single entry point that combines the pieces:
//! every raw type goes through the [`TypeCodec`], defaults are checked for
//! JSON representability, documentation is merged into the parameters and
//! the result is validated by [`SerializedFunction::new`].
//!
//! Failure is reserved for structural problems ([`FunctionParamError`]) and
//! unresolvable signature types ([`TypeNotFoundError`]). Documentation drift
//! is returned alongside the descriptor as [`DocWarning`]s.
//!
//! [`FunctionParamError`]: crate::error::FunctionParamError

// ============================================================================
// SECTION: Submodules
// ============================================================================

mod merge;
pub mod raw;


// ============================================================================
// SECTION: Imports
// ============================================================================

pub use merge::DocWarning;
pub use raw::ParamType;
pub use raw::RawDefault;
pub use raw::RawInputParam;
pub use raw::RawOutputParam;
pub use raw::outputs_from_return;

use std::collections::BTreeSet;

use crate::codec::TypeCodec;
use crate::codec::TypeResolver;
use crate::codec::TypeValue;
use crate::docstring::default_output_name;
use crate::error::AssemblyError;
use crate::error::FunctionParamError;
use crate::error::TypeNotFoundError;
use crate::schema::DocstringParserResult;
use crate::schema::Endpoint;
use crate::schema::Endpoints;
use crate::schema::FunctionInputParam;
use crate::schema::FunctionOutputParam;
use crate::schema::SerializedFunction;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Source
// ============================================================================

/// Everything known about a function before assembly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionSource {
    /// Exposed function name.
    pub name: String,
    /// Inputs in signature order.
    pub inputs: Vec<RawInputParam>,
    /// Outputs in declaration order.
    pub outputs: Vec<RawOutputParam>,
    /// Normalized documentation, if the function has any.
    pub docstring: Option<DocstringParserResult>,
    /// Function-level endpoint configuration.
    pub endpoints: Endpoints,
}

impl FunctionSource {
    /// Creates a source with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends an input.
    #[must_use]
    pub fn with_input(mut self, input: RawInputParam) -> Self {
        self.inputs.push(input);
        self
    }

    /// Appends an output.
    #[must_use]
    pub fn with_output(mut self, output: RawOutputParam) -> Self {
        self.outputs.push(output);
        self
    }

    /// Appends the outputs implied by a return annotation.
    #[must_use]
    pub fn with_return(mut self, annotation: &TypeValue) -> Self {
        self.outputs.extend(outputs_from_return(annotation));
        self
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_docstring(mut self, docstring: DocstringParserResult) -> Self {
        self.docstring = Some(docstring);
        self
    }

    /// Attaches function-level endpoint configuration for `protocol`.
    #[must_use]
    pub fn with_endpoint(mut self, protocol: impl Into<String>, endpoint: Endpoint) -> Self {
        self.endpoints.insert(protocol.into(), endpoint);
        self
    }
}

// ============================================================================
// SECTION: Assembler
// ============================================================================

/// A descriptor together with the documentation drift found while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembled {
    /// The validated descriptor.
    pub function: SerializedFunction,
    /// Non-fatal documentation mismatches, in discovery order.
    pub warnings: Vec<DocWarning>,
}

/// Builds [`SerializedFunction`]s against one resolution context.
///
/// # Invariants
/// - Assembly is pure: identical sources yield equal results.
pub struct FunctionAssembler<'r, R: ?Sized> {
    /// Codec applied to every type.
    codec: TypeCodec,
    /// Resolution context.
    resolver: &'r R,
}

impl<'r, R> FunctionAssembler<'r, R>
where
    R: TypeResolver + ?Sized,
{
    /// Creates an assembler for `resolver`.
    #[must_use]
    pub const fn new(codec: TypeCodec, resolver: &'r R) -> Self {
        Self {
            codec,
            resolver,
        }
    }

    /// Assembles and validates a descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Param`] for structural problems and
    /// [`AssemblyError::Type`] when a signature type does not resolve.
    pub fn assemble(&self, source: FunctionSource) -> Result<Assembled, AssemblyError> {
        let FunctionSource {
            name,
            inputs,
            outputs,
            docstring,
            endpoints,
        } = source;
        if name.trim().is_empty() {
            return Err(FunctionParamError::EmptyFunctionName.into());
        }
        check_names(&inputs, &outputs)?;

        let mut input_params = inputs
            .into_iter()
            .enumerate()
            .map(|(position, raw)| self.input_param(raw, position))
            .collect::<Result<Vec<_>, _>>()?;
        let count = outputs.len();
        let mut output_params = outputs
            .into_iter()
            .enumerate()
            .map(|(index, raw)| self.output_param(raw, index, count))
            .collect::<Result<Vec<_>, _>>()?;

        let mut merge = merge::DocMerge {
            codec: &self.codec,
            resolver: self.resolver,
            warnings: Vec::new(),
        };
        if let Some(docs) = &docstring {
            merge.inputs(&mut input_params, docs);
            merge.outputs(&mut output_params, docs);
        }
        for warning in &merge.warnings {
            tracing::debug!(function = %name, %warning, "documentation drift");
        }

        let function = SerializedFunction::new(name, input_params, output_params, docstring)?
            .with_endpoints(endpoints);
        tracing::debug!(
            function = function.name(),
            context = self.resolver.context_id(),
            inputs = function.input_params().len(),
            outputs = function.output_params().len(),
            warnings = merge.warnings.len(),
            "assembled function descriptor"
        );
        Ok(Assembled {
            function,
            warnings: merge.warnings,
        })
    }

    /// Resolves and validates the input at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Param`] when the name is empty, the flags
    /// contradict each other or the default is not serializable, and
    /// [`AssemblyError::Type`] when the type does not resolve.
    pub fn input_param(&self, raw: RawInputParam, position: usize) -> Result<FunctionInputParam, AssemblyError> {
        if raw.name.trim().is_empty() {
            return Err(FunctionParamError::EmptyParamName {
                position,
            }
            .into());
        }
        let default = match raw.default {
            None => None,
            Some(RawDefault::Value(value)) => Some(value),
            Some(RawDefault::Unserializable(detail)) => {
                return Err(FunctionParamError::UnserializableDefault {
                    name: raw.name,
                    detail,
                }
                .into());
            }
        };
        let param = FunctionInputParam {
            type_ref: self.resolve(&raw.param_type)?,
            positional: raw.positional,
            default,
            optional: raw.optional,
            description: raw.description,
            middleware: raw.middleware,
            endpoints: raw.endpoints,
            name: raw.name,
        };
        param.validate(position)?;
        Ok(param)
    }

    /// Resolves the output at `index` of `count`.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::Param`] when the name is empty and
    /// [`AssemblyError::Type`] when the type does not resolve.
    pub fn output_param(
        &self,
        raw: RawOutputParam,
        index: usize,
        count: usize,
    ) -> Result<FunctionOutputParam, AssemblyError> {
        let name = raw.name.unwrap_or_else(|| default_output_name(index, count));
        if name.trim().is_empty() {
            return Err(FunctionParamError::EmptyParamName {
                position: index,
            }
            .into());
        }
        Ok(FunctionOutputParam {
            type_ref: self.resolve(&raw.param_type)?,
            name,
            description: raw.description,
            endpoints: raw.endpoints,
        })
    }

    /// Converts a raw type into its canonical reference.
    fn resolve(&self, param_type: &ParamType) -> Result<TypeRef, TypeNotFoundError> {
        match param_type {
            ParamType::Resolved(reference) => self.codec.canonicalize(reference.as_str(), self.resolver),
            ParamType::Value(value) => self.codec.encode(value, self.resolver),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Checks parameter names before any type is resolved.
fn check_names(inputs: &[RawInputParam], outputs: &[RawOutputParam]) -> Result<(), FunctionParamError> {
    let mut seen = BTreeSet::new();
    for (position, raw) in inputs.iter().enumerate() {
        if raw.name.trim().is_empty() {
            return Err(FunctionParamError::EmptyParamName {
                position,
            });
        }
        if !seen.insert(raw.name.as_str()) {
            return Err(FunctionParamError::DuplicateInput {
                name: raw.name.clone(),
            });
        }
    }
    let count = outputs.len();
    let mut seen = BTreeSet::new();
    for (position, raw) in outputs.iter().enumerate() {
        let name = raw.name.clone().unwrap_or_else(|| default_output_name(position, count));
        if name.trim().is_empty() {
            return Err(FunctionParamError::EmptyParamName {
                position,
            });
        }
        if !seen.insert(name.clone()) {
            return Err(FunctionParamError::DuplicateOutput {
                name,
            });
        }
    }
    Ok(())
}
