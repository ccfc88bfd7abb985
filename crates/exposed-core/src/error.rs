// crates/exposed-core/src/error.rs
// ============================================================================
// Module: Exposure Error Taxonomy
// Description: Structured errors for parameter shape, docstring sections, and types.
// Purpose: Surface the offending name, section, or type reference to operators.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Three error kinds cover every failure this crate can raise:
//! [`FunctionParamError`] for structurally invalid signatures,
//! [`UnknownSectionError`] for docstrings with unrecognized section headers,
//! and [`TypeNotFoundError`] for types that cannot be resolved in either
//! direction. [`AssemblyError`] joins the two kinds that assembly can hit.
//!
//! Errors are returned at the point of detection and never logged here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Function Parameter Errors
// ============================================================================

/// Structural problems with a function signature or its parameter lists.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every variant names the offending parameter when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FunctionParamError {
    /// Function name was empty or whitespace.
    #[error("function name must be non-empty")]
    EmptyFunctionName,
    /// Parameter name was empty or whitespace.
    #[error("parameter name at position {position} must be non-empty")]
    EmptyParamName {
        /// Zero-based position in the parameter list.
        position: usize,
    },
    /// Two input parameters share a name.
    #[error("duplicate input parameter name: {name}")]
    DuplicateInput {
        /// The repeated name.
        name: String,
    },
    /// Two output parameters share a name.
    #[error("duplicate output parameter name: {name}")]
    DuplicateOutput {
        /// The repeated name.
        name: String,
    },
    /// Flag combination cannot describe a callable parameter.
    #[error("contradictory flags on parameter {name}: {detail}")]
    ContradictoryFlags {
        /// Parameter name.
        name: String,
        /// Human-readable description of the contradiction.
        detail: &'static str,
    },
    /// A required positional parameter follows an optional positional one.
    #[error("required positional parameter {name} follows optional parameter {after}")]
    RequiredAfterOptional {
        /// Required parameter name.
        name: String,
        /// Preceding optional parameter name.
        after: String,
    },
    /// Default value could not be represented as JSON.
    #[error("default for parameter {name} is not serializable: {detail}")]
    UnserializableDefault {
        /// Parameter name.
        name: String,
        /// Serializer diagnostic.
        detail: String,
    },
}

// ============================================================================
// SECTION: Docstring Section Errors
// ============================================================================

/// A docstring section header outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown docstring section {section} at line {line}")]
pub struct UnknownSectionError {
    /// Header text without the trailing colon.
    pub section: String,
    /// One-based line number within the docstring.
    pub line: usize,
}

// ============================================================================
// SECTION: Type Resolution Errors
// ============================================================================

/// Why a type reference or type value could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Name is not a built-in and is not registered in the context.
    Unregistered,
    /// Type value has no stable name.
    Anonymous,
    /// Generic head is not a recognized composite form.
    UnknownGeneric,
    /// Generic form received the wrong number of arguments.
    Arity {
        /// Expected argument count description.
        expected: &'static str,
        /// Actual argument count.
        found: usize,
    },
    /// Reference text could not be parsed.
    Malformed {
        /// Byte offset of the failure.
        position: usize,
        /// Human-readable parse diagnostic.
        detail: String,
    },
    /// Reference text exceeded the configured length limit.
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
    },
    /// Reference nesting exceeded the configured depth limit.
    TooDeep {
        /// Maximum allowed generic nesting depth.
        max_depth: usize,
    },
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unregistered => write!(f, "not registered"),
            Self::Anonymous => write!(f, "type has no stable name"),
            Self::UnknownGeneric => write!(f, "unknown generic form"),
            Self::Arity {
                expected,
                found,
            } => write!(f, "expected {expected} type arguments, found {found}"),
            Self::Malformed {
                position,
                detail,
            } => write!(f, "malformed reference at {position}: {detail}"),
            Self::TooLarge {
                max_bytes,
            } => write!(f, "reference exceeds {max_bytes} bytes"),
            Self::TooDeep {
                max_depth,
            } => write!(f, "reference nesting exceeds depth {max_depth}"),
        }
    }
}

/// A type that could not be resolved within a resolution context.
///
/// # Invariants
/// - `reference` is the narrowest failing piece (e.g. `Widget` inside
///   `List[Widget]`), not necessarily the whole input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type {reference} not found in context {context}: {reason}")]
pub struct TypeNotFoundError {
    /// Attempted reference or type description.
    pub reference: String,
    /// Identifier of the resolution context consulted.
    pub context: String,
    /// Failure classification.
    pub reason: NotFoundReason,
}

impl TypeNotFoundError {
    /// Creates a new type resolution error.
    #[must_use]
    pub fn new(
        reference: impl Into<String>,
        context: impl Into<String>,
        reason: NotFoundReason,
    ) -> Self {
        Self {
            reference: reference.into(),
            context: context.into(),
            reason,
        }
    }
}

// ============================================================================
// SECTION: Assembly Errors
// ============================================================================

/// Failures raised while assembling parameter or function descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// Signature is structurally invalid.
    #[error(transparent)]
    Param(#[from] FunctionParamError),
    /// A parameter type could not be resolved.
    #[error(transparent)]
    Type(#[from] TypeNotFoundError),
}
