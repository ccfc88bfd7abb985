// crates/exposed-core/src/docstring/mod.rs
// ============================================================================
// Module: Docstring Parsing Contract
// Description: Parser seam, section validation and result normalization.
// Purpose: Turn free-text documentation into a validated parser result.
// Dependencies: thiserror, crate::{codec, error, schema}
// ============================================================================

//! ## Overview
//! Docstring parsing is pluggable: anything implementing [`DocstringParser`]
//! can produce a [`DocstringParserResult`]. The contract every parser must
//! honor is the section rule: a header outside the recognized
//! [`SectionSet`] fails with [`UnknownSectionError`] instead of being
//! skipped. [`SectionScanner`] enforces that rule and
//! [`GoogleDocstringParser`] builds on it. [`RestructuredDocstringParser`]
//! applies the same rule to unknown `:field:` tags, and
//! [`StyledDocstringParser`] picks between the two per [`DocstringStyle`].
//!
//! [`parse_docstring`] runs a parser and then [`normalize_result`], which is
//! what the function assembler expects to receive.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod google;
pub mod normalize;
pub mod restructured;
pub mod scanner;
pub mod sections;
pub mod style;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

pub use google::GoogleDocstringParser;
pub use normalize::default_output_name;
pub use normalize::normalize_result;
pub use restructured::RestructuredDocstringParser;
pub use scanner::ScannedDocstring;
pub use scanner::ScannedLine;
pub use scanner::ScannedSection;
pub use scanner::SectionScanner;
pub use sections::SectionKind;
pub use sections::SectionSet;
pub use style::DocstringStyle;
pub use style::StyledDocstringParser;
pub use style::detect_style;
use thiserror::Error;

use crate::codec::TypeCodec;
use crate::codec::TypeResolver;
use crate::error::TypeNotFoundError;
use crate::error::UnknownSectionError;
use crate::schema::DocstringParserResult;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failures raised while parsing or normalizing a docstring.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocstringError {
    /// A header is not in the recognized section set.
    #[error(transparent)]
    UnknownSection(#[from] UnknownSectionError),
    /// A section body line could not be parsed.
    #[error("malformed entry in section {section} at line {line}: {detail}")]
    Entry {
        /// Header of the section holding the line.
        section: String,
        /// One-based line number.
        line: usize,
        /// Parse diagnostic.
        detail: String,
    },
    /// A documented default does not fit the documented type.
    #[error("default for documented parameter {name} does not fit type {type_ref}: {detail}")]
    Default {
        /// Parameter name.
        name: String,
        /// Documented type reference.
        type_ref: String,
        /// Coercion diagnostic.
        detail: String,
    },
    /// A documented type could not be resolved.
    #[error(transparent)]
    Type(#[from] TypeNotFoundError),
}

// ============================================================================
// SECTION: Parser Seam
// ============================================================================

/// Turns docstring text into a raw parser result.
///
/// Implementations must fail with [`DocstringError::UnknownSection`] on an
/// unrecognized header rather than returning a partial result.
pub trait DocstringParser {
    /// Parses `docstring`.
    ///
    /// # Errors
    ///
    /// Returns [`DocstringError`] when the docstring cannot be parsed.
    fn parse(&self, docstring: &str) -> Result<DocstringParserResult, DocstringError>;
}

impl<F> DocstringParser for F
where
    F: Fn(&str) -> Result<DocstringParserResult, DocstringError>,
{
    fn parse(&self, docstring: &str) -> Result<DocstringParserResult, DocstringError> {
        self(docstring)
    }
}

/// Parses and normalizes `docstring`.
///
/// # Errors
///
/// Returns [`DocstringError`] when parsing or normalization fails.
pub fn parse_docstring<P, R>(
    parser: &P,
    docstring: &str,
    codec: &TypeCodec,
    resolver: &R,
) -> Result<DocstringParserResult, DocstringError>
where
    P: DocstringParser + ?Sized,
    R: TypeResolver + ?Sized,
{
    let raw = parser.parse(docstring)?;
    normalize_result(raw, docstring, codec, resolver)
}
