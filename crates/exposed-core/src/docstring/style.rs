// crates/exposed-core/src/docstring/style.rs
// ============================================================================
// Module: Docstring Style Selection
// Description: Choose between the Google and reStructuredText parsers.
// Purpose: Let callers parse mixed codebases with a single parser value.
// Dependencies: serde, tracing, crate::{docstring, schema}
// ============================================================================

//! ## Overview
//! [`StyledDocstringParser`] dispatches to [`GoogleDocstringParser`] or
//! [`RestructuredDocstringParser`]. With [`DocstringStyle::Auto`] the choice
//! is made per docstring by [`detect_style`]: any line opening with
//! `:param`, `:raises` or `:return` selects reStructuredText, everything else
//! goes to the Google parser.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::docstring::DocstringError;
use crate::docstring::DocstringParser;
use crate::docstring::google::GoogleDocstringParser;
use crate::docstring::restructured::RestructuredDocstringParser;
use crate::docstring::sections::SectionSet;
use crate::schema::DocstringParserResult;

// ============================================================================
// SECTION: Styles
// ============================================================================

/// Docstring dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocstringStyle {
    /// Detect the dialect per docstring.
    #[default]
    Auto,
    /// `Args:` / `Returns:` / `Raises:` sections.
    Google,
    /// `:param:` / `:return:` / `:raises:` fields.
    Restructured,
}

impl DocstringStyle {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Google => "google",
            Self::Restructured => "restructured",
        }
    }
}

/// Field markers that identify a reStructuredText docstring.
const RESTRUCTURED_MARKERS: [&str; 3] = [":param", ":raises", ":return"];

/// Picks the concrete style for `docstring`. Never returns `Auto`.
#[must_use]
pub fn detect_style(docstring: &str) -> DocstringStyle {
    let restructured = docstring
        .lines()
        .map(str::trim_start)
        .any(|line| RESTRUCTURED_MARKERS.iter().any(|marker| line.starts_with(marker)));
    if restructured { DocstringStyle::Restructured } else { DocstringStyle::Google }
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Parser that routes each docstring to the parser for its style.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledDocstringParser {
    /// Configured style.
    style: DocstringStyle,
    /// Google-style backend.
    google: GoogleDocstringParser,
    /// reStructuredText backend.
    restructured: RestructuredDocstringParser,
}

impl StyledDocstringParser {
    /// Creates a parser for `style`; `sections` configures the Google backend.
    #[must_use]
    pub const fn new(style: DocstringStyle, sections: SectionSet) -> Self {
        Self {
            style,
            google: GoogleDocstringParser::new(sections),
            restructured: RestructuredDocstringParser,
        }
    }

    /// Configured style.
    #[must_use]
    pub const fn style(&self) -> DocstringStyle {
        self.style
    }
}

impl DocstringParser for StyledDocstringParser {
    fn parse(&self, docstring: &str) -> Result<DocstringParserResult, DocstringError> {
        let style = match self.style {
            DocstringStyle::Auto => detect_style(docstring),
            fixed => fixed,
        };
        tracing::trace!(style = style.as_str(), "docstring style selected");
        match style {
            DocstringStyle::Restructured => self.restructured.parse(docstring),
            DocstringStyle::Auto | DocstringStyle::Google => self.google.parse(docstring),
        }
    }
}
