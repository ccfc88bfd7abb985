// crates/exposed-core/src/docstring/scanner.rs
// ============================================================================
// Module: Docstring Section Scanner
// Description: Single-pass section splitter for free-text docstrings.
// Purpose: Enforce the recognized section set before entries are parsed.
// Dependencies: tracing, crate::{docstring, error}
// ============================================================================

//! ## Overview
//! The scanner walks a docstring line by line through four states:
//! `Scanning` (summary text before any header), `InKnownSection`,
//! `InExceptions` and the terminal `Done`. A header is a trimmed line such as
//! `Returns:` or `See Also:`: capitalised words ending in a single colon. Inside
//! a section, only lines indented no deeper than the section's own header
//! can open a new section, so `ValueError:` under `Raises:` stays an entry.
//!
//! An unrecognized header fails the whole scan with
//! [`UnknownSectionError`]; nothing is returned for a partially scanned
//! docstring.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::docstring::DocstringError;
use crate::docstring::sections::SectionKind;
use crate::docstring::sections::SectionSet;
use crate::error::UnknownSectionError;

// ============================================================================
// SECTION: Scan Output
// ============================================================================

/// A non-blank line inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    /// One-based line number within the docstring.
    pub line: usize,
    /// Trimmed line text.
    pub text: String,
}

/// A recognized section with its raw body lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedSection {
    /// Section role.
    pub kind: SectionKind,
    /// Header text without the colon.
    pub header: String,
    /// One-based line number of the header.
    pub line: usize,
    /// Body lines in order.
    pub lines: Vec<ScannedLine>,
}

/// Result of scanning one docstring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedDocstring {
    /// Summary text joined with single spaces.
    pub summary: Option<String>,
    /// Parameter and return sections in order.
    pub sections: Vec<ScannedSection>,
    /// Exception entries from every raises section.
    pub exceptions: BTreeMap<String, String>,
}

impl ScannedDocstring {
    /// Appends a summary fragment.
    fn push_summary(&mut self, text: &str) {
        match &mut self.summary {
            Some(summary) => {
                summary.push(' ');
                summary.push_str(text);
            }
            None => self.summary = Some(text.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Scanner
// ============================================================================

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first header.
    Scanning,
    /// Inside a summary, params or returns section.
    InKnownSection {
        /// Indentation of the section header.
        indent: usize,
        /// Kind of the open section.
        kind: SectionKind,
    },
    /// Inside a raises section.
    InExceptions {
        /// Indentation of the section header.
        indent: usize,
    },
    /// Input exhausted.
    Done,
}

impl ScanState {
    /// Returns true when a line at `indent` may open a new section.
    const fn accepts_header(self, indent: usize) -> bool {
        match self {
            Self::Scanning | Self::Done => true,
            Self::InKnownSection {
                indent: header,
                ..
            }
            | Self::InExceptions {
                indent: header,
            } => indent <= header,
        }
    }
}

/// Splits docstrings into recognized sections.
#[derive(Debug, Clone, Copy)]
pub struct SectionScanner<'a> {
    /// Recognized headers.
    sections: &'a SectionSet,
}

impl<'a> SectionScanner<'a> {
    /// Creates a scanner for the given header set.
    #[must_use]
    pub const fn new(sections: &'a SectionSet) -> Self {
        Self {
            sections,
        }
    }

    /// Scans `docstring` into sections.
    ///
    /// # Errors
    ///
    /// Returns [`DocstringError::UnknownSection`] for a header outside the
    /// recognized set and [`DocstringError::Entry`] for a raises entry that
    /// is not `Name: description`.
    pub fn scan(&self, docstring: &str) -> Result<ScannedDocstring, DocstringError> {
        let mut scanned = ScannedDocstring::default();
        let mut state = ScanState::Scanning;
        let mut open_exception: Option<String> = None;
        let mut lines = docstring.lines().enumerate();

        while state != ScanState::Done {
            let Some((index, raw)) = lines.next() else {
                state = ScanState::Done;
                continue;
            };
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            let indent = raw.len() - raw.trim_start().len();

            if let Some(header) = header_text(text).filter(|_| state.accepts_header(indent)) {
                let Some(kind) = self.sections.kind(header) else {
                    return Err(UnknownSectionError {
                        section: header.to_string(),
                        line,
                    }
                    .into());
                };
                open_exception = None;
                state = if kind == SectionKind::Raises {
                    ScanState::InExceptions {
                        indent,
                    }
                } else {
                    if kind != SectionKind::Summary {
                        scanned.sections.push(ScannedSection {
                            kind,
                            header: header.to_string(),
                            line,
                            lines: Vec::new(),
                        });
                    }
                    ScanState::InKnownSection {
                        indent,
                        kind,
                    }
                };
                tracing::trace!(header, line, "docstring section opened");
                continue;
            }

            match state {
                ScanState::Scanning
                | ScanState::InKnownSection {
                    kind: SectionKind::Summary,
                    ..
                } => scanned.push_summary(text),
                ScanState::InKnownSection {
                    ..
                } => {
                    if let Some(section) = scanned.sections.last_mut() {
                        section.lines.push(ScannedLine {
                            line,
                            text: text.to_string(),
                        });
                    }
                }
                ScanState::InExceptions {
                    ..
                } => {
                    push_exception(&mut scanned.exceptions, &mut open_exception, text, line)?;
                }
                ScanState::Done => {}
            }
        }
        Ok(scanned)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the header text when `text` looks like `Words:`.
fn header_text(text: &str) -> Option<&str> {
    let head = text.strip_suffix(':')?;
    if head.ends_with(':') || head.ends_with(' ') {
        return None;
    }
    let is_title_word = |word: &str| {
        word.chars().next().is_some_and(char::is_uppercase) && word.chars().all(char::is_alphabetic)
    };
    head.split(' ').all(is_title_word).then_some(head)
}

/// Records one raises line as a new entry or a continuation.
fn push_exception(
    exceptions: &mut BTreeMap<String, String>,
    open: &mut Option<String>,
    text: &str,
    line: usize,
) -> Result<(), DocstringError> {
    if let Some((name, description)) = text.split_once(':') {
        let name = name.trim();
        if is_exception_name(name) {
            exceptions.insert(name.to_string(), description.trim().to_string());
            *open = Some(name.to_string());
            return Ok(());
        }
    }
    let Some(entry) = open.as_ref().and_then(|name| exceptions.get_mut(name)) else {
        return Err(DocstringError::Entry {
            section: "Raises".to_string(),
            line,
            detail: format!("expected `Name: description`, found `{text}`"),
        });
    };
    if !entry.is_empty() {
        entry.push(' ');
    }
    entry.push_str(text);
    Ok(())
}

/// Returns true for a dotted identifier such as `ValueError` or `errors.Bad`.
fn is_exception_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            segment.chars().next().is_some_and(|ch| ch.is_alphabetic() || ch == '_')
                && segment.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
        })
}
