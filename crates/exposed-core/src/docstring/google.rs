// crates/exposed-core/src/docstring/google.rs
// ============================================================================
// Module: Google-Style Docstring Parser
// Description: Entry parsing for `Args:` / `Returns:` / `Raises:` docstrings.
// Purpose: Provide a ready-made parser behind the `DocstringParser` seam.
// Dependencies: crate::{docstring, schema}
// ============================================================================

//! ## Overview
//! Parses the body lines the [`SectionScanner`] collects:
//!
//! - params: `name (type): text`, `name (type, optional): text`,
//!   `name (type)` or `name: text`; other lines continue the previous entry.
//! - returns: `type: text`; other lines continue the previous entry, and a
//!   leading untyped line becomes an untyped output.
//!
//! Types are copied verbatim; [`normalize_result`] canonicalizes them.
//!
//! [`normalize_result`]: crate::docstring::normalize_result

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::docstring::DocstringError;
use crate::docstring::DocstringParser;
use crate::docstring::scanner::ScannedSection;
use crate::docstring::scanner::SectionScanner;
use crate::docstring::sections::SectionKind;
use crate::docstring::sections::SectionSet;
use crate::schema::DocstringParserResult;
use crate::schema::OutputDoc;
use crate::schema::ParamDoc;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Parser for Google-style docstrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleDocstringParser {
    /// Recognized section headers.
    sections: SectionSet,
}

impl GoogleDocstringParser {
    /// Creates a parser recognizing `sections`.
    #[must_use]
    pub const fn new(sections: SectionSet) -> Self {
        Self {
            sections,
        }
    }
}

impl DocstringParser for GoogleDocstringParser {
    fn parse(&self, docstring: &str) -> Result<DocstringParserResult, DocstringError> {
        let scanned = SectionScanner::new(&self.sections).scan(docstring)?;
        let mut result = DocstringParserResult {
            original: Some(docstring.to_string()),
            summary: scanned.summary,
            exceptions: scanned.exceptions,
            ..DocstringParserResult::default()
        };
        for section in &scanned.sections {
            match section.kind {
                SectionKind::Params => parse_params(section, &mut result.input_params)?,
                SectionKind::Returns => parse_returns(section, &mut result.output_params),
                SectionKind::Summary | SectionKind::Raises => {}
            }
        }
        Ok(result)
    }
}

// ============================================================================
// SECTION: Parameter Entries
// ============================================================================

/// A parsed `name (type): text` line.
struct ParamEntry<'a> {
    /// Parameter name.
    name: &'a str,
    /// Type text, when given.
    type_text: Option<&'a str>,
    /// Whether the type carried `, optional`.
    optional: bool,
    /// Description text.
    description: &'a str,
}

/// Parses every line of a params section.
fn parse_params(section: &ScannedSection, out: &mut Vec<ParamDoc>) -> Result<(), DocstringError> {
    let mut current: Option<ParamDoc> = None;
    for line in &section.lines {
        if let Some(entry) = param_entry(&line.text) {
            out.extend(current.take());
            current = Some(ParamDoc {
                description: Some(entry.description.to_string()),
                type_ref: entry.type_text.map(TypeRef::new),
                optional: Some(entry.optional),
                ..ParamDoc::new(entry.name)
            });
            continue;
        }
        let Some(doc) = current.as_mut() else {
            return Err(DocstringError::Entry {
                section: section.header.clone(),
                line: line.line,
                detail: format!("expected `name (type): description`, found `{}`", line.text),
            });
        };
        append(&mut doc.description, &line.text);
    }
    out.extend(current);
    Ok(())
}

/// Splits a params line into its parts.
fn param_entry(text: &str) -> Option<ParamEntry<'_>> {
    let name_len = text.find(|ch: char| !(ch.is_alphanumeric() || ch == '_')).unwrap_or(text.len());
    if name_len == 0 {
        return None;
    }
    let (name, rest) = text.split_at(name_len);

    if let Some(rest) = rest.strip_prefix(" (") {
        let (type_part, description) = match rest.split_once("):") {
            Some((type_part, "")) => (type_part, ""),
            Some((type_part, tail)) => (type_part, tail.strip_prefix(' ')?),
            None => (rest.strip_suffix(')')?, ""),
        };
        let (type_text, optional) = split_optional(type_part.trim());
        if type_text.is_some_and(|text| !is_type_text(text)) {
            return None;
        }
        return Some(ParamEntry {
            name,
            type_text,
            optional,
            description: description.trim(),
        });
    }

    let description = rest.strip_prefix(": ")?.trim();
    if description.is_empty() {
        return None;
    }
    Some(ParamEntry {
        name,
        type_text: None,
        optional: false,
        description,
    })
}

/// Splits a trailing `, optional` marker off a type.
pub(super) fn split_optional(type_part: &str) -> (Option<&str>, bool) {
    let Some(head) = type_part.strip_suffix("optional") else {
        return (Some(type_part), false);
    };
    let head = head.trim_end().trim_end_matches(',').trim();
    if head.is_empty() { (None, true) } else { (Some(head), true) }
}

// ============================================================================
// SECTION: Return Entries
// ============================================================================

/// Parses every line of a returns section.
fn parse_returns(section: &ScannedSection, out: &mut Vec<OutputDoc>) {
    for line in &section.lines {
        if let Some((type_text, description)) = line.text.split_once(": ")
            && is_type_text(type_text)
        {
            out.push(OutputDoc {
                name: None,
                type_ref: Some(TypeRef::new(type_text)),
                description: Some(description.trim().to_string()),
            });
            continue;
        }
        match out.last_mut() {
            Some(doc) => append(&mut doc.description, &line.text),
            None => out.push(OutputDoc {
                description: Some(line.text.clone()),
                ..OutputDoc::default()
            }),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns true when `text` looks like a type reference.
///
/// Spaces are only allowed after commas and around `|` so prose such as
/// `The sum` is not mistaken for a type.
fn is_type_text(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    !chars.is_empty()
        && chars.iter().enumerate().all(|(index, &ch)| match ch {
            ' ' => {
                let previous = index.checked_sub(1).and_then(|previous| chars.get(previous));
                matches!(previous, Some(',' | '|')) || chars.get(index + 1) == Some(&'|')
            }
            '[' | ']' | ',' | '.' | '(' | ')' | '_' | '|' => true,
            other => other.is_alphanumeric(),
        })
}

/// Appends a continuation line to a description.
fn append(description: &mut Option<String>, text: &str) {
    match description {
        Some(existing) if !existing.is_empty() => {
            existing.push(' ');
            existing.push_str(text);
        }
        _ => *description = Some(text.to_string()),
    }
}
