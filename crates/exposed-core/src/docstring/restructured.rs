// crates/exposed-core/src/docstring/restructured.rs
// ============================================================================
// Module: reStructuredText Docstring Parser
// Description: Field-list parsing for `:param:` / `:type:` / `:raises:` docstrings.
// Purpose: Provide a second ready-made parser behind the `DocstringParser` seam.
// Dependencies: crate::{docstring, error, schema}
// ============================================================================

//! ## Overview
//! Parses Sphinx-style field lists:
//!
//! ```text
//! Summary text.
//!
//! :param a: First value, defaults to 1
//! :type a: int, optional
//! :raises ValueError: When a is negative.
//! :return: The result.
//! :rtype: int
//! ```
//!
//! Text before the first field is the summary. A line that does not open a
//! field continues the previous one. `:param int a:` carries the type inline.
//! Field tags outside the known set fail with [`UnknownSectionError`], the
//! same hard stop the Google parser applies to unknown headers.
//!
//! [`UnknownSectionError`]: crate::error::UnknownSectionError

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::docstring::DocstringError;
use crate::docstring::DocstringParser;
use crate::docstring::google::split_optional;
use crate::error::UnknownSectionError;
use crate::schema::DocstringParserResult;
use crate::schema::OutputDoc;
use crate::schema::ParamDoc;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Parser for reStructuredText (Sphinx) field-list docstrings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestructuredDocstringParser;

impl DocstringParser for RestructuredDocstringParser {
    fn parse(&self, docstring: &str) -> Result<DocstringParserResult, DocstringError> {
        let (summary, fields) = collect_fields(docstring);
        let mut result = DocstringParserResult {
            original: Some(docstring.to_string()),
            summary: (!summary.is_empty()).then(|| summary.join(" ")),
            ..DocstringParserResult::default()
        };
        for field in &fields {
            apply_field(field, &mut result)?;
        }
        Ok(result)
    }
}

// ============================================================================
// SECTION: Fields
// ============================================================================

/// Role of a field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    /// `:param name:`
    Param,
    /// `:type name:`
    Type,
    /// `:raises Error:`
    Raises,
    /// `:return:`
    Return,
    /// `:rtype:`
    ReturnType,
}

/// Maps a field tag to its kind.
fn field_kind(tag: &str) -> Option<FieldKind> {
    match tag {
        "param" | "parameter" | "arg" | "argument" | "key" | "keyword" => Some(FieldKind::Param),
        "type" => Some(FieldKind::Type),
        "raises" | "raise" | "except" | "exception" => Some(FieldKind::Raises),
        "return" | "returns" => Some(FieldKind::Return),
        "rtype" => Some(FieldKind::ReturnType),
        _ => None,
    }
}

/// One field with its continuation lines joined.
struct Field {
    /// One-based line of the opening `:tag ...:` marker.
    line: usize,
    /// Field tag, e.g. `param`.
    tag: String,
    /// Words between the tag and the closing colon.
    arguments: Vec<String>,
    /// Field body.
    body: String,
}

/// Splits a docstring into summary lines and fields.
fn collect_fields(docstring: &str) -> (Vec<&str>, Vec<Field>) {
    let mut summary = Vec::new();
    let mut fields: Vec<Field> = Vec::new();
    for (index, raw) in docstring.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        if let Some(field) = field_line(text, index + 1) {
            fields.push(field);
            continue;
        }
        match fields.last_mut() {
            Some(field) => {
                if !field.body.is_empty() {
                    field.body.push(' ');
                }
                field.body.push_str(text);
            }
            None => summary.push(text),
        }
    }
    (summary, fields)
}

/// Parses `:tag args: body`, returning `None` for ordinary text.
fn field_line(text: &str, line: usize) -> Option<Field> {
    let rest = text.strip_prefix(':')?;
    let (head, body) = rest.split_once(':')?;
    let mut words = head.split_whitespace();
    let tag = words.next()?;
    if !tag.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return None;
    }
    Some(Field {
        line,
        tag: tag.to_string(),
        arguments: words.map(str::to_string).collect(),
        body: body.trim().to_string(),
    })
}

/// Applies one field to the result.
fn apply_field(field: &Field, result: &mut DocstringParserResult) -> Result<(), DocstringError> {
    let Some(kind) = field_kind(&field.tag) else {
        return Err(UnknownSectionError {
            section: field.tag.clone(),
            line: field.line,
        }
        .into());
    };
    match kind {
        FieldKind::Param => {
            let (type_text, name) = match field.arguments.as_slice() {
                [name] => (None, name),
                [type_text, name] => (Some(type_text.as_str()), name),
                _ => return Err(entry_error(field, "expected `:param name:` or `:param type name:`")),
            };
            result.input_params.push(ParamDoc {
                description: Some(field.body.clone()),
                type_ref: type_text.map(TypeRef::new),
                ..ParamDoc::new(name.as_str())
            });
        }
        FieldKind::Type => {
            let param = match field.arguments.as_slice() {
                [] => result.input_params.last_mut(),
                [name] => result.input_params.iter_mut().find(|param| param.name == *name),
                _ => None,
            };
            let Some(param) = param else {
                return Err(entry_error(field, "type field does not match a documented parameter"));
            };
            let (type_text, optional) = split_optional(&field.body);
            param.type_ref = type_text.filter(|text| !text.is_empty()).map(TypeRef::new);
            param.optional = Some(optional);
        }
        FieldKind::Raises => {
            let [name] = field.arguments.as_slice() else {
                return Err(entry_error(field, "expected `:raises ErrorName:`"));
            };
            result.exceptions.insert(name.clone(), field.body.clone());
        }
        FieldKind::Return => {
            result.output_params.push(OutputDoc {
                description: Some(field.body.clone()),
                ..OutputDoc::default()
            });
        }
        FieldKind::ReturnType => {
            if field.body.is_empty() {
                return Err(entry_error(field, "expected a return type"));
            }
            let type_ref = Some(TypeRef::new(field.body.as_str()));
            match result.output_params.iter_mut().find(|output| output.type_ref.is_none()) {
                Some(output) => output.type_ref = type_ref,
                None => result.output_params.push(OutputDoc {
                    type_ref,
                    ..OutputDoc::default()
                }),
            }
        }
    }
    Ok(())
}

/// Builds a malformed-entry error for `field`.
fn entry_error(field: &Field, detail: &str) -> DocstringError {
    DocstringError::Entry {
        section: field.tag.clone(),
        line: field.line,
        detail: detail.to_string(),
    }
}
