// crates/exposed-core/src/docstring/normalize.rs
// ============================================================================
// Module: Docstring Result Normalization
// Description: Unifies raw parser output into the canonical result shape.
// Purpose: Make results from any parser comparable and merge-ready.
// Dependencies: serde_json, crate::{codec, docstring, schema}
// ============================================================================

//! ## Overview
//! Parsers differ in how much they tidy up; normalization makes their output
//! uniform before the assembler merges it into parameters:
//!
//! - the original text is recorded and the summary trimmed,
//! - `defaults to X` phrases move from descriptions into `default`,
//! - quoted string defaults are unquoted and coerced for `int`, `float`,
//!   `bool` and `None`-admitting types,
//! - descriptions are tidied and end with a period; empty ones are dropped,
//! - `positional` and `optional` are derived when absent,
//! - unnamed outputs become `out` or `out0`, `out1`, ...,
//! - every documented type is rewritten to its canonical reference.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Number;
use serde_json::Value;

use crate::codec::TypeCodec;
use crate::codec::TypeResolver;
use crate::codec::TypeValue;
use crate::codec::value::Builtin;
use crate::docstring::DocstringError;
use crate::schema::DocstringParserResult;
use crate::schema::OutputDoc;
use crate::schema::ParamDoc;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Phrase that introduces an inline default in a description.
const DEFAULTS_TO: &str = "defaults to ";

/// Characters that may wrap a documented default.
const QUOTES: [char; 3] = ['`', '\'', '"'];

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes raw parser output for `original`.
///
/// # Errors
///
/// Returns [`DocstringError::Type`] when a documented type cannot be resolved
/// and [`DocstringError::Default`] when a documented default does not fit its
/// documented type.
pub fn normalize_result<R>(
    mut result: DocstringParserResult,
    original: &str,
    codec: &TypeCodec,
    resolver: &R,
) -> Result<DocstringParserResult, DocstringError>
where
    R: TypeResolver + ?Sized,
{
    result.original = Some(original.to_string());
    result.summary = non_empty(result.summary.as_deref().map(str::trim));

    for param in &mut result.input_params {
        normalize_param(param, codec, resolver)?;
    }

    let output_count = result.output_params.len();
    for (index, output) in result.output_params.iter_mut().enumerate() {
        normalize_output(output, index, output_count, codec, resolver)?;
    }

    for description in result.exceptions.values_mut() {
        *description = description.trim().to_string();
    }
    Ok(result)
}

/// Normalizes one input parameter entry.
fn normalize_param<R>(
    param: &mut ParamDoc,
    codec: &TypeCodec,
    resolver: &R,
) -> Result<(), DocstringError>
where
    R: TypeResolver + ?Sized,
{
    let mut description = param.description.as_deref().unwrap_or_default().trim().to_string();
    if let Some((stripped, default)) = extract_default(&description) {
        if param.default.is_none() {
            param.default = Some(Value::String(default.to_string()));
        }
        description = stripped;
    }
    if let Some(Value::String(text)) = &param.default {
        param.default = Some(Value::String(unquote(text).to_string()));
    }

    let mut resolved = None;
    if let Some(type_ref) = &param.type_ref {
        let value = codec.decode(type_ref.as_str(), resolver)?;
        param.type_ref = Some(codec.encode(&value, resolver)?);
        resolved = Some(value);
    }
    if let (Some(Value::String(text)), Some(value)) = (&param.default, &resolved) {
        let coerced = coerce_default(text, value).map_err(|detail| DocstringError::Default {
            name: param.name.clone(),
            type_ref: param.type_ref.as_ref().map(TypeRef::to_string).unwrap_or_default(),
            detail,
        })?;
        param.default = Some(coerced);
    }

    param.description = non_empty(Some(tidy_description(&description).as_str()));

    let has_default = param.default.is_some();
    let positional = *param
        .positional
        .get_or_insert(!(has_default || param.optional == Some(true)));
    param.optional.get_or_insert(has_default || !positional);
    Ok(())
}

/// Normalizes one output entry.
fn normalize_output<R>(
    output: &mut OutputDoc,
    index: usize,
    count: usize,
    codec: &TypeCodec,
    resolver: &R,
) -> Result<(), DocstringError>
where
    R: TypeResolver + ?Sized,
{
    if output.name.is_none() {
        output.name = Some(default_output_name(index, count));
    }
    if let Some(type_ref) = &output.type_ref {
        output.type_ref = Some(codec.canonicalize(type_ref.as_str(), resolver)?);
    }
    output.description = non_empty(output.description.as_deref().map(str::trim));
    Ok(())
}

/// Returns the name given to an unnamed output at `index` of `count`.
#[must_use]
pub fn default_output_name(index: usize, count: usize) -> String {
    if count > 1 { format!("out{index}") } else { "out".to_string() }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Removes a `defaults to X` phrase, returning the rest and the raw value.
fn extract_default(description: &str) -> Option<(String, &str)> {
    let start = description.find(DEFAULTS_TO)?;
    let tail = &description[start + DEFAULTS_TO.len() ..];
    let token_len = quoted_len(tail).or_else(|| {
        let len = tail.find(|ch: char| ch.is_whitespace() || ch == '.' || ch == ',').unwrap_or(tail.len());
        (len > 0).then_some(len)
    })?;
    let value = &tail[.. token_len];
    let rest = format!("{}{}", &description[.. start], &tail[token_len ..]);
    Some((rest.trim().to_string(), value))
}

/// Returns the byte length of a leading quoted token, quotes included.
fn quoted_len(text: &str) -> Option<usize> {
    let quote = text.chars().next().filter(|ch| QUOTES.contains(ch))?;
    let close = text[1 ..].find(quote)?;
    (close > 0).then_some(close + 2)
}

/// Strips one pair of wrapping quotes or backticks.
fn unquote(text: &str) -> &str {
    let Some(first) = text.chars().next().filter(|ch| QUOTES.contains(ch)) else {
        return text;
    };
    text.strip_prefix(first).and_then(|inner| inner.strip_suffix(first)).unwrap_or(text)
}

/// Converts a textual default to the JSON value its type implies.
fn coerce_default(text: &str, value: &TypeValue) -> Result<Value, String> {
    match value {
        TypeValue::None => {
            if text == "None" {
                Ok(Value::Null)
            } else {
                Err(format!("`{text}` is not None"))
            }
        }
        TypeValue::Builtin(Builtin::Int) => text
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("`{text}` is not an integer")),
        TypeValue::Builtin(Builtin::Float) => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("`{text}` is not a finite float")),
        TypeValue::Builtin(Builtin::Bool) => match text {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            _ => Err(format!("`{text}` is not a boolean")),
        },
        TypeValue::Union(members) => {
            if text == "None" && members.iter().any(TypeValue::is_none) {
                return Ok(Value::Null);
            }
            members
                .iter()
                .filter(|member| !member.is_none())
                .find_map(|member| coerce_default(text, member).ok())
                .ok_or_else(|| format!("`{text}` matches no member of the union"))
        }
        _ => Ok(Value::String(text.to_string())),
    }
}

// ============================================================================
// SECTION: Descriptions
// ============================================================================

/// Collapses stray spacing before punctuation and ensures a final period.
fn tidy_description(text: &str) -> String {
    let mut tidy = text.to_string();
    for (from, to) in [("  ", " "), (" .", "."), (" ,", ","), (" :", ":"), (",.", ".")] {
        while tidy.contains(from) {
            tidy = tidy.replace(from, to);
        }
    }
    let mut tidy = tidy.trim().trim_end_matches([',', ';']).trim_end().to_string();
    if !tidy.is_empty() && !tidy.ends_with('.') {
        tidy.push('.');
    }
    tidy
}

/// Returns an owned copy of `text` unless it is absent or empty.
fn non_empty(text: Option<&str>) -> Option<String> {
    text.filter(|text| !text.is_empty()).map(str::to_string)
}
