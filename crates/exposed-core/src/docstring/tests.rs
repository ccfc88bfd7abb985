// crates/exposed-core/src/docstring/tests.rs
// ============================================================================
// Module: Docstring Unit Tests
// Description: Tests for section scanning, entry parsing and normalization.
// Purpose: Pin the unknown-section contract and the normalized result shape.
// Dependencies: exposed-core, serde_json
// ============================================================================

//! ## Overview
//! Exercises the scanner state machine (including the hard stop on unknown
//! headers), the Google-style entry parser and the normalization rules that
//! prepare results for merging.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use super::DocstringError;
use super::DocstringParser;
use super::DocstringStyle;
use super::GoogleDocstringParser;
use super::RestructuredDocstringParser;
use super::SectionKind;
use super::SectionScanner;
use super::SectionSet;
use super::StyledDocstringParser;
use super::detect_style;
use super::normalize_result;
use super::parse_docstring;
use crate::codec::TypeCodec;
use crate::codec::TypeRegistry;
use crate::error::UnknownSectionError;
use crate::schema::DocstringParserResult;
use crate::schema::OutputDoc;
use crate::schema::ParamDoc;
use crate::schema::TypeRef;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and normalizes with the default parser and an empty registry.
fn parse(docstring: &str) -> Result<DocstringParserResult, DocstringError> {
    parse_docstring(
        &GoogleDocstringParser::default(),
        docstring,
        &TypeCodec::default(),
        &TypeRegistry::default(),
    )
}

/// Parses and normalizes reStructuredText with an empty registry.
fn parse_rest(docstring: &str) -> Result<DocstringParserResult, DocstringError> {
    parse_docstring(&RestructuredDocstringParser, docstring, &TypeCodec::default(), &TypeRegistry::default())
}

/// Normalizes a raw result against an empty registry.
fn normalize(raw: DocstringParserResult) -> Result<DocstringParserResult, DocstringError> {
    normalize_result(raw, "doc", &TypeCodec::default(), &TypeRegistry::default())
}

/// Raw documentation for one parameter.
fn documented(name: &str, description: &str, type_ref: Option<&str>) -> ParamDoc {
    ParamDoc {
        description: Some(description.to_string()),
        type_ref: type_ref.map(TypeRef::new),
        ..ParamDoc::new(name)
    }
}

/// The four-header set used by the section scenarios.
fn minimal_sections() -> SectionSet {
    [
        ("Summary", SectionKind::Summary),
        ("Params", SectionKind::Params),
        ("Returns", SectionKind::Returns),
        ("Raises", SectionKind::Raises),
    ]
    .into_iter()
    .collect()
}

// ============================================================================
// SECTION: Section Scanning
// ============================================================================

#[test]
fn scan_rejects_unknown_section_by_name() {
    let sections = minimal_sections();
    let docstring = "Adds one.\n\nGotchas:\n    Overflows at the top of the range.\n";
    let err = SectionScanner::new(&sections).scan(docstring).expect_err("unknown section");
    assert_eq!(
        err,
        DocstringError::UnknownSection(UnknownSectionError {
            section: "Gotchas".to_string(),
            line: 3,
        })
    );
    assert_eq!(err.to_string(), "unknown docstring section Gotchas at line 3");
}

#[test]
fn scan_stops_even_after_known_sections() {
    let sections = minimal_sections();
    let docstring = "Adds one.\n\nParams:\n    x: Input.\nNotes:\n    None.";
    let err = SectionScanner::new(&sections).scan(docstring).expect_err("unknown section");
    assert!(matches!(
        err,
        DocstringError::UnknownSection(UnknownSectionError { ref section, line: 5 }) if section == "Notes"
    ));
}

#[test]
fn scan_keeps_prose_ending_in_colon_in_summary() {
    let sections = minimal_sections();
    let docstring = "Computes a total.\nExample usage follows:\n    total(1, 2)";
    let scanned = SectionScanner::new(&sections).scan(docstring).expect("scan");
    assert_eq!(
        scanned.summary.as_deref(),
        Some("Computes a total. Example usage follows: total(1, 2)")
    );
    assert!(scanned.sections.is_empty());
}

#[test]
fn scan_collects_exceptions_with_continuations() {
    let sections = minimal_sections();
    let docstring = "Divides numbers.\n\n    Raises:\n        ZeroDivisionError:\n            When b is zero.\n        ValueError: When a is negative\n            or too large.\n";
    let scanned = SectionScanner::new(&sections).scan(docstring).expect("scan");
    assert_eq!(scanned.summary.as_deref(), Some("Divides numbers."));
    assert_eq!(scanned.exceptions["ZeroDivisionError"], "When b is zero.");
    assert_eq!(scanned.exceptions["ValueError"], "When a is negative or too large.");
}

#[test]
fn scan_rejects_malformed_exception_entry() {
    let sections = minimal_sections();
    let err = SectionScanner::new(&sections)
        .scan("Raises:\n    oops no colon here")
        .expect_err("malformed");
    assert!(matches!(err, DocstringError::Entry { line: 2, .. }), "{err}");
}

#[test]
fn scan_records_section_lines_and_headers() {
    let sections = SectionSet::default();
    let scanned = SectionScanner::new(&sections)
        .scan("Summary:\n    Adds.\nArguments:\n    x: Input.\nReturn:\n    int: Output.")
        .expect("scan");
    assert_eq!(scanned.summary.as_deref(), Some("Adds."));
    let kinds: Vec<_> = scanned.sections.iter().map(|section| (section.kind, section.line)).collect();
    assert_eq!(kinds, vec![(SectionKind::Params, 3), (SectionKind::Returns, 5)]);
    assert_eq!(scanned.sections[0].lines[0].text, "x: Input.");
}

// ============================================================================
// SECTION: Google Parser
// ============================================================================

#[test]
fn google_parser_reads_typed_and_optional_params() {
    let docstring = "Args:\na (int): This is an integer.\nb (int, optional): This is an optional integer.";
    let result = parse(docstring).expect("parse");
    let value = serde_json::to_value(&result).expect("serialize");
    assert_eq!(
        value,
        json!({
            "original": docstring,
            "exceptions": {},
            "input_params": [
                {
                    "name": "a",
                    "description": "This is an integer.",
                    "optional": false,
                    "type": "int",
                    "positional": true,
                },
                {
                    "name": "b",
                    "description": "This is an optional integer.",
                    "optional": true,
                    "type": "int",
                    "positional": false,
                },
            ],
            "output_params": [],
        })
    );
}

#[test]
fn google_parser_reads_returns_and_continuations() {
    let docstring = "Sums.\n\n    Args:\n        x: First value\n            spanning lines\n    Returns:\n        int: The sum\n            of both.";
    let result = parse(docstring).expect("parse");
    assert_eq!(result.summary.as_deref(), Some("Sums."));
    assert_eq!(result.input_params[0].description.as_deref(), Some("First value spanning lines."));
    assert_eq!(
        result.output_params,
        vec![OutputDoc {
            name: Some("out".to_string()),
            type_ref: Some(TypeRef::new("int")),
            description: Some("The sum of both.".to_string()),
        }]
    );
}

#[test]
fn google_parser_reads_pipe_union_types() {
    let docstring = "Clamps a value.\n\nArgs:\n    value (float): Input value.\n    min (int | float, optional): Lower bound, defaults to 0.\n    max (int|float, optional): Upper bound.";
    let result = parse(docstring).expect("parse");
    let names: Vec<&str> = result.input_params.iter().map(|param| param.name.as_str()).collect();
    assert_eq!(names, vec!["value", "min", "max"]);
    let min = &result.input_params[1];
    assert_eq!(min.type_ref.as_ref().map(TypeRef::as_str), Some("Union[int, float]"));
    assert_eq!(min.optional, Some(true));
    assert_eq!(min.default, Some(json!(0)));
    assert_eq!(min.description.as_deref(), Some("Lower bound."));
    let max = &result.input_params[2];
    assert_eq!(max.type_ref.as_ref().map(TypeRef::as_str), Some("Union[int, float]"));
    assert_eq!(max.description.as_deref(), Some("Upper bound."));
    assert_eq!(result.input_params[0].description.as_deref(), Some("Input value."));
}

#[test]
fn google_parser_rejects_orphan_param_line() {
    let err = GoogleDocstringParser::default()
        .parse("Args:\n    just some prose")
        .expect_err("orphan line");
    assert!(matches!(err, DocstringError::Entry { ref section, .. } if section == "Args"));
}

#[test]
fn google_parser_surfaces_unresolvable_types() {
    let err = parse("Args:\n    w (Widget): A widget.").expect_err("unknown type");
    assert!(matches!(err, DocstringError::Type(ref inner) if inner.reference == "Widget"));
}

#[test]
fn closures_implement_the_parser_seam() {
    let parser = |text: &str| {
        Ok::<_, DocstringError>(DocstringParserResult {
            summary: Some(format!("  {text}  ")),
            ..DocstringParserResult::default()
        })
    };
    let result = parse_docstring(&parser, "Hi", &TypeCodec::default(), &TypeRegistry::default())
        .expect("parse");
    assert_eq!(result.summary.as_deref(), Some("Hi"));
    assert_eq!(result.original.as_deref(), Some("Hi"));
}

// ============================================================================
// SECTION: reStructuredText Parsing
// ============================================================================

#[test]
fn rest_parser_reads_basic_docstring() {
    let docstring = "
        A basic function.

        :param a: The first parameter, defaults to '1'
        :type a: int, optional
        :param b: The second parameter
        :type b: str
        :raises ValueError: When something is wrong.
        :return: A string representation.
        :rtype: str
        ";
    let result = parse_rest(docstring).expect("parse");
    assert_eq!(result.summary.as_deref(), Some("A basic function."));
    assert_eq!(result.original.as_deref(), Some(docstring));

    let a = &result.input_params[0];
    assert_eq!(a.name, "a");
    assert_eq!(a.description.as_deref(), Some("The first parameter."));
    assert_eq!(a.type_ref.as_ref().map(TypeRef::as_str), Some("int"));
    assert_eq!(a.default, Some(json!(1)));
    assert_eq!((a.positional, a.optional), (Some(false), Some(true)));

    let b = &result.input_params[1];
    assert_eq!(b.description.as_deref(), Some("The second parameter."));
    assert_eq!(b.type_ref.as_ref().map(TypeRef::as_str), Some("str"));
    assert_eq!((b.default.as_ref(), b.positional, b.optional), (None, Some(true), Some(false)));

    assert_eq!(result.exceptions.get("ValueError").map(String::as_str), Some("When something is wrong."));
    assert_eq!(result.output_params, vec![OutputDoc {
        name: Some("out".to_string()),
        type_ref: Some(TypeRef::new("str")),
        description: Some("A string representation.".to_string()),
    }]);
}

#[test]
fn rest_parser_reads_partial_docstrings() {
    let only_params = parse_rest(
        "Summary here.\n\n:param a: Description for a.\n:type a: int\n\n:param b: b is an optional integer.\n:type b: int, optional\n",
    )
    .expect("params");
    assert!(only_params.output_params.is_empty());
    assert!(only_params.exceptions.is_empty());
    let b = &only_params.input_params[1];
    assert_eq!(b.type_ref.as_ref().map(TypeRef::as_str), Some("int"));
    assert_eq!((b.positional, b.optional), (Some(false), Some(true)));

    let only_return = parse_rest("Summary for this one.\n\n:return: Some output.\n:rtype: int\n").expect("return");
    assert!(only_return.input_params.is_empty());
    assert_eq!(only_return.output_params[0].type_ref.as_ref().map(TypeRef::as_str), Some("int"));
    assert_eq!(only_return.output_params[0].description.as_deref(), Some("Some output."));

    let only_except = parse_rest("Exception function.\n\n:raises ValueError: If value is wrong.\n").expect("raises");
    assert_eq!(only_except.summary.as_deref(), Some("Exception function."));
    assert_eq!(only_except.exceptions.len(), 1);

    let untyped = parse_rest(":param a: Description for a.\n:param b: Description for b.\n").expect("untyped");
    assert_eq!(untyped.summary, None);
    for param in &untyped.input_params {
        assert_eq!(param.type_ref, None);
        assert_eq!((param.positional, param.optional), (Some(true), Some(false)));
    }

    let excepts =
        parse_rest(":raises ValueError: If value is wrong.\n:raises TypeError: If type is wrong.\n").expect("raises");
    let names: Vec<&str> = excepts.exceptions.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["TypeError", "ValueError"]);
}

#[test]
fn rest_parser_joins_continuation_lines() {
    let docstring = "
        Function with multiline descriptions.
        Even the summary is multiline.

        :param a: Description for a.
            This continues.
        :param b: Description for b.

        :return: Some output.
            This continues.
        :rtype: int

        :raises ValueError: If value is wrong.
            This explains why.

        :raises TypeError: If type is wrong.
        ";
    let result = parse_rest(docstring).expect("parse");
    assert_eq!(
        result.summary.as_deref(),
        Some("Function with multiline descriptions. Even the summary is multiline.")
    );
    assert_eq!(result.input_params[0].description.as_deref(), Some("Description for a. This continues."));
    assert_eq!(result.output_params[0].name.as_deref(), Some("out"));
    assert_eq!(result.output_params[0].description.as_deref(), Some("Some output. This continues."));
    assert_eq!(
        result.exceptions.get("ValueError").map(String::as_str),
        Some("If value is wrong. This explains why.")
    );
    assert_eq!(result.exceptions.get("TypeError").map(String::as_str), Some("If type is wrong."));
}

#[test]
fn rest_parser_reads_inline_and_unnamed_types() {
    let result = parse_rest(":param list[int] xs: Values.\n:param y: Scale.\n:type: float\n:rtype: int\n").expect("parse");
    assert_eq!(result.input_params[0].type_ref.as_ref().map(TypeRef::as_str), Some("List[int]"));
    assert_eq!(result.input_params[1].type_ref.as_ref().map(TypeRef::as_str), Some("float"));
    assert_eq!(result.output_params.len(), 1);
    assert_eq!(result.output_params[0].description, None);
}

#[test]
fn rest_parser_rejects_unknown_and_malformed_fields() {
    let err = parse_rest("Adds.\n\n:param x: Input.\n:note: Careful.\n").expect_err("unknown field");
    assert_eq!(
        err,
        DocstringError::UnknownSection(UnknownSectionError {
            section: "note".to_string(),
            line: 4,
        })
    );

    let err = parse_rest(":type x: int\n").expect_err("orphan type");
    assert!(matches!(err, DocstringError::Entry { ref section, line: 1, .. } if section == "type"), "{err}");

    let err = parse_rest(":param: Nameless.\n").expect_err("nameless param");
    assert!(matches!(err, DocstringError::Entry { ref section, .. } if section == "param"), "{err}");

    let err = parse_rest(":raises: Something.\n").expect_err("nameless raises");
    assert!(matches!(err, DocstringError::Entry { ref section, .. } if section == "raises"), "{err}");
}

#[test]
fn rest_parser_surfaces_unresolvable_types() {
    let err = parse_rest(":param w: A widget.\n:type w: Widget\n").expect_err("unresolved");
    assert!(matches!(err, DocstringError::Type(_)), "{err}");
}

// ============================================================================
// SECTION: Style Selection
// ============================================================================

#[test]
fn detect_style_looks_for_field_markers() {
    assert_eq!(detect_style("Adds.\n\n    :param x: Input."), DocstringStyle::Restructured);
    assert_eq!(detect_style(":raises ValueError: Bad."), DocstringStyle::Restructured);
    assert_eq!(detect_style("Adds.\n:returns: Sum."), DocstringStyle::Restructured);
    assert_eq!(detect_style("Adds.\n\nArgs:\n    x (int): Input."), DocstringStyle::Google);
    assert_eq!(detect_style("Mentions :param inline."), DocstringStyle::Google);
    assert_eq!(detect_style(""), DocstringStyle::Google);
}

#[test]
fn styled_parser_routes_by_style() {
    let google = "Adds.\n\nArgs:\n    x (int): Input.";
    let rest = "Adds.\n\n:param x: Input.\n:type x: int";
    let auto = StyledDocstringParser::default();
    assert_eq!(auto.style(), DocstringStyle::Auto);
    let from_google = auto.parse(google).expect("google");
    let from_rest = auto.parse(rest).expect("rest");
    assert_eq!(from_google.input_params, from_rest.input_params);

    let forced = StyledDocstringParser::new(DocstringStyle::Google, SectionSet::default());
    let parsed = forced.parse(rest).expect("google summary");
    assert!(parsed.input_params.is_empty());

    let forced = StyledDocstringParser::new(DocstringStyle::Restructured, SectionSet::default());
    let parsed = forced.parse(google).expect("rest summary");
    assert!(parsed.input_params.is_empty());
    assert_eq!(parsed.summary.as_deref(), Some("Adds. Args: x (int): Input."));
}

#[test]
fn docstring_style_uses_snake_case_names() {
    let style: DocstringStyle = serde_json::from_value(json!("restructured")).expect("style");
    assert_eq!(style, DocstringStyle::Restructured);
    assert_eq!(serde_json::to_value(DocstringStyle::Auto).expect("json"), json!("auto"));
    assert_eq!(DocstringStyle::Google.as_str(), "google");
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

#[test]
fn normalize_extracts_inline_defaults() {
    let raw = DocstringParserResult {
        input_params: vec![
            documented("retries", "Number of retries, defaults to 3.", Some("int")),
            documented("mode", "Mode name, defaults to 'fast'.", Some("str")),
            documented("ratio", "Blend ratio defaults to `0.5`", Some("float")),
            documented("verbose", "Chatty output, defaults to True.", Some("bool")),
            documented("label", "Label, defaults to None.", Some("Optional[str]")),
        ],
        ..DocstringParserResult::default()
    };
    let result = normalize(raw).expect("normalize");
    let defaults: Vec<Option<Value>> =
        result.input_params.iter().map(|param| param.default.clone()).collect();
    assert_eq!(
        defaults,
        vec![
            Some(json!(3)),
            Some(json!("fast")),
            Some(json!(0.5)),
            Some(json!(true)),
            Some(Value::Null),
        ]
    );
    let retries = &result.input_params[0];
    assert_eq!(retries.description.as_deref(), Some("Number of retries."));
    assert_eq!(retries.positional, Some(false));
    assert_eq!(retries.optional, Some(true));
    assert_eq!(result.input_params[2].description.as_deref(), Some("Blend ratio."));
    assert_eq!(
        result.input_params[4].type_ref.as_ref().map(TypeRef::as_str),
        Some("Union[str, None]")
    );
}

#[test]
fn normalize_rejects_default_that_does_not_fit_type() {
    let raw = DocstringParserResult {
        input_params: vec![documented("n", "Count, defaults to many.", Some("int"))],
        ..DocstringParserResult::default()
    };
    let err = normalize(raw).expect_err("bad default");
    assert!(matches!(err, DocstringError::Default { ref name, .. } if name == "n"), "{err}");
}

#[test]
fn normalize_derives_flags_and_drops_empty_text() {
    let raw = DocstringParserResult {
        summary: Some("   ".to_string()),
        input_params: vec![documented("x", "  ", None), ParamDoc {
            optional: Some(true),
            ..ParamDoc::new("y")
        }],
        ..DocstringParserResult::default()
    };
    let result = normalize(raw).expect("normalize");
    assert_eq!(result.summary, None);
    assert_eq!(result.original.as_deref(), Some("doc"));
    let x = &result.input_params[0];
    assert_eq!((x.description.as_deref(), x.positional, x.optional), (None, Some(true), Some(false)));
    let y = &result.input_params[1];
    assert_eq!((y.positional, y.optional), (Some(false), Some(true)));
}

#[test]
fn normalize_tidies_descriptions() {
    let raw = DocstringParserResult {
        input_params: vec![documented("x", "The  value , in range : 0 to 1", None)],
        ..DocstringParserResult::default()
    };
    let result = normalize(raw).expect("normalize");
    assert_eq!(
        result.input_params[0].description.as_deref(),
        Some("The value, in range: 0 to 1.")
    );
}

#[test]
fn normalize_names_and_canonicalizes_outputs() {
    let raw = DocstringParserResult {
        output_params: vec![
            OutputDoc {
                type_ref: Some(TypeRef::new("list[int]")),
                description: Some(" Values. ".to_string()),
                ..OutputDoc::default()
            },
            OutputDoc {
                description: Some("   ".to_string()),
                ..OutputDoc::default()
            },
        ],
        ..DocstringParserResult::default()
    };
    let result = normalize(raw).expect("normalize");
    assert_eq!(result.output_params[0].name.as_deref(), Some("out0"));
    assert_eq!(result.output_params[1].name.as_deref(), Some("out1"));
    assert_eq!(
        result.output_params[0].type_ref.as_ref().map(TypeRef::as_str),
        Some("List[int]")
    );
    assert_eq!(result.output_params[0].description.as_deref(), Some("Values."));
    assert_eq!(result.output_params[1].description, None);
}
