// crates/exposed-core/src/codec/tests.rs
// ============================================================================
// Module: Type Codec Unit Tests
// Description: Tests for reference encoding, decoding, shapes and the registry.
// Purpose: Pin the canonical reference grammar and failure classification.
// Dependencies: exposed-core, serde_json
// ============================================================================

//! ## Overview
//! Covers canonical encoding of every composite form, the tolerated input
//! spellings, context-scoped failures and the JSON shapes handed to
//! endpoint front-ends.
//!
//! Security posture: references are untrusted input; size and depth limits
//! are exercised explicitly.

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

use serde_json::json;

use super::Builtin;
use super::CodecLimits;
use super::LiteralValue;
use super::RegistryError;
use super::TypeCodec;
use super::TypeRegistry;
use super::TypeValue;
use super::decode;
use super::encode;
use crate::error::NotFoundReason;
use crate::error::TypeNotFoundError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Registry with a couple of user types registered.
fn shapes_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new("shapes");
    registry.register_named("shapes.Widget").expect("register widget");
    registry.register_named("numpy.ndarray").expect("register ndarray");
    registry
}

/// Decodes `reference` and returns the error, failing if it decodes.
fn decode_err(reference: &str, registry: &TypeRegistry) -> TypeNotFoundError {
    match decode(reference, registry) {
        Ok(value) => panic!("expected {reference} to fail, decoded {value:?}"),
        Err(err) => err,
    }
}

/// Encodes `value` and returns the reference text.
fn encoded(value: &TypeValue) -> String {
    encode(value, &shapes_registry()).expect("encode").as_str().to_string()
}

/// Literal values used by the enum shape tests.
fn hello_literals() -> Vec<LiteralValue> {
    vec![LiteralValue::Int(1), LiteralValue::Int(2), LiteralValue::Str("hello world".to_string())]
}

// ============================================================================
// SECTION: Encoding
// ============================================================================

#[test]
fn encode_renders_builtins_and_keywords() {
    assert_eq!(encoded(&TypeValue::INT), "int");
    assert_eq!(encoded(&TypeValue::STR), "str");
    assert_eq!(encoded(&TypeValue::Builtin(Builtin::ByteArray)), "bytearray");
    assert_eq!(encoded(&TypeValue::Any), "Any");
    assert_eq!(encoded(&TypeValue::None), "None");
    assert_eq!(encoded(&TypeValue::Type(None)), "Type");
}

#[test]
fn encode_renders_generic_forms() {
    assert_eq!(encoded(&TypeValue::list(TypeValue::INT)), "List[int]");
    assert_eq!(encoded(&TypeValue::set(TypeValue::FLOAT)), "Set[float]");
    assert_eq!(encoded(&TypeValue::dict(TypeValue::INT, TypeValue::STR)), "Dict[int, str]");
    assert_eq!(
        encoded(&TypeValue::tuple(vec![TypeValue::INT, TypeValue::STR])),
        "Tuple[int, str]"
    );
    assert_eq!(encoded(&TypeValue::tuple(Vec::new())), "Tuple[()]");
    assert_eq!(encoded(&TypeValue::optional(TypeValue::INT)), "Union[int, None]");
    assert_eq!(encoded(&TypeValue::type_of(TypeValue::INT)), "Type[int]");
    assert_eq!(
        encoded(&TypeValue::Literal(hello_literals())),
        "Literal[1, 2, 'hello world']"
    );
}

#[test]
fn encode_quotes_and_escapes_literal_strings() {
    let value = TypeValue::Literal(vec![
        LiteralValue::Str("it's".to_string()),
        LiteralValue::Bool(true),
        LiteralValue::None,
        LiteralValue::Int(-3),
    ]);
    assert_eq!(encoded(&value), r"Literal['it\'s', True, None, -3]");
}

#[test]
fn encode_uses_registered_named_types() {
    assert_eq!(encoded(&TypeValue::named("shapes.Widget")), "shapes.Widget");
    assert_eq!(
        encoded(&TypeValue::union(vec![TypeValue::INT, TypeValue::named("numpy.ndarray")])),
        "Union[int, numpy.ndarray]"
    );
}

#[test]
fn encode_is_deterministic() {
    let value = TypeValue::dict(
        TypeValue::STR,
        TypeValue::list(TypeValue::optional(TypeValue::named("shapes.Widget"))),
    );
    let registry = shapes_registry();
    let first = encode(&value, &registry).expect("first encode");
    let second = encode(&value, &registry).expect("second encode");
    assert_eq!(first, second);
    assert_eq!(first.as_str(), "Dict[str, List[Union[shapes.Widget, None]]]");
}

#[test]
fn encode_rejects_unregistered_named_type() {
    let err = encode(&TypeValue::list(TypeValue::named("Widget")), &TypeRegistry::default())
        .expect_err("unregistered");
    assert_eq!(err.reference, "Widget");
    assert_eq!(err.context, "default");
    assert_eq!(err.reason, NotFoundReason::Unregistered);
}

#[test]
fn encode_rejects_anonymous_types() {
    let value = TypeValue::dict(TypeValue::STR, TypeValue::Anonymous("<lambda>".to_string()));
    let err = encode(&value, &shapes_registry()).expect_err("anonymous");
    assert_eq!(err.reference, "<lambda>");
    assert_eq!(err.reason, NotFoundReason::Anonymous);
}

#[test]
fn encode_rejects_empty_union() {
    let err = encode(&TypeValue::Union(Vec::new()), &shapes_registry()).expect_err("empty union");
    assert!(matches!(err.reason, NotFoundReason::Arity { found: 0, .. }));
}

#[test]
fn encode_respects_size_limit() {
    let codec = TypeCodec::new(CodecLimits {
        max_ref_bytes: 8,
        max_depth: 32,
    });
    let err = codec
        .encode(&TypeValue::list(TypeValue::INT), &shapes_registry())
        .expect_err("too large");
    assert_eq!(
        err.reason,
        NotFoundReason::TooLarge {
            max_bytes: 8
        }
    );
}

// ============================================================================
// SECTION: Decoding
// ============================================================================

#[test]
fn decode_accepts_optional_and_lowercase_heads() {
    let registry = shapes_registry();
    assert_eq!(
        decode("Optional[int]", &registry).expect("optional"),
        TypeValue::union(vec![TypeValue::INT, TypeValue::None])
    );
    assert_eq!(decode("list[int]", &registry).expect("list"), TypeValue::list(TypeValue::INT));
    assert_eq!(
        decode("dict[str,int]", &registry).expect("dict"),
        TypeValue::dict(TypeValue::STR, TypeValue::INT)
    );
    assert_eq!(decode("tuple[()]", &registry).expect("tuple"), TypeValue::tuple(Vec::new()));
    assert_eq!(decode("List", &registry).expect("bare list"), TypeValue::Builtin(Builtin::List));
}

#[test]
fn decode_reads_literals_in_either_quote_style() {
    let value = decode("Literal[1, 2, \"hello world\", True, None]", &shapes_registry())
        .expect("literal");
    assert_eq!(
        value,
        TypeValue::Literal(vec![
            LiteralValue::Int(1),
            LiteralValue::Int(2),
            LiteralValue::Str("hello world".to_string()),
            LiteralValue::Bool(true),
            LiteralValue::None,
        ])
    );
}

#[test]
fn decode_flattens_and_collapses_unions() {
    let registry = shapes_registry();
    assert_eq!(
        decode("Union[Union[Union[int, str], float], numpy.ndarray]", &registry).expect("nested"),
        TypeValue::Union(vec![
            TypeValue::INT,
            TypeValue::STR,
            TypeValue::FLOAT,
            TypeValue::named("numpy.ndarray"),
        ])
    );
    assert_eq!(decode("Union[Union[int]]", &registry).expect("single"), TypeValue::INT);
    assert_eq!(
        decode("Union[int, str, int]", &registry).expect("dedup"),
        TypeValue::Union(vec![TypeValue::INT, TypeValue::STR])
    );
}

#[test]
fn decode_accepts_pipe_unions() {
    let registry = shapes_registry();
    assert_eq!(
        decode("int | float", &registry).expect("pipe"),
        TypeValue::Union(vec![TypeValue::INT, TypeValue::FLOAT])
    );
    assert_eq!(
        decode("Dict[str, shapes.Widget | None]", &registry).expect("nested pipe"),
        TypeValue::dict(TypeValue::STR, TypeValue::Union(vec![TypeValue::named("shapes.Widget"), TypeValue::None]))
    );
    assert_eq!(decode("int | int", &registry).expect("collapsed"), TypeValue::INT);
    let canonical = TypeCodec::default().canonicalize("List[int|str] | None", &registry).expect("canonicalize");
    assert_eq!(canonical.as_str(), "Union[List[Union[int, str]], None]");
    for reference in ["int |", "| int", "int || str"] {
        let err = decode_err(reference, &registry);
        assert!(matches!(err.reason, NotFoundReason::Malformed { .. }), "{reference}: {err}");
    }
}

#[test]
fn decode_reports_unregistered_name() {
    let err = decode_err("Widget", &TypeRegistry::default());
    assert_eq!(err.reference, "Widget");
    assert_eq!(err.context, "default");
    assert_eq!(err.reason, NotFoundReason::Unregistered);
    assert_eq!(err.to_string(), "type Widget not found in context default: not registered");
}

#[test]
fn decode_reports_narrowest_failing_reference() {
    let err = decode_err("Dict[str, List[Widget]]", &shapes_registry());
    assert_eq!(err.reference, "Widget");
    assert_eq!(err.context, "shapes");
}

#[test]
fn decode_rejects_unknown_generic() {
    let err = decode_err("Dummy[int]", &shapes_registry());
    assert_eq!(err.reference, "Dummy");
    assert_eq!(err.reason, NotFoundReason::UnknownGeneric);
}

#[test]
fn decode_rejects_wrong_arity() {
    let registry = shapes_registry();
    assert_eq!(
        decode_err("Dict[int]", &registry).reason,
        NotFoundReason::Arity {
            expected: "2",
            found: 1
        }
    );
    assert_eq!(
        decode_err("List[int, str]", &registry).reason,
        NotFoundReason::Arity {
            expected: "1",
            found: 2
        }
    );
    assert!(matches!(decode_err("Optional", &registry).reason, NotFoundReason::Arity { .. }));
}

#[test]
fn decode_rejects_malformed_references() {
    let registry = shapes_registry();
    for reference in ["", "List[int", "List[int]]", "int str", "Literal[int]", "a..b", "List[-]"] {
        let err = decode_err(reference, &registry);
        assert!(
            matches!(err.reason, NotFoundReason::Malformed { .. }),
            "{reference}: {err}"
        );
    }
}

#[test]
fn decode_enforces_size_and_depth_limits() {
    let codec = TypeCodec::new(CodecLimits {
        max_ref_bytes: 64,
        max_depth: 2,
    });
    let registry = shapes_registry();
    assert!(codec.decode("List[List[int]]", &registry).is_ok());
    let err = codec.decode("List[List[List[int]]]", &registry).expect_err("too deep");
    assert_eq!(
        err.reason,
        NotFoundReason::TooDeep {
            max_depth: 2
        }
    );
    let long = format!("Union[{}]", ["int"; 20].join(", "));
    let err = codec.decode(&long, &registry).expect_err("too large");
    assert_eq!(
        err.reason,
        NotFoundReason::TooLarge {
            max_bytes: 64
        }
    );
}

#[test]
fn decode_inverts_encode() {
    let registry = shapes_registry();
    let values = [
        TypeValue::INT,
        TypeValue::Any,
        TypeValue::Type(None),
        TypeValue::type_of(TypeValue::named("shapes.Widget")),
        TypeValue::tuple(vec![TypeValue::optional(TypeValue::STR), TypeValue::INT]),
        TypeValue::set(TypeValue::Literal(hello_literals())),
        TypeValue::dict(TypeValue::STR, TypeValue::list(TypeValue::BOOL)),
    ];
    for value in values {
        let reference = encode(&value, &registry).expect("encode");
        let decoded = decode(reference.as_str(), &registry).expect("decode");
        assert_eq!(decoded, value.normalize(), "{reference}");
    }
}

#[test]
fn canonicalize_rewrites_tolerated_spellings() {
    let codec = TypeCodec::default();
    let registry = shapes_registry();
    let canonical =
        codec.canonicalize("Optional[ list[int] ]", &registry).expect("canonicalize");
    assert_eq!(canonical.as_str(), "Union[List[int], None]");
}

// ============================================================================
// SECTION: Registry
// ============================================================================

#[test]
fn registry_aliases_decode_but_never_encode() {
    let mut registry = shapes_registry();
    registry.register("Widget", TypeValue::named("shapes.Widget")).expect("alias");
    assert_eq!(
        decode("Widget", &registry).expect("alias decode"),
        TypeValue::named("shapes.Widget")
    );
    let reference = encode(&TypeValue::named("shapes.Widget"), &registry).expect("encode");
    assert_eq!(reference.as_str(), "shapes.Widget");
}

#[test]
fn registry_composite_alias_becomes_canonical_name() {
    let mut registry = shapes_registry();
    registry.register("shapes.IntList", TypeValue::list(TypeValue::INT)).expect("alias");
    let value = TypeValue::dict(TypeValue::STR, TypeValue::list(TypeValue::INT));
    let reference = encode(&value, &registry).expect("encode");
    assert_eq!(reference.as_str(), "Dict[str, shapes.IntList]");
    assert_eq!(decode(reference.as_str(), &registry).expect("decode"), value);
}

#[test]
fn registry_builtin_alias_keeps_builtin_name() {
    let mut registry = shapes_registry();
    registry.register("shapes.Count", TypeValue::INT).expect("alias");
    assert_eq!(decode("shapes.Count", &registry).expect("decode"), TypeValue::INT);
    assert_eq!(encode(&TypeValue::INT, &registry).expect("encode").as_str(), "int");
}

#[test]
fn registry_rejects_invalid_registrations() {
    let mut registry = shapes_registry();
    assert_eq!(
        registry.register("int", TypeValue::STR),
        Err(RegistryError::Reserved {
            name: "int".to_string()
        })
    );
    assert!(matches!(
        registry.register("Optional", TypeValue::INT),
        Err(RegistryError::Reserved { .. })
    ));
    assert!(matches!(
        registry.register("bad name", TypeValue::INT),
        Err(RegistryError::InvalidName { .. })
    ));
    assert!(matches!(
        registry.register("shapes..Widget", TypeValue::INT),
        Err(RegistryError::InvalidName { .. })
    ));
    assert!(matches!(
        registry.register("shapes.Anon", TypeValue::list(TypeValue::Anonymous("X".to_string()))),
        Err(RegistryError::Anonymous { .. })
    ));
    assert_eq!(
        registry.register("shapes.Widget", TypeValue::INT),
        Err(RegistryError::Conflict {
            name: "shapes.Widget".to_string()
        })
    );
}

#[test]
fn registry_reregistration_is_idempotent() {
    let mut registry = shapes_registry();
    let before = registry.len();
    registry.register_named("shapes.Widget").expect("same value");
    assert_eq!(registry.len(), before);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["numpy.ndarray", "shapes.Widget"]);
}

// ============================================================================
// SECTION: Shapes
// ============================================================================

#[test]
fn shape_renders_leaves_and_containers() {
    let codec = TypeCodec::default();
    let registry = shapes_registry();
    let shape = |value: TypeValue| codec.shape(&value, &registry).expect("shape");
    assert_eq!(shape(TypeValue::INT), json!("int"));
    assert_eq!(shape(TypeValue::named("shapes.Widget")), json!("shapes.Widget"));
    assert_eq!(shape(TypeValue::Any), json!("Any"));
    assert_eq!(shape(TypeValue::optional(TypeValue::INT)), json!({ "anyOf": ["int", "None"] }));
    assert_eq!(
        shape(TypeValue::list(TypeValue::INT)),
        json!({ "type": "array", "items": "int", "uniqueItems": false })
    );
    assert_eq!(
        shape(TypeValue::set(TypeValue::FLOAT)),
        json!({ "type": "array", "items": "float", "uniqueItems": true })
    );
    assert_eq!(
        shape(TypeValue::dict(TypeValue::INT, TypeValue::STR)),
        json!({ "type": "object", "keys": "int", "values": "str" })
    );
    assert_eq!(
        shape(TypeValue::tuple(vec![TypeValue::INT, TypeValue::STR])),
        json!({ "allOf": ["int", "str"] })
    );
    assert_eq!(shape(TypeValue::Type(None)), json!({ "type": "type", "value": "Any" }));
    assert_eq!(
        shape(TypeValue::type_of(TypeValue::INT)),
        json!({ "type": "type", "value": "int" })
    );
}

#[test]
fn shape_renders_literals_as_enums() {
    let codec = TypeCodec::default();
    let registry = shapes_registry();
    let plain = codec.shape(&TypeValue::Literal(hello_literals()), &registry).expect("plain");
    assert_eq!(
        plain,
        json!({
            "type": "enum",
            "values": [1, 2, "hello world"],
            "keys": ["1", "2", "hello world"],
            "nullable": false,
        })
    );

    let mut with_none = hello_literals();
    with_none.push(LiteralValue::None);
    let nullable = json!({
        "type": "enum",
        "values": [1, 2, "hello world"],
        "keys": ["1", "2", "hello world"],
        "nullable": true,
    });
    assert_eq!(codec.shape(&TypeValue::Literal(with_none), &registry).expect("none"), nullable);
    let optional = TypeValue::optional(TypeValue::Literal(hello_literals()));
    assert_eq!(codec.shape(&optional, &registry).expect("optional"), nullable);

    let mixed = TypeValue::optional(TypeValue::union(vec![
        TypeValue::INT,
        TypeValue::Literal(hello_literals()),
    ]));
    assert_eq!(
        codec.shape(&mixed, &registry).expect("mixed"),
        json!({ "anyOf": ["int", nullable, "None"] })
    );
}

#[test]
fn shape_flattens_nested_unions() {
    let codec = TypeCodec::default();
    let registry = shapes_registry();
    let inner = TypeValue::tuple(vec![
        TypeValue::union(vec![TypeValue::INT, TypeValue::STR]),
        TypeValue::INT,
    ]);
    let value = TypeValue::Union(vec![
        TypeValue::INT,
        TypeValue::Union(vec![inner.clone()]),
    ]);
    assert_eq!(
        codec.shape(&value, &registry).expect("shape"),
        json!({ "anyOf": ["int", { "allOf": [{ "anyOf": ["int", "str"] }, "int"] }] })
    );
    let single = TypeValue::Union(vec![TypeValue::Union(vec![inner])]);
    assert_eq!(
        codec.shape(&single, &registry).expect("single"),
        json!({ "allOf": [{ "anyOf": ["int", "str"] }, "int"] })
    );
}

#[test]
fn shape_rejects_unregistered_types() {
    let err = TypeCodec::default()
        .shape(&TypeValue::list(TypeValue::named("Widget")), &TypeRegistry::default())
        .expect_err("unregistered");
    assert_eq!(err.reference, "Widget");
}
