// crates/exposed-core/src/codec/shape.rs
// ============================================================================
// Module: Type Shapes
// Description: JSON shape rendering for type values.
// Purpose: Give endpoint front-ends a structural view of a parameter type.
// Dependencies: serde_json, crate::codec
// ============================================================================

//! ## Overview
//! Shapes describe a type as nested JSON instead of a reference string:
//! leaves stay strings (`"int"`, `"shapes.Widget"`), unions become `anyOf`,
//! tuples `allOf`, lists and sets `array`, dicts `object`, `Type[T]` a
//! `type` node and literals an `enum` node with display keys and a
//! `nullable` flag.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::codec::CodecLimits;
use crate::codec::registry::TypeResolver;
use crate::codec::value::LiteralValue;
use crate::codec::value::TypeValue;
use crate::error::NotFoundReason;
use crate::error::TypeNotFoundError;

// ============================================================================
// SECTION: Shape Rendering
// ============================================================================

/// Renders a normalized value as a JSON shape.
pub(super) fn render_shape<R>(
    value: &TypeValue,
    resolver: &R,
    limits: CodecLimits,
    depth: usize,
) -> Result<Value, TypeNotFoundError>
where
    R: TypeResolver + ?Sized,
{
    let nested = |inner: &TypeValue| render_shape(inner, resolver, limits, depth + 1);
    let guard = || {
        if depth + 1 > limits.max_depth {
            return Err(TypeNotFoundError::new(
                "",
                resolver.context_id(),
                NotFoundReason::TooDeep {
                    max_depth: limits.max_depth,
                },
            ));
        }
        Ok(())
    };
    let shape = match value {
        TypeValue::Any => Value::String("Any".to_string()),
        TypeValue::None => Value::String("None".to_string()),
        TypeValue::Builtin(builtin) => Value::String(builtin.name().to_string()),
        TypeValue::Named(named) => {
            let Some(name) = resolver.canonical_name(value) else {
                return Err(TypeNotFoundError::new(
                    named.as_str(),
                    resolver.context_id(),
                    NotFoundReason::Unregistered,
                ));
            };
            Value::String(name.to_string())
        }
        TypeValue::Anonymous(hint) => {
            return Err(TypeNotFoundError::new(
                hint.as_str(),
                resolver.context_id(),
                NotFoundReason::Anonymous,
            ));
        }
        TypeValue::List(inner) => {
            guard()?;
            json!({
                "type": "array",
                "items": nested(inner)?,
                "uniqueItems": false,
            })
        }
        TypeValue::Set(inner) => {
            guard()?;
            json!({
                "type": "array",
                "items": nested(inner)?,
                "uniqueItems": true,
            })
        }
        TypeValue::Dict(key, value) => {
            guard()?;
            json!({
                "type": "object",
                "keys": nested(key)?,
                "values": nested(value)?,
            })
        }
        TypeValue::Tuple(items) => {
            guard()?;
            let items = items.iter().map(nested).collect::<Result<Vec<_>, _>>()?;
            json!({ "allOf": items })
        }
        TypeValue::Type(inner) => {
            guard()?;
            let inner = match inner {
                Some(inner) => nested(inner)?,
                None => Value::String("Any".to_string()),
            };
            json!({ "type": "type", "value": inner })
        }
        TypeValue::Literal(values) => {
            guard()?;
            enum_shape(values, false)
        }
        TypeValue::Union(members) => {
            guard()?;
            union_shape(members, nested)?
        }
    };
    Ok(shape)
}

/// Renders union members, folding `None` into literal members.
fn union_shape<F>(members: &[TypeValue], nested: F) -> Result<Value, TypeNotFoundError>
where
    F: Fn(&TypeValue) -> Result<Value, TypeNotFoundError>,
{
    let has_none = members.iter().any(TypeValue::is_none);
    if let [TypeValue::Literal(values), TypeValue::None] | [TypeValue::None, TypeValue::Literal(values)] =
        members
    {
        return Ok(enum_shape(values, true));
    }
    let mut any_of = Vec::with_capacity(members.len());
    for member in members {
        let shape = match member {
            TypeValue::Literal(values) => enum_shape(values, has_none),
            other => nested(other)?,
        };
        any_of.push(shape);
    }
    Ok(json!({ "anyOf": any_of }))
}

/// Builds the `enum` node for literal values.
fn enum_shape(values: &[LiteralValue], nullable: bool) -> Value {
    let nullable = nullable || values.contains(&LiteralValue::None);
    let present: Vec<&LiteralValue> =
        values.iter().filter(|value| **value != LiteralValue::None).collect();
    let json_values: Vec<Value> = present.iter().map(|value| value.to_json()).collect();
    let keys: Vec<String> = present.iter().map(|value| value.key()).collect();
    json!({
        "type": "enum",
        "values": json_values,
        "keys": keys,
        "nullable": nullable,
    })
}
