// crates/exposed-core/src/codec/value.rs
// ============================================================================
// Module: Live Type Values
// Description: Structural description of parameter and return types.
// Purpose: Give the codec a typed, comparable stand-in for live type objects.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! [`TypeValue`] is what an introspector hands to the codec: built-ins,
//! registered named types, and the composite typing forms (`List`, `Dict`,
//! `Union`, `Literal`, ...). Values compare structurally; [`TypeValue::normalize`]
//! puts unions and literals into the canonical shape that encoding emits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde_json::Value;

// ============================================================================
// SECTION: Built-ins
// ============================================================================

/// Bare built-in types that always resolve without registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Builtin {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `str`
    Str,
    /// `bool`
    Bool,
    /// `bytes`
    Bytes,
    /// `bytearray`
    ByteArray,
    /// `complex`
    Complex,
    /// `frozenset`
    FrozenSet,
    /// `memoryview`
    MemoryView,
    /// `range`
    Range,
    /// `slice`
    Slice,
    /// Unparameterized `list`.
    List,
    /// Unparameterized `dict`.
    Dict,
    /// Unparameterized `tuple`.
    Tuple,
    /// Unparameterized `set`.
    Set,
    /// Unparameterized `type`.
    Type,
}

impl Builtin {
    /// All built-ins in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Int,
        Self::Float,
        Self::Str,
        Self::Bool,
        Self::Bytes,
        Self::ByteArray,
        Self::Complex,
        Self::FrozenSet,
        Self::MemoryView,
        Self::Range,
        Self::Slice,
        Self::List,
        Self::Dict,
        Self::Tuple,
        Self::Set,
        Self::Type,
    ];

    /// Returns the canonical reference text.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Bool => "bool",
            Self::Bytes => "bytes",
            Self::ByteArray => "bytearray",
            Self::Complex => "complex",
            Self::FrozenSet => "frozenset",
            Self::MemoryView => "memoryview",
            Self::Range => "range",
            Self::Slice => "slice",
            Self::List => "list",
            Self::Dict => "dict",
            Self::Tuple => "tuple",
            Self::Set => "set",
            Self::Type => "type",
        }
    }

    /// Looks up a built-in by its reference text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SECTION: Named Types
// ============================================================================

/// A user type identified by a dotted path (e.g. `shapes.Widget`).
///
/// # Invariants
/// - Opaque UTF-8 string; the registry validates the path when registering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamedType(String);

impl NamedType {
    /// Creates a named type from its path.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Literal Values
// ============================================================================

/// A value admitted by a `Literal[...]` type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LiteralValue {
    /// Integer literal.
    Int(i64),
    /// String literal.
    Str(String),
    /// Boolean literal.
    Bool(bool),
    /// The `None` literal.
    None,
}

impl LiteralValue {
    /// Returns the JSON form of the literal.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Int(value) => Value::from(*value),
            Self::Str(value) => Value::String(value.clone()),
            Self::Bool(value) => Value::Bool(*value),
            Self::None => Value::Null,
        }
    }

    /// Returns the display key used by enum shapes (`1`, `hello`, `True`).
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Str(value) => value.clone(),
            Self::Bool(true) => "True".to_string(),
            Self::Bool(false) => "False".to_string(),
            Self::None => "None".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Type Values
// ============================================================================

/// Structural description of a live type.
///
/// # Invariants
/// - Equality is structural; two values that encode to the same reference in
///   one context are equal after [`TypeValue::normalize`].
/// - `Anonymous` values never encode; they model types with no stable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeValue {
    /// `Any`
    Any,
    /// `None`
    None,
    /// A bare built-in.
    Builtin(Builtin),
    /// A registered user type.
    Named(NamedType),
    /// `List[T]`
    List(Box<Self>),
    /// `Set[T]`
    Set(Box<Self>),
    /// `Dict[K, V]`
    Dict(Box<Self>, Box<Self>),
    /// `Tuple[T, ...]` with a fixed arity (possibly zero).
    Tuple(Vec<Self>),
    /// `Union[A, B, ...]`
    Union(Vec<Self>),
    /// `Type` (no argument) or `Type[T]`.
    Type(Option<Box<Self>>),
    /// `Literal[v, ...]`
    Literal(Vec<LiteralValue>),
    /// A dynamically constructed type with no stable name.
    Anonymous(String),
}

impl TypeValue {
    /// `int`
    pub const INT: Self = Self::Builtin(Builtin::Int);
    /// `float`
    pub const FLOAT: Self = Self::Builtin(Builtin::Float);
    /// `str`
    pub const STR: Self = Self::Builtin(Builtin::Str);
    /// `bool`
    pub const BOOL: Self = Self::Builtin(Builtin::Bool);

    /// Creates a named type value.
    #[must_use]
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named(NamedType::new(path))
    }

    /// Creates `List[inner]`.
    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    /// Creates `Set[inner]`.
    #[must_use]
    pub fn set(inner: Self) -> Self {
        Self::Set(Box::new(inner))
    }

    /// Creates `Dict[key, value]`.
    #[must_use]
    pub fn dict(key: Self, value: Self) -> Self {
        Self::Dict(Box::new(key), Box::new(value))
    }

    /// Creates `Tuple[items...]`.
    #[must_use]
    pub const fn tuple(items: Vec<Self>) -> Self {
        Self::Tuple(items)
    }

    /// Creates a normalized union of `members`.
    #[must_use]
    pub fn union(members: Vec<Self>) -> Self {
        Self::Union(members).normalize()
    }

    /// Creates `Union[inner, None]`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::union(vec![inner, Self::None])
    }

    /// Creates `Type[inner]`.
    #[must_use]
    pub fn type_of(inner: Self) -> Self {
        Self::Type(Some(Box::new(inner)))
    }

    /// Returns true for the `None` type.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the canonical form of this value.
    ///
    /// Unions are flattened and deduplicated (first occurrence wins) and a
    /// single-member union collapses to that member. Literal values are
    /// deduplicated the same way.
    #[must_use]
    pub fn normalize(&self) -> Self {
        match self {
            Self::Any | Self::None | Self::Builtin(_) | Self::Named(_) | Self::Anonymous(_) => {
                self.clone()
            }
            Self::List(inner) => Self::list(inner.normalize()),
            Self::Set(inner) => Self::set(inner.normalize()),
            Self::Dict(key, value) => Self::dict(key.normalize(), value.normalize()),
            Self::Tuple(items) => Self::Tuple(items.iter().map(Self::normalize).collect()),
            Self::Type(inner) => Self::Type(inner.as_ref().map(|inner| Box::new(inner.normalize()))),
            Self::Literal(values) => {
                let mut unique: Vec<LiteralValue> = Vec::with_capacity(values.len());
                for value in values {
                    if !unique.contains(value) {
                        unique.push(value.clone());
                    }
                }
                Self::Literal(unique)
            }
            Self::Union(members) => {
                let mut flat: Vec<Self> = Vec::with_capacity(members.len());
                flatten_union(members, &mut flat);
                if flat.len() == 1 {
                    flat.pop().unwrap_or(Self::Union(Vec::new()))
                } else {
                    Self::Union(flat)
                }
            }
        }
    }
}

/// Appends normalized union members to `out`, expanding nested unions.
fn flatten_union(members: &[TypeValue], out: &mut Vec<TypeValue>) {
    for member in members {
        match member.normalize() {
            TypeValue::Union(inner) => {
                for item in inner {
                    if !out.contains(&item) {
                        out.push(item);
                    }
                }
            }
            other => {
                if !out.contains(&other) {
                    out.push(other);
                }
            }
        }
    }
}
