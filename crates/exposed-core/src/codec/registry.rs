// crates/exposed-core/src/codec/registry.rs
// ============================================================================
// Module: Type Resolution Context
// Description: Registry of named types consulted by the type codec.
// Purpose: Make type lookup an explicit, context-scoped operation.
// Dependencies: thiserror, tracing
// ============================================================================

//! ## Overview
//! A resolution context answers two questions for the codec: which type does
//! a name denote, and which name should a type be printed as. [`TypeResolver`]
//! is the seam; [`TypeRegistry`] is the in-memory implementation.
//!
//! Built-ins, `Any`, `None` and the generic forms never need registration and
//! cannot be shadowed. The first name registered for a value becomes its
//! canonical name; later names for the same value are decode-only aliases.
//!
//! The registry is read-only during codec calls. Owners that register types
//! concurrently must serialize writes themselves (e.g. behind a lock) and
//! hand the codec a consistent snapshot.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;

use thiserror::Error;

use crate::codec::value::Builtin;
use crate::codec::value::TypeValue;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Identifier used by [`TypeRegistry::default`].
pub const DEFAULT_CONTEXT_ID: &str = "default";

/// Names reserved by the reference grammar.
const RESERVED_NAMES: [&str; 12] = [
    "Any", "None", "List", "Set", "Dict", "Tuple", "Union", "Optional", "Type", "Literal", "True",
    "False",
];

// ============================================================================
// SECTION: Resolver Trait
// ============================================================================

/// Resolves type names against a resolution context.
///
/// Implement this for custom symbol tables so the codec can translate
/// between references and [`TypeValue`]s without ambient lookup.
pub trait TypeResolver {
    /// Returns the identifier of this context for diagnostics.
    fn context_id(&self) -> &str;

    /// Returns the type registered under `name`, if any.
    fn resolve_name(&self, name: &str) -> Option<TypeValue>;

    /// Returns the canonical name registered for `value`, if any.
    fn canonical_name(&self, value: &TypeValue) -> Option<&str>;
}

// ============================================================================
// SECTION: Registry Errors
// ============================================================================

/// Errors raised when registering types.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Name is not a dotted identifier path.
    #[error("invalid type name {name}: {detail}")]
    InvalidName {
        /// Rejected name.
        name: String,
        /// Reason for rejection.
        detail: &'static str,
    },
    /// Name collides with a built-in or grammar keyword.
    #[error("type name {name} is reserved")]
    Reserved {
        /// Rejected name.
        name: String,
    },
    /// Name is already registered for a different type.
    #[error("type name {name} is already registered for a different type")]
    Conflict {
        /// Conflicting name.
        name: String,
    },
    /// Value contains a type with no stable name.
    #[error("type registered as {name} contains an anonymous type")]
    Anonymous {
        /// Name the caller attempted to register.
        name: String,
    },
}

// ============================================================================
// SECTION: Type Registry
// ============================================================================

/// In-memory resolution context.
///
/// # Invariants
/// - Every registered name is a valid, non-reserved dotted path.
/// - Every registered value is normalized and free of anonymous types.
/// - `canonical` maps each registered value to the first name registered for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRegistry {
    /// Context identifier surfaced in errors.
    id: String,
    /// Name to value lookup used when decoding.
    by_name: BTreeMap<String, TypeValue>,
    /// Value to canonical name lookup used when encoding.
    canonical: HashMap<TypeValue, String>,
}

impl TypeRegistry {
    /// Creates an empty registry; only built-in forms resolve.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            by_name: BTreeMap::new(),
            canonical: HashMap::new(),
        }
    }

    /// Registers `value` under `name`.
    ///
    /// Registering the same name for the same value twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the name is invalid or reserved, already
    /// taken by another value, or when the value contains an anonymous type.
    pub fn register(&mut self, name: &str, value: TypeValue) -> Result<(), RegistryError> {
        validate_name(name)?;
        let value = value.normalize();
        if contains_anonymous(&value) {
            return Err(RegistryError::Anonymous {
                name: name.to_string(),
            });
        }
        if let Some(existing) = self.by_name.get(name) {
            if *existing == value {
                return Ok(());
            }
            return Err(RegistryError::Conflict {
                name: name.to_string(),
            });
        }
        let always_named = matches!(value, TypeValue::Any | TypeValue::None | TypeValue::Builtin(_));
        if !always_named && !self.canonical.contains_key(&value) {
            self.canonical.insert(value.clone(), name.to_string());
        }
        self.by_name.insert(name.to_string(), value);
        tracing::trace!(context = %self.id, name, "registered type");
        Ok(())
    }

    /// Registers a named user type under its own path.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the path is invalid, reserved, or taken.
    pub fn register_named(&mut self, path: &str) -> Result<(), RegistryError> {
        self.register(path, TypeValue::named(path))
    }

    /// Returns true when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true when no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Iterates registered names in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_ID)
    }
}

impl TypeResolver for TypeRegistry {
    fn context_id(&self) -> &str {
        &self.id
    }

    fn resolve_name(&self, name: &str) -> Option<TypeValue> {
        self.by_name.get(name).cloned()
    }

    fn canonical_name(&self, value: &TypeValue) -> Option<&str> {
        self.canonical.get(value).map(String::as_str)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates a dotted identifier path.
fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() {
        return Err(RegistryError::InvalidName {
            name: name.to_string(),
            detail: "name must be non-empty",
        });
    }
    for segment in name.split('.') {
        let mut chars = segment.chars();
        let Some(first) = chars.next() else {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
                detail: "path segments must be non-empty",
            });
        };
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
                detail: "path segments must start with a letter or underscore",
            });
        }
        if !chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
                detail: "path segments must be ASCII identifiers",
            });
        }
    }
    if is_reserved(name) {
        return Err(RegistryError::Reserved {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Returns true when `name` is a built-in or grammar keyword.
fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name) || Builtin::from_name(name).is_some()
}

/// Returns true when `value` contains an anonymous type anywhere.
fn contains_anonymous(value: &TypeValue) -> bool {
    match value {
        TypeValue::Anonymous(_) => true,
        TypeValue::Any
        | TypeValue::None
        | TypeValue::Builtin(_)
        | TypeValue::Named(_)
        | TypeValue::Literal(_)
        | TypeValue::Type(None) => false,
        TypeValue::List(inner) | TypeValue::Set(inner) | TypeValue::Type(Some(inner)) => {
            contains_anonymous(inner)
        }
        TypeValue::Dict(key, value) => contains_anonymous(key) || contains_anonymous(value),
        TypeValue::Tuple(items) | TypeValue::Union(items) => items.iter().any(contains_anonymous),
    }
}
