// crates/exposed-core/src/exposure.rs
// ============================================================================
// Module: Exposure Capability
// Description: Explicit "has exposure metadata" interface for callables.
// Purpose: Let registries discover exposed functions without attribute probing.
// Dependencies: tracing, crate::{assembly, codec, error, schema}
// ============================================================================

//! ## Overview
//! A callable becomes exposed by being wrapped in [`Exposed`], which pairs it
//! with its validated [`SerializedFunction`]. Anything that may or may not be
//! exposed implements [`ExposedFunction`]; [`collect_exposed`] walks a set of
//! such items and returns the exposed ones keyed by function name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::assembly::DocWarning;
use crate::assembly::FunctionAssembler;
use crate::assembly::FunctionSource;
use crate::codec::TypeResolver;
use crate::error::AssemblyError;
use crate::schema::SerializedFunction;

// ============================================================================
// SECTION: Capability
// ============================================================================

/// Capability implemented by values that may carry exposure metadata.
pub trait ExposedFunction {
    /// Returns the descriptor when the value is exposed.
    fn exposure_metadata(&self) -> Option<&SerializedFunction>;

    /// Returns true when the value is exposed.
    fn has_exposure_metadata(&self) -> bool {
        self.exposure_metadata().is_some()
    }
}

/// A callable paired with its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Exposed<F> {
    /// The wrapped callable.
    callable: F,
    /// Validated descriptor.
    metadata: SerializedFunction,
}

impl<F> Exposed<F> {
    /// Wraps `callable` with an already assembled descriptor.
    #[must_use]
    pub const fn new(callable: F, metadata: SerializedFunction) -> Self {
        Self {
            callable,
            metadata,
        }
    }

    /// Assembles the descriptor for `source` and wraps `callable` with it.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError`] when the descriptor cannot be assembled.
    pub fn assemble<R>(
        callable: F,
        source: FunctionSource,
        assembler: &FunctionAssembler<'_, R>,
    ) -> Result<(Self, Vec<DocWarning>), AssemblyError>
    where
        R: TypeResolver + ?Sized,
    {
        let assembled = assembler.assemble(source)?;
        Ok((Self::new(callable, assembled.function), assembled.warnings))
    }

    /// Returns the wrapped callable.
    #[must_use]
    pub const fn callable(&self) -> &F {
        &self.callable
    }

    /// Returns the descriptor.
    #[must_use]
    pub const fn metadata(&self) -> &SerializedFunction {
        &self.metadata
    }

    /// Returns the exposed name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.metadata.name()
    }

    /// Splits the wrapper into callable and descriptor.
    #[must_use]
    pub fn into_parts(self) -> (F, SerializedFunction) {
        (self.callable, self.metadata)
    }
}

impl<F> ExposedFunction for Exposed<F> {
    fn exposure_metadata(&self) -> Option<&SerializedFunction> {
        Some(&self.metadata)
    }
}

impl<T: ExposedFunction> ExposedFunction for Option<T> {
    fn exposure_metadata(&self) -> Option<&SerializedFunction> {
        self.as_ref().and_then(ExposedFunction::exposure_metadata)
    }
}

// ============================================================================
// SECTION: Collection
// ============================================================================

/// Collects exposed items by function name, skipping unexposed ones.
///
/// When two items share a name the first one is kept.
pub fn collect_exposed<'a, I, T>(items: I) -> BTreeMap<&'a str, &'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: ExposedFunction + ?Sized + 'a,
{
    let mut exposed = BTreeMap::new();
    for item in items {
        let Some(metadata) = item.exposure_metadata() else {
            continue;
        };
        match exposed.entry(metadata.name()) {
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
            Entry::Occupied(_) => {
                tracing::debug!(function = metadata.name(), "duplicate exposed name ignored");
            }
        }
    }
    exposed
}
