// crates/exposed-core/src/docstring/sections.rs
// ============================================================================
// Module: Docstring Section Set
// Description: Recognized docstring section headers and their kinds.
// Purpose: Make the accepted section vocabulary explicit and configurable.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`SectionSet`] maps header text (without the trailing colon) to a
//! [`SectionKind`]. Anything outside the set is an unknown section and stops
//! scanning. Matching is exact and case-sensitive.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Section Kinds
// ============================================================================

/// Role of a recognized docstring section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Free-text summary.
    Summary,
    /// Input parameter entries.
    Params,
    /// Return value entries.
    Returns,
    /// Raised exception entries.
    Raises,
}

/// Default header spellings.
const DEFAULT_HEADERS: [(&str, SectionKind); 8] = [
    ("Summary", SectionKind::Summary),
    ("Args", SectionKind::Params),
    ("Arguments", SectionKind::Params),
    ("Params", SectionKind::Params),
    ("Parameters", SectionKind::Params),
    ("Returns", SectionKind::Returns),
    ("Return", SectionKind::Returns),
    ("Raises", SectionKind::Raises),
];

// ============================================================================
// SECTION: Section Set
// ============================================================================

/// Recognized section headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSet {
    /// Header text to kind.
    headers: BTreeMap<String, SectionKind>,
}

impl SectionSet {
    /// Creates an empty set; every header is unknown.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            headers: BTreeMap::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn insert(&mut self, header: impl Into<String>, kind: SectionKind) {
        self.headers.insert(header.into(), kind);
    }

    /// Returns the kind for `header`, if recognized.
    #[must_use]
    pub fn kind(&self, header: &str) -> Option<SectionKind> {
        self.headers.get(header).copied()
    }

    /// Iterates headers in lexical order.
    pub fn headers(&self) -> impl Iterator<Item = (&str, SectionKind)> {
        self.headers.iter().map(|(header, kind)| (header.as_str(), *kind))
    }
}

impl Default for SectionSet {
    fn default() -> Self {
        DEFAULT_HEADERS.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, SectionKind)> for SectionSet {
    fn from_iter<I: IntoIterator<Item = (S, SectionKind)>>(iter: I) -> Self {
        let mut set = Self::empty();
        for (header, kind) in iter {
            set.insert(header, kind);
        }
        set
    }
}
