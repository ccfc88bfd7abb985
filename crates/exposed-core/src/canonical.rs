// crates/exposed-core/src/canonical.rs
// ============================================================================
// Module: Canonical Descriptor Encoding
// Description: RFC 8785 JSON canonicalization and descriptor fingerprints.
// Purpose: Give stored or transmitted descriptors a stable byte form and digest.
// Dependencies: serde, serde_jcs, sha2, thiserror
// ============================================================================

//! ## Overview
//! Descriptors are canonicalized with RFC 8785 (JCS) so equal values produce
//! identical bytes regardless of field order. A [`Fingerprint`] is the SHA-256
//! of those bytes and lets endpoint layers detect when an exposed signature
//! changed between registrations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use sha2::Digest;
use sha2::Sha256;
use thiserror::Error;

use crate::schema::SerializedFunction;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when producing canonical bytes.
#[derive(Debug, Error)]
pub enum CanonicalError {
    /// JSON canonicalization failed.
    #[error("failed to canonicalize json: {0}")]
    Canonicalization(String),
}

// ============================================================================
// SECTION: Fingerprint
// ============================================================================

/// Lowercase hex SHA-256 digest of a canonical descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Canonical Helpers
// ============================================================================

/// Returns canonical JSON bytes for a serializable value using RFC 8785.
///
/// # Errors
///
/// Returns [`CanonicalError::Canonicalization`] when serialization fails.
pub fn canonical_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CanonicalError> {
    serde_jcs::to_vec(value).map_err(|err| CanonicalError::Canonicalization(err.to_string()))
}

/// Fingerprints a function descriptor over its canonical JSON.
///
/// # Errors
///
/// Returns [`CanonicalError::Canonicalization`] when serialization fails.
pub fn fingerprint(function: &SerializedFunction) -> Result<Fingerprint, CanonicalError> {
    let bytes = canonical_json_bytes(function)?;
    let digest = Sha256::digest(&bytes);
    Ok(Fingerprint(hex_encode(&digest)))
}

// ============================================================================
// SECTION: Hex Encoding
// ============================================================================

/// Encodes bytes as a lowercase hex string.
fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        out.push(HEX[(byte >> 4) as usize] as char);
        out.push(HEX[(byte & 0x0f) as usize] as char);
    }
    out
}
