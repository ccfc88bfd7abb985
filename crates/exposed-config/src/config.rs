// crates/exposed-config/src/config.rs
// ============================================================================
// Module: Exposure Configuration
// Description: Configuration loading and validation for codec and docstrings.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: exposed-core, serde, toml, tracing
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits
//! and turned into the runtime pieces the core needs: a populated
//! [`TypeRegistry`], a [`TypeCodec`] with the configured limits and the
//! recognized docstring [`SectionSet`].
//!
//! ```toml
//! [codec]
//! context_id = "app"
//! named_types = ["shapes.Widget"]
//!
//! [codec.aliases]
//! Vector = "List[float]"
//!
//! [docstring.sections]
//! Notes = "summary"
//! ```
//!
//! Security posture: config inputs are untrusted; unknown keys are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use exposed_core::CodecLimits;
use exposed_core::DocstringStyle;
use exposed_core::SectionKind;
use exposed_core::SectionSet;
use exposed_core::StyledDocstringParser;
use exposed_core::TypeCodec;
use exposed_core::TypeRegistry;
use exposed_core::codec::DEFAULT_CONTEXT_ID;
use exposed_core::codec::DEFAULT_MAX_DEPTH;
use exposed_core::codec::DEFAULT_MAX_REF_BYTES;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "exposed.toml";
/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "EXPOSED_CONFIG";
/// Maximum config file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted type reference limit.
const MIN_TYPE_REF_BYTES: usize = 64;
/// Largest accepted type reference limit.
const MAX_TYPE_REF_BYTES: usize = 64 * 1024;
/// Largest accepted generic nesting depth.
const MAX_NESTING: usize = 128;
/// Maximum number of named types and aliases combined.
const MAX_REGISTERED_TYPES: usize = 4096;

// ============================================================================
// SECTION: Top-Level Config
// ============================================================================

/// Exposure configuration root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExposureConfig {
    /// Type codec configuration.
    #[serde(default)]
    pub codec: CodecConfig,
    /// Docstring parsing configuration.
    #[serde(default)]
    pub docstring: DocstringConfig,
}

impl ExposureConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from `path`, then from [`CONFIG_ENV_VAR`], then
    /// defaults to `exposed.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_toml_str(content)?;
        tracing::debug!(
            path = %resolved.display(),
            context = %config.codec.context_id,
            named_types = config.codec.named_types.len(),
            aliases = config.codec.aliases.len(),
            "loaded exposure config"
        );
        Ok(config)
    }

    /// Parses and validates configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()?;
        self.docstring.validate()
    }

    /// Builds the resolution context described by `codec`.
    ///
    /// Named types are registered first; aliases are then decoded in lexical
    /// order, so an alias may refer to named types, built-ins and aliases
    /// that sort before it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a registration is rejected or an
    /// alias target does not resolve.
    pub fn build_registry(&self) -> Result<TypeRegistry, ConfigError> {
        let mut registry = TypeRegistry::new(self.codec.context_id.as_str());
        for name in &self.codec.named_types {
            registry
                .register_named(name)
                .map_err(|err| ConfigError::Invalid(format!("codec.named_types: {err}")))?;
        }
        let codec = self.codec();
        for (alias, target) in &self.codec.aliases {
            let value = codec
                .decode(target, &registry)
                .map_err(|err| ConfigError::Invalid(format!("codec.aliases.{alias}: {err}")))?;
            registry
                .register(alias, value)
                .map_err(|err| ConfigError::Invalid(format!("codec.aliases.{alias}: {err}")))?;
        }
        Ok(registry)
    }

    /// Returns a codec using the configured limits.
    #[must_use]
    pub const fn codec(&self) -> TypeCodec {
        TypeCodec::new(CodecLimits {
            max_ref_bytes: self.codec.max_type_ref_bytes,
            max_depth: self.codec.max_nesting,
        })
    }

    /// Returns the recognized docstring headers.
    #[must_use]
    pub fn section_set(&self) -> SectionSet {
        let mut set =
            if self.docstring.extend_defaults { SectionSet::default() } else { SectionSet::empty() };
        for (header, kind) in &self.docstring.sections {
            set.insert(header.as_str(), *kind);
        }
        set
    }

    /// Returns a parser for the configured style; Google-style docstrings use
    /// [`Self::section_set`].
    #[must_use]
    pub fn docstring_parser(&self) -> StyledDocstringParser {
        StyledDocstringParser::new(self.docstring.style, self.section_set())
    }
}

// ============================================================================
// SECTION: Codec Config
// ============================================================================

/// Type codec and resolution context configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Resolution context identifier surfaced in errors.
    #[serde(default = "default_context_id")]
    pub context_id: String,
    /// Maximum accepted type reference length in bytes.
    #[serde(default = "default_max_type_ref_bytes")]
    pub max_type_ref_bytes: usize,
    /// Maximum generic nesting depth.
    #[serde(default = "default_max_nesting")]
    pub max_nesting: usize,
    /// User types registered under their own dotted path.
    #[serde(default)]
    pub named_types: Vec<String>,
    /// Alias name to type reference.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            context_id: default_context_id(),
            max_type_ref_bytes: default_max_type_ref_bytes(),
            max_nesting: default_max_nesting(),
            named_types: Vec::new(),
            aliases: BTreeMap::new(),
        }
    }
}

impl CodecConfig {
    /// Validates codec configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.context_id.trim().is_empty() {
            return Err(ConfigError::Invalid("codec.context_id must be non-empty".to_string()));
        }
        if !(MIN_TYPE_REF_BYTES ..= MAX_TYPE_REF_BYTES).contains(&self.max_type_ref_bytes) {
            return Err(ConfigError::Invalid(format!(
                "codec.max_type_ref_bytes must be between {MIN_TYPE_REF_BYTES} and \
                 {MAX_TYPE_REF_BYTES}"
            )));
        }
        if !(1 ..= MAX_NESTING).contains(&self.max_nesting) {
            return Err(ConfigError::Invalid(format!(
                "codec.max_nesting must be between 1 and {MAX_NESTING}"
            )));
        }
        if self.named_types.len() + self.aliases.len() > MAX_REGISTERED_TYPES {
            return Err(ConfigError::Invalid(format!(
                "codec registers more than {MAX_REGISTERED_TYPES} types"
            )));
        }
        if self.named_types.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid("codec.named_types entries must be non-empty".to_string()));
        }
        if let Some((alias, _)) = self.aliases.iter().find(|(_, target)| target.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("codec.aliases.{alias} must be non-empty")));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Docstring Config
// ============================================================================

/// Docstring section configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocstringConfig {
    /// Docstring dialect; `auto` detects it per docstring.
    #[serde(default)]
    pub style: DocstringStyle,
    /// Keep the built-in headers and add `sections` on top (default on).
    #[serde(default = "default_extend_defaults")]
    pub extend_defaults: bool,
    /// Header text to section kind.
    #[serde(default)]
    pub sections: BTreeMap<String, SectionKind>,
}

impl Default for DocstringConfig {
    fn default() -> Self {
        Self {
            style: DocstringStyle::Auto,
            extend_defaults: default_extend_defaults(),
            sections: BTreeMap::new(),
        }
    }
}

impl DocstringConfig {
    /// Validates docstring configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.extend_defaults && self.sections.is_empty() {
            return Err(ConfigError::Invalid(
                "docstring.extend_defaults=false requires docstring.sections".to_string(),
            ));
        }
        for header in self.sections.keys() {
            if !is_header(header) {
                return Err(ConfigError::Invalid(format!(
                    "docstring.sections.{header} must be capitalised words without a colon"
                )));
            }
        }
        Ok(())
    }
}

/// Returns true when `header` can appear as `Header:` in a docstring.
fn is_header(header: &str) -> bool {
    !header.is_empty()
        && header.split(' ').all(|word| {
            word.chars().next().is_some_and(char::is_uppercase) && word.chars().all(char::is_alphabetic)
        })
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Default resolution context identifier.
fn default_context_id() -> String {
    DEFAULT_CONTEXT_ID.to_string()
}

/// Default type reference limit.
const fn default_max_type_ref_bytes() -> usize {
    DEFAULT_MAX_REF_BYTES
}

/// Default nesting limit.
const fn default_max_nesting() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Default for `docstring.extend_defaults`.
const fn default_extend_defaults() -> bool {
    true
}
