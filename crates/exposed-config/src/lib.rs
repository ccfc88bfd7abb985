// crates/exposed-config/src/lib.rs
// ============================================================================
// Module: Exposed Config Library
// Description: Canonical config model and validation for exposure settings.
// Purpose: Single source of truth for exposed.toml semantics.
// Dependencies: exposed-core, serde, toml
// ============================================================================

//! ## Overview
//! `exposed-config` defines the configuration model for function exposure:
//! codec limits, the resolution context (named types and aliases) and the
//! recognized docstring sections. Validation is strict and fail-closed.
//!
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
