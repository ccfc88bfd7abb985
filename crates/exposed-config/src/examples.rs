// crates/exposed-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and tooling.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example `exposed.toml`. The example is kept loadable; the unit
//! tests parse it and build a registry from it.

/// Returns a canonical example `exposed.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[codec]
context_id = "app"
max_type_ref_bytes = 4096
max_nesting = 32
named_types = ["shapes.Widget", "numpy.ndarray"]

[codec.aliases]
Vector = "List[float]"
WidgetMap = "Dict[str, shapes.Widget]"

[docstring]
style = "auto"
extend_defaults = true

[docstring.sections]
Notes = "summary"
Yields = "returns"
"#,
    )
}
