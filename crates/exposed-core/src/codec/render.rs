// crates/exposed-core/src/codec/render.rs
// ============================================================================
// Module: Type Reference Renderer
// Description: Canonical string rendering for normalized type values.
// Purpose: Produce deterministic references that the parser reads back.
// Dependencies: crate::codec::{registry, value}, crate::error
// ============================================================================

use std::fmt::Write as _;

use crate::codec::CodecLimits;
use crate::codec::registry::TypeResolver;
use crate::codec::value::LiteralValue;
use crate::codec::value::TypeValue;
use crate::error::NotFoundReason;
use crate::error::TypeNotFoundError;

/// Renders a normalized value into its canonical reference.
pub(super) fn render_reference<R>(
    value: &TypeValue,
    resolver: &R,
    limits: CodecLimits,
) -> Result<String, TypeNotFoundError>
where
    R: TypeResolver + ?Sized,
{
    let mut renderer = Renderer {
        resolver,
        limits,
        out: String::new(),
    };
    renderer.render(value, 0)?;
    if renderer.out.len() > limits.max_ref_bytes {
        return Err(TypeNotFoundError::new(
            renderer.out,
            resolver.context_id(),
            NotFoundReason::TooLarge {
                max_bytes: limits.max_ref_bytes,
            },
        ));
    }
    Ok(renderer.out)
}

/// Accumulates rendered output for one value.
struct Renderer<'resolver, R: ?Sized> {
    /// Resolution context for named types and aliases.
    resolver: &'resolver R,
    /// Size and nesting limits.
    limits: CodecLimits,
    /// Rendered text so far.
    out: String,
}

impl<R> Renderer<'_, R>
where
    R: TypeResolver + ?Sized,
{
    /// Renders `value` at generic nesting `depth`.
    fn render(&mut self, value: &TypeValue, depth: usize) -> Result<(), TypeNotFoundError> {
        match value {
            TypeValue::Any => self.out.push_str("Any"),
            TypeValue::None => self.out.push_str("None"),
            TypeValue::Builtin(builtin) => self.out.push_str(builtin.name()),
            TypeValue::Type(None) => self.out.push_str("Type"),
            TypeValue::Named(named) => {
                let Some(name) = self.resolver.canonical_name(value) else {
                    return Err(self.error(named.as_str(), NotFoundReason::Unregistered));
                };
                self.out.push_str(name);
            }
            TypeValue::Anonymous(hint) => {
                return Err(self.error(hint, NotFoundReason::Anonymous));
            }
            _ => {
                if let Some(name) = self.resolver.canonical_name(value) {
                    self.out.push_str(name);
                    return Ok(());
                }
                if depth + 1 > self.limits.max_depth {
                    return Err(self.error(
                        &self.out,
                        NotFoundReason::TooDeep {
                            max_depth: self.limits.max_depth,
                        },
                    ));
                }
                self.render_generic(value, depth + 1)?;
            }
        }
        Ok(())
    }

    /// Renders a composite form; `depth` already counts this level.
    fn render_generic(&mut self, value: &TypeValue, depth: usize) -> Result<(), TypeNotFoundError> {
        match value {
            TypeValue::List(inner) => self.render_args("List", &[inner.as_ref()], depth),
            TypeValue::Set(inner) => self.render_args("Set", &[inner.as_ref()], depth),
            TypeValue::Type(Some(inner)) => self.render_args("Type", &[inner.as_ref()], depth),
            TypeValue::Dict(key, value) => {
                self.render_args("Dict", &[key.as_ref(), value.as_ref()], depth)
            }
            TypeValue::Tuple(items) if items.is_empty() => {
                self.out.push_str("Tuple[()]");
                Ok(())
            }
            TypeValue::Tuple(items) => {
                let items: Vec<&TypeValue> = items.iter().collect();
                self.render_args("Tuple", &items, depth)
            }
            TypeValue::Union(members) => {
                if members.is_empty() {
                    return Err(self.error("Union", empty_arity()));
                }
                let members: Vec<&TypeValue> = members.iter().collect();
                self.render_args("Union", &members, depth)
            }
            TypeValue::Literal(values) => {
                if values.is_empty() {
                    return Err(self.error("Literal", empty_arity()));
                }
                self.out.push_str("Literal[");
                for (index, literal) in values.iter().enumerate() {
                    if index > 0 {
                        self.out.push_str(", ");
                    }
                    push_literal(&mut self.out, literal);
                }
                self.out.push(']');
                Ok(())
            }
            other => self.render(other, depth),
        }
    }

    /// Renders `head[a, b, ...]`.
    fn render_args(
        &mut self,
        head: &str,
        args: &[&TypeValue],
        depth: usize,
    ) -> Result<(), TypeNotFoundError> {
        self.out.push_str(head);
        self.out.push('[');
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                self.out.push_str(", ");
            }
            self.render(arg, depth)?;
        }
        self.out.push(']');
        Ok(())
    }

    /// Builds an error scoped to this renderer's context.
    fn error(&self, reference: &str, reason: NotFoundReason) -> TypeNotFoundError {
        TypeNotFoundError::new(reference, self.resolver.context_id(), reason)
    }
}

/// Arity reason for a composite form with no members.
const fn empty_arity() -> NotFoundReason {
    NotFoundReason::Arity {
        expected: "at least 1",
        found: 0,
    }
}

/// Appends a literal in reference syntax.
fn push_literal(out: &mut String, literal: &LiteralValue) {
    match literal {
        LiteralValue::Int(value) => {
            let _ = write!(out, "{value}");
        }
        LiteralValue::Bool(true) => out.push_str("True"),
        LiteralValue::Bool(false) => out.push_str("False"),
        LiteralValue::None => out.push_str("None"),
        LiteralValue::Str(text) => {
            out.push('\'');
            for ch in text.chars() {
                match ch {
                    '\\' => out.push_str("\\\\"),
                    '\'' => out.push_str("\\'"),
                    '\n' => out.push_str("\\n"),
                    '\t' => out.push_str("\\t"),
                    other => out.push(other),
                }
            }
            out.push('\'');
        }
    }
}
