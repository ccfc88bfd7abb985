// crates/exposed-core/src/codec/parse.rs
// ============================================================================
// Module: Type Reference Parser
// Description: Lexer and recursive-descent parser for type reference strings.
// Purpose: Turn `Dict[str, List[int]]`-style references into `TypeValue`s.
// Dependencies: crate::codec::{registry, value}, crate::error
// ============================================================================

//! ## Overview
//! References follow the typing-form grammar the codec emits, plus a few
//! tolerated spellings on input:
//!
//! - **Names**: built-ins (`int`, `str`, ...), `Any`, `None`, and dotted paths
//!   resolved through the [`TypeResolver`].
//! - **Generics**: `List[T]`, `Set[T]`, `Dict[K, V]`, `Tuple[A, B]`,
//!   `Tuple[()]`, `Union[A, B]`, `Optional[T]`, `Type[T]`, plus lowercase heads.
//! - **Unions**: `A | B` anywhere a type is expected; decodes to `Union[A, B]`.
//! - **Literals**: `Literal[1, -2, 'text', "text", True, False, None]`.
//!
//! Input is untrusted: size and nesting are bounded by [`CodecLimits`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::codec::CodecLimits;
use crate::codec::registry::TypeResolver;
use crate::codec::value::Builtin;
use crate::codec::value::LiteralValue;
use crate::codec::value::TypeValue;
use crate::error::NotFoundReason;
use crate::error::TypeNotFoundError;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses and resolves a reference string.
pub(super) fn parse_reference<R>(
    input: &str,
    resolver: &R,
    limits: CodecLimits,
) -> Result<TypeValue, TypeNotFoundError>
where
    R: TypeResolver + ?Sized,
{
    if input.len() > limits.max_ref_bytes {
        return Err(TypeNotFoundError::new(
            input,
            resolver.context_id(),
            NotFoundReason::TooLarge {
                max_bytes: limits.max_ref_bytes,
            },
        ));
    }
    let tokens = Lexer::new(input).lex().map_err(|(position, detail)| {
        TypeNotFoundError::new(
            input,
            resolver.context_id(),
            NotFoundReason::Malformed {
                position,
                detail,
            },
        )
    })?;
    let mut parser = Parser {
        input,
        tokens,
        index: 0,
        resolver,
        max_depth: limits.max_depth,
        depth: 0,
    };
    let value = parser.parse_type()?;
    parser.expect(&Token::Eof, "end of reference")?;
    Ok(value.normalize())
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

/// Lexer token produced from a reference string.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Dotted identifier path.
    Ident(&'a str),
    /// Integer literal text (optionally signed).
    Int(&'a str),
    /// Unescaped string literal.
    Str(String),
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `|`
    Pipe,
    /// End-of-input marker.
    Eof,
}

impl Token<'_> {
    /// Renders the token for diagnostics.
    fn describe(&self) -> String {
        match self {
            Self::Ident(text) | Self::Int(text) => (*text).to_string(),
            Self::Str(text) => format!("'{text}'"),
            Self::LBracket => "[".to_string(),
            Self::RBracket => "]".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::Comma => ",".to_string(),
            Self::Pipe => "|".to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

/// Token paired with its byte offset.
#[derive(Debug, Clone)]
struct SpannedToken<'a> {
    /// Token value.
    token: Token<'a>,
    /// Byte offset into the input.
    position: usize,
}

/// Lexer for reference strings.
struct Lexer<'a> {
    /// Source input being tokenized.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
        }
    }

    /// Lexes the input; errors carry the byte offset and a diagnostic.
    fn lex(&mut self) -> Result<Vec<SpannedToken<'a>>, (usize, String)> {
        let mut tokens = Vec::new();
        let bytes = self.input.as_bytes();

        while let Some(&ch) = bytes.get(self.offset) {
            let start = self.offset;
            let token = match ch {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.offset += 1;
                    continue;
                }
                b'[' => Token::LBracket,
                b']' => Token::RBracket,
                b'(' => Token::LParen,
                b')' => Token::RParen,
                b',' => Token::Comma,
                b'|' => Token::Pipe,
                b'\'' | b'"' => {
                    let text = self.lex_string(ch)?;
                    tokens.push(SpannedToken {
                        token: Token::Str(text),
                        position: start,
                    });
                    continue;
                }
                b'-' | b'0' ..= b'9' => {
                    self.offset += 1;
                    self.consume_while(bytes, |b| b.is_ascii_digit());
                    let slice = &self.input[start .. self.offset];
                    if slice == "-" {
                        return Err((start, "expected digits after '-'".to_string()));
                    }
                    tokens.push(SpannedToken {
                        token: Token::Int(slice),
                        position: start,
                    });
                    continue;
                }
                b'a' ..= b'z' | b'A' ..= b'Z' | b'_' => {
                    self.consume_while(bytes, |b| b.is_ascii_alphanumeric() || b == b'_' || b == b'.');
                    let slice = &self.input[start .. self.offset];
                    if slice.ends_with('.') || slice.contains("..") {
                        return Err((start, format!("invalid dotted name `{slice}`")));
                    }
                    tokens.push(SpannedToken {
                        token: Token::Ident(slice),
                        position: start,
                    });
                    continue;
                }
                _ => {
                    let found = self.input[start ..].chars().next().unwrap_or('?');
                    return Err((start, format!("unexpected character `{found}`")));
                }
            };
            tokens.push(SpannedToken {
                token,
                position: start,
            });
            self.offset += 1;
        }

        if tokens.is_empty() {
            return Err((0, "reference is empty".to_string()));
        }
        tokens.push(SpannedToken {
            token: Token::Eof,
            position: self.offset,
        });
        Ok(tokens)
    }

    /// Lexes a quoted string starting at the current offset.
    fn lex_string(&mut self, quote: u8) -> Result<String, (usize, String)> {
        let start = self.offset;
        self.offset += 1;
        let mut text = String::new();
        let mut chars = self.input[self.offset ..].char_indices();
        while let Some((index, ch)) = chars.next() {
            match ch {
                '\\' => {
                    let Some((_, escaped)) = chars.next() else {
                        break;
                    };
                    match escaped {
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        other => text.push(other),
                    }
                }
                _ if ch == char::from(quote) => {
                    self.offset += index + ch.len_utf8();
                    return Ok(text);
                }
                _ => text.push(ch),
            }
        }
        Err((start, "unterminated string literal".to_string()))
    }

    /// Advances while the condition matches the current byte.
    fn consume_while<F>(&mut self, bytes: &[u8], condition: F)
    where
        F: Fn(u8) -> bool,
    {
        while let Some(&b) = bytes.get(self.offset) {
            if condition(b) {
                self.offset += 1;
            } else {
                break;
            }
        }
    }
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser resolving names as it goes.
struct Parser<'input, 'resolver, R: ?Sized> {
    /// Original input string (for diagnostics).
    input: &'input str,
    /// Token stream with source positions.
    tokens: Vec<SpannedToken<'input>>,
    /// Current token index.
    index: usize,
    /// Resolution context for dotted names.
    resolver: &'resolver R,
    /// Maximum generic nesting depth.
    max_depth: usize,
    /// Current generic nesting depth.
    depth: usize,
}

impl<'input, R> Parser<'input, '_, R>
where
    R: TypeResolver + ?Sized,
{
    /// Parses one type expression, including `A | B` unions.
    fn parse_type(&mut self) -> Result<TypeValue, TypeNotFoundError> {
        let first = self.parse_term()?;
        if self.peek() != &Token::Pipe {
            return Ok(first);
        }
        let mut members = vec![first];
        while self.peek() == &Token::Pipe {
            self.advance();
            members.push(self.parse_term()?);
        }
        Ok(TypeValue::Union(members))
    }

    /// Parses a name with optional type arguments.
    fn parse_term(&mut self) -> Result<TypeValue, TypeNotFoundError> {
        let name = self.expect_ident()?;
        if self.peek() != &Token::LBracket {
            return self.resolve_bare(name);
        }
        self.advance();
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(self.error(
                self.input,
                NotFoundReason::TooDeep {
                    max_depth: self.max_depth,
                },
            ));
        }
        let value = match name {
            "Literal" => {
                let values = self.parse_literal_args()?;
                TypeValue::Literal(values)
            }
            "Tuple" | "tuple" if self.peek() == &Token::LParen => {
                self.advance();
                self.expect(&Token::RParen, "`)` closing empty tuple")?;
                self.expect(&Token::RBracket, "`]`")?;
                TypeValue::Tuple(Vec::new())
            }
            _ => {
                let args = self.parse_type_args()?;
                build_generic(name, args).map_err(|reason| self.error(name, reason))?
            }
        };
        self.depth -= 1;
        Ok(value)
    }

    /// Resolves a name that carries no type arguments.
    fn resolve_bare(&self, name: &str) -> Result<TypeValue, TypeNotFoundError> {
        let value = match name {
            "Any" => TypeValue::Any,
            "None" => TypeValue::None,
            "Type" => TypeValue::Type(None),
            "List" => TypeValue::Builtin(Builtin::List),
            "Dict" => TypeValue::Builtin(Builtin::Dict),
            "Set" => TypeValue::Builtin(Builtin::Set),
            "Tuple" => TypeValue::Builtin(Builtin::Tuple),
            "Union" | "Optional" | "Literal" => {
                return Err(self.error(
                    name,
                    NotFoundReason::Arity {
                        expected: "at least 1",
                        found: 0,
                    },
                ));
            }
            _ => {
                if let Some(builtin) = Builtin::from_name(name) {
                    TypeValue::Builtin(builtin)
                } else if let Some(value) = self.resolver.resolve_name(name) {
                    value
                } else {
                    return Err(self.error(name, NotFoundReason::Unregistered));
                }
            }
        };
        Ok(value)
    }

    /// Parses `T, U, ...]` after an opening bracket.
    fn parse_type_args(&mut self) -> Result<Vec<TypeValue>, TypeNotFoundError> {
        let mut args = vec![self.parse_type()?];
        loop {
            match self.peek() {
                Token::Comma => {
                    self.advance();
                    if self.peek() == &Token::RBracket {
                        self.advance();
                        return Ok(args);
                    }
                    args.push(self.parse_type()?);
                }
                Token::RBracket => {
                    self.advance();
                    return Ok(args);
                }
                _ => return Err(self.unexpected("`,` or `]`")),
            }
        }
    }

    /// Parses `v, w, ...]` literal values after an opening bracket.
    fn parse_literal_args(&mut self) -> Result<Vec<LiteralValue>, TypeNotFoundError> {
        let mut values = vec![self.parse_literal()?];
        loop {
            match self.peek() {
                Token::Comma => {
                    self.advance();
                    if self.peek() == &Token::RBracket {
                        self.advance();
                        return Ok(values);
                    }
                    values.push(self.parse_literal()?);
                }
                Token::RBracket => {
                    self.advance();
                    return Ok(values);
                }
                _ => return Err(self.unexpected("`,` or `]`")),
            }
        }
    }

    /// Parses a single literal value.
    fn parse_literal(&mut self) -> Result<LiteralValue, TypeNotFoundError> {
        let spanned = self.current().clone();
        let value = match &spanned.token {
            Token::Int(text) => {
                let parsed = text.parse::<i64>().map_err(|_| {
                    self.error(
                        self.input,
                        NotFoundReason::Malformed {
                            position: spanned.position,
                            detail: format!("integer literal `{text}` out of range"),
                        },
                    )
                })?;
                LiteralValue::Int(parsed)
            }
            Token::Str(text) => LiteralValue::Str(text.clone()),
            Token::Ident("True") => LiteralValue::Bool(true),
            Token::Ident("False") => LiteralValue::Bool(false),
            Token::Ident("None") => LiteralValue::None,
            _ => return Err(self.unexpected("literal value")),
        };
        self.advance();
        Ok(value)
    }

    /// Consumes an identifier token.
    fn expect_ident(&mut self) -> Result<&'input str, TypeNotFoundError> {
        if let Token::Ident(name) = self.current().token {
            self.advance();
            return Ok(name);
        }
        Err(self.unexpected("type name"))
    }

    /// Consumes the expected token or fails.
    fn expect(&mut self, token: &Token<'_>, expected: &str) -> Result<(), TypeNotFoundError> {
        if self.peek() == token {
            self.advance();
            return Ok(());
        }
        Err(self.unexpected(expected))
    }

    /// Returns the current token.
    fn current(&self) -> &SpannedToken<'input> {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.index.min(last)]
    }

    /// Returns the current token value.
    fn peek(&self) -> &Token<'input> {
        &self.current().token
    }

    /// Advances to the next token, stopping at end of input.
    const fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Builds a malformed-reference error at the current token.
    fn unexpected(&self, expected: &str) -> TypeNotFoundError {
        let spanned = self.current();
        self.error(
            self.input,
            NotFoundReason::Malformed {
                position: spanned.position,
                detail: format!("expected {expected}, found {}", spanned.token.describe()),
            },
        )
    }

    /// Builds an error scoped to this parser's context.
    fn error(&self, reference: &str, reason: NotFoundReason) -> TypeNotFoundError {
        TypeNotFoundError::new(reference, self.resolver.context_id(), reason)
    }
}

// ============================================================================
// SECTION: Generic Forms
// ============================================================================

/// Builds a composite value from a generic head and its arguments.
fn build_generic(head: &str, mut args: Vec<TypeValue>) -> Result<TypeValue, NotFoundReason> {
    let found = args.len();
    let arity = |expected: &'static str| NotFoundReason::Arity {
        expected,
        found,
    };
    match head {
        "List" | "list" | "Set" | "set" | "Optional" | "Type" | "type" => {
            let Some(inner) = args.pop().filter(|_| found == 1) else {
                return Err(arity("1"));
            };
            Ok(match head {
                "List" | "list" => TypeValue::list(inner),
                "Set" | "set" => TypeValue::set(inner),
                "Optional" => TypeValue::optional(inner),
                _ => TypeValue::type_of(inner),
            })
        }
        "Dict" | "dict" => {
            if found != 2 {
                return Err(arity("2"));
            }
            let value = args.pop().unwrap_or(TypeValue::Any);
            let key = args.pop().unwrap_or(TypeValue::Any);
            Ok(TypeValue::dict(key, value))
        }
        "Tuple" | "tuple" => Ok(TypeValue::Tuple(args)),
        "Union" => Ok(TypeValue::union(args)),
        _ => Err(NotFoundReason::UnknownGeneric),
    }
}
