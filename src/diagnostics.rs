//! Diagnostic reporting with source locations
//!
//! This module provides rich error messages with source locations using miette.

use crate::common::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Convert our Span to miette's SourceSpan
impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::new(span.start.into(), span.len())
    }
}

/// Front-end diagnostic (lexing and parsing)
#[derive(Error, Debug, Diagnostic)]
pub enum CompileError {
    // === Lex Errors ===
    #[error("Unexpected character `{found}`")]
    #[diagnostic(code(lex::unexpected_char))]
    UnexpectedChar {
        found: String,
        #[label("unrecognized token here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    // === Parse Errors ===
    #[error("Unexpected token: expected {expected}, found `{found}`")]
    #[diagnostic(code(parse::unexpected_token))]
    UnexpectedToken {
        expected: String,
        found: String,
        #[label("unexpected token here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Unexpected end of file")]
    #[diagnostic(code(parse::unexpected_eof))]
    UnexpectedEof {
        #[label("expected more tokens")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("Integer literal `{text}` is out of range")]
    #[diagnostic(code(parse::int_out_of_range))]
    IntOutOfRange {
        text: String,
        #[label("does not fit in a 64-bit integer")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },
}

/// Runtime failure during evaluation
///
/// Every variant aborts the whole `interpret` call: the language has no
/// catch construct, so these surface to whatever invoked the interpreter.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum RuntimeError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    #[diagnostic(code(eval::type_mismatch))]
    TypeMismatch { expected: String, found: String },

    #[error("Division by zero")]
    #[diagnostic(code(eval::division_by_zero))]
    DivisionByZero,

    #[error("Variable `{name}` is already declared in this scope")]
    #[diagnostic(
        code(eval::duplicate_declaration),
        help("assign with `{name} = ...` to update the existing variable")
    )]
    DuplicateDeclaration { name: String },

    #[error("Function expects {expected} argument(s), got {found}")]
    #[diagnostic(code(eval::arity_mismatch))]
    ArityMismatch { expected: usize, found: usize },
}
