//! Lexer for the Plume language
//!
//! Thin wrapper around a logos-generated scanner: produces a `Vec<Token>`
//! terminated by an explicit `Eof` token for the parser.

pub mod tokens;

pub use tokens::{Token, TokenKind};

use crate::common::Span;
use crate::diagnostics::CompileError;
use logos::Logos;
use miette::{NamedSource, Result};

/// Lex source text into a token stream
pub fn lex(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(kind) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(range.start, range.end);
        match kind {
            Ok(kind) => tokens.push(Token {
                kind,
                span,
                text: lexer.slice().to_string(),
            }),
            Err(()) => {
                return Err(CompileError::UnexpectedChar {
                    found: lexer.slice().to_string(),
                    span: span.into(),
                    src: NamedSource::new("<script>", source.to_string()),
                }
                .into());
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(source.len(), source.len()),
        text: String::new(),
    });

    Ok(tokens)
}
