//! Lexer tests

use plume::lexer::{TokenKind, lex};

/// Helper to lex and collect token kinds (including the trailing Eof)
fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .expect("lexing should succeed")
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_empty_source_yields_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_keywords() {
    assert_eq!(
        kinds("var function if else while print"),
        vec![
            TokenKind::Var,
            TokenKind::Function,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Print,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_constants() {
    assert_eq!(
        kinds("true false null 42"),
        vec![
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::IntLit,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_identifier_vs_keyword() {
    // Prefixed keywords are plain identifiers
    assert_eq!(
        kinds("variable iffy whiled"),
        vec![
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Ident,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_operators() {
    assert_eq!(
        kinds("+ - * / % > >= < <= == ="),
        vec![
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Gt,
            TokenKind::Ge,
            TokenKind::Lt,
            TokenKind::Le,
            TokenKind::EqEq,
            TokenKind::Eq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_eqeq_is_one_token() {
    assert_eq!(
        kinds("x==1"),
        vec![
            TokenKind::Ident,
            TokenKind::EqEq,
            TokenKind::IntLit,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_delimiters_and_punctuation() {
    assert_eq!(
        kinds("( ) { } , ;"),
        vec![
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBrace,
            TokenKind::RBrace,
            TokenKind::Comma,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_line_comments_skipped() {
    assert_eq!(
        kinds("1; // trailing comment\n2;"),
        vec![
            TokenKind::IntLit,
            TokenKind::Semi,
            TokenKind::IntLit,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_block_comments_skipped() {
    assert_eq!(
        kinds("1 /* a\nmultiline\ncomment */ + 2"),
        vec![
            TokenKind::IntLit,
            TokenKind::Plus,
            TokenKind::IntLit,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_token_text_and_span() {
    let tokens = lex("var answer = 42;").expect("lexing should succeed");
    assert_eq!(tokens[1].kind, TokenKind::Ident);
    assert_eq!(tokens[1].text, "answer");
    assert_eq!(tokens[1].span.start, 4);
    assert_eq!(tokens[1].span.end, 10);
    assert_eq!(tokens[3].kind, TokenKind::IntLit);
    assert_eq!(tokens[3].text, "42");
}

#[test]
fn test_unexpected_character_is_an_error() {
    assert!(lex("var x = @;").is_err());
    assert!(lex("x & y;").is_err());
}

#[test]
fn test_keyword_helpers() {
    assert!(TokenKind::Var.is_keyword());
    assert!(TokenKind::Null.is_keyword());
    assert!(!TokenKind::Ident.is_keyword());
    assert!(TokenKind::EqEq.is_operator());
    assert!(!TokenKind::Semi.is_operator());
}
