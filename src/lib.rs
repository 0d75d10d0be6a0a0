//! Plume — a featherweight JavaScript-style scripting language
//!
//! Everything is an expression: `if`, `while`, and blocks all yield values,
//! and functions are first-class closures over the scope they were declared
//! in. Variables live in a chain of shared frames with innermost-first
//! resolution; assigning to a name no scope knows creates a global.
//!
//! # Architecture
//!
//! ```text
//! Source → Lexer → Parser → Expr tree → Interpreter → Value
//! ```
//!
//! # Example
//!
//! ```
//! use plume::Value;
//!
//! let result = plume::interpret("var x = 20; x + 22;").unwrap();
//! assert_eq!(result, Value::Int(42));
//! ```

pub mod ast;
pub mod common;
pub mod diagnostics;
pub mod interp;
pub mod lexer;
pub mod parser;
pub mod repl;

// Re-exports for convenience
pub use ast::Expr;
pub use diagnostics::{CompileError, RuntimeError};
pub use interp::{Interpreter, Value};

/// Interpreter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse source code to an expression tree
pub fn parse(source: &str) -> miette::Result<Expr> {
    let tokens = lexer::lex(source)?;
    parser::parse(&tokens, source)
}

/// Interpret source code against a fresh global scope
pub fn interpret(source: &str) -> miette::Result<Value> {
    let program = parse(source)?;
    let mut interpreter = Interpreter::new();
    interpreter
        .interpret(&program)
        .map_err(miette::Report::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
