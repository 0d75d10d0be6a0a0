//! Tree-walking interpreter for Plume
//!
//! Executes the parsed expression tree directly.

pub mod env;
pub mod eval;
pub mod value;

pub use env::{EnvRef, Environment};
pub use eval::Interpreter;
pub use value::Value;
