//! Runtime values for the interpreter

use std::fmt;
use std::rc::Rc;

use crate::ast::FnDef;

use super::env::EnvRef;

/// Runtime value
#[derive(Clone)]
pub enum Value {
    /// 64-bit signed integer
    Int(i64),
    /// Boolean
    Bool(bool),
    /// The null/undefined value
    Null,
    /// Function closure
    Closure {
        func: Rc<FnDef>,
        /// Frame that was active at the declaration site
        env: EnvRef,
    },
}

impl Value {
    /// Get the type name of this value
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Closure { .. } => "function",
        }
    }

    /// Try to get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Closure { func, .. } => {
                write!(f, "<function({})>", func.params.join(", "))
            }
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            // Closures compare by identity: same declaration, same captured frame
            (
                Value::Closure { func: f1, env: e1 },
                Value::Closure { func: f2, env: e2 },
            ) => Rc::ptr_eq(f1, f2) && Rc::ptr_eq(e1, e2),
            _ => false,
        }
    }
}
