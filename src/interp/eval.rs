//! Tree-walking evaluator
//!
//! Executes the expression tree directly against a chain of shared scope
//! frames. Evaluation is synchronous recursive descent; sub-expressions run
//! strictly left to right, and that order is observable through `print` and
//! assignment side effects.

use std::rc::Rc;

use crate::ast::{Expr, ExprKind, FnDef, Literal, Op};
use crate::diagnostics::RuntimeError;

use super::env::{EnvRef, Environment};
use super::value::Value;

/// Tree-walking interpreter
pub struct Interpreter {
    /// Global scope frame
    globals: EnvRef,
    /// Output buffer for testing; `print` lines land here and on stdout
    output: Vec<String>,
}

impl Interpreter {
    /// Create a new interpreter with an empty global scope
    pub fn new() -> Self {
        Interpreter {
            globals: Environment::global(),
            output: Vec::new(),
        }
    }

    /// Get captured print output (for testing)
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Clear the output buffer
    pub fn clear_output(&mut self) {
        self.output.clear();
    }

    /// Evaluate a program against this interpreter's global scope
    pub fn interpret(&mut self, program: &Expr) -> Result<Value, RuntimeError> {
        let globals = Rc::clone(&self.globals);
        self.eval_expr(program, &globals)
    }

    /// Evaluate an expression in the given scope
    fn eval_expr(&mut self, expr: &Expr, env: &EnvRef) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(eval_literal(*lit)),

            ExprKind::Var(name) => Ok(env.borrow().resolve_var(name)),

            ExprKind::Print(inner) => {
                let value = self.eval_expr(inner, env)?;
                let line = value.to_string();
                println!("{line}");
                self.output.push(line);
                Ok(value)
            }

            ExprKind::Binary { op, lhs, rhs } => {
                let lhs = self.eval_expr(lhs, env)?;
                let rhs = self.eval_expr(rhs, env)?;
                eval_binary(*op, lhs, rhs)
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                // Exactly one branch runs; the untaken branch is never
                // evaluated.
                if self.eval_condition(cond, env)? {
                    self.eval_expr(then_branch, env)
                } else {
                    self.eval_expr(else_branch, env)
                }
            }

            ExprKind::While { cond, body } => {
                while self.eval_condition(cond, env)? {
                    self.eval_expr(body, env)?;
                }
                Ok(Value::Null)
            }

            ExprKind::Seq { first, second } => {
                self.eval_expr(first, env)?;
                self.eval_expr(second, env)
            }

            ExprKind::Block(inner) => {
                let scope = Environment::with_parent(env);
                self.eval_expr(inner, &scope)
            }

            ExprKind::VarDecl { name, init } => {
                let value = self.eval_expr(init, env)?;
                env.borrow_mut().create_var(name, value)?;
                Ok(env.borrow().resolve_var(name))
            }

            ExprKind::Assign { name, value } => {
                let value = self.eval_expr(value, env)?;
                env.borrow_mut().update_var(name, value);
                Ok(env.borrow().resolve_var(name))
            }

            ExprKind::Function(def) => Ok(Value::Closure {
                func: Rc::clone(def),
                env: Rc::clone(env),
            }),

            ExprKind::Call { callee, args } => {
                // The callee must be a closure before any argument runs
                let (func, captured) = match self.eval_expr(callee, env)? {
                    Value::Closure { func, env } => (func, env),
                    other => {
                        return Err(RuntimeError::TypeMismatch {
                            expected: "function".to_string(),
                            found: other.type_name().to_string(),
                        });
                    }
                };
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg, env)?);
                }
                self.apply(&func, &captured, arg_values)
            }
        }
    }

    /// Evaluate a condition, requiring a boolean
    fn eval_condition(&mut self, cond: &Expr, env: &EnvRef) -> Result<bool, RuntimeError> {
        match self.eval_expr(cond, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::TypeMismatch {
                expected: "bool condition".to_string(),
                found: other.type_name().to_string(),
            }),
        }
    }

    /// Apply a closure to already-evaluated arguments
    fn apply(
        &mut self,
        func: &Rc<FnDef>,
        captured: &EnvRef,
        args: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        if func.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                expected: func.params.len(),
                found: args.len(),
            });
        }

        // Fresh frame per application, chained to the declaration site
        let frame = Environment::with_parent(captured);
        {
            let mut frame = frame.borrow_mut();
            for (param, arg) in func.params.iter().zip(args) {
                frame.create_var(param, arg)?;
            }
        }

        self.eval_expr(&func.body, &frame)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a literal
fn eval_literal(lit: Literal) -> Value {
    match lit {
        Literal::Int(n) => Value::Int(n),
        Literal::Bool(b) => Value::Bool(b),
        Literal::Null => Value::Null,
    }
}

/// Evaluate a binary operation; both operands must be integers
fn eval_binary(op: Op, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
    let (x, y) = match (&lhs, &rhs) {
        (Value::Int(x), Value::Int(y)) => (*x, *y),
        (Value::Int(_), other) | (other, _) => {
            return Err(RuntimeError::TypeMismatch {
                expected: format!("int operands for `{}`", op.symbol()),
                found: other.type_name().to_string(),
            });
        }
    };

    match op {
        Op::Add => Ok(Value::Int(x + y)),
        Op::Sub => Ok(Value::Int(x - y)),
        Op::Mul => Ok(Value::Int(x * y)),
        Op::Div => {
            if y == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                // Truncates toward zero
                Ok(Value::Int(x / y))
            }
        }
        Op::Mod => {
            if y == 0 {
                Err(RuntimeError::DivisionByZero)
            } else {
                Ok(Value::Int(x % y))
            }
        }
        Op::Gt => Ok(Value::Bool(x > y)),
        Op::Ge => Ok(Value::Bool(x >= y)),
        Op::Lt => Ok(Value::Bool(x < y)),
        Op::Le => Ok(Value::Bool(x <= y)),
        Op::Eq => Ok(Value::Bool(x == y)),
    }
}
