//! Parser for the Plume language
//!
//! A recursive descent parser that produces an expression tree from a token
//! stream. A program is a list of statements folded into right-nested `Seq`
//! nodes; `if`, `while`, and blocks are ordinary expressions.

use crate::ast::{Expr, ExprKind, FnDef, Literal, Op};
use crate::common::Span;
use crate::diagnostics::CompileError;
use crate::lexer::{Token, TokenKind};
use miette::{NamedSource, Result};
use std::rc::Rc;

/// Parse a token stream into a program expression
pub fn parse(tokens: &[Token], source: &str) -> Result<Expr> {
    let mut parser = Parser::new(tokens, source);
    parser.parse_program()
}

/// Parser state
struct Parser<'a> {
    tokens: &'a [Token],
    source: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token], source: &'a str) -> Self {
        Self {
            tokens,
            source,
            pos: 0,
        }
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should have at least EOF")
        })
    }

    fn peek(&self) -> TokenKind {
        self.current().kind
    }

    fn peek_n(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek() == kind
    }

    fn advance(&mut self) -> &Token {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn expect(&mut self, kind: TokenKind) -> Result<&Token> {
        if self.at(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(&format!("`{}`", kind.as_str())))
        }
    }

    fn span(&self) -> Span {
        self.current().span
    }

    fn src(&self) -> NamedSource<String> {
        NamedSource::new("<script>", self.source.to_string())
    }

    fn unexpected(&self, expected: &str) -> miette::Report {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            CompileError::UnexpectedEof {
                span: token.span.into(),
                src: self.src(),
            }
            .into()
        } else {
            CompileError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.text.clone(),
                span: token.span.into(),
                src: self.src(),
            }
            .into()
        }
    }

    // ==================== PROGRAM ====================

    fn parse_program(&mut self) -> Result<Expr> {
        let empty_span = self.span();
        let mut stmts = Vec::new();

        while !self.at(TokenKind::Eof) {
            stmts.push(self.parse_stmt()?);
        }

        Ok(fold_seq(stmts, empty_span))
    }

    fn parse_stmt(&mut self) -> Result<Expr> {
        let expr = self.parse_expr()?;

        // Brace-delimited forms may omit the trailing semicolon
        let braced = matches!(
            expr.kind,
            ExprKind::If { .. } | ExprKind::While { .. } | ExprKind::Block(_)
        );
        if braced {
            if self.at(TokenKind::Semi) {
                self.advance();
            }
        } else {
            self.expect(TokenKind::Semi)?;
        }

        Ok(expr)
    }

    // ==================== EXPRESSIONS ====================

    fn parse_expr(&mut self) -> Result<Expr> {
        match self.peek() {
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::LBrace => self.parse_block(),
            // `x = ...` is an assignment; `x == ...` falls through to comparison
            TokenKind::Ident if self.peek_n(1) == TokenKind::Eq => self.parse_assign(),
            _ => self.parse_comparison(),
        }
    }

    fn parse_var_decl(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::Var)?;
        let name = self.expect(TokenKind::Ident)?.text.clone();
        self.expect(TokenKind::Eq)?;
        let init = self.parse_expr()?;
        let span = start.merge(init.span);
        Ok(Expr {
            kind: ExprKind::VarDecl {
                name,
                init: Box::new(init),
            },
            span,
        })
    }

    fn parse_assign(&mut self) -> Result<Expr> {
        let start = self.span();
        let name = self.expect(TokenKind::Ident)?.text.clone();
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expr()?;
        let span = start.merge(value.span);
        Ok(Expr {
            kind: ExprKind::Assign {
                name,
                value: Box::new(value),
            },
            span,
        })
    }

    fn parse_if(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.at(TokenKind::Else) {
            self.advance();
            if self.at(TokenKind::If) {
                self.parse_if()?
            } else {
                self.parse_block()?
            }
        } else {
            // A missing else yields null
            Expr {
                kind: ExprKind::Literal(Literal::Null),
                span: then_branch.span,
            }
        };

        let span = start.merge(else_branch.span);
        Ok(Expr {
            kind: ExprKind::If {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            },
            span,
        })
    }

    fn parse_while(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Expr {
            kind: ExprKind::While {
                cond: Box::new(cond),
                body: Box::new(body),
            },
            span,
        })
    }

    fn parse_block(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::LBrace)?;
        let inner_span = self.span();

        let mut stmts = Vec::new();
        while !self.at(TokenKind::RBrace) {
            if self.at(TokenKind::Eof) {
                return Err(self.unexpected("`}`"));
            }
            stmts.push(self.parse_stmt()?);
        }
        let end = self.expect(TokenKind::RBrace)?.span;

        Ok(Expr {
            kind: ExprKind::Block(Box::new(fold_seq(stmts, inner_span))),
            span: start.merge(end),
        })
    }

    // ==================== OPERATORS ====================

    fn parse_comparison(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                TokenKind::Gt => Op::Gt,
                TokenKind::Ge => Op::Ge,
                TokenKind::Lt => Op::Lt,
                TokenKind::Le => Op::Le,
                TokenKind::EqEq => Op::Eq,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_additive(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => Op::Add,
                TokenKind::Minus => Op::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut lhs = self.parse_call()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => Op::Mul,
                TokenKind::Slash => Op::Div,
                TokenKind::Percent => Op::Mod,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_call()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_call(&mut self) -> Result<Expr> {
        let mut expr = self.parse_primary()?;

        while self.at(TokenKind::LParen) {
            self.advance();
            let mut args = Vec::new();
            while !self.at(TokenKind::RParen) {
                if !args.is_empty() {
                    self.expect(TokenKind::Comma)?;
                }
                args.push(self.parse_expr()?);
            }
            let end = self.expect(TokenKind::RParen)?.span;
            let span = expr.span.merge(end);
            expr = Expr {
                kind: ExprKind::Call {
                    callee: Box::new(expr),
                    args,
                },
                span,
            };
        }

        Ok(expr)
    }

    // ==================== PRIMARY ====================

    fn parse_primary(&mut self) -> Result<Expr> {
        match self.peek() {
            TokenKind::IntLit => {
                let token = self.advance();
                let span = token.span;
                let text = token.text.clone();
                let value: i64 = text.parse().map_err(|_| CompileError::IntOutOfRange {
                    text: text.clone(),
                    span: span.into(),
                    src: self.src(),
                })?;
                Ok(Expr {
                    kind: ExprKind::Literal(Literal::Int(value)),
                    span,
                })
            }

            TokenKind::True => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::Literal(Literal::Bool(true)),
                    span,
                })
            }

            TokenKind::False => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::Literal(Literal::Bool(false)),
                    span,
                })
            }

            TokenKind::Null => {
                let span = self.advance().span;
                Ok(Expr {
                    kind: ExprKind::Literal(Literal::Null),
                    span,
                })
            }

            TokenKind::Ident => {
                let token = self.advance();
                Ok(Expr {
                    kind: ExprKind::Var(token.text.clone()),
                    span: token.span,
                })
            }

            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }

            TokenKind::Function => self.parse_function(),

            TokenKind::Print => self.parse_print(),

            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_function(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::Function)?;
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        while !self.at(TokenKind::RParen) {
            if !params.is_empty() {
                self.expect(TokenKind::Comma)?;
            }
            params.push(self.expect(TokenKind::Ident)?.text.clone());
        }
        self.expect(TokenKind::RParen)?;

        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Expr {
            kind: ExprKind::Function(Rc::new(FnDef { params, body })),
            span,
        })
    }

    fn parse_print(&mut self) -> Result<Expr> {
        let start = self.span();
        self.expect(TokenKind::Print)?;
        self.expect(TokenKind::LParen)?;
        let inner = self.parse_expr()?;
        let end = self.expect(TokenKind::RParen)?.span;
        Ok(Expr {
            kind: ExprKind::Print(Box::new(inner)),
            span: start.merge(end),
        })
    }
}

fn binary(op: Op, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span.merge(rhs.span);
    Expr {
        kind: ExprKind::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        },
        span,
    }
}

/// Fold statements into right-nested `Seq` nodes; an empty list yields null
fn fold_seq(mut stmts: Vec<Expr>, empty_span: Span) -> Expr {
    let Some(mut second) = stmts.pop() else {
        return Expr {
            kind: ExprKind::Literal(Literal::Null),
            span: empty_span,
        };
    };
    while let Some(first) = stmts.pop() {
        let span = first.span.merge(second.span);
        second = Expr {
            kind: ExprKind::Seq {
                first: Box::new(first),
                second: Box::new(second),
            },
            span,
        };
    }
    second
}
