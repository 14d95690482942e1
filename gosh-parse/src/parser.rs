#![forbid(unsafe_code)]

mod expr;
mod shell;
mod stmt;
mod types;

use std::mem;

use gosh_ast::{join, span_between, BinOp, Expr, ExprKind, Program, Span, Stmt, UnaryOp};
use gosh_lex::{Token, TokenKind};
use num_bigint::BigInt;

use crate::error::ParseError;
use crate::ParseConfig;

/// How deeply expressions, types, blocks and subshells may nest before the
/// parser gives up with an error instead of exhausting the stack.
const MAX_NESTING: usize = 200;

pub struct Parser<'a> {
    tokens: &'a [Token],
    idx: usize,
    config: ParseConfig,
    /// Cleared inside `if`/`for`/`switch` headers, where `x {` opens the body
    /// rather than a composite literal.
    composite_ok: bool,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::new_with_config(tokens, &ParseConfig::default())
    }

    pub fn new_with_config(tokens: &'a [Token], config: &ParseConfig) -> Self {
        Self {
            tokens,
            idx: 0,
            config: config.clone(),
            composite_ok: true,
            depth: 0,
        }
    }

    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        loop {
            self.skip_semicolons();
            if self.at(TokenKind::Eof) {
                break;
            }
            stmts.push(self.parse_stmt()?);
            self.expect_stmt_terminator()?;
        }
        Ok(Program { stmts })
    }

    /// Parse exactly one statement followed by end of input.
    pub fn parse_stmt_eof(&mut self) -> Result<Stmt, ParseError> {
        self.skip_semicolons();
        let stmt = self.parse_stmt()?;
        self.skip_semicolons();
        self.expect_eof()?;
        Ok(stmt)
    }

    pub fn parse_expr_eof(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        self.skip_semicolons();
        self.expect_eof()?;
        Ok(expr)
    }

    fn expect_eof(&mut self) -> Result<(), ParseError> {
        if self.at(TokenKind::Eof) {
            return Ok(());
        }
        Err(ParseError::new(
            format!("expected end of input, found {}", self.describe_next()),
            self.current_span(),
        ))
    }

    /// Run `f` with composite literals enabled or disabled, restoring the
    /// previous setting afterwards.
    fn with_composites<T>(
        &mut self,
        allowed: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = mem::replace(&mut self.composite_ok, allowed);
        let out = f(self);
        self.composite_ok = saved;
        out
    }

    /// Run `f` one nesting level deeper, failing once `MAX_NESTING` is reached.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::new(
                "maximum nesting depth exceeded",
                self.current_span(),
            ));
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn skip_semicolons(&mut self) {
        while self.at(TokenKind::Semicolon) {
            self.next();
        }
    }

    /// Skip semicolons that a line break inserted in front of `close`, so that
    /// lists may put their closing delimiter on its own line.
    fn skip_semicolons_before(&mut self, close: TokenKind) {
        let mut n = 0;
        while matches!(self.peek_kind_n(n), Some(TokenKind::Semicolon)) {
            n += 1;
        }
        if n > 0
            && self
                .peek_kind_n(n)
                .is_some_and(|k| mem::discriminant(k) == mem::discriminant(&close))
        {
            self.idx += n;
        }
    }

    fn expect_stmt_terminator(&mut self) -> Result<(), ParseError> {
        if self.at(TokenKind::Semicolon) {
            self.next();
            Ok(())
        } else if self.at(TokenKind::RBrace) || self.at(TokenKind::Eof) {
            Ok(())
        } else {
            Err(ParseError::new(
                format!("expected end of statement, found {}", self.describe_next()),
                self.current_span(),
            ))
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        let tok = self.expect_any()?;
        match tok.kind {
            TokenKind::Ident(name) => Ok((name, tok.span)),
            other => Err(ParseError::new(
                format!("expected identifier, found {other}"),
                tok.span,
            )),
        }
    }

    fn expect(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let tok = self.expect_any()?;
        if mem::discriminant(&tok.kind) == mem::discriminant(&expected) {
            Ok(tok)
        } else {
            Err(ParseError::new(
                format!("expected {expected}, found {}", tok.kind),
                tok.span,
            ))
        }
    }

    fn expect_any(&mut self) -> Result<Token, ParseError> {
        let span = self.current_span();
        self.next()
            .ok_or_else(|| ParseError::new("unexpected end of input", span))
    }

    /// Consume the next token if it has the same kind as `kind`.
    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.at(kind) { self.next() } else { None }
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind()
            .is_some_and(|k| mem::discriminant(k) == mem::discriminant(&kind))
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.idx)?.clone();
        self.idx += 1;
        Some(tok)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens.get(self.idx).map(|t| &t.kind)
    }

    fn peek_kind_n(&self, n: usize) -> Option<&TokenKind> {
        self.tokens.get(self.idx + n).map(|t| &t.kind)
    }

    fn peek_span(&self) -> Option<Span> {
        self.tokens.get(self.idx).map(|t| t.span)
    }

    /// Span of the next token, or of the end of input.
    fn current_span(&self) -> Span {
        self.peek_span()
            .or_else(|| self.tokens.last().map(|t| t.span))
            .unwrap_or_else(|| span_between(0, 0))
    }

    /// Span of the most recently consumed token.
    fn prev_span(&self) -> Span {
        self.idx
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| t.span)
            .unwrap_or_else(|| self.current_span())
    }

    fn describe_next(&self) -> String {
        match self.peek_kind() {
            Some(kind) => kind.to_string(),
            None => "end of input".to_string(),
        }
    }

    /// Span from `start` through the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        join(start, self.prev_span())
    }
}

/// Fold a constant array length. Only integer literals combined with
/// `+ - * /` and parentheses are accepted.
fn eval_const_u64(expr: &Expr) -> Result<u64, ParseError> {
    match &expr.kind {
        ExprKind::BasicLit(gosh_ast::Literal::Int(n)) => u64::try_from(n).map_err(|_| {
            ParseError::new("array length must fit in 64 bits", expr.span)
        }),
        ExprKind::Unary {
            op: UnaryOp::Paren | UnaryOp::Pos,
            expr: inner,
        } => eval_const_u64(inner),
        ExprKind::Unary {
            op: UnaryOp::Neg,
            expr: inner,
        } => {
            if eval_const_u64(inner)? == 0 {
                Ok(0)
            } else {
                Err(ParseError::new("array length cannot be negative", expr.span))
            }
        }
        ExprKind::Binary { left, op, right } => {
            let l = eval_const_u64(left)?;
            let r = eval_const_u64(right)?;
            let out = match op {
                BinOp::Add => l.checked_add(r),
                BinOp::Sub => l.checked_sub(r),
                BinOp::Mul => l.checked_mul(r),
                BinOp::Div => l.checked_div(r),
                _ => None,
            };
            out.ok_or_else(|| {
                ParseError::new("unsupported or overflowing array length expression", expr.span)
            })
        }
        _ => Err(ParseError::new(
            "array length must be a constant integer expression",
            expr.span,
        )),
    }
}

/// The integer value of a literal key, used to number the positional entries
/// that follow it in a sparse array literal.
fn int_key(expr: &Expr) -> Option<&BigInt> {
    match &expr.kind {
        ExprKind::BasicLit(gosh_ast::Literal::Int(n)) => Some(n),
        _ => None,
    }
}
