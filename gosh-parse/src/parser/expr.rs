use gosh_ast::{join, BinOp, Expr, ExprKind, FuncLiteral, Literal, Span, Type, UnaryOp};
use gosh_lex::TokenKind;
use num_bigint::BigInt;

use super::types::Signature;
use super::{int_key, Parser};
use crate::error::ParseError;

/// Which node a `{...}` literal body produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LitKind {
    Composite,
    Array,
    Slice,
    Map,
}

impl LitKind {
    fn of(ty: &Type) -> Self {
        match ty {
            Type::Array { .. } => LitKind::Array,
            Type::Slice(_) => LitKind::Slice,
            Type::Map { .. } => LitKind::Map,
            _ => LitKind::Composite,
        }
    }
}

fn binop(kind: &TokenKind) -> Option<BinOp> {
    Some(match kind {
        TokenKind::OrOr => BinOp::LogicalOr,
        TokenKind::AndAnd => BinOp::LogicalAnd,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::Neq => BinOp::Ne,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Le => BinOp::Le,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::Ge => BinOp::Ge,
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Pipe => BinOp::Pipe,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Rem,
        TokenKind::Amp => BinOp::Ref,
        TokenKind::AmpCaret => BinOp::RefPow,
        TokenKind::Shl => BinOp::Shl,
        TokenKind::Shr => BinOp::Shr,
        TokenKind::Caret => BinOp::Pow,
        _ => return None,
    })
}

/// The type named by `T` or `pkg.T` in front of a composite literal body.
fn literal_type(expr: &Expr) -> Option<Type> {
    match &expr.kind {
        ExprKind::Ident(name) => Some(Type::unresolved(name.clone())),
        ExprKind::Selector { left, right } => match &left.kind {
            ExprKind::Ident(pkg) => Some(Type::qualified(pkg.clone(), right.clone())),
            _ => None,
        },
        _ => None,
    }
}

impl Parser<'_> {
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    pub(super) fn parse_expr_list(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = vec![self.parse_expr()?];
        while self.eat(TokenKind::Comma).is_some() {
            exprs.push(self.parse_expr()?);
        }
        Ok(exprs)
    }

    /// Precedence climbing: operators binding at least `min_prec` are folded
    /// into `left`; the right operand only takes tighter operators, which
    /// keeps every level left-associative.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek_kind().and_then(binop) {
            if op.precedence() < min_prec {
                break;
            }
            self.next();
            let right = self.parse_binary(op.precedence() + 1)?;
            let span = join(left.span, right.span);
            left = Expr::new(
                span,
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_unary_op())
    }

    fn parse_unary_op(&mut self) -> Result<Expr, ParseError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Plus) => UnaryOp::Pos,
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Amp) => UnaryOp::Addr,
            Some(TokenKind::Star) => UnaryOp::Deref,
            // `<-chan T` is a type, handled as a primary.
            Some(TokenKind::Arrow) if !matches!(self.peek_kind_n(1), Some(TokenKind::KwChan)) => {
                UnaryOp::Recv
            }
            _ => return self.parse_postfix(),
        };
        let start = self.expect_any()?.span;
        let expr = self.parse_unary()?;
        Ok(Expr::new(
            join(start, expr.span),
            ExprKind::Unary {
                op,
                expr: Box::new(expr),
            },
        ))
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.next();
                    expr = if self.eat(TokenKind::LParen).is_some() {
                        let ty = if self.eat(TokenKind::KwType).is_some() {
                            None
                        } else {
                            Some(self.parse_type()?)
                        };
                        self.expect(TokenKind::RParen)?;
                        Expr::new(
                            self.span_from(expr.span),
                            ExprKind::TypeAssert {
                                left: Box::new(expr),
                                ty,
                            },
                        )
                    } else {
                        let (right, span) = self.expect_ident()?;
                        Expr::new(
                            join(expr.span, span),
                            ExprKind::Selector {
                                left: Box::new(expr),
                                right,
                            },
                        )
                    };
                }
                Some(TokenKind::LParen) => expr = self.parse_call(expr)?,
                Some(TokenKind::LBracket) => expr = self.parse_index(expr)?,
                Some(TokenKind::LBrace) if self.composite_ok => {
                    let Some(ty) = literal_type(&expr) else { break };
                    expr = self.parse_literal_body(expr.span, ty)?;
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_call(&mut self, func: Expr) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LParen)?;
        let (args, ellipsis) = self.with_composites(true, |p| {
            let mut args = Vec::new();
            let mut ellipsis = false;
            while !p.at(TokenKind::RParen) {
                args.push(p.parse_expr()?);
                if p.eat(TokenKind::Ellipsis).is_some() {
                    ellipsis = true;
                    p.eat(TokenKind::Comma);
                    break;
                }
                if p.eat(TokenKind::Comma).is_none() {
                    break;
                }
            }
            p.skip_semicolons_before(TokenKind::RParen);
            Ok((args, ellipsis))
        })?;
        self.expect(TokenKind::RParen)?;
        Ok(Expr::new(
            self.span_from(func.span),
            ExprKind::Call {
                func: Box::new(func),
                args,
                ellipsis,
            },
        ))
    }

    /// `x[i]`, `x[lo:hi]` and comma-separated mixtures such as `x[1:, :3]`.
    fn parse_index(&mut self, left: Expr) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LBracket)?;
        let indices = self.with_composites(true, |p| {
            let mut indices = vec![p.parse_index_slot()?];
            while p.eat(TokenKind::Comma).is_some() {
                indices.push(p.parse_index_slot()?);
            }
            Ok(indices)
        })?;
        self.expect(TokenKind::RBracket)?;
        Ok(Expr::new(
            self.span_from(left.span),
            ExprKind::Index {
                left: Box::new(left),
                indices,
            },
        ))
    }

    fn parse_index_slot(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        let low = if self.at(TokenKind::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        match (low, self.eat(TokenKind::Colon)) {
            (Some(low), None) => Ok(low),
            (low, _) => {
                let high = if self.at(TokenKind::Comma) || self.at(TokenKind::RBracket) {
                    None
                } else {
                    Some(Box::new(self.parse_expr()?))
                };
                Ok(Expr::new(
                    self.span_from(start),
                    ExprKind::Slice {
                        low: low.map(Box::new),
                        high,
                    },
                ))
            }
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if let Some(lit) = self.parse_basic_lit() {
            return Ok(lit);
        }

        let start = self.current_span();
        match self.peek_kind() {
            Some(TokenKind::Ident(_)) => {
                let (name, span) = self.expect_ident()?;
                Ok(Expr::new(span, ExprKind::Ident(name)))
            }
            Some(TokenKind::LParen) => self.parse_paren(),
            Some(TokenKind::ShellOpen) => {
                let shell = self.parse_shell()?;
                Ok(Expr::new(self.span_from(start), ExprKind::Shell(shell)))
            }
            Some(TokenKind::KwFunc) => self.parse_func_expr(),
            Some(
                TokenKind::LBracket
                | TokenKind::TableBracket
                | TokenKind::KwMap
                | TokenKind::KwStruct,
            ) => self.parse_typed_literal(),
            Some(TokenKind::KwChan | TokenKind::KwInterface | TokenKind::Arrow) => {
                let ty = self.parse_type()?;
                Ok(Expr::new(self.span_from(start), ExprKind::Type(ty)))
            }
            _ => Err(ParseError::new(
                format!("expected expression, found {}", self.describe_next()),
                start,
            )),
        }
    }

    fn parse_basic_lit(&mut self) -> Option<Expr> {
        let tok = self.tokens.get(self.idx)?;
        let lit = match &tok.kind {
            TokenKind::Int(n) => Literal::Int(n.clone()),
            TokenKind::Float(x) => Literal::Float(x.clone()),
            TokenKind::String { value, .. } => Literal::String(value.clone()),
            _ => return None,
        };
        let span = tok.span;
        self.idx += 1;
        Some(Expr::new(span, ExprKind::BasicLit(lit)))
    }

    /// `(x)` stays in the tree as `Unary{Paren}`. A parenthesised shell
    /// escape captures its standard output.
    fn parse_paren(&mut self) -> Result<Expr, ParseError> {
        let open = self.expect(TokenKind::LParen)?.span;
        let mut inner = self.with_composites(true, |p| p.parse_expr())?;
        self.skip_semicolons_before(TokenKind::RParen);
        self.expect(TokenKind::RParen)?;
        if let ExprKind::Shell(shell) = &mut inner.kind {
            shell.trap_out = true;
        }
        Ok(Expr::new(
            self.span_from(open),
            ExprKind::Unary {
                op: UnaryOp::Paren,
                expr: Box::new(inner),
            },
        ))
    }

    /// A literal introduced by its type: `[]T{...}`, `map[K]V{...}`,
    /// `struct{...}{...}`, `[|]T{...}`. Without a body the type itself is the
    /// expression, as in `make([]int, 3)`.
    fn parse_typed_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.current_span();
        let ty = self.parse_literal_type()?;
        if self.at(TokenKind::LBrace) {
            return self.parse_literal_body(start, ty);
        }
        if matches!(ty, Type::Array { ellipsis: true, .. }) {
            return Err(ParseError::new(
                format!(
                    "expected '{{' after '[...]' array type, found {}",
                    self.describe_next()
                ),
                self.current_span(),
            ));
        }
        Ok(Expr::new(self.span_from(start), ExprKind::Type(ty)))
    }

    fn parse_literal_body(&mut self, start: Span, ty: Type) -> Result<Expr, ParseError> {
        if matches!(ty, Type::Table(_)) {
            return self.parse_table_body(start, ty);
        }

        let kind = LitKind::of(&ty);
        let elem = match &ty {
            Type::Array { elem, .. } | Type::Slice(elem) => Some(elem.as_ref().clone()),
            Type::Map { value, .. } => Some(value.as_ref().clone()),
            _ => None,
        };

        self.expect(TokenKind::LBrace)?;
        let (keys, values) = self.with_composites(true, |p| p.parse_elements(kind, elem.as_ref()))?;
        self.skip_semicolons_before(TokenKind::RBrace);
        self.expect(TokenKind::RBrace)?;
        let span = self.span_from(start);

        let ty = match ty {
            Type::Array {
                ellipsis: true,
                elem,
                ..
            } => Type::Array {
                len: ellipsis_len(&keys, values.len(), span)?,
                elem,
                ellipsis: true,
            },
            other => other,
        };

        let kind = match kind {
            LitKind::Composite => ExprKind::CompLit { ty, keys, values },
            LitKind::Array => ExprKind::ArrayLit { ty, keys, values },
            LitKind::Slice => ExprKind::SliceLit { ty, keys, values },
            LitKind::Map => ExprKind::MapLit { ty, keys, values },
        };
        Ok(Expr::new(span, kind))
    }

    /// Entries of a literal body, up to but excluding the closing brace.
    /// Returns `keys` empty for positional literals, otherwise parallel to
    /// `values`.
    fn parse_elements(
        &mut self,
        kind: LitKind,
        elem: Option<&Type>,
    ) -> Result<(Vec<Expr>, Vec<Expr>), ParseError> {
        let sparse = matches!(kind, LitKind::Array | LitKind::Slice)
            && self.config.has_feature(crate::FEATURE_SPARSE_LITERALS);

        let mut keys: Vec<Expr> = Vec::new();
        let mut values: Vec<Expr> = Vec::new();
        // Key for the next positional entry of a sparse literal.
        let mut next_key: Option<BigInt> = None;

        while !self.at(TokenKind::RBrace) {
            let start = self.current_span();
            let first = self.parse_element(elem)?;

            if self.eat(TokenKind::Colon).is_some() {
                let value = self.parse_element(elem)?;
                if keys.len() != values.len() {
                    if !sparse {
                        return Err(mixture_error(self.span_from(start)));
                    }
                    // Number the positional entries seen so far.
                    keys.extend((0..values.len()).map(|i| {
                        Expr::new(start, ExprKind::BasicLit(Literal::Int(BigInt::from(i))))
                    }));
                }
                next_key = int_key(&first).map(|k| k + 1u32);
                keys.push(first);
                values.push(value);
            } else if !keys.is_empty() {
                if !sparse {
                    return Err(mixture_error(first.span));
                }
                let Some(key) = next_key.take() else {
                    return Err(ParseError::new(
                        "positional element must follow an integer key",
                        first.span,
                    ));
                };
                next_key = Some(&key + 1u32);
                keys.push(Expr::new(first.span, ExprKind::BasicLit(Literal::Int(key))));
                values.push(first);
            } else {
                values.push(first);
            }

            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
            self.skip_semicolons_before(TokenKind::RBrace);
        }

        Ok((keys, values))
    }

    /// An element value. `{...}` with the type elided takes the literal's
    /// element type, as in `[][]int{{1}, {2}}`.
    fn parse_element(&mut self, elem: Option<&Type>) -> Result<Expr, ParseError> {
        match (self.peek_kind(), elem) {
            (Some(TokenKind::LBrace), Some(ty)) => {
                let start = self.current_span();
                self.parse_literal_body(start, ty.clone())
            }
            _ => self.parse_expr(),
        }
    }

    /// `[|]T{}` or `[|]T{{a, b}, {c, d}}`.
    fn parse_table_body(&mut self, start: Span, ty: Type) -> Result<Expr, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let rows = self.with_composites(true, |p| {
            let mut rows = Vec::new();
            while !p.at(TokenKind::RBrace) {
                p.expect(TokenKind::LBrace)?;
                let mut row = Vec::new();
                while !p.at(TokenKind::RBrace) {
                    row.push(p.parse_expr()?);
                    if p.eat(TokenKind::Comma).is_none() {
                        break;
                    }
                }
                p.skip_semicolons_before(TokenKind::RBrace);
                p.expect(TokenKind::RBrace)?;
                rows.push(row);
                if p.eat(TokenKind::Comma).is_none() {
                    break;
                }
                p.skip_semicolons_before(TokenKind::RBrace);
            }
            p.skip_semicolons_before(TokenKind::RBrace);
            Ok(rows)
        })?;
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::new(
            self.span_from(start),
            ExprKind::TableLit { ty, rows },
        ))
    }

    /// `func(...) ... { body }`, optionally named. Without a body this is a
    /// function type.
    fn parse_func_expr(&mut self) -> Result<Expr, ParseError> {
        let start = self.expect(TokenKind::KwFunc)?.span;
        let name = match self.peek_kind() {
            Some(TokenKind::Ident(_)) => Some(self.expect_ident()?.0),
            _ => None,
        };
        let sig = self.parse_signature()?;
        if name.is_none() && !self.at(TokenKind::LBrace) {
            return Ok(Expr::new(
                self.span_from(start),
                ExprKind::Type(Type::Func(sig.ty)),
            ));
        }
        let func = self.parse_func_body(start, sig, name, None, false)?;
        Ok(Expr::new(func.span, ExprKind::FuncLit(Box::new(func))))
    }

    pub(super) fn parse_func_body(
        &mut self,
        start: Span,
        sig: Signature,
        name: Option<String>,
        receiver_name: Option<String>,
        pointer_receiver: bool,
    ) -> Result<FuncLiteral, ParseError> {
        let body = self.parse_block()?;
        Ok(FuncLiteral {
            span: self.span_from(start),
            ty: sig.ty,
            param_names: sig.param_names,
            result_names: sig.result_names,
            name,
            receiver_name,
            pointer_receiver,
            body,
        })
    }
}

fn mixture_error(span: Span) -> ParseError {
    ParseError::new(
        "mixture of keyed and positional elements in composite literal",
        span,
    )
}

/// Length of a `[...]T` literal: the element count, or one past the largest
/// integer key.
fn ellipsis_len(keys: &[Expr], count: usize, span: Span) -> Result<u64, ParseError> {
    if keys.is_empty() {
        return Ok(count as u64);
    }
    let mut len = 0u64;
    for key in keys {
        let Some(n) = int_key(key).and_then(|n| u64::try_from(n).ok()) else {
            return Err(ParseError::new(
                "index of a '[...]' array literal must be a non-negative integer",
                span,
            ));
        };
        len = len.max(n.saturating_add(1));
    }
    Ok(len)
}
