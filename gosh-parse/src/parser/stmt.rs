use gosh_ast::{
    join, synthetic_span, AssignStmt, BinOp, Block, BranchKind, BranchStmt, ConstDecl, ConstSet,
    DeferStmt, Expr, ExprKind, ForStmt, FuncLiteral, GoStmt, IfStmt, ImportSet, ImportStmt,
    LabeledStmt, Literal, MethodikDecl, Named, RangeStmt, ReturnStmt, SelectCase, SelectStmt,
    SendStmt, SimpleStmt, Span, Stmt, SwitchCase, SwitchStmt, Type, TypeDecl, TypeDeclSet,
    TypeSwitchCase, TypeSwitchStmt, VarDecl, VarSet,
};
use gosh_lex::{AssignOp, TokenKind};
use num_bigint::BigInt;

use super::Parser;
use crate::error::ParseError;

enum ForHeader {
    Range {
        key: Option<Expr>,
        val: Option<Expr>,
        decl: bool,
        expr: Expr,
    },
    Classic {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Box<Stmt>>,
    },
}

enum SwitchHeader {
    Expr {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
    },
    Type {
        init: Option<Box<Stmt>>,
        assign: Box<Stmt>,
    },
}

fn assign_binop(op: AssignOp) -> BinOp {
    match op {
        AssignOp::Add => BinOp::Add,
        AssignOp::Sub => BinOp::Sub,
        AssignOp::Mul => BinOp::Mul,
        AssignOp::Div => BinOp::Div,
        AssignOp::Rem => BinOp::Rem,
        AssignOp::And => BinOp::Ref,
        AssignOp::Or => BinOp::Pipe,
        AssignOp::Xor => BinOp::Pow,
        AssignOp::Shl => BinOp::Shl,
        AssignOp::Shr => BinOp::Shr,
        AssignOp::AndNot => BinOp::RefPow,
    }
}

/// `x.(type)` or `v := x.(type)`.
fn is_type_switch_guard(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Simple(s) => s.expr.is_type_switch_guard(),
        Stmt::Assign(a) => {
            a.decl && a.left.len() == 1 && a.right.len() == 1 && a.right[0].is_type_switch_guard()
        }
        _ => false,
    }
}

fn is_call(expr: &Expr) -> bool {
    matches!(expr.kind, ExprKind::Call { .. })
}

impl Parser<'_> {
    pub(super) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::KwVar) => self.parse_var(),
            Some(TokenKind::KwConst) => self.parse_const(),
            Some(TokenKind::KwType) => self.parse_type_decl(),
            Some(TokenKind::KwMethodik) => self.parse_methodik(),
            Some(TokenKind::KwImport) => self.parse_import(),
            Some(TokenKind::KwIf) => self.parse_if().map(Stmt::If),
            Some(TokenKind::KwFor) => self.parse_for(),
            Some(TokenKind::KwSwitch) => self.parse_switch(),
            Some(TokenKind::KwSelect) => self.parse_select(),
            Some(TokenKind::KwGo) => self.parse_go(),
            Some(TokenKind::KwDefer) => self.parse_defer(),
            Some(TokenKind::KwReturn) => self.parse_return(),
            Some(
                TokenKind::KwBreak
                | TokenKind::KwContinue
                | TokenKind::KwGoto
                | TokenKind::KwFallthrough,
            ) => self.parse_branch(),
            Some(TokenKind::LBrace) => self.parse_block().map(Stmt::Block),
            Some(TokenKind::Ident(_)) if matches!(self.peek_kind_n(1), Some(TokenKind::Colon)) => {
                self.parse_labeled()
            }
            _ => self.parse_simple_stmt(),
        }
    }

    /// Expression statements, assignments, sends, `x op= y` and `x++`.
    pub(super) fn parse_simple_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let left = self.parse_expr_list()?;
        self.parse_simple_stmt_from(start, left)
    }

    /// Finish a simple statement whose leading expression list, starting at
    /// `start`, has already been parsed.
    fn parse_simple_stmt_from(
        &mut self,
        start: Span,
        left: Vec<Expr>,
    ) -> Result<Stmt, ParseError> {
        match self.peek_kind() {
            Some(TokenKind::Define | TokenKind::Assign) => {
                let decl = self.at(TokenKind::Define);
                self.next();
                let right = self.parse_expr_list()?;
                Ok(Stmt::Assign(AssignStmt {
                    span: self.span_from(start),
                    decl,
                    left,
                    right,
                }))
            }
            Some(&TokenKind::OpAssign(op)) => {
                let target = self.single(left, start)?;
                self.next();
                let value = self.parse_expr()?;
                let span = self.span_from(start);
                let right = Expr::new(
                    span,
                    ExprKind::Binary {
                        op: assign_binop(op),
                        left: Box::new(target.clone()),
                        right: Box::new(value),
                    },
                );
                Ok(Stmt::Assign(AssignStmt {
                    span,
                    decl: false,
                    left: vec![target],
                    right: vec![right],
                }))
            }
            Some(TokenKind::Inc | TokenKind::Dec) => {
                let op = if self.at(TokenKind::Inc) {
                    BinOp::Add
                } else {
                    BinOp::Sub
                };
                let target = self.single(left, start)?;
                self.next();
                let span = self.span_from(start);
                let one = Expr::new(
                    synthetic_span(),
                    ExprKind::BasicLit(Literal::Int(BigInt::from(1))),
                );
                let right = Expr::new(
                    span,
                    ExprKind::Binary {
                        op,
                        left: Box::new(target.clone()),
                        right: Box::new(one),
                    },
                );
                Ok(Stmt::Assign(AssignStmt {
                    span,
                    decl: false,
                    left: vec![target],
                    right: vec![right],
                }))
            }
            Some(TokenKind::Arrow) => {
                let chan = self.single(left, start)?;
                self.next();
                let value = self.parse_expr()?;
                Ok(Stmt::Send(SendStmt {
                    span: self.span_from(start),
                    chan,
                    value,
                }))
            }
            _ => {
                let expr = self.single(left, start)?;
                Ok(Stmt::Simple(SimpleStmt {
                    span: expr.span,
                    expr,
                }))
            }
        }
    }

    fn single(&self, mut exprs: Vec<Expr>, start: Span) -> Result<Expr, ParseError> {
        match exprs.len() {
            1 => Ok(exprs.remove(0)),
            _ => Err(ParseError::new(
                format!(
                    "expected 1 expression, found {}; {} cannot follow a list",
                    exprs.len(),
                    self.describe_next()
                ),
                self.span_from(start),
            )),
        }
    }

    pub(super) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(TokenKind::LBrace)?.span;
        let stmts = self.nested(|p| {
            p.with_composites(true, |p| {
                let mut stmts = Vec::new();
                loop {
                    p.skip_semicolons();
                    if p.at(TokenKind::RBrace) {
                        break;
                    }
                    stmts.push(p.parse_stmt()?);
                    p.expect_stmt_terminator()?;
                }
                Ok(stmts)
            })
        })?;
        self.expect(TokenKind::RBrace)?;
        Ok(Block {
            span: self.span_from(open),
            stmts,
        })
    }

    fn parse_labeled(&mut self) -> Result<Stmt, ParseError> {
        let (label, start) = self.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        self.skip_semicolons();
        let stmt = self.parse_stmt()?;
        Ok(Stmt::Labeled(LabeledStmt {
            span: self.span_from(start),
            label,
            stmt: Box::new(stmt),
        }))
    }

    fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        let start = self.expect(TokenKind::KwIf)?.span;
        let (init, cond) = self.with_composites(false, |p| {
            let first = p.parse_simple_stmt()?;
            if p.eat(TokenKind::Semicolon).is_some() {
                let cond = p.parse_expr()?;
                return Ok((Some(Box::new(first)), cond));
            }
            match first {
                Stmt::Simple(s) => Ok((None, s.expr)),
                other => Err(ParseError::new(
                    "expected condition in if statement",
                    other.span(),
                )),
            }
        })?;
        let body = self.parse_block()?;

        let else_ = if self.eat(TokenKind::KwElse).is_some() {
            let stmt = if self.at(TokenKind::KwIf) {
                Stmt::If(self.parse_if()?)
            } else {
                Stmt::Block(self.parse_block()?)
            };
            Some(Box::new(stmt))
        } else {
            None
        };

        Ok(IfStmt {
            span: self.span_from(start),
            init,
            cond,
            body,
            else_,
        })
    }

    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwFor)?.span;
        let header = if self.at(TokenKind::LBrace) {
            ForHeader::Classic {
                init: None,
                cond: None,
                post: None,
            }
        } else {
            self.with_composites(false, |p| p.parse_for_header())?
        };
        let body = self.parse_block()?;
        let span = self.span_from(start);

        Ok(match header {
            ForHeader::Range {
                key,
                val,
                decl,
                expr,
            } => Stmt::Range(RangeStmt {
                span,
                key,
                val,
                decl,
                expr,
                body,
            }),
            ForHeader::Classic { init, cond, post } => Stmt::For(ForStmt {
                span,
                init,
                cond,
                post,
                body,
            }),
        })
    }

    fn parse_for_header(&mut self) -> Result<ForHeader, ParseError> {
        if self.eat(TokenKind::KwRange).is_some() {
            return Ok(ForHeader::Range {
                key: None,
                val: None,
                decl: false,
                expr: self.parse_expr()?,
            });
        }
        let init = if self.at(TokenKind::Semicolon) {
            None
        } else {
            let start = self.current_span();
            let left = self.parse_expr_list()?;
            if matches!(self.peek_kind(), Some(TokenKind::Define | TokenKind::Assign))
                && matches!(self.peek_kind_n(1), Some(TokenKind::KwRange))
            {
                return self.parse_range_clause(start, left);
            }
            Some(self.parse_simple_stmt_from(start, left)?)
        };

        if self.eat(TokenKind::Semicolon).is_none() {
            // `for cond {}`
            return match init {
                Some(Stmt::Simple(s)) => Ok(ForHeader::Classic {
                    init: None,
                    cond: Some(s.expr),
                    post: None,
                }),
                _ => Err(ParseError::new(
                    format!("expected for loop condition, found {}", self.describe_next()),
                    self.current_span(),
                )),
            };
        }

        let cond = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let post = if self.at(TokenKind::LBrace) {
            None
        } else {
            Some(Box::new(self.parse_simple_stmt()?))
        };

        Ok(ForHeader::Classic {
            init: init.map(Box::new),
            cond,
            post,
        })
    }

    /// The rest of `k, v := range x` or `k = range x`, positioned on the
    /// assignment operator.
    fn parse_range_clause(
        &mut self,
        start: Span,
        left: Vec<Expr>,
    ) -> Result<ForHeader, ParseError> {
        let decl = self.at(TokenKind::Define);
        self.next();
        self.expect(TokenKind::KwRange)?;
        if left.len() > 2 {
            return Err(ParseError::new(
                "range clause permits at most two iteration variables",
                self.span_from(start),
            ));
        }
        let mut left = left.into_iter();
        let key = left.next();
        let val = left.next();
        let expr = self.parse_expr()?;
        Ok(ForHeader::Range {
            key,
            val,
            decl,
            expr,
        })
    }

    fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwSwitch)?.span;

        match self.with_composites(false, |p| p.parse_switch_header())? {
            SwitchHeader::Type { init, assign } => {
                let cases = self
                    .parse_cases(|p| {
                        let mut types = vec![p.parse_type()?];
                        while p.eat(TokenKind::Comma).is_some() {
                            types.push(p.parse_type()?);
                        }
                        Ok(types)
                    })?
                    .into_iter()
                    .map(|(types, body)| TypeSwitchCase {
                        default: types.is_none(),
                        types: types.unwrap_or_default(),
                        body,
                    })
                    .collect();
                Ok(Stmt::TypeSwitch(TypeSwitchStmt {
                    span: self.span_from(start),
                    init,
                    assign,
                    cases,
                }))
            }
            SwitchHeader::Expr { init, cond } => {
                let cases = self
                    .parse_cases(|p| p.parse_expr_list())?
                    .into_iter()
                    .map(|(conds, body)| SwitchCase {
                        default: conds.is_none(),
                        conds: conds.unwrap_or_default(),
                        body,
                    })
                    .collect();
                Ok(Stmt::Switch(SwitchStmt {
                    span: self.span_from(start),
                    init,
                    cond,
                    cases,
                }))
            }
        }
    }

    /// `[init;] [tag]`. The tag is read as a simple statement once and is a
    /// type switch guard exactly when it has the shape `[v :=] x.(type)`.
    fn parse_switch_header(&mut self) -> Result<SwitchHeader, ParseError> {
        if self.at(TokenKind::LBrace) {
            return Ok(SwitchHeader::Expr {
                init: None,
                cond: None,
            });
        }
        let first = if self.at(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_simple_stmt()?)
        };
        let (init, tag) = if self.eat(TokenKind::Semicolon).is_some() {
            let tag = if self.at(TokenKind::LBrace) {
                None
            } else {
                Some(self.parse_simple_stmt()?)
            };
            (first.map(Box::new), tag)
        } else {
            (None, first)
        };

        match tag {
            None => Ok(SwitchHeader::Expr { init, cond: None }),
            Some(guard) if is_type_switch_guard(&guard) => Ok(SwitchHeader::Type {
                init,
                assign: Box::new(guard),
            }),
            Some(Stmt::Simple(s)) => Ok(SwitchHeader::Expr {
                init,
                cond: Some(s.expr),
            }),
            Some(other) => Err(ParseError::new("expected switch expression", other.span())),
        }
    }

    /// `{ case H: body ... default: body }`. `head` parses what follows
    /// `case`; the head is `None` for `default`.
    fn parse_cases<H>(
        &mut self,
        mut head: impl FnMut(&mut Self) -> Result<H, ParseError>,
    ) -> Result<Vec<(Option<H>, Block)>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut cases = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RBrace).is_some() {
                break;
            }
            let tok = self.expect_any()?;
            let h = match tok.kind {
                TokenKind::KwCase => Some(self.with_composites(true, &mut head)?),
                TokenKind::KwDefault => None,
                other => {
                    return Err(ParseError::new(
                        format!("expected 'case' or 'default', found {other}"),
                        tok.span,
                    ));
                }
            };
            self.expect(TokenKind::Colon)?;
            cases.push((h, self.parse_case_body()?));
        }
        Ok(cases)
    }

    fn parse_case_body(&mut self) -> Result<Block, ParseError> {
        let start = self.current_span();
        let stmts = self.with_composites(true, |p| {
            let mut stmts = Vec::new();
            loop {
                p.skip_semicolons();
                if matches!(
                    p.peek_kind(),
                    Some(TokenKind::KwCase | TokenKind::KwDefault | TokenKind::RBrace) | None
                ) {
                    break;
                }
                stmts.push(p.parse_stmt()?);
                p.expect_stmt_terminator()?;
            }
            Ok(stmts)
        })?;
        Ok(Block {
            span: self.span_from(start),
            stmts,
        })
    }

    fn parse_select(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwSelect)?.span;
        let cases = self
            .parse_cases(|p| p.parse_simple_stmt())?
            .into_iter()
            .map(|(stmt, body)| SelectCase {
                default: stmt.is_none(),
                stmt: stmt.map(Box::new),
                body,
            })
            .collect();
        Ok(Stmt::Select(SelectStmt {
            span: self.span_from(start),
            cases,
        }))
    }

    fn parse_go(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwGo)?.span;
        let call = self.parse_expr()?;
        if !is_call(&call) {
            return Err(ParseError::new(
                "expression in go must be function call",
                call.span,
            ));
        }
        Ok(Stmt::Go(GoStmt {
            span: self.span_from(start),
            call,
        }))
    }

    fn parse_defer(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwDefer)?.span;
        let expr = self.parse_expr()?;
        if !is_call(&expr) {
            return Err(ParseError::new(
                "expression in defer must be function call",
                expr.span,
            ));
        }
        Ok(Stmt::Defer(DeferStmt {
            span: self.span_from(start),
            expr,
        }))
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwReturn)?.span;
        let exprs = if matches!(
            self.peek_kind(),
            Some(TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof) | None
        ) {
            Vec::new()
        } else {
            self.parse_expr_list()?
        };
        Ok(Stmt::Return(ReturnStmt {
            span: self.span_from(start),
            exprs,
        }))
    }

    fn parse_branch(&mut self) -> Result<Stmt, ParseError> {
        let tok = self.expect_any()?;
        let kind = match tok.kind {
            TokenKind::KwBreak => BranchKind::Break,
            TokenKind::KwContinue => BranchKind::Continue,
            TokenKind::KwGoto => BranchKind::Goto,
            TokenKind::KwFallthrough => BranchKind::Fallthrough,
            other => {
                return Err(ParseError::new(
                    format!("expected branch statement, found {other}"),
                    tok.span,
                ));
            }
        };
        let label = match (kind, self.peek_kind()) {
            (BranchKind::Fallthrough, _) => None,
            (_, Some(TokenKind::Ident(_))) => Some(self.expect_ident()?.0),
            (BranchKind::Goto, _) => {
                return Err(ParseError::new(
                    format!("expected label after goto, found {}", self.describe_next()),
                    self.current_span(),
                ));
            }
            _ => None,
        };
        Ok(Stmt::Branch(BranchStmt {
            span: self.span_from(tok.span),
            kind,
            label,
        }))
    }

    /// `( spec; spec; ... )` after `var`, `const`, `type` or `import`.
    fn parse_group<T>(
        &mut self,
        mut spec: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut out = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RParen).is_some() {
                break;
            }
            out.push(spec(self)?);
            if !self.at(TokenKind::RParen) {
                self.expect(TokenKind::Semicolon)?;
            }
        }
        Ok(out)
    }

    fn parse_ident_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_ident()?.0];
        while self.eat(TokenKind::Comma).is_some() {
            names.push(self.expect_ident()?.0);
        }
        Ok(names)
    }

    /// `names [T] [= values]`, shared by `var` and `const`.
    fn parse_value_spec(
        &mut self,
    ) -> Result<(Span, Vec<String>, Option<Type>, Vec<Expr>), ParseError> {
        let start = self.current_span();
        let names = self.parse_ident_list()?;
        let ty = if self.at_type_start() || self.at(TokenKind::LParen) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let values = if self.eat(TokenKind::Assign).is_some() {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };
        Ok((self.span_from(start), names, ty, values))
    }

    fn parse_var_spec(&mut self) -> Result<VarDecl, ParseError> {
        let (span, names, ty, values) = self.parse_value_spec()?;
        if ty.is_none() && values.is_empty() {
            return Err(ParseError::new(
                "variable declaration needs a type or an initial value",
                span,
            ));
        }
        Ok(VarDecl {
            span,
            names,
            ty,
            values,
        })
    }

    fn parse_var(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwVar)?.span;
        if self.at(TokenKind::LParen) {
            let vars = self.parse_group(|p| p.parse_var_spec())?;
            return Ok(Stmt::VarSet(VarSet {
                span: self.span_from(start),
                vars,
            }));
        }
        let mut var = self.parse_var_spec()?;
        var.span = self.span_from(start);
        Ok(Stmt::Var(var))
    }

    /// Inside a group a constant may omit its value and repeat the previous
    /// one; standing alone it may not.
    fn parse_const_spec(&mut self, grouped: bool) -> Result<ConstDecl, ParseError> {
        let (span, names, ty, values) = self.parse_value_spec()?;
        if values.is_empty() && (!grouped || ty.is_some()) {
            return Err(ParseError::new("missing constant value", span));
        }
        Ok(ConstDecl {
            span,
            names,
            ty,
            values,
        })
    }

    fn parse_const(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwConst)?.span;
        if self.at(TokenKind::LParen) {
            let consts = self.parse_group(|p| p.parse_const_spec(true))?;
            return Ok(Stmt::ConstSet(ConstSet {
                span: self.span_from(start),
                consts,
            }));
        }
        let mut decl = self.parse_const_spec(false)?;
        decl.span = self.span_from(start);
        Ok(Stmt::Const(decl))
    }

    fn parse_type_spec(&mut self) -> Result<TypeDecl, ParseError> {
        let (name, start) = self.expect_ident()?;
        let ty = self.parse_type()?;
        Ok(TypeDecl {
            span: self.span_from(start),
            name: name.clone(),
            ty: Type::Named(Named {
                name,
                ty: Box::new(ty),
                method_names: Vec::new(),
                methods: Vec::new(),
            }),
        })
    }

    fn parse_type_decl(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwType)?.span;
        if self.at(TokenKind::LParen) {
            let decls = self.parse_group(|p| p.parse_type_spec())?;
            return Ok(Stmt::TypeDeclSet(TypeDeclSet {
                span: self.span_from(start),
                decls,
            }));
        }
        let mut decl = self.parse_type_spec()?;
        decl.span = self.span_from(start);
        Ok(Stmt::TypeDecl(decl))
    }

    /// `methodik Name T { func (r) m(...) ... { ... } ... }`
    fn parse_methodik(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwMethodik)?.span;
        let (name, _) = self.expect_ident()?;
        let underlying = self.parse_type()?;
        let pointer_type = matches!(underlying, Type::Pointer(_));

        self.expect(TokenKind::LBrace)?;
        let mut methods = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RBrace).is_some() {
                break;
            }
            methods.push(self.parse_method(pointer_type)?);
            self.expect_stmt_terminator()?;
        }

        let named = Named {
            name: name.clone(),
            ty: Box::new(underlying),
            method_names: methods
                .iter()
                .map(|m| m.name.clone().unwrap_or_default())
                .collect(),
            methods: methods.iter().map(|m| m.ty.clone()).collect(),
        };
        Ok(Stmt::Methodik(MethodikDecl {
            span: self.span_from(start),
            name,
            ty: Type::Named(named),
            methods,
        }))
    }

    /// `func (r) name(...)` or `func (*r) name(...)`.
    fn parse_method(&mut self, pointer_type: bool) -> Result<FuncLiteral, ParseError> {
        let start = self.expect(TokenKind::KwFunc)?.span;
        self.expect(TokenKind::LParen)?;
        let pointer = self.eat(TokenKind::Star).is_some();
        let (receiver, _) = self.expect_ident()?;
        self.expect(TokenKind::RParen)?;
        let (name, _) = self.expect_ident()?;
        let sig = self.parse_signature()?;
        self.parse_func_body(start, sig, Some(name), Some(receiver), pointer || pointer_type)
    }

    fn parse_import_spec(&mut self) -> Result<ImportStmt, ParseError> {
        let start = self.current_span();
        let name = match self.peek_kind() {
            Some(TokenKind::Ident(_)) => Some(self.expect_ident()?.0),
            Some(TokenKind::Dot) => {
                self.next();
                Some(".".to_string())
            }
            _ => None,
        };
        let tok = self.expect_any()?;
        let TokenKind::String { value: path, .. } = tok.kind else {
            return Err(ParseError::new(
                format!("expected import path, found {}", tok.kind),
                tok.span,
            ));
        };
        Ok(ImportStmt {
            span: join(start, tok.span),
            name,
            path,
        })
    }

    fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        let start = self.expect(TokenKind::KwImport)?.span;
        if self.at(TokenKind::LParen) {
            let imports = self.parse_group(|p| p.parse_import_spec())?;
            return Ok(Stmt::ImportSet(ImportSet {
                span: self.span_from(start),
                imports,
            }));
        }
        let mut import = self.parse_import_spec()?;
        import.span = self.span_from(start);
        Ok(Stmt::Import(import))
    }
}
