//! Structural equality that ignores source positions.
//!
//! Every variant is matched explicitly so that adding a node forces a
//! decision here. Types and shell nodes carry no spans and compare with `==`.

use crate::{
    Block, Expr, ExprKind, FuncLiteral, Program, Stmt, SwitchCase, TypeSwitchCase, SelectCase,
    ConstDecl, VarDecl, TypeDecl, ImportStmt,
};

pub fn equal_expr(a: &Expr, b: &Expr) -> bool {
    use ExprKind as K;
    match (&a.kind, &b.kind) {
        (K::Ident(x), K::Ident(y)) => x == y,
        (K::BasicLit(x), K::BasicLit(y)) => x == y,
        (
            K::Binary { op: o1, left: l1, right: r1 },
            K::Binary { op: o2, left: l2, right: r2 },
        ) => o1 == o2 && equal_expr(l1, l2) && equal_expr(r1, r2),
        (K::Unary { op: o1, expr: e1 }, K::Unary { op: o2, expr: e2 }) => {
            o1 == o2 && equal_expr(e1, e2)
        }
        (
            K::Call { func: f1, args: a1, ellipsis: s1 },
            K::Call { func: f2, args: a2, ellipsis: s2 },
        ) => s1 == s2 && equal_expr(f1, f2) && equal_exprs(a1, a2),
        (K::Selector { left: l1, right: r1 }, K::Selector { left: l2, right: r2 }) => {
            r1 == r2 && equal_expr(l1, l2)
        }
        (K::Index { left: l1, indices: i1 }, K::Index { left: l2, indices: i2 }) => {
            equal_expr(l1, l2) && equal_exprs(i1, i2)
        }
        (K::Slice { low: lo1, high: hi1 }, K::Slice { low: lo2, high: hi2 }) => {
            equal_opt_box(lo1, lo2) && equal_opt_box(hi1, hi2)
        }
        (
            K::CompLit { ty: t1, keys: k1, values: v1 },
            K::CompLit { ty: t2, keys: k2, values: v2 },
        )
        | (
            K::ArrayLit { ty: t1, keys: k1, values: v1 },
            K::ArrayLit { ty: t2, keys: k2, values: v2 },
        )
        | (
            K::SliceLit { ty: t1, keys: k1, values: v1 },
            K::SliceLit { ty: t2, keys: k2, values: v2 },
        )
        | (
            K::MapLit { ty: t1, keys: k1, values: v1 },
            K::MapLit { ty: t2, keys: k2, values: v2 },
        ) => t1 == t2 && equal_exprs(k1, k2) && equal_exprs(v1, v2),
        (K::TableLit { ty: t1, rows: r1 }, K::TableLit { ty: t2, rows: r2 }) => {
            t1 == t2
                && r1.len() == r2.len()
                && r1.iter().zip(r2).all(|(x, y)| equal_exprs(x, y))
        }
        (K::FuncLit(f1), K::FuncLit(f2)) => equal_func_literal(f1, f2),
        (K::TypeAssert { left: l1, ty: t1 }, K::TypeAssert { left: l2, ty: t2 }) => {
            t1 == t2 && equal_expr(l1, l2)
        }
        (K::Shell(s1), K::Shell(s2)) => s1 == s2,
        (K::Type(t1), K::Type(t2)) => t1 == t2,
        (
            K::Ident(_)
            | K::BasicLit(_)
            | K::Binary { .. }
            | K::Unary { .. }
            | K::Call { .. }
            | K::Selector { .. }
            | K::Index { .. }
            | K::Slice { .. }
            | K::CompLit { .. }
            | K::ArrayLit { .. }
            | K::SliceLit { .. }
            | K::MapLit { .. }
            | K::TableLit { .. }
            | K::FuncLit(_)
            | K::TypeAssert { .. }
            | K::Shell(_)
            | K::Type(_),
            _,
        ) => false,
    }
}

pub fn equal_stmt(a: &Stmt, b: &Stmt) -> bool {
    match (a, b) {
        (Stmt::Simple(x), Stmt::Simple(y)) => equal_expr(&x.expr, &y.expr),
        (Stmt::Assign(x), Stmt::Assign(y)) => {
            x.decl == y.decl && equal_exprs(&x.left, &y.left) && equal_exprs(&x.right, &y.right)
        }
        (Stmt::Block(x), Stmt::Block(y)) => equal_block(x, y),
        (Stmt::If(x), Stmt::If(y)) => {
            equal_opt_stmt(&x.init, &y.init)
                && equal_expr(&x.cond, &y.cond)
                && equal_block(&x.body, &y.body)
                && equal_opt_stmt(&x.else_, &y.else_)
        }
        (Stmt::For(x), Stmt::For(y)) => {
            equal_opt_stmt(&x.init, &y.init)
                && equal_opt(&x.cond, &y.cond)
                && equal_opt_stmt(&x.post, &y.post)
                && equal_block(&x.body, &y.body)
        }
        (Stmt::Range(x), Stmt::Range(y)) => {
            x.decl == y.decl
                && equal_opt(&x.key, &y.key)
                && equal_opt(&x.val, &y.val)
                && equal_expr(&x.expr, &y.expr)
                && equal_block(&x.body, &y.body)
        }
        (Stmt::Return(x), Stmt::Return(y)) => equal_exprs(&x.exprs, &y.exprs),
        (Stmt::Defer(x), Stmt::Defer(y)) => equal_expr(&x.expr, &y.expr),
        (Stmt::Go(x), Stmt::Go(y)) => equal_expr(&x.call, &y.call),
        (Stmt::Send(x), Stmt::Send(y)) => {
            equal_expr(&x.chan, &y.chan) && equal_expr(&x.value, &y.value)
        }
        (Stmt::Switch(x), Stmt::Switch(y)) => {
            equal_opt_stmt(&x.init, &y.init)
                && equal_opt(&x.cond, &y.cond)
                && equal_slices(&x.cases, &y.cases, equal_switch_case)
        }
        (Stmt::TypeSwitch(x), Stmt::TypeSwitch(y)) => {
            equal_opt_stmt(&x.init, &y.init)
                && equal_stmt(&x.assign, &y.assign)
                && equal_slices(&x.cases, &y.cases, equal_type_switch_case)
        }
        (Stmt::Select(x), Stmt::Select(y)) => {
            equal_slices(&x.cases, &y.cases, equal_select_case)
        }
        (Stmt::Branch(x), Stmt::Branch(y)) => x.kind == y.kind && x.label == y.label,
        (Stmt::Labeled(x), Stmt::Labeled(y)) => {
            x.label == y.label && equal_stmt(&x.stmt, &y.stmt)
        }
        (Stmt::Var(x), Stmt::Var(y)) => equal_var(x, y),
        (Stmt::VarSet(x), Stmt::VarSet(y)) => equal_slices(&x.vars, &y.vars, equal_var),
        (Stmt::Const(x), Stmt::Const(y)) => equal_const(x, y),
        (Stmt::ConstSet(x), Stmt::ConstSet(y)) => {
            equal_slices(&x.consts, &y.consts, equal_const)
        }
        (Stmt::TypeDecl(x), Stmt::TypeDecl(y)) => equal_type_decl(x, y),
        (Stmt::TypeDeclSet(x), Stmt::TypeDeclSet(y)) => {
            equal_slices(&x.decls, &y.decls, equal_type_decl)
        }
        (Stmt::Methodik(x), Stmt::Methodik(y)) => {
            x.name == y.name
                && x.ty == y.ty
                && equal_slices(&x.methods, &y.methods, equal_func_literal)
        }
        (Stmt::Import(x), Stmt::Import(y)) => equal_import(x, y),
        (Stmt::ImportSet(x), Stmt::ImportSet(y)) => {
            equal_slices(&x.imports, &y.imports, equal_import)
        }
        (
            Stmt::Simple(_)
            | Stmt::Assign(_)
            | Stmt::Block(_)
            | Stmt::If(_)
            | Stmt::For(_)
            | Stmt::Range(_)
            | Stmt::Return(_)
            | Stmt::Defer(_)
            | Stmt::Go(_)
            | Stmt::Send(_)
            | Stmt::Switch(_)
            | Stmt::TypeSwitch(_)
            | Stmt::Select(_)
            | Stmt::Branch(_)
            | Stmt::Labeled(_)
            | Stmt::Var(_)
            | Stmt::VarSet(_)
            | Stmt::Const(_)
            | Stmt::ConstSet(_)
            | Stmt::TypeDecl(_)
            | Stmt::TypeDeclSet(_)
            | Stmt::Methodik(_)
            | Stmt::Import(_)
            | Stmt::ImportSet(_),
            _,
        ) => false,
    }
}

pub fn equal_block(a: &Block, b: &Block) -> bool {
    equal_slices(&a.stmts, &b.stmts, equal_stmt)
}

pub fn equal_program(a: &Program, b: &Program) -> bool {
    equal_slices(&a.stmts, &b.stmts, equal_stmt)
}

fn equal_func_literal(a: &FuncLiteral, b: &FuncLiteral) -> bool {
    a.ty == b.ty
        && a.param_names == b.param_names
        && a.result_names == b.result_names
        && a.name == b.name
        && a.receiver_name == b.receiver_name
        && a.pointer_receiver == b.pointer_receiver
        && equal_block(&a.body, &b.body)
}

fn equal_switch_case(a: &SwitchCase, b: &SwitchCase) -> bool {
    a.default == b.default && equal_exprs(&a.conds, &b.conds) && equal_block(&a.body, &b.body)
}

fn equal_type_switch_case(a: &TypeSwitchCase, b: &TypeSwitchCase) -> bool {
    a.default == b.default && a.types == b.types && equal_block(&a.body, &b.body)
}

fn equal_select_case(a: &SelectCase, b: &SelectCase) -> bool {
    a.default == b.default && equal_opt_stmt(&a.stmt, &b.stmt) && equal_block(&a.body, &b.body)
}

fn equal_var(a: &VarDecl, b: &VarDecl) -> bool {
    a.names == b.names && a.ty == b.ty && equal_exprs(&a.values, &b.values)
}

fn equal_const(a: &ConstDecl, b: &ConstDecl) -> bool {
    a.names == b.names && a.ty == b.ty && equal_exprs(&a.values, &b.values)
}

fn equal_type_decl(a: &TypeDecl, b: &TypeDecl) -> bool {
    a.name == b.name && a.ty == b.ty
}

fn equal_import(a: &ImportStmt, b: &ImportStmt) -> bool {
    a.name == b.name && a.path == b.path
}

fn equal_exprs(a: &[Expr], b: &[Expr]) -> bool {
    equal_slices(a, b, equal_expr)
}

fn equal_slices<T>(a: &[T], b: &[T], eq: impl Fn(&T, &T) -> bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| eq(x, y))
}

fn equal_opt(a: &Option<Expr>, b: &Option<Expr>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => equal_expr(x, y),
        (None, None) => true,
        _ => false,
    }
}

fn equal_opt_box(a: &Option<Box<Expr>>, b: &Option<Box<Expr>>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => equal_expr(x, y),
        (None, None) => true,
        _ => false,
    }
}

fn equal_opt_stmt(a: &Option<Box<Stmt>>, b: &Option<Box<Stmt>>) -> bool {
    match (a, b) {
        (Some(x), Some(y)) => equal_stmt(x, y),
        (None, None) => true,
        _ => false,
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        equal_expr(self, other)
    }
}

impl PartialEq for Stmt {
    fn eq(&self, other: &Self) -> bool {
        equal_stmt(self, other)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        equal_block(self, other)
    }
}

impl PartialEq for FuncLiteral {
    fn eq(&self, other: &Self) -> bool {
        equal_func_literal(self, other)
    }
}
