#![forbid(unsafe_code)]

mod equal;
mod expr;
mod shell;
mod stmt;
mod types;

use miette::SourceSpan;

pub use equal::{equal_block, equal_expr, equal_program, equal_stmt};
pub use expr::{BinOp, Expr, ExprKind, FuncLiteral, Literal, UnaryOp};
pub use shell::{
    AndOrSep, RedirectOp, Shell, ShellAndOr, ShellAssign, ShellCmd, ShellList, ShellPipeline,
    ShellRedirect, ShellSimpleCmd,
};
pub use stmt::{
    AssignStmt, Block, BranchKind, BranchStmt, ConstDecl, ConstSet, DeferStmt, ForStmt, GoStmt,
    IfStmt, ImportSet, ImportStmt, LabeledStmt, MethodikDecl, RangeStmt, ReturnStmt, SelectCase,
    SelectStmt, SendStmt, SimpleStmt, Stmt, SwitchCase, SwitchStmt, TypeDecl, TypeDeclSet,
    TypeSwitchCase, TypeSwitchStmt, VarDecl, VarSet,
};
pub use types::{ChanDir, FuncType, InterfaceMethod, Named, StructField, Tuple, Type};

pub type Span = SourceSpan;

pub fn span(start: usize, len: usize) -> Span {
    SourceSpan::new(start.into(), len)
}

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    span(start, end - start)
}

/// Smallest span covering both `a` and `b`.
pub fn join(a: Span, b: Span) -> Span {
    let a0: usize = a.offset();
    let b0: usize = b.offset();
    let start = a0.min(b0);
    let end = (a0 + a.len()).max(b0 + b.len());
    span_between(start, end)
}

/// Zero-width span used for nodes that have no source text of their own,
/// such as the `x + 1` synthesised for `x++`.
pub fn synthetic_span() -> Span {
    span(0, 0)
}

/// A parsed compilation unit: the statements of one source buffer.
#[derive(Clone, Debug)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}
