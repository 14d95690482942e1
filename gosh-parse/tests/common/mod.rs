#![allow(dead_code)]

//! Builders for expected trees and assertions that render a readable diff
//! when a parse does not match.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use gosh_ast::{
    AndOrSep, AssignStmt, BinOp, Block, Expr, ExprKind, FuncLiteral, FuncType, Literal,
    ReturnStmt, Shell, ShellAndOr, ShellCmd, ShellList, ShellPipeline, ShellSimpleCmd,
    SimpleStmt, Stmt, Tuple, Type, UnaryOp,
};
use gosh_ast::synthetic_span;
use gosh_parse::{diff, equal_expr, equal_stmt, format_expr, format_stmt, parse_stmt};

pub fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

pub fn int(n: i64) -> Expr {
    Expr::int(n)
}

pub fn float(text: &str) -> Expr {
    let value = BigDecimal::from_str(text).expect("valid decimal");
    Expr::synthetic(ExprKind::BasicLit(Literal::Float(value)))
}

pub fn string(s: &str) -> Expr {
    Expr::string(s)
}

pub fn bin(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

pub fn unary(op: UnaryOp, expr: Expr) -> Expr {
    Expr::unary(op, expr)
}

pub fn paren(expr: Expr) -> Expr {
    Expr::unary(UnaryOp::Paren, expr)
}

pub fn call(func: Expr, args: Vec<Expr>) -> Expr {
    Expr::synthetic(ExprKind::Call {
        func: Box::new(func),
        args,
        ellipsis: false,
    })
}

pub fn sel(left: Expr, right: &str) -> Expr {
    Expr::synthetic(ExprKind::Selector {
        left: Box::new(left),
        right: right.to_string(),
    })
}

pub fn index(left: Expr, indices: Vec<Expr>) -> Expr {
    Expr::synthetic(ExprKind::Index {
        left: Box::new(left),
        indices,
    })
}

pub fn slice(low: Option<Expr>, high: Option<Expr>) -> Expr {
    Expr::synthetic(ExprKind::Slice {
        low: low.map(Box::new),
        high: high.map(Box::new),
    })
}

pub fn ty(name: &str) -> Type {
    Type::unresolved(name)
}

pub fn tuple(elems: Vec<Type>) -> Tuple {
    Tuple::new(elems)
}

/// `func(params) results` with a parameter list always present.
pub fn func_type(params: Vec<Type>, results: Option<Vec<Type>>) -> FuncType {
    FuncType {
        params: Some(Tuple::new(params)),
        results: results.map(Tuple::new),
        variadic: false,
    }
}

pub fn func_lit(ty: FuncType, body: Vec<Stmt>) -> FuncLiteral {
    FuncLiteral {
        span: synthetic_span(),
        ty,
        param_names: Vec::new(),
        result_names: Vec::new(),
        name: None,
        receiver_name: None,
        pointer_receiver: false,
        body: block(body),
    }
}

pub fn func_expr(func: FuncLiteral) -> Expr {
    Expr::synthetic(ExprKind::FuncLit(Box::new(func)))
}

pub fn block(stmts: Vec<Stmt>) -> Block {
    Block {
        span: synthetic_span(),
        stmts,
    }
}

pub fn simple(expr: Expr) -> Stmt {
    Stmt::Simple(SimpleStmt {
        span: synthetic_span(),
        expr,
    })
}

pub fn assign(decl: bool, left: Vec<Expr>, right: Vec<Expr>) -> Stmt {
    Stmt::Assign(AssignStmt {
        span: synthetic_span(),
        decl,
        left,
        right,
    })
}

pub fn ret(exprs: Vec<Expr>) -> Stmt {
    Stmt::Return(ReturnStmt {
        span: synthetic_span(),
        exprs,
    })
}

pub fn shell(lists: Vec<ShellList>, trap_out: bool) -> Shell {
    Shell {
        cmds: lists,
        trap_out,
    }
}

/// A list of and-or elements, each a single pipeline.
pub fn list(and_or: Vec<ShellAndOr>) -> ShellList {
    ShellList { and_or }
}

pub fn and_or(pipeline: Vec<ShellPipeline>, sep: Vec<AndOrSep>) -> ShellAndOr {
    ShellAndOr {
        pipeline,
        sep,
        background: false,
    }
}

pub fn background(mut and_or: ShellAndOr) -> ShellAndOr {
    and_or.background = true;
    and_or
}

pub fn pipeline(cmd: Vec<ShellCmd>) -> ShellPipeline {
    ShellPipeline { bang: false, cmd }
}

pub fn cmd(args: &[&str]) -> ShellCmd {
    ShellCmd::Simple(ShellSimpleCmd::args(args.iter().copied()))
}

/// One and-or element holding one pipeline holding `cmd`.
pub fn single(cmd: ShellCmd) -> ShellAndOr {
    and_or(vec![pipeline(vec![cmd])], Vec::new())
}

/// `$$ args $$` as a single simple command.
pub fn simple_shell(args: &[&str]) -> Shell {
    shell(vec![list(vec![single(cmd(args))])], true)
}

pub fn parse_ok(src: &str) -> Stmt {
    match parse_stmt(src) {
        Ok(stmt) => stmt,
        Err(err) => panic!("parse_stmt({src:?}) failed: {err:?}"),
    }
}

pub fn assert_stmt(src: &str, want: &Stmt) {
    let got = parse_ok(src);
    if !equal_stmt(&got, want) {
        panic!(
            "parse_stmt({src:?}) mismatch:\n{}\nwant: {want:#?}\ngot: {got:#?}",
            diff(&format_stmt(want), &format_stmt(&got)),
        );
    }
}

/// Parse `src` as a statement and compare the expression it holds.
pub fn assert_expr(src: &str, want: &Expr) {
    let got = match parse_ok(src) {
        Stmt::Simple(s) => s.expr,
        other => panic!("parse_stmt({src:?}) gave a non-expression statement: {other:#?}"),
    };
    if !equal_expr(&got, want) {
        panic!(
            "parse_stmt({src:?}) mismatch:\n{}\nwant: {want:#?}\ngot: {got:#?}",
            diff(&format_expr(want), &format_expr(&got)),
        );
    }
}

/// Parse `($$ src $$)` and compare the captured shell.
pub fn assert_shell(src: &str, want: &Shell) {
    let input = format!("($$ {src} $$)");
    let got = match parse_ok(&input) {
        Stmt::Simple(SimpleStmt {
            expr:
                Expr {
                    kind: ExprKind::Unary {
                        op: UnaryOp::Paren,
                        expr,
                    },
                    ..
                },
            ..
        }) => match expr.kind {
            ExprKind::Shell(shell) => shell,
            other => panic!("{input:?}: expected a shell inside the parentheses, got {other:#?}"),
        },
        other => panic!("{input:?}: expected a parenthesised shell, got {other:#?}"),
    };
    assert_eq!(&got, want, "shell {src:?}");
}

pub fn assert_parse_error(src: &str, substr: &str) {
    let err = parse_stmt(src).expect_err("expected parse error");
    let msg = err.to_string();
    assert!(
        msg.contains(substr),
        "parse_stmt({src:?}): error {msg:?} does not contain {substr:?}"
    );
}

/// Run `f` on a thread with a roomy stack, so deeply nested inputs measure
/// the parser's own limits rather than the test harness's default stack.
pub fn on_large_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(f)
        .expect("spawn test thread")
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}
