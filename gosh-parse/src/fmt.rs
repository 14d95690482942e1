#![forbid(unsafe_code)]

use gosh_ast::{
    AndOrSep, Block, ChanDir, Expr, ExprKind, FuncLiteral, FuncType, Literal, Program, Shell,
    ShellAndOr, ShellCmd, ShellList, ShellPipeline, Stmt, Type, UnaryOp,
};
use similar::{ChangeTag, TextDiff};

const INDENT: &str = "    ";

/// Binding strength of unary operators and of postfix/primary expressions,
/// above every binary level.
const PREC_UNARY: u8 = 7;
const PREC_PRIMARY: u8 = 8;

pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    for stmt in &program.stmts {
        fmt_stmt(&mut out, 0, stmt);
    }
    out
}

pub fn format_stmt(stmt: &Stmt) -> String {
    let mut out = String::new();
    fmt_stmt(&mut out, 0, stmt);
    out
}

pub fn format_expr(expr: &Expr) -> String {
    let mut out = String::new();
    fmt_expr(&mut out, 0, expr, 0);
    out
}

pub fn format_type(ty: &Type) -> String {
    let mut out = String::new();
    fmt_type(&mut out, ty);
    out
}

/// Unified line diff from `want` to `got`; empty when they are equal.
pub fn diff(want: &str, got: &str) -> String {
    if want == got {
        return String::new();
    }
    let diff = TextDiff::from_lines(want, got);
    let mut output = String::new();
    output.push_str("--- want\n+++ got\n");
    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        output.push_str(&format!("{}\n", hunk.header()));
        for change in hunk.iter_changes() {
            let sign = match change.tag() {
                ChangeTag::Delete => "-",
                ChangeTag::Insert => "+",
                ChangeTag::Equal => " ",
            };
            output.push_str(sign);
            output.push_str(change.value());
            if !change.value().ends_with('\n') {
                output.push('\n');
            }
        }
    }
    output
}

fn fmt_stmt(out: &mut String, indent: usize, stmt: &Stmt) {
    indent_line(out, indent);
    fmt_stmt_inline(out, indent, stmt);
    out.push('\n');
}

/// A statement without leading indentation or trailing newline, as it
/// appears in `if`/`for`/`switch` headers.
fn fmt_stmt_inline(out: &mut String, indent: usize, stmt: &Stmt) {
    match stmt {
        Stmt::Simple(s) => fmt_expr(out, indent, &s.expr, 0),
        Stmt::Assign(s) => {
            fmt_exprs(out, indent, &s.left);
            out.push_str(if s.decl { " := " } else { " = " });
            fmt_exprs(out, indent, &s.right);
        }
        Stmt::Block(b) => fmt_block(out, indent, b),
        Stmt::If(s) => {
            out.push_str("if ");
            if let Some(init) = &s.init {
                fmt_stmt_inline(out, indent, init);
                out.push_str("; ");
            }
            fmt_expr(out, indent, &s.cond, 0);
            out.push(' ');
            fmt_block(out, indent, &s.body);
            if let Some(else_) = &s.else_ {
                out.push_str(" else ");
                fmt_stmt_inline(out, indent, else_);
            }
        }
        Stmt::For(s) => {
            out.push_str("for ");
            match (&s.init, &s.cond, &s.post) {
                (None, None, None) => {}
                (None, Some(cond), None) => {
                    fmt_expr(out, indent, cond, 0);
                    out.push(' ');
                }
                (init, cond, post) => {
                    if let Some(init) = init {
                        fmt_stmt_inline(out, indent, init);
                    }
                    out.push_str("; ");
                    if let Some(cond) = cond {
                        fmt_expr(out, indent, cond, 0);
                    }
                    out.push_str("; ");
                    if let Some(post) = post {
                        fmt_stmt_inline(out, indent, post);
                        out.push(' ');
                    }
                }
            }
            fmt_block(out, indent, &s.body);
        }
        Stmt::Range(s) => {
            out.push_str("for ");
            if let Some(key) = &s.key {
                fmt_expr(out, indent, key, 0);
                if let Some(val) = &s.val {
                    out.push_str(", ");
                    fmt_expr(out, indent, val, 0);
                }
                out.push_str(if s.decl { " := " } else { " = " });
            }
            out.push_str("range ");
            fmt_expr(out, indent, &s.expr, 0);
            out.push(' ');
            fmt_block(out, indent, &s.body);
        }
        Stmt::Return(s) => {
            out.push_str("return");
            if !s.exprs.is_empty() {
                out.push(' ');
                fmt_exprs(out, indent, &s.exprs);
            }
        }
        Stmt::Defer(s) => {
            out.push_str("defer ");
            fmt_expr(out, indent, &s.expr, 0);
        }
        Stmt::Go(s) => {
            out.push_str("go ");
            fmt_expr(out, indent, &s.call, 0);
        }
        Stmt::Send(s) => {
            fmt_expr(out, indent, &s.chan, 0);
            out.push_str(" <- ");
            fmt_expr(out, indent, &s.value, 0);
        }
        Stmt::Switch(s) => {
            out.push_str("switch ");
            if let Some(init) = &s.init {
                fmt_stmt_inline(out, indent, init);
                out.push_str("; ");
            }
            if let Some(cond) = &s.cond {
                fmt_expr(out, indent, cond, 0);
                out.push(' ');
            }
            out.push_str("{\n");
            for case in &s.cases {
                indent_line(out, indent);
                if case.default {
                    out.push_str("default:\n");
                } else {
                    out.push_str("case ");
                    fmt_exprs(out, indent, &case.conds);
                    out.push_str(":\n");
                }
                fmt_stmts(out, indent + 1, &case.body);
            }
            indent_line(out, indent);
            out.push('}');
        }
        Stmt::TypeSwitch(s) => {
            out.push_str("switch ");
            if let Some(init) = &s.init {
                fmt_stmt_inline(out, indent, init);
                out.push_str("; ");
            }
            fmt_stmt_inline(out, indent, &s.assign);
            out.push_str(" {\n");
            for case in &s.cases {
                indent_line(out, indent);
                if case.default {
                    out.push_str("default:\n");
                } else {
                    out.push_str("case ");
                    for (i, ty) in case.types.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        fmt_type(out, ty);
                    }
                    out.push_str(":\n");
                }
                fmt_stmts(out, indent + 1, &case.body);
            }
            indent_line(out, indent);
            out.push('}');
        }
        Stmt::Select(s) => {
            out.push_str("select {\n");
            for case in &s.cases {
                indent_line(out, indent);
                match &case.stmt {
                    Some(stmt) => {
                        out.push_str("case ");
                        fmt_stmt_inline(out, indent, stmt);
                        out.push_str(":\n");
                    }
                    None => out.push_str("default:\n"),
                }
                fmt_stmts(out, indent + 1, &case.body);
            }
            indent_line(out, indent);
            out.push('}');
        }
        Stmt::Branch(s) => {
            out.push_str(s.kind.keyword());
            if let Some(label) = &s.label {
                out.push(' ');
                out.push_str(label);
            }
        }
        Stmt::Labeled(s) => {
            out.push_str(&s.label);
            out.push_str(":\n");
            indent_line(out, indent);
            fmt_stmt_inline(out, indent, &s.stmt);
        }
        Stmt::Var(v) => {
            out.push_str("var ");
            fmt_value_spec(out, indent, &v.names, v.ty.as_ref(), &v.values);
        }
        Stmt::VarSet(set) => {
            out.push_str("var (\n");
            for v in &set.vars {
                indent_line(out, indent + 1);
                fmt_value_spec(out, indent + 1, &v.names, v.ty.as_ref(), &v.values);
                out.push('\n');
            }
            indent_line(out, indent);
            out.push(')');
        }
        Stmt::Const(c) => {
            out.push_str("const ");
            fmt_value_spec(out, indent, &c.names, c.ty.as_ref(), &c.values);
        }
        Stmt::ConstSet(set) => {
            out.push_str("const (\n");
            for c in &set.consts {
                indent_line(out, indent + 1);
                fmt_value_spec(out, indent + 1, &c.names, c.ty.as_ref(), &c.values);
                out.push('\n');
            }
            indent_line(out, indent);
            out.push(')');
        }
        Stmt::TypeDecl(d) => {
            out.push_str("type ");
            fmt_type_spec(out, &d.name, &d.ty);
        }
        Stmt::TypeDeclSet(set) => {
            out.push_str("type (\n");
            for d in &set.decls {
                indent_line(out, indent + 1);
                fmt_type_spec(out, &d.name, &d.ty);
                out.push('\n');
            }
            indent_line(out, indent);
            out.push(')');
        }
        Stmt::Methodik(m) => {
            out.push_str("methodik ");
            fmt_type_spec(out, &m.name, &m.ty);
            out.push_str(" {\n");
            for method in &m.methods {
                indent_line(out, indent + 1);
                fmt_func(out, indent + 1, method);
                out.push('\n');
            }
            indent_line(out, indent);
            out.push('}');
        }
        Stmt::Import(i) => {
            out.push_str("import ");
            fmt_import_spec(out, i.name.as_deref(), &i.path);
        }
        Stmt::ImportSet(set) => {
            out.push_str("import (\n");
            for i in &set.imports {
                indent_line(out, indent + 1);
                fmt_import_spec(out, i.name.as_deref(), &i.path);
                out.push('\n');
            }
            indent_line(out, indent);
            out.push(')');
        }
    }
}

fn fmt_value_spec(
    out: &mut String,
    indent: usize,
    names: &[String],
    ty: Option<&Type>,
    values: &[Expr],
) {
    out.push_str(&names.join(", "));
    if let Some(ty) = ty {
        out.push(' ');
        fmt_type(out, ty);
    }
    if !values.is_empty() {
        out.push_str(" = ");
        fmt_exprs(out, indent, values);
    }
}

/// `Name T`, where a declared type is written through its underlying type.
fn fmt_type_spec(out: &mut String, name: &str, ty: &Type) {
    out.push_str(name);
    out.push(' ');
    match ty {
        Type::Named(named) => fmt_type(out, &named.ty),
        other => fmt_type(out, other),
    }
}

fn fmt_import_spec(out: &mut String, name: Option<&str>, path: &str) {
    if let Some(name) = name {
        out.push_str(name);
        out.push(' ');
    }
    fmt_string_lit(out, path);
}

fn fmt_block(out: &mut String, indent: usize, block: &Block) {
    if block.stmts.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    fmt_stmts(out, indent + 1, block);
    indent_line(out, indent);
    out.push('}');
}

fn fmt_stmts(out: &mut String, indent: usize, block: &Block) {
    for stmt in &block.stmts {
        fmt_stmt(out, indent, stmt);
    }
}

fn fmt_exprs(out: &mut String, indent: usize, exprs: &[Expr]) {
    for (i, e) in exprs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        fmt_expr(out, indent, e, 0);
    }
}

fn expr_prec(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::Binary { op, .. } => op.precedence(),
        ExprKind::Unary { op, .. } if *op != UnaryOp::Paren => PREC_UNARY,
        _ => PREC_PRIMARY,
    }
}

/// Parentheses are only added when the tree could not be read back
/// otherwise; parsed trees carry their own `Paren` nodes.
fn fmt_expr(out: &mut String, indent: usize, expr: &Expr, min_prec: u8) {
    let parens = expr_prec(expr) < min_prec;
    if parens {
        out.push('(');
    }
    fmt_expr_bare(out, indent, expr);
    if parens {
        out.push(')');
    }
}

fn fmt_expr_bare(out: &mut String, indent: usize, expr: &Expr) {
    match &expr.kind {
        ExprKind::Ident(name) => out.push_str(name),
        ExprKind::BasicLit(lit) => fmt_literal(out, lit),
        ExprKind::Binary { op, left, right } => {
            let prec = op.precedence();
            fmt_expr(out, indent, left, prec);
            out.push(' ');
            out.push_str(op.symbol());
            out.push(' ');
            fmt_expr(out, indent, right, prec + 1);
        }
        ExprKind::Unary {
            op: UnaryOp::Paren,
            expr: inner,
        } => {
            out.push('(');
            fmt_expr(out, indent, inner, 0);
            out.push(')');
        }
        ExprKind::Unary { op, expr: inner } => {
            let symbol = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Pos => "+",
                UnaryOp::Not => "!",
                UnaryOp::Addr => "&",
                UnaryOp::Deref => "*",
                UnaryOp::Recv => "<-",
                UnaryOp::Paren => "",
            };
            out.push_str(symbol);
            let mut operand = String::new();
            fmt_expr(&mut operand, indent, inner, PREC_UNARY);
            // `- -x` must not become `--x`.
            if symbol.chars().last().is_some_and(|c| operand.starts_with(c)) {
                out.push(' ');
            }
            out.push_str(&operand);
        }
        ExprKind::Call {
            func,
            args,
            ellipsis,
        } => {
            fmt_expr(out, indent, func, PREC_PRIMARY);
            out.push('(');
            fmt_exprs(out, indent, args);
            if *ellipsis {
                out.push_str("...");
            }
            out.push(')');
        }
        ExprKind::Selector { left, right } => {
            fmt_expr(out, indent, left, PREC_PRIMARY);
            out.push('.');
            out.push_str(right);
        }
        ExprKind::Index { left, indices } => {
            fmt_expr(out, indent, left, PREC_PRIMARY);
            out.push('[');
            fmt_exprs(out, indent, indices);
            out.push(']');
        }
        ExprKind::Slice { low, high } => {
            if let Some(low) = low {
                fmt_expr(out, indent, low, 0);
            }
            out.push(':');
            if let Some(high) = high {
                fmt_expr(out, indent, high, 0);
            }
        }
        ExprKind::CompLit { ty, keys, values }
        | ExprKind::ArrayLit { ty, keys, values }
        | ExprKind::SliceLit { ty, keys, values }
        | ExprKind::MapLit { ty, keys, values } => {
            fmt_type(out, ty);
            out.push('{');
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if let Some(key) = keys.get(i) {
                    fmt_expr(out, indent, key, 0);
                    out.push_str(": ");
                }
                fmt_expr(out, indent, value, 0);
            }
            out.push('}');
        }
        ExprKind::TableLit { ty, rows } => {
            fmt_type(out, ty);
            out.push('{');
            for (i, row) in rows.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push('{');
                fmt_exprs(out, indent, row);
                out.push('}');
            }
            out.push('}');
        }
        ExprKind::FuncLit(func) => fmt_func(out, indent, func),
        ExprKind::TypeAssert { left, ty } => {
            fmt_expr(out, indent, left, PREC_PRIMARY);
            out.push_str(".(");
            match ty {
                Some(ty) => fmt_type(out, ty),
                None => out.push_str("type"),
            }
            out.push(')');
        }
        ExprKind::Shell(shell) => fmt_shell(out, shell),
        ExprKind::Type(ty) => fmt_type(out, ty),
    }
}

fn fmt_literal(out: &mut String, lit: &Literal) {
    match lit {
        Literal::Int(n) => out.push_str(&n.to_string()),
        Literal::Float(x) => {
            let s = x.to_string();
            out.push_str(&s);
            // Keep the literal a float when read back.
            if !s.contains(['.', 'e', 'E']) {
                out.push_str(".0");
            }
        }
        Literal::String(s) => fmt_string_lit(out, s),
    }
}

fn fmt_string_lit(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            other if other.is_control() => {
                let cp = other as u32;
                out.push_str(&format!("\\u{{{:x}}}", cp));
            }
            other => out.push(other),
        }
    }
    out.push('"');
}

/// `func [(r)] [name](params) results { body }`
fn fmt_func(out: &mut String, indent: usize, func: &FuncLiteral) {
    out.push_str("func");
    if let Some(receiver) = &func.receiver_name {
        out.push_str(" (");
        if func.pointer_receiver {
            out.push('*');
        }
        out.push_str(receiver);
        out.push(')');
    }
    if let Some(name) = &func.name {
        out.push(' ');
        out.push_str(name);
    }
    fmt_signature(out, &func.ty, &func.param_names, &func.result_names);
    out.push(' ');
    fmt_block(out, indent, &func.body);
}

fn fmt_signature(out: &mut String, ty: &FuncType, param_names: &[String], result_names: &[String]) {
    let params = ty.params.as_ref().map(|t| t.elems.as_slice()).unwrap_or_default();
    fmt_param_list(out, params, param_names, ty.variadic);
    let Some(results) = &ty.results else { return };
    out.push(' ');
    if result_names.is_empty() && results.elems.len() == 1 {
        fmt_type(out, &results.elems[0]);
    } else {
        fmt_param_list(out, &results.elems, result_names, false);
    }
}

fn fmt_param_list(out: &mut String, elems: &[Type], names: &[String], variadic: bool) {
    out.push('(');
    for (i, ty) in elems.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if let Some(name) = names.get(i) {
            out.push_str(name);
            out.push(' ');
        }
        match ty {
            Type::Slice(elem) if variadic && i + 1 == elems.len() => {
                out.push_str("...");
                fmt_type(out, elem);
            }
            other => fmt_type(out, other),
        }
    }
    out.push(')');
}

fn fmt_type(out: &mut String, ty: &Type) {
    match ty {
        Type::Unresolved { package, name } => {
            if let Some(package) = package {
                out.push_str(package);
                out.push('.');
            }
            out.push_str(name);
        }
        Type::Named(named) => out.push_str(&named.name),
        Type::Struct(fields) => {
            if fields.is_empty() {
                out.push_str("struct{}");
                return;
            }
            out.push_str("struct{");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                if !field.embedded {
                    out.push_str(&field.name);
                    out.push(' ');
                }
                fmt_type(out, &field.ty);
                if let Some(tag) = &field.tag {
                    out.push(' ');
                    if tag.contains('`') {
                        out.push('"');
                        out.push_str(tag);
                        out.push('"');
                    } else {
                        out.push('`');
                        out.push_str(tag);
                        out.push('`');
                    }
                }
            }
            out.push('}');
        }
        Type::Array { len, elem, ellipsis } => {
            if *ellipsis {
                out.push_str("[...]");
            } else {
                out.push_str(&format!("[{len}]"));
            }
            fmt_type(out, elem);
        }
        Type::Slice(elem) => {
            out.push_str("[]");
            fmt_type(out, elem);
        }
        Type::Map { key, value } => {
            out.push_str("map[");
            fmt_type(out, key);
            out.push(']');
            fmt_type(out, value);
        }
        Type::Chan { dir, elem } => {
            out.push_str(match dir {
                ChanDir::Both => "chan ",
                ChanDir::Send => "chan<- ",
                ChanDir::Recv => "<-chan ",
            });
            fmt_type(out, elem);
        }
        Type::Pointer(elem) => {
            out.push('*');
            fmt_type(out, elem);
        }
        Type::Func(f) => {
            out.push_str("func");
            fmt_signature(out, f, &[], &[]);
        }
        Type::Tuple(t) => fmt_param_list(out, &t.elems, &[], false),
        Type::Table(elem) => {
            out.push_str("[|]");
            fmt_type(out, elem);
        }
        Type::Interface(methods) => {
            if methods.is_empty() {
                out.push_str("interface{}");
                return;
            }
            out.push_str("interface{");
            for (i, m) in methods.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                out.push_str(&m.name);
                fmt_signature(out, &m.ty, &[], &[]);
            }
            out.push('}');
        }
    }
}

fn fmt_shell(out: &mut String, shell: &Shell) {
    out.push_str("$$");
    for (i, list) in shell.cmds.iter().enumerate() {
        out.push(if i == 0 { ' ' } else { '\n' });
        fmt_shell_list(out, list);
    }
    out.push_str(" $$");
}

fn fmt_shell_list(out: &mut String, list: &ShellList) {
    for (i, and_or) in list.and_or.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        fmt_shell_and_or(out, and_or);
        if and_or.background {
            out.push_str(" &");
        } else if i + 1 < list.and_or.len() {
            out.push(';');
        }
    }
}

fn fmt_shell_and_or(out: &mut String, and_or: &ShellAndOr) {
    for (i, pipeline) in and_or.pipeline.iter().enumerate() {
        if i > 0 {
            out.push_str(match and_or.sep.get(i - 1) {
                Some(AndOrSep::Or) => " || ",
                _ => " && ",
            });
        }
        fmt_shell_pipeline(out, pipeline);
    }
}

fn fmt_shell_pipeline(out: &mut String, pipeline: &ShellPipeline) {
    if pipeline.bang {
        out.push_str("! ");
    }
    for (i, cmd) in pipeline.cmd.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        match cmd {
            ShellCmd::Subshell(list) => {
                out.push('(');
                fmt_shell_list(out, list);
                out.push(')');
            }
            ShellCmd::Simple(simple) => {
                let mut words: Vec<String> = simple
                    .assign
                    .iter()
                    .map(|a| format!("{}={}", a.key, a.value))
                    .collect();
                words.extend(simple.args.iter().cloned());
                words.extend(simple.redirect.iter().map(|r| {
                    let number = r.number.map(|n| n.to_string()).unwrap_or_default();
                    format!("{number}{}{}", r.token.symbol(), r.filename)
                }));
                out.push_str(&words.join(" "));
            }
        }
    }
}

fn indent_line(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_idempotent(src: &str) {
        let program = crate::parse_source(src).unwrap();
        let formatted1 = format_program(&program);
        let program2 = crate::parse_source(&formatted1).unwrap();
        let formatted2 = format_program(&program2);
        assert_eq!(formatted1, formatted2, "{}", diff(&formatted1, &formatted2));
        assert!(gosh_ast::equal_program(&program, &program2));
    }

    #[test]
    fn fmt_roundtrip_basic() {
        is_idempotent("import \"fmt\"\nx := 1 + 2 * 3\nfmt.Println(\"hi\\n\", x)\n");
    }

    #[test]
    fn fmt_roundtrip_control_flow() {
        is_idempotent(
            "for i := 0; i < 10; i++ {\n\tif i % 2 == 0 {\n\t\tcontinue\n\t} else if i > 7 {\n\t\tbreak\n\t}\n}\n\
             switch x := f(); x {\ncase 1, 2:\n\tg()\ndefault:\n}\n",
        );
    }

    #[test]
    fn fmt_roundtrip_declarations() {
        is_idempotent(
            "type T struct {\n\tX int `json:\"x\"`\n\t*S\n}\n\
             methodik P *struct{ x integer } {\n\tfunc (a) f(x integer) (r integer) { return a.x + x }\n}\n\
             var (\n\ta = []int{1, 2}\n\tb map[string]int\n)\n",
        );
    }

    #[test]
    fn fmt_roundtrip_shell() {
        is_idempotent("$$ echo a && echo b | wc -l > out; (cd /tmp; ls 2>&1) &\nls $$\n");
    }

    #[test]
    fn unary_operators_do_not_fuse() {
        let e = crate::parse_expr("- -x").unwrap();
        assert_eq!(format_expr(&e), "- -x");
        let e = crate::parse_expr("&(&x)").unwrap();
        assert_eq!(format_expr(&e), "&(&x)");
    }

    #[test]
    fn synthesised_trees_get_parentheses() {
        let stmt = crate::parse_stmt("x *= y + 1").unwrap();
        assert_eq!(format_stmt(&stmt), "x = x * (y + 1)\n");
    }

    #[test]
    fn types_print_as_written() {
        for src in ["map[string][]*pkg.T", "chan<- [3]int", "<-chan struct{}", "[|]float64"] {
            let stmt = crate::parse_stmt(&format!("var v {src}")).unwrap();
            let Stmt::Var(var) = stmt else {
                panic!("expected var, got {stmt:?}");
            };
            assert_eq!(format_type(var.ty.as_ref().unwrap()), src);
        }
    }

    #[test]
    fn diff_is_empty_for_equal_text() {
        assert!(diff("a\nb\n", "a\nb\n").is_empty());
        let d = diff("a\nb\n", "a\nc\n");
        assert!(d.contains("-b"));
        assert!(d.contains("+c"));
    }
}
