#![forbid(unsafe_code)]

mod error;
mod fmt;
mod parser;

use gosh_ast::{Expr, Program, Stmt};
use gosh_lex::Lexer;
use miette::IntoDiagnostic;
use std::collections::BTreeSet;

pub use error::ParseError;
pub use fmt::{diff, format_expr, format_program, format_stmt, format_type};
pub use gosh_ast::{equal_block, equal_expr, equal_program, equal_stmt};
pub use parser::Parser;

/// Feature name enabling mixed keyed and positional entries in array and
/// slice literals.
pub const FEATURE_SPARSE_LITERALS: &str = "sparse-literals";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseConfig {
    /// Enabled unstable features (stringly-typed for forward compatibility).
    pub features: BTreeSet<String>,
}

impl ParseConfig {
    pub fn with_feature(mut self, name: impl Into<String>) -> Self {
        self.features.insert(name.into());
        self
    }

    pub fn has_feature(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.eq_ignore_ascii_case(name))
    }
}

/// Parse exactly one statement. A bare expression comes back as
/// `Stmt::Simple`.
pub fn parse_stmt(src: &str) -> miette::Result<Stmt> {
    parse_stmt_with_config(src, &ParseConfig::default())
}

pub fn parse_stmt_with_config(src: &str, config: &ParseConfig) -> miette::Result<Stmt> {
    let tokens = Lexer::new(src).lex().into_diagnostic()?;
    let mut parser = Parser::new_with_config(&tokens, config);
    parser.parse_stmt_eof().into_diagnostic()
}

/// Like [`parse_stmt`], over a byte buffer that must be valid UTF-8.
pub fn parse_stmt_bytes(src: &[u8]) -> miette::Result<Stmt> {
    let src = std::str::from_utf8(src).into_diagnostic()?;
    parse_stmt(src)
}

pub fn parse_expr(src: &str) -> miette::Result<Expr> {
    parse_expr_with_config(src, &ParseConfig::default())
}

pub fn parse_expr_with_config(src: &str, config: &ParseConfig) -> miette::Result<Expr> {
    let tokens = Lexer::new(src).lex().into_diagnostic()?;
    let mut parser = Parser::new_with_config(&tokens, config);
    parser.parse_expr_eof().into_diagnostic()
}

pub fn parse_source(src: &str) -> miette::Result<Program> {
    parse_source_with_config(src, &ParseConfig::default())
}

pub fn parse_source_with_config(src: &str, config: &ParseConfig) -> miette::Result<Program> {
    let tokens = Lexer::new(src).lex().into_diagnostic()?;
    let mut parser = Parser::new_with_config(&tokens, config);
    parser.parse_program().into_diagnostic()
}
