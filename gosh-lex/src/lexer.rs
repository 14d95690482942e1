#![forbid(unsafe_code)]
#![allow(unused_assignments)]

use std::str::FromStr;

use bigdecimal::BigDecimal;
use gosh_ast::{span_between, Span};
use logos::Logos;
use miette::Diagnostic;
use num_bigint::BigInt;
use thiserror::Error;

use crate::token::{AssignOp, Token, TokenKind};

#[derive(Debug, Error, Diagnostic)]
#[error("lex error: {message}")]
#[diagnostic(code(gosh::lex))]
#[allow(unused_assignments)]
pub struct LexError {
    pub message: String,
    #[label]
    pub span: Span,
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum RawToken {
    #[token("break")]
    KwBreak,
    #[token("case")]
    KwCase,
    #[token("chan")]
    KwChan,
    #[token("const")]
    KwConst,
    #[token("continue")]
    KwContinue,
    #[token("default")]
    KwDefault,
    #[token("defer")]
    KwDefer,
    #[token("else")]
    KwElse,
    #[token("fallthrough")]
    KwFallthrough,
    #[token("for")]
    KwFor,
    #[token("func")]
    KwFunc,
    #[token("go")]
    KwGo,
    #[token("goto")]
    KwGoto,
    #[token("if")]
    KwIf,
    #[token("import")]
    KwImport,
    #[token("interface")]
    KwInterface,
    #[token("map")]
    KwMap,
    #[token("methodik")]
    KwMethodik,
    #[token("range")]
    KwRange,
    #[token("return")]
    KwReturn,
    #[token("select")]
    KwSelect,
    #[token("struct")]
    KwStruct,
    #[token("switch")]
    KwSwitch,
    #[token("type")]
    KwType,
    #[token("var")]
    KwVar,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("&^")]
    AmpCaret,

    #[token("+=", |_| AssignOp::Add)]
    #[token("-=", |_| AssignOp::Sub)]
    #[token("*=", |_| AssignOp::Mul)]
    #[token("/=", |_| AssignOp::Div)]
    #[token("%=", |_| AssignOp::Rem)]
    #[token("&=", |_| AssignOp::And)]
    #[token("|=", |_| AssignOp::Or)]
    #[token("^=", |_| AssignOp::Xor)]
    #[token("<<=", |_| AssignOp::Shl)]
    #[token(">>=", |_| AssignOp::Shr)]
    #[token("&^=", |_| AssignOp::AndNot)]
    OpAssign(AssignOp),

    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("<-")]
    Arrow,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,

    #[token("==")]
    EqEq,
    #[token("!=")]
    Neq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    Le,
    #[token(">=")]
    Ge,
    #[token("!")]
    Bang,

    #[token("=")]
    Assign,
    #[token(":=")]
    Define,
    #[token("...")]
    Ellipsis,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[|]")]
    TableBracket,

    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,

    #[token("$$")]
    ShellOpen,

    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,
    // Carries whether the comment spans a line break.
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", |lex| lex.slice().contains('\n'))]
    BlockComment(bool),
    #[token("/*")]
    UnterminatedComment,

    #[regex(r"0[bB][01_]+", |lex| parse_int_prefixed(lex.slice(), 2))]
    #[regex(r"0[oO][0-7_]+", |lex| parse_int_prefixed(lex.slice(), 8))]
    #[regex(r"0[xX][0-9a-fA-F_]+", |lex| parse_int_prefixed(lex.slice(), 16))]
    #[regex(r"[0-9][0-9_]*", |lex| parse_int_decimal(lex.slice()))]
    Int(Option<BigInt>),

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?", |lex| parse_decimal(lex.slice()))]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", |lex| parse_decimal(lex.slice()))]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", |lex| parse_decimal(lex.slice()))]
    Float(Option<BigDecimal>),

    // Interpreted strings: "..." with escapes. The raw text is kept for struct tags.
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    String(Option<(String, String)>),
    #[regex(r#""([^"\\\n]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"`[^`]*`", |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    RawString(String),
    #[regex(r"`[^`]*")]
    UnterminatedRawString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

/// Tokens inside a `$$ ... $$` escape. Words keep their quoting verbatim.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
enum ShellToken {
    #[token("$$")]
    Close,
    #[token("\n")]
    Newline,
    #[token("\\\n")]
    LineContinuation,

    #[token("|")]
    Pipe,
    #[token("||")]
    OrOr,
    #[token("&&")]
    AndAnd,
    #[token("&")]
    Amp,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token(">>")]
    GreaterGreater,
    #[token("<&")]
    LessAnd,
    #[token(">&")]
    GreaterAnd,
    #[token("&>")]
    AndGreater,

    #[regex(
        r#"([^ \t\r\n\f|&;<>()"'\\$]|\\[^\n]|"([^"\\]|\\.)*"|'[^']*'|\$\{[^}\n]*\}|\$[A-Za-z0-9_?@#*!-])+"#,
        |lex| lex.slice().to_string()
    )]
    Word(String),
}

fn parse_int_decimal(s: &str) -> Option<BigInt> {
    let digits = strip_underscores(s)?;
    BigInt::parse_bytes(digits.as_bytes(), 10)
}

/// A single `_` may follow the radix prefix, as in `0x_FF`.
fn parse_int_prefixed(s: &str, radix: u32) -> Option<BigInt> {
    let rest = s.get(2..)?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);
    let digits = strip_underscores(rest)?;
    BigInt::parse_bytes(digits.as_bytes(), radix)
}

fn parse_decimal(s: &str) -> Option<BigDecimal> {
    if s.contains("__") || s.ends_with('_') {
        return None;
    }
    BigDecimal::from_str(&s.replace('_', "")).ok()
}

fn strip_underscores(s: &str) -> Option<String> {
    if s.is_empty() {
        return None;
    }
    if s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return None;
    }
    Some(s.replace('_', ""))
}

fn parse_string(lex: &mut logos::Lexer<RawToken>) -> Option<(String, String)> {
    let s = lex.slice();
    let inner = &s[1..s.len().saturating_sub(1)];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        let Some(esc) = chars.next() else {
            return None;
        };

        match esc {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '0' => out.push('\0'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            'x' => {
                let hex: String = [chars.next()?, chars.next()?].iter().collect();
                let b = u8::from_str_radix(&hex, 16).ok()?;
                out.push(char::from(b));
            }
            'u' => {
                // Expect: \u{HEX}
                if chars.next() != Some('{') {
                    return None;
                }
                let mut hex = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch == '}' {
                        break;
                    }
                    hex.push(ch);
                    chars.next();
                    if hex.len() > 6 {
                        return None;
                    }
                }
                if chars.next() != Some('}') {
                    return None;
                }
                if hex.is_empty() {
                    return None;
                }
                let cp = u32::from_str_radix(&hex, 16).ok()?;
                let ch = char::from_u32(cp)?;
                out.push(ch);
            }
            _ => return None,
        }
    }

    Some((out, inner.to_string()))
}

/// Whether a line break after `kind` terminates the statement.
fn ends_statement(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Ident(_)
            | TokenKind::Int(_)
            | TokenKind::Float(_)
            | TokenKind::String { .. }
            | TokenKind::KwBreak
            | TokenKind::KwContinue
            | TokenKind::KwFallthrough
            | TokenKind::KwReturn
            | TokenKind::Inc
            | TokenKind::Dec
            | TokenKind::RParen
            | TokenKind::RBracket
            | TokenKind::RBrace
            | TokenKind::ShellClose
    )
}

#[derive(Default)]
struct TokenSink {
    tokens: Vec<Token>,
}

impl TokenSink {
    fn push(&mut self, kind: TokenKind, span: Span) {
        self.tokens.push(Token { kind, span });
    }

    fn line_break(&mut self, span: Span) {
        if self.tokens.last().is_some_and(|t| ends_statement(&t.kind)) {
            self.push(TokenKind::Semicolon, span);
        }
    }
}

pub struct Lexer<'a> {
    src: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src }
    }

    pub fn lex(&self) -> Result<Vec<Token>, LexError> {
        let mut sink = TokenSink::default();
        let mut lex = RawToken::lexer(self.src);

        loop {
            let Some(raw) = lex.next() else { break };
            let range = lex.span();
            let span = span_between(range.start, range.end);

            let kind = match raw {
                Ok(RawToken::KwBreak) => TokenKind::KwBreak,
                Ok(RawToken::KwCase) => TokenKind::KwCase,
                Ok(RawToken::KwChan) => TokenKind::KwChan,
                Ok(RawToken::KwConst) => TokenKind::KwConst,
                Ok(RawToken::KwContinue) => TokenKind::KwContinue,
                Ok(RawToken::KwDefault) => TokenKind::KwDefault,
                Ok(RawToken::KwDefer) => TokenKind::KwDefer,
                Ok(RawToken::KwElse) => TokenKind::KwElse,
                Ok(RawToken::KwFallthrough) => TokenKind::KwFallthrough,
                Ok(RawToken::KwFor) => TokenKind::KwFor,
                Ok(RawToken::KwFunc) => TokenKind::KwFunc,
                Ok(RawToken::KwGo) => TokenKind::KwGo,
                Ok(RawToken::KwGoto) => TokenKind::KwGoto,
                Ok(RawToken::KwIf) => TokenKind::KwIf,
                Ok(RawToken::KwImport) => TokenKind::KwImport,
                Ok(RawToken::KwInterface) => TokenKind::KwInterface,
                Ok(RawToken::KwMap) => TokenKind::KwMap,
                Ok(RawToken::KwMethodik) => TokenKind::KwMethodik,
                Ok(RawToken::KwRange) => TokenKind::KwRange,
                Ok(RawToken::KwReturn) => TokenKind::KwReturn,
                Ok(RawToken::KwSelect) => TokenKind::KwSelect,
                Ok(RawToken::KwStruct) => TokenKind::KwStruct,
                Ok(RawToken::KwSwitch) => TokenKind::KwSwitch,
                Ok(RawToken::KwType) => TokenKind::KwType,
                Ok(RawToken::KwVar) => TokenKind::KwVar,

                Ok(RawToken::Plus) => TokenKind::Plus,
                Ok(RawToken::Minus) => TokenKind::Minus,
                Ok(RawToken::Star) => TokenKind::Star,
                Ok(RawToken::Slash) => TokenKind::Slash,
                Ok(RawToken::Percent) => TokenKind::Percent,
                Ok(RawToken::Amp) => TokenKind::Amp,
                Ok(RawToken::Pipe) => TokenKind::Pipe,
                Ok(RawToken::Caret) => TokenKind::Caret,
                Ok(RawToken::Shl) => TokenKind::Shl,
                Ok(RawToken::Shr) => TokenKind::Shr,
                Ok(RawToken::AmpCaret) => TokenKind::AmpCaret,
                Ok(RawToken::OpAssign(op)) => TokenKind::OpAssign(op),

                Ok(RawToken::AndAnd) => TokenKind::AndAnd,
                Ok(RawToken::OrOr) => TokenKind::OrOr,
                Ok(RawToken::Arrow) => TokenKind::Arrow,
                Ok(RawToken::Inc) => TokenKind::Inc,
                Ok(RawToken::Dec) => TokenKind::Dec,

                Ok(RawToken::EqEq) => TokenKind::EqEq,
                Ok(RawToken::Neq) => TokenKind::Neq,
                Ok(RawToken::Lt) => TokenKind::Lt,
                Ok(RawToken::Gt) => TokenKind::Gt,
                Ok(RawToken::Le) => TokenKind::Le,
                Ok(RawToken::Ge) => TokenKind::Ge,
                Ok(RawToken::Bang) => TokenKind::Bang,

                Ok(RawToken::Assign) => TokenKind::Assign,
                Ok(RawToken::Define) => TokenKind::Define,
                Ok(RawToken::Ellipsis) => TokenKind::Ellipsis,

                Ok(RawToken::LParen) => TokenKind::LParen,
                Ok(RawToken::RParen) => TokenKind::RParen,
                Ok(RawToken::LBracket) => TokenKind::LBracket,
                Ok(RawToken::RBracket) => TokenKind::RBracket,
                Ok(RawToken::LBrace) => TokenKind::LBrace,
                Ok(RawToken::RBrace) => TokenKind::RBrace,
                Ok(RawToken::TableBracket) => TokenKind::TableBracket,

                Ok(RawToken::Comma) => TokenKind::Comma,
                Ok(RawToken::Dot) => TokenKind::Dot,
                Ok(RawToken::Colon) => TokenKind::Colon,
                Ok(RawToken::Semicolon) => TokenKind::Semicolon,

                Ok(RawToken::Newline) | Ok(RawToken::BlockComment(true)) => {
                    sink.line_break(span);
                    continue;
                }
                Ok(RawToken::LineComment) | Ok(RawToken::BlockComment(false)) => continue,
                Ok(RawToken::UnterminatedComment) => {
                    return Err(LexError {
                        message: "unterminated block comment".to_string(),
                        span,
                    });
                }

                Ok(RawToken::ShellOpen) => {
                    sink.push(TokenKind::ShellOpen, span);
                    let mut shell = lex.morph::<ShellToken>();
                    lex_shell(&mut shell, &mut sink, span)?;
                    lex = shell.morph();
                    continue;
                }

                Ok(RawToken::Ident(s)) => TokenKind::Ident(s),
                Ok(RawToken::Int(Some(n))) => TokenKind::Int(n),
                Ok(RawToken::Int(None)) => {
                    return Err(LexError {
                        message: "invalid integer literal".to_string(),
                        span,
                    });
                }
                Ok(RawToken::Float(Some(x))) => TokenKind::Float(x),
                Ok(RawToken::Float(None)) => {
                    return Err(LexError {
                        message: "invalid number literal".to_string(),
                        span,
                    });
                }
                Ok(RawToken::String(Some((value, raw)))) => TokenKind::String { value, raw },
                Ok(RawToken::String(None)) => {
                    return Err(LexError {
                        message: "invalid string literal".to_string(),
                        span,
                    });
                }
                Ok(RawToken::RawString(s)) => TokenKind::String {
                    value: s.clone(),
                    raw: s,
                },
                Ok(RawToken::UnterminatedString) => {
                    return Err(LexError {
                        message: "unterminated string literal".to_string(),
                        span,
                    });
                }
                Ok(RawToken::UnterminatedRawString) => {
                    return Err(LexError {
                        message: "unterminated raw string literal".to_string(),
                        span,
                    });
                }

                Err(_) => {
                    return Err(LexError {
                        message: format!("unknown token: '{}'", lex.slice()),
                        span,
                    });
                }
            };

            sink.push(kind, span);
        }

        let end = span_between(self.src.len(), self.src.len());
        sink.line_break(end);
        sink.push(TokenKind::Eof, end);
        Ok(sink.tokens)
    }
}

/// Lex the body of a shell escape up to and including its closing `$$`.
fn lex_shell(
    lex: &mut logos::Lexer<'_, ShellToken>,
    sink: &mut TokenSink,
    open: Span,
) -> Result<(), LexError> {
    while let Some(raw) = lex.next() {
        let range = lex.span();
        let span = span_between(range.start, range.end);
        let kind = match raw {
            Ok(ShellToken::Close) => {
                sink.push(TokenKind::ShellClose, span);
                return Ok(());
            }
            Ok(ShellToken::Newline) => TokenKind::ShellNewline,
            Ok(ShellToken::LineContinuation) => continue,
            Ok(ShellToken::Pipe) => TokenKind::Pipe,
            Ok(ShellToken::OrOr) => TokenKind::OrOr,
            Ok(ShellToken::AndAnd) => TokenKind::AndAnd,
            Ok(ShellToken::Amp) => TokenKind::Amp,
            Ok(ShellToken::Semicolon) => TokenKind::Semicolon,
            Ok(ShellToken::LParen) => TokenKind::LParen,
            Ok(ShellToken::RParen) => TokenKind::RParen,
            Ok(ShellToken::Less) => TokenKind::Lt,
            Ok(ShellToken::Greater) => TokenKind::Gt,
            Ok(ShellToken::GreaterGreater) => TokenKind::Shr,
            Ok(ShellToken::LessAnd) => TokenKind::LessAnd,
            Ok(ShellToken::GreaterAnd) => TokenKind::GreaterAnd,
            Ok(ShellToken::AndGreater) => TokenKind::AndGreater,
            Ok(ShellToken::Word(w)) => TokenKind::ShellWord(w),
            Err(_) => {
                return Err(LexError {
                    message: format!("unknown token in shell: '{}'", lex.slice()),
                    span,
                });
            }
        };
        sink.push(kind, span);
    }

    Err(LexError {
        message: "unterminated shell escape: missing closing '$$'".to_string(),
        span: open,
    })
}
