#![forbid(unsafe_code)]

use std::fmt;

use bigdecimal::BigDecimal;
use gosh_ast::Span;
use num_bigint::BigInt;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwBreak,
    KwCase,
    KwChan,
    KwConst,
    KwContinue,
    KwDefault,
    KwDefer,
    KwElse,
    KwFallthrough,
    KwFor,
    KwFunc,
    KwGo,
    KwGoto,
    KwIf,
    KwImport,
    KwInterface,
    KwMap,
    KwMethodik,
    KwRange,
    KwReturn,
    KwSelect,
    KwStruct,
    KwSwitch,
    KwType,
    KwVar,

    // Operators / punctuation
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    Shl,
    Shr,
    /// `&^`
    AmpCaret,

    /// `op=`, carrying the operator it applies.
    OpAssign(AssignOp),

    AndAnd,
    OrOr,
    /// `<-`
    Arrow,
    Inc,
    Dec,

    EqEq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    Bang,

    Assign,
    /// `:=`
    Define,
    Ellipsis,

    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    /// `[|]`
    TableBracket,

    Comma,
    Dot,
    Colon,
    Semicolon,

    /// Opening `$$`.
    ShellOpen,
    /// Closing `$$`.
    ShellClose,
    /// A newline inside a shell escape.
    ShellNewline,
    ShellWord(String),
    /// `<&`
    LessAnd,
    /// `>&`
    GreaterAnd,
    /// `&>`
    AndGreater,

    Eof,

    // Literals / identifiers
    Ident(String),
    Int(BigInt),
    Float(BigDecimal),
    /// `value` is decoded; `raw` is the text between the delimiters.
    String { value: String, raw: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::KwBreak => "'break'",
            TokenKind::KwCase => "'case'",
            TokenKind::KwChan => "'chan'",
            TokenKind::KwConst => "'const'",
            TokenKind::KwContinue => "'continue'",
            TokenKind::KwDefault => "'default'",
            TokenKind::KwDefer => "'defer'",
            TokenKind::KwElse => "'else'",
            TokenKind::KwFallthrough => "'fallthrough'",
            TokenKind::KwFor => "'for'",
            TokenKind::KwFunc => "'func'",
            TokenKind::KwGo => "'go'",
            TokenKind::KwGoto => "'goto'",
            TokenKind::KwIf => "'if'",
            TokenKind::KwImport => "'import'",
            TokenKind::KwInterface => "'interface'",
            TokenKind::KwMap => "'map'",
            TokenKind::KwMethodik => "'methodik'",
            TokenKind::KwRange => "'range'",
            TokenKind::KwReturn => "'return'",
            TokenKind::KwSelect => "'select'",
            TokenKind::KwStruct => "'struct'",
            TokenKind::KwSwitch => "'switch'",
            TokenKind::KwType => "'type'",
            TokenKind::KwVar => "'var'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Shl => "'<<'",
            TokenKind::Shr => "'>>'",
            TokenKind::AmpCaret => "'&^'",
            TokenKind::OpAssign(op) => return write!(f, "'{}='", op.symbol()),
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Arrow => "'<-'",
            TokenKind::Inc => "'++'",
            TokenKind::Dec => "'--'",
            TokenKind::EqEq => "'=='",
            TokenKind::Neq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::Le => "'<='",
            TokenKind::Ge => "'>='",
            TokenKind::Bang => "'!'",
            TokenKind::Assign => "'='",
            TokenKind::Define => "':='",
            TokenKind::Ellipsis => "'...'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::TableBracket => "'[|]'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Colon => "':'",
            TokenKind::Semicolon => "';'",
            TokenKind::ShellOpen => "'$$'",
            TokenKind::ShellClose => "closing '$$'",
            TokenKind::ShellNewline => "newline",
            TokenKind::ShellWord(w) => return write!(f, "shell word {w:?}"),
            TokenKind::LessAnd => "'<&'",
            TokenKind::GreaterAnd => "'>&'",
            TokenKind::AndGreater => "'&>'",
            TokenKind::Eof => "end of input",
            TokenKind::Ident(name) => return write!(f, "identifier '{name}'"),
            TokenKind::Int(n) => return write!(f, "integer {n}"),
            TokenKind::Float(x) => return write!(f, "number {x}"),
            TokenKind::String { raw, .. } => return write!(f, "string \"{raw}\""),
        };
        f.write_str(s)
    }
}

impl AssignOp {
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Add => "+",
            AssignOp::Sub => "-",
            AssignOp::Mul => "*",
            AssignOp::Div => "/",
            AssignOp::Rem => "%",
            AssignOp::And => "&",
            AssignOp::Or => "|",
            AssignOp::Xor => "^",
            AssignOp::Shl => "<<",
            AssignOp::Shr => ">>",
            AssignOp::AndNot => "&^",
        }
    }
}
