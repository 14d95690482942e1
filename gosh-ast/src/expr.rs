use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{synthetic_span, Block, Shell, Span, Type, FuncType};

#[derive(Clone, Debug)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

impl Expr {
    pub fn new(span: Span, kind: ExprKind) -> Self {
        Self { span, kind }
    }

    pub fn synthetic(kind: ExprKind) -> Self {
        Self::new(synthetic_span(), kind)
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::Ident(name.into()))
    }

    pub fn int(value: impl Into<BigInt>) -> Self {
        Self::synthetic(ExprKind::BasicLit(Literal::Int(value.into())))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::synthetic(ExprKind::BasicLit(Literal::String(value.into())))
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Self::synthetic(ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Self {
        Self::synthetic(ExprKind::Unary {
            op,
            expr: Box::new(expr),
        })
    }

    /// True for `x.(type)`, the guard of a type switch.
    pub fn is_type_switch_guard(&self) -> bool {
        matches!(&self.kind, ExprKind::TypeAssert { ty: None, .. })
    }
}

/// The value of a basic literal. Numbers keep arbitrary precision; choosing a
/// representation is left to the type checker.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(BigInt),
    Float(BigDecimal),
    String(String),
}

#[derive(Clone, Debug)]
pub enum ExprKind {
    Ident(String),
    BasicLit(Literal),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Call {
        func: Box<Expr>,
        args: Vec<Expr>,
        /// `f(xs...)`
        ellipsis: bool,
    },
    Selector {
        left: Box<Expr>,
        right: String,
    },
    /// `x[i]`, `x[lo:hi]`, `x[a:b, c:d]`. Each index may be a `Slice`.
    Index {
        left: Box<Expr>,
        indices: Vec<Expr>,
    },
    Slice {
        low: Option<Box<Expr>>,
        high: Option<Box<Expr>>,
    },
    /// `T{...}`. `keys` is empty for positional literals, otherwise parallel
    /// to `values`.
    CompLit {
        ty: Type,
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    ArrayLit {
        ty: Type,
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    SliceLit {
        ty: Type,
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    MapLit {
        ty: Type,
        keys: Vec<Expr>,
        values: Vec<Expr>,
    },
    /// `[|]T{{a, b}, {c, d}}`
    TableLit {
        ty: Type,
        rows: Vec<Vec<Expr>>,
    },
    FuncLit(Box<FuncLiteral>),
    /// `x.(T)`; `ty` is `None` for `x.(type)`.
    TypeAssert {
        left: Box<Expr>,
        ty: Option<Type>,
    },
    Shell(Shell),
    /// A type in expression position, as in `make([]int, 3)` or `new(T)`.
    Type(Type),
}

#[derive(Clone, Debug)]
pub struct FuncLiteral {
    pub span: Span,
    pub ty: FuncType,
    /// Empty when no parameter is named, otherwise one entry per parameter.
    pub param_names: Vec<String>,
    /// Empty when no result is named, otherwise one entry per result.
    pub result_names: Vec<String>,
    pub name: Option<String>,
    pub receiver_name: Option<String>,
    pub pointer_receiver: bool,
    pub body: Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    /// `&x`
    Addr,
    /// `*x`
    Deref,
    /// `<-ch`
    Recv,
    /// `(x)`, kept so formatting tools can reproduce the source.
    Paren,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    LogicalOr,
    LogicalAnd,

    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    Add,
    Sub,
    /// `|`
    Pipe,

    Mul,
    Div,
    Rem,
    /// `&`
    Ref,
    /// `&^`
    RefPow,
    Shl,
    Shr,

    /// `^`
    Pow,
}

impl BinOp {
    /// Binding strength; higher binds tighter. All levels are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::LogicalOr => 1,
            BinOp::LogicalAnd => 2,
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 3,
            BinOp::Add | BinOp::Sub | BinOp::Pipe => 4,
            BinOp::Mul
            | BinOp::Div
            | BinOp::Rem
            | BinOp::Ref
            | BinOp::RefPow
            | BinOp::Shl
            | BinOp::Shr => 5,
            BinOp::Pow => 6,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::LogicalOr => "||",
            BinOp::LogicalAnd => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Pipe => "|",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Ref => "&",
            BinOp::RefPow => "&^",
            BinOp::Shl => "<<",
            BinOp::Shr => ">>",
            BinOp::Pow => "^",
        }
    }
}
