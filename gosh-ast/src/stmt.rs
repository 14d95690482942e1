use crate::{Expr, FuncLiteral, Span, Type};

#[derive(Clone, Debug)]
pub enum Stmt {
    Simple(SimpleStmt),
    Assign(AssignStmt),
    Block(Block),
    If(IfStmt),
    For(ForStmt),
    Range(RangeStmt),
    Return(ReturnStmt),
    Defer(DeferStmt),
    Go(GoStmt),
    Send(SendStmt),
    Switch(SwitchStmt),
    TypeSwitch(TypeSwitchStmt),
    Select(SelectStmt),
    Branch(BranchStmt),
    Labeled(LabeledStmt),
    Var(VarDecl),
    VarSet(VarSet),
    Const(ConstDecl),
    ConstSet(ConstSet),
    TypeDecl(TypeDecl),
    TypeDeclSet(TypeDeclSet),
    Methodik(MethodikDecl),
    Import(ImportStmt),
    ImportSet(ImportSet),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Simple(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::Block(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Range(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Defer(s) => s.span,
            Stmt::Go(s) => s.span,
            Stmt::Send(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::TypeSwitch(s) => s.span,
            Stmt::Select(s) => s.span,
            Stmt::Branch(s) => s.span,
            Stmt::Labeled(s) => s.span,
            Stmt::Var(s) => s.span,
            Stmt::VarSet(s) => s.span,
            Stmt::Const(s) => s.span,
            Stmt::ConstSet(s) => s.span,
            Stmt::TypeDecl(s) => s.span,
            Stmt::TypeDeclSet(s) => s.span,
            Stmt::Methodik(s) => s.span,
            Stmt::Import(s) => s.span,
            Stmt::ImportSet(s) => s.span,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SimpleStmt {
    pub span: Span,
    pub expr: Expr,
}

/// `a, b = x, y`, or `:=` when `decl` is set. `_` is an ordinary identifier here.
#[derive(Clone, Debug)]
pub struct AssignStmt {
    pub span: Span,
    pub decl: bool,
    pub left: Vec<Expr>,
    pub right: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct Block {
    pub span: Span,
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug)]
pub struct IfStmt {
    pub span: Span,
    pub init: Option<Box<Stmt>>,
    pub cond: Expr,
    pub body: Block,
    /// A `Stmt::Block` or another `Stmt::If`.
    pub else_: Option<Box<Stmt>>,
}

#[derive(Clone, Debug)]
pub struct ForStmt {
    pub span: Span,
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub post: Option<Box<Stmt>>,
    pub body: Block,
}

#[derive(Clone, Debug)]
pub struct RangeStmt {
    pub span: Span,
    pub key: Option<Expr>,
    pub val: Option<Expr>,
    pub decl: bool,
    pub expr: Expr,
    pub body: Block,
}

#[derive(Clone, Debug)]
pub struct ReturnStmt {
    pub span: Span,
    pub exprs: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct DeferStmt {
    pub span: Span,
    pub expr: Expr,
}

#[derive(Clone, Debug)]
pub struct GoStmt {
    pub span: Span,
    pub call: Expr,
}

#[derive(Clone, Debug)]
pub struct SendStmt {
    pub span: Span,
    pub chan: Expr,
    pub value: Expr,
}

#[derive(Clone, Debug)]
pub struct SwitchStmt {
    pub span: Span,
    pub init: Option<Box<Stmt>>,
    pub cond: Option<Expr>,
    pub cases: Vec<SwitchCase>,
}

#[derive(Clone, Debug)]
pub struct SwitchCase {
    pub conds: Vec<Expr>,
    pub default: bool,
    pub body: Block,
}

#[derive(Clone, Debug)]
pub struct TypeSwitchStmt {
    pub span: Span,
    pub init: Option<Box<Stmt>>,
    /// `Simple{x.(type)}` or `Assign{v := x.(type)}`.
    pub assign: Box<Stmt>,
    pub cases: Vec<TypeSwitchCase>,
}

#[derive(Clone, Debug)]
pub struct TypeSwitchCase {
    pub types: Vec<Type>,
    pub default: bool,
    pub body: Block,
}

#[derive(Clone, Debug)]
pub struct SelectStmt {
    pub span: Span,
    pub cases: Vec<SelectCase>,
}

#[derive(Clone, Debug)]
pub struct SelectCase {
    /// A receive assignment, a send, or a bare receive; `None` for `default`.
    pub stmt: Option<Box<Stmt>>,
    pub default: bool,
    pub body: Block,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BranchKind {
    Break,
    Continue,
    Goto,
    Fallthrough,
}

impl BranchKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BranchKind::Break => "break",
            BranchKind::Continue => "continue",
            BranchKind::Goto => "goto",
            BranchKind::Fallthrough => "fallthrough",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BranchStmt {
    pub span: Span,
    pub kind: BranchKind,
    pub label: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LabeledStmt {
    pub span: Span,
    pub label: String,
    pub stmt: Box<Stmt>,
}

#[derive(Clone, Debug)]
pub struct VarDecl {
    pub span: Span,
    pub names: Vec<String>,
    pub ty: Option<Type>,
    /// Empty when the declaration has no initialiser.
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct VarSet {
    pub span: Span,
    pub vars: Vec<VarDecl>,
}

#[derive(Clone, Debug)]
pub struct ConstDecl {
    pub span: Span,
    pub names: Vec<String>,
    pub ty: Option<Type>,
    pub values: Vec<Expr>,
}

#[derive(Clone, Debug)]
pub struct ConstSet {
    pub span: Span,
    pub consts: Vec<ConstDecl>,
}

/// `type Name T`; `ty` is always a `Type::Named` wrapping `T`.
#[derive(Clone, Debug)]
pub struct TypeDecl {
    pub span: Span,
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Debug)]
pub struct TypeDeclSet {
    pub span: Span,
    pub decls: Vec<TypeDecl>,
}

/// A named type declared together with its methods. The method bodies are
/// owned here; `ty`'s `Named` only mirrors their names and signatures.
#[derive(Clone, Debug)]
pub struct MethodikDecl {
    pub span: Span,
    pub name: String,
    pub ty: Type,
    pub methods: Vec<FuncLiteral>,
}

#[derive(Clone, Debug)]
pub struct ImportStmt {
    pub span: Span,
    pub name: Option<String>,
    pub path: String,
}

#[derive(Clone, Debug)]
pub struct ImportSet {
    pub span: Span,
    pub imports: Vec<ImportStmt>,
}
