//! Type syntax.
//!
//! Types carry no source positions, so structural equality is the derived
//! `PartialEq`. A bare parser only ever produces `Unresolved` for named types;
//! binding those to definitions is the type checker's job.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// `name` or `pkg.name`, not yet bound to a definition.
    Unresolved {
        package: Option<String>,
        name: String,
    },
    Named(Named),
    Struct(Vec<StructField>),
    /// `[N]T`, or `[...]T` when `ellipsis` is set; in that case `len` is the
    /// element count of the accompanying literal.
    Array {
        len: u64,
        elem: Box<Type>,
        ellipsis: bool,
    },
    Slice(Box<Type>),
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Chan {
        dir: ChanDir,
        elem: Box<Type>,
    },
    Pointer(Box<Type>),
    Func(FuncType),
    Tuple(Tuple),
    /// `[|]T`
    Table(Box<Type>),
    Interface(Vec<InterfaceMethod>),
}

impl Type {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Type::Unresolved {
            package: None,
            name: name.into(),
        }
    }

    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Type::Unresolved {
            package: Some(package.into()),
            name: name.into(),
        }
    }

    pub fn pointer(elem: Type) -> Self {
        Type::Pointer(Box::new(elem))
    }

    /// The unqualified name an embedded field of this type is known by:
    /// `S`, `*S` and `pkg.S` all embed as `S`.
    pub fn embedded_name(&self) -> Option<&str> {
        match self {
            Type::Unresolved { name, .. } => Some(name),
            Type::Pointer(elem) => match elem.as_ref() {
                Type::Unresolved { name, .. } => Some(name),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Named {
    pub name: String,
    pub ty: Box<Type>,
    /// Parallel to `methods`, index for index.
    pub method_names: Vec<String>,
    pub methods: Vec<FuncType>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub ty: Type,
    pub tag: Option<String>,
    pub embedded: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChanDir {
    #[default]
    Both,
    Send,
    Recv,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tuple {
    pub elems: Vec<Type>,
}

impl Tuple {
    pub fn new(elems: Vec<Type>) -> Self {
        Self { elems }
    }
}

/// `func(params) results`. `params` is `None` only for synthesised
/// signatures; `results` is `None` when the signature declares no result list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuncType {
    pub params: Option<Tuple>,
    pub results: Option<Tuple>,
    /// The final parameter was declared `...T`.
    pub variadic: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceMethod {
    pub name: String,
    pub ty: FuncType,
}
