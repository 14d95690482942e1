//! The embedded shell sub-language.
//!
//! Words are kept exactly as written: quotes, backslashes and `${VAR}`
//! references are left for the evaluator to interpret.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shell {
    pub cmds: Vec<ShellList>,
    /// Standard output is captured as the expression's value (`($$ ... $$)`).
    pub trap_out: bool,
}

/// And-or lists separated by `;` or `&`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellList {
    pub and_or: Vec<ShellAndOr>,
}

/// Pipelines joined by `&&`/`||`; `sep.len() == pipeline.len() - 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellAndOr {
    pub pipeline: Vec<ShellPipeline>,
    pub sep: Vec<AndOrSep>,
    pub background: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AndOrSep {
    And,
    Or,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellPipeline {
    pub bang: bool,
    pub cmd: Vec<ShellCmd>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCmd {
    Simple(ShellSimpleCmd),
    Subshell(ShellList),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellSimpleCmd {
    pub assign: Vec<ShellAssign>,
    pub args: Vec<String>,
    pub redirect: Vec<ShellRedirect>,
}

impl ShellSimpleCmd {
    pub fn args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellAssign {
    pub key: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShellRedirect {
    /// Explicit file descriptor, as in `2>&1`.
    pub number: Option<u32>,
    pub token: RedirectOp,
    pub filename: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedirectOp {
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `>>`
    Append,
    /// `<&`
    LessAnd,
    /// `>&`
    GreaterAnd,
    /// `&>`
    AndGreater,
}

impl RedirectOp {
    pub fn symbol(self) -> &'static str {
        match self {
            RedirectOp::Less => "<",
            RedirectOp::Greater => ">",
            RedirectOp::Append => ">>",
            RedirectOp::LessAnd => "<&",
            RedirectOp::GreaterAnd => ">&",
            RedirectOp::AndGreater => "&>",
        }
    }
}
