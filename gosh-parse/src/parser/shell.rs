use gosh_ast::{
    AndOrSep, RedirectOp, Shell, ShellAndOr, ShellAssign, ShellCmd, ShellList, ShellPipeline,
    ShellRedirect, ShellSimpleCmd, Span,
};
use gosh_lex::{Token, TokenKind};

use super::Parser;
use crate::error::ParseError;

fn redirect_op(kind: &TokenKind) -> Option<RedirectOp> {
    Some(match kind {
        TokenKind::Lt => RedirectOp::Less,
        TokenKind::Gt => RedirectOp::Greater,
        TokenKind::Shr => RedirectOp::Append,
        TokenKind::LessAnd => RedirectOp::LessAnd,
        TokenKind::GreaterAnd => RedirectOp::GreaterAnd,
        TokenKind::AndGreater => RedirectOp::AndGreater,
        _ => return None,
    })
}

fn adjacent(a: Span, b: Span) -> bool {
    a.offset() + a.len() == b.offset()
}

/// `KEY=VALUE` with a valid variable name on the left.
fn split_assign(word: &str) -> Option<ShellAssign> {
    let (key, value) = word.split_once('=')?;
    let mut chars = key.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_')
        || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return None;
    }
    Some(ShellAssign {
        key: key.to_string(),
        value: value.to_string(),
    })
}

impl Parser<'_> {
    /// `$$ ... $$`. One `ShellList` per newline-terminated list.
    pub(super) fn parse_shell(&mut self) -> Result<Shell, ParseError> {
        self.expect(TokenKind::ShellOpen)?;
        let mut cmds = Vec::new();
        loop {
            self.skip_shell_newlines();
            if self.eat(TokenKind::ShellClose).is_some() {
                break;
            }
            cmds.push(self.parse_shell_list(false)?);
        }
        Ok(Shell {
            cmds,
            trap_out: false,
        })
    }

    fn skip_shell_newlines(&mut self) {
        while self.at(TokenKind::ShellNewline) {
            self.next();
        }
    }

    fn at_shell_list_end(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(TokenKind::ShellClose | TokenKind::RParen | TokenKind::Eof) | None
        )
    }

    /// And-or lists joined by `;` or `&`. A newline ends the list, except
    /// directly after a separator and inside a subshell.
    fn parse_shell_list(&mut self, subshell: bool) -> Result<ShellList, ParseError> {
        let mut list = ShellList::default();
        loop {
            let mut and_or = self.parse_shell_and_or()?;
            let more = match self.peek_kind() {
                Some(TokenKind::Semicolon) => {
                    self.next();
                    true
                }
                Some(TokenKind::Amp) => {
                    self.next();
                    and_or.background = true;
                    true
                }
                Some(TokenKind::ShellNewline) => subshell,
                _ => false,
            };
            list.and_or.push(and_or);
            if !more {
                break;
            }
            self.skip_shell_newlines();
            if self.at_shell_list_end() {
                break;
            }
        }
        Ok(list)
    }

    fn parse_shell_and_or(&mut self) -> Result<ShellAndOr, ParseError> {
        let mut and_or = ShellAndOr {
            pipeline: vec![self.parse_shell_pipeline()?],
            ..ShellAndOr::default()
        };
        loop {
            let sep = match self.peek_kind() {
                Some(TokenKind::AndAnd) => AndOrSep::And,
                Some(TokenKind::OrOr) => AndOrSep::Or,
                _ => break,
            };
            self.next();
            self.skip_shell_newlines();
            and_or.sep.push(sep);
            and_or.pipeline.push(self.parse_shell_pipeline()?);
        }
        Ok(and_or)
    }

    fn parse_shell_pipeline(&mut self) -> Result<ShellPipeline, ParseError> {
        let mut pipeline = ShellPipeline::default();
        if matches!(self.peek_kind(), Some(TokenKind::ShellWord(w)) if w == "!") {
            self.next();
            pipeline.bang = true;
        }
        pipeline.cmd.push(self.parse_shell_cmd()?);
        while self.eat(TokenKind::Pipe).is_some() {
            self.skip_shell_newlines();
            pipeline.cmd.push(self.parse_shell_cmd()?);
        }
        Ok(pipeline)
    }

    fn parse_shell_cmd(&mut self) -> Result<ShellCmd, ParseError> {
        if self.eat(TokenKind::LParen).is_some() {
            self.skip_shell_newlines();
            let list = self.nested(|p| p.parse_shell_list(true))?;
            self.expect(TokenKind::RParen)?;
            return Ok(ShellCmd::Subshell(list));
        }
        self.parse_shell_simple_cmd().map(ShellCmd::Simple)
    }

    /// Assignments, then arguments, with redirections anywhere among them.
    fn parse_shell_simple_cmd(&mut self) -> Result<ShellSimpleCmd, ParseError> {
        let start = self.current_span();
        let mut cmd = ShellSimpleCmd::default();
        loop {
            if let Some(redirect) = self.parse_shell_redirect()? {
                cmd.redirect.push(redirect);
                continue;
            }
            let Some(TokenKind::ShellWord(word)) = self.peek_kind() else {
                break;
            };
            let word = word.clone();
            self.next();
            if cmd.args.is_empty() {
                if let Some(assign) = split_assign(&word) {
                    cmd.assign.push(assign);
                    continue;
                }
            }
            cmd.args.push(word);
        }

        if cmd.assign.is_empty() && cmd.args.is_empty() && cmd.redirect.is_empty() {
            return Err(ParseError::new(
                format!("expected shell command, found {}", self.describe_next()),
                start,
            ));
        }
        Ok(cmd)
    }

    /// A redirection, optionally preceded by a descriptor number written
    /// directly against the operator (`2>&1`).
    fn parse_shell_redirect(&mut self) -> Result<Option<ShellRedirect>, ParseError> {
        let (number, op_at) = match (self.tokens.get(self.idx), self.tokens.get(self.idx + 1)) {
            (
                Some(Token {
                    kind: TokenKind::ShellWord(word),
                    span,
                }),
                Some(op),
            ) if redirect_op(&op.kind).is_some() && adjacent(*span, op.span) => {
                match word.parse::<u32>() {
                    Ok(n) if word.bytes().all(|b| b.is_ascii_digit()) => (Some(n), 1),
                    _ => (None, 0),
                }
            }
            _ => (None, 0),
        };

        let Some(token) = self.peek_kind_n(op_at).and_then(redirect_op) else {
            return Ok(None);
        };
        self.idx += op_at + 1;

        let span = self.current_span();
        match self.next() {
            Some(Token {
                kind: TokenKind::ShellWord(filename),
                ..
            }) => Ok(Some(ShellRedirect {
                number,
                token,
                filename,
            })),
            other => Err(ParseError::new(
                format!(
                    "expected file name after '{}', found {}",
                    token.symbol(),
                    other.map_or_else(|| "end of input".to_string(), |t| t.kind.to_string())
                ),
                span,
            )),
        }
    }
}
