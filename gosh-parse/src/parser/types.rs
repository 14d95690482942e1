use gosh_ast::{ChanDir, FuncType, InterfaceMethod, StructField, Tuple, Type};
use gosh_lex::TokenKind;

use super::{eval_const_u64, Parser};
use crate::error::ParseError;

/// A parsed parameter or result list.
pub(super) struct ParamList {
    pub tuple: Tuple,
    /// Empty unless the list names its entries.
    pub names: Vec<String>,
    pub variadic: bool,
}

pub(super) struct Signature {
    pub ty: FuncType,
    pub param_names: Vec<String>,
    pub result_names: Vec<String>,
}

struct ParamEntry {
    name: Option<String>,
    ty: Type,
    variadic: bool,
}

impl Parser<'_> {
    pub fn parse_type(&mut self) -> Result<Type, ParseError> {
        self.parse_type_inner(false)
    }

    /// Like `parse_type`, but also accepts `[...]T`, whose length comes from
    /// the literal that follows.
    pub(super) fn parse_literal_type(&mut self) -> Result<Type, ParseError> {
        self.parse_type_inner(true)
    }

    fn parse_type_inner(&mut self, ellipsis_ok: bool) -> Result<Type, ParseError> {
        self.nested(|p| p.parse_type_form(ellipsis_ok))
    }

    fn parse_type_form(&mut self, ellipsis_ok: bool) -> Result<Type, ParseError> {
        let tok = self.expect_any()?;
        match tok.kind {
            TokenKind::Ident(name) => {
                if self.at(TokenKind::Dot)
                    && matches!(self.peek_kind_n(1), Some(TokenKind::Ident(_)))
                {
                    self.next();
                    let (member, _) = self.expect_ident()?;
                    return Ok(Type::qualified(name, member));
                }
                Ok(Type::unresolved(name))
            }
            TokenKind::Star => Ok(Type::pointer(self.parse_type()?)),
            TokenKind::LParen => {
                let ty = self.parse_type()?;
                self.expect(TokenKind::RParen)?;
                Ok(ty)
            }
            TokenKind::LBracket => {
                if self.eat(TokenKind::RBracket).is_some() {
                    return Ok(Type::Slice(Box::new(self.parse_type()?)));
                }
                if self.at(TokenKind::Ellipsis) {
                    if !ellipsis_ok {
                        return Err(ParseError::new(
                            "'[...]' array type is only allowed in a composite literal",
                            tok.span,
                        ));
                    }
                    self.next();
                    self.expect(TokenKind::RBracket)?;
                    let elem = self.parse_type()?;
                    return Ok(Type::Array {
                        len: 0,
                        elem: Box::new(elem),
                        ellipsis: true,
                    });
                }
                let len = self.with_composites(true, |p| p.parse_expr())?;
                self.expect(TokenKind::RBracket)?;
                let len = eval_const_u64(&len)?;
                Ok(Type::Array {
                    len,
                    elem: Box::new(self.parse_type()?),
                    ellipsis: false,
                })
            }
            TokenKind::TableBracket => Ok(Type::Table(Box::new(self.parse_type()?))),
            TokenKind::KwMap => {
                self.expect(TokenKind::LBracket)?;
                let key = self.parse_type()?;
                self.expect(TokenKind::RBracket)?;
                let value = self.parse_type()?;
                Ok(Type::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                })
            }
            TokenKind::KwChan => {
                let dir = if self.eat(TokenKind::Arrow).is_some() {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                Ok(Type::Chan {
                    dir,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::Arrow => {
                self.expect(TokenKind::KwChan)?;
                Ok(Type::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(self.parse_type()?),
                })
            }
            TokenKind::KwFunc => Ok(Type::Func(self.parse_signature()?.ty)),
            TokenKind::KwStruct => self.parse_struct_type(),
            TokenKind::KwInterface => self.parse_interface_type(),
            other => Err(ParseError::new(
                format!("expected type, found {other}"),
                tok.span,
            )),
        }
    }

    /// Whether the next token can begin a type. Used to tell an unparenthesised
    /// result type from the start of a function body.
    pub(super) fn at_type_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            Some(
                TokenKind::Ident(_)
                    | TokenKind::Star
                    | TokenKind::LBracket
                    | TokenKind::TableBracket
                    | TokenKind::KwMap
                    | TokenKind::KwChan
                    | TokenKind::KwFunc
                    | TokenKind::KwStruct
                    | TokenKind::KwInterface
                    | TokenKind::Arrow
            )
        )
    }

    fn parse_struct_type(&mut self) -> Result<Type, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RBrace).is_some() {
                break;
            }
            self.parse_field_decl(&mut fields)?;
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Semicolon)?;
            }
        }
        Ok(Type::Struct(fields))
    }

    fn parse_field_decl(&mut self, fields: &mut Vec<StructField>) -> Result<(), ParseError> {
        let embedded = match (self.peek_kind(), self.peek_kind_n(1)) {
            (Some(TokenKind::Star), _) => true,
            (
                Some(TokenKind::Ident(_)),
                Some(
                    TokenKind::Semicolon
                    | TokenKind::RBrace
                    | TokenKind::Dot
                    | TokenKind::String { .. },
                ),
            ) => true,
            _ => false,
        };

        if embedded {
            let span = self.current_span();
            let ty = self.parse_type()?;
            let Some(name) = ty.embedded_name().map(str::to_string) else {
                return Err(ParseError::new(
                    "embedded field must be a type name or a pointer to one",
                    self.span_from(span),
                ));
            };
            let tag = self.parse_tag();
            fields.push(StructField {
                name,
                ty,
                tag,
                embedded: true,
            });
            return Ok(());
        }

        let mut names = vec![self.expect_ident()?.0];
        while self.eat(TokenKind::Comma).is_some() {
            names.push(self.expect_ident()?.0);
        }
        let ty = self.parse_type()?;
        let tag = self.parse_tag();
        fields.extend(names.into_iter().map(|name| StructField {
            name,
            ty: ty.clone(),
            tag: tag.clone(),
            embedded: false,
        }));
        Ok(())
    }

    /// Struct tags keep their source text: `"json"` and `` `json` `` both
    /// give `json`.
    fn parse_tag(&mut self) -> Option<String> {
        let Some(TokenKind::String { raw, .. }) = self.peek_kind() else {
            return None;
        };
        let raw = raw.clone();
        self.next();
        Some(raw)
    }

    fn parse_interface_type(&mut self) -> Result<Type, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut methods = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat(TokenKind::RBrace).is_some() {
                break;
            }
            let (name, _) = self.expect_ident()?;
            let ty = self.parse_signature()?.ty;
            methods.push(InterfaceMethod { name, ty });
            if !self.at(TokenKind::RBrace) {
                self.expect(TokenKind::Semicolon)?;
            }
        }
        Ok(Type::Interface(methods))
    }

    /// `(params) results`, with the `func` keyword already consumed.
    pub(super) fn parse_signature(&mut self) -> Result<Signature, ParseError> {
        let params = self.parse_param_list()?;
        let results = if self.at(TokenKind::LParen) {
            let span = self.current_span();
            let results = self.parse_param_list()?;
            if results.variadic {
                return Err(ParseError::new(
                    "result list cannot be variadic",
                    self.span_from(span),
                ));
            }
            Some(results)
        } else if self.at_type_start() {
            Some(ParamList {
                tuple: Tuple::new(vec![self.parse_type()?]),
                names: Vec::new(),
                variadic: false,
            })
        } else {
            None
        };

        let (results, result_names) = match results {
            Some(r) => (Some(r.tuple), r.names),
            None => (None, Vec::new()),
        };
        Ok(Signature {
            ty: FuncType {
                params: Some(params.tuple),
                results,
                variadic: params.variadic,
            },
            param_names: params.names,
            result_names,
        })
    }

    /// A parenthesised parameter list. Either every entry is named or none
    /// is; `a, b int` gives both names the type that follows them.
    fn parse_param_list(&mut self) -> Result<ParamList, ParseError> {
        let open = self.expect(TokenKind::LParen)?.span;
        let mut entries = Vec::new();
        while !self.at(TokenKind::RParen) {
            entries.push(self.parse_param_entry()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.skip_semicolons_before(TokenKind::RParen);
        self.expect(TokenKind::RParen)?;
        let span = self.span_from(open);

        let variadic = entries.last().is_some_and(|e| e.variadic);
        if entries.iter().rev().skip(1).any(|e| e.variadic) {
            return Err(ParseError::new(
                "can only use '...' with the final parameter",
                span,
            ));
        }

        if entries.iter().all(|e| e.name.is_none()) {
            return Ok(ParamList {
                tuple: Tuple::new(entries.into_iter().map(|e| e.ty).collect()),
                names: Vec::new(),
                variadic,
            });
        }

        let mut names = Vec::new();
        let mut elems = Vec::new();
        let mut pending = Vec::new();
        for entry in entries {
            match entry.name {
                Some(name) => {
                    pending.push(name);
                    for name in pending.drain(..) {
                        names.push(name);
                        elems.push(entry.ty.clone());
                    }
                }
                None => match entry.ty {
                    Type::Unresolved {
                        package: None,
                        name,
                    } if !entry.variadic => pending.push(name),
                    _ => {
                        return Err(ParseError::new(
                            "mixed named and unnamed parameters",
                            span,
                        ));
                    }
                },
            }
        }
        if !pending.is_empty() {
            return Err(ParseError::new("mixed named and unnamed parameters", span));
        }

        Ok(ParamList {
            tuple: Tuple::new(elems),
            names,
            variadic,
        })
    }

    fn parse_param_entry(&mut self) -> Result<ParamEntry, ParseError> {
        let named = matches!(self.peek_kind(), Some(TokenKind::Ident(_)))
            && !matches!(
                self.peek_kind_n(1),
                Some(
                    TokenKind::Comma
                        | TokenKind::RParen
                        | TokenKind::Dot
                        | TokenKind::Semicolon
                )
            );
        let name = if named {
            Some(self.expect_ident()?.0)
        } else {
            None
        };

        // `...T` is recorded as a slice of T.
        let variadic = self.eat(TokenKind::Ellipsis).is_some();
        let ty = self.parse_type()?;
        let ty = if variadic {
            Type::Slice(Box::new(ty))
        } else {
            ty
        };
        Ok(ParamEntry { name, ty, variadic })
    }
}
