//! Enum, struct, and function parsing.
//!
//! Struct bodies and function bodies shadow the current symbol table
//! with the symbol's nested table, so inner declarations land there and
//! resolve against it first.

use lodec_lex::{Token, TokenKind};
use lodec_util::ErrorKind;

use crate::annotation::Annotation;
use crate::ast::*;
use crate::symbol::{DeclState, Symbol, SymbolTable};
use crate::{PResult, Parser};

impl<'src> Parser<'src> {
    /// Prefix rule for `enum`: `enum IDENT { IDENT [= expr] (, …)* [,] }`.
    pub(crate) fn enum_declaration(&mut self, _can_assign: bool) -> PResult<Expr<'src>> {
        self.consume(TokenKind::Identifier, "expected identifier after 'enum'")?;
        let name = self.current;

        self.table_mut().insert(Symbol::new(
            name,
            Annotation::from_token_kind(TokenKind::Enum),
            DeclState::Declared,
        ));

        let members = self.enum_block()?;

        let stored = self.table_mut().insert(Symbol::new(
            name,
            Annotation::from_token_kind(TokenKind::Enum),
            DeclState::Defined,
        ));

        Ok(Expr::EnumDecl(EnumDeclExpr {
            name: stored.token,
            annotation: stored.annotation,
            members,
        }))
    }

    /// The braced member list of an enum declaration.
    fn enum_block(&mut self) -> PResult<Vec<Expr<'src>>> {
        self.consume(TokenKind::LCurly, "expected '{' after enum declaration")?;

        let mut members = Vec::new();

        while !self.next_is(TokenKind::RCurly) && !self.next_is(TokenKind::Eof) {
            if let Some(existing) = self.table().get(self.next.lexeme) {
                let line = existing.annotation.declared_on_line;
                return Err(self
                    .error_at(
                        self.next,
                        ErrorKind::DuplicateEnumMember,
                        format!("enum member '{}' already exists", self.next.lexeme),
                    )
                    .with_note(format!("previously declared on line {}", line)));
            }

            self.consume(TokenKind::Identifier, "expected identifier in enum body")?;
            let member_token = self.current;
            self.table_mut().insert(Symbol::new(
                member_token,
                Annotation::from_token_kind(TokenKind::EnumLiteral),
                DeclState::Defined,
            ));

            members.push(self.enum_member(true)?);

            self.match_token(TokenKind::Comma)?;
        }

        self.consume(TokenKind::RCurly, "expected '}' after enum body")?;

        Ok(members)
    }

    /// One enum member, with an optional `= expr` initializer.
    fn enum_member(&mut self, can_assign: bool) -> PResult<Expr<'src>> {
        let token = self.current;
        let annotation = self
            .table()
            .get(token.lexeme)
            .map(|s| s.annotation)
            .unwrap_or_else(Annotation::none);

        if self.match_token(TokenKind::Eq)? {
            if !can_assign {
                return Err(self.error_at(
                    token,
                    ErrorKind::InvalidAssignment,
                    format!("cannot assign to identifier '{}'", token.lexeme),
                ));
            }

            let stored =
                self.table_mut()
                    .insert(Symbol::new(token, annotation, DeclState::Defined));
            let value = self.expression()?;
            return Ok(Expr::Assignment(AssignExpr {
                target: stored.token,
                annotation: stored.annotation,
                index: None,
                value: Box::new(value),
            }));
        }

        Ok(Expr::EnumIdentifier(LiteralExpr {
            token,
            annotation: Annotation::from_token_kind(TokenKind::EnumLiteral),
        }))
    }

    /// Prefix rule for `struct`: `struct IDENT { field-stmts }`.
    ///
    /// The name is pre-added as DECLARED, the field table shadows the
    /// current one while the body parses, and the name is re-added as
    /// DEFINED with the field table attached. Empty bodies are
    /// rejected.
    pub(crate) fn struct_declaration(&mut self, _can_assign: bool) -> PResult<Expr<'src>> {
        self.consume(TokenKind::Identifier, "expected identifier after 'struct'")?;
        let name = self.current;

        if let Some(existing) = self.table().get(name.lexeme) {
            let line = existing.annotation.declared_on_line;
            return Err(self.redeclaration_at(
                name,
                line,
                format!("struct '{}' has already been declared", name.lexeme),
            ));
        }
        self.table_mut().insert(Symbol::new(
            name,
            Annotation::from_token_kind(TokenKind::Struct),
            DeclState::Declared,
        ));

        self.push_shadow(SymbolTable::new());

        self.consume(TokenKind::LCurly, "expected '{' after struct declaration")?;

        let mut body = Vec::new();
        while !self.next_is(TokenKind::RCurly) && !self.next_is(TokenKind::Eof) {
            body.push(self.statement()?);
        }

        self.consume(TokenKind::RCurly, "expected '}' after struct body")?;

        let fields = self.pop_shadow();

        if body.is_empty() {
            return Err(self.error_at(
                name,
                ErrorKind::EmptyStructBody,
                format!("struct '{}' has an empty body", name.lexeme),
            ));
        }

        let mut symbol = Symbol::new(
            name,
            Annotation::from_token_kind(TokenKind::Struct),
            DeclState::Defined,
        );
        symbol.nested = Some(Box::new(fields));
        let stored = self.table_mut().insert(symbol);

        Ok(Expr::StructDecl(StructDeclExpr {
            name: stored.token,
            annotation: stored.annotation,
            body,
        }))
    }

    /// A function declaration or definition; the identifier rule has
    /// consumed `name (` and resolved `symbol`.
    pub(crate) fn function_declaration(&mut self, symbol: Symbol<'src>) -> PResult<Expr<'src>> {
        let declared_before = symbol.state == DeclState::Declared;

        let mut params_table = SymbolTable::new();
        let params = self.function_params(&mut params_table, &symbol)?;
        let return_type = self.function_return_type()?;
        let (body, fn_table) = self.function_body(params_table)?;

        if declared_before && body.is_none() {
            let line = symbol.annotation.declared_on_line;
            return Err(self
                .error_at(
                    symbol.token,
                    ErrorKind::Redeclaration,
                    format!(
                        "double declaration of function '{}'",
                        symbol.token.lexeme
                    ),
                )
                .with_note(format!("previously declared on line {}", line)));
        }

        let mut updated = match self.table().get(symbol.token.lexeme) {
            Some(s) => s.clone(),
            None => symbol,
        };
        if !declared_before {
            updated.annotation = Annotation::function(return_type.token.kind);
        }
        updated.state = if body.is_none() {
            DeclState::Declared
        } else {
            DeclState::Defined
        };
        updated.nested = Some(Box::new(fn_table));
        let stored = self.table_mut().insert(updated);

        Ok(Expr::Function(FunctionExpr {
            name: stored.token,
            annotation: stored.annotation,
            params,
            return_type,
            body,
        }))
    }

    /// Zero or more `Type IDENT` parameters separated by commas.
    ///
    /// Each parameter lands in the function's parameter table (used for
    /// name-collision checks) and is registered on the function symbol
    /// in order. Re-listing parameters while defining a previously
    /// declared function is legal.
    fn function_params(
        &mut self,
        params_table: &mut SymbolTable<'src>,
        fn_symbol: &Symbol<'src>,
    ) -> PResult<Vec<Param<'src>>> {
        let mut params = Vec::new();

        while !self.next_is(TokenKind::RParen) && !self.next_is(TokenKind::Eof) {
            self.consume_any_type("expected a parameter type")?;
            let type_token = self.current;

            self.consume(
                TokenKind::Identifier,
                "expected identifier after parameter type",
            )?;
            let param_token = self.current;

            let fn_state = self.table().get(fn_symbol.token.lexeme).map(|s| s.state);
            if params_table.contains(param_token.lexeme) && fn_state != Some(DeclState::Declared) {
                return Err(self.error_at(
                    param_token,
                    ErrorKind::DuplicateParameter,
                    format!("duplicate parameter name '{}'", param_token.lexeme),
                ));
            }

            let stored = params_table.insert(Symbol::new(
                param_token,
                Annotation::from_token_kind(type_token.kind),
                DeclState::FnParam,
            ));
            self.table_mut()
                .register_fn_param(fn_symbol.token.lexeme, stored.clone());

            params.push(Param {
                token: stored.token,
                annotation: stored.annotation,
            });

            if !self.match_token(TokenKind::Comma)? && !self.next_is(TokenKind::RParen) {
                return Err(self.error_at(
                    self.next,
                    ErrorKind::ExpectedToken,
                    format!(
                        "expected ',' or ')' in parameter list, got {}",
                        self.next.kind
                    ),
                ));
            }
        }

        Ok(params)
    }

    /// `) :: Type` after the parameter list.
    fn function_return_type(&mut self) -> PResult<ReturnType<'src>> {
        self.consume(TokenKind::RParen, "expected ')' after function parameters")?;
        self.consume(
            TokenKind::ColonColon,
            "expected '::' after function parameters",
        )?;
        self.consume_any_type("expected a return type after '::'")?;

        let token = self.current;
        Ok(ReturnType {
            token,
            annotation: Annotation::from_token_kind(token.kind),
        })
    }

    /// The function body, or nothing for a declaration.
    ///
    /// While the body parses, the parameter table shadows the current
    /// scope table; locals land next to the parameters. The table is
    /// handed back so the caller can attach it to the function symbol.
    fn function_body(
        &mut self,
        params_table: SymbolTable<'src>,
    ) -> PResult<(Option<Block<'src>>, SymbolTable<'src>)> {
        if self.next_is(TokenKind::Semicolon) {
            return Ok((None, params_table));
        }

        self.consume(TokenKind::LCurly, "expected '{' to begin function body")?;

        self.push_shadow(params_table);

        let mut stmts = Vec::new();
        while !self.next_is(TokenKind::RCurly) && !self.next_is(TokenKind::Eof) {
            match self.statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(diag) => {
                    self.pop_shadow();
                    return Err(diag);
                },
            }
        }

        let fn_table = self.pop_shadow();

        self.consume(TokenKind::RCurly, "expected '}' after function body")?;

        Ok((Some(stmts), fn_table))
    }

    /// A call's argument list: identifiers, literals, and nested calls,
    /// comma-separated, trailing comma allowed.
    pub(crate) fn function_call(&mut self, name: Token<'src>) -> PResult<Expr<'src>> {
        let mut args = Vec::new();

        while !self.next_is(TokenKind::RParen) && !self.next_is(TokenKind::Eof) {
            if self.next_is(TokenKind::Identifier) {
                self.advance()?;
                let token = self.current;

                let resolved = match self.table().get(token.lexeme) {
                    Some(s) => Some(s.clone()),
                    None => self.exists_in_outer_scope(token.lexeme).cloned(),
                };
                let symbol = match resolved {
                    Some(s) => s,
                    None => {
                        return Err(self.error_at(
                            token,
                            ErrorKind::UndeclaredIdentifier,
                            format!("undeclared identifier '{}' in argument list", token.lexeme),
                        ));
                    },
                };

                if self.match_token(TokenKind::LParen)? {
                    args.push(self.function_call(token)?);
                } else {
                    args.push(Expr::Identifier(IdentExpr {
                        token,
                        annotation: symbol.annotation,
                        index: None,
                    }));
                }
            } else if self.next.kind.is_literal() {
                self.advance()?;
                args.push(Expr::Literal(LiteralExpr {
                    token: self.current,
                    annotation: Annotation::from_token_kind(self.current.kind),
                }));
            } else {
                return Err(self.error_at(
                    self.next,
                    ErrorKind::ExpectedToken,
                    format!(
                        "expected identifier or literal as call argument, got {}",
                        self.next.kind
                    ),
                ));
            }

            if !self.match_token(TokenKind::Comma)? && !self.next_is(TokenKind::RParen) {
                return Err(self.error_at(
                    self.next,
                    ErrorKind::ExpectedToken,
                    format!(
                        "expected ',' or ')' in argument list, got {}",
                        self.next.kind
                    ),
                ));
            }
        }

        self.consume(TokenKind::RParen, "expected ')' after call arguments")?;

        Ok(Expr::Call(CallExpr {
            name,
            args,
            annotation: Annotation::none(),
        }))
    }
}
