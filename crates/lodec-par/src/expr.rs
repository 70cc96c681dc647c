//! Prefix and infix rules for expression parsing.
//!
//! These are the functions the rule table dispatches to. Every rule runs
//! with `current` sitting on the token that triggered it.

use lodec_lex::TokenKind;
use lodec_util::ErrorKind;

use crate::annotation::Annotation;
use crate::ast::*;
use crate::symbol::{DeclState, Symbol};
use crate::{PResult, Parser, Precedence};

impl<'src> Parser<'src> {
    /// Prefix rule for type keywords: a declaration.
    ///
    /// `i32 x`, `i32[10] xs`, `bool flag = true`, and the
    /// `i32 main() :: i32 { … }` form, which re-enters through the
    /// identifier rule.
    pub(crate) fn type_declaration(&mut self, _can_assign: bool) -> PResult<Expr<'src>> {
        let type_token = self.current;
        let mut is_array = false;
        let mut array_size = 0usize;

        if self.match_token(TokenKind::LBracket)? {
            if self.match_token(TokenKind::IntLiteral)? {
                array_size = self.current.lexeme.parse().map_err(|_| {
                    self.error_at(
                        self.current,
                        ErrorKind::IntOverflow,
                        format!("array size '{}' is out of range", self.current.lexeme),
                    )
                })?;
            }
            self.consume(TokenKind::RBracket, "expected ']' after array size")?;
            is_array = true;
        }

        if self.next_is(TokenKind::Identifier) {
            if let Some(existing) = self.table().get(self.next.lexeme) {
                let line = existing.annotation.declared_on_line;
                return Err(self.redeclaration_at(
                    self.next,
                    line,
                    format!("redeclaration of identifier '{}'", self.next.lexeme),
                ));
            }

            let annotation = if is_array {
                Annotation::array(type_token.kind, array_size)
            } else {
                Annotation::from_token_kind(type_token.kind)
            };
            let symbol = Symbol::new(self.next, annotation, DeclState::Declared);
            self.table_mut().insert(symbol);
        }

        self.consume(
            TokenKind::Identifier,
            &format!("expected identifier after type {}", type_token.kind),
        )?;

        self.identifier(true)
    }

    /// Prefix rule for identifiers.
    ///
    /// Disambiguates function declarations, function calls, array
    /// subscripting, postfix increment/decrement, assignment, terse
    /// assignment, and plain references.
    pub(crate) fn identifier(&mut self, can_assign: bool) -> PResult<Expr<'src>> {
        let identifier_token = self.current;
        let mut symbol = self.table().get(identifier_token.lexeme).cloned();

        if self.match_token(TokenKind::LParen)? {
            // `name(type …` or `name() ::` is a declaration; anything
            // else in the parentheses makes it a call.
            let is_declaration = self.next.kind.is_type_keyword()
                || (self.next_is(TokenKind::RParen) && self.after_next_is(TokenKind::ColonColon));

            if is_declaration {
                if let Some(existing) = &symbol {
                    if existing.state != DeclState::Declared {
                        let line = existing.annotation.declared_on_line;
                        return Err(self.redeclaration_at(
                            identifier_token,
                            line,
                            format!(
                                "function '{}' has been redeclared",
                                identifier_token.lexeme
                            ),
                        ));
                    }
                }

                if symbol.is_none() {
                    self.table_mut().insert(Symbol::new(
                        identifier_token,
                        Annotation::function(TokenKind::Void),
                        DeclState::Uninitialized,
                    ));
                }
                let symbol = match self.table().get(identifier_token.lexeme) {
                    Some(s) => s.clone(),
                    None => Symbol::new(
                        identifier_token,
                        Annotation::function(TokenKind::Void),
                        DeclState::Uninitialized,
                    ),
                };

                return self.function_declaration(symbol);
            }

            let resolved = match symbol {
                Some(s) => Some(s),
                None => self.exists_in_outer_scope(identifier_token.lexeme).cloned(),
            };
            match resolved {
                None => {
                    return Err(self.error_at(
                        identifier_token,
                        ErrorKind::UndeclaredFunction,
                        format!("undeclared function '{}'", identifier_token.lexeme),
                    ));
                },
                Some(s) if s.state != DeclState::Defined => {
                    return Err(self.error_at(
                        identifier_token,
                        ErrorKind::UndefinedFunction,
                        format!(
                            "can't call undefined function '{}'",
                            identifier_token.lexeme
                        ),
                    ));
                },
                Some(_) => {},
            }

            return self.function_call(identifier_token);
        }

        if symbol.is_none() {
            symbol = self.exists_in_outer_scope(identifier_token.lexeme).cloned();
        }
        let symbol = match symbol {
            Some(s) => s,
            None => {
                return Err(self.error_at(
                    identifier_token,
                    ErrorKind::UndeclaredIdentifier,
                    format!("undeclared identifier '{}'", identifier_token.lexeme),
                ));
            },
        };

        if symbol.state == DeclState::None && can_assign {
            let line = symbol.annotation.declared_on_line;
            return Err(self.redeclaration_at(
                identifier_token,
                line,
                format!(
                    "identifier '{}' has been redeclared",
                    identifier_token.lexeme
                ),
            ));
        }

        let mut index = None;
        if self.match_token(TokenKind::LBracket)? {
            index = Some(Box::new(self.subscript_index()?));
        }

        if self.match_token(TokenKind::PlusPlus)? {
            if symbol.state != DeclState::Defined {
                return Err(self.error_at(
                    identifier_token,
                    ErrorKind::UndefinedVariable,
                    format!(
                        "cannot increment undefined variable '{}'",
                        identifier_token.lexeme
                    ),
                ));
            }
            return Ok(Expr::PostfixIncrement(IncDecExpr {
                token: identifier_token,
                annotation: symbol.annotation,
            }));
        }

        if self.match_token(TokenKind::MinusMinus)? {
            if symbol.state != DeclState::Defined {
                return Err(self.error_at(
                    identifier_token,
                    ErrorKind::UndefinedVariable,
                    format!(
                        "cannot decrement undefined variable '{}'",
                        identifier_token.lexeme
                    ),
                ));
            }
            return Ok(Expr::PostfixDecrement(IncDecExpr {
                token: identifier_token,
                annotation: symbol.annotation,
            }));
        }

        if self.match_token(TokenKind::Eq)? {
            if !can_assign {
                return Err(self.error_at(
                    identifier_token,
                    ErrorKind::InvalidAssignment,
                    format!("cannot assign to identifier '{}'", identifier_token.lexeme),
                ));
            }

            // The target becomes DEFINED before the right-hand side
            // parses, so `i32 x = x;` resolves.
            let stored = self.table_mut().insert(Symbol::new(
                identifier_token,
                symbol.annotation,
                DeclState::Defined,
            ));
            let value = self.expression()?;
            return Ok(Expr::Assignment(AssignExpr {
                target: stored.token,
                annotation: stored.annotation,
                index,
                value: Box::new(value),
            }));
        }

        if self.next.kind.is_terse_assignment() {
            self.advance()?;
            if symbol.state != DeclState::Defined {
                return Err(self.error_at(
                    identifier_token,
                    ErrorKind::UndefinedVariable,
                    format!(
                        "cannot perform a terse assignment on undefined variable '{}'",
                        identifier_token.lexeme
                    ),
                ));
            }
            return self.terse_assignment(symbol);
        }

        // Plain reference. The symbol decides between declaration and
        // identifier; the use-site token keeps its own line for later
        // error messages.
        let ident = IdentExpr {
            token: identifier_token,
            annotation: symbol.annotation,
            index,
        };
        Ok(if symbol.state == DeclState::Declared {
            Expr::Declaration(ident)
        } else {
            Expr::Identifier(ident)
        })
    }

    /// Infix-position terse assignment; `current` is the operator.
    fn terse_assignment(&mut self, symbol: Symbol<'src>) -> PResult<Expr<'src>> {
        let op = self.current;
        let value = self.parse_precedence(Precedence::Assignment)?;

        let target = IdentExpr {
            token: symbol.token,
            annotation: symbol.annotation,
            index: None,
        };
        Ok(Expr::TerseAssignment(TerseAssignExpr {
            op,
            target: Box::new(Expr::Identifier(target)),
            value: Box::new(value),
        }))
    }

    /// Prefix rule for `-`, `!`, `~`, and the prefix `++`/`--` forms.
    pub(crate) fn unary(&mut self, _can_assign: bool) -> PResult<Expr<'src>> {
        let op = self.current;
        let operand = self.parse_precedence(Precedence::Unary)?;
        let node = UnaryExpr {
            op,
            operand: Box::new(operand),
        };

        Ok(match op.kind {
            TokenKind::PlusPlus => Expr::PrefixIncrement(node),
            TokenKind::MinusMinus => Expr::PrefixDecrement(node),
            TokenKind::Not | TokenKind::Minus | TokenKind::Tilde => Expr::Unary(node),
            _ => {
                return Err(self.error_at(
                    op,
                    ErrorKind::NoParseRule,
                    format!("unknown unary operator {}", op.kind),
                ));
            },
        })
    }

    /// Infix rule for the binary operators; left-associative.
    pub(crate) fn binary(&mut self, lhs: Expr<'src>, _can_assign: bool) -> PResult<Expr<'src>> {
        let op = self.current;
        let precedence = Self::precedence_of(op.kind);
        let rhs = self.parse_precedence(Self::next_level(precedence))?;

        Ok(Expr::Binary(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }))
    }

    /// Prefix rule for `(`: grouping, or the head of a ternary.
    pub(crate) fn grouping(&mut self, _can_assign: bool) -> PResult<Expr<'src>> {
        let inner = self.expression()?;
        self.consume(TokenKind::RParen, "missing ')' after expression")?;

        if self.next_is(TokenKind::Question) {
            return self.ternary(inner);
        }

        Ok(inner)
    }

    /// `( condition ) ? if_true : if_false`.
    fn ternary(&mut self, condition: Expr<'src>) -> PResult<Expr<'src>> {
        self.consume(TokenKind::Question, "expected '?' after ternary condition")?;
        let if_true = self.expression()?;

        self.consume(TokenKind::Colon, "expected ':' after ternary expression")?;
        let if_false = self.expression()?;

        Ok(Expr::Ternary(TernaryExpr {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        }))
    }

    /// Prefix rule for literal tokens.
    pub(crate) fn literal(&mut self, _can_assign: bool) -> PResult<Expr<'src>> {
        Ok(Expr::Literal(LiteralExpr {
            token: self.current,
            annotation: Annotation::from_token_kind(self.current.kind),
        }))
    }

    /// Infix rule for `[`: subscripting whatever parsed so far.
    pub(crate) fn subscript(&mut self, lhs: Expr<'src>, _can_assign: bool) -> PResult<Expr<'src>> {
        let index = self.subscript_index()?;
        Ok(Expr::Subscript(SubscriptExpr {
            target: Box::new(lhs),
            index: Box::new(index),
        }))
    }

    /// The bracketed index: a defined identifier or an int literal,
    /// then `]`. The opening bracket is already consumed.
    pub(crate) fn subscript_index(&mut self) -> PResult<Expr<'src>> {
        let index = if self.match_token(TokenKind::Identifier)? {
            let token = self.current;
            match self.table().get(token.lexeme).cloned() {
                None => {
                    return Err(self.error_at(
                        token,
                        ErrorKind::UndeclaredIdentifier,
                        format!(
                            "can't subscript with undeclared identifier '{}'",
                            token.lexeme
                        ),
                    ));
                },
                Some(s) if s.state != DeclState::Defined => {
                    return Err(self.error_at(
                        token,
                        ErrorKind::UndefinedVariable,
                        format!(
                            "can't subscript with uninitialized identifier '{}'",
                            token.lexeme
                        ),
                    ));
                },
                Some(s) => Expr::Identifier(IdentExpr {
                    token,
                    annotation: s.annotation,
                    index: None,
                }),
            }
        } else if self.match_token(TokenKind::IntLiteral)? {
            Expr::Literal(LiteralExpr {
                token: self.current,
                annotation: Annotation::from_token_kind(self.current.kind),
            })
        } else {
            return Err(self.error_at(
                self.next,
                ErrorKind::ExpectedToken,
                format!(
                    "expected identifier or int literal as array index, got {}",
                    self.next.kind
                ),
            ));
        };

        self.consume(TokenKind::RBracket, "expected ']' after array index")?;
        Ok(index)
    }
}
