//! Statement parsing - if, while, for, break, continue, return, blocks,
//! and expression statements.

use lodec_lex::TokenKind;
use lodec_util::ErrorKind;

use crate::annotation::Annotation;
use crate::ast::*;
use crate::{PResult, Parser};

impl<'src> Parser<'src> {
    /// Parses one statement.
    pub(crate) fn statement(&mut self) -> PResult<Stmt<'src>> {
        if self.match_token(TokenKind::If)? {
            return Ok(Stmt::If(self.if_statement()?));
        }
        if self.match_token(TokenKind::While)? {
            return Ok(Stmt::While(self.while_statement()?));
        }
        if self.match_token(TokenKind::For)? {
            return self.for_statement();
        }
        if self.match_token(TokenKind::Break)? {
            return self.break_statement();
        }
        if self.match_token(TokenKind::Continue)? {
            return self.continue_statement();
        }
        if self.match_token(TokenKind::Return)? {
            return self.return_statement();
        }

        let expr = self.expression()?;

        // Enum, struct, and function forms take an optional trailing
        // semicolon; every other expression statement requires one.
        match &expr {
            Expr::EnumDecl(_) | Expr::StructDecl(_) | Expr::Function(_) => {
                self.match_token(TokenKind::Semicolon)?;
            },
            _ => {
                self.consume(
                    TokenKind::Semicolon,
                    "expected ';' after expression statement",
                )?;
            },
        }

        Ok(Stmt::Expr(expr))
    }

    /// `if ( expr ) { block } [ else (if … | { block }) ]`.
    ///
    /// One scope covers both branches; nested `else if` recursion opens
    /// its own.
    fn if_statement(&mut self) -> PResult<IfStmt<'src>> {
        self.consume(TokenKind::LParen, "expected '(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RParen, "expected ')' after if condition")?;

        self.consume(TokenKind::LCurly, "expected '{' to begin if body")?;

        self.scope.begin();

        let then_body = self.block()?;
        let else_arm = if self.match_token(TokenKind::Else)? {
            if self.match_token(TokenKind::If)? {
                Some(ElseArm::ElseIf(Box::new(self.if_statement()?)))
            } else {
                self.consume(TokenKind::LCurly, "expected '{' after 'else'")?;
                Some(ElseArm::Else(self.block()?))
            }
        } else {
            None
        };

        self.scope.end();

        Ok(IfStmt {
            condition,
            then_body,
            else_arm,
        })
    }

    /// `while expr { block }` with an optional trailing semicolon.
    fn while_statement(&mut self) -> PResult<WhileStmt<'src>> {
        let condition = self.expression()?;
        self.consume(TokenKind::LCurly, "expected '{' after while condition")?;
        let body = self.block()?;
        self.match_token(TokenKind::Semicolon)?;

        Ok(WhileStmt { condition, body })
    }

    /// `for ( init-stmt cond-stmt step-expr ) { block }`, desugared to
    /// `init; while (cond) { block; step }`.
    fn for_statement(&mut self) -> PResult<Stmt<'src>> {
        self.consume(TokenKind::LParen, "expected '(' after 'for'")?;

        let init = self.statement()?;
        let condition = match self.statement()? {
            Stmt::Expr(expr) => expr,
            _ => {
                return Err(self.error_at(
                    self.current,
                    ErrorKind::ExpectedToken,
                    "for-loop condition must be an expression statement".to_string(),
                ));
            },
        };
        let step = self.expression()?;

        self.consume(TokenKind::RParen, "expected ')' after for-loop clauses")?;
        self.consume(TokenKind::LCurly, "expected '{' to begin for-loop body")?;

        let mut body = self.block()?;
        body.push(Stmt::Expr(step));

        Ok(Stmt::For(ForStmt {
            init: Box::new(init),
            desugared: WhileStmt { condition, body },
        }))
    }

    /// `break;`
    fn break_statement(&mut self) -> PResult<Stmt<'src>> {
        let token = self.current;
        if !self.next_is(TokenKind::Semicolon) {
            return Err(self.error_at(
                self.next,
                ErrorKind::ExpectedToken,
                format!("expected ';' after 'break', got {} instead", self.next.kind),
            ));
        }
        self.advance()?;

        Ok(Stmt::Break(token))
    }

    /// `continue;`
    fn continue_statement(&mut self) -> PResult<Stmt<'src>> {
        let token = self.current;
        if !self.next_is(TokenKind::Semicolon) {
            return Err(self.error_at(
                self.next,
                ErrorKind::ExpectedToken,
                format!(
                    "expected ';' after 'continue', got {} instead",
                    self.next.kind
                ),
            ));
        }
        self.advance()?;

        Ok(Stmt::Continue(token))
    }

    /// `return [expr];` with the expression's annotation, or void when
    /// the expression is absent.
    fn return_statement(&mut self) -> PResult<Stmt<'src>> {
        let token = self.current;

        let value = if self.next_is(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };

        let annotation = match &value {
            Some(expr) => expr.annotation(),
            None => Annotation::from_token_kind(TokenKind::Void),
        };

        self.consume(TokenKind::Semicolon, "expected ';' after return statement")?;

        Ok(Stmt::Return(ReturnStmt {
            token,
            value,
            annotation,
        }))
    }

    /// Statements up to the closing `}` (which is consumed). The
    /// opening brace was consumed by the caller.
    pub(crate) fn block(&mut self) -> PResult<Block<'src>> {
        let mut stmts = Vec::new();

        while !self.next_is(TokenKind::RCurly) && !self.next_is(TokenKind::Eof) {
            stmts.push(self.statement()?);
        }

        self.consume(TokenKind::RCurly, "expected '}' after block")?;

        Ok(stmts)
    }
}
