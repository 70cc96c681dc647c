//! lodec-par - The Lode parser.
//!
//! A Pratt (top-down operator precedence) parser that consumes tokens
//! one lookahead at a time, incrementally populates a scoped symbol
//! table, rejects redeclarations and undeclared uses on the fly, and
//! decorates AST nodes with type annotations for the downstream checker.
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators |
//! |-------|-----------|
//! | ASSIGNMENT | `=` and the terse forms (`+=`, `-=`, `*=`, `/=`, `%=`, `!=`, `^=`, `&=`, `\|=`, `~=`, `<<=`, `>>=`) |
//! | TERNARY | `?:` |
//! | LOGICAL | `==`, `!`, `&&`, `\|\|`, `<`, `>`, `<=`, `>=` |
//! | BITWISE | `~`, `&`, `^`, `\|`, `<<`, `>>` |
//! | TERM | `+`, `-` |
//! | FACTOR | `*`, `/`, `%` |
//! | UNARY | prefix `-`, `!`, `~` |
//! | PREFIX_INC_DEC | prefix `++`, `--` |
//! | SUBSCRIPT | `[` |
//!
//! Each token kind maps to an optional prefix rule, an optional infix
//! rule, and an infix precedence; [`Parser::parse_precedence`] drives
//! the table. The first error aborts the parse and is returned as a
//! [`Diagnostic`].
//!
//! # Example
//!
//! ```
//! use lodec_par::Parser;
//!
//! let source = "i32 x = 5; x = x + 1;";
//! let mut parser = Parser::new(source).unwrap();
//! let program = parser.build_ast().unwrap();
//! assert_eq!(program.stmts.len(), 2);
//! ```

pub mod annotation;
pub mod ast;
pub mod print;
pub mod symbol;

mod edge_cases;
mod expr;
mod items;
mod stmt;

pub use annotation::{Annotation, TypeCategory};
pub use ast::*;
pub use print::{print_ast, render_ast};
pub use symbol::{DeclState, Scope, Symbol, SymbolTable};

use lodec_lex::{Lexer, Token, TokenKind};
use lodec_util::{Diagnostic, ErrorKind};

/// Result alias for parser operations.
pub type PResult<T> = std::result::Result<T, Diagnostic>;

/// Infix binding strength, compared with the rule table's precedence
/// column by [`Parser::parse_precedence`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    Assignment,
    Ternary,
    Logical,
    Bitwise,
    Term,
    Factor,
    Unary,
    PrefixIncDec,
    Subscript,
}

impl Precedence {
    /// The next-tighter level; used for left associativity.
    fn one_higher(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Ternary,
            Precedence::Ternary => Precedence::Logical,
            Precedence::Logical => Precedence::Bitwise,
            Precedence::Bitwise => Precedence::Term,
            Precedence::Term => Precedence::Factor,
            Precedence::Factor => Precedence::Unary,
            Precedence::Unary => Precedence::PrefixIncDec,
            Precedence::PrefixIncDec | Precedence::Subscript => Precedence::Subscript,
        }
    }
}

type PrefixFn<'src> = fn(&mut Parser<'src>, bool) -> PResult<Expr<'src>>;
type InfixFn<'src> = fn(&mut Parser<'src>, Expr<'src>, bool) -> PResult<Expr<'src>>;

/// One row of the parse rule table.
struct ParseRule<'src> {
    prefix: Option<PrefixFn<'src>>,
    infix: Option<InfixFn<'src>>,
    precedence: Precedence,
}

impl<'src> ParseRule<'src> {
    fn prefix(f: PrefixFn<'src>) -> Self {
        Self {
            prefix: Some(f),
            infix: None,
            precedence: Precedence::None,
        }
    }

    fn infix(f: InfixFn<'src>, precedence: Precedence) -> Self {
        Self {
            prefix: None,
            infix: Some(f),
            precedence,
        }
    }

    fn none() -> Self {
        Self {
            prefix: None,
            infix: None,
            precedence: Precedence::None,
        }
    }
}

/// The parse context: lexer, three-token lookahead, scope stack, and
/// the stack of shadowed nested tables. One instance per compile, no
/// hidden state.
pub struct Parser<'src> {
    lexer: Lexer<'src>,

    pub(crate) current: Token<'src>,
    pub(crate) next: Token<'src>,
    pub(crate) after_next: Token<'src>,

    pub(crate) scope: Scope<'src>,

    /// Nested tables (struct fields, function parameters) that shadow
    /// the current scope table while their body is being parsed.
    pub(crate) shadow: Vec<SymbolTable<'src>>,
}

impl<'src> Parser<'src> {
    /// Creates a parser over `source` and primes the lookahead.
    ///
    /// Fails if the first tokens are lexically invalid.
    pub fn new(source: &'src str) -> PResult<Self> {
        Self::with_lexer(Lexer::new(source))
    }

    /// Like [`Parser::new`], stamping `file` onto every token.
    pub fn with_file(source: &'src str, file: &'src str) -> PResult<Self> {
        Self::with_lexer(Lexer::with_file(source, file))
    }

    fn with_lexer(lexer: Lexer<'src>) -> PResult<Self> {
        let mut parser = Self {
            lexer,
            current: Token::EOF,
            next: Token::EOF,
            after_next: Token::EOF,
            scope: Scope::new(),
            shadow: Vec::new(),
        };

        // Two advances prime the lookahead: `current` stays zeroed,
        // `next` holds the first real token.
        parser.advance()?;
        parser.advance()?;

        Ok(parser)
    }

    /// Parses to completion and returns the program root.
    pub fn build_ast(&mut self) -> PResult<Program<'src>> {
        let mut stmts = Vec::new();

        while !self.match_token(TokenKind::Eof)? {
            stmts.push(self.statement()?);
        }

        Ok(Program { stmts })
    }

    /// The module-global symbol table.
    pub fn globals(&self) -> &SymbolTable<'src> {
        self.scope.globals()
    }

    /// Consumes the parser and hands the global table to the caller.
    pub fn into_globals(self) -> SymbolTable<'src> {
        self.scope.into_globals()
    }

    /// Current scope depth; 0 outside any block.
    pub fn scope_depth(&self) -> usize {
        self.scope.depth()
    }

    // =========================================================================
    // TOKEN STREAM
    // =========================================================================

    /// Shifts the lookahead left and pulls a new token. An ERROR token
    /// arriving in `next` is fatal.
    pub(crate) fn advance(&mut self) -> PResult<()> {
        self.current = self.next;
        self.next = self.after_next;
        self.after_next = self.lexer.scan_token();

        if self.next.kind == TokenKind::Error {
            return Err(self.error_at(self.next, ErrorKind::Lexical, self.next.lexeme.to_string()));
        }

        Ok(())
    }

    pub(crate) fn next_is(&self, kind: TokenKind) -> bool {
        self.next.kind == kind
    }

    pub(crate) fn after_next_is(&self, kind: TokenKind) -> bool {
        self.after_next.kind == kind
    }

    /// Consumes the next token if it has the given kind.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> PResult<bool> {
        if !self.next_is(kind) {
            return Ok(false);
        }
        self.advance()?;
        Ok(true)
    }

    /// Requires the next token to have the given kind.
    pub(crate) fn consume(&mut self, kind: TokenKind, what: &str) -> PResult<()> {
        if self.next_is(kind) {
            return self.advance();
        }

        Err(self.error_at(
            self.next,
            ErrorKind::ExpectedToken,
            format!("{}, got {} instead", what, self.next.kind),
        ))
    }

    /// Requires the next token to be a type keyword.
    pub(crate) fn consume_any_type(&mut self, what: &str) -> PResult<()> {
        if self.next.kind.is_type_keyword() {
            return self.advance();
        }

        Err(self.error_at(
            self.next,
            ErrorKind::ExpectedToken,
            format!("{}, got {} instead", what, self.next.kind),
        ))
    }

    // =========================================================================
    // SYMBOL TABLES
    // =========================================================================

    /// The table declarations currently land in: the innermost shadowed
    /// nested table if one is active, else the innermost scope table.
    pub(crate) fn table(&self) -> &SymbolTable<'src> {
        match self.shadow.last() {
            Some(table) => table,
            None => self.scope.current(),
        }
    }

    /// Mutable access to the current table.
    pub(crate) fn table_mut(&mut self) -> &mut SymbolTable<'src> {
        if let Some(table) = self.shadow.last_mut() {
            table
        } else {
            self.scope.current_mut()
        }
    }

    /// Shadows the current table with a nested one.
    pub(crate) fn push_shadow(&mut self, table: SymbolTable<'src>) {
        self.shadow.push(table);
    }

    /// Restores the previously current table, returning the nested one
    /// so the caller can attach it to its owning symbol.
    pub(crate) fn pop_shadow(&mut self) -> SymbolTable<'src> {
        self.shadow.pop().unwrap_or_default()
    }

    /// Looks `name` up in the enclosing scopes. With a shadow active the
    /// whole scope stack counts as "outer".
    pub(crate) fn exists_in_outer_scope(&self, name: &str) -> Option<&Symbol<'src>> {
        self.scope.find_outer(name, !self.shadow.is_empty())
    }

    // =========================================================================
    // PRATT CORE
    // =========================================================================

    /// The rule table. Exhaustive over token kinds; absent entries mean
    /// the token can start or continue nothing.
    fn rule(kind: TokenKind) -> ParseRule<'src> {
        use TokenKind::*;

        match kind {
            I8 | I16 | I32 | I64 | U8 | U16 | U32 | U64 | F32 | F64 | Char | Str | Bool
            | Void => ParseRule::prefix(Self::type_declaration),
            Enum => ParseRule::prefix(Self::enum_declaration),
            Struct => ParseRule::prefix(Self::struct_declaration),

            Identifier => ParseRule::prefix(Self::identifier),

            BinaryLiteral | HexLiteral | IntLiteral | FloatLiteral | EnumLiteral | CharLiteral
            | BoolLiteral | StringLiteral => ParseRule::prefix(Self::literal),

            LParen => ParseRule::prefix(Self::grouping),
            LBracket => ParseRule::infix(Self::subscript, Precedence::Subscript),

            EqEq | AndAnd | OrOr | Lt | Gt | LtEq | GtEq => {
                ParseRule::infix(Self::binary, Precedence::Logical)
            },
            Not => ParseRule {
                prefix: Some(Self::unary),
                infix: None,
                precedence: Precedence::Logical,
            },

            Ampersand | Caret | Pipe | Shl | Shr => {
                ParseRule::infix(Self::binary, Precedence::Bitwise)
            },
            Tilde => ParseRule {
                prefix: Some(Self::unary),
                infix: None,
                precedence: Precedence::Bitwise,
            },

            Plus => ParseRule::infix(Self::binary, Precedence::Term),
            Minus => ParseRule {
                prefix: Some(Self::unary),
                infix: Some(Self::binary),
                precedence: Precedence::Term,
            },
            Star | Slash | Percent => ParseRule::infix(Self::binary, Precedence::Factor),

            PlusPlus | MinusMinus => ParseRule {
                prefix: Some(Self::unary),
                infix: None,
                precedence: Precedence::PrefixIncDec,
            },

            _ => ParseRule::none(),
        }
    }

    /// The infix precedence of a token kind (the rule table's
    /// precedence column).
    pub(crate) fn precedence_of(kind: TokenKind) -> Precedence {
        Self::rule(kind).precedence
    }

    /// The Pratt loop: advance, apply the prefix rule, then fold infix
    /// rules while the next token binds at least as tightly as `level`.
    pub(crate) fn parse_precedence(&mut self, level: Precedence) -> PResult<Expr<'src>> {
        self.advance()?;

        let prefix = match Self::rule(self.current.kind).prefix {
            Some(f) => f,
            None => {
                return Err(self.error_at(
                    self.current,
                    ErrorKind::NoParseRule,
                    format!("no prefix rule for {}", self.current.kind),
                ));
            },
        };

        let can_assign = level <= Precedence::Assignment;
        let mut node = prefix(self, can_assign)?;

        while level <= Self::rule(self.next.kind).precedence {
            self.advance()?;

            let infix = match Self::rule(self.current.kind).infix {
                Some(f) => f,
                None => {
                    return Err(self.error_at(
                        self.current,
                        ErrorKind::NoParseRule,
                        format!("no infix rule for {}", self.current.kind),
                    ));
                },
            };

            node = infix(self, node, can_assign)?;
        }

        Ok(node)
    }

    /// Parses one full expression.
    pub(crate) fn expression(&mut self) -> PResult<Expr<'src>> {
        self.parse_precedence(Precedence::Assignment)
    }

    /// Next-tighter precedence, for left-associative infix parsing.
    pub(crate) fn next_level(precedence: Precedence) -> Precedence {
        precedence.one_higher()
    }

    // =========================================================================
    // DIAGNOSTICS
    // =========================================================================

    /// Builds a diagnostic anchored at `token`.
    pub(crate) fn error_at(
        &self,
        token: Token<'src>,
        kind: ErrorKind,
        message: String,
    ) -> Diagnostic {
        let diag = Diagnostic::error(kind, message).at_line(token.line, token.lexeme);
        match token.file {
            Some(file) => diag.in_file(file),
            None => diag,
        }
    }

    /// Builds a redeclaration diagnostic citing the previous
    /// declaration's line.
    pub(crate) fn redeclaration_at(
        &self,
        token: Token<'src>,
        previous_line: u32,
        message: String,
    ) -> Diagnostic {
        self.error_at(token, ErrorKind::Redeclaration, message)
            .with_note(format!("previously declared on line {}", previous_line))
    }
}
