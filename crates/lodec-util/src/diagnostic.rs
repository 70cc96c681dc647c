//! Diagnostic types - error reporting for the front-end.
//!
//! A [`Diagnostic`] carries everything the driver needs to print a fatal
//! error: a severity [`Level`], an [`ErrorKind`] tag, the formatted
//! message, and the offending token's line and lexeme. Redeclaration
//! diagnostics additionally carry a note naming the line of the previous
//! declaration.
//!
//! Diagnostics own their strings so they can outlive the source buffer
//! the lexer borrowed from.
//!
//! # Examples
//!
//! ```
//! use lodec_util::{Diagnostic, ErrorKind};
//!
//! let diag = Diagnostic::error(ErrorKind::Redeclaration, "redeclaration of identifier 'x'")
//!     .at_line(3, "x")
//!     .with_note("previously declared on line 1");
//! assert_eq!(diag.line, 3);
//! assert_eq!(diag.kind, ErrorKind::Redeclaration);
//! ```

use std::fmt;

use thiserror::Error;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// An error that aborts the compile.
    Error,
    /// A warning that does not abort the compile.
    Warning,
    /// Additional information attached to another diagnostic.
    Note,
    /// A suggestion for fixing an issue.
    Help,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

/// The closed taxonomy of front-end errors.
///
/// `TypeDisagreement` is reserved for the downstream checker, which
/// consumes the annotations this front-end produces; the parser itself
/// never raises it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Any error the lexer surfaced as an in-band ERROR token
    /// (unterminated string, multi-line string, over-wide hex or binary
    /// constant, unexpected character).
    Lexical,
    /// A specific token was required and something else was found.
    ExpectedToken,
    /// No prefix or infix rule exists for the current token.
    NoParseRule,
    /// Identifier redeclared in the current scope.
    Redeclaration,
    /// Enum member name already declared.
    DuplicateEnumMember,
    /// Struct body contained no fields.
    EmptyStructBody,
    /// Two function parameters share a name.
    DuplicateParameter,
    /// Use of an identifier no scope declares.
    UndeclaredIdentifier,
    /// Call of a function no scope declares.
    UndeclaredFunction,
    /// Call of a function that is declared but has no body yet.
    UndefinedFunction,
    /// Increment, decrement, or terse assignment of a variable that has
    /// no value yet.
    UndefinedVariable,
    /// Assignment in a position where assignment is not allowed.
    InvalidAssignment,
    /// Integer literal outside the i64 range.
    IntOverflow,
    /// Integer literal outside the u64 range.
    UintOverflow,
    /// Float literal that overflows or underflows f64.
    FloatOverflow,
    /// Declared and actual types disagree (raised by the checker, not
    /// the parser).
    TypeDisagreement,
}

impl ErrorKind {
    /// Short tag used when rendering, e.g. `error[redeclaration]`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::ExpectedToken => "expected-token",
            ErrorKind::NoParseRule => "no-parse-rule",
            ErrorKind::Redeclaration => "redeclaration",
            ErrorKind::DuplicateEnumMember => "duplicate-enum-member",
            ErrorKind::EmptyStructBody => "empty-struct-body",
            ErrorKind::DuplicateParameter => "duplicate-parameter",
            ErrorKind::UndeclaredIdentifier => "undeclared-identifier",
            ErrorKind::UndeclaredFunction => "undeclared-function",
            ErrorKind::UndefinedFunction => "undefined-function",
            ErrorKind::UndefinedVariable => "undefined-variable",
            ErrorKind::InvalidAssignment => "invalid-assignment",
            ErrorKind::IntOverflow => "i64-overflow",
            ErrorKind::UintOverflow => "u64-overflow",
            ErrorKind::FloatOverflow => "f64-overflow",
            ErrorKind::TypeDisagreement => "type-disagreement",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal front-end diagnostic.
///
/// Construction is builder-style: [`Diagnostic::error`] sets the kind and
/// message, [`at_line`](Diagnostic::at_line) attaches the offending
/// token's position, [`with_note`](Diagnostic::with_note) appends
/// secondary information.
#[derive(Clone, Debug, Error)]
#[error("{level}[{kind}]: {message} (line {line}, at '{lexeme}')")]
pub struct Diagnostic {
    /// Severity level.
    pub level: Level,
    /// Error-kind tag.
    pub kind: ErrorKind,
    /// Formatted message.
    pub message: String,
    /// 1-based line of the offending token.
    pub line: u32,
    /// Lexeme of the offending token.
    pub lexeme: String,
    /// File the token came from, when known.
    pub file: Option<String>,
    /// Secondary notes, e.g. the previous declaration site.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Create an error diagnostic with no position attached yet.
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            kind,
            message: message.into(),
            line: 0,
            lexeme: String::new(),
            file: None,
            notes: Vec::new(),
        }
    }

    /// Attach the offending token's line and lexeme.
    pub fn at_line(mut self, line: u32, lexeme: impl Into<String>) -> Self {
        self.line = line;
        self.lexeme = lexeme.into();
        self
    }

    /// Attach the originating file name.
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Append a secondary note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Render the diagnostic the way the driver prints it.
    pub fn render(&self) -> String {
        let mut out = format!("{}[{}]: {}", self.level, self.kind, self.message);
        match &self.file {
            Some(file) => out.push_str(&format!("\n  --> {}:{}: '{}'", file, self.line, self.lexeme)),
            None => out.push_str(&format!("\n  --> line {}: '{}'", self.line, self.lexeme)),
        }
        for note in &self.notes {
            out.push_str(&format!("\n  note: {}", note));
        }
        out
    }

    /// Print the diagnostic to stderr.
    ///
    /// Emission is synchronous; the caller is expected to abort the
    /// compile afterwards.
    pub fn emit(&self) {
        eprintln!("{}", self.render());
    }
}
