//! Error types for literal construction and the value primitives.

use lodec_lex::Token;
use lodec_util::{Diagnostic, ErrorKind};
use thiserror::Error;

use crate::ValType;

/// Errors raised by [`Value::new`](crate::Value::new) and the logical
/// primitives.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValueError {
    /// Integer literal outside the i64 range.
    #[error("I64 Overflow in '{lexeme}'")]
    IntOverflow { lexeme: String },

    /// Integer literal outside the u64 range.
    #[error("U64 Overflow in '{lexeme}'")]
    UintOverflow { lexeme: String },

    /// Float literal that overflows f64 or underflows to a subnormal
    /// from non-zero input.
    #[error("F64 Over/Underflow in '{lexeme}'")]
    FloatOverflow { lexeme: String },

    /// Literal whose digits do not parse under the selected radix.
    #[error("Malformed literal '{lexeme}'")]
    Malformed { lexeme: String },

    /// Logical primitive applied to a non-bool operand.
    #[error("logical operator requires bool operands")]
    NonBoolOperands,

    /// No literal construction exists for this type.
    #[error("cannot construct a {0:?} value from a literal")]
    Unsupported(ValType),
}

impl ValueError {
    /// The diagnostic kind this error maps to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::IntOverflow { .. } => ErrorKind::IntOverflow,
            ValueError::UintOverflow { .. } => ErrorKind::UintOverflow,
            ValueError::FloatOverflow { .. } => ErrorKind::FloatOverflow,
            ValueError::Malformed { .. } => ErrorKind::Lexical,
            ValueError::NonBoolOperands => ErrorKind::TypeDisagreement,
            ValueError::Unsupported(_) => ErrorKind::TypeDisagreement,
        }
    }

    /// Promote to a [`Diagnostic`] anchored at `token`.
    pub fn into_diagnostic(self, token: &Token<'_>) -> Diagnostic {
        let message = self.to_string();
        let diag = Diagnostic::error(self.kind(), message).at_line(token.line, token.lexeme);
        match token.file {
            Some(file) => diag.in_file(file),
            None => diag,
        }
    }
}

/// Result alias for value operations.
pub type ValueResult<T> = std::result::Result<T, ValueError>;
