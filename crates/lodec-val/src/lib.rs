//! lodec-val - The literal value model.
//!
//! Typed runtime representations of Lode literals, plus the arithmetic,
//! comparison, and logical primitives over them. Construction chooses
//! the narrowest numeric type containing a literal (`200` is a `u8`
//! under an unsigned target, `-1` an `i8`, `300` an `i16`/`u16`) and
//! detects i64/u64/f64 overflow and subnormal underflow.
//!
//! # Examples
//!
//! ```
//! use lodec_lex::{Token, TokenKind};
//! use lodec_val::{ValType, Value};
//!
//! let token = Token { kind: TokenKind::IntLiteral, lexeme: "200", line: 1, file: None };
//! let value = Value::new(ValType::U64, &token).unwrap();
//! assert_eq!(value, Value::Uint(200));
//! assert_eq!(value.ty(), ValType::U8);
//! ```

pub mod error;
pub mod ty;
pub mod value;

pub use error::{ValueError, ValueResult};
pub use ty::ValType;
pub use value::Value;
