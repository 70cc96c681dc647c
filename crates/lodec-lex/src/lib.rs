//! lodec-lex - Lexical analysis for the Lode language.
//!
//! The lexer turns a source buffer into a stream of tokens. Each token
//! borrows its lexeme straight from the source, so the buffer must stay
//! alive for as long as the tokens (and everything built from them) do.
//!
//! Token categories:
//!
//! - Type keywords: `i8 i16 i32 i64 u8 u16 u32 u64 f32 f64 bool char
//!   string void enum struct`
//! - Control flow: `if else while for break continue return`
//! - Literals: decimal int, `0x…` hex, `b'…'` binary, `d.d` float,
//!   `'c'` char, `"…"` string, `true`/`false`
//! - Identifiers: ASCII letter or `_`, then letters, digits, `_`
//! - Punctuators, including the compound assignment and shift forms
//!
//! Lexical errors are in-band: the lexer returns a token of kind
//! [`TokenKind::Error`] whose lexeme is a static message.

pub mod cursor;
pub mod lexer;
pub mod token;

mod edge_cases;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
