//! Lexer for the Lode language.
//!
//! Transforms a source buffer into a stream of [`Token`]s. The lexer is
//! single-threaded and non-restartable: create one per source, then call
//! [`Lexer::scan_token`] until it returns an end-of-file token.
//!
//! Errors are returned in-band as tokens of kind [`TokenKind::Error`]
//! whose lexeme is a static message; the parser treats such a token in
//! lookahead as fatal.

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// "0x" plus up to 16 hex digits.
const MAX_HEX_LEXEME: usize = 2 + 16;

/// "b'" plus up to 64 binary digits plus the closing quote.
const MAX_BINARY_LEXEME: usize = 3 + 64;

fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_hex_digit(b: u8) -> bool {
    // The hex digit set of the language is 0-9, A-H, a-h.
    b.is_ascii_digit() || (b'A'..=b'H').contains(&b) || (b'a'..=b'h').contains(&b)
}

/// Streaming lexer over one source buffer.
///
/// # Examples
///
/// ```
/// use lodec_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("i32 x = 5;");
/// assert_eq!(lexer.scan_token().kind, TokenKind::I32);
/// assert_eq!(lexer.scan_token().kind, TokenKind::Identifier);
/// assert_eq!(lexer.scan_token().kind, TokenKind::Eq);
/// assert_eq!(lexer.scan_token().kind, TokenKind::IntLiteral);
/// assert_eq!(lexer.scan_token().kind, TokenKind::Semicolon);
/// assert_eq!(lexer.scan_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'src> {
    cursor: Cursor<'src>,

    /// Byte offset where the current token starts.
    token_start: usize,

    /// Line the current token starts on.
    token_line: u32,

    /// File name stamped onto every token, when supplied.
    file: Option<&'src str>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer over `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_line: 1,
            file: None,
        }
    }

    /// Creates a lexer that stamps `file` onto every token.
    pub fn with_file(source: &'src str, file: &'src str) -> Self {
        let mut lexer = Self::new(source);
        lexer.file = Some(file);
        lexer
    }

    /// Scans and returns the next token.
    pub fn scan_token(&mut self) -> Token<'src> {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_line = self.cursor.line();

        if self.cursor.is_at_end() {
            return self.make(TokenKind::Eof);
        }

        let c = self.cursor.advance();

        if c == b'0' && self.cursor.peek() == b'x' {
            return self.hex();
        }
        if c.is_ascii_digit() {
            return self.number();
        }
        if c == b'b' && self.cursor.peek() == b'\'' {
            return self.binary();
        }
        if is_alpha(c) {
            return self.identifier();
        }

        match c {
            b'{' => self.make(TokenKind::LCurly),
            b'}' => self.make(TokenKind::RCurly),
            b'(' => self.make(TokenKind::LParen),
            b')' => self.make(TokenKind::RParen),
            b'[' => self.make(TokenKind::LBracket),
            b']' => self.make(TokenKind::RBracket),
            b'.' => self.make(TokenKind::Dot),
            b',' => self.make(TokenKind::Comma),
            b';' => self.make(TokenKind::Semicolon),
            b'?' => self.make(TokenKind::Question),
            b':' => {
                if self.cursor.match_byte(b':') {
                    self.make(TokenKind::ColonColon)
                } else {
                    self.make(TokenKind::Colon)
                }
            },
            b'+' => {
                if self.cursor.match_byte(b'=') {
                    self.make(TokenKind::PlusEq)
                } else if self.cursor.match_byte(b'+') {
                    self.make(TokenKind::PlusPlus)
                } else {
                    self.make(TokenKind::Plus)
                }
            },
            b'-' => {
                if self.cursor.match_byte(b'=') {
                    self.make(TokenKind::MinusEq)
                } else if self.cursor.match_byte(b'-') {
                    self.make(TokenKind::MinusMinus)
                } else {
                    self.make(TokenKind::Minus)
                }
            },
            b'*' => self.make_eq_or(TokenKind::StarEq, TokenKind::Star),
            b'/' => self.make_eq_or(TokenKind::SlashEq, TokenKind::Slash),
            b'%' => self.make_eq_or(TokenKind::PercentEq, TokenKind::Percent),
            b'^' => self.make_eq_or(TokenKind::CaretEq, TokenKind::Caret),
            b'~' => self.make_eq_or(TokenKind::TildeEq, TokenKind::Tilde),
            b'!' => self.make_eq_or(TokenKind::NotEq, TokenKind::Not),
            b'=' => self.make_eq_or(TokenKind::EqEq, TokenKind::Eq),
            b'&' => {
                if self.cursor.match_byte(b'&') {
                    self.make(TokenKind::AndAnd)
                } else {
                    self.make_eq_or(TokenKind::AmpersandEq, TokenKind::Ampersand)
                }
            },
            b'|' => {
                if self.cursor.match_byte(b'|') {
                    self.make(TokenKind::OrOr)
                } else {
                    self.make_eq_or(TokenKind::PipeEq, TokenKind::Pipe)
                }
            },
            b'<' => {
                if self.cursor.match_byte(b'<') {
                    self.make_eq_or(TokenKind::ShlEq, TokenKind::Shl)
                } else {
                    self.make_eq_or(TokenKind::LtEq, TokenKind::Lt)
                }
            },
            b'>' => {
                if self.cursor.match_byte(b'>') {
                    self.make_eq_or(TokenKind::ShrEq, TokenKind::Shr)
                } else {
                    self.make_eq_or(TokenKind::GtEq, TokenKind::Gt)
                }
            },
            b'\'' => self.char_literal(),
            b'"' => self.string(),
            _ => self.error_token("Unexpected token"),
        }
    }

    /// Builds a token covering `[token_start, position)`.
    fn make(&self, kind: TokenKind) -> Token<'src> {
        Token {
            kind,
            lexeme: self.cursor.slice_from(self.token_start),
            line: self.token_line,
            file: self.file,
        }
    }

    /// Builds a compound token if the next byte is `=`, else the simple one.
    fn make_eq_or(&mut self, with_eq: TokenKind, without: TokenKind) -> Token<'src> {
        if self.cursor.match_byte(b'=') {
            self.make(with_eq)
        } else {
            self.make(without)
        }
    }

    /// Builds an ERROR token carrying a static message.
    fn error_token(&self, message: &'static str) -> Token<'src> {
        Token {
            kind: TokenKind::Error,
            lexeme: message,
            line: self.cursor.line(),
            file: self.file,
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.cursor.peek() {
                b' ' | b'\r' | b'\t' | b'\n' => {
                    self.cursor.advance();
                },
                b'/' => {
                    if self.cursor.peek_next() == b'/' {
                        while self.cursor.peek() != b'\n' && !self.cursor.is_at_end() {
                            self.cursor.advance();
                        }
                    } else {
                        return;
                    }
                },
                _ => return,
            }
        }
    }

    /// Hex constant: `0x` followed by hex digits, at most 64 bits wide.
    fn hex(&mut self) -> Token<'src> {
        self.cursor.advance(); // the 'x'

        while is_hex_digit(self.cursor.peek()) {
            self.cursor.advance();
        }

        if self.lexeme_length() > MAX_HEX_LEXEME {
            return self.error_token("Hex Constant cannot be more than 64 bits wide");
        }

        self.make(TokenKind::HexLiteral)
    }

    /// Binary constant: `b'` followed by binary digits and a closing
    /// quote, at most 64 bits wide.
    fn binary(&mut self) -> Token<'src> {
        self.cursor.advance(); // the opening quote

        while self.cursor.peek() == b'0' || self.cursor.peek() == b'1' {
            self.cursor.advance();
        }

        if self.cursor.peek() != b'\'' {
            return self.error_token("Expected \"'\" after Binary Constant");
        }
        self.cursor.advance();

        if self.lexeme_length() > MAX_BINARY_LEXEME {
            return self.error_token("Binary Constant cannot be more than 64 bits wide");
        }

        self.make(TokenKind::BinaryLiteral)
    }

    /// Decimal integer or float: digits with an optional single `.`
    /// followed by more digits.
    fn number(&mut self) -> Token<'src> {
        let mut is_float = false;

        while self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.peek() == b'.' && self.cursor.peek_next().is_ascii_digit() {
            is_float = true;
            self.cursor.advance();

            while self.cursor.peek().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        self.make(if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        })
    }

    /// Char literal: consumes exactly two bytes, the value and the
    /// closing quote. No escape sequences.
    fn char_literal(&mut self) -> Token<'src> {
        self.cursor.advance();
        self.cursor.advance();

        self.make(TokenKind::CharLiteral)
    }

    /// String literal. Embedded newlines are rejected; so is EOF before
    /// the closing quote.
    fn string(&mut self) -> Token<'src> {
        while self.cursor.peek() != b'"' && !self.cursor.is_at_end() {
            if self.cursor.peek() == b'\n' {
                return self.error_token("Multi-line strings are not allowed");
            }
            self.cursor.advance();
        }

        if self.cursor.is_at_end() {
            return self.error_token("Unterminated string.");
        }

        self.cursor.advance();
        self.make(TokenKind::StringLiteral)
    }

    /// Identifier or keyword.
    fn identifier(&mut self) -> Token<'src> {
        while is_alpha(self.cursor.peek()) || self.cursor.peek().is_ascii_digit() {
            self.cursor.advance();
        }

        let lexeme = self.cursor.slice_from(self.token_start);
        self.make(TokenKind::keyword(lexeme).unwrap_or(TokenKind::Identifier))
    }

    fn lexeme_length(&self) -> usize {
        self.cursor.position() - self.token_start
    }
}
