//! Token model - the vocabulary of the Lode language.
//!
//! A [`Token`] is `Copy` and borrows its lexeme from the source buffer;
//! the buffer must therefore outlive every token, symbol, and AST node
//! produced from it. ERROR tokens borrow a `'static` message instead.

use std::fmt;

/// The closed set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Type keywords
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    Char,
    Str,
    Void,
    Enum,
    Struct,

    // Control flow keywords
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Return,

    // Literals
    IntLiteral,
    FloatLiteral,
    HexLiteral,
    BinaryLiteral,
    CharLiteral,
    StringLiteral,
    BoolLiteral,
    /// Synthesized by the parser for enum members; never lexed.
    EnumLiteral,

    Identifier,

    // Punctuators
    LCurly,
    RCurly,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
    ColonColon,
    Question,

    Eq,
    EqEq,
    NotEq,
    Not,
    Lt,
    Gt,
    LtEq,
    GtEq,
    AndAnd,
    OrOr,

    Plus,
    PlusPlus,
    PlusEq,
    Minus,
    MinusMinus,
    MinusEq,
    Star,
    StarEq,
    Slash,
    SlashEq,
    Percent,
    PercentEq,

    Ampersand,
    AmpersandEq,
    Pipe,
    PipeEq,
    Caret,
    CaretEq,
    Tilde,
    TildeEq,
    Shl,
    ShlEq,
    Shr,
    ShrEq,

    // Special
    Eof,
    Error,
}

impl TokenKind {
    /// Looks up the keyword or bool literal for an identifier lexeme.
    pub fn keyword(lexeme: &str) -> Option<TokenKind> {
        let kind = match lexeme {
            "i8" => TokenKind::I8,
            "i16" => TokenKind::I16,
            "i32" => TokenKind::I32,
            "i64" => TokenKind::I64,
            "u8" => TokenKind::U8,
            "u16" => TokenKind::U16,
            "u32" => TokenKind::U32,
            "u64" => TokenKind::U64,
            "f32" => TokenKind::F32,
            "f64" => TokenKind::F64,
            "bool" => TokenKind::Bool,
            "char" => TokenKind::Char,
            "string" => TokenKind::Str,
            "void" => TokenKind::Void,
            "enum" => TokenKind::Enum,
            "struct" => TokenKind::Struct,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "break" => TokenKind::Break,
            "continue" => TokenKind::Continue,
            "return" => TokenKind::Return,
            "true" | "false" => TokenKind::BoolLiteral,
            _ => return None,
        };
        Some(kind)
    }

    /// True for the type keywords accepted in declaration, parameter, and
    /// return-type position.
    ///
    /// `enum` is excluded: enum types are introduced by the dedicated
    /// `enum` declaration form, not by a type-prefixed declaration.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::I8
                | TokenKind::I16
                | TokenKind::I32
                | TokenKind::I64
                | TokenKind::U8
                | TokenKind::U16
                | TokenKind::U32
                | TokenKind::U64
                | TokenKind::F32
                | TokenKind::F64
                | TokenKind::Bool
                | TokenKind::Struct
                | TokenKind::Char
                | TokenKind::Str
                | TokenKind::Void
        )
    }

    /// True for every literal kind.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntLiteral
                | TokenKind::FloatLiteral
                | TokenKind::HexLiteral
                | TokenKind::BinaryLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::BoolLiteral
                | TokenKind::EnumLiteral
        )
    }

    /// True for the terse assignment operators.
    ///
    /// `!=` and `~=` are assignments in Lode, not comparisons.
    pub fn is_terse_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::NotEq
                | TokenKind::CaretEq
                | TokenKind::AmpersandEq
                | TokenKind::PipeEq
                | TokenKind::TildeEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
        )
    }

    /// Human-readable name for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::I8 => "i8",
            TokenKind::I16 => "i16",
            TokenKind::I32 => "i32",
            TokenKind::I64 => "i64",
            TokenKind::U8 => "u8",
            TokenKind::U16 => "u16",
            TokenKind::U32 => "u32",
            TokenKind::U64 => "u64",
            TokenKind::F32 => "f32",
            TokenKind::F64 => "f64",
            TokenKind::Bool => "bool",
            TokenKind::Char => "char",
            TokenKind::Str => "string",
            TokenKind::Void => "void",
            TokenKind::Enum => "enum",
            TokenKind::Struct => "struct",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::IntLiteral => "int literal",
            TokenKind::FloatLiteral => "float literal",
            TokenKind::HexLiteral => "hex literal",
            TokenKind::BinaryLiteral => "binary literal",
            TokenKind::CharLiteral => "char literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::BoolLiteral => "bool literal",
            TokenKind::EnumLiteral => "enum literal",
            TokenKind::Identifier => "identifier",
            TokenKind::LCurly => "'{'",
            TokenKind::RCurly => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::ColonColon => "'::'",
            TokenKind::Question => "'?'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::NotEq => "'!='",
            TokenKind::Not => "'!'",
            TokenKind::Lt => "'<'",
            TokenKind::Gt => "'>'",
            TokenKind::LtEq => "'<='",
            TokenKind::GtEq => "'>='",
            TokenKind::AndAnd => "'&&'",
            TokenKind::OrOr => "'||'",
            TokenKind::Plus => "'+'",
            TokenKind::PlusPlus => "'++'",
            TokenKind::PlusEq => "'+='",
            TokenKind::Minus => "'-'",
            TokenKind::MinusMinus => "'--'",
            TokenKind::MinusEq => "'-='",
            TokenKind::Star => "'*'",
            TokenKind::StarEq => "'*='",
            TokenKind::Slash => "'/'",
            TokenKind::SlashEq => "'/='",
            TokenKind::Percent => "'%'",
            TokenKind::PercentEq => "'%='",
            TokenKind::Ampersand => "'&'",
            TokenKind::AmpersandEq => "'&='",
            TokenKind::Pipe => "'|'",
            TokenKind::PipeEq => "'|='",
            TokenKind::Caret => "'^'",
            TokenKind::CaretEq => "'^='",
            TokenKind::Tilde => "'~'",
            TokenKind::TildeEq => "'~='",
            TokenKind::Shl => "'<<'",
            TokenKind::ShlEq => "'<<='",
            TokenKind::Shr => "'>>'",
            TokenKind::ShrEq => "'>>='",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "error",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token.
///
/// The lexeme borrows from the source buffer and stays valid for the
/// whole compile; tokens are copied by value into AST nodes and symbols.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'src> {
    /// What the token is.
    pub kind: TokenKind,
    /// The source slice the token covers. For ERROR tokens this is a
    /// static message instead.
    pub lexeme: &'src str,
    /// 1-based line the token starts on.
    pub line: u32,
    /// File the token came from, when the driver supplied one.
    pub file: Option<&'src str>,
}

impl<'src> Token<'src> {
    /// A zeroed end-of-file token, used to prime parser lookahead.
    pub const EOF: Token<'static> = Token {
        kind: TokenKind::Eof,
        lexeme: "",
        line: 0,
        file: None,
    };
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}'", self.kind, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("i32"), Some(TokenKind::I32));
        assert_eq!(TokenKind::keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::keyword("string"), Some(TokenKind::Str));
        assert_eq!(TokenKind::keyword("true"), Some(TokenKind::BoolLiteral));
        assert_eq!(TokenKind::keyword("false"), Some(TokenKind::BoolLiteral));
        assert_eq!(TokenKind::keyword("whale"), None);
        assert_eq!(TokenKind::keyword("I32"), None);
    }

    #[test]
    fn test_type_keyword_set() {
        assert!(TokenKind::I8.is_type_keyword());
        assert!(TokenKind::F64.is_type_keyword());
        assert!(TokenKind::Str.is_type_keyword());
        assert!(TokenKind::Void.is_type_keyword());
        assert!(TokenKind::Struct.is_type_keyword());
        assert!(!TokenKind::Enum.is_type_keyword());
        assert!(!TokenKind::Identifier.is_type_keyword());
    }

    #[test]
    fn test_literal_set() {
        assert!(TokenKind::IntLiteral.is_literal());
        assert!(TokenKind::EnumLiteral.is_literal());
        assert!(!TokenKind::Identifier.is_literal());
        assert!(!TokenKind::I32.is_literal());
    }

    #[test]
    fn test_terse_assignment_set() {
        assert!(TokenKind::PlusEq.is_terse_assignment());
        assert!(TokenKind::NotEq.is_terse_assignment());
        assert!(TokenKind::TildeEq.is_terse_assignment());
        assert!(TokenKind::ShrEq.is_terse_assignment());
        assert!(!TokenKind::Eq.is_terse_assignment());
        assert!(!TokenKind::EqEq.is_terse_assignment());
    }

    #[test]
    fn test_token_is_copy() {
        let token = Token {
            kind: TokenKind::Identifier,
            lexeme: "x",
            line: 1,
            file: None,
        };
        let copy = token;
        assert_eq!(token, copy);
    }
}
