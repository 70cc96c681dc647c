//! Edge case and property tests for lodec-lex.

#[cfg(test)]
mod tests {
    use crate::{Lexer, TokenKind};

    fn first_kind(source: &str) -> TokenKind {
        Lexer::new(source).scan_token().kind
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_whitespace_only() {
        assert_eq!(first_kind("  \t\r\n  "), TokenKind::Eof);
    }

    #[test]
    fn test_edge_comment_only() {
        assert_eq!(first_kind("// nothing here"), TokenKind::Eof);
    }

    #[test]
    fn test_edge_comment_at_eof_without_newline() {
        let mut lexer = Lexer::new("x // tail");
        assert_eq!(lexer.scan_token().kind, TokenKind::Identifier);
        assert_eq!(lexer.scan_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_edge_keyword_prefix_is_identifier() {
        // "iffy" starts with "if" but is one identifier.
        let mut lexer = Lexer::new("iffy whiled i32x");
        for _ in 0..3 {
            assert_eq!(lexer.scan_token().kind, TokenKind::Identifier);
        }
    }

    #[test]
    fn test_edge_case_sensitivity() {
        assert_eq!(first_kind("If"), TokenKind::Identifier);
        assert_eq!(first_kind("TRUE"), TokenKind::Identifier);
    }

    #[test]
    fn test_edge_single_underscore() {
        assert_eq!(first_kind("_"), TokenKind::Identifier);
    }

    #[test]
    fn test_edge_hex_accepts_g_h_quirk() {
        // The language's hex digit set runs through H, not F.
        let mut lexer = Lexer::new("0xGH");
        let token = lexer.scan_token();
        assert_eq!(token.kind, TokenKind::HexLiteral);
        assert_eq!(token.lexeme, "0xGH");
    }

    #[test]
    fn test_edge_hex_stops_at_non_hex() {
        let mut lexer = Lexer::new("0x1Fz");
        assert_eq!(lexer.scan_token().lexeme, "0x1F");
        assert_eq!(lexer.scan_token().kind, TokenKind::Identifier);
    }

    #[test]
    fn test_edge_empty_binary() {
        // b'' is three bytes of lexeme and zero digits; width check passes.
        let mut lexer = Lexer::new("b''");
        assert_eq!(lexer.scan_token().kind, TokenKind::BinaryLiteral);
    }

    #[test]
    fn test_edge_empty_string() {
        let mut lexer = Lexer::new("\"\"");
        let token = lexer.scan_token();
        assert_eq!(token.kind, TokenKind::StringLiteral);
        assert_eq!(token.lexeme, "\"\"");
    }

    #[test]
    fn test_edge_zero_literals() {
        assert_eq!(first_kind("0"), TokenKind::IntLiteral);
        assert_eq!(first_kind("0.0"), TokenKind::FloatLiteral);
        assert_eq!(first_kind("0x0"), TokenKind::HexLiteral);
        assert_eq!(first_kind("b'0'"), TokenKind::BinaryLiteral);
    }

    #[test]
    fn test_edge_float_double_dot() {
        // "1.2.3" is a float followed by a dot and an int.
        let mut lexer = Lexer::new("1.2.3");
        assert_eq!(lexer.scan_token().kind, TokenKind::FloatLiteral);
        assert_eq!(lexer.scan_token().kind, TokenKind::Dot);
        assert_eq!(lexer.scan_token().kind, TokenKind::IntLiteral);
    }

    #[test]
    fn test_edge_error_token_line() {
        let mut lexer = Lexer::new("ok\n@");
        assert_eq!(lexer.scan_token().kind, TokenKind::Identifier);
        let err = lexer.scan_token();
        assert_eq!(err.kind, TokenKind::Error);
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_edge_eof_is_sticky() {
        let mut lexer = Lexer::new("x");
        lexer.scan_token();
        assert_eq!(lexer.scan_token().kind, TokenKind::Eof);
        assert_eq!(lexer.scan_token().kind, TokenKind::Eof);
    }

    // ==================== PROPERTIES ====================

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Non-keyword identifier lexemes always lex as identifiers,
            /// byte for byte.
            #[test]
            fn prop_identifier_roundtrip(name in "[a-zA-Z_][a-zA-Z0-9_]{0,24}") {
                prop_assume!(TokenKind::keyword(&name).is_none());

                let mut lexer = Lexer::new(&name);
                let token = lexer.scan_token();
                prop_assert_eq!(token.kind, TokenKind::Identifier);
                prop_assert_eq!(token.lexeme, name.as_str());
            }

            /// Re-lexing an int literal's lexeme reproduces the kind.
            #[test]
            fn prop_int_literal_relex(n in any::<u64>()) {
                let text = n.to_string();
                let token = Lexer::new(&text).scan_token();
                prop_assert_eq!(token.kind, TokenKind::IntLiteral);
                let again = Lexer::new(token.lexeme).scan_token();
                prop_assert_eq!(again.kind, TokenKind::IntLiteral);
            }

            /// Same for float literals of the d.d form.
            #[test]
            fn prop_float_literal_relex(whole in 0u32..1_000_000, frac in 0u32..1_000_000) {
                let text = format!("{}.{}", whole, frac);
                let token = Lexer::new(&text).scan_token();
                prop_assert_eq!(token.kind, TokenKind::FloatLiteral);
                let again = Lexer::new(token.lexeme).scan_token();
                prop_assert_eq!(again.kind, TokenKind::FloatLiteral);
            }

            /// Same for hex literals up to the 64-bit width cap.
            #[test]
            fn prop_hex_literal_relex(n in any::<u64>()) {
                let text = format!("0x{:X}", n);
                let token = Lexer::new(&text).scan_token();
                prop_assert_eq!(token.kind, TokenKind::HexLiteral);
                let again = Lexer::new(token.lexeme).scan_token();
                prop_assert_eq!(again.kind, TokenKind::HexLiteral);
            }

            /// Lexeme concatenation reconstructs comment-free sources
            /// modulo whitespace.
            #[test]
            fn prop_lexemes_reconstruct(words in proptest::collection::vec("[a-z]{1,8}|[0-9]{1,6}|;|,", 0..20)) {
                let source = words.join(" ");
                let mut lexer = Lexer::new(&source);
                let mut lexemes = String::new();
                loop {
                    let token = lexer.scan_token();
                    if token.kind == TokenKind::Eof {
                        break;
                    }
                    prop_assert_ne!(token.kind, TokenKind::Error);
                    lexemes.push_str(token.lexeme);
                }
                let stripped: String = source.split_whitespace().collect();
                prop_assert_eq!(lexemes, stripped);
            }
        }
    }
}
