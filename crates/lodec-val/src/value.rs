//! Typed literal values and their primitives.
//!
//! A [`Value`] is the runtime representation of a Lode literal. Its
//! [`ValType`] is derived from the payload, so the tag and the type can
//! never disagree; numeric values report the smallest type that contains
//! them.
//!
//! Arithmetic is checked: an operation whose result cannot be
//! represented yields the [`Value::Overflow`] sentinel. The logical
//! primitives are defined on bool only and treat anything else as a
//! fatal [`ValueError`].

use std::fmt;
use std::num::IntErrorKind;

use lodec_lex::{Token, TokenKind};

use crate::error::{ValueError, ValueResult};
use crate::ty::ValType;

const BASE_DECIMAL: u32 = 10;
const BASE_HEX: u32 = 16;
const BASE_BINARY: u32 = 2;

/// A literal value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value.
    None,
    /// Result of an arithmetic operation that could not be represented.
    Overflow,
    Int(i64),
    Uint(u64),
    Float(f64),
    Char(char),
    Str(String),
    Bool(bool),
    Array(Vec<Value>),
}

impl Value {
    /// Constructs a value from a literal token under a target type.
    ///
    /// The target type selects the construction (signed, unsigned,
    /// float, bool, char, string); the radix comes from the token kind
    /// (decimal, `0x` hex, `b'…'` binary). Numeric results carry the
    /// smallest containing type, not the target.
    ///
    /// # Returns
    ///
    /// The constructed value, or a [`ValueError`] for i64/u64/f64
    /// overflow, f64 underflow from non-zero input, and digits that do
    /// not parse under the selected radix.
    pub fn new(ty: ValType, token: &Token<'_>) -> ValueResult<Value> {
        let base = match token.kind {
            TokenKind::HexLiteral => BASE_HEX,
            TokenKind::BinaryLiteral => BASE_BINARY,
            _ => BASE_DECIMAL,
        };

        if ty == ValType::None {
            return Ok(Value::None);
        }

        if ty.is_int() {
            let digits = Self::digits(token)?;
            return match i64::from_str_radix(digits, base) {
                Ok(i) => Ok(Value::Int(i)),
                Err(e)
                    if matches!(
                        e.kind(),
                        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow
                    ) =>
                {
                    Err(ValueError::IntOverflow {
                        lexeme: token.lexeme.to_string(),
                    })
                },
                Err(_) => Err(ValueError::Malformed {
                    lexeme: token.lexeme.to_string(),
                }),
            };
        }

        if ty.is_uint() {
            let digits = Self::digits(token)?;
            return match u64::from_str_radix(digits, base) {
                Ok(u) => Ok(Value::Uint(u)),
                Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow) => {
                    Err(ValueError::UintOverflow {
                        lexeme: token.lexeme.to_string(),
                    })
                },
                Err(_) => Err(ValueError::Malformed {
                    lexeme: token.lexeme.to_string(),
                }),
            };
        }

        if ty.is_float() {
            let d: f64 = token.lexeme.parse().map_err(|_| ValueError::Malformed {
                lexeme: token.lexeme.to_string(),
            })?;
            if d.is_infinite() {
                return Err(ValueError::FloatOverflow {
                    lexeme: token.lexeme.to_string(),
                });
            }
            // Subnormal underflow from non-zero input.
            if d != 0.0 && d.abs() < f64::MIN_POSITIVE {
                return Err(ValueError::FloatOverflow {
                    lexeme: token.lexeme.to_string(),
                });
            }
            return Ok(Value::Float(d));
        }

        match ty {
            ValType::Bool => Ok(Value::Bool(token.lexeme == "true")),
            ValType::Char => {
                let bytes = token.lexeme.as_bytes();
                if bytes.len() < 3 {
                    return Err(ValueError::Malformed {
                        lexeme: token.lexeme.to_string(),
                    });
                }
                Ok(Value::Char(bytes[1] as char))
            },
            ValType::Str => {
                let lexeme = token.lexeme;
                if lexeme.len() < 2 {
                    return Err(ValueError::Malformed {
                        lexeme: lexeme.to_string(),
                    });
                }
                Ok(Value::Str(lexeme[1..lexeme.len() - 1].to_string()))
            },
            other => Err(ValueError::Unsupported(other)),
        }
    }

    /// The digit portion of a numeric literal: hex lexemes lose their
    /// `0x`, binary lexemes their `b'` and closing quote.
    fn digits<'a>(token: &Token<'a>) -> ValueResult<&'a str> {
        match token.kind {
            TokenKind::HexLiteral => {
                token.lexeme.get(2..).ok_or_else(|| ValueError::Malformed {
                    lexeme: token.lexeme.to_string(),
                })
            },
            TokenKind::BinaryLiteral => token
                .lexeme
                .get(2..token.lexeme.len().saturating_sub(1))
                .ok_or_else(|| ValueError::Malformed {
                    lexeme: token.lexeme.to_string(),
                }),
            _ => Ok(token.lexeme),
        }
    }

    /// The runtime type of this value.
    ///
    /// Numeric values report the smallest containing type.
    pub fn ty(&self) -> ValType {
        match self {
            Value::None | Value::Overflow => ValType::None,
            Value::Int(i) => ValType::smallest_int(*i),
            Value::Uint(u) => ValType::smallest_uint(*u),
            Value::Float(d) => ValType::smallest_float(*d),
            Value::Char(_) => ValType::Char,
            Value::Str(_) => ValType::Str,
            Value::Bool(_) => ValType::Bool,
            Value::Array(_) => ValType::Array,
        }
    }

    /// Addition over int, uint, and float. Mismatched or non-numeric
    /// operands yield [`Value::None`]; unrepresentable results yield
    /// [`Value::Overflow`].
    pub fn add(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.checked_add(*b).map_or(Value::Overflow, Value::Int),
            (Value::Uint(a), Value::Uint(b)) => {
                a.checked_add(*b).map_or(Value::Overflow, Value::Uint)
            },
            (Value::Float(a), Value::Float(b)) => Value::Float(a + b),
            _ => Value::None,
        }
    }

    /// Subtraction over int, uint, and float.
    pub fn sub(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.checked_sub(*b).map_or(Value::Overflow, Value::Int),
            (Value::Uint(a), Value::Uint(b)) => {
                a.checked_sub(*b).map_or(Value::Overflow, Value::Uint)
            },
            (Value::Float(a), Value::Float(b)) => Value::Float(a - b),
            _ => Value::None,
        }
    }

    /// Multiplication over int, uint, and float.
    pub fn mul(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.checked_mul(*b).map_or(Value::Overflow, Value::Int),
            (Value::Uint(a), Value::Uint(b)) => {
                a.checked_mul(*b).map_or(Value::Overflow, Value::Uint)
            },
            (Value::Float(a), Value::Float(b)) => Value::Float(a * b),
            _ => Value::None,
        }
    }

    /// Division over int, uint, and float. Integer division by zero
    /// yields [`Value::Overflow`].
    pub fn div(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.checked_div(*b).map_or(Value::Overflow, Value::Int),
            (Value::Uint(a), Value::Uint(b)) => {
                a.checked_div(*b).map_or(Value::Overflow, Value::Uint)
            },
            (Value::Float(a), Value::Float(b)) => Value::Float(a / b),
            _ => Value::None,
        }
    }

    /// Remainder over int and uint only.
    pub fn modulo(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.checked_rem(*b).map_or(Value::Overflow, Value::Int),
            (Value::Uint(a), Value::Uint(b)) => {
                a.checked_rem(*b).map_or(Value::Overflow, Value::Uint)
            },
            _ => Value::None,
        }
    }

    /// Equality over the scalar kinds (int, uint, float, char, bool).
    pub fn equals(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Bool(a == b),
            (Value::Uint(a), Value::Uint(b)) => Value::Bool(a == b),
            (Value::Float(a), Value::Float(b)) => Value::Bool(a == b),
            (Value::Char(a), Value::Char(b)) => Value::Bool(a == b),
            (Value::Bool(a), Value::Bool(b)) => Value::Bool(a == b),
            _ => Value::None,
        }
    }

    /// `>` over the numeric kinds.
    pub fn greater_than(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Bool(a > b),
            (Value::Uint(a), Value::Uint(b)) => Value::Bool(a > b),
            (Value::Float(a), Value::Float(b)) => Value::Bool(a > b),
            _ => Value::None,
        }
    }

    /// `<` over the numeric kinds.
    pub fn less_than(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Value::Bool(a < b),
            (Value::Uint(a), Value::Uint(b)) => Value::Bool(a < b),
            (Value::Float(a), Value::Float(b)) => Value::Bool(a < b),
            _ => Value::None,
        }
    }

    /// Logical AND. Defined on bool only; anything else is fatal.
    pub fn logical_and(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
            _ => Err(ValueError::NonBoolOperands),
        }
    }

    /// Logical OR. Defined on bool only; anything else is fatal.
    pub fn logical_or(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
            _ => Err(ValueError::NonBoolOperands),
        }
    }

    /// Logical NOT. Defined on bool only; anything else is fatal.
    pub fn not(&self) -> ValueResult<Value> {
        match self {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            _ => Err(ValueError::NonBoolOperands),
        }
    }
}

impl fmt::Display for Value {
    /// Renders the value so that re-lexing the text reproduces the same
    /// token kind: floats always carry a decimal point, chars and
    /// strings their quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Overflow => write!(f, "overflow"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(d) => {
                let s = format!("{}", d);
                if s.contains('e') || s.contains('E') {
                    write!(f, "{:.17}", d)
                } else if s.contains('.') {
                    f.write_str(&s)
                } else {
                    write!(f, "{}.0", s)
                }
            },
            Value::Char(c) => write!(f, "'{}'", c),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Array(values) => {
                write!(f, "[")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token<'_> {
        Token {
            kind,
            lexeme,
            line: 1,
            file: None,
        }
    }

    // ==================== CONSTRUCTION ====================

    #[test]
    fn test_int_construction() {
        let v = Value::new(ValType::I64, &token(TokenKind::IntLiteral, "200")).unwrap();
        assert_eq!(v, Value::Int(200));
        assert_eq!(v.ty(), ValType::I16);
    }

    #[test]
    fn test_uint_construction_picks_smallest_type() {
        let v = Value::new(ValType::U64, &token(TokenKind::IntLiteral, "200")).unwrap();
        assert_eq!(v, Value::Uint(200));
        assert_eq!(v.ty(), ValType::U8);

        let v = Value::new(ValType::U64, &token(TokenKind::IntLiteral, "300")).unwrap();
        assert_eq!(v.ty(), ValType::U16);
    }

    #[test]
    fn test_hex_construction() {
        let v = Value::new(ValType::U64, &token(TokenKind::HexLiteral, "0xFF")).unwrap();
        assert_eq!(v, Value::Uint(255));

        let v = Value::new(
            ValType::U64,
            &token(TokenKind::HexLiteral, "0xFFFFFFFFFFFFFFFF"),
        )
        .unwrap();
        assert_eq!(v, Value::Uint(u64::MAX));
        assert_eq!(v.ty(), ValType::U64);
    }

    #[test]
    fn test_hex_u64_overflow() {
        let result = Value::new(
            ValType::U64,
            &token(TokenKind::HexLiteral, "0x10000000000000000"),
        );
        assert!(matches!(result, Err(ValueError::UintOverflow { .. })));
    }

    #[test]
    fn test_binary_construction() {
        let v = Value::new(ValType::U64, &token(TokenKind::BinaryLiteral, "b'1010'")).unwrap();
        assert_eq!(v, Value::Uint(10));
    }

    #[test]
    fn test_binary_64_bits_ok_65_overflows() {
        let ones64 = format!("b'{}'", "1".repeat(64));
        let v = Value::new(ValType::U64, &token(TokenKind::BinaryLiteral, &ones64)).unwrap();
        assert_eq!(v, Value::Uint(u64::MAX));

        let ones65 = format!("b'{}'", "1".repeat(65));
        let result = Value::new(ValType::U64, &token(TokenKind::BinaryLiteral, &ones65));
        assert!(matches!(result, Err(ValueError::UintOverflow { .. })));
    }

    #[test]
    fn test_i64_overflow() {
        let v = Value::new(
            ValType::I64,
            &token(TokenKind::IntLiteral, "9223372036854775807"),
        )
        .unwrap();
        assert_eq!(v, Value::Int(i64::MAX));

        let result = Value::new(
            ValType::I64,
            &token(TokenKind::IntLiteral, "9223372036854775808"),
        );
        assert!(matches!(result, Err(ValueError::IntOverflow { .. })));
    }

    #[test]
    fn test_float_construction() {
        let v = Value::new(ValType::F64, &token(TokenKind::FloatLiteral, "3.5")).unwrap();
        assert_eq!(v, Value::Float(3.5));
        assert_eq!(v.ty(), ValType::F32);
    }

    #[test]
    fn test_float_overflow() {
        let huge = format!("1{}.0", "0".repeat(400));
        let result = Value::new(ValType::F64, &token(TokenKind::FloatLiteral, &huge));
        assert!(matches!(result, Err(ValueError::FloatOverflow { .. })));
    }

    #[test]
    fn test_bool_construction() {
        let v = Value::new(ValType::Bool, &token(TokenKind::BoolLiteral, "true")).unwrap();
        assert_eq!(v, Value::Bool(true));
        let v = Value::new(ValType::Bool, &token(TokenKind::BoolLiteral, "false")).unwrap();
        assert_eq!(v, Value::Bool(false));
    }

    #[test]
    fn test_char_construction() {
        let v = Value::new(ValType::Char, &token(TokenKind::CharLiteral, "'q'")).unwrap();
        assert_eq!(v, Value::Char('q'));
    }

    #[test]
    fn test_string_construction() {
        let v = Value::new(ValType::Str, &token(TokenKind::StringLiteral, "\"hi\"")).unwrap();
        assert_eq!(v, Value::Str("hi".to_string()));
    }

    #[test]
    fn test_none_type_constructs_none() {
        let v = Value::new(ValType::None, &token(TokenKind::IntLiteral, "1")).unwrap();
        assert_eq!(v, Value::None);
    }

    #[test]
    fn test_malformed_digits() {
        // 'G' is in the lexical hex digit set but not a real hex digit.
        let result = Value::new(ValType::U64, &token(TokenKind::HexLiteral, "0xG"));
        assert!(matches!(result, Err(ValueError::Malformed { .. })));
    }

    // ==================== ARITHMETIC ====================

    #[test]
    fn test_add_dispatch() {
        assert_eq!(Value::Int(2).add(&Value::Int(3)), Value::Int(5));
        assert_eq!(Value::Uint(2).add(&Value::Uint(3)), Value::Uint(5));
        assert_eq!(Value::Float(0.5).add(&Value::Float(0.25)), Value::Float(0.75));
        assert_eq!(Value::Bool(true).add(&Value::Bool(false)), Value::None);
        assert_eq!(Value::Int(1).add(&Value::Uint(1)), Value::None);
    }

    #[test]
    fn test_checked_arithmetic_overflows_to_sentinel() {
        assert_eq!(Value::Int(i64::MAX).add(&Value::Int(1)), Value::Overflow);
        assert_eq!(Value::Uint(0).sub(&Value::Uint(1)), Value::Overflow);
        assert_eq!(
            Value::Int(i64::MIN).div(&Value::Int(-1)),
            Value::Overflow
        );
        assert_eq!(Value::Int(1).div(&Value::Int(0)), Value::Overflow);
        assert_eq!(Value::Overflow.ty(), ValType::None);
    }

    #[test]
    fn test_modulo_int_only() {
        assert_eq!(Value::Int(7).modulo(&Value::Int(3)), Value::Int(1));
        assert_eq!(Value::Uint(7).modulo(&Value::Uint(4)), Value::Uint(3));
        assert_eq!(Value::Float(7.0).modulo(&Value::Float(3.0)), Value::None);
    }

    // ==================== COMPARISON ====================

    #[test]
    fn test_equality_scalar_kinds() {
        assert_eq!(Value::Int(4).equals(&Value::Int(4)), Value::Bool(true));
        assert_eq!(Value::Char('a').equals(&Value::Char('b')), Value::Bool(false));
        assert_eq!(Value::Bool(true).equals(&Value::Bool(true)), Value::Bool(true));
        // Strings are not a scalar kind.
        assert_eq!(
            Value::Str("a".into()).equals(&Value::Str("a".into())),
            Value::None
        );
    }

    #[test]
    fn test_ordering() {
        assert_eq!(Value::Int(1).less_than(&Value::Int(2)), Value::Bool(true));
        assert_eq!(Value::Uint(3).greater_than(&Value::Uint(2)), Value::Bool(true));
        assert_eq!(Value::Float(1.5).less_than(&Value::Float(1.0)), Value::Bool(false));
        assert_eq!(Value::Bool(true).less_than(&Value::Bool(false)), Value::None);
    }

    // ==================== LOGICAL ====================

    #[test]
    fn test_logical_ops() {
        // bool check = false && (true || false);
        let or = Value::Bool(true).logical_or(&Value::Bool(false)).unwrap();
        let and = Value::Bool(false).logical_and(&or).unwrap();
        assert_eq!(and, Value::Bool(false));
    }

    #[test]
    fn test_logical_mismatch_is_fatal() {
        assert_eq!(
            Value::Bool(true).logical_and(&Value::Int(1)),
            Err(ValueError::NonBoolOperands)
        );
        assert_eq!(
            Value::Int(1).logical_or(&Value::Bool(true)),
            Err(ValueError::NonBoolOperands)
        );
        assert_eq!(Value::Int(1).not(), Err(ValueError::NonBoolOperands));
        assert_eq!(Value::Bool(true).not(), Ok(Value::Bool(false)));
    }

    // ==================== FORMATTING ====================

    #[test]
    fn test_display_relexes_to_same_kind() {
        use lodec_lex::Lexer;

        let cases: Vec<(Value, TokenKind)> = vec![
            (Value::Int(42), TokenKind::IntLiteral),
            (Value::Uint(300), TokenKind::IntLiteral),
            (Value::Float(3.5), TokenKind::FloatLiteral),
            (Value::Float(3.0), TokenKind::FloatLiteral),
            (Value::Char('c'), TokenKind::CharLiteral),
            (Value::Str("hi".into()), TokenKind::StringLiteral),
            (Value::Bool(true), TokenKind::BoolLiteral),
        ];
        for (value, expected) in cases {
            let text = value.to_string();
            let token = Lexer::new(&text).scan_token();
            assert_eq!(token.kind, expected, "formatted '{}'", text);
        }
    }

    #[test]
    fn test_display_roundtrip_bit_equal() {
        let v = Value::new(ValType::F64, &token(TokenKind::FloatLiteral, "2.25")).unwrap();
        let text = v.to_string();
        let relexed = lodec_lex::Lexer::new(&text).scan_token();
        let again = Value::new(ValType::F64, &relexed).unwrap();
        assert_eq!(v, again);
    }
}
