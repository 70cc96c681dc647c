//! Type annotations attached to AST nodes and symbols.
//!
//! An [`Annotation`] records the type a node was written with (the
//! ostensible type) alongside the type the checker later proves it to be
//! (the actual type). The two differ transiently during inference, e.g.
//! when a literal is narrower than its declared container.

use std::fmt;

use lodec_lex::TokenKind;

/// The category shared by ostensible and actual types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypeCategory {
    #[default]
    Unknown,
    Int,
    Float,
    Bool,
    Char,
    String,
    Void,
    Enum,
    Struct,
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeCategory::Unknown => "unknown",
            TypeCategory::Int => "int",
            TypeCategory::Float => "float",
            TypeCategory::Bool => "bool",
            TypeCategory::Char => "char",
            TypeCategory::String => "string",
            TypeCategory::Void => "void",
            TypeCategory::Enum => "enum",
            TypeCategory::Struct => "struct",
        };
        f.write_str(name)
    }
}

/// The parser-attached descriptor of a node's declared type.
///
/// Invariants: integer types have a non-zero `bit_width`; non-numeric
/// types have `bit_width == 0`. `declared_on_line` is stamped from the
/// declaring token when the annotation lands on a symbol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Annotation {
    /// The type as written in source.
    pub ostensible: TypeCategory,
    /// The type the checker proves; `Unknown` until resolution.
    pub actual: TypeCategory,
    /// Signedness of a numeric type.
    pub is_signed: bool,
    /// 8, 16, 32, or 64 for numeric types; 0 otherwise.
    pub bit_width: u8,
    /// True for array declarations.
    pub is_array: bool,
    /// Declared element count of an array.
    pub array_size: usize,
    /// True for function symbols.
    pub is_function: bool,
    /// Line of the declaring token; 0 when not attached to a symbol.
    pub declared_on_line: u32,
}

impl Annotation {
    /// The empty annotation, used on operator nodes.
    pub fn none() -> Self {
        Self::default()
    }

    /// Annotation for a type keyword or literal token kind.
    pub fn from_token_kind(kind: TokenKind) -> Self {
        let (ostensible, is_signed, bit_width) = match kind {
            TokenKind::I8 => (TypeCategory::Int, true, 8),
            TokenKind::I16 => (TypeCategory::Int, true, 16),
            TokenKind::I32 => (TypeCategory::Int, true, 32),
            TokenKind::I64 => (TypeCategory::Int, true, 64),
            TokenKind::U8 => (TypeCategory::Int, false, 8),
            TokenKind::U16 => (TypeCategory::Int, false, 16),
            TokenKind::U32 => (TypeCategory::Int, false, 32),
            TokenKind::U64 => (TypeCategory::Int, false, 64),
            TokenKind::F32 => (TypeCategory::Float, true, 32),
            TokenKind::F64 => (TypeCategory::Float, true, 64),
            TokenKind::Bool | TokenKind::BoolLiteral => (TypeCategory::Bool, false, 0),
            TokenKind::Char | TokenKind::CharLiteral => (TypeCategory::Char, false, 0),
            TokenKind::Str | TokenKind::StringLiteral => (TypeCategory::String, false, 0),
            TokenKind::Void => (TypeCategory::Void, false, 0),
            TokenKind::Enum | TokenKind::EnumLiteral => (TypeCategory::Enum, false, 0),
            TokenKind::Struct => (TypeCategory::Struct, false, 0),
            // Literal widths stay unresolved until the checker picks a
            // containing type.
            TokenKind::IntLiteral => (TypeCategory::Int, true, 0),
            TokenKind::HexLiteral | TokenKind::BinaryLiteral => (TypeCategory::Int, false, 0),
            TokenKind::FloatLiteral => (TypeCategory::Float, true, 0),
            _ => (TypeCategory::Unknown, false, 0),
        };

        Annotation {
            ostensible,
            is_signed,
            bit_width,
            ..Annotation::default()
        }
    }

    /// Annotation for an array declaration, e.g. `i32[10] xs`.
    pub fn array(element_kind: TokenKind, array_size: usize) -> Self {
        Annotation {
            is_array: true,
            array_size,
            ..Annotation::from_token_kind(element_kind)
        }
    }

    /// Annotation for a function symbol with the given return type.
    pub fn function(return_kind: TokenKind) -> Self {
        Annotation {
            is_function: true,
            ..Annotation::from_token_kind(return_kind)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_annotations_have_width() {
        let a = Annotation::from_token_kind(TokenKind::I32);
        assert_eq!(a.ostensible, TypeCategory::Int);
        assert!(a.is_signed);
        assert_eq!(a.bit_width, 32);

        let a = Annotation::from_token_kind(TokenKind::U8);
        assert!(!a.is_signed);
        assert_eq!(a.bit_width, 8);
    }

    #[test]
    fn test_non_numeric_annotations_have_zero_width() {
        for kind in [
            TokenKind::Bool,
            TokenKind::Char,
            TokenKind::Str,
            TokenKind::Void,
            TokenKind::Enum,
            TokenKind::Struct,
        ] {
            assert_eq!(Annotation::from_token_kind(kind).bit_width, 0);
        }
    }

    #[test]
    fn test_actual_type_starts_unknown() {
        let a = Annotation::from_token_kind(TokenKind::F64);
        assert_eq!(a.actual, TypeCategory::Unknown);
        assert_eq!(a.ostensible, TypeCategory::Float);
    }

    #[test]
    fn test_array_annotation() {
        let a = Annotation::array(TokenKind::I32, 10);
        assert!(a.is_array);
        assert_eq!(a.array_size, 10);
        assert_eq!(a.ostensible, TypeCategory::Int);
        assert_eq!(a.bit_width, 32);
    }

    #[test]
    fn test_function_annotation() {
        let a = Annotation::function(TokenKind::Void);
        assert!(a.is_function);
        assert_eq!(a.ostensible, TypeCategory::Void);
    }
}
