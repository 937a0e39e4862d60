//! Structural type data stored in the pool.

use crate::{Idx, Tag};

/// Declared dimension of a static array.
///
/// The frontend hands over whatever it folded; only a non-negative
/// [`Dim::Int`] can be laid out.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Dim {
    /// Folded integral constant.
    Int(i64),
    /// Dimension expression that did not fold to a constant.
    NonConstant,
}

/// A named struct with fields in declaration order.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<Idx>,
}

/// Interned type payload.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeData {
    Void,
    Bool,
    Char,
    /// Integer of `bits` width (8, 16, 32 or 64).
    Int { bits: u8, signed: bool },
    /// IEEE float of `bits` width (32 or 64).
    Float { bits: u8 },
    Pointer(Idx),
    Struct(StructDef),
    StaticArray { elem: Idx, dim: Dim },
    DynArray { elem: Idx },
}

impl TypeData {
    pub fn tag(&self) -> Tag {
        match self {
            Self::Void => Tag::Void,
            Self::Bool => Tag::Bool,
            Self::Char => Tag::Char,
            Self::Int { .. } => Tag::Int,
            Self::Float { .. } => Tag::Float,
            Self::Pointer(_) => Tag::Pointer,
            Self::Struct(_) => Tag::Struct,
            Self::StaticArray { .. } => Tag::StaticArray,
            Self::DynArray { .. } => Tag::DynArray,
        }
    }
}

/// Default value of a scalar type, as raw constant material.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScalarDefault {
    /// All-zero bits (integers, `bool`, null pointers).
    Zero,
    /// Integer bit pattern that is not zero (`char` defaults to `0xFF`).
    Int(u64),
    /// Float default (NaN).
    Float(f64),
}

impl ScalarDefault {
    #[inline]
    pub fn is_zero(self) -> bool {
        matches!(self, Self::Zero)
    }
}
