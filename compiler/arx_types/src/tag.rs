//! Type kind tag.

use std::fmt;

/// Kind discriminant of a pooled type.
///
/// Cheap to compare and match on when the payload of the type is not needed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Tag {
    Void = 0,
    Bool = 1,
    Char = 2,
    Int = 3,
    Float = 4,
    Pointer = 16,
    Struct = 32,
    /// Fixed-length array `E[N]`.
    StaticArray = 48,
    /// Length-carrying array `E[]`.
    DynArray = 49,
}

impl Tag {
    /// True for both array kinds.
    #[inline]
    pub const fn is_array(self) -> bool {
        matches!(self, Self::StaticArray | Self::DynArray)
    }

    /// True for types held in a single register.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Char | Self::Int | Self::Float | Self::Pointer
        )
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int => "int",
            Self::Float => "float",
            Self::Pointer => "pointer",
            Self::Struct => "struct",
            Self::StaticArray => "static array",
            Self::DynArray => "dynamic array",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
