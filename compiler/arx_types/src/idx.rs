//! Type index handle.
//!
//! `Idx` is the only way the backend refers to a type. Types are interned,
//! so equality of two `Idx` values is type equality.
//!
//! Primitive scalars have fixed indices (0-12) and are pre-interned when a
//! [`Pool`](crate::Pool) is created.

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-12) ===

    /// The `void` type. Lays out as a single byte inside arrays.
    pub const VOID: Self = Self(0);
    /// The `bool` type (`i1` in registers, one byte in memory).
    pub const BOOL: Self = Self(1);
    /// The `char` type (8-bit code unit, default `0xFF`).
    pub const CHAR: Self = Self(2);
    /// Signed 8-bit integer.
    pub const I8: Self = Self(3);
    /// Unsigned 8-bit integer.
    pub const U8: Self = Self(4);
    /// Signed 16-bit integer.
    pub const I16: Self = Self(5);
    /// Unsigned 16-bit integer.
    pub const U16: Self = Self(6);
    /// Signed 32-bit integer.
    pub const I32: Self = Self(7);
    /// Unsigned 32-bit integer.
    pub const U32: Self = Self(8);
    /// Signed 64-bit integer.
    pub const I64: Self = Self(9);
    /// Unsigned 64-bit integer.
    pub const U64: Self = Self(10);
    /// 32-bit float.
    pub const F32: Self = Self(11);
    /// 64-bit float.
    pub const F64: Self = Self(12);

    /// The size-word type: unsigned, pointer width.
    pub const SIZE: Self = Self::U64;

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 13;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a pre-interned primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Source-level name of a primitive, `None` for compound types.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("void"),
            1 => Some("bool"),
            2 => Some("char"),
            3 => Some("i8"),
            4 => Some("u8"),
            5 => Some("i16"),
            6 => Some("u16"),
            7 => Some("i32"),
            8 => Some("u32"),
            9 => Some("i64"),
            10 => Some("u64"),
            11 => Some("f32"),
            12 => Some("f64"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Idx::{}", name.to_uppercase()),
            None if self.is_none() => write!(f, "Idx::NONE"),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None if self.is_none() => f.write_str("<none>"),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);
