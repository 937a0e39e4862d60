//! Physical forms of array and element values.

use arx_abi::InitEntry;
use arx_types::Idx;

use crate::value_id::ValueId;

/// An array value in one of its physical forms.
///
/// `ty` is always the source-level array type (`E[N]` or `E[]`). Every form
/// resolves to one `(len, ptr)` pair through
/// [`ArrayLowerer::len`](super::ArrayLowerer::len) and
/// [`ArrayLowerer::ptr`](super::ArrayLowerer::ptr).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArrayValue {
    /// An explicit `(len, ptr)` pair.
    ///
    /// With `len: None` the slice is a full view of whatever `ptr` points
    /// to: a `[N x E]` buffer or a `{ i64, E* }` record.
    Slice {
        ty: Idx,
        len: Option<ValueId>,
        ptr: ValueId,
    },
    /// Address of a stored record or static buffer.
    Var { ty: Idx, addr: ValueId },
    /// Pointer to a record or buffer that is not an lvalue.
    Imm { ty: Idx, value: ValueId },
    /// The empty array.
    Null { ty: Idx },
}

impl ArrayValue {
    #[inline]
    pub fn ty(&self) -> Idx {
        match *self {
            Self::Slice { ty, .. }
            | Self::Var { ty, .. }
            | Self::Imm { ty, .. }
            | Self::Null { ty } => ty,
        }
    }

    /// A slice with a known length.
    pub fn slice(ty: Idx, len: ValueId, ptr: ValueId) -> Self {
        Self::Slice {
            ty,
            len: Some(len),
            ptr,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Slice { .. } => "slice",
            Self::Var { .. } => "variable",
            Self::Imm { .. } => "immediate",
            Self::Null { .. } => "null",
        }
    }
}

/// A value to be stored into one element slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementValue {
    /// First-class SSA value of type `ty`.
    Direct { ty: Idx, value: ValueId },
    /// Value of type `ty` held in memory at `addr`.
    Indirect { ty: Idx, addr: ValueId },
    /// The all-zero value of `ty`.
    Zero { ty: Idx },
}

impl ElementValue {
    #[inline]
    pub fn ty(&self) -> Idx {
        match *self {
            Self::Direct { ty, .. } | Self::Indirect { ty, .. } | Self::Zero { ty } => ty,
        }
    }
}

/// One side of a concatenation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Array(ArrayValue),
    Element(ElementValue),
}

/// Result of a representation cast.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastResult {
    /// The data pointer, reinterpreted as `T*`.
    Pointer(ValueId),
    /// A slice over the same bytes with the new element type.
    Array(ArrayValue),
}

/// One entry of a constant array literal.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementInit {
    /// A constant of the element type.
    Const(ValueId),
    /// A nested literal, for static-array elements.
    Array(ArrayInitializer),
}

/// A constant array literal of type `ty`.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrayInitializer {
    pub ty: Idx,
    pub entries: Vec<InitEntry<ElementInit>>,
}

impl ArrayInitializer {
    pub fn new(ty: Idx, entries: Vec<InitEntry<ElementInit>>) -> Self {
        Self { ty, entries }
    }
}
