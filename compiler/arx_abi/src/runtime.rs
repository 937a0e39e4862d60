//! The runtime routine table.
//!
//! Every call the array lowering emits goes to one of these routines. Name,
//! parameter order and types are a hard contract with the runtime library;
//! change them only together with the runtime.
//!
//! | Family | Routines |
//! |--------|----------|
//! | Fill | `arx_array_init_{ptr,i1,i8,i16,i32,i64,f32,f64,mem}` |
//! | Allocate | `arx_array_new_{zeroed,init}`, `arx_array_new_md_{zeroed,init}` |
//! | Resize | `arx_array_set_len_{zeroed,init}` |
//! | Compare | `arx_array_eq`, `arx_array_cmp`, `arx_array_cmp_char` |
//! | Cast | `arx_array_cast_len` |

use crate::ElemKind;

/// Parameter and return types used by runtime routines.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RtTy {
    Void,
    /// `i1`.
    Bool,
    /// `iN` for N in 8, 16, 32, 64.
    Int(u8),
    F32,
    F64,
    /// The size-word (`i64`).
    Size,
    /// `i8*`: untyped data, type descriptors, returned buffers.
    Opaque,
    /// `i8**`: a buffer of pointers.
    OpaquePtr,
    /// `i1*`.
    BoolPtr,
    /// `iN*`.
    IntPtr(u8),
    F32Ptr,
    F64Ptr,
    /// `i64*`: a buffer of size-words (multi-dimensional lengths).
    SizePtr,
    /// `{ i64, i8* }*`: address of a dynamic-array record.
    RecordPtr,
}

/// Exact signature of a runtime routine.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Signature {
    pub params: &'static [RtTy],
    pub ret: RtTy,
}

/// A runtime support routine.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum RuntimeFn {
    InitPtr,
    InitBool,
    InitI8,
    InitI16,
    InitI32,
    InitI64,
    InitF32,
    InitF64,
    /// Fill with an aggregate copied from memory; takes the element size.
    InitMem,
    /// `(ti, n) -> i8*`, zeroed storage.
    NewZeroed,
    /// `(ti, n) -> i8*`, storage initialized from the element default.
    NewInit,
    /// `(ti, ndims, dims*) -> i8*`.
    NewMultiZeroed,
    NewMultiInit,
    /// `(ti, new_len, old_len, old_ptr) -> i8*`.
    SetLenZeroed,
    SetLenInit,
    /// `(l*, r*, ti) -> i1`.
    Equals,
    /// `(l*, r*, ti) -> i32`, negative/zero/positive.
    Compare,
    /// `(l*, r*) -> i32`, byte-wise.
    CompareChar,
    /// `(len, old_elem_size, new_elem_size) -> len`; traps on remainder.
    CastLen,
}

impl RuntimeFn {
    /// Every routine, in declaration order.
    pub const ALL: [Self; 19] = [
        Self::InitPtr,
        Self::InitBool,
        Self::InitI8,
        Self::InitI16,
        Self::InitI32,
        Self::InitI64,
        Self::InitF32,
        Self::InitF64,
        Self::InitMem,
        Self::NewZeroed,
        Self::NewInit,
        Self::NewMultiZeroed,
        Self::NewMultiInit,
        Self::SetLenZeroed,
        Self::SetLenInit,
        Self::Equals,
        Self::Compare,
        Self::CompareChar,
        Self::CastLen,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::InitPtr => "arx_array_init_ptr",
            Self::InitBool => "arx_array_init_i1",
            Self::InitI8 => "arx_array_init_i8",
            Self::InitI16 => "arx_array_init_i16",
            Self::InitI32 => "arx_array_init_i32",
            Self::InitI64 => "arx_array_init_i64",
            Self::InitF32 => "arx_array_init_f32",
            Self::InitF64 => "arx_array_init_f64",
            Self::InitMem => "arx_array_init_mem",
            Self::NewZeroed => "arx_array_new_zeroed",
            Self::NewInit => "arx_array_new_init",
            Self::NewMultiZeroed => "arx_array_new_md_zeroed",
            Self::NewMultiInit => "arx_array_new_md_init",
            Self::SetLenZeroed => "arx_array_set_len_zeroed",
            Self::SetLenInit => "arx_array_set_len_init",
            Self::Equals => "arx_array_eq",
            Self::Compare => "arx_array_cmp",
            Self::CompareChar => "arx_array_cmp_char",
            Self::CastLen => "arx_array_cast_len",
        }
    }

    pub const fn signature(self) -> Signature {
        use RtTy::{
            Bool, BoolPtr, F32Ptr, F64Ptr, Int, IntPtr, Opaque, OpaquePtr, RecordPtr, Size,
            SizePtr, Void, F32, F64,
        };
        let (params, ret): (&'static [RtTy], RtTy) = match self {
            Self::InitPtr => (&[OpaquePtr, Size, Opaque], Void),
            Self::InitBool => (&[BoolPtr, Size, Bool], Void),
            Self::InitI8 => (&[IntPtr(8), Size, Int(8)], Void),
            Self::InitI16 => (&[IntPtr(16), Size, Int(16)], Void),
            Self::InitI32 => (&[IntPtr(32), Size, Int(32)], Void),
            Self::InitI64 => (&[IntPtr(64), Size, Int(64)], Void),
            Self::InitF32 => (&[F32Ptr, Size, F32], Void),
            Self::InitF64 => (&[F64Ptr, Size, F64], Void),
            Self::InitMem => (&[Opaque, Size, Opaque, Size], Void),
            Self::NewZeroed | Self::NewInit => (&[Opaque, Size], Opaque),
            Self::NewMultiZeroed | Self::NewMultiInit => (&[Opaque, Size, SizePtr], Opaque),
            Self::SetLenZeroed | Self::SetLenInit => (&[Opaque, Size, Size, Opaque], Opaque),
            Self::Equals => (&[RecordPtr, RecordPtr, Opaque], Bool),
            Self::Compare => (&[RecordPtr, RecordPtr, Opaque], Int(32)),
            Self::CompareChar => (&[RecordPtr, RecordPtr], Int(32)),
            Self::CastLen => (&[Size, Size, Size], Size),
        };
        Signature { params, ret }
    }

    /// Fill routine for an element kind.
    ///
    /// Both aggregate kinds go through [`RuntimeFn::InitMem`]; a by-value
    /// aggregate is spilled to memory first.
    pub const fn array_init(kind: ElemKind) -> Self {
        match kind {
            ElemKind::Pointer => Self::InitPtr,
            ElemKind::Bool => Self::InitBool,
            ElemKind::I8 => Self::InitI8,
            ElemKind::I16 => Self::InitI16,
            ElemKind::I32 => Self::InitI32,
            ElemKind::I64 => Self::InitI64,
            ElemKind::F32 => Self::InitF32,
            ElemKind::F64 => Self::InitF64,
            ElemKind::AggregateByValue | ElemKind::AggregateByRef => Self::InitMem,
        }
    }

    /// Allocation routine, chosen by whether the element default is zero.
    pub const fn new_array(zero_init: bool) -> Self {
        if zero_init {
            Self::NewZeroed
        } else {
            Self::NewInit
        }
    }

    pub const fn new_array_multi(zero_init: bool) -> Self {
        if zero_init {
            Self::NewMultiZeroed
        } else {
            Self::NewMultiInit
        }
    }

    pub const fn set_len(zero_init: bool) -> Self {
        if zero_init {
            Self::SetLenZeroed
        } else {
            Self::SetLenInit
        }
    }

    /// Whether the routine's parameter list includes an element size.
    pub const fn takes_elem_size(self) -> bool {
        matches!(self, Self::InitMem)
    }
}

#[cfg(test)]
mod tests;
