//! Element kinds as the runtime sees them.

use std::fmt;

use arx_types::{Idx, Pool, TypeData};

use crate::AbiError;

/// Physical kind of an array element.
///
/// The set is closed: [`RuntimeFn::array_init`](crate::RuntimeFn::array_init)
/// matches on it exhaustively, so a new kind cannot be added without a
/// routine to fill it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ElemKind {
    Pointer,
    Bool,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Small aggregate held as a first-class value.
    AggregateByValue,
    /// Aggregate handled through its address.
    AggregateByRef,
}

impl ElemKind {
    /// Classify a value type. `char` shares the 8-bit routine; `void` has
    /// no kind.
    pub fn classify(pool: &Pool, ty: Idx) -> Result<Self, AbiError> {
        Ok(match pool.get(ty)? {
            TypeData::Pointer(_) => Self::Pointer,
            TypeData::Bool => Self::Bool,
            TypeData::Char => Self::I8,
            TypeData::Int { bits: 8, .. } => Self::I8,
            TypeData::Int { bits: 16, .. } => Self::I16,
            TypeData::Int { bits: 32, .. } => Self::I32,
            TypeData::Int { bits: 64, .. } => Self::I64,
            TypeData::Float { bits: 32 } => Self::F32,
            TypeData::Float { bits: 64 } => Self::F64,
            TypeData::Struct(_) | TypeData::StaticArray { .. } | TypeData::DynArray { .. } => {
                if pool.is_passed_by_ref(ty)? {
                    Self::AggregateByRef
                } else {
                    Self::AggregateByValue
                }
            }
            TypeData::Void | TypeData::Int { .. } | TypeData::Float { .. } => {
                return Err(AbiError::UnsupportedElement {
                    ty: pool.display(ty),
                })
            }
        })
    }

    #[inline]
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateByValue | Self::AggregateByRef)
    }
}

impl fmt::Display for ElemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pointer => "pointer",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::AggregateByValue => "aggregate",
            Self::AggregateByRef => "aggregate (by reference)",
        })
    }
}
