//! ABI size and alignment on the 64-bit target.
//!
//! Structs use C layout: fields in order, each aligned to its own
//! alignment, total size rounded up to the struct's alignment.

use crate::{Dim, Idx, Pool, TypeData, TypeError};

/// Size in bytes of the size-word and of a data pointer.
pub const WORD_SIZE: u64 = 8;

/// Size in bytes of a dynamic-array record `{ size, E* }`.
pub const DYN_ARRAY_SIZE: u64 = 2 * WORD_SIZE;

/// Round `offset` up to a multiple of `align` (a power of two).
#[inline]
pub const fn align_to(offset: u64, align: u64) -> u64 {
    (offset + align - 1) & !(align - 1)
}

impl Pool {
    /// ABI size of `idx` in bytes (the element stride inside arrays).
    ///
    /// `void` counts as one byte so that `void[]` behaves as a byte array.
    pub fn size_of(&self, idx: Idx) -> Result<u64, TypeError> {
        Ok(match self.get(idx)? {
            TypeData::Void | TypeData::Bool | TypeData::Char => 1,
            TypeData::Int { bits, .. } | TypeData::Float { bits } => u64::from(*bits / 8),
            TypeData::Pointer(_) => WORD_SIZE,
            TypeData::DynArray { .. } => DYN_ARRAY_SIZE,
            TypeData::StaticArray { elem, .. } => {
                let dim = self.static_dim(idx)?;
                self.size_of(*elem)? * dim
            }
            TypeData::Struct(def) => {
                let mut offset = 0;
                let mut align = 1;
                for &field in &def.fields {
                    let field_align = self.align_of(field)?;
                    offset = align_to(offset, field_align) + self.size_of(field)?;
                    align = align.max(field_align);
                }
                align_to(offset, align)
            }
        })
    }

    /// ABI alignment of `idx` in bytes.
    pub fn align_of(&self, idx: Idx) -> Result<u64, TypeError> {
        Ok(match self.get(idx)? {
            TypeData::Void | TypeData::Bool | TypeData::Char => 1,
            TypeData::Int { bits, .. } | TypeData::Float { bits } => u64::from(*bits / 8),
            TypeData::Pointer(_) | TypeData::DynArray { .. } => WORD_SIZE,
            TypeData::StaticArray { elem, .. } => self.align_of(*elem)?,
            TypeData::Struct(def) => {
                let mut align = 1;
                for &field in &def.fields {
                    align = align.max(self.align_of(field)?);
                }
                align
            }
        })
    }

    /// Element count of a static array type.
    ///
    /// Fails unless the declared dimension folded to a non-negative constant.
    pub fn static_dim(&self, idx: Idx) -> Result<u64, TypeError> {
        match self.get(idx)? {
            TypeData::StaticArray { dim: Dim::Int(n), .. } => {
                u64::try_from(*n).map_err(|_| TypeError::NegativeDimension {
                    ty: self.display(idx),
                    dim: *n,
                })
            }
            TypeData::StaticArray {
                dim: Dim::NonConstant,
                ..
            } => Err(TypeError::NonConstantDimension {
                ty: self.display(idx),
            }),
            _ => Err(TypeError::KindMismatch {
                expected: crate::Tag::StaticArray,
                ty: self.display(idx),
            }),
        }
    }
}
