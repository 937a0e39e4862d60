//! Representation casts.

use arx_abi::{plan_cast_len, LenCast, RuntimeFn};
use arx_types::{Idx, Tag};

use super::{ArrayLowerer, ArrayValue, CastResult};
use crate::error::CodegenError;
use crate::value_id::ValueId;

impl ArrayLowerer<'_, '_, '_> {
    /// `cast(T) value` for an array `value`.
    ///
    /// - `T*`: the data pointer, reinterpreted.
    /// - `F[]`: a slice over the same bytes, length rescaled.
    /// - anything else, static arrays included, is rejected.
    pub fn cast(&mut self, value: &ArrayValue, target: Idx) -> Result<CastResult, CodegenError> {
        let old_elem = self.elem_of(value.ty())?;
        tracing::debug!(
            op = "cast",
            from = %self.pool().display(value.ty()),
            to = %self.pool().display(target),
        );
        match self.pool().tag(target)? {
            Tag::Pointer => {
                let data = self.ptr(value)?;
                let ptr_ty = self.llty(target)?;
                let ptr = self.builder.pointer_cast(data, ptr_ty, "cast")?;
                Ok(CastResult::Pointer(ptr))
            }
            Tag::DynArray => {
                let new_elem = self.pool().array_elem(target)?;
                let len = self.len(value)?;
                let len = self.cast_length(len, old_elem, new_elem)?;
                let data = self.ptr(value)?;
                let ptr_ty = self.elem_ptr_llty(new_elem)?;
                let ptr = self.builder.pointer_cast(data, ptr_ty, "cast")?;
                Ok(CastResult::Array(ArrayValue::slice(target, len, ptr)))
            }
            _ => Err(CodegenError::UnsupportedCast {
                from: self.pool().display(value.ty()),
                to: self.pool().display(target),
            }),
        }
    }

    /// Element count of `len` `old_elem`s reinterpreted as `new_elem`s.
    ///
    /// Returns `len` itself when the strides agree. Otherwise the runtime
    /// rescales, trapping when the byte length does not divide evenly.
    pub fn cast_length(
        &mut self,
        len: ValueId,
        old_elem: Idx,
        new_elem: Idx,
    ) -> Result<ValueId, CodegenError> {
        match plan_cast_len(self.pool(), old_elem, new_elem)? {
            LenCast::Identity => Ok(len),
            LenCast::Runtime { old_size, new_size } => {
                let old = self.builder.const_size(old_size);
                let new = self.builder.const_size(new_size);
                self.call_runtime_value(RuntimeFn::CastLen, &[len, old, new], "len.cast")
            }
        }
    }
}
