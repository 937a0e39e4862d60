//! Runtime allocation and resize.

use arx_abi::RuntimeFn;
use arx_types::Idx;

use super::{ArrayLowerer, ArrayValue};
use crate::error::CodegenError;
use crate::value_id::ValueId;

impl ArrayLowerer<'_, '_, '_> {
    /// `new E[count]`: a fresh dynamic array of `count` default elements.
    pub fn new_array(&mut self, ty: Idx, count: ValueId) -> Result<ArrayValue, CodegenError> {
        let elem = self.expect_dynamic(ty)?;
        let zero = self.pool().is_zero_init(elem)?;
        tracing::debug!(op = "new_array", ty = %self.pool().display(ty), zero);

        let ti = self.descriptor(ty)?;
        let raw = self.call_runtime_value(RuntimeFn::new_array(zero), &[ti, count], "new")?;
        let ptr_ty = self.elem_ptr_llty(elem)?;
        let ptr = self.builder.pointer_cast(raw, ptr_ty, "data")?;
        Ok(ArrayValue::slice(ty, count, ptr))
    }

    /// `new E[d0][d1]...`: a nested dynamic array allocated in one call.
    ///
    /// The dimensions go to the runtime through an entry-block `[n x i64]`
    /// temporary. Whether storage starts zeroed is decided by the element
    /// type `dims.len()` levels down.
    pub fn new_array_multi(&mut self, ty: Idx, dims: &[ValueId]) -> Result<ArrayValue, CodegenError> {
        let elem = self.expect_dynamic(ty)?;
        let Some(&outer) = dims.first() else {
            return Err(CodegenError::ValueKind {
                expected: "at least one dimension",
                found: "none".to_owned(),
            });
        };
        let mut leaf = ty;
        for _ in dims {
            leaf = self.elem_of(leaf)?;
        }
        let zero = self.pool().is_zero_init(leaf)?;
        tracing::debug!(
            op = "new_array_multi",
            ty = %self.pool().display(ty),
            ndims = dims.len(),
            zero,
        );

        let ndims = dims.len() as u64;
        let dims_ty = self.builder.scx().isize_ty.array_type(ndims as u32);
        let dims_ty = self.builder.register_type(dims_ty.into());
        let buf = self.builder.create_entry_alloca(dims_ty, "dims")?;
        let zero_idx = self.builder.const_size(0);
        for (i, &dim) in dims.iter().enumerate() {
            let idx = self.builder.const_size(i as u64);
            let slot = self.builder.gep(dims_ty, buf, &[zero_idx, idx], "dim")?;
            self.builder.store(dim, slot)?;
        }
        let dims_ptr = self.builder.gep(dims_ty, buf, &[zero_idx, zero_idx], "dims.ptr")?;

        let ti = self.descriptor(ty)?;
        let n = self.builder.const_size(ndims);
        let raw = self.call_runtime_value(
            RuntimeFn::new_array_multi(zero),
            &[ti, n, dims_ptr],
            "new.md",
        )?;
        let ptr_ty = self.elem_ptr_llty(elem)?;
        let ptr = self.builder.pointer_cast(raw, ptr_ty, "data")?;
        Ok(ArrayValue::slice(ty, outer, ptr))
    }

    /// `array.length = new_len`: grow or shrink through the runtime.
    ///
    /// Returns the resized slice; storing it back is the caller's business.
    pub fn resize(&mut self, array: &ArrayValue, new_len: ValueId) -> Result<ArrayValue, CodegenError> {
        let ty = array.ty();
        let elem = self.expect_dynamic(ty)?;
        let zero = self.pool().is_zero_init(elem)?;
        tracing::debug!(op = "resize", ty = %self.pool().display(ty), zero);

        let old_len = self.len(array)?;
        let old_ptr = self.ptr(array)?;
        let ti = self.descriptor(ty)?;
        let raw = self.call_runtime_value(
            RuntimeFn::set_len(zero),
            &[ti, new_len, old_len, old_ptr],
            "resized",
        )?;
        let ptr_ty = self.elem_ptr_llty(elem)?;
        let ptr = self.builder.pointer_cast(raw, ptr_ty, "data")?;
        Ok(ArrayValue::slice(ty, new_len, ptr))
    }
}
