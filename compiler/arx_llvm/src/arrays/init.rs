//! Record mutation and element-wise fill.

use arx_abi::{plan_fill, FillPlan, FillRequest};
use arx_types::Idx;

use super::{ArrayLowerer, ArrayValue, ElementValue};
use crate::error::CodegenError;
use crate::value_id::ValueId;

impl ArrayLowerer<'_, '_, '_> {
    /// `dst = []`: zero length, null data.
    pub fn clear(&mut self, dst: &ArrayValue) -> Result<(), CodegenError> {
        let elem = self.expect_dynamic(dst.ty())?;
        tracing::debug!(op = "clear", ty = %self.pool().display(dst.ty()));
        let rec = self.record_address(dst, "clear")?;
        let len = self.builder.const_size(0);
        let ptr_ty = self.elem_ptr_llty(elem)?;
        let null = self.builder.const_zero(ptr_ty)?;
        self.store_pair(elem, rec, len, null)
    }

    /// Store an explicit `(len, ptr)` pair into `dst`'s record.
    pub fn set_array(
        &mut self,
        dst: &ArrayValue,
        len: ValueId,
        ptr: ValueId,
    ) -> Result<(), CodegenError> {
        let elem = self.expect_dynamic(dst.ty())?;
        let rec = self.record_address(dst, "set_array")?;
        let ptr_ty = self.elem_ptr_llty(elem)?;
        let ptr = self.builder.pointer_cast(ptr, ptr_ty, "data")?;
        self.store_pair(elem, rec, len, ptr)
    }

    /// `dst = src` for a dynamic `dst`.
    ///
    /// `src` may be any form of either array kind; a static buffer is viewed
    /// as a slice of its full length.
    pub fn assign(&mut self, dst: &ArrayValue, src: &ArrayValue) -> Result<(), CodegenError> {
        self.expect_dynamic(dst.ty())?;
        self.common_elem(dst.ty(), src.ty())?;
        tracing::debug!(
            op = "assign",
            dst = %self.pool().display(dst.ty()),
            src = %self.pool().display(src.ty()),
        );
        let len = self.len(src)?;
        let ptr = self.ptr(src)?;
        self.set_array(dst, len, ptr)
    }

    /// `array[] = value`: write `value` into every element.
    pub fn fill(&mut self, array: &ArrayValue, value: &ElementValue) -> Result<(), CodegenError> {
        let dest_elem = self.elem_of(array.ty())?;
        let plan = plan_fill(
            self.pool(),
            FillRequest {
                dest_elem,
                value_ty: value.ty(),
                value_is_zero: matches!(value, ElementValue::Zero { .. }),
            },
        )?;
        tracing::debug!(op = "fill", ty = %self.pool().display(array.ty()), ?plan);

        let count = self.len(array)?;
        let ptr = self.ptr(array)?;
        match plan {
            FillPlan::ZeroFill {
                elem_size, scale, ..
            } => {
                let unit = self.builder.const_size(elem_size * scale);
                let bytes = self.builder.mul(count, unit, "bytes")?;
                self.builder.memset_zero(ptr, bytes)
            }
            FillPlan::Runtime {
                routine,
                kind,
                scale,
                elem_size,
                ..
            } => {
                let count = if scale == 1 {
                    count
                } else {
                    let scale = self.builder.const_size(scale);
                    self.builder.mul(count, scale, "count")?
                };
                let value = if kind.is_aggregate() {
                    self.element_address(value)?
                } else {
                    self.element_rvalue(value)?
                };
                let mut args = vec![ptr, count, value];
                if let Some(size) = elem_size {
                    args.push(self.builder.const_size(size));
                }
                self.call_runtime(routine, &args, "")?;
                Ok(())
            }
        }
    }

    /// Store `value` into the slot at `slot` (an `E*`) with element
    /// assignment semantics.
    pub(super) fn store_element(
        &mut self,
        elem: Idx,
        slot: ValueId,
        value: &ElementValue,
    ) -> Result<(), CodegenError> {
        self.check_elem(elem, value.ty())?;
        match *value {
            ElementValue::Direct { value, .. } => self.builder.store(value, slot),
            ElementValue::Indirect { addr, .. } => {
                let size = self.pool().size_of(elem)?;
                let bytes = self.builder.const_size(size);
                self.builder.memcpy(slot, addr, bytes)
            }
            ElementValue::Zero { .. } => {
                let llty = self.elem_llty(elem)?;
                let zero = self.builder.const_zero(llty)?;
                self.builder.store(zero, slot)
            }
        }
    }

    /// `value` as a first-class SSA value.
    fn element_rvalue(&mut self, value: &ElementValue) -> Result<ValueId, CodegenError> {
        match *value {
            ElementValue::Direct { value, .. } => Ok(value),
            ElementValue::Indirect { ty, addr } => {
                let llty = self.llty(ty)?;
                self.builder.load(llty, addr, "elem")
            }
            ElementValue::Zero { ty } => {
                let llty = self.llty(ty)?;
                self.builder.const_zero(llty)
            }
        }
    }

    /// `value` in memory; first-class values are spilled to the stack.
    fn element_address(&mut self, value: &ElementValue) -> Result<ValueId, CodegenError> {
        match *value {
            ElementValue::Indirect { addr, .. } => Ok(addr),
            ElementValue::Direct { ty, value } => {
                let llty = self.llty(ty)?;
                self.spill(llty, value, "elem.tmp")
            }
            ElementValue::Zero { ty } => {
                let llty = self.llty(ty)?;
                let zero = self.builder.const_zero(llty)?;
                self.spill(llty, zero, "elem.tmp")
            }
        }
    }
}
