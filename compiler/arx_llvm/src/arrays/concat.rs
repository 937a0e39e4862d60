//! Appending and concatenation.

use arx_types::Idx;

use super::{ArrayLowerer, ArrayValue, ElementValue, Operand};
use crate::error::CodegenError;

impl ArrayLowerer<'_, '_, '_> {
    /// `array ~= elem`: grow by one and store `elem` in the new last slot.
    pub fn append_element(
        &mut self,
        array: &ArrayValue,
        elem: &ElementValue,
    ) -> Result<ArrayValue, CodegenError> {
        let elem_ty = self.expect_dynamic(array.ty())?;
        self.check_elem(elem_ty, elem.ty())?;
        tracing::debug!(op = "append_element", ty = %self.pool().display(array.ty()));

        let len = self.len(array)?;
        let one = self.builder.const_size(1);
        let new_len = self.builder.add(len, one, "len.inc")?;
        let grown = self.resize(array, new_len)?;
        let data = self.ptr(&grown)?;
        let slot = self.elem_at(elem_ty, data, len)?;
        self.store_element(elem_ty, slot, elem)?;
        Ok(grown)
    }

    /// `array ~= other`: grow by `len(other)` and copy `other` to the end.
    pub fn append_array(
        &mut self,
        array: &ArrayValue,
        other: &ArrayValue,
    ) -> Result<ArrayValue, CodegenError> {
        self.expect_dynamic(array.ty())?;
        let elem = self.common_elem(array.ty(), other.ty())?;
        tracing::debug!(op = "append_array", ty = %self.pool().display(array.ty()));

        let len_a = self.len(array)?;
        let len_b = self.len(other)?;
        // Read before the resize: `other` may be `array` itself.
        let src = self.ptr(other)?;
        let total = self.builder.add(len_a, len_b, "len.sum")?;
        let grown = self.resize(array, total)?;
        let data = self.ptr(&grown)?;
        let dst = self.elem_at(elem, data, len_a)?;
        let bytes = self.byte_len(len_b, elem)?;
        self.builder.memcpy(dst, src, bytes)?;
        Ok(grown)
    }

    /// `a ~ b` into a fresh array of type `result_ty`.
    pub fn concat(
        &mut self,
        result_ty: Idx,
        a: &ArrayValue,
        b: &ArrayValue,
    ) -> Result<ArrayValue, CodegenError> {
        let elem = self.expect_dynamic(result_ty)?;
        self.check_elem(elem, self.elem_of(a.ty())?)?;
        self.check_elem(elem, self.elem_of(b.ty())?)?;
        tracing::debug!(op = "concat", ty = %self.pool().display(result_ty));

        let len_a = self.len(a)?;
        let len_b = self.len(b)?;
        let src_a = self.ptr(a)?;
        let src_b = self.ptr(b)?;
        let total = self.builder.add(len_a, len_b, "len.sum")?;
        let fresh = self.new_array(result_ty, total)?;
        let data = self.ptr(&fresh)?;

        let bytes_a = self.byte_len(len_a, elem)?;
        self.builder.memcpy(data, src_a, bytes_a)?;
        let tail = self.elem_at(elem, data, len_a)?;
        let bytes_b = self.byte_len(len_b, elem)?;
        self.builder.memcpy(tail, src_b, bytes_b)?;
        Ok(fresh)
    }

    /// `e ~ a` or `a ~ e` into a fresh array of type `result_ty`.
    ///
    /// The side whose type is the result element type is the element.
    pub fn concat_element(
        &mut self,
        result_ty: Idx,
        lhs: &Operand,
        rhs: &Operand,
    ) -> Result<ArrayValue, CodegenError> {
        let elem = self.expect_dynamic(result_ty)?;
        let (array, value, prefix) = match (lhs, rhs) {
            (Operand::Element(e), Operand::Array(a)) if e.ty() == elem => (a, e, true),
            (Operand::Array(a), Operand::Element(e)) if e.ty() == elem => (a, e, false),
            (Operand::Element(e), _) | (_, Operand::Element(e)) => {
                return Err(CodegenError::ElementMismatch {
                    expected: self.pool().display(elem),
                    found: self.pool().display(e.ty()),
                })
            }
            (Operand::Array(a), Operand::Array(_)) => {
                return Err(CodegenError::ValueKind {
                    expected: "one element operand",
                    found: self.pool().display(a.ty()),
                })
            }
        };
        self.check_elem(elem, self.elem_of(array.ty())?)?;
        tracing::debug!(op = "concat_element", ty = %self.pool().display(result_ty), prefix);

        let len = self.len(array)?;
        let src = self.ptr(array)?;
        let one = self.builder.const_size(1);
        let total = self.builder.add(len, one, "len.inc")?;
        let fresh = self.new_array(result_ty, total)?;
        let data = self.ptr(&fresh)?;
        let bytes = self.byte_len(len, elem)?;

        if prefix {
            self.store_element(elem, data, value)?;
            let rest = self.elem_at(elem, data, one)?;
            self.builder.memcpy(rest, src, bytes)?;
        } else {
            self.builder.memcpy(data, src, bytes)?;
            let slot = self.elem_at(elem, data, len)?;
            self.store_element(elem, slot, value)?;
        }
        Ok(fresh)
    }
}
