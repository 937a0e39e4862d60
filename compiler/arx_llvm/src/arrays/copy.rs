//! Element copies between existing arrays.

use super::{ArrayLowerer, ArrayValue};
use crate::error::CodegenError;

impl ArrayLowerer<'_, '_, '_> {
    /// `dst[] = src[]` where both sides are slices.
    pub fn copy_slices(&mut self, dst: &ArrayValue, src: &ArrayValue) -> Result<(), CodegenError> {
        self.expect_slice(src, "copy_slices")?;
        self.expect_slice(dst, "copy_slices")?;
        self.copy_elements(dst, src)
    }

    /// `dst[] = src` for a slice `dst` and any array `src`.
    pub fn copy_to_slice(&mut self, dst: &ArrayValue, src: &ArrayValue) -> Result<(), CodegenError> {
        self.expect_slice(dst, "copy_to_slice")?;
        self.copy_elements(dst, src)
    }

    /// Copy one static array into another of the same type.
    pub fn copy_static(&mut self, dst: &ArrayValue, src: &ArrayValue) -> Result<(), CodegenError> {
        let ty = dst.ty();
        if !self.is_static(ty)? {
            return Err(CodegenError::NotAnArray {
                ty: self.pool().display(ty),
            });
        }
        if src.ty() != ty {
            return Err(CodegenError::ElementMismatch {
                expected: self.pool().display(ty),
                found: self.pool().display(src.ty()),
            });
        }
        tracing::debug!(op = "copy_static", ty = %self.pool().display(ty));
        let size = self.pool().size_of(ty)?;
        let bytes = self.builder.const_size(size);
        let to = self.ptr(dst)?;
        let from = self.ptr(src)?;
        self.builder.memcpy(to, from, bytes)
    }

    /// Copy `len(dst)` elements; the destination length is the authority.
    fn copy_elements(&mut self, dst: &ArrayValue, src: &ArrayValue) -> Result<(), CodegenError> {
        let elem = self.common_elem(dst.ty(), src.ty())?;
        tracing::debug!(
            op = "copy",
            dst = %self.pool().display(dst.ty()),
            src = %self.pool().display(src.ty()),
        );
        let count = self.len(dst)?;
        let to = self.ptr(dst)?;
        let from = self.ptr(src)?;
        let bytes = self.byte_len(count, elem)?;
        self.builder.memcpy(to, from, bytes)
    }

    fn expect_slice(&self, value: &ArrayValue, op: &'static str) -> Result<(), CodegenError> {
        match value {
            ArrayValue::Slice { .. } => Ok(()),
            ArrayValue::Var { .. } | ArrayValue::Imm { .. } | ArrayValue::Null { .. } => {
                tracing::error!(op, found = value.kind_name(), "expected a slice operand");
                Err(CodegenError::ValueKind {
                    expected: "slice",
                    found: value.kind_name().to_owned(),
                })
            }
        }
    }
}
