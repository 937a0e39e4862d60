//! Equality, ordering and identity.
//!
//! Equality and ordering go through the runtime, which takes both operands
//! as record addresses. Identity compares the `(len, ptr)` pairs inline.

use arx_abi::{compare_routine, ArrayCmpOp, CmpPlan, EqualityOp, IdentityOp, RuntimeFn};

use super::{ArrayLowerer, ArrayValue};
use crate::error::CodegenError;
use crate::value_id::ValueId;

impl ArrayLowerer<'_, '_, '_> {
    /// `lhs == rhs` / `lhs != rhs`, element-wise. Produces an `i1`.
    pub fn equals(
        &mut self,
        op: EqualityOp,
        lhs: &ArrayValue,
        rhs: &ArrayValue,
    ) -> Result<ValueId, CodegenError> {
        let elem = self.common_elem(lhs.ty(), rhs.ty())?;
        tracing::debug!(op = ?op, ty = %self.pool().display(lhs.ty()), "array equality");

        let l = self.operand_record(lhs)?;
        let r = self.operand_record(rhs)?;
        let ti = self.array_descriptor(elem)?;
        let eq = self.call_runtime_value(RuntimeFn::Equals, &[l, r, ti], "arr.eq")?;
        match op {
            EqualityOp::Eq => Ok(eq),
            EqualityOp::Ne => self.builder.not(eq, "arr.ne"),
        }
    }

    /// Lexicographic ordering. Produces an `i1`.
    ///
    /// Comparators that hold (or fail) for every pair of arrays fold to a
    /// constant without a call.
    pub fn compare(
        &mut self,
        op: ArrayCmpOp,
        lhs: &ArrayValue,
        rhs: &ArrayValue,
    ) -> Result<ValueId, CodegenError> {
        let elem = self.common_elem(lhs.ty(), rhs.ty())?;
        tracing::debug!(op = ?op, ty = %self.pool().display(lhs.ty()), "array ordering");

        let pred = match op.plan() {
            CmpPlan::Const(value) => return Ok(self.builder.const_bool(value)),
            CmpPlan::Predicate(pred) => pred,
        };
        let l = self.operand_record(lhs)?;
        let r = self.operand_record(rhs)?;
        let (routine, needs_ti) = compare_routine(self.pool(), elem)?;
        let ord = if needs_ti {
            let ti = self.array_descriptor(elem)?;
            self.call_runtime_value(routine, &[l, r, ti], "arr.cmp")?
        } else {
            self.call_runtime_value(routine, &[l, r], "arr.cmp")?
        };
        let zero = self.builder.const_i32(0);
        self.builder.icmp(pred, ord, zero, "arr.ord")
    }

    /// `lhs is rhs` / `lhs !is rhs`: same length and same data pointer.
    ///
    /// Either side may be `null`, which is identical to any empty array
    /// with a null data pointer.
    pub fn identity(
        &mut self,
        op: IdentityOp,
        lhs: &ArrayValue,
        rhs: &ArrayValue,
    ) -> Result<ValueId, CodegenError> {
        let is_null = |v: &ArrayValue| matches!(v, ArrayValue::Null { .. });
        if !is_null(lhs) && !is_null(rhs) {
            self.common_elem(lhs.ty(), rhs.ty())?;
        }
        tracing::debug!(op = ?op, ty = %self.pool().display(lhs.ty()), "array identity");

        let pred = op.predicate();
        let len_l = self.len(lhs)?;
        let len_r = self.len(rhs)?;
        let ptr_l = self.ptr(lhs)?;
        let ptr_r = self.ptr(rhs)?;
        let addr_l = self.builder.ptr_to_int(ptr_l, "addr.l")?;
        let addr_r = self.builder.ptr_to_int(ptr_r, "addr.r")?;
        let same_len = self.builder.icmp(pred, len_l, len_r, "is.len")?;
        let same_ptr = self.builder.icmp(pred, addr_l, addr_r, "is.ptr")?;
        self.builder.and(same_len, same_ptr, "is")
    }

    /// Address of a record holding `value`, as the runtime expects it.
    ///
    /// Stored dynamic records pass their own address; everything else is
    /// boxed into an entry-block temporary.
    fn operand_record(&mut self, value: &ArrayValue) -> Result<ValueId, CodegenError> {
        let ty = value.ty();
        let is_static = self.is_static(ty)?;
        match *value {
            ArrayValue::Var { addr, .. } | ArrayValue::Imm { value: addr, .. } if !is_static => {
                let elem = self.elem_of(ty)?;
                let rec = self.record_llty(elem)?;
                let rec_ptr = self.builder.ptr_to(rec);
                self.builder.pointer_cast(addr, rec_ptr, "rec")
            }
            _ => self.box_record(value),
        }
    }
}
