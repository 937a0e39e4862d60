//! Integer arithmetic, comparisons, and pointer conversions for `IrBuilder`.

use arx_abi::CmpPredicate;
use inkwell::types::BasicTypeEnum;
use inkwell::IntPredicate;

use super::IrBuilder;
use crate::error::{llvm_err, CodegenError};
use crate::value_id::{LLVMTypeId, ValueId};

fn int_predicate(pred: CmpPredicate) -> IntPredicate {
    match pred {
        CmpPredicate::Eq => IntPredicate::EQ,
        CmpPredicate::Ne => IntPredicate::NE,
        CmpPredicate::Slt => IntPredicate::SLT,
        CmpPredicate::Sle => IntPredicate::SLE,
        CmpPredicate::Sgt => IntPredicate::SGT,
        CmpPredicate::Sge => IntPredicate::SGE,
    }
}

impl IrBuilder<'_, '_> {
    pub fn add(&mut self, lhs: ValueId, rhs: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let l = self.int(lhs, "add")?;
        let r = self.int(rhs, "add")?;
        let v = self
            .builder
            .build_int_add(l, r, name)
            .map_err(llvm_err("add"))?;
        Ok(self.arena.push_value(v.into()))
    }

    pub fn mul(&mut self, lhs: ValueId, rhs: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let l = self.int(lhs, "mul")?;
        let r = self.int(rhs, "mul")?;
        let v = self
            .builder
            .build_int_mul(l, r, name)
            .map_err(llvm_err("mul"))?;
        Ok(self.arena.push_value(v.into()))
    }

    /// Integer comparison producing an `i1`.
    pub fn icmp(
        &mut self,
        pred: CmpPredicate,
        lhs: ValueId,
        rhs: ValueId,
        name: &str,
    ) -> Result<ValueId, CodegenError> {
        let l = self.int(lhs, "icmp")?;
        let r = self.int(rhs, "icmp")?;
        let v = self
            .builder
            .build_int_compare(int_predicate(pred), l, r, name)
            .map_err(llvm_err("icmp"))?;
        Ok(self.arena.push_value(v.into()))
    }

    pub fn and(&mut self, lhs: ValueId, rhs: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let l = self.int(lhs, "and")?;
        let r = self.int(rhs, "and")?;
        let v = self.builder.build_and(l, r, name).map_err(llvm_err("and"))?;
        Ok(self.arena.push_value(v.into()))
    }

    pub fn not(&mut self, val: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let v = self.int(val, "not")?;
        let out = self.builder.build_not(v, name).map_err(llvm_err("not"))?;
        Ok(self.arena.push_value(out.into()))
    }

    /// Reinterpret a pointer as another pointer type. No-op when the types
    /// already agree.
    pub fn pointer_cast(
        &mut self,
        val: ValueId,
        ty: LLVMTypeId,
        name: &str,
    ) -> Result<ValueId, CodegenError> {
        let p = self.pointer(val, "pointer_cast")?;
        let BasicTypeEnum::PointerType(target) = self.arena.get_type(ty) else {
            return Err(CodegenError::ValueKind {
                expected: "pointer type",
                found: self.describe_type(val),
            });
        };
        if p.get_type() == target {
            return Ok(val);
        }
        let v = self
            .builder
            .build_pointer_cast(p, target, name)
            .map_err(llvm_err("pointer_cast"))?;
        Ok(self.arena.push_value(v.into()))
    }

    /// `ptrtoint` to the size-word type.
    pub fn ptr_to_int(&mut self, val: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let p = self.pointer(val, "ptr_to_int")?;
        let v = self
            .builder
            .build_ptr_to_int(p, self.scx.isize_ty, name)
            .map_err(llvm_err("ptr_to_int"))?;
        Ok(self.arena.push_value(v.into()))
    }
}
