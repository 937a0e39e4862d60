//! Memory operations (alloca, load, store, GEP, memcpy) for `IrBuilder`.

use inkwell::types::BasicType;
use inkwell::values::{IntValue, PointerValue};
use inkwell::AddressSpace;

use super::IrBuilder;
use crate::error::{llvm_err, CodegenError};
use crate::value_id::{LLVMTypeId, ValueId};

impl<'ctx> IrBuilder<'_, 'ctx> {
    /// Build a stack allocation at the current position.
    pub fn alloca(&mut self, ty: LLVMTypeId, name: &str) -> Result<ValueId, CodegenError> {
        let llvm_ty = self.arena.get_type(ty);
        let ptr = self
            .builder
            .build_alloca(llvm_ty, name)
            .map_err(llvm_err("alloca"))?;
        Ok(self.arena.push_value(ptr.into()))
    }

    /// Build an alloca at the start of the current function's entry block.
    ///
    /// Saves the insertion point, emits the alloca, restores the position.
    pub fn create_entry_alloca(
        &mut self,
        ty: LLVMTypeId,
        name: &str,
    ) -> Result<ValueId, CodegenError> {
        const OP: &str = "entry alloca";
        let function = self
            .current_function
            .ok_or(CodegenError::NoActiveFunction { op: OP })?;
        let entry = self
            .arena
            .get_function(function)
            .get_first_basic_block()
            .ok_or(CodegenError::NoActiveFunction { op: OP })?;
        let llvm_ty = self.arena.get_type(ty);

        match entry.get_first_instruction() {
            Some(first) => self.builder.position_before(&first),
            None => self.builder.position_at_end(entry),
        }
        let ptr = self.builder.build_alloca(llvm_ty, name).map_err(llvm_err(OP));

        if let Some(block) = self.current_block {
            let bb = self.arena.get_block(block);
            self.builder.position_at_end(bb);
        }

        Ok(self.arena.push_value(ptr?.into()))
    }

    /// Load a value of type `ty` through `ptr`, which is reinterpreted as a
    /// `ty*` first when it points at something else.
    pub fn load(&mut self, ty: LLVMTypeId, ptr: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let p = self.pointer(ptr, "load")?;
        let p = self.typed_pointer(p, ty, "load")?;
        let v = self.builder.build_load(p, name).map_err(llvm_err("load"))?;
        Ok(self.arena.push_value(v))
    }

    pub fn store(&mut self, val: ValueId, ptr: ValueId) -> Result<(), CodegenError> {
        let v = self.arena.get_value(val);
        let p = self.pointer(ptr, "store")?;
        self.builder.build_store(p, v).map_err(llvm_err("store"))?;
        Ok(())
    }

    /// In-bounds GEP with arbitrary integer indices.
    #[allow(
        unsafe_code,
        reason = "LLVM C API requires unsafe for build_in_bounds_gep"
    )]
    pub fn gep(
        &mut self,
        pointee_ty: LLVMTypeId,
        ptr: ValueId,
        indices: &[ValueId],
        name: &str,
    ) -> Result<ValueId, CodegenError> {
        let p = self.pointer(ptr, "gep")?;
        let p = self.typed_pointer(p, pointee_ty, "gep")?;
        let idx_vals = indices
            .iter()
            .map(|&id| self.int(id, "gep index"))
            .collect::<Result<Vec<IntValue<'ctx>>, _>>()?;
        // SAFETY: callers index within the pointee type (element offsets of
        // a buffer they obtained from an array value, or constant 0/field).
        let v = unsafe {
            self.builder
                .build_in_bounds_gep(p, &idx_vals, name)
                .map_err(llvm_err("gep"))?
        };
        Ok(self.arena.push_value(v.into()))
    }

    /// Address of field `index` of the struct `struct_ty` at `ptr`.
    pub fn struct_gep(
        &mut self,
        struct_ty: LLVMTypeId,
        ptr: ValueId,
        index: u32,
        name: &str,
    ) -> Result<ValueId, CodegenError> {
        let p = self.pointer(ptr, "struct_gep")?;
        let p = self.typed_pointer(p, struct_ty, "struct_gep")?;
        let v = self
            .builder
            .build_struct_gep(p, index, name)
            .map_err(llvm_err("struct_gep"))?;
        Ok(self.arena.push_value(v.into()))
    }

    /// `memcpy(dst, src, bytes)` with byte alignment.
    pub fn memcpy(&mut self, dst: ValueId, src: ValueId, bytes: ValueId) -> Result<(), CodegenError> {
        let d = self.pointer(dst, "memcpy")?;
        let s = self.pointer(src, "memcpy")?;
        let n = self.int(bytes, "memcpy length")?;
        self.builder
            .build_memcpy(d, 1, s, 1, n)
            .map_err(llvm_err("memcpy"))?;
        Ok(())
    }

    /// `memset(dst, 0, bytes)`.
    pub fn memset_zero(&mut self, dst: ValueId, bytes: ValueId) -> Result<(), CodegenError> {
        let d = self.pointer(dst, "memset")?;
        let n = self.int(bytes, "memset length")?;
        let zero = self.scx.type_i8().const_zero();
        self.builder
            .build_memset(d, 1, zero, n)
            .map_err(llvm_err("memset"))?;
        Ok(())
    }

    /// `p` as a pointer to `pointee`, bitcast when its pointee differs.
    fn typed_pointer(
        &self,
        p: PointerValue<'ctx>,
        pointee: LLVMTypeId,
        op: &'static str,
    ) -> Result<PointerValue<'ctx>, CodegenError> {
        let target = self
            .arena
            .get_type(pointee)
            .ptr_type(AddressSpace::default());
        if p.get_type() == target {
            return Ok(p);
        }
        self.builder
            .build_pointer_cast(p, target, "")
            .map_err(llvm_err(op))
    }

    // -- Operand checks --

    pub(crate) fn pointer(
        &self,
        id: ValueId,
        op: &'static str,
    ) -> Result<PointerValue<'ctx>, CodegenError> {
        match self.arena.get_value(id) {
            inkwell::values::BasicValueEnum::PointerValue(p) => Ok(p),
            other => {
                tracing::error!(op, val_type = ?other.get_type(), "expected pointer operand");
                Err(CodegenError::ValueKind {
                    expected: "pointer",
                    found: self.describe_type(id),
                })
            }
        }
    }

    pub(crate) fn int(&self, id: ValueId, op: &'static str) -> Result<IntValue<'ctx>, CodegenError> {
        match self.arena.get_value(id) {
            inkwell::values::BasicValueEnum::IntValue(v) => Ok(v),
            other => {
                tracing::error!(op, val_type = ?other.get_type(), "expected integer operand");
                Err(CodegenError::ValueKind {
                    expected: "integer",
                    found: self.describe_type(id),
                })
            }
        }
    }
}
