//! Array lowering.
//!
//! [`ArrayLowerer`] implements every array operation on top of two
//! accessors, [`len`](ArrayLowerer::len) and [`ptr`](ArrayLowerer::ptr).
//! Only the accessor layer (`access.rs`) matches on [`ArrayValue`] forms.
//!
//! | File | Operations |
//! |------|------------|
//! | `access.rs` | `len`, `ptr`, `record_address`, `box_record` |
//! | `init.rs` | `clear`, `set_array`, `assign`, `fill` |
//! | `constant.rs` | `const_initializer`, `const_slice`, `const_static_splat`, `const_default` |
//! | `alloc.rs` | `new_array`, `new_array_multi`, `resize` |
//! | `concat.rs` | `append_element`, `append_array`, `concat`, `concat_element` |
//! | `copy.rs` | `copy_slices`, `copy_to_slice`, `copy_static` |
//! | `compare.rs` | `equals`, `compare`, `identity` |
//! | `cast.rs` | `cast`, `cast_length` |
//!
//! Byte lengths are always `count * size_of(E)`; `Pool::size_of` includes
//! tail padding, so it is the ABI stride.

mod access;
mod alloc;
mod cast;
mod compare;
mod concat;
mod constant;
mod copy;
mod init;
mod value;

pub use value::{ArrayInitializer, ArrayValue, CastResult, ElementInit, ElementValue, Operand};

use arx_abi::RuntimeFn;
use arx_types::{Idx, Pool, Tag};

use crate::error::CodegenError;
use crate::ir_builder::IrBuilder;
use crate::layout::TypeLayoutResolver;
use crate::runtime_decl::RuntimeDecls;
use crate::value_id::{LLVMTypeId, ValueId};

/// Lowers array operations at the builder's current insertion point.
pub struct ArrayLowerer<'a, 'scx, 'ctx> {
    builder: &'a mut IrBuilder<'scx, 'ctx>,
    layouts: &'a TypeLayoutResolver<'a, 'ctx>,
    runtime: &'a RuntimeDecls,
}

impl<'a, 'scx, 'ctx> ArrayLowerer<'a, 'scx, 'ctx> {
    pub fn new(
        builder: &'a mut IrBuilder<'scx, 'ctx>,
        layouts: &'a TypeLayoutResolver<'a, 'ctx>,
        runtime: &'a RuntimeDecls,
    ) -> Self {
        Self {
            builder,
            layouts,
            runtime,
        }
    }

    /// The underlying builder, for emitting non-array code in between.
    #[inline]
    pub fn builder(&mut self) -> &mut IrBuilder<'scx, 'ctx> {
        &mut *self.builder
    }

    #[inline]
    pub fn pool(&self) -> &'a Pool {
        self.layouts.pool()
    }

    // -- Type helpers --

    /// Element type of an array type.
    fn elem_of(&self, ty: Idx) -> Result<Idx, CodegenError> {
        if !self.pool().is_array(ty) {
            return Err(CodegenError::NotAnArray {
                ty: self.pool().display(ty),
            });
        }
        Ok(self.pool().array_elem(ty)?)
    }

    fn is_static(&self, ty: Idx) -> Result<bool, CodegenError> {
        Ok(self.pool().tag(ty)? == Tag::StaticArray)
    }

    /// Fails unless `ty` is a dynamic array type.
    fn expect_dynamic(&self, ty: Idx) -> Result<Idx, CodegenError> {
        if self.pool().tag(ty)? != Tag::DynArray {
            return Err(CodegenError::NotAnArray {
                ty: self.pool().display(ty),
            });
        }
        Ok(self.pool().array_elem(ty)?)
    }

    /// Element types of two array types, which must agree.
    fn common_elem(&self, lhs: Idx, rhs: Idx) -> Result<Idx, CodegenError> {
        let l = self.elem_of(lhs)?;
        let r = self.elem_of(rhs)?;
        self.check_elem(l, r)?;
        Ok(l)
    }

    fn check_elem(&self, expected: Idx, found: Idx) -> Result<(), CodegenError> {
        if expected == found {
            return Ok(());
        }
        Err(CodegenError::ElementMismatch {
            expected: self.pool().display(expected),
            found: self.pool().display(found),
        })
    }

    fn llty(&mut self, ty: Idx) -> Result<LLVMTypeId, CodegenError> {
        let llty = self.layouts.resolve(ty)?;
        Ok(self.builder.register_type(llty))
    }

    fn elem_llty(&mut self, elem: Idx) -> Result<LLVMTypeId, CodegenError> {
        let llty = self.layouts.resolve_elem(elem)?;
        Ok(self.builder.register_type(llty))
    }

    fn elem_ptr_llty(&mut self, elem: Idx) -> Result<LLVMTypeId, CodegenError> {
        let llty = self.layouts.elem_ptr(elem)?;
        Ok(self.builder.register_type(llty.into()))
    }

    fn record_llty(&mut self, elem: Idx) -> Result<LLVMTypeId, CodegenError> {
        let llty = self.layouts.dyn_array_record(elem)?;
        Ok(self.builder.register_type(llty.into()))
    }

    // -- Emission helpers --

    /// `count * size_of(elem)` as a size-word.
    fn byte_len(&mut self, count: ValueId, elem: Idx) -> Result<ValueId, CodegenError> {
        let stride = self.pool().size_of(elem)?;
        if stride == 1 {
            return Ok(count);
        }
        let stride = self.builder.const_size(stride);
        self.builder.mul(count, stride, "bytes")
    }

    /// Address of element `index` of the buffer at `ptr`.
    fn elem_at(&mut self, elem: Idx, ptr: ValueId, index: ValueId) -> Result<ValueId, CodegenError> {
        let llty = self.elem_llty(elem)?;
        self.builder.gep(llty, ptr, &[index], "elem")
    }

    /// Address of the type descriptor of `ty`, as `i8*`.
    fn descriptor(&mut self, ty: Idx) -> Result<ValueId, CodegenError> {
        let symbol = self.pool().descriptor_symbol(ty)?;
        let i8_ty = self.builder.i8_type();
        Ok(self.builder.extern_global(&symbol, i8_ty))
    }

    /// Descriptor of `elem[]`, for routines that take the slice type.
    fn array_descriptor(&mut self, elem: Idx) -> Result<ValueId, CodegenError> {
        let symbol = self.pool().array_descriptor_symbol(elem)?;
        let i8_ty = self.builder.i8_type();
        Ok(self.builder.extern_global(&symbol, i8_ty))
    }

    fn call_runtime(
        &mut self,
        routine: RuntimeFn,
        args: &[ValueId],
        name: &str,
    ) -> Result<Option<ValueId>, CodegenError> {
        let func = self.runtime.get(routine)?;
        self.builder.call(func, args, name)
    }

    /// Call a routine that returns a value.
    fn call_runtime_value(
        &mut self,
        routine: RuntimeFn,
        args: &[ValueId],
        name: &str,
    ) -> Result<ValueId, CodegenError> {
        self.call_runtime(routine, args, name)?
            .ok_or_else(|| CodegenError::ValueKind {
                expected: "runtime result",
                found: format!("void from {}", routine.name()),
            })
    }

    /// Spill `value` into a fresh entry-block temporary.
    fn spill(&mut self, llty: LLVMTypeId, value: ValueId, name: &str) -> Result<ValueId, CodegenError> {
        let slot = self.builder.create_entry_alloca(llty, name)?;
        self.builder.store(value, slot)?;
        Ok(slot)
    }
}

#[cfg(test)]
mod tests;
