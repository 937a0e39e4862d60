//! Minimal LLVM context.
//!
//! `SimpleCx` owns the module being built and hands out the handful of LLVM
//! types the array lowering needs. Pointers are typed (LLVM 14), so every
//! pointer helper takes the pointee.

use inkwell::context::Context;
use inkwell::module::Module;
use inkwell::types::{BasicType, FloatType, IntType, PointerType, StructType};
use inkwell::AddressSpace;

/// Minimal codegen context: LLVM context, module, and common types.
pub struct SimpleCx<'ll> {
    /// The LLVM context (owns all LLVM types and values).
    pub llcx: &'ll Context,
    /// The LLVM module being compiled.
    pub llmod: Module<'ll>,
    /// The size-word type (`i64`, 64-bit target).
    pub isize_ty: IntType<'ll>,
}

impl<'ll> SimpleCx<'ll> {
    #[must_use]
    pub fn new(context: &'ll Context, module_name: &str) -> Self {
        Self {
            llcx: context,
            llmod: context.create_module(module_name),
            isize_ty: context.i64_type(),
        }
    }

    #[inline]
    pub fn type_i1(&self) -> IntType<'ll> {
        self.llcx.bool_type()
    }

    #[inline]
    pub fn type_i8(&self) -> IntType<'ll> {
        self.llcx.i8_type()
    }

    #[inline]
    pub fn type_i32(&self) -> IntType<'ll> {
        self.llcx.i32_type()
    }

    #[inline]
    pub fn type_i64(&self) -> IntType<'ll> {
        self.llcx.i64_type()
    }

    /// Integer type of an arbitrary width (8/16/32/64 in practice).
    #[inline]
    pub fn type_int(&self, bits: u8) -> IntType<'ll> {
        match bits {
            1 => self.llcx.bool_type(),
            8 => self.llcx.i8_type(),
            16 => self.llcx.i16_type(),
            32 => self.llcx.i32_type(),
            64 => self.llcx.i64_type(),
            _ => self.llcx.custom_width_int_type(u32::from(bits)),
        }
    }

    #[inline]
    pub fn type_f32(&self) -> FloatType<'ll> {
        self.llcx.f32_type()
    }

    #[inline]
    pub fn type_f64(&self) -> FloatType<'ll> {
        self.llcx.f64_type()
    }

    /// `T*` in the default address space.
    #[inline]
    pub fn type_ptr_to<T: BasicType<'ll>>(&self, pointee: T) -> PointerType<'ll> {
        pointee.ptr_type(AddressSpace::default())
    }

    /// `i8*`: untyped data and type descriptors.
    #[inline]
    pub fn type_i8p(&self) -> PointerType<'ll> {
        self.type_ptr_to(self.type_i8())
    }

    /// The runtime's view of a dynamic-array record: `{ i64, i8* }`.
    pub fn type_opaque_record(&self) -> StructType<'ll> {
        self.llcx
            .struct_type(&[self.isize_ty.into(), self.type_i8p().into()], false)
    }
}
