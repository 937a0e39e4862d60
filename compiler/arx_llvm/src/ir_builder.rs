//! ID-based LLVM instruction builder.
//!
//! `IrBuilder` wraps inkwell's `Builder`, stores all LLVM values in a
//! `ValueArena`, and exposes only opaque ID types to callers. This
//! hides the `'ctx` lifetime from the array lowering.
//!
//! Every emitting method returns `Result`: a kind mismatch (loading through
//! a non-pointer, a non-integer GEP index) or an LLVM builder failure
//! becomes a [`CodegenError`] instead of a panic.
//!
//! # Method Organization
//!
//! | Category | Methods |
//! |----------|---------|
//! | Constants | `const_i32`, `const_i64`, `const_bool`, `const_int`, `const_zero`, `const_struct`, `const_array`, ... |
//! | Globals | `add_private_constant`, `extern_global` |
//! | Memory | `alloca`, `create_entry_alloca`, `load`, `store`, `gep`, `struct_gep`, `memcpy`, `memset_zero` |
//! | Operations | `add`, `mul`, `icmp`, `and`, `not`, `pointer_cast`, `ptr_to_int` |
//! | Calls | `call`, `declare_function`, `declare_extern_function` |
//! | Blocks | `append_block`, `position_at_end`, `ret`, `ret_void` |

mod calls;
mod constants;
mod memory;
mod ops;

use inkwell::builder::Builder as InkwellBuilder;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicValue, BasicValueEnum, FunctionValue};

use crate::context::SimpleCx;
use crate::error::{llvm_err, CodegenError};
use crate::value_id::{BlockId, FunctionId, LLVMTypeId, ValueArena, ValueId};

/// ID-based LLVM IR builder.
///
/// Two lifetimes:
/// - `'ctx`: The LLVM context lifetime (from `Context::create()`).
/// - `'scx`: The borrow lifetime of the `SimpleCx` reference.
pub struct IrBuilder<'scx, 'ctx> {
    builder: InkwellBuilder<'ctx>,
    scx: &'scx SimpleCx<'ctx>,
    arena: ValueArena<'ctx>,
    current_function: Option<FunctionId>,
    current_block: Option<BlockId>,
}

impl<'scx, 'ctx> IrBuilder<'scx, 'ctx> {
    pub fn new(scx: &'scx SimpleCx<'ctx>) -> Self {
        Self {
            builder: scx.llcx.create_builder(),
            scx,
            arena: ValueArena::new(),
            current_function: None,
            current_block: None,
        }
    }

    #[inline]
    pub fn scx(&self) -> &'scx SimpleCx<'ctx> {
        self.scx
    }

    // -- Types --

    /// Register an inkwell type, returning its ID.
    #[inline]
    pub fn register_type(&mut self, ty: BasicTypeEnum<'ctx>) -> LLVMTypeId {
        self.arena.push_type(ty)
    }

    #[inline]
    pub fn bool_type(&mut self) -> LLVMTypeId {
        self.arena.push_type(self.scx.type_i1().into())
    }

    #[inline]
    pub fn i8_type(&mut self) -> LLVMTypeId {
        self.arena.push_type(self.scx.type_i8().into())
    }

    #[inline]
    pub fn i32_type(&mut self) -> LLVMTypeId {
        self.arena.push_type(self.scx.type_i32().into())
    }

    #[inline]
    pub fn i64_type(&mut self) -> LLVMTypeId {
        self.arena.push_type(self.scx.type_i64().into())
    }

    /// `T*` for a registered `T`.
    pub fn ptr_to(&mut self, pointee: LLVMTypeId) -> LLVMTypeId {
        let ty = self.arena.get_type(pointee);
        self.arena.push_type(self.scx.type_ptr_to(ty).into())
    }

    // -- Blocks and functions --

    pub fn append_block(&mut self, function: FunctionId, name: &str) -> BlockId {
        let func = self.arena.get_function(function);
        let bb = self.scx.llcx.append_basic_block(func, name);
        self.arena.push_block(bb)
    }

    pub fn position_at_end(&mut self, block: BlockId) {
        let bb = self.arena.get_block(block);
        self.builder.position_at_end(bb);
        self.current_block = Some(block);
    }

    #[inline]
    pub fn current_block(&self) -> Option<BlockId> {
        self.current_block
    }

    #[inline]
    pub fn set_current_function(&mut self, func: FunctionId) {
        self.current_function = Some(func);
    }

    #[inline]
    pub fn current_function(&self) -> Option<FunctionId> {
        self.current_function
    }

    pub fn function_value(&self, id: FunctionId) -> FunctionValue<'ctx> {
        self.arena.get_function(id)
    }

    /// Get a function parameter as a `ValueId`.
    pub fn get_param(&mut self, func: FunctionId, index: u32) -> Result<ValueId, CodegenError> {
        let param = self
            .arena
            .get_function(func)
            .get_nth_param(index)
            .ok_or(CodegenError::ValueKind {
                expected: "function parameter",
                found: format!("index {index}"),
            })?;
        Ok(self.arena.push_value(param))
    }

    pub fn ret(&mut self, val: ValueId) -> Result<(), CodegenError> {
        let v = self.arena.get_value(val);
        self.builder
            .build_return(Some(&v as &dyn BasicValue<'ctx>))
            .map_err(llvm_err("build_return"))?;
        Ok(())
    }

    pub fn ret_void(&mut self) -> Result<(), CodegenError> {
        self.builder
            .build_return(None)
            .map_err(llvm_err("build_return"))?;
        Ok(())
    }

    // -- Raw access --

    /// Get the raw `BasicValueEnum` for a `ValueId`.
    pub fn raw_value(&self, id: ValueId) -> BasicValueEnum<'ctx> {
        self.arena.get_value(id)
    }

    /// Printed form of a value's type, for error messages.
    pub(crate) fn describe_type(&self, val: ValueId) -> String {
        self.arena.get_value(val).get_type().print_to_string().to_string()
    }
}
