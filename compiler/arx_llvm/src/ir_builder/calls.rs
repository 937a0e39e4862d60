//! Function declarations and calls for `IrBuilder`.

use inkwell::module::Linkage;
use inkwell::types::{BasicMetadataTypeEnum, BasicType};
use inkwell::values::{BasicMetadataValueEnum, BasicValueEnum};
use smallvec::SmallVec;

use super::IrBuilder;
use crate::error::{llvm_err, CodegenError};
use crate::value_id::{FunctionId, LLVMTypeId, ValueId};

impl<'ctx> IrBuilder<'_, 'ctx> {
    /// Declare (or define, once a body is appended) a function.
    pub fn declare_function(
        &mut self,
        name: &str,
        param_types: &[LLVMTypeId],
        return_type: Option<LLVMTypeId>,
    ) -> FunctionId {
        let param_tys: Vec<BasicMetadataTypeEnum<'ctx>> = param_types
            .iter()
            .map(|&id| self.arena.get_type(id).into())
            .collect();
        let fn_type = match return_type {
            Some(ret) => self.arena.get_type(ret).fn_type(&param_tys, false),
            None => self.scx.llcx.void_type().fn_type(&param_tys, false),
        };
        let func = self.scx.llmod.add_function(name, fn_type, None);
        self.arena.push_function(func)
    }

    /// Declare an external function, reusing an existing declaration.
    pub fn declare_extern_function(
        &mut self,
        name: &str,
        param_types: &[LLVMTypeId],
        return_type: Option<LLVMTypeId>,
    ) -> FunctionId {
        if let Some(func) = self.scx.llmod.get_function(name) {
            return self.arena.push_function(func);
        }
        let id = self.declare_function(name, param_types, return_type);
        self.arena
            .get_function(id)
            .set_linkage(Linkage::External);
        id
    }

    /// Build a direct call. Returns `None` for void-returning callees.
    ///
    /// Pointer arguments whose type differs from the parameter are
    /// reinterpreted with a `bitcast` first, so callers can pass typed
    /// element pointers to routines that take `i8*`.
    pub fn call(
        &mut self,
        callee: FunctionId,
        args: &[ValueId],
        name: &str,
    ) -> Result<Option<ValueId>, CodegenError> {
        let func = self.arena.get_function(callee);
        if func.count_params() as usize != args.len() {
            return Err(CodegenError::ValueKind {
                expected: "matching argument count",
                found: format!(
                    "{} arguments for {}",
                    args.len(),
                    func.get_name().to_string_lossy()
                ),
            });
        }

        let mut arg_vals: SmallVec<[BasicMetadataValueEnum<'ctx>; 4]> = SmallVec::new();
        for (i, &id) in args.iter().enumerate() {
            let mut arg = self.arena.get_value(id);
            #[allow(clippy::cast_possible_truncation)]
            let param = func.get_nth_param(i as u32);
            if let (BasicValueEnum::PointerValue(p), Some(BasicValueEnum::PointerValue(param))) =
                (arg, param)
            {
                if p.get_type() != param.get_type() {
                    arg = self
                        .builder
                        .build_pointer_cast(p, param.get_type(), "arg")
                        .map_err(llvm_err("pointer_cast"))?
                        .into();
                }
            }
            arg_vals.push(arg.into());
        }

        let call_val = self
            .builder
            .build_call(func, &arg_vals, name)
            .map_err(llvm_err("call"))?;
        Ok(call_val
            .try_as_basic_value()
            .left()
            .map(|v| self.arena.push_value(v)))
    }
}
