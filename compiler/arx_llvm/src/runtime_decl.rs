//! Runtime routine declarations.
//!
//! Declares every routine of [`RuntimeFn`] as an external function with its
//! exact signature. Resolved at link time (AOT) or by symbol mapping (JIT).

use arx_abi::{RtTy, RuntimeFn};
use inkwell::types::BasicTypeEnum;
use rustc_hash::FxHashMap;

use crate::error::CodegenError;
use crate::ir_builder::IrBuilder;
use crate::value_id::{FunctionId, LLVMTypeId};

/// Handles of the declared runtime routines.
#[derive(Clone, Debug, Default)]
pub struct RuntimeDecls {
    fns: FxHashMap<RuntimeFn, FunctionId>,
}

impl RuntimeDecls {
    pub fn get(&self, routine: RuntimeFn) -> Result<FunctionId, CodegenError> {
        self.fns
            .get(&routine)
            .copied()
            .ok_or(CodegenError::MissingRuntime(routine.name()))
    }

    pub fn len(&self) -> usize {
        self.fns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }
}

/// Declare all array runtime routines in the builder's module.
///
/// Call once per module before lowering any array operation. Existing
/// declarations of the same name are reused.
pub fn declare_runtime(builder: &mut IrBuilder<'_, '_>) -> RuntimeDecls {
    let mut fns = FxHashMap::default();
    for routine in RuntimeFn::ALL {
        let sig = routine.signature();
        let params: Vec<LLVMTypeId> = sig
            .params
            .iter()
            .filter_map(|&ty| rt_type(builder, ty))
            .collect();
        let ret = rt_type(builder, sig.ret);
        let id = builder.declare_extern_function(routine.name(), &params, ret);
        fns.insert(routine, id);
    }
    tracing::debug!(count = fns.len(), "declared array runtime");
    RuntimeDecls { fns }
}

/// LLVM type of a runtime parameter; `None` for `void`.
fn rt_type(builder: &mut IrBuilder<'_, '_>, ty: RtTy) -> Option<LLVMTypeId> {
    let scx = builder.scx();
    let llty: BasicTypeEnum<'_> = match ty {
        RtTy::Void => return None,
        RtTy::Bool => scx.type_i1().into(),
        RtTy::Int(bits) => scx.type_int(bits).into(),
        RtTy::F32 => scx.type_f32().into(),
        RtTy::F64 => scx.type_f64().into(),
        RtTy::Size => scx.isize_ty.into(),
        RtTy::Opaque => scx.type_i8p().into(),
        RtTy::OpaquePtr => scx.type_ptr_to(scx.type_i8p()).into(),
        RtTy::BoolPtr => scx.type_ptr_to(scx.type_i1()).into(),
        RtTy::IntPtr(bits) => scx.type_ptr_to(scx.type_int(bits)).into(),
        RtTy::F32Ptr => scx.type_ptr_to(scx.type_f32()).into(),
        RtTy::F64Ptr => scx.type_ptr_to(scx.type_f64()).into(),
        RtTy::SizePtr => scx.type_ptr_to(scx.isize_ty).into(),
        RtTy::RecordPtr => scx.type_ptr_to(scx.type_opaque_record()).into(),
    };
    Some(builder.register_type(llty))
}
