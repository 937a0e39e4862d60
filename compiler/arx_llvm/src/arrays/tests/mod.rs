//! Array lowering tests.
//!
//! Each test emits one or more functions into a fresh module, verifies it,
//! and either inspects the printed IR or JIT-executes it against
//! [`test_runtime`].

mod init_tests;
mod test_runtime;

pub(super) mod helper {
    use std::sync::Once;

    use arx_types::Pool;
    use inkwell::context::Context;
    use inkwell::execution_engine::ExecutionEngine;
    use inkwell::targets::{InitializationConfig, Target};
    use inkwell::types::{BasicType, BasicTypeEnum, PointerType};
    use inkwell::OptimizationLevel;

    use super::test_runtime;
    use crate::arrays::ArrayLowerer;
    use crate::context::SimpleCx;
    use crate::error::CodegenError;
    use crate::ir_builder::IrBuilder;
    use crate::layout::TypeLayoutResolver;
    use crate::options::{finish_module, CodegenOptions};
    use crate::runtime_decl::declare_runtime;
    use crate::value_id::{LLVMTypeId, ValueId};

    static NATIVE_INIT: Once = Once::new();

    /// One module under test.
    pub struct Harness<'ll> {
        pub scx: SimpleCx<'ll>,
    }

    impl<'ll> Harness<'ll> {
        pub fn new(ctx: &'ll Context, name: &str) -> Self {
            crate::init_tracing();
            Self {
                scx: SimpleCx::new(ctx, name),
            }
        }

        #[inline]
        pub fn i64(&self) -> BasicTypeEnum<'ll> {
            self.scx.type_i64().into()
        }

        /// `T*`.
        pub fn ptr(&self, pointee: impl BasicType<'ll>) -> BasicTypeEnum<'ll> {
            self.scx.type_ptr_to(pointee).into()
        }

        /// `{ i64, E* }*` for an element lowered to `elem`.
        pub fn record_ptr(&self, elem: impl BasicType<'ll>) -> BasicTypeEnum<'ll> {
            let rec = self.scx.llcx.struct_type(
                &[self.scx.isize_ty.into(), self.scx.type_ptr_to(elem).into()],
                false,
            );
            let ptr: PointerType<'ll> = self.scx.type_ptr_to(rec);
            ptr.into()
        }

        /// Emit `name(params) -> ret` with `body` lowering into its entry
        /// block. `body` returns the value to return, `None` for `void`.
        pub fn emit<F>(
            &self,
            pool: &Pool,
            name: &str,
            params: &[BasicTypeEnum<'ll>],
            ret: Option<BasicTypeEnum<'ll>>,
            body: F,
        ) -> Result<(), CodegenError>
        where
            F: FnOnce(&mut ArrayLowerer<'_, '_, 'll>, &[ValueId]) -> Result<Option<ValueId>, CodegenError>,
        {
            let mut builder = IrBuilder::new(&self.scx);
            let runtime = declare_runtime(&mut builder);
            let layouts = TypeLayoutResolver::new(pool, &self.scx);

            let param_ids: Vec<LLVMTypeId> =
                params.iter().map(|&ty| builder.register_type(ty)).collect();
            let ret_id = ret.map(|ty| builder.register_type(ty));
            let func = builder.declare_function(name, &param_ids, ret_id);
            let entry = builder.append_block(func, "entry");
            builder.set_current_function(func);
            builder.position_at_end(entry);
            let args = (0..params.len() as u32)
                .map(|i| builder.get_param(func, i))
                .collect::<Result<Vec<_>, _>>()?;

            let mut lowerer = ArrayLowerer::new(&mut builder, &layouts, &runtime);
            match body(&mut lowerer, &args)? {
                Some(val) => lowerer.builder().ret(val),
                None => lowerer.builder().ret_void(),
            }
        }

        /// Printed module IR.
        pub fn ir(&self) -> String {
            self.scx.llmod.print_to_string().to_string()
        }

        /// Verify the module, dumping IR when `ARX_DEBUG_LLVM` is set.
        pub fn verify(&self) {
            if let Err(e) = finish_module(&self.scx, &CodegenOptions::from_env()) {
                panic!("{e}\n{}", self.ir());
            }
        }

        /// Verify, then JIT the module with the test runtime mapped in.
        pub fn jit(&self) -> ExecutionEngine<'ll> {
            self.verify();
            NATIVE_INIT.call_once(|| {
                Target::initialize_native(&InitializationConfig::default())
                    .expect("native target");
            });
            let ee = self
                .scx
                .llmod
                .create_jit_execution_engine(OptimizationLevel::None)
                .expect("execution engine");

            for (name, addr) in test_runtime::mappings() {
                if let Some(func) = self.scx.llmod.get_function(name) {
                    ee.add_global_mapping(&func, addr);
                }
            }
            for global in self.scx.llmod.get_globals() {
                let name = global.get_name().to_string_lossy().into_owned();
                if let Some(info) = test_runtime::descriptor(&name) {
                    ee.add_global_mapping(&global, info as *const test_runtime::TestTypeInfo as usize);
                }
            }
            ee
        }
    }
}

use helper::Harness;
use test_runtime::Record;
