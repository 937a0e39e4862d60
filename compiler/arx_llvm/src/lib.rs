//! LLVM lowering of Arx arrays.
//!
//! Lowers static (`T[N]`) and dynamic (`T[]`) arrays to LLVM layouts,
//! instruction sequences and calls into the array runtime. The decisions
//! that need no LLVM (which routine, which fill strategy, which predicate)
//! come from `arx_abi`; this crate turns them into IR.
//!
//! # Debug Environment Variables
//!
//! - `ARX_DEBUG_LLVM`: Print module IR to stderr from [`finish_module`].
//!   Any non-empty value enables this.
//!   Example: `ARX_DEBUG_LLVM=1 cargo test -p arx_llvm`
//!
//! - `RUST_LOG=arx_llvm=debug`: One event per lowered array operation.
//!
//! - `RUST_LOG=arx_llvm=trace`: Also layout construction and fill plans.
//!
//! # Key Types
//!
//! - [`IrBuilder`]: ID-based instruction builder
//! - [`TypeLayoutResolver`]: pool type to LLVM type, memoized
//! - [`ArrayLowerer`]: every array operation
//! - [`ArrayValue`]: the physical forms of an array value

#![allow(
    // LLVM uses u32 for struct/array indices, we use usize in Rust
    clippy::cast_possible_truncation,
    // Most Result returns are for LLVM builder operations
    clippy::missing_errors_doc,
    // Internal functions - panics are invariant violations
    clippy::missing_panics_doc,
)]

pub mod arrays;
pub mod context;
pub mod error;
pub mod ir_builder;
pub mod layout;
pub mod options;
pub mod runtime_decl;
pub mod value_id;

pub use arrays::{
    ArrayInitializer, ArrayLowerer, ArrayValue, CastResult, ElementInit, ElementValue, Operand,
};
pub use context::SimpleCx;
pub use error::CodegenError;
pub use ir_builder::IrBuilder;
pub use layout::TypeLayoutResolver;
pub use options::{finish_module, CodegenOptions};
pub use runtime_decl::{declare_runtime, RuntimeDecls};
pub use value_id::{BlockId, FunctionId, LLVMTypeId, ValueId};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
