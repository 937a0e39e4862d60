//! Run-time switches for module emission.

use crate::context::SimpleCx;
use crate::error::CodegenError;

/// Debug IR dump toggle.
pub const DEBUG_IR_ENV: &str = "ARX_DEBUG_LLVM";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CodegenOptions {
    /// Print module IR to stderr once emission finishes.
    pub debug_ir: bool,
    /// Run the LLVM verifier over the finished module.
    pub verify: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            debug_ir: false,
            verify: true,
        }
    }
}

impl CodegenOptions {
    /// Defaults, with `debug_ir` enabled by a non-empty `ARX_DEBUG_LLVM`.
    pub fn from_env() -> Self {
        Self::from_var(std::env::var(DEBUG_IR_ENV).ok().as_deref())
    }

    fn from_var(value: Option<&str>) -> Self {
        Self {
            debug_ir: value.is_some_and(|v| !v.is_empty()),
            ..Self::default()
        }
    }
}

/// Close out a module: dump it if asked, then verify it.
pub fn finish_module(scx: &SimpleCx<'_>, opts: &CodegenOptions) -> Result<(), CodegenError> {
    if opts.debug_ir {
        eprintln!("=== LLVM IR: {} ===", scx.llmod.get_name().to_string_lossy());
        eprintln!("{}", scx.llmod.print_to_string().to_string());
    }
    if opts.verify {
        scx.llmod.verify().map_err(|e| {
            let message = e.to_string();
            tracing::error!(%message, "module verification failed");
            CodegenError::Verify(message)
        })?;
    }
    Ok(())
}
