//! Code generation errors.
//!
//! Every variant is an internal compiler error: the array lowering was
//! handed something the frontend should have rejected, or LLVM refused an
//! instruction. Callers abort compilation.

use std::fmt;

use arx_abi::AbiError;
use arx_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error(transparent)]
    Type(#[from] TypeError),

    #[error("`{ty}` is not an array type")]
    NotAnArray { ty: String },

    #[error("array element types differ: `{expected}` vs `{found}`")]
    ElementMismatch { expected: String, found: String },

    #[error("cannot cast `{from}` to `{to}`")]
    UnsupportedCast { from: String, to: String },

    #[error("{op} needs an addressable dynamic array, got a {found} value")]
    NotAddressable { op: &'static str, found: &'static str },

    #[error("expected {expected}, found `{found}`")]
    ValueKind {
        expected: &'static str,
        found: String,
    },

    #[error("{op} requires an active function")]
    NoActiveFunction { op: &'static str },

    #[error("runtime routine `{0}` was not declared in this module")]
    MissingRuntime(&'static str),

    #[error("LLVM {op} failed: {message}")]
    Llvm { op: &'static str, message: String },

    #[error("module verification failed:\n{0}")]
    Verify(String),
}

/// Map an inkwell builder failure to [`CodegenError::Llvm`].
pub(crate) fn llvm_err<E: fmt::Display>(op: &'static str) -> impl FnOnce(E) -> CodegenError {
    move |e| {
        tracing::error!(op, error = %e, "LLVM builder failure");
        CodegenError::Llvm {
            op,
            message: e.to_string(),
        }
    }
}
