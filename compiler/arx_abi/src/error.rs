//! ABI planning errors.

use arx_types::TypeError;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error(transparent)]
    Type(#[from] TypeError),

    /// The value's type matches no runtime element kind.
    #[error("no runtime routine handles elements of type `{ty}`")]
    UnsupportedElement { ty: String },

    /// A repeated fill value does not match the flattened element type.
    #[error("fill value of type `{found}` does not match innermost element `{expected}`")]
    FillShapeMismatch { expected: String, found: String },

    /// An indexed initializer entry was never consumed.
    #[error("initializer entry at position {position} (index {index:?}) lies outside 0..{dim} or out of order")]
    StrayInitializer {
        position: usize,
        index: Option<u64>,
        dim: u64,
    },
}
