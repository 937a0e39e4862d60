//! Type pool errors.
//!
//! These are internal-consistency failures: the frontend handed the backend
//! a type it cannot lay out. They are never recovered from.

use thiserror::Error;

use crate::{Idx, Tag};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("static array dimension of `{ty}` is not an integral constant")]
    NonConstantDimension { ty: String },

    #[error("static array dimension {dim} of `{ty}` is negative")]
    NegativeDimension { ty: String, dim: i64 },

    #[error("`{ty}` has no size")]
    Unsized { ty: String },

    #[error("expected {expected}, found `{ty}`")]
    KindMismatch { expected: Tag, ty: String },

    #[error("unknown type index {0:?}")]
    UnknownIdx(Idx),
}
