//! Backend-independent array ABI.
//!
//! Everything the array lowering decides before it emits a single
//! instruction lives here, free of LLVM:
//!
//! - [`ElemKind`]: the element kinds the runtime distinguishes
//! - [`RuntimeFn`]: the runtime routine table and exact signatures
//! - [`plan_fill`]: how `a[] = v` is carried out
//! - [`expand_indexed`] / [`rect_shape`]: constant initializer shapes
//! - [`ArrayCmpOp`] and friends: comparator to predicate mapping
//! - [`plan_cast_len`]: whether a length reinterpretation needs the runtime
//!
//! The LLVM crate turns these plans into IR. Keeping them here means the
//! runtime contract can be tested without an LLVM installation.

mod cast;
mod compare;
mod elem_kind;
mod error;
mod fill;
mod init;
mod runtime;

pub use cast::{plan_cast_len, reinterpret_len, LenCast};
pub use compare::{compare_routine, ArrayCmpOp, CmpPlan, CmpPredicate, EqualityOp, IdentityOp};
pub use elem_kind::ElemKind;
pub use error::AbiError;
pub use fill::{plan_fill, FillPlan, FillRequest};
pub use init::{expand_indexed, implied_len, rect_shape, InitEntry, RectShape};
pub use runtime::{RtTy, RuntimeFn, Signature};
