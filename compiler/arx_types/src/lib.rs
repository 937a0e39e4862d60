//! Type pool for the Arx backend.
//!
//! Every type the array lowering needs to reason about lives in a single
//! interned [`Pool`] and is referenced by a 32-bit [`Idx`]:
//!
//! - Scalars: `void`, `bool`, `char`, sized integers, `f32`/`f64`
//! - Pointers and named structs
//! - Static arrays `E[N]` and dynamic arrays `E[]`
//!
//! # Layout Queries
//!
//! The pool answers every ABI question the backend asks without touching
//! LLVM: ABI size and alignment ([`Pool::size_of`], [`Pool::align_of`]),
//! whether a type's default value is all-zero bits ([`Pool::is_zero_init`]),
//! the default of a scalar ([`Pool::scalar_default`]), and the symbol of the
//! runtime type descriptor ([`Pool::descriptor_symbol`]).
//!
//! Sizes assume a 64-bit target; see [`layout::WORD_SIZE`].

mod data;
mod error;
mod idx;
pub mod layout;
mod pool;
mod tag;

pub use data::{Dim, ScalarDefault, StructDef, TypeData};
pub use error::TypeError;
pub use idx::Idx;
pub use pool::Pool;
pub use tag::Tag;
