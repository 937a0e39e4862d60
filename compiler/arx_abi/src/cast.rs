//! Length reinterpretation for array casts.
//!
//! Casting `E[]` to `F[]` keeps the byte length and recomputes the element
//! count. When the strides match the count is unchanged.

use arx_types::{Idx, Pool};

use crate::AbiError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LenCast {
    /// Same stride: the length passes through untouched.
    Identity,
    /// Call `arx_array_cast_len(len, old_size, new_size)`.
    Runtime { old_size: u64, new_size: u64 },
}

pub fn plan_cast_len(pool: &Pool, old_elem: Idx, new_elem: Idx) -> Result<LenCast, AbiError> {
    let old_size = pool.size_of(old_elem)?;
    let new_size = pool.size_of(new_elem)?;
    Ok(if old_size == new_size {
        LenCast::Identity
    } else {
        LenCast::Runtime { old_size, new_size }
    })
}

/// The runtime semantics of the length cast: `None` where the runtime
/// traps (the byte length does not divide into the new stride).
pub fn reinterpret_len(len: u64, old_size: u64, new_size: u64) -> Option<u64> {
    let bytes = len.checked_mul(old_size)?;
    if new_size == 0 || bytes % new_size != 0 {
        return None;
    }
    Some(bytes / new_size)
}
