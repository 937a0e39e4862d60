//! Shapes of constant array initializers.

use arx_types::{Idx, Pool, TypeData};
use smallvec::SmallVec;

use crate::AbiError;

/// One entry of an array literal. `index` is set for `[i: v]` entries and
/// absent for positional ones.
#[derive(Clone, Debug, PartialEq)]
pub struct InitEntry<T> {
    pub index: Option<u64>,
    pub value: T,
}

impl<T> InitEntry<T> {
    pub fn positional(value: T) -> Self {
        Self { index: None, value }
    }

    pub fn indexed(index: u64, value: T) -> Self {
        Self {
            index: Some(index),
            value,
        }
    }
}

/// Expand an array literal to exactly `dim` values.
///
/// Walks positions `0..dim`. An explicit entry is consumed only at the
/// position it names; a positional entry is consumed at the next position.
/// Every other position takes `default`. Entries left over once the walk
/// ends (indices past `dim`, or out of ascending order) are an error.
pub fn expand_indexed<T: Clone>(
    dim: u64,
    entries: &[InitEntry<T>],
    default: &T,
) -> Result<Vec<T>, AbiError> {
    let mut out = Vec::with_capacity(usize::try_from(dim).unwrap_or(0));
    let mut next = 0;
    for position in 0..dim {
        let value = match entries.get(next) {
            Some(entry) if entry.index.map_or(true, |i| i == position) => {
                next += 1;
                &entry.value
            }
            _ => default,
        };
        out.push(value.clone());
    }
    if let Some(stray) = entries.get(next) {
        return Err(AbiError::StrayInitializer {
            position: next,
            index: stray.index,
            dim,
        });
    }
    Ok(out)
}

/// Length of an unsized literal: one past the highest position it fills.
pub fn implied_len<T>(entries: &[InitEntry<T>]) -> u64 {
    let mut position = 0;
    let mut len = 0;
    for entry in entries {
        position = entry.index.unwrap_or(position) + 1;
        len = len.max(position);
    }
    len
}

/// Flattened view of a nested static array element.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RectShape {
    /// Innermost non-array element type.
    pub inner: Idx,
    /// Number of `inner` elements in one outer element (product of dims).
    pub count: u64,
}

/// Flatten `elem` if it is itself a static array, `None` otherwise.
///
/// `i32[3][2]` as an element flattens to `{ inner: i32, count: 6 }`.
pub fn rect_shape(pool: &Pool, elem: Idx) -> Result<Option<RectShape>, AbiError> {
    let mut dims: SmallVec<[u64; 4]> = SmallVec::new();
    let mut cur = elem;
    while let TypeData::StaticArray { elem: inner, .. } = pool.get(cur)? {
        dims.push(pool.static_dim(cur)?);
        cur = *inner;
    }
    if dims.is_empty() {
        return Ok(None);
    }
    Ok(Some(RectShape {
        inner: cur,
        count: dims.iter().product(),
    }))
}

#[cfg(test)]
mod tests;
