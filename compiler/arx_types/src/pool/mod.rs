//! Interned type storage.
//!
//! Each distinct [`TypeData`] is stored once; constructing the same type
//! twice yields the same [`Idx`].

mod construct;
mod format;
mod query;

use rustc_hash::FxHashMap;

use crate::{Idx, Tag, TypeData, TypeError};

/// The type pool.
pub struct Pool {
    items: Vec<TypeData>,
    lookup: FxHashMap<TypeData, Idx>,
}

impl Pool {
    /// Create a pool with all primitive types pre-interned at their fixed
    /// indices.
    pub fn new() -> Self {
        let mut pool = Self {
            items: Vec::with_capacity(64),
            lookup: FxHashMap::default(),
        };
        let primitives = [
            TypeData::Void,
            TypeData::Bool,
            TypeData::Char,
            TypeData::Int { bits: 8, signed: true },
            TypeData::Int { bits: 8, signed: false },
            TypeData::Int { bits: 16, signed: true },
            TypeData::Int { bits: 16, signed: false },
            TypeData::Int { bits: 32, signed: true },
            TypeData::Int { bits: 32, signed: false },
            TypeData::Int { bits: 64, signed: true },
            TypeData::Int { bits: 64, signed: false },
            TypeData::Float { bits: 32 },
            TypeData::Float { bits: 64 },
        ];
        for data in primitives {
            pool.intern(data);
        }
        debug_assert_eq!(pool.items.len() as u32, Idx::PRIMITIVE_COUNT);
        pool
    }

    /// Intern a type, returning the existing index if it is already present.
    #[allow(clippy::cast_possible_truncation)]
    pub fn intern(&mut self, data: TypeData) -> Idx {
        if let Some(&idx) = self.lookup.get(&data) {
            return idx;
        }
        let idx = Idx::from_raw(self.items.len() as u32);
        tracing::trace!(idx = idx.raw(), ?data, "interned type");
        self.items.push(data.clone());
        self.lookup.insert(data, idx);
        idx
    }

    /// Look up the payload of `idx`.
    pub fn get(&self, idx: Idx) -> Result<&TypeData, TypeError> {
        self.items
            .get(idx.raw() as usize)
            .ok_or(TypeError::UnknownIdx(idx))
    }

    pub fn tag(&self, idx: Idx) -> Result<Tag, TypeError> {
        self.get(idx).map(TypeData::tag)
    }

    /// Number of interned types, primitives included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
