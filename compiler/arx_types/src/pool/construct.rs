//! Type construction helpers.

use crate::{Dim, Idx, Pool, StructDef, TypeData};

impl Pool {
    /// Integer type of the given width.
    pub fn int(&mut self, bits: u8, signed: bool) -> Idx {
        self.intern(TypeData::Int { bits, signed })
    }

    /// Pointer type `pointee*`.
    pub fn pointer(&mut self, pointee: Idx) -> Idx {
        self.intern(TypeData::Pointer(pointee))
    }

    /// Static array type `elem[n]`.
    #[allow(clippy::cast_possible_wrap)]
    pub fn static_array(&mut self, elem: Idx, n: u64) -> Idx {
        self.static_array_dim(elem, Dim::Int(n as i64))
    }

    /// Static array type with a dimension exactly as the frontend folded it.
    pub fn static_array_dim(&mut self, elem: Idx, dim: Dim) -> Idx {
        self.intern(TypeData::StaticArray { elem, dim })
    }

    /// Dynamic array type `elem[]`.
    pub fn dyn_array(&mut self, elem: Idx) -> Idx {
        self.intern(TypeData::DynArray { elem })
    }

    /// Named struct type.
    pub fn struct_type(&mut self, name: &str, fields: &[Idx]) -> Idx {
        self.intern(TypeData::Struct(StructDef {
            name: name.to_owned(),
            fields: fields.to_vec(),
        }))
    }
}
