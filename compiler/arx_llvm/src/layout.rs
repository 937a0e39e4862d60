//! LLVM layouts of pooled types.
//!
//! - Dynamic arrays lower to the record `{ i64, E* }`.
//! - Static arrays lower to `[N x E]`, created once per type and memoized.
//! - `void` elements lower to `i8`.
//! - Structs lower to named LLVM structs with C layout.
//!
//! All caches are `RefCell` maps: the resolver is shared by `&` between the
//! lowering and its callers, and there is exactly one writer at a time.

use std::cell::RefCell;

use arx_types::{Idx, Pool, TypeData};
use inkwell::types::{ArrayType, BasicType, BasicTypeEnum, PointerType, StructType};
use rustc_hash::FxHashMap;

use crate::context::SimpleCx;
use crate::error::CodegenError;

pub struct TypeLayoutResolver<'a, 'll> {
    pool: &'a Pool,
    scx: &'a SimpleCx<'ll>,
    /// Static array layouts, keyed by the array type.
    static_arrays: RefCell<FxHashMap<Idx, ArrayType<'ll>>>,
    /// Dynamic array records, keyed by the element type.
    records: RefCell<FxHashMap<Idx, StructType<'ll>>>,
    /// Named struct types.
    structs: RefCell<FxHashMap<Idx, StructType<'ll>>>,
}

impl<'a, 'll> TypeLayoutResolver<'a, 'll> {
    pub fn new(pool: &'a Pool, scx: &'a SimpleCx<'ll>) -> Self {
        Self {
            pool,
            scx,
            static_arrays: RefCell::new(FxHashMap::default()),
            records: RefCell::new(FxHashMap::default()),
            structs: RefCell::new(FxHashMap::default()),
        }
    }

    #[inline]
    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    /// LLVM type of a value of type `idx`.
    pub fn resolve(&self, idx: Idx) -> Result<BasicTypeEnum<'ll>, CodegenError> {
        Ok(match self.pool.get(idx)? {
            TypeData::Void => {
                return Err(CodegenError::ValueKind {
                    expected: "a type with values",
                    found: "void".to_owned(),
                })
            }
            TypeData::Bool => self.scx.type_i1().into(),
            TypeData::Char => self.scx.type_i8().into(),
            TypeData::Int { bits, .. } => self.scx.type_int(*bits).into(),
            TypeData::Float { bits: 32 } => self.scx.type_f32().into(),
            TypeData::Float { .. } => self.scx.type_f64().into(),
            TypeData::Pointer(pointee) => self.scx.type_ptr_to(self.resolve_elem(*pointee)?).into(),
            TypeData::Struct(_) => self.named_struct(idx)?.into(),
            TypeData::StaticArray { .. } => self.static_array(idx)?.into(),
            TypeData::DynArray { elem } => self.dyn_array_record(*elem)?.into(),
        })
    }

    /// Like [`resolve`](Self::resolve), with `void` normalized to `i8`.
    pub fn resolve_elem(&self, idx: Idx) -> Result<BasicTypeEnum<'ll>, CodegenError> {
        if idx == Idx::VOID {
            return Ok(self.scx.type_i8().into());
        }
        self.resolve(idx)
    }

    /// `E*` for an element type.
    pub fn elem_ptr(&self, elem: Idx) -> Result<PointerType<'ll>, CodegenError> {
        Ok(self.scx.type_ptr_to(self.resolve_elem(elem)?))
    }

    /// The record `{ i64, E* }` of a dynamic array with element `elem`.
    pub fn dyn_array_record(&self, elem: Idx) -> Result<StructType<'ll>, CodegenError> {
        if let Some(&rec) = self.records.borrow().get(&elem) {
            return Ok(rec);
        }
        let ptr = self.elem_ptr(elem)?;
        let rec = self
            .scx
            .llcx
            .struct_type(&[self.scx.isize_ty.into(), ptr.into()], false);
        self.records.borrow_mut().insert(elem, rec);
        Ok(rec)
    }

    /// The `[N x E]` buffer of a static array type, memoized per type.
    ///
    /// Fails unless the dimension folded to a non-negative constant.
    pub fn static_array(&self, idx: Idx) -> Result<ArrayType<'ll>, CodegenError> {
        if let Some(&arr) = self.static_arrays.borrow().get(&idx) {
            return Ok(arr);
        }
        let elem = self.pool.array_elem(idx)?;
        let dim = self.pool.static_dim(idx)?;
        let dim = u32::try_from(dim).map_err(|_| CodegenError::ValueKind {
            expected: "static dimension below 2^32",
            found: dim.to_string(),
        })?;
        let arr = self.resolve_elem(elem)?.array_type(dim);
        tracing::trace!(ty = %self.pool.display(idx), "static array layout");
        self.static_arrays.borrow_mut().insert(idx, arr);
        Ok(arr)
    }

    /// Number of static array layouts built so far.
    pub fn static_array_count(&self) -> usize {
        self.static_arrays.borrow().len()
    }

    fn named_struct(&self, idx: Idx) -> Result<StructType<'ll>, CodegenError> {
        if let Some(&st) = self.structs.borrow().get(&idx) {
            return Ok(st);
        }
        let TypeData::Struct(def) = self.pool.get(idx)? else {
            return Err(CodegenError::ValueKind {
                expected: "struct",
                found: self.pool.display(idx),
            });
        };
        if let Some(existing) = self.scx.llmod.get_struct_type(&def.name) {
            self.structs.borrow_mut().insert(idx, existing);
            return Ok(existing);
        }
        let st = self.scx.llcx.opaque_struct_type(&def.name);
        self.structs.borrow_mut().insert(idx, st);
        let fields = def
            .fields
            .iter()
            .map(|&f| self.resolve(f))
            .collect::<Result<Vec<_>, _>>()?;
        st.set_body(&fields, false);
        Ok(st)
    }
}
