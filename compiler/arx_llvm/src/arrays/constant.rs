//! Constant array values.

use arx_abi::{expand_indexed, implied_len, InitEntry};
use arx_types::{Idx, ScalarDefault, TypeData};

use super::{ArrayInitializer, ArrayLowerer, ElementInit};
use crate::error::CodegenError;
use crate::value_id::ValueId;

impl ArrayLowerer<'_, '_, '_> {
    /// Constant for an array literal.
    ///
    /// A static literal becomes a `[N x E]` constant, with positions the
    /// literal leaves out taking the element default. A dynamic literal is
    /// laid down as a private constant buffer and returned as the record
    /// constant `{ len, &buf[0] }`.
    pub fn const_initializer(&mut self, init: &ArrayInitializer) -> Result<ValueId, CodegenError> {
        let elem = self.elem_of(init.ty)?;
        let entries = init
            .entries
            .iter()
            .map(|entry| {
                let value = self.const_element(elem, &entry.value)?;
                Ok(InitEntry {
                    index: entry.index,
                    value,
                })
            })
            .collect::<Result<Vec<_>, CodegenError>>()?;
        let default = self.const_default(elem)?;

        if self.is_static(init.ty)? {
            let dim = self.pool().static_dim(init.ty)?;
            let values = expand_indexed(dim, &entries, &default)?;
            let elem_ty = self.elem_llty(elem)?;
            return self.builder.const_array(elem_ty, &values);
        }

        let len = implied_len(&entries);
        tracing::debug!(op = "const_initializer", ty = %self.pool().display(init.ty), len);
        if len == 0 {
            let ptr_ty = self.elem_ptr_llty(elem)?;
            let null = self.builder.const_zero(ptr_ty)?;
            return self.const_slice(init.ty, 0, null);
        }
        let values = expand_indexed(len, &entries, &default)?;
        let elem_ty = self.elem_llty(elem)?;
        let buf = self.builder.const_array(elem_ty, &values)?;
        let global = self.builder.add_private_constant(buf, "arx.array.lit");
        let ptr_ty = self.elem_ptr_llty(elem)?;
        let data = self.builder.const_pointer_cast(global, ptr_ty)?;
        self.const_slice(init.ty, len, data)
    }

    /// The record constant `{ len, ptr }` of the dynamic array type `ty`.
    pub fn const_slice(&mut self, ty: Idx, len: u64, ptr: ValueId) -> Result<ValueId, CodegenError> {
        let elem = self.expect_dynamic(ty)?;
        let rec = self.record_llty(elem)?;
        let len = self.builder.const_size(len);
        self.builder.const_struct(rec, &[len, ptr])
    }

    /// `value` repeated across every innermost slot of the static array
    /// type `ty`.
    pub fn const_static_splat(&mut self, ty: Idx, value: ValueId) -> Result<ValueId, CodegenError> {
        let elem = self.elem_of(ty)?;
        let dim = self.pool().static_dim(ty)?;
        let inner = if self.is_static(elem)? {
            self.const_static_splat(elem, value)?
        } else {
            value
        };
        let count = usize::try_from(dim).map_err(|_| CodegenError::ValueKind {
            expected: "addressable dimension",
            found: dim.to_string(),
        })?;
        let elem_ty = self.elem_llty(elem)?;
        self.builder.const_array(elem_ty, &vec![inner; count])
    }

    /// Default value of any value type, as a constant.
    pub fn const_default(&mut self, ty: Idx) -> Result<ValueId, CodegenError> {
        if let Some(default) = self.pool().scalar_default(ty)? {
            let llty = self.llty(ty)?;
            return match default {
                ScalarDefault::Zero => self.builder.const_zero(llty),
                ScalarDefault::Int(bits) => self.builder.const_int(llty, bits),
                ScalarDefault::Float(val) => self.builder.const_float(llty, val),
            };
        }
        match self.pool().get(ty)? {
            TypeData::Struct(def) => {
                let fields = def
                    .fields
                    .iter()
                    .map(|&field| self.const_default(field))
                    .collect::<Result<Vec<_>, _>>()?;
                let llty = self.llty(ty)?;
                self.builder.const_struct(llty, &fields)
            }
            TypeData::StaticArray { elem, .. } => {
                let value = self.const_default(self.innermost(*elem)?)?;
                self.const_static_splat(ty, value)
            }
            TypeData::DynArray { .. } => {
                let llty = self.llty(ty)?;
                self.builder.const_zero(llty)
            }
            _ => Err(CodegenError::ValueKind {
                expected: "a type with a default value",
                found: self.pool().display(ty),
            }),
        }
    }

    fn const_element(&mut self, elem: Idx, init: &ElementInit) -> Result<ValueId, CodegenError> {
        match init {
            ElementInit::Const(value) => Ok(*value),
            ElementInit::Array(nested) => {
                self.check_elem(elem, nested.ty)?;
                self.const_initializer(nested)
            }
        }
    }

    /// Innermost non-static-array element of `ty`.
    fn innermost(&self, ty: Idx) -> Result<Idx, CodegenError> {
        let mut cur = ty;
        while self.is_static(cur)? {
            cur = self.pool().array_elem(cur)?;
        }
        Ok(cur)
    }
}
