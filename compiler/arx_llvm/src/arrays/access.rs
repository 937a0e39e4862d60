//! The accessor layer: every array form to `(len, ptr)`.

use arx_types::Idx;
use inkwell::types::AnyTypeEnum;
use inkwell::values::BasicValueEnum;

use super::{ArrayLowerer, ArrayValue};
use crate::error::CodegenError;
use crate::value_id::ValueId;

/// What a full-view slice points at.
enum Pointee {
    /// A `[N x E]` buffer.
    Buffer(u64),
    /// A `{ i64, E* }` record.
    Record,
}

impl ArrayLowerer<'_, '_, '_> {
    /// Length of `value` in elements, as a size-word.
    pub fn len(&mut self, value: &ArrayValue) -> Result<ValueId, CodegenError> {
        match *value {
            ArrayValue::Slice { len: Some(len), .. } => Ok(len),
            ArrayValue::Slice { ty, len: None, ptr } => match self.pointee(ptr)? {
                Pointee::Buffer(n) => Ok(self.builder.const_size(n)),
                Pointee::Record => self.load_record_field(self.elem_of(ty)?, ptr, 0),
            },
            ArrayValue::Var { ty, addr: ptr } | ArrayValue::Imm { ty, value: ptr } => {
                if self.is_static(ty)? {
                    let n = self.pool().static_dim(ty)?;
                    Ok(self.builder.const_size(n))
                } else {
                    self.load_record_field(self.elem_of(ty)?, ptr, 0)
                }
            }
            ArrayValue::Null { .. } => Ok(self.builder.const_size(0)),
        }
    }

    /// Data pointer of `value`, typed `E*`.
    pub fn ptr(&mut self, value: &ArrayValue) -> Result<ValueId, CodegenError> {
        let elem = self.elem_of(value.ty())?;
        let raw = match *value {
            ArrayValue::Slice { len: Some(_), ptr, .. } => ptr,
            ArrayValue::Slice { len: None, ptr, .. } => match self.pointee(ptr)? {
                Pointee::Buffer(_) => self.decay(ptr)?,
                Pointee::Record => self.load_record_field(elem, ptr, 1)?,
            },
            ArrayValue::Var { ty, addr: ptr } | ArrayValue::Imm { ty, value: ptr } => {
                if self.is_static(ty)? {
                    self.decay(ptr)?
                } else {
                    self.load_record_field(elem, ptr, 1)?
                }
            }
            ArrayValue::Null { .. } => {
                let ptr_ty = self.elem_ptr_llty(elem)?;
                return self.builder.const_zero(ptr_ty);
            }
        };
        let ptr_ty = self.elem_ptr_llty(elem)?;
        self.builder.pointer_cast(raw, ptr_ty, "data")
    }

    /// Address of the record behind an addressable dynamic array.
    pub fn record_address(
        &mut self,
        value: &ArrayValue,
        op: &'static str,
    ) -> Result<ValueId, CodegenError> {
        let elem = self.expect_dynamic(value.ty())?;
        match *value {
            ArrayValue::Var { addr, .. } => {
                let rec = self.record_llty(elem)?;
                let rec_ptr = self.builder.ptr_to(rec);
                self.builder.pointer_cast(addr, rec_ptr, "rec")
            }
            ArrayValue::Slice { .. } | ArrayValue::Imm { .. } | ArrayValue::Null { .. } => {
                Err(CodegenError::NotAddressable {
                    op,
                    found: value.kind_name(),
                })
            }
        }
    }

    /// Store `value`'s `(len, ptr)` into a fresh entry-block record and
    /// return its address.
    pub fn box_record(&mut self, value: &ArrayValue) -> Result<ValueId, CodegenError> {
        let elem = self.elem_of(value.ty())?;
        let len = self.len(value)?;
        let ptr = self.ptr(value)?;
        let rec = self.record_llty(elem)?;
        let slot = self.builder.create_entry_alloca(rec, "arr.tmp")?;
        self.store_pair(elem, slot, len, ptr)?;
        Ok(slot)
    }

    /// Store `len` and `ptr` into the two fields of the record at `rec`.
    pub(super) fn store_pair(
        &mut self,
        elem: Idx,
        rec: ValueId,
        len: ValueId,
        ptr: ValueId,
    ) -> Result<(), CodegenError> {
        let rec_ty = self.record_llty(elem)?;
        let len_slot = self.builder.struct_gep(rec_ty, rec, 0, "len.addr")?;
        self.builder.store(len, len_slot)?;
        let ptr_slot = self.builder.struct_gep(rec_ty, rec, 1, "ptr.addr")?;
        self.builder.store(ptr, ptr_slot)
    }

    /// Load field 0 (length) or 1 (data) of the record at `addr`.
    fn load_record_field(
        &mut self,
        elem: Idx,
        addr: ValueId,
        field: u32,
    ) -> Result<ValueId, CodegenError> {
        let rec = self.record_llty(elem)?;
        let rec_ptr = self.builder.ptr_to(rec);
        let addr = self.builder.pointer_cast(addr, rec_ptr, "rec")?;
        let slot = self.builder.struct_gep(rec, addr, field, "field")?;
        let field_ty = if field == 0 {
            self.builder.i64_type()
        } else {
            self.elem_ptr_llty(elem)?
        };
        self.builder
            .load(field_ty, slot, if field == 0 { "len" } else { "ptr" })
    }

    /// `&buf[0]` for a pointer to a `[N x E]` buffer.
    fn decay(&mut self, buf: ValueId) -> Result<ValueId, CodegenError> {
        let BasicValueEnum::PointerValue(p) = self.builder.raw_value(buf) else {
            return Err(self.not_a_pointer(buf));
        };
        let AnyTypeEnum::ArrayType(at) = p.get_type().get_element_type() else {
            return Err(CodegenError::ValueKind {
                expected: "pointer to a static buffer",
                found: self.builder.describe_type(buf),
            });
        };
        let arr_ty = self.builder.register_type(at.into());
        let zero = self.builder.const_size(0);
        self.builder.gep(arr_ty, buf, &[zero, zero], "decay")
    }

    fn pointee(&self, ptr: ValueId) -> Result<Pointee, CodegenError> {
        let BasicValueEnum::PointerValue(p) = self.builder.raw_value(ptr) else {
            return Err(self.not_a_pointer(ptr));
        };
        match p.get_type().get_element_type() {
            AnyTypeEnum::ArrayType(at) => Ok(Pointee::Buffer(u64::from(at.len()))),
            AnyTypeEnum::StructType(_) => Ok(Pointee::Record),
            _ => Err(CodegenError::ValueKind {
                expected: "pointer to a buffer or record",
                found: self.builder.describe_type(ptr),
            }),
        }
    }

    fn not_a_pointer(&self, val: ValueId) -> CodegenError {
        CodegenError::ValueKind {
            expected: "pointer",
            found: self.builder.describe_type(val),
        }
    }
}
