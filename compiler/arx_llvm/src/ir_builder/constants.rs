//! Constants and module-level globals for `IrBuilder`.

use inkwell::module::Linkage;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{
    ArrayValue, BasicValueEnum, FloatValue, IntValue, PointerValue, StructValue,
};

use super::IrBuilder;
use crate::error::CodegenError;
use crate::value_id::{LLVMTypeId, ValueId};

impl<'ctx> IrBuilder<'_, 'ctx> {
    #[inline]
    pub fn const_bool(&mut self, val: bool) -> ValueId {
        let v = self.scx.type_i1().const_int(u64::from(val), false);
        self.arena.push_value(v.into())
    }

    #[inline]
    pub fn const_i32(&mut self, val: i32) -> ValueId {
        #[allow(clippy::cast_sign_loss)]
        let v = self.scx.type_i32().const_int(val as u64, val < 0);
        self.arena.push_value(v.into())
    }

    #[inline]
    pub fn const_i64(&mut self, val: i64) -> ValueId {
        #[allow(clippy::cast_sign_loss)]
        let v = self.scx.type_i64().const_int(val as u64, val < 0);
        self.arena.push_value(v.into())
    }

    /// A size-word constant.
    #[inline]
    pub fn const_size(&mut self, val: u64) -> ValueId {
        let v = self.scx.isize_ty.const_int(val, false);
        self.arena.push_value(v.into())
    }

    /// Integer constant of a registered integer type from raw bits.
    pub fn const_int(&mut self, ty: LLVMTypeId, bits: u64) -> Result<ValueId, CodegenError> {
        match self.arena.get_type(ty) {
            BasicTypeEnum::IntType(t) => Ok(self.arena.push_value(t.const_int(bits, false).into())),
            other => Err(kind_error("integer type", other)),
        }
    }

    pub fn const_float(&mut self, ty: LLVMTypeId, val: f64) -> Result<ValueId, CodegenError> {
        match self.arena.get_type(ty) {
            BasicTypeEnum::FloatType(t) => Ok(self.arena.push_value(t.const_float(val).into())),
            other => Err(kind_error("float type", other)),
        }
    }

    /// All-zero constant of any type (null for pointers).
    pub fn const_zero(&mut self, ty: LLVMTypeId) -> Result<ValueId, CodegenError> {
        let v: BasicValueEnum<'ctx> = match self.arena.get_type(ty) {
            BasicTypeEnum::IntType(t) => t.const_zero().into(),
            BasicTypeEnum::FloatType(t) => t.const_zero().into(),
            BasicTypeEnum::PointerType(t) => t.const_null().into(),
            BasicTypeEnum::StructType(t) => t.const_zero().into(),
            BasicTypeEnum::ArrayType(t) => t.const_zero().into(),
            other => return Err(kind_error("zeroable type", other)),
        };
        Ok(self.arena.push_value(v))
    }

    /// Constant struct of a registered struct type.
    pub fn const_struct(
        &mut self,
        ty: LLVMTypeId,
        fields: &[ValueId],
    ) -> Result<ValueId, CodegenError> {
        let BasicTypeEnum::StructType(st) = self.arena.get_type(ty) else {
            return Err(kind_error("struct type", self.arena.get_type(ty)));
        };
        let vals: Vec<BasicValueEnum<'ctx>> =
            fields.iter().map(|&id| self.arena.get_value(id)).collect();
        Ok(self.arena.push_value(st.const_named_struct(&vals).into()))
    }

    /// Constant `[N x E]` from `N` constants of element type `elem`.
    pub fn const_array(
        &mut self,
        elem: LLVMTypeId,
        values: &[ValueId],
    ) -> Result<ValueId, CodegenError> {
        let vals: Vec<BasicValueEnum<'ctx>> =
            values.iter().map(|&id| self.arena.get_value(id)).collect();
        let arr = match self.arena.get_type(elem) {
            BasicTypeEnum::IntType(t) => t.const_array(&collect_as::<IntValue>(&vals, "integer")?),
            BasicTypeEnum::FloatType(t) => {
                t.const_array(&collect_as::<FloatValue>(&vals, "float")?)
            }
            BasicTypeEnum::PointerType(t) => {
                t.const_array(&collect_as::<PointerValue>(&vals, "pointer")?)
            }
            BasicTypeEnum::StructType(t) => {
                t.const_array(&collect_as::<StructValue>(&vals, "struct")?)
            }
            BasicTypeEnum::ArrayType(t) => {
                t.const_array(&collect_as::<ArrayValue>(&vals, "array")?)
            }
            other => return Err(kind_error("array element type", other)),
        };
        Ok(self.arena.push_value(arr.into()))
    }

    /// Constant pointer reinterpretation (`bitcast` constant expression).
    pub fn const_pointer_cast(
        &mut self,
        val: ValueId,
        ty: LLVMTypeId,
    ) -> Result<ValueId, CodegenError> {
        let (BasicValueEnum::PointerValue(p), BasicTypeEnum::PointerType(t)) =
            (self.arena.get_value(val), self.arena.get_type(ty))
        else {
            return Err(CodegenError::ValueKind {
                expected: "constant pointer",
                found: self.describe_type(val),
            });
        };
        Ok(self.arena.push_value(p.const_cast(t).into()))
    }

    // -- Globals --

    /// Emit a private constant global with `init` and return its address.
    pub fn add_private_constant(&mut self, init: ValueId, name: &str) -> ValueId {
        let value = self.arena.get_value(init);
        let global = self.scx.llmod.add_global(value.get_type(), None, name);
        global.set_initializer(&value);
        global.set_constant(true);
        global.set_linkage(Linkage::Private);
        self.arena.push_value(global.as_pointer_value().into())
    }

    /// Address of an external global of type `ty`, declared on first use.
    pub fn extern_global(&mut self, name: &str, ty: LLVMTypeId) -> ValueId {
        let global = match self.scx.llmod.get_global(name) {
            Some(global) => global,
            None => {
                let llty = self.arena.get_type(ty);
                self.scx.llmod.add_global(llty, None, name)
            }
        };
        self.arena.push_value(global.as_pointer_value().into())
    }
}

fn kind_error(expected: &'static str, found: BasicTypeEnum<'_>) -> CodegenError {
    CodegenError::ValueKind {
        expected,
        found: found.print_to_string().to_string(),
    }
}

/// Convert constants to one concrete inkwell value type, rejecting strays.
fn collect_as<'ctx, V>(
    vals: &[BasicValueEnum<'ctx>],
    expected: &'static str,
) -> Result<Vec<V>, CodegenError>
where
    V: TryFrom<BasicValueEnum<'ctx>>,
{
    vals.iter()
        .map(|&v| {
            V::try_from(v).map_err(|_| CodegenError::ValueKind {
                expected,
                found: v.get_type().print_to_string().to_string(),
            })
        })
        .collect()
}
