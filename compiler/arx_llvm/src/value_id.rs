//! Handles for the LLVM entities the array lowering passes around.
//!
//! `ArrayValue`, `ElementValue` and the lowering helpers carry `ValueId`s
//! rather than inkwell values, which keeps `'ctx` out of every array-level
//! signature. The entities themselves live in the builder's `ValueArena`.

use inkwell::basic_block::BasicBlock;
use inkwell::types::BasicTypeEnum;
use inkwell::values::{BasicValueEnum, FunctionValue};

macro_rules! handle {
    ($($(#[$doc:meta])* $name:ident;)*) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub struct $name(u32);

            impl From<u32> for $name {
                #[inline]
                fn from(index: u32) -> Self {
                    Self(index)
                }
            }

            impl From<$name> for usize {
                #[inline]
                fn from(id: $name) -> usize {
                    id.0 as usize
                }
            }
        )*
    };
}

handle! {
    /// An SSA value, constant or global address.
    ValueId;
    /// A first-class LLVM type.
    LLVMTypeId;
    /// A basic block.
    BlockId;
    /// A declared or defined function.
    FunctionId;
}

/// Append-only storage addressed by one handle type.
struct Table<T, I> {
    items: Vec<T>,
    kind: &'static str,
    _handle: std::marker::PhantomData<I>,
}

impl<T: Copy, I: Copy + From<u32> + Into<usize>> Table<T, I> {
    fn new(kind: &'static str) -> Self {
        Self {
            items: Vec::new(),
            kind,
            _handle: std::marker::PhantomData,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, item: T) -> I {
        let id = I::from(self.items.len() as u32);
        self.items.push(item);
        id
    }

    fn get(&self, id: I) -> T {
        let index: usize = id.into();
        debug_assert!(
            index < self.items.len(),
            "{} handle {index} out of bounds ({} stored)",
            self.kind,
            self.items.len()
        );
        self.items[index]
    }
}

/// Owner of every LLVM entity an `IrBuilder` has produced.
pub(crate) struct ValueArena<'ctx> {
    values: Table<BasicValueEnum<'ctx>, ValueId>,
    types: Table<BasicTypeEnum<'ctx>, LLVMTypeId>,
    blocks: Table<BasicBlock<'ctx>, BlockId>,
    functions: Table<FunctionValue<'ctx>, FunctionId>,
}

impl<'ctx> ValueArena<'ctx> {
    pub(crate) fn new() -> Self {
        Self {
            values: Table::new("value"),
            types: Table::new("type"),
            blocks: Table::new("block"),
            functions: Table::new("function"),
        }
    }

    #[inline]
    pub(crate) fn push_value(&mut self, val: BasicValueEnum<'ctx>) -> ValueId {
        self.values.push(val)
    }

    #[inline]
    pub(crate) fn get_value(&self, id: ValueId) -> BasicValueEnum<'ctx> {
        self.values.get(id)
    }

    #[inline]
    pub(crate) fn push_type(&mut self, ty: BasicTypeEnum<'ctx>) -> LLVMTypeId {
        self.types.push(ty)
    }

    #[inline]
    pub(crate) fn get_type(&self, id: LLVMTypeId) -> BasicTypeEnum<'ctx> {
        self.types.get(id)
    }

    #[inline]
    pub(crate) fn push_block(&mut self, bb: BasicBlock<'ctx>) -> BlockId {
        self.blocks.push(bb)
    }

    #[inline]
    pub(crate) fn get_block(&self, id: BlockId) -> BasicBlock<'ctx> {
        self.blocks.get(id)
    }

    #[inline]
    pub(crate) fn push_function(&mut self, func: FunctionValue<'ctx>) -> FunctionId {
        self.functions.push(func)
    }

    #[inline]
    pub(crate) fn get_function(&self, id: FunctionId) -> FunctionValue<'ctx> {
        self.functions.get(id)
    }
}

#[cfg(test)]
mod tests;
