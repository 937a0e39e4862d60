//! ABI-facing queries over pooled types.

use std::fmt::Write;

use crate::layout::DYN_ARRAY_SIZE;
use crate::{Idx, Pool, ScalarDefault, Tag, TypeData, TypeError};

impl Pool {
    /// True for static and dynamic arrays.
    pub fn is_array(&self, idx: Idx) -> bool {
        self.tag(idx).is_ok_and(Tag::is_array)
    }

    /// Element type of an array type.
    pub fn array_elem(&self, idx: Idx) -> Result<Idx, TypeError> {
        match self.get(idx)? {
            TypeData::StaticArray { elem, .. } | TypeData::DynArray { elem } => Ok(*elem),
            _ => Err(TypeError::KindMismatch {
                expected: Tag::DynArray,
                ty: self.display(idx),
            }),
        }
    }

    /// Pointee of a pointer type.
    pub fn pointee(&self, idx: Idx) -> Result<Idx, TypeError> {
        match self.get(idx)? {
            TypeData::Pointer(pointee) => Ok(*pointee),
            _ => Err(TypeError::KindMismatch {
                expected: Tag::Pointer,
                ty: self.display(idx),
            }),
        }
    }

    /// Whether the default value of `idx` is all-zero bits.
    ///
    /// Floats default to NaN and `char` to `0xFF`, so neither is, and neither
    /// is any aggregate containing them.
    pub fn is_zero_init(&self, idx: Idx) -> Result<bool, TypeError> {
        Ok(match self.get(idx)? {
            TypeData::Void
            | TypeData::Bool
            | TypeData::Int { .. }
            | TypeData::Pointer(_)
            | TypeData::DynArray { .. } => true,
            TypeData::Char | TypeData::Float { .. } => false,
            TypeData::StaticArray { elem, .. } => self.is_zero_init(*elem)?,
            TypeData::Struct(def) => {
                for &field in &def.fields {
                    if !self.is_zero_init(field)? {
                        return Ok(false);
                    }
                }
                true
            }
        })
    }

    /// Default value of a scalar type; `None` for aggregates and `void`.
    pub fn scalar_default(&self, idx: Idx) -> Result<Option<ScalarDefault>, TypeError> {
        Ok(match self.get(idx)? {
            TypeData::Bool | TypeData::Int { .. } | TypeData::Pointer(_) => {
                Some(ScalarDefault::Zero)
            }
            TypeData::Char => Some(ScalarDefault::Int(0xFF)),
            TypeData::Float { .. } => Some(ScalarDefault::Float(f64::NAN)),
            TypeData::Void
            | TypeData::Struct(_)
            | TypeData::StaticArray { .. }
            | TypeData::DynArray { .. } => None,
        })
    }

    /// Whether values of `idx` are handed around by address.
    ///
    /// Static arrays always are; other aggregates are once they outgrow a
    /// dynamic-array record (two words).
    pub fn is_passed_by_ref(&self, idx: Idx) -> Result<bool, TypeError> {
        Ok(match self.tag(idx)? {
            Tag::StaticArray => true,
            Tag::Struct => self.size_of(idx)? > DYN_ARRAY_SIZE,
            _ => false,
        })
    }

    /// Symbol of the runtime type descriptor for `idx`.
    pub fn descriptor_symbol(&self, idx: Idx) -> Result<String, TypeError> {
        let mut buf = String::from("arx.typeinfo.");
        self.mangle_into(idx, &mut buf)?;
        Ok(buf)
    }

    /// Symbol of the descriptor for `elem[]`, without interning the array.
    pub fn array_descriptor_symbol(&self, elem: Idx) -> Result<String, TypeError> {
        let mut buf = String::from("arx.typeinfo.A");
        self.mangle_into(elem, &mut buf)?;
        Ok(buf)
    }

    fn mangle_into(&self, idx: Idx, buf: &mut String) -> Result<(), TypeError> {
        match self.get(idx)? {
            TypeData::Void => buf.push('v'),
            TypeData::Bool => buf.push('b'),
            TypeData::Char => buf.push('a'),
            TypeData::Int { bits, signed } => buf.push(match (*bits, *signed) {
                (8, true) => 'g',
                (8, false) => 'h',
                (16, true) => 's',
                (16, false) => 't',
                (32, true) => 'i',
                (32, false) => 'k',
                (_, true) => 'l',
                (_, false) => 'm',
            }),
            TypeData::Float { bits: 32 } => buf.push('f'),
            TypeData::Float { .. } => buf.push('d'),
            TypeData::Pointer(pointee) => {
                buf.push('P');
                self.mangle_into(*pointee, buf)?;
            }
            TypeData::Struct(def) => {
                let _ = write!(buf, "S{}{}", def.name.len(), def.name);
            }
            TypeData::StaticArray { elem, .. } => {
                let n = self.static_dim(idx)?;
                let _ = write!(buf, "G{n}");
                self.mangle_into(*elem, buf)?;
            }
            TypeData::DynArray { elem } => {
                buf.push('A');
                self.mangle_into(*elem, buf)?;
            }
        }
        Ok(())
    }
}
