//! Type formatting for diagnostics and logs.

#![allow(clippy::format_push_string)]

use crate::{Dim, Idx, Pool, TypeData};

impl Pool {
    /// Render `idx` in source syntax (`i32[4]`, `char[]`, `Point*`).
    pub fn display(&self, idx: Idx) -> String {
        let mut buf = String::new();
        self.display_into(idx, &mut buf);
        buf
    }

    fn display_into(&self, idx: Idx, buf: &mut String) {
        if let Some(name) = idx.name() {
            buf.push_str(name);
            return;
        }
        match self.get(idx) {
            Ok(TypeData::Pointer(pointee)) => {
                self.display_into(*pointee, buf);
                buf.push('*');
            }
            Ok(TypeData::Struct(def)) => buf.push_str(&def.name),
            Ok(TypeData::StaticArray { elem, dim }) => {
                self.display_into(*elem, buf);
                match dim {
                    Dim::Int(n) => buf.push_str(&format!("[{n}]")),
                    Dim::NonConstant => buf.push_str("[?]"),
                }
            }
            Ok(TypeData::DynArray { elem }) => {
                self.display_into(*elem, buf);
                buf.push_str("[]");
            }
            // Primitives are handled by `Idx::name` above.
            Ok(other) => buf.push_str(other.tag().name()),
            Err(_) => buf.push_str(&idx.to_string()),
        }
    }
}
