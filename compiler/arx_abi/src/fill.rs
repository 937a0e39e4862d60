//! Planning for element-wise fill (`a[] = v`).

use arx_types::{Idx, Pool};

use crate::{rect_shape, AbiError, ElemKind, RuntimeFn};

/// What the frontend knows about a fill.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FillRequest {
    /// Element type of the destination array.
    pub dest_elem: Idx,
    /// Type of the value being written into every slot.
    pub value_ty: Idx,
    /// The value is a compile-time all-zero constant.
    pub value_is_zero: bool,
}

/// How to carry out a fill over `count` destination elements.
///
/// `scale` multiplies `count` when the destination element is a nested
/// static array that was flattened to `elem`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FillPlan {
    /// `memset(ptr, 0, count * scale * elem_size)`.
    ZeroFill { elem: Idx, elem_size: u64, scale: u64 },
    /// `routine(ptr, count * scale, value[, elem_size])`.
    Runtime {
        routine: RuntimeFn,
        kind: ElemKind,
        elem: Idx,
        scale: u64,
        elem_size: Option<u64>,
    },
}

pub fn plan_fill(pool: &Pool, req: FillRequest) -> Result<FillPlan, AbiError> {
    let (elem, scale) = match rect_shape(pool, req.dest_elem)? {
        Some(shape) if req.value_ty != req.dest_elem => {
            if req.value_ty != shape.inner {
                return Err(AbiError::FillShapeMismatch {
                    expected: pool.display(shape.inner),
                    found: pool.display(req.value_ty),
                });
            }
            (shape.inner, shape.count)
        }
        _ => {
            if req.value_ty != req.dest_elem {
                return Err(AbiError::FillShapeMismatch {
                    expected: pool.display(req.dest_elem),
                    found: pool.display(req.value_ty),
                });
            }
            (req.dest_elem, 1)
        }
    };

    let kind = ElemKind::classify(pool, elem)?;
    if kind.is_aggregate() && req.value_is_zero {
        return Ok(FillPlan::ZeroFill {
            elem,
            elem_size: pool.size_of(elem)?,
            scale,
        });
    }

    let routine = RuntimeFn::array_init(kind);
    let elem_size = if routine.takes_elem_size() {
        Some(pool.size_of(elem)?)
    } else {
        None
    };
    tracing::trace!(routine = routine.name(), %kind, scale, "fill plan");
    Ok(FillPlan::Runtime {
        routine,
        kind,
        elem,
        scale,
        elem_size,
    })
}

#[cfg(test)]
mod tests;
