//! Array comparison operators.
//!
//! Ordering goes through a three-way runtime compare whose `i32` result is
//! then tested against zero. The unordered comparators are folded here:
//! arrays are always ordered with respect to each other at this level, so
//! `<>=` is always true and `!<>=` always false, and no call is emitted.

use arx_types::{Idx, Pool, TypeData};

use crate::{AbiError, RuntimeFn};

/// Equality on array contents (`==`, `!=`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EqualityOp {
    Eq,
    Ne,
}

/// Identity on array representation (`is`, `!is`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IdentityOp {
    Is,
    NotIs,
}

impl IdentityOp {
    /// Predicate applied to both the lengths and the pointers.
    pub const fn predicate(self) -> CmpPredicate {
        match self {
            Self::Is => CmpPredicate::Eq,
            Self::NotIs => CmpPredicate::Ne,
        }
    }
}

/// Ordering comparators, including the unordered family.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ArrayCmpOp {
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `!>=`
    Ul,
    /// `!>`
    Ule,
    /// `!<=`
    Ug,
    /// `!<`
    Uge,
    /// `!<>`
    Ue,
    /// `<>`
    Lg,
    /// `<>=`
    Leg,
    /// `!<>=`
    Unord,
}

/// Signed integer predicate applied to a three-way compare result.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CmpPredicate {
    Eq,
    Ne,
    Slt,
    Sle,
    Sgt,
    Sge,
}

/// What to emit for an ordering comparison.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CmpPlan {
    /// Call the compare routine, test its result against zero.
    Predicate(CmpPredicate),
    /// The answer is known without looking at the operands.
    Const(bool),
}

impl ArrayCmpOp {
    pub const fn plan(self) -> CmpPlan {
        match self {
            Self::Lt | Self::Ul => CmpPlan::Predicate(CmpPredicate::Slt),
            Self::Le | Self::Ule => CmpPlan::Predicate(CmpPredicate::Sle),
            Self::Gt | Self::Ug => CmpPlan::Predicate(CmpPredicate::Sgt),
            Self::Ge | Self::Uge => CmpPlan::Predicate(CmpPredicate::Sge),
            Self::Ue => CmpPlan::Predicate(CmpPredicate::Eq),
            Self::Lg => CmpPlan::Predicate(CmpPredicate::Ne),
            Self::Leg => CmpPlan::Const(true),
            Self::Unord => CmpPlan::Const(false),
        }
    }
}

/// Compare routine for arrays of `elem`, and whether it takes a type
/// descriptor. `char` arrays compare byte-wise without one.
pub fn compare_routine(pool: &Pool, elem: Idx) -> Result<(RuntimeFn, bool), AbiError> {
    Ok(match pool.get(elem)? {
        TypeData::Char => (RuntimeFn::CompareChar, false),
        _ => (RuntimeFn::Compare, true),
    })
}
