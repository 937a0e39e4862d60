use pretty_assertions::assert_eq;

use super::*;

fn request(dest_elem: Idx, value_ty: Idx) -> FillRequest {
    FillRequest {
        dest_elem,
        value_ty,
        value_is_zero: false,
    }
}

#[test]
fn scalar_fill_uses_the_kind_routine() {
    let pool = Pool::new();
    assert_eq!(
        plan_fill(&pool, request(Idx::I32, Idx::I32)),
        Ok(FillPlan::Runtime {
            routine: RuntimeFn::InitI32,
            kind: ElemKind::I32,
            elem: Idx::I32,
            scale: 1,
            elem_size: None,
        })
    );
}

#[test]
fn zero_scalar_still_calls_the_runtime() {
    let pool = Pool::new();
    let plan = plan_fill(
        &pool,
        FillRequest {
            value_is_zero: true,
            ..request(Idx::F64, Idx::F64)
        },
    );
    assert!(matches!(
        plan,
        Ok(FillPlan::Runtime {
            routine: RuntimeFn::InitF64,
            ..
        })
    ));
}

#[test]
fn zero_aggregate_becomes_memset() {
    let mut pool = Pool::new();
    let point = pool.struct_type("Point", &[Idx::F64, Idx::F64, Idx::F64]);
    assert_eq!(
        plan_fill(
            &pool,
            FillRequest {
                value_is_zero: true,
                ..request(point, point)
            }
        ),
        Ok(FillPlan::ZeroFill {
            elem: point,
            elem_size: 24,
            scale: 1,
        })
    );
}

#[test]
fn aggregate_fill_passes_element_size() {
    let mut pool = Pool::new();
    let big = pool.struct_type("Big", &[Idx::I64, Idx::I64, Idx::I32]);
    let pair = pool.struct_type("Pair", &[Idx::I32, Idx::I16]);
    assert_eq!(
        plan_fill(&pool, request(big, big)),
        Ok(FillPlan::Runtime {
            routine: RuntimeFn::InitMem,
            kind: ElemKind::AggregateByRef,
            elem: big,
            scale: 1,
            elem_size: Some(24),
        })
    );
    assert_eq!(
        plan_fill(&pool, request(pair, pair)),
        Ok(FillPlan::Runtime {
            routine: RuntimeFn::InitMem,
            kind: ElemKind::AggregateByValue,
            elem: pair,
            scale: 1,
            elem_size: Some(8),
        })
    );
}

#[test]
fn nested_static_elements_are_flattened() {
    let mut pool = Pool::new();
    let row = pool.static_array(Idx::I16, 4);
    let grid = pool.static_array(row, 3);
    assert_eq!(
        plan_fill(&pool, request(grid, Idx::I16)),
        Ok(FillPlan::Runtime {
            routine: RuntimeFn::InitI16,
            kind: ElemKind::I16,
            elem: Idx::I16,
            scale: 12,
            elem_size: None,
        })
    );
}

#[test]
fn whole_static_element_value_is_copied_as_aggregate() {
    let mut pool = Pool::new();
    let row = pool.static_array(Idx::I16, 4);
    assert_eq!(
        plan_fill(&pool, request(row, row)),
        Ok(FillPlan::Runtime {
            routine: RuntimeFn::InitMem,
            kind: ElemKind::AggregateByRef,
            elem: row,
            scale: 1,
            elem_size: Some(8),
        })
    );
}

#[test]
fn mismatched_flattened_value_is_rejected() {
    let mut pool = Pool::new();
    let row = pool.static_array(Idx::I16, 4);
    assert_eq!(
        plan_fill(&pool, request(row, Idx::I32)),
        Err(AbiError::FillShapeMismatch {
            expected: "i16".to_owned(),
            found: "i32".to_owned(),
        })
    );
}

#[test]
fn void_elements_are_fatal() {
    let pool = Pool::new();
    assert!(matches!(
        plan_fill(&pool, request(Idx::VOID, Idx::VOID)),
        Err(AbiError::UnsupportedElement { .. })
    ));
}
