use pretty_assertions::assert_eq;
use rustc_hash::FxHashSet;

use super::*;

#[test]
fn names_are_unique() {
    let names: FxHashSet<&str> = RuntimeFn::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(names.len(), RuntimeFn::ALL.len());
}

#[test]
fn every_name_has_the_runtime_prefix() {
    for f in RuntimeFn::ALL {
        assert!(f.name().starts_with("arx_array_"), "{}", f.name());
    }
}

#[test]
fn init_table_is_total() {
    let kinds = [
        (ElemKind::Pointer, "arx_array_init_ptr"),
        (ElemKind::Bool, "arx_array_init_i1"),
        (ElemKind::I8, "arx_array_init_i8"),
        (ElemKind::I16, "arx_array_init_i16"),
        (ElemKind::I32, "arx_array_init_i32"),
        (ElemKind::I64, "arx_array_init_i64"),
        (ElemKind::F32, "arx_array_init_f32"),
        (ElemKind::F64, "arx_array_init_f64"),
        (ElemKind::AggregateByValue, "arx_array_init_mem"),
        (ElemKind::AggregateByRef, "arx_array_init_mem"),
    ];
    for (kind, name) in kinds {
        assert_eq!(RuntimeFn::array_init(kind).name(), name);
    }
}

#[test]
fn scalar_fill_signature_is_pointer_count_value() {
    let sig = RuntimeFn::InitI32.signature();
    assert_eq!(sig.params, &[RtTy::IntPtr(32), RtTy::Size, RtTy::Int(32)]);
    assert_eq!(sig.ret, RtTy::Void);
}

#[test]
fn only_mem_fill_takes_element_size() {
    for f in RuntimeFn::ALL {
        assert_eq!(f.takes_elem_size(), f == RuntimeFn::InitMem, "{}", f.name());
    }
    assert_eq!(
        RuntimeFn::InitMem.signature().params,
        &[RtTy::Opaque, RtTy::Size, RtTy::Opaque, RtTy::Size]
    );
}

#[test]
fn allocation_routines_follow_zero_init() {
    assert_eq!(RuntimeFn::new_array(true), RuntimeFn::NewZeroed);
    assert_eq!(RuntimeFn::new_array(false), RuntimeFn::NewInit);
    assert_eq!(RuntimeFn::new_array_multi(true), RuntimeFn::NewMultiZeroed);
    assert_eq!(RuntimeFn::set_len(false), RuntimeFn::SetLenInit);
}

#[test]
fn resize_argument_order() {
    assert_eq!(
        RuntimeFn::SetLenZeroed.signature(),
        Signature {
            params: &[RtTy::Opaque, RtTy::Size, RtTy::Size, RtTy::Opaque],
            ret: RtTy::Opaque,
        }
    );
}

#[test]
fn char_compare_has_no_descriptor() {
    assert_eq!(RuntimeFn::CompareChar.signature().params.len(), 2);
    assert_eq!(RuntimeFn::Compare.signature().params.len(), 3);
}
