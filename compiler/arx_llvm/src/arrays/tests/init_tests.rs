use arx_abi::AbiError;
use arx_types::{Idx, Pool};
use inkwell::context::Context;
use pretty_assertions::assert_eq;

use super::{Harness, Record};
use crate::arrays::{ArrayValue, ElementValue};
use crate::error::CodegenError;

#[test]
fn clear_resets_the_record() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "clear");
    let mut pool = Pool::new();
    let ty = pool.dyn_array(Idx::I64);

    h.emit(&pool, "clear", &[h.record_ptr(h.scx.type_i64())], None, |arr, args| {
        arr.clear(&ArrayValue::Var { ty, addr: args[0] })?;
        Ok(None)
    })
    .unwrap();

    let ee = h.jit();
    let clear = unsafe { ee.get_function::<unsafe extern "C" fn(*mut Record)>("clear") }.unwrap();
    let mut rec = Record::from_vec(vec![1_i64, 2]);
    unsafe { clear.call(&mut rec) };
    assert_eq!(rec.len, 0);
    assert!(rec.ptr.is_null());
}

#[test]
fn assign_views_a_static_buffer() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "assign_static");
    let mut pool = Pool::new();
    let ty = pool.dyn_array(Idx::I64);
    let fixed = pool.static_array(Idx::I64, 4);
    let params = [
        h.record_ptr(h.scx.type_i64()),
        h.ptr(h.scx.type_i64().array_type(4)),
    ];

    h.emit(&pool, "assign", &params, None, |arr, args| {
        let dst = ArrayValue::Var { ty, addr: args[0] };
        let src = ArrayValue::Var {
            ty: fixed,
            addr: args[1],
        };
        arr.assign(&dst, &src)?;
        Ok(None)
    })
    .unwrap();

    let ee = h.jit();
    let assign = unsafe {
        ee.get_function::<unsafe extern "C" fn(*mut Record, *const [i64; 4])>("assign")
    }
    .unwrap();
    let buf = [4_i64, 3, 2, 1];
    let mut out = Record::EMPTY;
    unsafe { assign.call(&mut out, &buf) };
    assert_eq!(out.len, 4);
    assert_eq!(out.ptr, buf.as_ptr() as *mut u8);
}

#[test]
fn assign_rejects_mismatched_elements() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "assign_mismatch");
    let mut pool = Pool::new();
    let ty = pool.dyn_array(Idx::I64);
    let chars = pool.dyn_array(Idx::CHAR);

    let err = h
        .emit(&pool, "bad", &[h.record_ptr(h.scx.type_i64())], None, |arr, args| {
            let dst = ArrayValue::Var { ty, addr: args[0] };
            arr.assign(&dst, &ArrayValue::Null { ty: chars })?;
            Ok(None)
        })
        .unwrap_err();
    assert!(matches!(err, CodegenError::ElementMismatch { .. }));
}

#[test]
fn fill_scalars_through_the_typed_routine() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "fill_i64");
    let mut pool = Pool::new();
    let ty = pool.dyn_array(Idx::I64);
    let params = [h.record_ptr(h.scx.type_i64()), h.i64()];

    h.emit(&pool, "fill", &params, None, |arr, args| {
        let array = ArrayValue::Var { ty, addr: args[0] };
        let value = ElementValue::Direct {
            ty: Idx::I64,
            value: args[1],
        };
        arr.fill(&array, &value)?;
        Ok(None)
    })
    .unwrap();

    let ir = h.ir();
    assert!(ir.contains("call void @arx_array_init_i64("), "{ir}");

    let ee = h.jit();
    let fill = unsafe { ee.get_function::<unsafe extern "C" fn(*const Record, i64)>("fill") }
        .unwrap();
    let rec = Record::from_vec(vec![0_i64; 3]);
    unsafe { fill.call(&rec, 9) };
    assert_eq!(rec.to_vec::<i64>(), vec![9, 9, 9]);
}

#[test]
fn fill_chars_shares_the_byte_routine() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "fill_char");
    let mut pool = Pool::new();
    let ty = pool.dyn_array(Idx::CHAR);
    let params = [h.record_ptr(h.scx.type_i8()), h.scx.type_i8().into()];

    h.emit(&pool, "fill", &params, None, |arr, args| {
        let array = ArrayValue::Var { ty, addr: args[0] };
        let value = ElementValue::Direct {
            ty: Idx::CHAR,
            value: args[1],
        };
        arr.fill(&array, &value)?;
        Ok(None)
    })
    .unwrap();

    let ir = h.ir();
    assert!(ir.contains("call void @arx_array_init_i8("), "{ir}");

    let ee = h.jit();
    let fill = unsafe { ee.get_function::<unsafe extern "C" fn(*const Record, u8)>("fill") }
        .unwrap();
    let rec = Record::from_vec(b"abcd".to_vec());
    unsafe { fill.call(&rec, b'z') };
    assert_eq!(rec.to_vec::<u8>(), b"zzzz".to_vec());
}

#[test]
fn zero_aggregate_fill_is_a_memset() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "fill_zero_pair");
    let mut pool = Pool::new();
    let pair = pool.struct_type("Pair", &[Idx::I64, Idx::I64]);
    let ty = pool.dyn_array(pair);
    let bytes = h.ptr(h.scx.type_i8());

    h.emit(&pool, "wipe", &[bytes], None, |arr, args| {
        let array = ArrayValue::Var { ty, addr: args[0] };
        arr.fill(&array, &ElementValue::Zero { ty: pair })?;
        Ok(None)
    })
    .unwrap();

    let ir = h.ir();
    assert!(ir.contains("@llvm.memset"), "{ir}");
    assert!(!ir.contains("call void @arx_array_init_mem"), "{ir}");

    let ee = h.jit();
    let wipe = unsafe { ee.get_function::<unsafe extern "C" fn(*const Record)>("wipe") }.unwrap();
    let rec = Record::from_vec(vec![[1_i64, 2], [3, 4]]);
    unsafe { wipe.call(&rec) };
    assert_eq!(rec.to_vec::<[i64; 2]>(), vec![[0, 0], [0, 0]]);
}

#[test]
fn by_value_aggregate_fill_goes_through_memory() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "fill_pair");
    let mut pool = Pool::new();
    let pair = pool.struct_type("Pair", &[Idx::I64, Idx::I64]);
    let ty = pool.dyn_array(pair);
    let bytes = h.ptr(h.scx.type_i8());

    h.emit(&pool, "fill", &[bytes, bytes], None, |arr, args| {
        let array = ArrayValue::Var { ty, addr: args[0] };
        let value = ElementValue::Indirect {
            ty: pair,
            addr: args[1],
        };
        arr.fill(&array, &value)?;
        Ok(None)
    })
    .unwrap();

    let ir = h.ir();
    assert!(ir.contains("call void @arx_array_init_mem("), "{ir}");
    assert!(ir.contains("i64 16)"), "{ir}");

    let ee = h.jit();
    let fill = unsafe {
        ee.get_function::<unsafe extern "C" fn(*const Record, *const [i64; 2])>("fill")
    }
    .unwrap();
    let rec = Record::from_vec(vec![[0_i64; 2]; 3]);
    let value = [7_i64, -7];
    unsafe { fill.call(&rec, &value) };
    assert_eq!(rec.to_vec::<[i64; 2]>(), vec![[7, -7]; 3]);
}

#[test]
fn nested_static_elements_fill_flattened() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "fill_rows");
    let mut pool = Pool::new();
    let row = pool.static_array(Idx::I32, 2);
    let ty = pool.dyn_array(row);
    let params = [
        h.record_ptr(h.scx.type_i32().array_type(2)),
        h.scx.type_i32().into(),
    ];

    h.emit(&pool, "fill", &params, None, |arr, args| {
        let array = ArrayValue::Var { ty, addr: args[0] };
        let value = ElementValue::Direct {
            ty: Idx::I32,
            value: args[1],
        };
        arr.fill(&array, &value)?;
        Ok(None)
    })
    .unwrap();

    let ir = h.ir();
    assert!(ir.contains("call void @arx_array_init_i32("), "{ir}");

    let ee = h.jit();
    let fill = unsafe { ee.get_function::<unsafe extern "C" fn(*const Record, i32)>("fill") }
        .unwrap();
    let rec = Record::from_vec(vec![[0_i32; 2]; 3]);
    unsafe { fill.call(&rec, 5) };
    assert_eq!(rec.to_vec::<[i32; 2]>(), vec![[5, 5]; 3]);
}

#[test]
fn fill_value_must_match_the_innermost_element() {
    let ctx = Context::create();
    let h = Harness::new(&ctx, "fill_shape");
    let mut pool = Pool::new();
    let row = pool.static_array(Idx::I32, 2);
    let ty = pool.dyn_array(row);

    let err = h
        .emit(&pool, "bad", &[h.i64()], None, |arr, args| {
            let value = ElementValue::Direct {
                ty: Idx::I64,
                value: args[0],
            };
            arr.fill(&ArrayValue::Null { ty }, &value)?;
            Ok(None)
        })
        .unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Abi(AbiError::FillShapeMismatch { .. })
    ));
}
