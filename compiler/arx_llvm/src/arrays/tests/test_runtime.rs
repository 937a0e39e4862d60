//! In-process stand-in for the array runtime, for JIT tests.
//!
//! Storage comes from the global allocator and is never freed. "Init"
//! routines fill fresh storage with `0xFF` bytes, which reads back as the
//! `char` default and as a NaN for floats.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::missing_safety_doc
)]

use std::alloc::{alloc_zeroed, Layout};
use std::cmp::Ordering;

use arx_abi::reinterpret_len;

/// Layout of a dynamic-array record.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct Record {
    pub len: u64,
    pub ptr: *mut u8,
}

impl Record {
    pub const EMPTY: Self = Self {
        len: 0,
        ptr: std::ptr::null_mut(),
    };

    /// A record over a leaked copy of `items`.
    pub fn from_vec<T: Copy>(items: Vec<T>) -> Self {
        let len = items.len() as u64;
        let ptr = Box::leak(items.into_boxed_slice()).as_mut_ptr().cast::<u8>();
        Self { len, ptr }
    }

    /// The elements, read as `T`.
    pub fn to_vec<T: Copy>(&self) -> Vec<T> {
        if self.len == 0 {
            return Vec::new();
        }
        // SAFETY: records in tests point at `len` initialized `T`s.
        unsafe { std::slice::from_raw_parts(self.ptr.cast::<T>(), self.len as usize).to_vec() }
    }
}

/// What a type descriptor tells the runtime.
#[repr(C)]
pub struct TestTypeInfo {
    pub elem_size: u64,
    /// Descriptor of the element, for nested dynamic arrays.
    pub inner: Option<&'static TestTypeInfo>,
}

const fn sized(elem_size: u64) -> TestTypeInfo {
    TestTypeInfo {
        elem_size,
        inner: None,
    }
}

static BYTES_1: TestTypeInfo = sized(1);
static BYTES_4: TestTypeInfo = sized(4);
static BYTES_8: TestTypeInfo = sized(8);
static BYTES_16: TestTypeInfo = sized(16);
static BYTES_24: TestTypeInfo = sized(24);
static SLICE_OF_8: TestTypeInfo = TestTypeInfo {
    elem_size: 16,
    inner: Some(&BYTES_8),
};

/// Descriptor behind an `arx.typeinfo.*` symbol used by the tests.
pub fn descriptor(symbol: &str) -> Option<&'static TestTypeInfo> {
    Some(match symbol.strip_prefix("arx.typeinfo.")? {
        "Aa" | "Ag" | "Ah" | "Ab" => &BYTES_1,
        "Ai" | "Ak" | "Af" => &BYTES_4,
        "Al" | "Am" | "Ad" | "AG2i" => &BYTES_8,
        "AS4Pair" => &BYTES_16,
        "AS3Big" => &BYTES_24,
        "AAl" | "AAd" => &SLICE_OF_8,
        _ => return None,
    })
}

unsafe fn alloc_bytes(bytes: u64) -> *mut u8 {
    let Ok(layout) = Layout::from_size_align(bytes.max(1) as usize, 8) else {
        std::process::abort();
    };
    alloc_zeroed(layout)
}

unsafe fn alloc_filled(bytes: u64, fill: u8) -> *mut u8 {
    let p = alloc_bytes(bytes);
    if fill != 0 {
        std::ptr::write_bytes(p, fill, bytes as usize);
    }
    p
}

// -- Allocation --

unsafe extern "C" fn arx_array_new_zeroed(ti: *const TestTypeInfo, n: u64) -> *mut u8 {
    alloc_filled(n * (*ti).elem_size, 0)
}

unsafe extern "C" fn arx_array_new_init(ti: *const TestTypeInfo, n: u64) -> *mut u8 {
    alloc_filled(n * (*ti).elem_size, 0xFF)
}

unsafe fn new_multi(ti: &TestTypeInfo, ndims: u64, dims: *const u64, fill: u8) -> *mut u8 {
    let n = *dims;
    if ndims <= 1 {
        return alloc_filled(n * ti.elem_size, fill);
    }
    let Some(inner) = ti.inner else {
        std::process::abort();
    };
    let recs = alloc_bytes(n * 16).cast::<Record>();
    for i in 0..n as usize {
        recs.add(i).write(Record {
            len: *dims.add(1),
            ptr: new_multi(inner, ndims - 1, dims.add(1), fill),
        });
    }
    recs.cast()
}

unsafe extern "C" fn arx_array_new_md_zeroed(
    ti: *const TestTypeInfo,
    ndims: u64,
    dims: *const u64,
) -> *mut u8 {
    new_multi(&*ti, ndims, dims, 0)
}

unsafe extern "C" fn arx_array_new_md_init(
    ti: *const TestTypeInfo,
    ndims: u64,
    dims: *const u64,
) -> *mut u8 {
    new_multi(&*ti, ndims, dims, 0xFF)
}

unsafe fn set_len(ti: *const TestTypeInfo, new_len: u64, old_len: u64, old: *const u8, fill: u8) -> *mut u8 {
    let size = (*ti).elem_size;
    let fresh = alloc_filled(new_len * size, fill);
    let keep = new_len.min(old_len) * size;
    if keep > 0 {
        std::ptr::copy_nonoverlapping(old, fresh, keep as usize);
    }
    fresh
}

unsafe extern "C" fn arx_array_set_len_zeroed(
    ti: *const TestTypeInfo,
    new_len: u64,
    old_len: u64,
    old: *const u8,
) -> *mut u8 {
    set_len(ti, new_len, old_len, old, 0)
}

unsafe extern "C" fn arx_array_set_len_init(
    ti: *const TestTypeInfo,
    new_len: u64,
    old_len: u64,
    old: *const u8,
) -> *mut u8 {
    set_len(ti, new_len, old_len, old, 0xFF)
}

// -- Comparison --

unsafe fn bytes_of<'r>(rec: &'r Record, size: u64) -> &'r [u8] {
    if rec.len == 0 {
        return &[];
    }
    std::slice::from_raw_parts(rec.ptr, (rec.len * size) as usize)
}

unsafe extern "C" fn arx_array_eq(l: *const Record, r: *const Record, ti: *const TestTypeInfo) -> bool {
    let (l, r, size) = (&*l, &*r, (*ti).elem_size);
    l.len == r.len && bytes_of(l, size) == bytes_of(r, size)
}

/// Sign-extended element value, for sizes 1, 2, 4 and 8.
fn signed(chunk: &[u8]) -> i64 {
    match *chunk {
        [a] => i64::from(a as i8),
        [a, b] => i64::from(i16::from_le_bytes([a, b])),
        [a, b, c, d] => i64::from(i32::from_le_bytes([a, b, c, d])),
        [a, b, c, d, e, f, g, h] => i64::from_le_bytes([a, b, c, d, e, f, g, h]),
        _ => 0,
    }
}

fn ordering(ord: Ordering) -> i32 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

unsafe extern "C" fn arx_array_cmp(l: *const Record, r: *const Record, ti: *const TestTypeInfo) -> i32 {
    let size = (*ti).elem_size;
    let l = bytes_of(&*l, size).chunks(size as usize).map(signed);
    let r = bytes_of(&*r, size).chunks(size as usize).map(signed);
    ordering(l.cmp(r))
}

unsafe extern "C" fn arx_array_cmp_char(l: *const Record, r: *const Record) -> i32 {
    ordering(bytes_of(&*l, 1).cmp(bytes_of(&*r, 1)))
}

extern "C" fn arx_array_cast_len(len: u64, old_size: u64, new_size: u64) -> u64 {
    reinterpret_len(len, old_size, new_size).unwrap_or_else(|| std::process::abort())
}

// -- Fill --

unsafe fn fill<T: Copy>(p: *mut T, n: u64, v: T) {
    for i in 0..n as usize {
        p.add(i).write(v);
    }
}

unsafe extern "C" fn arx_array_init_ptr(p: *mut *mut u8, n: u64, v: *mut u8) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_i1(p: *mut bool, n: u64, v: bool) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_i8(p: *mut i8, n: u64, v: i8) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_i16(p: *mut i16, n: u64, v: i16) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_i32(p: *mut i32, n: u64, v: i32) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_i64(p: *mut i64, n: u64, v: i64) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_f32(p: *mut f32, n: u64, v: f32) {
    fill(p, n, v);
}
unsafe extern "C" fn arx_array_init_f64(p: *mut f64, n: u64, v: f64) {
    fill(p, n, v);
}

unsafe extern "C" fn arx_array_init_mem(p: *mut u8, n: u64, v: *const u8, size: u64) {
    for i in 0..n {
        std::ptr::copy_nonoverlapping(v, p.add((i * size) as usize), size as usize);
    }
}

/// Symbol to address of every routine.
pub fn mappings() -> [(&'static str, usize); 19] {
    [
        ("arx_array_init_ptr", arx_array_init_ptr as *const () as usize),
        ("arx_array_init_i1", arx_array_init_i1 as *const () as usize),
        ("arx_array_init_i8", arx_array_init_i8 as *const () as usize),
        ("arx_array_init_i16", arx_array_init_i16 as *const () as usize),
        ("arx_array_init_i32", arx_array_init_i32 as *const () as usize),
        ("arx_array_init_i64", arx_array_init_i64 as *const () as usize),
        ("arx_array_init_f32", arx_array_init_f32 as *const () as usize),
        ("arx_array_init_f64", arx_array_init_f64 as *const () as usize),
        ("arx_array_init_mem", arx_array_init_mem as *const () as usize),
        ("arx_array_new_zeroed", arx_array_new_zeroed as *const () as usize),
        ("arx_array_new_init", arx_array_new_init as *const () as usize),
        ("arx_array_new_md_zeroed", arx_array_new_md_zeroed as *const () as usize),
        ("arx_array_new_md_init", arx_array_new_md_init as *const () as usize),
        ("arx_array_set_len_zeroed", arx_array_set_len_zeroed as *const () as usize),
        ("arx_array_set_len_init", arx_array_set_len_init as *const () as usize),
        ("arx_array_eq", arx_array_eq as *const () as usize),
        ("arx_array_cmp", arx_array_cmp as *const () as usize),
        ("arx_array_cmp_char", arx_array_cmp_char as *const () as usize),
        ("arx_array_cast_len", arx_array_cast_len as *const () as usize),
    ]
}
