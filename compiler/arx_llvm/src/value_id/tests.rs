use inkwell::context::Context;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn handles_index_in_push_order() {
    let ctx = Context::create();
    let mut arena = ValueArena::new();
    let a = arena.push_type(ctx.i64_type().into());
    let b = arena.push_type(ctx.i8_type().into());
    assert_eq!(usize::from(a), 0);
    assert_eq!(usize::from(b), 1);
    assert_eq!(arena.get_type(b), BasicTypeEnum::from(ctx.i8_type()));
}
