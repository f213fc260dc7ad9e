use nova_rt::{RuntimeConfig, RuntimeContext, TypeId};

pub const OBJECT: TypeId = TypeId::from_raw(1);
pub const NUMBER: TypeId = TypeId::from_raw(2);
pub const INTEGER: TypeId = TypeId::from_raw(3);
pub const STRING: TypeId = TypeId::from_raw(4);
pub const COMPARABLE: TypeId = TypeId::from_raw(5);
pub const OBJECT_ARRAY: TypeId = TypeId::from_raw(6);
pub const NUMBER_ARRAY: TypeId = TypeId::from_raw(7);

/// `Object`, `Number <: Object`, `Integer <: Number` implementing `Comparable`,
/// `String <: Object` implementing `Comparable`, and the two array classes
/// `Number[] <: Object[] <: Object`.
pub fn number_tower(config: RuntimeConfig) -> RuntimeContext {
    let mut cx = RuntimeContext::new(config);
    cx.define_class(OBJECT, None, [OBJECT]).unwrap();
    cx.register(COMPARABLE, [COMPARABLE, OBJECT]).unwrap();
    cx.define_class(NUMBER, Some(OBJECT), [NUMBER, OBJECT])
        .unwrap();
    cx.define_class(INTEGER, Some(NUMBER), [INTEGER, NUMBER, COMPARABLE, OBJECT])
        .unwrap();
    cx.define_class(STRING, Some(OBJECT), [STRING, COMPARABLE, OBJECT])
        .unwrap();
    cx.register(OBJECT_ARRAY, [OBJECT_ARRAY, OBJECT]).unwrap();
    cx.register(NUMBER_ARRAY, [NUMBER_ARRAY, OBJECT_ARRAY, OBJECT])
        .unwrap();
    cx
}

pub fn default_tower() -> RuntimeContext {
    number_tower(RuntimeConfig::default())
}
