use nova_rt::{ForeignObject, TypeId, Value};

use super::common::*;

#[test]
fn null_passes_every_cast() {
    let cx = default_tower();
    for target in [OBJECT, NUMBER, INTEGER, STRING, COMPARABLE, TypeId::from_raw(42)] {
        assert_eq!(cx.casts().check_cast(TypeId::NONE, target, true), Ok(()));
        assert_eq!(cx.casts().check_cast_value(&Value::Null, target), Ok(()));
    }
}

#[test]
fn null_is_never_an_instance() {
    let cx = default_tower();
    for target in [OBJECT, NUMBER, TypeId::NONE] {
        assert!(!cx.casts().instance_of(OBJECT, target, true));
        assert!(!cx.casts().instance_of_value(&Value::Null, target));
    }
}

#[test]
fn foreign_objects_have_no_runtime_type() {
    let cx = default_tower();
    let foreign = Value::Foreign(ForeignObject::new("HTMLElement"));
    assert_eq!(cx.casts().value_type_id(&foreign), TypeId::NONE);
    assert!(!cx.casts().instance_of_value(&foreign, OBJECT));
    assert!(!cx.casts().is_modeled_instance(&foreign));
    assert!(cx.casts().check_cast_value(&foreign, OBJECT).is_err());
}

#[test]
fn unbound_host_primitives_are_untyped() {
    let cx = default_tower();
    for value in [Value::from(true), Value::from(1.5), Value::from(7_i64), Value::str("s")] {
        assert_eq!(cx.casts().value_type_id(&value), TypeId::NONE);
        assert!(!cx.casts().instance_of_value(&value, OBJECT));
    }
}
