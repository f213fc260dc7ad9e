use nova_rt::{
    ArrayStoreError, ArrayType, HostTypeBindings, NegativeSizeError, RuntimeConfig,
    RuntimeError, TypeId, Value,
};

use pretty_assertions::assert_eq;

use super::common::*;

const NUMBERS: ArrayType = ArrayType::new(NUMBER_ARRAY, NUMBER);
const OBJECTS: ArrayType = ArrayType::new(OBJECT_ARRAY, OBJECT);

#[test]
fn number_array_accepts_integers_and_rejects_strings() {
    let cx = number_tower(RuntimeConfig {
        host: HostTypeBindings {
            string: Some(STRING),
            ..HostTypeBindings::default()
        },
        ..RuntimeConfig::default()
    });
    let arrays = cx.arrays();
    let arr = arrays.create_fixed(2, NUMBERS, Value::Null).unwrap();

    let int = Value::Object(cx.new_instance(INTEGER, 0).unwrap());
    arrays.store(&arr, 0, int.clone()).unwrap();
    assert_eq!(arr.get(0), Some(int));

    let err = arrays.store(&arr, 1, Value::str("x")).unwrap_err();
    assert_eq!(
        err,
        RuntimeError::ArrayStore(ArrayStoreError {
            value_type: STRING,
            element_type: NUMBER,
            index: 1
        })
    );
    assert_eq!(arr.get(1), Some(Value::Null));
}

#[test]
fn null_is_storable_everywhere() {
    let cx = default_tower();
    let arr = cx.arrays().create_fixed(1, NUMBERS, Value::Null).unwrap();
    let int = Value::Object(cx.new_instance(INTEGER, 0).unwrap());
    cx.arrays().store(&arr, 0, int).unwrap();
    cx.arrays().store(&arr, 0, Value::Null).unwrap();
    assert_eq!(arr.get(0), Some(Value::Null));
}

#[test]
fn covariant_view_still_checks_the_real_element_type() {
    let cx = default_tower();
    let arrays = cx.arrays();
    let numbers = Value::Array(arrays.create_fixed(1, NUMBERS, Value::Null).unwrap());

    // Viewed as Object[], the array still only takes Numbers.
    assert_eq!(cx.casts().check_cast_value(&numbers, OBJECT_ARRAY), Ok(()));
    let as_objects = numbers.as_array().unwrap();
    let plain = Value::Object(cx.new_instance(OBJECT, 0).unwrap());
    assert!(matches!(
        arrays.store(as_objects, 0, plain),
        Err(RuntimeError::ArrayStore(_))
    ));
}

#[test]
fn arrays_of_arrays_check_the_nested_array_type() {
    let cx = default_tower();
    let arrays = cx.arrays();
    let outer = arrays
        .create_fixed(2, ArrayType::new(TypeId::NONE, OBJECT_ARRAY), Value::Null)
        .unwrap();
    let numbers = arrays.create_fixed(0, NUMBERS, Value::Null).unwrap();
    let untracked = arrays.create_fixed(0, TypeId::NONE, Value::Null).unwrap();

    arrays.store(&outer, 0, Value::Array(numbers)).unwrap();
    assert!(arrays.store(&outer, 1, Value::Array(untracked)).is_err());
}

#[test]
fn literal_is_checked_before_allocation() {
    let cx = default_tower();
    let int = Value::Object(cx.new_instance(INTEGER, 0).unwrap());
    let obj = Value::Object(cx.new_instance(OBJECT, 0).unwrap());

    let ok = cx
        .arrays()
        .create_from_literal(NUMBERS, vec![int.clone(), Value::Null])
        .unwrap();
    assert_eq!(ok.to_vec(), vec![int.clone(), Value::Null]);

    let err = cx
        .arrays()
        .create_from_literal(NUMBERS, vec![int, obj])
        .unwrap_err();
    assert_eq!(
        err,
        ArrayStoreError {
            value_type: OBJECT,
            element_type: NUMBER,
            index: 1
        }
    );
}

#[test]
fn nested_arrays_are_jagged_and_typed_per_level() {
    let cx = default_tower();
    let levels = [ArrayType::new(TypeId::NONE, NUMBER_ARRAY), NUMBERS];
    let grid = cx
        .arrays()
        .create_nested(&[2, 3], &levels, Value::Null)
        .unwrap();

    assert_eq!(grid.len(), 2);
    assert_eq!(grid.descriptor().element_type_id(), NUMBER_ARRAY);
    let rows: Vec<_> = grid.to_vec();
    let first = rows[0].as_array().unwrap();
    let second = rows[1].as_array().unwrap();
    assert_eq!(first.len(), 3);
    assert_eq!(first.descriptor().array_type, NUMBERS);
    assert!(!std::rc::Rc::ptr_eq(first, second));
}

#[test]
fn negative_inner_dimension_allocates_nothing() {
    let cx = default_tower();
    let err = cx
        .arrays()
        .create_nested(&[3, -1], &[OBJECTS, NUMBERS], Value::Null)
        .unwrap_err();
    assert_eq!(err, NegativeSizeError { size: -1, level: 1 });
}

#[test]
fn unsized_trailing_dimensions_are_left_null() {
    let cx = default_tower();
    let levels = [
        ArrayType::of(OBJECT_ARRAY),
        ArrayType::of(NUMBER_ARRAY),
        NUMBERS,
    ];
    let grid = cx
        .arrays()
        .create_nested(&[2, 2], &levels, Value::Number(0.0))
        .unwrap();
    let inner = grid.get(1).unwrap();
    let inner = inner.as_array().unwrap();
    assert_eq!(inner.to_vec(), vec![Value::Null, Value::Null]);
}

#[test]
fn fully_sized_primitive_grid_takes_the_default() {
    let cx = default_tower();
    let levels = [ArrayType::UNCHECKED, ArrayType::UNCHECKED];
    let grid = cx
        .arrays()
        .create_nested(&[1, 2], &levels, Value::Number(0.0))
        .unwrap();
    let row = grid.get(0).unwrap();
    assert_eq!(
        row.as_array().unwrap().to_vec(),
        vec![Value::Number(0.0), Value::Number(0.0)]
    );
}

#[test]
fn untracked_arrays_bind_to_the_host_array_type() {
    let cx = number_tower(RuntimeConfig {
        host: HostTypeBindings {
            array: Some(OBJECT),
            ..HostTypeBindings::default()
        },
        ..RuntimeConfig::default()
    });
    let plain = Value::Array(cx.arrays().create_fixed(0, TypeId::NONE, Value::Null).unwrap());
    assert_eq!(cx.casts().value_type_id(&plain), OBJECT);
    assert!(cx.casts().instance_of_value(&plain, OBJECT));
    assert!(!cx.casts().instance_of_value(&plain, OBJECT_ARRAY));
}

#[test]
fn disabled_store_checks_accept_anything() {
    let mut config = RuntimeConfig::default();
    config.checks.array_stores = false;
    let cx = number_tower(config);
    let arr = cx.arrays().create_fixed(1, NUMBERS, Value::Null).unwrap();
    let obj = Value::Object(cx.new_instance(OBJECT, 0).unwrap());
    cx.arrays().store(&arr, 0, obj.clone()).unwrap();
    assert_eq!(arr.get(0), Some(obj));
    assert!(cx.arrays().store(&arr, 1, Value::Null).is_err());
}
