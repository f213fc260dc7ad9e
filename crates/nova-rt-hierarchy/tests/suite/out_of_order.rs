use std::rc::Rc;

use nova_rt_hierarchy::{ClassHierarchy, ClassLiteral, SlotStateKind, TypeId};

use pretty_assertions::assert_eq;

const OBJECT: TypeId = TypeId::from_raw(1);
const LIST: TypeId = TypeId::from_raw(2);
const ARRAY_LIST: TypeId = TypeId::from_raw(3);

#[test]
fn placeholder_moves_onto_the_prototype() {
    let mut hierarchy = ClassHierarchy::new();

    // A class literal for ArrayList was referenced from an earlier fragment.
    let literal = Rc::new(ClassLiteral::class("java.util.ArrayList"));
    hierarchy.attach_metadata(ARRAY_LIST, literal.clone()).unwrap();
    assert_eq!(hierarchy.state(ARRAY_LIST), SlotStateKind::PlaceholderOnly);
    assert_eq!(hierarchy.metadata(ARRAY_LIST), Some(&literal));

    hierarchy.define_class(OBJECT, None, [OBJECT]).unwrap();
    hierarchy.register(LIST, [OBJECT, LIST]).unwrap();
    let proto = hierarchy
        .define_class(ARRAY_LIST, Some(OBJECT), [OBJECT, LIST, ARRAY_LIST])
        .unwrap();

    assert_eq!(hierarchy.state(ARRAY_LIST), SlotStateKind::Bootstrapped);
    assert!(Rc::ptr_eq(proto.metadata().unwrap(), &literal));
    let slot = hierarchy.slot(ARRAY_LIST).unwrap();
    assert!(slot.placeholder().is_none());
    assert_eq!(slot.prototype(), Some(&proto));
    assert_eq!(hierarchy.pending_placeholders().count(), 0);
}

#[test]
fn bootstrap_without_placeholder_creates_a_bare_prototype() {
    let mut hierarchy = ClassHierarchy::new();
    let proto = hierarchy.define_class(OBJECT, None, [OBJECT]).unwrap();
    assert!(proto.metadata().is_none());
    assert_eq!(hierarchy.metadata(OBJECT), None);
}

#[test]
fn duplicate_definition_returns_the_same_handle() {
    let mut hierarchy = ClassHierarchy::new();
    hierarchy.define_class(OBJECT, None, [OBJECT]).unwrap();
    let first = hierarchy
        .define_class(LIST, Some(OBJECT), [OBJECT, LIST])
        .unwrap();
    let second = hierarchy
        .define_class(LIST, Some(OBJECT), [OBJECT, LIST])
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(hierarchy.registry().len(), 2);
}

#[test]
fn late_placeholder_does_not_replace_consumed_metadata() {
    let mut hierarchy = ClassHierarchy::new();
    let early = Rc::new(ClassLiteral::class("java.lang.Object"));
    hierarchy.attach_metadata(OBJECT, early.clone()).unwrap();
    hierarchy.define_class(OBJECT, None, [OBJECT]).unwrap();

    // Another fragment re-creates an equal literal: accepted, original kept.
    let again = Rc::new(ClassLiteral::class("java.lang.Object"));
    hierarchy.attach_metadata(OBJECT, again).unwrap();
    assert!(Rc::ptr_eq(hierarchy.metadata(OBJECT).unwrap(), &early));
}

#[test]
fn several_roots_share_one_marker() {
    let mut hierarchy = ClassHierarchy::new();
    let object = hierarchy.define_class(OBJECT, None, [OBJECT]).unwrap();
    let other_root = hierarchy.define_class(LIST, None, [LIST]).unwrap();
    assert!(Rc::ptr_eq(object.marker(), other_root.marker()));
    assert!(!other_root.is_subprototype_of(&object));
}
