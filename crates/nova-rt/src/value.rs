use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use nova_rt_hierarchy::Prototype;
use nova_rt_types::TypeId;
use smol_str::SmolStr;

use crate::array::ArrayRef;
use crate::error::IndexOutOfBounds;

pub type ObjectRef = Rc<Instance>;

/// A value as the host runtime sees it.
///
/// Only [`Value::Object`] (and typed arrays) carry a runtime [`TypeId`] of their own; host
/// primitives are mapped to source types through `HostTypeBindings`.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    Long(i64),
    Str(Rc<str>),
    Object(ObjectRef),
    Array(ArrayRef),
    Foreign(Rc<ForeignObject>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn str(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }
}

/// Primitives compare by value, heap values by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Foreign(a), Value::Foreign(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n:?}"),
            Value::Long(n) => write!(f, "{n}L"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Object(obj) => fmt::Debug::fmt(obj, f),
            Value::Array(arr) => fmt::Debug::fmt(arr, f),
            Value::Foreign(obj) => fmt::Debug::fmt(obj, f),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::str(value)
    }
}

impl From<ObjectRef> for Value {
    fn from(value: ObjectRef) -> Self {
        Value::Object(value)
    }
}

impl From<ArrayRef> for Value {
    fn from(value: ArrayRef) -> Self {
        Value::Array(value)
    }
}

/// An instance of a modeled type.
pub struct Instance {
    prototype: Prototype,
    fields: RefCell<Vec<Value>>,
}

impl Instance {
    pub fn new(prototype: Prototype, field_count: usize) -> ObjectRef {
        Rc::new(Self {
            prototype,
            fields: RefCell::new(vec![Value::Null; field_count]),
        })
    }

    pub fn type_id(&self) -> TypeId {
        self.prototype.type_id()
    }

    pub fn prototype(&self) -> &Prototype {
        &self.prototype
    }

    pub fn field(&self, index: usize) -> Option<Value> {
        self.fields.borrow().get(index).cloned()
    }

    pub fn set_field(&self, index: usize, value: Value) -> Result<(), IndexOutOfBounds> {
        let mut fields = self.fields.borrow_mut();
        let length = fields.len();
        let slot = fields
            .get_mut(index)
            .ok_or(IndexOutOfBounds { index, length })?;
        *slot = value;
        Ok(())
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_id", &self.type_id())
            .field("fields", &self.fields.borrow().len())
            .finish()
    }
}

/// A host object that did not come from the modeled object model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignObject {
    pub class_name: SmolStr,
}

impl ForeignObject {
    pub fn new(class_name: impl Into<SmolStr>) -> Rc<Self> {
        Rc::new(Self {
            class_name: class_name.into(),
        })
    }
}
