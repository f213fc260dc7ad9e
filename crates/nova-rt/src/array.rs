use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use nova_rt_hierarchy::TypeMarker;
use nova_rt_types::TypeId;

use crate::cast::CastEngine;
use crate::error::{ArrayStoreError, IndexOutOfBounds, NegativeSizeError, RuntimeError};
use crate::value::Value;

/// Runtime type of an array value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ArrayType {
    /// The array class itself (`Number[]`), used when the array is stored into an array of
    /// arrays or cast. `0` if untracked.
    pub type_id: TypeId,
    /// Element type checked on every store. `0` for primitive or unchecked elements.
    pub element_type_id: TypeId,
}

impl ArrayType {
    pub const UNCHECKED: ArrayType = ArrayType::new(TypeId::NONE, TypeId::NONE);

    pub const fn new(type_id: TypeId, element_type_id: TypeId) -> Self {
        Self {
            type_id,
            element_type_id,
        }
    }

    /// Array with an untracked class of its own.
    pub const fn of(element_type_id: TypeId) -> Self {
        Self::new(TypeId::NONE, element_type_id)
    }
}

impl From<TypeId> for ArrayType {
    fn from(element_type_id: TypeId) -> Self {
        ArrayType::of(element_type_id)
    }
}

/// Predicate applied to every non-null value written into an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCheck {
    Unchecked,
    AssignableTo(TypeId),
}

/// Fixed at construction; only element contents change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayDescriptor {
    pub length: usize,
    pub array_type: ArrayType,
    pub store_check: StoreCheck,
}

impl ArrayDescriptor {
    fn new(length: usize, array_type: ArrayType) -> Self {
        let store_check = if array_type.element_type_id.is_none() {
            StoreCheck::Unchecked
        } else {
            StoreCheck::AssignableTo(array_type.element_type_id)
        };
        Self {
            length,
            array_type,
            store_check,
        }
    }

    pub fn element_type_id(&self) -> TypeId {
        self.array_type.element_type_id
    }
}

pub type ArrayRef = Rc<ArrayObject>;

/// A host sequential container plus its descriptor.
pub struct ArrayObject {
    descriptor: ArrayDescriptor,
    marker: Rc<TypeMarker>,
    slots: RefCell<Vec<Value>>,
}

impl ArrayObject {
    pub fn descriptor(&self) -> &ArrayDescriptor {
        &self.descriptor
    }

    pub fn len(&self) -> usize {
        self.descriptor.length
    }

    pub fn is_empty(&self) -> bool {
        self.descriptor.length == 0
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.slots.borrow().get(index).cloned()
    }

    pub fn to_vec(&self) -> Vec<Value> {
        self.slots.borrow().clone()
    }

    pub(crate) fn has_marker(&self, marker: &Rc<TypeMarker>) -> bool {
        Rc::ptr_eq(&self.marker, marker)
    }
}

impl fmt::Debug for ArrayObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayObject")
            .field("type_id", &self.descriptor.array_type.type_id)
            .field("element_type_id", &self.descriptor.array_type.element_type_id)
            .field("length", &self.descriptor.length)
            .finish()
    }
}

/// Array construction and covariant stores.
///
/// Obtained with [`crate::RuntimeContext::arrays`]. Type questions go through the
/// [`CastEngine`] of the same context.
#[derive(Clone, Copy)]
pub struct ArrayRuntime<'a> {
    casts: CastEngine<'a>,
}

impl<'a> ArrayRuntime<'a> {
    pub(crate) fn new(casts: CastEngine<'a>) -> Self {
        Self { casts }
    }

    fn allocate(&self, array_type: ArrayType, slots: Vec<Value>) -> ArrayRef {
        Rc::new(ArrayObject {
            descriptor: ArrayDescriptor::new(slots.len(), array_type),
            marker: self.casts.marker().clone(),
            slots: RefCell::new(slots),
        })
    }

    /// `length` slots, each holding `default`.
    pub fn create_fixed(
        &self,
        length: i32,
        array_type: impl Into<ArrayType>,
        default: Value,
    ) -> Result<ArrayRef, NegativeSizeError> {
        if length < 0 {
            return Err(NegativeSizeError {
                size: length,
                level: 0,
            });
        }
        Ok(self.allocate(array_type.into(), vec![default; length as usize]))
    }

    /// Jagged multi-dimensional array.
    ///
    /// `levels[i]` describes the arrays at depth `i` and has one entry per declared
    /// dimension; `dims` sizes the outermost `dims.len()` of them. Slots of the innermost
    /// sized level hold `default` when every dimension is sized and null otherwise. All
    /// sizes are validated before anything is allocated.
    pub fn create_nested(
        &self,
        dims: &[i32],
        levels: &[ArrayType],
        default: Value,
    ) -> Result<ArrayRef, NegativeSizeError> {
        if let Some((level, &size)) = dims.iter().enumerate().find(|(_, size)| **size < 0) {
            return Err(NegativeSizeError { size, level });
        }
        Ok(self.build_level(dims, levels, 0, &default))
    }

    fn build_level(&self, dims: &[i32], levels: &[ArrayType], level: usize, default: &Value) -> ArrayRef {
        let array_type = levels.get(level).copied().unwrap_or_default();
        let length = dims.get(level).map_or(0, |&size| size as usize);
        let slots = if level + 1 < dims.len() {
            (0..length)
                .map(|_| Value::Array(self.build_level(dims, levels, level + 1, default)))
                .collect()
        } else if dims.len() < levels.len() {
            vec![Value::Null; length]
        } else {
            vec![default.clone(); length]
        };
        self.allocate(array_type, slots)
    }

    /// Array initialized from a literal, each element checked like a store.
    pub fn create_from_literal(
        &self,
        array_type: impl Into<ArrayType>,
        values: Vec<Value>,
    ) -> Result<ArrayRef, ArrayStoreError> {
        let array_type = array_type.into();
        let descriptor = ArrayDescriptor::new(values.len(), array_type);
        for (index, value) in values.iter().enumerate() {
            self.check_store(&descriptor, index, value)?;
        }
        Ok(self.allocate(array_type, values))
    }

    fn check_store(
        &self,
        descriptor: &ArrayDescriptor,
        index: usize,
        value: &Value,
    ) -> Result<(), ArrayStoreError> {
        let StoreCheck::AssignableTo(element_type) = descriptor.store_check else {
            return Ok(());
        };
        if value.is_null() || !self.casts.checks().array_stores {
            return Ok(());
        }
        let value_type = self.casts.value_type_id(value);
        if self.casts.instance_of(value_type, element_type, false) {
            return Ok(());
        }
        tracing::trace!(
            target: "nova.rt.array",
            value_type = %value_type,
            element_type = %element_type,
            index,
            "array store rejected"
        );
        Err(ArrayStoreError {
            value_type,
            element_type,
            index,
        })
    }

    /// Writes `value` into `array[index]` after the covariance check.
    ///
    /// On failure the slot keeps its previous value.
    pub fn store(&self, array: &ArrayRef, index: usize, value: Value) -> Result<(), RuntimeError> {
        let length = array.len();
        if index >= length {
            return Err(IndexOutOfBounds { index, length }.into());
        }
        self.check_store(array.descriptor(), index, &value)?;
        array.slots.borrow_mut()[index] = value;
        Ok(())
    }

    pub fn load(&self, array: &ArrayRef, index: usize) -> Result<Value, IndexOutOfBounds> {
        array.get(index).ok_or(IndexOutOfBounds {
            index,
            length: array.len(),
        })
    }

    /// Shallow copy with the same descriptor.
    pub fn clone_array(&self, array: &ArrayRef) -> ArrayRef {
        self.allocate(array.descriptor.array_type, array.to_vec())
    }

    /// Shallow copy of `array[start..end]`, bounds clamped to the array.
    pub fn clone_subrange(&self, array: &ArrayRef, start: usize, end: usize) -> ArrayRef {
        let slots = array.slots.borrow();
        let end = end.min(slots.len());
        let start = start.min(end);
        let copied = slots[start..end].to_vec();
        drop(slots);
        self.allocate(array.descriptor.array_type, copied)
    }
}
