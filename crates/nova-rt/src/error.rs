use nova_rt_hierarchy::HierarchyError;
use nova_rt_types::TypeId;

/// A checked cast whose value is not assignable to the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot cast value of type {from} to {to}")]
pub struct CastError {
    pub from: TypeId,
    pub to: TypeId,
}

/// A covariant array write whose value does not fit the array's element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot store value of type {value_type} into array of {element_type} at index {index}")]
pub struct ArrayStoreError {
    pub value_type: TypeId,
    pub element_type: TypeId,
    pub index: usize,
}

/// Array construction with a negative dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("negative array size {size} at dimension {level}")]
pub struct NegativeSizeError {
    pub size: i32,
    /// Zero-based dimension, outermost first.
    pub level: usize,
}

/// Access outside the host container's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("index {index} out of bounds for length {length}")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub length: usize,
}

/// Any recoverable failure surfaced to generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Cast(#[from] CastError),

    #[error(transparent)]
    ArrayStore(#[from] ArrayStoreError),

    #[error(transparent)]
    NegativeSize(#[from] NegativeSizeError),

    #[error(transparent)]
    IndexOutOfBounds(#[from] IndexOutOfBounds),
}

/// Failure while bootstrapping a fragment. Always fatal for the context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error("runtime context is unusable after an earlier bootstrap failure: {cause}")]
    Poisoned { cause: String },
}
