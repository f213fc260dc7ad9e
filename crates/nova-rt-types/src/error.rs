use crate::TypeId;

/// A malformed registration emitted by the compiler.
///
/// These are never runtime data conditions: any of them means the type relation can no
/// longer be trusted, so callers must stop bootstrapping instead of recovering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapError {
    #[error("type id 0 is reserved and cannot be registered")]
    ReservedTypeId,

    #[error("type {id} exceeds the largest supported type id {max}")]
    TypeIdOutOfRange { id: TypeId, max: TypeId },

    #[error("type {id} registered twice with different rows: {existing:?} vs {requested:?}")]
    ConflictingRegistration {
        id: TypeId,
        existing: Vec<TypeId>,
        requested: Vec<TypeId>,
    },

    #[error("type {id} names supertype {supertype} which is not registered yet")]
    UnregisteredSupertype { id: TypeId, supertype: TypeId },

    #[error("row of type {id} is not closed: {via} is assignable to {missing} but {id} is not")]
    NotTransitivelyClosed {
        id: TypeId,
        via: TypeId,
        missing: TypeId,
    },
}
