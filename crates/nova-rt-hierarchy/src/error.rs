use nova_rt_types::{BootstrapError, TypeId};

/// Fatal configuration errors raised while defining the class hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error(transparent)]
    Registry(#[from] BootstrapError),

    #[error("type {id} extends {super_id}, which is not bootstrapped")]
    MissingSupertype { id: TypeId, super_id: TypeId },

    #[error("type {id} cannot extend itself")]
    SelfSupertype { id: TypeId },

    #[error("type {id} redefined with supertype {requested:?}, previously {existing:?}")]
    ConflictingSupertype {
        id: TypeId,
        existing: Option<TypeId>,
        requested: Option<TypeId>,
    },

    #[error("type {id} redefined with a different method list")]
    ConflictingDefinition { id: TypeId },

    #[error("row of type {id} does not include its supertype {super_id}")]
    SupertypeNotAssignable { id: TypeId, super_id: TypeId },

    #[error("type {id} already carries different class metadata")]
    ConflictingMetadata { id: TypeId },
}
