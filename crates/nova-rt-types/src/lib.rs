//! Runtime type identity and the assignability relation.
//!
//! This is the leaf of the runtime object model: every checked cast, `instanceof`
//! test and covariant array store ends in a [`TypeRegistry::is_assignable`] lookup.
//! Rows are written once per type while a fragment bootstraps and are read-only
//! afterwards.

mod error;
mod id;
mod registry;

pub use error::BootstrapError;
pub use id::TypeId;
pub use registry::{AssignabilityRow, RegistryOptions, TypeRegistry};
