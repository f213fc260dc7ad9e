//! Per-type prototype materialization that tolerates out-of-order bootstrap.
//!
//! Every [`TypeId`] owns one [`ClassSlot`]. A slot may be created by the class-metadata
//! subsystem (which only leaves a [`ClassLiteral`] placeholder behind) or by
//! [`ClassHierarchy::define_class`], whichever runs first:
//!
//! ```text
//! Unseen --attach_metadata--> PlaceholderOnly --define_class--> Bootstrapped
//!    \______________________________define_class_____________________/
//! ```
//!
//! `Bootstrapped` is terminal. The prototype created on that transition is linked to
//! the supertype's prototype, takes over any pending placeholder, and carries a dispatch
//! table flattened from the supertype's table plus the type's own methods.

mod error;
mod hierarchy;
mod metadata;
mod prototype;
mod slot;

pub use error::HierarchyError;
pub use hierarchy::{ClassDef, ClassHierarchy, MethodDecl};
pub use metadata::{ClassKind, ClassLiteral};
pub use prototype::{DispatchTable, MethodImpl, Prototype, PrototypeStrategy, TypeMarker};
pub use slot::{ClassSlot, SlotState, SlotStateKind};

pub use nova_rt_types::TypeId;
