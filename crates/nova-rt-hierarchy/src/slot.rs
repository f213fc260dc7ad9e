use std::rc::Rc;
use std::sync::Arc;

use nova_rt_types::{AssignabilityRow, TypeId};

use crate::{ClassLiteral, MethodDecl, Prototype};

/// Bootstrap state of one type.
#[derive(Debug, Clone, Default)]
pub enum SlotState {
    /// Nothing has referenced the type yet.
    #[default]
    Empty,
    /// Class metadata arrived before the hierarchy link.
    PlaceholderOnly(Rc<ClassLiteral>),
    /// Terminal. Metadata, if any, now lives on the prototype.
    Bootstrapped(Prototype),
}

/// Data-free view of [`SlotState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotStateKind {
    Unseen,
    PlaceholderOnly,
    Bootstrapped,
}

impl SlotState {
    pub fn kind(&self) -> SlotStateKind {
        match self {
            SlotState::Empty => SlotStateKind::Unseen,
            SlotState::PlaceholderOnly(_) => SlotStateKind::PlaceholderOnly,
            SlotState::Bootstrapped(_) => SlotStateKind::Bootstrapped,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassSlot {
    pub(crate) super_id: Option<TypeId>,
    pub(crate) row: Option<Arc<AssignabilityRow>>,
    /// Methods of the definition that bootstrapped the type.
    pub(crate) methods: Vec<MethodDecl>,
    pub(crate) state: SlotState,
}

impl ClassSlot {
    pub fn super_id(&self) -> Option<TypeId> {
        self.super_id
    }

    /// Assignability row, present once the type is bootstrapped.
    pub fn row(&self) -> Option<&AssignabilityRow> {
        self.row.as_deref()
    }

    pub fn state(&self) -> &SlotState {
        &self.state
    }

    pub fn prototype(&self) -> Option<&Prototype> {
        match &self.state {
            SlotState::Bootstrapped(proto) => Some(proto),
            _ => None,
        }
    }

    /// Placeholder still waiting for the type to bootstrap.
    pub fn placeholder(&self) -> Option<&Rc<ClassLiteral>> {
        match &self.state {
            SlotState::PlaceholderOnly(metadata) => Some(metadata),
            _ => None,
        }
    }
}
