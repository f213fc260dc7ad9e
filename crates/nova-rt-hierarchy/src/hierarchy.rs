use std::rc::Rc;

use nova_rt_types::{AssignabilityRow, TypeId, TypeRegistry};
use smol_str::SmolStr;

use crate::{
    ClassLiteral, ClassSlot, DispatchTable, HierarchyError, Prototype, PrototypeStrategy,
    SlotState, SlotStateKind, TypeMarker,
};

/// A method contributed by a class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: SmolStr,
    pub symbol: SmolStr,
}

/// Everything the compiler emits to bootstrap one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub id: TypeId,
    pub super_id: Option<TypeId>,
    pub assignable_to: Vec<TypeId>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDef {
    pub fn new(
        id: TypeId,
        super_id: Option<TypeId>,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Self {
        Self {
            id,
            super_id,
            assignable_to: assignable_to.into_iter().collect(),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, name: impl Into<SmolStr>, symbol: impl Into<SmolStr>) -> Self {
        self.methods.push(MethodDecl {
            name: name.into(),
            symbol: symbol.into(),
        });
        self
    }
}

/// The class hierarchy builder.
///
/// Owns the [`TypeRegistry`] so that a definition and its assignability row are written
/// together. Mutated only while fragments bootstrap.
#[derive(Debug)]
pub struct ClassHierarchy {
    registry: TypeRegistry,
    slots: Vec<ClassSlot>,
    marker: Rc<TypeMarker>,
    strategy: PrototypeStrategy,
}

impl Default for ClassHierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassHierarchy {
    pub fn new() -> Self {
        Self::with_registry(TypeRegistry::new())
    }

    pub fn with_registry(registry: TypeRegistry) -> Self {
        Self {
            registry,
            slots: Vec::new(),
            marker: TypeMarker::fresh(),
            strategy: PrototypeStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: PrototypeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn strategy(&self) -> PrototypeStrategy {
        self.strategy
    }

    /// Marker carried by every prototype of this hierarchy.
    pub fn marker(&self) -> &Rc<TypeMarker> {
        &self.marker
    }

    /// Records an assignability row without touching the hierarchy link.
    pub fn register(
        &mut self,
        id: TypeId,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Result<(), HierarchyError> {
        self.registry.register(id, assignable_to)?;
        Ok(())
    }

    pub fn define_class(
        &mut self,
        id: TypeId,
        super_id: Option<TypeId>,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Result<Prototype, HierarchyError> {
        self.define_class_with(&ClassDef::new(id, super_id, assignable_to))
    }

    /// Bootstraps `def.id`, or returns its prototype if it already is.
    ///
    /// The supertype must already be bootstrapped; definitions arrive supertype first
    /// within a fragment. A pending metadata placeholder moves onto the new prototype.
    pub fn define_class_with(&mut self, def: &ClassDef) -> Result<Prototype, HierarchyError> {
        let id = def.id;
        TypeRegistry::validate_id(id)?;
        if def.super_id == Some(id) {
            return Err(HierarchyError::SelfSupertype { id });
        }

        if let Some(slot) = self.slot(id) {
            if let Some(existing) = slot.prototype() {
                if slot.super_id != def.super_id {
                    return Err(HierarchyError::ConflictingSupertype {
                        id,
                        existing: slot.super_id,
                        requested: def.super_id,
                    });
                }
                if slot.methods != def.methods {
                    return Err(HierarchyError::ConflictingDefinition { id });
                }
                let existing = existing.clone();
                // A duplicate must also agree on the row.
                self.registry.register(id, def.assignable_to.iter().copied())?;
                tracing::debug!(
                    target: "nova.rt.hierarchy",
                    id = %id,
                    "type already bootstrapped; reusing prototype"
                );
                return Ok(existing);
            }
        }

        let parent = match def.super_id {
            None => None,
            Some(super_id) => {
                let Some(parent) = self.prototype(super_id) else {
                    return Err(HierarchyError::MissingSupertype { id, super_id });
                };
                let row = AssignabilityRow::new(id, def.assignable_to.iter().copied());
                if !row.contains(super_id) {
                    return Err(HierarchyError::SupertypeNotAssignable { id, super_id });
                }
                Some(parent.clone())
            }
        };

        let row = self.registry.register(id, def.assignable_to.iter().copied())?;

        let dispatch = match &parent {
            Some(parent) => parent.dispatch().derive(id, &def.methods),
            None => DispatchTable::default().derive(id, &def.methods),
        };
        let placeholder = self.slot(id).and_then(ClassSlot::placeholder).cloned();
        let consumed_placeholder = placeholder.is_some();
        let proto = Prototype::new(
            id,
            parent.as_ref(),
            &self.marker,
            self.strategy,
            dispatch,
            placeholder,
        );

        let slot = self.slot_mut(id);
        slot.super_id = def.super_id;
        slot.methods = def.methods.clone();
        slot.row = Some(row);
        slot.state = SlotState::Bootstrapped(proto.clone());

        tracing::debug!(
            target: "nova.rt.hierarchy",
            id = %id,
            super_id = ?def.super_id,
            depth = proto.depth(),
            consumed_placeholder,
            "bootstrapped type"
        );
        Ok(proto)
    }

    /// Associates class metadata with `id`, whatever its bootstrap state.
    ///
    /// Before bootstrap the value is parked as a placeholder; afterwards it is stored on
    /// the prototype if the prototype has none. Re-attaching an equal value is a no-op.
    pub fn attach_metadata(
        &mut self,
        id: TypeId,
        metadata: Rc<ClassLiteral>,
    ) -> Result<(), HierarchyError> {
        TypeRegistry::validate_id(id)?;

        let slot = self.slot_mut(id);
        let conflict = match &slot.state {
            SlotState::Empty => None,
            SlotState::PlaceholderOnly(existing) => Some(*existing != metadata),
            SlotState::Bootstrapped(proto) => Some(match proto.attach_metadata(metadata.clone()) {
                Ok(()) => false,
                Err(existing) => existing != metadata,
            }),
        };

        match conflict {
            None => {
                tracing::debug!(
                    target: "nova.rt.hierarchy",
                    id = %id,
                    name = %metadata.name,
                    "parked class metadata placeholder"
                );
                slot.state = SlotState::PlaceholderOnly(metadata);
                Ok(())
            }
            Some(false) => Ok(()),
            Some(true) => Err(HierarchyError::ConflictingMetadata { id }),
        }
    }

    /// Metadata for `id`: the pending placeholder, or what its prototype carries.
    pub fn metadata(&self, id: TypeId) -> Option<&Rc<ClassLiteral>> {
        match &self.slot(id)?.state {
            SlotState::Empty => None,
            SlotState::PlaceholderOnly(metadata) => Some(metadata),
            SlotState::Bootstrapped(proto) => proto.metadata(),
        }
    }

    pub fn slot(&self, id: TypeId) -> Option<&ClassSlot> {
        self.slots.get(id.to_raw() as usize)
    }

    fn slot_mut(&mut self, id: TypeId) -> &mut ClassSlot {
        let idx = id.to_raw() as usize;
        if self.slots.len() <= idx {
            self.slots.resize_with(idx + 1, ClassSlot::default);
        }
        &mut self.slots[idx]
    }

    pub fn state(&self, id: TypeId) -> SlotStateKind {
        self.slot(id)
            .map_or(SlotStateKind::Unseen, |slot| slot.state.kind())
    }

    pub fn prototype(&self, id: TypeId) -> Option<&Prototype> {
        self.slot(id)?.prototype()
    }

    pub fn super_id(&self, id: TypeId) -> Option<TypeId> {
        self.slot(id)?.super_id
    }

    /// Types whose metadata arrived but which were never bootstrapped.
    pub fn pending_placeholders(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            matches!(slot.state, SlotState::PlaceholderOnly(_))
                .then(|| TypeId::from_raw(idx as u32))
        })
    }
}
