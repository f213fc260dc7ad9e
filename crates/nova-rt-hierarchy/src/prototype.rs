use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use nova_rt_types::TypeId;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::hierarchy::MethodDecl;
use crate::ClassLiteral;

/// How a prototype handle gets materialized.
///
/// Both strategies link to the supertype's prototype and inherit its dispatch table; the
/// choice is recorded on the handle for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrototypeStrategy {
    /// A fresh object whose delegation link is set to the parent prototype.
    #[default]
    Literal,
    /// A constructor function whose `prototype` is an instance of the parent constructor.
    Constructor,
}

/// Identity tag shared by every prototype of one hierarchy.
///
/// Compared by pointer only. Values whose prototype carries this marker are instances of
/// the modeled object model; anything else is a foreign host value.
pub struct TypeMarker {
    _private: (),
}

impl TypeMarker {
    pub fn fresh() -> Rc<Self> {
        Rc::new(Self { _private: () })
    }
}

impl fmt::Debug for TypeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeMarker@{:p}", self)
    }
}

/// Resolved target of a virtual call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodImpl {
    /// Symbol of the emitted function.
    pub symbol: SmolStr,
    /// Type whose definition supplied this entry.
    pub declaring_type: TypeId,
}

/// Flattened method table of one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchTable {
    entries: HashMap<SmolStr, MethodImpl>,
}

impl DispatchTable {
    pub(crate) fn derive(&self, owner: TypeId, methods: &[MethodDecl]) -> Self {
        let mut entries = self.entries.clone();
        for method in methods {
            entries.insert(
                method.name.clone(),
                MethodImpl {
                    symbol: method.symbol.clone(),
                    declaring_type: owner,
                },
            );
        }
        Self { entries }
    }

    pub fn resolve(&self, name: &str) -> Option<&MethodImpl> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MethodImpl)> + '_ {
        self.entries.iter().map(|(name, imp)| (name.as_str(), imp))
    }
}

struct PrototypeData {
    type_id: TypeId,
    parent: Option<Prototype>,
    marker: Rc<TypeMarker>,
    strategy: PrototypeStrategy,
    depth: usize,
    dispatch: DispatchTable,
    metadata: OnceCell<Rc<ClassLiteral>>,
}

/// Shared behavior table for the instances of one type.
///
/// Cheap to clone; equality is identity. Exactly one handle exists per bootstrapped type.
#[derive(Clone)]
pub struct Prototype(Rc<PrototypeData>);

impl Prototype {
    pub(crate) fn new(
        type_id: TypeId,
        parent: Option<&Prototype>,
        marker: &Rc<TypeMarker>,
        strategy: PrototypeStrategy,
        dispatch: DispatchTable,
        metadata: Option<Rc<ClassLiteral>>,
    ) -> Self {
        let cell = OnceCell::new();
        if let Some(metadata) = metadata {
            let _ = cell.set(metadata);
        }
        // Derived prototypes inherit the marker through their parent, roots take the
        // hierarchy's.
        let marker = parent.map_or_else(|| marker.clone(), |p| p.0.marker.clone());
        Self(Rc::new(PrototypeData {
            type_id,
            parent: parent.cloned(),
            marker,
            strategy,
            depth: parent.map_or(0, |p| p.depth() + 1),
            dispatch,
            metadata: cell,
        }))
    }

    pub fn type_id(&self) -> TypeId {
        self.0.type_id
    }

    pub fn parent(&self) -> Option<&Prototype> {
        self.0.parent.as_ref()
    }

    pub fn marker(&self) -> &Rc<TypeMarker> {
        &self.0.marker
    }

    pub fn has_marker(&self, marker: &Rc<TypeMarker>) -> bool {
        Rc::ptr_eq(&self.0.marker, marker)
    }

    pub fn strategy(&self) -> PrototypeStrategy {
        self.0.strategy
    }

    /// Number of delegation links between this prototype and its root.
    pub fn depth(&self) -> usize {
        self.0.depth
    }

    pub fn dispatch(&self) -> &DispatchTable {
        &self.0.dispatch
    }

    pub fn resolve(&self, method: &str) -> Option<&MethodImpl> {
        self.0.dispatch.resolve(method)
    }

    pub fn metadata(&self) -> Option<&Rc<ClassLiteral>> {
        self.0.metadata.get()
    }

    /// Stores `metadata` unless some is already present; returns the present value then.
    pub(crate) fn attach_metadata(&self, metadata: Rc<ClassLiteral>) -> Result<(), Rc<ClassLiteral>> {
        if let Some(existing) = self.0.metadata.get() {
            return Err(existing.clone());
        }
        let _ = self.0.metadata.set(metadata);
        Ok(())
    }

    /// This prototype followed by every prototype up its delegation chain.
    pub fn ancestors(&self) -> impl Iterator<Item = Prototype> {
        std::iter::successors(Some(self.clone()), |p| p.parent().cloned())
    }

    pub fn is_subprototype_of(&self, other: &Prototype) -> bool {
        if self.depth() < other.depth() {
            return false;
        }
        self.ancestors().any(|p| p == *other)
    }

    pub fn ptr_eq(a: &Prototype, b: &Prototype) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }
}

impl PartialEq for Prototype {
    fn eq(&self, other: &Self) -> bool {
        Prototype::ptr_eq(self, other)
    }
}

impl Eq for Prototype {}

impl fmt::Debug for Prototype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prototype")
            .field("type_id", &self.0.type_id)
            .field("parent", &self.0.parent.as_ref().map(|p| p.type_id()))
            .field("depth", &self.0.depth)
            .field("methods", &self.0.dispatch.len())
            .finish_non_exhaustive()
    }
}
