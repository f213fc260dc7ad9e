use std::collections::HashSet;
use std::rc::Rc;

use nova_rt_hierarchy::{ClassDef, ClassHierarchy, ClassLiteral, HierarchyError, Prototype};
use nova_rt_types::{TypeId, TypeRegistry};
use smol_str::SmolStr;

use crate::array::ArrayRuntime;
use crate::cast::CastEngine;
use crate::config::RuntimeConfig;
use crate::error::LoadError;
use crate::value::{Instance, ObjectRef};

/// Bootstrap records of one independently loaded unit of the emitted program.
///
/// Applied in field order: metadata placeholders, bare registrations (interfaces and other
/// types without a prototype), then class definitions in emitted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub name: SmolStr,
    pub metadata: Vec<(TypeId, ClassLiteral)>,
    pub registrations: Vec<(TypeId, Vec<TypeId>)>,
    pub types: Vec<ClassDef>,
}

impl Fragment {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, id: TypeId, literal: ClassLiteral) -> Self {
        self.metadata.push((id, literal));
        self
    }

    pub fn with_registration(
        mut self,
        id: TypeId,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Self {
        self.registrations
            .push((id, assignable_to.into_iter().collect()));
        self
    }

    pub fn with_class(mut self, def: ClassDef) -> Self {
        self.types.push(def);
        self
    }
}

/// The runtime type and object model of one program.
///
/// Created once at startup. Bootstrap operations take `&mut self`; everything generated
/// code calls in steady state goes through [`RuntimeContext::casts`] and
/// [`RuntimeContext::arrays`], which only borrow it. After the first bootstrap failure the
/// context is poisoned and refuses further bootstrap calls.
#[derive(Debug)]
pub struct RuntimeContext {
    config: RuntimeConfig,
    hierarchy: ClassHierarchy,
    loaded: HashSet<SmolStr>,
    poisoned: Option<String>,
}

impl RuntimeContext {
    pub fn new(config: RuntimeConfig) -> Self {
        let registry = TypeRegistry::with_options(config.registry);
        let hierarchy =
            ClassHierarchy::with_registry(registry).with_strategy(config.prototype_strategy);
        Self {
            config,
            hierarchy,
            loaded: HashSet::new(),
            poisoned: None,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn hierarchy(&self) -> &ClassHierarchy {
        &self.hierarchy
    }

    pub fn registry(&self) -> &TypeRegistry {
        self.hierarchy.registry()
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned.is_some()
    }

    pub fn casts(&self) -> CastEngine<'_> {
        CastEngine::new(
            self.hierarchy.registry(),
            self.hierarchy.marker(),
            &self.config.host,
            self.config.checks,
        )
    }

    pub fn arrays(&self) -> ArrayRuntime<'_> {
        ArrayRuntime::new(self.casts())
    }

    fn ensure_not_poisoned(&self) -> Result<(), LoadError> {
        match &self.poisoned {
            Some(cause) => Err(LoadError::Poisoned {
                cause: cause.clone(),
            }),
            None => Ok(()),
        }
    }

    fn bootstrap<T>(
        &mut self,
        op: impl FnOnce(&mut ClassHierarchy) -> Result<T, HierarchyError>,
    ) -> Result<T, LoadError> {
        self.ensure_not_poisoned()?;
        op(&mut self.hierarchy).map_err(|err| {
            tracing::error!(target: "nova.rt.bootstrap", error = %err, "fatal bootstrap error");
            self.poisoned = Some(err.to_string());
            LoadError::from(err)
        })
    }

    pub fn register(
        &mut self,
        id: TypeId,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Result<(), LoadError> {
        self.bootstrap(|hierarchy| hierarchy.register(id, assignable_to))
    }

    pub fn define_class(
        &mut self,
        id: TypeId,
        super_id: Option<TypeId>,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Result<Prototype, LoadError> {
        self.bootstrap(|hierarchy| hierarchy.define_class(id, super_id, assignable_to))
    }

    pub fn define_class_with(&mut self, def: &ClassDef) -> Result<Prototype, LoadError> {
        self.bootstrap(|hierarchy| hierarchy.define_class_with(def))
    }

    pub fn attach_metadata(
        &mut self,
        id: TypeId,
        literal: impl Into<Rc<ClassLiteral>>,
    ) -> Result<(), LoadError> {
        let literal = literal.into();
        self.bootstrap(|hierarchy| hierarchy.attach_metadata(id, literal))
    }

    pub fn metadata(&self, id: TypeId) -> Option<&Rc<ClassLiteral>> {
        self.hierarchy.metadata(id)
    }

    /// Bootstraps `fragment` unless a fragment of the same name was already loaded.
    ///
    /// Returns whether anything was applied. A poisoned context fails even for fragments it
    /// has already loaded.
    pub fn load_fragment(&mut self, fragment: &Fragment) -> Result<bool, LoadError> {
        self.ensure_not_poisoned()?;
        if self.loaded.contains(&fragment.name) {
            tracing::debug!(
                target: "nova.rt.bootstrap",
                fragment = %fragment.name,
                "fragment already loaded"
            );
            return Ok(false);
        }

        self.bootstrap(|hierarchy| {
            for (id, literal) in &fragment.metadata {
                hierarchy.attach_metadata(*id, Rc::new(literal.clone()))?;
            }
            for (id, row) in &fragment.registrations {
                hierarchy.register(*id, row.iter().copied())?;
            }
            for def in &fragment.types {
                hierarchy.define_class_with(def)?;
            }
            Ok(())
        })?;

        self.loaded.insert(fragment.name.clone());
        tracing::debug!(
            target: "nova.rt.bootstrap",
            fragment = %fragment.name,
            types = fragment.types.len(),
            pending_placeholders = self.hierarchy.pending_placeholders().count(),
            "loaded fragment"
        );
        Ok(true)
    }

    pub fn is_loaded(&self, fragment: &str) -> bool {
        self.loaded.contains(fragment)
    }

    /// New instance of a bootstrapped type with `field_count` null fields.
    pub fn new_instance(&self, id: TypeId, field_count: usize) -> Option<ObjectRef> {
        let proto = self.hierarchy.prototype(id)?;
        Some(Instance::new(proto.clone(), field_count))
    }
}
