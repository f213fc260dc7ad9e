use std::rc::Rc;

use nova_rt_hierarchy::TypeMarker;
use nova_rt_types::{TypeId, TypeRegistry};

use crate::config::{CheckConfig, HostTypeBindings};
use crate::error::CastError;
use crate::value::Value;

/// Checked casts and `instanceof` tests.
///
/// A read-only view over a [`crate::RuntimeContext`]; obtained with
/// [`crate::RuntimeContext::casts`]. `check_cast` is the only fallible operation.
#[derive(Clone, Copy)]
pub struct CastEngine<'a> {
    registry: &'a TypeRegistry,
    marker: &'a Rc<TypeMarker>,
    host: &'a HostTypeBindings,
    checks: CheckConfig,
}

impl<'a> CastEngine<'a> {
    pub(crate) fn new(
        registry: &'a TypeRegistry,
        marker: &'a Rc<TypeMarker>,
        host: &'a HostTypeBindings,
        checks: CheckConfig,
    ) -> Self {
        Self {
            registry,
            marker,
            host,
            checks,
        }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    pub(crate) fn checks(&self) -> CheckConfig {
        self.checks
    }

    pub(crate) fn marker(&self) -> &'a Rc<TypeMarker> {
        self.marker
    }

    /// Succeeds when the value may be viewed as `target`.
    ///
    /// Null converts to every reference type. With cast checks disabled every cast
    /// succeeds.
    pub fn check_cast(
        &self,
        value_type: TypeId,
        target: TypeId,
        value_is_null: bool,
    ) -> Result<(), CastError> {
        if value_is_null || !self.checks.casts {
            return Ok(());
        }
        if self.registry.is_assignable(value_type, target) {
            return Ok(());
        }
        tracing::trace!(
            target: "nova.rt.cast",
            from = %value_type,
            to = %target,
            "checked cast failed"
        );
        Err(CastError {
            from: value_type,
            to: target,
        })
    }

    /// Like [`CastEngine::check_cast`] but answers `false` instead of failing, and
    /// `false` for null.
    pub fn instance_of(&self, value_type: TypeId, target: TypeId, value_is_null: bool) -> bool {
        !value_is_null && self.registry.is_assignable(value_type, target)
    }

    pub fn check_cast_value(&self, value: &Value, target: TypeId) -> Result<(), CastError> {
        self.check_cast(self.value_type_id(value), target, value.is_null())
    }

    pub fn instance_of_value(&self, value: &Value, target: TypeId) -> bool {
        self.instance_of(self.value_type_id(value), target, value.is_null())
    }

    /// Runtime type of `value`.
    ///
    /// Host primitives map through [`HostTypeBindings`]; null and unbound foreign values
    /// have no type.
    pub fn value_type_id(&self, value: &Value) -> TypeId {
        let bound = |binding: Option<TypeId>| binding.unwrap_or(TypeId::NONE);
        match value {
            Value::Null | Value::Foreign(_) => TypeId::NONE,
            Value::Boolean(_) => bound(self.host.boolean),
            Value::Number(_) => bound(self.host.number),
            Value::Long(_) => bound(self.host.long),
            Value::Str(_) => bound(self.host.string),
            Value::Object(obj) => obj.type_id(),
            Value::Array(arr) => {
                let own = arr.descriptor().array_type.type_id;
                if own.is_none() {
                    bound(self.host.array)
                } else {
                    own
                }
            }
        }
    }

    /// `true` for instances whose prototype carries this runtime's marker.
    pub fn is_modeled_instance(&self, value: &Value) -> bool {
        match value {
            Value::Object(obj) => obj.prototype().has_marker(self.marker),
            _ => false,
        }
    }

    /// `true` for arrays created by this runtime's [`crate::ArrayRuntime`].
    pub fn is_modeled_array(&self, value: &Value) -> bool {
        match value {
            Value::Array(arr) => arr.has_marker(self.marker),
            _ => false,
        }
    }
}
