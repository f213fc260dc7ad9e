use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{BootstrapError, TypeId};

/// One row of the assignability matrix: every type the owner can be cast or assigned to.
///
/// Stored sorted and deduplicated; always contains the owner itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignabilityRow {
    ids: Box<[TypeId]>,
}

impl AssignabilityRow {
    pub fn new(owner: TypeId, assignable_to: impl IntoIterator<Item = TypeId>) -> Self {
        let mut ids: Vec<TypeId> = assignable_to
            .into_iter()
            .chain(std::iter::once(owner))
            .filter(|id| !id.is_none())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        Self {
            ids: ids.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn contains(&self, id: TypeId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[TypeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First id of `self` missing from `other`, if any.
    fn first_missing_from(&self, other: &AssignabilityRow) -> Option<TypeId> {
        self.iter().find(|id| !other.contains(*id))
    }
}

/// Knobs for bootstrap-time validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryOptions {
    /// Reject rows naming unregistered types or missing entries implied by transitivity.
    pub verify_closure: bool,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            verify_closure: true,
        }
    }
}

/// Owns per-type identity and the assignability relation.
///
/// Indexed directly by [`TypeId`]; ids are dense so the table stays small.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    rows: Vec<Option<Arc<AssignabilityRow>>>,
    registered: usize,
    options: RegistryOptions,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Rejects ids that cannot own a table entry: the reserved `0` and anything above
    /// [`TypeId::MAX`].
    pub fn validate_id(id: TypeId) -> Result<(), BootstrapError> {
        if id.is_none() {
            return Err(BootstrapError::ReservedTypeId);
        }
        if id > TypeId::MAX {
            return Err(BootstrapError::TypeIdOutOfRange { id, max: TypeId::MAX });
        }
        Ok(())
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Records the row for `id`.
    ///
    /// `assignable_to` is the compiler-computed set of supertypes and implemented
    /// interfaces; `id` itself is added if absent. Registering the same id again with an
    /// identical row returns the existing row, which lets several fragments carry a shared
    /// type. Every error is fatal for the program being loaded.
    pub fn register(
        &mut self,
        id: TypeId,
        assignable_to: impl IntoIterator<Item = TypeId>,
    ) -> Result<Arc<AssignabilityRow>, BootstrapError> {
        Self::validate_id(id)?;

        let row = AssignabilityRow::new(id, assignable_to);

        if let Some(existing) = self.row_arc(id) {
            if **existing == row {
                tracing::debug!(
                    target: "nova.rt.types",
                    id = %id,
                    "duplicate registration with identical row ignored"
                );
                return Ok(existing.clone());
            }
            return Err(BootstrapError::ConflictingRegistration {
                id,
                existing: existing.as_slice().to_vec(),
                requested: row.as_slice().to_vec(),
            });
        }

        if self.options.verify_closure {
            self.verify_closure(id, &row)?;
        }

        let idx = id.index();
        if self.rows.len() <= idx {
            self.rows.resize(idx + 1, None);
        }
        let row = Arc::new(row);
        self.rows[idx] = Some(row.clone());
        self.registered += 1;

        tracing::trace!(target: "nova.rt.types", id = %id, row = ?row.as_slice(), "registered type");
        Ok(row)
    }

    fn verify_closure(&self, id: TypeId, row: &AssignabilityRow) -> Result<(), BootstrapError> {
        for via in row.iter().filter(|other| *other != id) {
            let Some(via_row) = self.row(via) else {
                return Err(BootstrapError::UnregisteredSupertype { id, supertype: via });
            };
            if let Some(missing) = via_row.first_missing_from(row) {
                return Err(BootstrapError::NotTransitivelyClosed { id, via, missing });
            }
        }
        Ok(())
    }

    /// `true` iff a value whose runtime type is `src` may be used where `dst` is expected.
    ///
    /// `dst == 0` accepts everything; `src == 0` (no runtime type) is never assignable to a
    /// real type. Null handling is the caller's job.
    #[inline]
    pub fn is_assignable(&self, src: TypeId, dst: TypeId) -> bool {
        if dst.is_none() {
            return true;
        }
        if src.is_none() {
            return false;
        }
        self.row(src).is_some_and(|row| row.contains(dst))
    }

    pub fn is_registered(&self, id: TypeId) -> bool {
        self.row(id).is_some()
    }

    pub fn row(&self, id: TypeId) -> Option<&AssignabilityRow> {
        self.row_arc(id).map(|row| &**row)
    }

    /// Shared handle to the row for `id`.
    pub fn row_arc(&self, id: TypeId) -> Option<&Arc<AssignabilityRow>> {
        self.rows.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.registered
    }

    pub fn is_empty(&self) -> bool {
        self.registered == 0
    }

    /// Registered ids in ascending order together with their rows.
    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &AssignabilityRow)> + '_ {
        self.rows.iter().enumerate().filter_map(|(idx, row)| {
            let row = row.as_deref()?;
            Some((TypeId::from_raw(idx as u32), row))
        })
    }
}
