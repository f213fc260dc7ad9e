use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense identifier of one emitted type.
///
/// Ids are assigned by the compiler. `0` is reserved for "no runtime type" (null-like
/// values, unchecked array elements).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(0);

    /// Largest id a registry or hierarchy will allocate a slot for.
    pub const MAX: TypeId = TypeId((1 << 24) - 1);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TypeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
