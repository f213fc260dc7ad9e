use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Array,
    Primitive,
}

/// Class-literal metadata produced by the class-metadata subsystem.
///
/// The hierarchy treats it as opaque: it is parked on a slot while the type is not
/// bootstrapped and handed to the prototype afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassLiteral {
    pub name: SmolStr,
    pub kind: ClassKind,
}

impl ClassLiteral {
    pub fn new(name: impl Into<SmolStr>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn class(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ClassKind::Class)
    }

    pub fn interface(name: impl Into<SmolStr>) -> Self {
        Self::new(name, ClassKind::Interface)
    }
}
