//! Fixed-width component presence bit vectors

use std::fmt;
use std::ops::BitAnd;

use super::component::ComponentKindId;

/// Bit vector over [`MAX_COMPONENT_KINDS`](super::MAX_COMPONENT_KINDS)
/// component kinds. Per entity it records which kinds are attached, per
/// system which kinds are required.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Signature(u32);

impl Signature {
    pub const EMPTY: Signature = Signature(0);

    pub fn set(&mut self, kind: ComponentKindId) {
        self.0 |= 1 << kind.index();
    }

    pub fn clear(&mut self, kind: ComponentKindId) {
        self.0 &= !(1 << kind.index());
    }

    pub fn test(&self, kind: ComponentKindId) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    /// True when every kind required by `other` is present in `self`.
    pub fn contains_all(&self, other: Signature) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl BitAnd for Signature {
    type Output = Signature;

    fn bitand(self, rhs: Signature) -> Signature {
        Signature(self.0 & rhs.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({:#034b})", self.0)
    }
}
