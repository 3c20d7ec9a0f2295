//! # Entity
//!
//! An entity is a bare index; it carries no data and no generation counter.
//! "Destruction" is modeled entirely by removing the entity from whichever
//! pools it lives in — the core never recycles entity IDs.

use bytemuck::{Pod, Zeroable};

/// A stable index into every sparse array in the world.
///
/// Entities carry no data of their own. There is no generation counter: once
/// minted, an ID is never reused, which keeps `Has`/`Get` branch-free at the
/// cost of an eventual 32-bit ceiling on total entities ever created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// The sentinel entity ID: `0xFFFFFFFF`. Denotes "absent" inside a pool's
    /// sparse slots and "no current entity" inside an in-flight view.
    pub const NULL: Self = Self(u32::MAX);

    /// Wraps a raw index as an `Entity`.
    #[inline]
    #[must_use]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index backing this entity.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns `true` if this is the sentinel "no entity" value.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}
