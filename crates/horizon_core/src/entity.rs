//! # Entity Handles
//!
//! A handle packs an arena slot and the slot's generation into one `u64`.
//! Freeing a slot bumps its generation, so every handle to the old
//! occupant stops resolving.

/// Generational handle to an entity in an [`crate::EntityArena`].
///
/// Layout: slot in the low 32 bits, generation in the high 32 bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// Handle that never resolves to anything.
    pub const DANGLING: Self = Self(u64::MAX);

    /// Packs a slot and generation.
    #[inline]
    #[must_use]
    pub const fn new(slot: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | (slot as u64))
    }

    /// Arena slot.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0 as u32
    }

    /// Slot generation at the time the handle was issued.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Returns true for [`EntityId::DANGLING`].
    #[inline]
    #[must_use]
    pub const fn is_dangling(self) -> bool {
        self.0 == Self::DANGLING.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::DANGLING
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}v{}", self.slot(), self.generation())
    }
}
