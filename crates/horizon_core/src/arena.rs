//! # Entity Arena
//!
//! Slot storage for entities whose lifetime is owned by something else
//! (a chunk, in the streaming world).
//!
//! The arena never decides when an entity dies. Owners keep the handles
//! they received from [`EntityArena::spawn`] and hand them back to
//! [`EntityArena::despawn`] as a unit. Freed slots are recycled with a bumped
//! generation, so a handle that outlives its entity can never alias a
//! newer one.

use crate::entity::EntityId;

/// One slot of the arena.
struct Slot<T> {
    /// Bumped every time the slot is freed.
    generation: u32,
    /// The stored entity, `None` when the slot is free.
    value: Option<T>,
}

/// Generational arena of entities.
///
/// # Thread Safety
///
/// Not synchronized. The streaming core is single-threaded; wrap in a mutex
/// if a consumer needs shared access.
///
/// # Example
///
/// ```rust,ignore
/// let mut arena = EntityArena::new();
/// let tree = arena.spawn("tree");
///
/// assert_eq!(arena.despawn(tree), Some("tree"));
/// // Second destruction is a no-op
/// assert_eq!(arena.despawn(tree), None);
/// ```
pub struct EntityArena<T> {
    /// Slot storage.
    slots: Vec<Slot<T>>,
    /// Indices of free slots, reused LIFO.
    free_list: Vec<u32>,
    /// Number of live entities.
    live: usize,
}

impl<T> EntityArena<T> {
    /// Creates an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Creates an arena with room for `capacity` entities before reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            live: 0,
        }
    }

    /// Number of live entities.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Returns true when no entity is alive.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever allocated (live + free).
    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Stores `value` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `u32::MAX - 1` slots are needed.
    pub fn spawn(&mut self, value: T) -> EntityId {
        self.live += 1;

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return EntityId::new(index, slot.generation);
        }

        assert!(
            self.slots.len() < u32::MAX as usize,
            "entity arena exhausted the 32-bit slot space"
        );
        #[allow(clippy::cast_possible_truncation)]
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        EntityId::new(index, 0)
    }

    /// Destroys the entity behind `id`.
    ///
    /// Idempotent: returns `None` for null, stale or already-destroyed handles.
    pub fn despawn(&mut self, id: EntityId) -> Option<T> {
        if id.is_dangling() {
            return None;
        }

        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation != id.generation() {
            return None;
        }

        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.slot());
        self.live -= 1;

        Some(value)
    }

    /// Destroys every handle in `ids`, returning how many were still alive.
    pub fn despawn_all<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = EntityId>,
    {
        ids.into_iter()
            .filter(|&id| self.despawn(id).is_some())
            .count()
    }

    /// Returns true if `id` refers to a live entity.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Gets a reference to a live entity.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        if id.is_dangling() {
            return None;
        }
        let slot = self.slots.get(id.slot() as usize)?;
        if slot.generation == id.generation() {
            slot.value.as_ref()
        } else {
            None
        }
    }

    /// Gets a mutable reference to a live entity.
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        if id.is_dangling() {
            return None;
        }
        let slot = self.slots.get_mut(id.slot() as usize)?;
        if slot.generation == id.generation() {
            slot.value.as_mut()
        } else {
            None
        }
    }

    /// Iterates over every live entity with its handle, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let value = slot.value.as_ref()?;
            // Slot count is bounded by u32 in `spawn`
            let index = u32::try_from(index).ok()?;
            Some((EntityId::new(index, slot.generation), value))
        })
    }
}

impl<T> Default for EntityArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_get() {
        let mut arena = EntityArena::new();
        let a = arena.spawn(1);
        let b = arena.spawn(2);

        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&1));
        assert_eq!(arena.get(b), Some(&2));
        assert_ne!(a, b);
    }

    #[test]
    fn test_despawn_is_idempotent() {
        let mut arena = EntityArena::new();
        let a = arena.spawn("windmill");

        assert_eq!(arena.despawn(a), Some("windmill"));
        assert_eq!(arena.despawn(a), None);
        assert_eq!(arena.despawn(EntityId::DANGLING), None);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_alias_reused_slot() {
        let mut arena = EntityArena::new();
        let old = arena.spawn(10);
        arena.despawn(old);

        let new = arena.spawn(20);
        assert_eq!(new.slot(), old.slot(), "slot should be recycled");
        assert_ne!(new.generation(), old.generation());
        assert_eq!(arena.get(old), None);
        assert_eq!(arena.get(new), Some(&20));

        // Destroying through the stale handle must not touch the new entity
        assert_eq!(arena.despawn(old), None);
        assert!(arena.contains(new));
    }

    #[test]
    fn test_despawn_all_counts_live_only() {
        let mut arena = EntityArena::new();
        let ids: Vec<_> = (0..5).map(|i| arena.spawn(i)).collect();
        arena.despawn(ids[2]);

        assert_eq!(arena.despawn_all(ids.iter().copied()), 4);
        assert!(arena.is_empty());
        assert_eq!(arena.slot_count(), 5);
    }

    #[test]
    fn test_iter_skips_free_slots() {
        let mut arena = EntityArena::new();
        let a = arena.spawn('a');
        let b = arena.spawn('b');
        let c = arena.spawn('c');
        arena.despawn(b);

        let live: Vec<_> = arena.iter().collect();
        assert_eq!(live, vec![(a, &'a'), (c, &'c')]);

        if let Some(value) = arena.get_mut(c) {
            *value = 'z';
        }
        assert_eq!(arena.get(c), Some(&'z'));
    }
}
