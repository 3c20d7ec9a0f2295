//! # Sparse-Set Component Pool
//!
//! The storage primitive for exactly one component type: O(1) insertion,
//! removal and lookup, with dense, cache-friendly iteration over the
//! component's live values.
//!
//! `SparsePool` is the private, type-erased storage tier spec's design notes
//! call for ("a private type-erased pool — byte buffer + `elem_size` — that
//! holds the invariants"). [`crate::ecs::World`] is the thin generic layer on
//! top that casts bytes to and from a concrete [`crate::ecs::Component`].

use crate::ecs::entity::Entity;
use crate::memory::Arena;
use crate::error::EcsResult;

/// Sparse-set storage for exactly one component type.
///
/// # Invariants
///
/// 1. For every `k` in `0..count`: `sparse[dense[k]] == k`.
/// 2. For every entity `e < capacity` with `sparse[e] != NULL`:
///    `sparse[e] < count` and `dense[sparse[e]] == e`.
/// 3. `data[k*elem_size .. (k+1)*elem_size)` holds the live bytes for
///    `dense[k]`.
/// 4. No entity appears twice in `dense[0..count)`.
pub struct SparsePool {
    elem_size: usize,
    capacity: u32,
    count: u32,
    /// `sparse[entity] -> dense index`, or `Entity::NULL.raw()` if absent.
    sparse: Vec<u32>,
    /// `dense[index] -> entity`.
    dense: Vec<Entity>,
    /// Packed component bytes; element `k` lives at `k * elem_size`.
    data: Vec<u8>,
}

impl SparsePool {
    /// Allocates a new pool from `arena`, large enough for `capacity`
    /// entities of `elem_size` bytes each.
    ///
    /// The three backing arrays (`sparse`, `dense`, `data`) are charged
    /// against the arena's budget; `sparse` is pre-filled with the sentinel.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::error::EcsError::ArenaOutOfMemory`] if the arena
    /// does not have room for the three arrays this pool needs.
    pub fn new(arena: &Arena, elem_size: usize, capacity: u32) -> EcsResult<Self> {
        let cap = capacity as usize;
        let sparse = arena.typed_array::<u32>(cap)?;
        let dense = arena.typed_array::<Entity>(cap)?;
        let data = arena.alloc(cap.saturating_mul(elem_size), 1)?;

        let mut pool = Self {
            elem_size,
            capacity,
            count: 0,
            sparse,
            dense,
            data,
        };
        pool.sparse.iter_mut().for_each(|slot| *slot = Entity::NULL.raw());
        Ok(pool)
    }

    /// Bytes per stored element.
    #[inline]
    #[must_use]
    pub const fn elem_size(&self) -> usize {
        self.elem_size
    }

    /// Maximum entity ID (exclusive) this pool can track.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Current number of stored components.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Returns the dense-array entity at `index`, or `None` if `index` is not
    /// currently live. Exposed so [`crate::ecs::View`] can drive iteration
    /// off the master pool's dense array directly, with no sparse lookup.
    #[inline]
    #[must_use]
    pub(crate) fn dense_entity(&self, index: u32) -> Option<Entity> {
        if index < self.count {
            Some(self.dense[index as usize])
        } else {
            None
        }
    }

    /// Byte slice of the element at dense `index`, with no validity check
    /// beyond the bounds of `dense`/`data`. Used by [`crate::ecs::View`] for
    /// the master component, which is already known live by construction.
    #[inline]
    #[must_use]
    pub(crate) fn dense_bytes(&self, index: u32) -> &[u8] {
        let start = index as usize * self.elem_size;
        &self.data[start..start + self.elem_size]
    }

    /// Mutable byte slice of the element at dense `index`. See
    /// [`Self::dense_bytes`].
    #[inline]
    #[must_use]
    pub(crate) fn dense_bytes_mut(&mut self, index: u32) -> &mut [u8] {
        let start = index as usize * self.elem_size;
        &mut self.data[start..start + self.elem_size]
    }

    /// The sparse-set validity test: `entity` is in range, its sparse slot
    /// resolves to a live dense index, and that dense slot points back to
    /// `entity`. The double-check is required because `sparse` is never
    /// cleared just by `capacity` outliving live entities.
    #[inline]
    #[must_use]
    pub fn has(&self, entity: Entity) -> bool {
        let idx = entity.raw();
        if idx >= self.capacity {
            return false;
        }
        let dense_index = self.sparse[idx as usize];
        dense_index < self.count && self.dense[dense_index as usize] == entity
    }

    /// Returns a byte slice for `entity`'s component, or `None` if absent or
    /// out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&[u8]> {
        if !self.has(entity) {
            return None;
        }
        let index = self.sparse[entity.raw() as usize];
        Some(self.dense_bytes(index))
    }

    /// Returns a mutable byte slice for `entity`'s component, or `None` if
    /// absent or out of range.
    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut [u8]> {
        if !self.has(entity) {
            return None;
        }
        let index = self.sparse[entity.raw() as usize];
        Some(self.dense_bytes_mut(index))
    }

    /// Adds `entity` to this pool, returning a byte slice to write the
    /// component into.
    ///
    /// - Out-of-range `entity` (`>= capacity`): returns `None`. This is the
    ///   `PoolCapacityExceeded` disposition — a silent rejection, not a panic.
    /// - `entity` already present: returns the *existing* slot, unchanged,
    ///   without bumping `count` (the `DoubleAdd` disposition — not an
    ///   error).
    /// - Otherwise: appends to the dense array and returns the new,
    ///   uninitialized slot for the caller to fill.
    pub fn add(&mut self, entity: Entity) -> Option<&mut [u8]> {
        let idx = entity.raw();
        if idx >= self.capacity {
            return None;
        }

        if self.sparse[idx as usize] != Entity::NULL.raw() {
            let index = self.sparse[idx as usize];
            return Some(self.dense_bytes_mut(index));
        }

        let k = self.count;
        self.sparse[idx as usize] = k;
        self.dense[k as usize] = entity;
        self.count += 1;
        Some(self.dense_bytes_mut(k))
    }

    /// Removes `entity` from this pool via swap-and-pop.
    ///
    /// No-op if `entity` is out of range or not present. Any byte slice
    /// previously returned by [`Self::add`]/[`Self::get`] for the entity
    /// that occupied the last dense slot is invalidated by this call — it
    /// now refers to the removed entity's (vacated) slot.
    pub fn remove(&mut self, entity: Entity) {
        let idx = entity.raw();
        if idx >= self.capacity {
            return;
        }
        let removed_index = self.sparse[idx as usize];
        if removed_index == Entity::NULL.raw() {
            return;
        }

        let last_index = self.count - 1;
        if removed_index != last_index {
            let last_entity = self.dense[last_index as usize];

            let (dst_start, src_start) = (
                removed_index as usize * self.elem_size,
                last_index as usize * self.elem_size,
            );
            self.data.copy_within(src_start..src_start + self.elem_size, dst_start);

            self.dense[removed_index as usize] = last_entity;
            self.sparse[last_entity.raw() as usize] = removed_index;
        }

        self.sparse[idx as usize] = Entity::NULL.raw();
        self.count -= 1;
    }
}
