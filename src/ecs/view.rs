//! # View
//!
//! A merge-style iterator that walks the intersection of several component
//! pools, using the first ("master") pool's dense array to drive iteration
//! and short-circuiting on the first pool a candidate entity is missing
//! from.
//!
//! **Ordering matters**: put the component expected to have the fewest live
//! entities first. Iteration cost is `O(master.count() * n)` in the worst
//! case and `O(master.count())` when intersections are dense — the view
//! does no work proportional to any pool other than the master except the
//! `has`/`get` calls for already-matching candidates.

use std::cell::RefMut;

use bytemuck::bytes_of_mut;

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::ecs::pool::SparsePool;
use crate::ecs::world::{ComponentId, World};

/// Maximum number of components a single [`View`] can query at once.
pub const VIEW_MAX_COMPONENTS: usize = 8;

/// A multi-pool intersection iterator.
///
/// `View::open` acquires a `RefMut` on every pool it queries and holds each
/// one for the view's entire lifetime — not just for the duration of a
/// single [`View::next`] call. That is what turns the structural-mutation-
/// during-iteration hazard spec calls out as undefined behavior into a
/// *detected* conflict: any attempt to mutate a pool the view still holds
/// (via `World::add_component`/`World::remove_component`, both `&self`
/// methods — nothing at the type level stops a second `&World` reference
/// from existing alongside an open view) hits the same `RefCell` and its
/// `try_borrow_mut` fails, so the mutation is rejected rather than silently
/// shifting `dense[]` under the live cursor (see `SPEC_FULL.md` §2.2). A
/// pool that cannot be borrowed mutably at `open` time (e.g. it is already
/// held open by another view) resolves as a missing pool for this view,
/// exactly like an unregistered component ID.
///
/// Opening with zero components, or with the master component unregistered
/// or unavailable, produces a view whose first [`View::next`] call returns
/// `false` — no error is raised, matching spec's stated failure semantics.
pub struct View<'w> {
    pools: Vec<Option<RefMut<'w, SparsePool>>>,
    cursor: u32,
    /// The entity produced by the most recent successful `next()`, or
    /// `Entity::NULL` before the first call / after exhaustion.
    entity: Entity,
}

impl<'w> View<'w> {
    /// Opens a view over `world` for the component IDs in `ids`, in order —
    /// `ids[0]` is the master pool.
    ///
    /// `ids` is clamped to [`VIEW_MAX_COMPONENTS`] entries; IDs that are out
    /// of range, unregistered, or whose pool cannot be borrowed mutably
    /// right now resolve to a "missing pool", which can never match
    /// (mirroring spec's "Has on a null pool is false"). The mutable borrow
    /// taken here is held for as long as this `View` lives.
    #[must_use]
    pub fn open(world: &'w World<'_>, ids: &[ComponentId]) -> Self {
        let count = ids.len().min(VIEW_MAX_COMPONENTS);
        let pools = ids[..count]
            .iter()
            .map(|&id| world.pool_cell(id).and_then(|cell| cell.try_borrow_mut().ok()))
            .collect();

        Self {
            pools,
            cursor: 0,
            entity: Entity::NULL,
        }
    }

    /// The entity produced by the most recent successful [`View::next`]
    /// call, or [`Entity::NULL`] if the view has not matched anything yet
    /// (or has been exhausted).
    #[inline]
    #[must_use]
    pub const fn entity(&self) -> Entity {
        self.entity
    }

    /// Advances to the next matching entity. Returns `false` once the
    /// master pool's dense array is exhausted.
    ///
    /// This is the merge-walk described in spec §4.4: the master pool's
    /// dense array is scanned once; for each candidate, every other
    /// requested pool is checked with `has`, short-circuiting on the first
    /// miss.
    pub fn next(&mut self) -> bool {
        let Some(Some(master)) = self.pools.first() else {
            self.entity = Entity::NULL;
            return false;
        };

        loop {
            let Some(candidate) = master.dense_entity(self.cursor) else {
                self.entity = Entity::NULL;
                return false;
            };

            let matched = self.pools[1..]
                .iter()
                .all(|slot| slot.as_deref().is_some_and(|pool| pool.has(candidate)));

            self.cursor += 1;
            if matched {
                self.entity = candidate;
                return true;
            }
        }
    }

    /// Reads component at query position `slot` (0 is the master) for the
    /// current entity, cast to `C`.
    ///
    /// Returns `None` if `slot` is out of range for this view, the pool at
    /// that position is missing, or the current entity does not carry it
    /// (which should not happen for a position `next()` just matched, save
    /// for slot 0 which is read directly off the master's dense array and
    /// is therefore infallible whenever `next()` last returned `true`).
    #[must_use]
    pub fn get<C: Component>(&self, slot: usize) -> Option<C> {
        let pool = self.pools.get(slot)?.as_deref()?;
        let bytes = if slot == 0 {
            Some(pool.dense_bytes(self.cursor.saturating_sub(1)))
        } else {
            pool.get(self.entity)
        }?;
        let mut value = C::default();
        bytes_of_mut(&mut value).copy_from_slice(bytes);
        Some(value)
    }

    /// Writes `value` into component at query position `slot` for the
    /// current entity.
    ///
    /// Returns `false` under the same conditions [`View::get`] returns
    /// `None`.
    pub fn set<C: Component>(&mut self, slot: usize, value: C) -> bool {
        let cursor = self.cursor;
        let entity = self.entity;
        let Some(pool) = self.pools.get_mut(slot).and_then(Option::as_deref_mut) else {
            return false;
        };
        let bytes = if slot == 0 {
            Some(pool.dense_bytes_mut(cursor.saturating_sub(1)))
        } else {
            pool.get_mut(entity)
        };
        let Some(bytes) = bytes else {
            return false;
        };
        bytes.copy_from_slice(bytemuck::bytes_of(&value));
        true
    }
}
