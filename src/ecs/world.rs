//! # World
//!
//! The registry of component pools, entity-ID minting, and the one place
//! that ties a [`crate::memory::Arena`] to the pools built from it.

use std::cell::{Ref, RefCell, RefMut};

use bytemuck::{bytes_of, bytes_of_mut, Zeroable};

use crate::ecs::component::Component;
use crate::ecs::entity::Entity;
use crate::ecs::pool::SparsePool;
use crate::error::{EcsError, EcsResult};
use crate::memory::Arena;

/// Identifies a registered component type, in `[0, MAX_COMPONENT_TYPES)`.
pub type ComponentId = u32;

/// Ceiling on distinct component types a single [`World`] can register.
pub const MAX_COMPONENT_TYPES: u32 = 32;

/// The ECS registry: owns the arena reference, the pool table, and the
/// entity counter.
///
/// All memory a `World` and its pools need is requested from `arena` at
/// construction and registration time; there is no growth path afterwards.
/// Entities are never explicitly destroyed by the core — "destruction" is
/// modeled by removing the entity from every pool the host cares about.
pub struct World<'a> {
    arena: &'a Arena,
    pools: Box<[Option<RefCell<SparsePool>>]>,
    component_counter: u32,
    entity_counter: u32,
    max_entities: u32,
}

impl<'a> World<'a> {
    /// Creates a new, empty world backed by `arena`.
    ///
    /// `max_entities` becomes the default pool capacity used by every
    /// subsequent [`World::register_component`] call — there is no per-type
    /// capacity override in this core (see spec's Open Question resolution
    /// in `SPEC_FULL.md`).
    #[must_use]
    pub fn new(arena: &'a Arena, max_entities: u32) -> Self {
        let pools = (0..MAX_COMPONENT_TYPES)
            .map(|_| None)
            .collect::<Vec<_>>()
            .into_boxed_slice();

        tracing::trace!(max_entities, "world created");

        Self {
            arena,
            pools,
            component_counter: 0,
            entity_counter: 0,
            max_entities,
        }
    }

    /// The default pool capacity new component registrations receive.
    #[inline]
    #[must_use]
    pub const fn max_entities(&self) -> u32 {
        self.max_entities
    }

    /// Number of entity IDs minted so far.
    #[inline]
    #[must_use]
    pub const fn entity_count(&self) -> u32 {
        self.entity_counter
    }

    /// Number of component types registered so far.
    #[inline]
    #[must_use]
    pub const fn component_count(&self) -> u32 {
        self.component_counter
    }

    /// Registers a new component type sized for `elem_size` bytes, returning
    /// its assigned [`ComponentId`].
    ///
    /// IDs are assigned sequentially starting at 0 (see `SPEC_FULL.md` §2.1
    /// for why this shape was chosen over a caller-supplied ID).
    ///
    /// # Errors
    ///
    /// Returns [`EcsError::TooManyComponentTypes`] if all
    /// [`MAX_COMPONENT_TYPES`] slots are already registered, or propagates
    /// [`EcsError::ArenaOutOfMemory`] if the arena cannot back the new pool's
    /// arrays.
    pub fn register_component_raw(&mut self, elem_size: usize) -> EcsResult<ComponentId> {
        if self.component_counter >= MAX_COMPONENT_TYPES {
            return Err(EcsError::TooManyComponentTypes {
                max: MAX_COMPONENT_TYPES,
            });
        }

        let id = self.component_counter;
        let pool = SparsePool::new(self.arena, elem_size, self.max_entities)?;
        self.pools[id as usize] = Some(RefCell::new(pool));
        self.component_counter += 1;

        tracing::trace!(component_id = id, elem_size, "component type registered");
        Ok(id)
    }

    /// Typed convenience over [`World::register_component_raw`]: computes
    /// `elem_size` from `C` automatically.
    ///
    /// # Errors
    ///
    /// See [`World::register_component_raw`].
    pub fn register_component<C: Component>(&mut self) -> EcsResult<ComponentId> {
        self.register_component_raw(std::mem::size_of::<C>())
    }

    /// Mints a new entity ID.
    ///
    /// There is no recycling: the counter only ever increases. The host is
    /// responsible for not minting more entities than any registered pool's
    /// capacity can track.
    #[inline]
    pub fn create_entity(&mut self) -> Entity {
        let id = Entity::from_raw(self.entity_counter);
        self.entity_counter += 1;
        id
    }

    fn pool(&self, cid: ComponentId) -> Option<&RefCell<SparsePool>> {
        debug_assert!(
            cid < MAX_COMPONENT_TYPES,
            "component ID {cid} out of range [0, {MAX_COMPONENT_TYPES})"
        );
        self.pools.get(cid as usize)?.as_ref()
    }

    /// Adds component `cid` to `entity`, returning a write guard over its
    /// byte storage.
    ///
    /// Returns `None` if `cid` is out of range or unregistered, if `entity`
    /// is out of the pool's capacity, or if the pool is currently borrowed
    /// by a live [`crate::ecs::View`] (the structural-mutation-during-view
    /// hazard spec flags as undefined behavior is turned, here, into a
    /// detectable `None` — see `SPEC_FULL.md` §2.2).
    pub fn add_component(&self, entity: Entity, cid: ComponentId) -> Option<RefMut<'_, [u8]>> {
        debug_assert!(
            entity.raw() < self.entity_counter,
            "entity {entity:?} was never minted by this world"
        );
        let cell = self.pool(cid)?;
        let pool = cell.try_borrow_mut().ok()?;
        RefMut::filter_map(pool, |p| p.add(entity)).ok()
    }

    /// Typed convenience over [`World::add_component`]: writes `value` into
    /// the newly (or already) added slot and returns nothing, matching the
    /// "caller fills the slot" contract of the raw API.
    ///
    /// Returns `false` if the add was rejected (out-of-range entity, unknown
    /// component, or a pool borrowed by a live view).
    pub fn add<C: Component>(&self, entity: Entity, cid: ComponentId, value: C) -> bool {
        let Some(mut bytes) = self.add_component(entity, cid) else {
            return false;
        };
        bytes.copy_from_slice(bytes_of(&value));
        true
    }

    /// Retrieves a read guard over component `cid`'s bytes for `entity`.
    ///
    /// Returns `None` if `cid` is unregistered/out of range, if `entity`
    /// does not have the component, or if the pool is exclusively borrowed
    /// (e.g. mid-`add`/`remove` elsewhere, which cannot happen in a single
    /// call stack but is still checked defensively).
    #[must_use]
    pub fn get_component(&self, entity: Entity, cid: ComponentId) -> Option<Ref<'_, [u8]>> {
        let cell = self.pool(cid)?;
        let pool = cell.try_borrow().ok()?;
        Ref::filter_map(pool, |p| p.get(entity)).ok()
    }

    /// Typed convenience over [`World::get_component`]: casts the bytes to
    /// `C` and returns an owned copy (a `Component` is `Copy`, so there is no
    /// reason to hold the guard open past the call).
    #[must_use]
    pub fn get<C: Component>(&self, entity: Entity, cid: ComponentId) -> Option<C> {
        let bytes = self.get_component(entity, cid)?;
        let mut value = C::zeroed();
        bytes_of_mut(&mut value).copy_from_slice(&bytes);
        Some(value)
    }

    /// Returns `true` if `entity` has component `cid`.
    #[must_use]
    pub fn has_component(&self, entity: Entity, cid: ComponentId) -> bool {
        self.pool(cid)
            .and_then(|cell| cell.try_borrow().ok())
            .is_some_and(|pool| pool.has(entity))
    }

    /// Removes component `cid` from `entity` (swap-and-pop inside the pool).
    ///
    /// No-op if `cid` is unregistered/out of range, `entity` does not have
    /// the component, or the pool is exclusively borrowed by a live view.
    pub fn remove_component(&self, entity: Entity, cid: ComponentId) {
        debug_assert!(
            cid < MAX_COMPONENT_TYPES,
            "component ID {cid} out of range [0, {MAX_COMPONENT_TYPES})"
        );
        let Some(cell) = self.pool(cid) else {
            return;
        };
        if let Ok(mut pool) = cell.try_borrow_mut() {
            pool.remove(entity);
        }
    }

    /// Used by [`crate::ecs::View`] to resolve a component ID into a pool
    /// handle once, at view-open time.
    pub(crate) fn pool_cell(&self, cid: ComponentId) -> Option<&RefCell<SparsePool>> {
        self.pool(cid)
    }
}
