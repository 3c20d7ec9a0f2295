//! # sparse_ecs
//!
//! A lightweight Entity-Component-System data engine for game and
//! simulation workloads that must update hundreds of thousands to millions
//! of entities per frame. Three tightly coupled subsystems do the work:
//!
//! 1. [`memory::Arena`] — the bump-pointer allocator backing every ECS
//!    allocation.
//! 2. [`ecs::SparsePool`] — O(1) insertion, removal, lookup, and dense,
//!    cache-friendly iteration over one component type.
//! 3. [`ecs::View`] — a merge-style iterator over the intersection of
//!    several pools, driven off a "master" pool chosen by the caller.
//!
//! ## Architecture Rules
//!
//! 1. **Fixed capacity, no growth** — every pool's capacity is declared at
//!    registration time; there is no resize path.
//! 2. **Single-threaded** — the core neither spawns nor coordinates threads;
//!    see `SPEC_FULL.md` for the full Non-goals list (no multithreaded
//!    iteration, no archetype storage, no entity recycling).
//! 3. **Order your views** — the first component ID a [`ecs::View`] is
//!    opened with drives iteration; put the rarest component first.
//!
//! ## Example
//!
//! ```
//! use sparse_ecs::memory::Arena;
//! use sparse_ecs::ecs::{View, World};
//! use bytemuck::{Pod, Zeroable};
//!
//! #[derive(Clone, Copy, Default, Pod, Zeroable)]
//! #[repr(C)]
//! struct Position { x: f32, y: f32 }
//!
//! #[derive(Clone, Copy, Default, Pod, Zeroable)]
//! #[repr(C)]
//! struct Velocity { x: f32, y: f32 }
//!
//! let arena = Arena::create(1024 * 1024).unwrap();
//! let mut world = World::new(&arena, 1_000);
//! let pos = world.register_component::<Position>().unwrap();
//! let vel = world.register_component::<Velocity>().unwrap();
//!
//! let e = world.create_entity();
//! world.add(e, pos, Position { x: 0.0, y: 0.0 });
//! world.add(e, vel, Velocity { x: 1.0, y: 0.0 });
//!
//! let mut view = View::open(&world, &[vel, pos]);
//! while view.next() {
//!     let p: Position = view.get(1).unwrap();
//!     let v: Velocity = view.get(0).unwrap();
//!     view.set(1, Position { x: p.x + v.x, y: p.y + v.y });
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ecs;
pub mod error;
pub mod memory;

pub use ecs::{Component, ComponentId, Entity, SparsePool, View, World, MAX_COMPONENT_TYPES, VIEW_MAX_COMPONENTS};
pub use error::{EcsError, EcsResult};
pub use memory::Arena;
