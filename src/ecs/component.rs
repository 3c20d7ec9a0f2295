//! # Component Trait
//!
//! Components are pure data: fixed-size, `Copy`, byte-castable records with
//! no behavior of their own. The storage layer underneath (see
//! [`crate::ecs::pool`]) never sees `Component` at all — it only ever sees
//! `elem_size` and raw bytes — this trait exists purely as the thin, typed
//! convenience layer described in spec's design notes: "a thin generic
//! wrapper parameterized by the component type that handles casting."

use bytemuck::{Pod, Zeroable};

/// Marker trait for types that can be stored in a [`crate::ecs::World`]
/// component pool.
///
/// Components must be:
/// - `Copy` + `Pod`: plain old data, safe to reinterpret as bytes and back.
/// - `Zeroable`: a freshly-grown pool slot can be safely zeroed.
///
/// Unlike some ECS designs, a `Component` here carries no compile-time ID:
/// component IDs are assigned at runtime by
/// [`crate::ecs::World::register_component`] (see `SPEC_FULL.md` §2.1 for
/// why the auto-ID shape was chosen over a caller-supplied one).
///
/// # Example
///
/// ```
/// use bytemuck::{Pod, Zeroable};
/// use sparse_ecs::ecs::Component;
///
/// #[derive(Clone, Copy, Default, Pod, Zeroable)]
/// #[repr(C)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// fn assert_component<T: Component>() {}
/// assert_component::<Position>();
/// ```
pub trait Component: Copy + Pod + Zeroable + Default + 'static {}

impl<T> Component for T where T: Copy + Pod + Zeroable + Default + 'static {}
