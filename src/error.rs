//! # Error Types
//!
//! Caller-visible failure modes of the core. Contract violations by the host
//! (out-of-range component IDs, stale entity IDs) are reported with
//! `debug_assert!` at the call site instead of a typed error, matching the
//! "assertion for programmer errors" disposition in the core's error
//! taxonomy; only the conditions the taxonomy marks as caller-visible land
//! here.

use thiserror::Error;

/// Errors that can occur while creating or allocating from an [`crate::memory::Arena`]
/// or while registering component types on a [`crate::ecs::World`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcsError {
    /// The arena's backing allocation could not be acquired from the OS.
    #[error("failed to create arena of {requested_bytes} bytes")]
    ArenaCreation {
        /// The byte size that was requested.
        requested_bytes: usize,
    },

    /// The bump cursor would advance past the arena's declared capacity.
    #[error(
        "arena out of memory: cursor {used} + padding {padding} + {requested} bytes > capacity {capacity}"
    )]
    ArenaOutOfMemory {
        /// Bytes already handed out before this request.
        used: usize,
        /// Alignment padding this request would have needed.
        padding: usize,
        /// Bytes this request asked for.
        requested: usize,
        /// Total arena capacity.
        capacity: usize,
    },

    /// `World::register_component` was called after `MAX_COMPONENT_TYPES`
    /// component types were already registered.
    #[error("cannot register component: all {max} component type slots are taken")]
    TooManyComponentTypes {
        /// The configured component type ceiling.
        max: u32,
    },
}

/// Result type for fallible arena and registration operations.
pub type EcsResult<T> = Result<T, EcsError>;
