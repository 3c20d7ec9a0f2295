//! # End-to-End Scenario Verification
//!
//! Exercises the crate purely through its public API (`sparse_ecs::*`), one
//! test per literal scenario called out for the sparse-set core:
//!
//! 1. Pool bijection survives interleaved add/remove.
//! 2. Swap-and-pop keeps the relocated element's data intact.
//! 3. A view over two required components excludes partial matches.
//! 4. Removing a required component mid-lifetime empties a previously open
//!    view's next match.
//! 5. Arena exhaustion is reported, not panicked.
//! 6. A full world of a million entities, half carrying a second component,
//!    iterates a view over both with the right result count.
//! 7. Mutating a pool a view still holds open is rejected, across separate
//!    `next()` calls, rather than corrupting the walk.

use bytemuck::{Pod, Zeroable};

use sparse_ecs::ecs::{Component, Entity, View, World};
use sparse_ecs::error::EcsError;
use sparse_ecs::memory::Arena;

#[derive(Clone, Copy, Default, Pod, Zeroable, Debug, PartialEq)]
#[repr(C)]
struct Position {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Default, Pod, Zeroable, Debug, PartialEq)]
#[repr(C)]
struct Velocity {
    x: f32,
    y: f32,
}

#[derive(Clone, Copy, Default, Pod, Zeroable, Debug, PartialEq)]
#[repr(C)]
struct Health(i32);

fn assert_is_component<C: Component>() {}

#[test]
fn scenario_1_bijection_survives_interleaved_mutation() {
    assert_is_component::<Position>();

    let arena = Arena::create(1024 * 1024).unwrap();
    let mut world = World::new(&arena, 256);
    let hp = world.register_component::<Health>().unwrap();

    let entities: Vec<Entity> = (0..20).map(|_| world.create_entity()).collect();
    for (i, &e) in entities.iter().enumerate() {
        world.add(e, hp, Health(i as i32));
    }
    for &e in entities.iter().step_by(3) {
        world.remove_component(e, hp);
    }
    world.add(entities[5], hp, Health(999));

    for (i, &e) in entities.iter().enumerate() {
        let expected = if i % 3 == 0 {
            if i == 5 {
                Some(Health(999))
            } else {
                None
            }
        } else {
            Some(Health(i as i32))
        };
        assert_eq!(world.get::<Health>(e, hp), expected, "entity {i}");
    }
}

#[test]
fn scenario_2_swap_and_pop_preserves_relocated_data() {
    let arena = Arena::create(1024 * 1024).unwrap();
    let mut world = World::new(&arena, 16);
    let pos = world.register_component::<Position>().unwrap();

    let e0 = world.create_entity();
    let e1 = world.create_entity();
    let e2 = world.create_entity();
    world.add(e0, pos, Position { x: 1.0, y: 1.0 });
    world.add(e1, pos, Position { x: 2.0, y: 2.0 });
    world.add(e2, pos, Position { x: 3.0, y: 3.0 });

    world.remove_component(e0, pos);

    assert_eq!(world.get::<Position>(e2, pos), Some(Position { x: 3.0, y: 3.0 }));
    assert_eq!(world.get::<Position>(e1, pos), Some(Position { x: 2.0, y: 2.0 }));
    assert!(!world.has_component(e0, pos));
}

#[test]
fn scenario_3_view_excludes_partial_matches() {
    let arena = Arena::create(1024 * 1024).unwrap();
    let mut world = World::new(&arena, 16);
    let pos = world.register_component::<Position>().unwrap();
    let vel = world.register_component::<Velocity>().unwrap();

    let moving = world.create_entity();
    world.add(moving, pos, Position { x: 0.0, y: 0.0 });
    world.add(moving, vel, Velocity { x: 1.0, y: 0.0 });

    let stationary = world.create_entity();
    world.add(stationary, pos, Position { x: 5.0, y: 5.0 });

    let mut seen = Vec::new();
    let mut view = View::open(&world, &[pos, vel]);
    while view.next() {
        seen.push(view.entity());
    }

    assert_eq!(seen, vec![moving]);
}

#[test]
fn scenario_4_view_empties_after_required_component_removed() {
    let arena = Arena::create(1024 * 1024).unwrap();
    let mut world = World::new(&arena, 16);
    let pos = world.register_component::<Position>().unwrap();
    let vel = world.register_component::<Velocity>().unwrap();

    let e = world.create_entity();
    world.add(e, pos, Position { x: 0.0, y: 0.0 });
    world.add(e, vel, Velocity { x: 1.0, y: 1.0 });
    world.remove_component(e, vel);

    let mut view = View::open(&world, &[pos, vel]);
    assert!(!view.next());
}

#[test]
fn scenario_5_arena_exhaustion_is_reported_not_panicked() {
    let arena = Arena::create(64).unwrap();
    let mut world = World::new(&arena, 10_000);

    let result = world.register_component::<Position>();
    assert!(matches!(result, Err(EcsError::ArenaOutOfMemory { .. })));
}

#[test]
fn scenario_6_million_entity_view_matches_half() {
    let arena = Arena::create(64 * 1024 * 1024).unwrap();
    let mut world = World::new(&arena, 1_000_000);
    let pos = world.register_component::<Position>().unwrap();
    let vel = world.register_component::<Velocity>().unwrap();

    let mut expected = 0u32;
    for i in 0..1_000_000u32 {
        let e = world.create_entity();
        world.add(e, pos, Position { x: i as f32, y: 0.0 });
        if i % 2 == 0 {
            world.add(e, vel, Velocity { x: 0.0, y: 1.0 });
            expected += 1;
        }
    }

    let mut matched = 0u32;
    let mut view = View::open(&world, &[vel, pos]);
    while view.next() {
        matched += 1;
    }

    assert_eq!(matched, expected);
}

#[test]
fn scenario_7_mutation_between_next_calls_is_rejected_not_corrupting() {
    let arena = Arena::create(1024 * 1024).unwrap();
    let mut world = World::new(&arena, 16);
    let pos = world.register_component::<Position>().unwrap();
    let vel = world.register_component::<Velocity>().unwrap();

    let e0 = world.create_entity();
    world.add(e0, pos, Position { x: 0.0, y: 0.0 });
    world.add(e0, vel, Velocity { x: 1.0, y: 0.0 });

    let e1 = world.create_entity();
    world.add(e1, pos, Position { x: 1.0, y: 1.0 });
    world.add(e1, vel, Velocity { x: 1.0, y: 0.0 });

    let mut view = View::open(&world, &[vel, pos]);
    assert!(view.next());
    assert_eq!(view.entity(), e0);

    // e0 is the entity that would relocate into e1's slot under a
    // swap-and-pop if this remove were allowed to go through while the
    // view's cursor still points into the master pool's dense array. It
    // must be rejected instead of silently proceeding.
    world.remove_component(e0, vel);

    assert!(view.next());
    assert_eq!(view.entity(), e1);
    assert!(!view.next());
    drop(view);

    // Only after the view releases its hold does the world accept the
    // mutation.
    world.remove_component(e0, vel);
    assert!(!world.has_component(e0, vel));
}
