//! Destruction marker.
//!
//! Game code marks an entity with [`Destroyed`] instead of despawning it in the
//! middle of a frame. Every scan treats marked entities as dead, and
//! [`despawn_destroyed_system`](crate::systems::destroyed::despawn_destroyed_system)
//! removes them at the end of the frame.

use bevy_ecs::prelude::*;

/// Marks an entity as destroyed; it is despawned at the end of the frame.
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Destroyed;

/// Returns `true` if `entity` exists and is not marked [`Destroyed`].
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world
        .get_entity(entity)
        .is_ok_and(|entity_ref| !entity_ref.contains::<Destroyed>())
}

/// Mark `entity` as destroyed. Does nothing if it no longer exists.
pub fn destroy(world: &mut World, entity: Entity) {
    if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
        entity_mut.insert(Destroyed);
    }
}
