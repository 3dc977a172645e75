//! Destroyed entity cleanup.
//!
//! Entities marked with [`Destroyed`](crate::components::destroyed::Destroyed)
//! are invisible to the behavior and tile scans from the moment they are
//! marked. This system despawns them; it runs last in the frame.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::destroyed::Destroyed;

/// Despawn every entity marked [`Destroyed`].
pub fn despawn_destroyed_system(query: Query<Entity, With<Destroyed>>, mut commands: Commands) {
    for entity in query.iter() {
        trace!("Despawning destroyed entity {:?}", entity);
        commands.entity(entity).try_despawn();
    }
}
