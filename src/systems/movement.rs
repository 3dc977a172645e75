use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Integrate velocities into positions using the frame delta.
pub fn movement_system(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, body) in query.iter_mut() {
        if !body.is_moving() {
            continue;
        }
        position.x += body.vx * time.delta;
        position.y += body.vy * time.delta;
    }
}
