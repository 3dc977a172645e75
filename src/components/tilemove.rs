//! Straight-line move toward a tile.
//!
//! [`TileMove`] is attached by
//! [`move_to_tile`](crate::systems::tilemove::move_to_tile) and removed by
//! [`tile_move_system`](crate::systems::tilemove::tile_move_system) once the
//! entity arrives. The path is a straight line; walls are not avoided.

use bevy_ecs::prelude::Component;

/// Pending move toward a target point (a tile centre).
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TileMove {
    /// Target x in pixels.
    pub target_x: f32,
    /// Target y in pixels.
    pub target_y: f32,
    /// Travel speed in pixels per second.
    pub speed: f32,
    /// Distance to the target measured on the previous frame.
    pub last_distance: f32,
}

impl TileMove {
    pub fn new(target_x: f32, target_y: f32, speed: f32, distance: f32) -> Self {
        TileMove {
            target_x,
            target_y,
            speed,
            last_distance: distance,
        }
    }
}
