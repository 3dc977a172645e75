//! Tile movement helpers.
//!
//! - [`move_to_tile`] – head for a tile centre in a straight line
//! - [`teleport_to_tile`] – jump to a tile centre immediately
//! - [`tile_move_system`] – stop movers once they arrive or overshoot
//!
//! # System Flow
//!
//! `move_to_tile` sets the [`RigidBody`] velocity and attaches a [`TileMove`].
//! [`movement_system`](crate::systems::movement::movement_system) does the
//! integration. Right after it, [`tile_move_system`] measures the remaining
//! distance. Once it drops below `speed / arrival_divisor` (see
//! [`EngineConfig`](crate::resources::config::EngineConfig)), or the entity
//! has passed the target or is moving away from it, the entity is snapped onto
//! the target, stopped, and the `TileMove` removed. An overshooting step is
//! therefore never visible to the tile transition scan.

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::tilemove::TileMove;
use crate::resources::config::EngineConfig;
use crate::resources::tilegrid::{TileCell, TileGrid};

/// Closer than this, `move_to_tile` snaps instead of moving.
const SNAP_DISTANCE: f32 = 2.0;

/// Start moving `entity` toward the centre of `(col, row)` at `speed` pixels
/// per second.
///
/// Replaces any move already in progress. The entity needs a [`MapPosition`];
/// a [`RigidBody`] is added if missing.
pub fn move_to_tile(world: &mut World, entity: Entity, col: i32, row: i32, speed: f32) {
    let grid = world.get_resource::<TileGrid>().copied().unwrap_or_default();
    let (target_x, target_y) = grid.center_of(TileCell::new(col, row));

    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        warn!("move_to_tile: entity {:?} does not exist", entity);
        return;
    };
    let Some(position) = entity_mut.get::<MapPosition>().copied() else {
        warn!("move_to_tile: entity {:?} has no MapPosition", entity);
        return;
    };

    let dx = target_x - position.x;
    let dy = target_y - position.y;
    let distance = (dx * dx + dy * dy).sqrt();

    if distance < SNAP_DISTANCE || speed <= 0.0 {
        if distance < SNAP_DISTANCE {
            entity_mut.insert(MapPosition::new(target_x, target_y));
        }
        entity_mut.insert(RigidBody::new());
        entity_mut.remove::<TileMove>();
        return;
    }

    let ratio = speed / distance;
    let mut body = entity_mut.get::<RigidBody>().copied().unwrap_or_default();
    body.set_velocity(dx * ratio, dy * ratio);
    entity_mut.insert((body, TileMove::new(target_x, target_y, speed, distance)));
    debug!(
        "{:?} moving to tile ({}, {}) at {} px/s",
        entity, col, row, speed
    );
}

/// Place `entity` on the centre of `(col, row)` without moving through the
/// cells in between. Cancels any move in progress.
pub fn teleport_to_tile(world: &mut World, entity: Entity, col: i32, row: i32) {
    let grid = world.get_resource::<TileGrid>().copied().unwrap_or_default();
    let (x, y) = grid.center_of(TileCell::new(col, row));
    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        warn!("teleport_to_tile: entity {:?} does not exist", entity);
        return;
    };
    entity_mut.insert(MapPosition::new(x, y));
    if entity_mut.take::<TileMove>().is_some() {
        if let Some(mut body) = entity_mut.get_mut::<RigidBody>() {
            body.stop();
        }
    }
}

/// Stop movers that reached or overshot their target.
pub fn tile_move_system(
    mut query: Query<(Entity, &mut MapPosition, &mut RigidBody, &mut TileMove)>,
    config: Option<Res<EngineConfig>>,
    mut commands: Commands,
) {
    let divisor = config
        .map(|c| c.arrival_divisor)
        .filter(|d| *d > 0.0)
        .unwrap_or(30.0);

    for (entity, mut position, mut body, mut tile_move) in query.iter_mut() {
        // Velocity cleared elsewhere: the move was cancelled.
        if !body.is_moving() {
            commands.entity(entity).remove::<TileMove>();
            continue;
        }
        let dx = tile_move.target_x - position.x;
        let dy = tile_move.target_y - position.y;
        let distance = position.distance_to(tile_move.target_x, tile_move.target_y);
        let arrived = distance < tile_move.speed / divisor;
        let passed = dx * body.vx + dy * body.vy < 0.0;
        let receding = distance > tile_move.last_distance;

        if arrived || passed || receding {
            position.x = tile_move.target_x;
            position.y = tile_move.target_y;
            body.stop();
            commands.entity(entity).remove::<TileMove>();
        } else {
            tile_move.last_distance = distance;
        }
    }
}
