//! Tile enter/exit detection.
//!
//! [`tile_transition_system`] turns per-frame position polling into
//! edge-triggered events. For each monitored kind (see
//! [`TileEvents`](crate::resources::tileevents::TileEvents)) and each live
//! entity of that kind:
//!
//! 1. Compute the entity's current cell from its
//!    [`MapPosition`](crate::components::mapposition::MapPosition)
//! 2. Read the last observed cell from its
//!    [`SpriteData`](crate::components::spritedata::SpriteData). On first
//!    observation, record the cell and fire nothing
//! 3. If the cell changed, fire `exit` for the old cell, then `enter` for the
//!    new cell, then record the new cell
//!
//! A move of several cells in one frame fires one exit and one enter; the
//! cells in between are not visited.
//!
//! The last cell is stored on the entity, so despawning it discards the
//! record as well.

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::destroyed::is_alive;
use crate::components::kind::{SpriteKind, all_of_kind};
use crate::components::mapposition::MapPosition;
use crate::components::spritedata::{LAST_COL_KEY, LAST_ROW_KEY, SpriteData, with_sprite_data};
use crate::resources::tileevents::{Crossing, TileEvent, TileEvents};
use crate::resources::tilegrid::{TileCell, TileGrid};

/// Last cell recorded for `entity`, if it has been observed.
pub fn last_cell(world: &World, entity: Entity) -> Option<TileCell> {
    let data = world.get::<SpriteData>(entity)?;
    Some(TileCell {
        col: data.get_integer(LAST_COL_KEY)?,
        row: data.get_integer(LAST_ROW_KEY)?,
    })
}

fn record_cell(world: &mut World, entity: Entity, cell: TileCell) {
    with_sprite_data(world, entity, |data| {
        data.set_integer(LAST_COL_KEY, cell.col);
        data.set_integer(LAST_ROW_KEY, cell.row);
    });
}

/// Forget the last observed cell of `entity`.
///
/// The next frame treats the entity as freshly spawned. Useful after a
/// teleport that should not count as leaving the old cell.
pub fn forget_cell(world: &mut World, entity: Entity) {
    if let Some(mut data) = world.get_mut::<SpriteData>(entity) {
        data.remove_integer(LAST_COL_KEY);
        data.remove_integer(LAST_ROW_KEY);
    }
}

fn fire(world: &mut World, kind: SpriteKind, cell: TileCell, crossing: Crossing, entity: Entity) {
    let signal = world
        .get_resource::<TileEvents>()
        .and_then(|tiles| tiles.signal(kind, cell, crossing));
    if let Some(signal) = signal {
        if signal.has_listeners() {
            signal.dispatch(world, TileEvent { entity, cell });
        }
    }
}

/// Fire tile enter/exit listeners for every monitored entity whose cell
/// changed since the previous frame.
pub fn tile_transition_system(world: &mut World) {
    let Some(kinds) = world
        .get_resource::<TileEvents>()
        .map(|tiles| tiles.monitored_kinds().to_vec())
    else {
        return;
    };
    let grid = world.get_resource::<TileGrid>().copied().unwrap_or_default();

    for kind in kinds {
        for entity in all_of_kind(world, kind) {
            if !is_alive(world, entity) {
                continue;
            }
            let Some(position) = world.get::<MapPosition>(entity).copied() else {
                continue;
            };
            let current = grid.cell_of(&position);

            let Some(previous) = last_cell(world, entity) else {
                record_cell(world, entity, current);
                continue;
            };
            if previous == current {
                continue;
            }

            trace!("{:?} moved {:?} -> {:?}", entity, previous, current);
            fire(world, kind, previous, Crossing::Exit, entity);
            if !is_alive(world, entity) {
                continue;
            }
            fire(world, kind, current, Crossing::Enter, entity);
            record_cell(world, entity, current);
        }
    }
}
