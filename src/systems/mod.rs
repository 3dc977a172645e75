//! Per-frame systems and the operations built on them.
//!
//! Submodules overview
//! - [`behaviors`] – `set_state`/`get_state` and the per-frame `update` scan
//! - [`destroyed`] – despawn entities marked destroyed, at frame end
//! - [`framecallbacks`] – run closures registered on `FrameCallbacks`
//! - [`hud`] – create HUD items and bind them to observables
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`tileevents`] – detect tile enter/exit and fire tile listeners
//! - [`tilemove`] – straight-line moves to a tile and teleports
//! - [`time`] – update simulation time and delta
//!
//! # Frame Order
//!
//! [`frame_schedule`] chains the systems in this order, every frame:
//!
//! 1. [`movement::movement_system`]
//! 2. [`tilemove::tile_move_system`], so arrival snaps land before tile
//!    transitions are read
//! 3. [`tileevents::tile_transition_system`]
//! 4. [`behaviors::behavior_update_system`]
//! 5. [`framecallbacks::frame_callbacks_system`]
//! 6. [`destroyed::despawn_destroyed_system`]
//!
//! Time is advanced outside the schedule with [`time::update_world_time`], as
//! the caller owns the frame delta.

use bevy_ecs::prelude::*;

pub mod behaviors;
pub mod destroyed;
pub mod framecallbacks;
pub mod hud;
pub mod movement;
pub mod tileevents;
pub mod tilemove;
pub mod time;

use crate::resources::behaviors::Behaviors;
use crate::resources::framecallbacks::FrameCallbacks;
use crate::resources::tileevents::TileEvents;
use crate::resources::tilegrid::TileGrid;
use crate::resources::worldtime::WorldTime;

/// Insert the resources the frame systems read, keeping any already present.
pub fn init_resources(world: &mut World) {
    world.init_resource::<Behaviors>();
    world.init_resource::<FrameCallbacks>();
    world.init_resource::<TileEvents>();
    world.init_resource::<TileGrid>();
    world.init_resource::<WorldTime>();
}

/// Schedule running every per-frame system once, in registration order.
pub fn frame_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            movement::movement_system,
            tilemove::tile_move_system,
            tileevents::tile_transition_system,
            behaviors::behavior_update_system,
            framecallbacks::frame_callbacks_system,
            destroyed::despawn_destroyed_system,
        )
            .chain(),
    );
    schedule
}

/// Advance time by `dt` seconds and run one frame.
pub fn run_frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
    time::update_world_time(world, dt);
    schedule.run(world);
}
