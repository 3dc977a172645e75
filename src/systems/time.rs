//! Frame clock.
//!
//! The caller owns the frame delta, so time is advanced outside the schedule
//! before each [`frame_schedule`](crate::systems::frame_schedule) run.
use bevy_ecs::prelude::*;
use log::trace;

use crate::resources::worldtime::WorldTime;

/// Begin a frame of `dt` unscaled seconds on the [`WorldTime`] resource,
/// inserting a default clock first if the world has none.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut time = world.get_resource_or_init::<WorldTime>();
    time.advance(dt);
    trace!("frame {} (dt {:.4})", time.frame_count, time.delta);
}
