use bevy_ecs::prelude::*;

use crate::resources::framecallbacks::FrameCallbacks;
use crate::resources::worldtime::WorldTime;

/// Run every registered per-frame callback with the current frame delta.
pub fn frame_callbacks_system(world: &mut World) {
    let Some(signal) = world.get_resource::<FrameCallbacks>().map(FrameCallbacks::signal) else {
        return;
    };
    if !signal.has_listeners() {
        return;
    }
    let delta = world.get_resource::<WorldTime>().map_or(0.0, |time| time.delta);
    signal.dispatch(world, delta);
}
