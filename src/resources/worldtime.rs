use bevy_ecs::prelude::Resource;

/// Simulation clock, advanced once per frame by
/// [`update_world_time`](crate::systems::time::update_world_time).
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Scaled seconds since the session started.
    pub elapsed: f32,
    /// Scaled seconds covered by the current frame.
    pub delta: f32,
    /// Multiplier applied to every frame delta. `0.0` freezes movement.
    pub time_scale: f32,
    /// Frames simulated so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    /// Start a new frame lasting `dt` unscaled seconds. Negative deltas count
    /// as zero.
    pub fn advance(&mut self, dt: f32) {
        self.delta = dt.max(0.0) * self.time_scale;
        self.elapsed += self.delta;
        self.frame_count += 1;
    }
}
