//! Kinematic body component.
//!
//! [`RigidBody`] stores the velocity that
//! [`movement_system`](crate::systems::movement::movement_system) integrates
//! into [`MapPosition`](super::mapposition::MapPosition) each frame. Collision
//! response is left to the host.

use bevy_ecs::prelude::Component;

/// Velocity in pixels per second.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct RigidBody {
    pub vx: f32,
    pub vy: f32,
}

impl RigidBody {
    /// Create a RigidBody at rest.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_velocity(&mut self, vx: f32, vy: f32) {
        self.vx = vx;
        self.vy = vy;
    }

    pub fn stop(&mut self) {
        self.set_velocity(0.0, 0.0);
    }

    pub fn is_moving(&self) -> bool {
        self.vx != 0.0 || self.vy != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rigidbody_new_is_at_rest() {
        let rb = RigidBody::new();
        assert!(!rb.is_moving());
    }

    #[test]
    fn test_set_velocity_and_stop() {
        let mut rb = RigidBody::new();
        rb.set_velocity(3.0, -4.0);
        assert!(rb.is_moving());
        assert_eq!((rb.vx, rb.vy), (3.0, -4.0));
        rb.stop();
        assert!(!rb.is_moving());
    }
}
