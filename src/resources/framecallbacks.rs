//! Per-frame callback list.
//!
//! [`FrameCallbacks`] lets game code run a closure once per frame without
//! writing a system. Callbacks receive the scaled frame delta and run in
//! registration order, after behavior updates and before destroyed entities
//! are despawned (see [`frame_schedule`](crate::systems::frame_schedule)).

use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::events::signal::{Listener, Signal};

#[derive(Resource, Debug, Default)]
pub struct FrameCallbacks {
    signal: Arc<Signal<f32>>,
}

impl FrameCallbacks {
    /// Run `callback` every frame until it is removed.
    pub fn on_every_frame(&self, callback: &Listener<f32>) {
        self.signal.add(callback);
    }

    pub fn remove(&self, callback: &Listener<f32>) {
        self.signal.remove(callback);
    }

    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    /// Shared handle to the underlying signal.
    pub fn signal(&self) -> Arc<Signal<f32>> {
        Arc::clone(&self.signal)
    }

    pub fn reset(&self) {
        self.signal.clear();
    }
}
