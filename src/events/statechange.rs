//! State transition event.
//!
//! This module defines [`StateChangeEvent`], which is triggered whenever
//! [`set_state`](crate::systems::behaviors::set_state) moves an entity from one
//! behavior state to another.
//!
//! # Usage
//!
//! Observers can listen for this event to react to any transition without
//! registering per-kind behavior handlers:
//!
//! ```ignore
//! fn on_state_change(trigger: On<StateChangeEvent>) {
//!     let event = trigger.event();
//!     debug!("{:?}: {:?} -> {}", event.entity, event.previous, event.current);
//! }
//!
//! world.add_observer(on_state_change);
//! ```

use bevy_ecs::prelude::*;

/// Event emitted when an entity's behavior state changes.
///
/// Triggered after the `exit` listeners of the old state have run and the new
/// state has been written, before the `enter` listeners of the new state.
#[derive(Event, Debug, Clone)]
pub struct StateChangeEvent {
    /// The entity that transitioned.
    pub entity: Entity,
    /// The state it left, `None` for its first state.
    pub previous: Option<String>,
    /// The state it is now in.
    pub current: String,
}
