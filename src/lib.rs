//! spriteflow library.
//!
//! Gameplay helpers for a `bevy_ecs` world: typed signals, per-kind state
//! behaviors, tile enter/exit events, tile movement and observable-bound HUD
//! items. Exposed for the demo binary and for integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
