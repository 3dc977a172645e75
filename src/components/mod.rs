//! ECS components for entities.
//!
//! Submodules overview:
//! - [`destroyed`] – marker for entities pending despawn, plus liveness checks
//! - [`hud`] – corner-anchored label kept in sync with an observable
//! - [`kind`] – category tag that behaviors and tile events are keyed by
//! - [`mapposition`] – world-space position (centre) of an entity
//! - [`rigidbody`] – velocity integrated by the movement system
//! - [`spritedata`] – per-entity key/value scratch storage
//! - [`tilemove`] – pending straight-line move toward a tile

pub mod destroyed;
pub mod hud;
pub mod kind;
pub mod mapposition;
pub mod rigidbody;
pub mod spritedata;
pub mod tilemove;
