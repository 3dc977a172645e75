//! Per-entity scratch storage.
//!
//! [`SpriteData`] is a small key/value store attached to an entity. Game
//! scripts use it for their own bookkeeping, and the helpers keep their
//! per-entity records in it:
//!
//! - [`STATE_KEY`] – current behavior state (string)
//! - [`LAST_COL_KEY`] / [`LAST_ROW_KEY`] – last observed tile cell (integers)
//!
//! Absent keys read as `None`. The record lives and dies with the entity, so
//! despawned entities leave nothing behind.

use bevy_ecs::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// Key under which the current behavior state is stored.
pub const STATE_KEY: &str = "behaviors_state";
/// Key under which the last observed tile column is stored.
pub const LAST_COL_KEY: &str = "tile_events_last_col";
/// Key under which the last observed tile row is stored.
pub const LAST_ROW_KEY: &str = "tile_events_last_row";

#[derive(Debug, Clone, Default, Component)]
pub struct SpriteData {
    pub strings: FxHashMap<String, String>,
    pub integers: FxHashMap<String, i32>,
    pub scalars: FxHashMap<String, f32>,
    pub flags: FxHashSet<String>,
}

impl SpriteData {
    pub fn with_string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_string(key, value);
        self
    }
    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.set_flag(key);
        self
    }
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
    pub fn remove_string(&mut self, key: &str) -> Option<String> {
        self.strings.remove(key)
    }
    pub fn set_integer(&mut self, key: impl Into<String>, value: i32) {
        self.integers.insert(key.into(), value);
    }
    pub fn get_integer(&self, key: &str) -> Option<i32> {
        self.integers.get(key).copied()
    }
    pub fn remove_integer(&mut self, key: &str) -> Option<i32> {
        self.integers.remove(key)
    }
    pub fn set_scalar(&mut self, key: impl Into<String>, value: f32) {
        self.scalars.insert(key.into(), value);
    }
    pub fn get_scalar(&self, key: &str) -> Option<f32> {
        self.scalars.get(key).copied()
    }
    pub fn set_flag(&mut self, key: impl Into<String>) {
        self.flags.insert(key.into());
    }
    pub fn clear_flag(&mut self, key: &str) {
        self.flags.remove(key);
    }
    pub fn has_flag(&self, key: &str) -> bool {
        self.flags.contains(key)
    }
}

/// Run `f` on the entity's [`SpriteData`], inserting an empty one first if the
/// entity has none. Returns `None` if the entity does not exist.
pub fn with_sprite_data<R>(
    world: &mut World,
    entity: Entity,
    f: impl FnOnce(&mut SpriteData) -> R,
) -> Option<R> {
    let mut entity_mut = world.get_entity_mut(entity).ok()?;
    if !entity_mut.contains::<SpriteData>() {
        entity_mut.insert(SpriteData::default());
    }
    let mut data = entity_mut.get_mut::<SpriteData>()?;
    Some(f(&mut data))
}
