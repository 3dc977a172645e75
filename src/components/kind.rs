use bevy_ecs::prelude::*;

use crate::components::destroyed::Destroyed;

/// Category tag of an entity ("player", "enemy", "coin", ...).
///
/// Behaviors and tile events are registered per kind. Games usually define
/// their kinds as constants:
///
/// ```ignore
/// const PLAYER: SpriteKind = SpriteKind::new(1);
/// const GUARD: SpriteKind = SpriteKind::new(2);
/// ```
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteKind(pub u32);

impl SpriteKind {
    pub const fn new(id: u32) -> Self {
        SpriteKind(id)
    }
    pub fn id(&self) -> u32 {
        self.0
    }
}

/// Live entities of `kind`, excluding those marked [`Destroyed`].
///
/// The list is collected up front so callers can hand `&mut World` to
/// listeners while walking it.
pub fn all_of_kind(world: &mut World, kind: SpriteKind) -> Vec<Entity> {
    let mut query = world.query_filtered::<(Entity, &SpriteKind), Without<Destroyed>>();
    query
        .iter(world)
        .filter(|(_, k)| **k == kind)
        .map(|(entity, _)| entity)
        .collect()
}
