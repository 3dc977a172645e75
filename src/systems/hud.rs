//! HUD items bound to observable values.
//!
//! - [`add_hud_item`] – spawn a static [`HudItem`] and return its generated id
//! - [`update_hud_item`] – overwrite an item's text
//! - [`add_live`] – spawn a [`HudItem`] showing an observable and keep it in
//!   sync
//! - [`bind_to_observable`] – rebind an existing item to another observable
//! - [`remove_hud_item`] – unsubscribe and despawn an item
//! - [`find_hud_item`] – look an item up by id
//!
//! Each bound item subscribes one listener to the observable's change signal.
//! The listener rewrites the item's text with the new value. Rebinding or
//! removing the item detaches that listener first, so an item never follows
//! two observables. Despawning an item any other way detaches it too (see
//! [`HudItem`]).

use std::fmt::Display;
use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::{debug, warn};

use crate::components::hud::{Corner, Detach, HudItem};
use crate::events::observable::ObservableValue;
use crate::events::signal::Listener;
use crate::resources::hudids::HudIds;

/// Entity of the HUD item with `id`, if any.
pub fn find_hud_item(world: &mut World, id: &str) -> Option<Entity> {
    let mut query = world.query::<(Entity, &HudItem)>();
    query
        .iter(world)
        .find(|(_, item)| item.id == id)
        .map(|(entity, _)| entity)
}

/// Spawn a HUD item showing `text` and return its generated id.
///
/// The item is not bound to anything; change it with [`update_hud_item`] or
/// bind it later with [`bind_to_observable`].
pub fn add_hud_item(world: &mut World, text: impl Into<String>, corner: Corner) -> String {
    let id = world.get_resource_or_init::<HudIds>().next_id();
    world.spawn(HudItem::new(id.clone(), text, corner));
    debug!("Added HUD item '{}' at {:?}", id, corner);
    id
}

/// Replace the text of the HUD item `id`. Returns `false` if there is no such
/// item.
///
/// A bound item keeps its binding; the next change of its observable
/// overwrites this text.
pub fn update_hud_item(world: &mut World, id: &str, text: impl Into<String>) -> bool {
    let Some(entity) = find_hud_item(world, id) else {
        warn!("update_hud_item: no HUD item '{}'", id);
        return false;
    };
    match world.get_mut::<HudItem>(entity) {
        Some(mut item) => {
            item.text = text.into();
            true
        }
        None => false,
    }
}

/// Spawn a HUD item displaying `observable`, updated on every change.
pub fn add_live<T>(
    world: &mut World,
    id: impl Into<String>,
    observable: &ObservableValue<T>,
    corner: Corner,
) -> Entity
where
    T: Clone + PartialEq + Display + Send + Sync + 'static,
{
    let id = id.into();
    let item = HudItem::new(id.clone(), observable.get().to_string(), corner);
    let entity = world.spawn(item).id();
    let detach = subscribe(entity, observable);
    if let Some(mut item) = world.get_mut::<HudItem>(entity) {
        item.detach = Some(detach);
    }
    debug!("Added live HUD item '{}' at {:?}", id, corner);
    entity
}

/// Bind the HUD item `id` to `observable`, replacing its previous binding.
///
/// The text is synced immediately. Unknown ids are ignored.
pub fn bind_to_observable<T>(world: &mut World, id: &str, observable: &ObservableValue<T>)
where
    T: Clone + PartialEq + Display + Send + Sync + 'static,
{
    let Some(entity) = find_hud_item(world, id) else {
        warn!("bind_to_observable: no HUD item '{}'", id);
        return;
    };
    let detach = subscribe(entity, observable);
    if let Some(mut item) = world.get_mut::<HudItem>(entity) {
        item.unbind();
        item.text = observable.get().to_string();
        item.detach = Some(detach);
    }
}

/// Detach and despawn the HUD item `id`. Returns `true` if it existed.
pub fn remove_hud_item(world: &mut World, id: &str) -> bool {
    let Some(entity) = find_hud_item(world, id) else {
        return false;
    };
    if let Some(mut item) = world.get_mut::<HudItem>(entity) {
        item.unbind();
    }
    world.despawn(entity)
}

fn subscribe<T>(entity: Entity, observable: &ObservableValue<T>) -> Detach
where
    T: Clone + PartialEq + Display + Send + Sync + 'static,
{
    let listener = Listener::new(move |world: &mut World, value: T| {
        if let Some(mut item) = world.get_mut::<HudItem>(entity) {
            item.text = value.to_string();
        }
    });
    observable.subscribe(&listener);

    let handle = observable.clone();
    Arc::new(move || handle.on_change().remove(&listener))
}
