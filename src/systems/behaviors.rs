//! Behavior state machine operations and per-frame update.
//!
//! - [`set_state`] – move an entity to a new state, firing `exit` of the old
//!   state and `enter` of the new one
//! - [`get_state`] – read an entity's current state
//! - [`behavior_update_system`] – fire `update` for every live entity of every
//!   registered kind, once per frame
//!
//! Handlers are registered on the [`Behaviors`] resource. All three functions
//! take `&mut World` so listeners can mutate anything, including calling
//! [`set_state`] again; nested transitions are processed immediately.
//!
//! # Transition Order
//!
//! 1. `exit` listeners of `(kind, old_state)` run; [`get_state`] still
//!    returns the old state
//! 2. The new state is written
//! 3. A [`StateChangeEvent`] is triggered
//! 4. `enter` listeners of `(kind, new_state)` run; [`get_state`] returns the
//!    new state
//!
//! # Cost
//!
//! The update scan is O(registered kinds × entities of each kind) per frame.

use bevy_ecs::prelude::*;
use log::{trace, warn};

use crate::components::destroyed::is_alive;
use crate::components::kind::{SpriteKind, all_of_kind};
use crate::components::spritedata::{STATE_KEY, SpriteData, with_sprite_data};
use crate::events::statechange::StateChangeEvent;
use crate::resources::behaviors::{Behaviors, Transition};

/// Current behavior state of `entity`, or `None` if it was never set (or the
/// entity does not exist).
pub fn get_state(world: &World, entity: Entity) -> Option<String> {
    world
        .get::<SpriteData>(entity)
        .and_then(|data| data.get_string(STATE_KEY))
        .map(str::to_owned)
}

/// Move `entity` into `state`.
///
/// Does nothing if the entity is already in `state`, is destroyed or does not
/// exist. An entity without a [`SpriteKind`] still records its state but has
/// no listeners to fire. If an `exit` listener destroys the entity, the state
/// is left unchanged and nothing enters.
pub fn set_state(world: &mut World, entity: Entity, state: &str) {
    if !is_alive(world, entity) {
        warn!("set_state: entity {:?} is destroyed or does not exist", entity);
        return;
    }
    let previous = get_state(world, entity);
    if previous.as_deref() == Some(state) {
        return;
    }
    let kind = world.get::<SpriteKind>(entity).copied();

    if let (Some(kind), Some(old)) = (kind, previous.as_deref()) {
        fire(world, entity, kind, old, Transition::Exit);
    }

    // An exit listener may have destroyed or despawned the entity.
    if !is_alive(world, entity) {
        trace!("{:?} died leaving {:?}; {} not entered", entity, previous, state);
        return;
    }
    with_sprite_data(world, entity, |data| data.set_string(STATE_KEY, state));
    trace!("{:?}: {:?} -> {}", entity, previous, state);

    world.trigger(StateChangeEvent {
        entity,
        previous,
        current: state.to_string(),
    });

    if let Some(kind) = kind {
        fire(world, entity, kind, state, Transition::Enter);
    }
}

fn fire(world: &mut World, entity: Entity, kind: SpriteKind, state: &str, transition: Transition) {
    let signal = world
        .get_resource::<Behaviors>()
        .and_then(|behaviors| behaviors.signal(kind, state, transition));
    if let Some(signal) = signal {
        if signal.has_listeners() {
            signal.dispatch(world, entity);
        }
    }
}

/// Fire `update` listeners for the current state of every live entity of
/// every registered kind.
///
/// Entities without a state, and states without a definition, are skipped.
/// Entities destroyed by an earlier listener in the same frame are skipped
/// too.
pub fn behavior_update_system(world: &mut World) {
    let Some(kinds) = world
        .get_resource::<Behaviors>()
        .map(|behaviors| behaviors.registered_kinds().to_vec())
    else {
        return;
    };

    for kind in kinds {
        for entity in all_of_kind(world, kind) {
            if !is_alive(world, entity) {
                continue;
            }
            let Some(state) = get_state(world, entity) else {
                continue;
            };
            fire(world, entity, kind, &state, Transition::Update);
        }
    }
}
