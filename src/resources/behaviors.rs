//! Behavior handler table.
//!
//! The [`Behaviors`] resource maps `(kind, state)` pairs to three signals:
//! `enter`, `exit` and `update`. Game code registers listeners here and moves
//! entities between states with
//! [`set_state`](crate::systems::behaviors::set_state); the
//! [`behavior_update_system`](crate::systems::behaviors::behavior_update_system)
//! fires `update` every frame for every live entity of a registered kind.
//!
//! # How It Works
//!
//! 1. `on_enter`/`on_exit`/`on_update` create the definition for the pair on
//!    first use and subscribe the listener to the matching signal
//! 2. The kind is appended to the registered-kinds list (once)
//! 3. Transitions and the per-frame scan look definitions up by pair; a pair
//!    with no definition simply has nothing to fire
//!
//! Several listeners may subscribe to the same transition. Registering the
//! same [`Listener`] twice is a no-op.
//!
//! # Usage
//!
//! ```ignore
//! const GUARD: SpriteKind = SpriteKind::new(2);
//!
//! let mut behaviors = world.resource_mut::<Behaviors>();
//! behaviors.on_enter(GUARD, "chase", &Listener::new(|world, guard| {
//!     if let Some(mut body) = world.get_mut::<RigidBody>(guard) {
//!         body.set_velocity(60.0, 0.0);
//!     }
//! }));
//! behaviors.on_update(GUARD, "chase", &Listener::new(|world, guard| {
//!     // steer toward the player every frame
//! }));
//! ```
//!
//! # Table Growth
//!
//! Definitions are never removed implicitly. Long sessions that register many
//! short-lived states should call [`Behaviors::remove_state`] or
//! [`Behaviors::prune`]; [`Behaviors::reset`] clears everything.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::kind::SpriteKind;
use crate::events::signal::{Listener, Signal};

/// Which signal of a behavior definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    Enter,
    Exit,
    Update,
}

/// Signals for one `(kind, state)` pair. Listeners receive the entity.
#[derive(Debug, Default)]
pub struct BehaviorDef {
    pub enter: Arc<Signal<Entity>>,
    pub exit: Arc<Signal<Entity>>,
    pub update: Arc<Signal<Entity>>,
}

impl BehaviorDef {
    pub fn signal(&self, transition: Transition) -> &Arc<Signal<Entity>> {
        match transition {
            Transition::Enter => &self.enter,
            Transition::Exit => &self.exit,
            Transition::Update => &self.update,
        }
    }

    /// Returns `true` if none of the three signals has a listener.
    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty() && self.update.is_empty()
    }
}

/// Resource holding every behavior definition, keyed by kind then state.
#[derive(Resource, Debug, Default)]
pub struct Behaviors {
    defs: FxHashMap<SpriteKind, FxHashMap<String, BehaviorDef>>,
    kinds: Vec<SpriteKind>,
}

impl Behaviors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `listener` when an entity of `kind` enters `state`.
    pub fn on_enter(&mut self, kind: SpriteKind, state: impl Into<String>, listener: &Listener<Entity>) {
        self.register(kind, state, Transition::Enter, listener);
    }

    /// Run `listener` when an entity of `kind` leaves `state`.
    pub fn on_exit(&mut self, kind: SpriteKind, state: impl Into<String>, listener: &Listener<Entity>) {
        self.register(kind, state, Transition::Exit, listener);
    }

    /// Run `listener` every frame for each entity of `kind` in `state`.
    pub fn on_update(&mut self, kind: SpriteKind, state: impl Into<String>, listener: &Listener<Entity>) {
        self.register(kind, state, Transition::Update, listener);
    }

    /// Subscribe `listener` to one transition of `(kind, state)`.
    pub fn register(
        &mut self,
        kind: SpriteKind,
        state: impl Into<String>,
        transition: Transition,
        listener: &Listener<Entity>,
    ) {
        let state = state.into();
        debug!("Registering {:?} listener for {:?}/{}", transition, kind, state);
        self.defs
            .entry(kind)
            .or_default()
            .entry(state)
            .or_default()
            .signal(transition)
            .add(listener);
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    /// Unsubscribe `listener` from one transition of `(kind, state)`.
    ///
    /// The definition itself stays; see [`prune`](Self::prune).
    pub fn unregister(
        &self,
        kind: SpriteKind,
        state: &str,
        transition: Transition,
        listener: &Listener<Entity>,
    ) {
        if let Some(def) = self.get(kind, state) {
            def.signal(transition).remove(listener);
        }
    }

    /// Definition for `(kind, state)`, if any listener was ever registered.
    pub fn get(&self, kind: SpriteKind, state: &str) -> Option<&BehaviorDef> {
        self.defs.get(&kind)?.get(state)
    }

    /// Shared handle to one signal of `(kind, state)`.
    ///
    /// Callers clone the handle out so the resource borrow ends before
    /// dispatching.
    pub fn signal(
        &self,
        kind: SpriteKind,
        state: &str,
        transition: Transition,
    ) -> Option<Arc<Signal<Entity>>> {
        self.get(kind, state)
            .map(|def| Arc::clone(def.signal(transition)))
    }

    /// Kinds scanned by the update system, in registration order.
    pub fn registered_kinds(&self) -> &[SpriteKind] {
        &self.kinds
    }

    /// Number of `(kind, state)` definitions.
    pub fn len(&self) -> usize {
        self.defs.values().map(FxHashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the definition for `(kind, state)`. Returns `true` if it existed.
    ///
    /// A kind left with no definitions stops being scanned.
    pub fn remove_state(&mut self, kind: SpriteKind, state: &str) -> bool {
        let Some(states) = self.defs.get_mut(&kind) else {
            return false;
        };
        let removed = states.remove(state).is_some();
        if states.is_empty() {
            self.defs.remove(&kind);
            self.kinds.retain(|k| *k != kind);
        }
        removed
    }

    /// Drop every definition without listeners and stop scanning kinds that
    /// have none left. Returns the number of definitions removed.
    pub fn prune(&mut self) -> usize {
        let before = self.len();
        for states in self.defs.values_mut() {
            states.retain(|_, def| !def.is_empty());
        }
        self.defs.retain(|_, states| !states.is_empty());
        let defs = &self.defs;
        self.kinds.retain(|kind| defs.contains_key(kind));
        let removed = before - self.len();
        if removed > 0 {
            debug!("Pruned {} empty behavior definitions", removed);
        }
        removed
    }

    /// Forget every definition and registered kind.
    pub fn reset(&mut self) {
        self.defs.clear();
        self.kinds.clear();
    }
}
