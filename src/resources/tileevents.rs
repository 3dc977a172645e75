//! Tile enter/exit handler table.
//!
//! The [`TileEvents`] resource maps `(kind, cell)` pairs to an `enter` and an
//! `exit` signal. The
//! [`tile_transition_system`](crate::systems::tileevents::tile_transition_system)
//! polls the cell of every live entity of a monitored kind each frame and
//! fires these signals when the cell changes.
//!
//! # Usage
//!
//! ```ignore
//! let mut tiles = world.resource_mut::<TileEvents>();
//! tiles.on_sprite_enter(PLAYER, TileCell::new(4, 2), &Listener::new(|world, event| {
//!     info!("{:?} stepped on {:?}", event.entity, event.cell);
//! }));
//! ```
//!
//! # Table Growth
//!
//! Entries are kept until [`TileEvents::remove_cell`], [`TileEvents::prune`]
//! or [`TileEvents::reset`] drops them.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;

use crate::components::kind::SpriteKind;
use crate::events::signal::{Listener, Signal};
use crate::resources::tilegrid::TileCell;

/// Composite key of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub kind: SpriteKind,
    pub cell: TileCell,
}

/// Payload delivered to tile listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileEvent {
    /// The entity that crossed the boundary.
    pub entity: Entity,
    /// The cell being entered or exited.
    pub cell: TileCell,
}

/// Direction of a boundary crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Crossing {
    Enter,
    Exit,
}

#[derive(Debug, Default)]
pub struct TileSignals {
    pub enter: Arc<Signal<TileEvent>>,
    pub exit: Arc<Signal<TileEvent>>,
}

impl TileSignals {
    pub fn signal(&self, crossing: Crossing) -> &Arc<Signal<TileEvent>> {
        match crossing {
            Crossing::Enter => &self.enter,
            Crossing::Exit => &self.exit,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }
}

/// Resource holding every tile enter/exit registration.
#[derive(Resource, Debug, Default)]
pub struct TileEvents {
    entries: FxHashMap<TileKey, TileSignals>,
    kinds: Vec<SpriteKind>,
}

impl TileEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `listener` when an entity of `kind` moves into `cell`.
    pub fn on_sprite_enter(&mut self, kind: SpriteKind, cell: TileCell, listener: &Listener<TileEvent>) {
        self.register(kind, cell, Crossing::Enter, listener);
    }

    /// Run `listener` when an entity of `kind` moves out of `cell`.
    pub fn on_sprite_exit(&mut self, kind: SpriteKind, cell: TileCell, listener: &Listener<TileEvent>) {
        self.register(kind, cell, Crossing::Exit, listener);
    }

    pub fn register(
        &mut self,
        kind: SpriteKind,
        cell: TileCell,
        crossing: Crossing,
        listener: &Listener<TileEvent>,
    ) {
        debug!("Registering {:?} listener for {:?} at {:?}", crossing, kind, cell);
        self.entries
            .entry(TileKey { kind, cell })
            .or_default()
            .signal(crossing)
            .add(listener);
        if !self.kinds.contains(&kind) {
            self.kinds.push(kind);
        }
    }

    pub fn unregister(
        &self,
        kind: SpriteKind,
        cell: TileCell,
        crossing: Crossing,
        listener: &Listener<TileEvent>,
    ) {
        if let Some(entry) = self.entries.get(&TileKey { kind, cell }) {
            entry.signal(crossing).remove(listener);
        }
    }

    pub fn get(&self, kind: SpriteKind, cell: TileCell) -> Option<&TileSignals> {
        self.entries.get(&TileKey { kind, cell })
    }

    /// Shared handle to one signal of `(kind, cell)`.
    pub fn signal(
        &self,
        kind: SpriteKind,
        cell: TileCell,
        crossing: Crossing,
    ) -> Option<Arc<Signal<TileEvent>>> {
        self.get(kind, cell)
            .map(|entry| Arc::clone(entry.signal(crossing)))
    }

    /// Kinds polled each frame, in registration order.
    pub fn monitored_kinds(&self) -> &[SpriteKind] {
        &self.kinds
    }

    pub fn is_monitored(&self, kind: SpriteKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop the entry for `(kind, cell)`. Returns `true` if it existed.
    ///
    /// A kind left with no entries stops being polled.
    pub fn remove_cell(&mut self, kind: SpriteKind, cell: TileCell) -> bool {
        let removed = self.entries.remove(&TileKey { kind, cell }).is_some();
        if removed && !self.entries.keys().any(|key| key.kind == kind) {
            self.kinds.retain(|k| *k != kind);
        }
        removed
    }

    /// Drop entries without listeners and stop polling kinds that have none
    /// left. Returns the number of entries removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_empty());
        let entries = &self.entries;
        self.kinds
            .retain(|kind| entries.keys().any(|key| key.kind == *kind));
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!("Pruned {} empty tile event entries", removed);
        }
        removed
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.kinds.clear();
    }
}
