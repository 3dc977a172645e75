//! HUD item component.
//!
//! A [`HudItem`] is a corner-anchored label whose text mirrors an
//! [`ObservableValue`](crate::events::observable::ObservableValue). Drawing is
//! left to the host; this component only keeps the text current. See
//! [`crate::systems::hud`] for creating and binding items.

use std::fmt;
use std::sync::Arc;

use bevy_ecs::lifecycle::HookContext;
use bevy_ecs::prelude::Component;
use bevy_ecs::world::DeferredWorld;

/// Screen corner a HUD item is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Corner {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Undo handle for an observable subscription.
pub type Detach = Arc<dyn Fn() + Send + Sync>;

/// Removing the component, by any means including despawn, detaches its
/// subscription.
#[derive(Component, Clone)]
#[component(on_remove = detach_on_remove)]
pub struct HudItem {
    /// Lookup key used by [`bind_to_observable`](crate::systems::hud::bind_to_observable).
    pub id: String,
    pub corner: Corner,
    /// Text currently displayed.
    pub text: String,
    /// Palette index of the background.
    pub bg_color: u8,
    /// Palette index of the text.
    pub color: u8,
    /// Removes the subscription to the currently bound observable.
    pub detach: Option<Detach>,
}

impl HudItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>, corner: Corner) -> Self {
        HudItem {
            id: id.into(),
            corner,
            text: text.into(),
            bg_color: 15,
            color: 1,
            detach: None,
        }
    }

    pub fn with_colors(mut self, bg_color: u8, color: u8) -> Self {
        self.bg_color = bg_color;
        self.color = color;
        self
    }

    /// Drop the current subscription, if any.
    pub fn unbind(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }

    pub fn is_bound(&self) -> bool {
        self.detach.is_some()
    }
}

fn detach_on_remove(world: DeferredWorld, context: HookContext) {
    let detach = world
        .get::<HudItem>(context.entity)
        .and_then(|item| item.detach.clone());
    if let Some(detach) = detach {
        detach();
    }
}

impl fmt::Debug for HudItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HudItem")
            .field("id", &self.id)
            .field("corner", &self.corner)
            .field("text", &self.text)
            .field("bg_color", &self.bg_color)
            .field("color", &self.color)
            .field("bound", &self.detach.is_some())
            .finish()
    }
}
