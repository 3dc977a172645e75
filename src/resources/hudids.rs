use bevy_ecs::prelude::Resource;

/// Source of ids for HUD items created without one.
#[derive(Resource, Debug, Default)]
pub struct HudIds {
    next: u32,
}

impl HudIds {
    /// A fresh id of the form `hud-<n>`.
    pub fn next_id(&mut self) -> String {
        self.next += 1;
        format!("hud-{}", self.next)
    }
}
