//! Demo scene.
//!
//! A small headless scene wiring every helper together:
//!
//! - the player walks a rectangular tile route with
//!   [`move_to_tile`](crate::systems::tilemove::move_to_tile), driven by an
//!   `update` handler of its `"walking"` state
//! - a guard wanders in `"patrol"` and switches to `"chase"` when the player
//!   comes within [`SIGHT_TILES`] tiles, and back once it is out of range
//! - stepping on the coin tile adds to a score observable bound to a HUD item
//! - a static HUD item shows whether the guard is chasing
//! - a [`StateChangeEvent`] observer logs every transition
//! - a frame callback logs the player's cell once per simulated second
//!
//! [`setup`] builds the scene; [`run`] advances it frame by frame.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::{debug, info};

use crate::components::hud::{Corner, HudItem};
use crate::components::kind::{SpriteKind, all_of_kind};
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::components::spritedata::SpriteData;
use crate::components::tilemove::TileMove;
use crate::events::observable::ObservableValue;
use crate::events::signal::Listener;
use crate::events::statechange::StateChangeEvent;
use crate::resources::behaviors::Behaviors;
use crate::resources::config::EngineConfig;
use crate::resources::framecallbacks::FrameCallbacks;
use crate::resources::tileevents::{TileEvent, TileEvents};
use crate::resources::tilegrid::{TileCell, TileGrid};
use crate::resources::worldtime::WorldTime;
use crate::systems::behaviors::set_state;
use crate::systems::hud::{add_hud_item, add_live, find_hud_item, update_hud_item};
use crate::systems::tilemove::move_to_tile;
use crate::systems::{frame_schedule, init_resources, run_frame};

pub const PLAYER: SpriteKind = SpriteKind::new(1);
pub const GUARD: SpriteKind = SpriteKind::new(2);

/// Guard notices the player within this many tiles (Chebyshev distance).
pub const SIGHT_TILES: i32 = 3;
/// Guard gives up the chase beyond this many tiles.
pub const LOSE_TILES: i32 = 5;

const PLAYER_SPEED: f32 = 48.0;
const GUARD_SPEED: f32 = 32.0;
const COIN_VALUE: i32 = 10;
const ROUTE: [(i32, i32); 4] = [(4, 0), (4, 3), (0, 3), (0, 0)];
const COIN_CELL: TileCell = TileCell::new(4, 3);
const WAYPOINT_KEY: &str = "waypoint";

/// Seeded random source for the guard's wandering.
#[derive(Resource)]
pub struct DemoRng(pub fastrand::Rng);

/// Handles the runner needs after setup.
pub struct Scene {
    pub player: Entity,
    pub guard: Entity,
    pub score: ObservableValue<i32>,
}

fn cell_of(world: &World, entity: Entity) -> Option<TileCell> {
    let grid = world.get_resource::<TileGrid>().copied().unwrap_or_default();
    world.get::<MapPosition>(entity).map(|p| grid.cell_of(p))
}

fn tile_distance(a: TileCell, b: TileCell) -> i32 {
    (a.col - b.col).abs().max((a.row - b.row).abs())
}

fn is_idle(world: &World, entity: Entity) -> bool {
    world.get::<TileMove>(entity).is_none()
}

fn player_cell(world: &mut World) -> Option<TileCell> {
    let player = all_of_kind(world, PLAYER).into_iter().next()?;
    cell_of(world, player)
}

fn spawn_on(world: &mut World, kind: SpriteKind, cell: TileCell) -> Entity {
    let grid = world.get_resource::<TileGrid>().copied().unwrap_or_default();
    let (x, y) = grid.center_of(cell);
    world
        .spawn((kind, MapPosition::new(x, y), RigidBody::new(), SpriteData::default()))
        .id()
}

fn register_player(world: &mut World) {
    let walk = Listener::new(|world: &mut World, player: Entity| {
        if !is_idle(world, player) {
            return;
        }
        let index = world
            .get::<SpriteData>(player)
            .and_then(|data| data.get_integer(WAYPOINT_KEY))
            .unwrap_or(0);
        let (col, row) = ROUTE[index.rem_euclid(ROUTE.len() as i32) as usize];
        if let Some(mut data) = world.get_mut::<SpriteData>(player) {
            data.set_integer(WAYPOINT_KEY, index + 1);
        }
        move_to_tile(world, player, col, row, PLAYER_SPEED);
    });
    world
        .resource_mut::<Behaviors>()
        .on_update(PLAYER, "walking", &walk);
}

fn register_guard(world: &mut World) {
    let patrol = Listener::new(|world: &mut World, guard: Entity| {
        let (Some(here), Some(target)) = (cell_of(world, guard), player_cell(world)) else {
            return;
        };
        if tile_distance(here, target) <= SIGHT_TILES {
            set_state(world, guard, "chase");
            return;
        }
        if !is_idle(world, guard) {
            return;
        }
        let step = match world.get_resource_mut::<DemoRng>() {
            Some(mut rng) => rng.0.usize(0..4),
            None => 0,
        };
        let (dc, dr) = [(1, 0), (-1, 0), (0, 1), (0, -1)][step];
        move_to_tile(world, guard, here.col + dc, here.row + dr, GUARD_SPEED);
    });

    let status = add_hud_item(world, "patrolling", Corner::TopRight);

    let spotted_status = status.clone();
    let spotted = Listener::new(move |world: &mut World, guard: Entity| {
        info!("Guard {:?} spotted the player", guard);
        update_hud_item(world, &spotted_status, "chasing");
    });

    let chase = Listener::new(|world: &mut World, guard: Entity| {
        let (Some(here), Some(target)) = (cell_of(world, guard), player_cell(world)) else {
            return;
        };
        if tile_distance(here, target) > LOSE_TILES {
            set_state(world, guard, "patrol");
            return;
        }
        if is_idle(world, guard) && here != target {
            let col = here.col + (target.col - here.col).signum();
            let row = here.row + (target.row - here.row).signum();
            move_to_tile(world, guard, col, row, GUARD_SPEED);
        }
    });

    let lost = Listener::new(move |world: &mut World, guard: Entity| {
        info!("Guard {:?} lost the player", guard);
        update_hud_item(world, &status, "patrolling");
    });

    let mut behaviors = world.resource_mut::<Behaviors>();
    behaviors.on_update(GUARD, "patrol", &patrol);
    behaviors.on_enter(GUARD, "chase", &spotted);
    behaviors.on_update(GUARD, "chase", &chase);
    behaviors.on_exit(GUARD, "chase", &lost);
}

fn register_coin(world: &mut World, score: &ObservableValue<i32>) {
    let score = score.clone();
    let pickup = Listener::new(move |world: &mut World, event: TileEvent| {
        debug!("{:?} picked up the coin at {:?}", event.entity, event.cell);
        score.change_by(world, COIN_VALUE);
    });
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, COIN_CELL, &pickup);
}

fn register_progress_log(world: &mut World, fps: u32) {
    let every = u64::from(fps.max(1));
    let progress = Listener::new(move |world: &mut World, _dt: f32| {
        let frame = world.resource::<WorldTime>().frame_count;
        if frame % every == 0 {
            debug!("Frame {}: player at {:?}", frame, player_cell(world));
        }
    });
    world.resource::<FrameCallbacks>().on_every_frame(&progress);
}

fn log_state_change(trigger: On<StateChangeEvent>) {
    let event = trigger.event();
    info!(
        "{:?} changed state: {} -> {}",
        event.entity,
        event.previous.as_deref().unwrap_or("<none>"),
        event.current
    );
}

/// Build the demo scene into `world`.
pub fn setup(world: &mut World, config: &EngineConfig, seed: u64) -> Scene {
    init_resources(world);
    world.insert_resource(config.clone());
    world.insert_resource(config.tile_grid());
    world.insert_resource(DemoRng(fastrand::Rng::with_seed(seed)));
    world.add_observer(log_state_change);

    let score = ObservableValue::new(0);
    register_player(world);
    register_guard(world);
    register_coin(world, &score);
    register_progress_log(world, config.fps);
    add_live(world, "score", &score, Corner::TopLeft);

    let player = spawn_on(world, PLAYER, TileCell::new(0, 0));
    let guard = spawn_on(world, GUARD, TileCell::new(8, 3));
    set_state(world, player, "walking");
    set_state(world, guard, "patrol");

    Scene {
        player,
        guard,
        score,
    }
}

/// Run the scene for `config.frames` frames at `config.fps`.
pub fn run(world: &mut World, config: &EngineConfig, scene: &Scene) {
    let mut schedule = frame_schedule();
    let dt = config.frame_delta();
    for _ in 0..config.frames {
        run_frame(world, &mut schedule, dt);
    }

    let hud_text = find_hud_item(world, "score")
        .and_then(|entity| world.get::<HudItem>(entity))
        .map(|item| item.text.clone())
        .unwrap_or_default();
    info!(
        "Finished {} frames: player at {:?}, guard at {:?}, score {} (HUD shows \"{}\")",
        config.frames,
        cell_of(world, scene.player),
        cell_of(world, scene.guard),
        scene.score.get(),
        hud_text
    );
}
