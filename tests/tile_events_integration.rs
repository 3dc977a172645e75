//! Integration tests for tile enter/exit detection.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test tile_events_integration
//! ```

use bevy_ecs::prelude::*;

use spriteflow::components::destroyed::destroy;
use spriteflow::components::kind::SpriteKind;
use spriteflow::components::mapposition::MapPosition;
use spriteflow::events::signal::Listener;
use spriteflow::resources::tileevents::{TileEvent, TileEvents};
use spriteflow::resources::tilegrid::{TileCell, TileGrid};
use spriteflow::systems::init_resources;
use spriteflow::systems::tileevents::{forget_cell, last_cell, tile_transition_system};

const PLAYER: SpriteKind = SpriteKind::new(1);
const ENEMY: SpriteKind = SpriteKind::new(2);

#[derive(Resource, Default)]
struct Log(Vec<String>);

fn make_world() -> World {
    let mut world = World::new();
    init_resources(&mut world);
    world.init_resource::<Log>();
    world
}

fn log_of(world: &World) -> Vec<String> {
    world.resource::<Log>().0.clone()
}

fn recorder(label: &'static str) -> Listener<TileEvent> {
    Listener::new(move |world: &mut World, event: TileEvent| {
        world.resource_mut::<Log>().0.push(format!(
            "{label}({},{})",
            event.cell.col, event.cell.row
        ));
    })
}

/// Position at the centre of `(col, row)` on the default 16 px grid.
fn at(col: i32, row: i32) -> MapPosition {
    MapPosition::new(col as f32 * 16.0 + 8.0, row as f32 * 16.0 + 8.0)
}

fn place(world: &mut World, entity: Entity, col: i32, row: i32) {
    *world.get_mut::<MapPosition>(entity).unwrap() = at(col, row);
}

fn tick(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(tile_transition_system);
    schedule.run(world);
}

#[test]
fn first_observation_fires_nothing() {
    let mut world = make_world();
    {
        let mut tiles = world.resource_mut::<TileEvents>();
        tiles.on_sprite_enter(PLAYER, TileCell::new(3, 4), &recorder("enter"));
        tiles.on_sprite_exit(PLAYER, TileCell::new(3, 4), &recorder("exit"));
    }
    let player = world.spawn((PLAYER, at(3, 4))).id();

    tick(&mut world);

    assert!(log_of(&world).is_empty());
    assert_eq!(last_cell(&world, player), Some(TileCell::new(3, 4)));
}

#[test]
fn moving_fires_exit_then_enter() {
    let mut world = make_world();
    {
        let mut tiles = world.resource_mut::<TileEvents>();
        tiles.on_sprite_exit(PLAYER, TileCell::new(3, 4), &recorder("exit"));
        tiles.on_sprite_enter(PLAYER, TileCell::new(3, 5), &recorder("enter"));
    }
    let player = world.spawn((PLAYER, at(3, 4))).id();
    tick(&mut world);

    place(&mut world, player, 3, 5);
    tick(&mut world);

    assert_eq!(log_of(&world), vec!["exit(3,4)", "enter(3,5)"]);
    assert_eq!(last_cell(&world, player), Some(TileCell::new(3, 5)));
}

#[test]
fn round_trip_fires_enter_once() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("f1"));
    let player = world.spawn((PLAYER, at(0, 0))).id();
    tick(&mut world);

    place(&mut world, player, 1, 0);
    tick(&mut world);
    place(&mut world, player, 0, 0);
    tick(&mut world);

    assert_eq!(log_of(&world), vec!["f1(1,0)"]);
}

#[test]
fn spawn_cell_enter_fires_only_on_return() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(ENEMY, TileCell::new(0, 0), &recorder("f1"));
    let enemy = world.spawn((ENEMY, at(0, 0))).id();
    tick(&mut world);
    tick(&mut world);
    assert!(log_of(&world).is_empty());

    place(&mut world, enemy, 1, 0);
    tick(&mut world);
    assert!(log_of(&world).is_empty());

    place(&mut world, enemy, 0, 0);
    tick(&mut world);
    tick(&mut world);
    assert_eq!(log_of(&world), vec!["f1(0,0)"]);
}

#[test]
fn moving_within_a_cell_fires_nothing() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_exit(PLAYER, TileCell::new(0, 0), &recorder("exit"));
    let player = world.spawn((PLAYER, MapPosition::new(1.0, 1.0))).id();
    tick(&mut world);

    *world.get_mut::<MapPosition>(player).unwrap() = MapPosition::new(15.5, 15.5);
    tick(&mut world);
    tick(&mut world);

    assert!(log_of(&world).is_empty());
}

#[test]
fn unmonitored_kind_is_ignored() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("enter"));
    let enemy = world.spawn((ENEMY, at(0, 0))).id();
    tick(&mut world);

    place(&mut world, enemy, 1, 0);
    tick(&mut world);

    assert!(log_of(&world).is_empty());
    assert_eq!(last_cell(&world, enemy), None);
}

#[test]
fn listeners_are_per_kind_on_shared_cells() {
    let mut world = make_world();
    {
        let mut tiles = world.resource_mut::<TileEvents>();
        tiles.on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("player"));
        tiles.on_sprite_enter(ENEMY, TileCell::new(1, 0), &recorder("enemy"));
    }
    let player = world.spawn((PLAYER, at(0, 0))).id();
    world.spawn((ENEMY, at(2, 2)));
    tick(&mut world);

    place(&mut world, player, 1, 0);
    tick(&mut world);

    assert_eq!(log_of(&world), vec!["player(1,0)"]);
}

#[test]
fn multi_cell_jump_fires_one_exit_and_one_enter() {
    let mut world = make_world();
    {
        let mut tiles = world.resource_mut::<TileEvents>();
        tiles.on_sprite_exit(PLAYER, TileCell::new(0, 0), &recorder("exit"));
        tiles.on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("skipped"));
        tiles.on_sprite_enter(PLAYER, TileCell::new(5, 0), &recorder("enter"));
    }
    let player = world.spawn((PLAYER, at(0, 0))).id();
    tick(&mut world);

    place(&mut world, player, 5, 0);
    tick(&mut world);

    assert_eq!(log_of(&world), vec!["exit(0,0)", "enter(5,0)"]);
}

#[test]
fn destroyed_and_despawned_entities_are_skipped() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("enter"));
    let marked = world.spawn((PLAYER, at(0, 0))).id();
    let gone = world.spawn((PLAYER, at(0, 0))).id();
    tick(&mut world);

    place(&mut world, marked, 1, 0);
    place(&mut world, gone, 1, 0);
    destroy(&mut world, marked);
    world.despawn(gone);
    tick(&mut world);

    assert!(log_of(&world).is_empty());
}

#[test]
fn exit_listener_destroying_entity_skips_enter() {
    let mut world = make_world();
    {
        let mut tiles = world.resource_mut::<TileEvents>();
        tiles.on_sprite_exit(
            PLAYER,
            TileCell::new(0, 0),
            &Listener::new(|world: &mut World, event: TileEvent| {
                destroy(world, event.entity);
            }),
        );
        tiles.on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("enter"));
    }
    let player = world.spawn((PLAYER, at(0, 0))).id();
    tick(&mut world);

    place(&mut world, player, 1, 0);
    tick(&mut world);

    assert!(log_of(&world).is_empty());
}

#[test]
fn entity_without_position_is_skipped() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(0, 0), &recorder("enter"));
    let player = world.spawn(PLAYER).id();

    tick(&mut world);

    assert!(log_of(&world).is_empty());
    assert_eq!(last_cell(&world, player), None);
}

#[test]
fn grid_size_comes_from_resource() {
    let mut world = make_world();
    world.insert_resource(TileGrid::new(32));
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("enter"));
    let player = world.spawn((PLAYER, MapPosition::new(8.0, 8.0))).id();
    tick(&mut world);

    // Still cell (0, 0) on a 32 px grid.
    *world.get_mut::<MapPosition>(player).unwrap() = MapPosition::new(24.0, 8.0);
    tick(&mut world);
    assert!(log_of(&world).is_empty());

    *world.get_mut::<MapPosition>(player).unwrap() = MapPosition::new(40.0, 8.0);
    tick(&mut world);
    assert_eq!(log_of(&world), vec!["enter(1,0)"]);
}

#[test]
fn negative_coordinates_floor_to_negative_cells() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(-1, 0), &recorder("enter"));
    let player = world.spawn((PLAYER, MapPosition::new(1.0, 1.0))).id();
    tick(&mut world);

    *world.get_mut::<MapPosition>(player).unwrap() = MapPosition::new(-1.0, 1.0);
    tick(&mut world);

    assert_eq!(log_of(&world), vec!["enter(-1,0)"]);
}

#[test]
fn forget_cell_restarts_observation() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_exit(PLAYER, TileCell::new(0, 0), &recorder("exit"));
    let player = world.spawn((PLAYER, at(0, 0))).id();
    tick(&mut world);

    place(&mut world, player, 6, 6);
    forget_cell(&mut world, player);
    tick(&mut world);

    assert!(log_of(&world).is_empty());
    assert_eq!(last_cell(&world, player), Some(TileCell::new(6, 6)));
}

#[test]
fn removed_cell_stops_firing() {
    let mut world = make_world();
    world
        .resource_mut::<TileEvents>()
        .on_sprite_enter(PLAYER, TileCell::new(1, 0), &recorder("enter"));
    let player = world.spawn((PLAYER, at(0, 0))).id();
    tick(&mut world);

    world
        .resource_mut::<TileEvents>()
        .remove_cell(PLAYER, TileCell::new(1, 0));
    place(&mut world, player, 1, 0);
    tick(&mut world);

    assert!(log_of(&world).is_empty());
}
