use crate::battle::tests::common::{create_test_player, fixture_reference};
use crate::config::GameConfig;
use crate::critter::Critter;
use crate::world::map::{EncounterLevel, EncounterTable, StaticMap, TileKind, TilePosition, Transition};
use crate::world::World;
use std::sync::Arc;

/// Area 1 of [`starter_map`]: start at (2, 2), a wall above it, grass to the
/// right, a heal tile to the left and a doorway to area 2 below.
pub const START: TilePosition = TilePosition::new(2, 2);
pub const WALL: TilePosition = TilePosition::new(2, 1);
pub const GRASS: TilePosition = TilePosition::new(3, 2);
pub const HEAL: TilePosition = TilePosition::new(1, 2);
pub const DOOR: TilePosition = TilePosition::new(2, 3);

pub fn starter_map() -> StaticMap {
    StaticMap::new(1, 5, 5, START)
        .with_tile(WALL, TileKind::Blocking)
        .with_tile(GRASS, TileKind::Grass)
        .with_tile(HEAL, TileKind::Heal)
        .with_transition(
            DOOR,
            Transition {
                area: 2,
                position: TilePosition::new(4, 0),
            },
        )
        .with_encounters(EncounterTable {
            candidates: vec![(16, 1)],
            level: Some(EncounterLevel {
                mean: 4.0,
                std_dev: 1.0,
            }),
        })
}

/// A session over the fixture data whose player owns `critters`.
pub fn test_world(critters: Vec<Critter>) -> World {
    let mut player = create_test_player(critters);
    player.money = 1000;
    World::with_player(Arc::new(fixture_reference()), GameConfig::default(), player)
}
