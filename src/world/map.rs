use crate::rng::RandomSource;
use schema::SpeciesId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type AreaId = u32;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileKind {
    #[default]
    Walkable,
    Blocking,
    /// Tall grass: each step onto it may start a wild encounter.
    Grass,
    /// Heals the roster and becomes the respawn point.
    Heal,
    Transition,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub area: AreaId,
    pub position: TilePosition,
}

/// Normal distribution wild levels are drawn from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EncounterLevel {
    pub mean: f64,
    pub std_dev: f64,
}

impl EncounterLevel {
    /// A drawn level, rounded and never below 1.
    pub fn sample(&self, rng: &mut dyn RandomSource) -> u32 {
        let level = rng.normal(self.mean, self.std_dev, "encounter level").round();
        if level < 1.0 {
            1
        } else {
            level as u32
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EncounterTable {
    /// `(species, weight)` pairs; a species is picked with probability
    /// proportional to its weight.
    pub candidates: Vec<(SpeciesId, u32)>,
    pub level: Option<EncounterLevel>,
}

impl EncounterTable {
    pub fn total_weight(&self) -> u32 {
        self.candidates.iter().map(|(_, weight)| *weight).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_weight() == 0
    }

    pub fn pick_species(&self, rng: &mut dyn RandomSource) -> Option<SpeciesId> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        let mut roll = rng.int_inclusive(0, total - 1, "encounter species");
        for (species_id, weight) in &self.candidates {
            if roll < *weight {
                return Some(*species_id);
            }
            roll -= weight;
        }
        None
    }
}

/// What the session needs to know about the area the player stands in.
/// The tile-map layer implements this.
pub trait MapQuery {
    fn area(&self) -> AreaId;
    fn start_tile(&self) -> TilePosition;
    fn tile_kind(&self, position: TilePosition) -> TileKind;
    fn transition(&self, position: TilePosition) -> Option<Transition>;
    fn encounter_table(&self) -> &EncounterTable;
}

/// A rectangular in-memory map. Tiles not set explicitly are walkable;
/// positions outside the bounds block.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaticMap {
    pub area: AreaId,
    pub width: i32,
    pub height: i32,
    pub start: TilePosition,
    tiles: HashMap<TilePosition, TileKind>,
    transitions: HashMap<TilePosition, Transition>,
    encounters: EncounterTable,
}

impl StaticMap {
    pub fn new(area: AreaId, width: i32, height: i32, start: TilePosition) -> Self {
        Self {
            area,
            width,
            height,
            start,
            tiles: HashMap::new(),
            transitions: HashMap::new(),
            encounters: EncounterTable::default(),
        }
    }

    pub fn with_tile(mut self, position: TilePosition, kind: TileKind) -> Self {
        self.tiles.insert(position, kind);
        self
    }

    pub fn with_transition(mut self, position: TilePosition, destination: Transition) -> Self {
        self.tiles.insert(position, TileKind::Transition);
        self.transitions.insert(position, destination);
        self
    }

    pub fn with_encounters(mut self, encounters: EncounterTable) -> Self {
        self.encounters = encounters;
        self
    }

    fn in_bounds(&self, position: TilePosition) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}

impl MapQuery for StaticMap {
    fn area(&self) -> AreaId {
        self.area
    }

    fn start_tile(&self) -> TilePosition {
        self.start
    }

    fn tile_kind(&self, position: TilePosition) -> TileKind {
        if !self.in_bounds(position) {
            return TileKind::Blocking;
        }
        self.tiles.get(&position).copied().unwrap_or_default()
    }

    fn transition(&self, position: TilePosition) -> Option<Transition> {
        self.transitions.get(&position).copied()
    }

    fn encounter_table(&self) -> &EncounterTable {
        &self.encounters
    }
}
