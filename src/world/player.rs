use crate::critter::Critter;
use crate::world::inventory::Inventory;
use crate::world::map::{AreaId, TilePosition};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub area: AreaId,
    pub position: TilePosition,
}

/// The player's persistent state: everything a save slot holds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,

    // Every critter the player owns, in the order they were obtained.
    pub critters: Vec<Critter>,

    // Roster indices of the critters that battle, in send-out order.
    pub active_order: Vec<usize>,

    pub inventory: Inventory,
    pub money: u32,

    // None until the player first enters an area.
    pub location: Option<Location>,
    pub respawn: Option<Location>,
}

impl Player {
    pub fn new(name: impl Into<String>, money: u32) -> Self {
        Self {
            name: name.into(),
            critters: Vec::new(),
            active_order: Vec::new(),
            inventory: Inventory::new(),
            money,
            location: None,
            respawn: None,
        }
    }

    /// Append a critter to the roster, joining the active order while it has
    /// fewer than `active_max` entries. Returns the roster index.
    pub fn add_critter(&mut self, critter: Critter, active_max: usize) -> usize {
        self.critters.push(critter);
        let index = self.critters.len() - 1;
        if self.active_order.len() < active_max {
            self.active_order.push(index);
        }
        index
    }

    /// Remove a critter and shift the active order's indices past it down.
    pub fn remove_critter(&mut self, index: usize) -> Option<Critter> {
        if index >= self.critters.len() {
            return None;
        }
        let removed = self.critters.remove(index);
        self.active_order.retain(|&slot| slot != index);
        for slot in &mut self.active_order {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    pub fn critter(&self, index: usize) -> Option<&Critter> {
        self.critters.get(index)
    }

    pub fn critter_mut(&mut self, index: usize) -> Option<&mut Critter> {
        self.critters.get_mut(index)
    }

    /// First critter in the active order that can still battle.
    pub fn active_critter_index(&self) -> Option<usize> {
        self.active_order
            .iter()
            .copied()
            .find(|&index| self.critters.get(index).is_some_and(|c| !c.is_fainted()))
    }

    pub fn active_critter(&self) -> Option<&Critter> {
        self.active_critter_index().and_then(|index| self.critters.get(index))
    }

    pub fn has_usable_critter(&self) -> bool {
        self.active_critter_index().is_some()
    }

    /// Full HP and no ailments for the whole roster.
    pub fn heal_all(&mut self) {
        for critter in &mut self.critters {
            critter.heal();
        }
    }
}
