//! The game session: one player walking the map, fighting wild critters,
//! shopping and saving.
//!
//! [`World`] is the only owner of mutable session state. Battle actions go
//! through it so that an encounter's end feeds into progression, the roster
//! and the respawn flow.

pub mod inventory;
pub mod map;
pub mod merchant;
pub mod player;
pub mod save;

#[cfg(test)]
mod tests;

use crate::battle::encounter::{Encounter, EncounterOutcome};
use crate::battle::events::{BattleEvent, EventBus, Side};
use crate::battle::turn::BattleContext;
use crate::config::GameConfig;
use crate::critter::Critter;
use crate::errors::{ActionError, ActionResult, EngineResult};
use crate::progression::ProgressionEngine;
use crate::reference::ReferenceData;
use crate::rng::RandomSource;
use inventory::{BallKind, Item};
use map::{Direction, MapQuery, TileKind, TilePosition, Transition};
use merchant::Merchant;
use player::{Location, Player};
use save::{SaveSnapshot, SaveStore};
use schema::SpeciesId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What the caller shows after a battle action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TurnResult {
    /// User-facing lines, in order.
    pub log: Vec<String>,
    pub events: Vec<BattleEvent>,
    /// The player's critter fainted during this action.
    pub player_fainted: bool,
    /// Set when the action ended the encounter.
    pub outcome: Option<EncounterOutcome>,
}

impl TurnResult {
    fn from_events(events: EventBus, outcome: Option<EncounterOutcome>) -> Self {
        let log = events.format_all();
        let events = events.into_events();
        let player_fainted = events.iter().any(|event| {
            matches!(
                event,
                BattleEvent::CritterFainted {
                    side: Side::Player,
                    ..
                }
            )
        });
        Self {
            log,
            events,
            player_fainted,
            outcome,
        }
    }
}

/// Returned when an encounter starts.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EncounterHandle {
    pub opponent: String,
    pub level: u32,
    pub player_first: bool,
    pub log: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum StepResult {
    Blocked,
    Moved(TilePosition),
    /// Stepped onto a heal tile: the roster is healed and the respawn point
    /// moved here.
    Healed(TilePosition),
    /// The player now stands in another area. The caller loads its map and
    /// calls [`World::enter_area`].
    Transitioned(Transition),
    Encounter(EncounterHandle),
}

pub struct World {
    reference: Arc<ReferenceData>,
    config: GameConfig,
    merchant: Merchant,
    player: Player,
    encounter: Option<Encounter>,
}

impl World {
    /// A fresh session with an empty roster and the configured starting money.
    pub fn new(reference: Arc<ReferenceData>, config: GameConfig, player_name: &str) -> Self {
        let player = Player::new(player_name, config.starting_money);
        Self::with_player(reference, config, player)
    }

    pub fn with_player(reference: Arc<ReferenceData>, config: GameConfig, player: Player) -> Self {
        let merchant = Merchant::from_config(&config);
        Self {
            reference,
            config,
            merchant,
            player,
            encounter: None,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn merchant(&self) -> &Merchant {
        &self.merchant
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn progression(&self) -> ProgressionEngine<'_> {
        ProgressionEngine::new(&self.reference, self.config.max_moves)
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn in_encounter(&self) -> bool {
        self.encounter.is_some()
    }

    /// The critter fighting for the player, or outside battle the one that
    /// would be sent out first.
    pub fn active_critter(&self) -> Option<&Critter> {
        match &self.encounter {
            Some(encounter) => self.player.critter(encounter.active_index()),
            None => self.player.active_critter(),
        }
    }

    pub fn opponent(&self) -> Option<&Critter> {
        self.encounter.as_ref().map(Encounter::opponent)
    }

    fn ensure_idle(&self) -> ActionResult<()> {
        if self.encounter.is_some() {
            return Err(ActionError::EncounterInProgress);
        }
        Ok(())
    }

    /// Create a critter of `species_id` at `level`.
    pub fn create_critter(
        &self,
        species_id: SpeciesId,
        level: u32,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<Critter> {
        Ok(self.progression().create(species_id, level, rng)?)
    }

    /// Add a critter to the roster. Returns its roster index.
    pub fn give_critter(&mut self, critter: Critter) -> usize {
        self.player.add_critter(critter, self.config.active_roster_max)
    }

    // --- Encounters ---

    pub fn start_encounter(
        &mut self,
        opponent: Critter,
        rng: &mut dyn RandomSource,
    ) -> ActionResult<EncounterHandle> {
        self.ensure_idle()?;
        let mut events = EventBus::new();
        let encounter = Encounter::begin(opponent, &self.player, rng, &mut events)?;
        let handle = EncounterHandle {
            opponent: encounter.opponent().display_name(),
            level: encounter.opponent().level(),
            player_first: encounter.player_first(),
            log: events.format_all(),
        };
        self.encounter = Some(encounter);
        Ok(handle)
    }

    /// Use the active critter's move in slot `move_index`.
    pub fn submit_turn(
        &mut self,
        move_index: usize,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<TurnResult> {
        self.run_action(rng, |encounter, player, ctx| {
            encounter.submit_move(player, move_index, ctx)
        })
    }

    pub fn attempt_catch(
        &mut self,
        ball: BallKind,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<TurnResult> {
        self.run_action(rng, |encounter, player, ctx| {
            encounter.attempt_catch(player, ball, ctx)
        })
    }

    pub fn attempt_run(&mut self, rng: &mut dyn RandomSource) -> EngineResult<TurnResult> {
        self.run_action(rng, |encounter, player, ctx| encounter.attempt_run(player, ctx))
    }

    /// Swap the active critter for the one in `roster_index`. The opponent
    /// acts while the player switches.
    pub fn switch_active_creature(
        &mut self,
        roster_index: usize,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<TurnResult> {
        self.run_action(rng, |encounter, player, ctx| {
            encounter.switch_active(player, roster_index, ctx)
        })
    }

    fn run_action<F>(&mut self, rng: &mut dyn RandomSource, action: F) -> EngineResult<TurnResult>
    where
        F: FnOnce(&mut Encounter, &mut Player, &mut BattleContext<'_>) -> ActionResult<()>,
    {
        let encounter = self
            .encounter
            .as_mut()
            .ok_or(ActionError::NoActiveEncounter)?;
        let mut events = EventBus::new();
        {
            let mut ctx = BattleContext {
                reference: self.reference.as_ref(),
                config: &self.config,
                rng,
                events: &mut events,
            };
            action(encounter, &mut self.player, &mut ctx)?;
        }

        let outcome = encounter.outcome();
        if outcome.is_some() {
            self.conclude_encounter(&mut events)?;
        }
        Ok(TurnResult::from_events(events, outcome))
    }

    /// Tear down a finished encounter and apply its consequences.
    fn conclude_encounter(&mut self, events: &mut EventBus) -> EngineResult<()> {
        let Some(encounter) = self.encounter.take() else {
            return Ok(());
        };
        let outcome = encounter.outcome();
        let active_index = encounter.active_index();
        match outcome {
            Some(EncounterOutcome::Won) => {
                self.grant_experience(active_index, encounter.opponent(), events)?;
            }
            Some(EncounterOutcome::Caught) => {
                let caught = encounter.into_opponent();
                let index = self.give_critter(caught);
                log::info!("Added caught critter to roster slot {}", index);
            }
            _ => {}
        }

        if !self.player.has_usable_critter() {
            self.black_out(events);
        }
        Ok(())
    }

    fn grant_experience(
        &mut self,
        roster_index: usize,
        opponent: &Critter,
        events: &mut EventBus,
    ) -> EngineResult<()> {
        let engine = ProgressionEngine::new(&self.reference, self.config.max_moves);
        let Some(winner) = self.player.critters.get_mut(roster_index) else {
            return Ok(());
        };
        if winner.is_fainted() {
            return Ok(());
        }

        let before = winner.display_name();
        let report = engine.grant_experience(winner, opponent)?;
        events.push(BattleEvent::ExperienceGained {
            critter: before.clone(),
            amount: report.experience_gained,
        });
        if !report.leveled_up() {
            return Ok(());
        }
        events.push(BattleEvent::LeveledUp {
            critter: before.clone(),
            level: report.new_level,
        });
        let name = winner.display_name();
        if report.evolved_into.is_some() {
            events.push(BattleEvent::Evolved {
                from: before,
                to: name.clone(),
            });
        }
        for move_name in &report.learned_moves {
            events.push(BattleEvent::MoveLearned {
                critter: name.clone(),
                move_name: schema::pretty_name(move_name),
            });
        }
        if report.pending_move_choice {
            events.push(BattleEvent::MustForgetMove { critter: name });
        }
        Ok(())
    }

    fn black_out(&mut self, events: &mut EventBus) {
        log::info!("{} blacked out", self.player.name);
        self.respawn_player();
        events.push(BattleEvent::BlackedOut);
    }

    fn respawn_player(&mut self) {
        if let Some(respawn) = self.player.respawn {
            self.player.location = Some(respawn);
        }
        self.player.heal_all();
    }

    /// Return to the respawn point with a fully healed roster.
    pub fn respawn(&mut self) -> ActionResult<()> {
        self.ensure_idle()?;
        self.respawn_player();
        Ok(())
    }

    // --- Roster and items ---

    /// Drop one move from a critter that has learned too many.
    pub fn forget_move(&mut self, roster_index: usize, move_index: usize) -> ActionResult<String> {
        let critter = self
            .player
            .critter_mut(roster_index)
            .ok_or(ActionError::InvalidRosterSlot(roster_index))?;
        let forgotten = critter
            .forget_move(move_index)
            .ok_or(ActionError::InvalidForgetIndex(move_index))?;
        log::info!("{} forgot {}", critter.name, forgotten.name);
        Ok(forgotten.pretty_name())
    }

    /// Use a potion on a roster critter. Returns the HP restored.
    pub fn use_potion(&mut self, roster_index: usize) -> ActionResult<u32> {
        self.ensure_idle()?;
        let critter = self
            .player
            .critters
            .get(roster_index)
            .ok_or(ActionError::InvalidRosterSlot(roster_index))?;
        if critter.current_hp() == critter.max_hp() {
            return Err(ActionError::AlreadyAtFullHp(roster_index));
        }
        if !self.player.inventory.consume(Item::Potion) {
            return Err(ActionError::ItemNotAvailable(Item::Potion));
        }
        let amount = self.config.potion_heal_amount;
        let critter = &mut self.player.critters[roster_index];
        let restored = critter.restore_hp(amount);
        log::debug!("Potion restored {} HP to {}", restored, critter.name);
        Ok(restored)
    }

    pub fn buy(&mut self, item: Item, quantity: u32) -> ActionResult<u32> {
        self.ensure_idle()?;
        self.merchant.buy(&mut self.player, item, quantity)
    }

    pub fn sell_critter(&mut self, roster_index: usize) -> ActionResult<u32> {
        self.ensure_idle()?;
        self.merchant.sell_critter(&mut self.player, roster_index)
    }

    // --- Map ---

    /// Enter the area `map` describes. The very first area places the player
    /// on its start tile and becomes the respawn point; an area the player is
    /// not already standing in places them on its start tile.
    pub fn enter_area(&mut self, map: &dyn MapQuery) -> ActionResult<()> {
        self.ensure_idle()?;
        let start = Location {
            area: map.area(),
            position: map.start_tile(),
        };
        if self.player.respawn.is_none() {
            self.player.location = Some(start);
            self.player.respawn = Some(start);
            log::info!("Entered area {} for the first time", start.area);
            return Ok(());
        }
        match self.player.location {
            Some(location) if location.area == start.area => {}
            _ => self.player.location = Some(start),
        }
        log::debug!("Entered area {}", start.area);
        Ok(())
    }

    /// Take one step on `map`, the area the player is standing in.
    pub fn step(
        &mut self,
        direction: Direction,
        map: &dyn MapQuery,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<StepResult> {
        self.ensure_idle()?;
        let location = self.player.location.ok_or(ActionError::NoCurrentArea)?;
        let target = location.position.offset(direction);

        let kind = map.tile_kind(target);
        if kind == TileKind::Blocking {
            return Ok(StepResult::Blocked);
        }
        let here = Location {
            area: location.area,
            position: target,
        };
        self.player.location = Some(here);

        match kind {
            TileKind::Heal => {
                self.player.heal_all();
                self.player.respawn = Some(here);
                log::info!("Healed at {:?}", target);
                Ok(StepResult::Healed(target))
            }
            TileKind::Transition => match map.transition(target) {
                Some(transition) => {
                    self.player.location = Some(Location {
                        area: transition.area,
                        position: transition.position,
                    });
                    log::info!("Transitioning to area {}", transition.area);
                    Ok(StepResult::Transitioned(transition))
                }
                None => {
                    log::warn!("Transition tile {:?} has no destination", target);
                    Ok(StepResult::Moved(target))
                }
            },
            TileKind::Grass => match self.roll_wild_encounter(map, rng)? {
                Some(handle) => Ok(StepResult::Encounter(handle)),
                None => Ok(StepResult::Moved(target)),
            },
            TileKind::Walkable | TileKind::Blocking => Ok(StepResult::Moved(target)),
        }
    }

    fn roll_wild_encounter(
        &mut self,
        map: &dyn MapQuery,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<Option<EncounterHandle>> {
        let table = map.encounter_table();
        if table.is_empty() || !self.player.has_usable_critter() {
            return Ok(None);
        }
        if !rng.chance(self.config.encounter_probability, "wild encounter") {
            return Ok(None);
        }
        let Some(species_id) = table.pick_species(rng) else {
            return Ok(None);
        };
        let level = table
            .level
            .unwrap_or(self.config.default_encounter_level)
            .sample(rng);
        let opponent = self.create_critter(species_id, level, rng)?;
        Ok(Some(self.start_encounter(opponent, rng)?))
    }

    // --- Save slots ---

    fn check_slot(&self, slot: usize) -> ActionResult<()> {
        if slot >= self.config.save_slot_count {
            return Err(ActionError::InvalidSaveSlot(slot));
        }
        Ok(())
    }

    pub fn save(&self, store: &mut dyn SaveStore, slot: usize) -> EngineResult<()> {
        self.ensure_idle()?;
        self.check_slot(slot)?;
        store.save(slot, &SaveSnapshot::new(self.player.clone()))?;
        Ok(())
    }

    /// Replace the player with the one saved in `slot`. Returns false (and
    /// changes nothing) for an empty slot.
    pub fn load(&mut self, store: &dyn SaveStore, slot: usize) -> EngineResult<bool> {
        self.ensure_idle()?;
        self.check_slot(slot)?;
        match store.load(slot)? {
            Some(snapshot) => {
                self.player = snapshot.player;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
