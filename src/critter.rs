use crate::stats::{derived_stat, level_for_experience};
use schema::{
    Ailment, EvolutionTrigger, MoveData, SpeciesData, SpeciesId, Stats, TypeId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A live, owned creature.
///
/// Species fields are copied in by value at creation (and replaced on
/// evolution). Level and every battle stat are derived from experience,
/// IVs and EVs on demand; only `current_hp` and `experience` are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Critter {
    pub uuid: Uuid,
    pub species_id: SpeciesId,
    pub name: String,
    pub base_experience: u32,
    pub base_stats: Stats,
    pub type_ids: Vec<TypeId>,
    pub evolution_triggers: Vec<EvolutionTrigger>,
    pub capture_rate: Option<u8>,
    pub flavor_text: Option<String>,
    pub ivs: Stats,
    pub evs: Stats,
    current_hp: u32,
    pub experience: u32,
    pub moves: Vec<MoveData>,
    pub ailments: BTreeSet<Ailment>,
}

impl Critter {
    /// A critter at full HP with the given individual values and moves.
    pub fn new(
        uuid: Uuid,
        species: &SpeciesData,
        ivs: Stats,
        experience: u32,
        moves: Vec<MoveData>,
    ) -> Self {
        let mut critter = Self {
            uuid,
            species_id: species.id,
            name: species.name.clone(),
            base_experience: species.base_experience,
            base_stats: species.base_stats,
            type_ids: species.type_ids.clone(),
            evolution_triggers: species.evolution_triggers.clone(),
            capture_rate: species.capture_rate,
            flavor_text: species.flavor_text.clone(),
            ivs,
            evs: Stats::default(),
            current_hp: 0,
            experience,
            moves,
            ailments: BTreeSet::new(),
        };
        critter.current_hp = critter.max_hp();
        critter
    }

    pub fn level(&self) -> u32 {
        level_for_experience(self.experience)
    }

    pub fn max_hp(&self) -> u32 {
        derived_stat(self.base_stats.hp, self.ivs.hp, self.evs.hp, self.level(), true)
    }

    pub fn attack(&self) -> u32 {
        derived_stat(self.base_stats.attack, self.ivs.attack, self.evs.attack, self.level(), false)
    }

    pub fn defense(&self) -> u32 {
        derived_stat(self.base_stats.defense, self.ivs.defense, self.evs.defense, self.level(), false)
    }

    pub fn special_attack(&self) -> u32 {
        derived_stat(
            self.base_stats.special_attack,
            self.ivs.special_attack,
            self.evs.special_attack,
            self.level(),
            false,
        )
    }

    pub fn special_defense(&self) -> u32 {
        derived_stat(
            self.base_stats.special_defense,
            self.ivs.special_defense,
            self.evs.special_defense,
            self.level(),
            false,
        )
    }

    pub fn speed(&self) -> u32 {
        derived_stat(self.base_stats.speed, self.ivs.speed, self.evs.speed, self.level(), false)
    }

    pub fn current_hp(&self) -> u32 {
        self.current_hp
    }

    /// Set HP directly, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: u32) {
        self.current_hp = hp.min(self.max_hp());
    }

    /// Apply damage; HP never goes below zero. Returns the damage actually taken.
    pub fn take_damage(&mut self, damage: u32) -> u32 {
        let taken = damage.min(self.current_hp);
        self.current_hp -= taken;
        taken
    }

    /// Restore HP, clamped to max. Returns the amount actually restored.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount).min(self.max_hp());
        self.current_hp - before
    }

    /// Full HP and no ailments.
    pub fn heal(&mut self) {
        self.current_hp = self.max_hp();
        self.ailments.clear();
    }

    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }

    pub fn has_ailment(&self, ailment: Ailment) -> bool {
        self.ailments.contains(&ailment)
    }

    /// Returns false if the ailment was already present.
    pub fn add_ailment(&mut self, ailment: Ailment) -> bool {
        self.ailments.insert(ailment)
    }

    pub fn remove_ailment(&mut self, ailment: Ailment) -> bool {
        self.ailments.remove(&ailment)
    }

    pub fn knows_move(&self, move_data: &MoveData) -> bool {
        self.moves.iter().any(|known| known.id == move_data.id)
    }

    pub fn forget_move(&mut self, index: usize) -> Option<MoveData> {
        if index < self.moves.len() {
            Some(self.moves.remove(index))
        } else {
            None
        }
    }

    /// More moves than may be carried: the owner must pick one to forget.
    pub fn has_pending_move_choice(&self, max_moves: usize) -> bool {
        self.moves.len() > max_moves
    }

    /// Sale price.
    pub fn worth(&self, per_level: u32) -> u32 {
        per_level * self.level()
    }

    /// Display name, e.g. "Charmander".
    pub fn display_name(&self) -> String {
        schema::pretty_name(&self.name)
    }
}
