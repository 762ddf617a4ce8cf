use crate::{MoveId, SpeciesId, Stats, TypeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum LearnMethod {
    LevelUp,
    Egg,
    Other,
}

impl fmt::Display for LearnMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LearnMethod::LevelUp => write!(f, "Level Up"),
            LearnMethod::Egg => write!(f, "Egg"),
            LearnMethod::Other => write!(f, "Other"),
        }
    }
}

/// One entry of a species' learnset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesMove {
    pub id: MoveId,
    pub name: String,
    pub learn_method: LearnMethod,
    pub level_learned_at: u32,
}

impl SpeciesMove {
    /// Learned by levelling into `level`.
    pub fn learnable_by_level(&self, level: u32) -> bool {
        self.learn_method == LearnMethod::LevelUp && self.level_learned_at <= level
    }
}

/// Only the minimum-level trigger is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionTrigger {
    pub evolved_species_id: SpeciesId,
    #[serde(default)]
    pub min_level: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub id: SpeciesId,
    pub name: String,
    pub base_experience: u32,
    pub base_stats: Stats,
    pub type_ids: Vec<TypeId>,
    #[serde(default)]
    pub moves: Vec<SpeciesMove>,
    #[serde(default)]
    pub evolution_triggers: Vec<EvolutionTrigger>,
    #[serde(default)]
    pub capture_rate: Option<u8>,
    #[serde(default)]
    pub flavor_text: Option<String>,
}

impl SpeciesData {
    /// Level-up moves learned in the half-open level window `(from, to]`.
    pub fn moves_learned_between(&self, from: u32, to: u32) -> impl Iterator<Item = &SpeciesMove> {
        self.moves.iter().filter(move |species_move| {
            species_move.learn_method == LearnMethod::LevelUp
                && species_move.level_learned_at > from
                && species_move.level_learned_at <= to
        })
    }
}
