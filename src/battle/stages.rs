use crate::stats::{accuracy_stage_multiplier, stage_multiplier};
use schema::StatType;
use serde::{Deserialize, Serialize};

pub const MAX_STAGE: i8 = 6;
pub const MIN_STAGE: i8 = -6;

/// Per-combatant modifiers that live only as long as one encounter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterStages {
    pub attack: i8,
    pub defense: i8,
    pub special_attack: i8,
    pub special_defense: i8,
    pub speed: i8,
    pub accuracy: i8,
    pub evasion: i8,
    pub sleep_turns: u8,
    pub confusion_turns: u8,
}

/// Result of pushing one stage by a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageShift {
    pub old_stage: i8,
    pub new_stage: i8,
}

impl StageShift {
    /// The stage was already at the limit in the requested direction.
    pub fn blocked(&self) -> bool {
        self.old_stage == self.new_stage
    }
}

impl EncounterStages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self, stat: StatType) -> i8 {
        match stat {
            StatType::Attack => self.attack,
            StatType::Defense => self.defense,
            StatType::SpecialAttack => self.special_attack,
            StatType::SpecialDefense => self.special_defense,
            StatType::Speed => self.speed,
            StatType::Accuracy => self.accuracy,
            StatType::Evasion => self.evasion,
        }
    }

    fn stage_mut(&mut self, stat: StatType) -> &mut i8 {
        match stat {
            StatType::Attack => &mut self.attack,
            StatType::Defense => &mut self.defense,
            StatType::SpecialAttack => &mut self.special_attack,
            StatType::SpecialDefense => &mut self.special_defense,
            StatType::Speed => &mut self.speed,
            StatType::Accuracy => &mut self.accuracy,
            StatType::Evasion => &mut self.evasion,
        }
    }

    /// Add `delta` to a stage, clamped to `[-6, 6]`.
    pub fn shift(&mut self, stat: StatType, delta: i8) -> StageShift {
        let stage = self.stage_mut(stat);
        let old_stage = *stage;
        *stage = old_stage.saturating_add(delta).clamp(MIN_STAGE, MAX_STAGE);
        StageShift {
            old_stage,
            new_stage: *stage,
        }
    }

    /// Effective multiplier for `stat` at its current stage.
    pub fn multiplier(&self, stat: StatType) -> f64 {
        match stat {
            StatType::Accuracy | StatType::Evasion => accuracy_stage_multiplier(self.stage(stat)),
            _ => stage_multiplier(self.stage(stat)),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
