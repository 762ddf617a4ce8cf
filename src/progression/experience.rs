use super::ProgressionEngine;
use crate::critter::Critter;
use crate::errors::ReferenceResult;
use serde::{Deserialize, Serialize};

/// What a single experience grant did to the winner.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExperienceReport {
    pub experience_gained: u32,
    pub previous_level: u32,
    pub new_level: u32,
    pub evolved_into: Option<String>,
    pub learned_moves: Vec<String>,
    /// The winner now knows more moves than it may carry.
    pub pending_move_choice: bool,
}

impl ExperienceReport {
    pub fn leveled_up(&self) -> bool {
        self.new_level > self.previous_level
    }
}

/// Experience awarded for defeating an opponent of `opponent_level` with a
/// winner of `winner_level`.
pub fn experience_yield(opponent_base_experience: u32, opponent_level: u32, winner_level: u32) -> u32 {
    let opponent_term = 2 * opponent_level as u64 + 10;
    let numerator = ((opponent_term as f64).sqrt().round() as u64) * opponent_term * opponent_term;

    let combined_term = opponent_level as u64 + winner_level as u64 + 10;
    let denominator = ((combined_term as f64).sqrt().round() as u64) * combined_term * combined_term;

    let base = opponent_base_experience as f64 * opponent_level as f64 / 5.0;
    (base * (numerator as f64 / denominator as f64)).round() as u32 + 1
}

impl ProgressionEngine<'_> {
    /// Grant the experience for defeating `opponent` and run level-up
    /// handling: evolution, full HP, then newly unlocked moves.
    pub fn grant_experience(
        &self,
        winner: &mut Critter,
        opponent: &Critter,
    ) -> ReferenceResult<ExperienceReport> {
        let gained = experience_yield(opponent.base_experience, opponent.level(), winner.level());
        let previous_level = winner.level();
        winner.experience = winner.experience.saturating_add(gained);
        let new_level = winner.level();
        log::info!("{} gained {} experience", winner.name, gained);

        let mut report = ExperienceReport {
            experience_gained: gained,
            previous_level,
            new_level,
            ..ExperienceReport::default()
        };
        if new_level <= previous_level {
            return Ok(report);
        }

        log::info!("{} leveled up to {}", winner.name, new_level);
        if let Some(evolution) = self.evolve(winner)? {
            report.evolved_into = Some(evolution.to_name);
        }
        let max_hp = winner.max_hp();
        winner.set_hp(max_hp);
        report.learned_moves = self.learn_level_up_moves(winner, previous_level, new_level)?;
        report.pending_move_choice = winner.has_pending_move_choice(self.max_moves);
        Ok(report)
    }
}
