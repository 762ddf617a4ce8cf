use super::ProgressionEngine;
use crate::critter::Critter;
use crate::errors::ReferenceResult;
use crate::reference::ReferenceData;
use crate::rng::RandomSource;
use crate::stats::{experience_for_level, random_ivs};
use schema::{MoveData, SpeciesData, SpeciesId};

pub const MAX_STARTING_MOVES: usize = 4;

/// Create a fresh critter of `species` at (at least) `level`.
///
/// Draw order: IVs (hp, attack, defense, special attack, special defense,
/// speed), then one draw per sampled move.
pub fn create_critter(
    reference: &ReferenceData,
    species: &SpeciesData,
    level: u32,
    rng: &mut dyn RandomSource,
) -> ReferenceResult<Critter> {
    let uuid = rng.identity();
    let ivs = random_ivs(rng);
    let experience = species.base_experience.max(experience_for_level(level));
    let moves = sample_starting_moves(reference, species, level, rng)?;

    let critter = Critter::new(uuid, species, ivs, experience, moves);
    log::debug!(
        "Created {} at level {} with moves {:?}",
        critter.name,
        critter.level(),
        critter.moves.iter().map(|m| m.name.as_str()).collect::<Vec<_>>()
    );
    Ok(critter)
}

/// Up to four distinct level-up moves unlocked by `level`, sampled without
/// replacement.
fn sample_starting_moves(
    reference: &ReferenceData,
    species: &SpeciesData,
    level: u32,
    rng: &mut dyn RandomSource,
) -> ReferenceResult<Vec<MoveData>> {
    let mut candidates: Vec<&MoveData> = Vec::new();
    for learnable in species.moves.iter().filter(|m| m.learnable_by_level(level)) {
        let move_data = reference.move_by_id(learnable.id)?;
        if !candidates.iter().any(|known| known.id == move_data.id) {
            candidates.push(move_data);
        }
    }
    if candidates.is_empty() {
        log::warn!("{} has no moves available at level {}", species.name, level);
    }

    // Partial Fisher-Yates: the first `picks` slots end up a uniform sample.
    let picks = candidates.len().min(MAX_STARTING_MOVES);
    let last = candidates.len().saturating_sub(1) as u32;
    for i in 0..picks {
        let j = rng.int_inclusive(i as u32, last, "starting move") as usize;
        candidates.swap(i, j);
    }

    Ok(candidates.into_iter().take(picks).cloned().collect())
}

impl ProgressionEngine<'_> {
    /// `create_critter` by species id.
    pub fn create(
        &self,
        species_id: SpeciesId,
        level: u32,
        rng: &mut dyn RandomSource,
    ) -> ReferenceResult<Critter> {
        let species = self.reference.species_by_id(species_id)?;
        create_critter(self.reference, species, level, rng)
    }
}
