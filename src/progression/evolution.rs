use super::ProgressionEngine;
use crate::critter::Critter;
use crate::errors::ReferenceResult;
use schema::{SpeciesData, SpeciesId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionReport {
    pub from_name: String,
    pub to_id: SpeciesId,
    pub to_name: String,
}

/// Replace the species-derived fields of `critter` with those of `species`.
///
/// Identity, moves, IVs, EVs, experience, HP and ailments are left as they
/// are. HP is only re-clamped against the new maximum.
pub fn apply_evolution(critter: &mut Critter, species: &SpeciesData) {
    critter.species_id = species.id;
    critter.name = species.name.clone();
    critter.base_experience = species.base_experience;
    critter.base_stats = species.base_stats;
    critter.type_ids = species.type_ids.clone();
    critter.evolution_triggers = species.evolution_triggers.clone();
    critter.capture_rate = species.capture_rate;
    critter.flavor_text = species.flavor_text.clone();

    let hp = critter.current_hp();
    critter.set_hp(hp);
}

impl ProgressionEngine<'_> {
    /// First trigger whose minimum level the critter has reached.
    pub fn evolution_target(&self, critter: &Critter) -> Option<SpeciesId> {
        let level = critter.level();
        critter
            .evolution_triggers
            .iter()
            .find(|trigger| trigger.min_level.is_some_and(|min_level| level >= min_level))
            .map(|trigger| trigger.evolved_species_id)
    }

    /// Evolve in place if a trigger is satisfied.
    pub fn evolve(&self, critter: &mut Critter) -> ReferenceResult<Option<EvolutionReport>> {
        let Some(target) = self.evolution_target(critter) else {
            return Ok(None);
        };
        let species = self.reference.species_by_id(target)?;
        let from_name = critter.name.clone();
        apply_evolution(critter, species);
        log::info!("{} evolved into {}", from_name, species.name);
        Ok(Some(EvolutionReport {
            from_name,
            to_id: species.id,
            to_name: species.name.clone(),
        }))
    }
}
