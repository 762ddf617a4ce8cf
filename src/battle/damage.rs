use crate::battle::stages::EncounterStages;
use crate::critter::Critter;
use crate::reference::ReferenceData;
use crate::rng::RandomSource;
use schema::{MoveData, StatType, TypeId};
use serde::{Deserialize, Serialize};

/// Flat critical-hit rate; stages do not affect it.
pub const CRITICAL_HIT_CHANCE: f64 = 1.0 / 16.0;
pub const CRITICAL_HIT_MULTIPLIER: f64 = 2.0;
pub const STAB_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub damage: u32,
    /// Product of the defender types' multipliers: 0, 0.25, 0.5, 1, 2 or 4.
    pub type_factor: f64,
    pub critical: bool,
}

/// Multiplier a move of `move_type` receives against the defender's types.
/// Multiple matching types compound.
pub fn type_factor(move_type: TypeId, defender_types: &[TypeId], reference: &ReferenceData) -> f64 {
    defender_types
        .iter()
        .fold(1.0, |factor, defender_type| match reference.type_by_id(*defender_type) {
            Ok(type_data) => factor * type_data.multiplier_from(move_type),
            Err(err) => {
                log::warn!("Ignoring defender type: {}", err);
                factor
            }
        })
}

/// Damage `move_data` would deal, or `None` when the move does not run the
/// damage formula (non-damaging category or no power).
///
/// Draw order: critical-hit roll, then the random factor.
pub fn compute_damage(
    attacker: &Critter,
    defender: &Critter,
    attacker_stages: &EncounterStages,
    defender_stages: &EncounterStages,
    move_data: &MoveData,
    reference: &ReferenceData,
    rng: &mut dyn RandomSource,
) -> Option<DamageResult> {
    if !move_data.category.deals_damage() {
        return None;
    }
    let Some(power) = move_data.power else {
        log::warn!("{} is a damaging move without power", move_data.name);
        return None;
    };

    let level_term = (2 * attacker.level() / 5 + 2) as f64;
    let effective_attack = attacker.attack() as f64 * attacker_stages.multiplier(StatType::Attack);
    let effective_defense = defender.defense() as f64 * defender_stages.multiplier(StatType::Defense);
    let stat_ratio = (effective_attack / effective_defense).round();
    let base_damage = (level_term * power as f64 * stat_ratio / 50.0).round() + 2.0;

    let critical = rng.unit("critical hit") < CRITICAL_HIT_CHANCE;
    let crit_multiplier = if critical { CRITICAL_HIT_MULTIPLIER } else { 1.0 };
    let random_factor = rng.unit("damage random factor") * 0.15 + 0.85;
    let stab = if attacker.type_ids.contains(&move_data.type_id) {
        STAB_MULTIPLIER
    } else {
        1.0
    };
    let type_factor = type_factor(move_data.type_id, &defender.type_ids, reference);

    let damage = (base_damage * crit_multiplier * random_factor * stab * type_factor).round() as u32;
    log::debug!(
        "{} -> {} with {}: base {} crit {} random {:.3} stab {} type {} = {}",
        attacker.name,
        defender.name,
        move_data.name,
        base_damage,
        critical,
        random_factor,
        stab,
        type_factor,
        damage
    );

    Some(DamageResult {
        damage,
        type_factor,
        critical,
    })
}
