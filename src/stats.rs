use crate::rng::RandomSource;
use schema::Stats;

pub const MAX_IV: u32 = 31;

/// Largest level `L` with `L^3 <= experience` (medium-fast growth curve).
pub fn level_for_experience(experience: u32) -> u32 {
    let experience = experience as u64;
    let mut level = (experience as f64).cbrt() as u64;
    // Float cube roots can land one off near perfect cubes.
    while level * level * level > experience {
        level -= 1;
    }
    while (level + 1) * (level + 1) * (level + 1) <= experience {
        level += 1;
    }
    level as u32
}

/// Experience needed to sit exactly at `level`.
pub fn experience_for_level(level: u32) -> u32 {
    level.saturating_mul(level).saturating_mul(level)
}

/// Stat at `level` from its base value, IV and EV. Every division truncates,
/// in this order: `ev / 4`, then the product with the level `/ 100`.
pub fn derived_stat(base: u32, iv: u32, ev: u32, level: u32, is_hp: bool) -> u32 {
    let scaled = (2 * base + iv + ev / 4) * level / 100;
    if is_hp {
        scaled + level + 10
    } else {
        scaled + 5
    }
}

/// Six independent draws uniform in `[0, 31]`.
pub fn random_ivs(rng: &mut dyn RandomSource) -> Stats {
    Stats {
        hp: rng.int_inclusive(0, MAX_IV, "iv hp"),
        attack: rng.int_inclusive(0, MAX_IV, "iv attack"),
        defense: rng.int_inclusive(0, MAX_IV, "iv defense"),
        special_attack: rng.int_inclusive(0, MAX_IV, "iv special attack"),
        special_defense: rng.int_inclusive(0, MAX_IV, "iv special defense"),
        speed: rng.int_inclusive(0, MAX_IV, "iv speed"),
    }
}

/// Stage multiplier for attack, defense, special stats and speed.
pub fn stage_multiplier(stage: i8) -> f64 {
    let stage = stage as f64;
    if stage >= 0.0 {
        (2.0 + stage) / 2.0
    } else {
        2.0 / (2.0 - stage)
    }
}

/// Stage multiplier for accuracy and evasion.
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    let stage = stage as f64;
    if stage >= 0.0 {
        (3.0 + stage) / 3.0
    } else {
        3.0 / (3.0 - stage)
    }
}
