use crate::critter::Critter;
use crate::rng::RandomSource;
use crate::world::inventory::BallKind;
use schema::Ailment;

/// Upper bound of the primary catch roll.
pub const CATCH_ROLL_MAX: u32 = 1_044_480;
/// Upper bound of each shake check roll.
pub const SHAKE_ROLL_MAX: u32 = 65_535;
pub const SHAKE_CHECKS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatchResult {
    pub caught: bool,
    /// Shake checks passed before the ball stopped (0 for an immediate catch).
    pub shakes: u8,
}

/// Catch multiplier from the target's ailments. Confusion does not count;
/// with several ailments the best bonus applies.
pub fn status_bonus(target: &Critter) -> f64 {
    target
        .ailments
        .iter()
        .map(|ailment| match ailment {
            Ailment::Sleep => 2.5,
            Ailment::Paralysis | Ailment::Poison | Ailment::Burn => 1.5,
            _ => 1.0,
        })
        .fold(1.0, f64::max)
}

/// The `a` value the primary roll is compared against.
///
/// `floor(((3*max_hp - 2*current_hp) * 4096 * capture_rate * ball_bonus) / (3*max_hp)) * status_bonus`
pub fn catch_value(
    max_hp: u32,
    current_hp: u32,
    capture_rate: u8,
    ball_bonus: f64,
    status_bonus: f64,
) -> f64 {
    let max_hp = max_hp.max(1) as f64;
    let current_hp = (current_hp as f64).min(max_hp);
    let numerator = (3.0 * max_hp - 2.0 * current_hp) * 4096.0 * capture_rate as f64 * ball_bonus;
    (numerator / (3.0 * max_hp)).floor() * status_bonus
}

/// Pass threshold for each shake check. Zero when `a` is zero.
pub fn shake_threshold(a: f64) -> u32 {
    if a <= 0.0 {
        return 0;
    }
    (65536.0 / (CATCH_ROLL_MAX as f64 / a).sqrt().sqrt()).floor() as u32
}

/// Roll a capture attempt. Draw order: the primary roll, then one draw per
/// shake check up to the first failure.
pub fn attempt_capture(
    target: &Critter,
    capture_rate: u8,
    ball: BallKind,
    rng: &mut dyn RandomSource,
) -> CatchResult {
    let a = catch_value(
        target.max_hp(),
        target.current_hp(),
        capture_rate,
        ball.bonus(),
        status_bonus(target),
    );
    let roll = rng.int_inclusive(0, CATCH_ROLL_MAX, "catch roll");
    log::debug!("Catching {}: a = {} roll = {}", target.name, a, roll);
    if a >= roll as f64 {
        return CatchResult {
            caught: true,
            shakes: 0,
        };
    }

    let b = shake_threshold(a);
    let mut shakes = 0;
    while shakes < SHAKE_CHECKS {
        if rng.int_inclusive(0, SHAKE_ROLL_MAX, "shake check") >= b {
            return CatchResult {
                caught: false,
                shakes,
            };
        }
        shakes += 1;
    }
    CatchResult {
        caught: true,
        shakes,
    }
}
