use crate::rng::RandomSource;

/// Escape score compared against a 0..=255 roll. Each failed attempt in the
/// same encounter adds 30.
pub fn escape_odds(player_speed: u32, opponent_speed: u32, run_attempts: u32) -> u32 {
    let base = player_speed as u64 * 128 / opponent_speed.max(1) as u64;
    ((base + 30 * run_attempts as u64) % 256) as u32
}

/// Roll an escape. An opponent with zero speed can always be outrun.
pub fn attempt_escape(
    player_speed: u32,
    opponent_speed: u32,
    run_attempts: u32,
    rng: &mut dyn RandomSource,
) -> bool {
    if opponent_speed == 0 {
        return true;
    }
    let odds = escape_odds(player_speed, opponent_speed, run_attempts);
    let roll = rng.int_inclusive(0, 255, "escape");
    log::debug!("Escape odds {} against roll {}", odds, roll);
    odds >= roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use rstest::rstest;

    #[rstest]
    #[case(11, 9, 0, 156)]
    #[case(9, 11, 0, 104)]
    #[case(9, 11, 2, 164)]
    #[case(20, 10, 0, 0)]
    #[case(20, 10, 1, 30)]
    #[case(10, 10, 5, 22)]
    fn test_escape_odds(
        #[case] player_speed: u32,
        #[case] opponent_speed: u32,
        #[case] attempts: u32,
        #[case] expected: u32,
    ) {
        assert_eq!(escape_odds(player_speed, opponent_speed, attempts), expected);
    }

    #[test]
    fn test_escape_compares_against_roll() {
        // 104 against roll floor(0.4 * 256) = 102
        assert!(attempt_escape(9, 11, 0, &mut ScriptedRng::new(vec![0.4])));
        // 104 against 107
        assert!(!attempt_escape(9, 11, 0, &mut ScriptedRng::new(vec![0.42])));
    }

    #[test]
    fn test_zero_speed_opponent_draws_nothing() {
        let mut rng = ScriptedRng::new(vec![]);
        assert!(attempt_escape(5, 0, 0, &mut rng));
        assert_eq!(rng.consumed(), 0);
    }
}
