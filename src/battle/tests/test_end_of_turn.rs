#[cfg(test)]
mod tests {
    use crate::battle::events::{BattleEvent, Side};
    use crate::battle::tests::common::{fixture_reference, TestCritterBuilder, TestDuel};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Ailment, SpeciesId};

    const PLAYER_FIRST: [Side; 2] = [Side::Player, Side::Opponent];

    #[rstest]
    // Charmander L5 has 18 HP: burn 18/16 = 1, poison 18/8 = 2.
    #[case(4, 5, Ailment::Burn, 1)]
    #[case(4, 5, Ailment::Poison, 2)]
    // Pidgey L40 has 82 HP: burn 5, poison 10.
    #[case(16, 40, Ailment::Burn, 5)]
    #[case(16, 40, Ailment::Poison, 10)]
    fn test_tick_damage(
        #[case] species_id: SpeciesId,
        #[case] level: u32,
        #[case] ailment: Ailment,
        #[case] expected: u32,
    ) {
        let reference = fixture_reference();
        let mut duel = TestDuel::new(
            TestCritterBuilder::new(species_id, level)
                .with_ailment(ailment)
                .build(&reference),
            TestCritterBuilder::new(19, 5).build(&reference),
        );
        let max_hp = duel.player.max_hp();

        let events = duel.end_of_turn(&reference, PLAYER_FIRST);
        assert_eq!(duel.player.current_hp(), max_hp - expected);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_tiny_max_hp_still_takes_one() {
        let reference = fixture_reference();
        let mut duel = TestDuel::new(
            TestCritterBuilder::new(19, 1)
                .with_ailment(Ailment::Poison)
                .build(&reference),
            TestCritterBuilder::new(19, 1).build(&reference),
        );
        // Rattata L1: 11 HP, 11 / 8 = 1.
        duel.end_of_turn(&reference, PLAYER_FIRST);
        assert_eq!(duel.player.current_hp(), 10);
    }

    #[test]
    fn test_burn_then_poison_in_turn_order() {
        let reference = fixture_reference();
        let mut duel = TestDuel::new(
            TestCritterBuilder::new(4, 5)
                .with_ailment(Ailment::Poison)
                .with_ailment(Ailment::Burn)
                .build(&reference),
            TestCritterBuilder::new(1, 5)
                .with_ailment(Ailment::Burn)
                .build(&reference),
        );

        let events = duel.end_of_turn(&reference, [Side::Opponent, Side::Player]);
        let order: Vec<(String, Ailment)> = events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::AilmentDamage { target, ailment, .. } => Some((target.clone(), *ailment)),
                _ => None,
            })
            .collect();
        assert_eq!(
            order,
            vec![
                ("Bulbasaur".to_string(), Ailment::Burn),
                ("Charmander".to_string(), Ailment::Burn),
                ("Charmander".to_string(), Ailment::Poison),
            ]
        );
    }

    #[test]
    fn test_tick_can_faint_and_skips_the_fainted() {
        let reference = fixture_reference();
        let mut duel = TestDuel::new(
            TestCritterBuilder::new(4, 5)
                .with_ailment(Ailment::Burn)
                .with_ailment(Ailment::Poison)
                .with_hp(1)
                .build(&reference),
            TestCritterBuilder::new(1, 5)
                .with_ailment(Ailment::Poison)
                .with_hp(0)
                .build(&reference),
        );

        let events = duel.end_of_turn(&reference, PLAYER_FIRST);
        assert!(duel.player.is_fainted());
        assert_eq!(
            events,
            vec![
                BattleEvent::AilmentDamage {
                    target: "Charmander".to_string(),
                    ailment: Ailment::Burn,
                    damage: 1,
                    remaining_hp: 0,
                },
                BattleEvent::CritterFainted {
                    side: Side::Player,
                    critter: "Charmander".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_non_damaging_ailments_do_not_tick() {
        let reference = fixture_reference();
        let mut duel = TestDuel::new(
            TestCritterBuilder::new(4, 5)
                .with_ailment(Ailment::Sleep)
                .with_ailment(Ailment::Paralysis)
                .with_ailment(Ailment::Confusion)
                .build(&reference),
            TestCritterBuilder::new(1, 5).build(&reference),
        );
        assert!(duel.end_of_turn(&reference, PLAYER_FIRST).is_empty());
        assert_eq!(duel.player.current_hp(), 18);
    }
}
