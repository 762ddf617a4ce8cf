#[cfg(test)]
mod tests {
    use crate::battle::encounter::EncounterOutcome;
    use crate::battle::events::BattleEvent;
    use crate::battle::tests::common::{assert_ok, fixture_reference, TestCritterBuilder};
    use crate::errors::{ActionError, EngineError};
    use crate::rng::ScriptedRng;
    use crate::stats::experience_for_level;
    use crate::world::inventory::{BallKind, Item};
    use crate::world::map::TilePosition;
    use crate::world::player::Location;
    use crate::world::tests::common::test_world;
    use pretty_assertions::assert_eq;

    /// Creation draws: six IVs (hp 22, the rest 0) then two starting move picks.
    fn creation_rng() -> ScriptedRng {
        ScriptedRng::new(vec![0.7, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn test_five_scratches_win_and_grant_experience() {
        let mut world = test_world(Vec::new());
        let attacker = world.create_critter(4, 5, &mut creation_rng()).unwrap();
        let defender = world.create_critter(1, 5, &mut creation_rng()).unwrap();
        assert_eq!(attacker.max_hp(), 20);
        assert_eq!(defender.max_hp(), 20);
        world.give_critter(attacker);

        let mut rng = ScriptedRng::constant(0.2);
        let handle = world.start_encounter(defender, &mut rng).unwrap();
        assert!(handle.player_first);
        assert_eq!(handle.log, vec!["A wild Bulbasaur (Lv. 5) appeared!".to_string()]);

        let first = assert_ok(world.submit_turn(0, &mut rng));
        assert_eq!(world.opponent().map(|c| c.current_hp()), Some(16));
        assert_eq!(first.outcome, None);
        assert!(!first.player_fainted);
        assert!(first.log.contains(&"Charmander used Scratch!".to_string()));

        let mut last = first;
        for _ in 0..4 {
            last = assert_ok(world.submit_turn(0, &mut rng));
        }
        assert_eq!(last.outcome, Some(EncounterOutcome::Won));
        assert!(!world.in_encounter());
        assert!(last.events.contains(&BattleEvent::ExperienceGained {
            critter: "Charmander".to_string(),
            amount: 65,
        }));

        let charmander = &world.player().critters[0];
        assert_eq!(charmander.experience, 190);
        assert_eq!(charmander.level(), 5);
        assert_eq!(charmander.current_hp(), 4);
    }

    #[test]
    fn test_loss_blacks_out_to_respawn() {
        let reference = fixture_reference();
        let mut world = test_world(vec![TestCritterBuilder::new(4, 5).with_hp(1).build(&reference)]);
        let home = Location {
            area: 1,
            position: TilePosition::new(0, 0),
        };
        world.player_mut().respawn = Some(home);
        world.player_mut().location = Some(Location {
            area: 3,
            position: TilePosition::new(9, 9),
        });

        let opponent = TestCritterBuilder::new(1, 5).build(&reference);
        world.start_encounter(opponent, &mut ScriptedRng::new(vec![])).unwrap();
        let mut rng = ScriptedRng::new(vec![0.0, 0.0, 0.5, 0.2, 0.0, 0.5, 0.2]);
        let result = world.submit_turn(0, &mut rng).unwrap();

        assert_eq!(result.outcome, Some(EncounterOutcome::Lost));
        assert!(result.player_fainted);
        assert_eq!(result.events.last(), Some(&BattleEvent::BlackedOut));
        assert!(!world.in_encounter());
        assert_eq!(world.player().location, Some(home));
        assert_eq!(world.player().critters[0].current_hp(), 18);
    }

    #[test]
    fn test_caught_critter_joins_the_roster() {
        let reference = fixture_reference();
        let mut world = test_world(vec![TestCritterBuilder::new(4, 5).build(&reference)]);
        world.player_mut().inventory.add(Item::Ball(BallKind::Standard), 2);

        let opponent = TestCritterBuilder::new(16, 5).with_hp(1).build(&reference);
        world.start_encounter(opponent, &mut ScriptedRng::new(vec![])).unwrap();
        let result = world
            .attempt_catch(BallKind::Standard, &mut ScriptedRng::new(vec![0.0]))
            .unwrap();

        assert_eq!(result.outcome, Some(EncounterOutcome::Caught));
        assert!(!world.in_encounter());
        let player = world.player();
        assert_eq!(player.critters.len(), 2);
        assert_eq!(player.active_order, vec![0, 1]);
        assert_eq!(player.critters[1].name, "pidgey");
        assert_eq!(player.critters[1].current_hp(), 1);
        assert_eq!(player.inventory.count(Item::Ball(BallKind::Standard)), 1);
        // Catching grants no experience.
        assert_eq!(player.critters[0].experience, experience_for_level(5));
    }

    #[test]
    fn test_win_levels_up_and_learns_a_move() {
        let reference = fixture_reference();
        let mut charmander = TestCritterBuilder::new(4, 6).build(&reference);
        charmander.experience = experience_for_level(7) - 1;
        charmander.take_damage(4);
        let mut world = test_world(vec![charmander]);

        let opponent = TestCritterBuilder::new(1, 5).with_hp(1).build(&reference);
        world.start_encounter(opponent, &mut ScriptedRng::new(vec![])).unwrap();
        let result = world
            .submit_turn(0, &mut ScriptedRng::new(vec![0.0, 0.0, 0.5, 0.2]))
            .unwrap();

        assert_eq!(result.outcome, Some(EncounterOutcome::Won));
        assert!(result.events.contains(&BattleEvent::ExperienceGained {
            critter: "Charmander".to_string(),
            amount: 47,
        }));
        assert!(result.events.contains(&BattleEvent::LeveledUp {
            critter: "Charmander".to_string(),
            level: 7,
        }));
        assert!(result.events.contains(&BattleEvent::MoveLearned {
            critter: "Charmander".to_string(),
            move_name: "Ember".to_string(),
        }));
        let charmander = &world.player().critters[0];
        assert_eq!(charmander.current_hp(), charmander.max_hp());
        assert_eq!(charmander.moves.len(), 3);
    }

    #[test]
    fn test_overflowing_moves_block_battle_until_forgotten() {
        let reference = fixture_reference();
        let mut bulbasaur = TestCritterBuilder::new(1, 12)
            .with_moves(vec!["tackle", "growl", "vine-whip", "growth"])
            .build(&reference);
        bulbasaur.experience = experience_for_level(13) - 1;
        let mut world = test_world(vec![bulbasaur]);

        let caterpie = TestCritterBuilder::new(10, 5).with_hp(1).build(&reference);
        world.start_encounter(caterpie, &mut ScriptedRng::new(vec![])).unwrap();
        let result = world
            .submit_turn(0, &mut ScriptedRng::new(vec![0.0, 0.0, 0.5, 0.2]))
            .unwrap();
        assert!(result.events.contains(&BattleEvent::MustForgetMove {
            critter: "Bulbasaur".to_string()
        }));
        assert_eq!(world.player().critters[0].moves.len(), 6);

        let caterpie = TestCritterBuilder::new(10, 5).build(&reference);
        world.start_encounter(caterpie, &mut ScriptedRng::new(vec![])).unwrap();
        let blocked = world.submit_turn(0, &mut ScriptedRng::new(vec![]));
        assert_eq!(blocked, Err(EngineError::Action(ActionError::MoveLearningPending)));

        assert_eq!(world.forget_move(0, 9), Err(ActionError::InvalidForgetIndex(9)));
        assert_eq!(world.forget_move(4, 0), Err(ActionError::InvalidRosterSlot(4)));
        assert_eq!(world.forget_move(0, 3), Ok("Growth".to_string()));
        assert_eq!(world.forget_move(0, 1), Ok("Growl".to_string()));
        assert!(!world.player().critters[0].has_pending_move_choice(4));
    }

    #[test]
    fn test_running_ends_without_experience() {
        let reference = fixture_reference();
        let mut world = test_world(vec![TestCritterBuilder::new(4, 5).build(&reference)]);
        let opponent = TestCritterBuilder::new(1, 5).build(&reference);
        world.start_encounter(opponent, &mut ScriptedRng::new(vec![])).unwrap();

        let result = world.attempt_run(&mut ScriptedRng::new(vec![0.5])).unwrap();
        assert_eq!(result.outcome, Some(EncounterOutcome::Fled));
        assert!(!world.in_encounter());
        assert_eq!(world.player().critters[0].experience, experience_for_level(5));
    }

    #[test]
    fn test_switch_through_the_session() {
        let reference = fixture_reference();
        let mut world = test_world(vec![
            TestCritterBuilder::new(4, 5).build(&reference),
            TestCritterBuilder::new(7, 5).build(&reference),
        ]);
        let opponent = TestCritterBuilder::new(1, 5).build(&reference);
        world.start_encounter(opponent, &mut ScriptedRng::new(vec![])).unwrap();

        let result = world
            .switch_active_creature(1, &mut ScriptedRng::new(vec![0.0, 0.0, 0.5, 0.2]))
            .unwrap();
        assert_eq!(result.outcome, None);
        assert_eq!(result.log[0], "Come back, Charmander! Go, Squirtle!");
        assert_eq!(world.active_critter().map(|c| c.current_hp()), Some(15));
    }

    #[test]
    fn test_battle_actions_need_an_encounter() {
        let reference = fixture_reference();
        let mut world = test_world(vec![TestCritterBuilder::new(4, 5).build(&reference)]);
        let no_encounter = Err(EngineError::Action(ActionError::NoActiveEncounter));
        assert_eq!(world.submit_turn(0, &mut ScriptedRng::new(vec![])), no_encounter);
        assert_eq!(world.attempt_run(&mut ScriptedRng::new(vec![])), no_encounter);
        assert!(world.opponent().is_none());

        let opponent = TestCritterBuilder::new(1, 5).build(&reference);
        world.start_encounter(opponent.clone(), &mut ScriptedRng::new(vec![])).unwrap();
        assert_eq!(
            world.start_encounter(opponent, &mut ScriptedRng::new(vec![])),
            Err(ActionError::EncounterInProgress)
        );
        assert_eq!(world.use_potion(0), Err(ActionError::EncounterInProgress));
        assert_eq!(world.buy(Item::Potion, 1), Err(ActionError::EncounterInProgress));
        assert_eq!(world.sell_critter(0), Err(ActionError::EncounterInProgress));
    }

    #[test]
    fn test_potions() {
        let reference = fixture_reference();
        let mut world = test_world(vec![TestCritterBuilder::new(4, 5).with_hp(5).build(&reference)]);
        assert_eq!(world.use_potion(0), Err(ActionError::ItemNotAvailable(Item::Potion)));

        assert_eq!(world.buy(Item::Potion, 1), Ok(200));
        assert_eq!(world.player().money, 800);
        assert_eq!(world.use_potion(0), Ok(13));
        assert_eq!(world.player().critters[0].current_hp(), 18);
        assert_eq!(world.use_potion(0), Err(ActionError::AlreadyAtFullHp(0)));
        assert_eq!(world.use_potion(2), Err(ActionError::InvalidRosterSlot(2)));
    }

    #[test]
    fn test_selling_through_the_session() {
        let reference = fixture_reference();
        let mut world = test_world(vec![
            TestCritterBuilder::new(4, 5).build(&reference),
            TestCritterBuilder::new(25, 8).build(&reference),
        ]);
        assert_eq!(world.sell_critter(1), Ok(400));
        assert_eq!(world.player().money, 1400);
        assert_eq!(world.sell_critter(0), Err(ActionError::CannotSellLastCritter));
    }
}
