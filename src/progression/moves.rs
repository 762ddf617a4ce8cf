use super::ProgressionEngine;
use crate::critter::Critter;
use crate::errors::ReferenceResult;

impl ProgressionEngine<'_> {
    /// Append the current species' level-up moves unlocked in
    /// `(previous_level, new_level]`, skipping moves already known.
    /// Returns the names of the moves learned. The list may grow past the
    /// move cap; the owner resolves that with `Critter::forget_move`.
    pub fn learn_level_up_moves(
        &self,
        critter: &mut Critter,
        previous_level: u32,
        new_level: u32,
    ) -> ReferenceResult<Vec<String>> {
        let species = self.reference.species_by_id(critter.species_id)?;
        let mut learned = Vec::new();
        for learnable in species.moves_learned_between(previous_level, new_level) {
            let move_data = self.reference.move_by_id(learnable.id)?;
            if critter.knows_move(move_data) {
                continue;
            }
            log::info!("{} learned {}", critter.name, move_data.name);
            learned.push(move_data.name.clone());
            critter.moves.push(move_data.clone());
        }
        if critter.has_pending_move_choice(self.max_moves) {
            log::debug!(
                "{} knows {} moves and must forget one",
                critter.name,
                critter.moves.len()
            );
        }
        Ok(learned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;
    use crate::rng::SeededRng;
    use std::path::PathBuf;

    fn reference() -> ReferenceData {
        ReferenceData::load_from_dir(&PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
            .unwrap()
    }

    #[test]
    fn test_learning_can_overflow_the_move_cap() {
        let reference = reference();
        let engine = ProgressionEngine::new(&reference, 4);
        // At level 12 a bulbasaur knows tackle, growl and vine-whip.
        let mut critter = engine.create(1, 12, &mut SeededRng::new(21)).unwrap();
        assert_eq!(critter.moves.len(), 3);

        let learned = engine.learn_level_up_moves(&mut critter, 12, 13).unwrap();
        assert_eq!(learned, vec!["poison-powder".to_string(), "sleep-powder".to_string()]);
        assert_eq!(critter.moves.len(), 5);
        assert!(critter.has_pending_move_choice(engine.max_moves()));

        critter.forget_move(0);
        assert!(!critter.has_pending_move_choice(engine.max_moves()));
    }

    #[test]
    fn test_known_moves_are_not_duplicated() {
        let reference = reference();
        let engine = ProgressionEngine::new(&reference, 4);
        let mut critter = engine.create(4, 7, &mut SeededRng::new(3)).unwrap();
        assert!(critter.moves.iter().any(|m| m.name == "ember"));
        let learned = engine.learn_level_up_moves(&mut critter, 6, 7).unwrap();
        assert!(learned.is_empty());
    }
}
