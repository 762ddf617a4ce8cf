//! Creation, experience, evolution and move learning.

pub mod creation;
pub mod evolution;
pub mod experience;
pub mod moves;

use crate::reference::ReferenceData;

pub use creation::create_critter;
pub use evolution::{apply_evolution, EvolutionReport};
pub use experience::{experience_yield, ExperienceReport};

/// Progression rules that need reference-data lookups (species for
/// evolution targets, moves for learnsets).
#[derive(Debug, Clone, Copy)]
pub struct ProgressionEngine<'a> {
    reference: &'a ReferenceData,
    max_moves: usize,
}

impl<'a> ProgressionEngine<'a> {
    pub fn new(reference: &'a ReferenceData, max_moves: usize) -> Self {
        Self {
            reference,
            max_moves,
        }
    }

    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    pub fn max_moves(&self) -> usize {
        self.max_moves
    }
}
