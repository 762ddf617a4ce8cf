// Critter Adventure Schema - Shared reference-data definitions
// This crate contains the immutable records produced by the offline data
// pipeline (types, moves, species) and the enums the battle engine matches
// on. Everything here is plain data: no lookups, no randomness.

// Re-export the main types
pub use moves::*;
pub use species::*;
pub use stats::*;
pub use types::*;

pub mod moves;
pub mod species;
pub mod stats;
pub mod types;

/// Identifier of a [`TypeData`] record.
pub type TypeId = u16;
/// Identifier of a [`MoveData`] record.
pub type MoveId = u16;
/// Identifier of a [`SpeciesData`] record.
pub type SpeciesId = u16;
