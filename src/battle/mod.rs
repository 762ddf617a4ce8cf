//! Encounter simulation: turn steps, damage, stages, ailments, catching and
//! fleeing.

pub mod catch;
pub mod damage;
pub mod encounter;
pub mod events;
pub mod flee;
pub mod stages;
pub mod stat_changes;
pub mod turn;

pub use encounter::{Encounter, EncounterOutcome, EncounterPhase};
pub use events::{BattleEvent, EventBus, Side};
pub use stages::EncounterStages;
pub use turn::{BattleContext, Battlefield};

#[cfg(test)]
pub(crate) mod tests;
