//! Critter Adventure Engine
//!
//! The rules core of a creature-collection RPG: stats and progression,
//! turn-based wild encounters with catching and fleeing, and the session
//! layer that ties battles to a roster, a shop, map traversal and save
//! slots. All randomness is injected, so every encounter replays exactly
//! from a seed.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod critter;
pub mod errors;
pub mod progression;
pub mod reference;
pub mod rng;
pub mod stats;
pub mod world;

// --- PUBLIC API RE-EXPORTS ---

// Static reference records from the `schema` crate.
pub use schema::{
    Ailment, EvolutionTrigger, LearnMethod, MoveCategory, MoveData, MoveTarget, SpeciesData,
    SpeciesMove, StatChange, StatType, Stats, TypeData,
};

// Battle engine.
pub use battle::{BattleEvent, Encounter, EncounterOutcome, EncounterPhase, EventBus, Side};

// Runtime entities and the session.
pub use config::GameConfig;
pub use critter::Critter;
pub use progression::ProgressionEngine;
pub use reference::ReferenceData;
pub use rng::{RandomSource, ScriptedRng, SeededRng};
pub use world::{EncounterHandle, StepResult, TurnResult, World};

// Crate-specific error and result types.
pub use errors::{
    ActionError, ActionResult, ConfigError, EngineError, EngineResult, PersistenceError,
    PersistenceResult, ReferenceDataError, ReferenceResult,
};
