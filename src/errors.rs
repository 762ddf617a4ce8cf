use crate::world::inventory::{BallKind, Item};
use schema::{MoveId, SpeciesId, TypeId};
use std::fmt;

/// Main error type for the critter adventure engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Error related to reference data lookup or loading
    ReferenceData(ReferenceDataError),
    /// A player action was rejected before any state changed
    Action(ActionError),
    /// Error related to save slots
    Persistence(PersistenceError),
    /// Error related to the game configuration file
    Config(ConfigError),
}

/// Errors related to the static type/move/species tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceDataError {
    TypeNotFound(TypeId),
    TypeNameNotFound(String),
    MoveNotFound(MoveId),
    MoveNameNotFound(String),
    SpeciesNotFound(SpeciesId),
    SpeciesNameNotFound(String),
    /// A table file could not be read
    Io(String),
    /// A table file is not valid RON for its record type
    Parse(String),
}

/// Actions rejected by precondition. No state is mutated when one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    NoActiveEncounter,
    EncounterInProgress,
    /// Every critter in the active order has fainted
    NoUsableCritter,
    NoBallsRemaining(BallKind),
    InvalidRosterSlot(usize),
    CritterFainted(usize),
    AlreadyActive(usize),
    InvalidMoveIndex(usize),
    /// The active critter knows too many moves and must forget one first
    MoveLearningPending,
    NotEnoughMoney { required: u32, available: u32 },
    ItemNotAvailable(Item),
    CannotSellLastCritter,
    InvalidSaveSlot(usize),
    InvalidForgetIndex(usize),
    /// The critter already has full HP
    AlreadyAtFullHp(usize),
    /// The player has not been placed in any area yet
    NoCurrentArea,
}

/// Errors related to save slot storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    Io(String),
    Encode(String),
    Decode(String),
}

/// Errors related to loading a `GameConfig`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io(String),
    Parse(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ReferenceData(err) => write!(f, "Reference data error: {}", err),
            EngineError::Action(err) => write!(f, "Action error: {}", err),
            EngineError::Persistence(err) => write!(f, "Persistence error: {}", err),
            EngineError::Config(err) => write!(f, "Config error: {}", err),
        }
    }
}

impl fmt::Display for ReferenceDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceDataError::TypeNotFound(id) => write!(f, "Type not found: {}", id),
            ReferenceDataError::TypeNameNotFound(name) => write!(f, "Type not found: {}", name),
            ReferenceDataError::MoveNotFound(id) => write!(f, "Move not found: {}", id),
            ReferenceDataError::MoveNameNotFound(name) => write!(f, "Move not found: {}", name),
            ReferenceDataError::SpeciesNotFound(id) => write!(f, "Species not found: {}", id),
            ReferenceDataError::SpeciesNameNotFound(name) => {
                write!(f, "Species not found: {}", name)
            }
            ReferenceDataError::Io(details) => write!(f, "Could not read table: {}", details),
            ReferenceDataError::Parse(details) => write!(f, "Malformed table: {}", details),
        }
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NoActiveEncounter => write!(f, "There is no battle in progress"),
            ActionError::EncounterInProgress => write!(f, "Not allowed during a battle"),
            ActionError::NoUsableCritter => write!(f, "No critter is able to fight"),
            ActionError::NoBallsRemaining(ball) => write!(f, "No {} left", ball),
            ActionError::InvalidRosterSlot(index) => write!(f, "Invalid roster slot: {}", index),
            ActionError::CritterFainted(index) => write!(f, "Critter in slot {} has fainted", index),
            ActionError::AlreadyActive(index) => {
                write!(f, "Critter in slot {} is already in battle", index)
            }
            ActionError::InvalidMoveIndex(index) => write!(f, "Invalid move index: {}", index),
            ActionError::MoveLearningPending => {
                write!(f, "A move must be forgotten before continuing")
            }
            ActionError::NotEnoughMoney {
                required,
                available,
            } => write!(f, "Not enough money: need {}, have {}", required, available),
            ActionError::ItemNotAvailable(item) => write!(f, "{} is not available", item),
            ActionError::CannotSellLastCritter => write!(f, "Cannot sell your last critter"),
            ActionError::InvalidSaveSlot(index) => write!(f, "Invalid save slot: {}", index),
            ActionError::InvalidForgetIndex(index) => {
                write!(f, "Invalid move to forget: {}", index)
            }
            ActionError::AlreadyAtFullHp(index) => {
                write!(f, "Critter in slot {} already has full HP", index)
            }
            ActionError::NoCurrentArea => write!(f, "The player is not in any area"),
        }
    }
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(details) => write!(f, "Save I/O failed: {}", details),
            PersistenceError::Encode(details) => write!(f, "Could not encode save: {}", details),
            PersistenceError::Decode(details) => write!(f, "Could not decode save: {}", details),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(details) => write!(f, "Could not read config: {}", details),
            ConfigError::Parse(details) => write!(f, "Malformed config: {}", details),
        }
    }
}

impl std::error::Error for EngineError {}
impl std::error::Error for ReferenceDataError {}
impl std::error::Error for ActionError {}
impl std::error::Error for PersistenceError {}
impl std::error::Error for ConfigError {}

impl From<ReferenceDataError> for EngineError {
    fn from(err: ReferenceDataError) -> Self {
        EngineError::ReferenceData(err)
    }
}

impl From<ActionError> for EngineError {
    fn from(err: ActionError) -> Self {
        EngineError::Action(err)
    }
}

impl From<PersistenceError> for EngineError {
    fn from(err: PersistenceError) -> Self {
        EngineError::Persistence(err)
    }
}

impl From<ConfigError> for EngineError {
    fn from(err: ConfigError) -> Self {
        EngineError::Config(err)
    }
}

/// Type alias for Results using EngineError
pub type EngineResult<T> = Result<T, EngineError>;

/// Type alias for Results using ReferenceDataError
pub type ReferenceResult<T> = Result<T, ReferenceDataError>;

/// Type alias for Results using ActionError
pub type ActionResult<T> = Result<T, ActionError>;

/// Type alias for Results using PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;
