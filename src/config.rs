use crate::errors::ConfigError;
use crate::world::map::EncounterLevel;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable game constants. Every field has a default, so a config file only
/// needs to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Chance of a wild encounter per step taken on grass.
    pub encounter_probability: f64,
    pub potion_heal_amount: u32,
    pub potion_cost: u32,
    pub ball_cost: u32,
    /// Sale price of a critter is this times its level.
    pub critter_worth_per_level: u32,
    pub active_roster_max: usize,
    pub save_slot_count: usize,
    pub max_moves: usize,
    pub burn_damage_divisor: u32,
    pub poison_damage_divisor: u32,
    pub starting_money: u32,
    /// Used when a map's encounter table carries no level distribution.
    pub default_encounter_level: EncounterLevel,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            encounter_probability: 0.1,
            potion_heal_amount: 20,
            potion_cost: 200,
            ball_cost: 200,
            critter_worth_per_level: 50,
            active_roster_max: 6,
            save_slot_count: 6,
            max_moves: 4,
            burn_damage_divisor: 16,
            poison_damage_divisor: 8,
            starting_money: 500,
            default_encounter_level: EncounterLevel {
                mean: 3.0,
                std_dev: 1.0,
            },
        }
    }
}

impl GameConfig {
    /// Load a config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_ron_str(&content)?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = GameConfig::from_ron_str("(potion_cost: 300, max_moves: 5)").unwrap();
        assert_eq!(config.potion_cost, 300);
        assert_eq!(config.max_moves, 5);
        assert_eq!(config.ball_cost, 200);
        assert_eq!(config.encounter_probability, 0.1);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(GameConfig::from_ron_str("()").unwrap(), GameConfig::default());
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let result = GameConfig::from_ron_str("(potion_cost: \"lots\")");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameConfig::load(Path::new("/nonexistent/critter-config.ron"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
