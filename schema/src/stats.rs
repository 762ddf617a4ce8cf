use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// Six-field stat vector. Used for base stats, individual values and
/// effort values alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

impl Stats {
    pub const fn new(
        hp: u32,
        attack: u32,
        defense: u32,
        special_attack: u32,
        special_defense: u32,
        speed: u32,
    ) -> Self {
        Stats {
            hp,
            attack,
            defense,
            special_attack,
            special_defense,
            speed,
        }
    }

    /// Same value in every field.
    pub const fn uniform(value: u32) -> Self {
        Self::new(value, value, value, value, value, value)
    }

    pub fn total(&self) -> u32 {
        self.hp
            + self.attack
            + self.defense
            + self.special_attack
            + self.special_defense
            + self.speed
    }
}

/// Stats that can carry an encounter stage. Spelled the way the upstream
/// dataset spells them (`special-attack`, `evasion`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum StatType {
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
    Accuracy,
    Evasion,
}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatType::Attack => write!(f, "Attack"),
            StatType::Defense => write!(f, "Defense"),
            StatType::SpecialAttack => write!(f, "Special Attack"),
            StatType::SpecialDefense => write!(f, "Special Defense"),
            StatType::Speed => write!(f, "Speed"),
            StatType::Accuracy => write!(f, "Accuracy"),
            StatType::Evasion => write!(f, "Evasion"),
        }
    }
}
