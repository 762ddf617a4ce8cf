use crate::{MoveId, StatType, TypeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// What a move does, as classified by the upstream dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum MoveCategory {
    Damage,
    Ailment,
    NetGoodStats,
    Heal,
    DamageAilment,
    Swagger,
    DamageLower,
    DamageRaise,
    DamageHeal,
    Ohko,
    WholeFieldEffect,
    FieldEffect,
    ForceSwitch,
    Unique,
}

impl MoveCategory {
    /// Categories whose moves run through the damage formula.
    pub fn deals_damage(self) -> bool {
        matches!(
            self,
            MoveCategory::Damage
                | MoveCategory::DamageAilment
                | MoveCategory::DamageHeal
                | MoveCategory::DamageLower
                | MoveCategory::DamageRaise
        )
    }
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Damage => write!(f, "Damage"),
            MoveCategory::Ailment => write!(f, "Ailment"),
            MoveCategory::NetGoodStats => write!(f, "Stat Change"),
            MoveCategory::Heal => write!(f, "Heal"),
            MoveCategory::DamageAilment => write!(f, "Damage + Ailment"),
            MoveCategory::Swagger => write!(f, "Swagger"),
            MoveCategory::DamageLower => write!(f, "Damage + Lower"),
            MoveCategory::DamageRaise => write!(f, "Damage + Raise"),
            MoveCategory::DamageHeal => write!(f, "Damage + Heal"),
            MoveCategory::Ohko => write!(f, "One-Hit KO"),
            MoveCategory::WholeFieldEffect => write!(f, "Whole Field Effect"),
            MoveCategory::FieldEffect => write!(f, "Field Effect"),
            MoveCategory::ForceSwitch => write!(f, "Force Switch"),
            MoveCategory::Unique => write!(f, "Unique"),
        }
    }
}

/// Who a move is aimed at. Sixteen variants, as in the upstream dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MoveTarget {
    SpecificMove,
    SelectedCrittersMeFirst,
    Ally,
    UsersField,
    UserOrAlly,
    OpponentsField,
    User,
    RandomOpponent,
    AllOtherCritters,
    SelectedCritter,
    AllOpponents,
    EntireField,
    UserAndAllies,
    AllCritters,
    AllAllies,
    FaintingCritters,
}

/// Persistent status conditions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Ailment {
    Poison,
    Burn,
    Paralysis,
    Sleep,
    Confusion,
}

impl fmt::Display for Ailment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display_name = match self {
            Ailment::Poison => "poison",
            Ailment::Burn => "burn",
            Ailment::Paralysis => "paralysis",
            Ailment::Sleep => "sleep",
            Ailment::Confusion => "confusion",
        };
        write!(f, "{}", display_name)
    }
}

/// A signed stage delta applied to one stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatType,
    pub amount: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub id: MoveId,
    pub name: String,
    pub type_id: TypeId,
    #[serde(default = "default_category")]
    pub category: MoveCategory,
    pub target: MoveTarget,
    /// Absent for moves that never deal formula damage.
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default = "default_accuracy")]
    pub accuracy: u8,
    #[serde(default)]
    pub crit_rate: u8,
    #[serde(default)]
    pub flinch_chance: u8,
    /// Percent of max HP restored on hit.
    #[serde(default)]
    pub healing: u8,
    #[serde(default)]
    pub ailment: Option<Ailment>,
    /// 0 means the ailment always lands (pure ailment moves).
    #[serde(default)]
    pub ailment_chance: u8,
    #[serde(default)]
    pub stat_changes: Vec<StatChange>,
}

fn default_category() -> MoveCategory {
    MoveCategory::Damage
}

fn default_accuracy() -> u8 {
    100
}

impl MoveData {
    /// Dataset names are kebab-case ("quick-attack"); this is "Quick attack".
    pub fn pretty_name(&self) -> String {
        pretty_name(&self.name)
    }
}

/// Human-readable form of a kebab-case dataset name.
pub fn pretty_name(name: &str) -> String {
    let spaced = name.replace('-', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_damage_bearing_categories() {
        assert!(MoveCategory::Damage.deals_damage());
        assert!(MoveCategory::DamageAilment.deals_damage());
        assert!(MoveCategory::DamageHeal.deals_damage());
        assert!(!MoveCategory::Ailment.deals_damage());
        assert!(!MoveCategory::Ohko.deals_damage());
        assert!(!MoveCategory::NetGoodStats.deals_damage());
    }

    #[test]
    fn test_target_names_round_trip_through_strum() {
        assert_eq!(MoveTarget::from_str("all-opponents").unwrap(), MoveTarget::AllOpponents);
        assert_eq!(MoveTarget::SelectedCrittersMeFirst.to_string(), "selected-critters-me-first");
    }

    #[test]
    fn test_pretty_name() {
        assert_eq!(pretty_name("quick-attack"), "Quick attack");
        assert_eq!(pretty_name("ember"), "Ember");
        assert_eq!(pretty_name(""), "");
    }
}
