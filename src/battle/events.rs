use crate::battle::encounter::EncounterOutcome;
use crate::world::inventory::BallKind;
use schema::{Ailment, StatType};
use serde::{Deserialize, Serialize};

/// Which half of the field a combatant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Opponent => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Encounter lifecycle
    EncounterStarted {
        opponent: String,
        level: u32,
    },
    TurnStarted {
        turn_number: u32,
    },
    EncounterEnded {
        outcome: EncounterOutcome,
    },

    // Actions
    MoveUsed {
        side: Side,
        critter: String,
        move_name: String,
    },
    NoMoveAvailable {
        critter: String,
    },
    MoveMissed {
        attacker: String,
    },
    CriticalHit,
    DamageDealt {
        target: String,
        move_name: String,
        damage: u32,
        remaining_hp: u32,
    },
    TypeEffectiveness {
        multiplier: f64,
    },
    Healed {
        target: String,
        amount: u32,
        new_hp: u32,
    },
    CritterFainted {
        side: Side,
        critter: String,
    },
    CritterSwitched {
        old_critter: String,
        new_critter: String,
    },
    CritterSentOut {
        critter: String,
    },

    // Stages
    StatStageChanged {
        target: String,
        stat: StatType,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: String,
        stat: StatType,
        rising: bool,
    },

    // Ailments
    AilmentInflicted {
        target: String,
        ailment: Ailment,
    },
    AilmentRemoved {
        target: String,
        ailment: Ailment,
    },
    AilmentDamage {
        target: String,
        ailment: Ailment,
        damage: u32,
        remaining_hp: u32,
    },
    FullyParalyzed {
        critter: String,
    },
    FastAsleep {
        critter: String,
    },
    IsConfused {
        critter: String,
    },
    HurtItselfInConfusion {
        critter: String,
    },
    Flinched {
        critter: String,
    },

    // Catch / run
    BallThrown {
        ball: BallKind,
    },
    BallShook {
        shakes: u8,
    },
    CritterCaught {
        critter: String,
    },
    CatchFailed {
        critter: String,
    },
    CannotBeCaught {
        critter: String,
    },
    Escaped {
        critter: String,
    },
    EscapeFailed {
        critter: String,
    },

    // Progression
    ExperienceGained {
        critter: String,
        amount: u32,
    },
    LeveledUp {
        critter: String,
        level: u32,
    },
    Evolved {
        from: String,
        to: String,
    },
    MoveLearned {
        critter: String,
        move_name: String,
    },
    MustForgetMove {
        critter: String,
    },
    BlackedOut,
}

impl BattleEvent {
    /// User-facing text for the event, or `None` for silent events.
    pub fn format(&self) -> Option<String> {
        match self {
            BattleEvent::EncounterStarted { opponent, level } => {
                Some(format!("A wild {} (Lv. {}) appeared!", opponent, level))
            }
            BattleEvent::TurnStarted { .. } => None,
            BattleEvent::EncounterEnded { .. } => None,

            BattleEvent::MoveUsed {
                critter, move_name, ..
            } => Some(format!("{} used {}!", critter, move_name)),
            BattleEvent::NoMoveAvailable { critter } => {
                Some(format!("{} has no moves to use!", critter))
            }
            BattleEvent::MoveMissed { attacker } => {
                Some(format!("{}'s attack missed!", attacker))
            }
            BattleEvent::CriticalHit => Some("A critical hit!".to_string()),
            BattleEvent::DamageDealt {
                target,
                move_name,
                damage,
                ..
            } => Some(format!("{} took {} damage from {}.", target, damage, move_name)),
            BattleEvent::TypeEffectiveness { multiplier } => match *multiplier {
                m if m == 0.0 => Some("It had no effect.".to_string()),
                m if m < 1.0 => Some("It wasn't very effective.".to_string()),
                m if m > 1.0 => Some("It was super effective!".to_string()),
                _ => None,
            },
            BattleEvent::Healed { target, amount, .. } => {
                Some(format!("{} recovered {} HP!", target, amount))
            }
            BattleEvent::CritterFainted { critter, .. } => Some(format!("{} fainted!", critter)),
            BattleEvent::CritterSwitched {
                old_critter,
                new_critter,
            } => Some(format!("Come back, {}! Go, {}!", old_critter, new_critter)),
            BattleEvent::CritterSentOut { critter } => Some(format!("Go, {}!", critter)),

            BattleEvent::StatStageChanged {
                target,
                stat,
                old_stage,
                new_stage,
            } => {
                if new_stage > old_stage {
                    Some(format!("{}'s {} rose!", target, stat))
                } else {
                    Some(format!("{}'s {} fell!", target, stat))
                }
            }
            BattleEvent::StatChangeBlocked {
                target,
                stat,
                rising,
            } => {
                let direction = if *rising { "higher" } else { "lower" };
                Some(format!("{}'s {} won't go any {}!", target, stat, direction))
            }

            BattleEvent::AilmentInflicted { target, ailment } => {
                Some(format!("{} {}", target, Self::ailment_applied_text(*ailment)))
            }
            BattleEvent::AilmentRemoved { target, ailment } => match ailment {
                Ailment::Sleep => Some(format!("{} woke up!", target)),
                Ailment::Confusion => Some(format!("{} snapped out of its confusion!", target)),
                _ => Some(format!("{} was cured of its {}!", target, ailment)),
            },
            BattleEvent::AilmentDamage {
                target,
                ailment,
                damage,
                ..
            } => Some(format!(
                "{} is hurt by its {}! ({} damage)",
                target, ailment, damage
            )),
            BattleEvent::FullyParalyzed { critter } => {
                Some(format!("{} is fully paralyzed!", critter))
            }
            BattleEvent::FastAsleep { critter } => Some(format!("{} is fast asleep.", critter)),
            BattleEvent::IsConfused { critter } => Some(format!("{} is confused!", critter)),
            BattleEvent::HurtItselfInConfusion { critter } => {
                Some(format!("{} hurt itself in its confusion!", critter))
            }
            BattleEvent::Flinched { critter } => {
                Some(format!("{} flinched and couldn't move!", critter))
            }

            BattleEvent::BallThrown { ball } => Some(format!("You threw a {}!", ball)),
            BattleEvent::BallShook { .. } => None,
            BattleEvent::CritterCaught { critter } => {
                Some(format!("{} caught successfully!", critter))
            }
            BattleEvent::CatchFailed { critter } => Some(format!("Failed to catch {}.", critter)),
            BattleEvent::CannotBeCaught { critter } => {
                Some(format!("{} cannot be caught!", critter))
            }
            BattleEvent::Escaped { critter } => Some(format!("{} escaped successfully!", critter)),
            BattleEvent::EscapeFailed { critter } => {
                Some(format!("{} failed to run away.", critter))
            }

            BattleEvent::ExperienceGained { critter, amount } => {
                Some(format!("{} gained {} experience!", critter, amount))
            }
            BattleEvent::LeveledUp { critter, level } => {
                Some(format!("{} leveled up to {}!", critter, level))
            }
            BattleEvent::Evolved { from, to } => Some(format!("{} evolved into {}!", from, to)),
            BattleEvent::MoveLearned { critter, move_name } => {
                Some(format!("{} learned {}!", critter, move_name))
            }
            BattleEvent::MustForgetMove { critter } => Some(format!(
                "{} is trying to learn too many moves. Choose a move to forget.",
                critter
            )),
            BattleEvent::BlackedOut => {
                Some("You have no usable critters! You hurried back to safety.".to_string())
            }
        }
    }

    fn ailment_applied_text(ailment: Ailment) -> &'static str {
        match ailment {
            Ailment::Poison => "was poisoned!",
            Ailment::Burn => "was burned!",
            Ailment::Paralysis => "is paralyzed! It may be unable to move!",
            Ailment::Sleep => "fell asleep!",
            Ailment::Confusion => "became confused!",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }

    /// Formatted text of every non-silent event, in order.
    pub fn format_all(&self) -> Vec<String> {
        self.events.iter().filter_map(BattleEvent::format).collect()
    }

    /// Print all events in debug format. Useful when a test fails.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
