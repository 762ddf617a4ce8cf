use crate::battle::stages::EncounterStages;
use schema::{MoveData, MoveTarget, StatType};

/// Targets whose stat changes land on the defender.
/// A single selected target is in neither set, so its stat changes are
/// not applied.
pub const OPPONENT_DIRECTED: [MoveTarget; 6] = [
    MoveTarget::AllCritters,
    MoveTarget::EntireField,
    MoveTarget::AllOpponents,
    MoveTarget::OpponentsField,
    MoveTarget::RandomOpponent,
    MoveTarget::AllOtherCritters,
];

/// Targets whose stat changes land on the user.
pub const SELF_DIRECTED: [MoveTarget; 8] = [
    MoveTarget::AllCritters,
    MoveTarget::EntireField,
    MoveTarget::AllAllies,
    MoveTarget::UserAndAllies,
    MoveTarget::User,
    MoveTarget::UserOrAlly,
    MoveTarget::SelectedCrittersMeFirst,
    MoveTarget::Ally,
];

pub fn targets_defender(target: MoveTarget) -> bool {
    OPPONENT_DIRECTED.contains(&target)
}

pub fn targets_user(target: MoveTarget) -> bool {
    SELF_DIRECTED.contains(&target)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedStatChange {
    pub critter: String,
    pub stat: StatType,
    pub old_stage: i8,
    pub new_stage: i8,
}

impl AppliedStatChange {
    pub fn blocked(&self) -> bool {
        self.old_stage == self.new_stage
    }

    pub fn describe(&self) -> String {
        if self.blocked() {
            let direction = if self.new_stage > 0 { "higher" } else { "lower" };
            format!("{}'s {} won't go any {}!", self.critter, self.stat, direction)
        } else if self.new_stage > self.old_stage {
            format!("{}'s {} rose!", self.critter, self.stat)
        } else {
            format!("{}'s {} fell!", self.critter, self.stat)
        }
    }
}

/// Apply `move_data`'s stage deltas. `defender_stages` is `None` when the
/// user is hitting itself; defender-routed changes then land on the user too.
pub fn apply_stat_changes(
    move_data: &MoveData,
    attacker_name: &str,
    attacker_stages: &mut EncounterStages,
    defender_name: &str,
    mut defender_stages: Option<&mut EncounterStages>,
) -> Vec<AppliedStatChange> {
    let mut applied = Vec::new();
    for change in &move_data.stat_changes {
        if targets_defender(move_data.target) {
            let (name, stages) = match defender_stages.as_deref_mut() {
                Some(stages) => (defender_name, stages),
                None => (attacker_name, &mut *attacker_stages),
            };
            let shift = stages.shift(change.stat, change.amount);
            applied.push(AppliedStatChange {
                critter: name.to_string(),
                stat: change.stat,
                old_stage: shift.old_stage,
                new_stage: shift.new_stage,
            });
        }
        if targets_user(move_data.target) {
            let shift = attacker_stages.shift(change.stat, change.amount);
            applied.push(AppliedStatChange {
                critter: attacker_name.to_string(),
                stat: change.stat,
                old_stage: shift.old_stage,
                new_stage: shift.new_stage,
            });
        }
    }
    for change in &applied {
        log::debug!("{}", change.describe());
    }
    applied
}
