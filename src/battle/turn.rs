use crate::battle::damage::compute_damage;
use crate::battle::events::{BattleEvent, EventBus, Side};
use crate::battle::stages::EncounterStages;
use crate::battle::stat_changes::{apply_stat_changes, targets_user};
use crate::config::GameConfig;
use crate::critter::Critter;
use crate::reference::ReferenceData;
use crate::rng::RandomSource;
use schema::{Ailment, MoveData, StatType};

pub const PARALYSIS_SKIP_CHANCE: f64 = 0.25;
pub const CONFUSION_SELF_HIT_CHANCE: f64 = 0.5;
pub const SLEEP_TURNS: (u32, u32) = (1, 3);
pub const CONFUSION_TURNS: (u32, u32) = (1, 4);

/// Everything a turn step reads besides the two combatants.
pub struct BattleContext<'a> {
    pub reference: &'a ReferenceData,
    pub config: &'a GameConfig,
    pub rng: &'a mut dyn RandomSource,
    pub events: &'a mut EventBus,
}

/// The two combatants and their stage records, addressed by [`Side`].
pub struct Battlefield<'a> {
    critters: [&'a mut Critter; 2],
    stages: [&'a mut EncounterStages; 2],
}

impl<'a> Battlefield<'a> {
    pub fn new(
        player: &'a mut Critter,
        player_stages: &'a mut EncounterStages,
        opponent: &'a mut Critter,
        opponent_stages: &'a mut EncounterStages,
    ) -> Self {
        Self {
            critters: [player, opponent],
            stages: [player_stages, opponent_stages],
        }
    }

    pub fn critter(&self, side: Side) -> &Critter {
        self.critters[side.index()]
    }

    pub fn critter_mut(&mut self, side: Side) -> &mut Critter {
        self.critters[side.index()]
    }

    pub fn stages(&self, side: Side) -> &EncounterStages {
        self.stages[side.index()]
    }

    pub fn stages_mut(&mut self, side: Side) -> &mut EncounterStages {
        self.stages[side.index()]
    }

    /// `(attacker's stages, defender's stages)`.
    fn stages_pair_mut(&mut self, attacker: Side) -> (&mut EncounterStages, &mut EncounterStages) {
        let [player, opponent] = &mut self.stages;
        match attacker {
            Side::Player => (&mut **player, &mut **opponent),
            Side::Opponent => (&mut **opponent, &mut **player),
        }
    }

    pub fn effective_speed(&self, side: Side) -> f64 {
        self.critter(side).speed() as f64 * self.stages(side).multiplier(StatType::Speed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The attacker got past paralysis, confusion and sleep and used its move.
    pub acted: bool,
    pub hit: bool,
    /// The other combatant flinches and loses its step this turn.
    pub flinch_opponent: bool,
}

/// One combatant's action for a turn.
pub fn turn_step(
    field: &mut Battlefield<'_>,
    attacker_side: Side,
    move_data: &MoveData,
    ctx: &mut BattleContext<'_>,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let attacker_name = field.critter(attacker_side).display_name();

    if field.critter(attacker_side).has_ailment(Ailment::Paralysis)
        && ctx.rng.chance(PARALYSIS_SKIP_CHANCE, "paralysis")
    {
        ctx.events.push(BattleEvent::FullyParalyzed {
            critter: attacker_name,
        });
        return outcome;
    }

    let mut defender_side = attacker_side.opponent();
    if field.critter(attacker_side).has_ailment(Ailment::Confusion) {
        let stages = field.stages_mut(attacker_side);
        stages.confusion_turns = stages.confusion_turns.saturating_sub(1);
        if stages.confusion_turns == 0 {
            field.critter_mut(attacker_side).remove_ailment(Ailment::Confusion);
            ctx.events.push(BattleEvent::AilmentRemoved {
                target: attacker_name.clone(),
                ailment: Ailment::Confusion,
            });
        } else {
            ctx.events.push(BattleEvent::IsConfused {
                critter: attacker_name.clone(),
            });
            if ctx.rng.chance(CONFUSION_SELF_HIT_CHANCE, "confusion self-hit") {
                ctx.events.push(BattleEvent::HurtItselfInConfusion {
                    critter: attacker_name.clone(),
                });
                defender_side = attacker_side;
            }
        }
    }
    let self_hit = defender_side == attacker_side;

    if field.critter(attacker_side).has_ailment(Ailment::Sleep) {
        let stages = field.stages_mut(attacker_side);
        stages.sleep_turns = stages.sleep_turns.saturating_sub(1);
        if stages.sleep_turns == 0 {
            field.critter_mut(attacker_side).remove_ailment(Ailment::Sleep);
            ctx.events.push(BattleEvent::AilmentRemoved {
                target: attacker_name.clone(),
                ailment: Ailment::Sleep,
            });
        } else {
            ctx.events.push(BattleEvent::FastAsleep {
                critter: attacker_name,
            });
            return outcome;
        }
    }

    let move_name = move_data.pretty_name();
    ctx.events.push(BattleEvent::MoveUsed {
        side: attacker_side,
        critter: attacker_name.clone(),
        move_name: move_name.clone(),
    });
    outcome.acted = true;

    let hit_threshold = move_data.accuracy as f64
        * field.stages(attacker_side).multiplier(StatType::Accuracy)
        * field.stages(defender_side).multiplier(StatType::Evasion);
    let roll = ctx.rng.int_inclusive(1, 100, "accuracy");
    if hit_threshold < roll as f64 {
        log::debug!("{} missed: threshold {:.1} roll {}", move_name, hit_threshold, roll);
        ctx.events.push(BattleEvent::MoveMissed {
            attacker: attacker_name,
        });
        return outcome;
    }
    outcome.hit = true;

    let defender_name = field.critter(defender_side).display_name();
    let damage = compute_damage(
        field.critter(attacker_side),
        field.critter(defender_side),
        field.stages(attacker_side),
        field.stages(defender_side),
        move_data,
        ctx.reference,
        ctx.rng,
    );
    if let Some(result) = damage {
        if result.critical {
            ctx.events.push(BattleEvent::CriticalHit);
        }
        let defender = field.critter_mut(defender_side);
        let dealt = defender.take_damage(result.damage);
        ctx.events.push(BattleEvent::DamageDealt {
            target: defender_name.clone(),
            move_name: move_name.clone(),
            damage: dealt,
            remaining_hp: defender.current_hp(),
        });
        ctx.events.push(BattleEvent::TypeEffectiveness {
            multiplier: result.type_factor,
        });
        if defender.is_fainted() {
            ctx.events.push(BattleEvent::CritterFainted {
                side: defender_side,
                critter: defender_name.clone(),
            });
        }
    }

    if move_data.healing > 0 {
        let heal_side = if targets_user(move_data.target) {
            attacker_side
        } else {
            defender_side
        };
        let target = field.critter_mut(heal_side);
        if !target.is_fainted() {
            let amount = (target.max_hp() as f64 * move_data.healing as f64 / 100.0).round() as u32;
            let restored = target.restore_hp(amount);
            ctx.events.push(BattleEvent::Healed {
                target: target.display_name(),
                amount: restored,
                new_hp: target.current_hp(),
            });
        }
    }

    let applied = if self_hit {
        apply_stat_changes(
            move_data,
            &attacker_name,
            field.stages_mut(attacker_side),
            &defender_name,
            None,
        )
    } else {
        let (attacker_stages, defender_stages) = field.stages_pair_mut(attacker_side);
        apply_stat_changes(
            move_data,
            &attacker_name,
            attacker_stages,
            &defender_name,
            Some(defender_stages),
        )
    };
    for change in applied {
        if change.blocked() {
            ctx.events.push(BattleEvent::StatChangeBlocked {
                target: change.critter,
                stat: change.stat,
                rising: change.new_stage > 0,
            });
        } else {
            ctx.events.push(BattleEvent::StatStageChanged {
                target: change.critter,
                stat: change.stat,
                old_stage: change.old_stage,
                new_stage: change.new_stage,
            });
        }
    }

    if let Some(ailment) = move_data.ailment {
        try_inflict_ailment(field, defender_side, move_data, ailment, ctx);
    }

    if !self_hit && move_data.flinch_chance > 0 && !field.critter(defender_side).is_fainted() {
        let roll = ctx.rng.int_inclusive(1, 100, "flinch");
        outcome.flinch_opponent = roll <= move_data.flinch_chance as u32;
    }

    outcome
}

/// Ailments never land on a fainted defender, on one that already has the
/// ailment, or on one whose own types include the move's type.
fn try_inflict_ailment(
    field: &mut Battlefield<'_>,
    defender_side: Side,
    move_data: &MoveData,
    ailment: Ailment,
    ctx: &mut BattleContext<'_>,
) {
    let defender = field.critter(defender_side);
    if defender.is_fainted()
        || defender.has_ailment(ailment)
        || defender.type_ids.contains(&move_data.type_id)
    {
        return;
    }

    // 0 (pure ailment moves) and 100 always land.
    let chance = move_data.ailment_chance as u32;
    if (1..100).contains(&chance) && ctx.rng.int_inclusive(1, 100, "ailment chance") > chance {
        return;
    }

    let target = defender.display_name();
    field.critter_mut(defender_side).add_ailment(ailment);
    match ailment {
        Ailment::Sleep => {
            let (low, high) = SLEEP_TURNS;
            field.stages_mut(defender_side).sleep_turns =
                ctx.rng.int_inclusive(low, high, "sleep turns") as u8;
        }
        Ailment::Confusion => {
            let (low, high) = CONFUSION_TURNS;
            field.stages_mut(defender_side).confusion_turns =
                ctx.rng.int_inclusive(low, high, "confusion turns") as u8;
        }
        _ => {}
    }
    log::debug!("{} inflicted {} on {}", move_data.name, ailment, target);
    ctx.events.push(BattleEvent::AilmentInflicted { target, ailment });
}

/// Burn then poison damage for each combatant still standing, in turn order.
pub fn end_of_turn(field: &mut Battlefield<'_>, order: [Side; 2], ctx: &mut BattleContext<'_>) {
    for side in order {
        for (ailment, divisor) in [
            (Ailment::Burn, ctx.config.burn_damage_divisor),
            (Ailment::Poison, ctx.config.poison_damage_divisor),
        ] {
            let critter = field.critter_mut(side);
            if critter.is_fainted() || !critter.has_ailment(ailment) {
                continue;
            }
            let damage = (critter.max_hp() / divisor.max(1)).max(1);
            let dealt = critter.take_damage(damage);
            let name = critter.display_name();
            ctx.events.push(BattleEvent::AilmentDamage {
                target: name.clone(),
                ailment,
                damage: dealt,
                remaining_hp: critter.current_hp(),
            });
            if critter.is_fainted() {
                ctx.events.push(BattleEvent::CritterFainted { side, critter: name });
            }
        }
    }
}

/// Uniformly random known move, or `None` for a critter without moves.
pub fn choose_opponent_move(opponent: &Critter, rng: &mut dyn RandomSource) -> Option<MoveData> {
    if opponent.moves.is_empty() {
        log::warn!("{} has no moves; its step is skipped", opponent.name);
        return None;
    }
    let index = rng.pick_index(opponent.moves.len(), "opponent move");
    opponent.moves.get(index).cloned()
}
