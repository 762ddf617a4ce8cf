use crate::battle::catch::attempt_capture;
use crate::battle::events::{BattleEvent, EventBus, Side};
use crate::battle::flee::attempt_escape;
use crate::battle::stages::EncounterStages;
use crate::battle::turn::{
    choose_opponent_move, end_of_turn, turn_step, BattleContext, Battlefield, StepOutcome,
};
use crate::critter::Critter;
use crate::errors::{ActionError, ActionResult};
use crate::rng::RandomSource;
use crate::world::inventory::{BallKind, Item};
use crate::world::player::Player;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterOutcome {
    Won,
    Lost,
    Fled,
    Caught,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    /// Waiting for the player's next action.
    Active,
    /// An action is being resolved.
    Resolving,
    Ended(EncounterOutcome),
}

/// One battle against a wild critter.
///
/// The player's active critter lives in the player's roster and is referred
/// to by index, so every action takes the owning [`Player`].
#[derive(Debug, Clone)]
pub struct Encounter {
    opponent: Critter,
    active_index: usize,
    player_first: bool,
    run_attempts: u32,
    pub player_stages: EncounterStages,
    pub opponent_stages: EncounterStages,
    turn_number: u32,
    phase: EncounterPhase,
}

impl Encounter {
    /// Start a battle. Turn order is fixed here for the whole encounter: the
    /// faster critter acts first, a coin flip settles equal speed.
    pub fn begin(
        opponent: Critter,
        player: &Player,
        rng: &mut dyn RandomSource,
        events: &mut EventBus,
    ) -> ActionResult<Self> {
        let active_index = player
            .active_critter_index()
            .ok_or(ActionError::NoUsableCritter)?;
        let player_speed = player.critters[active_index].speed();
        let opponent_speed = opponent.speed();
        let player_first = if player_speed == opponent_speed {
            rng.coin_flip("turn order tie")
        } else {
            player_speed > opponent_speed
        };

        log::info!(
            "Encounter started: level {} {} (player first: {})",
            opponent.level(),
            opponent.name,
            player_first
        );
        events.push(BattleEvent::EncounterStarted {
            opponent: opponent.display_name(),
            level: opponent.level(),
        });

        Ok(Self {
            opponent,
            active_index,
            player_first,
            run_attempts: 0,
            player_stages: EncounterStages::new(),
            opponent_stages: EncounterStages::new(),
            turn_number: 0,
            phase: EncounterPhase::Active,
        })
    }

    pub fn opponent(&self) -> &Critter {
        &self.opponent
    }

    /// Hand over the opponent once the encounter is done with it.
    pub fn into_opponent(self) -> Critter {
        self.opponent
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn player_first(&self) -> bool {
        self.player_first
    }

    pub fn run_attempts(&self) -> u32 {
        self.run_attempts
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        match self.phase {
            EncounterPhase::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn turn_order(&self) -> [Side; 2] {
        if self.player_first {
            [Side::Player, Side::Opponent]
        } else {
            [Side::Opponent, Side::Player]
        }
    }

    fn ensure_active(&self) -> ActionResult<()> {
        match self.phase {
            EncounterPhase::Active => Ok(()),
            _ => Err(ActionError::NoActiveEncounter),
        }
    }

    fn field<'b>(&'b mut self, player: &'b mut Player) -> ActionResult<Battlefield<'b>> {
        let active_index = self.active_index;
        let active = player
            .critters
            .get_mut(active_index)
            .ok_or(ActionError::InvalidRosterSlot(active_index))?;
        Ok(Battlefield::new(
            active,
            &mut self.player_stages,
            &mut self.opponent,
            &mut self.opponent_stages,
        ))
    }

    fn any_fainted(&self, player: &Player) -> bool {
        self.opponent.is_fainted()
            || player
                .critter(self.active_index)
                .map_or(true, |critter| critter.is_fainted())
    }

    /// Resolve a full turn with the player's active critter using the move in
    /// `move_index`.
    pub fn submit_move(
        &mut self,
        player: &mut Player,
        move_index: usize,
        ctx: &mut BattleContext<'_>,
    ) -> ActionResult<()> {
        self.ensure_active()?;
        let active = player
            .critter(self.active_index)
            .ok_or(ActionError::InvalidRosterSlot(self.active_index))?;
        if active.has_pending_move_choice(ctx.config.max_moves) {
            return Err(ActionError::MoveLearningPending);
        }
        let player_move = active
            .moves
            .get(move_index)
            .cloned()
            .ok_or(ActionError::InvalidMoveIndex(move_index))?;

        self.phase = EncounterPhase::Resolving;
        self.turn_number += 1;
        ctx.events.push(BattleEvent::TurnStarted {
            turn_number: self.turn_number,
        });

        let opponent_move = choose_opponent_move(&self.opponent, ctx.rng);
        let order = self.turn_order();
        let mut first_step = StepOutcome::default();
        for (position, side) in order.into_iter().enumerate() {
            if position == 1 {
                if self.any_fainted(player) {
                    break;
                }
                if first_step.flinch_opponent {
                    let flinched = match side {
                        Side::Player => player.critters[self.active_index].display_name(),
                        Side::Opponent => self.opponent.display_name(),
                    };
                    ctx.events.push(BattleEvent::Flinched { critter: flinched });
                    break;
                }
            }
            let chosen = match side {
                Side::Player => Some(&player_move),
                Side::Opponent => opponent_move.as_ref(),
            };
            let step = match chosen {
                Some(move_data) => {
                    let mut field = self.field(player)?;
                    turn_step(&mut field, side, move_data, ctx)
                }
                None => {
                    ctx.events.push(BattleEvent::NoMoveAvailable {
                        critter: self.opponent.display_name(),
                    });
                    StepOutcome::default()
                }
            };
            if position == 0 {
                first_step = step;
            }
        }

        let mut field = self.field(player)?;
        end_of_turn(&mut field, order, ctx);
        self.resolve_faints(player, ctx.events);
        Ok(())
    }

    /// The opponent acts alone: after a failed catch, a failed escape or a
    /// switch.
    fn free_opponent_step(&mut self, player: &mut Player, ctx: &mut BattleContext<'_>) -> ActionResult<()> {
        match choose_opponent_move(&self.opponent, ctx.rng) {
            Some(move_data) => {
                let mut field = self.field(player)?;
                turn_step(&mut field, Side::Opponent, &move_data, ctx);
            }
            None => ctx.events.push(BattleEvent::NoMoveAvailable {
                critter: self.opponent.display_name(),
            }),
        }
        self.resolve_faints(player, ctx.events);
        Ok(())
    }

    /// Throw a ball of `ball` kind. The ball is spent whether or not the catch
    /// succeeds. A caught opponent stays in the encounter until the caller
    /// takes it with [`Encounter::into_opponent`].
    pub fn attempt_catch(
        &mut self,
        player: &mut Player,
        ball: BallKind,
        ctx: &mut BattleContext<'_>,
    ) -> ActionResult<()> {
        self.ensure_active()?;
        if !player.inventory.consume(Item::Ball(ball)) {
            return Err(ActionError::NoBallsRemaining(ball));
        }
        self.phase = EncounterPhase::Resolving;
        ctx.events.push(BattleEvent::BallThrown { ball });

        let name = self.opponent.display_name();
        let caught = match self.opponent.capture_rate {
            Some(capture_rate) => {
                let result = attempt_capture(&self.opponent, capture_rate, ball, ctx.rng);
                if result.shakes > 0 {
                    ctx.events.push(BattleEvent::BallShook {
                        shakes: result.shakes,
                    });
                }
                result.caught
            }
            None => {
                ctx.events.push(BattleEvent::CannotBeCaught {
                    critter: name.clone(),
                });
                false
            }
        };

        if caught {
            log::info!("Caught {}", self.opponent.name);
            ctx.events.push(BattleEvent::CritterCaught { critter: name });
            self.finish(EncounterOutcome::Caught, ctx.events);
            return Ok(());
        }
        ctx.events.push(BattleEvent::CatchFailed { critter: name });
        self.free_opponent_step(player, ctx)
    }

    pub fn attempt_run(&mut self, player: &mut Player, ctx: &mut BattleContext<'_>) -> ActionResult<()> {
        self.ensure_active()?;
        let active = player
            .critter(self.active_index)
            .ok_or(ActionError::InvalidRosterSlot(self.active_index))?;
        let name = active.display_name();
        let player_speed = active.speed();
        self.phase = EncounterPhase::Resolving;

        if attempt_escape(player_speed, self.opponent.speed(), self.run_attempts, ctx.rng) {
            ctx.events.push(BattleEvent::Escaped { critter: name });
            self.finish(EncounterOutcome::Fled, ctx.events);
            return Ok(());
        }
        ctx.events.push(BattleEvent::EscapeFailed { critter: name });
        self.run_attempts += 1;
        self.free_opponent_step(player, ctx)
    }

    /// Swap in another roster critter. Its stages start fresh and the opponent
    /// gets a free step.
    pub fn switch_active(
        &mut self,
        player: &mut Player,
        roster_index: usize,
        ctx: &mut BattleContext<'_>,
    ) -> ActionResult<()> {
        self.ensure_active()?;
        let incoming = player
            .critter(roster_index)
            .filter(|_| player.active_order.contains(&roster_index))
            .ok_or(ActionError::InvalidRosterSlot(roster_index))?;
        if roster_index == self.active_index {
            return Err(ActionError::AlreadyActive(roster_index));
        }
        if incoming.is_fainted() {
            return Err(ActionError::CritterFainted(roster_index));
        }
        let new_critter = incoming.display_name();
        let old_critter = player
            .critter(self.active_index)
            .map(Critter::display_name)
            .unwrap_or_default();

        self.phase = EncounterPhase::Resolving;
        self.active_index = roster_index;
        self.player_stages.reset();
        ctx.events.push(BattleEvent::CritterSwitched {
            old_critter,
            new_critter,
        });
        self.free_opponent_step(player, ctx)
    }

    /// Settle the encounter after HP changes. A fainted opponent wins the
    /// encounter; a fainted player critter is replaced by the next usable one
    /// in the active order, or loses it.
    fn resolve_faints(&mut self, player: &Player, events: &mut EventBus) {
        if self.opponent.is_fainted() {
            self.finish(EncounterOutcome::Won, events);
            return;
        }
        let active_fainted = player
            .critter(self.active_index)
            .map_or(true, |critter| critter.is_fainted());
        if !active_fainted {
            self.phase = EncounterPhase::Active;
            return;
        }
        match player.active_critter_index() {
            Some(next) => {
                self.active_index = next;
                self.player_stages.reset();
                events.push(BattleEvent::CritterSentOut {
                    critter: player.critters[next].display_name(),
                });
                self.phase = EncounterPhase::Active;
            }
            None => self.finish(EncounterOutcome::Lost, events),
        }
    }

    fn finish(&mut self, outcome: EncounterOutcome, events: &mut EventBus) {
        log::info!("Encounter against {} ended: {:?}", self.opponent.name, outcome);
        self.phase = EncounterPhase::Ended(outcome);
        events.push(BattleEvent::EncounterEnded { outcome });
    }
}
