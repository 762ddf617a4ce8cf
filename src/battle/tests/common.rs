use crate::battle::events::{BattleEvent, EventBus, Side};
use crate::battle::stages::EncounterStages;
use crate::battle::turn::{end_of_turn, turn_step, BattleContext, Battlefield, StepOutcome};
use crate::config::GameConfig;
use crate::critter::Critter;
use crate::errors::EngineResult;
use crate::reference::ReferenceData;
use crate::rng::RandomSource;
use crate::stats::experience_for_level;
use crate::world::player::Player;
use schema::{Ailment, MoveCategory, MoveData, MoveTarget, SpeciesId, Stats, TypeId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use uuid::Uuid;

static FIXTURE: OnceLock<ReferenceData> = OnceLock::new();
static NEXT_UUID: AtomicU64 = AtomicU64::new(1);

/// The repository's `data/` tables, loaded once per test binary.
pub fn fixture_reference() -> ReferenceData {
    FIXTURE
        .get_or_init(|| {
            let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
            match ReferenceData::load_from_dir(&dir) {
                Ok(reference) => reference,
                Err(err) => panic!("Failed to load fixture data from {}: {}", dir.display(), err),
            }
        })
        .clone()
}

/// A single-target move with perfect accuracy and no side effects.
pub fn test_move(name: &str, type_id: TypeId, category: MoveCategory, power: Option<u32>) -> MoveData {
    MoveData {
        id: 9000,
        name: name.to_string(),
        type_id,
        category,
        target: MoveTarget::SelectedCritter,
        power,
        accuracy: 100,
        crit_rate: 0,
        flinch_chance: 0,
        healing: 0,
        ailment: None,
        ailment_chance: 0,
        stat_changes: Vec::new(),
    }
}

/// A builder for test critters with common defaults: zero IVs, full HP and
/// the first moves the species knows at its level.
///
/// # Example
/// ```ignore
/// let critter = TestCritterBuilder::new(25, 10)
///     .with_moves(vec!["thunder-shock"])
///     .with_ailment(Ailment::Paralysis)
///     .build(&reference);
/// ```
pub struct TestCritterBuilder {
    species_id: SpeciesId,
    level: u32,
    ivs: Stats,
    moves: Option<Vec<&'static str>>,
    ailments: Vec<Ailment>,
    current_hp: Option<u32>,
}

impl TestCritterBuilder {
    pub fn new(species_id: SpeciesId, level: u32) -> Self {
        Self {
            species_id,
            level,
            ivs: Stats::default(),
            moves: None,
            ailments: Vec::new(),
            current_hp: None,
        }
    }

    pub fn with_ivs(mut self, ivs: Stats) -> Self {
        self.ivs = ivs;
        self
    }

    /// Moves by name. An empty list builds a critter that knows nothing.
    pub fn with_moves(mut self, moves: Vec<&'static str>) -> Self {
        self.moves = Some(moves);
        self
    }

    pub fn with_ailment(mut self, ailment: Ailment) -> Self {
        self.ailments.push(ailment);
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.current_hp = Some(hp);
        self
    }

    pub fn build(self, reference: &ReferenceData) -> Critter {
        let species = match reference.species_by_id(self.species_id) {
            Ok(species) => species,
            Err(err) => panic!("Failed to load species {}: {}", self.species_id, err),
        };

        let moves: Vec<MoveData> = match self.moves {
            Some(names) => names
                .into_iter()
                .map(|name| match reference.move_by_name(name) {
                    Ok(move_data) => move_data.clone(),
                    Err(err) => panic!("Unknown test move {}: {}", name, err),
                })
                .collect(),
            None => {
                let mut known: Vec<MoveData> = Vec::new();
                for entry in species.moves.iter().filter(|m| m.learnable_by_level(self.level)) {
                    if known.len() == 4 || known.iter().any(|m| m.id == entry.id) {
                        continue;
                    }
                    if let Ok(move_data) = reference.move_by_id(entry.id) {
                        known.push(move_data.clone());
                    }
                }
                known
            }
        };

        let uuid = Uuid::from_u128(NEXT_UUID.fetch_add(1, Ordering::Relaxed) as u128);
        let mut critter = Critter::new(
            uuid,
            species,
            self.ivs,
            experience_for_level(self.level),
            moves,
        );
        for ailment in self.ailments {
            critter.add_ailment(ailment);
        }
        if let Some(hp) = self.current_hp {
            critter.set_hp(hp);
        }
        critter
    }
}

/// A player holding `critters`, all in the active order.
pub fn create_test_player(critters: Vec<Critter>) -> Player {
    let mut player = Player::new("Tester", 0);
    for critter in critters {
        player.add_critter(critter, 6);
    }
    player
}

/// Borrow the pieces of a [`BattleContext`] for one call.
pub fn with_context<T>(
    reference: &ReferenceData,
    rng: &mut dyn RandomSource,
    events: &mut EventBus,
    action: impl FnOnce(&mut BattleContext<'_>) -> T,
) -> T {
    let config = GameConfig::default();
    let mut ctx = BattleContext {
        reference,
        config: &config,
        rng,
        events,
    };
    action(&mut ctx)
}

/// Two critters and their stage records, for driving single turn steps
/// without an encounter around them.
pub struct TestDuel {
    pub player: Critter,
    pub opponent: Critter,
    pub player_stages: EncounterStages,
    pub opponent_stages: EncounterStages,
}

impl TestDuel {
    pub fn new(player: Critter, opponent: Critter) -> Self {
        Self {
            player,
            opponent,
            player_stages: EncounterStages::new(),
            opponent_stages: EncounterStages::new(),
        }
    }

    fn field(&mut self) -> Battlefield<'_> {
        Battlefield::new(
            &mut self.player,
            &mut self.player_stages,
            &mut self.opponent,
            &mut self.opponent_stages,
        )
    }

    pub fn step(
        &mut self,
        reference: &ReferenceData,
        attacker: Side,
        move_data: &MoveData,
        rng: &mut dyn RandomSource,
    ) -> (StepOutcome, Vec<BattleEvent>) {
        let mut events = EventBus::new();
        let outcome = with_context(reference, rng, &mut events, |ctx| {
            turn_step(&mut self.field(), attacker, move_data, ctx)
        });
        (outcome, events.into_events())
    }

    pub fn end_of_turn(&mut self, reference: &ReferenceData, order: [Side; 2]) -> Vec<BattleEvent> {
        let mut events = EventBus::new();
        let mut rng = crate::rng::ScriptedRng::new(Vec::new());
        with_context(reference, &mut rng, &mut events, |ctx| {
            end_of_turn(&mut self.field(), order, ctx)
        });
        events.into_events()
    }
}

/// Helper to assert a result is Ok and return the value, with a readable
/// failure message.
pub fn assert_ok<T>(result: EngineResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
