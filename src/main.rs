use critter_adventure::world::map::{
    Direction, EncounterLevel, EncounterTable, StaticMap, TileKind, TilePosition,
};
use critter_adventure::{EngineError, GameConfig, ReferenceData, SeededRng, StepResult, World};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_SEED: u64 = 12345;
const MAX_STEPS: usize = 200;
const MAX_TURNS: usize = 50;

struct Options {
    data_path: PathBuf,
    config_path: Option<PathBuf>,
    seed: u64,
    json: bool,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        data_path: PathBuf::from("data"),
        config_path: None,
        seed: DEFAULT_SEED,
        json: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                options.data_path = args.next().map(PathBuf::from).ok_or("--data needs a path")?;
            }
            "--config" => {
                options.config_path =
                    Some(args.next().map(PathBuf::from).ok_or("--config needs a path")?);
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                options.seed = value
                    .parse()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
            }
            "--json" => options.json = true,
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }
    Ok(options)
}

/// A small meadow: a heal tile by the start and a band of tall grass.
fn meadow() -> StaticMap {
    let mut map = StaticMap::new(1, 8, 6, TilePosition::new(1, 1))
        .with_tile(TilePosition::new(0, 1), TileKind::Heal)
        .with_encounters(EncounterTable {
            candidates: vec![(16, 40), (19, 40), (10, 15), (25, 5)],
            level: Some(EncounterLevel {
                mean: 4.0,
                std_dev: 1.0,
            }),
        });
    for x in 2..8 {
        map = map.with_tile(TilePosition::new(x, 1), TileKind::Grass);
    }
    map
}

fn run(options: &Options) -> Result<(), EngineError> {
    let reference = Arc::new(ReferenceData::load_from_dir(Path::new(&options.data_path))?);
    let config = match &options.config_path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let mut rng = SeededRng::new(options.seed);
    let mut world = World::new(reference, config, "Player");

    let starter = world.create_critter(4, 5, &mut rng)?;
    println!(
        "You received a level {} {} with {} HP.",
        starter.level(),
        starter.display_name(),
        starter.max_hp()
    );
    world.give_critter(starter);

    let map = meadow();
    world.enter_area(&map)?;

    // Pace along the grass until something jumps out.
    let mut direction = Direction::Right;
    let mut found = None;
    for _ in 0..MAX_STEPS {
        match world.step(direction, &map, &mut rng)? {
            StepResult::Encounter(handle) => {
                found = Some(handle);
                break;
            }
            StepResult::Blocked => {
                direction = match direction {
                    Direction::Right => Direction::Left,
                    _ => Direction::Right,
                };
            }
            _ => {}
        }
    }
    let Some(handle) = found else {
        println!("Nothing appeared after {} steps.", MAX_STEPS);
        return Ok(());
    };
    for line in &handle.log {
        println!("{}", line);
    }

    for _ in 0..MAX_TURNS {
        let result = world.submit_turn(0, &mut rng)?;
        for line in &result.log {
            println!("{}", line);
        }
        if options.json {
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{}", json),
                Err(e) => log::warn!("Could not encode turn result: {}", e),
            }
        }
        if result.outcome.is_some() {
            break;
        }
    }

    if let Some(critter) = world.player().critters.first() {
        println!(
            "{} is level {} with {}/{} HP and {} experience.",
            critter.display_name(),
            critter.level(),
            critter.current_hp(),
            critter.max_hp(),
            critter.experience
        );
    }
    Ok(())
}

fn main() {
    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Usage: critter-adventure [--data DIR] [--config FILE] [--seed N] [--json]");
            std::process::exit(2);
        }
    };
    if let Err(e) = run(&options) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
