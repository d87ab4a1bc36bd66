//! Headless runner: plays a session at a fixed tick and logs what happens.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use vaporquest::core::{GameConfig, GameData, GameError, GameEvent, Session};

const TICK_SECONDS: f64 = 0.1;

struct RunConfig {
    seed: Option<u64>,
    seconds: f64,
    config_path: Option<PathBuf>,
    load: bool,
    export: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            seconds: 600.0,
            config_path: None,
            load: false,
            export: false,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let run = parse_args(&args);

    if let Err(err) = run_session(&run) {
        eprintln!("vaporquest: {}", err);
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> RunConfig {
    let mut run = RunConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    run.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-t" | "--seconds" => {
                if i + 1 < args.len() {
                    run.seconds = args[i + 1].parse().unwrap_or(600.0);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    run.config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--load" => run.load = true,
            "--export" => run.export = true,
            "-h" | "--help" => {
                println!("VaporQuest - headless idle RPG session\n");
                println!("Usage: vaporquest [options]\n");
                println!("Options:");
                println!("  -s, --seed N       Seed the random number generator");
                println!("  -t, --seconds S    Simulated seconds to play (default 600)");
                println!("  -c, --config PATH  Load settings from a TOML file");
                println!("      --load         Continue from the configured save slot");
                println!("      --export       Print the save slot as JSON when done");
                println!("  -h, --help         Show this help message");
                process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {}", other);
                eprintln!("Run 'vaporquest --help' for usage.");
                process::exit(1);
            }
        }
        i += 1;
    }

    run
}

fn run_session(run: &RunConfig) -> Result<(), GameError> {
    let config = match &run.config_path {
        Some(path) => GameConfig::load(path),
        None => GameConfig::default(),
    };
    let data = Arc::new(GameData::standard()?);
    let mut session = Session::new(data, config)?;
    let mut rng = match run.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut pending: VecDeque<GameEvent> = VecDeque::new();
    if run.load {
        match session.load_game() {
            Ok(events) => pending.extend(events),
            Err(err) => {
                warn!("{}, starting a new game", err);
                pending.extend(session.new_game());
            }
        }
    } else {
        pending.extend(session.new_game());
    }

    let mut elapsed = 0.0;
    let mut finished = drain(&mut session, &mut pending);
    while !finished && elapsed < run.seconds {
        pending.extend(session.tick(TICK_SECONDS, &mut rng));
        finished = drain(&mut session, &mut pending);
        elapsed += TICK_SECONDS;
    }

    let player = session.player();
    println!();
    println!("Played {:.0}s", elapsed);
    println!("  Level:      {}", player.level);
    println!("  Experience: {}", player.experience);
    println!("  Area:       {:?}", session.current_area());
    println!("  Items:      {}", player.inventory.total());
    println!("  Loot box:   {}", player.loot_box.len());

    if run.export {
        println!("{}", session.saves().export_json(session.config().save.slot)?);
    }
    Ok(())
}

/// Logs queued events and answers the ones a player would react to.
/// Returns true once the session is back on the main menu.
fn drain(session: &mut Session, pending: &mut VecDeque<GameEvent>) -> bool {
    while let Some(event) = pending.pop_front() {
        match event {
            GameEvent::LogLine(line) => info!("{}", line),
            GameEvent::ShowError(message) => warn!("{}", message),
            GameEvent::LoadArea { area, name, .. } => {
                info!(area, "now exploring {}", name);
                session.confirm_area_loaded();
            }
            GameEvent::PlayCutscene(cutscene) => {
                info!(?cutscene, "cutscene");
                pending.extend(session.end_cutscene());
            }
            GameEvent::AreaUnlocked { .. } => pending.extend(session.attempt_next_area()),
            GameEvent::LootBoxCount(count) if count > 0 => claim_loot(session, pending),
            GameEvent::FinalBlowReady(true) => pending.extend(session.final_blow()),
            GameEvent::ReturnToMainMenu => {
                info!("back at the main menu");
                return true;
            }
            other => debug!(?other, "event"),
        }
    }
    false
}

/// Opens every loot box entry and wears anything that fills an empty slot.
fn claim_loot(session: &mut Session, pending: &mut VecDeque<GameEvent>) {
    let drops: Vec<_> = session
        .player()
        .loot_box
        .entries()
        .iter()
        .enumerate()
        .filter(|(_, drop)| !drop.opened)
        .map(|(index, drop)| (index, Arc::clone(&drop.item)))
        .collect();

    for (index, item) in drops {
        pending.extend(session.unpack_loot(index));
        if session.player().equipment.get(item.category).is_none() {
            let (_, events) = session.try_equip(item.category, Some(item));
            pending.extend(events);
        }
    }
    for event in session.clear_opened_loot() {
        if !matches!(event, GameEvent::LootBoxCount(_)) {
            pending.push_back(event);
        }
    }
}
