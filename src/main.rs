//! Flappy Volley entry point
//!
//! Headless driver standing in for the rendering collaborator: it owns the
//! frame loop, scripts the pointer, and logs what a renderer would draw.
//! Usage: `flappy-volley [seed] [max-ticks] [tuning.json]`

use std::env;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use flappy_volley::sim::{GameMode, GameState, Side, TickInput, tick};
use flappy_volley::{BestRuns, Tuning};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let seed = match args.get(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("seed must be an integer, got {arg:?}");
                return ExitCode::FAILURE;
            }
        },
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };

    let max_ticks: u64 = match args.get(2).map(|a| a.parse()) {
        Some(Ok(n)) => n,
        Some(Err(_)) => {
            log::error!("max-ticks must be an integer, got {:?}", args[2]);
            return ExitCode::FAILURE;
        }
        None => 20_000,
    };

    let tuning = match args.get(3) {
        Some(path) => match load_tuning(path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("failed to load tuning from {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    if let Err(err) = tuning.validate() {
        log::error!("invalid tuning: {err}");
        return ExitCode::FAILURE;
    }

    log::info!("Flappy Volley starting (seed {seed})");

    let mut state = GameState::new(tuning, seed);
    let mut best = BestRuns::new();

    for frame in 0..max_ticks {
        // Scripted pointer: shadow the bird with a slow wobble so the player
        // is good but not perfect
        let pointer_y = state.birds.first().map(|bird| {
            let wobble = (frame as f32 / 30.0).sin() * 60.0;
            bird.pos.y + wobble
        });
        tick(&mut state, &TickInput { pointer_y });

        if state.events.scored.is_some() {
            log::info!("display: {}", state.display_line());
        }
        if state.events.bird_spawned {
            log::debug!("bird spawned, {} aloft", state.birds.len());
        }

        if let GameMode::Terminal { winner } = state.mode {
            let who = match winner {
                Side::Player => "player",
                Side::Robot => "robot",
            };
            log::info!(
                "run over after {} ticks: {} wins {} : {}",
                state.tick_count,
                who,
                state.score.player,
                state.score.robot
            );
            return ExitCode::SUCCESS;
        }

        if let Some(report) = state.report {
            match best.record(&report, seed) {
                Some(rank) => log::info!(
                    "endless over: {} birds after {} ticks (rank {rank})",
                    report.live_birds,
                    report.at_tick
                ),
                None => log::info!(
                    "endless over: {} birds after {} ticks",
                    report.live_birds,
                    report.at_tick
                ),
            }
            return ExitCode::SUCCESS;
        }
    }

    log::info!(
        "stopped after {max_ticks} ticks in {:?} mode, score {} : {}",
        state.mode,
        state.score.player,
        state.score.robot
    );
    ExitCode::SUCCESS
}

fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Tuning::from_json(&json)?)
}
