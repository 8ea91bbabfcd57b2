//! Cosmic Clash demo: two scripted pilots play one match.
//!
//! Environment:
//! - `RUST_LOG`: log filter (default `info`)
//! - `LOG_FORMAT=json`: structured log output
//! - `CLASH_CONFIG`: path to a JSON `SimConfig`
//! - `CLASH_SEED`: overrides the config seed
//! - `CLASH_HEADLESS=1`: run as fast as possible instead of in real time
//! - `CLASH_MAX_SECONDS`: match time limit (default 120)

use std::process::ExitCode;
use std::time::{Duration, Instant};

use clash_app::demo::{DemoPilot, Pilot};
use clash_app::game_loop::{self, FRAME_DURATION};
use clash_core::constants::FRAME_RATE;
use clash_core::enums::Side;
use clash_core::error::{ClashError, ClashResult};
use clash_core::state::MatchOutcome;
use clash_sim::SimConfig;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn load_config() -> ClashResult<SimConfig> {
    let mut config = match std::env::var("CLASH_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading config");
            SimConfig::from_json(&std::fs::read_to_string(path)?)?
        }
        Err(_) => SimConfig::default(),
    };

    if let Ok(seed) = std::env::var("CLASH_SEED") {
        config.seed = seed
            .parse()
            .map_err(|_| ClashError::InvalidArgument(format!("CLASH_SEED {seed:?} is not a u64")))?;
    }
    Ok(config)
}

fn max_seconds() -> u64 {
    std::env::var("CLASH_MAX_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(120)
}

fn pilots() -> Vec<Box<dyn Pilot>> {
    vec![
        Box::new(DemoPilot::new(Side::Left)),
        Box::new(DemoPilot::new(Side::Right)),
    ]
}

fn run_headless(config: SimConfig, limit: Duration) -> ClashResult<MatchOutcome> {
    let max_frames = limit.as_secs() * u64::from(FRAME_RATE);
    let report = game_loop::simulate_match(config, &mut pilots(), max_frames)?;
    let snap = &report.final_snapshot;
    tracing::info!(
        frames = report.frames,
        left_score = snap.left.score,
        right_score = snap.right.score,
        left_health = snap.left.health,
        right_health = snap.right.health,
        "headless match finished"
    );
    Ok(report.outcome)
}

fn run_realtime(config: SimConfig, limit: Duration) -> ClashResult<MatchOutcome> {
    let handle = game_loop::spawn_game_loop(config)?;
    let mut pilots = pilots();
    let deadline = Instant::now() + limit;

    while !handle.is_finished() && Instant::now() < deadline {
        if let Some(snapshot) = handle.latest() {
            for pilot in pilots.iter_mut() {
                for command in pilot.commands(&snapshot) {
                    handle.send(command);
                }
            }
        }
        std::thread::sleep(FRAME_DURATION);
    }

    if let Some(snap) = handle.latest() {
        tracing::info!(
            frame = snap.frame,
            left_score = snap.left.score,
            right_score = snap.right.score,
            "final score"
        );
    }
    handle.shutdown().ok_or(ClashError::LoopPanicked)
}

fn main() -> ExitCode {
    init_tracing();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    let limit = Duration::from_secs(max_seconds());
    let headless = matches!(std::env::var("CLASH_HEADLESS").as_deref(), Ok("1"));
    tracing::info!(seed = config.seed, headless, "starting demo match");

    let result = if headless {
        run_headless(config, limit)
    } else {
        run_realtime(config, limit)
    };

    match result {
        Ok(MatchOutcome::Won { winner }) => {
            tracing::info!(?winner, "winner");
            ExitCode::SUCCESS
        }
        Ok(MatchOutcome::InProgress) => {
            tracing::info!("time limit reached without a winner");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, "demo failed");
            ExitCode::FAILURE
        }
    }
}
