//! Game loop thread: runs the simulation engine at 60 Hz and publishes snapshots.
//!
//! The engine is built on the caller's thread so config errors surface
//! before anything is spawned, then moved into the loop thread. Commands
//! arrive via an `mpsc` channel; the latest snapshot is stored in shared
//! state for polling. The loop ends on shutdown, on channel disconnect,
//! or when a ship wins.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use clash_core::constants::FRAME_RATE;
use clash_core::error::ClashResult;
use clash_core::state::{GameStateSnapshot, MatchOutcome};
use clash_core::types::Millis;
use clash_sim::{SimConfig, SimulationEngine};

use crate::demo::Pilot;
use crate::state::{GameLoopCommand, GameLoopHandle};

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Synthetic timestamp of a frame, measured from match start.
pub fn frame_time_ms(frame: u64) -> Millis {
    frame * 1000 / u64::from(FRAME_RATE)
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(config: SimConfig) -> ClashResult<GameLoopHandle> {
    let engine = SimulationEngine::new(config)?;
    spawn_with_engine(engine)
}

/// Spawns the game loop around an already-built engine.
pub fn spawn_with_engine(engine: SimulationEngine) -> ClashResult<GameLoopHandle> {
    let (command_tx, command_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("clash-game-loop".into())
        .spawn(move || run_game_loop(engine, command_rx, &shared))?;

    Ok(GameLoopHandle {
        command_tx,
        latest_snapshot,
        thread,
    })
}

fn millis_since(start: Instant) -> Millis {
    Millis::try_from(start.elapsed().as_millis()).unwrap_or(Millis::MAX)
}

/// The game loop. Returns the outcome at the moment it stopped.
fn run_game_loop(
    mut engine: SimulationEngine,
    command_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> MatchOutcome {
    let origin = engine.config().start_ms;
    let started = Instant::now();
    let mut next_frame_time = started;
    tracing::info!(seed = engine.config().seed, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match command_rx.try_recv() {
                Ok(GameLoopCommand::Player(command)) => {
                    if let Err(err) = engine.apply_command(command) {
                        tracing::warn!(%err, "player command rejected");
                    }
                }
                Ok(GameLoopCommand::Shutdown) => {
                    tracing::info!(frame = engine.frame(), "game loop shut down");
                    return engine.snapshot().outcome();
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(frame = engine.frame(), "command channel closed");
                    return engine.snapshot().outcome();
                }
            }
        }

        // 2. Advance one frame on the wall clock
        let snapshot = engine.advance(origin.saturating_add(millis_since(started)));
        let outcome = snapshot.outcome();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if let MatchOutcome::Won { winner } = outcome {
            tracing::info!(?winner, frame = engine.frame(), "match over");
            return outcome;
        }

        // 4. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

/// Result of a headless match.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub outcome: MatchOutcome,
    /// Frames advanced before the match ended or the cap was hit.
    pub frames: u64,
    pub final_snapshot: GameStateSnapshot,
}

/// Play a match without a clock or a thread, as fast as possible.
///
/// Each pilot sees the previous frame's snapshot and its commands are
/// applied before the next `advance`. Time is synthetic: frame `n` runs at
/// `start_ms + n * 1000 / FRAME_RATE`. Stops after `max_frames` if nobody
/// has won by then.
pub fn simulate_match(
    config: SimConfig,
    pilots: &mut [Box<dyn Pilot>],
    max_frames: u64,
) -> ClashResult<MatchReport> {
    let mut engine = SimulationEngine::new(config)?;
    let origin = engine.config().start_ms;
    let mut snapshot = engine.snapshot();

    for frame in 1..=max_frames {
        for pilot in pilots.iter_mut() {
            for command in pilot.commands(&snapshot) {
                if let Err(err) = engine.apply_command(command) {
                    tracing::warn!(%err, "pilot command rejected");
                }
            }
        }

        snapshot = engine.advance(origin.saturating_add(frame_time_ms(frame)));
        if let outcome @ MatchOutcome::Won { .. } = snapshot.outcome() {
            return Ok(MatchReport {
                outcome,
                frames: frame,
                final_snapshot: snapshot,
            });
        }
    }

    Ok(MatchReport {
        outcome: MatchOutcome::InProgress,
        frames: max_frames,
        final_snapshot: snapshot,
    })
}
