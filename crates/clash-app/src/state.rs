//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use clash_core::commands::PlayerCommand;
use clash_core::state::{GameStateSnapshot, MatchOutcome};

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    Player(PlayerCommand),
    /// Stop the game loop thread.
    Shutdown,
}

/// Handle to a running game loop.
///
/// The loop thread owns the engine. The host talks to it through
/// `command_tx` and reads `latest_snapshot`, which the loop replaces
/// after every frame.
pub struct GameLoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    pub(crate) thread: JoinHandle<MatchOutcome>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns false once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::Player(command))
            .is_ok()
    }

    /// Clone of the most recent snapshot, if a frame has run yet.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) -> Option<MatchOutcome> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.join()
    }

    /// Wait for the loop to end on its own. `None` if the thread panicked.
    pub fn join(self) -> Option<MatchOutcome> {
        match self.thread.join() {
            Ok(outcome) => Some(outcome),
            Err(_) => {
                tracing::error!("game loop thread panicked");
                None
            }
        }
    }
}
