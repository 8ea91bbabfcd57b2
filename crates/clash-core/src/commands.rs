//! Player intents sent from the input-mapping layer to the simulation.
//!
//! Ship ids arrive raw (1 = left, 2 = right) and are validated by the engine.

use serde::{Deserialize, Serialize};

use crate::enums::Side;
use crate::error::ClashResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Set the desired vertical velocity of a ship.
    SetVerticalIntent { ship: u8, dy: f64 },
    /// Ask a ship to fire on the next step.
    RequestFire { ship: u8 },
}

impl PlayerCommand {
    pub fn ship_id(&self) -> u8 {
        match self {
            PlayerCommand::SetVerticalIntent { ship, .. } | PlayerCommand::RequestFire { ship } => {
                *ship
            }
        }
    }

    /// Resolve the addressed ship.
    pub fn side(&self) -> ClashResult<Side> {
        Side::from_id(self.ship_id())
    }
}
