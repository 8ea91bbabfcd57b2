//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::error::{ClashError, ClashResult};

/// Which half of the arena a ship defends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player 1.
    Left,
    /// Player 2.
    Right,
}

impl Side {
    /// Both sides in update order.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// External ship identifier (1 = left, 2 = right).
    pub fn id(self) -> u8 {
        match self {
            Side::Left => 1,
            Side::Right => 2,
        }
    }

    /// Resolve an external ship identifier.
    pub fn from_id(id: u8) -> ClashResult<Side> {
        match id {
            1 => Ok(Side::Left),
            2 => Ok(Side::Right),
            other => Err(ClashError::InvalidArgument(format!(
                "unknown ship id {other} (expected 1 or 2)"
            ))),
        }
    }

    /// Sign of the horizontal velocity of shots fired from this side.
    pub fn facing(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

impl TryFrom<u8> for Side {
    type Error = ClashError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Side::from_id(id)
    }
}

/// Initial horizontal direction of a freshly spawned drone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    East,
    West,
}

impl Heading {
    pub fn sign(self) -> f64 {
        match self {
            Heading::East => 1.0,
            Heading::West => -1.0,
        }
    }
}
