//! Game state snapshot: the read-only view handed to presentation after
//! each step.

use serde::{Deserialize, Serialize};

use crate::components::{Drone, Projectile, Ship, SpawnOrder};
use crate::constants::{DRONE_MAX_HEALTH, WINNING_SCORE};
use crate::enums::Side;
use crate::events::SimEvent;
use crate::types::{Millis, Position};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    /// Number of completed `advance` calls.
    pub frame: u64,
    /// Timestamp passed to the most recent `advance`.
    pub time_ms: Millis,
    pub left: ShipView,
    pub right: ShipView,
    /// Live drones in spawn order.
    pub drones: Vec<DroneView>,
    /// Live projectiles in spawn order.
    pub projectiles: Vec<ProjectileView>,
    /// Events produced by the step that built this snapshot.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub side: Side,
    pub position: Position,
    pub health: u8,
    pub score: u32,
    pub alive: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneView {
    pub order: u64,
    pub position: Position,
    pub speed: f64,
    pub health: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub order: u64,
    pub position: Position,
    pub owner: Side,
}

/// Result of the host's match-end check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    InProgress,
    Won { winner: Side },
}

impl From<&Ship> for ShipView {
    fn from(ship: &Ship) -> Self {
        Self {
            side: ship.side,
            position: ship.position,
            health: ship.health,
            score: ship.score,
            alive: ship.alive,
        }
    }
}

impl DroneView {
    pub fn new(order: SpawnOrder, drone: &Drone) -> Self {
        Self {
            order: order.0,
            position: drone.position,
            speed: drone.speed,
            health: drone.health,
        }
    }

    /// Visual intensity in `[0, 1]`, proportional to remaining health.
    pub fn intensity(&self) -> f64 {
        f64::from(self.health) / f64::from(DRONE_MAX_HEALTH)
    }
}

impl ProjectileView {
    pub fn new(order: SpawnOrder, projectile: &Projectile) -> Self {
        Self {
            order: order.0,
            position: projectile.position,
            owner: projectile.owner,
        }
    }
}

impl GameStateSnapshot {
    pub fn ship(&self, side: Side) -> &ShipView {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// A side wins by reaching `WINNING_SCORE` or by outliving its
    /// opponent. The left side is checked first.
    pub fn outcome(&self) -> MatchOutcome {
        for side in Side::BOTH {
            let ship = self.ship(side);
            let opponent = self.ship(side.opponent());
            if ship.score >= WINNING_SCORE || !opponent.alive {
                return MatchOutcome::Won { winner: side };
            }
        }
        MatchOutcome::InProgress
    }
}
