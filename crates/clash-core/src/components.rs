//! Simulation entities and their own per-step rules.
//!
//! `Drone`, `Projectile` and `SpawnOrder` are stored as hecs components by
//! the engine. Ships are few and fixed, so the engine holds them directly.
//! The rules here touch only the entity itself (and, for drone/ship
//! contact, the two ships). Cross-entity passes live in the sim systems.

use serde::{Deserialize, Serialize};

use crate::constants::{DRONE_MAX_HEALTH, SHIP_MAX_HEALTH};
use crate::enums::Side;
use crate::tuning::ShipTuning;
use crate::types::{elapsed_since, horizontal_distance, Arena, Millis, Position};

/// Insertion sequence number. Defines "collection order" for every
/// ordered scan the engine performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpawnOrder(pub u64);

/// A player-controlled ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub side: Side,
    /// x is fixed for the match; y moves within the tuning band.
    pub position: Position,
    /// Desired vertical velocity for the next step.
    pub dy: f64,
    pub health: u8,
    pub score: u32,
    pub alive: bool,
    /// Set by `request_fire`, cleared when the engine resolves it.
    pub fire_requested: bool,
    pub last_fire_ms: Millis,
    pub tuning: ShipTuning,
}

impl Ship {
    /// Create a ship at its side's fixed x, vertically centred.
    pub fn new(side: Side, arena: &Arena, tuning: ShipTuning) -> Self {
        let x = match side {
            Side::Left => tuning.inset,
            Side::Right => arena.width - tuning.inset,
        };
        let y = arena.center().y.clamp(tuning.min_y, tuning.max_y);
        Self {
            side,
            position: Position::new(x, y),
            dy: 0.0,
            health: SHIP_MAX_HEALTH,
            score: 0,
            alive: true,
            fire_requested: false,
            last_fire_ms: 0,
            tuning,
        }
    }

    /// Set the vertical intent, clamped to `±max_intent`.
    /// Non-finite input is treated as "stop".
    pub fn set_vertical_intent(&mut self, dy: f64) {
        let limit = self.tuning.max_intent;
        self.dy = if dy.is_finite() {
            dy.clamp(-limit, limit)
        } else {
            0.0
        };
    }

    pub fn request_fire(&mut self) {
        self.fire_requested = true;
    }

    /// Clear and return the pending fire request.
    pub fn take_fire_request(&mut self) -> bool {
        std::mem::take(&mut self.fire_requested)
    }

    pub fn step(&mut self) {
        self.position.y = (self.position.y + self.dy).clamp(self.tuning.min_y, self.tuning.max_y);
    }

    /// Accept a shot only when strictly more than the cooldown has passed
    /// since the last accepted one. Rejected shots are not remembered.
    pub fn try_consume_fire(&mut self, now: Millis) -> bool {
        if elapsed_since(now, self.last_fire_ms) > self.tuning.fire_cooldown_ms {
            self.last_fire_ms = now;
            true
        } else {
            false
        }
    }

    pub fn apply_hit(&mut self) {
        if !self.alive {
            return;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

/// A roaming hostile drone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drone {
    pub position: Position,
    /// Signed horizontal speed per step.
    pub speed: f64,
    pub health: u8,
    pub alive: bool,
}

impl Drone {
    pub fn new(position: Position, speed: f64) -> Self {
        Self {
            position,
            speed,
            health: DRONE_MAX_HEALTH,
            alive: true,
        }
    }

    /// Move horizontally; bounce when touching or crossing either edge.
    pub fn step(&mut self, arena: &Arena) {
        self.position.x += self.speed;
        if self.position.x <= 0.0 || self.position.x >= arena.width {
            self.reverse();
        }
    }

    /// Flip direction and recoil one step the new way. Shared by edge
    /// bounces and survivable hits.
    pub fn reverse(&mut self) {
        self.speed = -self.speed;
        self.position.x += self.speed;
    }

    pub fn apply_hit(&mut self) {
        if !self.alive {
            return;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.alive = false;
        } else {
            self.reverse();
        }
    }

    /// Strike whichever ship is within `proximity` horizontally, left ship
    /// first. The struck ship takes a hit, its opponent scores, and the
    /// drone is spent. Applies to a drone already destroyed this frame too.
    /// Returns the struck side.
    pub fn check_ship_collision(
        &mut self,
        left: &mut Ship,
        right: &mut Ship,
        proximity: f64,
    ) -> Option<Side> {
        let (struck, scorer) = if horizontal_distance(self.position, left.position) < proximity {
            (left, right)
        } else if horizontal_distance(self.position, right.position) < proximity {
            (right, left)
        } else {
            return None;
        };
        struck.apply_hit();
        scorer.score += 1;
        self.alive = false;
        Some(struck.side)
    }
}

/// A shot travelling horizontally away from the ship that fired it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub position: Position,
    /// Signed horizontal speed per step.
    pub speed: f64,
    pub owner: Side,
}

impl Projectile {
    /// Launch from the ship's current position, heading toward the opponent.
    pub fn fired_by(ship: &Ship, speed: f64) -> Self {
        Self {
            position: ship.position,
            speed: ship.side.facing() * speed.abs(),
            owner: ship.side,
        }
    }

    pub fn step(&mut self) {
        self.position.x += self.speed;
    }

    pub fn is_out_of_bounds(&self, arena: &Arena) -> bool {
        !arena.contains_x(self.position.x)
    }
}
