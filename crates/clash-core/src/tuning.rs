//! Gameplay tuning for ships, drones and projectiles.
//!
//! Kept separate from host/runtime settings (frame rate, channel sizes).
//! Every struct deserializes with per-field defaults so a config file
//! only needs to mention what it changes.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ClashError, ClashResult};
use crate::types::{Arena, Millis};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipTuning {
    /// Distance from the ship's own side edge.
    pub inset: f64,
    pub min_y: f64,
    pub max_y: f64,
    /// Largest |dy| accepted by `set_vertical_intent`.
    pub max_intent: f64,
    pub fire_cooldown_ms: Millis,
}

impl Default for ShipTuning {
    fn default() -> Self {
        Self {
            inset: SHIP_INSET,
            min_y: SHIP_MIN_Y,
            max_y: SHIP_MAX_Y,
            max_intent: SHIP_MAX_INTENT,
            fire_cooldown_ms: FIRE_COOLDOWN_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneTuning {
    /// Horizontal speed magnitude per step.
    pub speed: f64,
    /// Horizontal distance under which a drone strikes a ship.
    pub ship_proximity: f64,
    pub spawn_interval_ms: Millis,
}

impl Default for DroneTuning {
    fn default() -> Self {
        Self {
            speed: DRONE_SPEED,
            ship_proximity: DRONE_SHIP_PROXIMITY,
            spawn_interval_ms: DRONE_SPAWN_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Speed magnitude per step; the sign comes from the firing side.
    pub speed: f64,
    /// Half extent of the square hit box.
    pub hit_half_extent: f64,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            hit_half_extent: PROJECTILE_HIT_HALF_EXTENT,
        }
    }
}

fn require(ok: bool, what: impl FnOnce() -> String) -> ClashResult<()> {
    if ok {
        Ok(())
    } else {
        Err(ClashError::InvalidArgument(what()))
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl ShipTuning {
    pub fn validate(&self, arena: &Arena) -> ClashResult<()> {
        require(
            self.inset.is_finite() && (0.0..=arena.width).contains(&self.inset),
            || format!("ship inset {} outside arena width {}", self.inset, arena.width),
        )?;
        require(
            self.min_y.is_finite()
                && self.max_y.is_finite()
                && 0.0 <= self.min_y
                && self.min_y <= self.max_y
                && self.max_y <= arena.height,
            || format!("ship band [{}, {}] is not inside the arena", self.min_y, self.max_y),
        )?;
        require(
            self.max_intent.is_finite() && self.max_intent >= 0.0,
            || format!("ship max_intent {} must be a finite non-negative number", self.max_intent),
        )
    }
}

impl DroneTuning {
    pub fn validate(&self) -> ClashResult<()> {
        require(positive(self.speed), || {
            format!("drone speed {} must be positive", self.speed)
        })?;
        require(positive(self.ship_proximity), || {
            format!("drone ship_proximity {} must be positive", self.ship_proximity)
        })
    }
}

impl ProjectileTuning {
    pub fn validate(&self) -> ClashResult<()> {
        require(positive(self.speed), || {
            format!("projectile speed {} must be positive", self.speed)
        })?;
        require(positive(self.hit_half_extent), || {
            format!("projectile hit_half_extent {} must be positive", self.hit_half_extent)
        })
    }
}
