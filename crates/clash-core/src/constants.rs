//! Simulation constants and default tuning values.

use crate::types::Millis;

/// Host frame rate (Hz). One `advance` per frame.
pub const FRAME_RATE: u32 = 60;

// --- Arena ---

/// Logical arena width.
pub const ARENA_WIDTH: f64 = 1000.0;

/// Logical arena height.
pub const ARENA_HEIGHT: f64 = 800.0;

// --- Ships ---

/// Distance of each ship from its own side edge.
pub const SHIP_INSET: f64 = 50.0;

/// Topmost y a ship may occupy; the band above holds the status HUD.
pub const SHIP_MIN_Y: f64 = 80.0;

/// Bottommost y a ship may occupy.
pub const SHIP_MAX_Y: f64 = ARENA_HEIGHT - 30.0;

/// Largest vertical intent magnitude accepted per step.
pub const SHIP_MAX_INTENT: f64 = 5.0;

/// Ship starting (and maximum) health.
pub const SHIP_MAX_HEALTH: u8 = 3;

/// Minimum time between two accepted shots from one ship.
pub const FIRE_COOLDOWN_MS: Millis = 200;

// --- Projectiles ---

/// Projectile speed magnitude (units per step).
pub const PROJECTILE_SPEED: f64 = 10.0;

/// Half extent of the square hit box around a projectile.
pub const PROJECTILE_HIT_HALF_EXTENT: f64 = 20.0;

// --- Drones ---

/// Drone horizontal speed magnitude (units per step).
pub const DRONE_SPEED: f64 = 2.0;

/// Drone starting (and maximum) health.
pub const DRONE_MAX_HEALTH: u8 = 3;

/// Horizontal distance under which a drone strikes a ship.
pub const DRONE_SHIP_PROXIMITY: f64 = 30.0;

/// Mean time between drone spawns.
pub const DRONE_SPAWN_INTERVAL_MS: Millis = 1500;

// --- Match ---

/// Score that wins the match. Checked by the host, not the engine.
pub const WINNING_SCORE: u32 = 3;
