//! Events emitted by the simulation for sound and UI feedback.
//!
//! Drained into the snapshot returned by each `advance`.

use serde::{Deserialize, Serialize};

use crate::enums::Side;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new drone entered the arena.
    DroneSpawned { order: u64, y: f64, speed: f64 },
    /// A ship's shot was accepted.
    ProjectileFired { owner: Side, order: u64 },
    /// A projectile left the arena without hitting anything.
    ProjectileExpired { order: u64 },
    /// A projectile damaged a drone that survived.
    DroneHit { order: u64, health: u8 },
    /// A projectile delivered a drone's final hit.
    DroneDestroyed { order: u64 },
    /// A drone reached a ship; the opponent scored.
    ShipHit { side: Side, health: u8, drone: u64 },
}
