//! Drone spawning: one drone per elapsed interval, no catch-up.

use hecs::World;

use clash_core::events::SimEvent;
use clash_core::types::{elapsed_since, Millis};

use crate::config::SimConfig;
use crate::spawn_source::SpawnSource;
use crate::world_setup;

/// Spawn timer state.
#[derive(Debug, Clone, Copy)]
pub struct SpawnClock {
    /// Timestamp of the most recent spawn (or of match start).
    pub last_spawn_ms: Millis,
    pub interval_ms: Millis,
}

impl SpawnClock {
    pub fn new(start_ms: Millis, interval_ms: Millis) -> Self {
        Self {
            last_spawn_ms: start_ms,
            interval_ms,
        }
    }

    /// True when strictly more than one interval has passed. Resets the
    /// clock to `now` when it fires, however many intervals were missed.
    pub fn poll(&mut self, now: Millis) -> bool {
        if elapsed_since(now, self.last_spawn_ms) > self.interval_ms {
            self.last_spawn_ms = now;
            true
        } else {
            false
        }
    }
}

/// Check the clock and spawn at most one drone.
pub fn run(
    world: &mut World,
    source: &mut dyn SpawnSource,
    clock: &mut SpawnClock,
    config: &SimConfig,
    next_order: &mut u64,
    events: &mut Vec<SimEvent>,
    now: Millis,
) {
    if !clock.poll(now) {
        return;
    }

    let placement = source.next_drone(config.ship.min_y, config.ship.max_y);
    let (_, order) =
        world_setup::spawn_drone(world, next_order, &config.arena, &config.drone, placement);

    let speed = placement.heading.sign() * config.drone.speed;
    tracing::debug!(order = order.0, y = placement.y, speed, now, "drone spawned");
    events.push(SimEvent::DroneSpawned {
        order: order.0,
        y: placement.y,
        speed,
    });
}
