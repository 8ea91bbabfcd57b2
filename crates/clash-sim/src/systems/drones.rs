//! Drone pass: move, strike ships, and remove spent drones.

use hecs::{Entity, World};

use clash_core::components::Drone;
use clash_core::events::SimEvent;
use clash_core::tuning::DroneTuning;
use clash_core::types::Arena;

use crate::engine::Ships;

use super::ordered;

/// For each drone in spawn order: step it, check it against the ships,
/// and queue it for removal once it is no longer alive. A drone killed by
/// projectiles earlier in the frame still makes this last move and can
/// still strike a ship before it is removed.
pub fn run(
    world: &mut World,
    ships: &mut Ships,
    arena: &Arena,
    tuning: &DroneTuning,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, order) in ordered::<Drone>(world) {
        let mut drone = match world.get::<&mut Drone>(entity) {
            Ok(drone) => drone,
            Err(_) => continue,
        };

        drone.step(arena);
        let (left, right) = ships.pair_mut();
        if let Some(struck) = drone.check_ship_collision(left, right, tuning.ship_proximity) {
            let ship = ships.get(struck);
            tracing::debug!(
                side = ?struck,
                health = ship.health,
                drone = order.0,
                "ship struck by drone"
            );
            events.push(SimEvent::ShipHit {
                side: struck,
                health: ship.health,
                drone: order.0,
            });
        }

        if !drone.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
