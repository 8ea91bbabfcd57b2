//! Fire control: turns pending fire requests into projectiles.

use hecs::World;

use clash_core::events::SimEvent;
use clash_core::tuning::ProjectileTuning;
use clash_core::types::Millis;

use crate::engine::Ships;
use crate::world_setup;

/// Resolve each ship's fire request, left then right. A request inside
/// the cooldown is dropped; either way the request is cleared.
pub fn run(
    world: &mut World,
    ships: &mut Ships,
    next_order: &mut u64,
    tuning: &ProjectileTuning,
    events: &mut Vec<SimEvent>,
    now: Millis,
) {
    for ship in ships.iter_mut() {
        if !ship.take_fire_request() {
            continue;
        }
        if !ship.try_consume_fire(now) {
            tracing::trace!(side = ?ship.side, now, "fire request inside cooldown dropped");
            continue;
        }

        let (_, order) = world_setup::spawn_projectile(world, next_order, ship, tuning);
        tracing::debug!(side = ?ship.side, order = order.0, y = ship.position.y, "projectile fired");
        events.push(SimEvent::ProjectileFired {
            owner: ship.side,
            order: order.0,
        });
    }
}
