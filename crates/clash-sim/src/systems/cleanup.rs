//! Cleanup system: removes projectiles that have left the arena.

use hecs::{Entity, World};

use clash_core::components::Projectile;
use clash_core::events::SimEvent;
use clash_core::types::Arena;

use super::ordered;

/// Despawn every out-of-bounds projectile, in spawn order.
pub fn cull_projectiles(
    world: &mut World,
    arena: &Arena,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    for (entity, order) in ordered::<Projectile>(world) {
        let out = world
            .get::<&Projectile>(entity)
            .map(|projectile| projectile.is_out_of_bounds(arena))
            .unwrap_or(false);
        if out {
            despawn_buffer.push(entity);
            events.push(SimEvent::ProjectileExpired { order: order.0 });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
