//! Projectile–drone collision.
//!
//! Each projectile, in spawn order, scans the drones in spawn order and
//! damages the first one inside its hit box, then is consumed. Nothing
//! stops two projectiles from landing on the same drone in one frame;
//! both hits count. Drones stay in the scan until the drone pass removes
//! them, so a drone killed earlier in the pass still consumes later shots.

use hecs::{Entity, World};

use clash_core::components::{Drone, Projectile};
use clash_core::events::SimEvent;
use clash_core::tuning::ProjectileTuning;
use clash_core::types::within_box;

use super::ordered;

pub fn run(
    world: &mut World,
    tuning: &ProjectileTuning,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<SimEvent>,
) {
    despawn_buffer.clear();

    let projectiles = ordered::<Projectile>(world);
    let drones = ordered::<Drone>(world);
    if drones.is_empty() {
        return;
    }

    for (projectile_entity, projectile_order) in projectiles {
        let shot = match world.get::<&Projectile>(projectile_entity) {
            Ok(projectile) => projectile.position,
            Err(_) => continue,
        };

        for &(drone_entity, drone_order) in &drones {
            let mut drone = match world.get::<&mut Drone>(drone_entity) {
                Ok(drone) => drone,
                Err(_) => continue,
            };
            if !within_box(shot, drone.position, tuning.hit_half_extent) {
                continue;
            }

            // A drone finished off earlier in this pass still soaks up shots
            // until the drone pass removes it.
            if !drone.alive {
                tracing::trace!(
                    drone = drone_order.0,
                    projectile = projectile_order.0,
                    "shot absorbed by destroyed drone"
                );
            } else {
                drone.apply_hit();
                if drone.alive {
                    events.push(SimEvent::DroneHit {
                        order: drone_order.0,
                        health: drone.health,
                    });
                } else {
                    tracing::debug!(
                        drone = drone_order.0,
                        projectile = projectile_order.0,
                        "drone destroyed"
                    );
                    events.push(SimEvent::DroneDestroyed {
                        order: drone_order.0,
                    });
                }
            }
            despawn_buffer.push(projectile_entity);
            break;
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
