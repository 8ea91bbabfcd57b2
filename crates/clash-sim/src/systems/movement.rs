//! Kinematic step for ships and projectiles.
//!
//! Drones move inside the drone pass because their move is interleaved
//! with ship contact and removal.

use hecs::World;

use clash_core::components::Projectile;

use crate::engine::Ships;

/// Step both ships, left then right.
pub fn step_ships(ships: &mut Ships) {
    for ship in ships.iter_mut() {
        ship.step();
    }
}

/// Advance every projectile by its speed.
pub fn step_projectiles(world: &mut World) {
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.step();
    }
}
