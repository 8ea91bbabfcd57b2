//! Entity spawn factories for the simulation world.
//!
//! Every drone and projectile is spawned together with a `SpawnOrder`
//! taken from the engine's counter.

use hecs::{Entity, World};

use clash_core::components::{Drone, Projectile, Ship, SpawnOrder};
use clash_core::tuning::{DroneTuning, ProjectileTuning};
use clash_core::types::{Arena, Position};

use crate::spawn_source::DronePlacement;

/// Hand out the next spawn order and advance the counter.
pub fn next_order(counter: &mut u64) -> SpawnOrder {
    let order = SpawnOrder(*counter);
    *counter += 1;
    order
}

/// Spawn a drone at the horizontal centre of the arena.
pub fn spawn_drone(
    world: &mut World,
    counter: &mut u64,
    arena: &Arena,
    tuning: &DroneTuning,
    placement: DronePlacement,
) -> (Entity, SpawnOrder) {
    let position = Position::new(arena.center().x, placement.y);
    let drone = Drone::new(position, placement.heading.sign() * tuning.speed);
    insert_drone(world, counter, drone)
}

/// Insert an already-built drone.
pub fn insert_drone(world: &mut World, counter: &mut u64, drone: Drone) -> (Entity, SpawnOrder) {
    let order = next_order(counter);
    (world.spawn((drone, order)), order)
}

/// Spawn a projectile leaving `ship`.
pub fn spawn_projectile(
    world: &mut World,
    counter: &mut u64,
    ship: &Ship,
    tuning: &ProjectileTuning,
) -> (Entity, SpawnOrder) {
    insert_projectile(world, counter, Projectile::fired_by(ship, tuning.speed))
}

/// Insert an already-built projectile.
pub fn insert_projectile(
    world: &mut World,
    counter: &mut u64,
    projectile: Projectile,
) -> (Entity, SpawnOrder) {
    let order = next_order(counter);
    (world.spawn((projectile, order)), order)
}
