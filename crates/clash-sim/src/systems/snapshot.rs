//! Snapshot system: reads the world and ships into a `GameStateSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use clash_core::components::{Drone, Projectile, SpawnOrder};
use clash_core::events::SimEvent;
use clash_core::state::{DroneView, GameStateSnapshot, ProjectileView, ShipView};
use clash_core::types::Millis;

use crate::engine::Ships;

pub fn build_snapshot(
    world: &World,
    ships: &Ships,
    frame: u64,
    time_ms: Millis,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        frame,
        time_ms,
        left: ShipView::from(&ships.left),
        right: ShipView::from(&ships.right),
        drones: build_drones(world),
        projectiles: build_projectiles(world),
        events,
    }
}

/// Live drones sorted by spawn order.
pub fn build_drones(world: &World) -> Vec<DroneView> {
    let mut drones: Vec<DroneView> = world
        .query::<(&Drone, &SpawnOrder)>()
        .iter()
        .map(|(_, (drone, order))| DroneView::new(*order, drone))
        .collect();

    drones.sort_by_key(|d| d.order);
    drones
}

/// Live projectiles sorted by spawn order.
pub fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &SpawnOrder)>()
        .iter()
        .map(|(_, (projectile, order))| ProjectileView::new(*order, projectile))
        .collect();

    projectiles.sort_by_key(|p| p.order);
    projectiles
}
