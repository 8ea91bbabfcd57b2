//! Systems that operate on the simulation world each frame.
//!
//! Systems are plain functions over `&mut World` (plus the ships where
//! needed). They hold no state of their own; the engine calls them in a
//! fixed order.

pub mod cleanup;
pub mod collision;
pub mod drones;
pub mod fire_control;
pub mod movement;
pub mod snapshot;
pub mod spawner;

use hecs::{Component, Entity, World};

use clash_core::components::SpawnOrder;

/// Entities carrying `T`, sorted by spawn order.
///
/// Ordered passes iterate this list instead of a live query, so despawns
/// made during the pass never skip or repeat an entry.
pub fn ordered<T: Component>(world: &World) -> Vec<(Entity, SpawnOrder)> {
    let mut entries: Vec<(Entity, SpawnOrder)> = world
        .query::<(&T, &SpawnOrder)>()
        .iter()
        .map(|(entity, (_, order))| (entity, *order))
        .collect();
    entries.sort_by_key(|&(_, order)| order);
    entries
}
