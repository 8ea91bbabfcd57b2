//! Simulation engine for Cosmic Clash.
//!
//! Owns the hecs world of drones and projectiles plus the two ships,
//! runs the per-frame systems in a fixed order, and produces
//! `GameStateSnapshot`s for presentation.

pub mod config;
pub mod engine;
pub mod spawn_source;
pub mod systems;
pub mod world_setup;

pub use clash_core as core;
pub use config::SimConfig;
pub use engine::{Ships, SimulationEngine};

#[cfg(test)]
mod tests;
