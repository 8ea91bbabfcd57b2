//! Cosmic Clash host.
//!
//! Drives the simulation engine on a fixed-rate thread, forwards player
//! commands to it over a channel, and publishes the latest snapshot.
//! Also provides the scripted pilots used by the demo binary.

pub mod demo;
pub mod game_loop;
pub mod state;

pub use clash_core as core;
