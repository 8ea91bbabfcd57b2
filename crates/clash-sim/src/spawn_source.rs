//! Source of randomness for drone placement.
//!
//! The engine asks a `SpawnSource` where each new drone goes, so tests
//! can script placements instead of depending on RNG output.

use std::collections::VecDeque;

use rand::Rng;

use clash_core::enums::Heading;

/// Where a new drone enters and which way it drifts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DronePlacement {
    pub y: f64,
    pub heading: Heading,
}

pub trait SpawnSource {
    /// Pick a placement with `y` in `[min_y, max_y]`.
    fn next_drone(&mut self, min_y: f64, max_y: f64) -> DronePlacement;
}

/// Uniform placement drawn from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSpawnSource<R> {
    rng: R,
}

impl<R: Rng> RngSpawnSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SpawnSource for RngSpawnSource<R> {
    fn next_drone(&mut self, min_y: f64, max_y: f64) -> DronePlacement {
        let y = if min_y < max_y {
            self.rng.gen_range(min_y..=max_y)
        } else {
            min_y
        };
        let heading = if self.rng.gen_bool(0.5) {
            Heading::East
        } else {
            Heading::West
        };
        DronePlacement { y, heading }
    }
}

/// Replays a fixed list of placements, then repeats the last one.
#[derive(Debug, Clone)]
pub struct ScriptedSpawns {
    queue: VecDeque<DronePlacement>,
    last: DronePlacement,
}

impl ScriptedSpawns {
    pub fn new(placements: impl IntoIterator<Item = DronePlacement>) -> Self {
        let queue: VecDeque<DronePlacement> = placements.into_iter().collect();
        let last = queue.back().copied().unwrap_or(DronePlacement {
            y: 0.0,
            heading: Heading::East,
        });
        Self { queue, last }
    }
}

impl SpawnSource for ScriptedSpawns {
    fn next_drone(&mut self, min_y: f64, max_y: f64) -> DronePlacement {
        let placement = self.queue.pop_front().unwrap_or(self.last);
        DronePlacement {
            y: placement.y.clamp(min_y, max_y),
            ..placement
        }
    }
}
