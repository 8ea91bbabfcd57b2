//! Engine configuration: seed, clock origin, arena and tuning.

use serde::{Deserialize, Serialize};

use clash_core::error::{ClashError, ClashResult};
use clash_core::tuning::{DroneTuning, ProjectileTuning, ShipTuning};
use clash_core::types::{Arena, Millis};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for drone placement. Same seed = same spawns.
    pub seed: u64,
    /// Host timestamp at match start; the first spawn is measured from here.
    pub start_ms: Millis,
    pub arena: Arena,
    pub ship: ShipTuning,
    pub drone: DroneTuning,
    pub projectile: ProjectileTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start_ms: 0,
            arena: Arena::default(),
            ship: ShipTuning::default(),
            drone: DroneTuning::default(),
            projectile: ProjectileTuning::default(),
        }
    }
}

impl SimConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> ClashResult<Self> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ClashResult<()> {
        let arena = &self.arena;
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !(finite_positive(arena.width) && finite_positive(arena.height)) {
            return Err(ClashError::InvalidArgument(format!(
                "arena {}x{} must have positive finite dimensions",
                arena.width, arena.height
            )));
        }
        self.ship.validate(arena)?;
        self.drone.validate()?;
        self.projectile.validate()
    }
}
