//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs world of drones and projectiles and
//! the two ships, accepts player intents, and runs all systems once per
//! `advance(now)`. The host supplies `now`; the engine never reads a
//! clock, which keeps it deterministic for a given seed and input stream.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use clash_core::commands::PlayerCommand;
use clash_core::components::{Drone, Projectile, Ship};
use clash_core::enums::Side;
use clash_core::error::ClashResult;
use clash_core::events::SimEvent;
use clash_core::state::{DroneView, GameStateSnapshot, ProjectileView};
use clash_core::types::Millis;

use crate::config::SimConfig;
use crate::spawn_source::{RngSpawnSource, SpawnSource};
use crate::systems;
use crate::systems::spawner::SpawnClock;
use crate::world_setup;

/// The two ships, held directly by the engine.
#[derive(Debug, Clone)]
pub struct Ships {
    pub left: Ship,
    pub right: Ship,
}

impl Ships {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            left: Ship::new(Side::Left, &config.arena, config.ship),
            right: Ship::new(Side::Right, &config.arena, config.ship),
        }
    }

    pub fn get(&self, side: Side) -> &Ship {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Ship {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn pair_mut(&mut self) -> (&mut Ship, &mut Ship) {
        (&mut self.left, &mut self.right)
    }

    /// Both ships, left first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ship> {
        [&mut self.left, &mut self.right].into_iter()
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: World,
    ships: Ships,
    config: SimConfig,
    spawn_source: Box<dyn SpawnSource + Send>,
    spawn_clock: SpawnClock,
    frame: u64,
    last_now: Millis,
    next_order: u64,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine whose drone placement is drawn from a ChaCha8
    /// generator seeded with `config.seed`.
    pub fn new(config: SimConfig) -> ClashResult<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_spawn_source(config, Box::new(RngSpawnSource::new(rng)))
    }

    /// Create an engine with an explicit source of drone placements.
    pub fn with_spawn_source(
        config: SimConfig,
        spawn_source: Box<dyn SpawnSource + Send>,
    ) -> ClashResult<Self> {
        config.validate()?;
        tracing::debug!(seed = config.seed, start_ms = config.start_ms, "simulation created");
        Ok(Self {
            world: World::new(),
            ships: Ships::new(&config),
            spawn_clock: SpawnClock::new(config.start_ms, config.drone.spawn_interval_ms),
            last_now: config.start_ms,
            config,
            spawn_source,
            frame: 0,
            next_order: 0,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Set a ship's vertical intent by external id (1 = left, 2 = right).
    pub fn set_vertical_intent(&mut self, ship_id: u8, dy: f64) -> ClashResult<()> {
        let side = Side::from_id(ship_id)?;
        self.ships.get_mut(side).set_vertical_intent(dy);
        Ok(())
    }

    /// Ask a ship to fire during the next `advance`.
    pub fn request_fire(&mut self, ship_id: u8) -> ClashResult<()> {
        let side = Side::from_id(ship_id)?;
        self.ships.get_mut(side).request_fire();
        Ok(())
    }

    pub fn apply_command(&mut self, command: PlayerCommand) -> ClashResult<()> {
        match command {
            PlayerCommand::SetVerticalIntent { ship, dy } => self.set_vertical_intent(ship, dy),
            PlayerCommand::RequestFire { ship } => self.request_fire(ship),
        }
    }

    /// Advance the simulation by one frame and return the resulting snapshot.
    ///
    /// `now` must not go backwards between calls.
    pub fn advance(&mut self, now: Millis) -> GameStateSnapshot {
        debug_assert!(
            now >= self.last_now,
            "advance called with now={now} before previous frame at {}",
            self.last_now
        );
        self.last_now = now;

        // 0. Fire requests gathered since the last frame
        systems::fire_control::run(
            &mut self.world,
            &mut self.ships,
            &mut self.next_order,
            &self.config.projectile,
            &mut self.events,
            now,
        );
        // 1. Drone spawn timer
        systems::spawner::run(
            &mut self.world,
            self.spawn_source.as_mut(),
            &mut self.spawn_clock,
            &self.config,
            &mut self.next_order,
            &mut self.events,
            now,
        );
        // 2. Ship movement
        systems::movement::step_ships(&mut self.ships);
        // 3. Projectile movement + culling
        systems::movement::step_projectiles(&mut self.world);
        systems::cleanup::cull_projectiles(
            &mut self.world,
            &self.config.arena,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 4. Projectile–drone hits
        systems::collision::run(
            &mut self.world,
            &self.config.projectile,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 5. Drone movement, ship contact, removal
        systems::drones::run(
            &mut self.world,
            &mut self.ships,
            &self.config.arena,
            &self.config.drone,
            &mut self.despawn_buffer,
            &mut self.events,
        );

        self.frame += 1;
        tracing::trace!(
            frame = self.frame,
            now,
            drones = self.drone_count(),
            projectiles = self.projectile_count(),
            "frame advanced"
        );

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.ships, self.frame, now, events)
    }

    /// Current state without advancing. Carries no events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.ships,
            self.frame,
            self.last_now,
            Vec::new(),
        )
    }

    pub fn ship(&self, side: Side) -> &Ship {
        self.ships.get(side)
    }

    pub fn ships(&self) -> &Ships {
        &self.ships
    }

    /// Live drones in spawn order.
    pub fn drones(&self) -> Vec<DroneView> {
        systems::snapshot::build_drones(&self.world)
    }

    /// Live projectiles in spawn order.
    pub fn projectiles(&self) -> Vec<ProjectileView> {
        systems::snapshot::build_projectiles(&self.world)
    }

    pub fn drone_count(&self) -> usize {
        self.world.query::<&Drone>().iter().count()
    }

    pub fn projectile_count(&self) -> usize {
        self.world.query::<&Projectile>().iter().count()
    }

    /// Number of completed `advance` calls.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable access to the ships (for tests that stage positions).
    #[cfg(test)]
    pub fn ships_mut(&mut self) -> &mut Ships {
        &mut self.ships
    }

    /// Place a drone directly (for tests needing exact geometry).
    #[cfg(test)]
    pub fn spawn_test_drone(&mut self, x: f64, y: f64, speed: f64) -> u64 {
        let drone = Drone::new(clash_core::types::Position::new(x, y), speed);
        let (_, order) = world_setup::insert_drone(&mut self.world, &mut self.next_order, drone);
        order.0
    }

    /// Place a projectile directly (for tests needing exact geometry).
    #[cfg(test)]
    pub fn spawn_test_projectile(&mut self, x: f64, y: f64, speed: f64, owner: Side) -> u64 {
        let projectile = Projectile {
            position: clash_core::types::Position::new(x, y),
            speed,
            owner,
        };
        let (_, order) =
            world_setup::insert_projectile(&mut self.world, &mut self.next_order, projectile);
        order.0
    }
}
