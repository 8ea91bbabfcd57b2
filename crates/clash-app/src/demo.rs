//! Scripted pilots that turn snapshots into player commands.
//!
//! The demo binary and the headless match runner use these in place of
//! keyboard input.

use clash_core::commands::PlayerCommand;
use clash_core::constants::PROJECTILE_HIT_HALF_EXTENT;
use clash_core::enums::Side;
use clash_core::state::{DroneView, GameStateSnapshot, ShipView};
use clash_core::types::horizontal_distance;

/// Something that flies a ship.
pub trait Pilot: Send {
    /// Commands to apply before the next frame, given the latest snapshot.
    fn commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand>;
}

/// Never moves, never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn commands(&mut self, _snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        Vec::new()
    }
}

/// Lines up with the closest drone heading toward its ship and fires
/// once aligned.
#[derive(Debug, Clone, Copy)]
pub struct DemoPilot {
    pub side: Side,
    /// Largest vertical offset at which the pilot pulls the trigger.
    pub fire_tolerance: f64,
    /// Drones farther than this (horizontally) are ignored.
    pub engage_range: f64,
}

impl DemoPilot {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            fire_tolerance: PROJECTILE_HIT_HALF_EXTENT,
            engage_range: 450.0,
        }
    }

    fn threat<'a>(&self, me: &ShipView, drones: &'a [DroneView]) -> Option<&'a DroneView> {
        drones
            .iter()
            // Approaching drones move against the direction this side fires.
            .filter(|d| d.speed * self.side.facing() < 0.0)
            .filter(|d| horizontal_distance(d.position, me.position) <= self.engage_range)
            .min_by(|a, b| {
                horizontal_distance(a.position, me.position)
                    .total_cmp(&horizontal_distance(b.position, me.position))
            })
    }
}

impl Pilot for DemoPilot {
    fn commands(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        let me = snapshot.ship(self.side);
        if !me.alive {
            return Vec::new();
        }
        let ship = self.side.id();

        let Some(target) = self.threat(me, &snapshot.drones) else {
            return vec![PlayerCommand::SetVerticalIntent { ship, dy: 0.0 }];
        };

        // The engine clamps the intent to the ship's top speed.
        let dy = target.position.y - me.position.y;
        let mut commands = vec![PlayerCommand::SetVerticalIntent { ship, dy }];
        if dy.abs() < self.fire_tolerance {
            commands.push(PlayerCommand::RequestFire { ship });
        }
        commands
    }
}
