//! Fundamental geometric and timing types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{ARENA_HEIGHT, ARENA_WIDTH};

/// 2D position in arena space. x grows to the right, y grows downward.
pub type Position = DVec2;

/// Wall-clock timestamp in milliseconds, supplied by the host every frame.
pub type Millis = u64;

/// Fixed logical bounds of the playing field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Position {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether `x` lies on the field, edges included.
    pub fn contains_x(&self, x: f64) -> bool {
        (0.0..=self.width).contains(&x)
    }
}

/// Absolute horizontal distance between two positions.
pub fn horizontal_distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).abs()
}

/// True when `b` lies strictly inside the square of half extent `half`
/// centred on `a`.
pub fn within_box(a: Position, b: Position, half: f64) -> bool {
    let d = (a - b).abs();
    d.x < half && d.y < half
}

/// Milliseconds elapsed since `earlier`. Saturates at zero.
pub fn elapsed_since(now: Millis, earlier: Millis) -> Millis {
    now.saturating_sub(earlier)
}
