//! Board geometry and distance queries
//!
//! Board coordinates are continuous: x grows rightward, y grows downward,
//! origin at the top-left cell's top-left corner. Entities carry their
//! center point; the grid exists only through the cell-sized steps and
//! bounds defined here.

use glam::Vec2;

use crate::consts::*;

/// Anything with a continuous center position on the board
pub trait Positioned {
    fn center(&self) -> Vec2;
}

impl Positioned for Vec2 {
    fn center(&self) -> Vec2 {
        *self
    }
}

/// Euclidean distance between two positioned values
#[inline]
pub fn distance(a: &impl Positioned, b: &impl Positioned) -> f32 {
    a.center().distance(b.center())
}

/// A closed axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Requires `min <= max` per axis
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Restrict a point to the rectangle, per axis
    #[inline]
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Check containment (boundary inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Rectangle of positions the player's center may occupy: half a sprite of
/// side margin, goal row on top, start row at the bottom
pub fn playable_bounds() -> Bounds {
    Bounds::new(
        Vec2::new(PLAYER_MIN_X, PLAYER_GOAL_Y),
        Vec2::new(PLAYER_MAX_X, PLAYER_START_Y),
    )
}

/// Center of the bottom starting cell
pub fn spawn_position() -> Vec2 {
    Vec2::new(BOARD_WIDTH / 2.0, PLAYER_START_Y)
}

/// Centerline y of a hazard lane (lane 1 is the topmost road row)
pub fn lane_y(lane: u32) -> f32 {
    lane as f32 * TILE_HEIGHT + HAZARD_LANE_OFFSET
}
