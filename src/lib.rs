//! Bug Crossing - a tile-based road-crossing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//!
//! This crate is the headless core. It consumes a per-tick elapsed-time
//! value and discrete step commands, and exposes read-only positions and
//! sprite catalog keys for an external renderer to draw. Positions are
//! entity centers; a renderer subtracts half the sprite footprint to get
//! top-left draw coordinates.

pub mod sim;

use glam::Vec2;

/// Board geometry and gameplay tuning constants
pub mod consts {
    /// Reference simulation timestep (60 Hz); the sim accepts any dt
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Sprite footprint - one grid cell is one sprite wide
    pub const SPRITE_WIDTH: f32 = 101.0;
    /// Sprites are taller than a row and overhang it when drawn
    pub const SPRITE_HEIGHT: f32 = 171.0;
    /// Visible height of one board row
    pub const TILE_HEIGHT: f32 = 83.0;

    /// Board grid
    pub const BOARD_COLS: u32 = 5;
    pub const BOARD_ROWS: u32 = 6;
    pub const BOARD_WIDTH: f32 = BOARD_COLS as f32 * SPRITE_WIDTH;
    pub const BOARD_HEIGHT: f32 = (BOARD_ROWS as f32 - 1.0) * TILE_HEIGHT + SPRITE_HEIGHT;

    /// Player travel - spawn at the bottom row center, five rows up to the goal
    pub const PLAYER_START_Y: f32 = 459.0;
    pub const PLAYER_GOAL_Y: f32 = PLAYER_START_Y - (BOARD_ROWS as f32 - 1.0) * TILE_HEIGHT;
    pub const PLAYER_MIN_X: f32 = SPRITE_WIDTH / 2.0;
    pub const PLAYER_MAX_X: f32 = BOARD_WIDTH - SPRITE_WIDTH / 2.0;

    /// Hazard traffic
    pub const HAZARD_LANES: u32 = 3;
    /// Speed range in units per second, sampled per spawn and per recycle
    pub const HAZARD_MIN_SPEED: f32 = 40.0;
    pub const HAZARD_MAX_SPEED: f32 = 160.0;
    /// Lane centerline offset below the row top, seating the bug on the paving
    pub const HAZARD_LANE_OFFSET: f32 = 63.8;
    /// Past this x a hazard recycles to the left edge
    pub const HAZARD_EXIT_X: f32 = BOARD_WIDTH + SPRITE_WIDTH / 2.0;
    /// Re-entry x for a recycled hazard
    pub const HAZARD_ENTRY_X: f32 = -(SPRITE_WIDTH / 2.0);

    /// Center-to-center distance at or under which player and hazard collide
    pub const COLLISION_RADIUS: f32 = 60.0;

    /// Win-show orbit envelope
    pub const STAR_COUNT: usize = 4;
    pub const STAR_MIN_RADIUS: f32 = 60.0;
    pub const STAR_MAX_RADIUS: f32 = BOARD_WIDTH / 2.0;
}

/// Polar (r, theta) to a cartesian offset
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
