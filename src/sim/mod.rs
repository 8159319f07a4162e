//! The road-crossing simulation
//!
//! Every rule of the game lives here, and it stays pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only
//! - Fixed lane order for hazards
//! - No rendering, timing, or platform code

pub mod geometry;
pub mod state;
pub mod tick;

pub use geometry::{Bounds, Positioned, distance, lane_y, playable_bounds, spawn_position};
pub use state::{
    Direction, GamePhase, GameState, Hazard, Player, Star, HAZARD_SPRITE, PLAYER_SPRITES,
    STAR_SPRITE,
};
pub use tick::{TickInput, tick};
