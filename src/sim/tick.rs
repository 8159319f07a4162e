//! Simulation tick driver
//!
//! One call advances the world by `dt` seconds. Per tick while playing:
//! the step command lands first, every hazard then integrates its motion,
//! and only then does the collision check run - so a bug that slides into
//! range this tick sends the player back this tick. Once won, collisions
//! and steps are frozen and the star show takes over.

use glam::Vec2;

use super::geometry::{self, distance};
use super::state::{Direction, GamePhase, GameState};
use crate::consts::*;

/// Commands applied at the top of one tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// At most one directional step per tick
    pub step: Option<Direction>,
    /// Tear the run down and rebuild it
    pub restart: bool,
    /// Demo mode - the driver synthesizes steps toward the goal
    pub auto_pilot: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        state.restart();
        log::info!("run restarted (seed {})", state.seed);
        return;
    }

    state.time_ticks += 1;

    match state.phase {
        GamePhase::Playing => {
            let step = if input.auto_pilot {
                autopilot_step(state)
            } else {
                input.step
            };
            if let Some(dir) = step {
                state.player.step(dir);
                if state.player.win {
                    state.phase = GamePhase::Won;
                    log::info!("goal row reached on tick {}", state.time_ticks);
                }
            }

            for hazard in &mut state.hazards {
                hazard.advance(dt, &mut state.rng);
            }

            // Skipped when the step above just won: the finish line freezes
            // the outcome before traffic is consulted
            if state.phase == GamePhase::Playing && state.player.has_collided(&state.hazards) {
                log::debug!("bug hit on tick {}, back to the start", state.time_ticks);
                state.player.reset(&mut state.rng);
            }
        }
        GamePhase::Won => {
            // Traffic keeps flowing as set dressing
            for hazard in &mut state.hazards {
                hazard.advance(dt, &mut state.rng);
            }
            let center = state.player.pos;
            for star in &mut state.stars {
                star.advance(dt, center);
            }
        }
    }
}

/// Ticks between autopilot hop attempts (0.3 s at the reference cadence)
const AUTOPILOT_HOP_TICKS: u64 = 18;
/// Clearance the autopilot demands beyond the collision radius
const AUTOPILOT_MARGIN: f32 = 24.0;
/// Seconds ahead a candidate cell is scored against projected traffic
const AUTOPILOT_LOOKAHEAD: [f32; 4] = [0.0, 0.15, 0.3, 0.45];

/// Pick the demo player's next hop, if the cadence allows one. Prefers Up
/// whenever the cell above stays clear of projected traffic, otherwise
/// holds or sidesteps to whichever nearby cell scores safest.
fn autopilot_step(state: &GameState) -> Option<Direction> {
    if !state.time_ticks.is_multiple_of(AUTOPILOT_HOP_TICKS) {
        return None;
    }

    if clearance_after(state, Some(Direction::Up)) > COLLISION_RADIUS + AUTOPILOT_MARGIN {
        return Some(Direction::Up);
    }

    let candidates = [None, Some(Direction::Left), Some(Direction::Right)];
    candidates
        .into_iter()
        .max_by(|a, b| {
            clearance_after(state, *a)
                .partial_cmp(&clearance_after(state, *b))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .flatten()
}

/// Worst-case distance from a stepped-to cell to any hazard projected over
/// the lookahead horizon. Projections ignore recycling.
fn clearance_after(state: &GameState, step: Option<Direction>) -> f32 {
    let bounds = geometry::playable_bounds();
    let target = match step {
        Some(dir) => bounds.clamp(state.player.pos + dir.delta()),
        None => state.player.pos,
    };

    let mut clearance = f32::MAX;
    for hazard in &state.hazards {
        for tau in AUTOPILOT_LOOKAHEAD {
            let projected = hazard.pos + Vec2::new(hazard.speed * tau, 0.0);
            clearance = clearance.min(distance(&target, &projected));
        }
    }
    clearance
}
