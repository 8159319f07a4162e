//! Bug Crossing entry point
//!
//! Runs the simulation headless: the autopilot walks the player across the
//! road at a fixed timestep, the star show plays out, and the final state
//! is dumped as JSON for inspection.

use std::time::{SystemTime, UNIX_EPOCH};

use bug_crossing::consts::SIM_DT;
use bug_crossing::sim::{GamePhase, GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Bug Crossing (headless) starting...");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    log::info!("new run with seed {}", seed);

    let input = TickInput {
        auto_pilot: true,
        ..Default::default()
    };

    // Two minutes of simulated time is plenty of budget for a crossing
    let budget_ticks = (120.0 / SIM_DT) as u64;
    while state.phase != GamePhase::Won && state.time_ticks < budget_ticks {
        tick(&mut state, &input, SIM_DT);
    }

    match state.phase {
        GamePhase::Won => {
            log::info!(
                "crossed in {} ticks ({:.1}s simulated)",
                state.time_ticks,
                state.time_ticks as f32 * SIM_DT
            );
            // Let the stars spiral in before the dump
            let show_ticks = (3.0 / SIM_DT) as u64;
            for _ in 0..show_ticks {
                tick(&mut state, &input, SIM_DT);
            }
        }
        GamePhase::Playing => {
            log::warn!("autopilot ran out its budget without crossing");
        }
    }

    let json = serde_json::to_string_pretty(&state).expect("failed to serialize state");
    println!("{json}");
}
