//! Termination System
//!
//! Evaluates the win/loss predicate after each tick.

use bevy_ecs::prelude::*;
use railyard_events::Outcome;

use crate::components::{Disposition, Grid, SessionState, Train};

/// Checks the end conditions in priority order; the first match wins.
///
/// 1. No entities left: the trains win.
/// 2. Every train paused: the player wins by negotiation.
/// 3. Turn limit reached: the player wins by survival.
pub fn evaluate_termination(
    remaining: usize,
    all_paused: bool,
    turn: u32,
    max_turns: u32,
) -> Option<Outcome> {
    if remaining == 0 {
        Some(Outcome::AgentsWin { turn, max_turns })
    } else if all_paused {
        Some(Outcome::PlayerWinsByNegotiation {
            saved: remaining,
            turn,
            max_turns,
        })
    } else if turn >= max_turns {
        Some(Outcome::PlayerWinsBySurvival {
            survived: remaining,
            turn,
            max_turns,
        })
    } else {
        None
    }
}

/// System: end the session when a terminal condition holds
pub fn check_termination(
    grid: Res<Grid>,
    mut state: ResMut<SessionState>,
    trains: Query<&Disposition, With<Train>>,
) {
    let all_paused = trains.iter().all(|d| d.paused);
    if let Some(outcome) = evaluate_termination(grid.remaining(), all_paused, state.turn, state.max_turns) {
        tracing::info!("{}", outcome);
        state.finish(outcome);
    }
}
