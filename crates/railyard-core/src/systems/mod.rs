//! ECS Systems
//!
//! The tick pipeline: turn bookkeeping, movement, collisions, status
//! announcements and the termination check.

pub mod collision;
pub mod movement;
pub mod status;
pub mod termination;

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;

use crate::components::{SessionState, TickLog};

pub use collision::{detect_collisions, OccupancyMap, Occupant};
pub use movement::{consume_target, move_trains};
pub use status::{announce_status, is_status_turn, STATUS_INTERVAL};
pub use termination::{check_termination, evaluate_termination};

/// System: advance the turn counter and reset the tick log
pub fn begin_turn(mut state: ResMut<SessionState>, mut log: ResMut<TickLog>) {
    state.turn += 1;
    log.clear();
}

/// Builds the tick schedule. Systems run chained on one thread so that
/// roster order alone decides who moves first.
pub fn build_tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.set_executor_kind(ExecutorKind::SingleThreaded);
    schedule.add_systems(
        (
            begin_turn,
            move_trains,
            detect_collisions,
            announce_status,
            check_termination,
        )
            .chain(),
    );
    schedule
}
