//! Status Announcements
//!
//! Every few turns each train still hunting announces its distance to target.

use bevy_ecs::prelude::*;
use railyard_events::StatusLine;

use crate::brain;
use crate::components::{Body, Disposition, Pursuit, Roster, SessionState, TickLog, Train, TrainName};

/// Turns between announcements
pub const STATUS_INTERVAL: u32 = 5;

/// True on turns that carry status announcements.
pub fn is_status_turn(turn: u32) -> bool {
    turn > 0 && turn % STATUS_INTERVAL == 0
}

/// System: emit one status line per active train on status turns
pub fn announce_status(
    state: Res<SessionState>,
    roster: Res<Roster>,
    mut log: ResMut<TickLog>,
    trains: Query<(&TrainName, &Body, &Pursuit, &Disposition), With<Train>>,
) {
    if !is_status_turn(state.turn) {
        return;
    }

    for entity in roster.iter() {
        let Ok((name, body, pursuit, disposition)) = trains.get(entity) else {
            continue;
        };
        if disposition.paused {
            continue;
        }
        let Some(target) = pursuit.target.as_ref() else {
            continue;
        };

        let line = StatusLine {
            train: name.0.clone(),
            target_label: target.label.clone(),
            distance: body.head().manhattan(target.position),
            situation: brain::assess_situation(body.head(), Some(target)),
        };
        tracing::info!("[turn {}] {} ({})", state.turn, line, line.situation);
        log.status.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_turns() {
        assert!(!is_status_turn(0));
        assert!(!is_status_turn(4));
        assert!(is_status_turn(5));
        assert!(is_status_turn(10));
        assert!(!is_status_turn(11));
    }
}
