//! Session Resources
//!
//! Turn counter, lifecycle phase, roster order and the per-tick log.

use bevy_ecs::prelude::*;
use railyard_events::{
    generate_session_id, CollisionRecord, ConsumptionRecord, MoveRecord, Outcome, Phase,
    StatusLine, TickReport,
};

/// Default turn limit
pub const DEFAULT_MAX_TURNS: u32 = 20;

/// Resource: global session state
#[derive(Resource, Debug, Clone)]
pub struct SessionState {
    pub session_id: String,
    pub phase: Phase,
    pub turn: u32,
    pub max_turns: u32,
    pub outcome: Option<Outcome>,
}

impl SessionState {
    pub fn new(max_turns: u32) -> Self {
        Self {
            session_id: generate_session_id(),
            phase: Phase::NotStarted,
            turn: 0,
            max_turns,
            outcome: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Records the outcome and ends the session.
    pub fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.phase = Phase::Ended;
    }
}

/// Resource: trains in spawn order. Every per-train loop follows this order.
#[derive(Resource, Debug, Clone, Default)]
pub struct Roster {
    pub trains: Vec<Entity>,
}

impl Roster {
    pub fn push(&mut self, entity: Entity) {
        self.trains.push(entity);
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.trains.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.trains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}

/// Resource: what happened during the most recent tick
#[derive(Resource, Debug, Clone, Default)]
pub struct TickLog {
    pub moves: Vec<MoveRecord>,
    pub consumptions: Vec<ConsumptionRecord>,
    pub collisions: Vec<CollisionRecord>,
    pub status: Vec<StatusLine>,
}

impl TickLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.consumptions.clear();
        self.collisions.clear();
        self.status.clear();
    }

    /// Builds the outward report for a finished tick.
    pub fn to_report(&self, turn: u32, outcome: Option<Outcome>) -> TickReport {
        TickReport {
            turn,
            moves: self.moves.clone(),
            consumptions: self.consumptions.clone(),
            collisions: self.collisions.clone(),
            status: self.status.clone(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_ends_session() {
        let mut state = SessionState::new(DEFAULT_MAX_TURNS);
        assert_eq!(state.phase, Phase::NotStarted);
        state.phase = Phase::Active;
        assert!(state.is_active());

        state.finish(Outcome::AgentsWin { turn: 3, max_turns: 20 });
        assert_eq!(state.phase, Phase::Ended);
        assert!(!state.is_active());
        assert!(state.outcome.is_some());
    }

    #[test]
    fn test_tick_log_clear() {
        let mut log = TickLog::new();
        log.collisions.push(CollisionRecord { x: 1, y: 1, trains: vec!["A".into(), "B".into()] });
        let report = log.to_report(2, None);
        assert_eq!(report.collisions.len(), 1);

        log.clear();
        assert!(log.collisions.is_empty());
    }
}
