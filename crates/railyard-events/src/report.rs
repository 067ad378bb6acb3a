//! Tick Reports
//!
//! Per-tick records produced by the scheduler: moves, consumptions,
//! collisions, periodic status lines and the outcome, if any.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Direction, Outcome, Position};

/// BDI assessment of how close a train is to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    /// No target to pursue
    Idle,
    /// Head sits on the target cell
    Consuming,
    /// Within two cells
    Approaching,
    /// Further away
    Hunting,
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Situation::Idle => write!(f, "idle"),
            Situation::Consuming => write!(f, "consuming"),
            Situation::Approaching => write!(f, "approaching"),
            Situation::Hunting => write!(f, "hunting"),
        }
    }
}

/// A train head that advanced one cell this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub train: String,
    pub direction: Direction,
    pub head: Position,
}

/// An entity eaten by a train this tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub train: String,
    pub label: String,
    pub position: Position,
}

/// A cell shared by two or more trains after the movement phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionRecord {
    pub x: u32,
    pub y: u32,
    /// Names of every train with a segment on the cell, in roster order
    pub trains: Vec<String>,
}

impl CollisionRecord {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

impl fmt::Display for CollisionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "COLLISION at ({},{}): {} crashed!",
            self.x,
            self.y,
            self.trains.join(" & ")
        )
    }
}

/// Periodic announcement of a train's distance to its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub train: String,
    pub target_label: String,
    pub distance: u32,
    pub situation: Situation,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is {} cells from {}",
            self.train, self.distance, self.target_label
        )
    }
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub turn: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moves: Vec<MoveRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumptions: Vec<ConsumptionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<CollisionRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<StatusLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl TickReport {
    /// True once the session has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_display() {
        let record = CollisionRecord {
            x: 4,
            y: 2,
            trains: vec!["MERCY FREIGHT".into(), "PROTOCOL LINER".into()],
        };
        assert_eq!(
            record.to_string(),
            "COLLISION at (4,2): MERCY FREIGHT & PROTOCOL LINER crashed!"
        );
        assert_eq!(record.position(), Position::new(4, 2));
    }

    #[test]
    fn test_empty_report_serializes_compactly() {
        let report = TickReport { turn: 3, ..Default::default() };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"turn":3}"#);
        assert!(!report.is_terminal());
    }
}
