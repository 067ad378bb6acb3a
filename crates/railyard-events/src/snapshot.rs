//! Snapshot Types
//!
//! Read-only copies of session state handed to renderers and chat front-ends.
//!
//! A snapshot is taken after every tick and every chat exchange. It carries
//! enough train state for a session to be rehydrated from it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Beliefs, CollisionRecord, Direction, EntityKey, EntityKind, Framework, Mood, Outcome,
    Position, TargetLock,
};

/// Generates a fresh session identifier.
pub fn generate_session_id() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    Active,
    Ended,
}

/// An occupied grid cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub key: EntityKey,
    pub kind: EntityKind,
    pub label: String,
    pub x: u32,
    pub y: u32,
}

impl EntitySnapshot {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Grid contents; empty cells are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub size: u32,
    /// Occupied cells in row-major order
    #[serde(default)]
    pub entities: Vec<EntitySnapshot>,
}

impl GridSnapshot {
    /// Looks up the entity on a cell, if any.
    pub fn cell(&self, x: u32, y: u32) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.x == x && e.y == y)
    }

    /// Number of entities still on the grid.
    pub fn remaining(&self) -> usize {
        self.entities.len()
    }
}

/// Full train snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainSnapshot {
    pub id: String,
    pub name: String,
    pub color: String,
    pub framework: Framework,
    pub target_kind: EntityKind,
    /// Segment positions, head first
    pub body: Vec<Position>,
    pub direction: Direction,
    pub mood: Mood,
    pub paused: bool,
    pub appetite: f32,
    #[serde(default)]
    pub broken_promises: u32,
    pub beliefs: Beliefs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetLock>,
}

impl TrainSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.body.first().copied()
    }

    pub fn is_crashed(&self) -> bool {
        self.mood == Mood::Crashed
    }
}

/// Complete session state at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub phase: Phase,
    pub turn: u32,
    pub max_turns: u32,
    pub grid: GridSnapshot,
    pub trains: Vec<TrainSnapshot>,
    /// Collisions detected during the most recent tick
    #[serde(default)]
    pub collisions: Vec<CollisionRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
}

impl SessionSnapshot {
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Finds a train by exact name.
    pub fn train(&self, name: &str) -> Option<&TrainSnapshot> {
        self.trains.iter().find(|t| t.name == name)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
