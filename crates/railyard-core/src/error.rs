//! Error Types
//!
//! Configuration and state errors. Ordinary "nothing happened" outcomes such
//! as a blocked move or an unmatched mention are values, not errors.

use railyard_events::Position;
use thiserror::Error;

/// Largest grid side accepted by the session.
pub const MAX_GRID_SIZE: u32 = 64;

/// Errors raised while building or driving a session.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RailyardError {
    #[error("grid size must be between 1 and 64, got {0}")]
    InvalidGridSize(u32),

    #[error("max_turns must be at least 1")]
    InvalidMaxTurns,

    #[error("train roster is empty")]
    EmptyRoster,

    #[error("duplicate train id: {0}")]
    DuplicateTrain(String),

    #[error("train {0} has an empty body")]
    EmptyBody(String),

    #[error("train {train} has a segment at {position} outside the {size}x{size} grid")]
    SegmentOutOfBounds {
        train: String,
        position: Position,
        size: u32,
    },

    #[error("train {train} occupies {position} twice")]
    SelfOverlap { train: String, position: Position },

    #[error("train {train} body is broken between {from} and {to}")]
    DisjointBody {
        train: String,
        from: Position,
        to: Position,
    },

    #[error("cannot place {requested} entities: only {free} free cells")]
    GridFull { requested: usize, free: usize },

    #[error("cell {0} is outside the grid")]
    CellOutOfBounds(Position),

    #[error("cell {0} is already occupied")]
    CellOccupied(Position),

    #[error("snapshot grid is {found}x{found} but the session expects {expected}x{expected}")]
    SnapshotGridMismatch { expected: u32, found: u32 },

    #[error("session has already been started")]
    AlreadyStarted,
}
