//! Shared data types for the railyard negotiation simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers and chat front-ends depend on it to read session state.

pub mod chat;
pub mod outcome;
pub mod report;
pub mod snapshot;
pub mod types;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

pub use chat::{ActionTag, ArgumentCategory, ChatReply};
pub use outcome::Outcome;
pub use report::{
    CollisionRecord, ConsumptionRecord, MoveRecord, Situation, StatusLine, TickReport,
};
pub use snapshot::{
    generate_session_id, EntitySnapshot, GridSnapshot, Phase, SessionSnapshot, TrainSnapshot,
};
pub use types::{
    Beliefs, Direction, EntityKey, EntityKind, Framework, Mood, Position, Pragmatic, Reflexive,
    Structural, TargetLock,
};
