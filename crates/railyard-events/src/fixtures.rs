//! Sample data fixtures for testing.
//!
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // railyard-events = { path = "../railyard-events", features = ["test-fixtures"] }
//!
//! use railyard_events::fixtures;
//!
//! let snapshot = fixtures::sample_session();
//! ```

use crate::SessionSnapshot;

/// Returns a mid-game session snapshot from the fixtures file.
///
/// Contains:
/// - a 9x9 grid with one Goal, one Entity and one Obstacle
/// - GREATEST GOOD hunting the Goal
/// - MERCY FREIGHT paused after a successful negotiation, one broken promise
pub fn sample_session() -> SessionSnapshot {
    let json = include_str!("../tests/fixtures/sample_session.json");
    serde_json::from_str(json).expect("Failed to parse sample_session.json")
}
