//! Railyard Negotiation Simulation Library
//!
//! Trains hunt entities across a square grid while a player tries to talk
//! them down. The world lives in a `bevy_ecs` World driven by a
//! single-threaded tick schedule; chat is routed through the same owner so
//! ticks and negotiation never interleave.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod brain;
pub mod components;
pub mod config;
pub mod error;
pub mod negotiation;
pub mod output;
pub mod persuasion;
pub mod railyard;
pub mod session;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, RailyardConfig, SessionConfig, TrainConfig};
pub use error::RailyardError;
pub use railyard::Railyard;
pub use session::GameSession;

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
