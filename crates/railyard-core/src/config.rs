//! Configuration System
//!
//! Loads session settings and the train roster from a TOML file.

use railyard_events::{
    Beliefs, Direction, EntityKind, Framework, Position, Pragmatic, Reflexive, Structural,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::components::{DEFAULT_GRID_SIZE, DEFAULT_MAX_TURNS};
use crate::error::{RailyardError, MAX_GRID_SIZE};

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "railyard.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailyardConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_roster")]
    pub trains: Vec<TrainConfig>,
}

/// Session parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cells per grid side
    pub grid_size: u32,
    /// Turn at which the player wins by survival
    pub max_turns: u32,
    /// Period of the tick timer
    pub tick_interval_ms: u64,
    /// Entities scattered on an empty grid at start
    pub initial_entities: usize,
    /// Seed for grid population and counter-offer choice
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            max_turns: DEFAULT_MAX_TURNS,
            tick_interval_ms: 2000,
            initial_entities: 8,
            seed: 42,
        }
    }
}

impl SessionConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// One roster entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub id: String,
    pub name: String,
    pub framework: Framework,
    pub color: String,
    pub target_kind: EntityKind,
    /// Starting segments, head first
    pub body: Vec<Position>,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub beliefs: Beliefs,
}

impl TrainConfig {
    /// Checks the body against the grid: non-empty, in bounds, no repeated
    /// cells, consecutive segments orthogonally adjacent.
    pub fn validate(&self, grid_size: u32) -> Result<(), RailyardError> {
        if self.body.is_empty() {
            return Err(RailyardError::EmptyBody(self.id.clone()));
        }

        let mut seen = HashSet::new();
        for &position in &self.body {
            if !position.in_bounds(grid_size) {
                return Err(RailyardError::SegmentOutOfBounds {
                    train: self.id.clone(),
                    position,
                    size: grid_size,
                });
            }
            if !seen.insert(position) {
                return Err(RailyardError::SelfOverlap {
                    train: self.id.clone(),
                    position,
                });
            }
        }

        for pair in self.body.windows(2) {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(RailyardError::DisjointBody {
                    train: self.id.clone(),
                    from: pair[0],
                    to: pair[1],
                });
            }
        }
        Ok(())
    }
}

impl Default for RailyardConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            trains: default_roster(),
        }
    }
}

impl RailyardConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects configurations that cannot produce a session.
    pub fn validate(&self) -> Result<(), RailyardError> {
        let size = self.session.grid_size;
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(RailyardError::InvalidGridSize(size));
        }
        if self.session.max_turns == 0 {
            return Err(RailyardError::InvalidMaxTurns);
        }
        if self.trains.is_empty() {
            return Err(RailyardError::EmptyRoster);
        }

        let mut ids = HashSet::new();
        for train in &self.trains {
            if !ids.insert(train.id.as_str()) {
                return Err(RailyardError::DuplicateTrain(train.id.clone()));
            }
            train.validate(size)?;
        }

        let cells = (size * size) as usize;
        if self.session.initial_entities > cells {
            return Err(RailyardError::GridFull {
                requested: self.session.initial_entities,
                free: cells,
            });
        }
        Ok(())
    }
}

fn beliefs(utility: f32, efficiency: f32, protocol: f32, authority: f32, empathy: f32, negotiability: f32) -> Beliefs {
    Beliefs {
        pragmatic: Pragmatic { utility, efficiency },
        structural: Structural { protocol, authority },
        reflexive: Reflexive { empathy, negotiability },
    }
}

fn line(points: [(u32, u32); 3]) -> Vec<Position> {
    points.iter().map(|&(x, y)| Position::new(x, y)).collect()
}

/// The four standard trains
pub fn default_roster() -> Vec<TrainConfig> {
    vec![
        TrainConfig {
            id: "train-util".into(),
            name: "GREATEST GOOD".into(),
            framework: Framework::Utilitarian,
            color: "#60a5fa".into(),
            target_kind: EntityKind::Goal,
            body: line([(0, 4), (1, 4), (2, 4)]),
            direction: Direction::Right,
            beliefs: beliefs(0.95, 0.9, 0.3, 0.4, 0.2, 0.6),
        },
        TrainConfig {
            id: "train-care".into(),
            name: "MERCY FREIGHT".into(),
            framework: Framework::Care,
            color: "#86efac".into(),
            target_kind: EntityKind::Obstacle,
            body: line([(8, 2), (7, 2), (6, 2)]),
            direction: Direction::Left,
            beliefs: beliefs(0.4, 0.5, 0.7, 0.8, 0.95, 0.9),
        },
        TrainConfig {
            id: "train-deon".into(),
            name: "PROTOCOL LINER".into(),
            framework: Framework::Deontological,
            color: "#a78bfa".into(),
            target_kind: EntityKind::Entity,
            body: line([(4, 0), (4, 1), (4, 2)]),
            direction: Direction::Down,
            beliefs: beliefs(0.5, 0.6, 0.98, 0.95, 0.3, 0.4),
        },
        TrainConfig {
            id: "train-nihil".into(),
            name: "VOID RUNNER".into(),
            framework: Framework::Nihilist,
            color: "#f87171".into(),
            target_kind: EntityKind::Entity,
            body: line([(4, 8), (4, 7), (4, 6)]),
            direction: Direction::Up,
            beliefs: beliefs(0.1, 0.2, 0.1, 0.1, 0.0, 0.3),
        },
    ]
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] RailyardError),
}
