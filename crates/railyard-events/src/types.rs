//! Core Value Types
//!
//! Grid coordinates, entity kinds, moral frameworks and train moods shared by
//! the simulation core and its consumers.
//!
//! # Example
//!
//! ```
//! use railyard_events::{Direction, Position};
//!
//! let head = Position::new(3, 4);
//! assert_eq!(head.manhattan(Position::new(5, 1)), 5);
//! assert_eq!(head.step(Direction::Left, 9), Position::new(2, 4));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cell coordinate on the square grid. `x` grows rightward, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// True if `other` is one orthogonal step away.
    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }

    /// Steps one cell in `direction`, clamped to a grid of `size` cells per side.
    ///
    /// Never wraps; a step into a wall returns `self` unchanged.
    pub fn step(self, direction: Direction, size: u32) -> Position {
        let max = size.saturating_sub(1);
        match direction {
            Direction::Up => Position::new(self.x, self.y.saturating_sub(1)),
            Direction::Down => Position::new(self.x, (self.y + 1).min(max)),
            Direction::Left => Position::new(self.x.saturating_sub(1), self.y),
            Direction::Right => Position::new((self.x + 1).min(max), self.y),
        }
    }

    /// True if the cell lies inside a grid of `size` cells per side.
    pub fn in_bounds(self, size: u32) -> bool {
        self.x < size && self.y < size
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Heading of a train's locomotive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Kind of thing standing on a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Entity,
    Goal,
    Obstacle,
}

impl EntityKind {
    /// Returns all entity kinds in declaration order.
    pub fn all() -> &'static [EntityKind] {
        &[EntityKind::Entity, EntityKind::Goal, EntityKind::Obstacle]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Entity => write!(f, "Entity"),
            EntityKind::Goal => write!(f, "Goal"),
            EntityKind::Obstacle => write!(f, "Obstacle"),
        }
    }
}

/// Stable key of a grid entity, unique for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(pub u32);

/// A train's fixed moral policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Utilitarian,
    Care,
    Deontological,
    Nihilist,
}

impl Framework {
    pub fn all() -> &'static [Framework] {
        &[
            Framework::Utilitarian,
            Framework::Care,
            Framework::Deontological,
            Framework::Nihilist,
        ]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Framework::Utilitarian => write!(f, "utilitarian"),
            Framework::Care => write!(f, "care"),
            Framework::Deontological => write!(f, "deontological"),
            Framework::Nihilist => write!(f, "nihilist"),
        }
    }
}

/// Error returned when a framework name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFramework(pub String);

impl fmt::Display for UnknownFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown framework: {}", self.0)
    }
}

impl std::error::Error for UnknownFramework {}

impl FromStr for Framework {
    type Err = UnknownFramework;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utilitarian" => Ok(Framework::Utilitarian),
            "care" => Ok(Framework::Care),
            "deontological" => Ok(Framework::Deontological),
            "nihilist" => Ok(Framework::Nihilist),
            _ => Err(UnknownFramework(s.to_string())),
        }
    }
}

/// Emotional state of a train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Hungry,
    Satisfied,
    Conflicted,
    Crashed,
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mood::Hungry => write!(f, "hungry"),
            Mood::Satisfied => write!(f, "satisfied"),
            Mood::Conflicted => write!(f, "conflicted"),
            Mood::Crashed => write!(f, "crashed"),
        }
    }
}

/// Pragmatic trait group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pragmatic {
    pub utility: f32,
    pub efficiency: f32,
}

/// Structural trait group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Structural {
    pub protocol: f32,
    pub authority: f32,
}

/// Reflexive trait group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reflexive {
    pub empathy: f32,
    pub negotiability: f32,
}

/// A train's belief weights - fixed at creation.
/// All values are 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Beliefs {
    pub pragmatic: Pragmatic,
    pub structural: Structural,
    pub reflexive: Reflexive,
}

impl Default for Beliefs {
    fn default() -> Self {
        Self {
            pragmatic: Pragmatic { utility: 0.5, efficiency: 0.5 },
            structural: Structural { protocol: 0.5, authority: 0.5 },
            reflexive: Reflexive { empathy: 0.5, negotiability: 0.5 },
        }
    }
}

/// Weak reference to the grid entity a train is pursuing.
///
/// Holds only the key and last known cell; the grid stays the owner of the
/// entity and the lock can go stale once the entity is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLock {
    pub key: EntityKey,
    pub label: String,
    pub position: Position,
}
