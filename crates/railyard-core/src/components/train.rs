//! Train Components
//!
//! Components for individual trains: identity, persona, body, pursuit and
//! disposition.

use bevy_ecs::prelude::*;
use railyard_events::{Beliefs, Direction, EntityKind, Framework, Mood, Position, TargetLock};

/// Appetite lost per entity consumed
pub const APPETITE_PER_MEAL: f32 = 0.5;
/// Below this appetite a train is satisfied
pub const SATED_THRESHOLD: f32 = 0.5;
/// Trust lost per broken promise
pub const TRUST_PER_BROKEN_PROMISE: f32 = 0.2;

/// Marker component identifying an entity as a train
#[derive(Component, Debug, Clone, Default)]
pub struct Train;

/// Unique identifier for a train
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrainId(pub String);

/// Display name, also used to match `@mentions`
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct TrainName(pub String);

/// Render color
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Livery(pub String);

/// Moral framework and belief weights - fixed for the train's lifetime
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Persona {
    pub framework: Framework,
    pub beliefs: Beliefs,
}

/// Ordered segment positions, head first
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Body {
    /// Never empty; validated when the train is spawned
    pub segments: Vec<Position>,
    pub direction: Direction,
}

impl Body {
    pub fn new(segments: Vec<Position>, direction: Direction) -> Self {
        Self { segments, direction }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Slides the body forward: new head in front, last segment dropped.
    pub fn advance(&mut self, new_head: Position) {
        self.segments.insert(0, new_head);
        self.segments.pop();
    }

    /// Lengthens the body by one segment stacked on the tail.
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);
    }
}

/// What the train hunts and what it is currently locked onto
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Pursuit {
    pub target_kind: EntityKind,
    pub target: Option<TargetLock>,
}

impl Pursuit {
    pub fn new(target_kind: EntityKind) -> Self {
        Self {
            target_kind,
            target: None,
        }
    }
}

/// Mood, appetite and pause state
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Disposition {
    pub mood: Mood,
    /// 0.0 to 1.0, never increases
    pub appetite: f32,
    /// Permanent once set; there is no resume path
    pub paused: bool,
}

impl Default for Disposition {
    fn default() -> Self {
        Self {
            mood: Mood::Hungry,
            appetite: 1.0,
            paused: false,
        }
    }
}

impl Disposition {
    /// Applies a meal: appetite drops and mood follows it.
    pub fn digest(&mut self) {
        self.appetite = (self.appetite - APPETITE_PER_MEAL).max(0.0);
        self.mood = if self.appetite < SATED_THRESHOLD {
            Mood::Satisfied
        } else {
            Mood::Hungry
        };
    }

    /// Stops the train after a persuasive argument.
    pub fn comply(&mut self) {
        self.paused = true;
        self.mood = Mood::Conflicted;
    }

    /// Stops the train after a collision.
    pub fn crash(&mut self) {
        self.paused = true;
        self.mood = Mood::Crashed;
    }

    pub fn is_crashed(&self) -> bool {
        self.mood == Mood::Crashed
    }
}

/// Record of promises the player made to this train and broke
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct PromiseLedger {
    pub broken: u32,
}

impl PromiseLedger {
    pub fn record_broken(&mut self) {
        self.broken += 1;
    }

    /// Trust in the player, from 0.0 to 1.0
    pub fn trust(&self) -> f32 {
        (1.0 - TRUST_PER_BROKEN_PROMISE * self.broken as f32).max(0.0)
    }
}
