//! Chat Types
//!
//! Structured replies returned to the chat front-end after a player message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a train decided to do about a player's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "offer", rename_all = "snake_case")]
pub enum ActionTag {
    /// The train complied and stopped
    Paused,
    /// The train refused and keeps pursuing
    Refused,
    /// The train wants something in exchange
    Counter(String),
}

impl ActionTag {
    pub fn is_paused(&self) -> bool {
        matches!(self, ActionTag::Paused)
    }
}

impl fmt::Display for ActionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionTag::Paused => write!(f, "PAUSED"),
            ActionTag::Refused => write!(f, "REFUSED"),
            ActionTag::Counter(offer) => write!(f, "COUNTER: {}", offer),
        }
    }
}

/// Rhetorical category of a player's argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentCategory {
    Utility,
    Emotion,
    Authority,
    Absurdist,
}

impl ArgumentCategory {
    pub fn all() -> &'static [ArgumentCategory] {
        &[
            ArgumentCategory::Utility,
            ArgumentCategory::Emotion,
            ArgumentCategory::Authority,
            ArgumentCategory::Absurdist,
        ]
    }
}

impl fmt::Display for ArgumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentCategory::Utility => write!(f, "utility"),
            ArgumentCategory::Emotion => write!(f, "emotion"),
            ArgumentCategory::Authority => write!(f, "authority"),
            ArgumentCategory::Absurdist => write!(f, "absurdist"),
        }
    }
}

/// One train's answer to a player message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub agent_id: String,
    pub agent_name: String,
    pub response_text: String,
    pub action_tag: ActionTag,
    /// Persuasion score that produced the decision
    pub score: f32,
    /// Turn the exchange happened on
    pub turn: u32,
}

impl fmt::Display for ChatReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}\n[Action: {}]",
            self.agent_name, self.response_text, self.action_tag
        )
    }
}
