//! Conversation Memory
//!
//! Per-train record of chat exchanges. The bounded memory is advisory only;
//! compliance scoring never reads it.

use bevy_ecs::prelude::*;
use railyard_events::{ActionTag, ArgumentCategory};
use std::collections::{BTreeMap, VecDeque};

/// Maximum exchanges kept in short-term memory
pub const SHORT_TERM_CAPACITY: usize = 5;

/// Phrases that mark a player message as a commitment
const COMMITMENT_PHRASES: &[&str] = &["promise", "i will", "guarantee", "i swear"];

/// One round of chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub player_text: String,
    pub agent_text: String,
    pub turn: u32,
}

/// Something the player said they would do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    pub text: String,
    pub turn: u32,
}

/// Bounded exchange log plus a tally of argument categories heard
#[derive(Component, Debug, Clone, Default)]
pub struct ConversationMemory {
    short_term: VecDeque<Exchange>,
    tally: BTreeMap<ArgumentCategory, u32>,
    commitments: Vec<Commitment>,
}

impl ConversationMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an exchange, evicting the oldest past capacity, and tallies
    /// the categories the player's argument fell into.
    pub fn add_exchange(
        &mut self,
        player_text: &str,
        agent_text: &str,
        turn: u32,
        categories: &[ArgumentCategory],
    ) {
        self.short_term.push_back(Exchange {
            player_text: player_text.to_string(),
            agent_text: agent_text.to_string(),
            turn,
        });
        while self.short_term.len() > SHORT_TERM_CAPACITY {
            self.short_term.pop_front();
        }

        for category in categories {
            *self.tally.entry(*category).or_insert(0) += 1;
        }

        if is_commitment(player_text) {
            self.commitments.push(Commitment {
                text: player_text.to_string(),
                turn,
            });
        }
    }

    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.short_term.iter()
    }

    pub fn len(&self) -> usize {
        self.short_term.len()
    }

    pub fn is_empty(&self) -> bool {
        self.short_term.is_empty()
    }

    /// How many arguments of a category have been heard.
    pub fn heard(&self, category: ArgumentCategory) -> u32 {
        self.tally.get(&category).copied().unwrap_or(0)
    }

    pub fn commitments(&self) -> &[Commitment] {
        &self.commitments
    }

    /// The most frequently heard category, first in category order on ties.
    pub fn most_effective(&self) -> Option<ArgumentCategory> {
        let mut best: Option<(ArgumentCategory, u32)> = None;
        for &category in ArgumentCategory::all() {
            let count = self.heard(category);
            if count > best.map_or(0, |(_, c)| c) {
                best = Some((category, count));
            }
        }
        best.map(|(category, _)| category)
    }
}

/// True if the message reads as a promise to the train.
pub fn is_commitment(text: &str) -> bool {
    let lower = text.to_lowercase();
    COMMITMENT_PHRASES.iter().any(|p| lower.contains(p))
}

/// One scored message in the full chat log
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub text: String,
    pub score: f32,
    pub action: ActionTag,
    pub turn: u32,
}

/// Unbounded log of every message a train has scored
#[derive(Component, Debug, Clone, Default)]
pub struct ChatHistory {
    pub entries: Vec<ChatEntry>,
}

impl ChatHistory {
    pub fn push(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }
}
