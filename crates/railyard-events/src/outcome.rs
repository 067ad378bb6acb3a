//! Game Outcome
//!
//! Terminal results of a railyard session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a session ended. Exactly one outcome is reported per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// Every entity on the grid was consumed
    AgentsWin { turn: u32, max_turns: u32 },
    /// Every train was stopped, by negotiation or by collision
    PlayerWinsByNegotiation { saved: usize, turn: u32, max_turns: u32 },
    /// The turn limit was reached with entities remaining
    PlayerWinsBySurvival { survived: usize, turn: u32, max_turns: u32 },
}

impl Outcome {
    /// True if the player won.
    pub fn player_won(&self) -> bool {
        !matches!(self, Outcome::AgentsWin { .. })
    }

    pub fn turn(&self) -> u32 {
        match self {
            Outcome::AgentsWin { turn, .. }
            | Outcome::PlayerWinsByNegotiation { turn, .. }
            | Outcome::PlayerWinsBySurvival { turn, .. } => *turn,
        }
    }

    /// Text announced to the player when the session ends.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AgentsWin { turn, max_turns } => write!(
                f,
                "GAME OVER - All entities consumed! Trains win. (Turn {}/{})",
                turn, max_turns
            ),
            Outcome::PlayerWinsByNegotiation { saved, turn, max_turns } => write!(
                f,
                "VICTORY! All trains stopped through negotiation! {} entities saved. (Turn {}/{})",
                saved, turn, max_turns
            ),
            Outcome::PlayerWinsBySurvival { survived, turn, max_turns } => write!(
                f,
                "TIME'S UP! {} entities survived. You win! (Turn {}/{})",
                survived, turn, max_turns
            ),
        }
    }
}
