//! Lifecycle states of a game session.

use crate::types::Seat;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The seat completed a line.
    Won(Seat),
    /// The board filled up without a line.
    Drawn,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Won(seat) => Some(*seat),
            Outcome::Drawn => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Drawn)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won(seat) => write!(f, "{} player wins", seat),
            Outcome::Drawn => write!(f, "Draw"),
        }
    }
}

/// Where a session is in its lifecycle.
///
/// `Idle` until started, `InProgress` while accepting moves, and
/// `Finished` once a line is completed or the board fills. Undo moves a
/// finished session back to `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Created, not yet started.
    #[default]
    Idle,
    /// Accepting moves.
    InProgress,
    /// No further moves accepted.
    Finished(Outcome),
}

impl Lifecycle {
    /// Returns true while moves are accepted.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, Lifecycle::InProgress)
    }

    /// Returns the outcome if the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Lifecycle::Finished(outcome) => Some(*outcome),
            _ => None,
        }
    }
}
