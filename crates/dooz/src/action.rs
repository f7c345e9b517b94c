//! Moves as first-class domain events.

use crate::types::{Position, Seat};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// A seat claiming a cell.
///
/// Moves are recorded in chronological order and popped by undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// The seat making the move.
    pub seat: Seat,
    /// The claimed cell.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.seat, self.position)
    }
}
