//! Replayable board invariant: the board is exactly its history.

use super::Invariant;
use crate::{Board, GameSession};

/// Invariant: Replaying the history onto an empty board reproduces the board.
///
/// Cells are only ever claimed once, and undo removes exactly the cell of
/// the move it pops.
pub struct ReplayableBoardInvariant;

impl Invariant<GameSession> for ReplayableBoardInvariant {
    fn holds(session: &GameSession) -> bool {
        let Ok(mut reconstructed) = Board::new(session.board().size()) else {
            return false;
        };

        for mov in session.history() {
            if reconstructed.set_owner(mov.position, mov.seat).is_err() {
                return false;
            }
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board matches a replay of the move history"
    }
}
