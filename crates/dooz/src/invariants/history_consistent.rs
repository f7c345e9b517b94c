//! History consistency invariant: history length matches owned cells.

use super::Invariant;
use crate::GameSession;

/// Invariant: History length equals number of owned cells.
///
/// Every move in history corresponds to exactly one owned cell.
pub struct HistoryConsistentInvariant;

impl Invariant<GameSession> for HistoryConsistentInvariant {
    fn holds(session: &GameSession) -> bool {
        session.history().len() == session.board().occupied_count()
    }

    fn description() -> &'static str {
        "History length matches number of owned cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Seat};

    #[test]
    fn test_holds_through_play_and_undo() {
        let players = [Player::human("A", "X"), Player::human("B", "O")];
        let mut session = GameSession::new(4, players).expect("valid size");
        session.start().expect("start");
        assert!(HistoryConsistentInvariant::holds(&session));

        session.play(Position::new(3, 0), Seat::First).expect("legal");
        session.play(Position::new(0, 3), Seat::Second).expect("legal");
        assert!(HistoryConsistentInvariant::holds(&session));
        assert_eq!(session.history().len(), 2);

        session.undo().expect("history not empty");
        assert!(HistoryConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_owned_cell_without_move_violates() {
        let players = [Player::human("A", "X"), Player::human("B", "O")];
        let mut session = GameSession::new(3, players).expect("valid size");
        session.start().expect("start");
        session
            .board
            .set_owner(Position::new(0, 1), Seat::First)
            .expect("empty cell");
        assert!(!HistoryConsistentInvariant::holds(&session));
    }
}
