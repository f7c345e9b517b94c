//! First-class invariants for game sessions.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

/// A logical property that must hold for a given state.
///
/// Invariants express system guarantees that should never be violated.
/// They are checked in debug builds and can be tested independently.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples of one to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Implements [`InvariantSet`] for a tuple of invariants, checking each
/// member in order and gathering every violation.
macro_rules! invariant_tuple {
    ($($member:ident),+) => {
        impl<S, $($member),+> InvariantSet<S> for ($($member,)+)
        where
            $($member: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($member::holds(state), $member::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

invariant_tuple!(A);
invariant_tuple!(A, B);
invariant_tuple!(A, B, C);
invariant_tuple!(A, B, C, D);

pub mod alternating_turn;
pub mod history_consistent;
pub mod replayable_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use replayable_board::ReplayableBoardInvariant;

/// All session invariants as a composable set.
pub type DoozInvariants = (
    ReplayableBoardInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSession, Move, Player, Position, Seat};

    fn started(size: usize) -> GameSession {
        let players = [Player::human("A", "X"), Player::computer("B", "O")];
        let mut session = GameSession::new(size, players).expect("valid size");
        session.start().expect("start");
        session
    }

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(DoozInvariants::check_all(&started(3)).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves_and_undo() {
        let mut session = started(5);
        session.play(Position::new(0, 0), Seat::First).expect("legal");
        session.play(Position::new(4, 4), Seat::Second).expect("legal");
        session.play(Position::new(2, 2), Seat::First).expect("legal");
        assert!(DoozInvariants::check_all(&session).is_ok());

        session.undo().expect("history not empty");
        assert!(DoozInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut session = started(3);
        session.play(Position::new(1, 1), Seat::First).expect("legal");
        session
            .board
            .set_owner(Position::new(0, 0), Seat::Second)
            .expect("empty cell");

        let violations = DoozInvariants::check_all(&session).expect_err("corrupted");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (ReplayableBoardInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&started(4)).is_ok());
    }

    #[test]
    fn test_single_invariant_set_reports_its_description() {
        let mut session = started(3);
        session.history.push(Move::new(Seat::First, Position::new(2, 2)));

        let violations = <(HistoryConsistentInvariant,)>::check_all(&session)
            .expect_err("history without a board cell");
        assert_eq!(
            violations,
            vec![InvariantViolation::new(HistoryConsistentInvariant::description())]
        );
    }
}
