//! Contract-based validation for session transitions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::Move;
use crate::error::DoozError;
use crate::invariants::{DoozInvariants, InvariantSet};
use crate::session::GameSession;
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), DoozError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), DoozError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The session must be accepting moves.
pub struct GameInProgress;

impl GameInProgress {
    /// Fails with [`DoozError::GameNotInProgress`] outside `InProgress`.
    #[instrument(skip(session))]
    pub fn check(session: &GameSession) -> Result<(), DoozError> {
        if session.lifecycle().is_in_progress() {
            Ok(())
        } else {
            Err(DoozError::GameNotInProgress(session.lifecycle()))
        }
    }
}

/// Precondition: It must be the seat's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Fails with [`DoozError::NotPlayersTurn`] if another seat is to move.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), DoozError> {
        if mov.seat != session.to_move() {
            Err(DoozError::NotPlayersTurn(mov.seat))
        } else {
            Ok(())
        }
    }
}

/// Precondition: The target cell must be on the board and empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails with [`DoozError::OutOfBounds`] or [`DoozError::CellOccupied`].
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), DoozError> {
        match session.board().owner(mov.position)? {
            Some(_) => Err(DoozError::CellOccupied(mov.position)),
            None => Ok(()),
        }
    }
}

/// Composite precondition for a move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(session))]
    pub fn check(mov: &Move, session: &GameSession) -> Result<(), DoozError> {
        GameInProgress::check(session)?;
        PlayersTurn::check(mov, session)?;
        CellIsEmpty::check(mov, session)?;
        Ok(())
    }
}

fn check_invariants(session: &GameSession) -> Result<(), DoozError> {
    DoozInvariants::check_all(session).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Postcondition failed");
        DoozError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
    })
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Preconditions:
/// - Game in progress
/// - Seat's turn
/// - Cell on the board and empty
///
/// Postconditions:
/// - History grew by exactly one move
/// - Session invariants hold
pub struct MoveContract;

impl Contract<GameSession, Move> for MoveContract {
    fn pre(session: &GameSession, action: &Move) -> Result<(), DoozError> {
        LegalMove::check(action, session)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), DoozError> {
        if after.history().len() != before.history().len() + 1 {
            return Err(DoozError::InvariantViolation(
                "Move did not append exactly one history entry".to_string(),
            ));
        }
        check_invariants(after)
    }
}

// ─────────────────────────────────────────────────────────────
//  Undo Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for undo.
///
/// Preconditions:
/// - History is not empty
///
/// Postconditions:
/// - History shrank by exactly one move
/// - Session is back in progress
/// - Session invariants hold
pub struct UndoContract;

impl Contract<GameSession, ()> for UndoContract {
    fn pre(session: &GameSession, _action: &()) -> Result<(), DoozError> {
        if session.history().is_empty() {
            Err(DoozError::NothingToUndo)
        } else {
            Ok(())
        }
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), DoozError> {
        if after.history().len() + 1 != before.history().len() {
            return Err(DoozError::InvariantViolation(
                "Undo did not remove exactly one history entry".to_string(),
            ));
        }
        if !after.lifecycle().is_in_progress() {
            return Err(DoozError::InvariantViolation(
                "Undo did not return the game to in-progress".to_string(),
            ));
        }
        check_invariants(after)
    }
}
