//! Alternating turn invariant: seats alternate First, Second, First, ...

use super::Invariant;
use crate::{GameSession, Seat};

/// Invariant: Seats alternate turns.
///
/// Move history must start with the first seat and never repeat a seat.
/// While the game is open the seat to move is the one after the last
/// mover; once it is finished the pointer stays on the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<GameSession> for AlternatingTurnInvariant {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();

        let Some(last) = history.last() else {
            return session.to_move() == Seat::First;
        };

        if history[0].seat != Seat::First {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].seat == pair[1].seat) {
            return false;
        }

        if session.lifecycle().is_in_progress() {
            session.to_move() == last.seat.other()
        } else {
            session.to_move() == last.seat
        }
    }

    fn description() -> &'static str {
        "Seats alternate turns (First, Second, First, ...)"
    }
}
