//! Error types for the Dooz engine.

use crate::phases::Lifecycle;
use crate::types::{Position, Seat};
use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised by a board, session or engine operation.
///
/// Every variant is a local validation failure: nothing is retried and
/// the state the call was made against is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DoozError {
    /// Requested board size is below the minimum or above the maximum.
    #[display("Board size {size} is not supported")]
    InvalidSize {
        /// The rejected size.
        size: usize,
    },

    /// Coordinates fall outside the board.
    #[display("Position {position} is outside a {size}x{size} board")]
    OutOfBounds {
        /// The rejected position.
        position: Position,
        /// Board size.
        size: usize,
    },

    /// The target cell already has an owner.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(Position),

    /// A seat tried to move out of turn.
    #[display("It's not the {} player's turn", _0)]
    NotPlayersTurn(Seat),

    /// Undo was requested with an empty move history.
    #[display("There is no move to undo")]
    NothingToUndo,

    /// A move was attempted while the game was not accepting moves.
    #[display("Game is not in progress ({:?})", _0)]
    GameNotInProgress(Lifecycle),

    /// An AI strategy could not find an empty cell.
    #[display("No legal moves are available")]
    NoLegalMoves,

    /// A game was requested from a configuration that fails validation.
    #[display("Invalid game config: {}", _0)]
    InvalidConfig(String),

    /// A postcondition failed after a transition (debug builds only).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for DoozError {}

/// Configuration error with the location it was raised from.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<ConfigError> for DoozError {
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfig(err.message)
    }
}

impl From<toml::de::Error> for ConfigError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(format!("Failed to parse config: {}", err))
    }
}

impl From<std::io::Error> for ConfigError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("Failed to read config file: {}", err))
    }
}
