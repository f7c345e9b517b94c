//! A single game: board, players, turn pointer, lifecycle and history.

use crate::action::Move;
use crate::board::Board;
use crate::contracts::{Contract, MoveContract, UndoContract};
use crate::error::DoozError;
use crate::phases::{Lifecycle, Outcome};
use crate::rules::{WinningLine, find_winning_line};
use crate::types::{Player, Position, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// One game from start to finish.
///
/// The session owns its board and history outright. Players are copies
/// of the configured players and are addressed by [`Seat`]; cells only
/// ever store a seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) board: Board,
    players: [Player; 2],
    pub(crate) to_move: Seat,
    pub(crate) lifecycle: Lifecycle,
    winning_line: Option<WinningLine>,
    pub(crate) history: Vec<Move>,
}

impl GameSession {
    /// Creates an idle session with an empty `size`×`size` board.
    ///
    /// `players` is the resolved turn order: the first entry moves first.
    #[instrument(skip(players))]
    pub fn new(size: usize, players: [Player; 2]) -> Result<Self, DoozError> {
        Ok(Self {
            board: Board::new(size)?,
            players,
            to_move: Seat::First,
            lifecycle: Lifecycle::Idle,
            winning_line: None,
            history: Vec::new(),
        })
    }

    /// Starts (or restarts) play on a fresh board.
    #[instrument(skip(self), fields(size = self.board.size()))]
    pub fn start(&mut self) -> Result<(), DoozError> {
        self.board = Board::new(self.board.size())?;
        self.history.clear();
        self.to_move = Seat::First;
        self.winning_line = None;
        self.lifecycle = Lifecycle::InProgress;
        info!(
            first = %self.players[0].name(),
            second = %self.players[1].name(),
            "Game started"
        );
        Ok(())
    }

    /// Rebuilds a session by replaying `moves` from an empty board.
    #[instrument(skip(players, moves), fields(moves = moves.len()))]
    pub fn replay(size: usize, players: [Player; 2], moves: &[Move]) -> Result<Self, DoozError> {
        let mut session = Self::new(size, players)?;
        session.start()?;
        for action in moves {
            session.play(action.position, action.seat)?;
        }
        Ok(session)
    }

    /// Claims `position` for `seat`.
    ///
    /// Fails without touching the session if the game is not in progress,
    /// it is not `seat`'s turn, or the cell is off the board or owned.
    /// Returns the lifecycle after the move.
    #[instrument(skip(self), fields(size = self.board.size(), history = self.history.len()))]
    pub fn play(&mut self, position: Position, seat: Seat) -> Result<Lifecycle, DoozError> {
        let action = Move::new(seat, position);
        if let Err(e) = MoveContract::pre(self, &action) {
            warn!(error = %e, "Rejected move");
            return Err(e);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set_owner(position, seat)?;
        self.history.push(action);
        debug!(%action, "Applied move");

        if let Some(line) = find_winning_line(&self.board) {
            info!(winner = %self.players[line.seat.index()].name(), kind = ?line.kind, "Game won");
            self.lifecycle = Lifecycle::Finished(Outcome::Won(line.seat));
            self.winning_line = Some(line);
        } else if self.board.is_full() {
            info!("Game drawn");
            self.lifecycle = Lifecycle::Finished(Outcome::Drawn);
        } else {
            self.to_move = seat.other();
        }

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        Ok(self.lifecycle)
    }

    /// Reverts the most recent move.
    ///
    /// A finished game returns to `InProgress` with its winner cleared, and
    /// the turn goes back to the seat that made the undone move.
    #[instrument(skip(self), fields(history = self.history.len()))]
    pub fn undo(&mut self) -> Result<Move, DoozError> {
        UndoContract::pre(self, &())?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let last = self.history.pop().ok_or(DoozError::NothingToUndo)?;
        self.board.clear_owner(last.position)?;
        self.to_move = last.seat;
        self.winning_line = None;
        self.lifecycle = Lifecycle::InProgress;
        debug!(action = %last, "Undid move");

        #[cfg(debug_assertions)]
        UndoContract::post(&before, self)?;

        Ok(last)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns both players in turn order.
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Returns the player sitting in `seat`.
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    /// Seat whose turn it is (the last mover once the game is finished).
    pub fn to_move(&self) -> Seat {
        self.to_move
    }

    /// Player whose turn it is.
    pub fn current_player(&self) -> &Player {
        self.player(self.to_move)
    }

    /// Returns the lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Winner, if the game was won.
    pub fn winner(&self) -> Option<Seat> {
        self.lifecycle.outcome().and_then(|outcome| outcome.winner())
    }

    /// The completed line, if the game was won.
    pub fn winning_line(&self) -> Option<&WinningLine> {
        self.winning_line.as_ref()
    }

    /// Returns move history, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Empty cells, row-major.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.lifecycle.is_in_progress() {
            self.board.empty_positions()
        } else {
            Vec::new()
        }
    }

    /// Captures the externally visible state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board.clone(),
            players: self.players.clone(),
            current_player: self.to_move,
            lifecycle: self.lifecycle,
            winner: self.winner(),
            winning_line: self
                .winning_line
                .as_ref()
                .map(|line| line.cells.clone())
                .unwrap_or_default(),
            move_history_len: self.history.len(),
        }
    }
}

/// Read-only view of a session handed to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Board at the time of the snapshot.
    pub board: Board,
    /// Players in turn order.
    pub players: [Player; 2],
    /// Seat to move.
    pub current_player: Seat,
    /// Lifecycle state.
    pub lifecycle: Lifecycle,
    /// Winner, if any.
    pub winner: Option<Seat>,
    /// Cells of the winning line; empty unless won.
    pub winning_line: Vec<Position>,
    /// Number of moves played.
    pub move_history_len: usize,
}
