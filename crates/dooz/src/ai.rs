//! Move selection for computer-controlled seats.

use crate::board::Board;
use crate::types::Position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Picks a move for a computer seat.
///
/// Implementations must return the position of an empty cell, or `None`
/// when the board is full.
pub trait AiStrategy: std::fmt::Debug + Send {
    /// Chooses an empty cell.
    fn select_move(&mut self, board: &Board) -> Option<Position>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;
}

/// Uniform random baseline.
///
/// Picks a random row, then a random column within it, and retries while
/// the cell is owned. Terminates because a non-full board always has an
/// empty cell.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Creates a strategy seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible strategy.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl AiStrategy for RandomStrategy {
    #[instrument(skip(self, board), fields(size = board.size()))]
    fn select_move(&mut self, board: &Board) -> Option<Position> {
        if board.is_full() {
            return None;
        }

        let size = board.size();
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let position = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if let Ok(None) = board.owner(position) {
                debug!(%position, attempts, "Random strategy chose cell");
                return Some(position);
            }
        }
    }

    fn name(&self) -> &str {
        "random"
    }
}

/// Picks the first empty cell in row-major order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstEmptyStrategy;

impl AiStrategy for FirstEmptyStrategy {
    #[instrument(skip(self, board), fields(size = board.size()))]
    fn select_move(&mut self, board: &Board) -> Option<Position> {
        board
            .cells()
            .iter()
            .find(|cell| cell.is_empty())
            .map(|cell| cell.position())
    }

    fn name(&self) -> &str {
        "first_empty"
    }
}
