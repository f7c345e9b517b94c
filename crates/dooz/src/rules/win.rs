//! Win detection for N×N boards.
//!
//! A line is a full row, column or diagonal of length N. Lines are
//! scanned rows first, then columns, then the main diagonal, then the
//! anti-diagonal; the first complete line found wins. Two lines can only
//! complete together on the move that finishes both, and the scan order
//! keeps the reported line deterministic in that case.

use crate::board::Board;
use crate::types::{Position, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Which kind of line was completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Row with the given index.
    Row(usize),
    /// Column with the given index.
    Column(usize),
    /// Top-left to bottom-right.
    MainDiagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

/// A completed line and the seat that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// Owner of every cell on the line.
    pub seat: Seat,
    /// Which line it is.
    pub kind: LineKind,
    /// The N cells of the line, in scan order.
    pub cells: Vec<Position>,
}

/// Returns the seat owning every position, or `None` if any is empty or
/// two owners differ.
///
/// Positions come from [`lines`] for this board's size, so each one maps
/// to a row-major cell index.
fn uniform_owner(board: &Board, positions: &[Position]) -> Option<Seat> {
    let cells = board.cells();
    let owner = |pos: &Position| cells[pos.row * board.size() + pos.col].owner();
    let (head, tail) = positions.split_first()?;
    let first = owner(head)?;
    tail.iter()
        .all(|pos| owner(pos) == Some(first))
        .then_some(first)
}

fn check_line(board: &Board, kind: LineKind, cells: Vec<Position>) -> Option<WinningLine> {
    uniform_owner(board, &cells).map(|seat| WinningLine { seat, kind, cells })
}

/// Candidate lines of an N×N board, in priority order.
fn lines(size: usize) -> impl Iterator<Item = (LineKind, Vec<Position>)> {
    let rows = (0..size).map(move |r| {
        (
            LineKind::Row(r),
            (0..size).map(|c| Position::new(r, c)).collect::<Vec<_>>(),
        )
    });
    let cols = (0..size).map(move |c| {
        (
            LineKind::Column(c),
            (0..size).map(|r| Position::new(r, c)).collect::<Vec<_>>(),
        )
    });
    let main = std::iter::once((
        LineKind::MainDiagonal,
        (0..size).map(|i| Position::new(i, i)).collect::<Vec<_>>(),
    ));
    let anti = std::iter::once((
        LineKind::AntiDiagonal,
        (0..size).map(|i| Position::new(i, size - 1 - i)).collect::<Vec<_>>(),
    ));
    rows.chain(cols).chain(main).chain(anti)
}

/// Finds the first complete line on the board.
///
/// Returns `None` if no row, column or diagonal is fully owned by a
/// single seat.
#[instrument(skip(board), fields(size = board.size()))]
pub fn find_winning_line(board: &Board) -> Option<WinningLine> {
    let found = lines(board.size()).find_map(|(kind, cells)| check_line(board, kind, cells));
    if let Some(line) = &found {
        debug!(seat = %line.seat, kind = ?line.kind, "Found winning line");
    }
    found
}
