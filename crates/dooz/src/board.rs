//! N×N game board.

use crate::error::DoozError;
use crate::types::{Player, Position, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Smallest supported board.
pub const MIN_SIZE: usize = 3;

/// Largest supported board.
pub const MAX_SIZE: usize = 10;

/// One grid position and its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    owner: Option<Seat>,
}

impl Cell {
    /// Coordinates, fixed at creation.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Seat owning this cell, if any.
    pub fn owner(&self) -> Option<Seat> {
        self.owner
    }

    /// Returns true if no seat owns this cell.
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

/// Square grid of cells stored row-major.
///
/// The size never changes after creation: a new game gets a new board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty `size`×`size` board.
    #[instrument]
    pub fn new(size: usize) -> Result<Self, DoozError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(DoozError::InvalidSize { size });
        }

        let cells = (0..size)
            .flat_map(|row| {
                (0..size).map(move |col| Cell {
                    position: Position::new(row, col),
                    owner: None,
                })
            })
            .collect();

        debug!(size, "Created empty board");
        Ok(Self { size, cells })
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the position lies on the board.
    pub fn contains(&self, position: Position) -> bool {
        position.row < self.size && position.col < self.size
    }

    fn index_of(&self, position: Position) -> Result<usize, DoozError> {
        if self.contains(position) {
            Ok(position.row * self.size + position.col)
        } else {
            Err(DoozError::OutOfBounds {
                position,
                size: self.size,
            })
        }
    }

    /// Returns the cell at `(row, col)`.
    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, DoozError> {
        let index = self.index_of(Position::new(row, col))?;
        Ok(&self.cells[index])
    }

    /// Returns the owner of the cell at `position`.
    pub fn owner(&self, position: Position) -> Result<Option<Seat>, DoozError> {
        let index = self.index_of(position)?;
        Ok(self.cells[index].owner)
    }

    /// Gives an empty cell to `seat`.
    ///
    /// Only the target cell changes.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn set_owner(&mut self, position: Position, seat: Seat) -> Result<(), DoozError> {
        let index = self.index_of(position)?;
        let cell = &mut self.cells[index];
        if cell.owner.is_some() {
            return Err(DoozError::CellOccupied(position));
        }
        cell.owner = Some(seat);
        Ok(())
    }

    /// Empties a cell, returning its previous owner.
    ///
    /// Owners are otherwise permanent for the life of a board; undo is the
    /// only caller.
    #[instrument(skip(self), fields(size = self.size))]
    pub(crate) fn clear_owner(&mut self, position: Position) -> Result<Option<Seat>, DoozError> {
        let index = self.index_of(position)?;
        Ok(self.cells[index].owner.take())
    }

    /// Returns true iff every cell has an owner.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.owner.is_some())
    }

    /// Number of owned cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.owner.is_some()).count()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Positions of empty cells, row-major.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.is_empty())
            .map(|cell| cell.position)
            .collect()
    }

    /// Renders the board with each player's shape token, `.` for empty cells.
    pub fn render(&self, players: &[Player; 2]) -> String {
        self.render_with(|seat| players[seat.index()].shape().as_str())
    }

    fn render_with<'a>(&self, token: impl Fn(Seat) -> &'a str) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.owner.map_or(".", &token))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self.render_with(|seat| match seat {
            Seat::First => "X",
            Seat::Second => "O",
        });
        write!(f, "{}", rendered)
    }
}
