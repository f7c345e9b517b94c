//! Core domain types for Dooz.

use derive_getters::Getters;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two seats at the table.
///
/// Cells store a seat rather than a player, so the board only ever
/// looks players up through the session that owns them.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Seat {
    /// Seat that moves first.
    First,
    /// Seat that moves second.
    Second,
}

impl Seat {
    /// Returns the other seat.
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Index of this seat in a `[T; 2]` pair.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }
}

/// A cell coordinate, zero-based.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Creates a position.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Who controls a player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlayerKind {
    /// Moves come from the host (a person tapping cells).
    Human,
    /// Moves come from the engine's AI strategy.
    Computer,
}

/// A participant: display name, shape token and controller.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    /// Display name.
    name: String,
    /// Token drawn in owned cells ("X", "O", an emoji...).
    shape: String,
    /// Who picks this player's moves.
    kind: PlayerKind,
}

impl Player {
    /// Creates a player.
    #[instrument(skip_all, fields(kind = %kind))]
    pub fn new(name: impl Into<String>, shape: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            shape: shape.into(),
            kind,
        }
    }

    /// Creates a human-controlled player.
    pub fn human(name: impl Into<String>, shape: impl Into<String>) -> Self {
        Self::new(name, shape, PlayerKind::Human)
    }

    /// Creates a computer-controlled player.
    pub fn computer(name: impl Into<String>, shape: impl Into<String>) -> Self {
        Self::new(name, shape, PlayerKind::Computer)
    }

    /// Returns true if the engine picks this player's moves.
    pub fn is_computer(&self) -> bool {
        self.kind == PlayerKind::Computer
    }
}
