//! Game rules for Dooz.
//!
//! Pure functions that evaluate a board. Rules are kept apart from board
//! storage so the engine, the contracts and the tests all share one
//! definition of a win and a draw.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LineKind, WinningLine, find_winning_line};
