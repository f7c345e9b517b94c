//! Dooz - tic-tac-toe on N×N boards
//!
//! The rules engine behind a Dooz app: boards of any size from 3×3 to
//! 10×10, two-player and player-vs-computer games, and undo.
//!
//! # Architecture
//!
//! - **Board**: fixed-size grid of cells, each owned by a seat or empty
//! - **Rules**: win detection over rows, columns and both diagonals, and draw detection
//! - **Session**: one game's board, players, turn pointer, lifecycle and history
//! - **Engine**: drives sessions for a UI and plays computer seats
//! - **AI**: pluggable move selection (uniform random baseline)
//! - **Config**: game settings seeded from TOML or a key-value settings store
//!
//! # Example
//!
//! ```
//! use dooz::{FirstEmptyStrategy, GameConfig, Lifecycle, Player, Position, Seat, TurnEngine};
//!
//! # fn example() -> Result<(), dooz::DoozError> {
//! let config = GameConfig::default()
//!     .with_size(4)
//!     .with_players([Player::human("Sara", "X"), Player::human("Omid", "O")]);
//!
//! let mut engine = TurnEngine::new(FirstEmptyStrategy);
//! engine.new_game(&config)?;
//! let snapshot = engine.play_move(Position::new(1, 1), Seat::First)?;
//! assert_eq!(snapshot.current_player, Seat::Second);
//! assert_eq!(snapshot.lifecycle, Lifecycle::InProgress);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod ai;
mod board;
mod config;
mod engine;
mod error;
mod phases;
mod session;
mod settings;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use action::Move;
pub use board::{Board, Cell, MAX_SIZE, MIN_SIZE};
pub use phases::{Lifecycle, Outcome};
pub use types::{Player, PlayerKind, Position, Seat};

// Crate-level exports - Rules
pub use rules::{LineKind, WinningLine, find_winning_line, is_draw, is_full};

// Crate-level exports - Session and engine
pub use engine::TurnEngine;
pub use session::{GameSession, SessionSnapshot};

// Crate-level exports - AI strategies
pub use ai::{AiStrategy, FirstEmptyStrategy, RandomStrategy};

// Crate-level exports - Configuration and settings
pub use config::{FirstPlayerPolicy, GameConfig, PlayMode};
pub use settings::{MemorySettings, SettingValue, SettingsStore, keys};

// Crate-level exports - Errors
pub use error::{ConfigError, DoozError};
