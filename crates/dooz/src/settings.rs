//! Key-value settings store used to seed game configuration.
//!
//! The engine never touches storage. Hosts implement [`SettingsStore`]
//! over whatever persistence they have and hand it to
//! [`GameConfig::from_settings`](crate::GameConfig::from_settings).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, trace};

/// Setting keys read and written by [`GameConfig`](crate::GameConfig).
pub mod keys {
    /// Board side length (int).
    pub const BOARD_SIZE: &str = "board_size";
    /// `two_player` or `vs_computer` (string).
    pub const PLAY_MODE: &str = "play_mode";
    /// First-player policy (string).
    pub const FIRST_PLAYER: &str = "first_player";
    /// First player's name (string).
    pub const PLAYER1_NAME: &str = "player1_name";
    /// First player's shape token (string).
    pub const PLAYER1_SHAPE: &str = "player1_shape";
    /// Second player's name (string).
    pub const PLAYER2_NAME: &str = "player2_name";
    /// Second player's shape token (string).
    pub const PLAYER2_SHAPE: &str = "player2_shape";
}

/// String and integer settings addressed by key.
pub trait SettingsStore {
    /// Reads a string setting.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Reads an integer setting.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Writes a string setting.
    fn set_string(&mut self, key: &str, value: &str);

    /// Writes an integer setting.
    fn set_int(&mut self, key: &str, value: i64);
}

/// A stored value. Reads are typed: an int is not returned as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// Integer value.
    Int(i64),
    /// String value.
    Text(String),
}

/// In-memory store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemorySettings {
    values: HashMap<String, SettingValue>,
}

impl MemorySettings {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.values.get(key)? {
            SettingValue::Text(value) => Some(value.clone()),
            SettingValue::Int(_) => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key)? {
            SettingValue::Int(value) => Some(*value),
            SettingValue::Text(_) => None,
        }
    }

    fn set_string(&mut self, key: &str, value: &str) {
        trace!(key, value, "Storing string setting");
        self.values
            .insert(key.to_string(), SettingValue::Text(value.to_string()));
    }

    fn set_int(&mut self, key: &str, value: i64) {
        trace!(key, value, "Storing int setting");
        self.values.insert(key.to_string(), SettingValue::Int(value));
    }
}
