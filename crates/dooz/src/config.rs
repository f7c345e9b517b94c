//! Game configuration: board size, players and who moves first.

use crate::board::{MAX_SIZE, MIN_SIZE};
use crate::error::ConfigError;
use crate::settings::{SettingsStore, keys};
use crate::types::{Player, PlayerKind};
use derive_getters::Getters;
use rand::Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// How the first seat is chosen when a game starts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FirstPlayerPolicy {
    /// Players move in the configured order.
    #[default]
    AsListed,
    /// A human moves first when playing against the computer.
    HumanFirst,
    /// The computer moves first when playing against a human.
    ComputerFirst,
    /// Each player rolls a die; the higher roll moves first.
    Dice,
}

impl FirstPlayerPolicy {
    /// Returns `players` in turn order.
    #[instrument(skip(players, rng))]
    pub fn order<R: Rng>(self, players: [Player; 2], rng: &mut R) -> [Player; 2] {
        let swap = match self {
            Self::AsListed => false,
            Self::HumanFirst => players[0].is_computer() && !players[1].is_computer(),
            Self::ComputerFirst => !players[0].is_computer() && players[1].is_computer(),
            Self::Dice => loop {
                let first: u8 = rng.gen_range(1..=6);
                let second: u8 = rng.gen_range(1..=6);
                debug!(first, second, "Rolled for first move");
                if first != second {
                    break second > first;
                }
            },
        };

        let [a, b] = players;
        if swap { [b, a] } else { [a, b] }
    }
}

/// Two people at one device, or one person against the engine.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayMode {
    /// Both seats are human.
    TwoPlayer,
    /// The second configured player is the computer.
    #[default]
    VsComputer,
}

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, JsonSchema)]
pub struct GameConfig {
    /// Board side length.
    #[serde(default = "default_size")]
    size: usize,

    /// Players in configured order.
    #[serde(default = "default_players")]
    players: [Player; 2],

    /// How the first seat is chosen.
    #[serde(default)]
    first_player: FirstPlayerPolicy,
}

fn default_size() -> usize {
    MIN_SIZE
}

fn default_players() -> [Player; 2] {
    [
        Player::human("Player", "X"),
        Player::computer("Computer", "O"),
    ]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(default_size(), default_players(), FirstPlayerPolicy::default())
    }
}

impl GameConfig {
    /// Creates a configuration.
    pub fn new(size: usize, players: [Player; 2], first_player: FirstPlayerPolicy) -> Self {
        Self {
            size,
            players,
            first_player,
        }
    }

    /// Replaces the board size.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Replaces the players.
    pub fn with_players(mut self, players: [Player; 2]) -> Self {
        self.players = players;
        self
    }

    /// Replaces the first-player policy.
    pub fn with_first_player(mut self, first_player: FirstPlayerPolicy) -> Self {
        self.first_player = first_player;
        self
    }

    /// Derived play mode: `VsComputer` if either player is a computer.
    pub fn play_mode(&self) -> PlayMode {
        if self.players.iter().any(Player::is_computer) {
            PlayMode::VsComputer
        } else {
            PlayMode::TwoPlayer
        }
    }

    /// Checks size bounds and player tokens.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            return Err(ConfigError::new(format!(
                "Board size {} must be between {} and {}",
                self.size, MIN_SIZE, MAX_SIZE
            )));
        }

        for player in &self.players {
            if player.name().trim().is_empty() {
                return Err(ConfigError::new("Player names must not be empty"));
            }
            if player.shape().trim().is_empty() {
                return Err(ConfigError::new(format!(
                    "Player {} has an empty shape",
                    player.name()
                )));
            }
        }

        if self.players[0].shape() == self.players[1].shape() {
            return Err(ConfigError::new(format!(
                "Both players use the shape {}",
                self.players[0].shape()
            )));
        }

        Ok(())
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&content)?;
        info!(size = config.size, first_player = %config.first_player, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Builds a configuration from stored settings.
    ///
    /// Missing keys fall back to defaults. The first stored player is
    /// always human; the second is a computer in [`PlayMode::VsComputer`].
    #[instrument(skip(store))]
    pub fn from_settings(store: &dyn SettingsStore) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let size = match store.get_int(keys::BOARD_SIZE) {
            Some(raw) => usize::try_from(raw)
                .map_err(|_| ConfigError::new(format!("Invalid board size setting {}", raw)))?,
            None => defaults.size,
        };

        let mode = parse_setting(store, keys::PLAY_MODE, PlayMode::default())?;
        let first_player = parse_setting(store, keys::FIRST_PLAYER, defaults.first_player)?;

        let [default_first, default_second] = defaults.players;
        let text = |key: &str, fallback: &String| {
            store.get_string(key).unwrap_or_else(|| fallback.clone())
        };
        let second_kind = match mode {
            PlayMode::TwoPlayer => PlayerKind::Human,
            PlayMode::VsComputer => PlayerKind::Computer,
        };

        let players = [
            Player::human(
                text(keys::PLAYER1_NAME, default_first.name()),
                text(keys::PLAYER1_SHAPE, default_first.shape()),
            ),
            Player::new(
                text(keys::PLAYER2_NAME, default_second.name()),
                text(keys::PLAYER2_SHAPE, default_second.shape()),
                second_kind,
            ),
        ];

        let config = Self::new(size, players, first_player);
        config.validate()?;
        debug!(size, %mode, %first_player, "Config seeded from settings");
        Ok(config)
    }

    /// Writes this configuration to the settings store.
    ///
    /// The store keeps the human in the first player's keys, so a computer
    /// listed first is written second and the policy records that it
    /// opens. Two computer players cannot be stored.
    #[instrument(skip(self, store))]
    pub fn save_to(&self, store: &mut dyn SettingsStore) -> Result<(), ConfigError> {
        let [first, second] = &self.players;
        let (human, other, first_player) = match (first.is_computer(), second.is_computer()) {
            (false, _) => (first, second, self.first_player),
            (true, false) => {
                let policy = match self.first_player {
                    FirstPlayerPolicy::AsListed => FirstPlayerPolicy::ComputerFirst,
                    policy => policy,
                };
                (second, first, policy)
            }
            (true, true) => {
                return Err(ConfigError::new(
                    "Settings hold at most one computer player",
                ));
            }
        };

        store.set_int(keys::BOARD_SIZE, self.size as i64);
        store.set_string(keys::PLAY_MODE, &self.play_mode().to_string());
        store.set_string(keys::FIRST_PLAYER, &first_player.to_string());
        store.set_string(keys::PLAYER1_NAME, human.name());
        store.set_string(keys::PLAYER1_SHAPE, human.shape());
        store.set_string(keys::PLAYER2_NAME, other.name());
        store.set_string(keys::PLAYER2_SHAPE, other.shape());
        debug!(%first_player, "Config saved to settings");
        Ok(())
    }
}

fn parse_setting<T: FromStr>(
    store: &dyn SettingsStore,
    key: &str,
    fallback: T,
) -> Result<T, ConfigError> {
    match store.get_string(key) {
        Some(raw) => T::from_str(&raw)
            .map_err(|_| ConfigError::new(format!("Invalid value {:?} for setting {}", raw, key))),
        None => Ok(fallback),
    }
}
