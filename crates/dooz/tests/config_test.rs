//! Tests for loading game configuration and seeding games from settings.

use dooz::{
    FirstPlayerPolicy, GameConfig, Lifecycle, MemorySettings, PlayMode, PlayerKind, RandomStrategy,
    SettingsStore, TurnEngine, keys,
};
use std::io::Write;

#[test]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(
        file,
        r#"
size = 5
first_player = "dice"

[[players]]
name = "Sara"
shape = "X"
kind = "human"

[[players]]
name = "Omid"
shape = "O"
kind = "human"
"#
    )
    .expect("write config");

    let config = GameConfig::from_file(file.path()).expect("valid config");
    assert_eq!(*config.size(), 5);
    assert_eq!(*config.first_player(), FirstPlayerPolicy::Dice);
    assert_eq!(config.play_mode(), PlayMode::TwoPlayer);
    assert_eq!(config.players()[1].name(), "Omid");
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = GameConfig::from_file(dir.path().join("absent.toml")).expect_err("missing file");
    assert!(err.message.contains("Failed to read config file"));
}

#[test]
fn test_invalid_size_in_file_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "size = 2").expect("write config");
    let err = GameConfig::from_file(file.path()).expect_err("size too small");
    assert!(err.message.contains("Board size 2"));
}

#[test]
fn test_malformed_toml_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "size = [").expect("write config");
    let err = GameConfig::from_file(file.path()).expect_err("bad toml");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_settings_seed_a_vs_computer_game() {
    let mut store = MemorySettings::new();
    store.set_int(keys::BOARD_SIZE, 4);
    store.set_string(keys::PLAY_MODE, "vs_computer");
    store.set_string(keys::FIRST_PLAYER, "as_listed");
    store.set_string(keys::PLAYER1_NAME, "Sara");

    let config = GameConfig::from_settings(&store).expect("valid settings");
    assert_eq!(*config.players()[0].kind(), PlayerKind::Human);
    assert_eq!(*config.players()[1].kind(), PlayerKind::Computer);

    let mut engine = TurnEngine::new(RandomStrategy::seeded(11)).with_rng_seed(11);
    let snapshot = engine.new_game(&config).expect("valid config");
    assert_eq!(snapshot.lifecycle, Lifecycle::InProgress);
    assert_eq!(snapshot.board.size(), 4);
    assert_eq!(snapshot.players[0].name(), "Sara");
    assert_eq!(snapshot.move_history_len, 0);
}

#[test]
fn test_saved_config_survives_store_round_trip() {
    let config = GameConfig::default()
        .with_size(7)
        .with_first_player(FirstPlayerPolicy::HumanFirst);
    let mut store = MemorySettings::new();
    config.save_to(&mut store).expect("storable");

    assert_eq!(store.get_int(keys::BOARD_SIZE), Some(7));
    assert_eq!(GameConfig::from_settings(&store).expect("valid settings"), config);
}
