//! Configuration system integration tests for Sphinx.
//!
//! Tests save/load round-trips and schema tolerance using temporary
//! files, so the real `~/.sphinx` config is never touched.

use std::fs;
use tempfile::TempDir;

use sphinx::config::{AudioConfig, Config, GameConfig, NarratorConfig, RecognitionConfig};

// =============================================================================
// Helper Functions
// =============================================================================

/// Saves configuration to an explicit path.
fn save_config(config: &Config, path: &std::path::Path) {
    let contents = serde_json::to_string_pretty(config).expect("serialise config");
    fs::write(path, contents).expect("write config file");
}

/// Loads configuration from an explicit path, defaulting when missing.
fn load_config(path: &std::path::Path) -> Config {
    if !path.exists() {
        return Config::default();
    }

    let contents = fs::read_to_string(path).expect("read config file");
    serde_json::from_str(&contents).expect("parse config")
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_default_config_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = Config::default();
    save_config(&config, &path);
    let restored = load_config(&path);

    assert_eq!(restored.version, config.version);
    assert_eq!(restored.game.total_guesses, config.game.total_guesses);
    assert_eq!(restored.game.retry_limit, config.game.retry_limit);
    assert_eq!(restored.audio.clip_seconds, config.audio.clip_seconds);
    assert_eq!(restored.recognition.endpoint, config.recognition.endpoint);
}

#[test]
fn test_custom_config_round_trips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let config = Config {
        version: 1,
        audio: AudioConfig {
            device_id: Some("USB Microphone".to_string()),
            clip_seconds: 6,
        },
        game: GameConfig {
            total_guesses: 3,
            retry_limit: 2,
            quit_keyword: "stop".to_string(),
            word_count: 5,
        },
        recognition: RecognitionConfig {
            endpoint: "http://stt.local/v1/audio/transcriptions".to_string(),
            model: "whisper-large".to_string(),
            timeout_secs: 15,
        },
        narrator: NarratorConfig {
            speak: false,
            speech_command: Some("espeak".to_string()),
        },
    };

    save_config(&config, &path);
    let restored = load_config(&path);

    assert_eq!(restored.audio.device_id, Some("USB Microphone".to_string()));
    assert_eq!(restored.audio.clip_seconds, 6);
    assert_eq!(restored.game.total_guesses, 3);
    assert_eq!(restored.game.retry_limit, 2);
    assert_eq!(restored.game.quit_keyword, "stop");
    assert_eq!(restored.game.word_count, 5);
    assert_eq!(restored.recognition.model, "whisper-large");
    assert_eq!(restored.recognition.timeout_secs, 15);
    assert!(!restored.narrator.speak);
    assert_eq!(restored.narrator.speech_command, Some("espeak".to_string()));
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.json");

    let config = load_config(&path);

    assert_eq!(config.game.total_guesses, GameConfig::default().total_guesses);
    assert_eq!(config.game.quit_keyword, "quit");
}

// =============================================================================
// Schema Tolerance Tests
// =============================================================================

#[test]
fn test_partial_file_fills_missing_sections_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    fs::write(&path, r#"{"version": 1, "game": {"total_guesses": 4}}"#).unwrap();
    let config = load_config(&path);

    assert_eq!(config.game.total_guesses, 4);
    assert_eq!(config.game.retry_limit, 3); // default
    assert_eq!(config.audio.clip_seconds, 4); // default section
    assert!(config.narrator.speak); // default section
}

#[test]
fn test_unknown_fields_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    fs::write(
        &path,
        r#"{
            "version": 1,
            "future_section": {"whatever": true},
            "recognition": {"model": "whisper-small", "extra": 1}
        }"#,
    )
    .unwrap();
    let config = load_config(&path);

    assert_eq!(config.recognition.model, "whisper-small");
}

#[test]
fn test_saved_file_is_pretty_printed_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    save_config(&Config::default(), &path);
    let contents = fs::read_to_string(&path).unwrap();

    // Pretty output spans multiple lines and parses back cleanly
    assert!(contents.lines().count() > 1);
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["version"], 1);
    assert_eq!(parsed["game"]["quit_keyword"], "quit");
}
