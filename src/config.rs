//! Configuration management for Sphinx
//!
//! Provides persistent settings storage with schema versioning and
//! migrations. Configuration is stored in `~/.sphinx/config.json`; a
//! missing file yields the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Current config schema version
const CURRENT_VERSION: u32 = 1;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Schema version for migrations
    pub version: u32,
    /// Audio capture settings
    pub audio: AudioConfig,
    /// Game rule settings
    pub game: GameConfig,
    /// Speech-to-text service settings
    pub recognition: RecognitionConfig,
    /// Spoken output settings
    pub narrator: NarratorConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            audio: AudioConfig::default(),
            game: GameConfig::default(),
            recognition: RecognitionConfig::default(),
            narrator: NarratorConfig::default(),
        }
    }
}

/// Audio capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Selected audio input device name (None for system default)
    pub device_id: Option<String>,
    /// Length of the clip captured per guess, in seconds
    pub clip_seconds: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device_id: None,
            clip_seconds: 4,
        }
    }
}

/// Game rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Total guesses the player gets before losing
    pub total_guesses: u32,
    /// Recapture attempts per guess when speech was not understood
    pub retry_limit: u32,
    /// Spoken word that ends the game voluntarily (matched case-insensitively)
    pub quit_keyword: String,
    /// Number of words displayed for one session
    pub word_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_guesses: 10,
            retry_limit: 3,
            quit_keyword: "quit".to_string(),
            word_count: 10,
        }
    }
}

/// Speech-to-text service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    /// Transcription endpoint (OpenAI-compatible audio transcription API)
    pub endpoint: String,
    /// Model name sent with each request
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Spoken output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    /// Whether announcements are spoken aloud as well as printed
    pub speak: bool,
    /// Override for the speech command (None picks per platform)
    pub speech_command: Option<String>,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            speak: true,
            speech_command: None,
        }
    }
}

/// Get the path to the config file (~/.sphinx/config.json)
pub fn get_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Get the path to the config directory (~/.sphinx)
pub fn config_dir() -> PathBuf {
    home_dir_or_fallback().join(".sphinx")
}

/// Get the home directory, falling back to /tmp if unavailable
fn home_dir_or_fallback() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| {
        tracing::error!("Could not determine home directory, using /tmp");
        PathBuf::from("/tmp")
    })
}

/// Load configuration from disk, using defaults when no file exists
pub fn load_or_default() -> Result<Config> {
    let path = get_config_path();

    if !path.exists() {
        tracing::info!("Config file not found, using defaults");
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("reading config file {}", path.display()))?;

    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("parsing config file {}", path.display()))?;

    migrate_config(config)
}

/// Save configuration to disk
pub fn save(config: &Config) -> Result<()> {
    let dir = config_dir();
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating config directory {}", dir.display()))?;
    }

    let path = get_config_path();
    let contents = serde_json::to_string_pretty(config).context("serialising config")?;
    fs::write(&path, contents)
        .with_context(|| format!("writing config file {}", path.display()))?;

    tracing::info!("Config saved to {}", path.display());
    Ok(())
}

/// Migrate configuration from older schema versions
fn migrate_config(mut config: Config) -> Result<Config> {
    let original_version = config.version;

    // Apply migrations sequentially
    while config.version < CURRENT_VERSION {
        config = apply_migration(config)?;
    }

    if config.version != original_version {
        tracing::info!(
            "Migrated config from version {} to {}",
            original_version,
            config.version
        );
        save(&config)?;
    }

    Ok(config)
}

/// Apply a single migration step
fn apply_migration(config: Config) -> Result<Config> {
    match config.version {
        // Version 0 -> 1: Initial migration (add any new fields)
        0 => {
            let mut migrated = config;
            migrated.version = 1;
            Ok(migrated)
        }
        v => anyhow::bail!("Unknown config version: {}", v),
    }
}
