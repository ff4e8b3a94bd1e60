//! Command-line entry point for Sphinx
//!
//! Loads the configuration, draws the session's word set and hidden
//! target, and runs one game session against the microphone and the
//! configured speech-to-text service.

use anyhow::Result;
use std::process::ExitCode;

use sphinx::config;
use sphinx::game::{GameRules, GameSession, SessionOutcome};
use sphinx::narrator::ConsoleNarrator;
use sphinx::recognition::RemoteRecognizer;
use sphinx::words::WordSet;

fn main() -> ExitCode {
    init_logging();

    match run() {
        Ok(outcome) => {
            if outcome.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<SessionOutcome> {
    let config = config::load_or_default()?;

    let mut rng = rand::rng();
    let words = WordSet::draw(&mut rng, config.game.word_count)?;
    let target = words.pick_target(&mut rng);

    let narrator = ConsoleNarrator::new(&config.narrator);
    let mut recognizer = RemoteRecognizer::new(&config);
    let session = GameSession::new(words, target, GameRules::from_config(&config.game));

    Ok(session.run(&mut recognizer, &narrator))
}

/// Set up logging to stderr and an append-mode log file (local time for
/// readability). Game output goes to stdout, so logs stay off it.
fn init_logging() {
    use tracing_subscriber::prelude::*;

    /// Format timestamps using the system's local time via chrono
    struct LocalTimer;
    impl tracing_subscriber::fmt::time::FormatTime for LocalTimer {
        fn format_time(
            &self,
            w: &mut tracing_subscriber::fmt::format::Writer<'_>,
        ) -> std::fmt::Result {
            write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
        }
    }

    let log_dir = config::config_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("sphinx.log"))
        .ok();

    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
    };

    if let Some(file) = log_file {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_timer(LocalTimer)
            .with_ansi(false);
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimer);
        tracing_subscriber::registry()
            .with(env_filter())
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimer)
            .with_env_filter(env_filter())
            .init();
    }
}
