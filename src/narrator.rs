//! Spoken and printed output for game announcements
//!
//! Every user-facing line of the game goes through a [`Narrator`]. The
//! production implementation prints the line and speaks it with the
//! platform speech command, waiting for playback to finish so the
//! following microphone capture cannot pick up the tail of the prompt.

use std::process::Command;

use crate::config::NarratorConfig;

/// Output capability injected into the game core.
///
/// Implementations must not return before the announcement is safe to
/// follow with audio capture.
pub trait Narrator {
    /// Present one line to the player. Best-effort; never fails the game.
    fn announce(&self, text: &str);
}

/// Prints announcements and optionally speaks them aloud.
pub struct ConsoleNarrator {
    speak: bool,
    speech_command: String,
}

impl ConsoleNarrator {
    /// Create a narrator from config, resolving the platform speech command.
    pub fn new(config: &NarratorConfig) -> Self {
        let speech_command = config
            .speech_command
            .clone()
            .unwrap_or_else(|| default_speech_command().to_string());

        Self {
            speak: config.speak,
            speech_command,
        }
    }

    /// Run the speech command and wait for it to exit.
    fn speak_line(&self, text: &str) {
        match Command::new(&self.speech_command).arg(text).output() {
            Ok(output) if output.status.success() => {
                tracing::debug!("Spoke line via {}", self.speech_command);
            }
            Ok(output) => {
                tracing::warn!(
                    "Speech command {} exited with {}",
                    self.speech_command,
                    output.status
                );
            }
            Err(e) => {
                tracing::warn!("Failed to run speech command {}: {}", self.speech_command, e);
            }
        }
    }
}

impl Narrator for ConsoleNarrator {
    fn announce(&self, text: &str) {
        println!("{}", text);

        if self.speak {
            self.speak_line(text);
        }
    }
}

/// The platform's text-to-speech command.
fn default_speech_command() -> &'static str {
    if cfg!(target_os = "macos") {
        "say"
    } else {
        "espeak"
    }
}
