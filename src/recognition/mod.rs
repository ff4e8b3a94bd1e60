//! Speech recognition gateway
//!
//! Wraps capture and transcription behind a single blocking call that
//! yields a closed outcome type. All retry policy lives in the game core;
//! this layer only classifies what happened to one clip.

pub mod remote;

pub use remote::{RemoteRecognizer, SpeechApiClient};

/// Outcome of one capture-and-transcribe attempt.
///
/// Produced fresh on every [`SpeechRecognizer::capture`] call; no raw
/// transport or device error ever crosses this boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizeOutcome {
    /// The service produced a transcript for the captured speech
    Transcript(String),
    /// Audio was captured but nothing intelligible was found in it
    Unintelligible,
    /// The capture device or the transcription service failed
    ServiceUnavailable(String),
}

/// Blocking capture-and-transcribe capability injected into the game core.
///
/// One audio clip is consumed per call. Implementations perform no
/// internal retries.
pub trait SpeechRecognizer {
    /// Capture one clip and attempt to transcribe it.
    fn capture(&mut self) -> RecognizeOutcome;
}
