//! HTTP speech-to-text client and the production recognizer
//!
//! Uploads one WAV clip per request to an OpenAI-compatible
//! `/v1/audio/transcriptions` endpoint and classifies the result into a
//! [`RecognizeOutcome`]. Silent clips are gated locally and never uploaded.

use serde::Deserialize;
use std::time::Duration;

use crate::audio::{self, format, metering};
use crate::config::Config;

use super::{RecognizeOutcome, SpeechRecognizer};

/// Environment variable holding the optional bearer token for the
/// transcription endpoint.
const API_KEY_ENV: &str = "SPHINX_API_KEY";

/// Minimum RMS level to consider a clip as containing speech.
/// -54 dB ≈ 0.002 linear amplitude. Low enough for quiet/low-gain mics
/// while still filtering out true digital silence.
const MIN_SPEECH_RMS: f32 = 0.002;

/// Response body of the transcription endpoint
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Error types for transcription requests
#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Could not build request: {0}")]
    RequestBuild(String),
}

/// Blocking HTTP client for the speech-to-text service.
#[derive(Debug, Clone)]
pub struct SpeechApiClient {
    endpoint: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout: Duration,
    api_key: Option<String>,
}

impl SpeechApiClient {
    /// Create a client from config, reading the optional bearer token from
    /// `SPHINX_API_KEY`.
    pub fn new(config: &Config) -> Self {
        Self::with_config(
            &config.recognition.endpoint,
            &config.recognition.model,
            config.recognition.timeout_secs,
            std::env::var(API_KEY_ENV).ok(),
        )
    }

    /// Create a client with explicit settings.
    pub fn with_config(
        endpoint: &str,
        model: &str,
        timeout_secs: u64,
        api_key: Option<String>,
    ) -> Self {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            client,
            timeout,
            api_key,
        }
    }

    /// Get the configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Upload one WAV clip and return the transcript text.
    ///
    /// The text may be empty when the service found no speech; the caller
    /// decides what that means.
    pub fn transcribe(&self, wav: Vec<u8>) -> Result<String, RecognizeError> {
        let part = reqwest::blocking::multipart::Part::bytes(wav)
            .file_name("clip.wav")
            .mime_str("audio/wav")
            .map_err(|e| RecognizeError::RequestBuild(e.to_string()))?;
        let form = reqwest::blocking::multipart::Form::new()
            .text("model", self.model.clone())
            .part("file", part);

        let mut request = self.client.post(&self.endpoint).multipart(form);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().map_err(|e| {
            if e.is_timeout() {
                RecognizeError::Timeout(self.timeout.as_secs())
            } else {
                RecognizeError::ConnectionFailed(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(RecognizeError::ServerError { status, message });
        }

        let payload: TranscriptionResponse = response
            .json()
            .map_err(|e| RecognizeError::MalformedResponse(e.to_string()))?;

        Ok(payload.text.trim().to_string())
    }
}

/// Production gateway: microphone clip, silence gate, HTTP upload.
pub struct RemoteRecognizer {
    client: SpeechApiClient,
    device_id: Option<String>,
    clip_seconds: u64,
}

impl RemoteRecognizer {
    /// Build the production recognizer from config.
    pub fn new(config: &Config) -> Self {
        Self {
            client: SpeechApiClient::new(config),
            device_id: config.audio.device_id.clone(),
            clip_seconds: config.audio.clip_seconds,
        }
    }
}

impl SpeechRecognizer for RemoteRecognizer {
    fn capture(&mut self) -> RecognizeOutcome {
        let clip = match audio::record_clip(self.device_id.as_deref(), self.clip_seconds) {
            Ok(clip) => clip,
            Err(e) => {
                tracing::error!("Audio capture failed: {:#}", e);
                return RecognizeOutcome::ServiceUnavailable(format!(
                    "Audio capture failed: {}",
                    e
                ));
            }
        };

        // Gate silent clips locally; uploading them only invites the
        // service to hallucinate a transcript.
        let rms = metering::calculate_rms(&clip.samples);
        if rms < MIN_SPEECH_RMS {
            tracing::debug!("Clip RMS {:.6} below speech threshold, not uploading", rms);
            return RecognizeOutcome::Unintelligible;
        }

        let wav = match format::encode_wav(&clip.samples, clip.sample_rate, clip.channels) {
            Ok(wav) => wav,
            Err(e) => {
                tracing::error!("WAV encoding failed: {:#}", e);
                return RecognizeOutcome::ServiceUnavailable(format!(
                    "Audio encoding failed: {}",
                    e
                ));
            }
        };

        match self.client.transcribe(wav) {
            Ok(text) if text.is_empty() => {
                tracing::debug!("Service returned an empty transcript");
                RecognizeOutcome::Unintelligible
            }
            Ok(text) => {
                tracing::info!("Transcribed clip: '{}'", text);
                RecognizeOutcome::Transcript(text)
            }
            Err(e) => {
                tracing::error!("Transcription request failed: {}", e);
                RecognizeOutcome::ServiceUnavailable(e.to_string())
            }
        }
    }
}
