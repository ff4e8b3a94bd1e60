//! Audio capture for guess clips
//!
//! One short microphone clip is recorded per transcription attempt and
//! uploaded whole; there is no streaming, resampling, or voice-activity
//! detection in this path.

pub mod capture;
pub mod format;
pub mod metering;

pub use capture::{record_clip, AudioClip};
