//! Fixed-length microphone capture using cpal
//!
//! The audio callback forwards sample buffers over a channel; the capturing
//! thread collects until the requested clip length is reached, then drops
//! the stream. Samples are normalised to f32 regardless of the device's
//! native format.

use anyhow::{anyhow, bail, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::SampleFormat;
use crossbeam_channel::{unbounded, Sender};
use std::time::{Duration, Instant};

/// How long past the nominal clip length to keep waiting for the device
/// before giving up on a stalled stream.
const CAPTURE_GRACE: Duration = Duration::from_secs(3);

/// One recorded clip, as delivered by the input device.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Interleaved samples, normalised to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
}

impl AudioClip {
    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 || self.channels == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Record `clip_seconds` of audio from the configured input device.
///
/// Blocks until the clip is complete. The stream is dropped before
/// returning, so capture never overlaps with narration playback.
#[allow(deprecated)] // cpal 0.17 deprecates name() but description() is not yet stable
pub fn record_clip(device_id: Option<&str>, clip_seconds: u64) -> Result<AudioClip> {
    let host = cpal::default_host();
    let device = resolve_device(&host, device_id)?;

    let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
    let supported_config = device
        .default_input_config()
        .context("fetching default input configuration")?;

    let sample_rate = supported_config.sample_rate();
    let channels = supported_config.channels();
    let sample_format = supported_config.sample_format();

    tracing::info!(
        "Capturing {}s clip: device='{}', {}Hz, {} channels, format={:?}",
        clip_seconds,
        device_name,
        sample_rate,
        channels,
        sample_format
    );

    let (tx, rx) = unbounded::<Vec<f32>>();
    let config: cpal::StreamConfig = supported_config.into();

    let stream = match sample_format {
        SampleFormat::F32 => device.build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| forward_f32(data, &tx),
            stream_error,
            None,
        )?,
        SampleFormat::I16 => device.build_input_stream(
            &config,
            move |data: &[i16], _: &cpal::InputCallbackInfo| forward_i16(data, &tx),
            stream_error,
            None,
        )?,
        SampleFormat::U16 => device.build_input_stream(
            &config,
            move |data: &[u16], _: &cpal::InputCallbackInfo| forward_u16(data, &tx),
            stream_error,
            None,
        )?,
        other => bail!("input sample format {:?} is not supported", other),
    };

    stream.play().context("starting the audio input stream")?;

    let target = (sample_rate as usize)
        .saturating_mul(clip_seconds as usize)
        .saturating_mul(channels as usize);
    let deadline = Instant::now() + Duration::from_secs(clip_seconds) + CAPTURE_GRACE;

    let mut samples = Vec::with_capacity(target);
    while samples.len() < target {
        match rx.recv_deadline(deadline) {
            Ok(buffer) => samples.extend(buffer),
            Err(_) => break,
        }
    }
    drop(stream);

    if samples.is_empty() {
        bail!("input device '{}' delivered no audio", device_name);
    }
    samples.truncate(target);

    tracing::debug!("Captured {} samples", samples.len());
    Ok(AudioClip {
        samples,
        sample_rate,
        channels,
    })
}

/// Resolve the configured device, falling back to the system default.
#[allow(deprecated)]
fn resolve_device(host: &cpal::Host, device_id: Option<&str>) -> Result<cpal::Device> {
    if let Some(wanted) = device_id {
        if let Ok(devices) = host.input_devices() {
            for device in devices {
                let id = device.id().ok().map(|id| id.to_string());
                let name = device.name().ok();
                if id.as_deref() == Some(wanted) || name.as_deref() == Some(wanted) {
                    return Ok(device);
                }
            }
        }
        tracing::warn!(
            "Configured input device '{}' not found, using system default",
            wanted
        );
    }

    host.default_input_device()
        .ok_or_else(|| anyhow!("No default input device available"))
}

fn stream_error(err: cpal::StreamError) {
    tracing::error!("Audio stream error: {}", err);
}

fn forward_f32(input: &[f32], sender: &Sender<Vec<f32>>) {
    let _ = sender.send(input.to_vec());
}

fn forward_i16(input: &[i16], sender: &Sender<Vec<f32>>) {
    let scale = 1.0 / i16::MAX as f32;
    let buffer: Vec<f32> = input.iter().map(|s| *s as f32 * scale).collect();
    let _ = sender.send(buffer);
}

fn forward_u16(input: &[u16], sender: &Sender<Vec<f32>>) {
    const MIDPOINT: f32 = 32768.0;
    let buffer: Vec<f32> = input
        .iter()
        .map(|s| (*s as f32 - MIDPOINT) / MIDPOINT)
        .collect();
    let _ = sender.send(buffer);
}
