//! Tone player - one enveloped sine burst per Morse symbol
//!
//! Each call to [`TonePlayer::play`] builds its own short-lived cpal
//! stream, lets it sound for the requested duration, then drops it. That
//! keeps every tone a scoped resource: rapid successive tones (one per
//! symbol) never accumulate device handles.
//!
//! Failure policy: audio trouble degrades to silence. A tone that cannot
//! sound still occupies its full duration so the scheduler's timing and
//! the UI highlight stay accurate.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Gain at tone onset (matches a comfortable, non-clipping level).
const START_GAIN: f32 = 0.3;

/// Gain the envelope decays to by the end of the burst. Near-silence,
/// so the tone ends without an audible click.
const END_GAIN: f32 = 0.01;

/// Errors that can occur while producing a tone
///
/// None of these are surfaced to the user; the player logs them and
/// degrades to silence of the same duration.
#[derive(Error, Debug)]
pub enum ToneError {
    #[error("no audio output device available")]
    NoOutputDevice,

    #[error("failed to query output config: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build output stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start output stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
}

/// Per-tone synthesis state, owned by one stream callback.
struct ToneState {
    /// Sine phase in cycles, kept in [0, 1)
    phase: f32,
    /// Samples emitted so far
    emitted: usize,
}

/// Envelope gain at `progress` through the burst (0.0 = onset, 1.0 = end).
///
/// Exponential decay from `START_GAIN` to `END_GAIN`.
fn envelope_gain(progress: f32) -> f32 {
    START_GAIN * (END_GAIN / START_GAIN).powf(progress)
}

/// Write tone samples for any sample format
///
/// Mono content: the same value goes to every channel. Once the burst
/// length is reached the callback keeps the stream fed with silence
/// until the player drops it.
fn write_tone_samples<T: SizedSample + FromSample<f32>>(
    data: &mut [T],
    channels: usize,
    state: &mut ToneState,
    frequency: f32,
    sample_rate: f32,
    total_samples: usize,
) {
    for frame in data.chunks_mut(channels) {
        let value = if state.emitted < total_samples {
            let progress = state.emitted as f32 / total_samples as f32;
            let v = (state.phase * std::f32::consts::TAU).sin() * envelope_gain(progress);
            state.phase = (state.phase + frequency / sample_rate).fract();
            state.emitted += 1;
            v
        } else {
            0.0
        };
        for sample in frame.iter_mut() {
            *sample = T::from_sample(value);
        }
    }
}

/// Plays sine bursts on the default output device
///
/// Created once per playback run. Holds the device/config handle and the
/// mute flag shared with the scheduler; builds a fresh stream per tone.
pub struct TonePlayer {
    /// Shared mute flag, consulted before each tone
    muted: Arc<AtomicBool>,

    /// Default output device and its config, if one was found
    output: Option<(cpal::Device, cpal::SupportedStreamConfig)>,
}

impl TonePlayer {
    /// Create a player, resolving the default output device.
    ///
    /// Device absence is not an error: the player is still usable and
    /// every tone becomes a silent wait.
    pub fn new(muted: Arc<AtomicBool>) -> Self {
        let output = match Self::find_output() {
            Ok(out) => Some(out),
            Err(e) => {
                log::warn!("Audio output unavailable, tones degrade to silence: {}", e);
                None
            }
        };
        Self { muted, output }
    }

    fn find_output() -> Result<(cpal::Device, cpal::SupportedStreamConfig), ToneError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(ToneError::NoOutputDevice)?;

        let device_name = device.name().unwrap_or_else(|_| "Unknown".to_string());
        let config = device.default_output_config()?;
        log::info!(
            "Using output device: {} ({:?}, {} Hz)",
            device_name,
            config.sample_format(),
            config.sample_rate().0
        );

        Ok((device, config))
    }

    /// Play a sine tone at `frequency` for `duration`.
    ///
    /// Blocks the calling thread for the full duration regardless of mute
    /// state or audio failure; returns no earlier than `duration` after
    /// invocation so the scheduler's per-symbol cadence holds.
    pub fn play(&self, frequency: f32, duration: Duration) {
        if self.muted.load(Ordering::Relaxed) {
            std::thread::sleep(duration);
            return;
        }

        let started = Instant::now();
        match self.start_tone(frequency, duration) {
            Ok(stream) => {
                std::thread::sleep(duration);
                // Dropping the stream releases this tone's device resources
                drop(stream);
            }
            Err(e) => {
                log::warn!("Tone failed to sound, continuing in silence: {}", e);
                std::thread::sleep(duration.saturating_sub(started.elapsed()));
            }
        }
    }

    /// Build and start a stream for a single burst.
    fn start_tone(&self, frequency: f32, duration: Duration) -> Result<cpal::Stream, ToneError> {
        let (device, config) = self.output.as_ref().ok_or(ToneError::NoOutputDevice)?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        let total_samples = (duration.as_secs_f32() * sample_rate) as usize;
        let sample_format = config.sample_format();
        let stream_config: cpal::StreamConfig = config.clone().into();

        let stream = match sample_format {
            cpal::SampleFormat::F32 => Self::build_stream::<f32>(
                device, &stream_config, channels, frequency, sample_rate, total_samples,
            )?,
            cpal::SampleFormat::I16 => Self::build_stream::<i16>(
                device, &stream_config, channels, frequency, sample_rate, total_samples,
            )?,
            cpal::SampleFormat::U16 => Self::build_stream::<u16>(
                device, &stream_config, channels, frequency, sample_rate, total_samples,
            )?,
            format => return Err(ToneError::UnsupportedFormat(format)),
        };

        stream.play()?;
        Ok(stream)
    }

    fn build_stream<T: SizedSample + FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        channels: usize,
        frequency: f32,
        sample_rate: f32,
        total_samples: usize,
    ) -> Result<cpal::Stream, ToneError> {
        let mut state = ToneState {
            phase: 0.0,
            emitted: 0,
        };

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                write_tone_samples(
                    data,
                    channels,
                    &mut state,
                    frequency,
                    sample_rate,
                    total_samples,
                );
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_endpoints() {
        assert!((envelope_gain(0.0) - START_GAIN).abs() < 1e-6);
        assert!((envelope_gain(1.0) - END_GAIN).abs() < 1e-6);
    }

    #[test]
    fn test_envelope_decays_monotonically() {
        let mut previous = envelope_gain(0.0);
        for i in 1..=100 {
            let gain = envelope_gain(i as f32 / 100.0);
            assert!(gain < previous);
            previous = gain;
        }
    }

    #[test]
    fn test_writer_goes_silent_after_burst() {
        let mut state = ToneState {
            phase: 0.0,
            emitted: 0,
        };
        // 8-sample burst into a 16-frame mono buffer
        let mut data = [1.0f32; 16];
        write_tone_samples(&mut data, 1, &mut state, 600.0, 48_000.0, 8);

        assert!(data[8..].iter().all(|&s| s == 0.0));
        assert_eq!(state.emitted, 8);
    }

    #[test]
    fn test_writer_duplicates_across_channels() {
        let mut state = ToneState {
            phase: 0.25, // start at the sine peak so samples are non-zero
            emitted: 0,
        };
        let mut data = [0.0f32; 8];
        write_tone_samples(&mut data, 2, &mut state, 600.0, 48_000.0, 4);

        for frame in data.chunks(2) {
            assert_eq!(frame[0], frame[1]);
        }
        assert!(data[0] > 0.0);
    }

    #[test]
    fn test_muted_play_takes_full_duration() {
        let muted = Arc::new(AtomicBool::new(true));
        let player = TonePlayer {
            muted,
            output: None,
        };

        let started = Instant::now();
        player.play(600.0, Duration::from_millis(50));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn test_deviceless_play_takes_full_duration() {
        let player = TonePlayer {
            muted: Arc::new(AtomicBool::new(false)),
            output: None,
        };

        let started = Instant::now();
        player.play(600.0, Duration::from_millis(50));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }
}
