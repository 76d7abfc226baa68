//! Procedural melody synthesis and loop playback.
//!
//! The synthesizer renders a finished stereo buffer up front; the playback
//! controller hands it to an [`AudioChannel`] and retriggers a new,
//! transposed buffer whenever the channel runs dry.

mod device;
mod playback;
mod synthesis;

use std::sync::Arc;

pub use device::{ChannelState, CpalChannel};
pub use playback::{PlaybackController, PlaybackState};
pub use synthesis::{frequency_scale, synthesize, SynthesisError};

/// Audio failures; all of them are recoverable by running silent
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to query output configs: {0}")]
    SupportedConfigs(#[from] cpal::SupportedStreamConfigsError),

    #[error("failed to get default output config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),
}

/// One synthesized melody loop: interleaved stereo 16-bit samples.
///
/// Immutable once built; clones share the same samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopBuffer {
    samples: Arc<[i16]>,
    sample_rate_hz: u32,
}

impl LoopBuffer {
    pub const CHANNELS: usize = 2;

    /// Duplicate a mono sequence into both channels
    pub fn from_mono(mono: &[i16], sample_rate_hz: u32) -> Self {
        let samples: Vec<i16> = mono.iter().flat_map(|&s| [s, s]).collect();
        Self {
            samples: samples.into(),
            sample_rate_hz,
        }
    }

    /// Interleaved samples (L, R, L, R, ...)
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Number of stereo frames
    pub fn frames(&self) -> usize {
        self.samples.len() / Self::CHANNELS
    }

    /// `[left, right]` for one frame
    pub fn frame(&self, index: usize) -> [i16; 2] {
        let i = index * Self::CHANNELS;
        [self.samples[i], self.samples[i + 1]]
    }

    pub fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    pub fn duration_s(&self) -> f64 {
        self.frames() as f64 / self.sample_rate_hz as f64
    }
}

/// Output channel that plays one loop buffer a bounded number of times
pub trait AudioChannel {
    /// Whether the scheduled plays have not finished yet
    fn is_busy(&self) -> bool;

    /// Replace whatever is playing with `buffer`, played `plays` times
    fn play(&mut self, buffer: LoopBuffer, plays: u32) -> Result<(), AudioError>;
}
