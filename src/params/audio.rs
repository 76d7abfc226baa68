//! Audio device and synthesis configuration.

/// Output device request
#[derive(Debug, Clone)]
pub struct AudioDeviceConfig {
    /// Preferred output sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Output channel count (stereo)
    pub channels: u16,

    /// Preferred device buffer size (frames per callback).
    /// 512 frames ≈ 23ms @ 22.05kHz
    pub buffer_frames: u32,
}

impl Default for AudioDeviceConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 22050,
            channels: 2,
            buffer_frames: 512,
        }
    }
}

/// Per-note tone shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    /// Square wave plus a half-weighted square overtone (chiptune)
    Square,
    /// Sine fundamental plus two softer sine harmonics
    SineHarmonics,
}

/// Melody synthesis parameters
#[derive(Debug, Clone)]
pub struct SynthParams {
    /// Render sample rate (Hz), must match the device request
    pub sample_rate_hz: u32,

    /// Base note frequencies in playback order (Hz)
    pub melody_hz: Vec<f64>,

    /// Total loop length (seconds), split evenly among notes
    pub duration_s: f64,

    /// Tone shape
    pub waveform: Waveform,

    /// Exponential decay constant k in `exp(-k * t / note_duration)`
    pub envelope_decay: f64,

    /// Pre-normalization gain (< 1.0)
    pub loudness: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: 22050,
            // C4 E4 G4 C5 F4 A4 G4 E4
            melody_hz: vec![262.0, 330.0, 392.0, 523.0, 349.0, 440.0, 392.0, 330.0],
            duration_s: 4.0,
            waveform: Waveform::Square,
            envelope_decay: 3.0,
            loudness: 0.3,
        }
    }
}

impl SynthParams {
    /// Length of one note (seconds)
    pub fn note_duration_s(&self) -> f64 {
        self.duration_s / self.melody_hz.len() as f64
    }
}

/// Retrigger policy for the playback controller
#[derive(Debug, Clone)]
pub struct PlaybackParams {
    /// Inclusive transpose range sampled on every retrigger (semitones)
    pub transpose_range: (i32, i32),

    /// Total plays of each synthesized loop before the next retrigger
    pub plays_per_trigger: u32,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            transpose_range: (-7, 7),
            plays_per_trigger: 2,
        }
    }
}
