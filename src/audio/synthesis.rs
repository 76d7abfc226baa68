//! Melody synthesis: one windowed tone per note, normalized per note,
//! concatenated and duplicated to stereo.

use std::f64::consts::PI;

use super::LoopBuffer;
use crate::params::{SynthParams, Waveform};

/// Output ceiling for normalized samples
const PEAK_AMPLITUDE: f64 = 32767.0;

/// Added to each note's peak before dividing, so silent notes stay silent
const PEAK_EPSILON: f64 = 0.001;

/// Invalid synthesis parameters
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("melody has no notes")]
    EmptyMelody,

    #[error("sample rate must be > 0")]
    InvalidSampleRate,

    #[error("loop duration must be positive and finite, got {0}")]
    InvalidDuration(f64),

    #[error("note frequency must be positive and finite, got {0} Hz")]
    InvalidFrequency(f64),

    #[error("note duration {0}s is shorter than one sample")]
    NoteTooShort(f64),
}

/// Pitch multiplier for a semitone offset: `2^(semitones / 12)`
pub fn frequency_scale(transpose_semitones: i32) -> f64 {
    2f64.powf(transpose_semitones as f64 / 12.0)
}

/// Render the melody once, transposed by `transpose_semitones`
pub fn synthesize(
    params: &SynthParams,
    transpose_semitones: i32,
) -> Result<LoopBuffer, SynthesisError> {
    if params.melody_hz.is_empty() {
        return Err(SynthesisError::EmptyMelody);
    }
    if params.sample_rate_hz == 0 {
        return Err(SynthesisError::InvalidSampleRate);
    }
    if !params.duration_s.is_finite() || params.duration_s <= 0.0 {
        return Err(SynthesisError::InvalidDuration(params.duration_s));
    }

    let note_duration = params.note_duration_s();
    let samples_per_note = (params.sample_rate_hz as f64 * note_duration) as usize;
    if samples_per_note == 0 {
        return Err(SynthesisError::NoteTooShort(note_duration));
    }

    let scale = frequency_scale(transpose_semitones);
    let mut mono = Vec::with_capacity(samples_per_note * params.melody_hz.len());
    let mut note = vec![0.0f64; samples_per_note];

    for &base_hz in &params.melody_hz {
        let freq = base_hz * scale;
        if !freq.is_finite() || freq <= 0.0 {
            return Err(SynthesisError::InvalidFrequency(freq));
        }

        render_note(&mut note, freq, note_duration, params);
        append_normalized(&mut mono, &note);
    }

    Ok(LoopBuffer::from_mono(&mono, params.sample_rate_hz))
}

/// Fill `out` with one enveloped tone, sampled over `[0, note_duration)`
fn render_note(out: &mut [f64], freq: f64, note_duration: f64, params: &SynthParams) {
    let step = note_duration / out.len() as f64;
    let omega = 2.0 * PI * freq;

    for (i, sample) in out.iter_mut().enumerate() {
        let t = i as f64 * step;

        let wave = match params.waveform {
            Waveform::Square => sign((omega * t).sin()) + 0.5 * sign((2.0 * omega * t).sin()),
            Waveform::SineHarmonics => {
                (omega * t).sin()
                    + 0.5 * (2.0 * omega * t).sin()
                    + 0.25 * (3.0 * omega * t).sin()
            }
        };

        let envelope = (-params.envelope_decay * t / note_duration).exp();
        *sample = wave * envelope * params.loudness;
    }
}

/// Scale a note so its own peak maps to the output ceiling, then truncate
fn append_normalized(out: &mut Vec<i16>, note: &[f64]) {
    let peak = note.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    let gain = PEAK_AMPLITUDE / (peak + PEAK_EPSILON);
    out.extend(note.iter().map(|s| (s * gain) as i16));
}

/// Sign with `sign(0) == 0` (unlike `f64::signum`)
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
