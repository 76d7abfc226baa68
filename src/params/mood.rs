//! Mood presets: named bundles of synthesis and visual parameters.

use glam::Vec3;

use super::audio::{PlaybackParams, SynthParams, Waveform};
use super::particles::{ColorShift, FadeCurve, ParticleParams};
use super::render::RenderConfig;
use crate::color::Rgb;

/// Audiovisual style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mood {
    /// Square-wave chiptune, bright particles, linear fade
    #[default]
    Arcade,
    /// Sine harmonics, muted shimmering particles, square-root fade
    Mystical,
}

/// Everything a mood decides
#[derive(Debug, Clone)]
pub struct MoodParams {
    pub mood: Mood,
    pub background: Rgb,
    pub synth: SynthParams,
    pub playback: PlaybackParams,
    pub particles: ParticleParams,
}

impl Mood {
    pub fn name(self) -> &'static str {
        match self {
            Mood::Arcade => "arcade",
            Mood::Mystical => "mystical",
        }
    }

    /// Resolve the mood into concrete parameters for the given window
    pub fn params(self, render: &RenderConfig) -> MoodParams {
        let (cx, cy) = render.center();
        let spawn_center = Vec3::new(cx, cy, 0.0);

        match self {
            Mood::Arcade => MoodParams {
                mood: self,
                background: Rgb::new(10, 20, 60),
                synth: SynthParams::default(),
                playback: PlaybackParams::default(),
                particles: ParticleParams {
                    spawn_center,
                    ..ParticleParams::default()
                },
            },
            Mood::Mystical => MoodParams {
                mood: self,
                background: Rgb::new(12, 8, 30),
                synth: SynthParams {
                    // A3 C4 E4 G4 F4 D4 C4 B3
                    melody_hz: vec![220.0, 262.0, 330.0, 392.0, 349.0, 294.0, 262.0, 247.0],
                    duration_s: 6.0,
                    waveform: Waveform::SineHarmonics,
                    envelope_decay: 2.0,
                    loudness: 0.25,
                    ..SynthParams::default()
                },
                playback: PlaybackParams::default(),
                particles: ParticleParams {
                    count: 70,
                    spawn_center,
                    radius_band: (180.0, 300.0),
                    max_speed: 0.3,
                    size_band: (1, 2),
                    life_band: (240, 420),
                    palette: vec![
                        Rgb::new(120, 90, 180),
                        Rgb::new(90, 110, 170),
                        Rgb::new(150, 120, 200),
                        Rgb::new(100, 140, 160),
                    ],
                    fade: FadeCurve::Sqrt,
                    color_shift: Some(ColorShift {
                        phase_step: 0.05,
                        amplitude: 25.0,
                    }),
                    ..ParticleParams::default()
                },
            },
        }
    }
}
