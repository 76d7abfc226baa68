//! Particle field parameters.

use glam::Vec3;

use crate::color::Rgb;

/// Fade curve applied to `life / max_life`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeCurve {
    Linear,
    /// Square root: stays bright longer, drops off late
    Sqrt,
}

impl FadeCurve {
    pub fn apply(self, ratio: f32) -> f32 {
        let ratio = ratio.clamp(0.0, 1.0);
        match self {
            FadeCurve::Linear => ratio,
            FadeCurve::Sqrt => ratio.sqrt(),
        }
    }
}

/// Slow per-channel tint oscillation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorShift {
    /// Phase advance per frame (radians)
    pub phase_step: f32,

    /// Peak tint offset per channel (0-255 units)
    pub amplitude: f32,
}

/// Particle field parameters
#[derive(Debug, Clone)]
pub struct ParticleParams {
    /// Number of particles (constant for the process lifetime)
    pub count: usize,

    /// Spawn shell center: screen center in x/y, depth 0
    pub spawn_center: Vec3,

    /// Spawn shell radius band (pixels, inclusive)
    pub radius_band: (f32, f32),

    /// Max speed per axis (pixels per frame)
    pub max_speed: f32,

    /// Size class band (inclusive)
    pub size_band: (u8, u8),

    /// Life span band (frames, inclusive)
    pub life_band: (u32, u32),

    /// Base colors, one picked per spawn
    pub palette: Vec<Rgb>,

    /// Fade curve
    pub fade: FadeCurve,

    /// Optional tint oscillation
    pub color_shift: Option<ColorShift>,

    /// Cap for depth-scaled radius (pixels); particles near the eye plane
    /// would otherwise blow up without bound
    pub max_radius_px: u32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 100,
            spawn_center: Vec3::new(640.0, 360.0, 0.0),
            radius_band: (150.0, 250.0),
            max_speed: 0.5,
            size_band: (1, 3),
            life_band: (180, 300),
            palette: vec![
                Rgb::new(100, 150, 255),
                Rgb::new(150, 100, 255),
                Rgb::new(100, 255, 255),
                Rgb::new(200, 200, 255),
            ],
            fade: FadeCurve::Linear,
            color_shift: None,
            max_radius_px: 48,
        }
    }
}
