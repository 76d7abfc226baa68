//! Parameter definitions with units and documented semantics.
//!
//! Every tunable constant lives here:
//! - Units (pixels, radians, Hz, frames)
//! - Documented ranges and meanings
//! - Grouped per concern, bundled per mood

mod audio;
mod mood;
mod particles;
mod render;

// Re-export all types
pub use audio::{AudioDeviceConfig, PlaybackParams, SynthParams, Waveform};
pub use mood::{Mood, MoodParams};
pub use particles::{ColorShift, FadeCurve, ParticleParams};
pub use render::RenderConfig;
