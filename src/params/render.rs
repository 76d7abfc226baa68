//! Window, projection and scene-drawing configuration.

use crate::color::Rgb;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Window title
    pub title: &'static str,

    /// Frame rate cap (frames per second)
    pub target_fps: u32,

    /// Distance from the eye to the projection plane (pixels).
    /// Shared by the cube projection and particle depth-scaling.
    pub near_plane: f32,

    /// Cube scale (pixels per model unit)
    pub cube_scale: f32,

    /// Rotation increments per frame (radians, X/Y/Z)
    pub rotation_rates: [f32; 3],

    /// Cube edge line width (pixels)
    pub edge_width_px: u32,

    /// Cube vertex marker radius (pixels)
    pub vertex_radius_px: u32,

    /// Cube vertex marker color
    pub vertex_color: Rgb,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            title: "CubeStream",
            target_fps: 60,
            near_plane: 200.0,
            cube_scale: 80.0,
            rotation_rates: [0.01, 0.015, 0.008],
            edge_width_px: 3,
            vertex_radius_px: 5,
            vertex_color: Rgb::new(200, 200, 255),
        }
    }
}

impl RenderConfig {
    /// Screen center in pixels
    pub fn center(&self) -> (f32, f32) {
        (
            self.window_width as f32 / 2.0,
            self.window_height as f32 / 2.0,
        )
    }
}
