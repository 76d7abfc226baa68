//! Rotation and perspective projection of model-space points to pixels.

use glam::Vec3;

use crate::params::RenderConfig;

/// Rotation angles (radians), one per axis.
///
/// Angles grow without bound; trigonometric periodicity does the wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Advance each angle by its per-frame rate
    pub fn advance(&mut self, rates: [f32; 3]) {
        self.x += rates[0];
        self.y += rates[1];
        self.z += rates[2];
    }
}

/// Perspective projection settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Pixels per model unit
    pub scale: f32,
    /// Eye-to-plane distance (pixels)
    pub near_plane: f32,
    pub width: f32,
    pub height: f32,
}

impl Projection {
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            scale: config.cube_scale,
            near_plane: config.near_plane,
            width: config.window_width as f32,
            height: config.window_height as f32,
        }
    }
}

/// A projected point: integer pixel position plus rotated model depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: i32,
    pub y: i32,
    /// Rotated z before projection (model units)
    pub depth: f32,
}

/// Rotate about X, then Y, then Z
pub fn rotate(vertex: Vec3, rotation: &Rotation) -> Vec3 {
    let Vec3 { mut x, mut y, mut z } = vertex;

    // Rotate X (y, z plane)
    let (sin_x, cos_x) = rotation.x.sin_cos();
    (y, z) = (y * cos_x - z * sin_x, y * sin_x + z * cos_x);

    // Rotate Y (x, z plane)
    let (sin_y, cos_y) = rotation.y.sin_cos();
    (x, z) = (x * cos_y + z * sin_y, -x * sin_y + z * cos_y);

    // Rotate Z (x, y plane)
    let (sin_z, cos_z) = rotation.z.sin_cos();
    (x, y) = (x * cos_z - y * sin_z, x * sin_z + y * cos_z);

    Vec3::new(x, y, z)
}

/// Rotate a model-space vertex and project it to screen pixels
pub fn project(vertex: Vec3, rotation: &Rotation, projection: &Projection) -> ProjectedPoint {
    let p = rotate(vertex, rotation);
    let scale = projection.scale;

    let factor = projection.near_plane / (projection.near_plane + p.z * scale);
    let screen_x = p.x * scale * factor + projection.width / 2.0;
    let screen_y = p.y * scale * factor + projection.height / 2.0;

    ProjectedPoint {
        x: screen_x as i32,
        y: screen_y as i32,
        depth: p.z,
    }
}
