//! Shape tessellation into pixel-space triangle lists.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{IVec2, Vec2};

/// Vertex data for 2D shapes (pixel position + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 3],
}

const MIN_CIRCLE_SEGMENTS: u32 = 8;
const MAX_CIRCLE_SEGMENTS: u32 = 48;

/// Segment count grows with radius so small dots stay cheap
fn circle_segments(radius: u32) -> u32 {
    (radius * 4).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

/// Append a filled circle as a triangle fan (3 vertices per segment)
pub fn circle_vertices(out: &mut Vec<Vertex>, center: IVec2, radius: u32, color: [f32; 3]) {
    let c = center.as_vec2();
    let r = radius as f32;
    let segments = circle_segments(radius);

    let rim = |i: u32| {
        let a = i as f32 / segments as f32 * TAU;
        let p = c + Vec2::new(a.cos(), a.sin()) * r;
        Vertex {
            position: p.to_array(),
            color,
        }
    };

    let center_vertex = Vertex {
        position: c.to_array(),
        color,
    };
    for i in 0..segments {
        out.push(center_vertex);
        out.push(rim(i));
        out.push(rim(i + 1));
    }
}

/// Append a thick line as a quad (two triangles)
pub fn line_vertices(out: &mut Vec<Vertex>, from: IVec2, to: IVec2, width: u32, color: [f32; 3]) {
    let a = from.as_vec2();
    let b = to.as_vec2();
    let dir = b - a;
    if dir.length_squared() == 0.0 {
        return;
    }

    let half = width.max(1) as f32 / 2.0;
    let normal = dir.perp().normalize() * half;

    let corners = [a + normal, a - normal, b - normal, b + normal];
    for i in [0, 1, 2, 0, 2, 3] {
        out.push(Vertex {
            position: corners[i].to_array(),
            color,
        });
    }
}
