//! Immediate-mode 2D drawing: the [`Canvas`] seam and its implementations.
//!
//! The scene only ever issues `clear`, `fill_circle`, `draw_line` and
//! `present`. [`DrawList`] records those calls for headless runs and tests;
//! [`RenderSystem`] tessellates them into triangles for wgpu.

mod system;
mod tessellate;

use std::convert::Infallible;

use glam::IVec2;

use crate::color::Rgb;

pub use system::{RenderError, RenderSystem};
pub use tessellate::{circle_vertices, line_vertices, Vertex};

/// Immediate-mode draw target for one frame at a time
pub trait Canvas {
    type Error;

    /// Fill the whole frame with a background color
    fn clear(&mut self, color: Rgb);

    /// Filled circle at a pixel position
    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb);

    /// Straight line with a fixed pixel width
    fn draw_line(&mut self, from: IVec2, to: IVec2, width: u32, color: Rgb);

    /// Show everything drawn since the last present
    fn present(&mut self) -> Result<(), Self::Error>;
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCommand {
    Clear(Rgb),
    Circle {
        center: IVec2,
        radius: u32,
        color: Rgb,
    },
    Line {
        from: IVec2,
        to: IVec2,
        width: u32,
        color: Rgb,
    },
}

/// Headless canvas that records draw calls
#[derive(Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last present
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Commands of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Drop pending commands without presenting
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for DrawList {
    type Error = Infallible;

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: IVec2, to: IVec2, width: u32, color: Rgb) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn present(&mut self) -> Result<(), Infallible> {
        self.last_frame = std::mem::take(&mut self.commands);
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_list_present_moves_commands() {
        let mut list = DrawList::new();
        list.clear(Rgb::new(10, 20, 60));
        list.fill_circle(IVec2::new(1, 2), 3, Rgb::new(1, 2, 3));
        assert_eq!(list.commands().len(), 2);

        list.present().unwrap();
        assert!(list.commands().is_empty());
        assert_eq!(list.last_frame().len(), 2);
        assert_eq!(list.frames_presented(), 1);
        assert_eq!(list.last_frame()[0], DrawCommand::Clear(Rgb::new(10, 20, 60)));
    }
}
