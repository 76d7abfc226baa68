//! Per-frame scene orchestration: input, rotation, particles, cube.

use glam::IVec2;
use rand::rngs::StdRng;

use crate::color::Rgb;
use crate::cube::{CUBE_EDGES, CUBE_VERTICES};
use crate::params::{MoodParams, RenderConfig};
use crate::particles::ParticleField;
use crate::projection::{project, ProjectedPoint, Projection, Rotation};
use crate::rendering::Canvas;

/// Keys the scene distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Platform-neutral input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request
    Quit,
    KeyDown(Key),
}

/// Scene lifecycle; `Stopped` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneState {
    Running,
    Stopped,
}

/// Edge color brightness from the rotated depth of the edge's first vertex
pub fn edge_brightness(depth: f32) -> u8 {
    ((150.0 + depth * 0.5) as i32).clamp(50, 255) as u8
}

/// The single scene: rotating cube plus particle field
pub struct Scene {
    config: RenderConfig,
    projection: Projection,
    background: Rgb,
    rotation: Rotation,
    particles: ParticleField,
    rng: StdRng,
    state: SceneState,
    frames_presented: u64,
}

impl Scene {
    pub fn new(config: RenderConfig, mood: &MoodParams, mut rng: StdRng) -> Self {
        let particles = ParticleField::new(mood.particles.clone(), &mut rng);
        Self {
            projection: Projection::from_config(&config),
            config,
            background: mood.background,
            rotation: Rotation::default(),
            particles,
            rng,
            state: SceneState::Running,
            frames_presented: 0,
        }
    }

    /// Apply input; quit and Escape stop the scene, everything else is ignored
    pub fn handle_input<I>(&mut self, events: I) -> SceneState
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => {
                    self.state = SceneState::Stopped;
                }
                InputEvent::KeyDown(Key::Other) => {}
            }
        }
        self.state
    }

    /// Run one frame: input, update, draw, present.
    ///
    /// The frame in which a stop arrives is still completed; once stopped,
    /// later calls draw nothing.
    pub fn frame<I, C>(&mut self, events: I, canvas: &mut C) -> Result<SceneState, C::Error>
    where
        I: IntoIterator<Item = InputEvent>,
        C: Canvas + ?Sized,
    {
        if self.state == SceneState::Stopped {
            return Ok(self.state);
        }
        let state = self.handle_input(events);

        canvas.clear(self.background);

        self.rotation.advance(self.config.rotation_rates);

        self.particles
            .update_and_draw(&mut self.rng, self.config.near_plane, canvas);

        let projected = self.project_cube();
        self.draw_cube(&projected, canvas);

        canvas.present()?;
        self.frames_presented += 1;

        Ok(state)
    }

    /// Project all cube vertices with the current rotation
    pub fn project_cube(&self) -> [ProjectedPoint; 8] {
        CUBE_VERTICES.map(|v| project(v, &self.rotation, &self.projection))
    }

    fn draw_cube<C: Canvas + ?Sized>(&self, projected: &[ProjectedPoint; 8], canvas: &mut C) {
        let point = |p: &ProjectedPoint| IVec2::new(p.x, p.y);

        for (a, b) in CUBE_EDGES {
            let brightness = edge_brightness(projected[a].depth);
            canvas.draw_line(
                point(&projected[a]),
                point(&projected[b]),
                self.config.edge_width_px,
                Rgb::new(brightness, brightness, 255),
            );
        }

        // Vertices on top of edges
        for p in projected {
            canvas.fill_circle(
                point(p),
                self.config.vertex_radius_px,
                self.config.vertex_color,
            );
        }
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}
