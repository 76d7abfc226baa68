//! Floating particle field: spawn on a spherical shell, drift, fade, respawn.
//!
//! The field never grows or shrinks. An expired particle is resampled in
//! place by [`spawn_particle`], the same function that populates the field.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{IVec2, Vec3};
use rand::Rng;

use crate::color::Rgb;
use crate::params::ParticleParams;
use crate::rendering::Canvas;

/// A single point emitter
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// x/y in screen pixels, z as depth (not screen-mapped)
    pub position: Vec3,
    /// Pixels per frame
    pub velocity: Vec3,
    pub color: Rgb,
    /// Base radius class before depth scaling
    pub size: u8,
    /// Remaining frames
    pub life: u32,
    /// Life at spawn
    pub max_life: u32,
    /// Color-shift phase (radians), moods without tint leave this `None`
    pub phase: Option<f32>,
}

/// Filled-circle draw request for one particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleSprite {
    pub center: IVec2,
    pub radius: u32,
    pub color: Rgb,
}

/// Sample a fresh particle on the spawn shell
pub fn spawn_particle<R: Rng + ?Sized>(params: &ParticleParams, rng: &mut R) -> Particle {
    let angle = rng.random_range(0.0..TAU);
    let elevation = rng.random_range(-FRAC_PI_2..=FRAC_PI_2);
    let (r_min, r_max) = params.radius_band;
    let distance = rng.random_range(r_min..=r_max);

    let offset = Vec3::new(
        angle.cos() * elevation.cos() * distance,
        elevation.sin() * distance,
        angle.sin() * elevation.cos() * distance,
    );

    let s = params.max_speed;
    let velocity = Vec3::new(
        rng.random_range(-s..=s),
        rng.random_range(-s..=s),
        rng.random_range(-s..=s),
    );

    let color = if params.palette.is_empty() {
        Rgb::new(255, 255, 255)
    } else {
        params.palette[rng.random_range(0..params.palette.len())]
    };

    let size = rng.random_range(params.size_band.0..=params.size_band.1);
    let life = rng.random_range(params.life_band.0.max(1)..=params.life_band.1.max(1));
    let phase = params.color_shift.map(|_| rng.random_range(0.0..TAU));

    Particle {
        position: params.spawn_center + offset,
        velocity,
        color,
        size,
        life,
        max_life: life,
        phase,
    }
}

impl Particle {
    /// Whether the particle has run out of life and will respawn next update
    pub fn is_expired(&self) -> bool {
        self.life == 0
    }

    /// Advance one frame.
    ///
    /// A live particle moves and loses one frame of life; the update that
    /// finds it already expired resamples it instead.
    pub fn update<R: Rng + ?Sized>(&mut self, params: &ParticleParams, rng: &mut R) {
        if self.is_expired() {
            *self = spawn_particle(params, rng);
            return;
        }

        self.position += self.velocity;
        self.life -= 1;
        if let (Some(phase), Some(shift)) = (self.phase.as_mut(), params.color_shift) {
            *phase += shift.phase_step;
        }
    }

    /// Remaining life mapped through the fade curve, in `[0, 1]`
    pub fn fade(&self, params: &ParticleParams) -> f32 {
        params.fade.apply(self.life as f32 / self.max_life as f32)
    }

    /// Faded (and tinted) display color
    pub fn display_color(&self, params: &ParticleParams) -> Rgb {
        let faded = self.color.scale(self.fade(params));

        match (self.phase, params.color_shift) {
            (Some(phase), Some(shift)) => {
                let tint = [0.0, 1.0, 2.0].map(|k: f32| {
                    shift.amplitude * (phase + k * TAU / 3.0).sin() * self.fade(params)
                });
                faded.offset(tint)
            }
            _ => faded,
        }
    }

    /// Depth-scaled radius: `size * near / (near + z)`, at least 1 pixel
    pub fn display_radius(&self, params: &ParticleParams, near_plane: f32) -> u32 {
        let scale = near_plane / (near_plane + self.position.z);
        if !scale.is_finite() || scale <= 0.0 {
            return 1;
        }
        let radius = (self.size as f32 * scale) as u32;
        radius.clamp(1, params.max_radius_px.max(1))
    }

    /// Draw request for the current state; expired particles are invisible
    pub fn sprite(&self, params: &ParticleParams, near_plane: f32) -> Option<ParticleSprite> {
        if self.is_expired() {
            return None;
        }
        Some(ParticleSprite {
            center: IVec2::new(self.position.x as i32, self.position.y as i32),
            radius: self.display_radius(params, near_plane),
            color: self.display_color(params),
        })
    }
}

/// Fixed-size particle collection
pub struct ParticleField {
    particles: Vec<Particle>,
    params: ParticleParams,
}

impl ParticleField {
    /// Populate the field with `params.count` freshly spawned particles
    pub fn new<R: Rng + ?Sized>(params: ParticleParams, rng: &mut R) -> Self {
        let particles = (0..params.count)
            .map(|_| spawn_particle(&params, rng))
            .collect();
        Self { particles, params }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Update each particle and immediately draw it
    pub fn update_and_draw<R, C>(&mut self, rng: &mut R, near_plane: f32, canvas: &mut C)
    where
        R: Rng + ?Sized,
        C: Canvas + ?Sized,
    {
        for particle in &mut self.particles {
            particle.update(&self.params, rng);
            if let Some(sprite) = particle.sprite(&self.params, near_plane) {
                canvas.fill_circle(sprite.center, sprite.radius, sprite.color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ColorShift, FadeCurve};
    use crate::rendering::{DrawCommand, DrawList};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mystical_like() -> ParticleParams {
        ParticleParams {
            fade: FadeCurve::Sqrt,
            color_shift: Some(ColorShift {
                phase_step: 0.05,
                amplitude: 25.0,
            }),
            ..ParticleParams::default()
        }
    }

    #[test]
    fn test_spawn_within_bands() {
        let params = ParticleParams::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let p = spawn_particle(&params, &mut rng);
            assert!(p.life > 0 && p.life <= p.max_life);
            assert!((180..=300).contains(&p.life));
            assert!((1..=3).contains(&p.size));

            let distance = (p.position - params.spawn_center).length();
            assert!(
                distance >= 150.0 - 1e-2 && distance <= 250.0 + 1e-2,
                "distance {} outside spawn band",
                distance
            );

            for v in p.velocity.to_array() {
                assert!(v.abs() <= 0.5);
            }
            assert!(params.palette.contains(&p.color));
            assert!(p.phase.is_none());
        }
    }

    #[test]
    fn test_spawn_phase_only_with_color_shift() {
        let mut rng = StdRng::seed_from_u64(3);
        let p = spawn_particle(&mystical_like(), &mut rng);
        let phase = p.phase.expect("color shift mood should seed a phase");
        assert!((0.0..TAU).contains(&phase));
    }

    #[test]
    fn test_update_counts_down_then_respawns() {
        let params = ParticleParams::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut p = spawn_particle(&params, &mut rng);

        let start = p.position;
        let velocity = p.velocity;
        let life = p.life;

        for _ in 0..life {
            p.update(&params, &mut rng);
        }
        assert_eq!(p.life, 0);
        assert!(p.is_expired());

        // Euler steps only, no reset yet
        let expected = start + velocity * life as f32;
        assert!((p.position - expected).length() < 0.1);

        let before = p.position;
        p.update(&params, &mut rng);
        assert!(p.life > 0);
        assert_eq!(p.life, p.max_life);
        assert!((p.position - before).length() > 1.0);
    }

    #[test]
    fn test_phase_advances_each_update() {
        let params = mystical_like();
        let mut rng = StdRng::seed_from_u64(5);
        let mut p = spawn_particle(&params, &mut rng);
        let phase0 = p.phase.unwrap();

        p.update(&params, &mut rng);
        p.update(&params, &mut rng);
        assert!((p.phase.unwrap() - (phase0 + 0.1)).abs() < 1e-5);
    }

    #[test]
    fn test_linear_fade_darkens_color() {
        let params = ParticleParams::default();
        let mut p = spawn_particle(&params, &mut StdRng::seed_from_u64(1));
        p.color = Rgb::new(100, 150, 255);
        p.max_life = 200;
        p.life = 100;
        assert_eq!(p.display_color(&params), Rgb::new(50, 75, 127));

        p.life = 200;
        assert_eq!(p.display_color(&params), Rgb::new(100, 150, 255));
    }

    #[test]
    fn test_sqrt_fade_stays_brighter_than_linear() {
        let linear = ParticleParams::default();
        let sqrt = ParticleParams {
            fade: FadeCurve::Sqrt,
            ..ParticleParams::default()
        };
        let mut p = spawn_particle(&linear, &mut StdRng::seed_from_u64(2));
        p.max_life = 100;
        p.life = 25;
        assert_eq!(p.fade(&linear), 0.25);
        assert_eq!(p.fade(&sqrt), 0.5);
    }

    #[test]
    fn test_colors_clamped_for_whole_lifecycles() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut params = mystical_like();
        // Large tint to push channels past both ends
        params.color_shift = Some(ColorShift {
            phase_step: 0.3,
            amplitude: 400.0,
        });
        params.palette = vec![Rgb::new(255, 0, 128), Rgb::new(0, 255, 255)];
        params.count = 20;

        let mut field = ParticleField::new(params, &mut rng);
        let mut list = DrawList::new();
        for _ in 0..400 {
            field.update_and_draw(&mut rng, 200.0, &mut list);
        }
        // u8 channels are in range by type; check the tint actually saturated
        let saturated = list.commands().iter().any(|cmd| match cmd {
            DrawCommand::Circle { color, .. } => {
                [color.r, color.g, color.b].iter().any(|&c| c == 0 || c == 255)
            }
            _ => false,
        });
        assert!(saturated);
    }

    #[test]
    fn test_radius_depth_scaling() {
        let params = ParticleParams::default();
        let mut p = spawn_particle(&params, &mut StdRng::seed_from_u64(4));
        p.size = 3;

        p.position.z = 0.0;
        assert_eq!(p.display_radius(&params, 200.0), 3);

        // Far away: shrinks, floored at 1
        p.position.z = 250.0;
        assert_eq!(p.display_radius(&params, 200.0), 1);

        // Closer than the plane: grows
        p.position.z = -100.0;
        assert_eq!(p.display_radius(&params, 200.0), 6);

        // At or behind the eye: degenerate scale
        p.position.z = -200.0;
        assert_eq!(p.display_radius(&params, 200.0), 1);
        p.position.z = -250.0;
        assert_eq!(p.display_radius(&params, 200.0), 1);

        // Just in front of the eye: capped
        p.position.z = -199.99;
        assert_eq!(p.display_radius(&params, 200.0), params.max_radius_px);
    }

    #[test]
    fn test_expired_particle_not_drawn() {
        let params = ParticleParams::default();
        let mut p = spawn_particle(&params, &mut StdRng::seed_from_u64(6));
        assert!(p.sprite(&params, 200.0).is_some());
        p.life = 0;
        assert!(p.sprite(&params, 200.0).is_none());
    }

    #[test]
    fn test_field_size_constant() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut field = ParticleField::new(ParticleParams::default(), &mut rng);
        let mut list = DrawList::new();
        for _ in 0..350 {
            field.update_and_draw(&mut rng, 200.0, &mut list);
            list.clear_commands();
        }
        assert_eq!(field.len(), 100);
        for p in field.particles() {
            assert!(p.life <= p.max_life);
        }
    }
}
