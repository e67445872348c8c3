//! Confetti particle physics
//!
//! Each particle flies out along its launch angle, slows by `decay` every
//! frame, falls with gravity, wobbles and tilts, and fades out over `ticks`
//! frames. Positions are CSS pixels with y growing downward.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::f32::consts::PI;

use crate::card::{Rect, Viewport};

/// An sRGB color as authored in CSS (`#ff69b4`)
pub type Rgb = [u8; 3];

/// Confetti piece shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
}

/// Parameters for one burst
#[derive(Debug, Clone, PartialEq)]
pub struct BurstOptions {
    /// Number of pieces (fractional counts are rounded)
    pub particle_count: f32,
    /// Launch direction in degrees (90 = straight up)
    pub angle: f32,
    /// Spread around the launch direction in degrees
    pub spread: f32,
    pub start_velocity: f32,
    /// Velocity multiplier per frame
    pub decay: f32,
    pub gravity: f32,
    /// Sideways drift per frame
    pub drift: f32,
    /// Frames a piece lives
    pub ticks: u32,
    /// Normalized origin (0,0 = top left, 1,1 = bottom right)
    pub origin: Vec2,
    pub colors: Vec<Rgb>,
    pub shapes: Vec<Shape>,
    /// Size multiplier
    pub scalar: f32,
}

impl Default for BurstOptions {
    fn default() -> Self {
        Self {
            particle_count: 50.0,
            angle: 90.0,
            spread: 45.0,
            start_velocity: 45.0,
            decay: 0.9,
            gravity: 1.0,
            drift: 0.0,
            ticks: 200,
            origin: Vec2::new(0.5, 0.5),
            colors: vec![
                [0x26, 0xcc, 0xff],
                [0xa2, 0x5a, 0xfd],
                [0xff, 0x5e, 0x7e],
                [0x88, 0xff, 0x5a],
                [0xfc, 0xff, 0x42],
                [0xff, 0xa6, 0x2d],
                [0xff, 0x36, 0xff],
            ],
            shapes: vec![Shape::Square, Shape::Circle],
            scalar: 1.0,
        }
    }
}

/// Normalized burst origin at the center of `rect`
pub fn origin_from_rect(rect: &Rect, viewport: &Viewport) -> Vec2 {
    if viewport.width <= 0.0 || viewport.height <= 0.0 {
        return Vec2::new(0.5, 0.5);
    }
    let center = rect.center();
    Vec2::new(center.x / viewport.width, center.y / viewport.height)
}

/// A single confetti piece
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    /// Second anchor, orbiting `pos` (gives the flutter)
    pub wobble_pos: Vec2,
    pub velocity: f32,
    /// Direction of travel (radians, screen space)
    pub angle_2d: f32,
    pub wobble: f32,
    pub wobble_speed: f32,
    pub tilt_angle: f32,
    pub tilt_sin: f32,
    pub tilt_cos: f32,
    /// Per-frame size jitter
    pub random: f32,
    pub tick: u32,
    pub total_ticks: u32,
    pub decay: f32,
    pub drift: f32,
    pub gravity: f32,
    pub color: [f32; 3],
    pub shape: Shape,
    pub scalar: f32,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, origin_px: Vec2, opts: &BurstOptions) -> Self {
        let rad_angle = opts.angle.to_radians();
        let rad_spread = opts.spread.to_radians();

        let color = opts
            .colors
            .get(rng.random_range(0..opts.colors.len().max(1)))
            .copied()
            .unwrap_or([0xff, 0xff, 0xff]);
        let shape = opts
            .shapes
            .get(rng.random_range(0..opts.shapes.len().max(1)))
            .copied()
            .unwrap_or(Shape::Square);

        Self {
            pos: origin_px,
            wobble_pos: origin_px,
            velocity: opts.start_velocity * 0.5 + rng.random::<f32>() * opts.start_velocity,
            angle_2d: -rad_angle + (0.5 * rad_spread - rng.random::<f32>() * rad_spread),
            wobble: rng.random::<f32>() * 10.0,
            wobble_speed: (rng.random::<f32>() * 0.1 + 0.05).min(0.11),
            tilt_angle: (rng.random::<f32>() * 0.5 + 0.25) * PI,
            tilt_sin: 0.0,
            tilt_cos: 0.0,
            random: rng.random::<f32>() + 2.0,
            tick: 0,
            total_ticks: opts.ticks,
            decay: opts.decay,
            drift: opts.drift,
            gravity: opts.gravity * 3.0,
            color: [
                color[0] as f32 / 255.0,
                color[1] as f32 / 255.0,
                color[2] as f32 / 255.0,
            ],
            shape,
            scalar: opts.scalar,
        }
    }

    /// Advance one frame. Returns false once the piece has expired.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> bool {
        self.pos.x += self.angle_2d.cos() * self.velocity + self.drift;
        self.pos.y += self.angle_2d.sin() * self.velocity + self.gravity;
        self.velocity *= self.decay;

        self.wobble += self.wobble_speed;
        self.wobble_pos = Vec2::new(
            self.pos.x + 10.0 * self.scalar * self.wobble.cos(),
            self.pos.y + 10.0 * self.scalar * self.wobble.sin(),
        );

        self.tilt_angle += 0.1;
        self.tilt_sin = self.tilt_angle.sin();
        self.tilt_cos = self.tilt_angle.cos();
        self.random = rng.random::<f32>() + 2.0;

        self.tick += 1;
        self.tick < self.total_ticks
    }

    /// Opacity, fading linearly over the lifetime
    pub fn alpha(&self) -> f32 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        (1.0 - self.tick as f32 / self.total_ticks as f32).clamp(0.0, 1.0)
    }

    /// Corner offset along the tilt axis
    pub fn tilt_offset(&self) -> Vec2 {
        Vec2::new(self.random * self.tilt_cos, self.random * self.tilt_sin)
    }
}

/// All live confetti, with its own seeded RNG
#[derive(Debug, Clone)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
    max_particles: usize,
    viewport: Viewport,
    rng: Pcg32,
}

impl ParticleField {
    pub fn new(seed: u64, max_particles: usize, viewport: Viewport) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles.min(2048)),
            max_particles,
            viewport,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Viewport used to place normalized origins
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Spawn a burst. When over capacity the oldest pieces are dropped.
    pub fn burst(&mut self, opts: &BurstOptions) -> usize {
        if self.max_particles == 0 {
            return 0;
        }
        let count = opts.particle_count.max(0.0).round() as usize;
        let origin_px = Vec2::new(
            opts.origin.x * self.viewport.width,
            opts.origin.y * self.viewport.height,
        );

        for _ in 0..count {
            let particle = Particle::spawn(&mut self.rng, origin_px, opts);
            self.particles.push(particle);
        }

        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
        count
    }

    /// Advance every piece one frame and drop the expired ones
    pub fn step(&mut self) {
        let rng = &mut self.rng;
        self.particles.retain_mut(|p| p.step(&mut *rng));
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(max: usize) -> ParticleField {
        ParticleField::new(1, max, Viewport::new(1000.0, 800.0))
    }

    #[test]
    fn test_burst_spawns_at_origin() {
        let mut f = field(500);
        let spawned = f.burst(&BurstOptions {
            particle_count: 20.0,
            origin: Vec2::new(0.25, 0.5),
            ..Default::default()
        });
        assert_eq!(spawned, 20);
        assert_eq!(f.len(), 20);
        for p in &f.particles {
            assert_eq!(p.pos, Vec2::new(250.0, 400.0));
            assert_eq!(p.alpha(), 1.0);
        }
    }

    #[test]
    fn test_fractional_count_rounds() {
        let mut f = field(500);
        assert_eq!(
            f.burst(&BurstOptions {
                particle_count: 12.6,
                ..Default::default()
            }),
            13
        );
    }

    #[test]
    fn test_particles_expire_after_ticks() {
        let mut f = field(500);
        f.burst(&BurstOptions {
            particle_count: 10.0,
            ticks: 60,
            ..Default::default()
        });
        for _ in 0..59 {
            f.step();
        }
        assert_eq!(f.len(), 10);
        f.step();
        assert!(f.is_empty());
    }

    #[test]
    fn test_alpha_fades() {
        let mut f = field(500);
        f.burst(&BurstOptions {
            particle_count: 1.0,
            ticks: 10,
            ..Default::default()
        });
        for _ in 0..5 {
            f.step();
        }
        assert!((f.particles[0].alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_upward_burst_rises_then_falls() {
        let mut f = field(500);
        f.burst(&BurstOptions {
            particle_count: 1.0,
            spread: 0.0,
            start_velocity: 40.0,
            ticks: 400,
            ..Default::default()
        });
        let start_y = f.particles[0].pos.y;
        for _ in 0..5 {
            f.step();
        }
        assert!(f.particles[0].pos.y < start_y, "should fly up first");
        for _ in 0..200 {
            f.step();
        }
        assert!(f.particles[0].pos.y > start_y, "gravity wins eventually");
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut f = field(30);
        f.burst(&BurstOptions {
            particle_count: 20.0,
            origin: Vec2::new(0.0, 0.0),
            ..Default::default()
        });
        f.burst(&BurstOptions {
            particle_count: 20.0,
            origin: Vec2::new(1.0, 1.0),
            ..Default::default()
        });
        assert_eq!(f.len(), 30);
        let newest = f.particles.iter().filter(|p| p.pos == Vec2::new(1000.0, 800.0)).count();
        assert_eq!(newest, 20);
    }

    #[test]
    fn test_zero_capacity_spawns_nothing() {
        let mut f = field(0);
        assert_eq!(f.burst(&BurstOptions::default()), 0);
        assert!(f.is_empty());
    }

    #[test]
    fn test_colors_come_from_palette() {
        let mut f = field(500);
        f.burst(&BurstOptions {
            particle_count: 30.0,
            colors: vec![[0xff, 0x00, 0x00]],
            ..Default::default()
        });
        assert!(f.particles.iter().all(|p| p.color == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_origin_from_rect() {
        let rect = Rect::new(450.0, 375.0, 100.0, 50.0);
        let origin = origin_from_rect(&rect, &Viewport::new(1000.0, 800.0));
        assert_eq!(origin, Vec2::new(0.5, 0.5));
    }
}
