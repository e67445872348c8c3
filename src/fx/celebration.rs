//! Timed confetti volleys and the one-shot explosion burst

use glam::Vec2;
use rand::Rng;

use super::confetti::{BurstOptions, Rgb};

/// Celebration palette (red, hot pink, white)
pub const CELEBRATION_COLORS: [Rgb; 3] = [[0xff, 0x00, 0x00], [0xff, 0x69, 0xb4], [0xff, 0xff, 0xff]];
/// Explosion palette (red, gold, orange)
pub const EXPLOSION_COLORS: [Rgb; 3] = [[0xff, 0x00, 0x00], [0xf2, 0xce, 0x57], [0xf0, 0x85, 0x12]];

/// Total celebration time (seconds)
pub const CELEBRATION_DURATION: f32 = 5.0;
/// Time between volleys (seconds)
pub const VOLLEY_INTERVAL: f32 = 0.25;
/// Pieces per burst at the start of the celebration
pub const VOLLEY_PARTICLES: f32 = 50.0;

/// Burst from the No button's center when it explodes
pub fn explosion_burst(origin: Vec2) -> BurstOptions {
    BurstOptions {
        particle_count: 100.0,
        spread: 50.0,
        origin,
        colors: EXPLOSION_COLORS.to_vec(),
        ..Default::default()
    }
}

/// Single centered burst used instead of the volleys under reduced motion
pub fn single_celebration_burst() -> BurstOptions {
    volley_burst(VOLLEY_PARTICLES * 3.0, Vec2::new(0.5, 0.4))
}

/// Shared settings for the celebration volleys
fn volley_burst(particle_count: f32, origin: Vec2) -> BurstOptions {
    BurstOptions {
        particle_count,
        start_velocity: 30.0,
        spread: 360.0,
        ticks: 60,
        origin,
        colors: CELEBRATION_COLORS.to_vec(),
        ..Default::default()
    }
}

/// Acceptance celebration: three bursts from the screen edges every
/// `VOLLEY_INTERVAL`, thinning out until `CELEBRATION_DURATION` runs out
#[derive(Debug, Clone)]
pub struct Celebration {
    elapsed: f32,
    next_volley: f32,
    finished: bool,
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            next_volley: VOLLEY_INTERVAL,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance by `dt` seconds, returning the bursts that fall due
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Vec<BurstOptions> {
        let mut bursts = Vec::new();
        if self.finished {
            return bursts;
        }

        self.elapsed += dt;
        while self.elapsed >= self.next_volley {
            let time_left = CELEBRATION_DURATION - self.next_volley;
            if time_left <= 1e-4 {
                self.finished = true;
                log::debug!("Celebration finished");
                break;
            }

            let count = VOLLEY_PARTICLES * (time_left / CELEBRATION_DURATION);
            // Left edge, right edge, top edge
            bursts.push(volley_burst(count, Vec2::new(0.0, rng.random::<f32>())));
            bursts.push(volley_burst(count, Vec2::new(1.0, rng.random::<f32>())));
            bursts.push(volley_burst(count, Vec2::new(rng.random::<f32>(), 0.0)));

            self.next_volley += VOLLEY_INTERVAL;
        }
        bursts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_nothing_before_first_interval() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = Celebration::new();
        assert!(c.update(0.2, &mut rng).is_empty());
        assert_eq!(c.update(0.1, &mut rng).len(), 3);
    }

    #[test]
    fn test_full_run_emits_nineteen_volleys() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = Celebration::new();
        let mut bursts = Vec::new();

        // 60 Hz frames for six seconds
        for _ in 0..360 {
            bursts.extend(c.update(1.0 / 60.0, &mut rng));
        }
        assert!(c.is_finished());
        assert_eq!(bursts.len(), 19 * 3);

        // Counts thin out over time
        assert!((bursts[0].particle_count - 47.5).abs() < 1e-3);
        let last = bursts.last().expect("bursts");
        assert!((last.particle_count - 2.5).abs() < 1e-3);
    }

    #[test]
    fn test_large_step_catches_up() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = Celebration::new();
        assert_eq!(c.update(1.0, &mut rng).len(), 4 * 3);
    }

    #[test]
    fn test_volley_origins_on_edges() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut c = Celebration::new();
        let bursts = c.update(0.25, &mut rng);

        assert_eq!(bursts[0].origin.x, 0.0);
        assert_eq!(bursts[1].origin.x, 1.0);
        assert_eq!(bursts[2].origin.y, 0.0);
        for b in &bursts {
            assert_eq!(b.spread, 360.0);
            assert_eq!(b.ticks, 60);
            assert_eq!(b.colors, CELEBRATION_COLORS.to_vec());
        }
    }

    #[test]
    fn test_explosion_burst() {
        let b = explosion_burst(Vec2::new(0.3, 0.6));
        assert_eq!(b.particle_count, 100.0);
        assert_eq!(b.spread, 50.0);
        assert_eq!(b.origin, Vec2::new(0.3, 0.6));
        assert_eq!(b.colors, EXPLOSION_COLORS.to_vec());
    }

    #[test]
    fn test_single_burst_uses_celebration_palette() {
        let b = single_celebration_burst();
        assert_eq!(b.particle_count, 150.0);
        assert_eq!(b.colors, CELEBRATION_COLORS.to_vec());
    }
}
