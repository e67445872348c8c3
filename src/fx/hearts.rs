//! Decorative floating hearts
//!
//! Each heart rises from below the screen to above it on its own loop, fading
//! in to a faint maximum halfway up and back out.

use rand::Rng;

/// Number of hearts on the page
pub const HEART_COUNT: usize = 15;
/// Peak opacity, reached halfway through the rise
pub const HEART_MAX_OPACITY: f32 = 0.3;
/// Start and end heights in viewport-height units
pub const HEART_START_VH: f32 = 110.0;
pub const HEART_END_VH: f32 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingHeart {
    /// Horizontal position in viewport-width units
    pub x_vw: f32,
    /// Seconds per rise
    pub duration: f32,
    /// Seconds before the first rise
    pub delay: f32,
}

/// Where a heart is drawn at a given moment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartFrame {
    pub y_vh: f32,
    pub opacity: f32,
}

impl FloatingHeart {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            x_vw: rng.random::<f32>() * 100.0,
            duration: 5.0 + rng.random::<f32>() * 5.0,
            delay: rng.random::<f32>() * 5.0,
        }
    }

    /// Position and opacity `time` seconds after page load, `None` during the delay
    pub fn frame_at(&self, time: f32) -> Option<HeartFrame> {
        if time < self.delay || self.duration <= 0.0 {
            return None;
        }
        let t = ((time - self.delay) / self.duration).fract();
        let opacity = if t < 0.5 {
            HEART_MAX_OPACITY * (t / 0.5)
        } else {
            HEART_MAX_OPACITY * ((1.0 - t) / 0.5)
        };
        Some(HeartFrame {
            y_vh: HEART_START_VH + (HEART_END_VH - HEART_START_VH) * t,
            opacity,
        })
    }
}

/// The page's set of hearts
pub fn scatter_hearts<R: Rng>(rng: &mut R) -> Vec<FloatingHeart> {
    (0..HEART_COUNT).map(|_| FloatingHeart::random(rng)).collect()
}
