//! Visual effects driven by card events
//!
//! Deterministic given a seed; nothing here feeds back into the evasion core.

pub mod celebration;
pub mod confetti;
pub mod hearts;

pub use celebration::{Celebration, explosion_burst, single_celebration_burst};
pub use confetti::{BurstOptions, Particle, ParticleField, Shape, origin_from_rect};
pub use hearts::{FloatingHeart, HeartFrame, scatter_hearts};
