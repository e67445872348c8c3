//! Evasion state and events
//!
//! One `EvasionState` lives for a page session. It is recreated on reload and
//! never persisted.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Bounds;

/// Phase of the No button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvasionPhase {
    /// Evading normally
    Active,
    /// Next evasion is the last one, with the big final dodge
    FinalDodge,
    /// Threshold reached: no more evasion, next interaction explodes
    Defeated,
}

/// Something the renderer should react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CardEvent {
    /// The No button moved away from the pointer
    Evaded { from: Vec2, to: Vec2, final_dodge: bool },
    /// The No button was touched after the threshold. `burst` is set only the
    /// first time, when the one-shot explosion should fire.
    Exploded { burst: bool },
    /// Yes was clicked
    Accepted,
}

/// Evasion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvasionConfig {
    /// Interaction count at which evasion stops
    pub threshold: u32,
    /// Minimum per-axis displacement between positions
    pub distance_floor: f32,
    /// Extra top room on the last dodge
    pub final_dodge_boost: f32,
    /// Yes button growth per evasion
    pub yes_scale_step: f32,
}

impl Default for EvasionConfig {
    fn default() -> Self {
        use crate::consts::*;
        Self {
            threshold: EXPLODE_ON_NO_COUNT,
            distance_floor: DISTANCE_FLOOR,
            final_dodge_boost: FINAL_DODGE_BOOST,
            yes_scale_step: YES_SCALE_STEP,
        }
    }
}

impl EvasionConfig {
    /// Phase for a given interaction count
    pub fn phase_for(&self, interaction_count: u32) -> EvasionPhase {
        if interaction_count >= self.threshold {
            EvasionPhase::Defeated
        } else if interaction_count + 1 == self.threshold {
            EvasionPhase::FinalDodge
        } else {
            EvasionPhase::Active
        }
    }
}

/// RNG seed wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Session state of the No button
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvasionState {
    /// Offset from the button's natural layout position
    pub position: Vec2,
    /// Evasions plus post-threshold interactions
    pub interaction_count: u32,
    /// Sampling limits, set once by `initialize`
    pub bounds: Option<Bounds>,
    /// Yes was clicked; everything is frozen
    pub accepted: bool,
    /// Cosmetic growth of the Yes button
    pub yes_scale: f32,
}

impl Default for EvasionState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            interaction_count: 0,
            bounds: None,
            accepted: false,
            yes_scale: 1.0,
        }
    }
}
