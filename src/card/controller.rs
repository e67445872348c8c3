//! Evasion controller
//!
//! Pure state transitions for the No button. The host feeds in geometry and
//! pointer events; the renderer reads positions, counts and events back out.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::{Bounds, Rect, Viewport, initialize_bounds};
use super::sample::sample_away;
use super::state::{CardEvent, EvasionConfig, EvasionPhase, EvasionState, RngState};
use crate::error::{CardError, Result};

/// Pick the next offset for the No button.
///
/// Expects `interaction_count < config.threshold`. On the last evasion
/// (`interaction_count == threshold - 1`) the top endpoint is raised by
/// `final_dodge_boost`.
pub fn evade<R: Rng>(
    rng: &mut R,
    current: Vec2,
    interaction_count: u32,
    bounds: &Bounds,
    config: &EvasionConfig,
) -> Vec2 {
    let boost = if config.phase_for(interaction_count) == EvasionPhase::FinalDodge {
        config.final_dodge_boost
    } else {
        0.0
    };

    let (x0, x1) = bounds.x_interval();
    let (y0, y1) = bounds.y_interval(boost);

    Vec2::new(
        sample_away(rng, x0, x1, current.x, config.distance_floor),
        sample_away(rng, y0, y1, current.y, config.distance_floor),
    )
}

/// Count one post-threshold interaction
#[inline]
pub fn defeat(interaction_count: u32) -> u32 {
    interaction_count.saturating_add(1)
}

/// Owns the evasion state, its config and a seeded RNG
#[derive(Debug, Clone)]
pub struct EvasionController {
    config: EvasionConfig,
    state: EvasionState,
    rng_state: RngState,
    rng: Pcg32,
}

impl EvasionController {
    pub fn new(config: EvasionConfig, seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        Self {
            config,
            state: EvasionState::default(),
            rng_state,
            rng,
        }
    }

    /// Compute and store the bounds. Must run once, after the button is laid
    /// out and before the first evasion. Bounds are fixed for the session; a
    /// second call is refused and the first bounds are kept.
    pub fn initialize(&mut self, element: Rect, viewport: Viewport) -> Result<Bounds> {
        if self.state.bounds.is_some() {
            return Err(CardError::BoundsAlreadyInitialized);
        }
        let bounds = initialize_bounds(element, viewport);
        log::debug!("Evasion bounds: {:?}", bounds);
        self.state.bounds = Some(bounds);
        Ok(bounds)
    }

    /// Pointer entered the No button
    pub fn pointer_enter(&mut self) -> Option<CardEvent> {
        if self.state.accepted {
            return None;
        }
        let Some(bounds) = self.state.bounds else {
            log::debug!("Pointer enter before bounds were initialized");
            return None;
        };

        let count = self.state.interaction_count;
        match self.config.phase_for(count) {
            EvasionPhase::Active | EvasionPhase::FinalDodge => {
                let from = self.state.position;
                let to = evade(&mut self.rng, from, count, &bounds, &self.config);
                let final_dodge = count + 1 == self.config.threshold;

                self.state.position = to;
                self.state.interaction_count = count + 1;
                self.state.yes_scale += self.config.yes_scale_step;

                Some(CardEvent::Evaded {
                    from,
                    to,
                    final_dodge,
                })
            }
            EvasionPhase::Defeated => {
                let burst = count == self.config.threshold;
                self.state.interaction_count = defeat(count);
                if burst {
                    log::info!("No button exploded after {} tries", count);
                }
                Some(CardEvent::Exploded { burst })
            }
        }
    }

    /// Yes was clicked. Only the first click produces an event.
    pub fn accept(&mut self) -> Option<CardEvent> {
        if self.state.accepted {
            return None;
        }
        self.state.accepted = true;
        log::info!(
            "Accepted after {} No interactions",
            self.state.interaction_count
        );
        Some(CardEvent::Accepted)
    }

    pub fn state(&self) -> &EvasionState {
        &self.state
    }

    pub fn config(&self) -> &EvasionConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn phase(&self) -> EvasionPhase {
        self.config.phase_for(self.state.interaction_count)
    }

    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    pub fn interaction_count(&self) -> u32 {
        self.state.interaction_count
    }

    pub fn is_accepted(&self) -> bool {
        self.state.accepted
    }

    /// No more evasion will happen
    pub fn is_defeated(&self) -> bool {
        self.phase() == EvasionPhase::Defeated
    }

    /// The No button has exploded and should be drawn at zero scale
    pub fn is_suppressed(&self) -> bool {
        self.state.interaction_count > self.config.threshold
    }
}
