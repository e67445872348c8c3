//! Evasive No button core
//!
//! Pure and deterministic:
//! - Seeded RNG only
//! - Bounds computed once per session
//! - No DOM, rendering or platform dependencies

pub mod controller;
pub mod feedback;
pub mod geometry;
pub mod sample;
pub mod state;

pub use controller::{EvasionController, defeat, evade};
pub use feedback::{Feedback, YesStyle};
pub use geometry::{Bounds, Rect, Viewport, initialize_bounds};
pub use sample::sample_away;
pub use state::{CardEvent, EvasionConfig, EvasionPhase, EvasionState, RngState};
