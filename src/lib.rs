//! Valentine Card - an interactive "will you be my valentine?" card
//!
//! Core modules:
//! - `card`: Deterministic evasion state machine (bounds, placement, defeat)
//! - `fx`: Confetti particles, celebration emitter, floating hearts
//! - `renderer`: WebGPU confetti overlay
//! - `settings`: Card configuration loaded from the page

pub mod card;
pub mod error;
pub mod fx;
pub mod renderer;
pub mod settings;

pub use error::CardError;
pub use settings::{QualityPreset, Settings};

/// Card configuration constants
pub mod consts {
    /// Default interaction count at which the No button stops evading and explodes
    pub const EXPLODE_ON_NO_COUNT: u32 = 12;

    /// Minimum per-axis displacement between consecutive No positions
    pub const DISTANCE_FLOOR: f32 = 50.0;
    /// Extra room added to the top sampling endpoint on the last dodge
    pub const FINAL_DODGE_BOOST: f32 = 200.0;
    /// Cap on rejection sampling before falling back to the farthest endpoint
    pub const MAX_RESAMPLES: u32 = 64;

    /// Keep the No button this far in from the left viewport edge
    pub const LEFT_MARGIN: f32 = 50.0;
    /// Keep the No button this far above the bottom viewport edge
    pub const BOTTOM_MARGIN: f32 = 100.0;

    /// Yes button growth per evasion
    pub const YES_SCALE_STEP: f32 = 0.05;
    /// Yes button base font size (rem) and cap
    pub const YES_FONT_REM: f32 = 1.2;
    pub const YES_FONT_MAX_REM: f32 = 4.0;

    /// Fixed effects timestep (confetti physics is tuned per 60 Hz frame)
    pub const FX_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
}
