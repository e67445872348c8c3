//! Text and styling derived from the interaction count

use crate::consts::{YES_FONT_MAX_REM, YES_FONT_REM};

use super::state::EvasionState;

/// Feedback line under the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    TryAgain,
    Awkward,
    ClickYes,
    ThereWeGo,
}

impl Feedback {
    /// Feedback for a count, or `None` while the line is hidden
    pub fn for_count(interaction_count: u32, threshold: u32) -> Option<Self> {
        match interaction_count {
            0..=3 => None,
            4..=6 => Some(Feedback::TryAgain),
            7..=9 => Some(Feedback::Awkward),
            n if n <= threshold => Some(Feedback::ClickYes),
            _ => Some(Feedback::ThereWeGo),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Feedback::TryAgain => "Wait, try again! 🥺",
            Feedback::Awkward => "Iceland might be getting awkward? 😂",
            Feedback::ClickYes => "Click 'Yes' already! 💔",
            Feedback::ThereWeGo => "There we go 🌚",
        }
    }
}

/// Render-ready styling for the Yes button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YesStyle {
    pub scale: f32,
    pub font_size_rem: f32,
}

impl YesStyle {
    pub fn from_state(state: &EvasionState) -> Self {
        let scale = state.yes_scale;
        Self {
            scale,
            font_size_rem: (YES_FONT_REM * scale).min(YES_FONT_MAX_REM),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_progression() {
        let threshold = 12;
        assert_eq!(Feedback::for_count(0, threshold), None);
        assert_eq!(Feedback::for_count(3, threshold), None);
        assert_eq!(Feedback::for_count(4, threshold), Some(Feedback::TryAgain));
        assert_eq!(Feedback::for_count(6, threshold), Some(Feedback::TryAgain));
        assert_eq!(Feedback::for_count(7, threshold), Some(Feedback::Awkward));
        assert_eq!(Feedback::for_count(9, threshold), Some(Feedback::Awkward));
        assert_eq!(Feedback::for_count(10, threshold), Some(Feedback::ClickYes));
        assert_eq!(Feedback::for_count(12, threshold), Some(Feedback::ClickYes));
        assert_eq!(Feedback::for_count(13, threshold), Some(Feedback::ThereWeGo));
    }

    #[test]
    fn test_feedback_with_low_threshold() {
        // Below 10 the fixed bands win; "There we go" still follows the explosion
        assert_eq!(Feedback::for_count(7, 7), Some(Feedback::Awkward));
        assert_eq!(Feedback::for_count(8, 7), Some(Feedback::Awkward));
        assert_eq!(Feedback::for_count(10, 7), Some(Feedback::ThereWeGo));
    }

    #[test]
    fn test_yes_font_is_capped() {
        let mut state = EvasionState::default();
        assert_eq!(YesStyle::from_state(&state).font_size_rem, YES_FONT_REM);

        state.yes_scale = 5.0;
        let style = YesStyle::from_state(&state);
        assert_eq!(style.scale, 5.0);
        assert_eq!(style.font_size_rem, YES_FONT_MAX_REM);
    }
}
