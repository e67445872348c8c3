//! Card settings
//!
//! Read once at startup from an inline JSON block in the page
//! (`<script id="card-settings" type="application/json">`). Nothing is
//! written back; every field falls back to its default.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::EvasionConfig;
use crate::consts::*;
use crate::error::{CardError, Result};

/// Quality preset levels. Parsed case-insensitively from settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Maximum live confetti particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 150,
            QualityPreset::Medium => 500,
            QualityPreset::High => 1500,
        }
    }

    /// Circle segments used when drawing round confetti
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 6,
            QualityPreset::Medium => 10,
            QualityPreset::High => 16,
        }
    }
}

impl FromStr for QualityPreset {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(QualityPreset::Low),
            "medium" | "med" => Ok(QualityPreset::Medium),
            "high" => Ok(QualityPreset::High),
            _ => Err(CardError::InvalidSettings(format!(
                "unknown quality preset {:?}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for QualityPreset {
    type Error = CardError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<QualityPreset> for String {
    fn from(preset: QualityPreset) -> Self {
        preset.as_str().to_string()
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Card settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name shown in the headline
    pub recipient: String,

    // === Evasion ===
    /// Interaction count at which the No button explodes
    pub explode_threshold: u32,
    /// Minimum per-axis displacement between consecutive positions
    pub distance_floor: f32,
    /// Extra top room on the last dodge before the explosion
    pub final_dodge_boost: f32,
    /// Yes button growth per evasion
    pub yes_scale_step: f32,

    // === Effects ===
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Confetti on/off
    pub particles: bool,
    /// Reduced motion (no hearts, single celebration burst)
    pub reduced_motion: bool,

    /// Fixed RNG seed (defaults to the page load time)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipient: "Evie".to_string(),

            explode_threshold: EXPLODE_ON_NO_COUNT,
            distance_floor: DISTANCE_FLOOR,
            final_dodge_boost: FINAL_DODGE_BOOST,
            yes_scale_step: YES_SCALE_STEP,

            quality: QualityPreset::Medium,
            particles: true,
            reduced_motion: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.explode_threshold == 0 {
            return Err(CardError::InvalidSettings(
                "explode_threshold must be at least 1".into(),
            ));
        }
        if !self.distance_floor.is_finite() || self.distance_floor < 0.0 {
            return Err(CardError::InvalidSettings(format!(
                "distance_floor must be a non-negative number, got {}",
                self.distance_floor
            )));
        }
        if !self.final_dodge_boost.is_finite() {
            return Err(CardError::InvalidSettings(
                "final_dodge_boost must be finite".into(),
            ));
        }
        if !self.yes_scale_step.is_finite() || self.yes_scale_step < 0.0 {
            return Err(CardError::InvalidSettings(
                "yes_scale_step must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Evasion parameters for the controller
    pub fn evasion(&self) -> EvasionConfig {
        EvasionConfig {
            threshold: self.explode_threshold,
            distance_floor: self.distance_floor,
            final_dodge_boost: self.final_dodge_boost,
            yes_scale_step: self.yes_scale_step,
        }
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Floating hearts (respects reduced_motion)
    pub fn effective_hearts(&self) -> bool {
        !self.reduced_motion
    }

    /// Repeating celebration volley (respects reduced_motion)
    pub fn effective_celebration_volley(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Headline text for the asking screen
    pub fn headline(&self) -> String {
        format!("{}, will you be my valentine?", self.recipient)
    }

    /// Element id of the inline settings block
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "card-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        if let Some(json) = text {
            match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded card settings from page");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring card settings: {}", e),
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "recipient": "Sam", "explode_threshold": 7 }"#)
            .expect("valid settings");
        assert_eq!(settings.recipient, "Sam");
        assert_eq!(settings.explode_threshold, 7);
        assert_eq!(settings.distance_floor, DISTANCE_FLOOR);
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = Settings::from_json(r#"{ "explode_threshold": 0 }"#).unwrap_err();
        assert!(matches!(err, CardError::InvalidSettings(_)));
    }

    #[test]
    fn test_negative_floor_rejected() {
        let err = Settings::from_json(r#"{ "distance_floor": -5.0 }"#).unwrap_err();
        assert!(matches!(err, CardError::InvalidSettings(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CardError::SettingsParse(_)));
    }

    #[test]
    fn test_particles_off_caps_to_zero() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        assert_eq!(settings.max_particles(), 0);
        assert!(!settings.effective_celebration_volley());
    }

    #[test]
    fn test_reduced_motion() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_hearts());
        assert!(!settings.effective_celebration_volley());
        assert_eq!(settings.max_particles(), QualityPreset::Medium.max_particles());
    }

    #[test]
    fn test_headline() {
        assert_eq!(
            Settings::default().headline(),
            "Evie, will you be my valentine?"
        );
    }

    #[test]
    fn test_quality_parsed_leniently() {
        let settings = Settings::from_json(r#"{ "quality": "HIGH" }"#).expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::High);
        let settings = Settings::from_json(r#"{ "quality": "med" }"#).expect("valid settings");
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert_eq!("low".parse::<QualityPreset>().ok(), Some(QualityPreset::Low));
    }

    #[test]
    fn test_unknown_quality_rejected() {
        let err = Settings::from_json(r#"{ "quality": "ultra" }"#).unwrap_err();
        assert!(matches!(err, CardError::SettingsParse(_)));
        assert!(matches!(
            "ultra".parse::<QualityPreset>(),
            Err(CardError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_quality_written_by_name() {
        let json = serde_json::to_string(&Settings::default()).expect("serialize");
        assert!(json.contains(r#""quality":"Medium""#));
        assert_eq!(QualityPreset::High.to_string(), "High");
    }
}
