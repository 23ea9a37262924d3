//! Configuration types.
//!
//! [`FrameConfig`] holds the values the host hands the field every tick (what
//! the sliders and buttons control). [`FieldSettings`] holds session
//! constants. [`AppConfig`] bundles both for the binary and can be saved to
//! and loaded from JSON.

use crate::error::ConfigError;
use crate::particle::Bounds;
use crate::primitives::Rgb;
use crate::spawn::SpeedRange;
use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

pub const STAR_COUNT_RANGE: RangeInclusive<u32> = 10..=3000;
pub const ACCELERATION_RANGE: RangeInclusive<f32> = 0.0..=100.0;
pub const PARALLAX_DIVISOR_RANGE: RangeInclusive<f32> = 1.0..=75.0;
pub const TAIL_LENGTH_RANGE: RangeInclusive<f32> = 1.0..=100.0;

/// Target ticks per second of the host loop.
pub const DEFAULT_TICK_RATE: f32 = 100.0;

/// Where new stars are emitted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OriginMode {
    /// The nominal center of the field.
    #[default]
    FixedCenter,
    /// The current pointer position.
    FollowPointer,
}

impl OriginMode {
    pub fn toggled(self) -> Self {
        match self {
            OriginMode::FixedCenter => OriginMode::FollowPointer,
            OriginMode::FollowPointer => OriginMode::FixedCenter,
        }
    }
}

/// How the collection is resized when the requested star count changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizePolicy {
    /// Throw every star away and spawn the new count at the origin.
    #[default]
    Regenerate,
    /// Keep existing stars, truncating or appending fresh ones.
    Incremental,
}

fn default_star_count() -> u32 {
    100
}
fn default_acceleration() -> f32 {
    10.0
}
fn default_parallax_divisor() -> f32 {
    5.0
}
fn default_tail_length() -> f32 {
    20.0
}

/// Per-frame configuration supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    /// Number of stars, in `[10, 3000]`.
    #[serde(default = "default_star_count")]
    pub star_count: u32,
    /// Per-tick acceleration in percent, in `[0, 100]`.
    #[serde(default = "default_acceleration")]
    pub acceleration_percent: f32,
    #[serde(default)]
    pub origin_mode: OriginMode,
    #[serde(default)]
    pub parallax_enabled: bool,
    /// Divides the field diagonal to give the parallax threshold, in `[1, 75]`.
    #[serde(default = "default_parallax_divisor")]
    pub parallax_divisor: f32,
    /// Longest tail drawn, in pixels, in `[1, 100]`.
    #[serde(default = "default_tail_length")]
    pub max_tail_length: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            star_count: default_star_count(),
            acceleration_percent: default_acceleration(),
            origin_mode: OriginMode::FixedCenter,
            parallax_enabled: false,
            parallax_divisor: default_parallax_divisor(),
            max_tail_length: default_tail_length(),
        }
    }
}

impl FrameConfig {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check(
            "star_count",
            self.star_count as f32,
            *STAR_COUNT_RANGE.start() as f32,
            *STAR_COUNT_RANGE.end() as f32,
        )?;
        check_range("acceleration_percent", self.acceleration_percent, &ACCELERATION_RANGE)?;
        check_range("parallax_divisor", self.parallax_divisor, &PARALLAX_DIVISOR_RANGE)?;
        check_range("max_tail_length", self.max_tail_length, &TAIL_LENGTH_RANGE)?;
        Ok(())
    }

    /// Copy with every field clamped into its allowed range.
    pub fn clamped(&self) -> Self {
        Self {
            star_count: self
                .star_count
                .clamp(*STAR_COUNT_RANGE.start(), *STAR_COUNT_RANGE.end()),
            acceleration_percent: clamp_range(self.acceleration_percent, &ACCELERATION_RANGE),
            parallax_divisor: clamp_range(self.parallax_divisor, &PARALLAX_DIVISOR_RANGE),
            max_tail_length: clamp_range(self.max_tail_length, &TAIL_LENGTH_RANGE),
            ..*self
        }
    }
}

fn clamp_range(value: f32, range: &RangeInclusive<f32>) -> f32 {
    value.clamp(*range.start(), *range.end())
}

fn check_range(field: &'static str, value: f32, range: &RangeInclusive<f32>) -> Result<(), ConfigError> {
    check(field, value, *range.start(), *range.end())
}

fn check(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    // NaN fails both comparisons, so test for containment
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// Session constants for a [`StarField`](crate::field::StarField).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldSettings {
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub speed: SpeedRange,
    /// Session color. Picked at random when unset.
    #[serde(default)]
    pub color: Option<Rgb>,
    /// RNG seed. Seeded from the clock when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub resize: ResizePolicy,
}

impl FieldSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounds.width == 0 || self.bounds.height == 0 {
            return Err(ConfigError::EmptyBounds);
        }
        let SpeedRange { min, max } = self.speed;
        check("speed.min", min, 0.0, f32::MAX)?;
        check("speed.max", max, min, f32::MAX)?;
        Ok(())
    }
}

fn default_title() -> String {
    "Star Travel Simulation".into()
}

fn default_tick_rate() -> f32 {
    DEFAULT_TICK_RATE
}

/// Complete configuration for the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub field: FieldSettings,
    #[serde(default)]
    pub frame: FrameConfig,
    /// Ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            field: FieldSettings::default(),
            frame: FrameConfig::default(),
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl AppConfig {
    /// Save the configuration as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.field.validate()?;
        self.frame.validate()?;
        check("tick_rate", self.tick_rate, 1.0, 1000.0)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
        let frame = FrameConfig::default();
        assert_eq!(frame.star_count, 100);
        assert_eq!(frame.acceleration_percent, 10.0);
        assert_eq!(frame.parallax_divisor, 5.0);
        assert_eq!(frame.max_tail_length, 20.0);
        assert!(!frame.parallax_enabled);
        assert_eq!(frame.origin_mode, OriginMode::FixedCenter);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let frame = FrameConfig {
            star_count: 5,
            ..Default::default()
        };
        match frame.validate() {
            Err(ConfigError::OutOfRange { field, .. }) => assert_eq!(field, "star_count"),
            other => panic!("unexpected {other:?}"),
        }

        let frame = FrameConfig {
            parallax_divisor: 0.0,
            ..Default::default()
        };
        assert!(frame.validate().is_err());

        let frame = FrameConfig {
            acceleration_percent: f32::NAN,
            ..Default::default()
        };
        assert!(frame.validate().is_err());
    }

    #[test]
    fn test_clamped() {
        let frame = FrameConfig {
            star_count: 9000,
            acceleration_percent: -3.0,
            parallax_divisor: 100.0,
            max_tail_length: 0.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(frame.star_count, 3000);
        assert_eq!(frame.acceleration_percent, 0.0);
        assert_eq!(frame.parallax_divisor, 75.0);
        assert_eq!(frame.max_tail_length, 1.0);
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "frame": { "star_count": 500 } }"#).unwrap();
        assert_eq!(config.frame.star_count, 500);
        assert_eq!(config.frame.max_tail_length, 20.0);
        assert_eq!(config.field.bounds, Bounds::new(1200, 1200));
        assert_eq!(config.tick_rate, DEFAULT_TICK_RATE);
    }

    #[test]
    fn test_invalid_json_values_rejected() {
        let err = AppConfig::from_json(r#"{ "frame": { "max_tail_length": 500.0 } }"#);
        assert!(matches!(err, Err(ConfigError::OutOfRange { .. })));

        let err = AppConfig::from_json(r#"{ "field": { "bounds": { "width": 0, "height": 10 } } }"#);
        assert!(matches!(err, Err(ConfigError::EmptyBounds)));

        assert!(matches!(AppConfig::from_json("not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("startravel-config-{}.json", std::process::id()));
        let mut config = AppConfig::default();
        config.frame.parallax_enabled = true;
        config.field.seed = Some(11);
        config.field.color = Some(Rgb::new(10, 20, 30));
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load("/definitely/not/here/startravel.json");
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_origin_mode_toggle() {
        assert_eq!(OriginMode::FixedCenter.toggled(), OriginMode::FollowPointer);
        assert_eq!(OriginMode::FollowPointer.toggled(), OriginMode::FixedCenter);
    }
}
