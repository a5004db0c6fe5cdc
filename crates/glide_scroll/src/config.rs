//! Scroll view configuration
//!
//! Every section can be omitted from a TOML file; missing values fall back
//! to the defaults below.
//!
//! ```toml
//! [physics]
//! resistance_asymptote = 240.0
//!
//! [wheel]
//! momentum = false
//!
//! [scale]
//! can_scale = true
//! maximum = 4.0
//! ```

use std::fs;
use std::path::Path;

use glide_animation::EdgePhysics;
use glide_core::Insets;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Top-level scroll view configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub physics: PhysicsConfig,
    pub wheel: WheelConfig,
    pub scale: ScaleConfig,
    pub scrollers: ScrollersConfig,
    pub line_scroll: LineScroll,
}

impl ScrollConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: ScrollConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that every value is usable by the engine
    pub fn validate(&self) -> Result<()> {
        let p = &self.physics;
        if !(p.resistance_coefficient > 0.0 && p.resistance_coefficient < 1.0) {
            return Err(invalid(
                "physics.resistance_coefficient",
                format!("{} is not in (0, 1)", p.resistance_coefficient),
            ));
        }
        ensure_non_negative("physics.resistance_asymptote", p.resistance_asymptote)?;
        ensure_non_negative("physics.deceleration_from_edge", p.deceleration_from_edge)?;
        ensure_non_negative("physics.acceleration_to_edge", p.acceleration_to_edge)?;
        ensure_non_negative("physics.scroll_tolerance", p.scroll_tolerance)?;
        ensure_non_negative("physics.secondary_scroll_tolerance", p.secondary_scroll_tolerance)?;
        ensure_non_negative("physics.scale_tolerance", p.scale_tolerance)?;
        ensure_non_negative("physics.scroll_lock", p.scroll_lock)?;
        ensure_decay("physics.deceleration_decay", p.deceleration_decay)?;
        ensure_positive_interval("physics.deceleration_interval_ms", p.deceleration_interval_ms)?;
        ensure_positive_interval("physics.capture_delay_ms", p.capture_delay_ms)?;
        if !(p.settle_epsilon > 0.0) {
            return Err(invalid(
                "physics.settle_epsilon",
                format!("{} must be positive", p.settle_epsilon),
            ));
        }

        ensure_decay("wheel.decay", self.wheel.decay)?;
        ensure_positive_interval("wheel.drain_interval_ms", self.wheel.drain_interval_ms)?;

        if !(self.scale.minimum > 0.0) {
            return Err(invalid(
                "scale.minimum",
                format!("{} must be positive", self.scale.minimum),
            ));
        }
        if self.scale.minimum > self.scale.maximum {
            return Err(invalid(
                "scale.maximum",
                format!(
                    "{} is below scale.minimum {}",
                    self.scale.maximum, self.scale.minimum
                ),
            ));
        }

        ensure_non_negative("scrollers.horizontal.thickness", self.scrollers.horizontal.thickness)?;
        ensure_non_negative("scrollers.vertical.thickness", self.scrollers.vertical.thickness)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{} must not be negative", value)))
    }
}

fn ensure_decay(field: &'static str, value: f32) -> Result<()> {
    // A decay of 1 never lets the motion settle
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{} is not in (0, 1)", value)))
    }
}

fn ensure_positive_interval(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(field, format!("{}ms is not a positive interval", value)))
    }
}

// ============================================================================
// Physics
// ============================================================================

/// Touch and deceleration constants, copied into every touch session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Base of the rubber-band curve (closer to 1 = softer)
    pub resistance_coefficient: f32,
    /// Furthest distance a value can be dragged past its bound
    pub resistance_asymptote: f32,
    /// Damping applied to velocity still heading out of bounds
    pub deceleration_from_edge: f32,
    /// Pull back toward the bound once velocity has turned around
    pub acceleration_to_edge: f32,
    /// Movement needed before an axis starts scrolling
    pub scroll_tolerance: f32,
    /// Tolerance for the other axis once one axis has engaged
    pub secondary_scroll_tolerance: f32,
    /// Pinch distance change needed before scaling starts
    pub scale_tolerance: f32,
    /// Travel on one axis after which the other axis is locked out
    pub scroll_lock: f32,
    /// Velocity kept per deceleration interval
    pub deceleration_decay: f32,
    pub deceleration_interval_ms: f64,
    /// Converts sampled px/ms into px per deceleration step
    pub release_velocity_multiplier: f32,
    /// Velocity below which deceleration stops
    pub settle_epsilon: f32,
    /// Delay before an undragged touch is handed to the content
    pub capture_delay_ms: f64,
}

impl PhysicsConfig {
    /// Edge resistance and bounce constants
    pub fn edge(&self) -> EdgePhysics {
        EdgePhysics {
            resistance_coefficient: self.resistance_coefficient,
            resistance_asymptote: self.resistance_asymptote,
            deceleration_from_edge: self.deceleration_from_edge,
            acceleration_to_edge: self.acceleration_to_edge,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let edge = EdgePhysics::default();
        Self {
            resistance_coefficient: edge.resistance_coefficient,
            resistance_asymptote: edge.resistance_asymptote,
            deceleration_from_edge: edge.deceleration_from_edge,
            acceleration_to_edge: edge.acceleration_to_edge,
            scroll_tolerance: 5.0,
            secondary_scroll_tolerance: 20.0,
            scale_tolerance: 5.0,
            scroll_lock: 100.0,
            deceleration_decay: 0.95,
            deceleration_interval_ms: 10.0,
            release_velocity_multiplier: 10.0,
            settle_epsilon: 0.01,
            capture_delay_ms: 150.0,
        }
    }
}

// ============================================================================
// Wheel
// ============================================================================

/// Wheel accumulation and momentum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Keep applying a decaying vertical delta after the wheel stops
    pub momentum: bool,
    /// Fraction of the vertical delta kept per drain
    pub decay: f32,
    pub drain_interval_ms: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            momentum: true,
            decay: 0.95,
            drain_interval_ms: 10.0,
        }
    }
}

// ============================================================================
// Scale
// ============================================================================

/// Pinch-to-scale limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub can_scale: bool,
    pub minimum: f32,
    pub maximum: f32,
}

impl ScaleConfig {
    pub fn clamp(&self, scale: f32) -> f32 {
        scale.max(self.minimum).min(self.maximum)
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            can_scale: false,
            minimum: 0.25,
            maximum: 2.0,
        }
    }
}

// ============================================================================
// Scrollers
// ============================================================================

/// One scroller track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollerConfig {
    /// The view has this scroller at all
    pub present: bool,
    /// Initial visibility; hidden scrollers also disable their axis
    pub visible: bool,
    /// Hide automatically when the content fits the container
    pub autohides: bool,
    /// Float over the container instead of shrinking it
    pub overlay: bool,
    pub thickness: f32,
    /// User offsets of the track from the view's edges
    pub layout: Option<Insets>,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            present: true,
            visible: true,
            autohides: true,
            overlay: false,
            thickness: 14.0,
            layout: None,
        }
    }
}

/// Both scroller tracks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollersConfig {
    pub horizontal: ScrollerConfig,
    pub vertical: ScrollerConfig,
    /// Room left below the vertical scroller for an accessory view
    pub vertical_scroller_bottom: f32,
    /// Touch platforms scroll by gesture and never tile scrollers
    pub touch_mode: bool,
}

impl Default for ScrollersConfig {
    fn default() -> Self {
        Self {
            horizontal: ScrollerConfig::default(),
            vertical: ScrollerConfig::default(),
            vertical_scroller_bottom: 0.0,
            touch_mode: false,
        }
    }
}

// ============================================================================
// Line scrolling
// ============================================================================

/// Distance of one line step per axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineScroll {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for LineScroll {
    fn default() -> Self {
        Self {
            horizontal: 20.0,
            vertical: 20.0,
        }
    }
}
