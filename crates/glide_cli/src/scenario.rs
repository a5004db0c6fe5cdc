//! Scenario definition for scripted scroll replays.

use anyhow::{Context, Result};
use glide_core::{Point, Size};
use serde::Deserialize;
use std::path::Path;

/// A fixed-geometry scroll view and the input to feed it.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub container: Size,
    pub content: Size,
    /// Global origin of the scroll view; touch positions are global
    #[serde(default)]
    pub frame_origin: Point,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from TOML text.
    pub fn from_toml(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    /// Load a scenario from file. `.toml` files are parsed as TOML,
    /// everything else as JSON.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let scenario = if is_toml {
            Self::from_toml(&raw)
        } else {
            Self::from_json(&raw)
        };
        scenario.with_context(|| format!("failed to parse scenario {}", path.display()))
    }
}

/// One scripted input. Times are absolute milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    TouchStart {
        at: f64,
        touches: Vec<Point>,
    },
    TouchMove {
        at: f64,
        touches: Vec<Point>,
    },
    /// Fingers still down after the lift; empty when all fingers lifted
    TouchEnd {
        at: f64,
        #[serde(default)]
        touches: Vec<Point>,
    },
    TouchCancel {
        at: f64,
    },
    Wheel {
        at: f64,
        #[serde(default)]
        dx: f32,
        #[serde(default)]
        dy: f32,
    },
    ScrollTo {
        x: Option<f32>,
        y: Option<f32>,
    },
    ScrollBy {
        #[serde(default)]
        dx: Option<f32>,
        #[serde(default)]
        dy: Option<f32>,
    },
    SetScale {
        scale: f32,
    },
    /// Let the clock run for `ms` milliseconds
    Wait {
        ms: f64,
    },
}

impl ScenarioStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::TouchStart { .. } => "touch_start",
            ScenarioStep::TouchMove { .. } => "touch_move",
            ScenarioStep::TouchEnd { .. } => "touch_end",
            ScenarioStep::TouchCancel { .. } => "touch_cancel",
            ScenarioStep::Wheel { .. } => "wheel",
            ScenarioStep::ScrollTo { .. } => "scroll_to",
            ScenarioStep::ScrollBy { .. } => "scroll_by",
            ScenarioStep::SetScale { .. } => "set_scale",
            ScenarioStep::Wait { .. } => "wait",
        }
    }
}
