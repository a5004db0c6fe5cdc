//! Offset model
//!
//! The canonical, always-clamped scroll position and scale. Live gestures
//! write raw values elsewhere and only reach this model through the clamped
//! setters, so outside a gesture no overshoot is ever observable here.

use glide_core::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::config::ScaleConfig;

/// A scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The perpendicular axis
    pub fn other(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Component of a point along this axis
    pub fn of_point(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    /// Extent of a size along this axis
    pub fn of_size(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }
}

/// Geometry snapshot the maxima are derived from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollBounds {
    pub content: Size,
    pub container: Size,
    pub can_scroll_x: bool,
    pub can_scroll_y: bool,
}

impl ScrollBounds {
    pub fn can_scroll(&self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.can_scroll_x,
            Axis::Vertical => self.can_scroll_y,
        }
    }

    /// Largest valid offset on `axis` at `scale`.
    ///
    /// Zero when the axis is disabled or the content is empty.
    pub fn maximum(&self, axis: Axis, scale: f32) -> f32 {
        if !self.can_scroll(axis) {
            return 0.0;
        }
        let content = axis.of_size(self.content);
        if !(content > 0.0) {
            return 0.0;
        }
        let max = content * scale - axis.of_size(self.container);
        if max.is_finite() {
            max.max(0.0)
        } else {
            0.0
        }
    }
}

/// Clamped scroll offsets and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetModel {
    horizontal: f32,
    vertical: f32,
    scale: f32,
}

impl Default for OffsetModel {
    fn default() -> Self {
        Self {
            horizontal: 0.0,
            vertical: 0.0,
            scale: 1.0,
        }
    }
}

impl OffsetModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> Point {
        Point::new(self.horizontal, self.vertical)
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Clamp `value` into `[0, maximum(axis)]` and store it.
    ///
    /// Returns the applied value.
    pub fn set_offset(&mut self, axis: Axis, value: f32, bounds: &ScrollBounds) -> f32 {
        let max = bounds.maximum(axis, self.scale);
        let applied = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, max)
        };
        match axis {
            Axis::Horizontal => self.horizontal = applied,
            Axis::Vertical => self.vertical = applied,
        }
        applied
    }

    /// Add deltas per axis. A zero or absent delta leaves that axis alone.
    pub fn scroll_by(&mut self, dx: Option<f32>, dy: Option<f32>, bounds: &ScrollBounds) {
        if let Some(dx) = dx.filter(|d| *d != 0.0) {
            self.set_offset(Axis::Horizontal, self.horizontal + dx, bounds);
        }
        if let Some(dy) = dy.filter(|d| *d != 0.0) {
            self.set_offset(Axis::Vertical, self.vertical + dy, bounds);
        }
    }

    /// Clamp and store a new scale, then re-clamp both offsets against the
    /// maxima at that scale. Returns the applied scale.
    pub fn set_scale(&mut self, scale: f32, limits: &ScaleConfig, bounds: &ScrollBounds) -> f32 {
        self.scale = if scale.is_nan() {
            limits.clamp(1.0)
        } else {
            limits.clamp(scale)
        };
        self.reclamp(bounds);
        self.scale
    }

    /// Pull both offsets back into range, e.g. after the content shrank
    pub fn reclamp(&mut self, bounds: &ScrollBounds) {
        self.set_offset(Axis::Horizontal, self.horizontal, bounds);
        self.set_offset(Axis::Vertical, self.vertical, bounds);
    }
}
