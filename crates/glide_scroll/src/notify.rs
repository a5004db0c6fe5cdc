//! Change notifications
//!
//! The engine renders nothing. Collaborators (scrollbars, content
//! positioning, the event dispatcher) learn about changes by draining the
//! queue of [`ScrollNotification`]s from the view.

use glide_core::{Point, Rect, Size};
use serde::Serialize;

use crate::offset::Axis;
use crate::tiling::Tiling;

/// Visual transform of the content: translate by the negated offsets, then
/// scale around the content's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale: f32,
}

impl ContentTransform {
    pub fn new(offset: Point, scale: f32) -> Self {
        Self {
            translate_x: -offset.x,
            translate_y: -offset.y,
            scale,
        }
    }

    /// Map a point in unscaled content space to container space
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.translate_x,
            point.y * self.scale + self.translate_y,
        )
    }
}

/// Values a scroller widget needs to draw its thumb
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollerMetrics {
    pub maximum: f32,
    /// Fraction of the content that is visible, at most 1
    pub proportion: f32,
}

impl ScrollerMetrics {
    /// Metrics for one axis. `content` is the already scaled extent.
    pub fn compute(content: f32, container: f32) -> Self {
        if !(content > 0.0) {
            return Self {
                maximum: 0.0,
                proportion: 1.0,
            };
        }
        Self {
            maximum: (content - container).max(0.0),
            proportion: (container / content).clamp(0.0, 1.0),
        }
    }

    /// Metrics for both axes. The vertical content extent loses
    /// `vertical_scroller_bottom`, the room kept below the vertical track.
    pub fn for_view(content: Size, container: Size, scale: f32, vertical_scroller_bottom: f32) -> (Self, Self) {
        let horizontal = Self::compute(content.width * scale, container.width);
        let vertical = Self::compute(
            content.height * scale - vertical_scroller_bottom,
            container.height,
        );
        (horizontal, vertical)
    }
}

/// Something observable changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScrollNotification {
    /// The committed offset changed
    OffsetChanged { offset: Point },
    /// The committed scale changed
    ScaleChanged { scale: f32 },
    /// Scroller maximum or proportion changed
    ScrollersChanged {
        horizontal: ScrollerMetrics,
        vertical: ScrollerMetrics,
    },
    /// A scroller's visibility changed
    ScrollerVisibilityChanged { axis: Axis, visible: bool },
    /// Scroller tracks and the container were laid out again
    Retiled(Tiling),
    /// The content's visual transform changed
    TransformChanged(ContentTransform),
    /// The visible part of the content moved; sent once per turn
    ContentFrameInvalidated { visible: Rect },
    /// A touch ended without dragging; deliver it to the content as a tap
    ForwardTouchEnd { timestamp: f64, position: Point },
    /// A touch has been held without dragging; hand it to the content
    CaptureTouchInContent { generation: u64 },
}
