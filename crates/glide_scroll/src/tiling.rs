//! Scroller and container tiling
//!
//! Pure layout of the two scroller tracks and the clipping container inside
//! the scroll view. Retiling happens on creation and whenever a scroller's
//! visibility changes, never on offset changes.

use glide_core::{Insets, Rect, Size};
use serde::Serialize;

use crate::config::ScrollersConfig;
use crate::offset::Axis;

/// Inputs to [`tile`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TileInput {
    pub has_horizontal: bool,
    pub has_vertical: bool,
    pub horizontal_thickness: f32,
    pub vertical_thickness: f32,
    pub horizontal_overlay: bool,
    pub vertical_overlay: bool,
    pub horizontal_layout: Option<Insets>,
    pub vertical_layout: Option<Insets>,
    /// Extra room kept below the vertical track
    pub vertical_scroller_bottom: f32,
    /// Touch platforms never show scrollers
    pub touch_mode: bool,
}

impl TileInput {
    /// Build the inputs from configuration and current visibility
    pub fn from_config(scrollers: &ScrollersConfig, horizontal_visible: bool, vertical_visible: bool) -> Self {
        Self {
            has_horizontal: scrollers.horizontal.present && horizontal_visible,
            has_vertical: scrollers.vertical.present && vertical_visible,
            horizontal_thickness: scrollers.horizontal.thickness,
            vertical_thickness: scrollers.vertical.thickness,
            horizontal_overlay: scrollers.horizontal.overlay,
            vertical_overlay: scrollers.vertical.overlay,
            horizontal_layout: scrollers.horizontal.layout,
            vertical_layout: scrollers.vertical.layout,
            vertical_scroller_bottom: scrollers.vertical_scroller_bottom,
            touch_mode: scrollers.touch_mode,
        }
    }
}

/// Placement of one scroller track, anchored to the view's edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScrollerTrack {
    pub axis: Axis,
    /// Distances from the view's edges. The edge opposite the track's
    /// anchor is unused; the thickness decides that extent.
    pub insets: Insets,
    pub thickness: f32,
}

impl ScrollerTrack {
    /// Resolve the track against the scroll view's size
    pub fn rect(&self, view: Size) -> Rect {
        let i = self.insets;
        match self.axis {
            Axis::Horizontal => Rect::new(
                i.left,
                view.height - i.bottom - self.thickness,
                (view.width - i.left - i.right).max(0.0),
                self.thickness,
            ),
            Axis::Vertical => Rect::new(
                view.width - i.right - self.thickness,
                i.top,
                self.thickness,
                (view.height - i.top - i.bottom).max(0.0),
            ),
        }
    }
}

/// Result of tiling the scroll view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tiling {
    /// Container insets from the view's edges
    pub container: Insets,
    pub horizontal: Option<ScrollerTrack>,
    pub vertical: Option<ScrollerTrack>,
}

impl Tiling {
    pub fn container_rect(&self, view: Size) -> Rect {
        self.container.inset_rect(view)
    }

    pub fn track(&self, axis: Axis) -> Option<&ScrollerTrack> {
        match axis {
            Axis::Horizontal => self.horizontal.as_ref(),
            Axis::Vertical => self.vertical.as_ref(),
        }
    }
}

/// Lay out the scroller tracks and the container.
///
/// A non-overlaid scroller takes its thickness from the container's edge.
/// With both tracks shown, the vertical track stops above the horizontal
/// one and the horizontal track stops short of the vertical one.
pub fn tile(input: &TileInput) -> Tiling {
    let has_horizontal = input.has_horizontal && !input.touch_mode;
    let has_vertical = input.has_vertical && !input.touch_mode;

    let ht = if has_horizontal {
        input.horizontal_thickness
    } else {
        0.0
    };
    let vt = if has_vertical {
        input.vertical_thickness
    } else {
        0.0
    };

    let mut container = Insets::ZERO;

    let horizontal = has_horizontal.then(|| {
        let user = input.horizontal_layout.unwrap_or_default();
        // Tracks share one pixel in the corner
        let corner = (vt - 1.0).max(0.0);
        let insets = Insets::new(0.0, user.right + corner, user.bottom, user.left);
        container.bottom = if input.horizontal_overlay {
            0.0
        } else {
            insets.bottom + ht
        };
        ScrollerTrack {
            axis: Axis::Horizontal,
            insets,
            thickness: ht,
        }
    });

    let vertical = has_vertical.then(|| {
        let user = input.vertical_layout.unwrap_or_default();
        let insets = Insets::new(
            user.top,
            user.right,
            user.bottom + ht + input.vertical_scroller_bottom,
            0.0,
        );
        container.right = if input.vertical_overlay {
            0.0
        } else {
            insets.right + vt
        };
        ScrollerTrack {
            axis: Axis::Vertical,
            insets,
            thickness: vt,
        }
    });

    Tiling {
        container,
        horizontal,
        vertical,
    }
}
