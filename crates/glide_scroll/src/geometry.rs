//! Geometry provider
//!
//! The layout engine that sizes the scroll view lives outside the engine.
//! It is consulted through [`GeometryProvider`] whenever sizes or frames
//! are needed; the engine never caches them except inside a touch session.

use glide_core::{Point, Rect, Size, ViewId};
use rustc_hash::FxHashMap;

/// Read-only access to the scroll view's measured layout
pub trait GeometryProvider {
    /// Size of the clipping container
    fn container_size(&self) -> Size;

    /// Measured size of the content view
    fn content_size(&self) -> Size;

    /// Logical content size that overrides the measured one per axis
    fn calculated_content_size(&self) -> Option<Size> {
        None
    }

    /// Frame of the scroll view in global coordinates
    fn global_frame(&self) -> Rect;

    /// Convert a rect from `from`'s coordinate space into the content's
    fn to_view_local(&self, rect: Rect, from: ViewId) -> Rect;

    /// Content size with any nonzero calculated extent taking precedence
    fn effective_content_size(&self) -> Size {
        let measured = self.content_size();
        match self.calculated_content_size() {
            Some(calculated) => Size::new(
                if calculated.width != 0.0 {
                    calculated.width
                } else {
                    measured.width
                },
                if calculated.height != 0.0 {
                    calculated.height
                } else {
                    measured.height
                },
            ),
            None => measured,
        }
    }
}

/// Geometry with fixed values, for headless hosts and tests
#[derive(Debug, Clone, Default)]
pub struct FixedGeometry {
    pub container: Size,
    pub content: Size,
    pub calculated: Option<Size>,
    pub frame_origin: Point,
    /// Origins of other views, relative to the content
    pub view_origins: FxHashMap<ViewId, Point>,
}

impl FixedGeometry {
    pub fn new(container: Size, content: Size) -> Self {
        Self {
            container,
            content,
            ..Default::default()
        }
    }

    pub fn with_frame_origin(mut self, origin: Point) -> Self {
        self.frame_origin = origin;
        self
    }

    /// Register a view placed at `origin` inside the content
    pub fn with_view(mut self, id: ViewId, origin: Point) -> Self {
        self.view_origins.insert(id, origin);
        self
    }
}

impl GeometryProvider for FixedGeometry {
    fn container_size(&self) -> Size {
        self.container
    }

    fn content_size(&self) -> Size {
        self.content
    }

    fn calculated_content_size(&self) -> Option<Size> {
        self.calculated
    }

    fn global_frame(&self) -> Rect {
        Rect::from_origin_size(self.frame_origin, self.container)
    }

    fn to_view_local(&self, rect: Rect, from: ViewId) -> Rect {
        // Unknown views are treated as the content itself
        let origin = self.view_origins.get(&from).copied().unwrap_or_default();
        rect.offset(origin.x, origin.y)
    }
}
