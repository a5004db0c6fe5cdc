//! Glide Scroll Engine
//!
//! Scroll offsets, touch gestures and kinetic scrolling for a scrollable
//! viewport. Layout, event dispatch and painting stay with the host; the
//! engine consumes geometry and input and produces offsets, transforms and
//! change notifications.
//!
//! # Features
//!
//! - **Offset Model**: offsets and scale that always respect their clamps
//! - **Tiling**: scroller track and container layout
//! - **Wheel Momentum**: decaying vertical wheel scrolling
//! - **Touch Gestures**: tap/drag/pinch disambiguation with axis locking
//! - **Kinetic Deceleration**: time-normalised decay with rubber-band edges
//! - **Deterministic Clock**: all deferred work runs on a virtual clock
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Size, WheelEvent};
//! use glide_scroll::{Axis, FixedGeometry, ScrollConfig, ScrollView};
//!
//! let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
//! let mut view = ScrollView::new(geometry, ScrollConfig::default());
//!
//! view.scroll_by(Some(600.0), None);
//! view.scroll_by(Some(2000.0), None);
//! assert_eq!(view.current_offset().x, view.maximum(Axis::Horizontal));
//!
//! assert!(view.wheel(&WheelEvent::new(0.0, 0.0, 100.0)));
//! view.advance_to(10.0);
//! assert_eq!(view.current_offset().y, 100.0);
//! ```

pub mod config;
pub mod deceleration;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod notify;
pub mod offset;
pub mod session;
pub mod tiling;
pub mod view;
pub mod wheel;

pub use config::{
    LineScroll, PhysicsConfig, ScaleConfig, ScrollConfig, ScrollerConfig, ScrollersConfig,
    WheelConfig,
};
pub use deceleration::DecelerationStep;
pub use error::{ConfigError, Result};
pub use geometry::{FixedGeometry, GeometryProvider};
pub use gesture::{gesture_events, GestureState};
pub use notify::{ContentTransform, ScrollNotification, ScrollerMetrics};
pub use offset::{Axis, OffsetModel, ScrollBounds};
pub use session::{AxisPair, MoveOutcome, SessionStart, TouchSession};
pub use tiling::{tile, ScrollerTrack, TileInput, Tiling};
pub use view::ScrollView;
pub use wheel::{WheelAccumulator, WheelDrain};
