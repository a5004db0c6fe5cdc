//! Glide Core
//!
//! Foundational primitives shared by the Glide scroll engine:
//!
//! - **Geometry**: points, sizes, rects and edge insets in logical pixels
//! - **Input Events**: timestamped multi-touch and wheel events
//! - **State Transitions**: event-driven transitions for interaction states
//!
//! # Example
//!
//! ```rust
//! use glide_core::events::TouchEvent;
//! use glide_core::geometry::Point;
//!
//! let event = TouchEvent::new(16.0, [Point::new(10.0, 10.0), Point::new(30.0, 10.0)]);
//! let avg = event.averaged();
//!
//! assert_eq!(avg.position, Point::new(20.0, 10.0));
//! assert_eq!(avg.distance, 20.0);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{AveragedTouches, EventType, TouchEvent, WheelEvent};
pub use fsm::StateTransitions;
pub use geometry::{Insets, Point, Rect, Size, ViewId};
