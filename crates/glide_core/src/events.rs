//! Input events
//!
//! Timestamped touch and wheel input as delivered by the host's event
//! dispatch. Timestamps are milliseconds on the host's monotonic clock.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const TOUCH_START: EventType = 1;
    pub const TOUCH_MOVE: EventType = 2;
    pub const TOUCH_END: EventType = 3;
    pub const TOUCH_CANCEL: EventType = 4;
    pub const WHEEL: EventType = 10;
    /// Pinch zoom gesture update
    pub const PINCH: EventType = 11;
}

/// Touches currently down on a view, with the time of the change
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    /// Milliseconds
    pub timestamp: f64,
    /// Global positions of every finger still in contact
    pub touches: SmallVec<[Point; 4]>,
}

impl TouchEvent {
    pub fn new(timestamp: f64, touches: impl IntoIterator<Item = Point>) -> Self {
        Self {
            timestamp,
            touches: touches.into_iter().collect(),
        }
    }

    /// Event reporting that every finger has lifted
    pub fn released(timestamp: f64) -> Self {
        Self {
            timestamp,
            touches: SmallVec::new(),
        }
    }

    /// Average the touches into one point plus a pinch distance
    pub fn averaged(&self) -> AveragedTouches {
        AveragedTouches::from_points(&self.touches)
    }
}

/// Multi-touch input collapsed into a single centroid
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AveragedTouches {
    /// Centroid of all touches
    pub position: Point,
    /// Twice the mean distance from the centroid. For two fingers this is
    /// the distance between them.
    pub distance: f32,
    pub touch_count: usize,
}

impl AveragedTouches {
    pub fn from_points(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let count = points.len() as f32;
        let (sum_x, sum_y) = points
            .iter()
            .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        let position = Point::new(sum_x / count, sum_y / count);

        let spread: f32 = points.iter().map(|p| p.distance_to(position)).sum();

        Self {
            position,
            distance: 2.0 * spread / count,
            touch_count: points.len(),
        }
    }
}

/// A scroll wheel (or trackpad scroll) event
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Milliseconds
    pub timestamp: f64,
    pub delta_x: f32,
    pub delta_y: f32,
}

impl WheelEvent {
    pub fn new(timestamp: f64, delta_x: f32, delta_y: f32) -> Self {
        Self {
            timestamp,
            delta_x,
            delta_y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_touch_has_no_distance() {
        let avg = TouchEvent::new(0.0, [Point::new(40.0, 60.0)]).averaged();
        assert_eq!(avg.position, Point::new(40.0, 60.0));
        assert_eq!(avg.distance, 0.0);
        assert_eq!(avg.touch_count, 1);
    }

    #[test]
    fn test_pinch_distance_is_finger_span() {
        let avg = TouchEvent::new(0.0, [Point::new(0.0, 0.0), Point::new(30.0, 40.0)]).averaged();
        assert_eq!(avg.position, Point::new(15.0, 20.0));
        assert!((avg.distance - 50.0).abs() < 1e-4);
        assert_eq!(avg.touch_count, 2);
    }

    #[test]
    fn test_released_event_averages_to_nothing() {
        let avg = TouchEvent::released(12.0).averaged();
        assert_eq!(avg.touch_count, 0);
        assert_eq!(avg.position, Point::ZERO);
    }
}
