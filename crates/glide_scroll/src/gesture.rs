//! Touch gesture states
//!
//! ```text
//! Idle ──TOUCH_START──▶ Tracking ──ENGAGE_*/PINCH──▶ Dragging
//!  ▲                       │                           │
//!  │◀──TOUCH_END (tap)─────┤                           │ TOUCH_END
//!  │◀──TOUCH_CANCEL────────┴───────────────────────────┤
//!  │                                                   ▼
//!  └──────────SETTLED / WHEEL──────────────────── Decelerating
//! ```
//!
//! A touch start while decelerating goes straight back to `Tracking`.

use glide_core::events::event_types::*;
use glide_core::{EventType, StateTransitions};
use serde::Serialize;

use crate::offset::Axis;

/// Events raised by the gesture recogniser itself
pub mod gesture_events {
    use glide_core::EventType;

    /// Horizontal movement passed its tolerance
    pub const ENGAGE_HORIZONTAL: EventType = 100;
    /// Vertical movement passed its tolerance
    pub const ENGAGE_VERTICAL: EventType = 101;
    /// Deceleration velocity dropped below the settle threshold
    pub const SETTLED: EventType = 102;
}

use gesture_events::*;

/// Phase of the current touch interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureState {
    /// No touch in progress
    #[default]
    Idle,
    /// Touch down, still deciding between a tap and a drag
    Tracking,
    /// At least one axis or the scale is following the touch
    Dragging {
        horizontal: bool,
        vertical: bool,
        scaling: bool,
    },
    /// Released with velocity, kinetic animation running
    Decelerating,
}

impl GestureState {
    /// Engagement event for an axis
    pub fn engage_event(axis: Axis) -> EventType {
        match axis {
            Axis::Horizontal => ENGAGE_HORIZONTAL,
            Axis::Vertical => ENGAGE_VERTICAL,
        }
    }

    /// Fingers are down on the view
    pub fn is_tracking(&self) -> bool {
        matches!(self, GestureState::Tracking | GestureState::Dragging { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging { .. })
    }

    pub fn is_decelerating(&self) -> bool {
        matches!(self, GestureState::Decelerating)
    }

    /// Short label for traces
    pub fn name(&self) -> &'static str {
        match self {
            GestureState::Idle => "idle",
            GestureState::Tracking => "tracking",
            GestureState::Dragging { .. } => "dragging",
            GestureState::Decelerating => "decelerating",
        }
    }
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use GestureState::*;

        match (*self, event) {
            (Idle, TOUCH_START) => Some(Tracking),

            (Tracking, ENGAGE_HORIZONTAL) => Some(Dragging {
                horizontal: true,
                vertical: false,
                scaling: false,
            }),
            (Tracking, ENGAGE_VERTICAL) => Some(Dragging {
                horizontal: false,
                vertical: true,
                scaling: false,
            }),
            (Tracking, PINCH) => Some(Dragging {
                horizontal: false,
                vertical: false,
                scaling: true,
            }),
            (Tracking, TOUCH_END) => Some(Idle),

            (Dragging { horizontal: false, vertical, scaling }, ENGAGE_HORIZONTAL) => Some(Dragging {
                horizontal: true,
                vertical,
                scaling,
            }),
            (Dragging { horizontal, vertical: false, scaling }, ENGAGE_VERTICAL) => Some(Dragging {
                horizontal,
                vertical: true,
                scaling,
            }),
            (Dragging { horizontal, vertical, scaling: false }, PINCH) => Some(Dragging {
                horizontal,
                vertical,
                scaling: true,
            }),
            (Dragging { .. }, TOUCH_END) => Some(Decelerating),

            (Tracking | Dragging { .. }, TOUCH_CANCEL) => Some(Idle),

            (Decelerating, TOUCH_START) => Some(Tracking),
            (Decelerating, SETTLED | WHEEL) => Some(Idle),

            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap() {
        let state = GestureState::Idle
            .transition(TOUCH_START)
            .transition(TOUCH_END);
        assert_eq!(state, GestureState::Idle);
    }

    #[test]
    fn test_drag_then_decelerate_then_settle() {
        let state = GestureState::Idle
            .transition(TOUCH_START)
            .transition(ENGAGE_VERTICAL);
        assert_eq!(
            state,
            GestureState::Dragging {
                horizontal: false,
                vertical: true,
                scaling: false
            }
        );

        let state = state.transition(ENGAGE_HORIZONTAL).transition(PINCH);
        assert_eq!(
            state,
            GestureState::Dragging {
                horizontal: true,
                vertical: true,
                scaling: true
            }
        );

        let state = state.transition(TOUCH_END);
        assert!(state.is_decelerating());
        assert_eq!(state.transition(SETTLED), GestureState::Idle);
    }

    #[test]
    fn test_cancel_discards_from_any_touch_state() {
        assert_eq!(GestureState::Tracking.on_event(TOUCH_CANCEL), Some(GestureState::Idle));
        let dragging = GestureState::Tracking.transition(ENGAGE_HORIZONTAL);
        assert_eq!(dragging.on_event(TOUCH_CANCEL), Some(GestureState::Idle));
        assert_eq!(GestureState::Idle.on_event(TOUCH_CANCEL), None);
    }

    #[test]
    fn test_new_touch_interrupts_deceleration() {
        assert_eq!(
            GestureState::Decelerating.on_event(TOUCH_START),
            Some(GestureState::Tracking)
        );
        assert_eq!(GestureState::Decelerating.on_event(WHEEL), Some(GestureState::Idle));
    }

    #[test]
    fn test_extra_finger_keeps_state() {
        assert_eq!(GestureState::Tracking.on_event(TOUCH_START), None);
        let dragging = GestureState::Tracking.transition(ENGAGE_VERTICAL);
        assert_eq!(dragging.on_event(TOUCH_START), None);
        assert_eq!(dragging.on_event(ENGAGE_VERTICAL), None);
    }
}
