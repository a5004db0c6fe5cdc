//! State transitions
//!
//! Interaction states are plain enums that map events to their next state.
//! The owner keeps the current value and replaces it on every transition:
//!
//! ```rust
//! use glide_core::events::event_types::*;
//! use glide_core::fsm::StateTransitions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
//! enum Finger {
//!     #[default]
//!     Up,
//!     Down,
//! }
//!
//! impl StateTransitions for Finger {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Finger::Up, TOUCH_START) => Some(Finger::Down),
//!             (Finger::Down, TOUCH_END | TOUCH_CANCEL) => Some(Finger::Up),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = Finger::default();
//! state = state.transition(TOUCH_START);
//! assert_eq!(state, Finger::Down);
//! // No transition defined: state is unchanged
//! assert_eq!(state.transition(TOUCH_MOVE), Finger::Down);
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// Trait for state types that handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Apply an event, returning the next state (or the current one when the
    /// event has no transition from here)
    fn transition(self, event: EventType) -> Self {
        self.on_event(event).unwrap_or(self)
    }
}
