//! Wheel momentum
//!
//! Wheel deltas are accumulated and applied on a short deferred drain
//! rather than immediately. Vertical motion keeps decaying across drains
//! when momentum is on; horizontal motion is applied once.

use glide_animation::TaskId;

use crate::config::WheelConfig;

/// Deltas to apply from one drain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDrain {
    pub delta_x: f32,
    pub delta_y: f32,
    /// Another drain is needed to continue the momentum
    pub reschedule: bool,
}

/// Pending wheel deltas between drains
#[derive(Debug, Default)]
pub struct WheelAccumulator {
    delta_x: f32,
    delta_y: f32,
    pending: Option<TaskId>,
}

impl WheelAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_x(&self) -> f32 {
        self.delta_x
    }

    pub fn pending_y(&self) -> f32 {
        self.delta_y
    }

    /// Add a wheel event's deltas
    pub fn accumulate(&mut self, delta_x: f32, delta_y: f32) {
        if delta_x.is_finite() {
            self.delta_x += delta_x;
        }
        if delta_y.is_finite() {
            self.delta_y += delta_y;
        }
    }

    /// The drain task currently queued, if any
    pub fn pending_task(&self) -> Option<TaskId> {
        self.pending
    }

    pub fn set_pending_task(&mut self, task: Option<TaskId>) {
        self.pending = task;
    }

    /// Take the accumulated deltas and decay the vertical one for the next
    /// drain. The decayed delta is truncated toward zero and never changes
    /// sign, so momentum always ends on an exact zero.
    pub fn drain(&mut self, config: &WheelConfig) -> WheelDrain {
        let delta_x = self.delta_x;
        let delta_y = self.delta_y;
        self.delta_x = 0.0;

        let reschedule = if config.momentum && delta_y != 0.0 {
            let decayed = (delta_y * config.decay).trunc();
            self.delta_y = if delta_y > 0.0 {
                decayed.max(0.0)
            } else {
                decayed.min(0.0)
            };
            self.delta_y != 0.0
        } else {
            self.delta_y = 0.0;
            false
        };

        if !reschedule {
            tracing::debug!("wheel momentum stopped");
        }

        WheelDrain {
            delta_x,
            delta_y,
            reschedule,
        }
    }

    /// Drop everything, e.g. when a touch takes over
    pub fn reset(&mut self) -> Option<TaskId> {
        self.delta_x = 0.0;
        self.delta_y = 0.0;
        self.pending.take()
    }
}
