//! Kinetic deceleration
//!
//! After a drag is released the session keeps moving on its own: each step
//! advances the offsets by the current velocity, springs the scale back
//! into range, decays the velocity and bounces it off the edges. Steps are
//! nominally `deceleration_interval_ms` apart, but decay is computed from
//! the real elapsed time so late timers do not change the motion.

use glide_animation::decay_factor;
use glide_core::Point;

use crate::offset::Axis;
use crate::session::TouchSession;

/// Result of one deceleration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecelerationStep {
    /// Still moving; run another step after the interval
    Continue,
    /// Velocity and scale correction are below the settle threshold
    Settled,
}

impl TouchSession {
    /// Seed the deceleration velocity from the last sampled velocity
    pub fn begin_deceleration(&mut self, timestamp: f64) {
        self.dragging = false;
        self.last_event_time = timestamp;
        self.deceleration_velocity = self
            .velocity
            .scaled(self.physics.release_velocity_multiplier);

        tracing::debug!(
            vx = self.deceleration_velocity.x,
            vy = self.deceleration_velocity.y,
            "deceleration started"
        );
    }

    /// Run one deceleration step at time `now`
    pub fn step_deceleration(&mut self, now: f64) -> DecelerationStep {
        let edge = self.physics.edge();
        let elapsed = (now - self.last_event_time).max(1.0);

        self.live_offset = self.live_offset + self.deceleration_velocity;

        let scale_correction = edge.bounce(
            0.0,
            self.live_scale,
            self.scale_limits.minimum,
            self.scale_limits.maximum,
        );
        self.live_scale += scale_correction;

        // Maxima follow the corrected scale within the same step
        let max_x = self.maximum(Axis::Horizontal);
        let max_y = self.maximum(Axis::Vertical);

        // Overscroll stops short of the resistance asymptote, where a new
        // touch could no longer recover the raw offset
        let limited = Point::new(
            edge.limit(self.live_offset.x, 0.0, max_x),
            edge.limit(self.live_offset.y, 0.0, max_y),
        );
        if limited.x != self.live_offset.x {
            self.deceleration_velocity.x = 0.0;
        }
        if limited.y != self.live_offset.y {
            self.deceleration_velocity.y = 0.0;
        }
        self.live_offset = limited;

        let decay = decay_factor(
            self.physics.deceleration_decay,
            elapsed,
            self.physics.deceleration_interval_ms,
        );
        let velocity = self.deceleration_velocity.scaled(decay);
        self.deceleration_velocity = Point::new(
            edge.bounce(velocity.x, self.live_offset.x, 0.0, max_x),
            edge.bounce(velocity.y, self.live_offset.y, 0.0, max_y),
        );

        tracing::trace!(
            x = self.live_offset.x,
            y = self.live_offset.y,
            scale = self.live_scale,
            vx = self.deceleration_velocity.x,
            vy = self.deceleration_velocity.y,
            "deceleration step"
        );

        let epsilon = self.physics.settle_epsilon;
        if self.deceleration_velocity.x.abs() < epsilon
            && self.deceleration_velocity.y.abs() < epsilon
            && scale_correction.abs() < epsilon
        {
            tracing::debug!(
                x = self.live_offset.x,
                y = self.live_offset.y,
                scale = self.live_scale,
                "deceleration settled"
            );
            return DecelerationStep::Settled;
        }

        self.last_event_time = now;
        DecelerationStep::Continue
    }

    /// Run steps every interval from `start` until settled, returning the
    /// time of the settling step
    #[cfg(test)]
    pub(crate) fn run_deceleration(&mut self, start: f64, max_steps: usize) -> Option<f64> {
        let interval = self.physics.deceleration_interval_ms;
        let mut now = start;
        for _ in 0..max_steps {
            if self.step_deceleration(now) == DecelerationStep::Settled {
                return Some(now);
            }
            now += interval;
        }
        None
    }
}
