//! Kinetic scroll physics
//!
//! Pure functions shared by live dragging and post-release deceleration.
//! Everything here works in "per step" units: velocities are distances per
//! deceleration step, and decay is normalised to the step interval so that
//! late timers do not change the physical outcome.

/// Soften a value that has been pushed past `[min, max]`.
///
/// Inside the range the value is returned unchanged. Outside it, the
/// overshoot `d` is mapped to `asymptote * (1 - coefficient^|d|)`, so the
/// result keeps moving away from the bound but can never reach
/// `min - asymptote` or `max + asymptote`.
///
/// `coefficient` must be in `(0, 1)`; values closer to 1 resist less.
pub fn resist(value: f32, min: f32, max: f32, coefficient: f32, asymptote: f32) -> f32 {
    let overshoot = if value < min {
        value - min
    } else if value > max {
        max - value
    } else {
        return value;
    };

    let remaining = coefficient.powf(overshoot.abs()) * asymptote;
    let softened = if value < min {
        remaining - asymptote
    } else {
        asymptote - remaining
    };

    value.clamp(min, max) + softened
}

/// Share of the asymptote a softened value is kept short of, so that
/// [`unresist`] always has a finite answer.
pub const ASYMPTOTE_MARGIN: f32 = 0.01;

/// Invert [`resist`]: the raw value that softens to `value`.
///
/// Inside `[min, max]` the value is returned unchanged. Values at or past
/// the asymptote map to the raw value of the [`ASYMPTOTE_MARGIN`] limit.
pub fn unresist(value: f32, min: f32, max: f32, coefficient: f32, asymptote: f32) -> f32 {
    if value >= min && value <= max {
        return value;
    }
    if !(coefficient > 0.0 && coefficient < 1.0) || asymptote <= 0.0 {
        return value.max(min).min(max);
    }

    let remaining = if value < min {
        1.0 + (value - min) / asymptote
    } else {
        1.0 - (value - max) / asymptote
    };
    let overshoot = remaining.max(ASYMPTOTE_MARGIN).ln() / coefficient.ln();

    if value < min {
        min - overshoot
    } else {
        max + overshoot
    }
}

/// Keep `value` within [`ASYMPTOTE_MARGIN`] of the asymptote around
/// `[min, max]`.
pub fn limit(value: f32, min: f32, max: f32, asymptote: f32) -> f32 {
    let reach = asymptote.max(0.0) * (1.0 - ASYMPTOTE_MARGIN);
    value.max(min - reach).min(max + reach)
}

/// Correct a velocity for a value that sits outside `[min, max]`.
///
/// A velocity still heading further out is damped by
/// `distance * deceleration_from_edge`. Otherwise it is replaced by a
/// velocity back toward the range of `distance * acceleration_to_edge`.
/// Inside the range the velocity is returned unchanged.
pub fn bounce(
    velocity: f32,
    value: f32,
    min: f32,
    max: f32,
    deceleration_from_edge: f32,
    acceleration_to_edge: f32,
) -> f32 {
    if value < min {
        let distance = min - value;
        if velocity < 0.0 {
            velocity + distance * deceleration_from_edge
        } else {
            distance * acceleration_to_edge
        }
    } else if value > max {
        let distance = value - max;
        if velocity > 0.0 {
            velocity - distance * deceleration_from_edge
        } else {
            -(distance * acceleration_to_edge)
        }
    } else {
        velocity
    }
}

/// Exponential decay over `elapsed_ms`, expressed relative to a decay of
/// `decay` per `interval_ms`.
pub fn decay_factor(decay: f32, elapsed_ms: f64, interval_ms: f64) -> f32 {
    if interval_ms <= 0.0 {
        return decay;
    }
    let steps = (elapsed_ms.max(0.0) / interval_ms) as f32;
    decay.powf(steps)
}

/// Edge behaviour constants bundled for a single gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePhysics {
    pub resistance_coefficient: f32,
    pub resistance_asymptote: f32,
    pub deceleration_from_edge: f32,
    pub acceleration_to_edge: f32,
}

impl EdgePhysics {
    /// Rubber-band `value` against `[min, max]`
    pub fn resist(&self, value: f32, min: f32, max: f32) -> f32 {
        resist(
            value,
            min,
            max,
            self.resistance_coefficient,
            self.resistance_asymptote,
        )
    }

    /// Raw value that [`EdgePhysics::resist`] softens to `value`
    pub fn unresist(&self, value: f32, min: f32, max: f32) -> f32 {
        unresist(
            value,
            min,
            max,
            self.resistance_coefficient,
            self.resistance_asymptote,
        )
    }

    /// Clamp `value` short of the resistance asymptote
    pub fn limit(&self, value: f32, min: f32, max: f32) -> f32 {
        limit(value, min, max, self.resistance_asymptote)
    }

    /// Bounce `velocity` of `value` back toward `[min, max]`
    pub fn bounce(&self, velocity: f32, value: f32, min: f32, max: f32) -> f32 {
        bounce(
            velocity,
            value,
            min,
            max,
            self.deceleration_from_edge,
            self.acceleration_to_edge,
        )
    }
}

impl Default for EdgePhysics {
    fn default() -> Self {
        Self {
            resistance_coefficient: 0.998,
            resistance_asymptote: 320.0,
            deceleration_from_edge: 0.05,
            acceleration_to_edge: 0.08,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const C: f32 = 0.998;
    const A: f32 = 320.0;

    #[test]
    fn test_resist_identity_in_range() {
        for value in [0.0, 1.0, 250.0, 999.5, 1000.0] {
            assert_eq!(resist(value, 0.0, 1000.0, C, A), value);
        }
    }

    #[test]
    fn test_resist_monotonic_and_bounded_below() {
        let mut previous = 0.0;
        for overshoot in 1..=2000 {
            let value = -(overshoot as f32);
            let resisted = resist(value, 0.0, 1000.0, C, A);
            assert!(resisted < previous, "not strictly decreasing at {}", value);
            assert!(resisted > -A, "crossed asymptote at {}", value);
            assert!(resisted > value, "no resistance applied at {}", value);
            previous = resisted;
        }
    }

    #[test]
    fn test_resist_monotonic_and_bounded_above() {
        let mut previous = 1000.0;
        for overshoot in 1..=2000 {
            let value = 1000.0 + overshoot as f32;
            let resisted = resist(value, 0.0, 1000.0, C, A);
            assert!(resisted > previous, "not strictly increasing at {}", value);
            assert!(resisted < 1000.0 + A, "crossed asymptote at {}", value);
            previous = resisted;
        }
    }

    #[test]
    fn test_resist_scale_range() {
        // Pinching past the maximum scale still grows, just slowly
        let resisted = resist(2.5, 0.25, 2.0, C, A);
        assert!(resisted > 2.0 && resisted < 2.5);
    }

    #[test]
    fn test_unresist_inverts_resist() {
        for raw in [-1500.0, -400.0, -37.5, -1.0, 0.0, 640.0, 1001.0, 1180.0, 2400.0] {
            let shown = resist(raw, 0.0, 1000.0, C, A);
            let back = unresist(shown, 0.0, 1000.0, C, A);
            assert!((back - raw).abs() < 0.5, "{} came back as {}", raw, back);
            // Re-resisting lands exactly where it was shown
            let again = resist(back, 0.0, 1000.0, C, A);
            assert!((again - shown).abs() < 1e-2, "{} vs {}", again, shown);
        }
    }

    #[test]
    fn test_unresist_saturates_at_asymptote() {
        let at_asymptote = unresist(-A, 0.0, 1000.0, C, A);
        assert_eq!(unresist(-A * 1.5, 0.0, 1000.0, C, A), at_asymptote);
        assert!(at_asymptote.is_finite() && at_asymptote < -A);

        // The saturated raw value softens back to the limit
        let shown = resist(at_asymptote, 0.0, 1000.0, C, A);
        assert!((shown - limit(-A, 0.0, 1000.0, A)).abs() < 1e-2);
    }

    #[test]
    fn test_limit_stays_inside_asymptote() {
        assert!((limit(-364.5, 0.0, 1000.0, A) + 316.8).abs() < 1e-3);
        assert!((limit(1400.0, 0.0, 1000.0, A) - 1316.8).abs() < 1e-3);
        assert_eq!(limit(-100.0, 0.0, 1000.0, A), -100.0);
        assert_eq!(limit(500.0, 0.0, 1000.0, A), 500.0);
    }

    #[test]
    fn test_bounce_pulls_back_from_below() {
        let v = bounce(0.0, -50.0, 0.0, 1000.0, 0.05, 0.08);
        assert!(v > 0.0);
        assert!((v - 50.0 * 0.08).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_damps_outward_velocity() {
        // Still travelling away from the top edge
        let v = bounce(-10.0, -50.0, 0.0, 1000.0, 0.05, 0.08);
        assert!((v - (-10.0 + 50.0 * 0.05)).abs() < 1e-5);

        // Still travelling away from the bottom edge
        let v = bounce(10.0, 1020.0, 0.0, 1000.0, 0.05, 0.08);
        assert!((v - (10.0 - 20.0 * 0.05)).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_replaces_inward_velocity_above() {
        let v = bounce(-1.0, 1020.0, 0.0, 1000.0, 0.05, 0.08);
        assert!((v - (-20.0 * 0.08)).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_ignores_in_range() {
        assert_eq!(bounce(7.5, 500.0, 0.0, 1000.0, 0.05, 0.08), 7.5);
    }

    #[test]
    fn test_decay_is_time_normalised() {
        let one_step = decay_factor(0.95, 10.0, 10.0);
        assert!((one_step - 0.95).abs() < 1e-6);

        // Two late half-steps decay the same as one full step
        let half = decay_factor(0.95, 5.0, 10.0);
        assert!((half * half - one_step).abs() < 1e-6);

        // A timer firing twice as late decays twice as much
        let late = decay_factor(0.95, 20.0, 10.0);
        assert!((late - 0.95 * 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_edge_physics_defaults() {
        let physics = EdgePhysics::default();
        assert_eq!(physics.resist(50.0, 0.0, 100.0), 50.0);
        assert!((physics.bounce(0.0, -50.0, 0.0, 100.0) - 4.0).abs() < 1e-5);
    }
}
