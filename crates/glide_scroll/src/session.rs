//! Touch sessions
//!
//! A [`TouchSession`] is the record of one touch interaction. It freezes the
//! geometry and physics at touch start, tracks raw (unclamped) offsets and
//! scale while the fingers move, and samples velocity for the deceleration
//! that may follow.
//!
//! The finger drives the raw offset; what is shown is the raw offset
//! rubber-banded against the bounds. A session that starts out of bounds
//! recovers its raw offset by inverting the rubber band, so the content
//! never jumps when a new touch catches it mid-bounce. Nothing here touches the [`OffsetModel`]; the owning
//! view commits the session's values when it ends.
//!
//! [`OffsetModel`]: crate::offset::OffsetModel

use glide_animation::Generation;
use glide_core::{AveragedTouches, Point, Rect};
use smallvec::SmallVec;

use crate::config::{PhysicsConfig, ScaleConfig};
use crate::offset::{Axis, ScrollBounds};

/// A value per axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisPair<T> {
    pub horizontal: T,
    pub vertical: T,
}

impl<T: Copy> AxisPair<T> {
    pub fn new(horizontal: T, vertical: T) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn splat(value: T) -> Self {
        Self::new(value, value)
    }

    pub fn get(&self, axis: Axis) -> T {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    pub fn set(&mut self, axis: Axis, value: T) {
        match axis {
            Axis::Horizontal => self.horizontal = value,
            Axis::Vertical => self.vertical = value,
        }
    }
}

impl AxisPair<bool> {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

fn set_component(point: &mut Point, axis: Axis, value: f32) {
    match axis {
        Axis::Horizontal => point.x = value,
        Axis::Vertical => point.y = value,
    }
}

/// Everything captured when a touch session begins
#[derive(Debug, Clone, Copy)]
pub struct SessionStart {
    pub generation: Generation,
    pub timestamp: f64,
    pub touches: AveragedTouches,
    /// Offset the gesture starts from (may be out of bounds after an
    /// interrupted deceleration)
    pub offset: Point,
    pub scale: f32,
    pub bounds: ScrollBounds,
    pub global_frame: Rect,
}

/// What a single move did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveOutcome {
    /// Axes that started scrolling on this move
    pub engaged: SmallVec<[Axis; 2]>,
    /// Axes disabled by the scroll lock on this move
    pub locked: SmallVec<[Axis; 2]>,
    /// Scaling started on this move
    pub began_scaling: bool,
    /// Live offset or scale was recomputed
    pub updated: bool,
}

/// State of one touch interaction
#[derive(Debug, Clone)]
pub struct TouchSession {
    pub(crate) generation: Generation,
    pub(crate) start_time: f64,

    // Baseline
    pub(crate) start_touch: Point,
    pub(crate) start_in_content: Point,
    pub(crate) start_distance: f32,
    /// Unresisted scale the pinch multiplies
    pub(crate) start_scale: f32,
    pub(crate) last_touch: Point,

    // Frozen for the session
    pub(crate) bounds: ScrollBounds,
    pub(crate) global_frame: Rect,
    pub(crate) scale_limits: ScaleConfig,
    pub(crate) physics: PhysicsConfig,

    // Disambiguation
    pub(crate) enabled: AxisPair<bool>,
    pub(crate) scrolling: AxisPair<bool>,
    pub(crate) tolerance: AxisPair<f32>,
    pub(crate) scaling: bool,
    pub(crate) dragging: bool,

    // Live values
    /// Offset before edge resistance
    pub(crate) raw_offset: Point,
    pub(crate) raw_scale: f32,
    pub(crate) live_offset: Point,
    pub(crate) live_scale: f32,
    pub(crate) last_offset: Point,
    pub(crate) last_event_time: f64,
    /// px per ms
    pub(crate) velocity: Point,
    pub(crate) velocity_sampled: bool,
    /// px per deceleration step
    pub(crate) deceleration_velocity: Point,
}

impl TouchSession {
    /// Capture a new session baseline
    pub fn begin(start: SessionStart, physics: &PhysicsConfig, scale_limits: &ScaleConfig) -> Self {
        let scale = if start.scale > 0.0 { start.scale } else { 1.0 };
        let edge = physics.edge();
        let raw_offset = Point::new(
            edge.unresist(
                start.offset.x,
                0.0,
                start.bounds.maximum(Axis::Horizontal, scale),
            ),
            edge.unresist(
                start.offset.y,
                0.0,
                start.bounds.maximum(Axis::Vertical, scale),
            ),
        );
        let raw_scale = if scale_limits.can_scale {
            edge.unresist(scale, scale_limits.minimum, scale_limits.maximum)
        } else {
            scale
        };
        Self::from_raw(start, physics, scale_limits, raw_offset, raw_scale)
    }

    fn from_raw(
        start: SessionStart,
        physics: &PhysicsConfig,
        scale_limits: &ScaleConfig,
        raw_offset: Point,
        raw_scale: f32,
    ) -> Self {
        let scale = if start.scale > 0.0 { start.scale } else { 1.0 };
        let in_frame = start.touches.position - start.global_frame.origin;
        let start_in_content = (raw_offset + in_frame).scaled(1.0 / scale);

        tracing::debug!(
            generation = start.generation.value(),
            touches = start.touches.touch_count,
            "touch session started at ({:.1}, {:.1})",
            start.touches.position.x,
            start.touches.position.y
        );

        Self {
            generation: start.generation,
            start_time: start.timestamp,
            start_touch: start.touches.position,
            start_in_content,
            start_distance: start.touches.distance,
            start_scale: raw_scale,
            last_touch: start.touches.position,
            bounds: start.bounds,
            global_frame: start.global_frame,
            scale_limits: *scale_limits,
            physics: *physics,
            enabled: AxisPair::new(start.bounds.can_scroll_x, start.bounds.can_scroll_y),
            scrolling: AxisPair::splat(false),
            tolerance: AxisPair::splat(physics.scroll_tolerance),
            scaling: false,
            dragging: false,
            raw_offset,
            raw_scale,
            live_offset: start.offset,
            live_scale: scale,
            last_offset: start.offset,
            last_event_time: start.timestamp,
            velocity: Point::ZERO,
            velocity_sampled: false,
            deceleration_velocity: Point::ZERO,
        }
    }

    /// Re-capture the baseline after the set of fingers changed.
    ///
    /// Axes already scrolling stay engaged and a drag stays a drag, so
    /// lifting one finger of a pinch does not turn into a tap. The raw
    /// offset and scale carry over, so overscroll is not resisted twice.
    pub fn recapture(&mut self, mut start: SessionStart) {
        start.offset = self.live_offset;
        start.scale = self.live_scale;
        let mut next = TouchSession::from_raw(
            start,
            &self.physics,
            &self.scale_limits,
            self.raw_offset,
            self.raw_scale,
        );
        next.start_time = self.start_time;
        next.enabled = AxisPair::new(
            next.enabled.horizontal && self.enabled.horizontal,
            next.enabled.vertical && self.enabled.vertical,
        );
        next.scrolling = self.scrolling;
        next.tolerance = self.tolerance;
        next.scaling = self.scaling;
        next.dragging = self.dragging;
        next.velocity = self.velocity;
        *self = next;
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Most recent averaged touch position, in global coordinates
    pub fn last_touch(&self) -> Point {
        self.last_touch
    }

    /// Offset including any rubber-band overshoot
    pub fn live_offset(&self) -> Point {
        self.live_offset
    }

    /// Offset the fingers asked for, before edge resistance
    pub fn raw_offset(&self) -> Point {
        self.raw_offset
    }

    pub fn live_scale(&self) -> f32 {
        self.live_scale
    }

    /// Last sampled velocity in px per ms
    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn deceleration_velocity(&self) -> Point {
        self.deceleration_velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_scaling(&self) -> bool {
        self.scaling
    }

    pub fn is_scrolling(&self, axis: Axis) -> bool {
        self.scrolling.get(axis)
    }

    pub fn is_enabled(&self, axis: Axis) -> bool {
        self.enabled.get(axis)
    }

    pub fn tolerance(&self, axis: Axis) -> f32 {
        self.tolerance.get(axis)
    }

    /// Maximum offset on `axis` at the session's live scale
    pub fn maximum(&self, axis: Axis) -> f32 {
        self.bounds.maximum(axis, self.live_scale)
    }

    /// Follow the fingers to a new averaged position
    pub fn update(&mut self, touches: &AveragedTouches, timestamp: f64) -> MoveOutcome {
        let mut outcome = MoveOutcome::default();
        let position = touches.position;
        self.last_touch = position;
        let in_frame = position - self.global_frame.origin;
        let mut delta = position - self.start_touch;

        for axis in Axis::BOTH {
            if !self.scrolling.get(axis)
                && axis.of_point(delta).abs() > self.tolerance.get(axis)
                && self.enabled.get(axis)
            {
                self.dragging = true;
                self.scrolling.set(axis, true);
                self.tolerance
                    .set(axis.other(), self.physics.secondary_scroll_tolerance);

                // Re-baseline so the content picks up from where it is
                set_component(&mut self.start_touch, axis, axis.of_point(position));
                let anchored =
                    (axis.of_point(self.raw_offset) + axis.of_point(in_frame)) / self.live_scale;
                set_component(&mut self.start_in_content, axis, anchored);
                set_component(&mut delta, axis, 0.0);

                tracing::debug!(?axis, "axis engaged");
                outcome.engaged.push(axis);
            }
        }

        if !self.scrolling.any() && !self.scale_limits.can_scale {
            return outcome;
        }

        for axis in Axis::BOTH {
            let other = axis.other();
            if self.scrolling.get(axis) {
                self.tolerance
                    .set(other, self.physics.secondary_scroll_tolerance);
                if axis.of_point(delta).abs() > self.physics.scroll_lock
                    && !self.scrolling.get(other)
                    && self.enabled.get(other)
                {
                    self.enabled.set(other, false);
                    outcome.locked.push(other);
                }
            }
        }

        if self.scale_limits.can_scale {
            let dd = touches.distance - self.start_distance;
            if dd.abs() > self.physics.scale_tolerance {
                let scale = self.start_scale * (1.0 + dd / 100.0);
                self.raw_scale = scale;
                self.live_scale = self.physics.edge().resist(
                    scale,
                    self.scale_limits.minimum,
                    self.scale_limits.maximum,
                );
                self.dragging = true;
                if !self.scaling {
                    self.scaling = true;
                    outcome.began_scaling = true;
                    tracing::debug!("scaling engaged");
                }
                outcome.updated = true;
            }
        }

        let edge = self.physics.edge();
        for axis in Axis::BOTH {
            if !(self.scrolling.get(axis) || self.scaling) {
                continue;
            }
            let raw = axis.of_point(self.start_in_content) * self.live_scale
                - axis.of_point(in_frame);
            let resisted = edge.resist(raw, 0.0, self.maximum(axis));
            set_component(&mut self.raw_offset, axis, raw);
            set_component(&mut self.live_offset, axis, resisted);
            outcome.updated = true;
        }

        let elapsed = timestamp - self.last_event_time;
        if elapsed >= 1.0 || !self.velocity_sampled {
            let dt = elapsed.max(1.0) as f32;
            self.velocity = (self.live_offset - self.last_offset).scaled(1.0 / dt);
            self.velocity_sampled = true;
            self.last_offset = self.live_offset;
            self.last_event_time = timestamp;
        }

        tracing::trace!(
            x = self.live_offset.x,
            y = self.live_offset.y,
            scale = self.live_scale,
            vx = self.velocity.x,
            vy = self.velocity.y,
            "touch moved"
        );

        outcome
    }
}
