//! Scroll view
//!
//! [`ScrollView`] owns the offset model, the gesture state, the wheel
//! accumulator and the deferred tasks that drive them. Hosts feed it input
//! events and clock ticks, and drain [`ScrollNotification`]s to update
//! scrollers and position the content.
//!
//! # Example
//!
//! ```rust
//! use glide_core::{Point, Size, TouchEvent};
//! use glide_scroll::{FixedGeometry, ScrollConfig, ScrollView};
//!
//! let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
//! let mut view = ScrollView::new(geometry, ScrollConfig::default());
//!
//! view.touch_start(&TouchEvent::new(0.0, [Point::new(250.0, 300.0)]));
//! view.touch_move(&TouchEvent::new(10.0, [Point::new(250.0, 290.0)]));
//! view.touch_move(&TouchEvent::new(20.0, [Point::new(250.0, 270.0)]));
//! view.touch_end(&TouchEvent::released(20.0));
//!
//! // Let the kinetic animation run out
//! view.advance_to(5_000.0);
//! assert!(view.current_offset().y > 20.0);
//! assert!(!view.phase().is_decelerating());
//! ```

use glide_animation::{Generation, TaskId, TaskScheduler};
use glide_core::events::event_types::*;
use glide_core::{
    AveragedTouches, EventType, Point, Rect, StateTransitions, TouchEvent, ViewId, WheelEvent,
};
use smallvec::SmallVec;

use crate::config::ScrollConfig;
use crate::deceleration::DecelerationStep;
use crate::geometry::GeometryProvider;
use crate::gesture::{gesture_events, GestureState};
use crate::notify::{ContentTransform, ScrollNotification, ScrollerMetrics};
use crate::offset::{Axis, OffsetModel, ScrollBounds};
use crate::session::{AxisPair, SessionStart, TouchSession};
use crate::tiling::{tile, TileInput, Tiling};
use crate::wheel::WheelAccumulator;

/// Deferred work owned by a scroll view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollTask {
    WheelDrain,
    DecelerationStep { generation: Generation },
    CaptureTouch { generation: Generation },
}

/// When a model change reports the content transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformReport {
    IfChanged,
    Always,
    /// The caller reports the transform it shows instead
    Never,
}

/// A scrollable viewport's offset and gesture engine
pub struct ScrollView<G: GeometryProvider> {
    config: ScrollConfig,
    geometry: G,
    model: OffsetModel,
    visible: AxisPair<bool>,
    tiling: Tiling,
    metrics: (ScrollerMetrics, ScrollerMetrics),

    phase: GestureState,
    session: Option<TouchSession>,
    generation: Generation,
    wheel: WheelAccumulator,

    scheduler: TaskScheduler<ScrollTask>,
    deceleration_task: Option<TaskId>,
    capture_task: Option<TaskId>,

    frame_dirty: bool,
    notifications: SmallVec<[ScrollNotification; 8]>,
}

impl<G: GeometryProvider> ScrollView<G> {
    /// Validate `config` and build a view with it
    pub fn try_new(geometry: G, config: ScrollConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self::new(geometry, config))
    }

    /// Build a view from a config that has already been validated, such as
    /// the default or one returned by [`ScrollConfig::load`]. Use
    /// [`ScrollView::try_new`] for configs assembled by hand.
    pub fn new(geometry: G, config: ScrollConfig) -> Self {
        let visible = AxisPair::new(
            config.scrollers.horizontal.visible,
            config.scrollers.vertical.visible,
        );
        let tiling = tile(&TileInput::from_config(
            &config.scrollers,
            visible.horizontal,
            visible.vertical,
        ));

        let mut view = Self {
            config,
            geometry,
            model: OffsetModel::new(),
            visible,
            tiling,
            metrics: (
                ScrollerMetrics::compute(0.0, 0.0),
                ScrollerMetrics::compute(0.0, 0.0),
            ),
            phase: GestureState::Idle,
            session: None,
            generation: Generation::INITIAL,
            wheel: WheelAccumulator::new(),
            scheduler: TaskScheduler::new(),
            deceleration_task: None,
            capture_task: None,
            frame_dirty: false,
            notifications: SmallVec::new(),
        };

        // Apply autohide and metrics for the initial content, silently
        view.content_frame_did_change();
        view.notifications.clear();
        view.frame_dirty = false;
        view
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Mutable geometry. Call [`content_frame_did_change`] after resizing.
    ///
    /// [`content_frame_did_change`]: ScrollView::content_frame_did_change
    pub fn geometry_mut(&mut self) -> &mut G {
        &mut self.geometry
    }

    pub fn phase(&self) -> GestureState {
        self.phase
    }

    /// The active touch session, if any
    pub fn session(&self) -> Option<&TouchSession> {
        self.session.as_ref()
    }

    pub fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    /// Current virtual clock in milliseconds
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Due time of the next deferred task
    pub fn next_due(&self) -> Option<f64> {
        self.scheduler.next_due()
    }

    pub fn is_scroller_visible(&self, axis: Axis) -> bool {
        self.visible.get(axis)
    }

    /// The view has a scroller on `axis` and it is visible
    pub fn can_scroll(&self, axis: Axis) -> bool {
        let present = match axis {
            Axis::Horizontal => self.config.scrollers.horizontal.present,
            Axis::Vertical => self.config.scrollers.vertical.present,
        };
        present && self.visible.get(axis)
    }

    pub fn bounds(&self) -> ScrollBounds {
        ScrollBounds {
            content: self.geometry.effective_content_size(),
            container: self.geometry.container_size(),
            can_scroll_x: self.can_scroll(Axis::Horizontal),
            can_scroll_y: self.can_scroll(Axis::Vertical),
        }
    }

    /// Largest committed offset on `axis`
    pub fn maximum(&self, axis: Axis) -> f32 {
        self.bounds().maximum(axis, self.model.scale())
    }

    /// Offset as currently shown, including live gesture overshoot
    pub fn current_offset(&self) -> Point {
        match &self.session {
            Some(session) => session.live_offset(),
            None => self.model.offset(),
        }
    }

    /// Scale as currently shown
    pub fn current_scale(&self) -> f32 {
        match &self.session {
            Some(session) => session.live_scale(),
            None => self.model.scale(),
        }
    }

    /// Offset held by the clamped model
    pub fn committed_offset(&self) -> Point {
        self.model.offset()
    }

    pub fn committed_scale(&self) -> f32 {
        self.model.scale()
    }

    /// Horizontal and vertical scroller metrics
    pub fn scroller_metrics(&self) -> (ScrollerMetrics, ScrollerMetrics) {
        self.metrics
    }

    pub fn content_transform(&self) -> ContentTransform {
        ContentTransform::new(self.current_offset(), self.current_scale())
    }

    /// Frame the content should render for. Touch hosts render a full
    /// extent beyond each edge so a fling never reveals blank content.
    pub fn content_clipping_frame(&self, clipping: Rect) -> Rect {
        if self.config.scrollers.touch_mode {
            clipping.outset(clipping.width(), clipping.height())
        } else {
            clipping
        }
    }

    // =========================================================================
    // Programmatic scrolling
    // =========================================================================

    /// Scroll to an absolute offset. `None` leaves that axis alone.
    pub fn scroll_to(&mut self, x: Option<f32>, y: Option<f32>) {
        self.stop_deceleration(gesture_events::SETTLED);
        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        if let Some(x) = x {
            self.model.set_offset(Axis::Horizontal, x, &bounds);
        }
        if let Some(y) = y {
            self.model.set_offset(Axis::Vertical, y, &bounds);
        }
        self.model_changed(before, TransformReport::IfChanged);
    }

    /// Scroll by a relative amount. Zero or `None` leaves that axis alone.
    pub fn scroll_by(&mut self, dx: Option<f32>, dy: Option<f32>) {
        self.stop_deceleration(gesture_events::SETTLED);
        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        self.model.scroll_by(dx, dy, &bounds);
        self.model_changed(before, TransformReport::IfChanged);
    }

    /// Scroll the least amount that brings `target` (in content coordinates)
    /// into view. Leading edges are revealed first, then trailing edges.
    ///
    /// Returns true if the offset changed.
    pub fn scroll_to_visible(&mut self, target: Rect) -> bool {
        self.stop_deceleration(gesture_events::SETTLED);
        let scale = self.model.scale();
        let target = Rect::new(
            target.x() * scale,
            target.y() * scale,
            target.width() * scale,
            target.height() * scale,
        );

        let current = self.model.offset();
        let mut visible = Rect::from_origin_size(current, self.geometry.container_size());

        let shift_y = (visible.min_y() - target.min_y()).max(0.0);
        let shift_x = (visible.min_x() - target.min_x()).max(0.0);
        visible = visible.offset(-shift_x, -shift_y);

        let shift_y = (target.max_y() - visible.max_y()).max(0.0);
        let shift_x = (target.max_x() - visible.max_x()).max(0.0);
        visible = visible.offset(shift_x, shift_y);

        if visible.origin == current {
            return false;
        }
        self.scroll_to(Some(visible.x()), Some(visible.y()));
        self.model.offset() != current
    }

    /// Scroll a frame given in another view's coordinates into view
    pub fn scroll_view_to_visible(&mut self, frame: Rect, from: ViewId) -> bool {
        let target = self.geometry.to_view_local(frame, from);
        self.scroll_to_visible(target)
    }

    pub fn scroll_down_line(&mut self, lines: f32) {
        self.scroll_by(None, Some(self.config.line_scroll.vertical * lines));
    }

    pub fn scroll_up_line(&mut self, lines: f32) {
        self.scroll_by(None, Some(-self.config.line_scroll.vertical * lines));
    }

    pub fn scroll_right_line(&mut self, lines: f32) {
        self.scroll_by(Some(self.config.line_scroll.horizontal * lines), None);
    }

    pub fn scroll_left_line(&mut self, lines: f32) {
        self.scroll_by(Some(-self.config.line_scroll.horizontal * lines), None);
    }

    pub fn scroll_down_page(&mut self, pages: f32) {
        let page = self.geometry.container_size().height;
        self.scroll_by(None, Some(page * pages));
    }

    pub fn scroll_up_page(&mut self, pages: f32) {
        let page = self.geometry.container_size().height;
        self.scroll_by(None, Some(-page * pages));
    }

    pub fn scroll_right_page(&mut self, pages: f32) {
        let page = self.geometry.container_size().width;
        self.scroll_by(Some(page * pages), None);
    }

    pub fn scroll_left_page(&mut self, pages: f32) {
        let page = self.geometry.container_size().width;
        self.scroll_by(Some(-page * pages), None);
    }

    /// Set the committed scale, clamped to the configured range. Offsets
    /// are re-clamped against the new maxima. Returns the applied scale.
    pub fn set_scale(&mut self, scale: f32) -> f32 {
        self.stop_deceleration(gesture_events::SETTLED);
        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        let applied = self.model.set_scale(scale, &self.config.scale, &bounds);
        self.model_changed(before, TransformReport::IfChanged);
        applied
    }

    // =========================================================================
    // Scrollers and layout
    // =========================================================================

    /// Show or hide a scroller. Changing visibility retiles the view.
    pub fn set_scroller_visible(&mut self, axis: Axis, visible: bool) {
        if self.visible.get(axis) == visible {
            return;
        }
        self.visible.set(axis, visible);
        tracing::debug!(?axis, visible, "scroller visibility changed");
        self.notifications
            .push(ScrollNotification::ScrollerVisibilityChanged { axis, visible });
        self.retile();

        // A hidden scroller disables its axis, so its maximum may now be 0
        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        self.model.reclamp(&bounds);
        self.model_changed(before, TransformReport::IfChanged);
    }

    /// Recompute scroller visibility, metrics and clamped offsets after the
    /// content or container was resized
    pub fn content_frame_did_change(&mut self) {
        let content = self.geometry.effective_content_size();
        let container = self.geometry.container_size();
        let scale = self.model.scale();

        let scrollers = self.config.scrollers;
        for (axis, scroller) in [
            (Axis::Horizontal, scrollers.horizontal),
            (Axis::Vertical, scrollers.vertical),
        ] {
            if scroller.present && scroller.autohides {
                let overflows = axis.of_size(content) * scale > axis.of_size(container);
                self.set_scroller_visible(axis, overflows);
            }
        }

        self.refresh_metrics();

        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        for (axis, autohides) in [
            (Axis::Horizontal, scrollers.horizontal.autohides),
            (Axis::Vertical, scrollers.vertical.autohides),
        ] {
            if autohides && !self.visible.get(axis) && self.model.get(axis) != 0.0 {
                self.model.set_offset(axis, 0.0, &bounds);
            }
        }
        // Content may have shrunk below the current offset
        self.model.reclamp(&bounds);
        self.model_changed(before, TransformReport::IfChanged);
    }

    fn retile(&mut self) {
        let tiling = tile(&TileInput::from_config(
            &self.config.scrollers,
            self.visible.horizontal,
            self.visible.vertical,
        ));
        if tiling != self.tiling {
            self.tiling = tiling;
            self.notifications.push(ScrollNotification::Retiled(tiling));
        }
    }

    fn refresh_metrics(&mut self) {
        let metrics = ScrollerMetrics::for_view(
            self.geometry.effective_content_size(),
            self.geometry.container_size(),
            self.model.scale(),
            self.config.scrollers.vertical_scroller_bottom,
        );
        if metrics != self.metrics {
            self.metrics = metrics;
            self.notifications.push(ScrollNotification::ScrollersChanged {
                horizontal: metrics.0,
                vertical: metrics.1,
            });
        }
    }

    // =========================================================================
    // Wheel
    // =========================================================================

    /// Queue a wheel event. Returns true if the view can scroll at all and
    /// the event should be considered handled.
    pub fn wheel(&mut self, event: &WheelEvent) -> bool {
        self.advance_to(event.timestamp);
        let handled = self.can_scroll(Axis::Horizontal) || self.can_scroll(Axis::Vertical);

        // Fingers on the view own the offset
        if self.phase.is_tracking() {
            return handled;
        }
        self.stop_deceleration(WHEEL);

        self.wheel.accumulate(event.delta_x, event.delta_y);
        if self.wheel.pending_task().is_none() {
            let id = self
                .scheduler
                .schedule(self.config.wheel.drain_interval_ms, ScrollTask::WheelDrain);
            self.wheel.set_pending_task(Some(id));
        }
        handled
    }

    fn drain_wheel(&mut self, id: TaskId) {
        if self.wheel.pending_task() != Some(id) {
            return;
        }
        self.wheel.set_pending_task(None);

        let drain = self.wheel.drain(&self.config.wheel);
        tracing::trace!(dx = drain.delta_x, dy = drain.delta_y, "wheel drain");

        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        self.model
            .scroll_by(Some(drain.delta_x), Some(drain.delta_y), &bounds);
        self.model_changed(before, TransformReport::IfChanged);

        if drain.reschedule {
            let id = self
                .scheduler
                .schedule(self.config.wheel.drain_interval_ms, ScrollTask::WheelDrain);
            self.wheel.set_pending_task(Some(id));
        }
    }

    fn cancel_wheel(&mut self) {
        if let Some(id) = self.wheel.reset() {
            self.scheduler.cancel(id);
        }
    }

    // =========================================================================
    // Touch
    // =========================================================================

    /// A finger went down. `event` lists every finger now in contact.
    pub fn touch_start(&mut self, event: &TouchEvent) {
        self.advance_to(event.timestamp);
        let touches = event.averaged();
        if touches.touch_count == 0 {
            return;
        }
        self.cancel_wheel();

        // Another finger joined an ongoing gesture
        if self.phase.is_tracking() {
            self.recapture(event.timestamp, touches);
            return;
        }

        let interrupted = self.interrupt_deceleration(TransformReport::Never);
        let (offset, scale) = interrupted.unwrap_or((self.model.offset(), self.model.scale()));

        self.generation = self.generation.next();
        if let Some(id) = self.capture_task.take() {
            self.scheduler.cancel(id);
        }
        self.capture_task = Some(self.scheduler.schedule(
            self.config.physics.capture_delay_ms,
            ScrollTask::CaptureTouch {
                generation: self.generation,
            },
        ));

        let start = self.session_start(event.timestamp, touches, offset, scale);
        self.session = Some(TouchSession::begin(
            start,
            &self.config.physics,
            &self.config.scale,
        ));
        if interrupted.is_some() {
            // The content stays where the deceleration left it
            self.notifications
                .push(ScrollNotification::TransformChanged(ContentTransform::new(
                    offset, scale,
                )));
        }
        self.transition(TOUCH_START);
    }

    /// Fingers moved
    pub fn touch_move(&mut self, event: &TouchEvent) {
        self.advance_to(event.timestamp);
        if !self.phase.is_tracking() {
            return;
        }
        let touches = event.averaged();
        if touches.touch_count == 0 {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let outcome = session.update(&touches, event.timestamp);
        let transform = ContentTransform::new(session.live_offset(), session.live_scale());

        for axis in &outcome.engaged {
            self.transition(GestureState::engage_event(*axis));
        }
        for axis in &outcome.locked {
            tracing::debug!(?axis, "scroll locked");
        }
        if outcome.began_scaling {
            self.transition(PINCH);
        }
        if self.phase.is_dragging() {
            if let Some(id) = self.capture_task.take() {
                self.scheduler.cancel(id);
            }
        }
        if outcome.updated {
            self.notifications
                .push(ScrollNotification::TransformChanged(transform));
        }
    }

    /// Fingers lifted. `event` lists the fingers still in contact.
    pub fn touch_end(&mut self, event: &TouchEvent) {
        self.advance_to(event.timestamp);
        if !self.phase.is_tracking() {
            return;
        }
        let touches = event.averaged();
        if touches.touch_count > 0 {
            self.recapture(event.timestamp, touches);
            return;
        }

        if let Some(id) = self.capture_task.take() {
            self.scheduler.cancel(id);
        }

        let dragging = self.session.as_ref().is_some_and(|s| s.is_dragging());
        if dragging {
            if let Some(session) = self.session.as_mut() {
                session.begin_deceleration(event.timestamp);
            }
            self.transition(TOUCH_END);
            self.deceleration_tick();
        } else {
            let position = self
                .session
                .take()
                .map(|s| s.last_touch())
                .unwrap_or_default();
            tracing::debug!("tap forwarded to content");
            self.notifications.push(ScrollNotification::ForwardTouchEnd {
                timestamp: event.timestamp,
                position,
            });
            self.transition(TOUCH_END);
        }
    }

    /// The touch was cancelled by the system. Nothing is committed.
    pub fn touch_cancel(&mut self, event: &TouchEvent) {
        self.advance_to(event.timestamp);
        if !self.phase.is_tracking() {
            return;
        }
        if let Some(id) = self.capture_task.take() {
            self.scheduler.cancel(id);
        }
        self.session = None;
        self.transition(TOUCH_CANCEL);
        tracing::debug!("touch cancelled, session discarded");
        self.notifications
            .push(ScrollNotification::TransformChanged(ContentTransform::new(
                self.model.offset(),
                self.model.scale(),
            )));
    }

    fn recapture(&mut self, timestamp: f64, touches: AveragedTouches) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let start = self.session_start(
            timestamp,
            touches,
            session.live_offset(),
            session.live_scale(),
        );
        if let Some(session) = self.session.as_mut() {
            session.recapture(start);
        }
    }

    fn session_start(
        &self,
        timestamp: f64,
        touches: AveragedTouches,
        offset: Point,
        scale: f32,
    ) -> SessionStart {
        SessionStart {
            generation: self.generation,
            timestamp,
            touches,
            offset,
            scale,
            bounds: self.bounds(),
            global_frame: self.geometry.global_frame(),
        }
    }

    // =========================================================================
    // Deceleration
    // =========================================================================

    fn deceleration_tick(&mut self) {
        let now = self.scheduler.now();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.step_deceleration(now) {
            DecelerationStep::Continue => {
                let transform =
                    ContentTransform::new(session.live_offset(), session.live_scale());
                let generation = session.generation();
                self.notifications
                    .push(ScrollNotification::TransformChanged(transform));
                self.deceleration_task = Some(self.scheduler.schedule(
                    self.config.physics.deceleration_interval_ms,
                    ScrollTask::DecelerationStep { generation },
                ));
            }
            DecelerationStep::Settled => {
                self.deceleration_task = None;
                if let Some(session) = self.session.take() {
                    self.commit(&session, TransformReport::Always);
                }
                self.transition(gesture_events::SETTLED);
            }
        }
    }

    /// Stop a running deceleration, committing where it got to. Returns the
    /// unclamped offset and scale it was showing.
    fn interrupt_deceleration(&mut self, report: TransformReport) -> Option<(Point, f32)> {
        if !self.phase.is_decelerating() {
            return None;
        }
        if let Some(id) = self.deceleration_task.take() {
            self.scheduler.cancel(id);
        }
        let session = self.session.take()?;
        tracing::debug!("deceleration interrupted");
        self.commit(&session, report);
        Some((session.live_offset(), session.live_scale()))
    }

    fn stop_deceleration(&mut self, event: EventType) {
        if self.interrupt_deceleration(TransformReport::Always).is_some() {
            self.transition(event);
        }
    }

    /// Write a finished session's values into the clamped model
    fn commit(&mut self, session: &TouchSession, report: TransformReport) {
        let bounds = self.bounds();
        let before = (self.model.offset(), self.model.scale());
        if self.config.scale.can_scale {
            self.model
                .set_scale(session.live_scale(), &self.config.scale, &bounds);
        }
        let live = session.live_offset();
        self.model.set_offset(Axis::Horizontal, live.x, &bounds);
        self.model.set_offset(Axis::Vertical, live.y, &bounds);
        self.model_changed(before, report);
    }

    fn model_changed(&mut self, (old_offset, old_scale): (Point, f32), report: TransformReport) {
        let offset = self.model.offset();
        let scale = self.model.scale();
        let scale_changed = scale != old_scale;
        let offset_changed = offset != old_offset;

        if scale_changed {
            self.notifications
                .push(ScrollNotification::ScaleChanged { scale });
            self.refresh_metrics();
        }
        if offset_changed {
            self.notifications
                .push(ScrollNotification::OffsetChanged { offset });
            self.frame_dirty = true;
        }
        let report_transform = match report {
            TransformReport::IfChanged => scale_changed || offset_changed,
            TransformReport::Always => true,
            TransformReport::Never => false,
        };
        if report_transform {
            self.notifications
                .push(ScrollNotification::TransformChanged(ContentTransform::new(
                    offset, scale,
                )));
        }
    }

    // =========================================================================
    // Clock and output
    // =========================================================================

    /// Advance the clock to `now`, running every task that falls due on the
    /// way at its own due time
    pub fn advance_to(&mut self, now: f64) {
        if !now.is_finite() {
            return;
        }
        while let Some((id, task)) = self.scheduler.pop_until(now) {
            self.run_task(id, task);
        }
        self.scheduler.advance_clock(now);
    }

    fn run_task(&mut self, id: TaskId, task: ScrollTask) {
        match task {
            ScrollTask::WheelDrain => self.drain_wheel(id),
            ScrollTask::DecelerationStep { generation } => {
                let current = self.session.as_ref().map(|s| s.generation());
                if self.deceleration_task != Some(id)
                    || current != Some(generation)
                    || !self.phase.is_decelerating()
                {
                    return;
                }
                self.deceleration_task = None;
                self.deceleration_tick();
            }
            ScrollTask::CaptureTouch { generation } => {
                if generation != self.generation {
                    return;
                }
                if self.capture_task == Some(id) {
                    self.capture_task = None;
                }
                let undragged = self.session.as_ref().is_some_and(|s| !s.is_dragging());
                if self.phase == GestureState::Tracking && undragged {
                    tracing::debug!(
                        generation = generation.value(),
                        "touch held, capturing in content"
                    );
                    self.notifications
                        .push(ScrollNotification::CaptureTouchInContent {
                            generation: generation.value(),
                        });
                }
            }
        }
    }

    /// Close the current processing turn. Offset changes made during the
    /// turn are reported as a single content frame invalidation.
    pub fn end_turn(&mut self) {
        if !self.frame_dirty {
            return;
        }
        self.frame_dirty = false;

        let scale = self.model.scale();
        if !(scale > 0.0) {
            return;
        }
        let offset = self.model.offset().scaled(1.0 / scale);
        let container = self.geometry.container_size();
        let visible = Rect::new(
            offset.x,
            offset.y,
            container.width / scale,
            container.height / scale,
        );
        self.notifications
            .push(ScrollNotification::ContentFrameInvalidated { visible });
    }

    /// Drain queued notifications
    pub fn take_notifications(&mut self) -> Vec<ScrollNotification> {
        std::mem::take(&mut self.notifications).into_vec()
    }

    fn transition(&mut self, event: EventType) {
        let next = self.phase.transition(event);
        if next != self.phase {
            tracing::debug!(from = self.phase.name(), to = next.name(), "gesture phase");
            self.phase = next;
        }
    }
}
