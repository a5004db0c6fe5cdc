//! Integration tests for touch gestures and kinetic deceleration
//!
//! These tests verify that:
//! - Small movements stay taps and larger ones engage a single axis
//! - A released drag decelerates from its sampled velocity and settles
//! - Overscroll springs back and commits a clamped offset
//! - New touches and cancellation interact correctly with deceleration
//! - Catching or re-gripping overscrolled content never makes it jump
//! - Pinches scale within the configured range

use glide_core::{Point, Size, TouchEvent};
use glide_scroll::{
    Axis, ContentTransform, FixedGeometry, GestureState, ScrollConfig, ScrollNotification,
    ScrollView,
};

fn view() -> ScrollView<FixedGeometry> {
    let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
    ScrollView::new(geometry, ScrollConfig::default())
}

fn touch(t: f64, x: f32, y: f32) -> TouchEvent {
    TouchEvent::new(t, [Point::new(x, y)])
}

fn pinch(t: f64, center: Point, span: f32) -> TouchEvent {
    TouchEvent::new(
        t,
        [
            Point::new(center.x - span / 2.0, center.y),
            Point::new(center.x + span / 2.0, center.y),
        ],
    )
}

/// Advance in frame-sized steps until the view is idle
fn run_until_idle(view: &mut ScrollView<FixedGeometry>, mut now: f64) -> f64 {
    while view.next_due().is_some() {
        now += 16.0;
        view.advance_to(now);
        assert!(now < 120_000.0, "never settled");
    }
    now
}

#[test]
fn test_drag_below_tolerance_engages_nothing() {
    let mut view = view();
    view.touch_start(&touch(0.0, 200.0, 200.0));
    view.touch_move(&touch(10.0, 203.0, 200.0));

    let session = view.session().unwrap();
    assert!(!session.is_scrolling(Axis::Horizontal));
    assert!(!session.is_scrolling(Axis::Vertical));
    assert_eq!(view.phase(), GestureState::Tracking);
}

#[test]
fn test_drag_above_tolerance_engages_one_axis() {
    let mut view = view();
    view.touch_start(&touch(0.0, 200.0, 200.0));
    view.touch_move(&touch(10.0, 192.0, 200.0));

    let session = view.session().unwrap();
    assert!(session.is_scrolling(Axis::Horizontal));
    assert!(!session.is_scrolling(Axis::Vertical));
    assert_eq!(session.tolerance(Axis::Vertical), 20.0);
    assert_eq!(
        view.phase(),
        GestureState::Dragging {
            horizontal: true,
            vertical: false,
            scaling: false
        }
    );
}

#[test]
fn test_release_decelerates_and_settles() {
    let mut view = view();
    view.touch_start(&touch(0.0, 250.0, 100.0));
    view.touch_move(&touch(10.0, 250.0, 90.0));
    view.touch_move(&touch(20.0, 250.0, 70.0));

    let session = view.session().unwrap();
    assert_eq!(view.current_offset().y, 20.0);
    assert!((session.velocity().y - 2.0).abs() < 1e-5);

    view.touch_end(&TouchEvent::released(20.0));
    assert_eq!(view.phase(), GestureState::Decelerating);
    // The first step runs on release and moves by the seed velocity
    assert!((view.current_offset().y - 40.0).abs() < 1e-4);

    let mut previous = view.current_offset().y;
    let mut advancing_ticks = 0;
    let mut now = 20.0;
    while view.phase().is_decelerating() {
        now += 10.0;
        view.advance_to(now);
        let y = view.current_offset().y;
        if y > previous {
            advancing_ticks += 1;
        }
        previous = y;
        assert!(now < 60_000.0);
    }

    assert!(advancing_ticks > 10);
    assert_eq!(view.phase(), GestureState::Idle);
    assert!(view.session().is_none());
    let settled = view.committed_offset();
    assert!(settled.y > 400.0 && settled.y < 1500.0);
    assert_eq!(settled.x, 0.0);
    assert_eq!(view.current_offset(), settled);
}

#[test]
fn test_overscroll_springs_back_and_commits_in_range() {
    let mut view = view();
    view.touch_start(&touch(0.0, 250.0, 100.0));
    view.touch_move(&touch(10.0, 250.0, 110.0));
    view.touch_move(&touch(20.0, 250.0, 300.0));

    let y = view.current_offset().y;
    assert!(y < 0.0 && y > -320.0, "resisted overscroll, got {}", y);
    assert_eq!(view.committed_offset(), Point::ZERO);

    view.touch_end(&TouchEvent::released(20.0));
    run_until_idle(&mut view, 20.0);

    assert_eq!(view.phase(), GestureState::Idle);
    assert_eq!(view.committed_offset(), Point::ZERO);
    let notes = view.take_notifications();
    assert!(matches!(
        notes.last(),
        Some(ScrollNotification::TransformChanged(t)) if t.translate_y == 0.0
    ));
}

#[test]
fn test_new_touch_interrupts_deceleration_without_jump() {
    let mut view = view();
    view.touch_start(&touch(0.0, 250.0, 400.0));
    view.touch_move(&touch(10.0, 250.0, 390.0));
    view.touch_move(&touch(20.0, 250.0, 340.0));
    view.touch_end(&TouchEvent::released(20.0));
    view.advance_to(100.0);

    let shown = view.current_offset();
    view.touch_start(&touch(105.0, 250.0, 250.0));

    assert_eq!(view.phase(), GestureState::Tracking);
    assert_eq!(view.committed_offset(), shown);
    assert_eq!(view.current_offset(), shown);

    // The old deceleration no longer runs
    view.advance_to(1000.0);
    assert_eq!(view.current_offset(), shown);

    // Dragging continues from where the content was
    view.touch_move(&touch(1010.0, 250.0, 240.0));
    view.touch_move(&touch(1020.0, 250.0, 230.0));
    assert!((view.current_offset().y - (shown.y + 10.0)).abs() < 1e-3);
}

#[test]
fn test_new_touch_during_overscroll_continues_smoothly() {
    let mut view = view();
    view.touch_start(&touch(0.0, 250.0, 100.0));
    view.touch_move(&touch(10.0, 250.0, 110.0));
    view.touch_move(&touch(20.0, 250.0, 150.0));
    view.touch_end(&TouchEvent::released(20.0));
    view.advance_to(50.0);
    assert!(view.phase().is_decelerating());

    let shown = view.current_offset();
    assert!(shown.y < -50.0, "expected overscroll, got {}", shown.y);
    view.take_notifications();

    view.touch_start(&touch(55.0, 250.0, 300.0));
    assert_eq!(view.current_offset(), shown);
    assert_eq!(view.committed_offset(), Point::ZERO);

    // The last transform reported is the one still on screen
    let last_transform = view
        .take_notifications()
        .into_iter()
        .filter_map(|n| match n {
            ScrollNotification::TransformChanged(t) => Some(t),
            _ => None,
        })
        .last();
    assert_eq!(last_transform, Some(ContentTransform::new(shown, 1.0)));

    // Engaging the drag leaves the content in place
    view.touch_move(&touch(65.0, 250.0, 290.0));
    let engaged = view.current_offset().y;
    assert!((engaged - shown.y).abs() < 1e-2, "{} -> {}", shown.y, engaged);

    // A 1px drag toward the range moves less than 1px
    view.touch_move(&touch(75.0, 250.0, 289.0));
    let moved = view.current_offset().y - engaged;
    assert!(moved > 0.0 && moved < 1.0, "moved {}", moved);
}

#[test]
fn test_lifting_one_finger_while_overscrolled_continues_smoothly() {
    let mut view = view();
    let pair = |t: f64, y: f32| TouchEvent::new(t, [Point::new(250.0, y), Point::new(350.0, y)]);
    view.touch_start(&touch(0.0, 250.0, 100.0));
    view.touch_start(&pair(5.0, 100.0));
    view.touch_move(&pair(15.0, 120.0));
    view.touch_move(&pair(25.0, 400.0));
    let before_lift = view.current_offset();
    assert!(before_lift.y < -100.0);

    view.touch_end(&touch(35.0, 350.0, 400.0));
    assert_eq!(view.current_offset(), before_lift);

    // One more pixel past the edge is one resisted pixel
    view.touch_move(&touch(45.0, 350.0, 401.0));
    let moved = before_lift.y - view.current_offset().y;
    assert!(moved > 0.0 && moved < 1.0, "moved {}", moved);
}

#[test]
fn test_capture_follows_latest_touch() {
    let mut view = view();
    view.touch_start(&touch(0.0, 100.0, 100.0));
    view.touch_end(&TouchEvent::released(50.0));
    view.touch_start(&touch(100.0, 100.0, 100.0));

    view.advance_to(240.0);
    let captures: Vec<_> = view
        .take_notifications()
        .into_iter()
        .filter_map(|n| match n {
            ScrollNotification::CaptureTouchInContent { generation } => Some(generation),
            _ => None,
        })
        .collect();
    assert!(captures.is_empty());

    view.advance_to(250.0);
    assert!(view
        .take_notifications()
        .contains(&ScrollNotification::CaptureTouchInContent { generation: 2 }));
}

#[test]
fn test_cancel_never_commits() {
    let mut view = view();
    view.scroll_to(None, Some(300.0));
    view.touch_start(&touch(0.0, 250.0, 400.0));
    view.touch_move(&touch(10.0, 250.0, 390.0));
    view.touch_move(&touch(20.0, 250.0, 200.0));
    assert!(view.current_offset().y > 300.0);

    view.touch_cancel(&TouchEvent::released(30.0));
    assert_eq!(view.phase(), GestureState::Idle);
    assert_eq!(view.current_offset(), Point::new(0.0, 300.0));
    assert!(view.next_due().is_none());
}

#[test]
fn test_lifting_one_finger_keeps_dragging() {
    let mut view = view();
    view.touch_start(&touch(0.0, 250.0, 400.0));
    view.touch_start(&TouchEvent::new(
        5.0,
        [Point::new(250.0, 400.0), Point::new(350.0, 400.0)],
    ));
    view.touch_move(&TouchEvent::new(
        15.0,
        [Point::new(250.0, 380.0), Point::new(350.0, 380.0)],
    ));
    assert!(view.phase().is_dragging());
    let before_lift = view.current_offset();

    // One finger stays down
    view.touch_end(&touch(25.0, 350.0, 380.0));
    assert!(view.phase().is_dragging());
    assert_eq!(view.current_offset(), before_lift);

    view.touch_move(&touch(35.0, 350.0, 360.0));
    assert!((view.current_offset().y - (before_lift.y + 20.0)).abs() < 1e-3);

    view.touch_end(&TouchEvent::released(45.0));
    assert!(view.phase().is_decelerating());
}

#[test]
fn test_pinch_scales_and_settles_within_range() {
    let mut config = ScrollConfig::default();
    config.scale.can_scale = true;
    let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
    let mut view = ScrollView::new(geometry, config);

    let center = Point::new(250.0, 250.0);
    view.touch_start(&pinch(0.0, center, 100.0));
    view.touch_move(&pinch(10.0, center, 150.0));
    assert!((view.current_scale() - 1.5).abs() < 1e-4);
    assert!(view.phase().is_dragging());

    // Pinch past the maximum scale
    view.touch_move(&pinch(20.0, center, 400.0));
    let overshoot = view.current_scale();
    assert!(overshoot > 2.0 && overshoot < 4.0);

    view.touch_end(&TouchEvent::released(20.0));
    run_until_idle(&mut view, 20.0);

    assert_eq!(view.committed_scale(), 2.0);
    let offset = view.committed_offset();
    assert!((0.0..=view.maximum(Axis::Horizontal)).contains(&offset.x));
    assert!((0.0..=view.maximum(Axis::Vertical)).contains(&offset.y));
}

#[test]
fn test_scale_is_fixed_when_scaling_disabled() {
    let mut view = view();
    let center = Point::new(250.0, 250.0);
    view.touch_start(&pinch(0.0, center, 100.0));
    view.touch_move(&pinch(10.0, center, 300.0));
    assert_eq!(view.current_scale(), 1.0);
    view.touch_end(&TouchEvent::released(20.0));
    assert_eq!(view.committed_scale(), 1.0);
}
