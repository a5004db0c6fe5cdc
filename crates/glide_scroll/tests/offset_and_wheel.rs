//! Integration tests for the clamped offset model and wheel momentum
//!
//! These tests drive a `ScrollView` through its public API on the virtual
//! clock and verify that:
//! - Requested offsets always land inside `[0, maximum]`
//! - Disabled axes report a zero maximum
//! - Wheel momentum decays vertical motion and applies horizontal once
//! - Notifications serialize for hosts that log them
//! - A config file on disk changes how the view scrolls

use glide_animation::{bounce, resist};
use glide_core::{Point, Size, WheelEvent};
use glide_scroll::{Axis, FixedGeometry, ScrollConfig, ScrollNotification, ScrollView};

fn view_with(content: Size) -> ScrollView<FixedGeometry> {
    let geometry = FixedGeometry::new(Size::new(500.0, 500.0), content);
    ScrollView::new(geometry, ScrollConfig::default())
}

#[test]
fn test_scroll_by_clamps_to_maximum() {
    let mut view = view_with(Size::new(2000.0, 2000.0));
    assert_eq!(view.current_offset(), Point::ZERO);

    view.scroll_by(Some(600.0), Some(0.0));
    assert_eq!(view.current_offset(), Point::new(600.0, 0.0));

    view.scroll_by(Some(2000.0), Some(0.0));
    assert_eq!(view.current_offset(), Point::new(1500.0, 0.0));
    assert_eq!(view.maximum(Axis::Horizontal), 1500.0);
}

#[test]
fn test_requested_offsets_stay_in_range() {
    let mut view = view_with(Size::new(2000.0, 1200.0));
    let requests = [-1e6, -1.0, 0.0, 0.5, 350.0, 699.0, 700.0, 701.0, 1e9];

    for requested in requests {
        view.scroll_to(Some(requested), Some(requested));
        let offset = view.current_offset();
        assert!((0.0..=view.maximum(Axis::Horizontal)).contains(&offset.x));
        assert!((0.0..=view.maximum(Axis::Vertical)).contains(&offset.y));

        // Re-applying an in-range value is a no-op
        view.scroll_to(Some(offset.x), Some(offset.y));
        assert_eq!(view.current_offset(), offset);
    }
}

#[test]
fn test_maximum_is_zero_for_disabled_axis() {
    let mut config = ScrollConfig::default();
    config.scrollers.horizontal.present = false;
    let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
    let mut view = ScrollView::new(geometry, config);

    assert_eq!(view.maximum(Axis::Horizontal), 0.0);
    assert_eq!(view.maximum(Axis::Vertical), 1500.0);

    view.scroll_by(Some(300.0), Some(300.0));
    assert_eq!(view.current_offset(), Point::new(0.0, 300.0));
}

#[test]
fn test_empty_content_degrades_to_zero_maxima() {
    let view = view_with(Size::ZERO);
    assert_eq!(view.maximum(Axis::Horizontal), 0.0);
    assert_eq!(view.maximum(Axis::Vertical), 0.0);
    let (h, v) = view.scroller_metrics();
    assert_eq!(h.proportion, 1.0);
    assert_eq!(v.proportion, 1.0);
}

#[test]
fn test_wheel_momentum_sequence() {
    let mut view = view_with(Size::new(2000.0, 20000.0));
    assert!(view.wheel(&WheelEvent::new(0.0, 0.0, 100.0)));

    // Nothing moves until the first drain
    assert_eq!(view.current_offset().y, 0.0);

    let mut applied = Vec::new();
    let mut last = 0.0;
    let mut now = 0.0;
    while view.next_due().is_some() {
        now += 10.0;
        view.advance_to(now);
        let y = view.current_offset().y;
        applied.push(y - last);
        last = y;
        assert!(now < 10_000.0, "momentum never stopped");
    }

    assert_eq!(&applied[..3], &[100.0, 95.0, 90.0]);
    for pair in applied.windows(2) {
        assert!(pair[1] < pair[0], "deltas should strictly decrease");
        assert!(pair[1] >= pair[0] * 0.95 - 1.0);
    }
    assert_eq!(*applied.last().unwrap(), 1.0);
}

#[test]
fn test_horizontal_wheel_applied_once() {
    let mut view = view_with(Size::new(2000.0, 2000.0));
    view.wheel(&WheelEvent::new(0.0, 40.0, 0.0));
    view.advance_to(10.0);
    assert_eq!(view.current_offset(), Point::new(40.0, 0.0));

    view.advance_to(500.0);
    assert_eq!(view.current_offset(), Point::new(40.0, 0.0));
    assert!(view.next_due().is_none());
}

#[test]
fn test_wheel_events_accumulate_into_one_drain() {
    let mut config = ScrollConfig::default();
    config.wheel.momentum = false;
    let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
    let mut view = ScrollView::new(geometry, config);

    view.wheel(&WheelEvent::new(0.0, 0.0, 30.0));
    view.wheel(&WheelEvent::new(4.0, 0.0, 20.0));
    view.wheel(&WheelEvent::new(8.0, 5.0, 0.0));
    view.advance_to(9.0);
    assert_eq!(view.current_offset(), Point::ZERO);

    view.advance_to(10.0);
    assert_eq!(view.current_offset(), Point::new(5.0, 50.0));
    assert!(view.next_due().is_none());
}

#[test]
fn test_resist_properties() {
    let (c, a) = (0.998, 320.0);
    for value in [0.0, 10.0, 999.0, 1000.0] {
        assert_eq!(resist(value, 0.0, 1000.0, c, a), value);
    }

    let mut previous = 1000.0;
    for step in 1..=400 {
        let value = 1000.0 + step as f32 * 5.0;
        let resisted = resist(value, 0.0, 1000.0, c, a);
        assert!(resisted > previous);
        assert!(resisted < 1000.0 + a);
        previous = resisted;
    }
}

#[test]
fn test_bounce_pulls_toward_edge() {
    let velocity = bounce(0.0, -50.0, 0.0, 1500.0, 0.05, 0.08);
    assert!(velocity > 0.0);
    assert!((velocity - 50.0 * 0.08).abs() < 1e-5);
}

#[test]
fn test_notifications_serialize_to_json() {
    let mut view = view_with(Size::new(2000.0, 2000.0));
    view.scroll_to(Some(120.0), None);
    view.end_turn();

    let notes = view.take_notifications();
    let json = serde_json::to_value(&notes).unwrap();
    let kinds: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(
        kinds,
        vec!["offset_changed", "transform_changed", "content_frame_invalidated"]
    );
    assert!(matches!(
        notes[0],
        ScrollNotification::OffsetChanged { offset } if offset == Point::new(120.0, 0.0)
    ));
}

#[test]
fn test_config_file_drives_the_view() {
    let path = std::env::temp_dir().join(format!("glide-config-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "[wheel]\nmomentum = false\n\n[scrollers.horizontal]\npresent = false\n",
    )
    .unwrap();

    let config = ScrollConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.physics, ScrollConfig::default().physics);

    let geometry = FixedGeometry::new(Size::new(500.0, 500.0), Size::new(2000.0, 2000.0));
    let mut view = ScrollView::new(geometry, config);
    view.wheel(&WheelEvent::new(0.0, 30.0, 30.0));
    view.advance_to(100.0);

    assert_eq!(view.current_offset(), Point::new(0.0, 30.0));
    assert!(view.next_due().is_none());
}
