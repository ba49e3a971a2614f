//! Unit tests for world/screen transform math.

use crate::helpers::assert_close;
use funnel_canvas::constants::{MAX_SCALE, MIN_SCALE};
use funnel_canvas::input::coords::{wheel_zoom_factor, Point, ScaleBounds, Size, Transform};

#[test]
fn test_default_transform() {
    assert_eq!(Transform::default(), Transform::new(400.0, 150.0, 1.0));
}

#[test]
fn test_screen_to_world() {
    let t = Transform::new(400.0, 150.0, 2.0);
    assert_eq!(t.to_world(Point::new(400.0, 150.0)), Point::ZERO);
    assert_eq!(t.to_world(Point::new(600.0, 250.0)), Point::new(100.0, 50.0));
    assert_eq!(t.to_screen(Point::new(100.0, 50.0)), Point::new(600.0, 250.0));
}

#[test]
fn test_round_trip_at_many_scales() {
    for scale in [MIN_SCALE, 0.25, 0.5, 1.0, 1.75, MAX_SCALE] {
        let t = Transform::new(-123.0, 45.5, scale);
        let screen = Point::new(777.0, -31.0);
        let back = t.to_screen(t.to_world(screen));
        assert_close(back.x, screen.x);
        assert_close(back.y, screen.y);
    }
}

#[test]
fn test_zoom_at_current_origin() {
    let t = Transform::new(400.0, 150.0, 1.0);
    let zoomed = t.zoom_at(Point::new(400.0, 150.0), 1.5, ScaleBounds::default());
    assert_eq!(zoomed.scale, 1.5);
    assert_eq!(zoomed.x, 400.0);
    assert_eq!(zoomed.y, 150.0);
}

#[test]
fn test_zoom_keeps_world_point_under_cursor() {
    let t = Transform::new(400.0, 150.0, 1.0);
    let cursor = Point::new(900.0, 420.0);
    let before = t.to_world(cursor);

    let zoomed = t.zoom_at(cursor, 0.6, ScaleBounds::default());
    let after = zoomed.to_world(cursor);

    assert_close(before.x, after.x);
    assert_close(before.y, after.y);
}

#[test]
fn test_zoom_clamps_both_ends() {
    let bounds = ScaleBounds::default();
    let t = Transform::IDENTITY;
    assert_eq!(t.zoom_at(Point::ZERO, 100.0, bounds).scale, MAX_SCALE);
    assert_eq!(t.zoom_at(Point::ZERO, 0.001, bounds).scale, MIN_SCALE);
}

#[test]
fn test_zoom_at_limit_is_stable() {
    let t = Transform::new(12.0, 34.0, MAX_SCALE);
    let zoomed = t.zoom_at(Point::new(200.0, 200.0), 2.0, ScaleBounds::default());
    assert_eq!(zoomed, t);
}

#[test]
fn test_custom_bounds() {
    let bounds = ScaleBounds { min: 0.5, max: 2.0 };
    assert_eq!(bounds.clamp(0.1), 0.5);
    assert_eq!(bounds.clamp(5.0), 2.0);
    assert!(bounds.contains(1.0));
    assert!(!bounds.contains(2.5));
}

#[test]
fn test_wheel_factor_matches_exponential() {
    assert_close(wheel_zoom_factor(-100.0, 0.005), 0.5f64.exp());
    assert_close(wheel_zoom_factor(100.0, 0.005), (-0.5f64).exp());
    // Opposite deltas cancel
    assert_close(wheel_zoom_factor(40.0, 0.005) * wheel_zoom_factor(-40.0, 0.005), 1.0);
}

#[test]
fn test_size_center() {
    assert_eq!(Size::new(1280.0, 800.0).center(), Point::new(640.0, 400.0));
}

#[test]
fn test_zoom_percent_display() {
    assert_eq!(Transform::new(0.0, 0.0, 1.0).zoom_percent(), 100);
    assert_eq!(Transform::new(0.0, 0.0, 0.1).zoom_percent(), 10);
    assert_eq!(Transform::new(0.0, 0.0, 3.0).zoom_percent(), 300);
}
