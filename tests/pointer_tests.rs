// Host-side tests for pointer offset tracking.

use hero_core::constants::POINTER_SCALE;
use hero_core::{PointerOffset, PointerTracker, Viewport};

fn tracker(width: f64, height: f64) -> PointerTracker {
    PointerTracker::new(&Viewport::new(width, height, 1.0), POINTER_SCALE)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn starts_centered() {
    assert_eq!(tracker(800.0, 600.0).offset(), PointerOffset::default());
}

#[test]
fn offset_is_scaled_distance_from_center() {
    let mut t = tracker(800.0, 600.0);
    t.on_pointer_move(600.0, 100.0);
    let o = t.offset();
    assert!(approx(o.x, 10.0), "{o:?}");
    assert!(approx(o.y, -10.0), "{o:?}");

    t.on_pointer_move(400.0, 300.0);
    assert_eq!(t.offset(), PointerOffset { x: 0.0, y: 0.0 });
}

#[test]
fn offsets_are_not_clamped() {
    let mut t = tracker(800.0, 600.0);
    t.on_pointer_move(-5000.0, 10_300.0);
    let o = t.offset();
    assert!(approx(o.x, -270.0), "{o:?}");
    assert!(approx(o.y, 500.0), "{o:?}");
}

#[test]
fn last_move_wins() {
    let mut t = tracker(1000.0, 1000.0);
    t.on_pointer_move(0.0, 0.0);
    t.on_pointer_move(1000.0, 1000.0);
    t.on_pointer_move(700.0, 500.0);
    let o = t.offset();
    assert!(approx(o.x, 10.0));
    assert!(approx(o.y, 0.0));
}

#[test]
fn center_comes_from_the_construction_viewport() {
    let mut t = tracker(1000.0, 500.0);
    t.on_pointer_move(500.0, 250.0);
    assert_eq!(t.offset(), PointerOffset::default());
}

#[test]
fn device_pixel_ratio_does_not_affect_offset() {
    let mut a = PointerTracker::new(&Viewport::new(800.0, 600.0, 1.0), POINTER_SCALE);
    let mut b = PointerTracker::new(&Viewport::new(800.0, 600.0, 3.0), POINTER_SCALE);
    a.on_pointer_move(123.0, 456.0);
    b.on_pointer_move(123.0, 456.0);
    assert_eq!(a.offset(), b.offset());
}
