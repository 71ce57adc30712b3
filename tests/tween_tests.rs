// Host-side tests for eased one-shot transitions.

use glam::Vec2;
use scroll_planes::core::{Animated, CubicBezier, Tween};

const EASE: CubicBezier = CubicBezier::new(0.4, 0.0, 0.2, 1.0);

#[test]
fn bezier_hits_both_endpoints() {
    assert_eq!(EASE.apply(0.0), 0.0);
    assert_eq!(EASE.apply(1.0), 1.0);
    // Out-of-range progress is clamped
    assert_eq!(EASE.apply(-0.5), 0.0);
    assert_eq!(EASE.apply(2.0), 1.0);
}

#[test]
fn bezier_is_monotone_and_bounded() {
    let mut last = 0.0;
    for i in 0..=100 {
        let y = EASE.apply(i as f32 / 100.0);
        assert!((0.0..=1.0).contains(&y), "{} out of range at {}", y, i);
        assert!(y + 1e-5 >= last, "not monotone at {}", i);
        last = y;
    }
}

#[test]
fn bezier_front_loads_progress() {
    // Decelerating curve: more than half done at the halfway mark
    assert!(EASE.apply(0.5) > 0.5);
    let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
    assert!((linear.apply(0.3) - 0.3).abs() < 1e-3);
}

#[test]
fn tween_samples_from_and_to() {
    let t = Tween::new(0.0_f32, 1.0, 10.0, 0.6, EASE);
    assert_eq!(t.sample(9.0), 0.0);
    assert_eq!(t.sample(10.0), 0.0);
    assert_eq!(t.sample(10.7), 1.0);
    assert!(t.is_finished(11.0));
    assert!(!t.is_finished(10.3));
    assert_eq!(t.to(), 1.0);
}

#[test]
fn zero_duration_tween_finishes_immediately() {
    let t = Tween::new(Vec2::ZERO, Vec2::ONE, 0.0, 0.0, EASE);
    assert_eq!(t.sample(0.0), Vec2::ONE);
    assert!(t.is_finished(0.0));
}

#[test]
fn retargeting_starts_from_the_reached_value() {
    let mut a = Animated::new(0.0_f32);
    a.animate_to(1.0, 0.0, 0.6, EASE);
    let mid = a.advance(0.3);
    assert!(mid > 0.0 && mid < 1.0);

    a.animate_to(0.0, 0.3, 0.6, EASE);
    // No jump at the moment of retargeting
    assert!((a.advance(0.3) - mid).abs() < 1e-6);

    let mut last = mid;
    for i in 1..=12 {
        let v = a.advance(0.3 + i as f64 * 0.05);
        assert!(v <= last + 1e-6);
        last = v;
    }
    assert_eq!(a.value(), 0.0);
    assert!(!a.is_animating());
}

#[test]
fn set_cancels_a_running_tween() {
    let mut a = Animated::new(Vec2::splat(0.5));
    a.animate_to(Vec2::ZERO, 0.0, 0.6, EASE);
    assert!(a.is_animating());
    a.set(Vec2::new(0.2, 0.8));
    assert!(!a.is_animating());
    assert_eq!(a.advance(0.3), Vec2::new(0.2, 0.8));
}
