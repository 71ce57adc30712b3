//! Duration-based one-shot transitions.
//!
//! Continuous tracking goes through [`super::smoothing`]; this module covers
//! the discrete hover fade in/out, driven by a cubic-bezier ease.

use glam::Vec2;

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl CubicBezier {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub const fn from_array(p: [f32; 4]) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }

    #[inline]
    fn axis(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    #[inline]
    fn axis_slope(p1: f32, p2: f32, t: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Curve parameter whose x equals `x`. Newton first, bisection if the
    /// slope flattens out.
    fn solve_t(&self, x: f32) -> f32 {
        let mut t = x;
        for _ in 0..8 {
            let err = Self::axis(self.x1, self.x2, t) - x;
            if err.abs() < 1e-6 {
                return t;
            }
            let slope = Self::axis_slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        t = x;
        for _ in 0..32 {
            let cx = Self::axis(self.x1, self.x2, t);
            if (cx - x).abs() < 1e-6 {
                break;
            }
            if cx < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        t
    }

    /// Eased progress for linear progress `x` in `[0, 1]`.
    pub fn apply(&self, x: f32) -> f32 {
        let x = x.clamp(0.0, 1.0);
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        Self::axis(self.y1, self.y2, self.solve_t(x))
    }
}

pub trait Tweenable: Copy {
    fn mix(from: Self, to: Self, t: f32) -> Self;
}

impl Tweenable for f32 {
    fn mix(from: Self, to: Self, t: f32) -> Self {
        from + (to - from) * t
    }
}

impl Tweenable for Vec2 {
    fn mix(from: Self, to: Self, t: f32) -> Self {
        from.lerp(to, t)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Tween<T: Tweenable> {
    from: T,
    to: T,
    start_sec: f64,
    duration_sec: f32,
    ease: CubicBezier,
}

impl<T: Tweenable> Tween<T> {
    pub fn new(from: T, to: T, start_sec: f64, duration_sec: f32, ease: CubicBezier) -> Self {
        Self {
            from,
            to,
            start_sec,
            duration_sec,
            ease,
        }
    }

    fn progress(&self, now_sec: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        (((now_sec - self.start_sec) as f32) / self.duration_sec).clamp(0.0, 1.0)
    }

    /// Value at `now_sec`. Eased progress is clamped so the result never
    /// leaves the `from..=to` span.
    pub fn sample(&self, now_sec: f64) -> T {
        let eased = self.ease.apply(self.progress(now_sec)).clamp(0.0, 1.0);
        T::mix(self.from, self.to, eased)
    }

    pub fn is_finished(&self, now_sec: f64) -> bool {
        self.progress(now_sec) >= 1.0
    }

    pub fn to(&self) -> T {
        self.to
    }
}

/// A property driven by at most one tween at a time.
///
/// Retargeting replaces the running tween, starting from the value it has
/// reached, so overlapping requests never jump or overshoot.
#[derive(Clone, Copy, Debug)]
pub struct Animated<T: Tweenable> {
    value: T,
    tween: Option<Tween<T>>,
}

impl<T: Tweenable> Animated<T> {
    pub fn new(value: T) -> Self {
        Self { value, tween: None }
    }

    pub fn animate_to(&mut self, to: T, now_sec: f64, duration_sec: f32, ease: CubicBezier) {
        let from = self.advance(now_sec);
        self.tween = Some(Tween::new(from, to, now_sec, duration_sec, ease));
    }

    /// Jump to `value`, dropping any running tween.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.tween = None;
    }

    pub fn advance(&mut self, now_sec: f64) -> T {
        if let Some(tween) = self.tween {
            self.value = tween.sample(now_sec);
            if tween.is_finished(now_sec) {
                self.tween = None;
            }
        }
        self.value
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}
