use super::constants::{INERTIA_LERP, INERTIA_REFERENCE_FPS, INERTIA_SETTLE_PX};
use super::smoothing::lerp;

/// One scroll reading per frame: smoothed cumulative offset and its rate of
/// change (px per frame).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollSample {
    pub scroll: f32,
    pub velocity: f32,
}

/// Per-frame supplier of scroll samples. `advance` is called exactly once
/// per rendered frame, before the sample is read.
pub trait ScrollSource {
    fn advance(&mut self, timestamp_ms: f64) -> ScrollSample;
    fn sample(&self) -> ScrollSample;
}

/// Smoothed scroll offset chasing a wheel-driven target.
///
/// Damping is frame-rate independent: `lerp(current, target, 1 - e^(-λ·dt))`
/// with `λ = INERTIA_LERP · 60`.
#[derive(Clone, Debug)]
pub struct InertialScroll {
    current: f32,
    target: f32,
    // Offset reported by the previous `advance`; velocity is measured from it
    sampled: f32,
    velocity: f32,
    limit: f32,
    lambda: f32,
    last_ms: Option<f64>,
    animating: bool,
}

impl InertialScroll {
    pub fn new(limit: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            sampled: 0.0,
            velocity: 0.0,
            limit: limit.max(0.0),
            lambda: INERTIA_LERP * INERTIA_REFERENCE_FPS,
            last_ms: None,
            animating: false,
        }
    }

    /// Maximum scroll offset (document height minus window height).
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = if limit.is_finite() { limit.max(0.0) } else { 0.0 };
        self.target = self.target.clamp(0.0, self.limit);
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.scroll_to(self.target + delta);
        }
    }

    pub fn scroll_to(&mut self, target: f32) {
        if !target.is_finite() {
            return;
        }
        self.target = target.clamp(0.0, self.limit);
        self.animating = self.target != self.current;
    }

    /// Adopt an externally applied offset (scrollbar drag, keyboard, touch)
    /// without animating toward it. The jump still counts toward the next
    /// sample's velocity.
    pub fn jump_to(&mut self, offset: f32) {
        if !offset.is_finite() {
            return;
        }
        let offset = offset.clamp(0.0, self.limit);
        self.current = offset;
        self.target = offset;
        self.animating = false;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn target(&self) -> f32 {
        self.target
    }
}

impl ScrollSource for InertialScroll {
    fn advance(&mut self, timestamp_ms: f64) -> ScrollSample {
        let dt_sec = match self.last_ms {
            Some(last) => ((timestamp_ms - last) / 1000.0).clamp(0.0, 0.1) as f32,
            None => 1.0 / INERTIA_REFERENCE_FPS,
        };
        self.last_ms = Some(timestamp_ms);

        let previous = self.sampled;
        if self.animating {
            self.current = lerp(self.current, self.target, 1.0 - (-self.lambda * dt_sec).exp());
            if (self.target - self.current).abs() < INERTIA_SETTLE_PX {
                self.current = self.target;
                self.animating = false;
            }
        }
        self.velocity = self.current - previous;
        self.sampled = self.current;
        self.sample()
    }

    fn sample(&self) -> ScrollSample {
        ScrollSample {
            scroll: self.current,
            velocity: self.velocity,
        }
    }
}
