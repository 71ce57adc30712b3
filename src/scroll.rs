use crate::core::{InertialScroll, ScrollSample, ScrollSource};
use crate::dom;
use web_sys as web;

/// Wheel-driven smooth scrolling for the window.
///
/// Wheel deltas move the target (see `events::wire_wheel`); every frame the
/// smoothed offset is written back with `scrollTo` so the DOM and the planes
/// see the same value. Native scrolls (scrollbar, keyboard, find-in-page)
/// are adopted as-is when no wheel animation is running.
pub struct WindowScroll {
    window: web::Window,
    inertia: InertialScroll,
}

impl WindowScroll {
    pub fn new(window: web::Window) -> Self {
        let limit = dom::scroll_limit(&window);
        Self {
            window,
            inertia: InertialScroll::new(limit),
        }
    }

    pub fn scroll_by(&mut self, delta_px: f32) {
        self.inertia.set_limit(dom::scroll_limit(&self.window));
        self.inertia.scroll_by(delta_px);
    }

    /// Jump to the top without animating.
    pub fn reset(&mut self) {
        self.window.scroll_to_with_x_and_y(0.0, 0.0);
        self.inertia.jump_to(0.0);
    }
}

impl ScrollSource for WindowScroll {
    fn advance(&mut self, timestamp_ms: f64) -> ScrollSample {
        self.inertia.set_limit(dom::scroll_limit(&self.window));
        if !self.inertia.is_animating() {
            let native = dom::scroll_offset(&self.window);
            if (native - self.inertia.sample().scroll).abs() >= 1.0 {
                self.inertia.jump_to(native);
            }
        }
        let was_animating = self.inertia.is_animating();
        let sample = self.inertia.advance(timestamp_ms);
        if was_animating {
            self.window
                .scroll_to_with_x_and_y(0.0, sample.scroll as f64);
        }
        sample
    }

    fn sample(&self) -> ScrollSample {
        self.inertia.sample()
    }
}
