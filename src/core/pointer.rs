use super::constants::{POINTER_LERP, POINTER_REST, POINTER_SETTLE_DISTANCE};
use super::smoothing::DampedVec2;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackingState {
    Idle,
    Tracking,
}

/// Global cursor position in window-relative `[0, 1]` coordinates, damped
/// toward the latest pointer sample.
///
/// Moves only while `Tracking`; converging below the settle distance drops
/// back to `Idle` until the next pointer sample arrives.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    pos: DampedVec2,
    state: TrackingState,
    factor: f32,
}

impl PointerTracker {
    pub fn new(start: Vec2, factor: f32) -> Self {
        Self {
            pos: DampedVec2::new(start),
            state: TrackingState::Idle,
            factor,
        }
    }

    /// Record a normalized pointer sample. Samples arriving between ticks
    /// coalesce: only the latest target survives.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.pos.set_target(Vec2::new(x, y));
        self.state = TrackingState::Tracking;
    }

    /// Advance one smoothing step. Returns `true` while another tick is wanted.
    pub fn tick(&mut self) -> bool {
        if self.state == TrackingState::Idle {
            return false;
        }
        self.pos.step(self.factor);
        if self.pos.remaining() < POINTER_SETTLE_DISTANCE {
            self.state = TrackingState::Idle;
            return false;
        }
        true
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == TrackingState::Tracking
    }

    pub fn current(&self) -> Vec2 {
        self.pos.current
    }

    pub fn target(&self) -> Vec2 {
        self.pos.target
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Vec2::from_array(POINTER_REST), POINTER_LERP)
    }
}
