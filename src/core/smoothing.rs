use glam::Vec2;

/// One damping step from `current` toward `target`.
///
/// `factor` is the fraction of the remaining distance covered, in `(0, 1]`.
#[inline]
pub fn lerp(current: f32, target: f32, factor: f32) -> f32 {
    current + (target - current) * factor
}

/// A trailing value that chases a target one [`lerp`] step at a time.
///
/// `current` only moves through [`DampedVec2::step`]; input handlers write
/// `target` and nothing else.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DampedVec2 {
    pub current: Vec2,
    pub target: Vec2,
}

impl DampedVec2 {
    pub fn new(at: Vec2) -> Self {
        Self {
            current: at,
            target: at,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn step(&mut self, factor: f32) {
        self.current.x = lerp(self.current.x, self.target.x, factor);
        self.current.y = lerp(self.current.y, self.target.y, factor);
    }

    /// Euclidean distance still to cover.
    pub fn remaining(&self) -> f32 {
        self.current.distance(self.target)
    }
}

impl Default for DampedVec2 {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}
