/// Browser-side wiring constants.
///
/// Tuning for the smoothing/mapping pipeline lives in `core::constants`;
/// these cover DOM lookup and presentation only.
// Element lookup
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
pub const MEDIA_SELECTOR: &str = "img";

// Canvas data attributes read into `SceneConfig`
pub const ATTR_MAPPING: &str = "mapping"; // data-mapping="document|viewport"
pub const ATTR_DEBUG: &str = "debug"; // data-debug (present = on)
pub const ATTR_HOVER: &str = "hover"; // data-hover="off"
pub const ATTR_VELOCITY: &str = "velocity"; // data-velocity="off"

// Presentation: transparent so the page shows through
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::TRANSPARENT;

// Wheel deltas in line mode are scaled to pixels
pub const WHEEL_LINE_PX: f32 = 16.0;
