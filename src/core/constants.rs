// Shared tuning constants for the scroll/pointer pipeline.

// Smoothing
pub const POINTER_LERP: f32 = 0.05; // global cursor damping per tick
pub const POINTER_SETTLE_DISTANCE: f32 = 0.001; // tracker goes idle below this
pub const HOVER_LERP: f32 = 0.5; // per-entity hover position damping per frame
pub const HOVER_REST: [f32; 2] = [0.5, 0.5]; // hover target after pointer leave
pub const POINTER_REST: [f32; 2] = [0.0, 0.0]; // initial global cursor

// Hover transitions
pub const HOVER_TWEEN_SEC: f32 = 0.6;
pub const HOVER_EASE: [f32; 4] = [0.4, 0.0, 0.2, 1.0]; // cubic-bezier control points

// Scroll
pub const SCROLL_VELOCITY_SCALE: f32 = 0.2; // visual damping of velocity uniform
pub const INERTIA_LERP: f32 = 0.1; // per-frame lerp at the reference rate
pub const INERTIA_REFERENCE_FPS: f32 = 60.0;
pub const INERTIA_SETTLE_PX: f32 = 0.5;

// Camera
pub const DOCUMENT_CAMERA_DISTANCE: f32 = 1.0; // 1 world unit == 1 CSS px at z = 0
pub const VIEWPORT_CAMERA_DISTANCE: f32 = 5.0;
pub const VIEWPORT_CAMERA_FOV_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;

// Output
pub const MAX_PIXEL_RATIO: f64 = 2.0;
