//! Perspective camera looking down -Z at the plane the meshes live on.
//!
//! The camera is platform-free; the renderer uploads
//! [`Camera::view_projection`] once per frame.

use super::constants::{
    CAMERA_ZFAR, CAMERA_ZNEAR, DOCUMENT_CAMERA_DISTANCE, VIEWPORT_CAMERA_DISTANCE,
    VIEWPORT_CAMERA_FOV_DEG,
};
use super::mapper::{MappingMode, ScreenSize, ViewportSize};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera for `mode` at `distance` from the mesh plane. Projection
    /// parameters are filled in by [`Camera::fit`].
    pub fn for_mode(mode: MappingMode, screen: ScreenSize) -> Self {
        let distance = match mode {
            MappingMode::Document => DOCUMENT_CAMERA_DISTANCE,
            MappingMode::ViewportRatio => VIEWPORT_CAMERA_DISTANCE,
        };
        let mut camera = Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: VIEWPORT_CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        };
        camera.fit(mode, screen);
        camera
    }

    pub fn distance(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// Re-derive aspect (and, in document mode, the field of view) for a new
    /// screen size. Returns the world-space extents visible at z = 0.
    pub fn fit(&mut self, mode: MappingMode, screen: ScreenSize) -> ViewportSize {
        if screen.is_degenerate() {
            return ViewportSize::ZERO;
        }
        self.aspect = screen.aspect();
        if mode == MappingMode::Document {
            self.fovy_radians = document_fovy(screen.height, self.distance());
        }
        viewport_extents(self.fovy_radians, self.aspect, self.distance())
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Vertical FOV under which the visible height at `distance` is exactly
/// `screen_height` world units.
#[inline]
pub fn document_fovy(screen_height: f32, distance: f32) -> f32 {
    2.0 * (screen_height / 2.0 / distance).atan()
}

/// World-space size visible at `distance` for a vertical FOV and aspect.
#[inline]
pub fn viewport_extents(fovy_radians: f32, aspect: f32, distance: f32) -> ViewportSize {
    let height = 2.0 * (fovy_radians / 2.0).tan() * distance;
    let size = ViewportSize {
        width: height * aspect,
        height,
    };
    if size.width.is_finite() && size.height.is_finite() {
        size
    } else {
        ViewportSize::ZERO
    }
}
