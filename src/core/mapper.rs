//! DOM layout → world-space transforms.
//!
//! Two mappings are supported:
//!
//! - [`MappingMode::Document`]: one world unit is one CSS pixel; the origin
//!   sits at the viewport centre and scrolling is a pure Y translation.
//! - [`MappingMode::ViewportRatio`]: sizes are expressed as a fraction of the
//!   camera's visible extents at z = 0.
//!
//! Every function here is a pure recompute from the DOM source of truth;
//! nothing is interpolated, so meshes cannot drift from their elements.

use super::camera::Camera;
use glam::{Vec2, Vec3, Vec4};

/// Window size in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite extents (mid-reflow, minimized window).
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn aspect(&self) -> f32 {
        if self.is_degenerate() {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// World-space extents visible at the mesh plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Element box in CSS pixels. `top`/`left` are document-relative (offset
/// layout), so the on-screen top is `top - scroll`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DomRect {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl DomRect {
    pub fn new(top: f32, left: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.left.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }
}

/// Layout snapshot of one image element and its parent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    pub rect: DomRect,
    pub parent: DomRect,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MappingMode {
    #[default]
    Document,
    ViewportRatio,
}

impl MappingMode {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "document" | "px" => Some(Self::Document),
            "viewport" | "ratio" => Some(Self::ViewportRatio),
            _ => None,
        }
    }
}

/// Mesh placement derived from layout. Never stored authoritatively.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaTransform {
    pub position: Vec3,
    pub scale: Vec2,
}

impl MediaTransform {
    /// Zero-scale placement used while layout is degenerate.
    pub const INACTIVE: Self = Self {
        position: Vec3::ZERO,
        scale: Vec2::ZERO,
    };

    pub fn is_active(&self) -> bool {
        self.scale.x > 0.0
            && self.scale.y > 0.0
            && self.scale.is_finite()
            && self.position.is_finite()
    }
}

impl Default for MediaTransform {
    fn default() -> Self {
        Self::INACTIVE
    }
}

#[inline]
pub fn document_scale(rect: &DomRect) -> Vec2 {
    Vec2::new(rect.width.max(0.0), rect.height.max(0.0))
}

#[inline]
pub fn document_position(rect: &DomRect, screen: ScreenSize, scroll: f32) -> Vec3 {
    Vec3::new(
        rect.left - screen.width / 2.0 + rect.width / 2.0,
        scroll - rect.top + screen.height / 2.0 - rect.height / 2.0,
        0.0,
    )
}

#[inline]
pub fn viewport_scale(viewport: ViewportSize, parent: &DomRect, screen: ScreenSize) -> Vec2 {
    Vec2::new(
        (viewport.width * parent.width / screen.width).max(0.0),
        (viewport.height * parent.height / screen.height).max(0.0),
    )
}

/// Left/top edge anchored position. The vertical term reuses the horizontal
/// px → world ratio.
#[inline]
pub fn viewport_position(
    rect: &DomRect,
    scale: Vec2,
    viewport: ViewportSize,
    screen: ScreenSize,
    scroll: f32,
) -> Vec3 {
    let ratio = viewport.width / screen.width;
    Vec3::new(
        -viewport.width / 2.0 + scale.x / 2.0 + rect.left * ratio,
        viewport.height / 2.0 - scale.y / 2.0 - (rect.top - scroll) * ratio,
        0.0,
    )
}

/// Full recompute, used on resize and at creation.
pub fn map(
    mode: MappingMode,
    bounds: &ElementBounds,
    screen: ScreenSize,
    viewport: ViewportSize,
    scroll: f32,
) -> MediaTransform {
    if screen.is_degenerate() || !bounds.rect.is_finite() || !scroll.is_finite() {
        return MediaTransform::INACTIVE;
    }
    let transform = match mode {
        MappingMode::Document => MediaTransform {
            position: document_position(&bounds.rect, screen, scroll),
            scale: document_scale(&bounds.rect),
        },
        MappingMode::ViewportRatio => {
            if viewport.is_degenerate() || !bounds.parent.is_finite() {
                return MediaTransform::INACTIVE;
            }
            let scale = viewport_scale(viewport, &bounds.parent, screen);
            MediaTransform {
                position: viewport_position(&bounds.rect, scale, viewport, screen, scroll),
                scale,
            }
        }
    };
    if transform.is_active() {
        transform
    } else {
        MediaTransform::INACTIVE
    }
}

/// Position-only recompute for a scroll sample; `scale` is kept since it
/// does not depend on scroll.
pub fn reposition(
    mode: MappingMode,
    bounds: &ElementBounds,
    scale: Vec2,
    screen: ScreenSize,
    viewport: ViewportSize,
    scroll: f32,
) -> MediaTransform {
    if screen.is_degenerate() || !bounds.rect.is_finite() || !scroll.is_finite() {
        return MediaTransform::INACTIVE;
    }
    let position = match mode {
        MappingMode::Document => document_position(&bounds.rect, screen, scroll),
        MappingMode::ViewportRatio => {
            if viewport.is_degenerate() {
                return MediaTransform::INACTIVE;
            }
            viewport_position(&bounds.rect, scale, viewport, screen, scroll)
        }
    };
    let transform = MediaTransform { position, scale };
    if transform.is_active() {
        transform
    } else {
        MediaTransform::INACTIVE
    }
}

/// Project a mesh's corners through `camera` back to client-space CSS
/// pixels (relative to the top-left of the window).
pub fn project_to_client_rect(
    transform: &MediaTransform,
    camera: &Camera,
    screen: ScreenSize,
) -> DomRect {
    let view_proj = camera.view_projection();
    let half = transform.scale / 2.0;
    let to_px = |corner: Vec3| -> Vec2 {
        let clip = view_proj * Vec4::new(corner.x, corner.y, corner.z, 1.0);
        let ndc = clip.truncate() / clip.w;
        Vec2::new(
            (ndc.x + 1.0) / 2.0 * screen.width,
            (1.0 - ndc.y) / 2.0 * screen.height,
        )
    };
    let top_left = to_px(transform.position + Vec3::new(-half.x, half.y, 0.0));
    let bottom_right = to_px(transform.position + Vec3::new(half.x, -half.y, 0.0));
    DomRect {
        top: top_left.y,
        left: top_left.x,
        width: bottom_right.x - top_left.x,
        height: bottom_right.y - top_left.y,
    }
}
