use super::constants::{HOVER_EASE, HOVER_LERP, HOVER_REST, HOVER_TWEEN_SEC, SCROLL_VELOCITY_SCALE};
use super::inertia::ScrollSample;
use super::mapper::{self, ElementBounds, MappingMode, MediaTransform, ScreenSize, ViewportSize};
use super::smoothing::DampedVec2;
use super::tween::{Animated, CubicBezier};
use glam::Vec2;

/// Read-only view of the DOM element a [`Media`] mirrors.
pub trait ElementLayout {
    /// Current layout of the element and its parent, in CSS pixels.
    fn bounds(&self) -> ElementBounds;
    /// Intrinsic pixel size of the image.
    fn natural_size(&self) -> Vec2;
    /// Human-readable identifier for logs (usually the image URL).
    fn source(&self) -> String;
}

/// Optional per-entity behaviours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaCapabilities {
    pub hover_tracking: bool,
    pub scroll_velocity: bool,
    pub wireframe_debug: bool,
}

impl Default for MediaCapabilities {
    fn default() -> Self {
        Self {
            hover_tracking: true,
            scroll_velocity: true,
            wireframe_debug: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

/// Immutable snapshot of the shared inputs every entity reads in a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneContext {
    pub screen: ScreenSize,
    pub viewport: ViewportSize,
    pub scroll: ScrollSample,
    pub pointer: Vec2,
}

/// Shader parameters for one plane. Layout matches `Media` in `media.wgsl`
/// (after the model matrix).
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MediaUniforms {
    pub image_sizes: [f32; 2],
    pub plane_sizes: [f32; 2],
    pub resolution: [f32; 2],
    pub cursor: [f32; 2],
    pub hover: [f32; 2],
    pub time: f32,
    pub scroll_velocity: f32,
    pub mouse_enter: f32,
    pub debug: f32,
}

/// Everything the renderer needs to draw one plane this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshDraw {
    pub mesh: MeshId,
    pub transform: MediaTransform,
    pub uniforms: MediaUniforms,
}

/// One page image mirrored as a textured plane.
///
/// Only this entity's transform and uniforms are ever written; the element
/// is read, never mutated.
pub struct Media<L> {
    element: L,
    mesh: Option<MeshId>,
    mode: MappingMode,
    caps: MediaCapabilities,
    transform: MediaTransform,
    scroll: f32,
    scroll_velocity: f32,
    hover: DampedVec2,
    hover_target: Animated<Vec2>,
    mouse_enter: Animated<f32>,
    hover_lerp: f32,
    ease: CubicBezier,
    uniforms: MediaUniforms,
}

impl<L: ElementLayout> Media<L> {
    pub fn new(
        element: L,
        mesh: Option<MeshId>,
        mode: MappingMode,
        caps: MediaCapabilities,
        ctx: &SceneContext,
    ) -> Self {
        let natural = element.natural_size();
        let rest = Vec2::from_array(HOVER_REST);
        let mut media = Self {
            element,
            mesh,
            mode,
            caps,
            transform: MediaTransform::INACTIVE,
            scroll: ctx.scroll.scroll,
            scroll_velocity: 0.0,
            hover: DampedVec2::new(rest),
            hover_target: Animated::new(rest),
            mouse_enter: Animated::new(0.0),
            hover_lerp: HOVER_LERP,
            ease: CubicBezier::from_array(HOVER_EASE),
            uniforms: MediaUniforms {
                image_sizes: natural.to_array(),
                hover: HOVER_REST,
                cursor: ctx.pointer.to_array(),
                debug: if caps.wireframe_debug { 1.0 } else { 0.0 },
                ..Default::default()
            },
        };
        media.on_resize(ctx);
        media
    }

    pub fn with_hover_lerp(mut self, factor: f32) -> Self {
        self.hover_lerp = factor;
        self
    }

    /// Full transform recompute; layout may have changed shape. The hover
    /// target recentres since the old offset refers to the old box.
    pub fn on_resize(&mut self, ctx: &SceneContext) {
        if self.caps.hover_tracking {
            self.hover_target.set(Vec2::from_array(HOVER_REST));
        }
        self.remap(ctx);
    }

    fn remap(&mut self, ctx: &SceneContext) {
        self.transform = mapper::map(
            self.mode,
            &self.element.bounds(),
            ctx.screen,
            ctx.viewport,
            self.scroll,
        );
        self.uniforms.plane_sizes = self.transform.scale.to_array();
        self.uniforms.resolution = [ctx.screen.width, ctx.screen.height];
    }

    /// Position-only recompute for a new scroll sample.
    pub fn on_scroll(&mut self, ctx: &SceneContext) {
        self.scroll = ctx.scroll.scroll;
        if self.caps.scroll_velocity {
            self.scroll_velocity = ctx.scroll.velocity * SCROLL_VELOCITY_SCALE;
        }
        if !self.transform.is_active() {
            // Layout was degenerate last time; retry the full mapping.
            self.remap(ctx);
            return;
        }
        self.transform = mapper::reposition(
            self.mode,
            &self.element.bounds(),
            self.transform.scale,
            ctx.screen,
            ctx.viewport,
            self.scroll,
        );
    }

    pub fn on_pointer_enter(&mut self, now_sec: f64) {
        if !self.caps.hover_tracking {
            return;
        }
        self.mouse_enter
            .animate_to(1.0, now_sec, HOVER_TWEEN_SEC, self.ease);
    }

    pub fn on_pointer_leave(&mut self, now_sec: f64) {
        if !self.caps.hover_tracking {
            return;
        }
        self.mouse_enter
            .animate_to(0.0, now_sec, HOVER_TWEEN_SEC, self.ease);
        self.hover_target.animate_to(
            Vec2::from_array(HOVER_REST),
            now_sec,
            HOVER_TWEEN_SEC,
            self.ease,
        );
    }

    /// Pointer moved to (`local_x`, `local_y`) px inside the element's box.
    /// The fraction is clamped to `[0, 1]`.
    pub fn on_pointer_move_within_bounds(&mut self, local_x: f32, local_y: f32) {
        if !self.caps.hover_tracking {
            return;
        }
        let rect = self.element.bounds().rect;
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let frac = Vec2::new(local_x / rect.width, local_y / rect.height);
        if !frac.is_finite() {
            return;
        }
        self.hover_target.set(frac.clamp(Vec2::ZERO, Vec2::ONE));
    }

    /// Advance smoothing and write every uniform for this frame. Returns the
    /// draw for a visible, textured plane.
    pub fn update(&mut self, time_sec: f64, ctx: &SceneContext) -> Option<MeshDraw> {
        let mouse_enter = self.mouse_enter.advance(time_sec).clamp(0.0, 1.0);
        self.hover.set_target(self.hover_target.advance(time_sec));
        self.hover.step(self.hover_lerp);

        let u = &mut self.uniforms;
        u.resolution = [ctx.screen.width, ctx.screen.height];
        u.time = time_sec as f32;
        u.cursor = ctx.pointer.to_array();
        u.scroll_velocity = self.scroll_velocity;
        u.hover = self.hover.current.to_array();
        u.mouse_enter = mouse_enter;

        let mesh = self.mesh?;
        self.transform.is_active().then_some(MeshDraw {
            mesh,
            transform: self.transform,
            uniforms: self.uniforms,
        })
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    pub fn transform(&self) -> MediaTransform {
        self.transform
    }

    pub fn uniforms(&self) -> &MediaUniforms {
        &self.uniforms
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn mouse_enter(&self) -> f32 {
        self.mouse_enter.value()
    }

    pub fn hover(&self) -> DampedVec2 {
        self.hover
    }

    pub fn hover_target(&self) -> Vec2 {
        self.hover_target.value()
    }
}
