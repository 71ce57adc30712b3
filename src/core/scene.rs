//! Scene orchestration: owns the camera, the renderer, the scroll source and
//! the ordered list of media, and fans events out to them.
//!
//! Within one frame every `on_resize`/`on_scroll` completes before the first
//! `update`, so uniforms always see the frame's final transforms.

use super::camera::Camera;
use super::constants::{HOVER_LERP, MAX_PIXEL_RATIO, POINTER_LERP, POINTER_REST};
use super::error::SceneError;
use super::inertia::{ScrollSample, ScrollSource};
use super::mapper::{MappingMode, ScreenSize, ViewportSize};
use super::media::{ElementLayout, Media, MediaCapabilities, MeshDraw, MeshId, SceneContext};
use super::pointer::PointerTracker;
use glam::Vec2;

/// Rendering backend seam. One `render` call per frame.
pub trait SceneRenderer {
    type Source: ElementLayout;

    /// Upload the element's image and allocate a plane mesh for it.
    fn create_mesh(&mut self, source: &Self::Source) -> Result<MeshId, SceneError>;
    fn set_size(&mut self, screen: ScreenSize);
    fn render(&mut self, camera: &Camera, draws: &[MeshDraw]) -> Result<(), SceneError>;
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub mode: MappingMode,
    pub capabilities: MediaCapabilities,
    pub pointer_lerp: f32,
    pub hover_lerp: f32,
    pub max_pixel_ratio: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mode: MappingMode::Document,
            capabilities: MediaCapabilities::default(),
            pointer_lerp: POINTER_LERP,
            hover_lerp: HOVER_LERP,
            max_pixel_ratio: MAX_PIXEL_RATIO,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Running,
}

pub struct Scene<R: SceneRenderer, S> {
    phase: Phase,
    config: SceneConfig,
    camera: Camera,
    renderer: R,
    scroll_source: S,
    screen: ScreenSize,
    viewport: ViewportSize,
    scroll: ScrollSample,
    pointer: PointerTracker,
    medias: Vec<Media<R::Source>>,
    draws: Vec<MeshDraw>,
    frames: u64,
}

impl<R: SceneRenderer, S: ScrollSource> Scene<R, S> {
    pub fn new(mut renderer: R, scroll_source: S, screen: ScreenSize, config: SceneConfig) -> Self {
        let mut camera = Camera::for_mode(config.mode, screen);
        let viewport = camera.fit(config.mode, screen);
        renderer.set_size(screen);
        let scroll = scroll_source.sample();
        let pointer = PointerTracker::new(Vec2::from_array(POINTER_REST), config.pointer_lerp);
        Self {
            phase: Phase::Initializing,
            config,
            camera,
            renderer,
            scroll_source,
            screen,
            viewport,
            scroll,
            pointer,
            medias: Vec::new(),
            draws: Vec::new(),
            frames: 0,
        }
    }

    /// Register an image. A failed texture upload leaves the media mesh-less;
    /// it stays in the list but is skipped by all per-frame work.
    pub fn add_media(&mut self, source: R::Source) -> Result<usize, SceneError> {
        if self.phase != Phase::Initializing {
            return Err(SceneError::AlreadyRunning);
        }
        let mesh = match self.renderer.create_mesh(&source) {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("[media] {} rendered without mesh: {}", source.source(), e);
                None
            }
        };
        let ctx = self.context();
        let media = Media::new(source, mesh, self.config.mode, self.config.capabilities, &ctx)
            .with_hover_lerp(self.config.hover_lerp);
        self.medias.push(media);
        Ok(self.medias.len() - 1)
    }

    /// Leave `Initializing`; frames render from now on.
    pub fn start(&mut self) {
        if self.phase == Phase::Initializing {
            self.phase = Phase::Running;
            let meshes = self.medias.iter().filter(|m| m.has_mesh()).count();
            log::info!(
                "[scene] running: {} media ({} textured), {:?} mapping",
                self.medias.len(),
                meshes,
                self.config.mode
            );
        }
    }

    pub fn context(&self) -> SceneContext {
        SceneContext {
            screen: self.screen,
            viewport: self.viewport,
            scroll: self.scroll,
            pointer: self.pointer.current(),
        }
    }

    pub fn resize(&mut self, screen: ScreenSize) {
        self.screen = screen;
        self.viewport = self.camera.fit(self.config.mode, screen);
        self.renderer.set_size(screen);
        log::debug!(
            "[scene] resize screen={:.0}x{:.0} viewport={:.3}x{:.3}",
            screen.width,
            screen.height,
            self.viewport.width,
            self.viewport.height
        );
        let ctx = self.context();
        for media in self.medias.iter_mut().filter(|m| m.has_mesh()) {
            media.on_resize(&ctx);
        }
        let ScrollSample { scroll, velocity } = self.scroll;
        self.scroll(scroll, velocity);
    }

    /// Pure recompute: repeated calls with the same offset are no-ops.
    pub fn scroll(&mut self, offset: f32, velocity: f32) {
        self.scroll = ScrollSample {
            scroll: offset,
            velocity,
        };
        let ctx = self.context();
        for media in self.medias.iter_mut().filter(|m| m.has_mesh()) {
            media.on_scroll(&ctx);
        }
    }

    /// Window-level pointer sample in client pixels.
    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        if self.screen.is_degenerate() {
            return;
        }
        self.pointer.on_pointer_move(
            client_x / self.screen.width,
            client_y / self.screen.height,
        );
    }

    pub fn on_media_pointer_enter(&mut self, index: usize, now_sec: f64) {
        if let Some(media) = self.medias.get_mut(index).filter(|m| m.has_mesh()) {
            media.on_pointer_enter(now_sec);
        }
    }

    pub fn on_media_pointer_leave(&mut self, index: usize, now_sec: f64) {
        if let Some(media) = self.medias.get_mut(index).filter(|m| m.has_mesh()) {
            media.on_pointer_leave(now_sec);
        }
    }

    pub fn on_media_pointer_move(&mut self, index: usize, local_x: f32, local_y: f32) {
        if let Some(media) = self.medias.get_mut(index).filter(|m| m.has_mesh()) {
            media.on_pointer_move_within_bounds(local_x, local_y);
        }
    }

    /// Advance scroll and pointer smoothing, update every textured media and
    /// issue one render call. Returns `false` while still initializing.
    pub fn render_frame(&mut self, timestamp_ms: f64) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        let sample = self.scroll_source.advance(timestamp_ms);
        self.scroll(sample.scroll, sample.velocity);
        self.pointer.tick();

        let ctx = self.context();
        let time_sec = timestamp_ms / 1000.0;
        self.draws.clear();
        for media in self.medias.iter_mut().filter(|m| m.has_mesh()) {
            if let Some(draw) = media.update(time_sec, &ctx) {
                self.draws.push(draw);
            }
        }
        if let Err(e) = self.renderer.render(&self.camera, &self.draws) {
            log::error!("render error: {}", e);
        }
        self.frames += 1;
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn medias(&self) -> &[Media<R::Source>] {
        &self.medias
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn scroll_source_mut(&mut self) -> &mut S {
        &mut self.scroll_source
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}
