// Host-side tests for the per-image entity, driven by a fixed layout.

use glam::Vec2;
use scroll_planes::core::{
    Camera, DomRect, ElementBounds, ElementLayout, MappingMode, Media, MediaCapabilities,
    MediaTransform, MeshId, SceneContext, ScreenSize, ScrollSample,
};

#[derive(Clone)]
struct FixedElement {
    rect: DomRect,
}

impl ElementLayout for FixedElement {
    fn bounds(&self) -> ElementBounds {
        ElementBounds {
            rect: self.rect,
            parent: self.rect,
        }
    }

    fn natural_size(&self) -> Vec2 {
        Vec2::new(1200.0, 1600.0)
    }

    fn source(&self) -> String {
        "fixed.jpg".into()
    }
}

fn element() -> FixedElement {
    FixedElement {
        rect: DomRect::new(100.0, 200.0, 300.0, 400.0),
    }
}

fn context(scroll: f32, velocity: f32) -> SceneContext {
    let screen = ScreenSize::new(1920.0, 1080.0);
    let viewport = Camera::for_mode(MappingMode::Document, screen).fit(MappingMode::Document, screen);
    SceneContext {
        screen,
        viewport,
        scroll: ScrollSample { scroll, velocity },
        pointer: Vec2::new(0.25, 0.75),
    }
}

fn media(caps: MediaCapabilities) -> Media<FixedElement> {
    Media::new(element(), Some(MeshId(0)), MappingMode::Document, caps, &context(0.0, 0.0))
}

#[test]
fn creation_maps_layout_and_fills_uniforms() {
    let m = media(MediaCapabilities::default());
    let t = m.transform();
    assert!((t.position.x + 610.0).abs() < 1e-3);
    assert!((t.position.y - 240.0).abs() < 1e-3);

    let u = m.uniforms();
    assert_eq!(u.image_sizes, [1200.0, 1600.0]);
    assert_eq!(u.plane_sizes, [300.0, 400.0]);
    assert_eq!(u.resolution, [1920.0, 1080.0]);
    assert_eq!(u.hover, [0.5, 0.5]);
    assert_eq!(u.mouse_enter, 0.0);
    assert_eq!(u.debug, 0.0);
}

#[test]
fn scroll_is_a_pure_recompute() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(50.0, 4.0);
    m.on_scroll(&ctx);
    let once = m.transform();
    m.on_scroll(&ctx);
    assert_eq!(m.transform(), once);
    assert!((once.position.y - 290.0).abs() < 1e-3);
    assert_eq!(m.scroll(), 50.0);
}

#[test]
fn scroll_velocity_is_damped_into_the_uniform() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(10.0, 5.0);
    m.on_scroll(&ctx);
    m.update(0.0, &ctx);
    assert!((m.uniforms().scroll_velocity - 1.0).abs() < 1e-6);

    let mut still = media(MediaCapabilities {
        scroll_velocity: false,
        ..MediaCapabilities::default()
    });
    still.on_scroll(&ctx);
    still.update(0.0, &ctx);
    assert_eq!(still.uniforms().scroll_velocity, 0.0);
}

#[test]
fn update_writes_frame_uniforms_and_returns_a_draw() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(0.0, 0.0);
    let draw = m.update(1.5, &ctx).expect("visible media draws");
    assert_eq!(draw.mesh, MeshId(0));
    assert_eq!(draw.transform, m.transform());
    assert_eq!(draw.uniforms.time, 1.5);
    assert_eq!(draw.uniforms.cursor, [0.25, 0.75]);
}

#[test]
fn mesh_less_media_produces_no_draw() {
    let mut m = Media::new(
        element(),
        None,
        MappingMode::Document,
        MediaCapabilities::default(),
        &context(0.0, 0.0),
    );
    assert!(!m.has_mesh());
    assert!(m.update(0.0, &context(0.0, 0.0)).is_none());
}

#[test]
fn degenerate_creation_recovers_on_next_scroll() {
    let mut ctx = context(0.0, 0.0);
    ctx.screen = ScreenSize::new(0.0, 0.0);
    let mut m = Media::new(
        element(),
        Some(MeshId(3)),
        MappingMode::Document,
        MediaCapabilities::default(),
        &ctx,
    );
    assert_eq!(m.transform(), MediaTransform::INACTIVE);
    assert!(m.update(0.0, &ctx).is_none());

    m.on_scroll(&context(0.0, 0.0));
    assert!(m.transform().is_active());
    assert_eq!(m.transform().scale, Vec2::new(300.0, 400.0));
}

#[test]
fn hover_position_is_clamped_to_the_element() {
    let mut m = media(MediaCapabilities::default());
    m.on_pointer_move_within_bounds(-10.0, 500.0);
    assert_eq!(m.hover_target(), Vec2::new(0.0, 1.0));

    m.on_pointer_move_within_bounds(150.0, 100.0);
    assert_eq!(m.hover_target(), Vec2::new(0.5, 0.25));
}

#[test]
fn hover_uniform_chases_the_target() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(0.0, 0.0);
    m.on_pointer_move_within_bounds(300.0, 400.0);
    m.update(0.0, &ctx);
    // Half way per frame
    assert!((m.hover().current - Vec2::new(0.75, 0.75)).length() < 1e-6);
    for i in 1..40 {
        m.update(i as f64 / 60.0, &ctx);
    }
    assert!((m.hover().current - Vec2::ONE).length() < 1e-4);
}

#[test]
fn leave_recentres_the_hover_target() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(0.0, 0.0);
    m.on_pointer_enter(0.0);
    m.on_pointer_move_within_bounds(0.0, 0.0);
    m.on_pointer_leave(1.0);
    m.update(1.3, &ctx);
    let mid = m.hover_target();
    assert!(mid.x > 0.0 && mid.x < 0.5);

    m.update(1.7, &ctx);
    assert_eq!(m.hover_target(), Vec2::splat(0.5));
    assert_eq!(m.mouse_enter(), 0.0);
}

#[test]
fn resize_recentres_the_hover_target() {
    let mut m = media(MediaCapabilities::default());
    m.on_pointer_move_within_bounds(0.0, 0.0);
    assert_eq!(m.hover_target(), Vec2::ZERO);

    let mut ctx = context(0.0, 0.0);
    ctx.screen = ScreenSize::new(1280.0, 720.0);
    m.on_resize(&ctx);
    assert_eq!(m.hover_target(), Vec2::splat(0.5));

    m.update(0.0, &ctx);
    assert!((m.hover().target - Vec2::splat(0.5)).length() < 1e-6);
}

#[test]
fn scroll_keeps_the_hover_target() {
    let mut m = media(MediaCapabilities::default());
    m.on_pointer_move_within_bounds(300.0, 0.0);
    m.on_scroll(&context(80.0, 2.0));
    assert_eq!(m.hover_target(), Vec2::new(1.0, 0.0));
}

#[test]
fn mouse_enter_stays_in_unit_range_under_rapid_toggling() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(0.0, 0.0);
    let mut now = 0.0;
    for i in 0..200 {
        if i % 3 == 0 {
            m.on_pointer_enter(now);
        } else if i % 5 == 0 {
            m.on_pointer_leave(now);
        }
        m.update(now, &ctx);
        let v = m.uniforms().mouse_enter;
        assert!((0.0..=1.0).contains(&v), "mouse_enter {} at step {}", v, i);
        now += 0.013;
    }
}

#[test]
fn enter_fades_in_over_the_tween() {
    let mut m = media(MediaCapabilities::default());
    let ctx = context(0.0, 0.0);
    m.on_pointer_enter(2.0);
    m.update(2.3, &ctx);
    let mid = m.uniforms().mouse_enter;
    assert!(mid > 0.0 && mid < 1.0);
    m.update(2.7, &ctx);
    assert_eq!(m.uniforms().mouse_enter, 1.0);
}

#[test]
fn hover_capability_off_ignores_pointer() {
    let mut m = media(MediaCapabilities {
        hover_tracking: false,
        ..MediaCapabilities::default()
    });
    let ctx = context(0.0, 0.0);
    m.on_pointer_enter(0.0);
    m.on_pointer_move_within_bounds(0.0, 0.0);
    m.update(1.0, &ctx);
    assert_eq!(m.uniforms().mouse_enter, 0.0);
    assert_eq!(m.uniforms().hover, [0.5, 0.5]);
}

#[test]
fn debug_capability_sets_the_flag() {
    let m = media(MediaCapabilities {
        wireframe_debug: true,
        ..MediaCapabilities::default()
    });
    assert_eq!(m.uniforms().debug, 1.0);
}
