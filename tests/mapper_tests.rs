// Host-side tests for DOM layout -> world transform mapping.

use glam::{Vec2, Vec3};
use scroll_planes::core::{
    map, project_to_client_rect, reposition, Camera, DomRect, ElementBounds, MappingMode,
    MediaTransform, ScreenSize,
};

fn full_hd() -> ScreenSize {
    ScreenSize::new(1920.0, 1080.0)
}

fn image_bounds() -> ElementBounds {
    let rect = DomRect::new(100.0, 200.0, 300.0, 400.0);
    ElementBounds { rect, parent: rect }
}

fn assert_close(a: f32, b: f32, tol: f32) {
    assert!((a - b).abs() <= tol, "{} vs {} (tol {})", a, b, tol);
}

#[test]
fn document_mapping_centres_the_element_box() {
    let screen = full_hd();
    let mut camera = Camera::for_mode(MappingMode::Document, screen);
    let viewport = camera.fit(MappingMode::Document, screen);

    let t = map(MappingMode::Document, &image_bounds(), screen, viewport, 0.0);
    assert_close(t.position.x, -610.0, 1e-3);
    assert_close(t.position.y, 240.0, 1e-3);
    assert_eq!(t.position.z, 0.0);
    assert_eq!(t.scale, Vec2::new(300.0, 400.0));
}

#[test]
fn scrolling_only_translates_y() {
    let screen = full_hd();
    let viewport = Camera::for_mode(MappingMode::Document, screen).fit(MappingMode::Document, screen);
    let before = map(MappingMode::Document, &image_bounds(), screen, viewport, 0.0);
    let after = reposition(
        MappingMode::Document,
        &image_bounds(),
        before.scale,
        screen,
        viewport,
        50.0,
    );
    assert_close(after.position.x, before.position.x, 1e-3);
    assert_close(after.position.y, 290.0, 1e-3);
    assert_eq!(after.scale, before.scale);
}

#[test]
fn reposition_is_idempotent() {
    let screen = full_hd();
    let viewport = Camera::for_mode(MappingMode::Document, screen).fit(MappingMode::Document, screen);
    let scale = Vec2::new(300.0, 400.0);
    let a = reposition(MappingMode::Document, &image_bounds(), scale, screen, viewport, 75.0);
    let b = reposition(MappingMode::Document, &image_bounds(), scale, screen, viewport, 75.0);
    assert_eq!(a, b);
}

#[test]
fn document_mesh_projects_back_onto_its_element() {
    let screens = [
        (1920.0, 1080.0),
        (375.0, 667.0),
        (768.0, 1024.0),
        (1366.0, 768.0),
        (1001.0, 333.0),
        (2560.0, 1441.0),
    ];
    // (top, left, width, height); some boxes hang off the window edges
    let boxes = [
        (100.0, 200.0, 300.0, 400.0),
        (0.0, 0.0, 120.0, 80.0),
        (-150.0, -60.0, 400.0, 250.0),
        (900.0, 300.0, 640.0, 360.0),
        (2400.0, 17.5, 33.3, 999.0),
    ];

    for (w, h) in screens {
        let screen = ScreenSize::new(w, h);
        let mut camera = Camera::for_mode(MappingMode::Document, screen);
        let viewport = camera.fit(MappingMode::Document, screen);

        for (top, left, width, height) in boxes {
            let rect = DomRect::new(top, left, width, height);
            let bounds = ElementBounds { rect, parent: rect };
            for scroll in [0.0_f32, 50.0, 333.0, 2000.0] {
                let t = map(MappingMode::Document, &bounds, screen, viewport, scroll);
                let r = project_to_client_rect(&t, &camera, screen);
                let case = format!("{}x{} box {:?} scroll {}", w, h, rect, scroll);
                assert!((r.left - left).abs() <= 1.0, "left {} in {}", r.left, case);
                assert!((r.top - (top - scroll)).abs() <= 1.0, "top {} in {}", r.top, case);
                assert!((r.width - width).abs() <= 1.0, "width {} in {}", r.width, case);
                assert!((r.height - height).abs() <= 1.0, "height {} in {}", r.height, case);
            }
        }
    }
}

#[test]
fn document_viewport_matches_screen_pixels() {
    let screen = full_hd();
    let mut camera = Camera::for_mode(MappingMode::Document, screen);
    let viewport = camera.fit(MappingMode::Document, screen);
    assert_close(viewport.height, 1080.0, 0.5);
    assert_close(viewport.width, 1920.0, 1.0);
}

#[test]
fn viewport_keeps_the_screen_aspect_ratio() {
    for (w, h) in [(1920.0, 1080.0), (800.0, 1200.0), (1000.0, 1000.0)] {
        let screen = ScreenSize::new(w, h);
        for mode in [MappingMode::Document, MappingMode::ViewportRatio] {
            let mut camera = Camera::for_mode(mode, screen);
            let viewport = camera.fit(mode, screen);
            let ratio = viewport.width / viewport.height;
            assert!(
                (ratio - w / h).abs() < 1e-3,
                "{:?} {}x{}: {}",
                mode,
                w,
                h,
                ratio
            );
        }
    }
}

#[test]
fn viewport_ratio_scale_and_position() {
    let screen = ScreenSize::new(1000.0, 500.0);
    let mut camera = Camera::for_mode(MappingMode::ViewportRatio, screen);
    let viewport = camera.fit(MappingMode::ViewportRatio, screen);
    // 45 degree FOV at distance 5
    assert_close(viewport.height, 2.0 * 22.5_f32.to_radians().tan() * 5.0, 1e-4);

    let bounds = ElementBounds {
        rect: DomRect::new(120.0, 100.0, 400.0, 200.0),
        parent: DomRect::new(100.0, 80.0, 500.0, 250.0),
    };
    let t = map(MappingMode::ViewportRatio, &bounds, screen, viewport, 20.0);
    let sx = viewport.width * 500.0 / 1000.0;
    let sy = viewport.height * 250.0 / 500.0;
    assert_close(t.scale.x, sx, 1e-4);
    assert_close(t.scale.y, sy, 1e-4);

    let ratio = viewport.width / 1000.0;
    assert_close(t.position.x, -viewport.width / 2.0 + sx / 2.0 + 100.0 * ratio, 1e-4);
    assert_close(
        t.position.y,
        viewport.height / 2.0 - sy / 2.0 - (120.0 - 20.0) * ratio,
        1e-4,
    );
}

#[test]
fn viewport_ratio_mesh_projects_onto_a_full_width_parent() {
    let screen = ScreenSize::new(1280.0, 720.0);
    let mut camera = Camera::for_mode(MappingMode::ViewportRatio, screen);
    let viewport = camera.fit(MappingMode::ViewportRatio, screen);
    let rect = DomRect::new(300.0, 40.0, 640.0, 360.0);
    let bounds = ElementBounds { rect, parent: rect };

    let t = map(MappingMode::ViewportRatio, &bounds, screen, viewport, 120.0);
    let r = project_to_client_rect(&t, &camera, screen);
    assert_close(r.left, 40.0, 1.0);
    assert_close(r.top, 180.0, 1.0);
    assert_close(r.width, 640.0, 1.0);
    assert_close(r.height, 360.0, 1.0);
}

#[test]
fn degenerate_layout_maps_to_inactive() {
    let viewport = Camera::for_mode(MappingMode::Document, full_hd()).fit(MappingMode::Document, full_hd());

    let t = map(
        MappingMode::Document,
        &image_bounds(),
        ScreenSize::new(0.0, 1080.0),
        viewport,
        0.0,
    );
    assert_eq!(t, MediaTransform::INACTIVE);
    assert!(!t.is_active());

    let nan = ElementBounds {
        rect: DomRect::new(f32::NAN, 0.0, 10.0, 10.0),
        parent: DomRect::default(),
    };
    assert_eq!(
        map(MappingMode::Document, &nan, full_hd(), viewport, 0.0),
        MediaTransform::INACTIVE
    );

    // A collapsed element has nothing to show
    let empty = ElementBounds {
        rect: DomRect::new(10.0, 10.0, 0.0, 120.0),
        parent: DomRect::default(),
    };
    assert!(!map(MappingMode::Document, &empty, full_hd(), viewport, 0.0).is_active());
}

#[test]
fn degenerate_screen_yields_zero_viewport() {
    let mut camera = Camera::for_mode(MappingMode::ViewportRatio, ScreenSize::new(800.0, 600.0));
    let viewport = camera.fit(MappingMode::ViewportRatio, ScreenSize::new(800.0, 0.0));
    assert!(viewport.is_degenerate());
}

#[test]
fn mapping_mode_from_attribute() {
    assert_eq!(MappingMode::from_attr("document"), Some(MappingMode::Document));
    assert_eq!(MappingMode::from_attr(" px "), Some(MappingMode::Document));
    assert_eq!(MappingMode::from_attr("viewport"), Some(MappingMode::ViewportRatio));
    assert_eq!(MappingMode::from_attr("ratio"), Some(MappingMode::ViewportRatio));
    assert_eq!(MappingMode::from_attr("nope"), None);
    assert_eq!(MappingMode::default(), MappingMode::Document);
}

#[test]
fn camera_distance_depends_on_mode() {
    let screen = full_hd();
    assert_close(Camera::for_mode(MappingMode::Document, screen).distance(), 1.0, 1e-6);
    assert_close(Camera::for_mode(MappingMode::ViewportRatio, screen).distance(), 5.0, 1e-6);
    assert_eq!(Camera::for_mode(MappingMode::Document, screen).target, Vec3::ZERO);
}
