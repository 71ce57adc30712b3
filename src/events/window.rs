use crate::constants::WHEEL_LINE_PX;
use crate::core::FrameLoop;
use crate::dom;
use crate::frame::WebScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Re-read the window size and push it through the scene (camera, canvas,
/// every media).
pub fn wire_resize(scene: &Rc<RefCell<WebScene>>) {
    let scene = scene.clone();
    let closure = Closure::wrap(Box::new(move || {
        if let Some(w) = web::window() {
            scene.borrow_mut().resize(dom::screen_size(&w));
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wheel_delta_px(ev: &web::WheelEvent, page_px: f32) -> f32 {
    let dy = ev.delta_y() as f32;
    match ev.delta_mode() {
        web::WheelEvent::DOM_DELTA_LINE => dy * WHEEL_LINE_PX,
        web::WheelEvent::DOM_DELTA_PAGE => dy * page_px,
        _ => dy,
    }
}

/// Wheel input feeds the inertial scroll target instead of scrolling
/// natively. Pinch-zoom (ctrl + wheel) is left to the browser.
pub fn wire_wheel(scene: &Rc<RefCell<WebScene>>) {
    let scene = scene.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        if ev.ctrl_key() {
            return;
        }
        ev.prevent_default();
        let mut scene = scene.borrow_mut();
        let page_px = scene.screen().height;
        scene
            .scroll_source_mut()
            .scroll_by(wheel_delta_px(&ev, page_px));
    }) as Box<dyn FnMut(_)>);

    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
    }
    closure.forget();
}

/// Stop the frame loop when the page is unloaded for good. Pages entering
/// the back/forward cache keep it.
pub fn wire_teardown(frame_loop: FrameLoop) {
    let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        frame_loop.on_page_hide(ev.persisted());
        if !frame_loop.is_running() {
            log::info!("[frame] page unloaded");
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
