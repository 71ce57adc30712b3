use crate::frame::WebScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
fn now_sec() -> f64 {
    instant::now() / 1000.0
}

/// Window-level pointer samples drive the shared cursor tracker.
pub fn wire_pointermove(scene: &Rc<RefCell<WebScene>>) {
    let scene = scene.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        scene
            .borrow_mut()
            .on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);

    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }

    closure.forget();
}

fn add_media_listener(
    image: &web::HtmlImageElement,
    kind: &str,
    handler: impl FnMut(web::MouseEvent) + 'static,
) {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::MouseEvent)>);
    _ = image.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Enter/leave/move on one image, routed to the media at `index`.
pub fn wire_media_pointer(scene: &Rc<RefCell<WebScene>>, index: usize, image: &web::HtmlImageElement) {
    let s = scene.clone();
    add_media_listener(image, "mouseenter", move |_ev| {
        s.borrow_mut().on_media_pointer_enter(index, now_sec());
    });

    let s = scene.clone();
    add_media_listener(image, "mouseleave", move |_ev| {
        s.borrow_mut().on_media_pointer_leave(index, now_sec());
    });

    let s = scene.clone();
    add_media_listener(image, "mousemove", move |ev| {
        s.borrow_mut()
            .on_media_pointer_move(index, ev.offset_x() as f32, ev.offset_y() as f32);
    });
}
