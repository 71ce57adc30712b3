use crate::core::{FrameLoop, Scene};
use crate::render::GpuState;
use crate::scroll::WindowScroll;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebScene = Scene<GpuState, WindowScroll>;

pub async fn init_gpu(canvas: &web::HtmlCanvasElement, max_pixel_ratio: f64) -> anyhow::Result<GpuState> {
    GpuState::new(canvas, max_pixel_ratio).await.map_err(|e| {
        log::error!("WebGPU init error: {:?}", e);
        e
    })
}

fn request_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(callback.as_ref().unchecked_ref());
    }
}

pub fn start_loop(scene: Rc<RefCell<WebScene>>) -> FrameLoop {
    let frame_loop = FrameLoop::new();
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running = frame_loop.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !running.is_running() {
            log::info!("[frame] loop stopped");
            return;
        }
        scene.borrow_mut().render_frame(timestamp);
        if let Some(cb) = tick_clone.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(cb) = tick.borrow().as_ref() {
        request_frame(cb);
    }
    frame_loop
}
