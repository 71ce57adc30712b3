//! Page images rendered as WebGPU planes that stay glued to their DOM
//! elements while the page scrolls, resizes and reacts to the pointer.
//!
//! `core` is platform-free and tested on the host; everything else is the
//! browser front-end and only builds for `wasm32`.

pub mod core;

#[cfg(target_arch = "wasm32")]
mod constants;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod scroll;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scroll-planes starting");

    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

#[cfg(target_arch = "wasm32")]
async fn init() -> anyhow::Result<()> {
    use crate::core::{Scene, SceneError};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys as web;

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .query_selector(constants::CANVAS_SELECTOR)
        .ok()
        .flatten()
        .ok_or_else(|| SceneError::MissingElement(constants::CANVAS_SELECTOR.into()))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = dom::read_config(&canvas);
    if config.capabilities.wireframe_debug {
        log::set_max_level(log::LevelFilter::Debug);
    }
    log::info!("[config] {:?}", config);

    let mut scroll = scroll::WindowScroll::new(window.clone());
    scroll.reset();

    let gpu = frame::init_gpu(&canvas, config.max_pixel_ratio).await?;
    let screen = dom::screen_size(&window);
    let mut scene = Scene::new(gpu, scroll, screen, config);

    // Initializing: build one media per image, in document order
    let images = dom::query_images(&document)?;
    log::info!("[media] {} images found", images.len());
    let mut wired = Vec::with_capacity(images.len());
    for image in images {
        let decode: js_sys::Promise = image.decode();
        let decoded = match JsFuture::from(decode).await {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[media] decode failed for {}: {:?}", image.current_src(), e);
                false
            }
        };
        let index = scene.add_media(dom::ImageElement::new(image.clone(), decoded))?;
        wired.push((index, image));
    }
    scene.start();

    let scene = Rc::new(RefCell::new(scene));
    events::wire_resize(&scene);
    events::wire_wheel(&scene);
    events::wire_pointermove(&scene);
    for (index, image) in &wired {
        events::wire_media_pointer(&scene, *index, image);
    }
    scene.borrow_mut().resize(screen);

    let frame_loop = frame::start_loop(scene);
    events::wire_teardown(frame_loop);
    Ok(())
}
