use crate::constants::{ATTR_DEBUG, ATTR_HOVER, ATTR_MAPPING, ATTR_VELOCITY, MEDIA_SELECTOR};
use crate::core::{
    DomRect, ElementBounds, ElementLayout, MappingMode, ScreenSize, SceneConfig,
};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `innerWidth`/`innerHeight` in CSS pixels.
pub fn screen_size(window: &web::Window) -> ScreenSize {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    ScreenSize::new(read(window.inner_width()), read(window.inner_height()))
}

pub fn pixel_ratio(window: &web::Window, max_ratio: f64) -> f64 {
    window.device_pixel_ratio().clamp(1.0, max_ratio)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, max_ratio: f64) -> (u32, u32) {
    let Some(w) = web::window() else {
        return (canvas.width(), canvas.height());
    };
    let dpr = pixel_ratio(&w, max_ratio);
    let rect = canvas.get_bounding_client_rect();
    let w_px = ((rect.width() * dpr) as u32).max(1);
    let h_px = ((rect.height() * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

/// Largest scroll offset the document allows.
pub fn scroll_limit(window: &web::Window) -> f32 {
    let doc_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(0.0);
    (doc_height - screen_size(window).height).max(0.0)
}

pub fn scroll_offset(window: &web::Window) -> f32 {
    window.scroll_y().unwrap_or(0.0) as f32
}

/// Images in document order.
pub fn query_images(document: &web::Document) -> anyhow::Result<Vec<web::HtmlImageElement>> {
    let list = document
        .query_selector_all(MEDIA_SELECTOR)
        .map_err(|e| anyhow::anyhow!("query {}: {:?}", MEDIA_SELECTOR, e))?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web::HtmlImageElement>().ok())
        .collect())
}

/// Scene options from the canvas `data-*` attributes.
pub fn read_config(canvas: &web::HtmlCanvasElement) -> SceneConfig {
    let data = canvas.dataset();
    let mut config = SceneConfig::default();
    if let Some(value) = data.get(ATTR_MAPPING) {
        match MappingMode::from_attr(&value) {
            Some(mode) => config.mode = mode,
            None => log::warn!("[config] unknown data-{}=\"{}\"", ATTR_MAPPING, value),
        }
    }
    config.capabilities.wireframe_debug = data.get(ATTR_DEBUG).is_some();
    config.capabilities.hover_tracking = data.get(ATTR_HOVER).as_deref() != Some("off");
    config.capabilities.scroll_velocity = data.get(ATTR_VELOCITY).as_deref() != Some("off");
    config
}

fn client_rect_in_document(el: &web::Element, window: &web::Window) -> DomRect {
    let r = el.get_bounding_client_rect();
    let sx = window.scroll_x().unwrap_or(0.0);
    let sy = window.scroll_y().unwrap_or(0.0);
    DomRect::new(
        (r.top() + sy) as f32,
        (r.left() + sx) as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// A page image as seen by the scene. Layout is re-read on every query.
#[derive(Clone)]
pub struct ImageElement {
    image: web::HtmlImageElement,
    decoded: bool,
}

impl ImageElement {
    pub fn new(image: web::HtmlImageElement, decoded: bool) -> Self {
        Self { image, decoded }
    }

    pub fn image(&self) -> &web::HtmlImageElement {
        &self.image
    }

    pub fn is_decoded(&self) -> bool {
        self.decoded
    }
}

impl ElementLayout for ImageElement {
    fn bounds(&self) -> ElementBounds {
        let Some(window) = web::window() else {
            return ElementBounds::default();
        };
        let rect = client_rect_in_document(&self.image, &window);
        let parent = self
            .image
            .parent_element()
            .map(|p| client_rect_in_document(&p, &window))
            .unwrap_or(rect);
        ElementBounds { rect, parent }
    }

    fn natural_size(&self) -> Vec2 {
        Vec2::new(
            self.image.natural_width() as f32,
            self.image.natural_height() as f32,
        )
    }

    fn source(&self) -> String {
        self.image.current_src()
    }
}
