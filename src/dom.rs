use hero_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current window size in CSS pixels and the display's device pixel ratio.
pub fn viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0)
    };
    Viewport::new(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("not a canvas: {:?}", e))?;
    _ = canvas.set_attribute("aria-hidden", "true");
    _ = canvas.style().set_property("display", "block");
    Ok(canvas)
}

/// Backing store at `css * pixel_ratio` (capped), CSS box at the viewport size.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let size = viewport.buffer_size();
    if canvas.width() != size.width {
        canvas.set_width(size.width);
    }
    if canvas.height() != size.height {
        canvas.set_height(size.height);
    }
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
}
