use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, Window};

pub fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "no window".to_string())
}

pub fn document(window: &Window) -> Result<Document, String> {
    window.document().ok_or_else(|| "no document".to_string())
}

/// Container lookup. A missing container makes the whole init a no-op by
/// contract, so this returns an `Option` rather than an error.
pub fn container_by_id(document: &Document, id: &str) -> Option<Element> {
    document.get_element_by_id(id)
}

/// Create the rendering canvas and attach it as a child of the container.
pub fn create_canvas(document: &Document, container: &Element) -> Result<HtmlCanvasElement, String> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| format!("failed to create canvas: {e:?}"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| "created element is not a canvas".to_string())?;
    container
        .append_child(&canvas)
        .map_err(|e| format!("failed to attach canvas: {e:?}"))?;
    Ok(canvas)
}

/// Container size in physical pixels, honoring the capped device pixel ratio.
/// Never returns zero so the surface stays configurable while the container
/// is collapsed.
pub fn surface_size(window: &Window, container: &Element, pixel_ratio_cap: f64) -> (u32, u32) {
    let ratio = window.device_pixel_ratio().min(pixel_ratio_cap);
    let width = (container.client_width() as f64 * ratio).round().max(1.0) as u32;
    let height = (container.client_height() as f64 * ratio).round().max(1.0) as u32;
    (width, height)
}
