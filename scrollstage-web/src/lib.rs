//! scrollstage WASM web runtime
//!
//! Embeds a WebGPU viewport in a page element, loads a glTF model, centers
//! and scales it, and links its rotation to scroll progress over a trigger
//! region with a fixed smoothing lag.

#[cfg(target_arch = "wasm32")]
mod app;
mod config;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod fetch;
#[cfg(target_arch = "wasm32")]
mod renderer;
mod scene;
#[cfg(target_arch = "wasm32")]
mod scroll;

pub use config::{SceneOptions, ScrollLinkConfig};
pub use scene::{LoadedModel, Primitive, TextureData};

#[cfg(target_arch = "wasm32")]
pub use app::Viewport;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point — called when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("scrollstage web runtime initialized");
}

/// Create a viewport inside the element with id `container_id` and start
/// loading the model at `model_url`, with stock configuration.
///
/// Resolves to a disposal handle, or to `undefined` when the container does
/// not exist (a silent no-op by contract). Each call creates an independent
/// viewport.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initScene)]
pub async fn init_scene(container_id: String, model_url: String) -> Result<JsValue, JsValue> {
    init_scene_with(container_id, model_url, SceneOptions::new()).await
}

/// [`init_scene`] with explicit options (scroll track selector, scrub lag,
/// rotation target, model scale, pixel-ratio cap).
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initSceneWith)]
pub async fn init_scene_with(
    container_id: String,
    model_url: String,
    options: SceneOptions,
) -> Result<JsValue, JsValue> {
    match app::Viewport::create(&container_id, &model_url, options)
        .await
        .map_err(|e| JsValue::from_str(&e))?
    {
        Some(viewport) => Ok(viewport.into()),
        None => Ok(JsValue::UNDEFINED),
    }
}
