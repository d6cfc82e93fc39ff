use std::cell::RefCell;
use std::rc::Rc;

use glam::Mat4;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, Window};

use scrollstage_gpu_shared::camera::Camera;
use scrollstage_gpu_shared::math::normalize_transform;
use scrollstage_gpu_shared::uniforms::FrameUniforms;

use crate::config::SceneOptions;
use crate::renderer::RenderState;
use crate::scene::LoadedModel;
use crate::scroll::ScrollLink;
use crate::{dom, fetch};

/// State shared between the render loop, the resize listener, and the
/// asset-load completion. All three run on the page's event loop, so a
/// `Rc<RefCell>` is all the coordination needed.
struct ViewportState {
    renderer: RenderState,
    camera: Camera,
    container: Element,
    canvas: HtmlCanvasElement,
    options: SceneOptions,
    /// Set exactly once, when the asset finishes loading.
    normalization: Option<Mat4>,
    scroll: Option<ScrollLink>,
    rotation: Mat4,
    last_time: f64,
    disposed: bool,
}

impl ViewportState {
    /// Run one frame. `time` is the requestAnimationFrame timestamp in ms.
    fn frame(&mut self, window: &Window, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            1.0 / 60.0 // first frame
        };
        self.last_time = time;

        if let Some(link) = self.scroll.as_mut() {
            let (tilt, yaw) = link.update(window, dt);
            self.rotation = Mat4::from_euler(glam::EulerRot::XYZ, tilt, yaw, 0.0);
        }

        let model = match self.normalization {
            Some(normalization) => self.rotation * normalization,
            None => Mat4::IDENTITY,
        };
        let frame = FrameUniforms::new(self.camera.view_proj(), model, self.camera.eye);
        if let Err(e) = self.renderer.render(&frame) {
            log::error!("render failed: {e}");
        }
    }

    fn handle_resize(&mut self, window: &Window) {
        let (width, height) = dom::surface_size(window, &self.container, self.options.pixel_ratio_cap);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.camera.set_aspect(width as f32, height as f32);
        self.renderer.resize(width, height);
    }

    fn attach_model(&mut self, window: &Window, model: &LoadedModel) {
        self.renderer.upload_model(model);
        // Normalization is computed once, from the load-time bounds.
        self.normalization = Some(normalize_transform(&model.bounds, self.options.model_scale));

        if let Some(config) = &self.options.scroll {
            if let Some(document) = window.document() {
                self.scroll = ScrollLink::activate(&document, config);
            }
        }

        log::info!(
            "model attached: {} primitives, {} vertices",
            model.num_primitives(),
            model.num_vertices(),
        );
    }
}

/// Disposal handle for one viewport. Dropping it without calling
/// [`Viewport::dispose`] leaves the render loop and resize listener running
/// for the page's lifetime, matching a never-torn-down embed.
#[wasm_bindgen]
pub struct Viewport {
    state: Rc<RefCell<ViewportState>>,
    resize_closure: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl Viewport {
    /// Stop the render loop and unregister the resize listener. The canvas
    /// stays in the page; removing it is the host's call.
    pub fn dispose(&mut self) {
        self.state.borrow_mut().disposed = true;
        if let Some(closure) = self.resize_closure.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

impl Viewport {
    /// Build the viewport: camera and renderer synchronously (modulo GPU
    /// bring-up), then the render loop, the resize listener, and the
    /// asset load. Returns `None` when the container does not exist.
    pub(crate) async fn create(
        container_id: &str,
        model_url: &str,
        options: SceneOptions,
    ) -> Result<Option<Viewport>, String> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        // Missing container: silent no-op by contract.
        let Some(container) = dom::container_by_id(&document, container_id) else {
            return Ok(None);
        };

        let (width, height) = dom::surface_size(&window, &container, options.pixel_ratio_cap);
        let canvas = dom::create_canvas(&document, &container)?;
        canvas.set_width(width);
        canvas.set_height(height);

        let renderer = RenderState::new(canvas.clone(), width, height).await?;
        let mut camera = Camera::default();
        camera.set_aspect(width as f32, height as f32);

        let state = Rc::new(RefCell::new(ViewportState {
            renderer,
            camera,
            container,
            canvas,
            options,
            normalization: None,
            scroll: None,
            rotation: Mat4::IDENTITY,
            last_time: 0.0,
            disposed: false,
        }));

        let resize_closure = register_resize_listener(&window, state.clone())?;
        start_render_loop(&window, state.clone())?;
        spawn_model_load(state.clone(), model_url.to_string());

        log::info!("viewport initialized in #{container_id} ({width}x{height})");

        Ok(Some(Viewport {
            state,
            resize_closure: Some(resize_closure),
        }))
    }
}

fn register_resize_listener(
    window: &Window,
    state: Rc<RefCell<ViewportState>>,
) -> Result<Closure<dyn FnMut()>, String> {
    let closure = Closure::<dyn FnMut()>::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        let mut state = state.borrow_mut();
        if !state.disposed {
            state.handle_resize(&window);
        }
    });

    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|e| format!("failed to register resize listener: {e:?}"))?;
    Ok(closure)
}

/// Self-rescheduling requestAnimationFrame loop. Rendering an empty scene
/// while the asset is still in flight is expected. A disposed viewport stops
/// rescheduling and the loop ends.
fn start_render_loop(window: &Window, state: Rc<RefCell<ViewportState>>) -> Result<(), String> {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_inner = holder.clone();

    *holder.borrow_mut() = Some(Closure::new(move |time: f64| {
        let Some(window) = web_sys::window() else {
            return;
        };
        {
            let mut state = state.borrow_mut();
            if state.disposed {
                return;
            }
            state.frame(&window, time);
        }
        if let Some(closure) = holder_inner.borrow().as_ref() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }));

    let borrowed = holder.borrow();
    let closure = borrowed.as_ref().ok_or("render loop closure missing")?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .map_err(|e| format!("failed to start render loop: {e:?}"))?;
    Ok(())
}

/// Fetch and parse the asset, then attach it. Exactly one completion; a
/// failed load leaves the scene rendering without a model.
fn spawn_model_load(state: Rc<RefCell<ViewportState>>, url: String) {
    wasm_bindgen_futures::spawn_local(async move {
        let bytes = match fetch::fetch_bytes(&url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                log::error!("model load failed: {e}");
                return;
            }
        };
        let model = match LoadedModel::from_bytes(&bytes) {
            Ok(model) => model,
            Err(e) => {
                log::error!("model load failed: {e}");
                return;
            }
        };

        let Some(window) = web_sys::window() else {
            return;
        };
        let mut state = state.borrow_mut();
        if !state.disposed {
            state.attach_model(&window, &model);
        }
    });
}
