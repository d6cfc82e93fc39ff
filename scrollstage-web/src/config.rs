use scrollstage_gpu_shared::timeline::{RotationTarget, DEFAULT_SCRUB_LAG};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Selector of the page region whose scroll position drives the rotation.
pub const DEFAULT_TRACK_SELECTOR: &str = ".cube-scroll-track";
pub const DEFAULT_MODEL_SCALE: f32 = 1.5;
pub const DEFAULT_PIXEL_RATIO_CAP: f64 = 2.0;

/// Scroll-link configuration: which page region drives the rotation and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLinkConfig {
    pub track_selector: String,
    /// Smoothing lag in seconds between raw scroll position and the rotation.
    pub scrub_lag: f32,
    pub target: RotationTarget,
}

impl Default for ScrollLinkConfig {
    fn default() -> Self {
        Self {
            track_selector: DEFAULT_TRACK_SELECTOR.to_string(),
            scrub_lag: DEFAULT_SCRUB_LAG,
            target: RotationTarget::default(),
        }
    }
}

/// Viewport configuration. The defaults reproduce the stock embed: model
/// scaled 1.5×, pixel ratio capped at 2, one full turn plus a slight tilt
/// scrubbed over the `.cube-scroll-track` region with a 1 second lag.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct SceneOptions {
    pub(crate) model_scale: f32,
    pub(crate) pixel_ratio_cap: f64,
    /// `None` means no scroll link: the model stays static by configuration,
    /// which is valid and produces no warning.
    pub(crate) scroll: Option<ScrollLinkConfig>,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            model_scale: DEFAULT_MODEL_SCALE,
            pixel_ratio_cap: DEFAULT_PIXEL_RATIO_CAP,
            scroll: Some(ScrollLinkConfig::default()),
        }
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl SceneOptions {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> SceneOptions {
        SceneOptions::default()
    }

    /// Uniform scale applied after centering.
    pub fn model_scale(mut self, scale: f32) -> SceneOptions {
        self.model_scale = scale;
        self
    }

    /// Cap on the device pixel ratio used for the backing buffer.
    pub fn pixel_ratio_cap(mut self, cap: f64) -> SceneOptions {
        self.pixel_ratio_cap = cap.max(1.0);
        self
    }

    /// Region selector that drives the rotation.
    pub fn scroll_track(mut self, selector: String) -> SceneOptions {
        self.scroll
            .get_or_insert_with(ScrollLinkConfig::default)
            .track_selector = selector;
        self
    }

    /// Smoothing lag in seconds; 0 tracks the scroll position exactly.
    pub fn scrub_lag(mut self, seconds: f32) -> SceneOptions {
        self.scroll
            .get_or_insert_with(ScrollLinkConfig::default)
            .scrub_lag = seconds.max(0.0);
        self
    }

    /// Rotation reached at 100% scroll progress, in radians.
    pub fn rotation_target(mut self, yaw: f32, tilt: f32) -> SceneOptions {
        self.scroll
            .get_or_insert_with(ScrollLinkConfig::default)
            .target = RotationTarget { yaw, tilt };
        self
    }

    /// Leave the model static regardless of scrolling.
    pub fn without_scroll_link(mut self) -> SceneOptions {
        self.scroll = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn test_defaults_match_stock_embed() {
        let options = SceneOptions::new();
        assert_eq!(options.model_scale, 1.5);
        assert_eq!(options.pixel_ratio_cap, 2.0);
        let link = options.scroll.expect("scroll link on by default");
        assert_eq!(link.track_selector, ".cube-scroll-track");
        assert_eq!(link.scrub_lag, 1.0);
        assert_eq!(link.target, RotationTarget { yaw: TAU, tilt: 0.5 });
    }

    #[test]
    fn test_builder_round_trip() {
        let options = SceneOptions::new()
            .model_scale(2.0)
            .scroll_track(".hero".to_string())
            .scrub_lag(0.25)
            .rotation_target(TAU * 2.0, 0.0);
        assert_eq!(options.model_scale, 2.0);
        let link = options.scroll.unwrap();
        assert_eq!(link.track_selector, ".hero");
        assert_eq!(link.scrub_lag, 0.25);
        assert_eq!(link.target.yaw, TAU * 2.0);
    }

    #[test]
    fn test_scroll_link_can_be_disabled() {
        let options = SceneOptions::new().without_scroll_link();
        assert!(options.scroll.is_none());
    }

    #[test]
    fn test_negative_scrub_lag_clamped() {
        let options = SceneOptions::new().scrub_lag(-1.0);
        assert_eq!(options.scroll.unwrap().scrub_lag, 0.0);
    }
}
