use scrollstage_gpu_shared::timeline::{scroll_progress, RotationTarget, Scrub};
use web_sys::{Document, Element, Window};

use crate::config::ScrollLinkConfig;

/// An active scroll link: the resolved trigger region plus scrub state.
pub struct ScrollLink {
    track: Element,
    target: RotationTarget,
    scrub: Scrub,
}

impl ScrollLink {
    /// Resolve the configured trigger region. Activation happens once, when
    /// the model finishes loading; if the region is missing at that instant
    /// the model stays static forever.
    pub fn activate(document: &Document, config: &ScrollLinkConfig) -> Option<ScrollLink> {
        match document.query_selector(&config.track_selector) {
            Ok(Some(track)) => Some(ScrollLink {
                track,
                target: config.target,
                scrub: Scrub::new(config.scrub_lag),
            }),
            _ => {
                log::warn!(
                    "scroll track '{}' not found; model loaded but won't scroll",
                    config.track_selector
                );
                None
            }
        }
    }

    /// Sample the trigger region's position, advance the smoothed progress by
    /// `dt` seconds, and return the rotation angles as `(tilt, yaw)`.
    pub fn update(&mut self, window: &Window, dt: f32) -> (f32, f32) {
        let rect = self.track.get_bounding_client_rect();
        let viewport_height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let target = scroll_progress(rect.top(), rect.height(), viewport_height);
        let progress = self.scrub.advance(target, dt);
        self.target.angles_at(progress)
    }
}
