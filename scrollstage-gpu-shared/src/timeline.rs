//! Scroll-timeline math: progress over a trigger region, scrub smoothing,
//! and the progress-to-rotation mapping. Sampling the page lives in the web
//! runtime; everything here is pure.

use glam::Mat4;
use std::f32::consts::TAU;

/// Default scrub lag in seconds.
pub const DEFAULT_SCRUB_LAG: f32 = 1.0;

/// Rotation reached at 100% scroll progress, in radians. The mapping from
/// progress to angles is linear (no easing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationTarget {
    pub yaw: f32,
    pub tilt: f32,
}

impl Default for RotationTarget {
    fn default() -> Self {
        // One full turn plus a slight tilt.
        Self {
            yaw: TAU,
            tilt: 0.5,
        }
    }
}

impl RotationTarget {
    /// Angles at a given progress, as `(tilt, yaw)`.
    pub fn angles_at(&self, progress: f32) -> (f32, f32) {
        (self.tilt * progress, self.yaw * progress)
    }

    pub fn matrix_at(&self, progress: f32) -> Mat4 {
        let (tilt, yaw) = self.angles_at(progress);
        Mat4::from_euler(glam::EulerRot::XYZ, tilt, yaw, 0.0)
    }
}

/// Scroll progress over a trigger region, anchored so progress is 0 when the
/// region's top edge reaches the viewport top and 1 when its bottom edge
/// reaches the viewport bottom.
///
/// `track_top` is the region's current top edge relative to the viewport
/// (negative once scrolled past). A region no taller than the viewport has a
/// degenerate scroll span; it snaps from 0 to 1 as its top crosses the
/// viewport top.
pub fn scroll_progress(track_top: f64, track_height: f64, viewport_height: f64) -> f32 {
    let span = track_height - viewport_height;
    if span <= 0.0 {
        return if track_top <= 0.0 { 1.0 } else { 0.0 };
    }
    ((-track_top / span).clamp(0.0, 1.0)) as f32
}

/// A smoothed value that lags a fixed time constant behind its target, so the
/// animation catches up to the raw scroll position over `lag` seconds instead
/// of snapping.
#[derive(Debug, Clone, Copy)]
pub struct Scrub {
    lag: f32,
    value: f32,
}

impl Scrub {
    pub fn new(lag: f32) -> Self {
        Self {
            lag: lag.max(0.0),
            value: 0.0,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Advance the smoothed value by `dt` seconds toward `target`.
    pub fn advance(&mut self, target: f32, dt: f32) -> f32 {
        let step = if self.lag <= f32::EPSILON {
            1.0
        } else {
            (dt / self.lag).clamp(0.0, 1.0)
        };
        self.value += (target - self.value) * step;
        self.value
    }
}
