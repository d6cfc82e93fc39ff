use glam::{Mat4, Vec3};

/// Perspective camera looking at the scene origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 5.0),
            fov_y: 45f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            aspect,
            ..Self::default()
        }
    }

    /// Recompute the aspect ratio from surface dimensions. Zero heights are
    /// ignored so a collapsed container cannot poison the projection.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 && width > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let projection = Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        projection * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_set_aspect_tracks_dimensions() {
        let mut camera = Camera::new(800.0 / 600.0);
        camera.set_aspect(400.0, 300.0);
        assert!(approx_eq(camera.aspect, 400.0 / 300.0));
    }

    #[test]
    fn test_set_aspect_ignores_degenerate_sizes() {
        let mut camera = Camera::new(2.0);
        camera.set_aspect(800.0, 0.0);
        camera.set_aspect(0.0, 600.0);
        assert!(approx_eq(camera.aspect, 2.0));
    }

    #[test]
    fn test_origin_is_in_front_of_default_camera() {
        let camera = Camera::default();
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&ndc_z), "origin NDC z was {ndc_z}");
    }

    #[test]
    fn test_point_behind_camera_is_clipped() {
        let camera = Camera::default();
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 10.0, 1.0);
        assert!(clip.w < 0.0);
    }
}
