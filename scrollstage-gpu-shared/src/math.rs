use glam::{Mat4, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Bounding box of a point set. Returns `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Aabb {
            min: first,
            max: first,
        };
        for point in iter {
            bounds.expand(point);
        }
        Some(bounds)
    }

    /// Grow the box to contain `point`.
    pub fn expand(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Transform that moves the bounding-box center to the origin and applies a
/// uniform scale. Applied exactly once, when the model is attached; later
/// mutations of the model do not re-center it.
pub fn normalize_transform(bounds: &Aabb, scale: f32) -> Mat4 {
    Mat4::from_scale(Vec3::splat(scale)) * Mat4::from_translation(-bounds.center())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    // ── Aabb ──

    #[test]
    fn test_from_points_empty() {
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_from_points_single() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        let bounds = Aabb::from_points([p]).unwrap();
        assert_eq!(bounds.min, p);
        assert_eq!(bounds.max, p);
        assert!(approx_eq_vec3(bounds.center(), p));
    }

    #[test]
    fn test_from_points_extremes() {
        let bounds = Aabb::from_points([
            Vec3::new(-1.0, 0.0, 2.0),
            Vec3::new(3.0, -4.0, 0.0),
            Vec3::new(0.0, 5.0, -6.0),
        ])
        .unwrap();
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, -6.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 5.0, 2.0));
    }

    #[test]
    fn test_new_orders_corners() {
        let bounds = Aabb::new(Vec3::new(2.0, -1.0, 5.0), Vec3::new(-2.0, 1.0, 0.0));
        assert_eq!(bounds.min, Vec3::new(-2.0, -1.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(2.0, 1.0, 5.0));
    }

    #[test]
    fn test_union_contains_both() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::ZERO);
        assert_eq!(u.max, Vec3::splat(3.0));
    }

    // ── normalize_transform ──

    #[test]
    fn test_normalize_centers_at_origin() {
        let bounds = Aabb::new(Vec3::new(2.0, 4.0, 6.0), Vec3::new(4.0, 8.0, 10.0));
        let transform = normalize_transform(&bounds, 1.5);
        let center = transform.transform_point3(bounds.center());
        assert!(
            approx_eq_vec3(center, Vec3::ZERO),
            "center mapped to {center}, expected origin"
        );
    }

    #[test]
    fn test_normalize_scale_is_uniform() {
        let bounds = Aabb::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(5.0, 2.0, 3.0));
        let transform = normalize_transform(&bounds, 1.5);
        let (scale, _, _) = transform.to_scale_rotation_translation();
        assert!(approx_eq_vec3(scale, Vec3::splat(1.5)), "scale was {scale}");
    }

    #[test]
    fn test_normalize_preserves_extent_ratio() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 4.0, 8.0));
        let transform = normalize_transform(&bounds, 1.5);
        let lo = transform.transform_point3(bounds.min);
        let hi = transform.transform_point3(bounds.max);
        assert!(approx_eq_vec3(hi - lo, bounds.size() * 1.5));
        // Min and max end up symmetric around the origin.
        assert!(approx_eq_vec3(lo, -hi));
    }
}
