//! Axis-aligned bounding boxes
//!
//! Every collision query in the game is box-vs-box. Boxes are always derived
//! from a pose each frame and never cached on an entity.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world (or model) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent per axis (negative on an axis means the box is empty there)
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Half the length of the box diagonal
    #[inline]
    pub fn half_diagonal(&self) -> f32 {
        self.size().length() * 0.5
    }

    /// True if every component of the box is finite
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// True iff the intervals overlap on all three axes (touching counts)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Intersection box, or `None` unless it has positive extent on every axis
    pub fn intersection(&self, other: &Aabb) -> Option<Aabb> {
        let overlap = Aabb {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        };
        let size = overlap.size();
        (size.x > 0.0 && size.y > 0.0 && size.z > 0.0).then_some(overlap)
    }

    /// Half the diagonal of the intersection box, 0 when the boxes only touch
    /// or are disjoint
    pub fn overlap_magnitude(&self, other: &Aabb) -> f32 {
        self.intersection(other)
            .map(|overlap| overlap.half_diagonal())
            .unwrap_or(0.0)
    }

    /// Closest point inside the box to `point`
    pub fn clamp_point(&self, point: Vec3) -> Vec3 {
        // Component-wise max/min rather than Vec3::clamp, which asserts min <= max
        point.max(self.min).min(self.max)
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Box scaled about the model origin
    pub fn scaled(&self, scale: f32) -> Aabb {
        let a = self.min * scale;
        let b = self.max * scale;
        Aabb {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// World box of this model-space box after scale, yaw about +Y and translation.
    ///
    /// Bounds all eight transformed corners, so a rotated box grows.
    pub fn transformed(&self, scale: f32, yaw: f32, translation: Vec3) -> Aabb {
        let rotation = Quat::from_rotation_y(yaw);
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for corner in self.corners() {
            let p = rotation * (corner * scale) + translation;
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_intersects_touching_and_disjoint() {
        let a = unit_box();
        let touching = Aabb::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
        let apart = Aabb::new(Vec3::new(1.5, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));

        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
        // Overlap on x and z is not enough
        let above = Aabb::new(Vec3::new(-0.5, 2.0, -0.5), Vec3::new(0.5, 3.0, 0.5));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_overlap_magnitude_example() {
        let vehicle = Aabb::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 1.0, 1.0));
        let pickup = Aabb::new(Vec3::new(0.5, 0.0, 0.5), Vec3::new(2.0, 1.0, 2.0));

        let overlap = vehicle.intersection(&pickup).unwrap();
        assert_eq!(overlap.min, Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(overlap.max, Vec3::new(1.0, 1.0, 1.0));

        let magnitude = vehicle.overlap_magnitude(&pickup);
        assert!((magnitude - 0.6124).abs() < 0.001);
    }

    #[test]
    fn test_touching_boxes_have_no_overlap() {
        let a = unit_box();
        let b = Aabb::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersection(&b).is_none());
        assert_eq!(a.overlap_magnitude(&b), 0.0);
    }

    #[test]
    fn test_degenerate_box_is_safe() {
        let flat = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        let magnitude = flat.overlap_magnitude(&unit_box());
        assert_eq!(magnitude, 0.0);

        // Inverted box: clamp_point must not panic
        let inverted = Aabb::new(Vec3::splat(1.0), Vec3::splat(-1.0));
        assert!(inverted.clamp_point(Vec3::splat(5.0)).is_finite());
    }

    #[test]
    fn test_clamp_point() {
        let b = Aabb::new(Vec3::new(0.5, 0.0, 0.5), Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(b.clamp_point(Vec3::new(0.0, 0.5, 0.0)), Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(b.clamp_point(Vec3::new(1.0, 0.5, 1.0)), Vec3::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn test_transformed_rotation_grows_box() {
        let b = Aabb::new(Vec3::new(-1.0, 0.0, -2.0), Vec3::new(1.0, 1.0, 2.0));

        let straight = b.transformed(1.0, 0.0, Vec3::ZERO);
        assert!((straight.size() - b.size()).length() < 1e-5);

        // Quarter turn swaps x and z extents
        let turned = b.transformed(1.0, std::f32::consts::FRAC_PI_2, Vec3::ZERO);
        assert!((turned.size().x - 4.0).abs() < 1e-4);
        assert!((turned.size().z - 2.0).abs() < 1e-4);

        let moved = b.transformed(2.0, 0.0, Vec3::new(10.0, 0.0, 0.0));
        assert!((moved.center() - Vec3::new(10.0, 1.0, 0.0)).length() < 1e-5);
        assert!((moved.size() - Vec3::new(4.0, 2.0, 8.0)).length() < 1e-5);
    }
}
