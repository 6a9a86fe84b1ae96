//! Axis-aligned bounding volume
//!
//! Center + half-extent box used as the conservative collision proxy for
//! every object in the scene.

use crate::foundation::math::{Quat, Vec3};

/// Axis-aligned bounding box stored as center and half extents
///
/// Extents are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingVolume {
    /// Center of the box
    pub center: Vec3,
    /// Half size along each axis
    pub extents: Vec3,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            extents: Vec3::zeros(),
        }
    }
}

impl BoundingVolume {
    /// Create a box from a center and half extents
    ///
    /// Negative extents are folded to their absolute value.
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    /// Create the box spanning two extreme points
    ///
    /// The points are ordered per axis first, so swapped corners still give
    /// the same box.
    pub fn from_extreme_points(min: Vec3, max: Vec3) -> Self {
        let lo = min.inf(&max);
        let hi = min.sup(&max);
        Self {
            center: (lo + hi) * 0.5,
            extents: (hi - lo) * 0.5,
        }
    }

    /// Minimum corner
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// Maximum corner
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// The eight corners of the box
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Scale, rotate and translate the box, returning the axis-aligned box
    /// that encloses the result.
    ///
    /// Rotation generally grows the box; it is conservative, not tight.
    pub fn transformed(&self, scale: Vec3, rotation: &Quat, translation: Vec3) -> Self {
        let corners = self.corners();
        let place = |corner: &Vec3| translation + rotation * scale.component_mul(corner);

        let first = place(&corners[0]);
        let (lo, hi) = corners[1..].iter().map(place).fold((first, first), |(lo, hi), p| {
            (lo.inf(&p), hi.sup(&p))
        });

        Self::from_extreme_points(lo, hi)
    }

    /// Check if this box overlaps another (touching faces count)
    pub fn intersects(&self, other: &BoundingVolume) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.extents + other.extents;
        delta.x <= reach.x && delta.y <= reach.y && delta.z <= reach.z
    }

    /// Check if a point lies inside or on the box
    pub fn contains_point(&self, point: Vec3) -> bool {
        let delta = (point - self.center).abs();
        delta.x <= self.extents.x && delta.y <= self.extents.y && delta.z <= self.extents.z
    }

    /// Check if the ray `origin + t * direction` touches the box for some
    /// `t` in `[0, max_distance]`
    ///
    /// `direction` does not have to be normalized; `max_distance` is then
    /// measured in multiples of its length.
    pub fn intersects_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> bool {
        self.ray_entry_distance(origin, direction)
            .is_some_and(|t| t <= max_distance)
    }

    /// Slab test returning the parameter where the ray enters the box
    ///
    /// Returns `Some(0.0)` when the origin is already inside and `None` when
    /// the box is missed or lies entirely behind the origin.
    pub fn ray_entry_distance(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let lo = self.min();
        let hi = self.max();

        let mut t_enter = 0.0_f32;
        let mut t_exit = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];

            if d == 0.0 {
                // Parallel to this slab: must already be between its planes
                if o < lo[axis] || o > hi[axis] {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo[axis] - o) * inv;
            let mut t1 = (hi[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(t_enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn unit_box_at(center: Vec3) -> BoundingVolume {
        BoundingVolume::new(center, Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_from_extreme_points_midpoint_and_extents() {
        let min = Vec3::new(-2.0, 0.0, 1.0);
        let max = Vec3::new(4.0, 2.0, 1.0);
        let volume = BoundingVolume::from_extreme_points(min, max);

        assert_relative_eq!(volume.center, Vec3::new(1.0, 1.0, 1.0), epsilon = EPSILON);
        assert_relative_eq!(volume.extents, Vec3::new(3.0, 1.0, 0.0), epsilon = EPSILON);
        assert_relative_eq!(volume.min(), min, epsilon = EPSILON);
        assert_relative_eq!(volume.max(), max, epsilon = EPSILON);
    }

    #[test]
    fn test_from_extreme_points_swapped_corners() {
        let forward = BoundingVolume::from_extreme_points(
            Vec3::new(-1.0, -2.0, -3.0),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let swapped = BoundingVolume::from_extreme_points(
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 2.0, -3.0),
        );

        assert_eq!(forward, swapped);
        assert!(swapped.extents.iter().all(|e| *e >= 0.0));
    }

    #[test]
    fn test_identity_transform_leaves_box_unchanged() {
        let volume = BoundingVolume::new(Vec3::new(3.0, -1.0, 2.0), Vec3::new(0.5, 2.0, 1.5));
        let same = volume.transformed(Vec3::new(1.0, 1.0, 1.0), &Quat::identity(), Vec3::zeros());

        assert_relative_eq!(same.center, volume.center, epsilon = EPSILON);
        assert_relative_eq!(same.extents, volume.extents, epsilon = EPSILON);
    }

    #[test]
    fn test_transform_scale_then_translate() {
        let volume = BoundingVolume::from_extreme_points(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let placed = volume.transformed(
            Vec3::new(2.0, 1.0, 3.0),
            &Quat::identity(),
            Vec3::new(10.0, 0.0, -5.0),
        );

        assert_relative_eq!(placed.center, Vec3::new(10.0, 0.0, -5.0), epsilon = EPSILON);
        assert_relative_eq!(placed.extents, Vec3::new(2.0, 1.0, 3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_enlarges_box() {
        let volume = BoundingVolume::from_extreme_points(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        );
        let quarter = Quat::from_euler_angles(0.0, std::f32::consts::FRAC_PI_4, 0.0);
        let rotated = volume.transformed(Vec3::new(1.0, 1.0, 1.0), &quarter, Vec3::zeros());

        let diagonal = std::f32::consts::SQRT_2;
        assert_relative_eq!(rotated.extents, Vec3::new(diagonal, 1.0, diagonal), epsilon = 1e-4);
        assert_relative_eq!(rotated.center, Vec3::zeros(), epsilon = EPSILON);
    }

    #[test]
    fn test_box_overlap_is_symmetric() {
        let boxes = [
            unit_box_at(Vec3::zeros()),
            unit_box_at(Vec3::new(2.0, 0.0, 0.0)),
            unit_box_at(Vec3::new(2.5, 0.0, 0.0)),
            BoundingVolume::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.1, 4.0, 0.1)),
            BoundingVolume::new(Vec3::new(-3.0, -3.0, -3.0), Vec3::new(0.5, 0.5, 0.5)),
        ];

        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
            }
        }
    }

    #[test]
    fn test_box_overlap_inclusive_boundary() {
        let a = unit_box_at(Vec3::zeros());
        let touching = unit_box_at(Vec3::new(2.0, 0.0, 0.0));
        let apart = unit_box_at(Vec3::new(2.001, 0.0, 0.0));

        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_ray_through_center_hits_on_every_axis() {
        let volume = BoundingVolume::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 0.25, 2.0));
        let axes = [Vec3::x(), Vec3::y(), Vec3::z()];

        for axis in axes {
            let origin = volume.center - axis * 10.0;
            assert!(volume.intersects_ray(origin, axis, f32::INFINITY));
            assert!(volume.intersects_ray(volume.center + axis * 10.0, -axis, f32::INFINITY));
        }
    }

    #[test]
    fn test_parallel_ray_offset_beyond_extent_misses() {
        let volume = unit_box_at(Vec3::zeros());
        let origin = Vec3::new(0.0, 1.01, -10.0);
        assert!(!volume.intersects_ray(origin, Vec3::z(), f32::INFINITY));

        let grazing = Vec3::new(0.0, 1.0, -10.0);
        assert!(volume.intersects_ray(grazing, Vec3::z(), f32::INFINITY));
    }

    #[test]
    fn test_ray_respects_max_distance_and_direction() {
        let volume = unit_box_at(Vec3::new(0.0, 0.0, 10.0));
        let origin = Vec3::zeros();

        assert!(volume.intersects_ray(origin, Vec3::z(), 9.0));
        assert!(!volume.intersects_ray(origin, Vec3::z(), 8.5));
        assert!(!volume.intersects_ray(origin, -Vec3::z(), f32::INFINITY));
    }

    #[test]
    fn test_ray_entry_distance_inside_is_zero() {
        let volume = unit_box_at(Vec3::zeros());
        assert_eq!(volume.ray_entry_distance(Vec3::zeros(), Vec3::x()), Some(0.0));

        let entry = volume
            .ray_entry_distance(Vec3::new(-5.0, 0.0, 0.0), Vec3::x())
            .expect("ray hits box");
        assert_relative_eq!(entry, 4.0, epsilon = EPSILON);
    }

    #[test]
    fn test_contains_point() {
        let volume = unit_box_at(Vec3::zeros());
        assert!(volume.contains_point(Vec3::new(1.0, -1.0, 0.5)));
        assert!(!volume.contains_point(Vec3::new(1.1, 0.0, 0.0)));
    }
}
