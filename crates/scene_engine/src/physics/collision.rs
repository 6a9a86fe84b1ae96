//! Ray and primitive intersection tests
//!
//! Rays for picking, bounding spheres for quick hit tests, and the free
//! functions the scene uses for box/box and ray/box queries.

use crate::foundation::math::{Mat4, Point3, Vec3};
use crate::physics::bounding_volume::BoundingVolume;

/// Geometry errors raised while building rays, transforms or projections
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A matrix that had to be inverted was singular
    #[error("Matrix is not invertible: {0}")]
    SingularMatrix(&'static str),

    /// A direction vector had zero length
    #[error("Direction vector has zero length")]
    ZeroDirection,

    /// A viewport dimension was zero
    #[error("Viewport is empty ({width}x{height})")]
    EmptyViewport {
        /// Width in pixels
        width: u32,
        /// Height in pixels
        height: u32,
    },

    /// Projection matrix has a zero scale term
    #[error("Projection matrix has a zero scale term")]
    DegenerateProjection,

    /// Scale component was zero, negative or not finite
    #[error("Invalid scale ({x}, {y}, {z}): components must be positive and finite")]
    InvalidScale {
        /// X component
        x: f32,
        /// Y component
        y: f32,
        /// Z component
        z: f32,
    },
}

impl GeometryError {
    pub(crate) fn invalid_scale(scale: &Vec3) -> Self {
        Self::InvalidScale {
            x: scale.x,
            y: scale.y,
            z: scale.z,
        }
    }
}

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray (unit length)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    ///
    /// Fails with [`GeometryError::ZeroDirection`] when the direction cannot be
    /// normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, GeometryError> {
        let direction = direction
            .try_normalize(f32::EPSILON)
            .ok_or(GeometryError::ZeroDirection)?;
        Ok(Self { origin, direction })
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map the ray through a transform: origin as a point, direction as a
    /// vector, then renormalize
    pub fn transformed(&self, matrix: &Mat4) -> Result<Self, GeometryError> {
        let origin = matrix.transform_point(&Point3::from(self.origin)).coords;
        let direction = matrix.transform_vector(&self.direction);
        Self::new(origin, direction)
    }
}

/// A bounding sphere for quick hit tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared <= radius_sum * radius_sum
    }

    /// Check if the infinite line through `ray` meets this sphere
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        ray_sphere_intersect(ray.origin - self.center, ray.direction, self.radius)
    }
}

/// Ray against a sphere centered at the origin
///
/// Only the discriminant of the quadratic is checked, so a sphere that lies
/// entirely behind the ray origin still reports a hit.
pub fn ray_sphere_intersect(origin: Vec3, direction: Vec3, radius: f32) -> bool {
    let a = direction.dot(&direction);
    let b = 2.0 * origin.dot(&direction);
    let c = origin.dot(&origin) - radius * radius;

    b * b - 4.0 * a * c >= 0.0
}

/// Ray against an axis-aligned box, unbounded in distance
pub fn ray_aabb_intersect(origin: Vec3, direction: Vec3, volume: &BoundingVolume) -> bool {
    volume.intersects_ray(origin, direction, f32::INFINITY)
}

/// Box against box overlap, touching faces included
pub fn boxes_intersect(a: &BoundingVolume, b: &BoundingVolume) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(ray.direction.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(ray.point_at(5.0), Vec3::new(3.0, 0.0, 4.0), epsilon = 1e-5);
    }

    #[test]
    fn test_ray_rejects_zero_direction() {
        assert_eq!(Ray::new(Vec3::zeros(), Vec3::zeros()), Err(GeometryError::ZeroDirection));
    }

    #[test]
    fn test_ray_sphere_hit_and_miss() {
        assert!(ray_sphere_intersect(Vec3::new(0.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0), 1.0));
        assert!(!ray_sphere_intersect(Vec3::new(5.0, 0.0, -10.0), Vec3::new(0.0, 0.0, 1.0), 1.0));
    }

    #[test]
    fn test_ray_sphere_ignores_direction_sign() {
        // Sphere behind the origin still counts: only the discriminant is tested
        assert!(ray_sphere_intersect(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0), 1.0));
    }

    #[test]
    fn test_bounding_sphere_ray_uses_center() {
        let sphere = BoundingSphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0);
        let through = Ray::new(Vec3::new(5.0, 0.0, -10.0), Vec3::z()).unwrap();
        let beside = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::z()).unwrap();

        assert!(sphere.intersects_ray(&through));
        assert!(!sphere.intersects_ray(&beside));
    }

    #[test]
    fn test_sphere_sphere_touching() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let c = BoundingSphere::new(Vec3::new(2.1, 0.0, 0.0), 1.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_ray_transformed_by_translation() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::z()).unwrap();
        let shift = Mat4::new_translation(&Vec3::new(-1.0, -2.0, 0.0));
        let local = ray.transformed(&shift).unwrap();

        assert_relative_eq!(local.origin, Vec3::new(0.0, 0.0, 3.0), epsilon = 1e-6);
        assert_relative_eq!(local.direction, Vec3::z(), epsilon = 1e-6);
    }

    #[test]
    fn test_ray_aabb_and_box_overlap_helpers() {
        let volume = BoundingVolume::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(1.0, 1.0, 1.0));
        let ray = Ray::new(Vec3::zeros(), Vec3::z()).unwrap();
        assert!(ray_aabb_intersect(ray.origin, ray.direction, &volume));

        let other = BoundingVolume::new(Vec3::new(0.0, 0.0, 7.0), Vec3::new(1.0, 1.0, 1.0));
        assert!(boxes_intersect(&volume, &other));
    }
}
