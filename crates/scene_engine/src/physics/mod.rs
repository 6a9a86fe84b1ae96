//! Physics module for collision detection
//!
//! Axis-aligned bounding volumes, rays and the intersection tests built on
//! them. There is no collision response; hits are reported to the scene,
//! which decides what to remove.

pub mod bounding_volume;
pub mod collision;

pub use bounding_volume::BoundingVolume;
pub use collision::{
    boxes_intersect,
    ray_aabb_intersect,
    ray_sphere_intersect,
    BoundingSphere,
    GeometryError,
    Ray,
};
