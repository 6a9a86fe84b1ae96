//! Scene objects
//!
//! A [`GameObject`] is a mesh placed in the world by position, Euler rotation
//! and non-uniform scale. The world matrix and world-space bounding volume
//! are cached and rebuilt on every placement change, always starting from
//! the mesh's own extreme points.
//!
//! Behaviour beyond placement is attached as optional components:
//! [`Renderable`], [`Lighting`](crate::render::Lighting) and [`Motion`].

use std::sync::Arc;

use crate::assets::{MeshAsset, MeshProvider};
use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::physics::{BoundingVolume, GeometryError};
use crate::render::{DrawCall, Lighting, TextureHandle};

/// Marks an object for drawing
#[derive(Debug, Clone, PartialEq)]
pub struct Renderable {
    /// Texture to bind, overriding the mesh default
    pub texture: Option<TextureHandle>,
    /// Hidden objects are skipped by the render pass
    pub visible: bool,
}

impl Default for Renderable {
    fn default() -> Self {
        Self {
            texture: None,
            visible: true,
        }
    }
}

/// Constant per-frame velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    /// World-space displacement applied by each [`GameObject::advance`]
    pub velocity: Vec3,
}

/// A mesh placed in the world
#[derive(Debug, Clone)]
pub struct GameObject {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,

    mesh: Arc<MeshAsset>,
    base_bounds: BoundingVolume,

    world: Mat4,
    bounds: BoundingVolume,

    renderable: Option<Renderable>,
    lighting: Option<Lighting>,
    motion: Option<Motion>,
}

impl GameObject {
    /// Create a renderable object at the origin with unit scale
    pub fn new(mesh: Arc<MeshAsset>) -> Self {
        let base_bounds = mesh.base_bounds();
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            mesh,
            base_bounds,
            world: Mat4::identity(),
            bounds: base_bounds,
            renderable: Some(Renderable::default()),
            lighting: None,
            motion: None,
        }
    }

    /// Create a renderable object that moves by `velocity` every frame
    pub fn projectile(mesh: Arc<MeshAsset>, velocity: Vec3) -> Self {
        Self::new(mesh).with_motion(Motion { velocity })
    }

    /// Attach or replace the render component
    pub fn with_renderable(mut self, renderable: Renderable) -> Self {
        self.renderable = Some(renderable);
        self
    }

    /// Remove the render component
    pub fn without_renderable(mut self) -> Self {
        self.renderable = None;
        self
    }

    /// Attach or replace the lighting component
    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = Some(lighting);
        self
    }

    /// Attach or replace the motion component
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = Some(motion);
        self
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Euler rotation in radians
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Per-axis scale
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Shared mesh asset
    pub fn mesh(&self) -> &Arc<MeshAsset> {
        &self.mesh
    }

    /// Cached model-to-world matrix (translation * rotation * scale)
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// Cached world-space bounding volume
    pub fn bounds(&self) -> &BoundingVolume {
        &self.bounds
    }

    /// Render component, if attached
    pub fn renderable(&self) -> Option<&Renderable> {
        self.renderable.as_ref()
    }

    /// Mutable render component, if attached
    pub fn renderable_mut(&mut self) -> Option<&mut Renderable> {
        self.renderable.as_mut()
    }

    /// Lighting component, if attached
    pub fn lighting(&self) -> Option<&Lighting> {
        self.lighting.as_ref()
    }

    /// Motion component, if attached
    pub fn motion(&self) -> Option<&Motion> {
        self.motion.as_ref()
    }

    /// Current velocity, zero for objects without a motion component
    pub fn velocity(&self) -> Vec3 {
        self.motion.map_or_else(Vec3::zeros, |m| m.velocity)
    }

    /// Move to an absolute world position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.recompute();
    }

    /// Move by a world-space offset
    pub fn add_position(&mut self, offset: Vec3) {
        self.position += offset;
        self.recompute();
    }

    /// Set the Euler rotation (radians)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.recompute();
    }

    /// Add to the Euler rotation (radians)
    pub fn add_rotation(&mut self, delta: Vec3) {
        self.rotation += delta;
        self.recompute();
    }

    /// Set the scale; every component must be positive and finite
    pub fn set_scale(&mut self, scale: Vec3) -> Result<(), GeometryError> {
        validate_scale(&scale)?;
        self.scale = scale;
        self.recompute();
        Ok(())
    }

    /// Add to the scale; the resulting scale must be positive and finite
    pub fn add_scale(&mut self, delta: Vec3) -> Result<(), GeometryError> {
        self.set_scale(self.scale + delta)
    }

    /// Replace position, rotation and scale at once
    ///
    /// Nothing changes if the scale is rejected.
    pub fn place(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<(), GeometryError> {
        validate_scale(&scale)?;
        self.place_unchecked(position, rotation, scale);
        Ok(())
    }

    /// Placement with a scale the caller has already validated
    pub(crate) fn place_unchecked(&mut self, position: Vec3, rotation: Vec3, scale: Vec3) {
        self.position = position;
        self.rotation = rotation;
        self.scale = scale;
        self.recompute();
    }

    /// Replace the velocity, attaching a motion component if needed
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.motion = Some(Motion { velocity });
    }

    /// Add to the velocity, attaching a motion component if needed
    pub fn add_velocity(&mut self, delta: Vec3) {
        let velocity = self.velocity() + delta;
        self.set_velocity(velocity);
    }

    /// Move by one frame of velocity; no-op without a motion component
    pub fn advance(&mut self) {
        if let Some(motion) = self.motion {
            self.add_position(motion.velocity);
        }
    }

    /// Describe this object for the render context
    ///
    /// Returns `None` when the object has no render component or is hidden.
    pub fn draw_call(&self, view: &Mat4, projection: &Mat4) -> Option<DrawCall> {
        let renderable = self.renderable.as_ref().filter(|r| r.visible)?;
        Some(DrawCall {
            mesh: self.mesh.mesh_handle(),
            world: self.world,
            view: *view,
            projection: *projection,
            texture: renderable.texture.or(self.mesh.texture),
            lighting: self.lighting,
        })
    }

    fn recompute(&mut self) {
        let transform = Transform::from_euler(self.position, self.rotation, self.scale);
        self.world = transform.to_matrix();
        self.bounds = self
            .base_bounds
            .transformed(self.scale, &transform.rotation, self.position);

        log::trace!(
            "Object '{}' bounds now center {:?} extents {:?}",
            self.mesh.name,
            self.bounds.center,
            self.bounds.extents
        );
    }
}

pub(crate) fn validate_scale(scale: &Vec3) -> Result<(), GeometryError> {
    if scale.iter().all(|s| s.is_finite() && *s > 0.0) {
        Ok(())
    } else {
        Err(GeometryError::invalid_scale(scale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MeshHandle;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    fn offset_cube() -> Arc<MeshAsset> {
        // Unit cube whose model-space center is not the origin
        Arc::new(MeshAsset::new(
            "offset_cube",
            MeshHandle(3),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 2.0, 2.0),
        ))
    }

    #[test]
    fn test_new_object_uses_mesh_bounds() {
        let object = GameObject::new(offset_cube());

        assert_eq!(object.position(), Vec3::zeros());
        assert_eq!(object.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(
            *object.bounds(),
            BoundingVolume::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0))
        );
        assert_eq!(*object.world_matrix(), Mat4::identity());
    }

    #[test]
    fn test_advance_integrates_velocity() {
        let velocity = Vec3::new(0.5, -1.0, 2.0);
        let mut projectile = GameObject::projectile(offset_cube(), velocity);
        projectile.set_position(Vec3::new(1.0, 1.0, 1.0));

        for _ in 0..10 {
            projectile.advance();
        }

        let expected = Vec3::new(1.0, 1.0, 1.0) + velocity * 10.0;
        assert_relative_eq!(projectile.position(), expected, epsilon = 1e-5);
        assert_relative_eq!(
            projectile.bounds().center,
            expected + Vec3::new(1.0, 1.0, 1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_advance_without_motion_is_noop() {
        let mut object = GameObject::new(offset_cube());
        object.advance();
        assert_eq!(object.position(), Vec3::zeros());
    }

    #[test]
    fn test_velocity_adders_attach_motion() {
        let mut object = GameObject::new(offset_cube());
        assert!(object.motion().is_none());

        object.add_velocity(Vec3::new(1.0, 0.0, 0.0));
        object.add_velocity(Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(object.velocity(), Vec3::new(1.0, 2.0, 0.0));

        object.set_velocity(Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(object.velocity(), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_bounds_rebuilt_not_accumulated() {
        let mut object = GameObject::new(offset_cube());
        object.set_scale(Vec3::new(2.0, 2.0, 2.0)).unwrap();
        object.set_scale(Vec3::new(2.0, 2.0, 2.0)).unwrap();
        object.set_position(Vec3::new(5.0, 0.0, 0.0));
        object.set_position(Vec3::new(5.0, 0.0, 0.0));

        assert_relative_eq!(object.bounds().extents, Vec3::new(2.0, 2.0, 2.0), epsilon = 1e-5);
        assert_relative_eq!(object.bounds().center, Vec3::new(7.0, 2.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_world_matrix_agrees_with_bounds() {
        let mut object = GameObject::new(offset_cube());
        object
            .place(Vec3::new(-3.0, 4.0, 1.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.5))
            .unwrap();

        let mesh_center = Point3::new(1.0, 1.0, 1.0);
        let moved = object.world_matrix().transform_point(&mesh_center);
        assert_relative_eq!(moved.coords, object.bounds().center, epsilon = 1e-5);
    }

    #[test]
    fn test_invalid_scale_rejected_and_state_kept() {
        let mut object = GameObject::new(offset_cube());
        let before = *object.bounds();

        assert!(matches!(
            object.set_scale(Vec3::new(1.0, 0.0, 1.0)),
            Err(GeometryError::InvalidScale { .. })
        ));
        assert!(object.add_scale(Vec3::new(-2.0, 0.0, 0.0)).is_err());
        assert!(object
            .place(Vec3::new(9.0, 9.0, 9.0), Vec3::zeros(), Vec3::new(f32::NAN, 1.0, 1.0))
            .is_err());

        assert_eq!(object.scale(), Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(object.position(), Vec3::zeros());
        assert_eq!(*object.bounds(), before);
    }

    #[test]
    fn test_draw_call_respects_visibility_and_texture() {
        let mesh = Arc::new(
            MeshAsset::new("tex", MeshHandle(9), Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0))
                .with_texture(TextureHandle(4)),
        );
        let view = Mat4::identity();
        let projection = Mat4::identity();

        let object = GameObject::new(Arc::clone(&mesh));
        let call = object.draw_call(&view, &projection).unwrap();
        assert_eq!(call.mesh, MeshHandle(9));
        assert_eq!(call.texture, Some(TextureHandle(4)));
        assert_eq!(call.lighting, None);

        let sun = Lighting {
            color: Vec3::new(1.0, 0.9, 0.7),
            ambient: 0.2,
            direction: Vec3::new(0.0, -1.0, 0.0),
        };
        let lit = GameObject::new(Arc::clone(&mesh)).with_lighting(sun);
        assert_eq!(lit.draw_call(&view, &projection).unwrap().lighting, Some(sun));

        let overridden = GameObject::new(Arc::clone(&mesh)).with_renderable(Renderable {
            texture: Some(TextureHandle(5)),
            visible: true,
        });
        let call = overridden.draw_call(&view, &projection).unwrap();
        assert_eq!(call.texture, Some(TextureHandle(5)));

        let hidden = GameObject::new(Arc::clone(&mesh)).with_renderable(Renderable {
            texture: None,
            visible: false,
        });
        assert!(hidden.draw_call(&view, &projection).is_none());
        let bare = GameObject::new(mesh).without_renderable();
        assert!(bare.draw_call(&view, &projection).is_none());
    }

    #[test]
    fn test_lighting_component_is_optional() {
        let lit = GameObject::new(offset_cube()).with_lighting(Lighting::default());
        assert_eq!(lit.lighting().map(|l| l.ambient), Some(0.1));
        assert!(GameObject::new(offset_cube()).lighting().is_none());
    }
}
