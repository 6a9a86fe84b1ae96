//! Mesh asset metadata
//!
//! The scene only needs two things from a loaded mesh: the handle the render
//! context knows it by and the model-space extreme points used to build
//! bounding volumes. Vertex data stays with whoever loaded it.

use crate::assets::AssetError;
use crate::foundation::math::Vec3;
use crate::physics::BoundingVolume;
use crate::render::TextureHandle;

/// Handle to a mesh resource owned by the render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Per-kind mesh access
pub trait MeshProvider {
    /// Model-space (min, max) corners of the mesh
    fn extreme_points(&self) -> (Vec3, Vec3);

    /// Handle used when submitting draws
    fn mesh_handle(&self) -> MeshHandle;

    /// Model-space bounding volume built from the extreme points
    fn base_bounds(&self) -> BoundingVolume {
        let (min, max) = self.extreme_points();
        BoundingVolume::from_extreme_points(min, max)
    }
}

/// Immutable description of a loaded mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshAsset {
    /// Name the asset was registered under
    pub name: String,
    /// Render-side mesh handle
    pub handle: MeshHandle,
    /// Minimum model-space corner
    pub min: Vec3,
    /// Maximum model-space corner
    pub max: Vec3,
    /// Default texture, if the mesh has one
    pub texture: Option<TextureHandle>,
}

impl MeshAsset {
    /// Create a mesh asset from known extreme points
    pub fn new(name: impl Into<String>, handle: MeshHandle, min: Vec3, max: Vec3) -> Self {
        Self {
            name: name.into(),
            handle,
            min,
            max,
            texture: None,
        }
    }

    /// Create a mesh asset by scanning vertex positions for their extremes
    pub fn from_positions(
        name: impl Into<String>,
        handle: MeshHandle,
        positions: &[Vec3],
    ) -> Result<Self, AssetError> {
        let name = name.into();
        let (first, rest) = positions
            .split_first()
            .ok_or_else(|| AssetError::EmptyMesh(name.clone()))?;

        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.inf(p), max.sup(p)));

        Ok(Self::new(name, handle, min, max))
    }

    /// Attach a default texture
    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }
}

impl MeshProvider for MeshAsset {
    fn extreme_points(&self) -> (Vec3, Vec3) {
        (self.min, self.max)
    }

    fn mesh_handle(&self) -> MeshHandle {
        self.handle
    }
}
