//! Asset management
//!
//! Mesh metadata and the shared cache objects draw their meshes from. File
//! parsing happens outside the engine core; callers hand in vertex positions
//! or known extreme points.

pub mod mesh_asset;
pub mod asset_cache;

pub use mesh_asset::{MeshAsset, MeshHandle, MeshProvider};
pub use asset_cache::AssetCache;

use thiserror::Error;

/// Asset errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    /// A mesh had no vertices to derive bounds from
    #[error("Mesh '{0}' has no vertices")]
    EmptyMesh(String),
}
