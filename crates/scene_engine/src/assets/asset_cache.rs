//! Mesh asset cache
//!
//! Deduplicates mesh assets by name and hands out shared references. Objects
//! keep an `Arc` to their asset, so an entry removed from the cache stays
//! alive until the last object using it is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::{AssetError, MeshAsset, MeshHandle};
use crate::foundation::math::Vec3;

/// Name-keyed store of shared mesh assets
#[derive(Debug, Default)]
pub struct AssetCache {
    meshes: HashMap<String, Arc<MeshAsset>>,
    next_handle: u64,
}

impl AssetCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an asset under its name, replacing any previous entry
    pub fn insert(&mut self, asset: MeshAsset) -> Arc<MeshAsset> {
        let asset = Arc::new(asset);
        if self.meshes.insert(asset.name.clone(), Arc::clone(&asset)).is_some() {
            log::warn!("Mesh asset '{}' replaced in cache", asset.name);
        } else {
            log::debug!("Mesh asset '{}' cached ({:?})", asset.name, asset.handle);
        }
        asset
    }

    /// Return the cached asset for `name`, or build it from vertex positions
    /// with a freshly allocated handle
    pub fn load_or_get(
        &mut self,
        name: &str,
        positions: &[Vec3],
    ) -> Result<Arc<MeshAsset>, AssetError> {
        if let Some(asset) = self.meshes.get(name) {
            return Ok(Arc::clone(asset));
        }

        let handle = self.allocate_handle();
        let asset = MeshAsset::from_positions(name, handle, positions)?;
        Ok(self.insert(asset))
    }

    /// Look up an asset by name
    pub fn get(&self, name: &str) -> Option<Arc<MeshAsset>> {
        self.meshes.get(name).cloned()
    }

    /// Drop the cache's reference to an asset
    pub fn remove(&mut self, name: &str) -> Option<Arc<MeshAsset>> {
        self.meshes.remove(name)
    }

    /// Number of cached assets
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// True when the cache holds nothing
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    fn allocate_handle(&mut self) -> MeshHandle {
        self.next_handle += 1;
        MeshHandle(self.next_handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Vec<Vec3> {
        vec![Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)]
    }

    #[test]
    fn test_load_or_get_shares_one_asset() {
        let mut cache = AssetCache::new();
        let first = cache.load_or_get("cube", &cube()).unwrap();
        let second = cache.load_or_get("cube", &[]).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_meshes_get_distinct_handles() {
        let mut cache = AssetCache::new();
        let cube = cache.load_or_get("cube", &cube()).unwrap();
        let rock = cache.load_or_get("rock", &[Vec3::zeros()]).unwrap();

        assert_ne!(cube.handle, rock.handle);
    }

    #[test]
    fn test_removed_asset_outlives_cache_entry() {
        let mut cache = AssetCache::new();
        let held = cache.load_or_get("cube", &cube()).unwrap();

        assert!(cache.remove("cube").is_some());
        assert!(cache.get("cube").is_none());
        assert_eq!(held.name, "cube");
    }

    #[test]
    fn test_empty_mesh_is_not_cached() {
        let mut cache = AssetCache::new();
        assert!(cache.load_or_get("empty", &[]).is_err());
        assert!(cache.is_empty());
    }
}
