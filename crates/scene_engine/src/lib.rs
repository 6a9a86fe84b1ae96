//! # Scene Engine
//!
//! Scene core for a small real-time 3D engine: places meshes in the world,
//! turns mouse positions into picking rays, and runs the per-frame
//! projectile sweep that removes whatever the shots hit.
//!
//! ## Features
//!
//! - **Bounding Volumes**: center/extent boxes rebuilt from mesh extremes on every move
//! - **Picking**: screen-to-world rays, closest-hit selection, sphere tests
//! - **Projectiles**: firing, per-frame advancement, distance culling
//! - **Collision Sweep**: projectile vs. dynamic then static objects
//! - **Rendering Hand-off**: draw calls submitted through a `RenderContext` trait
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use scene_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::load_or_default("gallery.toml")?;
//!     let mut assets = AssetCache::new();
//!     let corners = [Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0)];
//!     let cube = assets.load_or_get("cube", &corners)?;
//!
//!     let mut scene = SceneCollection::from_config(&config)?;
//!     scene.add_placed(
//!         ObjectCategory::Dynamic,
//!         GameObject::new(Arc::clone(&cube)),
//!         Vec3::new(0.0, 0.0, 10.0),
//!         Vec3::zeros(),
//!         Vec3::new(1.0, 1.0, 1.0),
//!     )?;
//!
//!     let camera = Camera::from_viewport_config(&config.viewport);
//!     scene.fire_from_camera(cube, &camera);
//!     let report = scene.step_frame();
//!     println!("{} hit(s)", report.sweep.hits.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod input;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Vec3, Mat4, Quat, Transform},
            time::{FrameTimer, FrameStats},
        },
        assets::{AssetCache, AssetError, MeshAsset, MeshHandle, MeshProvider},
        render::{Camera, DrawCall, DrawRecorder, Lighting, RenderContext, RenderError},
        input::{MouseState, picking_ray},
        physics::{BoundingVolume, GeometryError, Ray},
        scene::{GameObject, ObjectCategory, ObjectId, SceneCollection, FrameReport, SweepReport},
        core::config::{EngineConfig, ViewportConfig, SceneConfig, ProjectileConfig},
        config::{Config, ConfigError},
    };
}
