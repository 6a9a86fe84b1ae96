//! # Engine Configuration
//!
//! Concrete configuration for the scene core: viewport/projection, scene
//! limits and projectile defaults. All sections implement `Default` with the
//! values the engine has always shipped with, and every field may be omitted
//! from a config file.
//!
//! ```toml
//! log_level = "debug"
//!
//! [viewport]
//! width = 1280
//! height = 720
//!
//! [scene]
//! max_projectile_distance = 500.0
//! ```

use serde::{Serialize, Deserialize};

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// # Viewport Configuration
///
/// Screen size and perspective parameters used for projection and picking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl ViewportConfig {
    /// Width / height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// # Scene Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Projectiles further than this from the world origin are culled
    pub max_projectile_distance: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            max_projectile_distance: 1000.0,
        }
    }
}

/// # Projectile Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Scale applied to every projectile when it is added to the scene
    pub default_scale: [f32; 3],
    /// Distance travelled per frame when fired from the camera
    pub speed: f32,
}

impl ProjectileConfig {
    /// Default scale as a vector
    pub fn scale(&self) -> Vec3 {
        Vec3::from(self.default_scale)
    }
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            default_scale: [0.5, 0.5, 0.5],
            speed: 1.0,
        }
    }
}

/// # Engine Configuration
///
/// Top-level configuration that applications load at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Viewport and projection settings
    pub viewport: ViewportConfig,
    /// Scene limits
    pub scene: SceneConfig,
    /// Projectile defaults
    pub projectile: ProjectileConfig,
}

impl EngineConfig {
    /// Create a new engine configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            viewport: ViewportConfig::default(),
            scene: SceneConfig::default(),
            projectile: ProjectileConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set viewport size
    pub fn with_viewport_size(mut self, width: u32, height: u32) -> Self {
        self.viewport.width = width;
        self.viewport.height = height;
        self
    }

    /// Set the projectile cull distance
    pub fn with_max_projectile_distance(mut self, distance: f32) -> Self {
        self.scene.max_projectile_distance = distance;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid("viewport size must be non-zero".to_string()));
        }
        if !(self.viewport.near > 0.0 && self.viewport.far > self.viewport.near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far (near = {}, far = {})",
                self.viewport.near, self.viewport.far
            )));
        }
        if !(self.viewport.fov_degrees > 0.0 && self.viewport.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "field of view must be within (0, 180) degrees, got {}",
                self.viewport.fov_degrees
            )));
        }
        if self.scene.max_projectile_distance <= 0.0 {
            return Err(ConfigError::Invalid(
                "max projectile distance must be positive".to_string(),
            ));
        }
        if self.projectile.default_scale.iter().any(|s| !(*s > 0.0)) {
            return Err(ConfigError::Invalid(
                "projectile scale components must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
