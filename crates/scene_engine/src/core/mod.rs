//! # Core Engine Module
//!
//! Shared configuration types used by every subsystem and by applications
//! at startup.

pub mod config;

// Re-export commonly used config types
pub use config::{
    EngineConfig,
    ViewportConfig,
    SceneConfig,
    ProjectileConfig,
};
pub use crate::config::{Config, ConfigError};
