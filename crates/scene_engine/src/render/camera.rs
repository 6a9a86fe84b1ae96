//! # 3D Camera
//!
//! Camera placed by a world position and Euler rotation, producing the view
//! and perspective projection matrices used for rendering and picking.
//!
//! ## Coordinate System
//! View space is left-handed and Y-up:
//! - X+ = Right
//! - Y+ = Up
//! - Z+ = Forward (into the screen)
//!
//! A camera with zero rotation looks down world +Z.

use crate::core::config::ViewportConfig;
use crate::foundation::math::{utils, Mat4, Mat4Ext, Quat, Vec3};

/// 3D perspective camera
///
/// Matrices are computed on demand from the current placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Euler rotation in radians (pitch about X, yaw about Y, roll about Z)
    pub rotation: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera at `position` with zero rotation
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees (stored as radians)
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            rotation: Vec3::zeros(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Create a camera at the origin from viewport settings
    pub fn from_viewport_config(viewport: &ViewportConfig) -> Self {
        Self::perspective(
            Vec3::zeros(),
            viewport.fov_degrees,
            viewport.aspect_ratio(),
            viewport.near,
            viewport.far,
        )
    }

    /// Move the camera to a new world position
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Move the camera by a world-space offset
    pub fn add_position(&mut self, offset: Vec3) {
        self.set_position(self.position + offset);
    }

    /// Replace the Euler rotation (radians)
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        log::trace!("Camera rotation updated to: {:?}", rotation);
    }

    /// Add to the Euler rotation (radians)
    pub fn add_rotation(&mut self, delta: Vec3) {
        self.set_rotation(self.rotation + delta);
    }

    /// Update the aspect ratio after a viewport resize
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Orientation as a quaternion
    pub fn orientation(&self) -> Quat {
        utils::euler_to_quat(self.rotation)
    }

    /// Unit vector the camera looks along
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::z()
    }

    /// Unit vector pointing up from the camera
    pub fn up(&self) -> Vec3 {
        self.orientation() * Vec3::y()
    }

    /// World-to-camera transform
    ///
    /// Equal to the inverse of the camera's own translation * rotation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to(self.position, self.forward(), self.up())
    }

    /// Perspective projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_viewport_config(&ViewportConfig::default())
    }
}
