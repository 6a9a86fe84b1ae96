//! Render context abstraction
//!
//! The scene never talks to a graphics API directly. It describes each object
//! as a [`DrawCall`] and hands it to whatever implements [`RenderContext`].

use crate::assets::MeshHandle;
use crate::foundation::math::{Mat4, Vec3};

/// Result type for render submissions
pub type RenderResult<T> = Result<T, RenderError>;

/// Handle to a texture resource owned by the render context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Directional lighting response passed to the shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Diffuse tint
    pub color: Vec3,
    /// Ambient contribution in [0, 1]
    pub ambient: f32,
    /// World-space direction the light travels
    pub direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient: 0.1,
            direction: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// Everything a backend needs to draw one object
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Mesh to draw
    pub mesh: MeshHandle,
    /// Model-to-world transform
    pub world: Mat4,
    /// World-to-camera transform
    pub view: Mat4,
    /// Camera projection
    pub projection: Mat4,
    /// Optional texture bound for this draw
    pub texture: Option<TextureHandle>,
    /// Lighting parameters; unlit when `None`
    pub lighting: Option<Lighting>,
}

impl DrawCall {
    /// Combined model-view-projection matrix
    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.world
    }
}

/// Capability to submit draw calls
///
/// Passed explicitly to the scene's render pass; nothing holds on to it
/// between frames.
pub trait RenderContext {
    /// Submit one draw
    fn draw(&mut self, call: &DrawCall) -> RenderResult<()>;
}

/// Errors reported by a render context
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A draw submission failed
    #[error("Draw failed: {0}")]
    DrawFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;

    #[test]
    fn test_mvp_applies_world_then_view_then_projection() {
        let call = DrawCall {
            mesh: MeshHandle(1),
            world: Mat4::new_translation(&Vec3::new(0.0, 0.0, 5.0)),
            view: Mat4::new_translation(&Vec3::new(1.0, 0.0, 0.0)),
            projection: Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 1.0)),
            texture: None,
            lighting: None,
        };

        let clip = call.mvp() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(clip, Vec4::new(2.0, 0.0, 5.0, 1.0));
    }
}
