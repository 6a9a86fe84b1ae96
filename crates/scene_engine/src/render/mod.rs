//! # Rendering Interface
//!
//! The engine core does not own a graphics API. This module holds what the
//! scene needs to hand objects to one:
//! - **Camera**: position + Euler rotation, view and projection matrices
//! - **RenderContext**: the trait a backend implements to accept draw calls
//! - **DrawRecorder**: headless context that records submissions

pub mod camera;
pub mod context;
pub mod recorder;

pub use camera::Camera;
pub use context::{DrawCall, Lighting, RenderContext, RenderError, RenderResult, TextureHandle};
pub use recorder::DrawRecorder;
