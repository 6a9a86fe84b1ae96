//! Mouse picking
//!
//! Converts a pixel position into a ray in world space (or in the model space
//! of one object) so it can be tested against scene geometry.

use crate::foundation::math::{Mat4, Vec3};
use crate::physics::{ray_sphere_intersect, GeometryError, Ray};
use crate::render::Camera;

/// Mouse state for picking operations
#[derive(Debug, Clone, PartialEq)]
pub struct MouseState {
    /// Current screen-space X position (pixels from left)
    pub screen_x: f64,
    /// Current screen-space Y position (pixels from top)
    pub screen_y: f64,
    /// Viewport width in pixels
    pub window_width: u32,
    /// Viewport height in pixels
    pub window_height: u32,
    /// Left mouse button pressed this frame
    pub left_click: bool,
    /// Right mouse button pressed this frame
    pub right_click: bool,
}

impl MouseState {
    /// Create a new mouse state at the top-left corner
    pub fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: 0.0,
            screen_y: 0.0,
            window_width,
            window_height,
            left_click: false,
            right_click: false,
        }
    }

    /// Create a mouse state at a given pixel position
    pub fn at(x: f64, y: f64, window_width: u32, window_height: u32) -> Self {
        Self {
            screen_x: x,
            screen_y: y,
            ..Self::new(window_width, window_height)
        }
    }

    /// Convert screen coordinates to Normalized Device Coordinates (NDC)
    ///
    /// NDC range: [-1, 1] where:
    /// - X: -1 = left, +1 = right
    /// - Y: +1 = top, -1 = bottom
    pub fn screen_to_ndc(&self) -> Result<(f32, f32), GeometryError> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(GeometryError::EmptyViewport {
                width: self.window_width,
                height: self.window_height,
            });
        }

        let ndc_x = (2.0 * self.screen_x / self.window_width as f64 - 1.0) as f32;
        let ndc_y = -(2.0 * self.screen_y / self.window_height as f64 - 1.0) as f32;
        Ok((ndc_x, ndc_y))
    }

    /// Update mouse position from window events
    pub fn update_position(&mut self, x: f64, y: f64) {
        self.screen_x = x;
        self.screen_y = y;
    }

    /// Update viewport size (call on resize)
    pub fn update_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    /// Set left mouse button state
    pub fn set_left_click(&mut self, clicked: bool) {
        self.left_click = clicked;
    }

    /// Set right mouse button state
    pub fn set_right_click(&mut self, clicked: bool) {
        self.right_click = clicked;
    }

    /// Clear all click states (call at end of frame)
    pub fn clear_clicks(&mut self) {
        self.left_click = false;
        self.right_click = false;
    }
}

impl Default for MouseState {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Build a picking ray from a pixel position
///
/// The direction is the inverse view rotation applied to the NDC position
/// divided by the projection's X/Y scale terms, with Z = 1. The origin is
/// the camera position. When `world` is given the ray is carried into that
/// object's model space.
pub fn screen_ray(
    mouse: &MouseState,
    projection: &Mat4,
    view: &Mat4,
    camera_position: Vec3,
    world: Option<&Mat4>,
) -> Result<Ray, GeometryError> {
    let (ndc_x, ndc_y) = mouse.screen_to_ndc()?;

    let scale_x = projection[(0, 0)];
    let scale_y = projection[(1, 1)];
    if scale_x == 0.0 || scale_y == 0.0 {
        return Err(GeometryError::DegenerateProjection);
    }

    let inverse_view = view
        .try_inverse()
        .ok_or(GeometryError::SingularMatrix("view"))?;
    let direction =
        inverse_view.transform_vector(&Vec3::new(ndc_x / scale_x, ndc_y / scale_y, 1.0));

    let ray = Ray::new(camera_position, direction)?;

    match world {
        Some(world) => {
            let inverse_world = world
                .try_inverse()
                .ok_or(GeometryError::SingularMatrix("world"))?;
            ray.transformed(&inverse_world)
        }
        None => Ok(ray),
    }
}

/// World-space picking ray for a camera
pub fn picking_ray(mouse: &MouseState, camera: &Camera) -> Result<Ray, GeometryError> {
    screen_ray(
        mouse,
        &camera.projection_matrix(),
        &camera.view_matrix(),
        camera.position,
        None,
    )
}

/// Picking ray in the model space of an object placed by `world`
pub fn model_space_picking_ray(
    mouse: &MouseState,
    camera: &Camera,
    world: &Mat4,
) -> Result<Ray, GeometryError> {
    screen_ray(
        mouse,
        &camera.projection_matrix(),
        &camera.view_matrix(),
        camera.position,
        Some(world),
    )
}

/// Test the mouse against a sphere of `radius` placed at `sphere_translation`
pub fn test_sphere_pick(
    mouse: &MouseState,
    camera: &Camera,
    sphere_translation: Vec3,
    radius: f32,
) -> Result<bool, GeometryError> {
    let world = Mat4::new_translation(&sphere_translation);
    let ray = model_space_picking_ray(mouse, camera, &world)?;
    let hit = ray_sphere_intersect(ray.origin, ray.direction, radius);

    log::trace!("Sphere pick at {:?} (r = {}): {}", sphere_translation, radius, hit);
    Ok(hit)
}
