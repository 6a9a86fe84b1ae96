//! Input handling
//!
//! Mouse state and screen-to-world picking. Polling the window system is left
//! to the application, which feeds positions into [`MouseState`].

pub mod picking;

pub use picking::{
    model_space_picking_ray,
    picking_ray,
    screen_ray,
    test_sphere_pick,
    MouseState,
};
