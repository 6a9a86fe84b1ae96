//! Scene management
//!
//! Objects placed in the world and the collection that owns them.
//!
//! ## Frame order
//!
//! ```text
//! input → placement updates → advance projectiles → cull → sweep → render
//! ```
//!
//! [`SceneCollection::step_frame`] covers the middle three steps; callers do
//! input and placement before it and call [`SceneCollection::render_all`]
//! after it.

mod collection;
mod object;


pub use collection::{
    FrameReport, ObjectCategory, ObjectId, SceneCollection, SweepHit, SweepReport,
};
pub use object::{GameObject, Motion, Renderable};
