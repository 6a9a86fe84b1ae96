//! Shooting gallery demo
//!
//! Headless run of the scene engine: a row of targets in front of a static
//! backdrop, a camera that swings from target to target firing shots, and a
//! click-to-remove pick every so often. Draw calls go to a context that only
//! counts them.
//!
//! Settings are read from `gallery.toml` when present. The frame count can be
//! passed as the first argument.

use std::sync::Arc;

use scene_engine::assets::{AssetCache, AssetError, MeshAsset};
use scene_engine::config::{Config, ConfigError};
use scene_engine::core::config::EngineConfig;
use scene_engine::foundation::logging;
use scene_engine::foundation::math::{Vec3, Vec4};
use scene_engine::foundation::time::FrameTimer;
use scene_engine::input::MouseState;
use scene_engine::physics::GeometryError;
use scene_engine::render::{
    Camera, DrawCall, Lighting, RenderContext, RenderError, RenderResult,
};
use scene_engine::scene::{GameObject, ObjectCategory, SceneCollection};

const CONFIG_PATH: &str = "gallery.toml";
const DEFAULT_FRAMES: u64 = 240;
const FIRE_INTERVAL: u64 = 6;
const PICK_INTERVAL: u64 = 45;
const INSPECT_INTERVAL: u64 = 20;
const TARGET_DEPTH: f32 = 15.0;

/// Demo errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scene placement or picking failed
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A mesh could not be registered
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    /// The render pass failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Render context that only counts submissions
#[derive(Default)]
struct CountingContext {
    frame_draws: usize,
    frame_in_front: usize,
    frame_lit: usize,
    total_draws: usize,
}

impl CountingContext {
    fn begin_frame(&mut self) {
        self.frame_draws = 0;
        self.frame_in_front = 0;
        self.frame_lit = 0;
    }
}

impl RenderContext for CountingContext {
    fn draw(&mut self, call: &DrawCall) -> RenderResult<()> {
        let clip = call.mvp() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        log::trace!("draw {:?} at clip {:?}", call.mesh, clip);

        self.frame_draws += 1;
        self.total_draws += 1;
        if clip.w > 0.0 {
            self.frame_in_front += 1;
        }
        if call.lighting.is_some() {
            self.frame_lit += 1;
        }
        Ok(())
    }
}

struct GalleryApp {
    scene: SceneCollection,
    camera: Camera,
    mouse: MouseState,
    shot_mesh: Arc<MeshAsset>,
    target_yaws: Vec<f32>,
    context: CountingContext,
    timer: FrameTimer,
    shots_fired: usize,
    targets_hit: usize,
}

impl GalleryApp {
    fn new(config: &EngineConfig) -> Result<Self, AppError> {
        let mut assets = AssetCache::new();
        let target_mesh = assets.load_or_get("target", &unit_cube())?;
        let shot_mesh = assets.load_or_get(
            "shot",
            &[Vec3::new(-0.2, -0.2, -0.2), Vec3::new(0.2, 0.2, 0.2)],
        )?;
        let lamp = Lighting {
            color: Vec3::new(1.0, 0.85, 0.6),
            ambient: 0.15,
            direction: Vec3::new(0.3, -1.0, 0.5).normalize(),
        };

        let mut scene = SceneCollection::from_config(config)?;

        scene.add_placed(
            ObjectCategory::Static,
            GameObject::new(Arc::clone(&target_mesh)),
            Vec3::new(0.0, 0.0, TARGET_DEPTH + 5.0),
            Vec3::zeros(),
            Vec3::new(40.0, 20.0, 0.5),
        )?;

        let mut target_yaws = Vec::new();
        for x in [-6.0_f32, -3.0, 0.0, 3.0, 6.0] {
            let position = Vec3::new(x, 0.0, TARGET_DEPTH);
            scene.add_placed(
                ObjectCategory::Dynamic,
                GameObject::new(Arc::clone(&target_mesh)).with_lighting(lamp),
                position,
                Vec3::new(0.0, x * 0.1, 0.0),
                Vec3::new(1.0, 1.0, 1.0),
            )?;
            target_yaws.push(x.atan2(TARGET_DEPTH));
        }

        let camera = Camera::from_viewport_config(&config.viewport);
        let mouse = MouseState::at(
            f64::from(config.viewport.width) / 2.0,
            f64::from(config.viewport.height) / 2.0,
            config.viewport.width,
            config.viewport.height,
        );

        log::info!(
            "Gallery ready: {} static, {} targets",
            scene.count(ObjectCategory::Static),
            scene.count(ObjectCategory::Dynamic)
        );

        Ok(Self {
            scene,
            camera,
            mouse,
            shot_mesh,
            target_yaws,
            context: CountingContext::default(),
            timer: FrameTimer::new(),
            shots_fired: 0,
            targets_hit: 0,
        })
    }

    fn run(&mut self, frames: u64) -> Result<(), AppError> {
        for frame in 1..=frames {
            self.update_input(frame)?;

            let report = self.scene.step_frame();
            self.targets_hit += report.sweep.dynamic_removed;
            for hit in &report.sweep.hits {
                log::info!(
                    "Frame {}: {:?} hit {:?} target",
                    frame,
                    hit.projectile,
                    hit.category
                );
            }

            self.context.begin_frame();
            self.scene.render_all(
                &mut self.context,
                &self.camera.view_matrix(),
                &self.camera.projection_matrix(),
            )?;

            let stats = self.timer.tick();
            log::debug!(
                "Frame {} ({:.3} ms): {} draws ({} in front, {} lit), {} culled",
                stats.frame,
                stats.delta_time * 1000.0,
                self.context.frame_draws,
                self.context.frame_in_front,
                self.context.frame_lit,
                report.culled
            );

            if self.scene.count(ObjectCategory::Dynamic) == 0 {
                log::info!("All targets down after {} frames", frame);
                break;
            }
        }

        log::info!(
            "Finished: {} shots, {} hits, {} draws, {:.0} fps",
            self.shots_fired,
            self.targets_hit,
            self.context.total_draws,
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Aim, fire and pick for this frame
    fn update_input(&mut self, frame: u64) -> Result<(), AppError> {
        if self.target_yaws.is_empty() {
            return Ok(());
        }

        let aim = (frame / FIRE_INTERVAL) as usize % self.target_yaws.len();
        self.camera.set_rotation(Vec3::new(0.0, self.target_yaws[aim], 0.0));

        if frame % FIRE_INTERVAL == 0 {
            self.scene.fire_from_camera(Arc::clone(&self.shot_mesh), &self.camera);
            self.shots_fired += 1;
        }

        self.mouse.set_left_click(frame % PICK_INTERVAL == 0);
        self.mouse.set_right_click(frame % INSPECT_INTERVAL == 0);

        if self.mouse.right_click {
            if let Some(id) = self.scene.pick_from_screen(&self.mouse, &self.camera)? {
                log::info!("Cursor over {:?}", id);
            }
        }
        if let Some((id, object)) = self.scene.remove_clicked(&self.mouse, &self.camera)? {
            log::info!("Picked {:?} at {:?}", id, object.position());
        }

        self.mouse.clear_clicks();
        Ok(())
    }
}

fn unit_cube() -> Vec<Vec3> {
    let mut corners = Vec::with_capacity(8);
    for x in [-0.5, 0.5] {
        for y in [-0.5, 0.5] {
            for z in [-0.5, 0.5] {
                corners.push(Vec3::new(x, y, z));
            }
        }
    }
    corners
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::load_or_default(CONFIG_PATH)?;
    config.validate()?;
    logging::init_with_default_level(&config.log_level);

    let frames = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_FRAMES,
    };

    log::info!("Starting shooting gallery for {} frames", frames);

    let mut app = GalleryApp::new(&config)?;
    if let Err(e) = app.run(frames) {
        log::error!("Application error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
