//! Scene collection
//!
//! Owns every object in the scene and keeps three ordered sequences of ids:
//! static scenery, dynamic (shootable, pickable) objects and projectiles.
//! Objects live in a slotmap arena, so identity is the [`ObjectId`] and two
//! objects with identical placement are still distinct.
//!
//! Per frame the collection advances projectiles, culls the ones that flew
//! too far, and runs the collision sweep that removes each projectile
//! together with the first object it overlaps.

use std::sync::Arc;

use slotmap::SlotMap;

use crate::assets::MeshAsset;
use crate::core::config::EngineConfig;
use crate::foundation::collections::{normalize_indices, remove_sorted_indices};
use crate::foundation::math::{utils, Mat4, Vec3};
use crate::input::{picking_ray, MouseState};
use crate::physics::{BoundingVolume, GeometryError, Ray};
use crate::render::{Camera, RenderContext, RenderResult};
use crate::scene::object::{validate_scale, GameObject};

slotmap::new_key_type! {
    /// Identity of an object owned by a [`SceneCollection`]
    pub struct ObjectId;
}

/// Which sequence an object belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectCategory {
    /// Scenery: collides with projectiles, drawn first
    Static,
    /// Shootable and pickable objects
    Dynamic,
    /// Moving shots fired into the scene
    Projectile,
}

/// One projectile/target match found by the collision sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepHit {
    /// The projectile that hit
    pub projectile: ObjectId,
    /// The object it hit
    pub target: ObjectId,
    /// Sequence the target was removed from
    pub category: ObjectCategory,
}

/// Outcome of [`SceneCollection::run_collision_sweep`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepReport {
    /// Matches in projectile order
    pub hits: Vec<SweepHit>,
    /// Projectiles removed
    pub projectiles_removed: usize,
    /// Dynamic objects removed
    pub dynamic_removed: usize,
    /// Static objects removed
    pub static_removed: usize,
}

impl SweepReport {
    /// True when nothing collided
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Outcome of [`SceneCollection::step_frame`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Projectiles moved this frame
    pub advanced: usize,
    /// Projectiles removed for flying past the distance limit
    pub culled: usize,
    /// Collision sweep results
    pub sweep: SweepReport,
}

/// Arena-backed store of scene objects
#[derive(Debug)]
pub struct SceneCollection {
    objects: SlotMap<ObjectId, GameObject>,
    static_ids: Vec<ObjectId>,
    dynamic_ids: Vec<ObjectId>,
    projectile_ids: Vec<ObjectId>,

    max_projectile_distance: f32,
    projectile_scale: Vec3,
    projectile_speed: f32,
}

impl Default for SceneCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCollection {
    /// Create an empty collection with default limits
    pub fn new() -> Self {
        let defaults = EngineConfig::default();
        Self {
            objects: SlotMap::with_key(),
            static_ids: Vec::new(),
            dynamic_ids: Vec::new(),
            projectile_ids: Vec::new(),
            max_projectile_distance: defaults.scene.max_projectile_distance,
            projectile_scale: defaults.projectile.scale(),
            projectile_speed: defaults.projectile.speed,
        }
    }

    /// Create an empty collection using the scene and projectile settings
    pub fn from_config(config: &EngineConfig) -> Result<Self, GeometryError> {
        let projectile_scale = config.projectile.scale();
        validate_scale(&projectile_scale)?;

        Ok(Self {
            max_projectile_distance: config.scene.max_projectile_distance,
            projectile_scale,
            projectile_speed: config.projectile.speed,
            ..Self::new()
        })
    }

    /// Distance from the origin beyond which projectiles are culled
    pub fn max_projectile_distance(&self) -> f32 {
        self.max_projectile_distance
    }

    /// Append an object to a sequence
    pub fn add(&mut self, category: ObjectCategory, object: GameObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.sequence_mut(category).push(id);
        log::debug!("Added {:?} object {:?}", category, id);
        id
    }

    /// Place an object, then append it
    ///
    /// The stored bounding volume already reflects the placement. Fails only
    /// when `scale` is rejected, in which case nothing is added.
    pub fn add_placed(
        &mut self,
        category: ObjectCategory,
        mut object: GameObject,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> Result<ObjectId, GeometryError> {
        object.place(position, rotation, scale)?;
        Ok(self.add(category, object))
    }

    /// Append a projectile at `position` with rotation in radians, using the
    /// configured projectile scale
    pub fn add_projectile(
        &mut self,
        mut object: GameObject,
        position: Vec3,
        rotation: Vec3,
    ) -> ObjectId {
        object.place_unchecked(position, rotation, self.projectile_scale);
        self.add(ObjectCategory::Projectile, object)
    }

    /// Fire a projectile from the camera along its view direction
    pub fn fire_from_camera(&mut self, mesh: Arc<MeshAsset>, camera: &Camera) -> ObjectId {
        let velocity = camera.forward() * self.projectile_speed;
        let projectile = GameObject::projectile(mesh, velocity);
        self.add_projectile(projectile, camera.position, camera.rotation)
    }

    /// Find an object by identity within one sequence
    pub fn find(&self, category: ObjectCategory, id: ObjectId) -> Option<&GameObject> {
        if self.sequence(category).contains(&id) {
            self.objects.get(id)
        } else {
            None
        }
    }

    /// Look up any object by identity
    pub fn get(&self, id: ObjectId) -> Option<&GameObject> {
        self.objects.get(id)
    }

    /// Mutable access to any object; its setters keep bounds current
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    /// Sequence an object belongs to
    pub fn category_of(&self, id: ObjectId) -> Option<ObjectCategory> {
        [ObjectCategory::Static, ObjectCategory::Dynamic, ObjectCategory::Projectile]
            .into_iter()
            .find(|category| self.sequence(*category).contains(&id))
    }

    /// Objects of one sequence in insertion order
    pub fn iter(
        &self,
        category: ObjectCategory,
    ) -> impl Iterator<Item = (ObjectId, &GameObject)> + '_ {
        self.sequence(category)
            .iter()
            .filter_map(move |id| self.objects.get(*id).map(|object| (*id, object)))
    }

    /// Ids of one sequence in insertion order
    pub fn ids(&self, category: ObjectCategory) -> &[ObjectId] {
        self.sequence(category)
    }

    /// Number of objects in one sequence
    pub fn count(&self, category: ObjectCategory) -> usize {
        self.sequence(category).len()
    }

    /// Number of objects across all sequences
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds nothing
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove an object by identity, searching dynamic objects before static
    ///
    /// Returns `None` when the id is in neither sequence.
    pub fn remove(&mut self, id: ObjectId) -> Option<GameObject> {
        for category in [ObjectCategory::Dynamic, ObjectCategory::Static] {
            let sequence = self.sequence_mut(category);
            if let Some(index) = sequence.iter().position(|candidate| *candidate == id) {
                sequence.remove(index);
                log::debug!("Removed {:?} object {:?}", category, id);
                return self.objects.remove(id);
            }
        }
        None
    }

    /// Remove the objects at `indices` of one sequence
    ///
    /// Indices refer to the sequence before any removal and are sorted and
    /// de-duplicated first.
    pub fn remove_at_indices(&mut self, category: ObjectCategory, indices: &[usize]) -> usize {
        let mut indices = indices.to_vec();
        normalize_indices(&mut indices);

        let sequence = self.sequence(category);
        let doomed: Vec<ObjectId> = indices
            .iter()
            .filter_map(|&i| sequence.get(i).copied())
            .collect();

        let removed = remove_sorted_indices(self.sequence_mut(category), &indices);
        for id in doomed {
            self.objects.remove(id);
        }
        removed
    }

    /// Move every projectile by one frame of velocity
    pub fn advance_projectiles(&mut self) -> usize {
        let mut advanced = 0;
        for id in &self.projectile_ids {
            if let Some(projectile) = self.objects.get_mut(*id) {
                projectile.advance();
                advanced += 1;
            }
        }
        advanced
    }

    /// Remove projectiles whose distance from the world origin exceeds
    /// `max_distance`, preserving the order of the rest
    pub fn cull_distant_projectiles(&mut self, max_distance: f32) -> usize {
        let distant: Vec<usize> = self
            .projectile_ids
            .iter()
            .enumerate()
            .filter(|(_, id)| {
                self.objects
                    .get(**id)
                    .is_some_and(|p| utils::length_estimate(&p.position()) > max_distance)
            })
            .map(|(index, _)| index)
            .collect();

        let culled = self.remove_at_indices(ObjectCategory::Projectile, &distant);
        if culled > 0 {
            log::debug!("Culled {} projectile(s) beyond {}", culled, max_distance);
        }
        culled
    }

    /// Match each projectile against dynamic objects, then static objects,
    /// and remove every matched pair
    ///
    /// A projectile consumes at most one object. Every projectile is tested
    /// against the full sequences, so several projectiles may hit the same
    /// object; it is still removed once.
    pub fn run_collision_sweep(&mut self) -> SweepReport {
        let mut hits = Vec::new();
        let mut projectile_indices = Vec::new();
        let mut dynamic_indices = Vec::new();
        let mut static_indices = Vec::new();

        for (projectile_index, projectile_id) in self.projectile_ids.iter().enumerate() {
            let Some(projectile) = self.objects.get(*projectile_id) else {
                continue;
            };
            let bounds = projectile.bounds();

            let matched = first_overlap(&self.objects, &self.dynamic_ids, bounds)
                .map(|(index, id)| (ObjectCategory::Dynamic, index, id))
                .or_else(|| {
                    first_overlap(&self.objects, &self.static_ids, bounds)
                        .map(|(index, id)| (ObjectCategory::Static, index, id))
                });

            if let Some((category, index, target)) = matched {
                log::debug!(
                    "Projectile {:?} hit {:?} object {:?}",
                    projectile_id,
                    category,
                    target
                );
                projectile_indices.push(projectile_index);
                match category {
                    ObjectCategory::Dynamic => dynamic_indices.push(index),
                    _ => static_indices.push(index),
                }
                hits.push(SweepHit {
                    projectile: *projectile_id,
                    target,
                    category,
                });
            }
        }

        SweepReport {
            hits,
            projectiles_removed: self
                .remove_at_indices(ObjectCategory::Projectile, &projectile_indices),
            dynamic_removed: self.remove_at_indices(ObjectCategory::Dynamic, &dynamic_indices),
            static_removed: self.remove_at_indices(ObjectCategory::Static, &static_indices),
        }
    }

    /// Advance projectiles, cull distant ones, then run the collision sweep
    pub fn step_frame(&mut self) -> FrameReport {
        let advanced = self.advance_projectiles();
        let culled = self.cull_distant_projectiles(self.max_projectile_distance);
        let sweep = self.run_collision_sweep();

        FrameReport { advanced, culled, sweep }
    }

    /// Among dynamic and static objects whose bounds the ray hits, the one
    /// nearest to `camera_position`
    ///
    /// Candidates are ranked by the distance from their position to the
    /// camera, not by where the ray enters their bounds.
    pub fn pick_closest(&self, ray: &Ray, camera_position: Vec3) -> Option<ObjectId> {
        self.dynamic_ids
            .iter()
            .chain(&self.static_ids)
            .filter_map(|id| self.objects.get(*id).map(|object| (*id, object)))
            .filter(|(_, object)| {
                object
                    .bounds()
                    .intersects_ray(ray.origin, ray.direction, f32::INFINITY)
            })
            .map(|(id, object)| (id, (object.position() - camera_position).norm_squared()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Pick under the mouse cursor
    pub fn pick_from_screen(
        &self,
        mouse: &MouseState,
        camera: &Camera,
    ) -> Result<Option<ObjectId>, GeometryError> {
        let ray = picking_ray(mouse, camera)?;
        let picked = self.pick_closest(&ray, camera.position);
        log::debug!("Pick at ({}, {}): {:?}", mouse.screen_x, mouse.screen_y, picked);
        Ok(picked)
    }

    /// Pick under the mouse cursor and remove what was hit
    pub fn remove_picked(
        &mut self,
        mouse: &MouseState,
        camera: &Camera,
    ) -> Result<Option<(ObjectId, GameObject)>, GeometryError> {
        Ok(self
            .pick_from_screen(mouse, camera)?
            .and_then(|id| self.remove(id).map(|object| (id, object))))
    }

    /// Remove the object under the cursor when the left button is down
    ///
    /// Returns `Ok(None)` without casting a ray when there is no left click.
    pub fn remove_clicked(
        &mut self,
        mouse: &MouseState,
        camera: &Camera,
    ) -> Result<Option<(ObjectId, GameObject)>, GeometryError> {
        if !mouse.left_click {
            return Ok(None);
        }
        self.remove_picked(mouse, camera)
    }

    /// Submit every renderable object: static, then dynamic, then
    /// projectiles
    ///
    /// Stops at the first failed draw. Returns the number of draws submitted.
    pub fn render_all(
        &self,
        context: &mut dyn RenderContext,
        view: &Mat4,
        projection: &Mat4,
    ) -> RenderResult<usize> {
        let mut submitted = 0;
        for id in self.static_ids.iter().chain(&self.dynamic_ids).chain(&self.projectile_ids) {
            let call = self
                .objects
                .get(*id)
                .and_then(|object| object.draw_call(view, projection));
            let Some(call) = call else {
                continue;
            };
            context.draw(&call)?;
            submitted += 1;
        }
        Ok(submitted)
    }

    fn sequence(&self, category: ObjectCategory) -> &Vec<ObjectId> {
        match category {
            ObjectCategory::Static => &self.static_ids,
            ObjectCategory::Dynamic => &self.dynamic_ids,
            ObjectCategory::Projectile => &self.projectile_ids,
        }
    }

    fn sequence_mut(&mut self, category: ObjectCategory) -> &mut Vec<ObjectId> {
        match category {
            ObjectCategory::Static => &mut self.static_ids,
            ObjectCategory::Dynamic => &mut self.dynamic_ids,
            ObjectCategory::Projectile => &mut self.projectile_ids,
        }
    }
}

/// First object in `ids` whose bounds overlap `bounds`
fn first_overlap(
    objects: &SlotMap<ObjectId, GameObject>,
    ids: &[ObjectId],
    bounds: &BoundingVolume,
) -> Option<(usize, ObjectId)> {
    ids.iter().enumerate().find_map(|(index, id)| {
        let object = objects.get(*id)?;
        object.bounds().intersects(bounds).then_some((index, *id))
    })
}
