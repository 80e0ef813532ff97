//! # OBJ Builder
//!
//! [`ObjBuilder`] turns immediate-mode authoring calls into an [`Obj8`] scene.
//!
//! ## Data flow
//!
//! - Attribute setters only record the authored state.
//! - Geometry calls deduplicate vertices into the pools, append indices, flush
//!   pending attribute changes and then append (or extend) a draw command in
//!   the active LOD bucket.
//! - Lights, smoke and animation calls append their command as-is.
//! - [`ObjBuilder::finish`] applies object-wide post-processing.
//!
//! ```
//! use obj8_builder::prelude::*;
//!
//! let mut obj = Obj8::new();
//! {
//!     let mut builder = ObjBuilder::new(&mut obj);
//!     let v = |x: f32, y: f32| TriVertex::new([x, y, 0.0], [0.0, 0.0, 1.0], [x, y]);
//!     builder.accumulate_triangle([v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0)]);
//!     builder.accumulate_triangle([v(0.0, 0.0), v(1.0, 1.0), v(0.0, 1.0)]);
//!     builder.finish();
//! }
//! assert_eq!(obj.geo_tri.len(), 4);
//! assert_eq!(obj.lods[0].commands, vec![Command::Triangles(DrawRange::new(0, 6))]);
//! ```

/// Report a broken calling contract: panics in debug builds, logs in release
macro_rules! misuse {
    ($($arg:tt)*) => {{
        if cfg!(debug_assertions) {
            panic!($($arg)*);
        }
        log::warn!($($arg)*);
    }};
}

pub mod animation;
pub mod lod;
pub mod state;

#[cfg(test)]
mod tests;

pub use animation::AnimationBuilder;
pub use lod::LodManager;
pub use state::{AttributeState, BlendMode, CockpitTexture, Hardness, StateTracker};

use crate::config::{BuilderConfig, LayerGroup};
use crate::geometry::{LightVertex, LineVertex, TextureMapping, TriVertex};
use crate::scene::{
    AnimationCommand, AnimationKind, AttributeCommand, Command, DrawRange, KeyframePayload,
    LodBucket, Obj8, SmokeKind,
};

/// Immediate-mode builder writing into an [`Obj8`]
///
/// The builder borrows the scene for the whole build. Dropping it while a LOD
/// bucket is active ends that bucket, flushing pending attribute changes.
pub struct ObjBuilder<'a> {
    obj: &'a mut Obj8,
    lod: LodManager,
    state: StateTracker,
    animation: AnimationBuilder,
    texture: TextureMapping,
    layer_group: Option<LayerGroup>,
    finished: bool,
}

impl<'a> ObjBuilder<'a> {
    /// Start building into `obj`
    pub fn new(obj: &'a mut Obj8) -> Self {
        Self {
            obj,
            lod: LodManager::new(),
            state: StateTracker::new(),
            animation: AnimationBuilder::new(),
            texture: TextureMapping::IDENTITY,
            layer_group: None,
            finished: false,
        }
    }

    /// Start building into `obj` with settings from a config
    pub fn with_config(obj: &'a mut Obj8, config: &BuilderConfig) -> Self {
        let mut builder = Self::new(obj);
        builder.texture = config.texture;
        builder.layer_group = config.layer_group.clone();
        builder
    }

    /// Scene built so far
    pub fn obj(&self) -> &Obj8 {
        self.obj
    }

    /// Authored and committed attribute state
    pub const fn state(&self) -> &StateTracker {
        &self.state
    }

    // ---------------------------------------------------------------------
    // LOD bracketing
    // ---------------------------------------------------------------------

    /// Open a LOD bucket visible between `near` and `far`
    ///
    /// An active bucket is ended first. Attribute state returns to defaults.
    pub fn begin_lod(&mut self, near: f32, far: f32) {
        if self.lod.active().is_some() {
            self.end_lod();
        }
        self.lod.open(&mut self.obj.lods, near, far);
        self.state.reset();
    }

    /// Flush pending attribute changes into the active bucket and deactivate it
    ///
    /// Attribute state returns to defaults, so nothing authored for this
    /// bucket carries into the next one.
    pub fn end_lod(&mut self) {
        let Some(index) = self.lod.active() else {
            misuse!("end_lod called with no active LOD");
            return;
        };
        if let Some(bucket) = self.obj.lods.get_mut(index) {
            self.state.sync(bucket);
        }
        self.lod.close();
        self.state.reset();
    }

    /// Active bucket, creating the default bucket if needed
    fn bucket(&mut self) -> &mut LodBucket {
        self.lod.assure_active(&mut self.obj.lods)
    }

    /// Active bucket with all authored attributes written into it
    fn synced_bucket(&mut self) -> &mut LodBucket {
        let bucket = self.lod.assure_active(&mut self.obj.lods);
        self.state.sync(bucket);
        bucket
    }

    /// Write pending attribute changes into the active bucket
    ///
    /// Geometry calls do this on their own; returns the number of commands written.
    pub fn sync(&mut self) -> usize {
        let bucket = self.lod.assure_active(&mut self.obj.lods);
        self.state.sync(bucket)
    }

    // ---------------------------------------------------------------------
    // Attributes
    // ---------------------------------------------------------------------

    /// Flat (`true`) or smooth (`false`) shading
    pub fn set_flat_shading(&mut self, flat: bool) {
        self.state.set_flat(flat);
    }

    /// Disable (`true`) or enable (`false`) back-face culling
    pub fn set_two_sided(&mut self, two_sided: bool) {
        self.state.set_two_sided(two_sided);
    }

    /// Hard surface: `None` or `""` clears, `"object"` is the generic surface
    pub fn set_hard(&mut self, surface: Option<&str>) {
        self.state.set_hard(Hardness::from_name(surface));
    }

    /// Enable alpha blending
    pub fn set_blend(&mut self) {
        self.state.set_blend(BlendMode::Blend);
    }

    /// Disable alpha blending, discarding fragments below `cutoff`
    pub fn set_no_blend(&mut self, cutoff: f32) {
        self.state.set_blend(BlendMode::NoBlend(cutoff));
    }

    /// Disable alpha blending with the default cutoff
    pub fn set_no_blend_default(&mut self) {
        self.set_no_blend(state::DEFAULT_NO_BLEND_CUTOFF);
    }

    /// Texture source for subsequent geometry
    pub fn set_cockpit_texture(&mut self, cockpit: CockpitTexture) {
        self.state.set_cockpit(cockpit);
    }

    /// Polygon depth offset
    pub fn set_polygon_offset(&mut self, offset: f32) {
        self.state.set_offset(offset);
    }

    /// Shininess ratio
    pub fn set_shininess(&mut self, ratio: f32) {
        self.state.set_shiny(ratio);
    }

    /// Emissive color
    pub fn set_emission(&mut self, rgb: [f32; 3]) {
        self.state.set_emission(rgb);
    }

    /// Diffuse color
    pub fn set_diffuse(&mut self, rgb: [f32; 3]) {
        self.state.set_diffuse(rgb);
    }

    /// Emissive black, diffuse white, shininess zero
    pub fn reset_material(&mut self) {
        self.state.reset_material();
    }

    /// Object-wide layer group, written into the first bucket by [`finish`](Self::finish)
    ///
    /// An empty name clears the layer group.
    pub fn set_layer_group(&mut self, name: impl Into<String>, offset: i32) {
        let name = name.into();
        self.layer_group = if name.is_empty() {
            None
        } else {
            Some(LayerGroup::new(name, offset))
        };
    }

    /// Texture repeat/offset for triangle vertices accumulated from now on
    pub fn set_texture_mapping(&mut self, mapping: TextureMapping) {
        self.texture = mapping;
    }

    /// Current texture repeat/offset
    pub const fn texture_mapping(&self) -> TextureMapping {
        self.texture
    }

    // ---------------------------------------------------------------------
    // Geometry
    // ---------------------------------------------------------------------

    /// Add a triangle
    pub fn accumulate_triangle(&mut self, triangle: [TriVertex; 3]) {
        let mapping = self.texture;
        let indices = triangle.map(|mut vertex| {
            vertex.tex_coord = mapping.apply(vertex.tex_coord);
            self.obj.geo_tri.accumulate(vertex)
        });
        let offset = self.obj.indices.extend_from_slice(&indices);
        self.synced_bucket()
            .push_triangles(DrawRange::new(offset, indices.len()));
    }

    /// Add a line segment
    pub fn accumulate_line(&mut self, line: [LineVertex; 2]) {
        let indices = line.map(|vertex| self.obj.geo_lines.accumulate(vertex));
        let offset = self.obj.indices.extend_from_slice(&indices);
        self.synced_bucket()
            .push_lines(DrawRange::new(offset, indices.len()));
    }

    /// Add a light point
    pub fn accumulate_light(&mut self, light: LightVertex) {
        let index = self.obj.geo_lights.accumulate(light);
        self.synced_bucket().push_light(index);
    }

    /// Add a light from the renderer's named light library
    pub fn named_light(&mut self, position: [f32; 3], name: &str) {
        self.bucket().push(Command::NamedLight {
            name: name.to_string(),
            position,
        });
    }

    /// Add a parameterized light: RGBA, size, s1, t1, s2, t2
    pub fn custom_light(&mut self, position: [f32; 3], params: [f32; 9], dataref: &str) {
        self.bucket().push(Command::CustomLight {
            position,
            params,
            dataref: dataref.to_string(),
        });
    }

    /// Add a smoke emitter
    pub fn smoke(&mut self, kind: SmokeKind, position: [f32; 3], size: f32) {
        self.bucket().push(Command::Smoke {
            kind,
            position,
            size,
        });
    }

    // ---------------------------------------------------------------------
    // Animation
    // ---------------------------------------------------------------------

    /// Open an animation bracket
    pub fn begin_animation(&mut self) {
        self.bucket()
            .push(Command::Animation(AnimationCommand::Begin));
    }

    /// Close an animation bracket
    pub fn end_animation(&mut self) {
        self.bucket().push(Command::Animation(AnimationCommand::End));
    }

    fn begin_keyframed(&mut self, kind: AnimationKind, dataref: &str, axis: Option<[f32; 3]>) -> usize {
        let bucket = self.lod.assure_active(&mut self.obj.lods);
        self.animation
            .begin(&mut self.obj.animations, bucket, kind, dataref, axis)
    }

    /// Open a translation driven by `dataref`
    pub fn begin_translate(&mut self, dataref: &str) -> usize {
        self.begin_keyframed(AnimationKind::Translate, dataref, None)
    }

    /// Add a translation keyframe
    pub fn add_translate_key(&mut self, key: f32, offset: [f32; 3]) {
        self.animation.add_key(
            &mut self.obj.animations,
            key,
            KeyframePayload::Translation(offset),
        );
    }

    /// Close the open translation
    pub fn end_translate(&mut self) {
        self.animation
            .end(&mut self.obj.animations, AnimationKind::Translate);
    }

    /// Translation from `from` at `v1` to `to` at `v2`
    pub fn translate(&mut self, from: [f32; 3], to: [f32; 3], v1: f32, v2: f32, dataref: &str) -> usize {
        let index = self.begin_translate(dataref);
        self.add_translate_key(v1, from);
        self.add_translate_key(v2, to);
        self.end_translate();
        index
    }

    /// Open a rotation about `axis` driven by `dataref`
    pub fn begin_rotate(&mut self, axis: [f32; 3], dataref: &str) -> usize {
        self.begin_keyframed(AnimationKind::Rotate, dataref, Some(axis))
    }

    /// Add a rotation keyframe, angle in degrees
    pub fn add_rotate_key(&mut self, key: f32, angle: f32) {
        self.animation
            .add_key(&mut self.obj.animations, key, KeyframePayload::Rotation(angle));
    }

    /// Close the open rotation
    pub fn end_rotate(&mut self) {
        self.animation
            .end(&mut self.obj.animations, AnimationKind::Rotate);
    }

    /// Rotation about `axis` from `r1` at `v1` to `r2` at `v2`
    pub fn rotate(&mut self, axis: [f32; 3], r1: f32, r2: f32, v1: f32, v2: f32, dataref: &str) -> usize {
        let index = self.begin_rotate(axis, dataref);
        self.add_rotate_key(v1, r1);
        self.add_rotate_key(v2, r2);
        self.end_rotate();
        index
    }

    fn visibility(&mut self, kind: AnimationKind, v1: f32, v2: f32, dataref: &str) -> usize {
        let bucket = self.lod.assure_active(&mut self.obj.lods);
        self.animation
            .visibility(&mut self.obj.animations, bucket, kind, v1, v2, dataref)
    }

    /// Show geometry while `dataref` is between `v1` and `v2`
    pub fn show(&mut self, v1: f32, v2: f32, dataref: &str) -> usize {
        self.visibility(AnimationKind::Show, v1, v2, dataref)
    }

    /// Hide geometry while `dataref` is between `v1` and `v2`
    pub fn hide(&mut self, v1: f32, v2: f32, dataref: &str) -> usize {
        self.visibility(AnimationKind::Hide, v1, v2, dataref)
    }

    // ---------------------------------------------------------------------
    // Finalization
    // ---------------------------------------------------------------------

    /// Apply object-wide post-processing
    ///
    /// Writes the layer group, if one was set, at the head of the first bucket.
    /// Call once per build; a second call inserts the layer group again.
    pub fn finish(&mut self) {
        if self.finished {
            misuse!("finish called twice on the same build");
        }
        self.finished = true;

        if self.animation.is_open() {
            misuse!("finish called with an animation still open");
            self.animation.close(&mut self.obj.animations);
        }

        let group = self.layer_group.as_ref().filter(|group| !group.name.is_empty());
        if let (Some(group), Some(first)) = (group, self.obj.lods.first_mut()) {
            first.push_front(Command::Attribute(AttributeCommand::LayerGroup {
                name: group.name.clone(),
                offset: group.offset,
            }));
        }
        log::debug!("Finished OBJ: {}", self.obj.stats());
    }
}

impl Drop for ObjBuilder<'_> {
    fn drop(&mut self) {
        if self.lod.active().is_some() {
            self.end_lod();
        }
    }
}
