//! The complete scene produced by a build

use serde::{Deserialize, Serialize};

use super::animation::Animation;
use super::lod::LodBucket;
use crate::geometry::{IndexBuffer, LightVertex, LineVertex, TriVertex, VertexPool};

/// OBJ8 scene: geometry pools, index buffer, LOD buckets and animation table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Obj8 {
    /// Triangle vertex pool
    pub geo_tri: VertexPool<TriVertex>,
    /// Line vertex pool
    pub geo_lines: VertexPool<LineVertex>,
    /// Light point pool
    pub geo_lights: VertexPool<LightVertex>,
    /// Indices shared by triangle and line commands
    pub indices: IndexBuffer,
    /// LOD buckets in creation order
    pub lods: Vec<LodBucket>,
    /// Animations referenced by animation commands
    pub animations: Vec<Animation>,
}

/// Size summary of a scene
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneStats {
    /// Unique triangle vertices
    pub tri_vertices: usize,
    /// Unique line vertices
    pub line_vertices: usize,
    /// Unique light points
    pub light_points: usize,
    /// Entries in the index buffer
    pub indices: usize,
    /// LOD buckets
    pub lods: usize,
    /// Commands across all buckets
    pub commands: usize,
    /// Animations
    pub animations: usize,
}

impl Obj8 {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize the scene
    pub fn stats(&self) -> SceneStats {
        SceneStats {
            tri_vertices: self.geo_tri.len(),
            line_vertices: self.geo_lines.len(),
            light_points: self.geo_lights.len(),
            indices: self.indices.len(),
            lods: self.lods.len(),
            commands: self.lods.iter().map(LodBucket::len).sum(),
            animations: self.animations.len(),
        }
    }
}

impl std::fmt::Display for SceneStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} tri verts, {} line verts, {} lights, {} indices, {} LODs, {} commands, {} animations",
            self.tri_vertices,
            self.line_vertices,
            self.light_points,
            self.indices,
            self.lods,
            self.commands,
            self.animations
        )
    }
}
