//! Vertex records stored in the pools
//!
//! Every record is a fixed-size block of `f32`s. Records compare and hash by
//! their bit pattern so that the pools can deduplicate them with a `HashMap`:
//! two records are the same record exactly when every field has the same bits.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Marker for records that can live in a [`VertexPool`](super::VertexPool)
pub trait PoolVertex: Pod + Eq + Hash + std::fmt::Debug {}

/// Triangle vertex: position, normal and texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct TriVertex {
    /// Position in object space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates (s, t)
    pub tex_coord: [f32; 2],
}

impl TriVertex {
    /// Create a new triangle vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Line vertex: position, normal and texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct LineVertex {
    /// Position in object space
    pub position: [f32; 3],
    /// Normal vector
    pub normal: [f32; 3],
    /// Texture coordinates (s, t)
    pub tex_coord: [f32; 2],
}

impl LineVertex {
    /// Create a new line vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Light point: position, direction, RGB color and intensity
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct LightVertex {
    /// Position in object space
    pub position: [f32; 3],
    /// Direction the light faces
    pub direction: [f32; 3],
    /// RGB color
    pub color: [f32; 3],
    /// Intensity
    pub intensity: f32,
}

impl LightVertex {
    /// Create a new light point
    pub const fn new(position: [f32; 3], direction: [f32; 3], color: [f32; 3], intensity: f32) -> Self {
        Self {
            position,
            direction,
            color,
            intensity,
        }
    }
}

// Equality and hashing work on the raw bytes. NaN fields therefore compare
// equal to identical NaNs, and 0.0 differs from -0.0.
macro_rules! impl_bitwise_identity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    bytemuck::bytes_of(self) == bytemuck::bytes_of(other)
                }
            }

            impl Eq for $ty {}

            impl Hash for $ty {
                fn hash<H: Hasher>(&self, state: &mut H) {
                    bytemuck::bytes_of(self).hash(state);
                }
            }

            impl PoolVertex for $ty {}
        )+
    };
}

impl_bitwise_identity!(TriVertex, LineVertex, LightVertex);
