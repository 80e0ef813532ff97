//! Geometry storage for the scene
//!
//! Vertex records are deduplicated into one [`VertexPool`] per primitive kind,
//! and draw commands reference them through the shared [`IndexBuffer`].

pub mod pool;
pub mod texture;
pub mod vertex;

pub use pool::{IndexBuffer, VertexPool};
pub use texture::TextureMapping;
pub use vertex::{LightVertex, LineVertex, PoolVertex, TriVertex};
