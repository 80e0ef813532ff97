//! # Scene Output
//!
//! The data structure the builder produces and hands to the caller: the vertex
//! pools, the shared index buffer, the LOD buckets with their ordered command
//! lists, and the animation table.
//!
//! ## Ordering
//!
//! Each [`LodBucket`] holds one linear command list. Geometry, attribute and
//! animation commands share that list because a renderer replays it in order;
//! the [`Command`] enum keeps the categories apart for exhaustive matching.

pub mod animation;
pub mod command;
pub mod lod;
pub mod object;

pub use animation::{Animation, AnimationKind, Keyframe, KeyframePayload};
pub use command::{AnimationCommand, AttributeCommand, Command, DrawRange, SmokeKind};
pub use lod::LodBucket;
pub use object::{Obj8, SceneStats};
