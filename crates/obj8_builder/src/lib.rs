//! # OBJ8 Builder
//!
//! Converts immediate-mode authoring calls ("draw this triangle", "set this
//! material attribute", "begin this animation") into a compact OBJ8 scene
//! command stream ready for a serializer or a renderer.
//!
//! ## Features
//!
//! - **Vertex Deduplication**: Identical vertex records share one pool index
//! - **Minimal State Changes**: Attribute changes are diffed against what the
//!   stream already contains and only the difference is written
//! - **Draw Batching**: Contiguous draws of the same kind collapse into one command
//! - **Keyframe Animation**: Translate, rotate, show and hide bound to datarefs
//! - **Level of Detail**: Commands are routed into distance-scoped buckets
//!
//! ## Quick Start
//!
//! ```rust
//! use obj8_builder::prelude::*;
//!
//! let mut obj = Obj8::new();
//! {
//!     let mut builder = ObjBuilder::new(&mut obj);
//!     builder.begin_lod(0.0, 1000.0);
//!     builder.set_flat_shading(true);
//!     builder.accumulate_triangle([
//!         TriVertex::new([0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
//!         TriVertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
//!         TriVertex::new([1.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
//!     ]);
//!     builder.finish();
//! }
//! println!("{}", obj.stats());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod builder;
pub mod config;
pub mod foundation;
pub mod geometry;
pub mod scene;

pub use builder::ObjBuilder;
pub use config::{BuilderConfig, Config, ConfigError};
pub use scene::Obj8;

/// Common imports for builder users
pub mod prelude {
    pub use crate::{
        builder::{BlendMode, CockpitTexture, Hardness, ObjBuilder},
        config::{BuilderConfig, Config, ConfigError, LayerGroup},
        geometry::{LightVertex, LineVertex, TextureMapping, TriVertex},
        scene::{
            Animation, AnimationCommand, AnimationKind, AttributeCommand, Command, DrawRange,
            Keyframe, KeyframePayload, LodBucket, Obj8, SceneStats, SmokeKind,
        },
    };
}
