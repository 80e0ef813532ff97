//! Configuration system
//!
//! [`BuilderConfig`] carries the settings that callers usually keep outside of
//! code: the initial texture mapping and the object-wide layer group. Any
//! config type can be loaded from and saved to TOML or RON through [`Config`].

pub use serde::{Deserialize, Serialize};

use crate::geometry::TextureMapping;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Object-wide sort layer tag
///
/// Emitted once, at the head of the first LOD bucket, when the build finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerGroup {
    /// Layer name, e.g. `"objects"` or `"markings"`
    pub name: String,
    /// Offset within the named layer
    pub offset: i32,
}

impl LayerGroup {
    /// Create a new layer group tag
    pub fn new(name: impl Into<String>, offset: i32) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// Builder configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Texture repeat/offset applied to triangle vertices as they are accumulated
    #[serde(default)]
    pub texture: TextureMapping,
    /// Optional layer group applied when the build finishes
    #[serde(default)]
    pub layer_group: Option<LayerGroup>,
}

impl BuilderConfig {
    /// Create a configuration with identity texture mapping and no layer group
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the texture mapping
    pub fn with_texture(mut self, texture: TextureMapping) -> Self {
        self.texture = texture;
        self
    }

    /// Set the layer group
    pub fn with_layer_group(mut self, name: impl Into<String>, offset: i32) -> Self {
        self.layer_group = Some(LayerGroup::new(name, offset));
        self
    }
}

impl Config for BuilderConfig {}
