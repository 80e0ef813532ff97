//! Texture repeat/offset mapping for triangle vertices

use serde::{Deserialize, Serialize};

/// Scale and offset applied to the (s, t) coordinates of triangle vertices
///
/// `s' = s * repeat_s + offset_s` and `t' = t * repeat_t + offset_t`. The mapping
/// is applied before pool deduplication, so changing it only affects vertices
/// accumulated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureMapping {
    /// Scale for the s coordinate
    pub repeat_s: f32,
    /// Scale for the t coordinate
    pub repeat_t: f32,
    /// Offset added to the scaled s coordinate
    pub offset_s: f32,
    /// Offset added to the scaled t coordinate
    pub offset_t: f32,
}

impl TextureMapping {
    /// Identity mapping
    pub const IDENTITY: Self = Self::new(1.0, 1.0, 0.0, 0.0);

    /// Create a new mapping
    pub const fn new(repeat_s: f32, repeat_t: f32, offset_s: f32, offset_t: f32) -> Self {
        Self {
            repeat_s,
            repeat_t,
            offset_s,
            offset_t,
        }
    }

    /// Map a single (s, t) pair
    pub fn apply(&self, [s, t]: [f32; 2]) -> [f32; 2] {
        [
            s * self.repeat_s + self.offset_s,
            t * self.repeat_t + self.offset_t,
        ]
    }
}

impl Default for TextureMapping {
    fn default() -> Self {
        Self::IDENTITY
    }
}
