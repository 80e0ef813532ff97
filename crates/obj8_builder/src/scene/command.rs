//! Commands stored in a LOD bucket

use serde::{Deserialize, Serialize};

/// Contiguous range of indices drawn by a single command
///
/// For triangles and lines the range addresses the index buffer; for lights it
/// addresses the light pool directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRange {
    /// First index of the range
    pub offset: usize,
    /// Number of indices in the range
    pub count: usize,
}

impl DrawRange {
    /// Create a new range
    pub const fn new(offset: usize, count: usize) -> Self {
        Self { offset, count }
    }

    /// One past the last index of the range
    pub const fn end(&self) -> usize {
        self.offset + self.count
    }
}

/// Smoke puff color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmokeKind {
    /// Black smoke
    Black,
    /// White smoke
    White,
}

/// Render-state change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeCommand {
    /// Flat shading
    ShadeFlat,
    /// Smooth shading
    ShadeSmooth,
    /// Hard surface; `None` is the generic "object" surface
    Hard(Option<String>),
    /// Not a hard surface
    NoHard,
    /// Back faces culled
    Cull,
    /// Two-sided rendering
    NoCull,
    /// Regular object texture
    TexNormal,
    /// Whole cockpit panel texture
    TexCockpit,
    /// Cockpit panel sub-region
    TexCockpitRegion(u32),
    /// Alpha blending enabled
    Blend,
    /// Alpha blending disabled, alpha test with the given cutoff
    NoBlend(f32),
    /// Polygon depth offset
    PolygonOffset(f32),
    /// Shininess ratio
    ShinyRatio(f32),
    /// Emissive black, diffuse white, shininess zero in one record
    Reset,
    /// Emissive RGB
    Emission([f32; 3]),
    /// Diffuse RGB
    Diffuse([f32; 3]),
    /// Object-wide sort layer
    LayerGroup {
        /// Layer name
        name: String,
        /// Offset within the layer
        offset: i32,
    },
}

/// Animation control; payload indices point into the scene's animation table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationCommand {
    /// Opens an animation bracket
    Begin,
    /// Closes an animation bracket
    End,
    /// Keyframed translation
    Translate(usize),
    /// Keyframed rotation
    Rotate(usize),
    /// Show geometry inside a control range
    Show(usize),
    /// Hide geometry inside a control range
    Hide(usize),
}

/// One entry of a LOD bucket's command list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Indexed triangles
    Triangles(DrawRange),
    /// Indexed lines
    Lines(DrawRange),
    /// Light points, ranging over the light pool
    Lights(DrawRange),
    /// Named light from the renderer's light library
    NamedLight {
        /// Light name
        name: String,
        /// Position in object space
        position: [f32; 3],
    },
    /// Parameterized light driven by a dataref
    CustomLight {
        /// Position in object space
        position: [f32; 3],
        /// RGBA, size and two texture corners (s1, t1, s2, t2)
        params: [f32; 9],
        /// Controlling dataref
        dataref: String,
    },
    /// Smoke emitter
    Smoke {
        /// Smoke color
        kind: SmokeKind,
        /// Position in object space
        position: [f32; 3],
        /// Puff size
        size: f32,
    },
    /// Render-state change
    Attribute(AttributeCommand),
    /// Animation control
    Animation(AnimationCommand),
}

impl Command {
    /// Index range for draw commands, `None` for everything else
    pub const fn draw_range(&self) -> Option<DrawRange> {
        match self {
            Self::Triangles(range) | Self::Lines(range) | Self::Lights(range) => Some(*range),
            _ => None,
        }
    }

    /// Whether this command draws geometry
    pub const fn is_draw(&self) -> bool {
        self.draw_range().is_some()
    }
}
