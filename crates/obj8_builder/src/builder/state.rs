//! Attribute state tracking
//!
//! The tracker keeps two snapshots: `authored`, the last value the caller asked
//! for, and `committed`, the last value written into the command stream. Setters
//! only touch `authored`; [`StateTracker::sync`] writes one command per field that
//! differs and then makes `committed` match.

use serde::{Deserialize, Serialize};

use crate::scene::{AttributeCommand, Command, LodBucket};

/// Name the generic hard surface is authored with
pub const GENERIC_HARD_SURFACE: &str = "object";

/// Alpha cutoff used when blending is disabled without an explicit value
pub const DEFAULT_NO_BLEND_CUTOFF: f32 = 0.5;

/// Collision hardness
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hardness {
    /// Not hard
    #[default]
    None,
    /// Generic hard surface
    Generic,
    /// Hard with a named surface type
    Surface(String),
}

impl Hardness {
    /// Interpret a surface name: empty clears, `"object"` is generic
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            None | Some("") => Self::None,
            Some(GENERIC_HARD_SURFACE) => Self::Generic,
            Some(surface) => Self::Surface(surface.to_string()),
        }
    }

    fn command(&self) -> AttributeCommand {
        match self {
            Self::None => AttributeCommand::NoHard,
            Self::Generic => AttributeCommand::Hard(None),
            Self::Surface(name) => AttributeCommand::Hard(Some(name.clone())),
        }
    }
}

/// Texture source for subsequent geometry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CockpitTexture {
    /// Object texture
    #[default]
    Normal,
    /// Whole cockpit panel
    Cockpit,
    /// Cockpit panel sub-region
    Region(u32),
}

impl CockpitTexture {
    const fn command(self) -> AttributeCommand {
        match self {
            Self::Normal => AttributeCommand::TexNormal,
            Self::Cockpit => AttributeCommand::TexCockpit,
            Self::Region(index) => AttributeCommand::TexCockpitRegion(index),
        }
    }
}

/// Alpha blending mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Alpha blending
    #[default]
    Blend,
    /// No blending; fragments below the cutoff are discarded
    NoBlend(f32),
}

impl BlendMode {
    const fn command(self) -> AttributeCommand {
        match self {
            Self::Blend => AttributeCommand::Blend,
            Self::NoBlend(cutoff) => AttributeCommand::NoBlend(cutoff),
        }
    }
}

/// Snapshot of every tracked attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeState {
    /// Flat (true) or smooth (false) shading
    pub flat: bool,
    /// Two-sided rendering, i.e. no culling
    pub two_sided: bool,
    /// Hardness
    pub hard: Hardness,
    /// Alpha blending
    pub blend: BlendMode,
    /// Texture source
    pub cockpit: CockpitTexture,
    /// Polygon depth offset
    pub offset: f32,
    /// Shininess ratio
    pub shiny: f32,
    /// Emissive RGB
    pub emission: [f32; 3],
    /// Diffuse RGB
    pub diffuse: [f32; 3],
}

impl AttributeState {
    /// Default emissive color
    pub const DEFAULT_EMISSION: [f32; 3] = [0.0, 0.0, 0.0];
    /// Default diffuse color
    pub const DEFAULT_DIFFUSE: [f32; 3] = [1.0, 1.0, 1.0];
    /// Default shininess
    pub const DEFAULT_SHINY: f32 = 0.0;

    /// Whether emissive, diffuse and shininess hold the default triple
    pub fn has_default_material(&self) -> bool {
        self.emission == Self::DEFAULT_EMISSION
            && self.diffuse == Self::DEFAULT_DIFFUSE
            && self.shiny == Self::DEFAULT_SHINY
    }

    fn material_differs(&self, other: &Self) -> bool {
        self.emission != other.emission || self.diffuse != other.diffuse || self.shiny != other.shiny
    }
}

impl Default for AttributeState {
    fn default() -> Self {
        Self {
            flat: false,
            two_sided: false,
            hard: Hardness::None,
            blend: BlendMode::Blend,
            cockpit: CockpitTexture::Normal,
            offset: 0.0,
            shiny: Self::DEFAULT_SHINY,
            emission: Self::DEFAULT_EMISSION,
            diffuse: Self::DEFAULT_DIFFUSE,
        }
    }
}

/// Authored and committed attribute snapshots
#[derive(Debug, Clone, Default)]
pub struct StateTracker {
    authored: AttributeState,
    committed: AttributeState,
}

impl StateTracker {
    /// Create a tracker with both snapshots at the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Last values requested by the caller
    pub const fn authored(&self) -> &AttributeState {
        &self.authored
    }

    /// Last values written into the stream
    pub const fn committed(&self) -> &AttributeState {
        &self.committed
    }

    /// Whether a sync would emit anything
    pub fn is_dirty(&self) -> bool {
        self.authored != self.committed
    }

    /// Put both snapshots back to the defaults without emitting anything
    pub fn reset(&mut self) {
        self.authored = AttributeState::default();
        self.committed = AttributeState::default();
    }

    /// Flat or smooth shading
    pub fn set_flat(&mut self, flat: bool) {
        self.authored.flat = flat;
    }

    /// Two-sided rendering
    pub fn set_two_sided(&mut self, two_sided: bool) {
        self.authored.two_sided = two_sided;
    }

    /// Hardness
    pub fn set_hard(&mut self, hard: Hardness) {
        self.authored.hard = hard;
    }

    /// Blending mode
    pub fn set_blend(&mut self, blend: BlendMode) {
        self.authored.blend = blend;
    }

    /// Texture source
    pub fn set_cockpit(&mut self, cockpit: CockpitTexture) {
        self.authored.cockpit = cockpit;
    }

    /// Polygon offset
    pub fn set_offset(&mut self, offset: f32) {
        self.authored.offset = offset;
    }

    /// Shininess ratio
    pub fn set_shiny(&mut self, shiny: f32) {
        self.authored.shiny = shiny;
    }

    /// Emissive color
    pub fn set_emission(&mut self, rgb: [f32; 3]) {
        self.authored.emission = rgb;
    }

    /// Diffuse color
    pub fn set_diffuse(&mut self, rgb: [f32; 3]) {
        self.authored.diffuse = rgb;
    }

    /// Author the default emissive/diffuse/shininess triple
    pub fn reset_material(&mut self) {
        self.authored.emission = AttributeState::DEFAULT_EMISSION;
        self.authored.diffuse = AttributeState::DEFAULT_DIFFUSE;
        self.authored.shiny = AttributeState::DEFAULT_SHINY;
    }

    /// Emit the commands that bring the stream up to the authored state
    ///
    /// Returns the number of commands appended to `bucket`.
    pub fn sync(&mut self, bucket: &mut LodBucket) -> usize {
        let before = bucket.len();
        let authored = &self.authored;
        let committed = &mut self.committed;
        let mut emit = |command: AttributeCommand| bucket.push(Command::Attribute(command));

        if authored.flat != committed.flat {
            emit(if authored.flat {
                AttributeCommand::ShadeFlat
            } else {
                AttributeCommand::ShadeSmooth
            });
            committed.flat = authored.flat;
        }

        if authored.hard != committed.hard {
            emit(authored.hard.command());
            committed.hard = authored.hard.clone();
        }

        if authored.two_sided != committed.two_sided {
            emit(if authored.two_sided {
                AttributeCommand::NoCull
            } else {
                AttributeCommand::Cull
            });
            committed.two_sided = authored.two_sided;
        }

        if authored.cockpit != committed.cockpit {
            emit(authored.cockpit.command());
            committed.cockpit = authored.cockpit;
        }

        if authored.blend != committed.blend {
            emit(authored.blend.command());
            committed.blend = authored.blend;
        }

        if authored.offset != committed.offset {
            emit(AttributeCommand::PolygonOffset(authored.offset));
            committed.offset = authored.offset;
        }

        // Only fires when the target is the default triple, not when it merely
        // returns to an earlier committed value.
        if authored.material_differs(committed) && authored.has_default_material() {
            emit(AttributeCommand::Reset);
            committed.emission = authored.emission;
            committed.diffuse = authored.diffuse;
            committed.shiny = authored.shiny;
        }

        if authored.shiny != committed.shiny {
            emit(AttributeCommand::ShinyRatio(authored.shiny));
            committed.shiny = authored.shiny;
        }

        if authored.emission != committed.emission {
            emit(AttributeCommand::Emission(authored.emission));
            committed.emission = authored.emission;
        }

        if authored.diffuse != committed.diffuse {
            emit(AttributeCommand::Diffuse(authored.diffuse));
            committed.diffuse = authored.diffuse;
        }

        let emitted = bucket.len() - before;
        if emitted > 0 {
            log::trace!("Attribute sync emitted {emitted} commands");
        }
        emitted
    }
}
