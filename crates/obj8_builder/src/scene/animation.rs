//! Keyframed animations referenced by animation commands

use serde::{Deserialize, Serialize};

/// Kind of animation stored in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Translation keyframes
    Translate,
    /// Rotation keyframes about a fixed axis
    Rotate,
    /// Visible while the control value is inside the keyframe range
    Show,
    /// Hidden while the control value is inside the keyframe range
    Hide,
}

/// Value a keyframe maps its control value to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum KeyframePayload {
    /// Offset in object space
    Translation([f32; 3]),
    /// Angle in degrees about the animation axis
    Rotation(f32),
    /// Range endpoint for show/hide
    Visibility,
}

/// One keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Dataref value at which the payload applies
    pub key: f32,
    /// Payload
    pub payload: KeyframePayload,
}

impl Keyframe {
    /// Create a new keyframe
    pub const fn new(key: f32, payload: KeyframePayload) -> Self {
        Self { key, payload }
    }
}

/// Animation bound to an external dataref
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    /// Kind of animation
    pub kind: AnimationKind,
    /// Controlling dataref
    pub dataref: String,
    /// Rotation axis, only for rotations
    pub axis: Option<[f32; 3]>,
    /// Keyframes in increasing key order once the animation is closed
    pub keyframes: Vec<Keyframe>,
}

impl Animation {
    /// Create an animation with no keyframes
    pub fn new(kind: AnimationKind, dataref: impl Into<String>, axis: Option<[f32; 3]>) -> Self {
        Self {
            kind,
            dataref: dataref.into(),
            axis,
            keyframes: Vec::new(),
        }
    }

    /// Reverse the keyframes when the first key is greater than the last
    ///
    /// Only a whole-list reversal is performed; keyframes authored in any other
    /// order keep that order.
    pub fn normalize_order(&mut self) {
        if let [first, .., last] = self.keyframes.as_slice() {
            if first.key > last.key {
                self.keyframes.reverse();
            }
        }
    }
}
