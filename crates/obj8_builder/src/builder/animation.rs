//! Keyframe animation authoring
//!
//! Translate and rotate animations are opened, fed keyframes and closed.
//! Show and hide are single-shot with exactly two keyframes. Closing an
//! animation puts its keyframes into increasing key order by reversing the
//! list when the first key is greater than the last.

use crate::scene::{
    Animation, AnimationCommand, AnimationKind, Command, Keyframe, KeyframePayload, LodBucket,
};

/// Open-animation state machine
#[derive(Debug, Clone, Default)]
pub struct AnimationBuilder {
    open: Option<OpenAnimation>,
}

#[derive(Debug, Clone, Copy)]
struct OpenAnimation {
    index: usize,
    kind: AnimationKind,
}

const fn command_for(kind: AnimationKind, index: usize) -> AnimationCommand {
    match kind {
        AnimationKind::Translate => AnimationCommand::Translate(index),
        AnimationKind::Rotate => AnimationCommand::Rotate(index),
        AnimationKind::Show => AnimationCommand::Show(index),
        AnimationKind::Hide => AnimationCommand::Hide(index),
    }
}

impl AnimationBuilder {
    /// Create a builder with no open animation
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an animation is waiting for keyframes
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Open a translate or rotate animation and reference it from `bucket`
    ///
    /// Returns the animation's index in the table.
    pub fn begin(
        &mut self,
        animations: &mut Vec<Animation>,
        bucket: &mut LodBucket,
        kind: AnimationKind,
        dataref: &str,
        axis: Option<[f32; 3]>,
    ) -> usize {
        debug_assert!(
            matches!(kind, AnimationKind::Translate | AnimationKind::Rotate),
            "only translate and rotate animations take keyframes"
        );
        if self.open.is_some() {
            misuse!("opening {kind:?} animation on '{dataref}' while another is still open");
            self.close(animations);
        }

        let index = Self::push_animation(animations, bucket, Animation::new(kind, dataref, axis));
        self.open = Some(OpenAnimation { index, kind });
        index
    }

    /// Append a keyframe to the open animation
    pub fn add_key(&mut self, animations: &mut [Animation], key: f32, payload: KeyframePayload) {
        let Some(open) = self.open else {
            misuse!("keyframe at {key} added with no open animation");
            return;
        };

        let matches_kind = matches!(
            (open.kind, payload),
            (AnimationKind::Translate, KeyframePayload::Translation(_))
                | (AnimationKind::Rotate, KeyframePayload::Rotation(_))
        );
        if !matches_kind {
            misuse!("{payload:?} keyframe added to {:?} animation", open.kind);
            return;
        }

        if let Some(animation) = animations.get_mut(open.index) {
            animation.keyframes.push(Keyframe::new(key, payload));
        }
    }

    /// Close the open animation, which must be of `kind`
    pub fn end(&mut self, animations: &mut [Animation], kind: AnimationKind) {
        match self.open {
            Some(open) if open.kind == kind => self.close(animations),
            Some(open) => {
                misuse!("closing {kind:?} but {:?} animation is open", open.kind);
            }
            None => {
                misuse!("closing {kind:?} with no open animation");
            }
        }
    }

    /// Add a show or hide animation over the control range `[v1, v2]`
    pub fn visibility(
        &mut self,
        animations: &mut Vec<Animation>,
        bucket: &mut LodBucket,
        kind: AnimationKind,
        v1: f32,
        v2: f32,
        dataref: &str,
    ) -> usize {
        debug_assert!(
            matches!(kind, AnimationKind::Show | AnimationKind::Hide),
            "visibility animations are show or hide"
        );
        let mut animation = Animation::new(kind, dataref, None);
        animation.keyframes = vec![
            Keyframe::new(v1, KeyframePayload::Visibility),
            Keyframe::new(v2, KeyframePayload::Visibility),
        ];
        animation.normalize_order();
        Self::push_animation(animations, bucket, animation)
    }

    /// Close whatever animation is open, putting its keyframes in order
    pub fn close(&mut self, animations: &mut [Animation]) {
        if let Some(open) = self.open.take() {
            if let Some(animation) = animations.get_mut(open.index) {
                animation.normalize_order();
            }
        }
    }

    fn push_animation(
        animations: &mut Vec<Animation>,
        bucket: &mut LodBucket,
        animation: Animation,
    ) -> usize {
        let index = animations.len();
        let command = command_for(animation.kind, index);
        animations.push(animation);
        bucket.push(Command::Animation(command));
        index
    }
}
