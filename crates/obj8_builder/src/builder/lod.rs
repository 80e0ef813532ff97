//! LOD bucket lifecycle

use crate::scene::LodBucket;

/// Tracks which bucket of the scene receives new commands
///
/// Either no bucket is active or exactly one is. Activating a bucket when none
/// is open on demand creates the always-visible default bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LodManager {
    active: Option<usize>,
}

impl LodManager {
    /// Create a manager with no active bucket
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Index of the active bucket
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Append a new bucket and make it active
    ///
    /// The caller is responsible for closing the previous bucket first.
    pub fn open(&mut self, lods: &mut Vec<LodBucket>, near: f32, far: f32) -> usize {
        lods.push(LodBucket::new(near, far));
        let index = lods.len() - 1;
        log::debug!("Opened LOD {index} ({near}..{far})");
        self.active = Some(index);
        index
    }

    /// Deactivate the active bucket, returning its index
    pub fn close(&mut self) -> Option<usize> {
        let closed = self.active.take();
        if let Some(index) = closed {
            log::debug!("Closed LOD {index}");
        }
        closed
    }

    /// Active bucket, creating the default one if none is active
    pub fn assure_active<'a>(&mut self, lods: &'a mut Vec<LodBucket>) -> &'a mut LodBucket {
        let index = match self.active {
            Some(index) if index < lods.len() => index,
            _ => self.open(lods, 0.0, 0.0),
        };
        &mut lods[index]
    }
}
