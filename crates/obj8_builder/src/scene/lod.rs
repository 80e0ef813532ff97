//! LOD buckets and draw-command batching

use serde::{Deserialize, Serialize};

use super::command::{Command, DrawRange};

/// Distance-scoped command list
///
/// A renderer draws the bucket whose `[near, far)` range contains the viewer
/// distance. `near == far == 0` means the bucket is always visible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LodBucket {
    /// Near visibility distance
    pub near: f32,
    /// Far visibility distance
    pub far: f32,
    /// Commands in replay order
    pub commands: Vec<Command>,
}

impl LodBucket {
    /// Create an empty bucket
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            near,
            far,
            commands: Vec::new(),
        }
    }

    /// Append a command without attempting to merge it
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Insert a command ahead of everything else in the bucket
    pub fn push_front(&mut self, command: Command) {
        self.commands.insert(0, command);
    }

    /// Append a triangle range, extending the last command if it is contiguous
    pub fn push_triangles(&mut self, range: DrawRange) {
        if let Some(Command::Triangles(last)) = self.commands.last_mut() {
            if last.end() == range.offset {
                log::trace!("Extending triangle batch at {} by {}", last.offset, range.count);
                last.count += range.count;
                return;
            }
        }
        self.commands.push(Command::Triangles(range));
    }

    /// Append a line range, extending the last command if it is contiguous
    pub fn push_lines(&mut self, range: DrawRange) {
        if let Some(Command::Lines(last)) = self.commands.last_mut() {
            if last.end() == range.offset {
                log::trace!("Extending line batch at {} by {}", last.offset, range.count);
                last.count += range.count;
                return;
            }
        }
        self.commands.push(Command::Lines(range));
    }

    /// Append one light by pool index, extending the last command if it is contiguous
    pub fn push_light(&mut self, index: u32) {
        let index = index as usize;
        if let Some(Command::Lights(last)) = self.commands.last_mut() {
            if last.end() == index {
                log::trace!("Extending light batch at {} by 1", last.offset);
                last.count += 1;
                return;
            }
        }
        self.commands.push(Command::Lights(DrawRange::new(index, 1)));
    }

    /// Number of commands in the bucket
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the bucket holds no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
