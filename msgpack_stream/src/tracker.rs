//! Bookkeeping of the containers that are currently open.
//!
//! MessagePack containers declare their element count up front, in the tag
//! that begins them. The [`NestingTracker`] remembers, for every container
//! that was begun but not yet ended, how many of the declared slots are still
//! to be written. The [`crate::encoder::Encoder`] uses this to detect
//! mismatched end calls and to pad containers that were closed early.

use alloc::vec::Vec;

/// The two container types of MessagePack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContainerKind {
    /// A sequence of values.
    Array,
    /// A sequence of key-value pairs.
    Map,
}

/// An open container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    kind: ContainerKind,
    // Declared slots not yet written. Goes negative when the caller writes
    // more than declared.
    remaining: i64,
}

/// A stack of open containers, innermost on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingTracker {
    frames: Vec<Frame>,
}

impl core::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ContainerKind::Array => write!(f, "array"),
            ContainerKind::Map => write!(f, "map"),
        }
    }
}

impl Frame {
    /// The type of the container.
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// The number of slots that were declared but not yet written.
    ///
    /// A map entry takes two slots, one for the key and one for the value.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }
}

impl NestingTracker {
    /// Create a tracker with no open containers.
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Open an array of `len` elements.
    pub fn push_array(&mut self, len: u32) {
        self.frames.push(Frame { kind: ContainerKind::Array, remaining: len as i64 });
    }

    /// Open a map of `entries` key-value pairs.
    ///
    /// Every entry takes two slots: one for the key and one for the value.
    pub fn push_map(&mut self, entries: u32) {
        self.frames.push(Frame { kind: ContainerKind::Map, remaining: 2 * entries as i64 });
    }

    /// Account for a value written into the innermost container.
    ///
    /// Does nothing when no container is open. Writing more values than
    /// declared is not checked here and drives the count negative.
    pub fn reduce_count(&mut self) {
        if let Some(top) = self.frames.last_mut() {
            top.remaining -= 1;
        }
    }

    /// Whether the innermost container is an array.
    pub fn is_top_array(&self) -> bool {
        self.top().is_some_and(|top| top.kind == ContainerKind::Array)
    }

    /// Whether the innermost container is a map.
    pub fn is_top_map(&self) -> bool {
        self.top().is_some_and(|top| top.kind == ContainerKind::Map)
    }

    /// The remaining slots of the innermost container.
    pub fn top_remaining(&self) -> Option<i64> {
        self.top().map(Frame::remaining)
    }

    /// The innermost container.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Close the innermost container.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Forget all open containers.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// The number of open containers.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether no container is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
