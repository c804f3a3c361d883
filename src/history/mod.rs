//! Linear undo/redo history over whole-surface snapshots
//!
//! Snapshots are stored LZ4-compressed with the uncompressed size prepended,
//! which keeps a full 50-entry history of mostly flat artwork small.

use std::collections::VecDeque;

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use serde::Serialize;

use crate::error::CanvasError;
use crate::surface::RasterSurface;

/// Default number of retained snapshots
pub const DEFAULT_CAPACITY: usize = 50;

/// A read-only, compressed copy of the surface at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Snapshot {
    /// Compress the current surface contents
    pub fn capture(surface: &RasterSurface) -> Self {
        Self {
            width: surface.width(),
            height: surface.height(),
            data: compress_prepend_size(surface.as_raw()),
        }
    }

    /// Decompress back into a surface
    pub fn restore(&self) -> Result<RasterSurface, CanvasError> {
        let raw = decompress_size_prepended(&self.data)?;
        RasterSurface::from_raw(self.width, self.height, raw)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes held in memory
    pub fn compressed_len(&self) -> usize {
        self.data.len()
    }
}

/// Undo/redo flags and position, for UI enablement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub entries: usize,
    pub cursor: usize,
}

/// Capacity-bounded snapshot list with a cursor.
///
/// Pushing after an undo discards every entry past the cursor; there is no
/// redo branching. When the list outgrows its capacity the oldest entry is
/// evicted.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: VecDeque<Snapshot>,
    cursor: usize,
    capacity: usize,
    /// Running total of compressed bytes
    total_memory: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl HistoryStack {
    /// Create an empty history; a capacity of 0 is treated as 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_CAPACITY) + 1),
            cursor: 0,
            capacity,
            total_memory: 0,
        }
    }

    /// Record a new state after the cursor
    pub fn push(&mut self, snapshot: Snapshot) {
        // Drop the redo branch
        if !self.entries.is_empty() {
            for dropped in self.entries.drain(self.cursor + 1..) {
                self.total_memory = self.total_memory.saturating_sub(dropped.compressed_len());
            }
        }

        self.total_memory += snapshot.compressed_len();
        self.entries.push_back(snapshot);

        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_front() {
                self.total_memory = self.total_memory.saturating_sub(evicted.compressed_len());
            }
        }

        self.cursor = self.entries.len() - 1;

        tracing::debug!(
            "History push: {} entries, cursor {}, {} bytes",
            self.entries.len(),
            self.cursor,
            self.total_memory
        );
    }

    /// Step back; returns the snapshot to restore, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward; returns the snapshot to restore, or `None` at the newest entry
    pub fn redo(&mut self) -> Option<&Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Compressed bytes held across all entries
    pub fn memory_usage(&self) -> usize {
        self.total_memory
    }

    pub fn state(&self) -> HistoryState {
        HistoryState {
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            entries: self.entries.len(),
            cursor: self.cursor,
        }
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.total_memory = 0;
    }
}
