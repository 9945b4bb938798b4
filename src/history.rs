//! Bounded undo/redo history of raster snapshots
//!
//! The history owns every retained snapshot; the last undo entry is the
//! snapshot currently on screen. Undo therefore never empties the stack
//! below one entry, and a fresh edit always lands on top of the state it
//! was derived from.

use crate::types::RasterSnapshot;
use std::collections::VecDeque;

/// Bounded two-stack undo/redo history
///
/// Invariants maintained across all operations:
/// - the undo stack holds at most `limit` entries, oldest evicted first
/// - the last undo entry is the current snapshot (absent iff empty)
/// - any [`push`](Self::push) clears the redo stack
#[derive(Debug, Clone)]
pub struct HistoryStack {
    undo: VecDeque<RasterSnapshot>,
    redo: Vec<RasterSnapshot>,
    limit: usize,
}

impl HistoryStack {
    /// Create an empty history retaining at most `limit` undo entries
    ///
    /// A `limit` of zero is treated as one: the current snapshot always
    /// occupies a slot.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a completed edit as the new current snapshot
    ///
    /// Evicts the oldest entry once the stack exceeds its limit and clears
    /// all redo state. Call exactly once per completed action, never per
    /// preview frame.
    pub fn push(&mut self, snapshot: RasterSnapshot) {
        self.undo.push_back(snapshot);
        if self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Step back one edit, returning the snapshot that becomes current
    ///
    /// Returns `None` without modifying anything when there is at most one
    /// entry: the first-loaded state is never undone away.
    pub fn undo(&mut self) -> Option<&RasterSnapshot> {
        if self.undo.len() <= 1 {
            return None;
        }
        let current = self.undo.pop_back()?;
        self.redo.push(current);
        self.undo.back()
    }

    /// Re-apply the most recently undone edit, returning the new current
    ///
    /// Returns `None` when nothing has been undone since the last edit.
    pub fn redo(&mut self) -> Option<&RasterSnapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(next);
        self.undo.back()
    }

    /// The snapshot currently on screen, if any
    #[must_use]
    pub fn current(&self) -> Option<&RasterSnapshot> {
        self.undo.back()
    }

    /// True when [`undo`](Self::undo) would change state
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.undo.len() > 1
    }

    /// True when [`redo`](Self::redo) would change state
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of retained undo entries, current included
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Number of entries available to redo
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Maximum number of retained undo entries
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True when no snapshot has ever been recorded (or after [`clear`](Self::clear))
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }

    /// Drop every retained snapshot, undo and redo alike
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
