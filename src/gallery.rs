//! Saved results gallery
//!
//! Holds snapshots the user has exported, oldest first. Entries are
//! independent of the editing session: restoring one into the session
//! or deleting one never touches session history. Nothing persists
//! beyond the process lifetime.

use crate::types::RasterSnapshot;
use chrono::{DateTime, Utc};

/// One saved gallery item
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    id: u64,
    snapshot: RasterSnapshot,
    saved_at: DateTime<Utc>,
}

impl GalleryEntry {
    /// Identifier unique within its gallery
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn snapshot(&self) -> &RasterSnapshot {
        &self.snapshot
    }

    /// When the entry was saved
    #[must_use]
    pub fn saved_at(&self) -> DateTime<Utc> {
        self.saved_at
    }
}

/// In-memory gallery with monotonically assigned entry ids
///
/// Ids are never reused, so a stale id held across a removal resolves
/// to nothing rather than to a different entry.
#[derive(Debug, Default)]
pub struct Gallery {
    entries: Vec<GalleryEntry>,
    next_id: u64,
}

impl Gallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot, returning the id assigned to it
    pub fn add(&mut self, snapshot: RasterSnapshot) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(GalleryEntry {
            id,
            snapshot,
            saved_at: Utc::now(),
        });
        id
    }

    #[must_use]
    pub fn get(&self, id: u64) -> Option<&GalleryEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Delete an entry by id, reporting whether it existed
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in save order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &GalleryEntry> {
        self.entries.iter()
    }

    /// Drop all entries; assigned ids stay retired
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
