//! Changelog aggregate
//!
//! [`ChangelogBuilder`] accumulates the records of each window as they are
//! parsed; [`Changelog`] is the finished, ordered mapping from tag label to
//! commits that gets serialized.

use crate::domain::commit::CommitRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashSet;

/// One changelog section: a tag and the commits it introduced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub tag: String,
    pub commits: Vec<CommitRecord>,
}

/// Ordered mapping from tag label to commit records.
///
/// Serializes as a JSON object whose keys keep the entry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    entries: Vec<ChangelogEntry>,
}

impl Changelog {
    pub fn entries(&self) -> &[ChangelogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tag labels in document order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.tag.as_str())
    }

    pub fn get(&self, tag: &str) -> Option<&[CommitRecord]> {
        self.entries
            .iter()
            .find(|e| e.tag == tag)
            .map(|e| e.commits.as_slice())
    }

    pub fn commit_count(&self) -> usize {
        self.entries.iter().map(|e| e.commits.len()).sum()
    }

    /// Same entries, last inserted first
    pub fn reversed(mut self) -> Self {
        self.entries.reverse();
        self
    }
}

impl Serialize for Changelog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.tag, &entry.commits)?;
        }
        map.end()
    }
}

/// Accumulates per-window records in the order they are added
#[derive(Debug, Default)]
pub struct ChangelogBuilder {
    entries: Vec<ChangelogEntry>,
    seen: HashSet<String>,
}

impl ChangelogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the records for one tag.
    ///
    /// # Panics
    /// If the tag was already added. Windows are unique per tag, so a repeat
    /// means the caller broke that invariant.
    pub fn add(&mut self, tag: impl Into<String>, commits: Vec<CommitRecord>) {
        let tag = tag.into();
        assert!(
            self.seen.insert(tag.clone()),
            "changelog entry for tag '{}' added twice",
            tag
        );
        self.entries.push(ChangelogEntry { tag, commits });
    }

    pub fn finalize(self) -> Changelog {
        Changelog {
            entries: self.entries,
        }
    }
}
