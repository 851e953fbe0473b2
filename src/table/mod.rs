// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub(crate) mod builder;

use crate::entry::{Entry, Metadata};

use std::collections::BTreeMap;
use std::ops::Bound;

pub(crate) use builder::TableBuilder;

/// An immutable store of every entry within a tar archive, keyed by path.
///
/// Keys are compared byte-for-byte without any normalisation. Where an archive held more than one entry for the same
/// path, only the last is present.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub(crate) entries: BTreeMap<String, Entry>,
}

impl Table {
    /// Returns the entry stored under the exact provided path.
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.entries.get(path)
    }

    /// Returns whether or not an entry is stored under the exact provided path.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Returns the number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether or not this table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over every entry, ordered by path.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Returns the metadata of every entry whose path begins with the provided prefix, ordered by path.
    ///
    /// This is a plain string prefix test rather than a path-segment-aware match, so a prefix of `"sub"` will also
    /// select `"subdir/x"`. An entry stored under the prefix itself is always selected.
    pub(crate) fn with_prefix(&self, prefix: &str) -> Vec<&Metadata> {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(_, entry)| &entry.metadata)
            .collect()
    }
}
