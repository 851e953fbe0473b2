// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::date::ModTime;

/// The type of an archive entry, as recorded within its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Regular,
    Directory,
    Symlink,
    HardLink,
    /// Any other entry type (eg. character/block devices, FIFOs, or vendor-specific types).
    Other(u8),
}

/// Stores information about a single archive entry.
///
/// All values are sourced verbatim from the entry's header and are never mutated once the filesystem is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub(crate) path: String,
    pub(crate) name: String,
    pub(crate) size: u64,
    pub(crate) mode: u32,
    pub(crate) modified: ModTime,
    pub(crate) kind: EntryKind,
    pub(crate) link_name: Option<String>,
    pub(crate) uid: u64,
    pub(crate) gid: u64,
}

impl Metadata {
    /// Returns the entry's full path as recorded within the archive.
    ///
    /// # Note
    /// This is the raw path stored during archive creation and may carry a trailing separator for directories.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the final element of the entry's path, with any trailing separator removed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the entry's size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the entry's raw mode bits.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Returns the entry's permission bits.
    pub fn permissions(&self) -> u32 {
        self.mode & 0o777
    }

    /// Returns the entry's last modification time.
    pub fn modified(&self) -> ModTime {
        self.modified
    }

    /// Returns the entry's type.
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns whether or not the entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Returns whether or not the entry is a regular file.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::Regular
    }

    /// Returns the target of a symbolic or hard link entry.
    pub fn link_name(&self) -> Option<&str> {
        self.link_name.as_deref()
    }

    /// Returns the entry owner's user ID.
    pub fn uid(&self) -> u64 {
        self.uid
    }

    /// Returns the entry owner's group ID.
    pub fn gid(&self) -> u64 {
        self.gid
    }
}

/// An archive entry and its fully-materialised content.
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) content: Vec<u8>,
    pub(crate) metadata: Metadata,
}

impl Entry {
    /// Returns the entry's content (empty for directories).
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Returns the entry's metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Returns the entry's full path as recorded within the archive.
    pub fn path(&self) -> &str {
        &self.metadata.path
    }
}

/// Returns the final element of a slash-separated path.
///
/// Trailing separators are removed before the element is taken. An empty path yields `"."` and a path made up solely
/// of separators yields `"/"`.
pub(crate) fn base_name(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }

    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }

    match trimmed.rfind('/') {
        Some(index) => &trimmed[index + 1..],
        None => trimmed,
    }
}
