// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A read-only filesystem which acts over an in-memory table of archive entries.
//!
//! Concurrency is achieved as a result of:
//! - Wrapping the decoded [`Table`] within an [`Arc`] to allow shared ownership.
//! - Never mutating that table once it has been built, so no locking is required.
//!
//! ### Usage
//! Each call to [`TarFs::open()`] returns an independent [`File`] which borrows the entry's content and holds only its
//! own cursor position. Any number of files may be open at once, across any number of threads. Where a file needs to
//! outlive the current scope (eg. when moved into a spawned task), the overarching [`TarFs`] should be cloned and
//! moved into that context instead.
//!
//! ### Parallel Example
//! ```no_run
//! # use tarfs::TarFs;
//! # use tarfs::error::Result;
//! # use futures_lite::io::AsyncReadExt;
//! #
//! async fn run(archive: Vec<u8>) -> Result<()> {
//!     let fs = TarFs::new(archive.as_slice())?;
//!
//!     let handle_0 = tokio::spawn(read(fs.clone(), "index.html"));
//!     let handle_1 = tokio::spawn(read(fs.clone(), "style.css"));
//!
//!     let data_0 = handle_0.await.expect("thread panicked")?;
//!     let data_1 = handle_1.await.expect("thread panicked")?;
//!
//!     // Use data within current scope.
//!
//!     Ok(())
//! }
//!
//! async fn read(fs: TarFs, name: &str) -> Result<Vec<u8>> {
//!     let mut file = fs.open(name)?;
//!     let mut data = Vec::new();
//!     file.read_to_end(&mut data).await?;
//!     Ok(data)
//! }
//! ```

pub(crate) mod file;

pub use file::File;

use crate::entry::{Entry, Metadata};
use crate::error::{Result, TarFsError};
use crate::read::LoadOptions;
use crate::table::Table;

use std::io::{Read, Seek};
use std::path::MAIN_SEPARATOR;
use std::sync::Arc;

use futures_lite::io::AsyncRead;

/// A filesystem which supports opening named entries for reading.
pub trait FileSystem {
    /// The handle type returned when an entry is opened.
    type File<'a>: OpenFile
    where
        Self: 'a;

    /// Opens the entry stored under the provided name.
    fn open(&self, name: &str) -> Result<Self::File<'_>>;
}

/// An open handle to a single filesystem entry.
pub trait OpenFile: Read + Seek {
    /// Returns the entry's metadata.
    fn stat(&self) -> Result<Metadata>;

    /// Returns the metadata of the entry's children if it's a directory.
    ///
    /// Implementations may ignore `count` and return every child at once.
    fn readdir(&mut self, count: usize) -> Result<Vec<Metadata>>;

    /// Closes the handle.
    fn close(&mut self) -> Result<()>;
}

/// A builder for [`TarFs`] which allows configuring how the archive is decoded.
#[derive(Debug, Clone, Default)]
pub struct TarFsBuilder {
    options: LoadOptions,
}

impl TarFsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether or not blocks of zeros are skipped rather than treated as the end of the archive.
    ///
    /// Enabling this allows concatenated archives to be read as one. Defaults to `false`.
    pub fn ignore_zeros(mut self, ignore_zeros: bool) -> Self {
        self.options.ignore_zeros = ignore_zeros;
        self
    }

    /// Consumes this builder and decodes the whole tar stream into a new filesystem.
    pub fn build<R: Read>(self, reader: R) -> Result<TarFs> {
        crate::read::table(reader, self.options).map(TarFs::from_table)
    }

    /// Consumes this builder and decodes the whole async tar stream into a new filesystem.
    ///
    /// The stream is read to its end into memory before any entries are decoded.
    pub async fn build_async<R>(self, reader: R) -> Result<TarFs>
    where
        R: AsyncRead + Unpin,
    {
        crate::read::table_from_async(reader, self.options).await.map(TarFs::from_table)
    }
}

/// A read-only filesystem which acts over the entries of a tar archive held in memory.
#[derive(Debug, Clone)]
pub struct TarFs {
    table: Arc<Table>,
}

impl TarFs {
    /// Constructs a new filesystem by decoding the whole tar stream.
    ///
    /// It's the caller's responsibility to close the reader once this returns; pass `&mut reader` to retain it.
    pub fn new<R: Read>(reader: R) -> Result<TarFs> {
        TarFsBuilder::new().build(reader)
    }

    /// Constructs a new filesystem by decoding the whole async tar stream.
    pub async fn from_async<R>(reader: R) -> Result<TarFs>
    where
        R: AsyncRead + Unpin,
    {
        TarFsBuilder::new().build_async(reader).await
    }

    /// Constructs a filesystem from an already decoded table.
    pub fn from_table(table: Table) -> TarFs {
        TarFs { table: Arc::new(table) }
    }

    /// Returns the table of entries this filesystem acts over.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Returns the number of entries held.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns whether or not this filesystem holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns an iterator over every entry, ordered by path.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.table.entries()
    }

    /// Returns whether or not an entry is stored under the provided name.
    ///
    /// Names which would be rejected by [`TarFs::open()`] are never contained.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Returns the metadata of the entry stored under the provided name without opening it.
    pub fn metadata(&self, name: &str) -> Result<&Metadata> {
        self.lookup(name).map(Entry::metadata)
    }

    /// Opens the entry stored under the provided name.
    ///
    /// The name is matched verbatim against the paths recorded within the archive. No normalisation takes place, so
    /// `"./a.txt"`, `"/a.txt"` and `"a.txt"` all refer to different entries.
    ///
    /// If the entry is a directory, its children are listed eagerly: every entry whose path begins with `name` is
    /// included, which means the directory itself and any sibling sharing the prefix (eg. `"subdir/x"` when opening
    /// `"sub"`) are listed too.
    pub fn open(&self, name: &str) -> Result<File<'_>> {
        let entry = self.lookup(name)?;
        let children = entry.metadata.is_dir().then(|| self.table.with_prefix(name));

        Ok(File::new(entry, children))
    }

    fn lookup(&self, name: &str) -> Result<&Entry> {
        validate_name(name)?;
        self.table.get(name).ok_or(TarFsError::NotFound)
    }
}

impl FileSystem for TarFs {
    type File<'a> = File<'a>;

    fn open(&self, name: &str) -> Result<File<'_>> {
        TarFs::open(self, name)
    }
}

/// Rejects names which hold a NUL byte or a platform separator other than `/`.
fn validate_name(name: &str) -> Result<()> {
    if name.contains('\0') || (MAIN_SEPARATOR != '/' && name.contains(MAIN_SEPARATOR)) {
        return Err(TarFsError::InvalidPath);
    }

    Ok(())
}
