// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which decodes tar archives into an in-memory [`Table`].

use crate::date::ModTime;
use crate::entry::{base_name, Entry, EntryKind, Metadata};
use crate::error::Result;
use crate::table::{Table, TableBuilder};

use std::io::{Error, ErrorKind, Read};

use futures_lite::io::{AsyncRead, AsyncReadExt};

/// The max capacity reserved up front for a single entry's content, equal to 16MiB.
///
/// Headers are untrusted so larger entries grow their buffer as bytes actually arrive.
const MAX_PREALLOCATION: usize = 16 * 1024 * 1024;

/// The mask and value of the file type bits which mark a directory within a mode.
const S_IFMT: u32 = 0o170000;
const S_IFDIR: u32 = 0o040000;

/// Options which control how an archive is decoded.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct LoadOptions {
    pub(crate) ignore_zeros: bool,
}

/// Drains a tar stream entry by entry until the end of the archive, returning every decoded entry.
///
/// Any failure aborts the whole load; a partially populated table is never returned.
#[tracing::instrument(skip(reader))]
pub(crate) fn table<R: Read>(reader: R, options: LoadOptions) -> Result<Table> {
    let mut archive = tar::Archive::new(reader);
    archive.set_ignore_zeros(options.ignore_zeros);

    let mut builder = TableBuilder::new();

    for entry in archive.entries()? {
        let entry = self::entry(entry?)?;
        tracing::trace!(path = entry.path(), size = entry.metadata.size, kind = ?entry.metadata.kind, "decoded entry");

        if let Some(superseded) = builder.insert(entry) {
            tracing::debug!(path = superseded.path(), "entry superseded an earlier entry with the same path");
        }
    }

    let table = builder.build();
    tracing::debug!(entries = table.len(), "finished loading archive");

    Ok(table)
}

/// Reads an async source to its end before decoding it as a tar stream.
pub(crate) async fn table_from_async<R>(mut reader: R, options: LoadOptions) -> Result<Table>
where
    R: AsyncRead + Unpin,
{
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;

    table(data.as_slice(), options)
}

fn entry<R: Read>(mut entry: tar::Entry<'_, R>) -> Result<Entry> {
    let path = utf8(entry.path_bytes().into_owned())?;
    let link_name = entry.link_name_bytes().map(|raw| utf8(raw.into_owned())).transpose()?;

    let header = entry.header();
    let mode = header.mode()?;
    let kind = kind(header.entry_type(), mode, &path);
    let modified = ModTime::from_unix(header.mtime()?);
    let uid = header.uid()?;
    let gid = header.gid()?;
    let size = entry.size();

    let mut content = Vec::with_capacity(usize::try_from(size).unwrap_or(MAX_PREALLOCATION).min(MAX_PREALLOCATION));
    entry.read_to_end(&mut content)?;

    if (content.len() as u64) < size {
        return Err(Error::new(ErrorKind::UnexpectedEof, format!("content of '{path}' was truncated")).into());
    }

    let metadata = Metadata { name: base_name(&path).to_owned(), path, size, mode, modified, kind, link_name, uid, gid };

    Ok(Entry { content, metadata })
}

fn kind(entry_type: tar::EntryType, mode: u32, path: &str) -> EntryKind {
    match entry_type {
        tar::EntryType::Directory => EntryKind::Directory,
        // Pre-POSIX archives mark directories with a regular type and either a trailing separator or the directory
        // file type bits within the mode.
        tar::EntryType::Regular | tar::EntryType::Continuous if path.ends_with('/') => EntryKind::Directory,
        tar::EntryType::Regular | tar::EntryType::Continuous if mode & S_IFMT == S_IFDIR => EntryKind::Directory,
        tar::EntryType::Regular | tar::EntryType::Continuous | tar::EntryType::GNUSparse => EntryKind::Regular,
        tar::EntryType::Symlink => EntryKind::Symlink,
        tar::EntryType::Link => EntryKind::HardLink,
        other => EntryKind::Other(other.as_byte()),
    }
}

fn utf8(raw: Vec<u8>) -> Result<String> {
    String::from_utf8(raw).map_err(|err| Error::new(ErrorKind::InvalidData, err).into())
}
