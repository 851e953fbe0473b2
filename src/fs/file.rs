// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::{Entry, Metadata};
use crate::error::{Result, TarFsError};
use crate::fs::OpenFile;

use std::io::{BufRead, Read, Seek, SeekFrom};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_lite::io::{AsyncBufRead, AsyncRead, AsyncSeek};

/// An open handle to a single entry, holding its own cursor over the entry's content.
///
/// Reads and seeks behave as they would over a fixed in-memory buffer: seeking past the end is permitted and yields no
/// further bytes, whilst seeking before the start fails with [`TarFsError::InvalidOffset`].
#[derive(Debug)]
pub struct File<'a> {
    entry: &'a Entry,
    children: Option<Vec<&'a Metadata>>,
    position: u64,
    closed: bool,
}

impl<'a> File<'a> {
    pub(crate) fn new(entry: &'a Entry, children: Option<Vec<&'a Metadata>>) -> Self {
        Self { entry, children, position: 0, closed: false }
    }

    /// Returns the entry's metadata.
    pub fn metadata(&self) -> &'a Metadata {
        &self.entry.metadata
    }

    /// Returns the entry's whole content, regardless of the current position.
    pub fn contents(&self) -> &'a [u8] {
        &self.entry.content
    }

    /// Returns the length of the entry's content in bytes.
    pub fn len(&self) -> u64 {
        self.entry.content.len() as u64
    }

    /// Returns whether or not the entry's content is empty.
    pub fn is_empty(&self) -> bool {
        self.entry.content.is_empty()
    }

    /// Returns the current cursor position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the children listed when this directory was opened, or [`None`] if the entry isn't a directory.
    pub fn children(&self) -> Option<&[&'a Metadata]> {
        self.children.as_deref()
    }

    /// Returns whether or not [`OpenFile::close()`] has been called.
    ///
    /// Closing doesn't invalidate the handle; reads and seeks continue to succeed afterwards.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn remaining(&self) -> &'a [u8] {
        let content = &self.entry.content;
        let start = usize::try_from(self.position).unwrap_or(usize::MAX).min(content.len());
        &content[start..]
    }

    fn seek_to(&mut self, position: SeekFrom) -> Result<u64> {
        let (base, offset) = match position {
            SeekFrom::Start(offset) => {
                self.position = offset;
                return Ok(offset);
            }
            SeekFrom::End(offset) => (self.len(), offset),
            SeekFrom::Current(offset) => (self.position, offset),
        };

        self.position = base.checked_add_signed(offset).ok_or(TarFsError::InvalidOffset)?;
        Ok(self.position)
    }
}

impl OpenFile for File<'_> {
    fn stat(&self) -> Result<Metadata> {
        Ok(self.metadata().clone())
    }

    /// Returns every child listed when the directory was opened.
    ///
    /// # Note
    /// `count` is ignored and the whole listing is returned on every call, so callers may receive more entries than
    /// requested. Fails with [`TarFsError::NotFound`] if the entry isn't a directory.
    fn readdir(&mut self, _count: usize) -> Result<Vec<Metadata>> {
        match &self.children {
            Some(children) => Ok(children.iter().map(|&metadata| metadata.clone()).collect()),
            None => Err(TarFsError::NotFound),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

impl Read for File<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let read = self.remaining().read(buf)?;
        self.position += read as u64;
        Ok(read)
    }
}

impl BufRead for File<'_> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        Ok(self.remaining())
    }

    fn consume(&mut self, amt: usize) {
        self.position += amt as u64;
    }
}

impl Seek for File<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        Ok(self.seek_to(pos)?)
    }

    fn stream_position(&mut self) -> std::io::Result<u64> {
        Ok(self.position)
    }
}

impl AsyncRead for File<'_> {
    fn poll_read(self: Pin<&mut Self>, _: &mut Context<'_>, buf: &mut [u8]) -> Poll<std::io::Result<usize>> {
        Poll::Ready(self.get_mut().read(buf))
    }
}

impl AsyncBufRead for File<'_> {
    fn poll_fill_buf(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<std::io::Result<&[u8]>> {
        Poll::Ready(Ok(self.get_mut().remaining()))
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        BufRead::consume(self.get_mut(), amt)
    }
}

impl AsyncSeek for File<'_> {
    fn poll_seek(self: Pin<&mut Self>, _: &mut Context<'_>, pos: SeekFrom) -> Poll<std::io::Result<u64>> {
        Poll::Ready(self.get_mut().seek_to(pos).map_err(Into::into))
    }
}
