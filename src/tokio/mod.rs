// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A set of [`tokio`]-specific constructors and types.
//!
//! # Usage
//! With the `tokio` feature enabled, [`TarFs`] gains additional methods which internally implement conversion between
//! [`tokio`]'s IO traits and the [`futures_lite`] traits used by the base implementation:
//! - [`TarFs::with_tokio()`]
//! - [`TarFs::open_tokio()`]
//!
//! The returned [`File`] wraps the base [`crate::fs::File`] so that it can be named without pulling in [`tokio_util`]
//! as a separate dependency.

#[cfg(doc)]
use tokio_util;

use crate::error::Result;
use crate::fs::{TarFs, TarFsBuilder};

use std::io::SeekFrom;
use std::pin::Pin;
use std::task::{Context, Poll};

use ::tokio::io::{AsyncBufRead, AsyncRead, AsyncSeek, ReadBuf};
use pin_project::pin_project;
use tokio_util::compat::{Compat, FuturesAsyncReadCompatExt, TokioAsyncReadCompatExt};

impl TarFsBuilder {
    /// Consumes this builder and decodes the whole [`tokio`] tar stream into a new filesystem.
    pub async fn build_tokio<R>(self, reader: R) -> Result<TarFs>
    where
        R: AsyncRead + Unpin,
    {
        self.build_async(TokioAsyncReadCompatExt::compat(reader)).await
    }
}

impl TarFs {
    /// Constructs a new filesystem by decoding the whole [`tokio`] tar stream.
    ///
    /// # Example
    /// ```no_run
    /// # use tarfs::TarFs;
    /// # use tarfs::error::Result;
    /// # use tokio::io::AsyncReadExt;
    /// #
    /// async fn run() -> Result<()> {
    ///     let archive = tokio::fs::File::open("./assets.tar").await?;
    ///     let fs = TarFs::with_tokio(archive).await?;
    ///
    ///     let mut data = String::new();
    ///     fs.open_tokio("readme.txt")?.read_to_string(&mut data).await?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub async fn with_tokio<R>(reader: R) -> Result<TarFs>
    where
        R: AsyncRead + Unpin,
    {
        TarFsBuilder::new().build_tokio(reader).await
    }

    /// Opens the entry stored under the provided name for use with [`tokio`]'s IO traits.
    pub fn open_tokio(&self, name: &str) -> Result<File<'_>> {
        self.open(name).map(File::new)
    }
}

/// A [`tokio`]-compatible handle to a single entry.
#[pin_project]
pub struct File<'a>(#[pin] Compat<crate::fs::File<'a>>);

impl<'a> File<'a> {
    fn new(file: crate::fs::File<'a>) -> Self {
        Self(FuturesAsyncReadCompatExt::compat(file))
    }

    /// Returns a reference to the base handle.
    pub fn get_ref(&self) -> &crate::fs::File<'a> {
        self.0.get_ref()
    }

    /// Consumes this handle and returns the base handle.
    pub fn into_inner(self) -> crate::fs::File<'a> {
        self.0.into_inner()
    }
}

impl AsyncRead for File<'_> {
    fn poll_read(self: Pin<&mut Self>, c: &mut Context<'_>, b: &mut ReadBuf<'_>) -> Poll<std::io::Result<()>> {
        self.project().0.poll_read(c, b)
    }
}

impl AsyncBufRead for File<'_> {
    fn poll_fill_buf(self: Pin<&mut Self>, c: &mut Context<'_>) -> Poll<std::io::Result<&[u8]>> {
        self.project().0.poll_fill_buf(c)
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        self.project().0.consume(amt)
    }
}

impl AsyncSeek for File<'_> {
    fn start_seek(self: Pin<&mut Self>, position: SeekFrom) -> std::io::Result<()> {
        self.project().0.start_seek(position)
    }

    fn poll_complete(self: Pin<&mut Self>, c: &mut Context<'_>) -> Poll<std::io::Result<u64>> {
        self.project().0.poll_complete(c)
    }
}
