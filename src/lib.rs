// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! # tarfs
//!
//! A read-only, in-memory filesystem built from the contents of a tar archive.
//!
//! The whole archive is decoded up front into an immutable table of entries which can then be opened, read, seeked
//! and listed concurrently without touching disk. Typical use is embedding a bundle of static assets into a process
//! and serving them without temporary extraction.
//!
//! ## Features
//! - Runtime-agnostic async reading via [`futures_lite`]'s IO traits, alongside the standard [`std::io`] traits.
//! - Optional [`tokio`](https://docs.rs/tokio) adapters behind the `tokio` feature.
//! - Optional [`chrono`](https://docs.rs/chrono) modification times behind the `chrono` feature.
//!
//! ## Example
//! ```no_run
//! # use tarfs::TarFs;
//! # use std::io::Read;
//! #
//! # fn run() -> std::io::Result<()> {
//! let archive = std::fs::File::open("./assets.tar")?;
//! let fs = TarFs::new(archive)?;
//!
//! let mut file = fs.open("readme.txt")?;
//! let mut contents = String::new();
//! file.read_to_string(&mut contents)?;
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod fs;
pub(crate) mod read;
pub mod table;

#[cfg(feature = "tokio")]
pub mod tokio;

pub(crate) mod date;

pub use crate::date::ModTime;
pub use crate::entry::{Entry, EntryKind, Metadata};
pub use crate::fs::{File, FileSystem, OpenFile, TarFs, TarFsBuilder};
pub use crate::table::Table;
