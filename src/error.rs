// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which holds relevant error reporting structures/types.

use thiserror::Error;

/// A Result type alias over TarFsError to minimise repetition.
pub type Result<V> = std::result::Result<V, TarFsError>;

/// An enum of possible errors and their descriptions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TarFsError {
    #[error("failed to load tar archive: {0}")]
    Load(#[from] std::io::Error),

    #[error("invalid character in file path")]
    InvalidPath,
    #[error("file does not exist")]
    NotFound,
    #[error("attempted to seek before the start of the file")]
    InvalidOffset,
}

impl TarFsError {
    /// Returns whether or not this error was caused by a lookup of a path absent from the archive.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TarFsError::NotFound)
    }

    /// Returns the closest [`std::io::ErrorKind`] for this error.
    pub fn kind(&self) -> std::io::ErrorKind {
        match self {
            TarFsError::Load(err) => err.kind(),
            TarFsError::InvalidPath | TarFsError::InvalidOffset => std::io::ErrorKind::InvalidInput,
            TarFsError::NotFound => std::io::ErrorKind::NotFound,
        }
    }
}

impl From<TarFsError> for std::io::Error {
    fn from(err: TarFsError) -> Self {
        match err {
            TarFsError::Load(inner) => inner,
            other => std::io::Error::new(other.kind(), other),
        }
    }
}
