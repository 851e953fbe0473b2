// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(feature = "chrono")]
use chrono::{DateTime, LocalResult, TimeZone, Utc};

/// A modification time stored as whole seconds since the Unix epoch, as recorded within a tar header.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct ModTime {
    pub(crate) secs: u64,
}

impl ModTime {
    /// Constructs a modification time from whole seconds since the Unix epoch.
    pub fn from_unix(secs: u64) -> Self {
        Self { secs }
    }

    /// Returns the number of whole seconds since the Unix epoch.
    pub fn unix_secs(&self) -> u64 {
        self.secs
    }

    /// Constructs the standard library's [`SystemTime`] representation of this time.
    ///
    /// Returns [`None`] if the value cannot be represented on the current platform.
    pub fn as_system_time(&self) -> Option<SystemTime> {
        UNIX_EPOCH.checked_add(Duration::from_secs(self.secs))
    }

    /// Constructs chrono's [`DateTime`] representation of this time.
    ///
    /// Note that this requires the `chrono` feature.
    #[cfg(feature = "chrono")]
    pub fn as_chrono(&self) -> LocalResult<DateTime<Utc>> {
        self.into()
    }
}

impl From<u64> for ModTime {
    fn from(secs: u64) -> Self {
        Self::from_unix(secs)
    }
}

#[cfg(feature = "chrono")]
impl From<&ModTime> for LocalResult<DateTime<Utc>> {
    fn from(value: &ModTime) -> Self {
        match i64::try_from(value.secs) {
            Ok(secs) => Utc.timestamp_opt(secs, 0),
            Err(_) => LocalResult::None,
        }
    }
}

#[cfg(feature = "chrono")]
impl From<ModTime> for LocalResult<DateTime<Utc>> {
    fn from(value: ModTime) -> Self {
        (&value).into()
    }
}
