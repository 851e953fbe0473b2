// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::Entry;
use crate::table::Table;

/// A builder for [`Table`].
#[derive(Default)]
pub(crate) struct TableBuilder(pub(crate) Table);

impl TableBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry under its own path, returning any entry it superseded.
    pub(crate) fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.0.entries.insert(entry.metadata.path.clone(), entry)
    }

    /// Consumes this builder and returns a final [`Table`].
    pub(crate) fn build(self) -> Table {
        self.0
    }
}
