//! Export history
//!
//! A short, newest-first log of the files produced by exports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tabvault_export::item_count_label;
use tabvault_storage::{KeyValueStore, KeyValueStoreExt};

use crate::Result;

pub const HISTORY_KEY: &str = "exportHistory";
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportHistoryEntry {
    pub filename: String,
    pub date: DateTime<Utc>,
    /// Number of groups in the export
    pub count: usize,
}

impl ExportHistoryEntry {
    /// One line for the history list
    pub fn summary(&self) -> String {
        format!(
            "{} – {} ({})",
            self.date.format("%Y-%m-%d %H:%M"),
            self.filename,
            item_count_label(self.count)
        )
    }
}

pub struct ExportHistory<S> {
    store: S,
    limit: usize,
}

impl<S: KeyValueStore> ExportHistory<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            limit: HISTORY_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Entries, newest first. A corrupt stored value reads as empty.
    pub fn entries(&self) -> Result<Vec<ExportHistoryEntry>> {
        match self.store.get_as::<Vec<ExportHistoryEntry>>(HISTORY_KEY) {
            Ok(entries) => Ok(entries.unwrap_or_default()),
            Err(tabvault_storage::StorageError::Json(e)) => {
                tracing::warn!("Ignoring unreadable export history: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn record(&self, filename: &str, count: usize, date: DateTime<Utc>) -> Result<Vec<ExportHistoryEntry>> {
        let mut entries = self.entries()?;
        entries.insert(
            0,
            ExportHistoryEntry {
                filename: filename.to_string(),
                date,
                count,
            },
        );
        entries.truncate(self.limit);

        self.store.set_as(HISTORY_KEY, &entries)?;

        tracing::debug!(filename = %filename, count, "Recorded export");

        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.remove(HISTORY_KEY)?;
        tracing::info!("Cleared export history");
        Ok(())
    }
}
