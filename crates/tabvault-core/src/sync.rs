//! Mirror of pinned sessions in the synced storage area

use tabvault_session::SessionRecord;
use tabvault_storage::{measure_bytes, KeyValueStore, KeyValueStoreExt};

use crate::error::SyncError;

pub const SYNC_KEY: &str = "syncedSessions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub sessions: usize,
    /// Bytes the mirror takes up against the quota
    pub bytes: usize,
}

pub struct CloudSync<S> {
    store: S,
}

impl<S: KeyValueStore> CloudSync<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replace the mirror with the pinned subset of `sessions`
    pub fn push(&self, sessions: &[SessionRecord]) -> Result<SyncReport, SyncError> {
        let pinned: Vec<&SessionRecord> = sessions.iter().filter(|s| s.pinned).collect();
        let value = serde_json::to_value(&pinned).map_err(tabvault_storage::StorageError::from)?;
        let bytes = measure_bytes(SYNC_KEY, &value)?;

        if let Err(e) = self.store.set(SYNC_KEY, value) {
            tracing::error!(sessions = pinned.len(), bytes, "Failed to sync pinned sessions: {}", e);
            return Err(e.into());
        }

        tracing::info!(sessions = pinned.len(), bytes, "Synced pinned sessions");

        Ok(SyncReport {
            sessions: pinned.len(),
            bytes,
        })
    }

    pub fn synced(&self) -> Result<Vec<SessionRecord>, SyncError> {
        Ok(self
            .store
            .get_as::<Vec<SessionRecord>>(SYNC_KEY)?
            .unwrap_or_default())
    }

    pub fn clear(&self) -> Result<(), SyncError> {
        self.store.remove(SYNC_KEY)?;
        tracing::info!("Cleared synced sessions");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabvault_storage::{MemoryStore, QuotaStore, SYNC_QUOTA_BYTES};
    use tabvault_tabs::{GroupColor, GroupRecord, UrlEntry};

    fn session(ts: i64, pinned: bool, tabs: usize) -> SessionRecord {
        let urls = (0..tabs)
            .map(|i| UrlEntry::bare(format!("https://example.com/page/{}/{}", ts, i)))
            .collect();
        let mut record = SessionRecord::new(
            format!("Session {}", ts),
            vec![GroupRecord::new("G", GroupColor::Cyan, false).with_urls(urls)],
            ts,
        );
        record.pinned = pinned;
        record
    }

    #[test]
    fn test_push_only_pinned() {
        let sync = CloudSync::new(QuotaStore::new(MemoryStore::new(), SYNC_QUOTA_BYTES));
        let sessions = vec![session(1, true, 2), session(2, false, 2), session(3, true, 1)];

        let report = sync.push(&sessions).unwrap();
        assert_eq!(report.sessions, 2);
        assert!(report.bytes > SYNC_KEY.len());

        let ids: Vec<String> = sync.synced().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["session-1", "session-3"]);
    }

    #[test]
    fn test_last_write_wins() {
        let sync = CloudSync::new(MemoryStore::new());
        sync.push(&[session(1, true, 1)]).unwrap();
        sync.push(&[session(2, true, 1)]).unwrap();

        let synced = sync.synced().unwrap();
        assert_eq!(synced.len(), 1);
        assert_eq!(synced[0].id, "session-2");
    }

    #[test]
    fn test_quota_exceeded() {
        let inner = MemoryStore::new();
        let sync = CloudSync::new(QuotaStore::new(inner.clone(), 2_000));
        sync.push(&[session(1, true, 1)]).unwrap();

        let result = sync.push(&[session(1, true, 1), session(2, true, 100)]);
        assert!(matches!(
            result,
            Err(SyncError::QuotaExceeded { quota: 2_000, .. })
        ));

        // The previous mirror is untouched
        assert_eq!(sync.synced().unwrap().len(), 1);
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn test_clear() {
        let sync = CloudSync::new(MemoryStore::new());
        sync.push(&[session(1, true, 1)]).unwrap();
        sync.clear().unwrap();
        assert!(sync.synced().unwrap().is_empty());
    }
}
