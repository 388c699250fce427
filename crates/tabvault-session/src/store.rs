//! Session Store
//!
//! CRUD over the saved-session collection. Every operation loads the
//! collection fresh, changes a local copy and writes the whole map back, so
//! a failed write leaves the stored collection untouched. Concurrent
//! writers are not coordinated: the last write wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use tabvault_export::default_session_name;
use tabvault_storage::{KeyValueStore, KeyValueStoreExt};
use tabvault_tabs::{GroupRecord, WindowLayout};

use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::merge::merge_sessions;
use crate::session::SessionRecord;
use crate::Result;

/// Storage key of the collection
pub const SESSIONS_KEY: &str = "savedSessions";

/// Default capacity of the collection
pub const MAX_SESSIONS: usize = 50;

type Collection = BTreeMap<String, SessionRecord>;

/// Sessions split the way the session list shows them, newest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionListing {
    pub pinned: Vec<SessionRecord>,
    pub unpinned: Vec<SessionRecord>,
}

pub struct SessionStore<S> {
    store: S,
    clock: Arc<dyn Clock>,
    capacity: usize,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            capacity: MAX_SESSIONS,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn load(&self) -> Result<Collection> {
        self.store
            .get_as::<Collection>(SESSIONS_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                tracing::error!("Failed to load sessions: {}", e);
                SessionError::from(e)
            })
    }

    fn persist(&self, sessions: &Collection) -> Result<()> {
        self.store.set_as(SESSIONS_KEY, sessions).map_err(|e| {
            tracing::error!("Failed to persist sessions: {}", e);
            SessionError::from(e)
        })
    }

    fn resolve_name(&self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            default_session_name(self.clock.now_local())
        } else {
            name.to_string()
        }
    }

    fn insert(&self, session: SessionRecord) -> Result<SessionRecord> {
        let mut sessions = self.load()?;
        sessions.insert(session.id.clone(), session.clone());

        let evicted = evict_oldest(&mut sessions, self.capacity);
        if !evicted.is_empty() {
            tracing::info!(
                evicted = evicted.len(),
                capacity = self.capacity,
                "Evicted oldest sessions"
            );
        }

        self.persist(&sessions)?;

        tracing::info!(
            session_id = %session.id,
            session_name = %session.name,
            tab_count = session.tab_count,
            group_count = session.group_count,
            "Saved session"
        );

        Ok(session)
    }

    /// Save a snapshot of tab groups as a new session
    pub fn save(&self, name: &str, groups: Vec<GroupRecord>) -> Result<SessionRecord> {
        let session = SessionRecord::new(self.resolve_name(name), groups, self.clock.now_millis());
        self.insert(session)
    }

    /// Save a multi-window layout as a new session
    pub fn save_layout(&self, name: &str, windows: Vec<WindowLayout>) -> Result<SessionRecord> {
        let session =
            SessionRecord::layout(self.resolve_name(name), windows, self.clock.now_millis());
        self.insert(session)
    }

    /// Merge the given sessions and save the result as a new session
    pub fn save_merged(&self, name: &str, sessions: &[SessionRecord]) -> Result<SessionRecord> {
        let groups = merge_sessions(sessions)?;
        self.save(name, groups)
    }

    pub fn get(&self, session_id: &str) -> Result<SessionRecord> {
        self.load()?
            .remove(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))
    }

    /// Every session, newest first
    pub fn all(&self) -> Result<Vec<SessionRecord>> {
        let mut sessions: Vec<SessionRecord> = self.load()?.into_values().collect();
        sort_newest_first(&mut sessions);
        Ok(sessions)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Filter by name or group title (case-insensitive substring) and split
    /// into pinned and unpinned. An empty term matches everything.
    pub fn list(&self, search: &str) -> Result<SessionListing> {
        let term = search.trim().to_lowercase();

        let (pinned, unpinned): (Vec<SessionRecord>, Vec<SessionRecord>) = self
            .all()?
            .into_iter()
            .filter(|s| term.is_empty() || s.matches(&term))
            .partition(|s| s.pinned);

        Ok(SessionListing { pinned, unpinned })
    }

    /// Pinned sessions, newest first
    pub fn pinned(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.all()?.into_iter().filter(|s| s.pinned).collect())
    }

    /// Flip the pinned flag. Returns `None` without writing when the id is
    /// unknown.
    pub fn toggle_pin(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let mut sessions = self.load()?;

        let updated = match sessions.get_mut(session_id) {
            Some(session) => {
                session.pinned = !session.pinned;
                session.clone()
            }
            None => {
                tracing::debug!(session_id = %session_id, "Pin toggle for unknown session");
                return Ok(None);
            }
        };

        self.persist(&sessions)?;

        tracing::info!(session_id = %session_id, pinned = updated.pinned, "Toggled session pin");

        Ok(Some(updated))
    }

    /// Remove a session. Confirming with the user is the caller's job.
    pub fn delete(&self, session_id: &str) -> Result<bool> {
        let mut sessions = self.load()?;
        let removed = sessions.remove(session_id).is_some();

        self.persist(&sessions)?;

        tracing::info!(session_id = %session_id, removed, "Deleted session");

        Ok(removed)
    }
}

fn sort_newest_first(sessions: &mut [SessionRecord]) {
    sessions.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.id.cmp(&a.id))
    });
}

/// Keep the `capacity` most recent sessions. Pinned sessions get no
/// special treatment.
fn evict_oldest(sessions: &mut Collection, capacity: usize) -> Vec<String> {
    if sessions.len() <= capacity {
        return Vec::new();
    }

    let mut ordered: Vec<SessionRecord> = sessions.values().cloned().collect();
    sort_newest_first(&mut ordered);

    let evicted: Vec<String> = ordered
        .into_iter()
        .skip(capacity)
        .map(|s| s.id)
        .collect();
    for id in &evicted {
        sessions.remove(id);
    }
    evicted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use serde_json::Value;
    use tabvault_storage::{Database, MemoryStore, StorageError};
    use tabvault_tabs::{GroupColor, UrlEntry, WindowState};

    const START: i64 = 1_700_000_000_000;

    fn store_with_clock() -> (SessionStore<Database>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(START));
        let store = SessionStore::new(Database::open_in_memory().unwrap()).with_clock(clock.clone());
        (store, clock)
    }

    fn groups(title: &str, urls: &[&str]) -> Vec<GroupRecord> {
        vec![GroupRecord::new(title, GroupColor::Blue, false)
            .with_urls(urls.iter().map(|u| UrlEntry::bare(*u)).collect())]
    }

    /// Reads succeed, writes fail
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> tabvault_storage::Result<Option<Value>> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: Value) -> tabvault_storage::Result<()> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        fn remove(&self, _key: &str) -> tabvault_storage::Result<()> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        fn keys(&self) -> tabvault_storage::Result<Vec<String>> {
            self.0.keys()
        }
    }

    #[test]
    fn test_save_and_get() {
        let (store, _clock) = store_with_clock();

        let saved = store
            .save("Work", groups("Docs", &["https://a.com", "https://b.com"]))
            .unwrap();
        assert_eq!(saved.id, format!("session-{}", START));
        assert_eq!(saved.tab_count, 2);
        assert_eq!(saved.group_count, 1);
        assert!(!saved.pinned);

        assert_eq!(store.get(&saved.id).unwrap(), saved);
        assert!(matches!(store.get("session-0"), Err(SessionError::NotFound(_))));
    }

    #[test]
    fn test_blank_name_gets_default() {
        let (store, _clock) = store_with_clock();
        let saved = store.save("   ", groups("G", &["https://a.com"])).unwrap();
        assert!(saved.name.starts_with("session-2023-11-14-"));
    }

    #[test]
    fn test_list_sorted_and_split() {
        let (store, clock) = store_with_clock();

        let old = store.save("Old", groups("Alpha", &["https://a.com"])).unwrap();
        clock.advance(10);
        let mid = store.save("Mid", groups("Beta", &["https://b.com"])).unwrap();
        clock.advance(10);
        let new = store.save("New", groups("Gamma", &["https://c.com"])).unwrap();

        store.toggle_pin(&old.id).unwrap();

        let listing = store.list("").unwrap();
        let pinned: Vec<&str> = listing.pinned.iter().map(|s| s.name.as_str()).collect();
        let unpinned: Vec<&str> = listing.unpinned.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(pinned, vec!["Old"]);
        assert_eq!(unpinned, vec!["New", "Mid"]);

        // Group titles match too, case-insensitively
        let listing = store.list("BETA").unwrap();
        assert!(listing.pinned.is_empty());
        assert_eq!(listing.unpinned, vec![mid]);

        let listing = store.list("ne").unwrap();
        assert_eq!(listing.unpinned, vec![new]);
    }

    #[test]
    fn test_toggle_pin() {
        let (store, _clock) = store_with_clock();
        let saved = store.save("Work", groups("G", &["https://a.com"])).unwrap();

        let pinned = store.toggle_pin(&saved.id).unwrap().unwrap();
        assert!(pinned.pinned);
        assert!(store.get(&saved.id).unwrap().pinned);
        assert_eq!(store.pinned().unwrap().len(), 1);

        let unpinned = store.toggle_pin(&saved.id).unwrap().unwrap();
        assert!(!unpinned.pinned);

        assert!(store.toggle_pin("session-missing").unwrap().is_none());
    }

    #[test]
    fn test_delete() {
        let (store, _clock) = store_with_clock();
        let saved = store.save("Work", groups("G", &["https://a.com"])).unwrap();

        assert!(store.delete(&saved.id).unwrap());
        assert!(store.is_empty().unwrap());
        assert!(!store.delete(&saved.id).unwrap());
    }

    #[test]
    fn test_capacity_evicts_oldest_even_if_pinned() {
        let (store, clock) = store_with_clock();

        let first = store.save("first", groups("G", &["https://a.com"])).unwrap();
        store.toggle_pin(&first.id).unwrap();

        for i in 0..MAX_SESSIONS {
            clock.advance(1);
            store.save(&format!("s{}", i), groups("G", &["https://a.com"])).unwrap();
        }

        let all = store.all().unwrap();
        assert_eq!(all.len(), MAX_SESSIONS);
        // The pinned session was the oldest and is gone
        assert!(matches!(store.get(&first.id), Err(SessionError::NotFound(_))));
        let oldest_kept = all.last().unwrap().timestamp;
        assert_eq!(oldest_kept, START + 1);
    }

    #[test]
    fn test_repeated_saves_never_exceed_capacity() {
        let (store, clock) = store_with_clock();
        let store = store.with_capacity(5);

        for i in 0..12 {
            clock.advance(1);
            store.save(&format!("s{}", i), groups("G", &[])).unwrap();
            assert!(store.len().unwrap() <= 5);
        }

        let names: Vec<String> = store.all().unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["s11", "s10", "s9", "s8", "s7"]);
    }

    #[test]
    fn test_same_millisecond_overwrites() {
        let (store, _clock) = store_with_clock();
        store.save("first", groups("G", &[])).unwrap();
        store.save("second", groups("G", &[])).unwrap();

        let all = store.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "second");
    }

    #[test]
    fn test_save_layout() {
        let (store, _clock) = store_with_clock();
        let windows = vec![WindowLayout {
            left: 10,
            top: 20,
            width: 1024,
            height: 768,
            state: WindowState::Maximized,
            groups: groups("Main", &["https://a.com", "https://b.com"]),
        }];

        let saved = store.save_layout("Desk", windows.clone()).unwrap();
        let loaded = store.get(&saved.id).unwrap();
        assert!(loaded.is_layout);
        assert_eq!(loaded.window_count, Some(1));
        assert_eq!(loaded.layout, Some(windows));
        assert_eq!(loaded.tab_count, 2);
    }

    #[test]
    fn test_save_merged() {
        let (store, clock) = store_with_clock();
        let a = store.save("A", groups("G1", &["https://a.com", "https://x.com"])).unwrap();
        clock.advance(1);
        let b = store.save("B", groups("G2", &["https://x.com", "https://b.com"])).unwrap();
        clock.advance(1);

        let merged = store.save_merged("Merged", &[a, b]).unwrap();
        assert_eq!(merged.tab_count, 3);
        assert_eq!(merged.group_count, 2);
        assert_eq!(store.len().unwrap(), 3);
    }

    #[test]
    fn test_failed_write_leaves_collection_unchanged() {
        let backing = MemoryStore::new();
        let writable = SessionStore::new(backing.clone()).with_clock(Arc::new(ManualClock::new(1)));
        let saved = writable.save("Keep", groups("G", &["https://a.com"])).unwrap();

        let read_only = SessionStore::new(ReadOnlyStore(backing.clone()))
            .with_clock(Arc::new(ManualClock::new(2)));
        assert!(matches!(
            read_only.save("Lost", groups("G", &[])),
            Err(SessionError::Storage(_))
        ));
        assert!(read_only.toggle_pin(&saved.id).is_err());
        assert!(read_only.delete(&saved.id).is_err());

        let all = writable.all().unwrap();
        assert_eq!(all, vec![saved]);
    }

    #[test]
    fn test_counts_are_not_recomputed_on_read() {
        let backing = MemoryStore::new();
        let store = SessionStore::new(backing.clone()).with_clock(Arc::new(ManualClock::new(1)));
        let saved = store.save("Work", groups("G", &["https://a.com"])).unwrap();

        // Edit the stored data behind the store's back
        let mut raw: Collection = backing.get_as(SESSIONS_KEY).unwrap().unwrap();
        raw.get_mut(&saved.id).unwrap().data.clear();
        backing.set_as(SESSIONS_KEY, &raw).unwrap();

        let loaded = store.get(&saved.id).unwrap();
        assert!(loaded.data.is_empty());
        assert_eq!(loaded.tab_count, 1);
    }
}
