//! Application facade
//!
//! Every front-end action goes through [`TabVault`]: it owns the stores and
//! the browser port and sequences capture, conversion, persistence, restore
//! and sync.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use tabvault_export::{default_session_name, import_groups, render, ExportArtifact, ExportFormat};
use tabvault_session::{
    Clock, ExportHistory, ExportHistoryEntry, SessionError, SessionListing, SessionRecord,
    SessionStore, SystemClock,
};
use tabvault_storage::{Database, KeyValueStore, QuotaStore};
use tabvault_tabs::BrowserApi;

use crate::capture::{capture_groups, capture_layout, ExportSelection};
use crate::config::Config;
use crate::restore::{RestoreEngine, RestoreReport};
use crate::sync::{CloudSync, SyncReport};
use crate::Result;

type SharedStore = Arc<dyn KeyValueStore>;

pub struct TabVault<B> {
    config: Config,
    browser: B,
    clock: Arc<dyn Clock>,
    sessions: SessionStore<SharedStore>,
    history: ExportHistory<SharedStore>,
    sync: Option<CloudSync<QuotaStore<SharedStore>>>,
}

impl<B: BrowserApi> TabVault<B> {
    /// Open the on-disk stores named by the config
    pub fn open(config: Config, browser: B) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let local: SharedStore = Arc::new(Database::open(&config.database_path)?);

        let synced: Option<SharedStore> = if config.sync_enabled {
            if let Some(parent) = config.sync_database_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            Some(Arc::new(Database::open(&config.sync_database_path)?))
        } else {
            None
        };

        tracing::info!(
            database = %config.database_path.display(),
            sync_enabled = config.sync_enabled,
            "Opened tab vault"
        );

        Ok(Self::with_stores(config, browser, local, synced))
    }

    /// Build over caller-provided stores. The sync store is wrapped in the
    /// configured quota; it is ignored when sync is disabled.
    pub fn with_stores(
        config: Config,
        browser: B,
        local: SharedStore,
        synced: Option<SharedStore>,
    ) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);

        let sessions = SessionStore::new(Arc::clone(&local))
            .with_capacity(config.max_sessions)
            .with_clock(Arc::clone(&clock));
        let history = ExportHistory::new(local).with_limit(config.history_limit);
        let sync = synced
            .filter(|_| config.sync_enabled)
            .map(|store| CloudSync::new(QuotaStore::new(store, config.sync_quota_bytes)));

        Self {
            config,
            browser,
            clock,
            sessions,
            history,
            sync,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.sessions = self.sessions.with_clock(Arc::clone(&clock));
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_millis()).unwrap_or_default()
    }

    fn resolve_name(&self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            default_session_name(self.clock.now_local())
        } else {
            name.to_string()
        }
    }

    /// A history write failure never fails the export it describes
    fn record_history(&self, filename: &str, count: usize, date: DateTime<Utc>) {
        if let Err(e) = self.history.record(filename, count, date) {
            tracing::warn!(filename = %filename, "Failed to update export history: {}", e);
        }
    }

    // === Export ===

    /// Capture the selection, render it, keep it as a session and log it in
    /// the export history. `None` uses the configured default format.
    pub fn export_selection(
        &self,
        name: &str,
        selection: &ExportSelection,
        format: Option<ExportFormat>,
    ) -> Result<ExportArtifact> {
        let format = format.unwrap_or(self.config.default_format);
        let groups = capture_groups(&self.browser, selection)?;
        let name = self.resolve_name(name);

        let now = self.now();
        let artifact = render(&name, &groups, format, now)?;
        let count = groups.len();
        self.sessions.save(&name, groups)?;
        self.record_history(&artifact.filename, count, now);

        tracing::info!(
            filename = %artifact.filename,
            format = %format,
            bytes = artifact.body.len(),
            "Exported selection"
        );

        Ok(artifact)
    }

    /// JSON text of the selection for the clipboard; also kept as a session
    pub fn copy_selection(&self, selection: &ExportSelection) -> Result<String> {
        let groups = capture_groups(&self.browser, selection)?;
        let text = serde_json::to_string_pretty(&groups)?;
        self.sessions.save("", groups)?;
        Ok(text)
    }

    /// Render a saved session; `None` uses the configured default format
    pub fn export_session(
        &self,
        session_id: &str,
        format: Option<ExportFormat>,
    ) -> Result<ExportArtifact> {
        let format = format.unwrap_or(self.config.default_format);
        let session = self.sessions.get(session_id)?;
        let now = self.now();
        let artifact = render(&session.name, &session.data, format, now)?;
        self.record_history(&artifact.filename, session.group_count, now);

        tracing::info!(session_id = %session_id, filename = %artifact.filename, "Exported session");

        Ok(artifact)
    }

    pub fn history(&self) -> Result<Vec<ExportHistoryEntry>> {
        Ok(self.history.entries()?)
    }

    pub fn clear_history(&self) -> Result<()> {
        Ok(self.history.clear()?)
    }

    // === Sessions ===

    /// Snapshot every window with its geometry and groups
    pub fn save_layout(&self, name: &str) -> Result<SessionRecord> {
        let windows = capture_layout(
            &self.browser,
            self.config.include_pinned,
            self.config.include_ungrouped,
        )?;
        Ok(self.sessions.save_layout(name, windows)?)
    }

    pub fn session(&self, session_id: &str) -> Result<SessionRecord> {
        Ok(self.sessions.get(session_id)?)
    }

    pub fn list_sessions(&self, search: &str) -> Result<SessionListing> {
        Ok(self.sessions.list(search)?)
    }

    /// Merge two or more saved sessions into a new one
    pub fn merge_sessions(&self, session_ids: &[&str], name: &str) -> Result<SessionRecord> {
        if session_ids.len() < 2 {
            return Err(SessionError::NotEnoughSessions(session_ids.len()).into());
        }

        let sources = session_ids
            .iter()
            .map(|id| self.sessions.get(id))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let merged = self.sessions.save_merged(name, &sources)?;

        tracing::info!(
            session_id = %merged.id,
            sources = sources.len(),
            tab_count = merged.tab_count,
            "Merged sessions"
        );

        Ok(merged)
    }

    /// Flip the pin and refresh the synced mirror
    pub fn toggle_pin(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let updated = self.sessions.toggle_pin(session_id)?;
        if updated.is_some() {
            self.sync_pinned()?;
        }
        Ok(updated)
    }

    pub fn delete_session(&self, session_id: &str) -> Result<bool> {
        Ok(self.sessions.delete(session_id)?)
    }

    /// Push the pinned sessions to synced storage. `None` when sync is off.
    pub fn sync_pinned(&self) -> Result<Option<SyncReport>> {
        match &self.sync {
            Some(sync) => Ok(Some(sync.push(&self.sessions.all()?)?)),
            None => Ok(None),
        }
    }

    pub fn synced_sessions(&self) -> Result<Vec<SessionRecord>> {
        match &self.sync {
            Some(sync) => Ok(sync.synced()?),
            None => Ok(Vec::new()),
        }
    }

    // === Restore ===

    /// Decode an import file and open its groups in a new window
    pub fn import_text(&self, text: &str) -> Result<RestoreReport> {
        let groups = import_groups(text)?;
        RestoreEngine::new(&self.browser).restore(&groups)
    }

    /// Reopen a saved session; layouts get their windows back
    pub fn restore_session(&self, session_id: &str) -> Result<RestoreReport> {
        let session = self.sessions.get(session_id)?;
        let engine = RestoreEngine::new(&self.browser);

        tracing::info!(session_id = %session_id, layout = session.is_layout, "Restoring session");

        match session.windows() {
            Some(windows) => engine.restore_layout(windows),
            None => engine.restore(&session.data),
        }
    }
}
