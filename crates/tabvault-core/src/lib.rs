//! TabVault Core
//!
//! Coordination layer: captures groups from the live browser, restores
//! saved groups and layouts, mirrors pinned sessions to synced storage, and
//! exposes all of it through [`TabVault`].

mod capture;
mod config;
mod error;
mod restore;
mod sync;
mod vault;

pub use capture::{capture_groups, capture_layout, ExportSelection, UNGROUPED_TITLE};
pub use config::Config;
pub use error::{CoreError, SyncError};
pub use restore::{is_blank_tab, RestoreEngine, RestoreReport};
pub use sync::{CloudSync, SyncReport, SYNC_KEY};
pub use vault::TabVault;

// Re-export the building blocks
pub use tabvault_export::{ExportArtifact, ExportFormat, ImportError};
pub use tabvault_session::{
    Clock, ExportHistoryEntry, SessionListing, SessionRecord, SessionStore, SystemClock,
};
pub use tabvault_storage::{Database, KeyValueStore, MemoryStore, QuotaStore, StorageError};
pub use tabvault_tabs::{
    BrowserApi, BrowserError, GroupColor, GroupRecord, MemoryBrowser, UrlEntry, WindowLayout,
    WindowState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
