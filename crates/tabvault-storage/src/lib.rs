//! TabVault Storage Layer
//!
//! Key-value persistence for saved sessions, export history and the synced
//! mirror. Callers only see the [`KeyValueStore`] port; the SQLite
//! [`Database`] and the in-memory [`MemoryStore`] are interchangeable.

mod database;
mod error;
mod memory;
mod migrations;
mod quota;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use quota::{measure_bytes, QuotaStore, SYNC_QUOTA_BYTES};
pub use store::{KeyValueStore, KeyValueStoreExt};

pub type Result<T> = std::result::Result<T, StorageError>;
