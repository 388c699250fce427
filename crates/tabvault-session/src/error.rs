//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] tabvault_storage::StorageError),

    #[error("Merging needs at least two sessions, got {0}")]
    NotEnoughSessions(usize),
}
