//! Core error types

use thiserror::Error;

use tabvault_storage::StorageError;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sync quota exceeded: {needed} bytes needed, {quota} bytes allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Sync storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for SyncError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::QuotaExceeded { needed, quota } => SyncError::QuotaExceeded { needed, quota },
            other => SyncError::Storage(other),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Browser error: {0}")]
    Browser(#[from] tabvault_tabs::BrowserError),

    #[error("Session error: {0}")]
    Session(#[from] tabvault_session::SessionError),

    #[error("Export error: {0}")]
    Export(#[from] tabvault_export::ExportError),

    #[error("Import error: {0}")]
    Import(#[from] tabvault_export::ImportError),

    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No groups selected")]
    NothingSelected,
}

impl CoreError {
    /// Errors the front end shows as a blocking alert instead of a
    /// transient status line
    pub fn is_blocking(&self) -> bool {
        matches!(self, CoreError::Sync(SyncError::QuotaExceeded { .. }))
    }

    /// Status text for the user
    pub fn user_message(&self) -> String {
        match self {
            CoreError::NothingSelected => {
                "No groups selected. Please select at least one group or enable \"Include ungrouped tabs\"."
                    .to_string()
            }
            CoreError::Import(e) => format!("Could not import file: {}", e),
            CoreError::Sync(SyncError::QuotaExceeded { .. }) => {
                "Pinned sessions are too large to sync. Unpin some sessions and try again."
                    .to_string()
            }
            CoreError::Session(tabvault_session::SessionError::NotEnoughSessions(_)) => {
                "Select at least two sessions to merge.".to_string()
            }
            _ => "Operation failed. See logs for details.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_error_is_blocking() {
        let err = CoreError::from(SyncError::from(StorageError::QuotaExceeded {
            needed: 200_000,
            quota: 102_400,
        }));
        assert!(err.is_blocking());
        assert!(err.user_message().contains("Unpin"));

        let err = CoreError::from(SyncError::from(StorageError::Unavailable("down".to_string())));
        assert!(!err.is_blocking());
    }

    #[test]
    fn test_validation_messages() {
        assert!(CoreError::NothingSelected.user_message().starts_with("No groups selected"));
        assert!(!CoreError::NothingSelected.is_blocking());
    }
}
