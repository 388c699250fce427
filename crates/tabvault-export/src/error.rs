//! Export and import error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("Invalid JSON: expected an array, found {0}")]
    NotAnArray(&'static str),

    #[error("Invalid group at index {index}: {reason}")]
    InvalidGroup { index: usize, reason: String },
}
