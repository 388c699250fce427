//! TabVault Export Codec
//!
//! Turns a list of [`GroupRecord`](tabvault_tabs::GroupRecord)s into one of
//! five text formats, and validates structured documents on the way back in.
//! Everything here is a pure transform; writing the result to a file or the
//! clipboard is left to the caller.

mod codec;
mod csv;
mod error;
mod filename;
mod format;
mod html;
mod import;
mod markdown;
mod text;

pub use codec::{convert, convert_at, render, ExportArtifact};
pub use error::{ExportError, ImportError};
pub use filename::{
    default_session_name, export_filename, item_count_label, sanitize_filename, tab_count_label,
};
pub use format::ExportFormat;
pub use import::import_groups;

pub type Result<T> = std::result::Result<T, ExportError>;
