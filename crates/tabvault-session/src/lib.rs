//! TabVault Sessions
//!
//! - A session is a named, timestamped snapshot of tab groups
//! - A layout session additionally records every window's geometry
//! - The collection is capped; the oldest sessions are evicted first,
//!   pinned or not
//! - The whole collection is written back in a single `set`

mod clock;
mod error;
mod history;
mod merge;
mod session;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::SessionError;
pub use history::{ExportHistory, ExportHistoryEntry, HISTORY_KEY, HISTORY_LIMIT};
pub use merge::merge_sessions;
pub use session::SessionRecord;
pub use store::{SessionListing, SessionStore, MAX_SESSIONS, SESSIONS_KEY};

pub type Result<T> = std::result::Result<T, SessionError>;
