//! TabVault Tab Model
//!
//! The exported shape of a tab group, the per-window layout descriptor, and
//! the [`BrowserApi`] port through which groups are captured and recreated.

mod browser;
mod error;
mod group;
mod memory;
mod window;

pub use browser::{
    BrowserApi, GroupId, GroupUpdate, TabGroupInfo, TabId, TabInfo, TabQuery, WindowId,
    WindowInfo, WindowSpec,
};
pub use error::BrowserError;
pub use group::{GroupColor, GroupRecord, UrlEntry};
pub use memory::{MemoryBrowser, DEFAULT_NEW_TAB_URL};
pub use window::{WindowLayout, WindowState};

pub type Result<T> = std::result::Result<T, BrowserError>;
