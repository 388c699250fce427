//! Saved session record

use serde::{Deserialize, Serialize};
use tabvault_tabs::{GroupRecord, WindowLayout};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// `session-<timestamp>`
    pub id: String,
    pub name: String,
    /// Creation time, milliseconds since the Unix epoch
    pub timestamp: i64,
    /// Groups of the snapshot; for layouts, every window's groups in order
    #[serde(default)]
    pub data: Vec<GroupRecord>,
    /// Starred in the session list; also selects what gets synced
    #[serde(default)]
    pub pinned: bool,
    /// Cached at save time, never recomputed
    #[serde(default)]
    pub tab_count: usize,
    #[serde(default)]
    pub group_count: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_layout: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<WindowLayout>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_count: Option<usize>,
}

pub(crate) fn session_id(timestamp: i64) -> String {
    format!("session-{}", timestamp)
}

impl SessionRecord {
    pub fn new(name: String, data: Vec<GroupRecord>, timestamp: i64) -> Self {
        let tab_count = data.iter().map(GroupRecord::tab_count).sum();
        let group_count = data.len();

        Self {
            id: session_id(timestamp),
            name,
            timestamp,
            data,
            pinned: false,
            tab_count,
            group_count,
            is_layout: false,
            layout: None,
            window_count: None,
        }
    }

    /// Multi-window snapshot. `data` holds the concatenation of every
    /// window's groups for readers that do not understand layouts.
    pub fn layout(name: String, windows: Vec<WindowLayout>, timestamp: i64) -> Self {
        let data = windows
            .iter()
            .flat_map(|w| w.groups.iter().cloned())
            .collect();

        let mut session = Self::new(name, data, timestamp);
        session.is_layout = true;
        session.window_count = Some(windows.len());
        session.layout = Some(windows);
        session
    }

    /// Case-insensitive match on the name or any group title.
    /// `term` must already be lowercase.
    pub(crate) fn matches(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self
                .data
                .iter()
                .any(|g| g.title.to_lowercase().contains(term))
    }

    /// Windows to recreate, if this session is a layout
    pub fn windows(&self) -> Option<&[WindowLayout]> {
        match (&self.layout, self.is_layout) {
            (Some(windows), true) => Some(windows),
            _ => None,
        }
    }
}
