//! Exported tab group record
//!
//! This is the wire shape shared by the structured export format, the import
//! path and the persisted sessions:
//!
//! ```json
//! { "title": "Work", "color": "blue", "collapsed": false,
//!   "urls": ["https://a.com", { "url": "https://b.com", "pinned": true }] }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupColor {
    #[default]
    Grey,
    Blue,
    Red,
    Yellow,
    Green,
    Pink,
    Purple,
    Cyan,
    Orange,
}

impl GroupColor {
    pub const ALL: [GroupColor; 9] = [
        GroupColor::Grey,
        GroupColor::Blue,
        GroupColor::Red,
        GroupColor::Yellow,
        GroupColor::Green,
        GroupColor::Pink,
        GroupColor::Purple,
        GroupColor::Cyan,
        GroupColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupColor::Grey => "grey",
            GroupColor::Blue => "blue",
            GroupColor::Red => "red",
            GroupColor::Yellow => "yellow",
            GroupColor::Green => "green",
            GroupColor::Pink => "pink",
            GroupColor::Purple => "purple",
            GroupColor::Cyan => "cyan",
            GroupColor::Orange => "orange",
        }
    }
}

impl std::fmt::Display for GroupColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GroupColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        GroupColor::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| format!("Unknown group color: {}", s))
    }
}

/// One saved tab.
///
/// `pinned: None` is the compact form written when pinned-state tracking is
/// off; it serializes as a bare URL string. `Some(_)` serializes as an
/// object carrying the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UrlEntryRepr", into = "UrlEntryRepr")]
pub struct UrlEntry {
    pub url: String,
    pub pinned: Option<bool>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum UrlEntryRepr {
    Bare(String),
    Tracked {
        url: String,
        #[serde(default)]
        pinned: bool,
    },
}

impl From<UrlEntryRepr> for UrlEntry {
    fn from(repr: UrlEntryRepr) -> Self {
        match repr {
            UrlEntryRepr::Bare(url) => UrlEntry { url, pinned: None },
            UrlEntryRepr::Tracked { url, pinned } => UrlEntry {
                url,
                pinned: Some(pinned),
            },
        }
    }
}

impl From<UrlEntry> for UrlEntryRepr {
    fn from(entry: UrlEntry) -> Self {
        match entry.pinned {
            None => UrlEntryRepr::Bare(entry.url),
            Some(pinned) => UrlEntryRepr::Tracked {
                url: entry.url,
                pinned,
            },
        }
    }
}

impl UrlEntry {
    /// Compact entry without pinned state
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pinned: None,
        }
    }

    /// Entry that records the tab's pinned state
    pub fn tracked(url: impl Into<String>, pinned: bool) -> Self {
        Self {
            url: url.into(),
            pinned: Some(pinned),
        }
    }

    /// Build from a live tab, honoring the pinned-tracking toggle
    pub fn from_tab(url: impl Into<String>, pinned: bool, include_pinned: bool) -> Self {
        if include_pinned {
            Self::tracked(url, pinned)
        } else {
            Self::bare(url)
        }
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned == Some(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRecord {
    #[serde(default)]
    pub title: String,
    /// Absent in hand-written imports; restore then keeps the browser default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<GroupColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    #[serde(default)]
    pub urls: Vec<UrlEntry>,
}

impl GroupRecord {
    pub fn new(title: impl Into<String>, color: GroupColor, collapsed: bool) -> Self {
        Self {
            title: title.into(),
            color: Some(color),
            collapsed: Some(collapsed),
            urls: Vec::new(),
        }
    }

    pub fn with_urls(mut self, urls: Vec<UrlEntry>) -> Self {
        self.urls = urls;
        self
    }

    pub fn tab_count(&self) -> usize {
        self.urls.len()
    }

    /// Title for display, `(Untitled)` when empty
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Color for display, the browser default when unset
    pub fn display_color(&self) -> GroupColor {
        self.color.unwrap_or_default()
    }
}
