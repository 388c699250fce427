//! Browser capability port
//!
//! The subset of the tabs / tab groups / windows API the vault needs. Every
//! call is a blocking request/response; callers issue them one at a time.

use crate::group::GroupColor;
use crate::window::WindowState;
use crate::Result;

pub type TabId = i32;
pub type WindowId = i32;
pub type GroupId = i32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabInfo {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: String,
    pub pinned: bool,
    pub group_id: Option<GroupId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabGroupInfo {
    pub id: GroupId,
    pub window_id: WindowId,
    pub title: String,
    pub color: GroupColor,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub state: WindowState,
}

/// Parameters for opening a window; unset geometry is left to the browser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowSpec {
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub state: WindowState,
    pub focused: bool,
}

impl WindowSpec {
    pub fn focused() -> Self {
        Self {
            focused: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabQuery {
    All,
    Window(WindowId),
    Group(GroupId),
    Ungrouped,
}

/// Partial group update; `None` fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupUpdate {
    pub title: Option<String>,
    pub color: Option<GroupColor>,
    pub collapsed: Option<bool>,
}

impl GroupUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.color.is_none() && self.collapsed.is_none()
    }
}

pub trait BrowserApi {
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowInfo>;

    fn windows(&self) -> Result<Vec<WindowInfo>>;

    /// Tabs matching the query, in tab-strip order
    fn tabs(&self, query: TabQuery) -> Result<Vec<TabInfo>>;

    /// Open a background tab at the end of the window's tab strip
    fn create_tab(&self, window_id: WindowId, url: &str, pinned: bool) -> Result<TabInfo>;

    fn remove_tab(&self, tab_id: TabId) -> Result<()>;

    /// Put the tabs into a new group inside `window_id`
    fn group_tabs(&self, window_id: WindowId, tab_ids: &[TabId]) -> Result<GroupId>;

    fn tab_groups(&self, window_id: Option<WindowId>) -> Result<Vec<TabGroupInfo>>;

    fn update_group(&self, group_id: GroupId, update: &GroupUpdate) -> Result<()>;

    /// Move a group to the end of the window's tab strip
    fn move_group(&self, group_id: GroupId, window_id: WindowId) -> Result<()>;
}
