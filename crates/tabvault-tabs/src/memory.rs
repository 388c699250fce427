//! In-memory browser
//!
//! A complete [`BrowserApi`] over plain collections. Used by headless tools
//! and by the test suites to exercise capture and restore without a real
//! browser. Individual URLs can be marked as failing to simulate tabs the
//! browser refuses to open.

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;

use crate::browser::{
    BrowserApi, GroupId, GroupUpdate, TabGroupInfo, TabId, TabInfo, TabQuery, WindowId,
    WindowInfo, WindowSpec,
};
use crate::error::BrowserError;
use crate::group::GroupColor;
use crate::Result;

/// Tab a freshly created window opens with
pub const DEFAULT_NEW_TAB_URL: &str = "chrome://newtab/";

struct Inner {
    next_id: i32,
    windows: Vec<WindowInfo>,
    /// Ordered by position within each window
    tabs: Vec<TabInfo>,
    groups: Vec<TabGroupInfo>,
    startup_urls: Vec<String>,
    failing_urls: HashSet<String>,
    fail_group_updates: bool,
}

impl Inner {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn has_window(&self, window_id: WindowId) -> bool {
        self.windows.iter().any(|w| w.id == window_id)
    }

    fn push_tab(&mut self, window_id: WindowId, url: &str, pinned: bool) -> TabInfo {
        let tab = TabInfo {
            id: self.next_id(),
            window_id,
            url: url.to_string(),
            pinned,
            group_id: None,
        };
        self.tabs.push(tab.clone());
        tab
    }
}

pub struct MemoryBrowser {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryBrowser {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                next_id: 0,
                windows: Vec::new(),
                tabs: Vec::new(),
                groups: Vec::new(),
                startup_urls: vec![DEFAULT_NEW_TAB_URL.to_string()],
                failing_urls: HashSet::new(),
                fail_group_updates: false,
            })),
        }
    }

    /// Tabs every new window opens with (defaults to a single new-tab page)
    pub fn set_startup_urls<I, S>(&self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.write().startup_urls = urls.into_iter().map(Into::into).collect();
    }

    /// Make `create_tab` fail for this URL
    pub fn fail_url(&self, url: impl Into<String>) {
        self.inner.write().failing_urls.insert(url.into());
    }

    /// Make every `update_group` call fail
    pub fn fail_group_updates(&self, fail: bool) {
        self.inner.write().fail_group_updates = fail;
    }

    /// Create a group with the given tabs in an existing window
    pub fn seed_group(
        &self,
        window_id: WindowId,
        title: &str,
        color: GroupColor,
        collapsed: bool,
        tabs: &[(&str, bool)],
    ) -> Result<GroupId> {
        let mut inner = self.inner.write();
        if !inner.has_window(window_id) {
            return Err(BrowserError::WindowNotFound(window_id));
        }

        let group_id = inner.next_id();
        for (url, pinned) in tabs {
            inner.push_tab(window_id, url, *pinned);
            if let Some(last) = inner.tabs.last_mut() {
                last.group_id = Some(group_id);
            }
        }
        inner.groups.push(TabGroupInfo {
            id: group_id,
            window_id,
            title: title.to_string(),
            color,
            collapsed,
        });

        Ok(group_id)
    }

    pub fn window_count(&self) -> usize {
        self.inner.read().windows.len()
    }

    pub fn group(&self, group_id: GroupId) -> Option<TabGroupInfo> {
        self.inner
            .read()
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .cloned()
    }
}

impl Default for MemoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryBrowser {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl BrowserApi for MemoryBrowser {
    fn create_window(&self, spec: &WindowSpec) -> Result<WindowInfo> {
        let mut inner = self.inner.write();
        let window = WindowInfo {
            id: inner.next_id(),
            left: spec.left.unwrap_or(0),
            top: spec.top.unwrap_or(0),
            width: spec.width.unwrap_or(1280),
            height: spec.height.unwrap_or(800),
            state: spec.state,
        };
        inner.windows.push(window.clone());

        let startup = inner.startup_urls.clone();
        for url in &startup {
            inner.push_tab(window.id, url, false);
        }

        tracing::debug!(window_id = window.id, "Opened window");

        Ok(window)
    }

    fn windows(&self) -> Result<Vec<WindowInfo>> {
        Ok(self.inner.read().windows.clone())
    }

    fn tabs(&self, query: TabQuery) -> Result<Vec<TabInfo>> {
        let inner = self.inner.read();
        let tabs = inner
            .tabs
            .iter()
            .filter(|t| match query {
                TabQuery::All => true,
                TabQuery::Window(id) => t.window_id == id,
                TabQuery::Group(id) => t.group_id == Some(id),
                TabQuery::Ungrouped => t.group_id.is_none(),
            })
            .cloned()
            .collect();
        Ok(tabs)
    }

    fn create_tab(&self, window_id: WindowId, url: &str, pinned: bool) -> Result<TabInfo> {
        let mut inner = self.inner.write();
        if url.is_empty() {
            return Err(BrowserError::InvalidUrl("URL cannot be empty".to_string()));
        }
        if inner.failing_urls.contains(url) {
            return Err(BrowserError::Api(format!("Cannot open {}", url)));
        }
        if !inner.has_window(window_id) {
            return Err(BrowserError::WindowNotFound(window_id));
        }
        Ok(inner.push_tab(window_id, url, pinned))
    }

    fn remove_tab(&self, tab_id: TabId) -> Result<()> {
        let mut inner = self.inner.write();
        let index = inner
            .tabs
            .iter()
            .position(|t| t.id == tab_id)
            .ok_or(BrowserError::TabNotFound(tab_id))?;
        inner.tabs.remove(index);
        Ok(())
    }

    fn group_tabs(&self, window_id: WindowId, tab_ids: &[TabId]) -> Result<GroupId> {
        let mut inner = self.inner.write();
        if !inner.has_window(window_id) {
            return Err(BrowserError::WindowNotFound(window_id));
        }
        if let Some(missing) = tab_ids
            .iter()
            .find(|id| !inner.tabs.iter().any(|t| t.id == **id))
        {
            return Err(BrowserError::TabNotFound(*missing));
        }

        let group_id = inner.next_id();
        for tab in inner.tabs.iter_mut().filter(|t| tab_ids.contains(&t.id)) {
            tab.group_id = Some(group_id);
            tab.window_id = window_id;
        }
        inner.groups.push(TabGroupInfo {
            id: group_id,
            window_id,
            title: String::new(),
            color: GroupColor::default(),
            collapsed: false,
        });

        Ok(group_id)
    }

    fn tab_groups(&self, window_id: Option<WindowId>) -> Result<Vec<TabGroupInfo>> {
        Ok(self
            .inner
            .read()
            .groups
            .iter()
            .filter(|g| window_id.map_or(true, |id| g.window_id == id))
            .cloned()
            .collect())
    }

    fn update_group(&self, group_id: GroupId, update: &GroupUpdate) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.fail_group_updates {
            return Err(BrowserError::Api("Group update rejected".to_string()));
        }
        let group = inner
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(BrowserError::GroupNotFound(group_id))?;

        if let Some(title) = &update.title {
            group.title = title.clone();
        }
        if let Some(color) = update.color {
            group.color = color;
        }
        if let Some(collapsed) = update.collapsed {
            group.collapsed = collapsed;
        }
        Ok(())
    }

    fn move_group(&self, group_id: GroupId, window_id: WindowId) -> Result<()> {
        let mut inner = self.inner.write();
        if !inner.has_window(window_id) {
            return Err(BrowserError::WindowNotFound(window_id));
        }
        let group = inner
            .groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or(BrowserError::GroupNotFound(group_id))?;
        group.window_id = window_id;

        let (mut moved, rest): (Vec<TabInfo>, Vec<TabInfo>) = inner
            .tabs
            .drain(..)
            .partition(|t| t.group_id == Some(group_id));
        for tab in &mut moved {
            tab.window_id = window_id;
        }
        inner.tabs = rest;
        inner.tabs.extend(moved);
        Ok(())
    }
}
