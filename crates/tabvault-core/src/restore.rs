//! Restore saved groups into new browser windows

use std::collections::HashSet;

use tabvault_tabs::{
    BrowserApi, GroupRecord, GroupUpdate, TabId, TabQuery, WindowId, WindowLayout, WindowSpec,
};

use crate::Result;

/// Pages a new window opens with that a restore may close
const BLANK_TAB_URLS: [&str; 4] = [
    "about:blank",
    "chrome://newtab/",
    "edge://newtab/",
    "about:newtab",
];

pub fn is_blank_tab(url: &str) -> bool {
    BLANK_TAB_URLS.contains(&url)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Groups that were created in the browser
    pub groups_imported: usize,
    pub tabs_created: usize,
    /// URLs already open in the target window
    pub skipped_duplicates: usize,
    pub failed_tabs: usize,
    pub windows_created: usize,
    /// Layout windows the browser refused to open
    pub failed_windows: usize,
}

impl RestoreReport {
    fn absorb(&mut self, other: RestoreReport) {
        self.groups_imported += other.groups_imported;
        self.tabs_created += other.tabs_created;
        self.skipped_duplicates += other.skipped_duplicates;
        self.failed_tabs += other.failed_tabs;
        self.windows_created += other.windows_created;
        self.failed_windows += other.failed_windows;
    }
}

/// State for filling one window
struct WindowFill {
    window_id: WindowId,
    seen: HashSet<String>,
    /// Initial blank tab, closed once a real tab exists
    blank_tab: Option<TabId>,
}

pub struct RestoreEngine<'a, B: ?Sized> {
    browser: &'a B,
}

impl<'a, B: BrowserApi + ?Sized> RestoreEngine<'a, B> {
    pub fn new(browser: &'a B) -> Self {
        Self { browser }
    }

    /// Open one focused window and recreate the groups in it
    pub fn restore(&self, groups: &[GroupRecord]) -> Result<RestoreReport> {
        let mut report = self.fill_window(&WindowSpec::focused(), groups)?;

        tracing::info!(
            groups = report.groups_imported,
            tabs = report.tabs_created,
            skipped = report.skipped_duplicates,
            failed = report.failed_tabs,
            "Restored tab groups"
        );

        report.windows_created = 1;
        Ok(report)
    }

    /// Recreate a multi-window layout, one window per descriptor. A window
    /// that cannot be opened is counted and skipped.
    pub fn restore_layout(&self, windows: &[WindowLayout]) -> Result<RestoreReport> {
        let mut report = RestoreReport::default();

        for (index, layout) in windows.iter().enumerate() {
            let spec = WindowSpec {
                left: Some(layout.left),
                top: Some(layout.top),
                width: Some(layout.width),
                height: Some(layout.height),
                state: layout.state.for_restore(),
                focused: index == 0,
            };

            match self.fill_window(&spec, &layout.groups) {
                Ok(mut window_report) => {
                    window_report.windows_created = 1;
                    report.absorb(window_report);
                }
                Err(e) => {
                    tracing::warn!(window = index, "Failed to open layout window: {}", e);
                    report.failed_windows += 1;
                }
            }
        }

        tracing::info!(
            windows = report.windows_created,
            groups = report.groups_imported,
            tabs = report.tabs_created,
            skipped = report.skipped_duplicates,
            failed_windows = report.failed_windows,
            "Restored window layout"
        );

        Ok(report)
    }

    fn open_window(&self, spec: &WindowSpec) -> Result<WindowFill> {
        let window = self.browser.create_window(spec)?;
        let existing = self.browser.tabs(TabQuery::Window(window.id))?;

        let blank_tab = match existing.as_slice() {
            [only] if is_blank_tab(&only.url) => Some(only.id),
            _ => None,
        };

        let seen = existing
            .into_iter()
            .filter(|t| Some(t.id) != blank_tab)
            .map(|t| t.url)
            .collect();

        Ok(WindowFill {
            window_id: window.id,
            seen,
            blank_tab,
        })
    }

    fn fill_window(&self, spec: &WindowSpec, groups: &[GroupRecord]) -> Result<RestoreReport> {
        let mut fill = self.open_window(spec)?;
        let mut report = RestoreReport::default();

        for group in groups {
            let tab_ids = self.create_tabs(&mut fill, group, &mut report);
            if tab_ids.is_empty() {
                continue;
            }
            if self.build_group(fill.window_id, group, &tab_ids) {
                report.groups_imported += 1;
            }
        }

        if report.skipped_duplicates > 0 {
            tracing::info!(
                window_id = fill.window_id,
                skipped = report.skipped_duplicates,
                "Skipped tabs already open"
            );
        }

        Ok(report)
    }

    fn create_tabs(
        &self,
        fill: &mut WindowFill,
        group: &GroupRecord,
        report: &mut RestoreReport,
    ) -> Vec<TabId> {
        let mut tab_ids = Vec::new();

        for entry in &group.urls {
            if fill.seen.contains(&entry.url) {
                report.skipped_duplicates += 1;
                continue;
            }

            match self
                .browser
                .create_tab(fill.window_id, &entry.url, entry.is_pinned())
            {
                Ok(tab) => {
                    tab_ids.push(tab.id);
                    fill.seen.insert(entry.url.clone());
                    report.tabs_created += 1;
                    self.close_blank_tab(fill);
                }
                Err(e) => {
                    tracing::warn!(url = %entry.url, "Failed to create tab: {}", e);
                    report.failed_tabs += 1;
                }
            }
        }

        tab_ids
    }

    fn close_blank_tab(&self, fill: &mut WindowFill) {
        if let Some(tab_id) = fill.blank_tab.take() {
            if let Err(e) = self.browser.remove_tab(tab_id) {
                tracing::warn!(tab_id, "Failed to close blank tab: {}", e);
            }
        }
    }

    /// Group the tabs and apply the record's properties. Returns false when
    /// the group could not be created.
    fn build_group(&self, window_id: WindowId, group: &GroupRecord, tab_ids: &[TabId]) -> bool {
        let group_id = match self.browser.group_tabs(window_id, tab_ids) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(title = %group.title, "Failed to group tabs: {}", e);
                return false;
            }
        };

        let update = GroupUpdate {
            title: Some(group.title.clone()).filter(|t| !t.is_empty()),
            color: group.color,
            collapsed: group.collapsed,
        };
        if !update.is_empty() {
            if let Err(e) = self.browser.update_group(group_id, &update) {
                tracing::warn!(group_id, "Failed to update group: {}", e);
            }
        }

        if let Err(e) = self.browser.move_group(group_id, window_id) {
            tracing::warn!(group_id, "Failed to move group: {}", e);
        }

        true
    }
}
