//! Snapshot the live browser into group records

use tabvault_tabs::{
    BrowserApi, GroupColor, GroupId, GroupRecord, TabGroupInfo, TabInfo, TabQuery, UrlEntry,
    WindowLayout,
};

use crate::error::CoreError;
use crate::Result;

/// Title of the synthetic group holding tabs outside any group
pub const UNGROUPED_TITLE: &str = "Ungrouped";

/// What the user ticked in the export panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSelection {
    pub group_ids: Vec<GroupId>,
    pub include_ungrouped: bool,
    pub include_pinned: bool,
}

impl ExportSelection {
    pub fn is_empty(&self) -> bool {
        self.group_ids.is_empty() && !self.include_ungrouped
    }
}

fn to_entries(tabs: Vec<TabInfo>, include_pinned: bool) -> Vec<UrlEntry> {
    tabs.into_iter()
        .map(|tab| UrlEntry::from_tab(tab.url, tab.pinned, include_pinned))
        .collect()
}

fn group_record<B: BrowserApi + ?Sized>(
    browser: &B,
    group: &TabGroupInfo,
    include_pinned: bool,
) -> Result<GroupRecord> {
    let tabs = browser.tabs(TabQuery::Group(group.id))?;
    Ok(GroupRecord::new(group.title.clone(), group.color, group.collapsed)
        .with_urls(to_entries(tabs, include_pinned)))
}

fn ungrouped_record(tabs: Vec<TabInfo>, include_pinned: bool) -> Option<GroupRecord> {
    if tabs.is_empty() {
        return None;
    }
    Some(
        GroupRecord::new(UNGROUPED_TITLE, GroupColor::Grey, false)
            .with_urls(to_entries(tabs, include_pinned)),
    )
}

/// Export data for the selected groups, in selection order, optionally
/// followed by the ungrouped tabs. Selected ids that no longer exist are
/// skipped.
pub fn capture_groups<B: BrowserApi + ?Sized>(
    browser: &B,
    selection: &ExportSelection,
) -> Result<Vec<GroupRecord>> {
    if selection.is_empty() {
        return Err(CoreError::NothingSelected);
    }

    let live_groups = browser.tab_groups(None)?;
    let mut records = Vec::new();

    for id in &selection.group_ids {
        match live_groups.iter().find(|g| g.id == *id) {
            Some(group) => records.push(group_record(browser, group, selection.include_pinned)?),
            None => tracing::debug!(group_id = id, "Selected group no longer exists"),
        }
    }

    if selection.include_ungrouped {
        let tabs = browser.tabs(TabQuery::Ungrouped)?;
        records.extend(ungrouped_record(tabs, selection.include_pinned));
    }

    tracing::debug!(groups = records.len(), "Captured tab groups");

    Ok(records)
}

/// One layout descriptor per open window, with every group in it
pub fn capture_layout<B: BrowserApi + ?Sized>(
    browser: &B,
    include_pinned: bool,
    include_ungrouped: bool,
) -> Result<Vec<WindowLayout>> {
    let mut layouts = Vec::new();

    for window in browser.windows()? {
        let mut groups = Vec::new();
        for group in browser.tab_groups(Some(window.id))? {
            groups.push(group_record(browser, &group, include_pinned)?);
        }

        if include_ungrouped {
            let tabs: Vec<TabInfo> = browser
                .tabs(TabQuery::Window(window.id))?
                .into_iter()
                .filter(|t| t.group_id.is_none())
                .collect();
            groups.extend(ungrouped_record(tabs, include_pinned));
        }

        layouts.push(WindowLayout {
            left: window.left,
            top: window.top,
            width: window.width,
            height: window.height,
            state: window.state,
            groups,
        });
    }

    tracing::debug!(windows = layouts.len(), "Captured window layout");

    Ok(layouts)
}
