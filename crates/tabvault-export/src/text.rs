//! Plain-text report

use chrono::{DateTime, Utc};
use tabvault_tabs::GroupRecord;

use crate::filename::tab_count_label;

const RULE_WIDTH: usize = 50;

pub(crate) fn render(groups: &[GroupRecord], generated_at: DateTime<Utc>) -> String {
    let total_tabs: usize = groups.iter().map(GroupRecord::tab_count).sum();

    let mut out = String::new();
    out.push_str("Tab Groups Export\n");
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!(
        "Groups: {}, {}\n",
        groups.len(),
        tab_count_label(total_tabs)
    ));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    for group in groups {
        out.push('\n');
        out.push_str(&format!(
            "{} [{}] ({})\n",
            group.display_title(),
            group.display_color(),
            tab_count_label(group.tab_count())
        ));
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');

        for entry in &group.urls {
            out.push_str("  ");
            out.push_str(&entry.url);
            if entry.is_pinned() {
                out.push_str(" [pinned]");
            }
            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tabvault_tabs::{GroupColor, UrlEntry};

    #[test]
    fn test_report_layout() {
        let at = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
        let groups = vec![GroupRecord::new("Research", GroupColor::Purple, false).with_urls(vec![
            UrlEntry::tracked("https://a.com", true),
            UrlEntry::tracked("https://b.com", false),
        ])];

        let output = render(&groups, at);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Tab Groups Export");
        assert_eq!(lines[1], "Generated: 2025-01-15 09:30:00 UTC");
        assert_eq!(lines[2], "Groups: 1, 2 tabs");
        assert_eq!(lines[3], "=".repeat(50));
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Research [purple] (2 tabs)");
        assert_eq!(lines[6], "-".repeat(50));
        assert_eq!(lines[7], "  https://a.com [pinned]");
        assert_eq!(lines[8], "  https://b.com");
    }
}
