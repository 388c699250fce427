//! Markdown export

use tabvault_tabs::GroupRecord;

use crate::codec::host_and_path;
use crate::filename::tab_count_label;

const PIN_MARKER: &str = "📌";

fn escape_link_text(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

pub(crate) fn render(groups: &[GroupRecord]) -> String {
    let mut out = String::from("# Tab Groups Export\n");

    for group in groups {
        out.push_str(&format!(
            "\n## {} ({}, {})\n\n",
            group.display_title(),
            group.display_color(),
            tab_count_label(group.tab_count())
        ));

        for entry in &group.urls {
            out.push_str(&format!(
                "- [{}]({})",
                escape_link_text(&host_and_path(&entry.url)),
                entry.url
            ));
            if entry.is_pinned() {
                out.push(' ');
                out.push_str(PIN_MARKER);
            }
            out.push('\n');
        }
    }

    out
}
