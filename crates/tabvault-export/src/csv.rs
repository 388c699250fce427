//! Tabular export

use tabvault_tabs::GroupRecord;

use crate::codec::host;

const HEADER: &str = "Group Name,Tab Title,URL,Color,Pinned";

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

pub(crate) fn render(groups: &[GroupRecord]) -> String {
    let mut lines = vec![HEADER.to_string()];

    for group in groups {
        let color = group.display_color();
        for entry in &group.urls {
            lines.push(format!(
                "{},{},{},{},{}",
                quote(&group.title),
                quote(&host(&entry.url)),
                quote(&entry.url),
                color,
                if entry.is_pinned() { "Yes" } else { "No" },
            ));
        }
    }

    lines.join("\n")
}
