//! Netscape bookmark export
//!
//! One top-level folder holding a sub-folder per group. Every node carries
//! the same generation timestamp.

use tabvault_tabs::GroupRecord;

use crate::codec::host_and_path;

const ROOT_FOLDER: &str = "Tab Groups";
const PIN_PREFIX: &str = "📌 ";

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn pad(out: &mut String, n: usize) {
    for _ in 0..n {
        out.push(' ');
    }
}

fn open_folder(out: &mut String, indent: usize, name: &str, timestamp: i64) {
    pad(out, indent);
    out.push_str(&format!(
        "<DT><H3 ADD_DATE=\"{ts}\" LAST_MODIFIED=\"{ts}\">{}</H3>\n",
        escape_html(name),
        ts = timestamp
    ));
    pad(out, indent);
    out.push_str("<DL><p>\n");
}

fn close_folder(out: &mut String, indent: usize) {
    pad(out, indent);
    out.push_str("</DL><p>\n");
}

pub(crate) fn render(groups: &[GroupRecord], timestamp: i64) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n");
    out.push_str("<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\n");
    out.push_str("<TITLE>Bookmarks</TITLE>\n");
    out.push_str("<H1>Bookmarks</H1>\n");
    out.push_str("<DL><p>\n");

    open_folder(&mut out, 2, ROOT_FOLDER, timestamp);
    for group in groups {
        open_folder(&mut out, 4, group.display_title(), timestamp);

        for entry in &group.urls {
            let mut title = host_and_path(&entry.url);
            if entry.is_pinned() {
                title.insert_str(0, PIN_PREFIX);
            }
            pad(&mut out, 6);
            out.push_str(&format!(
                "<DT><A HREF=\"{}\" ADD_DATE=\"{}\">{}</A>\n",
                escape_html(&entry.url),
                timestamp,
                escape_html(&title)
            ));
        }

        close_folder(&mut out, 4);
    }
    close_folder(&mut out, 2);

    out.push_str("</DL><p>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabvault_tabs::{GroupColor, UrlEntry};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_bookmark_document() {
        let groups = vec![GroupRecord::new("R&D <lab>", GroupColor::Cyan, false).with_urls(vec![
            UrlEntry::tracked("https://a.com/search?q=1&x=2", false),
            UrlEntry::tracked("https://b.com", true),
        ])];

        let output = render(&groups, 1_700_000_000);

        assert!(output.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>\n"));
        assert!(output.contains(
            "<DT><H3 ADD_DATE=\"1700000000\" LAST_MODIFIED=\"1700000000\">Tab Groups</H3>"
        ));
        assert!(output.contains(">R&amp;D &lt;lab&gt;</H3>"));
        assert!(output.contains(
            "<DT><A HREF=\"https://a.com/search?q=1&amp;x=2\" ADD_DATE=\"1700000000\">a.com/search</A>"
        ));
        assert!(output.contains(">📌 b.com/</A>"));

        // Every timestamp is the generation time
        let stamps = output.matches("=\"1700000000\"").count();
        assert_eq!(stamps, 2 + 2 + 2);

        // Folders are balanced
        assert_eq!(output.matches("<DL><p>").count(), output.matches("</DL><p>").count());
    }
}
