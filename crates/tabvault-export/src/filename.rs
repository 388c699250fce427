//! Filenames, default names and count labels

use chrono::{Local, NaiveDateTime};

use crate::format::ExportFormat;

/// Replace every character outside `[A-Za-z0-9_-]` with `_`, one for one
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `session-YYYY-MM-DD-HHMM`
pub fn default_session_name(now: NaiveDateTime) -> String {
    now.format("session-%Y-%m-%d-%H%M").to_string()
}

/// Download filename for a session; a blank name gets the default name
pub fn export_filename(session_name: &str, format: ExportFormat) -> String {
    let name = session_name.trim();
    let base = if name.is_empty() {
        default_session_name(Local::now().naive_local())
    } else {
        name.to_string()
    };
    format!("{}.{}", sanitize_filename(&base), format.extension())
}

fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

pub fn tab_count_label(count: usize) -> String {
    count_label(count, "tab")
}

pub fn item_count_label(count: usize) -> String {
    count_label(count, "item")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_filename("My Session: Q1/Q2"), "My_Session__Q1_Q2");
        assert_eq!(sanitize_filename("session-<>:\"/\\|?*"), "session-_________");
        assert_eq!(
            sanitize_filename("session-2025-01-15-Work"),
            "session-2025-01-15-Work"
        );
        // Multi-byte characters count once each
        assert_eq!(sanitize_filename("café"), "caf_");
    }

    #[test]
    fn test_default_name() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 5)
            .unwrap()
            .and_hms_opt(7, 4, 0)
            .unwrap();
        assert_eq!(default_session_name(now), "session-2025-01-05-0704");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Work", ExportFormat::Html), "Work.html");
        assert_eq!(export_filename("  My Work Session ", ExportFormat::Json), "My_Work_Session.json");

        let fallback = export_filename("   ", ExportFormat::Markdown);
        assert!(fallback.starts_with("session-"));
        assert!(fallback.ends_with(".md"));
    }

    #[test]
    fn test_count_labels() {
        assert_eq!(tab_count_label(0), "0 tabs");
        assert_eq!(tab_count_label(1), "1 tab");
        assert_eq!(tab_count_label(2), "2 tabs");
        assert_eq!(tab_count_label(100), "100 tabs");
        assert_eq!(item_count_label(1), "1 item");
        assert_eq!(item_count_label(5), "5 items");
    }
}
