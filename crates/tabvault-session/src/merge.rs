//! Session merging
//!
//! Sessions are walked in the order given, groups in stored order. A URL is
//! kept only the first time it is seen anywhere in the merge, so the same
//! link never appears in two groups of the result. Groups left without URLs
//! are dropped.

use std::collections::HashSet;

use tabvault_tabs::{GroupRecord, UrlEntry};

use crate::error::SessionError;
use crate::session::SessionRecord;
use crate::Result;

pub fn merge_sessions(sessions: &[SessionRecord]) -> Result<Vec<GroupRecord>> {
    if sessions.len() < 2 {
        return Err(SessionError::NotEnoughSessions(sessions.len()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut merged = Vec::new();
    let mut duplicates = 0usize;

    for session in sessions {
        for group in &session.data {
            let urls: Vec<UrlEntry> = group
                .urls
                .iter()
                .filter(|entry| {
                    let fresh = seen.insert(entry.url.as_str());
                    if !fresh {
                        duplicates += 1;
                    }
                    fresh
                })
                .cloned()
                .collect();

            if urls.is_empty() {
                continue;
            }

            merged.push(GroupRecord {
                title: group.title.clone(),
                color: group.color,
                collapsed: group.collapsed,
                urls,
            });
        }
    }

    tracing::info!(
        sessions = sessions.len(),
        groups = merged.len(),
        duplicates,
        "Merged sessions"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tabvault_tabs::GroupColor;

    fn session(id: i64, groups: Vec<GroupRecord>) -> SessionRecord {
        SessionRecord::new(format!("s{}", id), groups, id)
    }

    fn group(title: &str, color: GroupColor, urls: Vec<UrlEntry>) -> GroupRecord {
        GroupRecord::new(title, color, false).with_urls(urls)
    }

    #[test]
    fn test_needs_two_sessions() {
        assert!(matches!(
            merge_sessions(&[session(1, vec![])]),
            Err(SessionError::NotEnoughSessions(1))
        ));
        assert!(matches!(
            merge_sessions(&[]),
            Err(SessionError::NotEnoughSessions(0))
        ));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let first = session(
            1,
            vec![group(
                "Work",
                GroupColor::Blue,
                vec![UrlEntry::tracked("https://shared.com", true), UrlEntry::bare("https://a.com")],
            )],
        );
        let second = session(
            2,
            vec![group(
                "Research",
                GroupColor::Red,
                vec![UrlEntry::tracked("https://shared.com", false), UrlEntry::bare("https://b.com")],
            )],
        );

        let merged = merge_sessions(&[first, second]).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!(
            merged[0].urls,
            vec![UrlEntry::tracked("https://shared.com", true), UrlEntry::bare("https://a.com")]
        );
        assert_eq!(merged[1].title, "Research");
        assert_eq!(merged[1].color, Some(GroupColor::Red));
        assert_eq!(merged[1].urls, vec![UrlEntry::bare("https://b.com")]);
    }

    #[test]
    fn test_dedup_is_global_across_groups() {
        // The same link under two categories of one session still merges to one
        let first = session(
            1,
            vec![
                group("Reading", GroupColor::Green, vec![UrlEntry::bare("https://x.com")]),
                group("Reference", GroupColor::Cyan, vec![UrlEntry::bare("https://x.com")]),
            ],
        );
        let second = session(2, vec![group("Other", GroupColor::Grey, vec![UrlEntry::bare("https://y.com")])]);

        let merged = merge_sessions(&[first, second]).unwrap();
        let titles: Vec<&str> = merged.iter().map(|g| g.title.as_str()).collect();
        // "Reference" became empty and was dropped
        assert_eq!(titles, vec!["Reading", "Other"]);
    }

    #[test]
    fn test_pinned_representation_does_not_affect_key() {
        let first = session(1, vec![group("A", GroupColor::Blue, vec![UrlEntry::bare("https://x.com")])]);
        let second = session(2, vec![group("B", GroupColor::Blue, vec![UrlEntry::tracked("https://x.com", true)])]);

        let merged = merge_sessions(&[first, second]).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].urls, vec![UrlEntry::bare("https://x.com")]);
    }

    proptest! {
        #[test]
        fn merged_count_is_total_minus_duplicates(
            sessions in proptest::collection::vec(
                proptest::collection::vec(proptest::collection::vec(0u8..12, 0..5), 0..4),
                2..5,
            )
        ) {
            let records: Vec<SessionRecord> = sessions
                .iter()
                .enumerate()
                .map(|(i, groups)| {
                    let groups = groups
                        .iter()
                        .map(|urls| group(
                            "g",
                            GroupColor::Grey,
                            urls.iter().map(|n| UrlEntry::bare(format!("https://{}.com", n))).collect(),
                        ))
                        .collect();
                    session(i as i64, groups)
                })
                .collect();

            let total: usize = records.iter().map(|s| s.tab_count).sum();
            let distinct: HashSet<String> = records
                .iter()
                .flat_map(|s| s.data.iter().flat_map(|g| g.urls.iter().map(|u| u.url.clone())))
                .collect();
            let duplicates = total - distinct.len();

            let merged = merge_sessions(&records).unwrap();
            let merged_total: usize = merged.iter().map(GroupRecord::tab_count).sum();
            prop_assert_eq!(merged_total, total - duplicates);
            prop_assert!(merged.iter().all(|g| !g.urls.is_empty()));
        }
    }
}
