// PathBridge - core/history.rs
//
// Query engine for conversion history records.
// All active criteria are AND-combined.
// Core layer: pure logic, no I/O.

use crate::core::model::{HistoryRecord, OsKind};

/// History listing criteria. The default matches everything, newest first,
/// with no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Case-insensitive substring over both paths and both usernames.
    /// Empty = no text filter.
    pub search: String,

    /// Keep records whose source or target is this OS. None = all systems.
    pub os: Option<OsKind>,

    /// Maximum number of records returned. None = unlimited.
    pub limit: Option<usize>,
}

impl HistoryQuery {
    /// Returns true if no criteria are active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.os.is_none() && self.limit.is_none()
    }

    /// Newest `limit` records, unfiltered.
    pub fn recent(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Default::default()
        }
    }
}

/// Check if a single record matches the text and OS criteria.
pub fn matches(record: &HistoryRecord, query: &HistoryQuery) -> bool {
    if let Some(os) = query.os {
        if record.source_os != os && record.target_os != os {
            return false;
        }
    }

    if !query.search.is_empty() {
        let needle = query.search.to_lowercase();
        let hit = |field: &str| field.to_lowercase().contains(&needle);
        let found = hit(&record.original_path)
            || hit(&record.converted_path)
            || record.original_username.as_deref().is_some_and(hit)
            || hit(&record.target_username);
        if !found {
            return false;
        }
    }

    true
}

/// Apply a query to a set of records, returning matching clones ordered
/// newest first and truncated to the query limit.
pub fn apply_query(records: &[HistoryRecord], query: &HistoryQuery) -> Vec<HistoryRecord> {
    // Reversed before the stable sort so equal timestamps list the most
    // recently added record first.
    let mut hits: Vec<&HistoryRecord> = records
        .iter()
        .rev()
        .filter(|r| matches(r, query))
        .collect();
    hits.sort_by(|a, b| b.created_date.cmp(&a.created_date));

    let limit = query.limit.unwrap_or(hits.len());
    hits.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn record(minutes: i64, original: &str, source: OsKind, target: OsKind) -> HistoryRecord {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        HistoryRecord {
            original_path: original.to_string(),
            converted_path: format!("converted:{original}"),
            source_os: source,
            target_os: target,
            original_username: Some("john".to_string()),
            target_username: "jane".to_string(),
            created_date: base + Duration::minutes(minutes),
        }
    }

    fn sample() -> Vec<HistoryRecord> {
        vec![
            record(0, r"C:\Users\john\a.txt", OsKind::Windows, OsKind::MacOs),
            record(10, "/Users/john/b.txt", OsKind::MacOs, OsKind::MacOs),
            record(5, r"D:\Reports\c.xlsx", OsKind::Windows, OsKind::Windows),
        ]
    }

    #[test]
    fn test_empty_query_returns_all_newest_first() {
        let out = apply_query(&sample(), &HistoryQuery::default());
        let order: Vec<_> = out.iter().map(|r| r.original_path.as_str()).collect();
        assert_eq!(
            order,
            vec!["/Users/john/b.txt", r"D:\Reports\c.xlsx", r"C:\Users\john\a.txt"]
        );
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let query = HistoryQuery {
            search: "REPORTS".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_query(&sample(), &query).len(), 1);

        // Matches the target username on every record.
        let query = HistoryQuery {
            search: "Jane".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_query(&sample(), &query).len(), 3);
    }

    #[test]
    fn test_search_without_original_username() {
        let mut rec = record(0, "/tmp/x", OsKind::MacOs, OsKind::Windows);
        rec.original_username = None;
        let query = HistoryQuery {
            search: "john".to_string(),
            ..Default::default()
        };
        assert!(!matches(&rec, &query));
    }

    #[test]
    fn test_os_filter_matches_source_or_target() {
        let query = HistoryQuery {
            os: Some(OsKind::MacOs),
            ..Default::default()
        };
        let out = apply_query(&sample(), &query);
        assert_eq!(out.len(), 2);
        assert!(out
            .iter()
            .all(|r| r.source_os == OsKind::MacOs || r.target_os == OsKind::MacOs));
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let out = apply_query(&sample(), &HistoryQuery::recent(1));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].original_path, "/Users/john/b.txt");
    }

    #[test]
    fn test_equal_timestamps_list_latest_insert_first() {
        let first = record(0, "first", OsKind::Windows, OsKind::MacOs);
        let second = record(0, "second", OsKind::Windows, OsKind::MacOs);
        let out = apply_query(&[first, second], &HistoryQuery::default());
        assert_eq!(out[0].original_path, "second");
    }

    #[test]
    fn test_is_empty() {
        assert!(HistoryQuery::default().is_empty());
        assert!(!HistoryQuery::recent(5).is_empty());
    }
}
