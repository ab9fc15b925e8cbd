// PathBridge - app/store.rs
//
// Conversion history storage behind an injected interface, so the
// conversion workflow can be exercised without touching disk.
//
// `JsonHistoryStore` keeps the whole history in memory and rewrites the
// file on every change. The file is capped at `max_entries`; the oldest
// records are dropped first.

use crate::app::persist;
use crate::core::export::{export_records, ExportFormat};
use crate::core::history::{apply_query, HistoryQuery};
use crate::core::model::HistoryRecord;
use crate::util::error::{ExportError, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version stamp for the history file. Mismatches start a fresh history.
pub const HISTORY_VERSION: u32 = 1;

/// Storage capability for conversion history.
pub trait HistoryStore {
    /// Append a record.
    fn save(&mut self, record: HistoryRecord) -> Result<(), StoreError>;

    /// Records matching `query`, newest first.
    fn list(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>, StoreError>;

    /// Remove every record, returning how many were removed.
    fn clear(&mut self) -> Result<usize, StoreError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Vec-backed store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: Vec<HistoryRecord>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn save(&mut self, record: HistoryRecord) -> Result<(), StoreError> {
        self.records.push(record);
        Ok(())
    }

    fn list(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(apply_query(&self.records, query))
    }

    fn clear(&mut self) -> Result<usize, StoreError> {
        let removed = self.records.len();
        self.records.clear();
        Ok(removed)
    }
}

// =============================================================================
// JSON file store
// =============================================================================

/// On-disk shape of the history file.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    version: u32,
    #[serde(default)]
    records: Vec<HistoryRecord>,
}

/// History persisted as a JSON file in the platform data directory.
#[derive(Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
    max_entries: usize,
    records: Vec<HistoryRecord>,
}

impl JsonHistoryStore {
    /// Open the history at `path`. Missing, malformed or version-mismatched
    /// files yield an empty history; nothing is written until the first change.
    pub fn open(path: &Path, max_entries: usize) -> Self {
        let mut records = match persist::read_json::<HistoryFile>(path, "history") {
            Some(file) if file.version == HISTORY_VERSION => {
                tracing::debug!(
                    path = %path.display(),
                    count = file.records.len(),
                    "History loaded"
                );
                file.records
            }
            Some(file) => {
                tracing::warn!(
                    found = file.version,
                    expected = HISTORY_VERSION,
                    "History file version mismatch — starting fresh"
                );
                Vec::new()
            }
            None => Vec::new(),
        };

        let max_entries = max_entries.max(1);
        enforce_cap(&mut records, max_entries);
        Self {
            path: path.to_path_buf(),
            max_entries,
            records,
        }
    }

    /// Write `records` to disk. The in-memory history is only replaced by
    /// callers once this succeeds, so memory never runs ahead of the file.
    fn persist(&self, records: &[HistoryRecord]) -> Result<(), StoreError> {
        let file = HistoryFile {
            version: HISTORY_VERSION,
            records: records.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| StoreError::Json {
            path: self.path.clone(),
            source: e,
        })?;
        persist::write_atomic(&self.path, json.as_bytes()).map_err(|(operation, source)| {
            StoreError::Io {
                path: self.path.clone(),
                operation,
                source,
            }
        })?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "History saved");
        Ok(())
    }
}

/// Drop the oldest records beyond `max_entries`.
fn enforce_cap(records: &mut Vec<HistoryRecord>, max_entries: usize) {
    if records.len() > max_entries {
        records.sort_by(|a, b| a.created_date.cmp(&b.created_date));
        let excess = records.len() - max_entries;
        records.drain(..excess);
        tracing::debug!(dropped = excess, "History trimmed to cap");
    }
}

impl HistoryStore for JsonHistoryStore {
    fn save(&mut self, record: HistoryRecord) -> Result<(), StoreError> {
        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.extend_from_slice(&self.records);
        next.push(record);
        enforce_cap(&mut next, self.max_entries);

        self.persist(&next)?;
        self.records = next;
        Ok(())
    }

    fn list(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>, StoreError> {
        Ok(apply_query(&self.records, query))
    }

    fn clear(&mut self) -> Result<usize, StoreError> {
        self.persist(&[])?;
        let removed = self.records.len();
        self.records.clear();
        Ok(removed)
    }
}

// =============================================================================
// Export
// =============================================================================

/// Write the whole history of `store` to `file`, newest first.
/// Returns the number of records written.
pub fn export_history<S: HistoryStore + ?Sized>(
    store: &S,
    file: &Path,
    format: ExportFormat,
) -> crate::util::error::Result<usize> {
    let records = store.list(&HistoryQuery::default())?;
    let handle = std::fs::File::create(file).map_err(|e| ExportError::Io {
        path: file.to_path_buf(),
        source: e,
    })?;
    let count = export_records(&records, format, std::io::BufWriter::new(handle), file)?;
    tracing::info!(count, path = %file.display(), "History exported");
    Ok(count)
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::OsKind;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn record(n: i64) -> HistoryRecord {
        HistoryRecord {
            original_path: format!(r"C:\Users\john\file{n}.txt"),
            converted_path: format!("/Users/jane/file{n}.txt"),
            source_os: OsKind::Windows,
            target_os: OsKind::MacOs,
            original_username: Some("john".to_string()),
            target_username: "jane".to_string(),
            created_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
                + Duration::seconds(n),
        }
    }

    #[test]
    fn test_memory_store_save_list_clear() {
        let mut store = MemoryHistoryStore::new();
        store.save(record(1)).unwrap();
        store.save(record(2)).unwrap();
        assert_eq!(store.len(), 2);

        let listed = store.list(&HistoryQuery::default()).unwrap();
        assert_eq!(listed[0], record(2));

        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path, 100);
        store.save(record(1)).unwrap();
        store.save(record(2)).unwrap();

        let reopened = JsonHistoryStore::open(&path, 100);
        let listed = reopened.list(&HistoryQuery::default()).unwrap();
        assert_eq!(listed, vec![record(2), record(1)]);
    }

    #[test]
    fn test_json_store_missing_file_is_empty_and_not_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let store = JsonHistoryStore::open(&path, 100);
        assert!(store.list(&HistoryQuery::default()).unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_json_store_caps_oldest_first() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path, 3);
        for n in 0..5 {
            store.save(record(n)).unwrap();
        }

        let listed = JsonHistoryStore::open(&path, 3)
            .list(&HistoryQuery::default())
            .unwrap();
        assert_eq!(listed, vec![record(4), record(3), record(2)]);
    }

    #[test]
    fn test_json_store_malformed_file_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();

        let mut store = JsonHistoryStore::open(&path, 10);
        assert!(store.list(&HistoryQuery::default()).unwrap().is_empty());

        // The next save replaces the corrupt file.
        store.save(record(1)).unwrap();
        let reopened = JsonHistoryStore::open(&path, 10);
        assert_eq!(reopened.list(&HistoryQuery::default()).unwrap().len(), 1);
    }

    #[test]
    fn test_json_store_wrong_version_starts_fresh() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        let body = serde_json::json!({ "version": 99, "records": [record(1)] });
        std::fs::write(&path, body.to_string()).unwrap();

        let store = JsonHistoryStore::open(&path, 10);
        assert!(store.list(&HistoryQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_json_store_clear_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path, 10);
        store.save(record(1)).unwrap();
        assert_eq!(store.clear().unwrap(), 1);

        let reopened = JsonHistoryStore::open(&path, 10);
        assert!(reopened.list(&HistoryQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_export_history_to_json_file() {
        let dir = TempDir::new().unwrap();
        let mut store = MemoryHistoryStore::new();
        store.save(record(1)).unwrap();
        store.save(record(2)).unwrap();

        let out = dir.path().join("history-export.json");
        let count = export_history(&store, &out, ExportFormat::Json).unwrap();
        assert_eq!(count, 2);

        let parsed: Vec<HistoryRecord> =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(parsed, vec![record(2), record(1)]);
    }

    #[test]
    fn test_export_history_bad_target_is_export_error() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("missing-dir").join("h.csv");
        let err = export_history(&MemoryHistoryStore::new(), &out, ExportFormat::Csv).unwrap_err();
        assert!(
            matches!(err, crate::util::error::PathBridgeError::Export(ExportError::Io { .. })),
            "got {err:?}"
        );
    }

    #[test]
    fn test_json_store_unwritable_path_reports_io_error() {
        let dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();
        let path = blocker.join("history.json");

        let mut store = JsonHistoryStore::open(&path, 10);
        let err = store.save(record(1)).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "got {err:?}");

        // The record never reached disk, so it must not be listed either.
        assert!(store.list(&HistoryQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_json_store_failed_clear_keeps_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");

        let mut store = JsonHistoryStore::open(&path, 10);
        store.save(record(1)).unwrap();

        // Replace the history file with a non-empty directory so the
        // rename onto it fails.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();

        let err = store.clear().unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }), "got {err:?}");
        assert_eq!(
            store.list(&HistoryQuery::default()).unwrap(),
            vec![record(1)]
        );
    }
}
