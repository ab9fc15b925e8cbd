// PathBridge - app/persist.rs
//
// Shared JSON file helpers for history and preferences.
//
// - Writes are atomic (write→temp, rename→final) so a crash during save
//   never corrupts the previous good file.
// - Reads return None on any problem; callers treat that as "start fresh".

use serde::de::DeserializeOwned;
use std::io;
use std::path::{Path, PathBuf};

/// Sibling temp file used while writing `path`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `bytes` to `path` atomically, creating parent directories.
///
/// On failure returns the operation that failed alongside the I/O error.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), (&'static str, io::Error)> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ("create directory", e))?;
        }
    }

    let tmp = temp_path(path);
    std::fs::write(&tmp, bytes).map_err(|e| ("write temp file", e))?;

    std::fs::rename(&tmp, path).map_err(|e| {
        // Clean up the temp file on failure; ignore any secondary error.
        let _ = std::fs::remove_file(&tmp);
        ("rename", e)
    })
}

/// Read and parse a JSON document from `path`.
///
/// A missing file is silent (normal first run); unreadable or malformed
/// files are logged and yield None.
pub fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Option<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %e, file = what, "Cannot read file");
            }
        })
        .ok()?;

    serde_json::from_str(&content)
        .map_err(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                file = what,
                "File is malformed — starting fresh"
            );
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("data.json");
        write_atomic(&path, b"[1,2,3]").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[1,2,3]");
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_leftover_temp_file_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(temp_path(&path), b"garbage").unwrap();

        write_atomic(&path, b"{}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_read_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        assert!(read_json::<Vec<u32>>(&path, "test").is_none());

        std::fs::write(&path, b"not json {{").unwrap();
        assert!(read_json::<Vec<u32>>(&path, "test").is_none());

        std::fs::write(&path, b"[4,5]").unwrap();
        assert_eq!(read_json::<Vec<u32>>(&path, "test"), Some(vec![4, 5]));
    }
}
