// PathBridge - core/export.rs
//
// CSV and JSON export of conversion history.
// Core layer: writes to any Write trait object.

use crate::core::model::HistoryRecord;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Export records in the requested format. Returns the number written.
pub fn export_records<W: Write>(
    records: &[HistoryRecord],
    format: ExportFormat,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    match format {
        ExportFormat::Csv => export_csv(records, writer, export_path),
        ExportFormat::Json => export_json(records, writer, export_path),
    }
}

/// Export records to CSV format.
///
/// Writes: created_date, source_os, target_os, original_username,
/// target_username, original_path, converted_path
pub fn export_csv<W: Write>(
    records: &[HistoryRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    csv_writer
        .write_record([
            "created_date",
            "source_os",
            "target_os",
            "original_username",
            "target_username",
            "original_path",
            "converted_path",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.created_date.to_rfc3339().as_str(),
                record.source_os.as_str(),
                record.target_os.as_str(),
                record.original_username.as_deref().unwrap_or(""),
                record.target_username.as_str(),
                record.original_path.as_str(),
                record.converted_path.as_str(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records to JSON format (array of objects).
pub fn export_json<W: Write>(
    records: &[HistoryRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::OsKind;
    use chrono::{TimeZone, Utc};
    use std::path::PathBuf;

    fn make_record(original: &str, converted: &str) -> HistoryRecord {
        HistoryRecord {
            original_path: original.to_string(),
            converted_path: converted.to_string(),
            source_os: OsKind::Windows,
            target_os: OsKind::MacOs,
            original_username: None,
            target_username: "jane".to_string(),
            created_date: Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_csv_export() {
        let records = vec![
            make_record(r"C:\Users\john\a", "/Users/jane/a"),
            make_record(r"D:\data, 2024", "/Volumes/D/data, 2024"),
        ];
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, &PathBuf::from("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("created_date,source_os,target_os"));
        assert!(output.contains("windows,macos,,jane"));
        // Commas inside paths are quoted, not split.
        assert!(output.contains("\"/Volumes/D/data, 2024\""));
    }

    #[test]
    fn test_json_export() {
        let records = vec![make_record(r"C:\Users\john\a", "/Users/jane/a")];
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, &PathBuf::from("out.json")).unwrap();
        assert_eq!(count, 1);

        let parsed: Vec<HistoryRecord> = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ExportFormat::from_path(Path::new("h.JSON")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("h.csv")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("h")), ExportFormat::Csv);
    }
}
