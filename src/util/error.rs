// PathBridge - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// The pure conversion core never fails; these errors belong to the
// storage and export layers around it. config.toml problems are
// reported as warnings, not errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PathBridge operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum PathBridgeError {
    /// Conversion history storage failed.
    Store(StoreError),

    /// Preferences could not be written.
    Prefs(PrefsError),

    /// History export failed.
    Export(ExportError),
}

impl fmt::Display for PathBridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "History error: {e}"),
            Self::Prefs(e) => write!(f, "Preferences error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for PathBridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Prefs(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised by a `HistoryStore` backend.
#[derive(Debug)]
pub enum StoreError {
    /// I/O error reading or writing the history file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// History could not be serialised.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => {
                write!(f, "Cannot serialise history '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<StoreError> for PathBridgeError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Preferences errors
// ---------------------------------------------------------------------------

/// Errors related to saving user preferences.
#[derive(Debug)]
pub enum PrefsError {
    /// I/O error writing the preferences file.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// Preferences could not be serialised.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
            Self::Json { path, source } => write!(
                f,
                "Cannot serialise preferences '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for PrefsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<PrefsError> for PathBridgeError {
    fn from(e: PrefsError) -> Self {
        Self::Prefs(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to history export.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for PathBridgeError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

/// Convenience type alias for PathBridge results.
pub type Result<T> = std::result::Result<T, PathBridgeError>;
