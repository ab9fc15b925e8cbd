// PathBridge - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies. These types are the shared vocabulary across
// all layers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// OS convention
// =============================================================================

/// A path syntax convention: separator, root/drive notation and
/// home-directory location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsKind {
    Windows,
    MacOs,
}

impl OsKind {
    /// Every supported convention, in display order.
    pub fn all() -> &'static [OsKind] {
        &[OsKind::Windows, OsKind::MacOs]
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            OsKind::Windows => "Windows",
            OsKind::MacOs => "macOS",
        }
    }

    /// Stable lowercase identifier, as stored in preferences and history.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsKind::Windows => "windows",
            OsKind::MacOs => "macos",
        }
    }

    /// The other supported convention.
    pub fn opposite(&self) -> OsKind {
        match self {
            OsKind::Windows => OsKind::MacOs,
            OsKind::MacOs => OsKind::Windows,
        }
    }
}

impl fmt::Display for OsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names neither supported convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsParseError {
    pub input: String,
}

impl fmt::Display for OsParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown OS '{}'; expected one of:", self.input)?;
        for os in OsKind::all() {
            write!(f, " \"{os}\"")?;
        }
        Ok(())
    }
}

impl std::error::Error for OsParseError {}

impl FromStr for OsKind {
    type Err = OsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(OsKind::Windows),
            "macos" | "mac" | "osx" => Ok(OsKind::MacOs),
            _ => Err(OsParseError {
                input: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Conversion request / result
// =============================================================================

/// A single conversion as requested by a caller. Never persisted by the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionRequest {
    pub original_path: String,
    pub source_os: Option<OsKind>,
    pub target_os: Option<OsKind>,
    /// Username to substitute into the home directory. `None` or empty
    /// leaves the username untouched.
    pub target_username: Option<String>,
}

/// Output of a conversion, owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionResult {
    pub converted_path: String,
    /// Username found in the source path's home directory, if any.
    pub extracted_username: Option<String>,
}

impl ConversionResult {
    /// True when the conversion produced exactly its input.
    pub fn is_unchanged(&self, original: &str) -> bool {
        self.converted_path == original
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Outcome of `validate_path`. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl Validation {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

// =============================================================================
// Stored records
// =============================================================================

/// A user's saved conversion defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Username substituted when none is given explicitly. Empty = none.
    #[serde(default)]
    pub default_username: String,

    #[serde(default = "default_source_os")]
    pub default_source_os: OsKind,

    #[serde(default = "default_target_os")]
    pub default_target_os: OsKind,
}

fn default_source_os() -> OsKind {
    OsKind::Windows
}

fn default_target_os() -> OsKind {
    OsKind::MacOs
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_username: String::new(),
            default_source_os: default_source_os(),
            default_target_os: default_target_os(),
        }
    }
}

impl Preferences {
    /// The default username, or `None` when unset.
    pub fn username(&self) -> Option<&str> {
        let name = self.default_username.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// One entry in the conversion history log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub original_path: String,
    pub converted_path: String,
    pub source_os: OsKind,
    pub target_os: OsKind,
    #[serde(default)]
    pub original_username: Option<String>,
    #[serde(default)]
    pub target_username: String,
    pub created_date: DateTime<Utc>,
}
