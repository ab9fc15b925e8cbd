// PathBridge - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PathBridge";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PathBridge";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Path validation
// =============================================================================

/// Longest input path (in characters) accepted for conversion.
pub const MAX_PATH_LENGTH: usize = 1_000;

/// Validation message for an empty or whitespace-only path.
pub const ERR_PATH_EMPTY: &str = "Path cannot be empty";

/// Validation message for a path longer than `MAX_PATH_LENGTH`.
pub const ERR_PATH_TOO_LONG: &str = "Path is too long";

/// Message shown when a conversion leaves the input untouched.
pub const MSG_UNCHANGED: &str =
    "Path is already in the correct format or no changes were needed.";

// =============================================================================
// Path conventions
// =============================================================================

/// macOS home directory root, with both separators.
pub const MACOS_USERS_PREFIX: &str = "/Users/";

/// macOS mount root used to represent non-home Windows drives.
pub const MACOS_VOLUMES_PREFIX: &str = "/Volumes/";

/// Drive assumed for macOS paths that carry no drive information.
pub const DEFAULT_WINDOWS_DRIVE: &str = "C:";

/// Case-insensitive marker for OneDrive-synchronised locations.
pub const ONEDRIVE_MARKER: &str = "onedrive";

// =============================================================================
// History limits
// =============================================================================

/// Default number of history records shown by a listing.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Minimum user-configurable listing limit.
pub const MIN_HISTORY_LIMIT: usize = 1;

/// Maximum user-configurable listing limit.
pub const MAX_HISTORY_LIMIT: usize = 1_000;

/// Default number of history records retained on disk.
/// Oldest records are dropped first once the cap is reached.
pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 500;

/// Hard upper bound on retained history records.
pub const ABSOLUTE_MAX_HISTORY_ENTRIES: usize = 10_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. The CLI writes results to stdout, so diagnostics
/// stay quiet unless asked for.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log levels accepted from config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

// =============================================================================
// Configuration and persistence
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Conversion history file name (stored in the platform data directory).
pub const HISTORY_FILE_NAME: &str = "history.json";

/// Preferences file name (stored in the platform data directory).
pub const PREFS_FILE_NAME: &str = "prefs.json";
