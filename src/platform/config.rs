// PathBridge - platform/config.rs
//
// Platform-specific configuration, data directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::OsKind;
use crate::util::constants;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for PathBridge data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/pathbridge/ or %APPDATA%\PathBridge\config\)
    pub config_dir: PathBuf,

    /// Data directory holding history and preferences.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Replace the config directory (CLI `--config-dir`).
    pub fn with_config_dir(mut self, config_dir: PathBuf) -> Self {
        self.config_dir = config_dir;
        self
    }

    /// Replace the data directory (CLI `--data-dir`).
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join(constants::HISTORY_FILE_NAME)
    }

    pub fn prefs_file(&self) -> PathBuf {
        self.data_dir.join(constants::PREFS_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[defaults]` section.
    pub defaults: DefaultsSection,
    /// `[history]` section.
    pub history: HistorySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[defaults]` config section: seeds the first-run preferences.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DefaultsSection {
    /// Target username substituted into home directories.
    pub username: Option<String>,
    /// "windows" or "macos".
    pub source_os: Option<String>,
    /// "windows" or "macos".
    pub target_os: Option<String>,
}

/// `[history]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct HistorySection {
    /// Record successful conversions.
    pub enabled: Option<bool>,
    /// Records retained on disk.
    pub max_entries: Option<usize>,
    /// Records shown by `history list` when no limit is given.
    pub list_limit: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- Defaults --
    pub default_username: Option<String>,
    pub default_source_os: OsKind,
    pub default_target_os: OsKind,

    // -- History --
    pub history_enabled: bool,
    pub history_max_entries: usize,
    pub history_list_limit: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_username: None,
            default_source_os: OsKind::Windows,
            default_target_os: OsKind::MacOs,
            history_enabled: true,
            history_max_entries: constants::DEFAULT_HISTORY_MAX_ENTRIES,
            history_list_limit: constants::DEFAULT_HISTORY_LIMIT,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unparseable, returns defaults with a warning.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            ));
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);
    (config, warnings)
}

/// Validate each field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Defaults: username --
    if let Some(name) = raw.defaults.username {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            config.default_username = Some(trimmed.to_string());
        }
    }

    // -- Defaults: source_os / target_os --
    if let Some(ref os) = raw.defaults.source_os {
        match os.parse::<OsKind>() {
            Ok(kind) => config.default_source_os = kind,
            Err(e) => warnings.push(format!("[defaults] source_os: {e}. Using default (windows).")),
        }
    }
    if let Some(ref os) = raw.defaults.target_os {
        match os.parse::<OsKind>() {
            Ok(kind) => config.default_target_os = kind,
            Err(e) => warnings.push(format!("[defaults] target_os: {e}. Using default (macos).")),
        }
    }

    // -- History --
    if let Some(enabled) = raw.history.enabled {
        config.history_enabled = enabled;
    }

    if let Some(max) = raw.history.max_entries {
        if (1..=constants::ABSOLUTE_MAX_HISTORY_ENTRIES).contains(&max) {
            config.history_max_entries = max;
        } else {
            warnings.push(format!(
                "[history] max_entries = {max} is out of range (1-{}). Using default ({}).",
                constants::ABSOLUTE_MAX_HISTORY_ENTRIES,
                constants::DEFAULT_HISTORY_MAX_ENTRIES,
            ));
        }
    }

    if let Some(limit) = raw.history.list_limit {
        if (constants::MIN_HISTORY_LIMIT..=constants::MAX_HISTORY_LIMIT).contains(&limit) {
            config.history_list_limit = limit;
        } else {
            warnings.push(format!(
                "[history] list_limit = {limit} is out of range ({}-{}). Using default ({}).",
                constants::MIN_HISTORY_LIMIT,
                constants::MAX_HISTORY_LIMIT,
                constants::DEFAULT_HISTORY_LIMIT,
            ));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default ({}).",
                constants::DEFAULT_LOG_LEVEL,
            ));
        }
    }

    config
}
