// PathBridge - app/prefs.rs
//
// Preferences persistence: the default username and OS pair survive
// between runs. The loaded value is passed explicitly into the
// conversion service; there is no global session state.

use crate::app::persist;
use crate::core::model::Preferences;
use crate::platform::config::AppConfig;
use crate::util::error::PrefsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version stamp for the preferences file. Mismatches are discarded.
pub const PREFS_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct PrefsFile {
    version: u32,
    #[serde(flatten)]
    prefs: Preferences,
}

/// First-run preferences seeded from `config.toml`.
pub fn from_config(config: &AppConfig) -> Preferences {
    Preferences {
        default_username: config.default_username.clone().unwrap_or_default(),
        default_source_os: config.default_source_os,
        default_target_os: config.default_target_os,
    }
}

/// Load saved preferences. Returns None when missing, malformed or from
/// an incompatible version.
pub fn load(path: &Path) -> Option<Preferences> {
    let file: PrefsFile = persist::read_json(path, "preferences")?;
    if file.version != PREFS_VERSION {
        tracing::warn!(
            found = file.version,
            expected = PREFS_VERSION,
            "Preferences file version mismatch — using defaults"
        );
        return None;
    }
    tracing::debug!(path = %path.display(), "Preferences loaded");
    Some(file.prefs)
}

/// Saved preferences, or the config-seeded defaults when none are saved.
pub fn load_or_default(path: &Path, config: &AppConfig) -> Preferences {
    load(path).unwrap_or_else(|| from_config(config))
}

/// Save preferences atomically.
pub fn save(prefs: &Preferences, path: &Path) -> Result<(), PrefsError> {
    let file = PrefsFile {
        version: PREFS_VERSION,
        prefs: prefs.clone(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| PrefsError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    persist::write_atomic(path, json.as_bytes()).map_err(|(operation, source)| {
        PrefsError::Io {
            path: path.to_path_buf(),
            operation,
            source,
        }
    })?;
    tracing::info!(path = %path.display(), "Preferences saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::OsKind;
    use tempfile::TempDir;

    fn sample() -> Preferences {
        Preferences {
            default_username: "jane".to_string(),
            default_source_os: OsKind::MacOs,
            default_target_os: OsKind::Windows,
        }
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        save(&sample(), &path).unwrap();
        assert_eq!(load(&path), Some(sample()));

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"default_source_os\": \"macos\""), "{raw}");
    }

    #[test]
    fn test_missing_file_falls_back_to_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        let config = AppConfig {
            default_username: Some("amy".to_string()),
            ..Default::default()
        };
        let prefs = load_or_default(&path, &config);
        assert_eq!(prefs.default_username, "amy");
        assert_eq!(prefs.default_source_os, OsKind::Windows);
        assert_eq!(prefs.default_target_os, OsKind::MacOs);
    }

    #[test]
    fn test_saved_prefs_override_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        save(&sample(), &path).unwrap();
        let config = AppConfig {
            default_username: Some("amy".to_string()),
            ..Default::default()
        };
        assert_eq!(load_or_default(&path, &config), sample());
    }

    #[test]
    fn test_wrong_version_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(
            &path,
            r#"{"version": 7, "default_username": "x", "default_source_os": "windows", "default_target_os": "macos"}"#,
        )
        .unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_unknown_os_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "default_username": "x", "default_source_os": "linux"}"#,
        )
        .unwrap();
        assert!(load(&path).is_none());
    }
}
