// PathBridge - core/converter.rs
//
// Path conversion between Windows and macOS conventions.
// Core layer: pure string transformations, no I/O. Every function is
// total; "no answer" is `None` and "nothing to do" returns the input.
//
// The structural rewrite is driven by the (source, target) pair rather
// than a parsed drive/segment model. Windows drives other than the home
// drive map to `/Volumes/<letter>/` on macOS and back; that mapping is a
// best-effort approximation, not a guaranteed round trip.

use crate::core::model::{ConversionRequest, ConversionResult, OsKind, Validation};
use crate::util::constants::{
    DEFAULT_WINDOWS_DRIVE, ERR_PATH_EMPTY, ERR_PATH_TOO_LONG, MACOS_USERS_PREFIX,
    MACOS_VOLUMES_PREFIX, MAX_PATH_LENGTH, ONEDRIVE_MARKER,
};
use regex::{NoExpand, Regex, RegexBuilder};
use std::sync::OnceLock;

/// `C:\Users\<name>` anywhere in the path, drive letter and `Users` matched
/// case-insensitively.
fn windows_home_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)[A-Za-z]:\\Users\\([^\\]+)").expect("static regex is valid")
    })
}

/// `/Users/<name>` anywhere in the path.
fn macos_home_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/Users/([^/]+)").expect("static regex is valid"))
}

/// Returns the drive letter when `path` starts with `<ASCII letter>:`.
fn drive_letter(path: &str) -> Option<char> {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        Some(bytes[0] as char)
    } else {
        None
    }
}

// =============================================================================
// Detection and extraction
// =============================================================================

/// Classify a path string by convention.
///
/// A backslash or a leading drive letter means Windows; this check runs
/// first, so a string that also looks like macOS is still Windows. A
/// leading `/` or any `/Users/` means macOS. Anything else is unknown.
pub fn detect_os(path: &str) -> Option<OsKind> {
    if path.contains('\\') || drive_letter(path).is_some() {
        return Some(OsKind::Windows);
    }
    if path.starts_with('/') || path.contains(MACOS_USERS_PREFIX) {
        return Some(OsKind::MacOs);
    }
    None
}

/// Extract the username from the home-directory segment of `path`.
///
/// Returns `None` for an empty path, an unspecified OS, or no match.
pub fn extract_username(path: &str, os: Option<OsKind>) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    let re = match os? {
        OsKind::Windows => windows_home_regex(),
        OsKind::MacOs => macos_home_regex(),
    };
    re.captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// =============================================================================
// Conversion
// =============================================================================

/// Rewrite `original_path` from `source_os` convention to `target_os`,
/// substituting the home-directory username when both names are given.
///
/// Returns `original_path` unchanged when the path is empty or either OS
/// is missing. Never fails.
pub fn convert_path(
    original_path: &str,
    source_os: Option<OsKind>,
    target_os: Option<OsKind>,
    original_username: Option<&str>,
    target_username: Option<&str>,
) -> String {
    let (source, target) = match (source_os, target_os) {
        (Some(s), Some(t)) if !original_path.is_empty() => (s, t),
        _ => return original_path.to_string(),
    };

    let mut path = original_path.to_string();

    if let (Some(from), Some(to)) = (original_username, target_username) {
        if !from.is_empty() && !to.is_empty() && from.to_lowercase() != to.to_lowercase() {
            path = substitute_username(&path, source, from, to);
        }
    }

    let converted = match (source, target) {
        (OsKind::Windows, OsKind::MacOs) => windows_to_macos(&path),
        (OsKind::MacOs, OsKind::Windows) => macos_to_windows(&path),
        (OsKind::Windows, OsKind::Windows) => path.replace('/', "\\"),
        (OsKind::MacOs, OsKind::MacOs) => path.replace('\\', "/"),
    };

    tracing::trace!(
        source = %source,
        target = %target,
        changed = converted != original_path,
        "Path converted"
    );
    converted
}

/// Replace `<sep>Users<sep><from>` with `<sep>Users<sep><to>` in the
/// source convention. Windows matches case-insensitively, macOS exactly.
fn substitute_username(path: &str, source: OsKind, from: &str, to: &str) -> String {
    match source {
        OsKind::Windows => {
            let pattern = format!(r"\\Users\\{}", regex::escape(from));
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => re
                    .replace_all(path, NoExpand(&format!(r"\Users\{to}")))
                    .into_owned(),
                Err(e) => {
                    // Only reachable if the escaped name blows the regex size limit.
                    tracing::debug!(error = %e, "Username pattern rejected; skipping substitution");
                    path.to_string()
                }
            }
        }
        OsKind::MacOs => path.replace(
            &format!("{MACOS_USERS_PREFIX}{from}"),
            &format!("{MACOS_USERS_PREFIX}{to}"),
        ),
    }
}

fn windows_to_macos(path: &str) -> String {
    let slashed = path.replace('\\', "/");
    match drive_letter(&slashed) {
        Some(letter) if slashed[2..].starts_with('/') => {
            let rest = &slashed[3..];
            if slashed.contains(MACOS_USERS_PREFIX) {
                format!("/{rest}")
            } else {
                format!("{MACOS_VOLUMES_PREFIX}{letter}/{rest}")
            }
        }
        _ => slashed,
    }
}

fn macos_to_windows(path: &str) -> String {
    if path.starts_with(MACOS_USERS_PREFIX) {
        return format!("{DEFAULT_WINDOWS_DRIVE}{}", path.replace('/', "\\"));
    }
    if let Some(rest) = path.strip_prefix(MACOS_VOLUMES_PREFIX) {
        let bytes = rest.as_bytes();
        if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b'/' {
            return format!("{}:\\{}", bytes[0] as char, rest[2..].replace('/', "\\"));
        }
    }
    format!("{DEFAULT_WINDOWS_DRIVE}{}", path.replace('/', "\\"))
}

/// Run a full conversion request: extract the username from the source
/// path, then convert with substitution.
pub fn convert(request: &ConversionRequest) -> ConversionResult {
    let extracted_username = extract_username(&request.original_path, request.source_os);
    let converted_path = convert_path(
        &request.original_path,
        request.source_os,
        request.target_os,
        extracted_username.as_deref(),
        request.target_username.as_deref(),
    );
    ConversionResult {
        converted_path,
        extracted_username,
    }
}

// =============================================================================
// Validation helpers
// =============================================================================

/// Check that a path is worth converting. No character-set restriction.
pub fn validate_path(path: &str) -> Validation {
    if path.trim().is_empty() {
        return Validation::invalid(ERR_PATH_EMPTY);
    }
    if path.chars().count() > MAX_PATH_LENGTH {
        return Validation::invalid(ERR_PATH_TOO_LONG);
    }
    Validation::ok()
}

/// True when the path mentions OneDrive in any letter case.
pub fn is_onedrive_path(path: &str) -> bool {
    path.to_lowercase().contains(ONEDRIVE_MARKER)
}

// =============================================================================
// Unit tests
// =============================================================================
