// PathBridge - app/service.rs
//
// Conversion workflow: validate, resolve the OS pair, convert, and log
// successful conversions to the injected history store.
//
// Explicit arguments always win over preferences. An OS auto-detected
// from the path replaces the *default* source OS only; if that flips the
// source onto the default target, the target flips to the other side.

use crate::app::store::HistoryStore;
use crate::core::converter;
use crate::core::history::HistoryQuery;
use crate::core::model::{ConversionRequest, ConversionResult, HistoryRecord, OsKind, Preferences};
use crate::util::constants::MSG_UNCHANGED;
use crate::util::error::StoreError;
use chrono::Utc;
use std::fmt;

/// Why a conversion was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The input failed validation; carries the user-facing message.
    Invalid(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Everything the caller needs to display a finished conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    /// The request actually executed, after defaults and detection.
    pub request: ConversionRequest,
    pub result: ConversionResult,
    /// OS inferred from the input path, if any.
    pub detected_os: Option<OsKind>,
    /// True when the output differs from the input.
    pub changed: bool,
    /// True when a history record was written.
    pub recorded: bool,
}

impl ConversionReport {
    /// Status line for the user.
    pub fn message(&self) -> &'static str {
        if self.changed {
            "Path converted successfully!"
        } else {
            MSG_UNCHANGED
        }
    }
}

/// Decide the (source, target) pair for `path`.
///
/// `declared_*` are explicit caller choices; `prefs` fills the gaps.
pub fn resolve_os_pair(
    path: &str,
    declared_source: Option<OsKind>,
    declared_target: Option<OsKind>,
    prefs: &Preferences,
) -> (OsKind, OsKind) {
    let mut target = declared_target.unwrap_or(prefs.default_target_os);

    let source = match declared_source {
        Some(source) => source,
        None => {
            let default = prefs.default_source_os;
            match converter::detect_os(path) {
                Some(detected) if detected != default => {
                    if declared_target.is_none() && target == detected {
                        target = detected.opposite();
                    }
                    detected
                }
                _ => default,
            }
        }
    };

    (source, target)
}

/// Runs conversions against a preference set and a history store.
pub struct ConversionService<S: HistoryStore> {
    prefs: Preferences,
    store: S,
    record_history: bool,
}

impl<S: HistoryStore> ConversionService<S> {
    pub fn new(prefs: Preferences, store: S) -> Self {
        Self {
            prefs,
            store,
            record_history: true,
        }
    }

    /// Enable or disable writing history records.
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Convert `input`.
    ///
    /// `target_username` overrides the preferred default username; an empty
    /// value means "no substitution".
    pub fn run(
        &mut self,
        input: &str,
        source: Option<OsKind>,
        target: Option<OsKind>,
        target_username: Option<&str>,
    ) -> Result<ConversionReport, ServiceError> {
        let validation = converter::validate_path(input);
        if !validation.is_valid {
            let msg = validation.error.unwrap_or_default();
            tracing::debug!(reason = %msg, "Conversion input rejected");
            return Err(ServiceError::Invalid(msg));
        }

        let detected_os = converter::detect_os(input);
        let (source_os, target_os) = resolve_os_pair(input, source, target, &self.prefs);

        let target_username = match target_username {
            Some(name) => Some(name.trim()).filter(|n| !n.is_empty()),
            None => self.prefs.username(),
        }
        .map(str::to_string);

        let request = ConversionRequest {
            original_path: input.to_string(),
            source_os: Some(source_os),
            target_os: Some(target_os),
            target_username,
        };
        let result = converter::convert(&request);
        let changed = !result.is_unchanged(input);

        tracing::info!(
            source = %source_os,
            target = %target_os,
            detected = ?detected_os,
            changed,
            "Conversion complete"
        );

        let recorded = changed && self.record_history && self.record(&request, &result);

        Ok(ConversionReport {
            request,
            result,
            detected_os,
            changed,
            recorded,
        })
    }

    /// Write a history record. Storage failures never fail the conversion.
    fn record(&mut self, request: &ConversionRequest, result: &ConversionResult) -> bool {
        let (Some(source_os), Some(target_os)) = (request.source_os, request.target_os) else {
            return false;
        };
        let record = HistoryRecord {
            original_path: request.original_path.clone(),
            converted_path: result.converted_path.clone(),
            source_os,
            target_os,
            original_username: result.extracted_username.clone(),
            target_username: request.target_username.clone().unwrap_or_default(),
            created_date: Utc::now(),
        };
        match self.store.save(record) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save conversion to history");
                false
            }
        }
    }

    /// List history through the store.
    pub fn history(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>, StoreError> {
        self.store.list(query)
    }
}

// =============================================================================
// Unit tests
// =============================================================================
