// PathBridge - lib.rs
//
// Library entry point. The pure conversion core lives in `core`; the CLI
// in `main.rs` is one caller among many.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::converter::{
    convert, convert_path, detect_os, extract_username, is_onedrive_path, validate_path,
};
pub use crate::core::model::{ConversionRequest, ConversionResult, OsKind, Validation};
