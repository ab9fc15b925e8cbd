// PathBridge - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, regex, chrono, serde.
// Must NOT depend on: app, platform, or perform any I/O directly.

pub mod converter;
pub mod export;
pub mod history;
pub mod model;
