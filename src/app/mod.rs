// PathBridge - app/mod.rs
//
// Application layer: conversion workflow, history storage, preferences.
// Dependencies: core, platform config, util.

pub mod persist;
pub mod prefs;
pub mod service;
pub mod store;
