// Task discovery from package.json
pub mod manifest;

// Preference file persistence
pub mod preferences;

// Declaration/preference reconciliation
pub mod reconcile;

// Project-level operations over the three above
pub mod project;

// Package manager detection
pub mod package_manager;

// Task launching
pub mod runtime;
pub mod terminal;

// Settings, logging, errors
pub mod config;
pub mod error;
pub mod logging;

// Hosts: command line and interactive bar
pub mod app;
pub mod cli;
pub mod console;
pub mod ui;
