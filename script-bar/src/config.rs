//! User settings
//!
//! Stored as JSON in the platform config directory. Environment variables
//! (optionally from a `.env` file) override the file; command-line flags
//! override both.

use anyhow::Result;
use script_bar_sdk::RunMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub const ENV_DEFAULT_RUN_MODE: &str = "SCRIPT_BAR_DEFAULT_RUN_MODE";
pub const ENV_SHOW_NOTIFICATIONS: &str = "SCRIPT_BAR_SHOW_NOTIFICATIONS";

/// Where `terminal` mode launches end up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalKind {
    /// A new terminal emulator window
    #[default]
    System,
    /// The terminal script-bar itself runs in
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub default_run_mode: RunMode,
    pub show_notifications: bool,
    pub terminal: TerminalKind,
    pub refresh_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_run_mode: RunMode::Background,
            show_notifications: true,
            terminal: TerminalKind::System,
            refresh_interval_ms: 2000,
        }
    }
}

impl Settings {
    /// Settings file, env overrides applied
    pub fn load() -> Self {
        let mut settings = load_settings_file();
        settings.apply_env(|key| std::env::var(key).ok());
        settings
    }

    /// Override fields from environment lookups. Unparsable values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DEFAULT_RUN_MODE) {
            match value.parse() {
                Ok(mode) => self.default_run_mode = mode,
                Err(e) => warn!("Ignoring {}: {}", ENV_DEFAULT_RUN_MODE, e),
            }
        }
        if let Some(value) = lookup(ENV_SHOW_NOTIFICATIONS) {
            match parse_bool(&value) {
                Some(flag) => self.show_notifications = flag,
                None => warn!("Ignoring {}: expected a boolean, got '{}'", ENV_SHOW_NOTIFICATIONS, value),
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the path to the settings file
pub fn settings_file_path() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "script-bar", "script-bar") {
        proj_dirs.config_dir().join("settings.json")
    } else {
        PathBuf::from(".script-bar-settings.json")
    }
}

/// Directory for the TUI log file
pub fn data_dir() -> PathBuf {
    use directories::ProjectDirs;

    if let Some(proj_dirs) = ProjectDirs::from("com", "script-bar", "script-bar") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        PathBuf::from(".")
    }
}

/// Load settings from disk, falling back to defaults
pub fn load_settings_file() -> Settings {
    let path = settings_file_path();
    match std::fs::read_to_string(&path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Malformed settings file {}: {}, using defaults", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings to disk
pub fn save_settings(settings: &Settings) -> Result<()> {
    let path = settings_file_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Write default settings if no settings file exists, returning its path
pub fn ensure_settings_file() -> Result<PathBuf> {
    let path = settings_file_path();
    if !path.exists() {
        save_settings(&Settings::default())?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_fills_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_run_mode": "terminal"}"#).unwrap();
        assert_eq!(settings.default_run_mode, RunMode::Terminal);
        assert!(settings.show_notifications);
        assert_eq!(settings.terminal, TerminalKind::System);
        assert_eq!(settings.refresh_interval_ms, 2000);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DEFAULT_RUN_MODE, "terminal"),
            (ENV_SHOW_NOTIFICATIONS, "off"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(settings.default_run_mode, RunMode::Terminal);
        assert!(!settings.show_notifications);
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let mut settings = Settings::default();
        settings.apply_env(|key| match key {
            ENV_DEFAULT_RUN_MODE => Some("sideways".to_string()),
            ENV_SHOW_NOTIFICATIONS => Some("maybe".to_string()),
            _ => None,
        });
        assert_eq!(settings, Settings::default());
    }
}
