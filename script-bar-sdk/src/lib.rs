//! Shared types for script-bar
//!
//! The data model flowing from the manifest reader through the reconciler to the
//! launcher, plus the capabilities the launcher needs injected (`Notifier`) and
//! the seam hosts call through (`TaskLauncher`).

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;

// Re-export async trait for convenience
pub use async_trait::async_trait;

/// How a task is launched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Detached child process, reported through the notifier on exit
    #[default]
    Background,
    /// Interactive terminal the user watches directly
    Terminal,
}

impl RunMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunMode::Background => "background",
            RunMode::Terminal => "terminal",
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "background" => Ok(RunMode::Background),
            "terminal" => Ok(RunMode::Terminal),
            other => Err(format!(
                "unknown run mode '{}' (expected 'background' or 'terminal')",
                other
            )),
        }
    }
}

/// A raw name/command pair read from the project manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDeclaration {
    pub name: String,
    pub command: String,
}

impl TaskDeclaration {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
        }
    }
}

/// Persisted per-task customization. Every field is optional; absent fields
/// resolve to defaults during reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPreference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_mode: Option<RunMode>,
}

/// Preference file contents: `{ "tasks": { <name>: TaskPreference } }`
///
/// Top-level keys other than `tasks` are kept in `extra` so a rewrite does not
/// drop what a user added by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceStore {
    #[serde(default, deserialize_with = "deserialize_tasks")]
    pub tasks: IndexMap<String, TaskPreference>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PreferenceStore {
    pub fn get(&self, name: &str) -> Option<&TaskPreference> {
        self.tasks.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Keeps every entry that is an object. Fields are read one at a time, so a
/// wrong-typed field reads as unset without taking the others with it. A
/// `tasks` value that is not an object yields an empty map.
fn deserialize_tasks<'de, D>(deserializer: D) -> Result<IndexMap<String, TaskPreference>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Object(entries) = raw else {
        return Ok(IndexMap::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Object(fields) => Some((name, TaskPreference::from_fields(&fields))),
            _ => None,
        })
        .collect())
}

impl TaskPreference {
    /// Pick the known fields out of a stored object, ignoring any of the
    /// wrong type
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            enabled: fields.get("enabled").and_then(Value::as_bool),
            nickname: text("nickname"),
            color: text("color"),
            run_mode: fields
                .get("runMode")
                .and_then(|v| RunMode::deserialize(v).ok()),
        }
    }
}

/// Display-ready merge of a declaration and its resolved preference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskItem {
    pub name: String,
    pub command: String,
    pub enabled: bool,
    pub nickname: String,
    pub color: String,
    pub run_mode: RunMode,
}

/// Coarse project state derived from manifest presence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    NoRoot,
    NoManifest,
    NoDeclarations,
    Ready,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::NoRoot => "no-root",
            ProjectStatus::NoManifest => "no-manifest",
            ProjectStatus::NoDeclarations => "no-declarations",
            ProjectStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Task completed successfully
    Info,
    /// Abnormal exit or signal
    Warning,
    /// Task could not be started
    Error,
}

/// Side-channel for launch outcomes
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NotificationLevel, task: &str, message: &str);

    fn info(&self, task: &str, message: &str) {
        self.notify(NotificationLevel::Info, task, message);
    }

    fn warn(&self, task: &str, message: &str) {
        self.notify(NotificationLevel::Warning, task, message);
    }

    fn error(&self, task: &str, message: &str) {
        self.notify(NotificationLevel::Error, task, message);
    }
}

/// Launches a named task. Implementations never fail to the caller; every
/// outcome goes through their notifier.
#[async_trait]
pub trait TaskLauncher: Send + Sync {
    async fn launch(&self, name: &str, mode: RunMode, cwd: &Path);
}
