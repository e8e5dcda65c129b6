//! Package manager detection from lockfiles

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Package manager used to run a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

/// Lockfile markers in priority order; the first one present wins
pub const LOCKFILES: [(&str, PackageManager); 4] = [
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
];

impl PackageManager {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Yarn => "yarn",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments after the program name: `run <task>`
    pub fn run_args(&self, task: &str) -> Vec<String> {
        vec!["run".to_string(), task.to_string()]
    }

    /// Full invocation as typed into a terminal
    pub fn run_command_line(&self, task: &str) -> String {
        format!("{} run {}", self.as_str(), task)
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the package manager for `cwd`. Re-evaluated on every call.
pub async fn detect_package_manager(cwd: &Path) -> PackageManager {
    for (file, manager) in LOCKFILES {
        if tokio::fs::try_exists(cwd.join(file)).await.unwrap_or(false) {
            debug!("Found {} in {}, using {}", file, cwd.display(), manager);
            return manager;
        }
    }
    PackageManager::Npm
}
