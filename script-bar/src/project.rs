//! Project-level task operations
//!
//! Ties a project root to the manifest reader, the preference file and the
//! reconciler. Every call re-reads its inputs from disk.

use anyhow::{Context, Result};
use script_bar_sdk::{ProjectStatus, RunMode, TaskItem};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::manifest::{project_status, read_declarations};
use crate::preferences::{ensure_store, load_store, preferences_path, save_store};
use crate::reconcile::{compute_all_items, compute_effective_items, rescan as rescan_store};

#[derive(Debug, Clone)]
pub struct Project {
    root: Option<PathBuf>,
    default_run_mode: RunMode,
}

impl Project {
    pub fn new(root: Option<PathBuf>, default_run_mode: RunMode) -> Self {
        Self {
            root,
            default_run_mode,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn default_run_mode(&self) -> RunMode {
        self.default_run_mode
    }

    /// The root, if it names an existing directory. Writes go through this
    /// so a mistyped root is never created.
    async fn existing_root(&self) -> Option<&Path> {
        let root = self.root()?;
        match tokio::fs::metadata(root).await {
            Ok(meta) if meta.is_dir() => Some(root),
            _ => None,
        }
    }

    pub async fn status(&self) -> ProjectStatus {
        project_status(self.root()).await
    }

    /// Enabled tasks, ready to display
    pub async fn effective_items(&self) -> Vec<TaskItem> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let declarations = read_declarations(root).await;
        let store = load_store(&preferences_path(root)).await;
        compute_effective_items(&declarations, &store, self.default_run_mode)
    }

    /// Every declared task, disabled ones included
    pub async fn all_items(&self) -> Vec<TaskItem> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        let declarations = read_declarations(root).await;
        let store = load_store(&preferences_path(root)).await;
        compute_all_items(&declarations, &store, self.default_run_mode)
    }

    /// Bring the preference file in line with the manifest and return the
    /// refreshed enabled tasks.
    ///
    /// The store is read, replaced and written back in full; an edit landing
    /// between the read and the write is overwritten.
    pub async fn rescan(&self) -> Result<Vec<TaskItem>> {
        let Some(root) = self.existing_root().await else {
            return Ok(Vec::new());
        };
        let path = preferences_path(root);

        let declarations = read_declarations(root).await;
        let previous = load_store(&path).await;
        let next = rescan_store(&declarations, &previous, self.default_run_mode);

        save_store(&path, &next)
            .await
            .with_context(|| format!("Failed to save preferences for {}", root.display()))?;
        info!(
            "Rescanned {}: {} tasks ({} before)",
            root.display(),
            next.tasks.len(),
            previous.tasks.len()
        );

        Ok(self.effective_items().await)
    }

    /// Make sure the preference file exists and return its path
    pub async fn ensure_preferences(&self) -> Result<PathBuf> {
        let root = self
            .existing_root()
            .await
            .context("No project root available")?;
        let path = preferences_path(root);
        ensure_store(&path).await?;
        Ok(path)
    }
}

/// Inline message shown instead of buttons, if any
pub fn empty_state_message(status: ProjectStatus, has_items: bool) -> Option<&'static str> {
    match status {
        ProjectStatus::NoRoot => Some("Open a folder to use Script Bar."),
        ProjectStatus::NoManifest => Some("No package.json found in project root."),
        ProjectStatus::NoDeclarations => Some("No scripts in package.json."),
        ProjectStatus::Ready if !has_items => Some("No scripts in package.json."),
        ProjectStatus::Ready => None,
    }
}
