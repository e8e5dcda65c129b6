//! Application state for the interactive bar
//!
//! The App owns a tokio runtime and drives the async project and launcher
//! APIs from the synchronous draw loop. Background monitors keep running on
//! the runtime's worker threads between frames.

use anyhow::{Context, Result};
use script_bar_sdk::{ProjectStatus, RunMode, TaskItem, TaskLauncher};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::config::{Settings, TerminalKind};
use crate::project::Project;
use crate::runtime::ProcessLauncher;
use crate::terminal::SystemTerminal;

mod navigation;
pub mod notifications;

pub use notifications::{Notification, NotificationManager, SharedNotifications};

pub struct App {
    pub project: Project,
    pub notifications: SharedNotifications,
    pub status: ProjectStatus,
    pub items: Vec<TaskItem>,
    pub selected: usize,
    /// Include disabled tasks
    pub show_all: bool,
    pub should_quit: bool,
    launcher: ProcessLauncher,
    refresh_interval: Duration,
    last_refresh: Option<Instant>,
    tokio_runtime: tokio::runtime::Runtime,
}

impl App {
    pub fn new(project: Project, settings: &Settings) -> Result<Self> {
        let tokio_runtime =
            tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let notifications = SharedNotifications::new();

        if settings.terminal == TerminalKind::Inline {
            info!("Inline terminal is not available inside the bar, using a new window");
        }
        let launcher = ProcessLauncher::new(
            Arc::new(notifications.clone()),
            Arc::new(SystemTerminal),
            settings.show_notifications,
        );

        let mut app = Self {
            project,
            notifications,
            status: ProjectStatus::NoRoot,
            items: Vec::new(),
            selected: 0,
            show_all: false,
            should_quit: false,
            launcher,
            refresh_interval: Duration::from_millis(settings.refresh_interval_ms.max(100)),
            last_refresh: None,
            tokio_runtime,
        };
        app.refresh();
        Ok(app)
    }

    /// Re-read manifest and preferences
    pub fn refresh(&mut self) {
        let project = &self.project;
        let show_all = self.show_all;
        let (status, items) = self.tokio_runtime.block_on(async {
            let status = project.status().await;
            let items = if show_all {
                project.all_items().await
            } else {
                project.effective_items().await
            };
            (status, items)
        });

        self.status = status;
        self.items = items;
        if self.selected >= self.items.len() {
            self.selected = self.items.len().saturating_sub(1);
        }
        self.last_refresh = Some(Instant::now());
    }

    /// Periodic housekeeping between frames
    pub fn tick(&mut self) {
        self.notifications.with(|n| n.cleanup_expired());

        let due = self
            .last_refresh
            .map_or(true, |at| at.elapsed() >= self.refresh_interval);
        if due {
            self.refresh();
        }
    }

    pub fn selected_item(&self) -> Option<&TaskItem> {
        self.items.get(self.selected)
    }

    /// Launch the selected task with its own run mode, or `mode` if given
    pub fn launch_selected(&mut self, mode: Option<RunMode>) {
        let Some(item) = self.selected_item().cloned() else {
            return;
        };
        let Some(root) = self.project.root().map(|r| r.to_path_buf()) else {
            self.notifications
                .with(|n| n.error(item.name.clone(), "No project root available."));
            return;
        };

        let mode = mode.unwrap_or(item.run_mode);
        self.tokio_runtime
            .block_on(self.launcher.launch(&item.name, mode, &root));
    }

    /// Sync the preference file with the manifest and reload
    pub fn rescan(&mut self) {
        let result = self.tokio_runtime.block_on(self.project.rescan());
        match result {
            Ok(_) => {
                self.notifications
                    .with(|n| n.info("Rescan", "Rescanned package.json."));
            }
            Err(e) => {
                error!("Rescan failed: {:#}", e);
                self.notifications
                    .with(|n| n.error("Rescan", format!("Rescan failed: {:#}", e)));
            }
        }
        self.refresh();
    }

    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
        self.refresh();
    }
}
