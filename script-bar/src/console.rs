//! Notifier for one-shot command-line use

use crossterm::style::{StyledContent, Stylize};
use script_bar_sdk::{NotificationLevel, Notifier};
use std::io::IsTerminal;
use tracing::{error, info, warn};

/// Prints notifications to stderr, colored like the TUI overlay when stderr
/// is a terminal
#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    color: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self {
            color: std::io::stderr().is_terminal(),
        }
    }

    /// Plain output regardless of where stderr goes
    pub fn plain() -> Self {
        Self { color: false }
    }

    /// The line printed for a notification
    pub fn format_line(&self, level: NotificationLevel, message: &str) -> String {
        let (icon, paint): (&str, fn(String) -> StyledContent<String>) = match level {
            NotificationLevel::Info => ("✓", <String as Stylize>::green),
            NotificationLevel::Warning => ("⚠", <String as Stylize>::yellow),
            NotificationLevel::Error => ("✗", <String as Stylize>::red),
        };
        let line = format!("{} {}", icon, message);
        if self.color {
            paint(line).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, level: NotificationLevel, task: &str, message: &str) {
        match level {
            NotificationLevel::Info => info!(task = %task, "{}", message),
            NotificationLevel::Warning => warn!(task = %task, "{}", message),
            NotificationLevel::Error => error!(task = %task, "{}", message),
        }
        eprintln!("{}", self.format_line(level, message));
    }
}
