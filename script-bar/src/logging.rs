//! Tracing setup
//!
//! The filter comes from `SCRIPT_BAR_LOG` (same syntax as `RUST_LOG`). The
//! TUI owns the screen, so in that mode logs go to a file in the data
//! directory instead of stderr.

use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "SCRIPT_BAR_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File,
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber. Returns the log file path in `File` mode.
/// If the file cannot be opened, logging is silently disabled.
pub fn init(target: LogTarget) -> Option<PathBuf> {
    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
            None
        }
        LogTarget::File => {
            let dir = crate::config::data_dir();
            std::fs::create_dir_all(&dir).ok()?;
            let path = dir.join("script-bar.log");
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .ok()?;

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .try_init();
            Some(path)
        }
    }
}
