//! Task launching
//!
//! `ProcessLauncher` turns a task name and run mode into a package manager
//! invocation. Background launches are fire-and-forget: the child is owned by
//! a monitor task that reports its exit through the notifier and is never
//! tracked, cancelled or timed out.

use script_bar_sdk::{async_trait, NotificationLevel, Notifier, RunMode, TaskLauncher};
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::package_manager::{detect_package_manager, PackageManager};
use crate::terminal::TerminalHost;

/// Result of starting a launch
#[derive(Debug)]
pub enum Launched {
    /// Handed to a terminal; nothing further is reported
    Terminal,
    /// Running in the background; the handle completes after the exit report
    Background(JoinHandle<()>),
    /// Could not be started; the failure was already reported
    Failed,
}

impl Launched {
    /// Wait for the background monitor, if any, to report
    pub async fn wait(self) {
        if let Launched::Background(handle) = self {
            if let Err(e) = handle.await {
                warn!("Task monitor ended abnormally: {}", e);
            }
        }
    }
}

/// Process-based task launcher
pub struct ProcessLauncher {
    notifier: Arc<dyn Notifier>,
    terminal: Arc<dyn TerminalHost>,
    show_notifications: bool,
}

impl ProcessLauncher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        terminal: Arc<dyn TerminalHost>,
        show_notifications: bool,
    ) -> Self {
        Self {
            notifier,
            terminal,
            show_notifications,
        }
    }

    /// Launch `name` in `cwd`. The package manager is detected anew on every
    /// call.
    pub async fn start(&self, name: &str, mode: RunMode, cwd: &Path) -> Launched {
        let manager = detect_package_manager(cwd).await;
        info!("Launching '{}' with {} ({})", name, manager, mode);

        match mode {
            RunMode::Terminal => self.open_terminal(name, manager, cwd).await,
            RunMode::Background => self.spawn_background(name, manager, cwd),
        }
    }

    async fn open_terminal(&self, name: &str, manager: PackageManager, cwd: &Path) -> Launched {
        let command_line = manager.run_command_line(name);
        match self.terminal.open(&command_line, cwd, &command_line).await {
            Ok(()) => Launched::Terminal,
            Err(e) => {
                warn!("Failed to open terminal for '{}': {}", name, e);
                self.notifier
                    .error(name, &format!("Failed to run \"{}\": {}", name, e));
                Launched::Failed
            }
        }
    }

    fn spawn_background(&self, name: &str, manager: PackageManager, cwd: &Path) -> Launched {
        let mut cmd = background_command(manager, name);
        cmd.current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn {} for '{}': {}", manager, name, e);
                self.notifier
                    .error(name, &format!("Failed to run \"{}\": {}", name, e));
                return Launched::Failed;
            }
        };

        // Output is not shown anywhere, but the pipes must be emptied or a
        // chatty task blocks once their buffers fill.
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(drain_output(name.to_string(), "stdout", stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(drain_output(name.to_string(), "stderr", stderr));
        }

        let task = name.to_string();
        let notifier = self.notifier.clone();
        let show_notifications = self.show_notifications;
        let handle = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => {
                    let (level, message) = exit_report(&task, &status);
                    info!("Task '{}' exited: {}", task, status);
                    if show_notifications {
                        notifier.notify(level, &task, &message);
                    }
                }
                Err(e) => {
                    warn!("Failed to wait for '{}': {}", task, e);
                    notifier.error(&task, &format!("Failed to run \"{}\": {}", task, e));
                }
            }
        });

        Launched::Background(handle)
    }
}

#[async_trait]
impl TaskLauncher for ProcessLauncher {
    async fn launch(&self, name: &str, mode: RunMode, cwd: &Path) {
        // Fire-and-forget: the monitor reports on its own
        let _ = self.start(name, mode, cwd).await;
    }
}

/// Non-interactive invocation of `<tool> run <task>`. Windows resolves the
/// tool's `.cmd` shim only through its command interpreter.
fn background_command(manager: PackageManager, task: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd.exe");
        cmd.arg("/c").arg(manager.as_str()).args(manager.run_args(task));
        cmd
    }

    #[cfg(not(windows))]
    {
        let mut cmd = Command::new(manager.as_str());
        cmd.args(manager.run_args(task));
        cmd
    }
}

async fn drain_output<R>(task: String, stream: &'static str, reader: R)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        debug!(task = %task, stream = stream, "{}", line);
    }
}

/// Notification for a finished background task
pub fn exit_report(task: &str, status: &ExitStatus) -> (NotificationLevel, String) {
    if status.success() {
        return (
            NotificationLevel::Info,
            format!("Script \"{}\" completed successfully.", task),
        );
    }

    if let Some(signal) = terminating_signal(status) {
        return (
            NotificationLevel::Warning,
            format!("Script \"{}\" was terminated ({}).", task, signal),
        );
    }

    let code = status
        .code()
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    (
        NotificationLevel::Warning,
        format!("Script \"{}\" exited with code {}.", task, code),
    )
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;
    status.signal().map(signal_name)
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<String> {
    None
}

#[cfg(unix)]
fn signal_name(signal: i32) -> String {
    let name = match signal {
        1 => "SIGHUP",
        2 => "SIGINT",
        3 => "SIGQUIT",
        6 => "SIGABRT",
        9 => "SIGKILL",
        13 => "SIGPIPE",
        14 => "SIGALRM",
        15 => "SIGTERM",
        other => return format!("signal {}", other),
    };
    name.to_string()
}
