//! Launch tests against stand-in package managers
//!
//! PATH is pointed at a directory of small shell scripts named `npm`, `pnpm`
//! and `yarn`; `bun` is deliberately missing. Each script records how it was
//! invoked in `invocation.txt` inside its working directory, then behaves
//! according to the task name: `ok` succeeds, `fail` exits 3, `killed`
//! terminates itself with SIGTERM.

#![cfg(unix)]

mod common;

use common::*;
use script_bar::error::TerminalError;
use script_bar::runtime::{Launched, ProcessLauncher};
use script_bar::terminal::TerminalHost;
use script_bar_sdk::{async_trait, NotificationLevel, Notifier, RunMode, TaskLauncher};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

// ============================================================================
// Test Doubles
// ============================================================================

const FAKE_TOOL: &str = r#"#!/bin/sh
echo "${0##*/} $*" > invocation.txt
case "$2" in
  ok) exit 0 ;;
  fail) exit 3 ;;
  killed) kill -TERM $$ ;;
esac
exit 0
"#;

static FAKE_PATH: Once = Once::new();

fn install_fake_tools() {
    FAKE_PATH.call_once(|| {
        let dir = tempfile::tempdir().unwrap().keep();
        for tool in ["npm", "pnpm", "yarn"] {
            let path = dir.join(tool);
            std::fs::write(&path, FAKE_TOOL).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        std::env::set_var("PATH", &dir);
    });
}

#[derive(Default)]
struct RecordingNotifier {
    events: Mutex<Vec<(NotificationLevel, String, String)>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<(NotificationLevel, String, String)> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NotificationLevel, task: &str, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push((level, task.to_string(), message.to_string()));
    }
}

#[derive(Default)]
struct RecordingTerminal {
    opened: Mutex<Vec<(PathBuf, String)>>,
    fail: bool,
}

#[async_trait]
impl TerminalHost for RecordingTerminal {
    async fn open(&self, _title: &str, cwd: &Path, command_line: &str) -> Result<(), TerminalError> {
        if self.fail {
            return Err(TerminalError::NoTerminal {
                attempts: vec!["xterm: not found".to_string()],
            });
        }
        self.opened
            .lock()
            .unwrap()
            .push((cwd.to_path_buf(), command_line.to_string()));
        Ok(())
    }
}

fn launcher(
    show_notifications: bool,
) -> (ProcessLauncher, Arc<RecordingNotifier>, Arc<RecordingTerminal>) {
    install_fake_tools();
    let notifier = Arc::new(RecordingNotifier::default());
    let terminal = Arc::new(RecordingTerminal::default());
    let launcher = ProcessLauncher::new(notifier.clone(), terminal.clone(), show_notifications);
    (launcher, notifier, terminal)
}

fn invocation(fixture: &TestProject) -> String {
    std::fs::read_to_string(fixture.root().join("invocation.txt"))
        .unwrap()
        .trim()
        .to_string()
}

// ============================================================================
// Background Launches
// ============================================================================

#[tokio::test]
async fn test_background_prefers_pnpm_lockfile() {
    let fixture = TestProject::with_scripts(&[("dev", "vite")]);
    fixture.touch("yarn.lock");
    fixture.touch("pnpm-lock.yaml");
    let (launcher, notifier, _) = launcher(true);

    launcher.start("dev", RunMode::Background, fixture.root()).await.wait().await;

    assert_eq!(invocation(&fixture), "pnpm run dev");
    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, NotificationLevel::Info);
}

#[tokio::test]
async fn test_background_defaults_to_npm() {
    let fixture = TestProject::with_scripts(&[("ok", "true")]);
    let (launcher, _, _) = launcher(true);

    launcher.start("ok", RunMode::Background, fixture.root()).await.wait().await;

    assert_eq!(invocation(&fixture), "npm run ok");
}

#[tokio::test]
async fn test_success_reported() {
    let fixture = TestProject::with_scripts(&[("ok", "true")]);
    fixture.touch("yarn.lock");
    let (launcher, notifier, _) = launcher(true);

    launcher.start("ok", RunMode::Background, fixture.root()).await.wait().await;

    assert_eq!(invocation(&fixture), "yarn run ok");
    assert_eq!(
        notifier.events(),
        vec![(
            NotificationLevel::Info,
            "ok".to_string(),
            "Script \"ok\" completed successfully.".to_string()
        )]
    );
}

#[tokio::test]
async fn test_nonzero_exit_reported() {
    let fixture = TestProject::with_scripts(&[("fail", "false")]);
    let (launcher, notifier, _) = launcher(true);

    launcher.start("fail", RunMode::Background, fixture.root()).await.wait().await;

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, NotificationLevel::Warning);
    assert_eq!(events[0].2, "Script \"fail\" exited with code 3.");
}

#[tokio::test]
async fn test_signal_reported_distinctly() {
    let fixture = TestProject::with_scripts(&[("killed", "sleep 10")]);
    let (launcher, notifier, _) = launcher(true);

    launcher.start("killed", RunMode::Background, fixture.root()).await.wait().await;

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, NotificationLevel::Warning);
    assert_eq!(events[0].2, "Script \"killed\" was terminated (SIGTERM).");
}

#[tokio::test]
async fn test_quiet_launcher_reports_nothing_on_exit() {
    let fixture = TestProject::with_scripts(&[("fail", "false")]);
    let (launcher, notifier, _) = launcher(false);

    launcher.start("fail", RunMode::Background, fixture.root()).await.wait().await;

    assert_eq!(invocation(&fixture), "npm run fail");
    assert!(notifier.events().is_empty());
}

#[tokio::test]
async fn test_spawn_failure_always_reported() {
    let fixture = TestProject::with_scripts(&[("dev", "vite")]);
    fixture.touch("bun.lockb");
    let (launcher, notifier, _) = launcher(false);

    let launched = launcher.start("dev", RunMode::Background, fixture.root()).await;
    assert!(matches!(launched, Launched::Failed));

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, NotificationLevel::Error);
    assert!(events[0].2.starts_with("Failed to run \"dev\": "));
}

#[tokio::test]
async fn test_trait_launch_is_fire_and_forget() {
    let fixture = TestProject::with_scripts(&[("ok", "true")]);
    let (launcher, notifier, _) = launcher(true);

    launcher.launch("ok", RunMode::Background, fixture.root()).await;

    // The monitor reports on its own once the child exits
    for _ in 0..100 {
        if !notifier.events().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert_eq!(notifier.events().len(), 1);
}

// ============================================================================
// Terminal Launches
// ============================================================================

#[tokio::test]
async fn test_terminal_mode_hands_command_to_host() {
    let fixture = TestProject::with_scripts(&[("dev", "vite")]);
    fixture.touch("pnpm-lock.yaml");
    let (launcher, notifier, terminal) = launcher(true);

    let launched = launcher.start("dev", RunMode::Terminal, fixture.root()).await;
    assert!(matches!(launched, Launched::Terminal));

    let opened = terminal.opened.lock().unwrap().clone();
    assert_eq!(opened, vec![(fixture.root_buf(), "pnpm run dev".to_string())]);
    assert!(notifier.events().is_empty());
    assert!(!fixture.root().join("invocation.txt").exists());
}

#[tokio::test]
async fn test_terminal_failure_reported() {
    install_fake_tools();
    let fixture = TestProject::with_scripts(&[("dev", "vite")]);
    let notifier = Arc::new(RecordingNotifier::default());
    let terminal = Arc::new(RecordingTerminal {
        fail: true,
        ..Default::default()
    });
    let launcher = ProcessLauncher::new(notifier.clone(), terminal, false);

    let launched = launcher.start("dev", RunMode::Terminal, fixture.root()).await;
    assert!(matches!(launched, Launched::Failed));

    let events = notifier.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, NotificationLevel::Error);
}
