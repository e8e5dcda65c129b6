//! Interactive terminal hosts for `terminal` run mode

use script_bar_sdk::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::TerminalError;

/// Opens an interactive terminal in `cwd` and feeds it `command_line` as if
/// the user had typed it.
#[async_trait]
pub trait TerminalHost: Send + Sync {
    async fn open(&self, title: &str, cwd: &Path, command_line: &str) -> Result<(), TerminalError>;
}

fn user_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "sh".to_string())
}

/// New terminal emulator window, left open on the user's shell once the
/// command finishes.
#[derive(Debug, Default, Clone)]
pub struct SystemTerminal;

impl SystemTerminal {
    /// Programs to try, in order, with their arguments
    pub fn candidates(title: &str, cwd: &Path, command_line: &str) -> Vec<(String, Vec<String>)> {
        #[cfg(target_os = "windows")]
        {
            let _ = cwd;
            vec![(
                "cmd".to_string(),
                vec![
                    "/C".to_string(),
                    "start".to_string(),
                    title.to_string(),
                    "cmd".to_string(),
                    "/K".to_string(),
                    command_line.to_string(),
                ],
            )]
        }

        #[cfg(target_os = "macos")]
        {
            let _ = title;
            let script = format!("cd {} && {}", shell_quote(&cwd.display().to_string()), command_line);
            vec![(
                "osascript".to_string(),
                vec![
                    "-e".to_string(),
                    format!(
                        "tell application \"Terminal\" to do script \"{}\"",
                        applescript_escape(&script)
                    ),
                    "-e".to_string(),
                    "tell application \"Terminal\" to activate".to_string(),
                ],
            )]
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            let shell = user_shell();
            let script = format!("{}; exec {}", command_line, shell);
            let exec_args = vec!["-e".to_string(), shell.clone(), "-c".to_string(), script.clone()];
            let titled = |program: &str| {
                let mut args = vec!["-T".to_string(), title.to_string()];
                args.extend(exec_args.clone());
                (program.to_string(), args)
            };

            let mut terminals = Vec::new();
            if let Some(preferred) = std::env::var("TERMINAL")
                .ok()
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
            {
                terminals.push((preferred, exec_args.clone()));
            }
            terminals.push(titled("x-terminal-emulator"));
            terminals.push((
                "gnome-terminal".to_string(),
                vec![
                    format!("--title={}", title),
                    format!("--working-directory={}", cwd.display()),
                    "--".to_string(),
                    shell.clone(),
                    "-c".to_string(),
                    script.clone(),
                ],
            ));
            terminals.push((
                "konsole".to_string(),
                vec![
                    "--workdir".to_string(),
                    cwd.display().to_string(),
                    "-e".to_string(),
                    shell.clone(),
                    "-c".to_string(),
                    script,
                ],
            ));
            terminals.push(titled("xterm"));
            terminals
        }
    }
}

#[cfg(target_os = "macos")]
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

#[cfg(target_os = "macos")]
fn applescript_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl TerminalHost for SystemTerminal {
    async fn open(&self, title: &str, cwd: &Path, command_line: &str) -> Result<(), TerminalError> {
        let mut attempts = Vec::new();

        for (program, args) in Self::candidates(title, cwd, command_line) {
            let spawned = Command::new(&program)
                .args(&args)
                .current_dir(cwd)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            match spawned {
                Ok(_child) => {
                    info!("Opened {} for '{}' in {}", program, command_line, cwd.display());
                    return Ok(());
                }
                Err(e) => {
                    debug!("Terminal candidate {} failed: {}", program, e);
                    attempts.push(format!("{}: {}", program, e));
                }
            }
        }

        Err(TerminalError::NoTerminal { attempts })
    }
}

/// Runs the command in the current terminal through the user's shell, with
/// inherited stdio, and returns once it exits.
#[derive(Debug, Default, Clone)]
pub struct InlineTerminal;

#[async_trait]
impl TerminalHost for InlineTerminal {
    async fn open(&self, _title: &str, cwd: &Path, command_line: &str) -> Result<(), TerminalError> {
        #[cfg(target_os = "windows")]
        let (program, flag) = ("cmd".to_string(), "/C");
        #[cfg(not(target_os = "windows"))]
        let (program, flag) = (user_shell(), "-c");

        let status = Command::new(&program)
            .arg(flag)
            .arg(command_line)
            .current_dir(cwd)
            .status()
            .await
            .map_err(|source| TerminalError::Spawn {
                program: program.clone(),
                source,
            })?;
        debug!("Inline '{}' finished with {}", command_line, status);
        Ok(())
    }
}
