use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use script_bar::app::App;
use script_bar::cli::{Cli, Commands};
use script_bar::config::{ensure_settings_file, Settings, TerminalKind};
use script_bar::console::ConsoleNotifier;
use script_bar::logging::{self, LogTarget};
use script_bar::project::{empty_state_message, Project};
use script_bar::runtime::{Launched, ProcessLauncher};
use script_bar::terminal::{InlineTerminal, SystemTerminal, TerminalHost};
use script_bar::ui::run_tui;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let interactive = matches!(cli.command, None | Some(Commands::Tui));
    let log_file = logging::init(if interactive {
        LogTarget::File
    } else {
        LogTarget::Stderr
    });
    if let Some(path) = log_file {
        tracing::debug!("Logging to {}", path.display());
    }

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("script-bar failed: {:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Project root: `--root`, else the current directory
fn resolve_root(root: Option<PathBuf>) -> Option<PathBuf> {
    root.or_else(|| std::env::current_dir().ok())
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut settings = Settings::load();
    if let Some(mode) = cli.default_run_mode {
        settings.default_run_mode = mode;
    }
    if cli.quiet {
        settings.show_notifications = false;
    }

    let project = Project::new(resolve_root(cli.root), settings.default_run_mode);

    match cli.command {
        None | Some(Commands::Tui) => {
            let app = App::new(project, &settings).context("Script Bar failed to start")?;
            run_tui(app)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "script-bar", &mut std::io::stdout());
            Ok(ExitCode::SUCCESS)
        }
        Some(command) => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_command(command, project, settings))
        }
    }
}

async fn run_command(command: Commands, project: Project, settings: Settings) -> Result<ExitCode> {
    match command {
        Commands::List { all, json } => {
            let items = if all {
                project.all_items().await
            } else {
                project.effective_items().await
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
                return Ok(ExitCode::SUCCESS);
            }

            let status = project.status().await;
            if let Some(message) = empty_state_message(status, !items.is_empty()) {
                println!("{}", message);
                return Ok(ExitCode::SUCCESS);
            }

            for item in &items {
                println!(
                    "{}{:<24} {:<24} {:<11} {}",
                    if item.enabled { "  " } else { "- " },
                    item.nickname,
                    item.name,
                    item.run_mode,
                    item.color
                );
            }
        }
        Commands::Status => {
            println!("{}", project.status().await);
        }
        Commands::Rescan => {
            let items = project.rescan().await?;
            println!("Rescanned package.json: {} enabled task(s).", items.len());
        }
        Commands::Run { name, mode, inline } => {
            let Some(root) = project.root().map(|r| r.to_path_buf()) else {
                bail!("No project root available.");
            };

            let mode = match mode {
                Some(mode) => mode,
                None => project
                    .all_items()
                    .await
                    .into_iter()
                    .find(|item| item.name == name)
                    .map(|item| item.run_mode)
                    .unwrap_or(settings.default_run_mode),
            };

            let terminal: Arc<dyn TerminalHost> =
                if inline || settings.terminal == TerminalKind::Inline {
                    Arc::new(InlineTerminal)
                } else {
                    Arc::new(SystemTerminal)
                };
            let launcher = ProcessLauncher::new(
                Arc::new(ConsoleNotifier::new()),
                terminal,
                settings.show_notifications,
            );

            let launched = launcher.start(&name, mode, &root).await;
            if matches!(launched, Launched::Failed) {
                return Ok(ExitCode::FAILURE);
            }
            launched.wait().await;
        }
        Commands::Settings { global } => {
            let path = if global {
                ensure_settings_file()?
            } else {
                project.ensure_preferences().await?
            };
            println!("{}", path.display());
        }
        Commands::Tui | Commands::Completions { .. } => unreachable!("handled before the runtime starts"),
    }

    Ok(ExitCode::SUCCESS)
}
