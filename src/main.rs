// cavaux-assemble: Release Assembly Pipeline
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Version | Options | Inis | Tools | Audit | Release
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use cavaux_assemble::cli::global::GlobalOptions;
use cavaux_assemble::cli::{self, Command};
use cavaux_assemble::cmd::audit::run_audit_command;
use cavaux_assemble::cmd::config::{run_inis_command, run_options_command};
use cavaux_assemble::cmd::release::run_release_command;
use cavaux_assemble::cmd::tools::run_tools_command;
use cavaux_assemble::config::loader::ConfigLoader;
use cavaux_assemble::config::{CONFIG_FILE_NAME, Config, ENV_PREFIX};
use cavaux_assemble::error::{Result, is_interrupted};
use cavaux_assemble::logging::init_logging;
use cavaux_assemble::logging::{LogConfig, LogLevel};
use tokio_util::sync::CancellationToken;
use tracing::info;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Configuration together with the files it was read from.
type Loaded = Result<(Config, Vec<String>)>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let loaded = load_config(&cli.global);

    let log_config = build_log_config(&cli.global, loaded.as_ref().ok().map(|(c, _)| c));
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let cancel_token = CancellationToken::new();
    let interrupt = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Received Ctrl+C, stopping the release...");
            interrupt.cancel();
        }
    });

    match dispatch_command(&cli, loaded, cancel_token).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if is_interrupted(&e) => {
            eprintln!("Aborted");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn build_log_config(global: &GlobalOptions, config: Option<&Config>) -> LogConfig {
    let (configured_console, configured_file, configured_file_path) = config.map_or(
        (LogLevel::INFO, LogLevel::TRACE, None),
        |c| {
            (
                c.global.output_log_level,
                c.global.file_log_level,
                c.global.log_file.clone(),
            )
        },
    );

    let console_level = LogLevel::resolve(
        global.log_level.and_then(LogLevel::from_u8),
        configured_console,
        global.verbose,
    );
    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(configured_file);
    let log_file: Option<PathBuf> = global.log_file.clone().or(configured_file_path);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(log_file.map(|p| p.display().to_string()))
        .build()
}

async fn dispatch_command(cli: &cli::Cli, loaded: Loaded, cancel_token: CancellationToken) -> Result<()> {
    let command = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            return Ok(());
        }
        Some(command) => command,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            return Err(anyhow::anyhow!("No command specified"));
        }
    };

    let (config, files) = loaded.inspect_err(|e| eprintln!("Failed to load config: {e:#}"))?;
    match command {
        Command::Options => {
            run_options_command(&config);
            Ok(())
        }
        Command::Inis => {
            run_inis_command(&files);
            Ok(())
        }
        Command::Tools => run_tools_command(&config),
        Command::Audit(args) => run_audit_command(args, &config),
        Command::Release(args) => {
            let report =
                run_release_command(args, config, cancel_token, cli.global.verbose).await?;
            info!(
                version = %report.version,
                commit = %report.commit,
                packages = report.packages,
                "Release {} complete",
                report.archive.display()
            );
            Ok(())
        }
        Command::Version => Ok(()),
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let root = global.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let mut loader = ConfigLoader::new().add_toml_file_optional(root.join(CONFIG_FILE_NAME));
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for option in global.to_config_overrides() {
        loader = loader.set_option(&option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Loaded {
    let loader = build_config_loader(global)?;
    let files = loader.format_loaded_files();
    let config = loader.build()?;
    Ok((config, files))
}
