// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Fetch | Package | Upload | Bundle | Publish | Install | Config
//! ```

use std::process::ExitCode;

use fab_rs::cli::config::ConfigArgs;
use fab_rs::cli::global::GlobalOptions;
use fab_rs::cli::{self, Command};
use fab_rs::cmd::bundle::run_bundle_command;
use fab_rs::cmd::config::{run_files_command, run_options_command};
use fab_rs::cmd::fetch::run_fetch_command;
use fab_rs::cmd::install::run_install_command;
use fab_rs::cmd::package::{run_package_command, PackageOutcome};
use fab_rs::cmd::publish::run_publish_command;
use fab_rs::cmd::upload::run_upload_command;
use fab_rs::config::loader::ConfigLoader;
use fab_rs::config::types::GlobalConfig;
use fab_rs::config::Config;
use fab_rs::error::Result;
use fab_rs::logging::{init_logging, LogConfig, LogLevel};
use fab_rs::release::sync::SyncOutcome;

use anyhow::Context;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let merged = load_global_config(global);
    let log_file = merged.log_file.display().to_string();

    LogConfig::builder()
        .with_console_level(merged.output_log_level)
        .with_file_level(merged.file_log_level)
        .maybe_with_log_file((!log_file.is_empty()).then_some(log_file))
        .build()
}

/// Logging starts before command dispatch, so the merged global section
/// is loaded here. A config file that fails to load falls back to
/// defaults; its error surfaces once the command loads it for real.
fn load_global_config(global: &GlobalOptions) -> GlobalConfig {
    if let Ok(loader) = build_config_loader(global)
        && let Ok(config) = loader.build()
    {
        return config.global;
    }

    // CLI flags still apply when no config file is readable.
    let mut fallback = GlobalConfig::default();
    if let Some(level) = global.log_level.and_then(LogLevel::from_u8) {
        fallback.output_log_level = level;
    }
    if let Some(level) = global
        .file_log_level
        .or(global.log_level)
        .and_then(LogLevel::from_u8)
    {
        fallback.file_log_level = level;
    }
    if let Some(ref path) = global.log_file {
        fallback.log_file = path.clone();
    }
    fallback
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Config(args)) => handle_config_command(args, &cli.global),
        Some(Command::Fetch(args)) => match load_config(&cli.global) {
            Ok(config) => match run_fetch_command(args, &config, config.global.dry).await {
                Ok(outcomes) => batch_result(outcomes.iter().map(SyncOutcome::is_failure)),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        },
        Some(Command::Package(args)) => match load_config(&cli.global) {
            Ok(config) => match run_package_command(args, &config, config.global.dry).await {
                Ok(outcomes) => batch_result(outcomes.iter().map(PackageOutcome::is_failure)),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        },
        Some(Command::Upload) => match load_config(&cli.global) {
            Ok(config) => run_upload_command(&config, config.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Bundle(args)) => match load_config(&cli.global) {
            Ok(config) => run_bundle_command(args, &config, config.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Publish(args)) => match load_config(&cli.global) {
            Ok(config) => run_publish_command(args, &config, config.global.dry).await,
            Err(e) => Err(e),
        },
        Some(Command::Install(args)) => match load_config(&cli.global) {
            Ok(config) => run_install_command(args, &config, config.global.dry).await,
            Err(e) => Err(e),
        },
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn handle_config_command(args: &ConfigArgs, global: &GlobalOptions) -> Result<()> {
    if args.files {
        let loader = build_config_loader(global)?;
        run_files_command(&loader.format_loaded_files());
        Ok(())
    } else {
        load_config(global).map(|config| run_options_command(&config))
    }
}

/// Folds per-module outcomes into the process result. The handlers have
/// already logged each failure.
fn batch_result(mut failures: impl Iterator<Item = bool>) -> Result<()> {
    if failures.any(|failed| failed) {
        Err(anyhow::anyhow!("one or more modules failed"))
    } else {
        Ok(())
    }
}

fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new()
        .add_toml_file(&global.config)
        .with_env_prefix("FAB");

    for option in global.to_config_overrides() {
        let (key, value) = option
            .split_once('=')
            .with_context(|| format!("invalid option '{option}', expected KEY=VALUE"))?;
        loader = loader.set(key, value)?;
    }

    Ok(loader)
}

fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build().map_err(|e| {
        eprintln!("Failed to load config: {e}");
        e
    })
}
