// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for fab using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! fab [global options] <command>
//! fetch [module]
//! package [module]
//! upload
//! bundle
//! publish --zip <file>
//! install --data-dir <dir>
//! config
//! ```

pub mod config;
pub mod global;
pub mod install;
pub mod publish;
pub mod release;


use crate::cli::config::ConfigArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::install::InstallArgs;
use crate::cli::publish::PublishArgs;
use crate::cli::release::{BundleArgs, FetchArgs, PackageArgs};
use clap::{Parser, Subcommand};

/// Factorio Access Release Tool
///
/// Builds and publishes the Factorio Access mod pack.
#[derive(Debug, Parser)]
#[command(
    name = "fab",
    author,
    version,
    about = "Factorio Access Release Tool",
    long_about = "fab Copyright (C) 2026 Factorio Access Contributors\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Builds and publishes the Factorio Access mod pack.\n\n\
                  A full release is `fab fetch`, `fab package`, `fab bundle`,\n\
                  then `fab publish --zip <bundle>`. Each step can also run on\n\
                  its own. See `fab <command> --help` for more information\n\
                  about a command.",
    after_help = "CONFIG FILES:\n\n\
                  By default, fab loads `fab.toml` from the current directory;\n\
                  -c/--config points it elsewhere. Values can be overridden\n\
                  with FAB_* environment variables (FAB_SETTINGS_UPDATE=false)\n\
                  and with --set KEY=VALUE, which wins over everything else."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Shows the effective configuration.
    Config(ConfigArgs),

    /// Clones or updates module working copies.
    Fetch(FetchArgs),

    /// Packages module checkouts into mod zips.
    Package(PackageArgs),

    /// Uploads the packaged main module to the mod portal.
    Upload,

    /// Assembles the release bundle zip.
    Bundle(BundleArgs),

    /// Attaches a bundle to a GitHub release.
    Publish(PublishArgs),

    /// Installs staged assets into a Factorio data directory.
    Install(InstallArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
