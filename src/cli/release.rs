// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release pipeline command arguments.
//!
//! ```text
//! fetch   [MODULE] [-d DIR]
//! package [MODULE] [-o DIR] [-s DIR]
//! bundle  [-s DIR] [-o DIR] [--token TOKEN]
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `fetch` command.
#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    /// Module to fetch; all configured modules when omitted.
    #[arg(value_name = "MODULE")]
    pub module: Option<String>,

    /// Directory to place working copies in instead of `settings.default_dest`.
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub dest: Option<PathBuf>,
}

/// Arguments for the `package` command.
#[derive(Debug, Clone, Default, Args)]
pub struct PackageArgs {
    /// Module to package; all configured modules when omitted.
    #[arg(value_name = "MODULE")]
    pub module: Option<String>,

    /// Output directory for the packaged zips, defaults to the source base.
    #[arg(short = 'o', long = "outdir", value_name = "DIR")]
    pub outdir: Option<PathBuf>,

    /// Directory holding the module checkouts instead of `settings.default_dest`.
    #[arg(short = 's', long = "source", value_name = "DIR")]
    pub source: Option<PathBuf>,
}

/// Arguments for the `bundle` command.
#[derive(Debug, Clone, Default, Args)]
pub struct BundleArgs {
    /// Directory holding the staged assets instead of `settings.default_dest`.
    #[arg(short = 's', long = "source", value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Output directory for the bundle archive, defaults to the source base.
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// GitHub token used when companion files have to be downloaded.
    #[arg(
        long = "token",
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,
}
