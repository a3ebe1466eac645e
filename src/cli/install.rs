// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `install` command.
#[derive(Debug, Clone, Args)]
pub struct InstallArgs {
    /// Factorio data directory, the one holding `mods/`.
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Directory holding the staged assets instead of `settings.default_dest`.
    #[arg(short = 's', long = "source", value_name = "DIR")]
    pub source: Option<PathBuf>,
}
