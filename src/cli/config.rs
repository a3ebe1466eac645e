// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config command arguments.

use clap::Args;

/// Arguments for the `config` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// List the configuration files that were loaded instead of the
    /// effective options.
    #[arg(long)]
    pub files: bool,
}
