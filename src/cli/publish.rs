// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command arguments.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `publish` command.
#[derive(Debug, Clone, Args)]
pub struct PublishArgs {
    /// Bundle archive to attach to the release.
    #[arg(long = "zip", value_name = "FILE")]
    pub zip: PathBuf,

    /// Release tag; derived from the archive name when omitted.
    #[arg(long = "tag", value_name = "TAG")]
    pub tag: Option<String>,

    /// Mark a newly created release as a prerelease.
    #[arg(long)]
    pub prerelease: bool,

    /// GitHub token used for the release API.
    #[arg(
        long = "token",
        value_name = "TOKEN",
        env = "GITHUB_TOKEN",
        hide_env_values = true
    )]
    pub token: Option<String>,
}
