// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git query operations.
//!
//! ```text
//! is_git_repo / current_branch --> GixBackend   --> .git/ (no subprocess)
//! remote_urls                  --> ShellBackend --> git CLI
//! ```
//!
//! Uses gix for discovery and head resolution (faster, no subprocess
//! overhead) and the git CLI where it is the authority on configured state.

use crate::error::Result;
use std::path::Path;

use super::backend::{GitQuery, GixBackend, ShellBackend};

#[must_use]
pub fn is_git_repo(path: &Path) -> bool {
    GixBackend::is_git_repo(path)
}

/// Get current branch name (None if HEAD is detached).
///
/// # Errors
///
/// Returns a `GitError` if repository discovery or head resolution fails.
pub fn current_branch(path: &Path) -> Result<Option<String>> {
    GixBackend::current_branch(path)
}

/// List every URL configured on every remote of the working copy.
///
/// # Errors
///
/// Returns a `GitError` if the path is not a working copy or git fails.
pub fn remote_urls(repo_path: &Path) -> Result<Vec<String>> {
    ShellBackend::remote_urls(repo_path)
}
