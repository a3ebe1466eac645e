// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git backend abstraction layer.
//!
//! ```text
//! GitQuery (read) --> GixBackend   (pure Rust gix)
//!                 --> ShellBackend (git CLI)
//! ```

use crate::error::{GitError, GixError, Result};
use std::path::Path;

// --- Query Trait (Read-only operations) ---

/// Read-only git query operations.
///
/// Implementors provide methods to inspect working-copy state without
/// modification. Mutations (clone, fetch, checkout, pull) live in
/// [`crate::tools::git`] where they run async with cancellation and
/// timeouts.
pub trait GitQuery {
    /// Check if path is inside a git work tree.
    fn is_git_repo(path: &Path) -> bool;

    /// Get current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository discovery or head resolution fails.
    fn current_branch(path: &Path) -> Result<Option<String>>;
}

// --- GixBackend Implementation (Pure Rust) ---

/// Pure Rust git backend using gix.
///
/// Provides read-only operations without spawning subprocesses.
pub struct GixBackend;

impl GitQuery for GixBackend {
    fn is_git_repo(path: &Path) -> bool {
        gix::discover(path).is_ok()
    }

    fn current_branch(path: &Path) -> Result<Option<String>> {
        let repo =
            gix::discover(path).map_err(|e| GitError::Gix(GixError::Discover(Box::new(e))))?;
        let head = repo
            .head_name()
            .map_err(|e| GitError::Gix(GixError::Head(e)))?;
        Ok(head.map(|name| name.shorten().to_string()))
    }
}

// --- ShellBackend Implementation (Git CLI) ---

/// Shell-based git backend using the git CLI.
///
/// Required for remote-URL listing: `git remote get-url --all` reports every
/// URL exactly as the operator configured it, including insteadOf rewrites.
pub struct ShellBackend;

impl ShellBackend {
    /// Execute a git command. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`.
    pub(crate) fn git_command(args: &[&str], cwd: &Path) -> Result<String> {
        use std::process::Command;

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// List every URL configured on every remote of the working copy.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the path is not a working copy or git fails.
    pub fn remote_urls(repo_path: &Path) -> Result<Vec<String>> {
        let names = Self::git_command(&["remote"], repo_path)?;
        let mut urls = Vec::new();
        for name in names.lines().map(str::trim).filter(|n| !n.is_empty()) {
            let output = Self::git_command(&["remote", "get-url", "--all", name], repo_path)?;
            urls.extend(
                output
                    .lines()
                    .map(|line| line.trim().to_string())
                    .filter(|line| !line.is_empty()),
            );
        }
        Ok(urls)
    }

    /// Initialize a new repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if repository initialization fails.
    pub fn init_repo(path: &Path) -> Result<()> {
        Self::git_command(&["init", "--quiet"], path)?;
        Ok(())
    }

    /// Add a remote.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the remote cannot be added.
    pub fn add_remote(repo_path: &Path, name: &str, url: &str) -> Result<()> {
        Self::git_command(&["remote", "add", name, url], repo_path)?;
        Ok(())
    }
}

impl GitQuery for ShellBackend {
    fn is_git_repo(path: &Path) -> bool {
        Self::git_command(&["rev-parse", "--is-inside-work-tree"], path).is_ok()
    }

    fn current_branch(path: &Path) -> Result<Option<String>> {
        Self::git_command(&["symbolic-ref", "--short", "HEAD"], path)
            .map_or_else(|_| Ok(None), |branch| Ok(Some(branch)))
    }
}
