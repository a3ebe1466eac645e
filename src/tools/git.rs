// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git tool for working-copy mutations.
//!
//! ```text
//! GitTool
//! Operations: Clone | Fetch | Checkout | Pull
//! Builder: url/path/branch/target
//! Safety: non-interactive env, bounded timeout, cancellation support
//! ```
//!
//! All operations run the `git` binary via
//! `ProcessBuilder::run_with_cancellation()` so a Ctrl-C terminates the
//! child and a stalled remote times out instead of wedging the batch.
//! Credential prompts are disabled (`GCM_INTERACTIVE=never`,
//! `GIT_TERMINAL_PROMPT=0`); a repo that needs interactive auth fails fast.
//!
//! For read-only queries (remote URLs, current branch), use [`crate::git`].

use std::path::{Path, PathBuf};

use crate::error::{GitError, Result};
use anyhow::Context;
use tracing::{debug, info};

use super::{TOOL_TIMEOUT, ToolContext};
use crate::core::process::builder::{ProcessBuilder, StreamFlags};

/// Git tool for repository operations.
///
/// # Example
///
/// ```ignore
/// // Clone a repository
/// GitTool::new()
///     .url("https://github.com/FactorioAccess/FactorioAccess.git")
///     .path("./FactorioAccess")
///     .branch("main")
///     .run(&ctx)
///     .await?;
///
/// // Fetch origin
/// GitTool::new().path("./FactorioAccess").fetch_op().run(&ctx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GitTool {
    url: Option<String>,
    path: Option<PathBuf>,
    branch: Option<String>,
    target: Option<String>,
    operation: GitOperation,
}

/// Git operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GitOperation {
    /// Clone a repository.
    #[default]
    Clone,
    /// Fetch updates from origin without merging.
    Fetch,
    /// Checkout a branch, tag, or commit.
    Checkout,
    /// Pull updates from origin.
    Pull,
}

impl GitTool {
    /// Creates a new `GitTool` with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            url: None,
            path: None,
            branch: None,
            target: None,
            operation: GitOperation::Clone,
        }
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub const fn clone_op(mut self) -> Self {
        self.operation = GitOperation::Clone;
        self
    }

    #[must_use]
    pub const fn fetch_op(mut self) -> Self {
        self.operation = GitOperation::Fetch;
        self
    }

    #[must_use]
    pub const fn checkout_op(mut self) -> Self {
        self.operation = GitOperation::Checkout;
        self
    }

    #[must_use]
    pub const fn pull_op(mut self) -> Self {
        self.operation = GitOperation::Pull;
        self
    }

    /// Executes the configured operation.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` for failed git operations and an error when the
    /// run is interrupted or required builder fields are missing.
    pub async fn run(&self, ctx: &ToolContext) -> Result<()> {
        match self.operation {
            GitOperation::Clone => self.do_clone(ctx).await,
            GitOperation::Fetch => self.do_fetch(ctx).await,
            GitOperation::Checkout => self.do_checkout(ctx).await,
            GitOperation::Pull => self.do_pull(ctx).await,
        }
    }

    /// Executes a git clone operation.
    async fn do_clone(&self, ctx: &ToolContext) -> Result<()> {
        let url = self
            .url
            .as_ref()
            .context("GitTool: url is required for clone")?;
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for clone")?;

        if ctx.is_dry_run() {
            info!(
                url = %url,
                path = %path.display(),
                branch = ?self.branch,
                "[dry-run] Would clone repository"
            );
            return Ok(());
        }

        let mut builder = git_builder()?.arg("clone");

        if let Some(ref branch) = self.branch {
            builder = builder.arg("--branch").arg(branch);
        }

        builder = builder.arg(url).arg(path);

        debug!(url = %url, path = %path.display(), "Cloning repository");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CloneFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("git clone was interrupted");
        }

        info!(url = %url, path = %path.display(), "Repository cloned");

        Ok(())
    }

    /// Executes a git fetch operation against origin.
    async fn do_fetch(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for fetch")?;

        if ctx.is_dry_run() {
            info!(path = %path.display(), "[dry-run] Would fetch from origin");
            return Ok(());
        }

        let builder = git_builder()?
            .arg("fetch")
            .arg("--quiet")
            .arg("origin")
            .cwd(path);

        debug!(path = %path.display(), "Fetching from origin");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CommandFailed {
                command: "git fetch".to_string(),
                message: e.to_string(),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("git fetch was interrupted");
        }

        debug!(path = %path.display(), "Fetched");

        Ok(())
    }

    /// Executes a git checkout operation.
    async fn do_checkout(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for checkout")?;
        let target = self
            .target
            .as_ref()
            .context("GitTool: target is required for checkout")?;

        if ctx.is_dry_run() {
            info!(path = %path.display(), target, "[dry-run] Would checkout");
            return Ok(());
        }

        let builder = git_builder()?
            .arg("-c")
            .arg("advice.detachedHead=false")
            .arg("checkout")
            .arg("-q")
            .arg(target)
            .cwd(path);

        debug!(path = %path.display(), target, "Checking out");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CheckoutFailed {
                what: target.clone(),
                message: e.to_string(),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("git checkout was interrupted");
        }

        debug!(path = %path.display(), target, "Checked out");

        Ok(())
    }

    /// Executes a git pull operation against origin.
    async fn do_pull(&self, ctx: &ToolContext) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .context("GitTool: path is required for pull")?;

        if ctx.is_dry_run() {
            info!(
                path = %path.display(),
                branch = ?self.branch,
                "[dry-run] Would pull from origin"
            );
            return Ok(());
        }

        let mut builder = git_builder()?.arg("pull").arg("--quiet").arg("origin");

        if let Some(ref branch) = self.branch {
            builder = builder.arg(branch);
        }

        builder = builder.cwd(path);

        debug!(path = %path.display(), "Pulling from origin");

        let output = builder
            .run_with_cancellation(ctx.cancel_token().clone())
            .await
            .map_err(|e| GitError::CommandFailed {
                command: "git pull".to_string(),
                message: e.to_string(),
            })?;

        if output.is_interrupted() {
            anyhow::bail!("git pull was interrupted");
        }

        debug!(path = %path.display(), "Pulled");

        Ok(())
    }
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Base builder for every git invocation: resolved binary, non-interactive
/// env, bounded timeout, output both logged and kept for error reporting.
fn git_builder() -> Result<ProcessBuilder> {
    let builder = ProcessBuilder::which("git")
        .context("git executable not found")?
        .env("GCM_INTERACTIVE", "never")
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdout_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
        .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
        .timeout(TOOL_TIMEOUT);
    Ok(builder)
}
