// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository sync engine.
//!
//! Split into a pure planner and an effectful executor so the decision
//! logic is testable without a network:
//!
//! ```text
//! observe_state          what is on disk right now
//!   → plan_sync          what should happen (pure)
//!     → execute_plan     git clone / fetch / checkout / pull
//!       → validate_mod   info.json name check + version report
//! ```
//!
//! A destination that exists but is not a working copy, or whose remotes
//! point somewhere unexpected, is never touched. The operator resolves
//! those by hand; everything else is driven to the configured state.

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::types::Module;
use crate::config::Config;
use crate::error::{GitError, Result};
use crate::git::query;
use crate::git::remote::remote_matches;
use crate::manifest::{self, ModInfo};
use crate::release::dest::{resolve_dest, ResolveContext};
use crate::tools::git::GitTool;
use crate::tools::ToolContext;

/// Observed on-disk state of a module destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoState {
    /// Nothing exists at the destination.
    Absent,
    /// The destination exists but git discovery fails there.
    NotAWorkingCopy,
    /// A working copy whose remotes include the configured URL.
    Matching { update_enabled: bool },
    /// A working copy pointing at a different repository.
    RemoteMismatch { found: Vec<String> },
}

/// What the executor should do to reach the configured state.
#[derive(Debug)]
pub enum SyncPlan {
    /// Clone fresh, then pin to `commit` if given.
    Clone {
        branch: Option<String>,
        commit: Option<String>,
    },
    /// Fetch, follow `branch` if given, then pin to `commit` if given.
    Update {
        branch: Option<String>,
        commit: Option<String>,
    },
    /// Leave the working copy alone; updates are disabled for this module.
    SkipUpdate,
    /// The destination cannot be synced safely.
    Fail(GitError),
}

/// Result of syncing one module.
#[derive(Debug)]
pub struct SyncOutcome {
    pub module: String,
    /// `Ok(None)` only in dry-run mode when nothing exists to validate.
    pub result: Result<Option<ModInfo>>,
}

impl SyncOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Inspects the destination directory and classifies it.
///
/// # Errors
///
/// Returns an error if the remotes of an existing working copy cannot be
/// listed.
pub fn observe_state(module: &Module, dest: &Path, update_enabled: bool) -> Result<RepoState> {
    if !dest.exists() {
        return Ok(RepoState::Absent);
    }
    if !query::is_git_repo(dest) {
        return Ok(RepoState::NotAWorkingCopy);
    }

    let found = query::remote_urls(dest)?;
    if remote_matches(&module.repo, &found) {
        Ok(RepoState::Matching { update_enabled })
    } else {
        Ok(RepoState::RemoteMismatch { found })
    }
}

/// Decides what to do for `module` given the observed `state`.
#[must_use]
pub fn plan_sync(state: RepoState, module: &Module, dest: &Path) -> SyncPlan {
    match state {
        RepoState::Absent => SyncPlan::Clone {
            branch: module.branch.clone(),
            commit: module.commit.clone(),
        },
        RepoState::NotAWorkingCopy => SyncPlan::Fail(GitError::NotAWorkingCopy {
            path: dest.display().to_string(),
        }),
        RepoState::RemoteMismatch { found } => SyncPlan::Fail(GitError::RemoteMismatch {
            path: dest.display().to_string(),
            expected: module.repo.clone(),
            found,
        }),
        RepoState::Matching {
            update_enabled: false,
        } => SyncPlan::SkipUpdate,
        RepoState::Matching {
            update_enabled: true,
        } => SyncPlan::Update {
            branch: module.branch.clone(),
            commit: module.commit.clone(),
        },
    }
}

/// Runs a plan against the working copy at `dest`.
///
/// # Errors
///
/// Returns an error if any underlying git operation fails, or the plan
/// itself is a failure.
pub async fn execute_plan(
    plan: SyncPlan,
    module: &Module,
    dest: &Path,
    ctx: &ToolContext,
) -> Result<()> {
    match plan {
        SyncPlan::Clone { branch, commit } => {
            info!(module = module.name, url = module.repo, "Cloning module");
            let mut tool = GitTool::new().clone_op().url(&module.repo).path(dest);
            if let Some(branch) = branch {
                tool = tool.branch(branch);
            }
            tool.run(ctx).await?;

            if let Some(commit) = commit {
                checkout(dest, &commit, ctx).await?;
            }
            Ok(())
        }
        SyncPlan::Update { branch, commit } => {
            info!(module = module.name, "Updating module");
            GitTool::new().fetch_op().path(dest).run(ctx).await?;

            if let Some(branch) = branch {
                checkout(dest, &branch, ctx).await?;
                GitTool::new()
                    .pull_op()
                    .path(dest)
                    .branch(branch)
                    .run(ctx)
                    .await?;
            }
            // A pinned commit wins over the branch tip.
            if let Some(commit) = commit {
                checkout(dest, &commit, ctx).await?;
            }
            Ok(())
        }
        SyncPlan::SkipUpdate => {
            info!(module = module.name, "Skipping update (disabled in config)");
            Ok(())
        }
        SyncPlan::Fail(error) => Err(error.into()),
    }
}

/// Syncs one module end to end and validates its manifest.
///
/// # Errors
///
/// Returns an error if observation, any git operation, or manifest
/// validation fails.
pub async fn sync_module(
    module: &Module,
    dest: &Path,
    update_enabled: bool,
    ctx: &ToolContext,
) -> Result<Option<ModInfo>> {
    let state = observe_state(module, dest, update_enabled)?;
    let plan = plan_sync(state, module, dest);
    execute_plan(plan, module, dest, ctx).await?;

    if ctx.is_dry_run() && !dest.is_dir() {
        info!(
            module = module.name,
            "[dry-run] Nothing on disk yet, skipping manifest validation"
        );
        return Ok(None);
    }

    let info = manifest::validate_mod(&module.name, dest)?;
    info!(module = info.name, version = info.version, "Module ready");
    Ok(Some(info))
}

/// Syncs a batch of modules, continuing past per-module failures.
///
/// Destinations are resolved through `resolve`; each module yields one
/// [`SyncOutcome`]. Cancellation stops the batch between modules.
pub async fn sync_all(
    modules: &[&Module],
    config: &Config,
    resolve: &ResolveContext<'_>,
    ctx: &ToolContext,
) -> Vec<SyncOutcome> {
    let mut outcomes = Vec::with_capacity(modules.len());

    for module in modules {
        if ctx.is_cancelled() {
            warn!("Sync cancelled, skipping remaining modules");
            break;
        }

        let result = sync_one(module, config, resolve, ctx).await;
        if let Err(error) = &result {
            error!(module = module.name, "Sync failed: {:#}", error);
        }
        outcomes.push(SyncOutcome {
            module: module.name.clone(),
            result,
        });
    }

    outcomes
}

async fn sync_one(
    module: &Module,
    config: &Config,
    resolve: &ResolveContext<'_>,
    ctx: &ToolContext,
) -> Result<Option<ModInfo>> {
    let dest = resolve_dest(module, resolve)?;
    sync_module(module, &dest, config.update_enabled(module), ctx).await
}

async fn checkout(dest: &Path, target: &str, ctx: &ToolContext) -> Result<()> {
    GitTool::new()
        .checkout_op()
        .path(dest)
        .target(target)
        .run(ctx)
        .await
}
