// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetch command: bring module working copies to their configured state.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::release::FetchArgs;
use crate::config::Config;
use crate::error::Result;
use crate::release::dest::ResolveContext;
use crate::release::sync::{sync_all, SyncOutcome};
use crate::tools::ToolContext;

/// Runs the fetch command.
///
/// Clones or updates the selected modules under the work directory and
/// validates each manifest. The batch continues past per-module
/// failures; the caller maps the returned outcomes to an exit code.
///
/// # Errors
///
/// Returns an error if a named module is not declared in the
/// configuration. Sync failures do not abort the batch and are reported
/// through the outcome list instead.
pub async fn run_fetch_command(
    args: &FetchArgs,
    config: &Config,
    dry_run: bool,
) -> Result<Vec<SyncOutcome>> {
    let modules = config.selected_modules(args.module.as_deref())?;
    let resolve =
        ResolveContext::new(&config.settings.default_dest).with_global_dest(args.dest.as_deref());

    let cancel_token = CancellationToken::new();
    let ctx = ToolContext::new(cancel_token.clone(), dry_run);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting tasks...");
            cancel_token.cancel();
        }
    });

    info!(count = modules.len(), "Fetching modules");
    let outcomes = sync_all(&modules, config, &resolve, &ctx).await;

    report_outcomes(&outcomes);
    Ok(outcomes)
}

fn report_outcomes(outcomes: &[SyncOutcome]) {
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| outcome.is_failure())
        .map(|outcome| outcome.module.as_str())
        .collect();

    if failed.is_empty() {
        info!(count = outcomes.len(), "All modules fetched");
    } else {
        warn!(
            ok = outcomes.len() - failed.len(),
            failed = failed.join(", "),
            "Fetch finished with failures"
        );
    }
}
