// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package command: turn module checkouts into versioned mod zips.

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::release::PackageArgs;
use crate::config::types::Module;
use crate::config::Config;
use crate::error::Result;
use crate::release::dest::{absolutize, resolve_base, resolve_dest, ResolveContext};
use crate::tools::fmtk::FmtkTool;
use crate::tools::ToolContext;

/// Result of packaging one module.
#[derive(Debug)]
pub struct PackageOutcome {
    pub module: String,
    pub result: Result<()>,
}

impl PackageOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Runs the package command.
///
/// Invokes `fmtk package` for every selected module checkout and drops
/// the resulting `<name>_<version>.zip` files into the output directory.
/// The batch continues past per-module failures; the caller maps the
/// returned outcomes to an exit code.
///
/// # Errors
///
/// Returns an error if a named module is not declared, or the output
/// directory cannot be created. Per-module packaging failures are
/// reported through the outcome list instead.
pub async fn run_package_command(
    args: &PackageArgs,
    config: &Config,
    dry_run: bool,
) -> Result<Vec<PackageOutcome>> {
    let modules = config.selected_modules(args.module.as_deref())?;
    let resolve =
        ResolveContext::new(&config.settings.default_dest).with_global_dest(args.source.as_deref());

    let out_dir = resolve_out_dir(args.outdir.as_deref(), &resolve)?;
    tokio::fs::create_dir_all(&out_dir)
        .await
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;

    let cancel_token = CancellationToken::new();
    let ctx = ToolContext::new(cancel_token.clone(), dry_run);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting tasks...");
            cancel_token.cancel();
        }
    });

    info!(
        count = modules.len(),
        outdir = %out_dir.display(),
        "Packaging modules"
    );

    let mut outcomes = Vec::with_capacity(modules.len());
    for module in modules {
        if ctx.is_cancelled() {
            warn!("Packaging cancelled, skipping remaining modules");
            break;
        }

        let result = package_module(module, &resolve, &out_dir, &ctx).await;
        if let Err(error) = &result {
            error!(module = module.name, "Packaging failed: {:#}", error);
        }
        outcomes.push(PackageOutcome {
            module: module.name.clone(),
            result,
        });
    }

    report_outcomes(&outcomes);
    Ok(outcomes)
}

/// `-o` wins over the source base. Both forms come out absolute so the
/// fmtk wrapper can rebase `--outdir` against the module checkout.
fn resolve_out_dir(outdir: Option<&Path>, resolve: &ResolveContext<'_>) -> Result<PathBuf> {
    match outdir {
        Some(dir) => absolutize(dir),
        None => resolve_base(resolve),
    }
}

async fn package_module(
    module: &Module,
    resolve: &ResolveContext<'_>,
    out_dir: &Path,
    ctx: &ToolContext,
) -> Result<()> {
    let source = resolve_dest(module, resolve)?;
    if !source.is_dir() {
        anyhow::bail!(
            "module checkout not found at {} (run fetch first)",
            source.display()
        );
    }

    FmtkTool::new()
        .source_dir(&source)
        .out_dir(out_dir)
        .package_op()
        .run(ctx)
        .await
}

fn report_outcomes(outcomes: &[PackageOutcome]) {
    let failed: Vec<&str> = outcomes
        .iter()
        .filter(|outcome| outcome.is_failure())
        .map(|outcome| outcome.module.as_str())
        .collect();

    if failed.is_empty() {
        info!(count = outcomes.len(), "All modules packaged");
    } else {
        warn!(
            ok = outcomes.len() - failed.len(),
            failed = failed.join(", "),
            "Packaging finished with failures"
        );
    }
}
