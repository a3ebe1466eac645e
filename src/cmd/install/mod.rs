// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install command: copy staged release assets into a Factorio data
//! directory for local testing.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::install::InstallArgs;
use crate::config::Config;
use crate::error::Result;
use crate::release::assets::{discover_assets, Asset};
use crate::release::bundle::LAUNCHER_NAME;
use crate::release::dest::{absolutize, resolve_base, ResolveContext};
use crate::release::modlist::MOD_LIST_NAME;
use crate::utility::fs::copy::remove_entry_async;

/// Runs the install command.
///
/// Copies every module asset plus the mod list into `<data-dir>/mods`
/// and the launcher next to it, replacing whatever a previous install
/// left behind. Expects a staged work directory, normally produced by
/// fetch, package and bundle.
///
/// # Errors
///
/// Returns an error if any asset is missing or ambiguous, or a copy
/// into the data directory fails.
pub async fn run_install_command(args: &InstallArgs, config: &Config, dry_run: bool) -> Result<()> {
    let modules = config.selected_modules(None)?;
    let resolve =
        ResolveContext::new(&config.settings.default_dest).with_global_dest(args.source.as_deref());
    let search_root = resolve_base(&resolve)?;
    let data_dir = absolutize(&args.data_dir)?;

    let assets = discover_assets(&modules, &search_root)?;
    let mods_dir = data_dir.join("mods");

    if dry_run {
        for (name, asset) in &assets {
            info!(
                module = name,
                from = %asset.path().display(),
                to = %mods_dir.display(),
                "[dry-run] Would install asset"
            );
        }
        info!(
            data_dir = %data_dir.display(),
            "[dry-run] Would copy the mod list and launcher"
        );
        return Ok(());
    }

    tokio::fs::create_dir_all(&mods_dir)
        .await
        .with_context(|| format!("failed to create {}", mods_dir.display()))?;

    install_assets(&assets, &mods_dir).await?;
    copy_into_dir(&search_root.join(MOD_LIST_NAME), &mods_dir).await?;
    copy_into_dir(&search_root.join(LAUNCHER_NAME), &data_dir).await?;

    info!(data_dir = %data_dir.display(), "Installation complete");
    Ok(())
}

/// Replaces whatever sits at each target so files from an older version
/// never linger in the game's mods directory.
async fn install_assets(assets: &BTreeMap<String, Asset>, mods_dir: &Path) -> Result<()> {
    for (name, asset) in assets {
        let target = mods_dir.join(asset.file_name()?);
        remove_entry_async(&target).await?;
        let installed = asset.copy_into(mods_dir).await?;
        info!(module = name, target = %installed.display(), "Installed");
    }
    Ok(())
}

async fn copy_into_dir(src: &Path, dest_dir: &Path) -> Result<()> {
    let file_name = src
        .file_name()
        .with_context(|| format!("source path has no file name: {}", src.display()))?;
    let target = dest_dir.join(file_name);
    tokio::fs::copy(src, &target)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), target.display()))?;
    Ok(())
}
