// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bundle command: stage mods and companion files into one release zip.

#[cfg(test)]
mod tests;

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::release::BundleArgs;
use crate::config::Config;
use crate::error::{ConfigError, NetworkError, Result};
use crate::hub::{HubClient, RepoRef};
use crate::manifest;
use crate::release::assets::discover_assets;
use crate::release::bundle::{bundle_name, BundleAssembler, JKM_NAME, LAUNCHER_NAME};
use crate::release::dest::{absolutize, resolve_base, resolve_dest, ResolveContext};
use crate::release::modlist::{ModList, MOD_LIST_NAME};

/// Runs the bundle command.
///
/// Collects every module's asset plus the key map and launcher, writes
/// the mod list, and archives the lot as `<bundle>_<version>.zip`.
/// Missing companion files are fetched from the launcher repository.
///
/// # Errors
///
/// Returns an error if any asset is missing or ambiguous, a required
/// companion download fails, the main module's version cannot be read,
/// or staging and archiving fail.
pub async fn run_bundle_command(args: &BundleArgs, config: &Config, dry_run: bool) -> Result<()> {
    let modules = config.selected_modules(None)?;
    let main = config
        .main_module()
        .ok_or_else(|| ConfigError::UnknownModule(config.settings.main_module.clone()))?;

    let resolve =
        ResolveContext::new(&config.settings.default_dest).with_global_dest(args.source.as_deref());
    let search_root = resolve_base(&resolve)?;
    let out_dir = match args.out_dir.as_deref() {
        Some(dir) => absolutize(dir)?,
        None => search_root.clone(),
    };

    let assets = discover_assets(&modules, &search_root)?;

    // The bundle carries the dotted version of the main module, read
    // from its checkout rather than a packaged zip so beta work in
    // progress names the bundle it actually produces.
    let version = manifest::mod_version(&resolve_dest(main, &resolve)?)?;
    let name = bundle_name(main);

    let companions = [search_root.join(JKM_NAME), search_root.join(LAUNCHER_NAME)];
    let mod_list_path = search_root.join(MOD_LIST_NAME);

    let assembler = BundleAssembler {
        modules: &modules,
        assets: &assets,
        companions: &companions,
        mod_list: &mod_list_path,
        out_dir: &out_dir,
        bundle_name: &name,
        version: &version,
    };

    if dry_run {
        report_dry_run(&assembler);
        return Ok(());
    }

    ensure_companions(config, &companions[0], &companions[1], args.token.as_deref()).await?;

    ModList::for_modules(&modules)
        .write_to(&mod_list_path)
        .await?;

    let archive = assembler.assemble().await?;
    info!(path = %archive.display(), "Bundle created");
    println!("{}", archive.display());
    Ok(())
}

fn report_dry_run(assembler: &BundleAssembler<'_>) {
    for companion in assembler.companions {
        if companion.is_file() {
            info!(file = %companion.display(), "[dry-run] Companion file present");
        } else {
            info!(
                file = %companion.display(),
                "[dry-run] Would download companion file"
            );
        }
    }
    info!(
        path = %assembler.mod_list.display(),
        "[dry-run] Would write the mod list"
    );
    info!(
        archive = assembler.archive_name(),
        outdir = %assembler.out_dir.display(),
        "[dry-run] Would create bundle"
    );
}

/// Makes sure the key map and launcher sit next to the staged mods,
/// downloading whichever is missing from the launcher repository.
async fn ensure_companions(
    config: &Config,
    jkm: &Path,
    launcher: &Path,
    token: Option<&str>,
) -> Result<()> {
    if jkm.is_file() && launcher.is_file() {
        info!("Companion files already exist, skipping download");
        return Ok(());
    }

    let repo = launcher_repo(config)?;
    let hub = HubClient::new(token.map(str::to_string));

    if jkm.is_file() {
        info!(file = JKM_NAME, "Already exists, skipping download");
    } else {
        info!(file = JKM_NAME, repo = %repo, "Downloading key map");
        let bytes = hub
            .get_contents(&repo, JKM_NAME, &config.settings.launcher_branch)
            .await?;
        tokio::fs::write(jkm, bytes)
            .await
            .with_context(|| format!("failed to write {}", jkm.display()))?;
    }

    if launcher.is_file() {
        info!(file = LAUNCHER_NAME, "Already exists, skipping download");
    } else {
        info!(file = LAUNCHER_NAME, repo = %repo, "Downloading launcher");
        let release = hub.latest_release(&repo).await?;
        let asset = release
            .asset_named(LAUNCHER_NAME)
            .ok_or_else(|| NetworkError::AssetNotFound {
                asset: LAUNCHER_NAME.to_string(),
                release: release.tag_name.clone(),
            })?;
        hub.download_asset(asset, launcher).await?;
    }

    Ok(())
}

/// The launcher repository may stay unset until a companion file
/// actually has to be fetched.
fn launcher_repo(config: &Config) -> Result<RepoRef> {
    if config.settings.launcher_repo.is_empty() {
        return Err(ConfigError::MissingSetting {
            key: "launcher_repo".to_string(),
        }
        .into());
    }
    RepoRef::parse(&config.settings.launcher_repo)
}
