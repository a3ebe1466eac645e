// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Publish command: attach a bundle archive to a GitHub release.


use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::publish::PublishArgs;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::hub::{HubClient, Release, RepoRef};

/// Runs the publish command.
///
/// Finds or creates the release tagged for the bundle on the main
/// module's repository and uploads the archive, replacing any asset of
/// the same name.
///
/// # Errors
///
/// Returns an error if the archive does not exist, the main module is
/// not declared, its repository URL does not parse, or any API call
/// fails.
pub async fn run_publish_command(args: &PublishArgs, config: &Config, dry_run: bool) -> Result<()> {
    if !args.zip.is_file() {
        anyhow::bail!("bundle archive not found: {}", args.zip.display());
    }

    let stem = args
        .zip
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("archive path has no file stem: {}", args.zip.display()))?;
    let tag = args.tag.clone().unwrap_or_else(|| tag_from_stem(&stem));

    let main = config
        .main_module()
        .ok_or_else(|| ConfigError::UnknownModule(config.settings.main_module.clone()))?;
    let repo = RepoRef::parse(&main.repo)?;

    if dry_run {
        info!(
            zip = %args.zip.display(),
            repo = %repo,
            tag,
            "[dry-run] Would publish release"
        );
        return Ok(());
    }

    let hub = HubClient::new(args.token.clone());
    let release = get_or_create_release(&hub, &repo, &tag, args.prerelease).await?;
    replace_asset(&hub, &repo, &release, &args.zip).await?;

    info!(
        tag,
        url = release.html_url.as_deref().unwrap_or_default(),
        "Release published"
    );
    Ok(())
}

/// Derives the release tag from the archive stem.
///
/// `FactorioAccess_3.0.1` tags as `3.0.1`. A stem without a version
/// suffix falls back to `vlatest`, matching ad-hoc uploads of
/// unversioned archives.
fn tag_from_stem(stem: &str) -> String {
    match stem.rsplit_once('_') {
        Some((_, version)) if !version.is_empty() => version.to_string(),
        _ => "vlatest".to_string(),
    }
}

async fn get_or_create_release(
    hub: &HubClient,
    repo: &RepoRef,
    tag: &str,
    prerelease: bool,
) -> Result<Release> {
    if let Some(release) = hub.release_by_tag(repo, tag).await? {
        info!(tag, "Using existing release");
        return Ok(release);
    }

    hub.create_release(
        repo,
        tag,
        &format!("Release {tag}"),
        &format!("Automated release for {tag}"),
        prerelease,
    )
    .await
}

/// Uploading over an existing asset name is rejected by GitHub, so any
/// previous asset with the bundle's name goes first.
async fn replace_asset(
    hub: &HubClient,
    repo: &RepoRef,
    release: &Release,
    zip: &Path,
) -> Result<()> {
    let name = zip
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("archive path has no file name: {}", zip.display()))?;

    if let Some(existing) = release.asset_named(&name) {
        hub.delete_asset(repo, existing).await?;
    }

    let uploaded = hub.upload_asset(release, zip).await?;
    info!(asset = uploaded.name, "Asset uploaded");
    Ok(())
}
