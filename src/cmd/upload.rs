// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Upload command: push the packaged main module to the mod portal.

use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::release::assets::discover_asset;
use crate::release::dest::{resolve_base, ResolveContext};
use crate::tools::fmtk::FmtkTool;
use crate::tools::ToolContext;

/// Runs the upload command.
///
/// Finds the packaged zip of the main module in the work directory and
/// hands it to `fmtk upload`. Portal credentials come from fmtk's own
/// configuration.
///
/// # Errors
///
/// Returns an error if the main module is not declared, no unique
/// packaged zip is found, or the upload itself fails.
pub async fn run_upload_command(config: &Config, dry_run: bool) -> Result<()> {
    let main = config
        .main_module()
        .ok_or_else(|| ConfigError::UnknownModule(config.settings.main_module.clone()))?;

    // The portal only takes packaged zips, so discovery ignores how the
    // module is configured for bundling.
    let mut module = main.clone();
    module.bundle_zip = true;

    let base = resolve_base(&ResolveContext::new(&config.settings.default_dest))?;
    let asset = discover_asset(&module, &base)?;
    let zip_name = Path::new(asset.file_name()?);

    info!(
        module = module.name,
        zip = %zip_name.display(),
        "Found packaged zip"
    );

    let cancel_token = CancellationToken::new();
    let ctx = ToolContext::new(cancel_token.clone(), dry_run);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Received Ctrl+C, interrupting tasks...");
            cancel_token.cancel();
        }
    });

    FmtkTool::new()
        .zip(zip_name)
        .mod_name(&module.name)
        .cwd(&base)
        .upload_op()
        .run(&ctx)
        .await
}
