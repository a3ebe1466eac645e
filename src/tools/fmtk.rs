// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! fmtk (Factorio Mod Tool Kit) wrapper.
//!
//! ```text
//! FmtkTool
//! Operations: Package | Upload
//!   package: fmtk package --outdir <rel>   (cwd = module source)
//!   upload:  fmtk upload <zip> <mod name>  (cwd = release workspace)
//! ```
//!
//! fmtk is an npm-distributed CLI; on Windows the entry point is the
//! `fmtk.cmd` shim. A non-zero exit is reported as a tool failure so batch
//! callers can log it and continue with the next module.

use std::path::{Path, PathBuf};

use crate::error::{ProcessError, Result};
use anyhow::Context;
use tracing::{debug, info};

use super::{TOOL_TIMEOUT, ToolContext};
use crate::core::process::builder::{ProcessBuilder, ProcessFlags, StreamFlags};

const FMTK_PROGRAM: &str = if cfg!(windows) { "fmtk.cmd" } else { "fmtk" };

/// fmtk tool for packaging and portal uploads.
///
/// # Example
///
/// ```ignore
/// FmtkTool::new()
///     .source_dir("./work/FactorioAccess")
///     .out_dir("./work")
///     .package_op()
///     .run(&ctx)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct FmtkTool {
    source_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    zip: Option<PathBuf>,
    mod_name: Option<String>,
    cwd: Option<PathBuf>,
    operation: FmtkOperation,
}

/// fmtk operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FmtkOperation {
    /// Package a module checkout into a versioned zip.
    #[default]
    Package,
    /// Upload a packaged zip to the mod portal.
    Upload,
}

impl FmtkTool {
    /// Creates a new `FmtkTool` with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source_dir: None,
            out_dir: None,
            zip: None,
            mod_name: None,
            cwd: None,
            operation: FmtkOperation::Package,
        }
    }

    #[must_use]
    pub fn source_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.source_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.out_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn zip(mut self, zip: impl AsRef<Path>) -> Self {
        self.zip = Some(zip.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn mod_name(mut self, name: impl Into<String>) -> Self {
        self.mod_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub const fn package_op(mut self) -> Self {
        self.operation = FmtkOperation::Package;
        self
    }

    #[must_use]
    pub const fn upload_op(mut self) -> Self {
        self.operation = FmtkOperation::Upload;
        self
    }

    /// Executes the configured operation.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::NonZeroExit` when fmtk reports failure, plus
    /// any error from spawning or interruption.
    pub async fn run(&self, ctx: &ToolContext) -> Result<()> {
        match self.operation {
            FmtkOperation::Package => self.do_package(ctx).await,
            FmtkOperation::Upload => self.do_upload(ctx).await,
        }
    }

    /// Runs `fmtk package --outdir <rel>` with cwd set to the module source.
    ///
    /// fmtk resolves `--outdir` against its working directory, so the
    /// destination is rebased relative to the source checkout (absolute when
    /// no relative form exists, e.g. across Windows drives).
    async fn do_package(&self, ctx: &ToolContext) -> Result<()> {
        let source_dir = self
            .source_dir
            .as_ref()
            .context("FmtkTool: source_dir is required for package")?;
        let out_dir = self
            .out_dir
            .as_ref()
            .context("FmtkTool: out_dir is required for package")?;

        let outdir_arg =
            pathdiff::diff_paths(out_dir, source_dir).unwrap_or_else(|| out_dir.clone());

        if ctx.is_dry_run() {
            info!(
                source = %source_dir.display(),
                outdir = %outdir_arg.display(),
                "[dry-run] Would package module"
            );
            return Ok(());
        }

        debug!(
            source = %source_dir.display(),
            outdir = %outdir_arg.display(),
            "Packaging module"
        );

        let builder = fmtk_builder()?
            .arg("package")
            .arg("--outdir")
            .arg(&outdir_arg)
            .cwd(source_dir);

        run_checked(builder, ctx, "fmtk package").await
    }

    /// Runs `fmtk upload <zip> <mod name>`.
    async fn do_upload(&self, ctx: &ToolContext) -> Result<()> {
        let zip = self
            .zip
            .as_ref()
            .context("FmtkTool: zip is required for upload")?;
        let mod_name = self
            .mod_name
            .as_ref()
            .context("FmtkTool: mod_name is required for upload")?;

        if ctx.is_dry_run() {
            info!(
                zip = %zip.display(),
                mod_name,
                "[dry-run] Would upload to the mod portal"
            );
            return Ok(());
        }

        info!(zip = %zip.display(), mod_name, "Uploading to the mod portal");

        let mut builder = fmtk_builder()?.arg("upload").arg(zip).arg(mod_name);
        if let Some(ref cwd) = self.cwd {
            builder = builder.cwd(cwd);
        }

        run_checked(builder, ctx, "fmtk upload").await
    }
}

impl Default for FmtkTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Base builder for every fmtk invocation.
fn fmtk_builder() -> Result<ProcessBuilder> {
    let builder = ProcessBuilder::which(FMTK_PROGRAM)
        .context("fmtk executable not found (npm install -g factoriomod-debug)")?
        .stdout_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
        .stderr_flags(StreamFlags::FORWARD_TO_LOG | StreamFlags::KEEP_IN_STRING)
        .flags(ProcessFlags::ALLOW_FAILURE)
        .timeout(TOOL_TIMEOUT);
    Ok(builder)
}

/// Runs the builder and converts a non-zero exit into a `ProcessError`.
async fn run_checked(builder: ProcessBuilder, ctx: &ToolContext, command: &str) -> Result<()> {
    let output = builder
        .run_with_cancellation(ctx.cancel_token().clone())
        .await?;

    if output.is_interrupted() {
        anyhow::bail!("{command} was interrupted");
    }

    if output.exit_code() != 0 {
        return Err(ProcessError::NonZeroExit {
            command: command.to_string(),
            code: output.exit_code(),
        }
        .into());
    }

    Ok(())
}
