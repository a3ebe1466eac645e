// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bundle assembly.
//!
//! Stages every module asset plus the shared companion files into a
//! temporary tree and archives it:
//!
//! ```text
//! <bundle_name>_<version '.' → '_'>/        bundle folder (archive root)
//!   <bundle_name>_content/                  content folder
//!     Factorio.jkm
//!     launcher.exe
//!     mods/
//!       mod-list.json
//!       <module dir>/ or <module>_<ver>.zip
//! ```
//!
//! The staging root is a `TempDir`, so it is removed on success and on
//! every failure path. Directory entries are walked in sorted order, so
//! identical inputs produce an identical archive member layout.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::config::types::Module;
use crate::error::{BundleError, Result};
use crate::release::assets::Asset;

/// Screen-reader key map shipped next to the mods.
pub const JKM_NAME: &str = "Factorio.jkm";

/// Accessible launcher shipped next to the mods.
pub const LAUNCHER_NAME: &str = "launcher.exe";

/// Returns the bundle base name for the main module.
///
/// Beta builds are marked in the name so testers cannot mistake a
/// prerelease bundle for a stable one.
#[must_use]
pub fn bundle_name(main_module: &Module) -> String {
    if main_module.beta {
        format!("{}_beta", main_module.name)
    } else {
        main_module.name.clone()
    }
}

/// Stages and archives one release bundle.
#[derive(Debug)]
pub struct BundleAssembler<'a> {
    /// Modules in declaration order; decides the copy order into `mods/`.
    pub modules: &'a [&'a Module],
    /// Discovered asset per module name.
    pub assets: &'a BTreeMap<String, Asset>,
    /// Companion files placed directly in the content folder.
    pub companions: &'a [PathBuf],
    /// Previously generated mod-list.json.
    pub mod_list: &'a Path,
    /// Directory the final archive is written to.
    pub out_dir: &'a Path,
    /// Base name, usually the main module's name plus an optional `_beta`.
    pub bundle_name: &'a str,
    /// Dotted version of the main module.
    pub version: &'a str,
}

impl BundleAssembler<'_> {
    /// Fixed-name folder holding mods and companions inside the bundle.
    #[must_use]
    pub fn content_folder(&self) -> String {
        format!("{}_content", self.bundle_name)
    }

    /// Top-level folder inside the archive; dots in the version would
    /// read as file extensions, so they become underscores here.
    #[must_use]
    pub fn bundle_folder(&self) -> String {
        format!("{}_{}", self.bundle_name, self.version.replace('.', "_"))
    }

    /// File name of the final archive, with the dotted version.
    #[must_use]
    pub fn archive_name(&self) -> String {
        format!("{}_{}.zip", self.bundle_name, self.version)
    }

    /// Stages all inputs and writes the archive into `out_dir`.
    ///
    /// Returns the path of the created archive.
    ///
    /// # Errors
    ///
    /// Returns an error if an asset or companion file is missing, or any
    /// copy or archive operation fails. Partial bundles are never left
    /// behind; the staging directory is always discarded.
    pub async fn assemble(&self) -> Result<PathBuf> {
        let staging = TempDir::new().context("failed to create bundle staging directory")?;
        let bundle_folder = self.bundle_folder();
        let content_dir = staging.path().join(&bundle_folder).join(self.content_folder());
        let mods_dir = content_dir.join("mods");

        tokio::fs::create_dir_all(&mods_dir)
            .await
            .with_context(|| format!("failed to create {}", mods_dir.display()))?;
        debug!(path = %staging.path().display(), "Staging bundle");

        for module in self.modules {
            let asset = self
                .assets
                .get(&module.name)
                .ok_or_else(|| BundleError::MissingAsset(module.name.clone()))?;
            let target = asset.copy_into(&mods_dir).await?;
            debug!(
                module = module.name,
                target = %target.display(),
                "Asset staged"
            );
        }

        copy_file_into(self.mod_list, &mods_dir).await?;
        for companion in self.companions {
            if !companion.is_file() {
                return Err(BundleError::CompanionMissing {
                    name: file_name_of(companion),
                    path: companion.display().to_string(),
                }
                .into());
            }
            copy_file_into(companion, &content_dir).await?;
        }

        tokio::fs::create_dir_all(self.out_dir)
            .await
            .with_context(|| format!("failed to create {}", self.out_dir.display()))?;
        let archive_path = self.out_dir.join(self.archive_name());
        zip_tree(staging.path(), &archive_path)?;

        info!(path = %archive_path.display(), "Release bundle created");
        Ok(archive_path)
    }
}

/// Copies a single file into `dir`, keeping its name.
async fn copy_file_into(file: &Path, dir: &Path) -> Result<PathBuf> {
    let target = dir.join(file.file_name().with_context(|| {
        format!("path has no file name: {}", file.display())
    })?);
    tokio::fs::copy(file, &target)
        .await
        .with_context(|| format!("failed to copy {} to {}", file.display(), target.display()))?;
    Ok(target)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Archives everything under `root` into a zip at `archive_path`.
///
/// Members are named relative to `root` and added in sorted order per
/// directory, so the layout is reproducible.
fn zip_tree(root: &Path, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path)
        .with_context(|| format!("failed to create {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    add_dir_entries(&mut zip, root, root, options)?;

    zip.finish().map_err(BundleError::Zip)?;
    Ok(())
}

fn add_dir_entries(
    zip: &mut ZipWriter<File>,
    dir: &Path,
    root: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("failed to read entry in {}", dir.display()))?;
    entries.sort();

    for path in entries {
        let rel = path
            .strip_prefix(root)
            .with_context(|| format!("path escapes staging root: {}", path.display()))?;
        let name = rel.to_string_lossy().replace('\\', "/");

        if path.is_dir() {
            zip.add_directory(format!("{name}/"), options)
                .map_err(BundleError::Zip)?;
            add_dir_entries(zip, &path, root, options)?;
        } else {
            zip.start_file(name, options).map_err(BundleError::Zip)?;
            let mut content = File::open(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            std::io::copy(&mut content, zip)
                .with_context(|| format!("failed to archive {}", path.display()))?;
        }
    }

    Ok(())
}
