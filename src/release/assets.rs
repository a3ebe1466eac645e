// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Asset discovery and validation.
//!
//! An asset is what a module contributes to the bundle: either its
//! working copy as a directory (`bundle_zip = false`) or a packaged
//! `<name>_<version>.zip` produced by `fmtk package`
//! (`bundle_zip = true`).
//!
//! Zip discovery is deliberately strict. `<name>_*.zip` also matches
//! leftovers from older versions, so every candidate's embedded
//! info.json is validated and exactly one survivor is required.
//! Stale or foreign zips in the work directory must never end up in a
//! release by accident.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{info, warn};

use crate::config::types::Module;
use crate::error::{AssetError, Result};
use crate::manifest;
use crate::utility::fs::copy::{copy_dir_contents_async, VCS_DIRS};
use crate::utility::fs::walk::{find_files, WalkOptions};

/// One module's contribution to a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Asset {
    /// Unpacked working copy, copied as a directory tree.
    Directory(PathBuf),
    /// Packaged mod zip, copied as a single file.
    Archive(PathBuf),
}

impl Asset {
    /// Path of the underlying directory or archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }

    /// Final path component, used as the name inside the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset path has no final component.
    pub fn file_name(&self) -> Result<&OsStr> {
        self.path()
            .file_name()
            .with_context(|| format!("asset path has no file name: {}", self.path().display()))
    }

    /// Copies the asset into `dest_dir`, keeping its name.
    ///
    /// Directories are deep-copied without `.git`; archives are copied as
    /// single files. Returns the path created under `dest_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if any filesystem operation fails.
    pub async fn copy_into(&self, dest_dir: &Path) -> Result<PathBuf> {
        let target = dest_dir.join(self.file_name()?);
        match self {
            Self::Directory(src) => {
                copy_dir_contents_async(src, &target, VCS_DIRS).await?;
            }
            Self::Archive(src) => {
                tokio::fs::copy(src, &target).await.with_context(|| {
                    format!(
                        "failed to copy {} to {}",
                        src.display(),
                        target.display()
                    )
                })?;
            }
        }
        Ok(target)
    }
}

/// Finds and validates the asset for one module under `search_root`.
///
/// # Errors
///
/// Returns [`AssetError::Missing`] when nothing valid is found,
/// [`AssetError::Ambiguous`] when several packaged zips validate, or a
/// manifest error when a directory asset fails validation.
pub fn discover_asset(module: &Module, search_root: &Path) -> Result<Asset> {
    if module.bundle_zip {
        discover_archive(module, search_root)
    } else {
        discover_directory(module, search_root)
    }
}

/// Discovers assets for every module, keyed by module name.
///
/// # Errors
///
/// Fails on the first module whose asset is missing, invalid or
/// ambiguous. Bundling needs all of them, so there is no partial result.
pub fn discover_assets(modules: &[&Module], search_root: &Path) -> Result<BTreeMap<String, Asset>> {
    let mut assets = BTreeMap::new();
    for module in modules {
        let asset = discover_asset(module, search_root)?;
        info!(
            module = module.name,
            path = %asset.path().display(),
            "Asset discovered"
        );
        assets.insert(module.name.clone(), asset);
    }
    Ok(assets)
}

fn discover_directory(module: &Module, search_root: &Path) -> Result<Asset> {
    let dir = search_root.join(&module.name);
    if !dir.is_dir() {
        return Err(AssetError::Missing {
            module: module.name.clone(),
            search_root: search_root.display().to_string(),
        }
        .into());
    }
    manifest::validate_mod(&module.name, &dir)?;
    Ok(Asset::Directory(dir))
}

fn discover_archive(module: &Module, search_root: &Path) -> Result<Asset> {
    let missing = || AssetError::Missing {
        module: module.name.clone(),
        search_root: search_root.display().to_string(),
    };

    if !search_root.is_dir() {
        return Err(missing().into());
    }

    let pattern = format!("{}_*.zip", module.name);
    let mut candidates = find_files(search_root, &pattern, &WalkOptions::for_flat_scan())?;
    // The parallel walk returns arbitrary order.
    candidates.sort();

    let mut survivors = Vec::new();
    for candidate in candidates {
        match manifest::validate_mod(&module.name, &candidate) {
            Ok(_) => survivors.push(candidate),
            Err(error) => {
                warn!(
                    path = %candidate.display(),
                    "Skipping zip that does not validate: {:#}",
                    error
                );
            }
        }
    }

    match survivors.len() {
        0 => Err(missing().into()),
        1 => Ok(Asset::Archive(survivors.remove(0))),
        _ => Err(AssetError::Ambiguous {
            module: module.name.clone(),
            candidates: survivors
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
        }
        .into()),
    }
}
