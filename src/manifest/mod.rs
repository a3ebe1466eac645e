// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Module manifest (info.json) loading and validation.
//!
//! ```text
//! <checkout>/info.json              directory form
//! <Name_1.2.0.zip>/<stem>/info.json packaged form
//!          |
//!          v
//!      load_mod_info --> Option<ModInfo>   absent  -> None
//!          |                               corrupt -> ManifestError
//!          v
//!      validate_mod  --> ModInfo           name must match the config
//! ```
//!
//! Factorio requires a packaged mod's top-level folder to equal the archive
//! stem, so the packaged form is looked up at exactly `<stem>/info.json` and
//! nowhere else.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ManifestError, Result};


/// Parsed `info.json` contents.
///
/// Only the keys the release pipeline consumes are modeled; mods carry
/// plenty of others (dependencies, description) which are passed through
/// untouched inside the artifact itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModInfo {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub factorio_version: Option<String>,
}

/// Load `info.json` from a module checkout directory or a packaged zip.
///
/// Returns `Ok(None)` when the manifest is absent at its expected location;
/// that is a normal state for a freshly cloned repo that was never packaged.
///
/// # Errors
///
/// Returns `ManifestError::Malformed` for unreadable or unparseable
/// manifests and `ManifestError::NotAModule` when `path` is neither a
/// directory nor a file.
pub fn load_mod_info(path: &Path) -> Result<Option<ModInfo>> {
    if path.is_dir() {
        load_from_dir(path)
    } else if path.is_file() {
        load_from_zip(path)
    } else {
        Err(ManifestError::NotAModule {
            path: path.display().to_string(),
        }
        .into())
    }
}

fn load_from_dir(dir: &Path) -> Result<Option<ModInfo>> {
    let info_path = dir.join("info.json");
    if !info_path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&info_path).map_err(|e| ManifestError::Malformed {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;
    parse_info(&content, dir).map(Some)
}

fn load_from_zip(zip_path: &Path) -> Result<Option<ModInfo>> {
    let malformed = |message: String| ManifestError::Malformed {
        path: zip_path.display().to_string(),
        message,
    };

    let stem = zip_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| malformed("archive has no usable file name".to_string()))?;
    let entry_name = format!("{stem}/info.json");

    let file = std::fs::File::open(zip_path).map_err(|e| malformed(e.to_string()))?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| malformed(e.to_string()))?;

    let mut entry = match archive.by_name(&entry_name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(malformed(e.to_string()).into()),
    };

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| malformed(e.to_string()))?;
    parse_info(&content, zip_path).map(Some)
}

fn parse_info(content: &str, path: &Path) -> Result<ModInfo> {
    let info: ModInfo = serde_json::from_str(content).map_err(|e| ManifestError::Malformed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(info)
}

/// Load and validate a manifest against the configured module name.
///
/// The comparison is exact and case-sensitive: the in-game mod name is what
/// the portal and `mod-list.json` key on, so a drifted checkout is reported,
/// never "corrected".
///
/// # Errors
///
/// Returns `ManifestError::Missing` when no manifest exists and
/// `ManifestError::NameMismatch` when the declared name differs.
pub fn validate_mod(expected: &str, path: &Path) -> Result<ModInfo> {
    let info = load_mod_info(path)?.ok_or_else(|| ManifestError::Missing {
        path: path.display().to_string(),
    })?;
    if info.name != expected {
        return Err(ManifestError::NameMismatch {
            path: path.display().to_string(),
            expected: expected.to_string(),
            found: info.name,
        }
        .into());
    }
    Ok(info)
}

/// Read the declared version from a module checkout or archive.
///
/// # Errors
///
/// Returns `ManifestError::Missing` when no manifest exists, plus any
/// `load_mod_info` error.
pub fn mod_version(path: &Path) -> Result<String> {
    let info = load_mod_info(path)?.ok_or_else(|| ManifestError::Missing {
        path: path.display().to_string(),
    })?;
    Ok(info.version)
}
