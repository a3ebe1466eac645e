// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for fab.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, Settings, [[modules]] → Module
//! ```
//!
//! # Module Destinations
//!
//! ```text
//! dest absent        → <default_dest>/<name>
//! dest "custom"      → <default_dest>/custom
//! dest "nested/dir/" → <default_dest>/nested/dir/<name>
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log planned operations without touching anything.
    pub dry: bool,
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("fab.log"),
        }
    }
}

/// Pack-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base directory all module working copies live under. Empty means
    /// working copies resolve under the current directory.
    pub default_dest: PathBuf,
    /// Whether existing working copies are updated by default.
    /// Per-module `update` overrides this.
    pub update: bool,
    /// Repository the companion launcher and JAWS script are fetched from.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub launcher_repo: String,
    /// Branch of `launcher_repo` to read files from.
    pub launcher_branch: String,
    /// Module whose info.json provides the bundle version.
    pub main_module: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_dest: PathBuf::new(),
            update: true,
            launcher_repo: String::new(),
            launcher_branch: "main".to_string(),
            main_module: "FactorioAccess".to_string(),
        }
    }
}

/// One mod repository in the pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Module {
    /// Mod name; must match the `name` field of the mod's info.json.
    pub name: String,
    /// Git URL of the mod repository.
    pub repo: String,
    /// Branch to check out and pull. Optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Commit to pin the working copy to. Wins over `branch`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
    /// Destination override, relative to `default_dest`. A trailing
    /// separator means "directory to place `<name>` under".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest: Option<String>,
    /// Whether this module's packaged zip goes into the bundle.
    #[serde(default = "default_true")]
    pub bundle_zip: bool,
    /// Per-module update override (tri-state; absent falls back to
    /// `settings.update`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<bool>,
    /// Marks the main module as a beta build, changing the bundle name.
    #[serde(default)]
    pub beta: bool,
}

const fn default_true() -> bool {
    true
}

impl Module {
    /// Returns true if the `dest` override ends with a path separator.
    ///
    /// `"nested/dir/"` places the working copy at `nested/dir/<name>`;
    /// `"nested/dir"` IS the working copy path.
    #[must_use]
    pub fn dest_is_parent_dir(&self) -> bool {
        self.dest
            .as_deref()
            .is_some_and(|d| d.ends_with('/') || d.ends_with(std::path::MAIN_SEPARATOR))
    }
}
