// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for fab.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. fab.toml (or --config)
//! 3. FAB_* env vars
//! 4. --set overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! FAB_GLOBAL_DRY=true    → global.dry = true
//! FAB_SETTINGS_UPDATE=false → settings.update = false
//! ```
//!
//! # Example
//!
//! ```toml
//! [settings]
//! default_dest = "work"
//! launcher_repo = "https://github.com/FactorioAccess/FactorioAccessLauncher"
//!
//! [[modules]]
//! name = "FactorioAccess"
//! repo = "https://github.com/FactorioAccess/FactorioAccess"
//! branch = "main"
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, Module, Settings};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Pack-wide settings.
    pub settings: Settings,
    /// Declared mod repositories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<Module>,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fab_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("fab.toml")
    ///     .with_env_prefix("FAB")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validates the assembled configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the module list is empty or two modules share a
    /// name (compared case-insensitively, matching `find_module` lookup).
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.modules.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "modules".to_string(),
                message: "at least one [[modules]] entry is required".to_string(),
            });
        }

        let mut seen = BTreeSet::new();
        for module in &self.modules {
            if !seen.insert(module.name.to_lowercase()) {
                return Err(ConfigError::DuplicateModule(module.name.clone()));
            }
        }

        Ok(())
    }

    /// Looks up a module by name, case-insensitively.
    #[must_use]
    pub fn find_module(&self, name: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    /// Returns the modules a command operates on.
    ///
    /// `None` selects every declared module; `Some(name)` selects that
    /// single module.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownModule` if a named module is not declared.
    pub fn selected_modules(
        &self,
        selection: Option<&str>,
    ) -> std::result::Result<Vec<&Module>, ConfigError> {
        match selection {
            Some(name) => self
                .find_module(name)
                .map(|m| vec![m])
                .ok_or_else(|| ConfigError::UnknownModule(name.to_string())),
            None => Ok(self.modules.iter().collect()),
        }
    }

    /// Returns whether sync may update an existing working copy of `module`.
    #[must_use]
    pub fn update_enabled(&self, module: &Module) -> bool {
        module.update.unwrap_or(self.settings.update)
    }

    /// Returns the main module declaration, if present.
    #[must_use]
    pub fn main_module(&self) -> Option<&Module> {
        self.find_module(&self.settings.main_module)
    }

    /// Format configuration options for display.
    ///
    /// Returns a vector of formatted strings representing all configuration options.
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_settings_options(&mut options);
        self.format_module_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_settings_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "settings.default_dest".into(),
            self.settings.default_dest.display().to_string(),
        );
        options.insert("settings.update".into(), self.settings.update.to_string());
        if !self.settings.launcher_repo.is_empty() {
            options.insert(
                "settings.launcher_repo".into(),
                self.settings.launcher_repo.clone(),
            );
        }
        options.insert(
            "settings.launcher_branch".into(),
            self.settings.launcher_branch.clone(),
        );
        options.insert(
            "settings.main_module".into(),
            self.settings.main_module.clone(),
        );
    }

    fn format_module_options(&self, options: &mut BTreeMap<String, String>) {
        for module in &self.modules {
            let prefix = format!("modules.{}", module.name);
            options.insert(format!("{prefix}.repo"), module.repo.clone());
            if let Some(branch) = &module.branch {
                options.insert(format!("{prefix}.branch"), branch.clone());
            }
            if let Some(commit) = &module.commit {
                options.insert(format!("{prefix}.commit"), commit.clone());
            }
            if let Some(dest) = &module.dest {
                options.insert(format!("{prefix}.dest"), dest.clone());
            }
            options.insert(
                format!("{prefix}.bundle_zip"),
                module.bundle_zip.to_string(),
            );
            if let Some(update) = module.update {
                options.insert(format!("{prefix}.update"), update.to_string());
            }
            options.insert(format!("{prefix}.beta"), module.beta.to_string());
        }
    }
}
