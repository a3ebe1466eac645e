// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! mod-list.json generation.
//!
//! Factorio reads `mods/mod-list.json` to decide which installed mods to
//! enable. The bundle ships one that enables `base` plus every module in
//! the pack, so a fresh install starts with everything on.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::types::Module;
use crate::error::Result;

/// File name Factorio expects inside its `mods` directory.
pub const MOD_LIST_NAME: &str = "mod-list.json";

/// One `{"name": ..., "enabled": ...}` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModListEntry {
    pub name: String,
    pub enabled: bool,
}

/// The whole `{"mods": [...]}` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModList {
    pub mods: Vec<ModListEntry>,
}

impl ModList {
    /// Builds the list for the configured modules: `base` first, then one
    /// entry per module, all enabled.
    #[must_use]
    pub fn for_modules(modules: &[&Module]) -> Self {
        let mut mods = Vec::with_capacity(modules.len() + 1);
        mods.push(ModListEntry {
            name: "base".to_string(),
            enabled: true,
        });
        for module in modules {
            mods.push(ModListEntry {
                name: module.name.clone(),
                enabled: true,
            });
        }
        Self { mods }
    }

    /// Writes the list as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize mod list")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}
