// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Destination resolution for module working copies.
//!
//! ```text
//! base = -d override | settings.default_dest | cwd   (absolutized)
//!
//! dest absent        → <base>/<name>
//! dest "custom"      → <base>/custom
//! dest "nested/dir/" → <base>/nested/dir/<name>
//! ```
//!
//! Every command that touches a working copy resolves through here, so
//! fetch, package and bundle always agree on where a module lives.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::types::Module;
use crate::error::{ConfigError, Result};
use crate::utility::fs::paths::normalize_lexically;

/// Inputs the resolver needs besides the module itself.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    /// `-d`/`--dest` override from the command line, if given.
    pub global_dest: Option<&'a Path>,
    /// `settings.default_dest` from the configuration.
    pub default_dest: &'a Path,
}

impl<'a> ResolveContext<'a> {
    #[must_use]
    pub const fn new(default_dest: &'a Path) -> Self {
        Self {
            global_dest: None,
            default_dest,
        }
    }

    #[must_use]
    pub const fn with_global_dest(mut self, global_dest: Option<&'a Path>) -> Self {
        self.global_dest = global_dest;
        self
    }
}

/// Returns the absolute base directory working copies are resolved under.
///
/// A `-d` override wins over `settings.default_dest`; relative values are
/// anchored at the current working directory.
///
/// # Errors
///
/// Returns an error if the current working directory cannot be determined.
pub fn resolve_base(ctx: &ResolveContext) -> Result<PathBuf> {
    let base = ctx.global_dest.unwrap_or(ctx.default_dest);
    absolutize(base)
}

/// Resolves the working copy path for `module`.
///
/// # Errors
///
/// Returns [`ConfigError::AbsoluteModuleDest`] if the module declares an
/// absolute `dest`, or an error if the current working directory cannot
/// be determined.
pub fn resolve_dest(module: &Module, ctx: &ResolveContext) -> Result<PathBuf> {
    let base = resolve_base(ctx)?;

    let resolved = match module.dest.as_deref() {
        Some(dest) => {
            if Path::new(dest).is_absolute() {
                return Err(ConfigError::AbsoluteModuleDest {
                    module: module.name.clone(),
                    dest: dest.to_string(),
                }
                .into());
            }
            if module.dest_is_parent_dir() {
                base.join(dest).join(&module.name)
            } else {
                base.join(dest)
            }
        }
        None => base.join(&module.name),
    };

    Ok(normalize_lexically(&resolved))
}

/// Anchors a possibly-relative path at the current working directory and
/// normalizes it lexically.
pub(crate) fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        cwd.join(path)
    };
    Ok(normalize_lexically(&absolute))
}
