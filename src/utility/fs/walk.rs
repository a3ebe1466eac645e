// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use bon::Builder;
use flume::bounded;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Options for parallel directory traversal.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Maximum depth to traverse (None = unlimited)
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    /// Follow symbolic links
    #[builder(setters(name = with_follow_links), default = false)]
    follow_links: bool,
    /// Include hidden files/directories
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Respect .gitignore files
    #[builder(setters(name = with_respect_gitignore), default = true)]
    respect_gitignore: bool,
    /// Number of threads (None = auto-detect based on CPU count)
    #[builder(setters(name = with_threads))]
    threads: Option<usize>,
    /// Skip directories matching these names (exact match)
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Returns the maximum depth to traverse.
    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Returns whether to follow symbolic links.
    #[must_use]
    pub const fn follow_links(&self) -> bool {
        self.follow_links
    }

    /// Returns whether to include hidden files/directories.
    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    /// Returns whether to respect .gitignore files.
    #[must_use]
    pub const fn respect_gitignore(&self) -> bool {
        self.respect_gitignore
    }

    /// Returns the number of threads (None = auto-detect).
    #[must_use]
    pub const fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Returns the skip directories list.
    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    /// Creates options for scanning the immediate children of a directory.
    ///
    /// - Does not recurse past the first level
    /// - Ignores .gitignore files (packaged zips are usually ignored in
    ///   working copies, but they are exactly what we are looking for)
    /// - Skips `.git`
    #[must_use]
    pub fn for_flat_scan() -> Self {
        Self::builder()
            .with_max_depth(1)
            .with_respect_gitignore(false)
            .with_skip_dirs(vec![".git".to_string()])
            .build()
    }
}

/// Builds a `WalkBuilder` with the given options, using `filter_entry` for directory skipping.
pub(super) fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);

    // Configure depth
    if let Some(depth) = options.max_depth() {
        builder.max_depth(Some(depth));
    }

    // Configure basic options
    builder.follow_links(options.follow_links());
    builder.hidden(!options.include_hidden());

    // Configure gitignore handling
    builder.git_ignore(options.respect_gitignore());
    builder.git_global(options.respect_gitignore());
    builder.git_exclude(options.respect_gitignore());

    // Configure thread count
    if let Some(threads) = options.threads() {
        builder.threads(threads);
    }

    // Use filter_entry for efficient directory skipping (evaluated BEFORE descending)
    if !options.skip_dirs().is_empty() {
        let skip_dirs: Arc<Vec<String>> = Arc::new(options.skip_dirs().to_vec());
        builder.filter_entry(move |entry| {
            // If it's a directory, check if it should be skipped
            if entry.file_type().is_some_and(|ft| ft.is_dir())
                && let Some(name) = entry.file_name().to_str()
                && skip_dirs.iter().any(|skip| skip == name)
            {
                return false; // Don't descend into this directory
            }
            true
        });
    }

    builder
}

/// Finds files matching a glob pattern using parallel traversal.
///
/// Uses the `wax` crate for modern, efficient glob matching combined
/// with `ignore::WalkParallel` for maximum throughput.
///
/// # Arguments
/// * `root` - The root directory to search from
/// * `pattern` - Glob pattern to match (e.g., "`FactorioAccess_*.zip`", "**/*.json")
/// * `options` - Configuration options for the walk
///
/// # Returns
/// A vector of matching file paths.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory does not exist.
/// - The glob pattern is invalid.
///
/// # Example
/// ```no_run
/// use fab_rs::utility::fs::walk::{find_files, WalkOptions};
///
/// let zips = find_files("work", "FactorioAccess_*.zip", &WalkOptions::for_flat_scan())?;
/// for file in zips {
///     println!("{}", file.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();

    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    // Use channel for lock-free collection
    let (tx, rx) = bounded::<PathBuf>(1000);
    let glob = Arc::new(glob);
    let root_path = root.to_path_buf();

    let builder = build_walker(root, options);
    let parallel = builder.build_parallel();

    parallel.run(|| {
        let tx = tx.clone();
        let glob = Arc::clone(&glob);
        let root_path = root_path.clone();

        Box::new(move |entry_result| {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_some_and(|ft| ft.is_file())
                        && let Ok(rel_path) = entry.path().strip_prefix(&root_path)
                        && glob.is_match(rel_path)
                    {
                        let _ = tx.send(entry.path().to_path_buf());
                    }
                }
                Err(e) => {
                    warn!(error = %e, "walk error");
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    Ok(rx.iter().collect())
}
