// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::Path;
use tokio::fs;

/// Directory names excluded from bundle staging copies.
pub const VCS_DIRS: &[&str] = &[".git"];

/// Recursively copies all contents from src directory to dst directory (async version).
///
/// Creates dst if it doesn't exist. Handles both files and directories recursively.
/// Directories whose names appear in `skip_dirs` are not descended into.
///
/// # Arguments
/// * `src` - Source directory path
/// * `dst` - Destination directory path
/// * `skip_dirs` - Directory names to skip entirely (e.g. [`VCS_DIRS`])
///
/// # Example
/// ```no_run
/// use fab_rs::utility::fs::copy::{copy_dir_contents_async, VCS_DIRS};
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new("work/FactorioAccess"), Path::new("staging/mods/FactorioAccess"), VCS_DIRS).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path, skip_dirs: &[&str]) -> Result<()> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            let name = entry.file_name();
            if skip_dirs.iter().any(|skip| name == *skip) {
                continue;
            }
            Box::pin(copy_dir_contents_async(&src_path, &dst_path, skip_dirs)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
        }
    }

    Ok(())
}

/// Removes a directory entry of any kind, if it exists.
///
/// Used when replacing previously installed mods: the old entry may be a
/// zip file or an unpacked directory, and either must give way.
///
/// # Errors
///
/// Returns an error if removal fails for a reason other than the entry
/// being absent.
pub async fn remove_entry_async(path: &Path) -> Result<()> {
    match fs::metadata(path).await {
        Ok(meta) => {
            if meta.is_dir() {
                fs::remove_dir_all(path)
                    .await
                    .with_context(|| format!("failed to remove directory {}", path.display()))?;
            } else {
                fs::remove_file(path)
                    .await
                    .with_context(|| format!("failed to remove file {}", path.display()))?;
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("failed to stat {}", path.display())),
    }
}
