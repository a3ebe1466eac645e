// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Component, Path, PathBuf};

/// Normalizes a path lexically, without touching the filesystem.
///
/// Collapses `.` components and resolves `..` against preceding normal
/// components. A `..` that would climb past the root of an absolute path
/// is dropped; leading `..` components of a relative path are kept.
/// An empty result becomes `.`.
///
/// Symlinks are NOT resolved. This matters for checkout destinations:
/// the resolved path must be derived from configuration alone, before
/// anything exists on disk.
///
/// # Example
/// ```
/// use fab_rs::utility::fs::paths::normalize_lexically;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_lexically(Path::new("work/./mods/../A")), PathBuf::from("work/A"));
/// assert_eq!(normalize_lexically(Path::new("../A")), PathBuf::from("../A"));
/// ```
#[must_use]
pub fn normalize_lexically(path: &Path) -> PathBuf {
    enum Action {
        Pop,
        Swallow,
        Keep,
    }

    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                // Decide first, then mutate; popping while the borrow from
                // components() is live does not compile.
                let action = match out.components().next_back() {
                    Some(Component::Normal(_)) => Action::Pop,
                    Some(Component::RootDir | Component::Prefix(_)) => Action::Swallow,
                    _ => Action::Keep,
                };
                match action {
                    Action::Pop => {
                        out.pop();
                    }
                    Action::Swallow => {}
                    Action::Keep => out.push(Component::ParentDir.as_os_str()),
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}
