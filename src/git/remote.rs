// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote URL normalization and matching.
//!
//! Operators write repo URLs with arbitrary case, optional `.git` suffixes
//! and trailing slashes, and git reports whatever form was configured. The
//! sync engine compares normalized forms so a cosmetic difference never
//! blocks an update of an otherwise correct working copy.

/// Normalize a remote URL for comparison.
///
/// Lowercases, strips trailing slashes, then strips one `.git` suffix.
///
/// ```
/// use fab_rs::git::remote::normalize_remote_url;
///
/// assert_eq!(
///     normalize_remote_url("https://GitHub.com/FactorioAccess/FactorioAccess.git/"),
///     "https://github.com/factorioaccess/factorioaccess"
/// );
/// ```
#[must_use]
pub fn normalize_remote_url(url: &str) -> String {
    let url = url.trim().to_lowercase();
    let url = url.trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Check whether any of a working copy's remote URLs matches the expected
/// repository URL after normalization.
#[must_use]
pub fn remote_matches(expected: &str, found: &[String]) -> bool {
    let expected = normalize_remote_url(expected);
    found.iter().any(|url| normalize_remote_url(url) == expected)
}
