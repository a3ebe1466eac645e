// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AssetError, ConfigError, FabError, FabResult, GitError, ManifestError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::AbsoluteModuleDest {
        module: "FactorioAccess".to_string(),
        dest: "/etc/mods".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"per-module dest must not be absolute (module 'FactorioAccess', dest '/etc/mods')"
    );
}

#[test]
fn test_remote_mismatch_lists_found_remotes() {
    let err = GitError::RemoteMismatch {
        path: "work/FactorioAccess".to_string(),
        expected: "https://github.com/FactorioAccess/FactorioAccess".to_string(),
        found: vec!["https://github.com/someone/fork.git".to_string()],
    };
    let message = err.to_string();
    assert!(message.contains("work/FactorioAccess"));
    assert!(message.contains("https://github.com/FactorioAccess/FactorioAccess"));
    assert!(message.contains("someone/fork"));
}

#[test]
fn test_ambiguous_asset_names_all_candidates() {
    let err = AssetError::Ambiguous {
        module: "B".to_string(),
        candidates: vec!["B_1.2.0.zip".to_string(), "B_1.3.0.zip".to_string()],
    };
    let message = err.to_string();
    assert!(message.contains("B_1.2.0.zip"));
    assert!(message.contains("B_1.3.0.zip"));
}

#[test]
fn test_manifest_mismatch_display() {
    let err = ManifestError::NameMismatch {
        path: "work/A".to_string(),
        expected: "A".to_string(),
        found: "a-typo".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"info.json name mismatch in work/A: expected 'A', found 'a-typo'"
    );
}

#[test]
fn test_fab_error_size() {
    // FabError should be reasonably small
    // Box<str> variants (Bailed, Other) are 16 bytes (fat pointer: ptr + len)
    // With discriminant + alignment = 24 bytes
    let size = std::mem::size_of::<FabError>();
    assert!(size <= 24, "FabError is {size} bytes, expected <= 24");
}

#[test]
fn test_fab_result_size() {
    // Result<(), FabError> should be reasonably small
    let size = std::mem::size_of::<FabResult<()>>();
    assert!(size <= 24, "FabResult<()> is {size} bytes, expected <= 24");
}
