// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{Release, RepoRef};
use crate::error::NetworkError;

#[test]
fn test_repo_ref_parse_plain_url() {
    let repo = RepoRef::parse("https://github.com/FactorioAccess/FactorioAccess").unwrap();
    assert_eq!(repo.owner, "FactorioAccess");
    assert_eq!(repo.repo, "FactorioAccess");
}

#[test]
fn test_repo_ref_parse_ignores_git_suffix_and_slashes() {
    for url in [
        "https://github.com/FactorioAccess/FactorioAccessLauncher.git",
        "https://github.com/FactorioAccess/FactorioAccessLauncher/",
        "https://github.com/FactorioAccess/FactorioAccessLauncher.git/",
        "https://github.com/FactorioAccess/FactorioAccessLauncher///",
        "FactorioAccess/FactorioAccessLauncher",
    ] {
        let repo = RepoRef::parse(url).unwrap();
        assert_eq!(repo.owner, "FactorioAccess", "owner for {url}");
        assert_eq!(repo.repo, "FactorioAccessLauncher", "repo for {url}");
    }
}

#[test]
fn test_repo_ref_parse_preserves_case() {
    let repo = RepoRef::parse("https://github.com/FACTORIOACCESS/PavingReach").unwrap();
    assert_eq!(repo.owner, "FACTORIOACCESS");
    assert_eq!(repo.repo, "PavingReach");
}

#[test]
fn test_repo_ref_parse_rejects_short_urls() {
    for url in ["", "justarepo", "https://github.com/", "///"] {
        let err = RepoRef::parse(url).unwrap_err();
        let network = err
            .downcast::<NetworkError>()
            .expect("should be a network error");
        assert!(
            matches!(network, NetworkError::InvalidRepoUrl(_)),
            "unexpected error for {url:?}: {network:?}"
        );
    }
}

#[test]
fn test_repo_ref_display() {
    let repo = RepoRef::parse("https://github.com/FactorioAccess/FactorioAccess").unwrap();
    assert_eq!(repo.to_string(), "FactorioAccess/FactorioAccess");
}

#[test]
fn test_release_parses_api_payload() {
    let json = r#"{
        "id": 7,
        "tag_name": "1.2.0",
        "name": "FactorioAccess 1.2.0",
        "prerelease": false,
        "upload_url": "https://uploads.github.com/repos/o/r/releases/7/assets{?name,label}",
        "html_url": "https://github.com/o/r/releases/tag/1.2.0",
        "assets": [
            {
                "id": 11,
                "name": "FactorioAccess_1.2.0.zip",
                "browser_download_url": "https://github.com/o/r/releases/download/1.2.0/FactorioAccess_1.2.0.zip"
            }
        ]
    }"#;

    let release: Release = serde_json::from_str(json).unwrap();
    assert_eq!(release.id, 7);
    assert_eq!(release.tag_name, "1.2.0");
    assert_eq!(release.name.as_deref(), Some("FactorioAccess 1.2.0"));
    assert!(!release.prerelease);
    assert_eq!(release.assets.len(), 1);
    assert_eq!(release.assets[0].id, 11);
}

#[test]
fn test_release_asset_named() {
    let json = r#"{
        "id": 1,
        "tag_name": "0.1.0",
        "name": null,
        "prerelease": true,
        "upload_url": "https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}",
        "html_url": null,
        "assets": [
            {"id": 2, "name": "launcher.exe", "browser_download_url": "https://example.com/launcher.exe"},
            {"id": 3, "name": "extra.zip", "browser_download_url": "https://example.com/extra.zip"}
        ]
    }"#;

    let release: Release = serde_json::from_str(json).unwrap();
    assert_eq!(release.asset_named("launcher.exe").map(|a| a.id), Some(2));
    assert!(release.asset_named("Launcher.exe").is_none());
    assert!(release.asset_named("missing.bin").is_none());
}
