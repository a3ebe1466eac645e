// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ensure_companions, launcher_repo, run_bundle_command};
use crate::cli::release::BundleArgs;
use crate::config::Config;
use crate::error::ConfigError;
use std::path::Path;
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn write_mod_dir(root: &Path, name: &str, version: &str) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("info.json"),
        format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
    )
    .unwrap();
}

/// Two directory-bundled modules, no launcher repository configured.
fn pack_config(default_dest: &str) -> Config {
    let toml = format!(
        r#"
[settings]
default_dest = "{default_dest}"
main_module = "FactorioAccess"

[[modules]]
name = "FactorioAccess"
repo = "https://github.com/FactorioAccess/FactorioAccess"
bundle_zip = false

[[modules]]
name = "PavingReach"
repo = "https://github.com/FactorioAccess/PavingReach"
bundle_zip = false
"#
    );
    Config::parse(&toml).unwrap()
}

#[test]
fn test_launcher_repo_unset_is_a_config_error() {
    let config = pack_config("work");

    let err = launcher_repo(&config).unwrap_err();
    let config_err = err.downcast::<ConfigError>().unwrap();
    assert!(matches!(
        config_err,
        ConfigError::MissingSetting { key } if key == "launcher_repo"
    ));
}

#[test]
fn test_launcher_repo_parses_reference() {
    let config = Config::parse(
        r#"
[settings]
default_dest = "work"
launcher_repo = "https://github.com/FactorioAccess/FactorioAccessLauncher"

[[modules]]
name = "FactorioAccess"
repo = "https://github.com/FactorioAccess/FactorioAccess"
"#,
    )
    .unwrap();

    let repo = launcher_repo(&config).unwrap();
    assert_eq!(repo.owner, "FactorioAccess");
    assert_eq!(repo.repo, "FactorioAccessLauncher");
}

#[tokio::test]
async fn test_companions_present_skip_downloads() {
    let work = temp_dir();
    let jkm = work.path().join("Factorio.jkm");
    let launcher = work.path().join("launcher.exe");
    std::fs::write(&jkm, "keymap").unwrap();
    std::fs::write(&launcher, "launcher").unwrap();

    // No launcher_repo configured, so this only passes if nothing tries
    // to reach the network.
    let config = pack_config("work");
    ensure_companions(&config, &jkm, &launcher, None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_companion_missing_without_repo_is_fatal() {
    let work = temp_dir();
    let jkm = work.path().join("Factorio.jkm");
    let launcher = work.path().join("launcher.exe");
    std::fs::write(&jkm, "keymap").unwrap();

    let config = pack_config("work");
    let err = ensure_companions(&config, &jkm, &launcher, None)
        .await
        .unwrap_err();
    let config_err = err.downcast::<ConfigError>().unwrap();
    assert!(matches!(
        config_err,
        ConfigError::MissingSetting { key } if key == "launcher_repo"
    ));
}

#[tokio::test]
async fn test_dry_run_reports_without_writing() {
    let work = temp_dir();
    write_mod_dir(work.path(), "FactorioAccess", "3.0.1");
    write_mod_dir(work.path(), "PavingReach", "0.1.2");
    std::fs::write(work.path().join("Factorio.jkm"), "keymap").unwrap();
    std::fs::write(work.path().join("launcher.exe"), "launcher").unwrap();

    let config = pack_config(&work.path().display().to_string());
    let args = BundleArgs {
        source: None,
        out_dir: None,
        token: None,
    };

    run_bundle_command(&args, &config, true).await.unwrap();

    assert!(!work.path().join("mod-list.json").exists());
    assert!(!work.path().join("FactorioAccess_3.0.1.zip").exists());
}

#[tokio::test]
async fn test_bundle_end_to_end_without_downloads() {
    let work = temp_dir();
    let out = temp_dir();
    write_mod_dir(work.path(), "FactorioAccess", "3.0.1");
    write_mod_dir(work.path(), "PavingReach", "0.1.2");
    std::fs::write(work.path().join("Factorio.jkm"), "keymap").unwrap();
    std::fs::write(work.path().join("launcher.exe"), "launcher").unwrap();

    // default_dest points nowhere usable; -s must win.
    let config = pack_config("missing-work");
    let args = BundleArgs {
        source: Some(work.path().to_path_buf()),
        out_dir: Some(out.path().to_path_buf()),
        token: None,
    };

    run_bundle_command(&args, &config, false).await.unwrap();

    assert!(work.path().join("mod-list.json").is_file());
    assert!(out.path().join("FactorioAccess_3.0.1.zip").is_file());
}
