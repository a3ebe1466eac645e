// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{install_assets, run_install_command};
use crate::cli::install::InstallArgs;
use crate::config::Config;
use crate::release::assets::Asset;
use std::collections::BTreeMap;
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

#[tokio::test]
async fn test_install_replaces_existing_directory() {
    let src = temp_dir();
    let mods = temp_dir();

    let asset_dir = src.path().join("FactorioAccess");
    std::fs::create_dir_all(&asset_dir).unwrap();
    std::fs::write(asset_dir.join("info.json"), "{}").unwrap();
    std::fs::write(asset_dir.join("control.lua"), "-- new").unwrap();

    let stale = mods.path().join("FactorioAccess");
    std::fs::create_dir_all(&stale).unwrap();
    std::fs::write(stale.join("old.txt"), "stale").unwrap();

    let mut assets = BTreeMap::new();
    assets.insert(
        "FactorioAccess".to_string(),
        Asset::Directory(asset_dir.clone()),
    );

    install_assets(&assets, mods.path()).await.unwrap();

    let installed = mods.path().join("FactorioAccess");
    assert!(installed.join("control.lua").is_file());
    assert!(!installed.join("old.txt").exists());
}

#[tokio::test]
async fn test_install_replaces_existing_zip() {
    let src = temp_dir();
    let mods = temp_dir();

    let zip = src.path().join("PavingReach_0.1.2.zip");
    std::fs::write(&zip, "new zip").unwrap();
    std::fs::write(mods.path().join("PavingReach_0.1.2.zip"), "old zip").unwrap();

    let mut assets = BTreeMap::new();
    assets.insert("PavingReach".to_string(), Asset::Archive(zip));

    install_assets(&assets, mods.path()).await.unwrap();

    let installed = mods.path().join("PavingReach_0.1.2.zip");
    assert_eq!(std::fs::read_to_string(installed).unwrap(), "new zip");
}

#[tokio::test]
async fn test_install_dry_run_touches_nothing() {
    let work = temp_dir();
    let data = temp_dir();
    write_mod_dir(work.path(), "FactorioAccess", "3.0.1");

    let config = Config::parse(&format!(
        r#"
[settings]
default_dest = "{}"
main_module = "FactorioAccess"

[[modules]]
name = "FactorioAccess"
repo = "https://github.com/FactorioAccess/FactorioAccess"
bundle_zip = false
"#,
        work.path().display()
    ))
    .unwrap();

    let args = InstallArgs {
        data_dir: data.path().join("factorio"),
        source: None,
    };

    run_install_command(&args, &config, true).await.unwrap();

    assert!(!data.path().join("factorio").exists());
}
