// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{package_module, resolve_out_dir, PackageOutcome};
use crate::config::types::Module;
use crate::release::dest::ResolveContext;
use crate::tools::ToolContext;
use std::path::Path;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn module(name: &str) -> Module {
    Module {
        name: name.to_string(),
        repo: format!("https://github.com/FactorioAccess/{name}"),
        branch: None,
        commit: None,
        dest: None,
        bundle_zip: true,
        update: None,
        beta: false,
    }
}

fn dry_ctx() -> ToolContext {
    ToolContext::new(CancellationToken::new(), true)
}

#[test]
fn test_out_dir_defaults_to_source_base() {
    let base = temp_dir();
    let resolve = ResolveContext::new(base.path());

    let out = resolve_out_dir(None, &resolve).unwrap();
    assert_eq!(out, base.path());
}

#[test]
fn test_out_dir_override_wins_over_source_base() {
    let base = temp_dir();
    let override_dir = temp_dir();
    let resolve = ResolveContext::new(base.path());

    let out = resolve_out_dir(Some(override_dir.path()), &resolve).unwrap();
    assert_eq!(out, override_dir.path());
}

#[test]
fn test_out_dir_relative_override_is_anchored_at_cwd() {
    let base = temp_dir();
    let resolve = ResolveContext::new(base.path());

    let out = resolve_out_dir(Some(Path::new("zips")), &resolve).unwrap();
    assert!(out.is_absolute());
    assert!(out.ends_with("zips"));
}

#[test]
fn test_outcome_failure_flag() {
    let ok = PackageOutcome {
        module: "PavingReach".to_string(),
        result: Ok(()),
    };
    let failed = PackageOutcome {
        module: "PavingReach".to_string(),
        result: Err(anyhow::anyhow!("fmtk exploded")),
    };

    assert!(!ok.is_failure());
    assert!(failed.is_failure());
}

#[tokio::test]
async fn test_package_missing_checkout_fails_before_fmtk() {
    let base = temp_dir();
    let resolve = ResolveContext::new(base.path());
    let m = module("FactorioAccess");

    let err = package_module(&m, &resolve, base.path(), &dry_ctx())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("run fetch first"));
}

#[tokio::test]
async fn test_package_dry_run_with_checkout_present() {
    let base = temp_dir();
    std::fs::create_dir_all(base.path().join("FactorioAccess")).unwrap();
    let resolve = ResolveContext::new(base.path());
    let m = module("FactorioAccess");

    package_module(&m, &resolve, base.path(), &dry_ctx())
        .await
        .unwrap();
}
