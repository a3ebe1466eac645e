// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns,
//! mixing global options with each pipeline command.

use clap::Parser;
use fab_rs::cli::global::GlobalOptions;
use fab_rs::cli::{Cli, Command};
use std::path::PathBuf;

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_command() {
    let cli = Cli::try_parse_from(["fab", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["fab", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Pipeline Commands
// =============================================================================

#[test]
fn cli_fetch_with_globals() {
    let cli =
        Cli::try_parse_from(["fab", "--dry", "-l", "4", "fetch", "FactorioAccess", "-d", "work"])
            .unwrap();

    assert!(cli.global.dry);
    assert_eq!(cli.global.log_level, Some(4));
    match cli.command {
        Some(Command::Fetch(args)) => {
            assert_eq!(args.module.as_deref(), Some("FactorioAccess"));
            assert_eq!(args.dest, Some(PathBuf::from("work")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_package_all_modules() {
    let cli = Cli::try_parse_from(["fab", "package", "-o", "zips", "-s", "work"]).unwrap();
    match cli.command {
        Some(Command::Package(args)) => {
            assert_eq!(args.module, None);
            assert_eq!(args.outdir, Some(PathBuf::from("zips")));
            assert_eq!(args.source, Some(PathBuf::from("work")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_upload_takes_no_args() {
    let cli = Cli::try_parse_from(["fab", "upload"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Upload)));

    let result = Cli::try_parse_from(["fab", "upload", "FactorioAccess"]);
    assert!(result.is_err());
}

#[test]
fn cli_bundle_with_token() {
    let cli = Cli::try_parse_from([
        "fab",
        "bundle",
        "-s",
        "work",
        "-o",
        "dist",
        "--token",
        "ghp_example",
    ])
    .unwrap();

    match cli.command {
        Some(Command::Bundle(args)) => {
            assert_eq!(args.source, Some(PathBuf::from("work")));
            assert_eq!(args.out_dir, Some(PathBuf::from("dist")));
            assert_eq!(args.token.as_deref(), Some("ghp_example"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_publish_full_invocation() {
    let cli = Cli::try_parse_from([
        "fab",
        "publish",
        "--zip",
        "dist/FactorioAccess_3.0.1.zip",
        "--tag",
        "v3.0.1",
        "--prerelease",
        "--token",
        "ghp_example",
    ])
    .unwrap();

    match cli.command {
        Some(Command::Publish(args)) => {
            assert_eq!(args.zip, PathBuf::from("dist/FactorioAccess_3.0.1.zip"));
            assert_eq!(args.tag.as_deref(), Some("v3.0.1"));
            assert!(args.prerelease);
            assert_eq!(args.token.as_deref(), Some("ghp_example"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn cli_install_with_source() {
    let cli = Cli::try_parse_from([
        "fab",
        "install",
        "--data-dir",
        "/opt/factorio/data",
        "-s",
        "work",
    ])
    .unwrap();

    match cli.command {
        Some(Command::Install(args)) => {
            assert_eq!(args.data_dir, PathBuf::from("/opt/factorio/data"));
            assert_eq!(args.source, Some(PathBuf::from("work")));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

// =============================================================================
// Global Options
// =============================================================================

#[test]
fn cli_global_options_custom_config() {
    let cli = Cli::try_parse_from(["fab", "-c", "ci/fab.toml", "config"]).unwrap();
    assert_eq!(cli.global.config, PathBuf::from("ci/fab.toml"));
}

#[test]
fn cli_global_options_log_levels() {
    let cli = Cli::try_parse_from(["fab", "-l", "5", "--file-log-level", "3", "config"]).unwrap();
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(cli.global.file_log_level, Some(3));
}

#[test]
fn cli_global_options_repeated_set() {
    let cli = Cli::try_parse_from([
        "fab",
        "-s",
        "settings.update=false",
        "-s",
        "settings.default_dest=work",
        "config",
    ])
    .unwrap();

    assert_eq!(
        cli.global.options,
        vec![
            "settings.update=false".to_string(),
            "settings.default_dest=work".to_string(),
        ]
    );
}

#[test]
fn cli_global_options_to_config_overrides() {
    let cli = Cli::try_parse_from([
        "fab",
        "--dry",
        "-l",
        "4",
        "--log-file",
        "ci.log",
        "-s",
        "settings.update=false",
        "fetch",
    ])
    .unwrap();

    let overrides = cli.global.to_config_overrides();
    assert_eq!(
        overrides,
        vec![
            "settings.update=false".to_string(),
            "global.output_log_level=4".to_string(),
            "global.file_log_level=4".to_string(),
            "global.log_file=ci.log".to_string(),
            "global.dry=true".to_string(),
        ]
    );
}

#[test]
fn cli_global_options_default_overrides_empty() {
    let opts = GlobalOptions::default();
    assert!(opts.to_config_overrides().is_empty());
}

// =============================================================================
// Error handling
// =============================================================================

#[test]
fn cli_unknown_command_rejected() {
    let result = Cli::try_parse_from(["fab", "deploy"]);
    assert!(result.is_err());
}

#[test]
fn cli_publish_requires_zip() {
    let result = Cli::try_parse_from(["fab", "publish", "--tag", "v3.0.1"]);
    assert!(result.is_err());
}

#[test]
fn cli_install_requires_data_dir() {
    let result = Cli::try_parse_from(["fab", "install", "-s", "work"]);
    assert!(result.is_err());
}

#[test]
fn cli_log_level_out_of_range_rejected() {
    let result = Cli::try_parse_from(["fab", "-l", "7", "config"]);
    assert!(result.is_err());
}
