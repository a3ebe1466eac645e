// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};

#[tokio::test]
async fn test_process_echo() {
    // Use Write-Output in PowerShell, echo in Unix shell
    #[cfg(windows)]
    let output = ProcessBuilder::raw("Write-Output 'hello'")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    #[cfg(not(windows))]
    let output = ProcessBuilder::new("echo")
        .arg("hello")
        .capture_output()
        .run()
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.stdout().trim(), "hello");
}

#[tokio::test]
async fn test_process_exit_code() {
    let output = ProcessBuilder::raw("exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await
        .expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[tokio::test]
async fn test_process_nonzero_exit_is_error() {
    let result = ProcessBuilder::raw("exit 3").run().await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_process_success_codes() {
    let output = ProcessBuilder::raw("exit 3")
        .success_codes([0, 3])
        .run()
        .await
        .expect("exit code 3 is allowed");

    assert_eq!(output.exit_code(), 3);
}

#[tokio::test]
async fn test_process_env() {
    // PowerShell uses $env:VAR syntax, Unix uses $VAR
    #[cfg(windows)]
    let output = ProcessBuilder::raw("Write-Output $env:TEST_VAR")
        .env("TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    #[cfg(not(windows))]
    let output = ProcessBuilder::raw("echo $TEST_VAR")
        .env("TEST_VAR", "test_value")
        .capture_stdout()
        .run()
        .await
        .expect("process should succeed");

    assert_eq!(output.stdout().trim(), "test_value");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_timeout_kills_child() {
    let result = ProcessBuilder::new("sleep")
        .arg("5")
        .timeout(std::time::Duration::from_millis(100))
        .run()
        .await;

    // Killed process exits with a non-success code
    assert!(result.is_err());
}

#[tokio::test]
async fn test_cancelled_token_short_circuits() {
    use tokio_util::sync::CancellationToken;

    let token = CancellationToken::new();
    token.cancel();

    let output = ProcessBuilder::raw("exit 0")
        .run_with_cancellation(token)
        .await
        .expect("pre-cancelled run returns interrupted output");

    assert!(output.is_interrupted());
    assert_eq!(output.exit_code(), -1);
}

#[test]
fn test_executable_lookup_found() {
    // cargo should always be available since we're running tests with cargo
    // Test which() - returns Result<ProcessBuilder>
    let which_result = ProcessBuilder::which("cargo");
    assert!(which_result.is_ok(), "which: cargo should be found in PATH");
    let builder = which_result.unwrap();
    assert!(
        builder.program().exists(),
        "which: returned program path should exist"
    );
    assert!(
        builder
            .program()
            .file_name()
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("cargo"),
        "which: should find cargo executable"
    );

    // Test exists() - returns bool
    assert!(
        ProcessBuilder::exists("cargo"),
        "exists: cargo should exist in PATH"
    );

    // Test find() - returns Option<PathBuf>
    let find_result = ProcessBuilder::find("cargo");
    assert!(find_result.is_some(), "find: cargo should be found");
    let path = find_result.unwrap();
    assert!(path.exists(), "find: returned path should exist");
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    // Test which() - returns error
    let which_result = ProcessBuilder::which(program);
    assert!(
        which_result.is_err(),
        "which: nonexistent program should not be found"
    );
    let err_msg = format!("{}", which_result.unwrap_err());
    assert!(
        err_msg.contains("not found") || err_msg.contains(program),
        "which: error should mention the program: {err_msg}"
    );

    // Test exists() - returns false
    assert!(
        !ProcessBuilder::exists(program),
        "exists: nonexistent program should not exist"
    );

    // Test find() - returns None
    let find_result = ProcessBuilder::find(program);
    assert!(
        find_result.is_none(),
        "find: nonexistent program should return None"
    );
}
