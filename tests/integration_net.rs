// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the network module using wiremock.
//!
//! Tests the Downloader with HTTP mocking, covering:
//! - File downloads
//! - Error handling (HTTP errors, missing params)
//! - Interrupt support
//! - Custom headers

use fab_rs::error::NetworkError;
use fab_rs::net::Downloader;
use std::sync::atomic::Ordering;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn network_err(result: fab_rs::error::Result<()>) -> NetworkError {
    result
        .unwrap_err()
        .downcast::<NetworkError>()
        .expect("not a NetworkError")
}

// =============================================================================
// Download tests
// =============================================================================

#[tokio::test]
async fn test_download_file_success() {
    // Start mock server
    let mock_server = MockServer::start().await;

    // Configure mock response
    let body_content = "Test file content\nLine 2\nLine 3";
    Mock::given(method("GET"))
        .and(path("/file.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_content))
        .mount(&mock_server)
        .await;

    // Create temp directory
    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("downloaded.txt");

    // Execute download (silent mode for tests)
    let url = format!("{}/file.txt", mock_server.uri());
    let downloader = Downloader::new().url(&url).file(&output_file).silent();
    let result = downloader.download().await;

    // Verify download succeeded
    assert!(result.is_ok(), "Download failed: {:?}", result.err());

    // Verify file content
    let content = std::fs::read_to_string(&output_file).unwrap();
    assert_eq!(content, body_content);
}

#[tokio::test]
async fn test_download_file_creates_parent_dirs() {
    // Start mock server
    let mock_server = MockServer::start().await;

    // Configure mock response
    Mock::given(method("GET"))
        .and(path("/data.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("nested content"))
        .mount(&mock_server)
        .await;

    // Create temp directory with nested path
    let temp_dir = temp_dir();
    let output_file = temp_dir
        .path()
        .join("deeply")
        .join("nested")
        .join("path")
        .join("file.txt");

    // Verify parent dirs don't exist yet
    assert!(!output_file.parent().unwrap().exists());

    // Execute download (silent mode for tests)
    let url = format!("{}/data.txt", mock_server.uri());
    let downloader = Downloader::new().url(&url).file(&output_file).silent();
    let result = downloader.download().await;

    // Verify download succeeded
    assert!(result.is_ok(), "Download failed: {:?}", result.err());

    // Verify parent directories were created
    assert!(output_file.parent().unwrap().exists());

    // Verify file content
    let content = std::fs::read_to_string(&output_file).unwrap();
    assert_eq!(content, "nested content");
}

#[tokio::test]
async fn test_download_http_errors() {
    for (status, file) in [(404, "missing.txt"), (500, "error.txt")] {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/{file}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;

        let temp_dir = temp_dir();
        let output_file = temp_dir.path().join("should_not_exist.txt");

        let url = format!("{}/{file}", mock_server.uri());
        let downloader = Downloader::new().url(&url).file(&output_file).silent();
        let result = downloader.download().await;

        // Verify we get an HTTP error
        assert!(result.is_err());
        match network_err(result) {
            NetworkError::HttpError {
                status: actual_status,
                ..
            } => {
                assert_eq!(actual_status, status);
            }
            other => panic!("Expected NetworkError::HttpError for {status}, got {other:?}"),
        }

        // Verify file was not created
        assert!(!output_file.exists());
    }
}

// =============================================================================
// Interrupt tests
// =============================================================================

#[tokio::test]
async fn test_download_interrupted() {
    // Start mock server
    let mock_server = MockServer::start().await;

    // Configure mock response with large body to allow time for interrupt
    let body_content = "x".repeat(1024 * 1024); // 1MB
    Mock::given(method("GET"))
        .and(path("/large.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body_content))
        .mount(&mock_server)
        .await;

    // Create temp directory
    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("large.txt");

    // Create downloader and get interrupt handle
    let url = format!("{}/large.txt", mock_server.uri());
    let downloader = Downloader::new().url(&url).file(&output_file).silent();
    let interrupt_handle = downloader.interrupt_handle();

    // Set interrupt flag immediately
    interrupt_handle.store(true, Ordering::SeqCst);

    // Execute download (should be interrupted)
    let result = downloader.download().await;

    // Verify we get interrupted error
    assert!(result.is_err());
    match network_err(result) {
        NetworkError::Interrupted => {
            // Expected
        }
        other => panic!("Expected NetworkError::Interrupted, got {other:?}"),
    }

    // Verify file was cleaned up (deleted)
    assert!(!output_file.exists(), "Partial file should be cleaned up");
}

// =============================================================================
// Custom headers tests
// =============================================================================

#[tokio::test]
async fn test_custom_header() {
    // Start mock server
    let mock_server = MockServer::start().await;

    // Configure mock that expects custom headers
    Mock::given(method("GET"))
        .and(path("/auth.txt"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("X-Custom", "custom-value"))
        .respond_with(ResponseTemplate::new(200).set_body_string("authenticated"))
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("auth.txt");

    // Execute download with custom headers
    let url = format!("{}/auth.txt", mock_server.uri());
    let downloader = Downloader::new()
        .url(&url)
        .file(&output_file)
        .header("Authorization", "Bearer test-token")
        .header("X-Custom", "custom-value")
        .silent();
    let result = downloader.download().await;

    // Verify
    assert!(result.is_ok(), "Download failed: {:?}", result.err());
    let content = std::fs::read_to_string(&output_file).unwrap();
    assert_eq!(content, "authenticated");
}

#[tokio::test]
async fn test_user_agent_set() {
    // Start mock server
    let mock_server = MockServer::start().await;

    // Configure mock that expects User-Agent
    Mock::given(method("GET"))
        .and(path("/ua.txt"))
        .and(header(
            "User-Agent",
            format!("fab-rs/{}", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("ua.txt");

    // Execute download
    let url = format!("{}/ua.txt", mock_server.uri());
    let downloader = Downloader::new().url(&url).file(&output_file).silent();
    let result = downloader.download().await;

    // Verify
    assert!(result.is_ok(), "Download failed: {:?}", result.err());
    let content = std::fs::read_to_string(&output_file).unwrap();
    assert_eq!(content, "ok");
}

// =============================================================================
// Error handling tests
// =============================================================================

#[tokio::test]
async fn test_download_no_url_errors() {
    let temp_dir = temp_dir();
    let output_file = temp_dir.path().join("test.txt");
    let downloader = Downloader::new().file(&output_file).silent();
    let result = downloader.download().await;

    assert!(result.is_err());
    match network_err(result) {
        NetworkError::InvalidUrl(msg) => {
            assert!(msg.contains("no URL provided"));
        }
        other => panic!("Expected NetworkError::InvalidUrl, got {other:?}"),
    }
}

#[tokio::test]
async fn test_download_no_file_error() {
    // Start mock server
    let mock_server = MockServer::start().await;

    // Configure mock response
    Mock::given(method("GET"))
        .and(path("/test.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("content"))
        .mount(&mock_server)
        .await;

    // Create downloader without output file
    let url = format!("{}/test.txt", mock_server.uri());
    let downloader = Downloader::new().url(&url).silent();
    let result = downloader.download().await;

    // Verify we get DownloadFailed error
    assert!(result.is_err());
    match network_err(result) {
        NetworkError::DownloadFailed { message, .. } => {
            assert!(message.contains("no output file specified"));
        }
        other => panic!("Expected NetworkError::DownloadFailed, got {other:?}"),
    }
}
