// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the GitHub client using wiremock.
//!
//! Tests the HubClient against a mock API, covering:
//! - Contents API (base64 payloads)
//! - Release lookup (latest, by tag, missing tag)
//! - Release creation
//! - Asset upload, delete and download

use fab_rs::error::NetworkError;
use fab_rs::hub::{HubClient, Release, RepoRef};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn test_repo() -> RepoRef {
    RepoRef::parse("https://github.com/FactorioAccess/FactorioAccessLauncher").unwrap()
}

fn release_json(server_uri: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "tag_name": "1.2.0",
        "name": "FactorioAccess 1.2.0",
        "prerelease": false,
        "upload_url": format!(
            "{server_uri}/repos/FactorioAccess/FactorioAccessLauncher/releases/7/assets{{?name,label}}"
        ),
        "html_url": "https://github.com/FactorioAccess/FactorioAccessLauncher/releases/tag/1.2.0",
        "assets": [
            {
                "id": 11,
                "name": "launcher.exe",
                "browser_download_url": format!("{server_uri}/download/launcher.exe")
            }
        ]
    })
}

// =============================================================================
// Contents API tests
// =============================================================================

#[tokio::test]
async fn test_get_contents_decodes_base64() {
    let mock_server = MockServer::start().await;

    // GitHub wraps base64 payloads in newlines at 60 columns.
    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/contents/Factorio.jkm",
        ))
        .and(query_param("ref", "main"))
        .and(header("Accept", "application/vnd.github+json"))
        .and(header(
            "User-Agent",
            format!("fab-rs/{}", env!("CARGO_PKG_VERSION")),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "SGVsbG8s\nIFdvcmxk\nIQ==\n",
            "encoding": "base64"
        })))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(None).with_base_url(mock_server.uri());
    let bytes = client
        .get_contents(&test_repo(), "Factorio.jkm", "main")
        .await
        .unwrap();

    assert_eq!(bytes, b"Hello, World!");
}

#[tokio::test]
async fn test_get_contents_sends_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/contents/Factorio.jkm",
        ))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "b2s=",
            "encoding": "base64"
        })))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(Some("t0ken".to_string())).with_base_url(mock_server.uri());
    let bytes = client
        .get_contents(&test_repo(), "Factorio.jkm", "main")
        .await
        .unwrap();

    assert_eq!(bytes, b"ok");
}

#[tokio::test]
async fn test_get_contents_rejects_unknown_encoding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/contents/Factorio.jkm",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "content": "plain text",
            "encoding": "utf-8"
        })))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(None).with_base_url(mock_server.uri());
    let err = client
        .get_contents(&test_repo(), "Factorio.jkm", "main")
        .await
        .unwrap_err();

    let network = err
        .downcast::<NetworkError>()
        .expect("should be a network error");
    match network {
        NetworkError::UnexpectedResponse { message, .. } => {
            assert!(message.contains("utf-8"), "unexpected message: {message}");
        }
        other => panic!("Expected NetworkError::UnexpectedResponse, got {other:?}"),
    }
}

// =============================================================================
// Release lookup tests
// =============================================================================

#[tokio::test]
async fn test_latest_release() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/releases/latest",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(&mock_server.uri())))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(None).with_base_url(mock_server.uri());
    let release = client.latest_release(&test_repo()).await.unwrap();

    assert_eq!(release.id, 7);
    assert_eq!(release.tag_name, "1.2.0");
    assert_eq!(release.asset_named("launcher.exe").map(|a| a.id), Some(11));
}

#[tokio::test]
async fn test_release_by_tag_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/releases/tags/1.2.0",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(release_json(&mock_server.uri())))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(None).with_base_url(mock_server.uri());
    let release = client.release_by_tag(&test_repo(), "1.2.0").await.unwrap();

    assert_eq!(release.map(|r| r.id), Some(7));
}

#[tokio::test]
async fn test_release_by_tag_missing_is_none() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/releases/tags/9.9.9",
        ))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(None).with_base_url(mock_server.uri());
    let release = client.release_by_tag(&test_repo(), "9.9.9").await.unwrap();

    assert!(release.is_none());
}

#[tokio::test]
async fn test_release_by_tag_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/releases/tags/1.2.0",
        ))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(None).with_base_url(mock_server.uri());
    let err = client
        .release_by_tag(&test_repo(), "1.2.0")
        .await
        .unwrap_err();

    let network = err
        .downcast::<NetworkError>()
        .expect("should be a network error");
    match network {
        NetworkError::HttpError { status, .. } => assert_eq!(status, 500),
        other => panic!("Expected NetworkError::HttpError, got {other:?}"),
    }
}

// =============================================================================
// Release creation tests
// =============================================================================

#[tokio::test]
async fn test_create_release_posts_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/FactorioAccess/FactorioAccessLauncher/releases"))
        .and(body_partial_json(serde_json::json!({
            "tag_name": "1.2.0",
            "name": "FactorioAccess 1.2.0",
            "prerelease": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(release_json(&mock_server.uri())))
        .mount(&mock_server)
        .await;

    let client = HubClient::new(Some("t0ken".to_string())).with_base_url(mock_server.uri());
    let release = client
        .create_release(
            &test_repo(),
            "1.2.0",
            "FactorioAccess 1.2.0",
            "Automated release",
            true,
        )
        .await
        .unwrap();

    assert_eq!(release.id, 7);
    assert_eq!(release.tag_name, "1.2.0");
}

// =============================================================================
// Asset tests
// =============================================================================

#[tokio::test]
async fn test_upload_asset_strips_url_template() {
    let mock_server = MockServer::start().await;

    // The upload_url arrives templated; the query part must be replaced
    // with the actual asset name.
    Mock::given(method("POST"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/releases/7/assets",
        ))
        .and(query_param("name", "FactorioAccess_1.2.0.zip"))
        .and(header("Content-Type", "application/zip"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 42,
            "name": "FactorioAccess_1.2.0.zip",
            "browser_download_url": format!(
                "{}/download/FactorioAccess_1.2.0.zip",
                mock_server.uri()
            )
        })))
        .mount(&mock_server)
        .await;

    let temp_dir = temp_dir();
    let archive = temp_dir.path().join("FactorioAccess_1.2.0.zip");
    std::fs::write(&archive, b"zip bytes").unwrap();

    let release: Release = serde_json::from_value(release_json(&mock_server.uri())).unwrap();
    let client = HubClient::new(Some("t0ken".to_string())).with_base_url(mock_server.uri());
    let asset = client.upload_asset(&release, &archive).await.unwrap();

    assert_eq!(asset.id, 42);
    assert_eq!(asset.name, "FactorioAccess_1.2.0.zip");
}

#[tokio::test]
async fn test_delete_asset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path(
            "/repos/FactorioAccess/FactorioAccessLauncher/releases/assets/11",
        ))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let release: Release = serde_json::from_value(release_json(&mock_server.uri())).unwrap();
    let asset = release.asset_named("launcher.exe").unwrap();
    let client = HubClient::new(Some("t0ken".to_string())).with_base_url(mock_server.uri());

    client.delete_asset(&test_repo(), asset).await.unwrap();
}

#[tokio::test]
async fn test_download_asset_writes_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/launcher.exe"))
        .and(header("Authorization", "Bearer t0ken"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"launcher bytes".to_vec()))
        .mount(&mock_server)
        .await;

    let release: Release = serde_json::from_value(release_json(&mock_server.uri())).unwrap();
    let asset = release.asset_named("launcher.exe").unwrap();

    let temp_dir = temp_dir();
    let dest = temp_dir.path().join("launcher.exe");

    let client = HubClient::new(Some("t0ken".to_string())).with_base_url(mock_server.uri());
    client.download_asset(asset, &dest).await.unwrap();

    assert_eq!(std::fs::read(&dest).unwrap(), b"launcher bytes");
}
