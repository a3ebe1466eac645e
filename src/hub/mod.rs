// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! GitHub REST client for the publish and bundle workflows.
//!
//! # API Surface
//!
//! ```text
//! HubClient
//!   get_contents()     GET    /repos/{owner}/{repo}/contents/{path}?ref={branch}
//!   latest_release()   GET    /repos/{owner}/{repo}/releases/latest
//!   release_by_tag()   GET    /repos/{owner}/{repo}/releases/tags/{tag}
//!   create_release()   POST   /repos/{owner}/{repo}/releases
//!   delete_asset()     DELETE /repos/{owner}/{repo}/releases/assets/{id}
//!   upload_asset()     POST   {upload_url}?name={file}
//!   download_asset()   GET    {browser_download_url}   (via [`crate::net::Downloader`])
//! ```
//!
//! Requests are authenticated with a bearer token when one is configured.
//! Reads work unauthenticated against public repositories; writes do not.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use base64::Engine;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{NetworkError, Result};
use crate::net::Downloader;

#[cfg(test)]
mod tests;

/// Default API endpoint.
const GITHUB_API: &str = "https://api.github.com";

/// An `owner/repo` pair extracted from a clone URL.
///
/// Only the last two path segments matter, so `https://github.com/a/b`,
/// `https://github.com/a/b.git` and `a/b` all parse to the same pair.
/// Case is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    /// Parses the trailing `owner/repo` segments out of a clone URL.
    pub fn parse(url: &str) -> Result<Self> {
        let trimmed = url.trim_end_matches('/');
        let trimmed = trimmed.strip_suffix(".git").unwrap_or(trimmed);
        let mut segments = trimmed.rsplit('/');
        let repo = segments.next().filter(|s| !s.is_empty());
        let owner = segments.next().filter(|s| !s.is_empty());
        match (owner, repo) {
            (Some(owner), Some(repo)) => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
            }),
            _ => Err(NetworkError::InvalidRepoUrl(url.to_string()).into()),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A file uploaded to a release.
#[derive(Debug, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    pub browser_download_url: String,
}

/// A release with its uploaded assets.
#[derive(Debug, Deserialize)]
pub struct Release {
    pub id: u64,
    pub tag_name: String,
    pub name: Option<String>,
    pub prerelease: bool,
    pub upload_url: String,
    pub html_url: Option<String>,
    pub assets: Vec<ReleaseAsset>,
}

impl Release {
    /// Finds an uploaded asset by exact file name.
    #[must_use]
    pub fn asset_named(&self, name: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }
}

/// Response shape of the contents API for a single file.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    encoding: String,
}

/// Minimal GitHub REST client.
///
/// One instance per command invocation; the underlying [`reqwest::Client`]
/// pools connections internally.
#[derive(Debug, Clone)]
pub struct HubClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HubClient {
    /// Creates a client, authenticated when `token` is present.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: GITHUB_API.to_string(),
            token,
        }
    }

    /// Points the client at a different API root. Used by tests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", format!("fab-rs/{}", env!("CARGO_PKG_VERSION")));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        request
    }

    async fn send_checked(&self, method: reqwest::Method, url: &str) -> Result<reqwest::Response> {
        let response = self
            .request(method, url)
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;
        Self::check_status(url, response).await
    }

    async fn check_status(url: &str, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(NetworkError::HttpError {
            status: status.as_u16(),
            url: format!("{url} (error: {body})"),
        }
        .into())
    }

    /// Fetches one file's bytes through the contents API.
    pub async fn get_contents(
        &self,
        repo: &RepoRef,
        path: &str,
        reference: &str,
    ) -> Result<Vec<u8>> {
        let url = format!(
            "{}/repos/{}/contents/{path}?ref={reference}",
            self.base_url, repo
        );
        debug!(url, "Fetching file contents");
        let response = self.send_checked(reqwest::Method::GET, &url).await?;
        let contents: ContentsResponse = response
            .json()
            .await
            .with_context(|| format!("failed to parse contents response from {url}"))?;
        if contents.encoding != "base64" {
            return Err(NetworkError::UnexpectedResponse {
                url,
                message: format!("unsupported content encoding '{}'", contents.encoding),
            }
            .into());
        }
        // The payload comes newline-wrapped at 60 columns.
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(contents.content.replace('\n', ""))
            .map_err(|error| NetworkError::UnexpectedResponse {
                url,
                message: format!("invalid base64 payload: {error}"),
            })?;
        Ok(bytes)
    }

    /// The most recently published release.
    pub async fn latest_release(&self, repo: &RepoRef) -> Result<Release> {
        let url = format!("{}/repos/{}/releases/latest", self.base_url, repo);
        debug!(url, "Fetching latest release");
        let response = self.send_checked(reqwest::Method::GET, &url).await?;
        response
            .json::<Release>()
            .await
            .with_context(|| format!("failed to parse release response from {url}"))
    }

    /// Looks up a release by tag. `None` when no release carries the tag.
    pub async fn release_by_tag(&self, repo: &RepoRef, tag: &str) -> Result<Option<Release>> {
        let url = format!("{}/repos/{}/releases/tags/{tag}", self.base_url, repo);
        debug!(url, "Fetching release by tag");
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check_status(&url, response).await?;
        let release = response
            .json::<Release>()
            .await
            .with_context(|| format!("failed to parse release response from {url}"))?;
        Ok(Some(release))
    }

    /// Creates a release for `tag`.
    pub async fn create_release(
        &self,
        repo: &RepoRef,
        tag: &str,
        name: &str,
        body: &str,
        prerelease: bool,
    ) -> Result<Release> {
        let url = format!("{}/repos/{}/releases", self.base_url, repo);
        info!(repo = %repo, tag, "Creating release");
        let payload = serde_json::json!({
            "tag_name": tag,
            "name": name,
            "body": body,
            "prerelease": prerelease,
        });
        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&payload)
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;
        let response = Self::check_status(&url, response).await?;
        response
            .json::<Release>()
            .await
            .with_context(|| format!("failed to parse release response from {url}"))
    }

    /// Deletes a previously uploaded asset.
    pub async fn delete_asset(&self, repo: &RepoRef, asset: &ReleaseAsset) -> Result<()> {
        let url = format!("{}/repos/{}/releases/assets/{}", self.base_url, repo, asset.id);
        info!(asset = asset.name, "Deleting existing release asset");
        let response = self
            .request(reqwest::Method::DELETE, &url)
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;
        Self::check_status(&url, response).await?;
        Ok(())
    }

    /// Uploads `file` as a release asset named after its file name.
    ///
    /// Replacing an asset requires deleting the old one first; the API
    /// rejects duplicate names with a 422.
    pub async fn upload_asset(&self, release: &Release, file: &Path) -> Result<ReleaseAsset> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("asset path has no file name: {}", file.display()))?;
        // The upload URL arrives templated, e.g. `...assets{?name,label}`.
        let base = release
            .upload_url
            .split('{')
            .next()
            .unwrap_or(&release.upload_url);
        let url = format!("{base}?name={name}");
        info!(asset = name, release = release.tag_name, "Uploading release asset");
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("failed to read {}", file.display()))?;
        let response = self
            .request(reqwest::Method::POST, &url)
            .header("Content-Type", "application/zip")
            .body(bytes)
            .send()
            .await
            .with_context(|| format!("failed to send request to {url}"))?;
        let response = Self::check_status(&url, response).await?;
        response
            .json::<ReleaseAsset>()
            .await
            .with_context(|| format!("failed to parse asset response from {url}"))
    }

    /// Downloads a release asset to `dest` with a progress bar.
    pub async fn download_asset(&self, asset: &ReleaseAsset, dest: &Path) -> Result<()> {
        info!(asset = asset.name, path = %dest.display(), "Downloading release asset");
        let mut downloader = Downloader::new().url(&asset.browser_download_url).file(dest);
        if let Some(token) = &self.token {
            downloader = downloader.header("Authorization", format!("Bearer {token}"));
        }
        downloader.download().await
    }
}
