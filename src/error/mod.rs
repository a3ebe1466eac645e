// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              FabError (~24 bytes)
//!                     |
//!   +----+----+----+--+--+----+----+----+----+
//!   |    |    |    |     |    |    |    |    |
//!   v    v    v    v     v    v    v    v    v
//! Bail  Git  Net  Cfg  Manif Asset Bndl Proc Fs/Io/Other
//!       Box  Box  Box   Box   Box  Box  Box  Box
//!
//! Sub-errors (unboxed internally):
//!   Git      NotAWorkingCopy, RemoteMismatch, CommandFailed, Gix
//!   Network  Reqwest, HttpError, InvalidRepoUrl, AssetNotFound
//!   Config   NotFound, ParseError, AbsoluteModuleDest, UnknownModule
//!   Manifest Missing, Malformed, NameMismatch, NotAModule
//!   Asset    Missing, Ambiguous
//!   Bundle   CompanionMissing, MissingAsset, Zip
//!   Process  SpawnFailed, NonZeroExit, Timeout
//!   Fs       NotFound, PermissionDenied, IoError
//!
//! All variants boxed => FabError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`FabError`].
pub type FabResult<T> = std::result::Result<T, FabError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum FabError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Module manifest error.
    #[error("manifest error: {0}")]
    Manifest(#[from] Box<ManifestError>),

    /// Asset discovery error.
    #[error("asset error: {0}")]
    Asset(#[from] Box<AssetError>),

    /// Bundle assembly error.
    #[error("bundle error: {0}")]
    Bundle(#[from] Box<BundleError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(#[from] Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`FabError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> FabError {
    FabError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for FabError {
                fn from(err: $error) -> Self {
                    FabError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    NetworkError => Network,
    ConfigError => Config,
    ManifestError => Manifest,
    AssetError => Asset,
    BundleError => Bundle,
    ProcessError => Process,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// gix has multiple error types that are converted through this enum.
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Destination exists but is not a git working copy.
    #[error(
        "directory '{path}' exists but is not a git working copy; \
         move or delete it manually and retry"
    )]
    NotAWorkingCopy { path: String },

    /// Working copy remotes do not include the configured repository URL.
    #[error(
        "directory '{path}' is a git working copy, but its remotes do not match \
         the expected repo URL (expected: {expected}, found: {found:?}); \
         move or delete this directory and retry"
    )]
    RemoteMismatch {
        path: String,
        expected: String,
        found: Vec<String>,
    },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Download failed.
    #[error("download failed: {url} - {message}")]
    DownloadFailed { url: String, message: String },

    /// Download was interrupted by user or signal.
    #[error("download interrupted")]
    Interrupted,

    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A repository URL that does not name `owner/repo`.
    #[error("invalid repository url: {0}")]
    InvalidRepoUrl(String),

    /// Response did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    UnexpectedResponse { url: String, message: String },

    /// Named asset missing from a release.
    #[error("asset '{asset}' not found in release '{release}'")]
    AssetNotFound { asset: String, release: String },

    /// Connection timeout.
    #[error("connection timeout: {url}")]
    Timeout { url: String },

    /// I/O error during download.
    #[error("io error during download: {0}")]
    Io(#[from] std::io::Error),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required setting.
    #[error("missing required setting '{key}' in [settings]")]
    MissingSetting { key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Per-module destination override is absolute.
    #[error(
        "per-module dest must not be absolute (module '{module}', dest '{dest}')"
    )]
    AbsoluteModuleDest { module: String, dest: String },

    /// Two modules share the same name.
    #[error("duplicate module name '{0}'")]
    DuplicateModule(String),

    /// A module name was requested that the config does not declare.
    #[error("module '{0}' not found in config")]
    UnknownModule(String),
}

// --- Manifest Errors ---

/// Module manifest (info.json) errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// No info.json at the expected location.
    #[error("missing info.json in {path}")]
    Missing { path: String },

    /// info.json exists but cannot be used.
    #[error("invalid info.json in {path}: {message}")]
    Malformed { path: String, message: String },

    /// Declared name differs from the configured module name.
    #[error("info.json name mismatch in {path}: expected '{expected}', found '{found}'")]
    NameMismatch {
        path: String,
        expected: String,
        found: String,
    },

    /// Path is neither a module directory nor a zip archive.
    #[error("not a module directory or zip archive: {path}")]
    NotAModule { path: String },
}

// --- Asset Errors ---

/// Asset discovery errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// No valid artifact found for a module.
    #[error("no valid asset found for module '{module}' in {search_root}")]
    Missing {
        module: String,
        search_root: String,
    },

    /// More than one valid artifact found for a module.
    #[error("multiple valid assets found for module '{module}': {candidates:?}")]
    Ambiguous {
        module: String,
        candidates: Vec<String>,
    },
}

// --- Bundle Errors ---

/// Bundle assembly errors.
#[derive(Debug, Error)]
pub enum BundleError {
    /// A companion file is absent and could not be provided.
    #[error("companion file '{name}' not found at {path}")]
    CompanionMissing { name: String, path: String },

    /// A module was declared but no asset was discovered for it.
    #[error("no asset available for module '{0}' during assembly")]
    MissingAsset(String),

    /// Archive creation failed.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Permission denied.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests;
