// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! External tool wrappers.
//!
//! ```text
//! Command --> ToolContext --> ProcessBuilder --> Tools
//!   GitTool:  clone | fetch | checkout | pull
//!   FmtkTool: package | upload
//! ToolContext: cancel token + dry-run, shared per invocation
//! ```
//!
//! All tools support graceful cancellation via `CancellationToken` and run
//! under a bounded timeout so a stalled remote fails one module instead of
//! hanging the whole batch.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

pub mod fmtk;
pub mod git;

/// Upper bound for a single external tool run.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(300);

/// Context provided to tools during execution.
///
/// Carries the cancellation token and execution flags shared by every tool
/// run within one command invocation.
#[derive(Debug, Clone, Default)]
pub struct ToolContext {
    /// Cancellation token for cooperative cancellation.
    /// Tools should check this token periodically and abort if cancelled.
    cancel_token: CancellationToken,

    /// Whether this is a dry-run execution.
    /// When true, tools log what they would do without making changes.
    dry_run: bool,
}

impl ToolContext {
    /// Creates a new `ToolContext`.
    #[must_use]
    pub const fn new(cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
        }
    }

    /// Returns a reference to the cancellation token.
    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Returns whether this is a dry-run execution.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Checks if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }
}
