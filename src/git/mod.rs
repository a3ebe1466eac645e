// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git working-copy inspection.
//!
//! ```text
//!        Public API
//!    query.rs   remote.rs
//!        \         |
//!         v        v
//!      ,------------------,
//!      | backend (trait)  |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .remote_urls
//!    .branch     .init_repo
//! ```
//!
//! [`GixBackend`](backend::GixBackend) is pure Rust, no subprocess, read-only.
//! [`ShellBackend`](backend::ShellBackend) shells out to the git CLI for
//! remote listing.
//!
//! Everything here observes; mutations (clone, fetch, checkout, pull) live
//! in [`crate::tools::git`] where they run async with cancellation and
//! timeouts.

pub mod backend;
pub mod query;
pub mod remote;
