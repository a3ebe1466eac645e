// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release pipeline building blocks.
//!
//! ```text
//! dest.rs    where does a module live on disk
//! sync.rs    bring the working copy to the configured state
//! assets.rs  find the packaged zip / source dir per module
//! modlist.rs generate mod-list.json
//! bundle.rs  stage and archive the distribution bundle
//! ```
//!
//! Commands in [`crate::cmd`] compose these; nothing here parses CLI
//! arguments or decides process exit codes.

pub mod assets;
pub mod bundle;
pub mod dest;
pub mod modlist;
pub mod sync;
