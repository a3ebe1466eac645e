// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   fetch, package, upload, bundle, publish, install, config
//! ```

pub mod bundle;
pub mod config;
pub mod fetch;
pub mod install;
pub mod package;
pub mod publish;
pub mod upload;
