// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |         fetch / package / upload
//!                |        bundle / publish / install
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             release        git    net, hub
//!           dest / sync   gix/CLI  HTTP, GitHub
//!          assets / bundle
//!                |
//!          +-----+-----+
//!          v           v
//!      manifest      tools
//!     info.json    git / fmtk
//!
//!   +-----------------------------------------+
//!   |  core   process execution               |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod hub;
pub mod logging;
pub mod manifest;
pub mod net;
pub mod release;
pub mod tools;
pub mod utility;
