// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!     core
//!      |
//!      v
//!   process
//!      |
//!   Builder
//!   Output
//! ```

pub mod process;
