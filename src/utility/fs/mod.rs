// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  find_files()     glob pattern matching over ignore::WalkParallel
//!        WalkOptions      max_depth, hidden, gitignore
//! copy:  copy_dir_contents_async() recursive directory copy with skip list
//! paths: normalize_lexically()    pure path normalization
//! ```

pub mod copy;
pub mod paths;
pub mod walk;
