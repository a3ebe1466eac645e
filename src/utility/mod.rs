// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   bytes_to_utf8()  CP1252/UTF-16 --> UTF-8
//!   EncodedBuffer    streaming line iterator
//! fs
//!   walk:  find_files(), WalkOptions
//!   copy:  copy_dir_contents_async(), remove_entry_async()
//!   paths: normalize_lexically()
//! ```

pub mod encoding;
pub mod fs;
