// fab: Factorio Access Release Tool
//
// SPDX-FileCopyrightText: 2026 Factorio Access Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows-specific process utilities.
//!
//! ```text
//! send_ctrl_break(pid) --> CTRL_BREAK_EVENT
//! cancellation: ctrl_break -> 500ms -> kill -> wait
//! ```
//!
//! Children are spawned with `CREATE_NEW_PROCESS_GROUP`, so the pid
//! doubles as the process group id for `GenerateConsoleCtrlEvent`.

use crate::error::Result;

/// Sends CTRL+BREAK to a process on Windows.
///
/// # Errors
///
/// Returns an error if `GenerateConsoleCtrlEvent` fails.
pub(super) fn send_ctrl_break(pid: u32) -> Result<()> {
    use windows::Win32::System::Console::CTRL_BREAK_EVENT;
    use windows::Win32::System::Console::GenerateConsoleCtrlEvent;

    // SAFETY: GenerateConsoleCtrlEvent is safe to call with a valid process group ID
    unsafe {
        GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, pid).map_err(|e: windows::core::Error| {
            anyhow::anyhow!("Failed to send CTRL_BREAK: {}", e.message())
        })?;
    }
    Ok(())
}
