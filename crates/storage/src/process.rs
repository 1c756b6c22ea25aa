// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use nix::errno::Errno;
use nix::sys::signal::kill;
use nix::unistd::Pid;

/// Probe whether `pid` names a live process.
///
/// Sends the null signal. `EPERM` means the process exists but belongs to
/// someone else, which still counts as alive. Non-positive PIDs address
/// process groups and are never alive.
pub fn is_process_alive(pid: i32) -> bool {
    if pid <= 0 {
        return false;
    }
    match kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
