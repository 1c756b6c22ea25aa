// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Launching detached supervisor processes.

use std::os::unix::process::CommandExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Errors from spawning a detached process
#[derive(Debug, Error)]
#[error("failed to start {}: {source}", program.display())]
pub struct SpawnError {
    pub program: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Starts processes that outlive the caller.
pub trait ProcessSpawner: Send + Sync {
    /// Start `program` with `args`, detached from the caller. Returns the PID.
    fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<u32, SpawnError>;
}

/// Real spawner: null stdio, own process group, never waited on.
#[derive(Clone, Copy, Debug, Default)]
pub struct DetachedSpawner;

impl ProcessSpawner for DetachedSpawner {
    fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<u32, SpawnError> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            // Leave the caller's process group so terminal signals aimed at
            // the caller do not reach the detached supervisor.
            .process_group(0)
            .spawn()
            .map_err(|source| SpawnError { program: program.to_path_buf(), source })?;

        let pid = child.id();
        tracing::info!(pid, program = %program.display(), "started detached process");
        Ok(pid)
    }
}

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(coverage_nightly, coverage(off))]
mod fake {
    use super::{ProcessSpawner, SpawnError};
    use parking_lot::Mutex;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    /// Recorded spawn
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SpawnCall {
        pub program: PathBuf,
        pub args: Vec<String>,
    }

    #[derive(Default)]
    struct FakeSpawnerState {
        calls: Vec<SpawnCall>,
        fail_on: Vec<usize>,
    }

    /// Fake spawner for testing; records calls and hands out sequential PIDs.
    #[derive(Clone, Default)]
    pub struct FakeSpawner {
        inner: Arc<Mutex<FakeSpawnerState>>,
    }

    impl FakeSpawner {
        pub fn new() -> Self {
            Self::default()
        }

        /// Make the `n`th spawn (0-based) fail.
        pub fn fail_on(self, n: usize) -> Self {
            self.inner.lock().fail_on.push(n);
            self
        }

        pub fn calls(&self) -> Vec<SpawnCall> {
            self.inner.lock().calls.clone()
        }
    }

    impl ProcessSpawner for FakeSpawner {
        fn spawn_detached(&self, program: &Path, args: &[String]) -> Result<u32, SpawnError> {
            let mut inner = self.inner.lock();
            let index = inner.calls.len();
            inner.calls.push(SpawnCall { program: program.to_path_buf(), args: args.to_vec() });
            if inner.fail_on.contains(&index) {
                return Err(SpawnError {
                    program: program.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "fake spawn failure"),
                });
            }
            Ok(10_000 + index as u32)
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeSpawner, SpawnCall};

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
