// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures: an isolated state dir and a fluent runner.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME, config, and state directories for one spec.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.dir.path().join("state")
    }

    pub fn ledger(&self) -> PathBuf {
        self.state_dir().join("run4ever.state")
    }

    pub fn jobs(&self) -> PathBuf {
        self.state_dir().join("jobs.json")
    }

    /// Write `content` to `rel` under the project root.
    pub fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn run4ever(&self) -> Run {
        let mut cmd = assert_cmd::Command::cargo_bin("run4ever").unwrap();
        cmd.env("RUN4EVER_STATE_DIR", self.state_dir())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("RUN4EVER_LOG")
            .env_remove("RUN4EVER_NOTIFY_ON")
            .env_remove("RUN4EVER_NOTIFY_METHOD")
            .timeout(std::time::Duration::from_secs(30));
        Run { cmd }
    }
}

/// A `run4ever` invocation under construction
pub struct Run {
    cmd: assert_cmd::Command,
}

impl Run {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and require exit code 0.
    pub fn passes(self) -> Output {
        self.exits(0)
    }

    /// Run and require `code`.
    pub fn exits(mut self, code: i32) -> Output {
        let out = self.cmd.output().unwrap();
        let output = Output {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        };
        assert_eq!(
            output.code,
            Some(code),
            "unexpected exit status\nstdout:\n{}\nstderr:\n{}",
            output.stdout,
            output.stderr
        );
        output
    }
}

/// Captured result of a finished invocation
pub struct Output {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Output {
    pub fn stdout_has(&self, needle: &str) -> &Self {
        assert!(self.stdout.contains(needle), "stdout missing {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stdout_lacks(&self, needle: &str) -> &Self {
        assert!(!self.stdout.contains(needle), "stdout has {needle:?}:\n{}", self.stdout);
        self
    }

    pub fn stderr_has(&self, needle: &str) -> &Self {
        assert!(self.stderr.contains(needle), "stderr missing {needle:?}:\n{}", self.stderr);
        self
    }
}

/// Poll `check` until it holds or `secs` elapse.
pub fn wait_for(secs: u64, mut check: impl FnMut() -> bool) -> bool {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(secs);
    while std::time::Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    check()
}
